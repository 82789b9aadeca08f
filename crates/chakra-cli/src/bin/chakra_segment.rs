// chakra-segment: Split letter sequences from stdin into fragments.
//
// Each input line is one letter sequence (units separated by commas or
// whitespace, quotes allowed). Prints the longest-match fragments joined
// by commas, one line per input line.
//
// Usage:
//   chakra-segment --dict FILE [--script devanagari|kannada] [--reversed] [--score]

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use chakra_cli::{default_lexicon_name, find_data_file, load_lexicon, split_items};
use chakra_core::Script;
use chakra_lexicon::{FragmentScorer, Segmenter, UnitTrie};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "chakra-segment")]
#[command(about = "Longest-match segmentation of letter sequences read from stdin")]
struct Args {
    /// Dictionary or word list the trie is built from
    #[arg(long)]
    dict: Option<PathBuf>,

    #[arg(long, default_value_t = Script::Devanagari)]
    script: Script,

    /// Read each sequence backwards
    #[arg(long)]
    reversed: bool,

    /// Append the dictionary score of each line
    #[arg(long)]
    score: bool,

    /// Debug logging
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    chakra_cli::init_logging(args.verbose);

    let path = find_data_file(args.dict.as_deref(), default_lexicon_name(args.script))?;
    let lexicon = load_lexicon(args.script, &path)?;
    let trie = UnitTrie::build(args.script, lexicon.all_words());
    let segmenter = Segmenter::new(&trie);
    let scorer = FragmentScorer::new(lexicon.as_ref(), args.script);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("error reading stdin: {e}");
                break;
            }
        };
        let letters = split_items(&line);
        if letters.is_empty() {
            continue;
        }
        let fragments = if args.reversed {
            segmenter.extract_words_reversed(&letters)
        } else {
            segmenter.extract_words(&letters)
        };
        if args.score {
            writeln!(out, "{}\t{:.1}", fragments.join(","), scorer.score(&fragments))?;
        } else {
            writeln!(out, "{}", fragments.join(","))?;
        }
    }

    out.flush()?;
    Ok(())
}
