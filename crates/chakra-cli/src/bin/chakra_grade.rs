// chakra-grade: Grade fragment arrays against a dictionary.
//
// Fragments come either from the command line or from a directory of
// solution files written by chakra-search (every forward, reversed and
// rotation reading becomes one array). Arrays scoring above the threshold
// are written to `{id}_grading_{score}.txt` in the output directory.
//
// Usage:
//   chakra-grade --dict FILE (--fragments "a,b,c" | --dir DIR) [OPTIONS]

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chakra_cli::{default_lexicon_name, find_data_file, load_lexicon, read_fragment_arrays, split_items};
use chakra_core::Script;
use chakra_lexicon::{CorpusGrade, CorpusGrader, FragmentArray};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "chakra-grade")]
#[command(about = "Grade fragment arrays by dictionary plausibility")]
struct Args {
    /// Dictionary file
    #[arg(long)]
    dict: Option<PathBuf>,

    /// Comma or space separated fragments
    #[arg(long, conflicts_with = "dir", required_unless_present = "dir")]
    fragments: Option<String>,

    /// Directory of solution files (*.txt)
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Script of the fragments
    #[arg(long, default_value_t = Script::Devanagari)]
    script: Script,

    /// Minimum score (percent) for writing a grading file
    #[arg(long, default_value_t = 60.0)]
    threshold: f64,

    /// Output directory for grading files
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// Print the corpus grade as JSON
    #[arg(long)]
    json: bool,

    /// Debug logging
    #[arg(long)]
    verbose: bool,
}

fn load_arrays(dir: &Path, script: Script) -> Result<Vec<FragmentArray>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    files.sort();

    let mut arrays = Vec::new();
    for file in files {
        let text = match std::fs::read_to_string(&file) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("skipping {}: {e}", file.display());
                continue;
            }
        };
        let stem = file.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
        arrays.extend(read_fragment_arrays(&stem, &text, script));
    }
    log::info!("{}: {} fragment arrays", dir.display(), arrays.len());
    Ok(arrays)
}

fn print_report(out: &mut impl Write, corpus: &CorpusGrade) -> io::Result<()> {
    for array in &corpus.arrays {
        writeln!(
            out,
            "{}: {:.1} ({}), {} of {} fragments valid",
            array.id, array.score, array.grade, array.valid_fragments, array.total_fragments
        )?;
        for issue in &array.issues {
            writeln!(out, "  ! {issue}")?;
        }
    }
    writeln!(out)?;
    writeln!(out, "arrays:    {} ({:.1}% passing)", corpus.total_arrays, corpus.passing_percentage())?;
    writeln!(out, "fragments: {} ({:.1}% valid)", corpus.total_fragments, corpus.valid_percentage())?;
    writeln!(out, "average:   {:.1} ({})", corpus.average_score, corpus.grade)?;
    for (grade, count) in &corpus.grade_counts {
        writeln!(out, "  {grade:<2} {count}")?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    chakra_cli::init_logging(args.verbose);

    let path = find_data_file(args.dict.as_deref(), default_lexicon_name(args.script))?;
    let lexicon = load_lexicon(args.script, &path)?;

    let arrays = match (&args.fragments, &args.dir) {
        (Some(text), _) => vec![FragmentArray::new("command_line_input", split_items(text))],
        (None, Some(dir)) => load_arrays(dir, args.script)?,
        (None, None) => bail!("either --fragments or --dir is required"),
    };

    let grader = CorpusGrader::new(lexicon.as_ref(), args.script);
    let corpus = grader.grade_corpus(&arrays);

    std::fs::create_dir_all(&args.out).with_context(|| format!("failed to create {}", args.out.display()))?;
    for (array, graded) in arrays.iter().zip(&corpus.arrays) {
        if graded.score > args.threshold {
            let file = args.out.join(format!("{}_grading_{}.txt", array.id, graded.score.round()));
            std::fs::write(&file, array.fragments.join(","))
                .with_context(|| format!("failed to write {}", file.display()))?;
            log::info!("{} -> {}", array.id, file.display());
        }
    }

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    if args.json {
        serde_json::to_writer_pretty(&mut out, &corpus)?;
        writeln!(out)?;
    } else {
        print_report(&mut out, &corpus)?;
    }
    out.flush()?;
    Ok(())
}
