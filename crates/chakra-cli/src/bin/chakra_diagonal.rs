// chakra-diagonal: Read a grid along its wrapped anti-diagonals.
//
// For i, j in 0..n the cell ((n - (i + j) % n) % n, (j + offset) % n) is
// read in row-major order over (i, j) and printed as text, with each
// vowel folded into the preceding half-letter.
//
// Usage:
//   chakra-diagonal GRID [--offset 5] [--script devanagari|kannada]

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use chakra_core::Script;
use chakra_lexicon::units::render;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "chakra-diagonal")]
#[command(about = "Print the diagonal readout of a grid as letters")]
struct Args {
    /// Grid file
    grid: PathBuf,

    /// Column offset of the readout
    #[arg(long, default_value_t = 5)]
    offset: usize,

    /// Only this script (default: all)
    #[arg(long)]
    script: Option<Script>,

    /// Also print the raw codes
    #[arg(long)]
    codes: bool,

    /// Debug logging
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    chakra_cli::init_logging(args.verbose);

    let grid = chakra_cli::read_grid(&args.grid)?;
    let order = grid.diagonal_readout(args.offset);
    let codes = grid.values(&order);

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    if args.codes {
        let line: Vec<String> = codes.iter().map(u32::to_string).collect();
        writeln!(out, "{}", line.join(","))?;
    }
    let scripts: Vec<Script> = match args.script {
        Some(script) => vec![script],
        None => Script::ALL.to_vec(),
    };
    for script in scripts {
        writeln!(out, "{script}: {}", render(script, &script.letters(&codes)))?;
    }

    out.flush()?;
    Ok(())
}
