// chakra-search: Find constrained Hamiltonian paths or cycles on a grid.
//
// Reads a toroidal grid of letter codes, searches for complete paths (or
// cycles) whose vowel and consonant runs stay within limits, decodes each
// solution into Devanagari and Kannada fragments, and writes it to
// `{prefix}-{n}.txt`. Solutions whose best score exceeds the threshold are
// also copied to `Graded/{score}_Graded_{file}`.
//
// Usage:
//   chakra-search GRID [OPTIONS]
//
// Example:
//   chakra-search grid.txt --strategy genetic --cycle --solutions 3 --out out/

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chakra_cli::{SolutionWriter, format_solution};
use chakra_lexicon::DecodeReport;
use chakra_search::{
    GeneticConfig, RandomizedConfig, RunLimits, SearchConfig, SearchMode, SearchOutcome, SearchStrategy,
    Searcher, build_search, verify_solution,
};
use clap::Parser;
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(name = "chakra-search")]
#[command(about = "Search a toroidal letter grid for constrained Hamiltonian paths or cycles")]
struct Args {
    /// Grid file: positive integers separated by commas or whitespace
    grid: PathBuf,

    /// Search strategy (warnsdorff, randomized, genetic)
    #[arg(long, default_value_t = SearchStrategy::Warnsdorff)]
    strategy: SearchStrategy,

    /// Require the last cell to wrap back to the first
    #[arg(long)]
    cycle: bool,

    /// Maximum consecutive vowels
    #[arg(short = 'v', long = "vowels", default_value_t = 2)]
    vowels: usize,

    /// Maximum consecutive consonants
    #[arg(short = 'c', long = "consonants", default_value_t = 3)]
    consonants: usize,

    /// Wall-clock budget per solution, in seconds
    #[arg(long, default_value_t = 120)]
    timeout: u64,

    /// Construction attempts per solution (restart strategies)
    #[arg(long, default_value_t = 100_000)]
    max_attempts: usize,

    /// Number of distinct solutions to find
    #[arg(long, default_value_t = 1)]
    solutions: usize,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Probability of exploring the top-k candidates (randomized strategy)
    #[arg(long, default_value_t = 0.3)]
    explore: f64,

    /// Genetic population size
    #[arg(long, default_value_t = 100)]
    population: usize,

    /// Genetic generation budget
    #[arg(long, default_value_t = 1000)]
    generations: usize,

    /// Treat rotations of a cycle as the same solution
    #[arg(long)]
    rotation_invariant: bool,

    /// Output file prefix
    #[arg(long, default_value = "sample")]
    prefix: String,

    /// Output directory
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// Minimum score (percent) for a graded copy
    #[arg(long, default_value_t = 65.0)]
    threshold: f64,

    /// Devanagari dictionary (pipe or tagged format)
    #[arg(long)]
    dict: Option<PathBuf>,

    /// Kannada glossary or headword list
    #[arg(long)]
    kannada: Option<PathBuf>,

    /// Print one JSON record per solution
    #[arg(long)]
    json: bool,

    /// Debug logging
    #[arg(long)]
    verbose: bool,
}

#[derive(Serialize)]
struct SolutionRecord<'a> {
    index: usize,
    file: PathBuf,
    graded: Option<PathBuf>,
    cells: Vec<(usize, usize, u32)>,
    outcome: &'a SearchOutcome,
    report: Option<&'a DecodeReport>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    chakra_cli::init_logging(args.verbose);

    let grid = chakra_cli::read_grid(&args.grid)?;
    let config = SearchConfig {
        limits: RunLimits::new(args.vowels, args.consonants),
        mode: if args.cycle { SearchMode::Cycle } else { SearchMode::Path },
        timeout: Duration::from_secs(args.timeout),
        max_attempts: args.max_attempts,
        seed: args.seed,
        rotation_invariant: args.rotation_invariant,
        ..SearchConfig::default()
    };
    let randomized = RandomizedConfig {
        explore_probability: args.explore,
        ..RandomizedConfig::default()
    };
    let genetic = GeneticConfig {
        population_size: args.population,
        generations: args.generations,
        ..GeneticConfig::default()
    };

    let decoder = chakra_cli::load_decoder(args.dict.as_deref(), args.kannada.as_deref())?;
    let decodes = decoder.scripts().next().is_some();
    let writer = SolutionWriter::new(&args.out, &args.prefix, args.threshold);

    let search =
        build_search(args.strategy, &config, randomized, &genetic).context("invalid search settings")?;
    let mut searcher = Searcher::new(&grid, &config, search);

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for index in 1..=args.solutions {
        let outcome = searcher.next_unique();
        if !outcome.complete {
            writeln!(
                out,
                "no further solution within budget (best length {} of {})",
                outcome.path.len(),
                grid.len()
            )?;
            break;
        }
        verify_solution(&grid, &outcome.path, config.limits, config.mode)
            .context("search returned an invalid solution")?;

        let codes = grid.values(&outcome.path);
        let report = decodes.then(|| match config.mode {
            SearchMode::Cycle => decoder.decode_cycle(&codes),
            SearchMode::Path => decoder.decode(&codes),
        });
        let body = format_solution(&grid, &outcome.path, report.as_ref());
        let file = writer.write(index, &body)?;
        let graded = match &report {
            Some(r) => writer.write_graded(&file, r.best_score(), &body)?,
            None => None,
        };

        if args.json {
            let record = SolutionRecord {
                index,
                file,
                graded,
                cells: outcome.cells(&grid),
                outcome: &outcome,
                report: report.as_ref(),
            };
            serde_json::to_writer(&mut out, &record)?;
            writeln!(out)?;
        } else {
            write!(
                out,
                "solution {index}: {} ({} iterations, {:.1?})",
                file.display(),
                outcome.iterations,
                outcome.elapsed
            )?;
            if let Some(r) = &report {
                write!(out, " score {:.1}", r.best_score())?;
            }
            if let Some(g) = &graded {
                write!(out, " -> {}", g.display())?;
            }
            writeln!(out)?;
        }
    }

    out.flush()?;
    Ok(())
}
