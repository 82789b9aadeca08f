// chakra-cli: shared utilities for the command-line tools.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chakra_core::Script;
use chakra_lexicon::dictionary::wordlist;
use chakra_lexicon::{DecodeReport, Decoder, Dictionary, FragmentArray, Lexicon, UnitTrie, WordList};
use chakra_search::{ToroidalGrid, VertexId};

/// Environment variable naming a directory with dictionary files.
pub const DATA_PATH_ENV: &str = "CHAKRA_DATA_PATH";

/// Per-user data directory under `$HOME`.
const DATA_DIR: &str = ".chakra";

/// Devanagari dictionary file name looked up when `--dict` is absent.
pub const DEVANAGARI_DICT: &str = "sanskrit.txt";

/// Kannada glossary file name looked up when `--kannada` is absent.
pub const KANNADA_WORDS: &str = "kannada.txt";

/// Sub-directory of the output directory receiving graded copies.
pub const GRADED_DIR: &str = "Graded";

type BoxedLexicon = Box<dyn Lexicon + Send + Sync>;

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Initialize `env_logger` from `RUST_LOG`, defaulting to `info`.
/// `verbose` forces `debug`.
pub fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

// ---------------------------------------------------------------------------
// Data file discovery
// ---------------------------------------------------------------------------

/// Locate a data file.
///
/// Search order:
/// 1. `explicit` (if provided; a directory is searched for `name`)
/// 2. `CHAKRA_DATA_PATH` environment variable
/// 3. `~/.chakra`
/// 4. Current working directory
pub fn find_data_file(explicit: Option<&Path>, name: &str) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.is_dir() {
            let candidate = path.join(name);
            if candidate.is_file() {
                return Ok(candidate);
            }
            bail!("{} not found in {}", name, path.display());
        }
        return Ok(path.to_path_buf());
    }

    let search_paths = build_search_paths();
    for dir in &search_paths {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    bail!(
        "could not find {} in any of the search paths:\n{}",
        name,
        search_paths
            .iter()
            .map(|p| format!("  - {}", p.display()))
            .collect::<Vec<_>>()
            .join("\n")
    )
}

fn build_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(env_path) = std::env::var(DATA_PATH_ENV) {
        paths.push(PathBuf::from(env_path));
    }
    if let Some(home) = home_dir() {
        paths.push(home.join(DATA_DIR));
    }
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd);
    }
    paths
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Read and parse a grid file.
pub fn read_grid(path: &Path) -> Result<ToroidalGrid> {
    let text = std::fs::read_to_string(path).with_context(|| format!("failed to read grid {}", path.display()))?;
    let grid = ToroidalGrid::parse(&text).with_context(|| format!("invalid grid in {}", path.display()))?;
    log::info!("grid {}: {}x{}", path.display(), grid.side(), grid.side());
    Ok(grid)
}

/// Load the lexicon for a script: a parsed dictionary for Devanagari, a
/// glossary or tagged headword list for Kannada.
pub fn load_lexicon(script: Script, path: &Path) -> Result<BoxedLexicon> {
    match script {
        Script::Devanagari => {
            let (dict, report) =
                Dictionary::load(path).with_context(|| format!("failed to load dictionary {}", path.display()))?;
            log::info!(
                "{}: {} words ({} entries, {} skipped)",
                path.display(),
                dict.word_count(),
                report.loaded,
                report.skipped
            );
            Ok(Box::new(dict))
        }
        Script::Kannada => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read word list {}", path.display()))?;
            let words = wordlist::headwords(&text);
            if words.is_empty() {
                bail!("no words in {}", path.display());
            }
            log::info!("{}: {} words", path.display(), words.len());
            Ok(Box::new(WordList::new(words)))
        }
    }
}

/// Default file name for a script's lexicon.
pub fn default_lexicon_name(script: Script) -> &'static str {
    match script {
        Script::Devanagari => DEVANAGARI_DICT,
        Script::Kannada => KANNADA_WORDS,
    }
}

/// Build a decoder over every script whose lexicon can be found.
///
/// An explicitly given file must load; a script without one is skipped
/// with a warning when discovery finds nothing.
pub fn load_decoder(devanagari: Option<&Path>, kannada: Option<&Path>) -> Result<Decoder> {
    let mut decoder = Decoder::new();
    for (script, explicit) in [(Script::Devanagari, devanagari), (Script::Kannada, kannada)] {
        let path = match find_data_file(explicit, default_lexicon_name(script)) {
            Ok(path) => path,
            Err(e) if explicit.is_none() => {
                log::warn!("no {script} lexicon, skipping: {e}");
                continue;
            }
            Err(e) => return Err(e),
        };
        let lexicon = load_lexicon(script, &path)?;
        let trie = UnitTrie::build(script, lexicon.all_words());
        decoder.add_script(script, trie, lexicon);
    }
    Ok(decoder)
}

// ---------------------------------------------------------------------------
// Text formats
// ---------------------------------------------------------------------------

/// Split a line of letters or fragments on commas and whitespace,
/// dropping quotes.
pub fn split_items(line: &str) -> Vec<String> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .map(|item| item.trim_matches('"'))
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn quoted(items: &[&str]) -> String {
    items.iter().map(|s| format!("\"{s}\"")).collect::<Vec<_>>().join(",")
}

/// Render a solution: letters per script, fragments and scores when a
/// decode report is available, then the `(row,col):value` path.
pub fn format_solution(grid: &ToroidalGrid, path: &[VertexId], report: Option<&DecodeReport>) -> String {
    let codes = grid.values(path);
    let mut out = String::new();

    for script in Script::ALL {
        let _ = writeln!(out, "{script} letters: {}", quoted(&script.letters(&codes)));
    }

    if let Some(report) = report {
        out.push('\n');
        for r in &report.scripts {
            let _ = writeln!(out, "{} forward: {}", r.script, r.fragments.join(","));
            let _ = writeln!(out, "{} reversed: {}", r.script, r.reversed.join(","));
            for (k, rotation) in r.rotations.iter().enumerate() {
                let _ = writeln!(out, "{} rotation {k}: {}", r.script, rotation.join(","));
            }
        }
        out.push('\n');
        let scores: Vec<String> = report
            .scripts
            .iter()
            .map(|r| format!("{} {:.1} ({})", r.script, r.best_score, r.grade))
            .collect();
        let _ = writeln!(out, "score: {}", scores.join(", "));
    }

    let cells: Vec<String> = path
        .iter()
        .map(|&id| {
            let v = grid.vertex(id);
            format!("({},{}):{}", v.row, v.col, v.value)
        })
        .collect();
    let _ = writeln!(out, "\npath: {}", cells.join(" -> "));
    out
}

/// Fragment arrays of one script from a solution file written by
/// [`format_solution`]. Each reading becomes one array named
/// `{stem}_{reading}`.
pub fn read_fragment_arrays(stem: &str, text: &str, script: Script) -> Vec<FragmentArray> {
    let label = format!("{script} ");
    text.lines()
        .filter_map(|line| {
            let rest = line.strip_prefix(&label)?;
            let (reading, items) = rest.split_once(':')?;
            if reading == "letters" {
                return None;
            }
            let id = format!("{stem}_{}", reading.replace(' ', "_"));
            Some(FragmentArray::new(id, split_items(items)))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Output files
// ---------------------------------------------------------------------------

/// Writes numbered solution files and graded copies.
#[derive(Debug, Clone)]
pub struct SolutionWriter {
    dir: PathBuf,
    prefix: String,
    threshold: f64,
}

impl SolutionWriter {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>, threshold: f64) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            threshold,
        }
    }

    /// Write `{prefix}-{index}.txt`.
    pub fn write(&self, index: usize, body: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir).with_context(|| format!("failed to create {}", self.dir.display()))?;
        let path = self.dir.join(format!("{}-{index}.txt", self.prefix));
        std::fs::write(&path, body).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Copy a written solution to `Graded/{score}_Graded_{name}` when the
    /// score exceeds the threshold.
    pub fn write_graded(&self, written: &Path, score: f64, body: &str) -> Result<Option<PathBuf>> {
        if score <= self.threshold {
            return Ok(None);
        }
        let graded = self.dir.join(GRADED_DIR);
        std::fs::create_dir_all(&graded).with_context(|| format!("failed to create {}", graded.display()))?;
        let name = written.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        let path = graded.join(format!("{}_Graded_{name}", score.round()));
        std::fs::write(&path, body).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_items_handles_quotes_and_separators() {
        assert_eq!(split_items("\"क्\",\"आ\", म्  अ"), vec!["क्", "आ", "म्", "अ"]);
        assert!(split_items(" , ").is_empty());
    }

    #[test]
    fn solution_round_trips_through_fragment_reader() {
        let grid = ToroidalGrid::from_rows(&[vec![28, 2], vec![28, 2]]).unwrap();
        let path = vec![0, 1, 2, 3];
        let (dict, _) = Dictionary::parse("का|ind.|crow\n");
        let decoder = Decoder::new().with_dictionary(Script::Devanagari, dict);
        let report = decoder.decode(&grid.values(&path));

        let text = format_solution(&grid, &path, Some(&report));
        assert!(text.starts_with("devanagari letters: \"क्\",\"आ\",\"क्\",\"आ\"\n"));
        assert!(text.contains("score: devanagari 100.0 (A+)"));
        assert!(text.ends_with("path: (0,0):28 -> (0,1):2 -> (1,0):28 -> (1,1):2\n"));

        let arrays = read_fragment_arrays("sample-1", &text, Script::Devanagari);
        assert_eq!(arrays.len(), 2);
        assert_eq!(arrays[0].id, "sample-1_forward");
        assert_eq!(arrays[0].fragments, vec!["का", "का"]);
        assert!(read_fragment_arrays("sample-1", &text, Script::Kannada).is_empty());
    }

    #[test]
    fn graded_copies_only_above_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SolutionWriter::new(dir.path(), "sample", 65.0);
        let written = writer.write(1, "body").unwrap();
        assert_eq!(written, dir.path().join("sample-1.txt"));

        assert!(writer.write_graded(&written, 65.0, "body").unwrap().is_none());
        let graded = writer.write_graded(&written, 72.4, "body").unwrap().unwrap();
        assert_eq!(graded, dir.path().join(GRADED_DIR).join("72_Graded_sample-1.txt"));
        assert_eq!(std::fs::read_to_string(graded).unwrap(), "body");
    }

    #[test]
    fn explicit_data_paths() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(DEVANAGARI_DICT);
        std::fs::write(&file, "का|ind.|crow\n").unwrap();
        assert_eq!(find_data_file(Some(dir.path()), DEVANAGARI_DICT).unwrap(), file);
        assert_eq!(find_data_file(Some(&file), "ignored").unwrap(), file);
        assert!(find_data_file(Some(dir.path()), KANNADA_WORDS).is_err());

        let decoder = load_decoder(Some(&file), None).unwrap();
        assert!(decoder.trie(Script::Devanagari).is_some());
    }
}
