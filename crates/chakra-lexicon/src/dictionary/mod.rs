// Dictionary loading and the lookup capability the grader depends on
//
// Two text formats are accepted. A file containing `<LEND>` is read as
// the tagged lexicon format (see `lend.rs`); anything else is read as
// one `word|type|definition[|examples]` record per line (`pipe.rs`).

mod lend;
mod pipe;
pub mod wordlist;

use std::path::Path;

use chakra_core::DictionaryEntry;
use hashbrown::{HashMap, HashSet};
use serde::Serialize;

use crate::LexiconError;

/// Common Sanskrit verbal and nominal prefixes.
pub const PREFIXES: &[&str] = &[
    "अ", "अन्", "अनु", "अप", "अपि", "अभि", "अव", "आ", "उत्", "उप", "दुर्", "दुस्", "निर्",
    "निस्", "परा", "परि", "प्र", "प्रति", "वि", "सम्", "सु", "अति", "अधि", "अन्तर्",
];

/// Common Sanskrit derivational suffixes.
pub const SUFFIXES: &[&str] = &[
    "क", "कार", "ता", "त्व", "त्र", "इक", "इन्", "ईय", "अन", "ल", "वत्", "मत्", "तम", "तर", "मय",
];

/// Headword endings that also register the headword without its last
/// character as a partial word.
pub(crate) const PARTIAL_ENDINGS: &[&str] = &["ं", "ः", "ँ", "ऽ", "।", "॥", "॰", "…", "::", "अ"];

/// Read-only word lookups used while grading fragments.
pub trait Lexicon {
    fn is_known_word(&self, word: &str) -> bool;

    /// Entries recorded for a headword, if any.
    fn entries(&self, word: &str) -> Option<&[DictionaryEntry]>;

    /// True for a registered truncated headword.
    fn is_partial_match(&self, fragment: &str) -> bool;

    /// Every headword, in no particular order.
    fn all_words(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    fn is_prefix(&self, text: &str) -> bool {
        PREFIXES.contains(&text)
    }

    fn is_suffix(&self, text: &str) -> bool {
        SUFFIXES.contains(&text)
    }
}

/// Counts from one parse. Skipped entries have already been logged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    pub loaded: usize,
    pub skipped: usize,
}

impl ParseReport {
    pub(crate) fn skip(&mut self, what: impl std::fmt::Display) {
        self.skipped += 1;
        log::warn!("skipping dictionary entry: {what}");
    }
}

// ---------------------------------------------------------------------------
// Dictionary
// ---------------------------------------------------------------------------

/// Parsed dictionary: entries by headword, the known-word set (headwords
/// plus their examples) and registered partial words.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: HashMap<String, Vec<DictionaryEntry>>,
    known: HashSet<String>,
    partial: HashSet<String>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse dictionary text, detecting the format.
    pub fn parse(text: &str) -> (Self, ParseReport) {
        let mut dict = Self::new();
        let report = if text.contains("<LEND>") {
            lend::parse(text, &mut dict)
        } else {
            pipe::parse(text, &mut dict)
        };
        log::info!(
            "dictionary: {} entries loaded, {} skipped, {} known words",
            report.loaded,
            report.skipped,
            dict.known.len()
        );
        (dict, report)
    }

    /// Read and parse a dictionary file. Fails on I/O errors or when no
    /// entry could be loaded.
    pub fn load(path: impl AsRef<Path>) -> Result<(Self, ParseReport), LexiconError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let (dict, report) = Self::parse(&text);
        if report.loaded == 0 {
            return Err(LexiconError::Empty(path.display().to_string()));
        }
        Ok((dict, report))
    }

    /// Record an entry. Its headword and examples become known words.
    pub fn add_entry(&mut self, entry: DictionaryEntry) {
        for example in &entry.examples {
            self.insert_known(example);
        }
        self.insert_known(&entry.headword);
        self.entries.entry(entry.headword.clone()).or_default().push(entry);
    }

    /// Register a truncated form as a partial word.
    pub fn add_partial(&mut self, word: &str) {
        if !word.is_empty() {
            self.partial.insert(word.to_string());
        }
    }

    fn insert_known(&mut self, word: &str) {
        if !word.is_empty() {
            self.known.insert(word.to_string());
        }
    }

    /// Number of distinct headwords.
    pub fn headword_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of known words, examples included.
    pub fn word_count(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}

impl Lexicon for Dictionary {
    fn is_known_word(&self, word: &str) -> bool {
        self.known.contains(word)
    }

    fn entries(&self, word: &str) -> Option<&[DictionaryEntry]> {
        self.entries.get(word).map(Vec::as_slice)
    }

    fn is_partial_match(&self, fragment: &str) -> bool {
        self.partial.contains(fragment)
    }

    fn all_words(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.entries.keys().map(String::as_str))
    }
}

// ---------------------------------------------------------------------------
// WordList
// ---------------------------------------------------------------------------

/// A bare known-word set with no entries or partial words.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: HashSet<String>,
    sorted: Vec<String>,
}

impl WordList {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: HashSet<String> = words
            .into_iter()
            .map(Into::into)
            .filter(|w: &String| !w.is_empty())
            .collect();
        let mut sorted: Vec<String> = words.iter().cloned().collect();
        sorted.sort_unstable();
        Self { words, sorted }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Lexicon for WordList {
    fn is_known_word(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    fn entries(&self, _word: &str) -> Option<&[DictionaryEntry]> {
        None
    }

    fn is_partial_match(&self, _fragment: &str) -> bool {
        false
    }

    fn all_words(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.sorted.iter().map(String::as_str))
    }
}
