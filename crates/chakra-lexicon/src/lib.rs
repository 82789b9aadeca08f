//! Orthographic units, tries, segmentation and grading.
//!
//! Letter sequences read off a grid path are split into candidate words
//! by greedy longest match against a [`UnitTrie`] built from a word list,
//! then scored against a [`Lexicon`] by the grader.
//!
//! The unit model is shared by Devanagari and Kannada: a word is a
//! sequence of independent vowels, "consonant + virama" half-letters and
//! special marks. Rendering folds a vowel following a half-letter back
//! into a matra.

use std::path::PathBuf;

pub mod decoder;
pub mod dictionary;
pub mod grader;
pub mod segmenter;
pub mod trie;
pub mod units;

pub use decoder::{DecodeReport, Decoder, ScriptReport};
pub use dictionary::{Dictionary, Lexicon, ParseReport, WordList};
pub use grader::{
    ArrayGrade, CorpusGrade, CorpusGrader, FragmentArray, FragmentMatch, FragmentScorer, score_fragments,
};
pub use segmenter::{Segment, Segmenter};
pub use trie::UnitTrie;

/// Errors from loading lexical resources.
#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no usable entries in {0}")]
    Empty(String),

    #[error("malformed entry: {0}")]
    Malformed(String),
}
