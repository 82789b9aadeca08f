//! Shared types for the Chakra grid decoder.
//!
//! Leaf crate: letter classes of the 64 code values, the two supported
//! scripts with their character tables, dictionary entry types and the
//! percentage-to-letter-grade table used by the grader.

pub mod entry;
pub mod grade;
pub mod letter;
pub mod script;

pub use entry::{DictionaryEntry, PartOfSpeech};
pub use grade::Grade;
pub use letter::LetterClass;
pub use script::{ParseScriptError, Script};
