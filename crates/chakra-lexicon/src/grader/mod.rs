// Fragment grading
//
// `fragment` holds dictionary-free structural checks, `score` weighs
// fragments against a lexicon, `corpus` aggregates arrays into grades.

mod corpus;
mod fragment;
mod score;

pub use corpus::{
    ArrayGrade, CorpusGrade, CorpusGrader, FragmentArray, FragmentQuality, NO_VALID_FRAGMENTS,
};
pub use fragment::{fragment_quality, is_valid_fragment, normalize_fragment};
pub use score::{FragmentMatch, FragmentScorer, score_fragments};
