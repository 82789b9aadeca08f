// Grading of fragment arrays and of whole corpora of them

use std::collections::BTreeMap;

use chakra_core::{Grade, Script};
use serde::Serialize;

use super::fragment::{fragment_quality, is_valid_fragment};
use super::score::FragmentScorer;
use crate::dictionary::Lexicon;

pub const NO_VALID_FRAGMENTS: &str = "No valid fragments found";

/// A named list of fragments, typically one decoded path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FragmentArray {
    pub id: String,
    pub fragments: Vec<String>,
}

impl FragmentArray {
    pub fn new(id: impl Into<String>, fragments: Vec<String>) -> Self {
        Self {
            id: id.into(),
            fragments,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FragmentQuality {
    pub fragment: String,
    pub valid: bool,
    pub quality: f64,
}

/// Grade of one fragment array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayGrade {
    pub id: String,
    pub total_fragments: usize,
    pub valid_fragments: usize,
    /// Dictionary score of the valid fragments, in percent.
    pub score: f64,
    pub grade: Grade,
    pub issues: Vec<String>,
    pub qualities: Vec<FragmentQuality>,
}

impl ArrayGrade {
    pub fn valid_percentage(&self) -> f64 {
        percentage(self.valid_fragments, self.total_fragments)
    }
}

/// Totals over many arrays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusGrade {
    pub total_arrays: usize,
    /// Arrays scoring at least 50%.
    pub passing_arrays: usize,
    pub total_fragments: usize,
    pub valid_fragments: usize,
    pub average_score: f64,
    pub grade: Grade,
    pub grade_counts: BTreeMap<Grade, usize>,
    pub arrays: Vec<ArrayGrade>,
}

impl CorpusGrade {
    pub fn passing_percentage(&self) -> f64 {
        percentage(self.passing_arrays, self.total_arrays)
    }

    pub fn valid_percentage(&self) -> f64 {
        percentage(self.valid_fragments, self.total_fragments)
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 { 0.0 } else { 100.0 * part as f64 / whole as f64 }
}

const PASSING_SCORE: f64 = 50.0;

/// Filters fragments to structurally valid ones and scores them.
pub struct CorpusGrader<'l, L: Lexicon + ?Sized> {
    scorer: FragmentScorer<'l, L>,
}

impl<'l, L: Lexicon + ?Sized> CorpusGrader<'l, L> {
    pub fn new(lexicon: &'l L, script: Script) -> Self {
        Self {
            scorer: FragmentScorer::new(lexicon, script),
        }
    }

    pub fn grade_array(&self, array: &FragmentArray) -> ArrayGrade {
        let script = self.scorer.script();
        let qualities: Vec<FragmentQuality> = array
            .fragments
            .iter()
            .map(|f| FragmentQuality {
                fragment: f.clone(),
                valid: is_valid_fragment(script, f),
                quality: fragment_quality(script, f),
            })
            .collect();
        let valid: Vec<&str> = qualities
            .iter()
            .filter(|q| q.valid)
            .map(|q| q.fragment.as_str())
            .collect();

        let mut issues = Vec::new();
        let score = if valid.is_empty() {
            issues.push(NO_VALID_FRAGMENTS.to_string());
            0.0
        } else {
            self.scorer.score(&valid)
        };
        log::debug!("array {}: {} of {} valid, score {score:.1}", array.id, valid.len(), qualities.len());

        ArrayGrade {
            id: array.id.clone(),
            total_fragments: array.fragments.len(),
            valid_fragments: valid.len(),
            score,
            grade: Grade::from_percentage(score),
            issues,
            qualities,
        }
    }

    pub fn grade_corpus(&self, arrays: &[FragmentArray]) -> CorpusGrade {
        let graded: Vec<ArrayGrade> = arrays.iter().map(|a| self.grade_array(a)).collect();

        let mut grade_counts = BTreeMap::new();
        for g in &graded {
            *grade_counts.entry(g.grade).or_insert(0) += 1;
        }
        let average_score = if graded.is_empty() {
            0.0
        } else {
            graded.iter().map(|g| g.score).sum::<f64>() / graded.len() as f64
        };

        CorpusGrade {
            total_arrays: graded.len(),
            passing_arrays: graded.iter().filter(|g| g.score >= PASSING_SCORE).count(),
            total_fragments: graded.iter().map(|g| g.total_fragments).sum(),
            valid_fragments: graded.iter().map(|g| g.valid_fragments).sum(),
            average_score,
            grade: Grade::from_percentage(average_score),
            grade_counts,
            arrays: graded,
        }
    }
}
