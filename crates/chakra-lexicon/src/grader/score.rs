// Dictionary-relative scoring of a fragment list

use chakra_core::Script;
use serde::Serialize;

use super::fragment::{is_valid_fragment, normalize_fragment};
use crate::dictionary::Lexicon;

/// How one fragment relates to the lexicon, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FragmentMatch {
    /// A known word.
    Exact,
    /// A bare half-letter that is known or a registered partial form.
    HalfLetter,
    /// A recognized partial or truncated form.
    Partial,
    /// A lone vowel unit.
    Vowel,
    None,
}

impl FragmentMatch {
    pub fn weight(self) -> f64 {
        match self {
            FragmentMatch::Exact => 1.0,
            FragmentMatch::HalfLetter => 0.1,
            FragmentMatch::Partial => 0.5,
            FragmentMatch::Vowel => 0.25,
            FragmentMatch::None => 0.0,
        }
    }
}

/// Scores fragments against a lexicon for one script.
pub struct FragmentScorer<'l, L: Lexicon + ?Sized> {
    lexicon: &'l L,
    script: Script,
}

impl<'l, L: Lexicon + ?Sized> FragmentScorer<'l, L> {
    pub fn new(lexicon: &'l L, script: Script) -> Self {
        Self { lexicon, script }
    }

    pub fn script(&self) -> Script {
        self.script
    }

    pub fn lexicon(&self) -> &'l L {
        self.lexicon
    }

    /// Classify one already-normalized fragment. Malformed fragments
    /// never match.
    pub fn classify(&self, fragment: &str) -> FragmentMatch {
        if !is_valid_fragment(self.script, fragment) {
            return FragmentMatch::None;
        }
        let half = self.script.is_half_letter(fragment);
        if self.lexicon.is_known_word(fragment) {
            if half {
                FragmentMatch::HalfLetter
            } else {
                FragmentMatch::Exact
            }
        } else if self.lexicon.is_partial_match(fragment) {
            if half {
                FragmentMatch::HalfLetter
            } else {
                FragmentMatch::Partial
            }
        } else if self.script.is_vowel_unit(fragment) {
            FragmentMatch::Vowel
        } else {
            FragmentMatch::None
        }
    }

    /// `100 * sum(weights) / count` over the non-blank fragments after
    /// normalization; 0 when there are none.
    pub fn score<S: AsRef<str>>(&self, fragments: &[S]) -> f64 {
        let (sum, count) = fragments
            .iter()
            .map(AsRef::as_ref)
            .filter(|f| !f.trim().is_empty())
            .map(|f| self.classify(&normalize_fragment(self.script, f)).weight())
            .fold((0.0, 0usize), |(sum, n), w| (sum + w, n + 1));
        if count == 0 {
            0.0
        } else {
            100.0 * sum / count as f64
        }
    }
}

/// One-shot form of [`FragmentScorer::score`].
pub fn score_fragments<L, S>(lexicon: &L, script: Script, fragments: &[S]) -> f64
where
    L: Lexicon + ?Sized,
    S: AsRef<str>,
{
    FragmentScorer::new(lexicon, script).score(fragments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{Dictionary, WordList};

    const DEVA: Script = Script::Devanagari;

    #[test]
    fn half_known_list_scores_fifty() {
        let words = WordList::new(["known1"]);
        assert_eq!(score_fragments(&words, DEVA, &["known1", "unknown"]), 50.0);
    }

    #[test]
    fn empty_and_blank_lists_score_zero() {
        let words = WordList::new(["राम"]);
        assert_eq!(score_fragments::<_, &str>(&words, DEVA, &[]), 0.0);
        assert_eq!(score_fragments(&words, DEVA, &["  ", ""]), 0.0);
        assert_eq!(score_fragments(&words, DEVA, &["xyz"]), 0.0);
    }

    #[test]
    fn weights_by_match_kind() {
        let (mut dict, _) = Dictionary::parse("राम|m.|Rama\nक्|ind.|half letter\n");
        dict.add_partial("रा");
        let scorer = FragmentScorer::new(&dict, DEVA);
        assert_eq!(scorer.classify("राम"), FragmentMatch::Exact);
        assert_eq!(scorer.classify("क्"), FragmentMatch::HalfLetter);
        assert_eq!(scorer.classify("रा"), FragmentMatch::Partial);
        assert_eq!(scorer.classify("इ"), FragmentMatch::Vowel);
        assert_eq!(scorer.classify("ग"), FragmentMatch::None);
        // (1.0 + 0.1 + 0.5 + 0.25 + 0) / 5
        let score = scorer.score(&["राम", "क्", "रा", "इ", "ग"]);
        assert!((score - 37.0).abs() < 1e-9);
    }

    #[test]
    fn half_letters_score_at_most_the_known_weight() {
        let unknown = WordList::new(["क्षत्र"]);
        let known = WordList::new(["क्", "क्षत्र"]);
        let unknown_score = score_fragments(&unknown, DEVA, &["क्"]);
        let known_score = score_fragments(&known, DEVA, &["क्"]);
        assert_eq!(unknown_score, 0.0);
        assert!((known_score - 10.0).abs() < 1e-9);
        assert!(unknown_score <= known_score);

        // A registered truncated half-letter is capped the same way.
        let (mut dict, _) = Dictionary::parse("क्षत्र|n.|field\n");
        dict.add_partial("क्");
        assert_eq!(FragmentScorer::new(&dict, DEVA).classify("क्"), FragmentMatch::HalfLetter);
    }

    #[test]
    fn bare_consonant_is_not_a_partial_of_a_longer_syllable() {
        let words = WordList::new(["कि"]);
        assert_eq!(score_fragments(&words, DEVA, &["क"]), 0.0);
        let (dict, _) = Dictionary::parse("कि|ind.|what\n");
        assert_eq!(score_fragments(&dict, DEVA, &["क"]), 0.0);
    }

    #[test]
    fn malformed_fragments_score_zero() {
        let words = WordList::new(["एाा"]);
        let scorer = FragmentScorer::new(&words, DEVA);
        // Entry 18 of the grid alphabet carries two vowel signs in a row.
        assert_eq!(scorer.classify("एाा"), FragmentMatch::None);
        assert_eq!(scorer.classify("क््"), FragmentMatch::None);
        assert_eq!(scorer.score(&["एाा", "ए"]), 12.5);
    }

    #[test]
    fn adding_an_exact_match_never_lowers_the_score() {
        let words = WordList::new(["राम", "नर"]);
        let scorer = FragmentScorer::new(&words, DEVA);
        let mut fragments = vec!["रा", "ग", "इ"];
        let mut last = scorer.score(&fragments);
        for _ in 0..5 {
            fragments.push("नर");
            let next = scorer.score(&fragments);
            assert!(next >= last);
            last = next;
        }
    }
}
