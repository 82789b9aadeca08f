// Greedy longest-match segmentation of letter sequences

use serde::Serialize;

use crate::trie::UnitTrie;
use crate::units::render;

/// One emitted fragment and the input span it consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    /// Rendered text of the fragment.
    pub text: String,
    /// Index of the first consumed unit.
    pub start: usize,
    /// Number of consumed units (at least one).
    pub len: usize,
    /// Whether the span matched a trie prefix; otherwise it is a single
    /// unmatched unit emitted as-is.
    pub matched: bool,
}

/// Longest-match segmenter over a trie.
///
/// At each position the window grows while it is still a prefix of some
/// word; the longest such window becomes one fragment. A position with no
/// match emits its single unit. Every input unit lands in exactly one
/// fragment and the scan always advances.
#[derive(Debug, Clone, Copy)]
pub struct Segmenter<'t> {
    trie: &'t UnitTrie,
}

impl<'t> Segmenter<'t> {
    pub fn new(trie: &'t UnitTrie) -> Self {
        Self { trie }
    }

    pub fn segment<S: AsRef<str>>(&self, letters: &[S]) -> Vec<Segment> {
        let script = self.trie.script();
        let mut out = Vec::new();
        let mut pos = 0;

        while pos < letters.len() {
            let mut best = 0;
            while pos + best < letters.len() && self.trie.contains_sequence(&letters[pos..=pos + best]) {
                best += 1;
            }
            if best == 0 {
                out.push(Segment {
                    text: letters[pos].as_ref().to_string(),
                    start: pos,
                    len: 1,
                    matched: false,
                });
                pos += 1;
            } else {
                out.push(Segment {
                    text: render(script, &letters[pos..pos + best]),
                    start: pos,
                    len: best,
                    matched: true,
                });
                pos += best;
            }
        }
        out
    }

    /// Fragment texts only.
    pub fn extract_words<S: AsRef<str>>(&self, letters: &[S]) -> Vec<String> {
        self.segment(letters).into_iter().map(|s| s.text).collect()
    }

    /// Segment the letters read backwards.
    pub fn extract_words_reversed<S: AsRef<str>>(&self, letters: &[S]) -> Vec<String> {
        let reversed: Vec<&str> = letters.iter().rev().map(AsRef::as_ref).collect();
        self.extract_words(&reversed)
    }

    /// Segment every rotation of a cyclic letter sequence. Entry `k`
    /// starts reading at letter `k`.
    pub fn segment_rotations<S: AsRef<str>>(&self, letters: &[S]) -> Vec<Vec<String>> {
        let n = letters.len();
        (0..n)
            .map(|k| {
                let rotated: Vec<&str> = letters[k..]
                    .iter()
                    .chain(&letters[..k])
                    .map(AsRef::as_ref)
                    .collect();
                self.extract_words(&rotated)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chakra_core::Script;

    fn trie(words: &[&str]) -> UnitTrie {
        UnitTrie::build(Script::Devanagari, words.iter().copied())
    }

    #[test]
    fn repeated_word_splits_in_two() {
        let t = trie(&["का"]);
        let s = Segmenter::new(&t);
        let fragments = s.extract_words(&["क्", "आ", "क्", "आ"]);
        assert_eq!(fragments, vec!["का", "का"]);
    }

    #[test]
    fn prefers_longest_window() {
        let t = trie(&["रा", "राम"]);
        let s = Segmenter::new(&t);
        let segs = s.segment(&["र्", "आ", "म्", "अ", "र्"]);
        assert_eq!(segs[0].text, "राम");
        assert_eq!(segs[0].len, 4);
        assert_eq!(segs[1].text, "र्");
        assert!(segs[1].matched);
    }

    #[test]
    fn unmatched_units_pass_through() {
        let t = trie(&["का"]);
        let s = Segmenter::new(&t);
        let segs = s.segment(&["ं", "क्", "आ", "::"]);
        let texts: Vec<&str> = segs.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["ं", "का", "::"]);
        assert!(!segs[0].matched);
        assert!(!segs[2].matched);
    }

    #[test]
    fn spans_cover_input_exactly_once() {
        let t = trie(&["राम", "नर", "अग्नि", "इति"]);
        let s = Segmenter::new(&t);
        let letters = ["इ", "त्", "इ", "र्", "आ", "म्", "ः", "न्", "अ", "र्", "अ", "ग्", "अ"];
        let segs = s.segment(&letters);
        let mut next = 0;
        for seg in &segs {
            assert_eq!(seg.start, next);
            assert!(seg.len >= 1);
            next += seg.len;
        }
        assert_eq!(next, letters.len());
    }

    #[test]
    fn segmentation_is_deterministic() {
        let t = trie(&["राम", "नर"]);
        let s = Segmenter::new(&t);
        let letters = ["र्", "आ", "म्", "अ", "न्", "अ", "र्", "अ"];
        assert_eq!(s.segment(&letters), s.segment(&letters));
    }

    #[test]
    fn empty_input_and_empty_trie() {
        let t = UnitTrie::new(Script::Devanagari);
        let s = Segmenter::new(&t);
        assert!(s.segment::<&str>(&[]).is_empty());
        assert_eq!(s.extract_words(&["क्", "अ"]), vec!["क्", "अ"]);
    }

    #[test]
    fn reversed_and_rotations() {
        let t = trie(&["का"]);
        let s = Segmenter::new(&t);
        assert_eq!(s.extract_words_reversed(&["आ", "क्"]), vec!["का"]);
        let rotations = s.segment_rotations(&["आ", "क्"]);
        assert_eq!(rotations, vec![vec!["आ", "क्"], vec!["का"]]);
    }
}
