// Arena trie over orthographic units
//
// Nodes live in one Vec and refer to children by index. Each node keeps
// an ordered map from unit to child, so enumeration order is stable.

use std::collections::BTreeMap;

use chakra_core::Script;

use crate::units::{decompose, render};

/// Default cap for [`UnitTrie::words_containing`].
pub const CONTAINING_LIMIT: usize = 100;

/// Default cap for [`UnitTrie::all_words`].
pub const ALL_WORDS_LIMIT: usize = 1000;

const ROOT: usize = 0;

#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: BTreeMap<String, usize>,
    end_of_word: bool,
}

/// Prefix tree of unit sequences for one script.
///
/// Built once from a word list and read-only afterwards; safe to share
/// between threads.
#[derive(Debug, Clone)]
pub struct UnitTrie {
    script: Script,
    nodes: Vec<TrieNode>,
    words: usize,
}

impl UnitTrie {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            nodes: vec![TrieNode::default()],
            words: 0,
        }
    }

    /// Build from raw words, decomposing each per the script's rules.
    pub fn build<I, S>(script: Script, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Self::new(script);
        for word in words {
            trie.insert(word.as_ref());
        }
        trie
    }

    pub fn script(&self) -> Script {
        self.script
    }

    /// Distinct words stored.
    pub fn len(&self) -> usize {
        self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Insert a raw word. Returns `false` if it has no units or was
    /// already present.
    pub fn insert(&mut self, word: &str) -> bool {
        let units = decompose(self.script, word);
        self.insert_units(&units)
    }

    /// Insert a unit sequence as one word.
    pub fn insert_units<S: AsRef<str>>(&mut self, units: &[S]) -> bool {
        if units.is_empty() {
            return false;
        }
        let mut node = ROOT;
        for unit in units {
            let unit = unit.as_ref();
            node = match self.nodes[node].children.get(unit) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[node].children.insert(unit.to_string(), child);
                    child
                }
            };
        }
        let fresh = !self.nodes[node].end_of_word;
        self.nodes[node].end_of_word = true;
        if fresh {
            self.words += 1;
        }
        fresh
    }

    fn walk<S: AsRef<str>>(&self, units: &[S]) -> Option<usize> {
        let mut node = ROOT;
        for unit in units {
            node = *self.nodes[node].children.get(unit.as_ref())?;
        }
        Some(node)
    }

    /// True iff the units spell a prefix of some stored word. The empty
    /// sequence matches nothing.
    pub fn contains_sequence<S: AsRef<str>>(&self, units: &[S]) -> bool {
        !units.is_empty() && self.walk(units).is_some()
    }

    /// True iff the units spell a whole stored word.
    pub fn contains_word<S: AsRef<str>>(&self, units: &[S]) -> bool {
        !units.is_empty() && self.walk(units).is_some_and(|n| self.nodes[n].end_of_word)
    }

    /// Whole-word lookup of a raw word.
    pub fn contains(&self, word: &str) -> bool {
        self.contains_word(&decompose(self.script, word))
    }

    /// Rendered words whose units contain `units` contiguously, at most
    /// `limit` of them, in trie order.
    pub fn words_containing<S: AsRef<str>>(&self, units: &[S], limit: usize) -> Vec<String> {
        let needle: Vec<&str> = units.iter().map(AsRef::as_ref).collect();
        let mut out = Vec::new();
        if needle.is_empty() {
            return out;
        }
        self.collect(ROOT, &mut Vec::new(), &mut out, limit, &|path| {
            path.windows(needle.len()).any(|w| w == needle.as_slice())
        });
        out
    }

    /// Rendered stored words, at most `limit`, in trie order.
    pub fn all_words(&self, limit: usize) -> Vec<String> {
        let mut out = Vec::new();
        self.collect(ROOT, &mut Vec::new(), &mut out, limit, &|_| true);
        out
    }

    fn collect<'a>(
        &'a self,
        node: usize,
        path: &mut Vec<&'a str>,
        out: &mut Vec<String>,
        limit: usize,
        keep: &dyn Fn(&[&str]) -> bool,
    ) {
        if out.len() >= limit {
            return;
        }
        if self.nodes[node].end_of_word && keep(path) {
            out.push(render(self.script, path));
        }
        for (unit, &child) in &self.nodes[node].children {
            path.push(unit.as_str());
            self.collect(child, path, out, limit, keep);
            path.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trie() -> UnitTrie {
        UnitTrie::build(Script::Devanagari, ["राम", "रामः", "नर", "अग्नि"])
    }

    #[test]
    fn prefixes_match_but_empty_does_not() {
        let t = trie();
        assert!(t.contains_sequence(&["र्"]));
        assert!(t.contains_sequence(&["र्", "आ", "म्"]));
        assert!(!t.contains_sequence(&["र्", "इ"]));
        assert!(!t.contains_sequence::<&str>(&[]));
    }

    #[test]
    fn whole_words_need_end_marker() {
        let t = trie();
        assert!(t.contains("राम"));
        assert!(t.contains("रामः"));
        assert!(!t.contains("रा"));
        assert!(t.contains_word(&["न्", "अ", "र्", "अ"]));
        assert!(!t.contains_word(&["न्", "अ", "र्"]));
    }

    #[test]
    fn counts_distinct_words() {
        let mut t = trie();
        assert_eq!(t.len(), 4);
        assert!(!t.insert("राम"));
        assert!(!t.insert("123"));
        assert!(t.insert("इति"));
        assert_eq!(t.len(), 5);
    }

    #[test]
    fn enumerates_words_in_order() {
        let t = trie();
        let all = t.all_words(ALL_WORDS_LIMIT);
        assert_eq!(all.len(), 4);
        assert!(all.contains(&"अग्नि".to_string()));
        assert_eq!(t.all_words(2).len(), 2);
    }

    #[test]
    fn words_containing_subsequence() {
        let t = trie();
        let hits = t.words_containing(&["म्", "अ"], CONTAINING_LIMIT);
        assert_eq!(hits, vec!["राम".to_string(), "रामः".to_string()]);
        assert!(t.words_containing::<&str>(&[], CONTAINING_LIMIT).is_empty());
        assert_eq!(t.words_containing(&["म्", "अ"], 1).len(), 1);
    }
}
