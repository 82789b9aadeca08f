// Word lists for building script tries
//
// Devanagari tries are built from the headwords of a tagged lexicon;
// Kannada tries from a glossary with one `word - meaning` line each.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

static HEADWORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<k1>([^<]+)").expect("static regex"));

/// Distinct `<k1>` headwords in first-seen order.
pub fn lend_headwords(text: &str) -> Vec<String> {
    let mut seen = hashbrown::HashSet::new();
    HEADWORD
        .captures_iter(text)
        .map(|c| c[1].trim().to_string())
        .filter(|w| !w.is_empty() && seen.insert(w.clone()))
        .collect()
}

/// The text before the first `-` of each line, trimmed, deduplicated and
/// sorted. Lines without a word are ignored.
pub fn glossary_headwords(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| line.split('-').next())
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Pick the extractor by content: tagged lexicons yield headwords,
/// anything else is read as a glossary.
pub fn headwords(text: &str) -> Vec<String> {
    if text.contains("<k1>") {
        lend_headwords(text)
    } else {
        glossary_headwords(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lend_headwords_are_distinct() {
        let text = "<L>1<k1>अग्नि<k2>अग्नि<LEND><L>2<k1>राम</k1><LEND><L>3<k1>अग्नि<k2>x<LEND>";
        assert_eq!(lend_headwords(text), vec!["अग्नि", "राम"]);
    }

    #[test]
    fn glossary_words_before_dash() {
        let text = "ಮನೆ - house\nಹಾಲು- milk\n\n  - nothing\nಮನೆ - home\nಕಲ್ಲು\n";
        assert_eq!(glossary_headwords(text), vec!["ಕಲ್ಲು", "ಮನೆ", "ಹಾಲು"]);
    }

    #[test]
    fn detects_list_kind() {
        assert_eq!(headwords("<k1>क<k2>"), vec!["क"]);
        assert_eq!(headwords("ಮನೆ - house"), vec!["ಮನೆ"]);
    }
}
