// Tagged lexicon format
//
// Entries are separated by `<LEND>`. Each one opens with `<L>`, names its
// headword in `<k1>`, its grammatical tag after `<e>`, its definition
// after `¦`, and quotes examples in `<s>...</s>`.

use std::sync::LazyLock;

use chakra_core::{DictionaryEntry, PartOfSpeech};
use regex::Regex;

use super::{Dictionary, PARTIAL_ENDINGS, ParseReport};

const GLOSS_MAX_CHARS: usize = 100;
const GLOSS_KEEP_CHARS: usize = 97;

static ENTRY_SPLIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<LEND>\s*").expect("static regex"));
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("static regex"));
static PARENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^)]+\)").expect("static regex"));
static EXAMPLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<s>([^<]+)</s>").expect("static regex"));
static SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("static regex"));

pub(super) fn parse(text: &str, dict: &mut Dictionary) -> ParseReport {
    let mut report = ParseReport::default();

    for (index, chunk) in ENTRY_SPLIT.split(text).enumerate() {
        let chunk = chunk.trim();
        if chunk.is_empty() {
            continue;
        }
        match parse_entry(chunk) {
            Ok(entry) => {
                if let Some(ending) = PARTIAL_ENDINGS.iter().find(|e| entry.headword.ends_with(*e)) {
                    log::trace!("partial form of {} (ends in {ending})", entry.headword);
                    dict.add_partial(without_last_char(&entry.headword));
                }
                dict.add_entry(entry);
                report.loaded += 1;
            }
            Err(reason) => report.skip(format_args!("entry {}: {reason}", index + 1)),
        }
    }
    report
}

fn parse_entry(chunk: &str) -> Result<DictionaryEntry, &'static str> {
    if !chunk.starts_with("<L>") {
        return Err("missing <L> marker");
    }
    let headword = between(chunk, "<k1>", "</k1>")
        .or_else(|| between(chunk, "<k1>", "<k2>"))
        .map(str::trim)
        .ok_or("missing <k1> headword")?;
    if headword.is_empty() {
        return Err("empty headword");
    }

    let tag = chunk
        .find("<e>")
        .map(|i| &chunk[i + 3..])
        .and_then(|rest| rest.split(['\n', '¦']).next())
        .map(str::trim)
        .unwrap_or("");

    let gloss = chunk
        .find('¦')
        .map(|i| clean_gloss(&chunk[i + '¦'.len_utf8()..]))
        .unwrap_or_default();

    let examples = EXAMPLE
        .captures_iter(chunk)
        .map(|c| c[1].to_string())
        .collect();

    Ok(DictionaryEntry {
        headword: headword.to_string(),
        part_of_speech: PartOfSpeech::classify(tag),
        gloss,
        examples,
    })
}

/// Text strictly between the first `start` and the next `end`.
fn between<'a>(text: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let from = text.find(start)? + start.len();
    let len = text[from..].find(end)?;
    Some(&text[from..from + len])
}

/// Strip markup and parentheticals, collapse whitespace, and shorten
/// long definitions.
fn clean_gloss(raw: &str) -> String {
    let text = TAG.replace_all(raw, "");
    let text = PARENS.replace_all(&text, "");
    let text = SPACES.replace_all(text.trim(), " ");
    if text.chars().count() > GLOSS_MAX_CHARS {
        let mut short: String = text.chars().take(GLOSS_KEEP_CHARS).collect();
        short.push_str("...");
        short
    } else {
        text.into_owned()
    }
}

fn without_last_char(word: &str) -> &str {
    match word.char_indices().next_back() {
        Some((i, _)) => &word[..i],
        None => word,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Lexicon;

    const SAMPLE: &str = "\
<L>1<pc>1-001<k1>अग्नि<k2>अग्नि<e>1 m.
¦ <b>fire</b> (the god) of sacrifice <s>अग्निमीळे</s>
<LEND>
<L>2<pc>1-002<k1>रामः</k1><k2>रामः<e>1 m.
¦ Rama
<LEND>
<L>3<pc>1-003<e>2 f.
¦ no headword
<LEND>
junk
<LEND>
";

    #[test]
    fn parses_entries_and_skips_broken_ones() {
        let mut dict = Dictionary::new();
        let report = parse(SAMPLE, &mut dict);
        assert_eq!(report, ParseReport { loaded: 2, skipped: 2 });

        let agni = &dict.entries("अग्नि").unwrap()[0];
        assert_eq!(agni.part_of_speech, PartOfSpeech::Noun);
        assert_eq!(agni.gloss, "fire of sacrifice अग्निमीळे");
        assert_eq!(agni.examples, vec!["अग्निमीळे"]);
        assert!(dict.is_known_word("अग्निमीळे"));
        assert!(dict.is_known_word("रामः"));
    }

    #[test]
    fn special_endings_register_partial_words() {
        let mut dict = Dictionary::new();
        parse(SAMPLE, &mut dict);
        assert!(dict.is_partial_match("राम"));
        assert!(!dict.is_known_word("राम"));
    }

    #[test]
    fn long_glosses_are_shortened() {
        let long = "x".repeat(150);
        let gloss = clean_gloss(&long);
        assert_eq!(gloss.chars().count(), GLOSS_KEEP_CHARS + 3);
        assert!(gloss.ends_with("..."));
        assert_eq!(clean_gloss(&"y".repeat(100)).len(), 100);
    }

    #[test]
    fn between_tags() {
        assert_eq!(between("<k1>a</k1>", "<k1>", "</k1>"), Some("a"));
        assert_eq!(between("<k1>a", "<k1>", "</k1>"), None);
        assert_eq!(without_last_char("रामः"), "राम");
        assert_eq!(without_last_char("::"), ":");
    }
}
