// Line format: `word|type|definition[|example,example,...]`

use chakra_core::{DictionaryEntry, PartOfSpeech};

use super::{Dictionary, ParseReport};

pub(super) fn parse(text: &str, dict: &mut Dictionary) -> ParseReport {
    let mut report = ParseReport::default();

    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split('|').map(str::trim).collect();
        if fields.len() < 3 {
            report.skip(format_args!("line {}: expected at least 3 fields", lineno + 1));
            continue;
        }
        if fields[0].is_empty() {
            report.skip(format_args!("line {}: empty headword", lineno + 1));
            continue;
        }
        let examples = fields
            .get(3)
            .map(|ex| {
                ex.split(',')
                    .map(str::trim)
                    .filter(|e| !e.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        dict.add_entry(DictionaryEntry {
            headword: fields[0].to_string(),
            part_of_speech: PartOfSpeech::classify(fields[1]),
            gloss: fields[2].to_string(),
            examples,
        });
        report.loaded += 1;
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Lexicon;

    #[test]
    fn fields_are_trimmed() {
        let mut dict = Dictionary::new();
        let report = parse(" अग्नि | m. | fire | अग्निः , अग्निम् \r\n", &mut dict);
        assert_eq!(report.loaded, 1);
        let entry = &dict.entries("अग्नि").unwrap()[0];
        assert_eq!(entry.gloss, "fire");
        assert_eq!(entry.examples, vec!["अग्निः", "अग्निम्"]);
    }

    #[test]
    fn short_and_headless_lines_are_skipped() {
        let mut dict = Dictionary::new();
        let report = parse("a|b\n|m.|nothing\n\n#c|d|e\n", &mut dict);
        assert_eq!(report, ParseReport { loaded: 0, skipped: 2 });
        assert!(dict.is_empty());
    }
}
