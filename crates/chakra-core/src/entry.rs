// Dictionary entry types shared by the lexicon and the CLI reports

use serde::{Deserialize, Serialize};

/// Coarse part of speech of a dictionary headword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Indeclinable,
    #[default]
    Unknown,
}

impl PartOfSpeech {
    /// Classify a grammatical tag such as `m.`, `f.`, `adj.`, `ind.` or a
    /// verb class marker (`P`, `A`).
    ///
    /// Verb markers are checked first, so a tag mentioning both a verb
    /// class and a gender classifies as a verb.
    pub fn classify(tag: &str) -> Self {
        let tag = tag.trim();
        if tag.contains('A') || tag.contains('P') || tag.contains("verb") || tag.contains("v.") {
            PartOfSpeech::Verb
        } else if tag.contains("adj") || tag.contains("a.") {
            PartOfSpeech::Adjective
        } else if tag.contains("adv") || tag.contains("ind") {
            PartOfSpeech::Indeclinable
        } else if tag.contains('m')
            || tag.contains('f')
            || tag.contains('n')
            || tag.contains("noun")
            || tag.contains("subst")
        {
            PartOfSpeech::Noun
        } else {
            PartOfSpeech::Unknown
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Indeclinable => "indeclinable",
            PartOfSpeech::Unknown => "unknown",
        }
    }
}

/// One sense of a headword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub headword: String,
    pub part_of_speech: PartOfSpeech,
    pub gloss: String,
    pub examples: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_tags() {
        assert_eq!(PartOfSpeech::classify("m."), PartOfSpeech::Noun);
        assert_eq!(PartOfSpeech::classify("f."), PartOfSpeech::Noun);
        assert_eq!(PartOfSpeech::classify("noun"), PartOfSpeech::Noun);
        assert_eq!(PartOfSpeech::classify("1 P."), PartOfSpeech::Verb);
        assert_eq!(PartOfSpeech::classify("verb"), PartOfSpeech::Verb);
        assert_eq!(PartOfSpeech::classify("adj."), PartOfSpeech::Adjective);
        assert_eq!(PartOfSpeech::classify("ind."), PartOfSpeech::Indeclinable);
        assert_eq!(PartOfSpeech::classify("adv"), PartOfSpeech::Indeclinable);
        assert_eq!(PartOfSpeech::classify(""), PartOfSpeech::Unknown);
        assert_eq!(PartOfSpeech::classify("?"), PartOfSpeech::Unknown);
    }
}
