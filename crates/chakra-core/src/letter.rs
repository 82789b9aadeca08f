// Letter classes of the numeric grid codes

use serde::{Deserialize, Serialize};

/// Codes 1..=27 denote vowels.
pub const VOWEL_CODES: std::ops::RangeInclusive<u32> = 1..=27;

/// Codes 28..=60 denote consonants (written with a virama).
pub const CONSONANT_CODES: std::ops::RangeInclusive<u32> = 28..=60;

/// Codes 61..=64 denote special marks (anusvara, visarga, punctuation).
pub const SPECIAL_CODES: std::ops::RangeInclusive<u32> = 61..=64;

/// Number of codes with a letter in every script alphabet.
pub const ALPHABET_SIZE: usize = 64;

/// Phonetic class of a grid code.
///
/// The run-length constraints of the path search only count vowels and
/// consonants; a special mark or an unknown code interrupts both runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterClass {
    Vowel,
    Consonant,
    Special,
    /// Zero or a code beyond the alphabet.
    Unknown,
}

impl LetterClass {
    /// Classify a code value.
    pub fn of(code: u32) -> Self {
        if VOWEL_CODES.contains(&code) {
            LetterClass::Vowel
        } else if CONSONANT_CODES.contains(&code) {
            LetterClass::Consonant
        } else if SPECIAL_CODES.contains(&code) {
            LetterClass::Special
        } else {
            LetterClass::Unknown
        }
    }

    pub fn is_vowel(self) -> bool {
        self == LetterClass::Vowel
    }

    pub fn is_consonant(self) -> bool {
        self == LetterClass::Consonant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_boundaries() {
        assert_eq!(LetterClass::of(0), LetterClass::Unknown);
        assert_eq!(LetterClass::of(1), LetterClass::Vowel);
        assert_eq!(LetterClass::of(27), LetterClass::Vowel);
        assert_eq!(LetterClass::of(28), LetterClass::Consonant);
        assert_eq!(LetterClass::of(60), LetterClass::Consonant);
        assert_eq!(LetterClass::of(61), LetterClass::Special);
        assert_eq!(LetterClass::of(64), LetterClass::Special);
        assert_eq!(LetterClass::of(65), LetterClass::Unknown);
    }

    #[test]
    fn classes_are_disjoint() {
        for code in 0..=70 {
            let flags = [
                LetterClass::of(code).is_vowel(),
                LetterClass::of(code).is_consonant(),
                LetterClass::of(code) == LetterClass::Special,
            ];
            assert!(flags.iter().filter(|f| **f).count() <= 1, "code {code}");
        }
    }
}
