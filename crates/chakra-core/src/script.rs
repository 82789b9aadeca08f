// Script tables: alphabets of the 64 grid codes and the Unicode
// character classes used to split words into orthographic units.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::letter::ALPHABET_SIZE;

/// Letter emitted for a code that has no alphabet entry.
pub const UNKNOWN_LETTER: &str = "?";

/// A writing system the grid codes can be rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    Devanagari,
    Kannada,
}

/// Error returned when a script name is not recognized.
#[derive(Debug, thiserror::Error)]
#[error("unknown script: {0} (expected devanagari or kannada)")]
pub struct ParseScriptError(pub String);

struct Tables {
    /// Letter for code `v` lives at index `v - 1`.
    alphabet: [&'static str; ALPHABET_SIZE],
    /// Additional letters outside the grid codes (nukta forms, rare vowels).
    extras: &'static [&'static str],
    virama: char,
    nukta: Option<char>,
    inherent_vowel: &'static str,
    consonants: &'static [(u32, u32)],
    vowel_signs: &'static [(u32, u32)],
    independent_vowels: &'static [(u32, u32)],
    special_marks: &'static [char],
    matra_to_vowel: &'static [(char, &'static str)],
    vowel_to_matra: &'static [(&'static str, &'static str)],
}

// ---------------------------------------------------------------------------
// Devanagari
// ---------------------------------------------------------------------------

static DEVANAGARI: Tables = Tables {
    alphabet: [
        "अ", "आ", "आा", "इ", "ई", "ईी", "उ", "ऊ", "ऊू", "ऋ", "ॠ", "ॠॄ", "ळ्", "ळु", "ळू", "ए", "एा",
        "एाा", "ऐ", "ऐो", "ऐोो", "ओ", "ओो", "ओोो", "औ", "औौ", "औौौ", "क्", "ख्", "ग्", "घ्", "ङ्",
        "च्", "छ्", "ज्", "झ्", "ञ्", "ट्", "ठ्", "ड्", "ढ्", "ण्", "त्", "थ्", "द्", "ध्", "न्", "प्",
        "फ्", "ब्", "भ्", "म्", "य्", "र्", "ल्", "व्", "श्", "ष्", "स्", "ह्", "ं", "ः", "…", "::",
    ],
    extras: &[
        "क़्", "ख़्", "ग़्", "ज़्", "ड़्", "ढ़्", "फ़्", "य़्", "ऴ्", "ऩ्", "ऴ", "ऱ्", "ऍ", "ऑ", "ऎ", "ऒ",
        "ऌ", "ॡ",
    ],
    virama: '\u{094D}',
    nukta: Some('\u{093C}'),
    inherent_vowel: "अ",
    consonants: &[(0x0915, 0x0939), (0x0958, 0x095F)],
    vowel_signs: &[
        (0x093E, 0x094C),
        (0x094E, 0x094F),
        (0x0955, 0x0957),
        (0x0962, 0x0963),
    ],
    independent_vowels: &[(0x0904, 0x0914), (0x0960, 0x0961), (0x0972, 0x0972)],
    special_marks: &['\u{0901}', '\u{0902}', '\u{0903}', '…', ':'],
    matra_to_vowel: &[
        ('ा', "आ"),
        ('ि', "इ"),
        ('ी', "ई"),
        ('ु', "उ"),
        ('ू', "ऊ"),
        ('ृ', "ऋ"),
        ('ॄ', "ॠ"),
        ('े', "ए"),
        ('ै', "ऐ"),
        ('ो', "ओ"),
        ('ौ', "औ"),
        ('ॅ', "ऍ"),
        ('ॉ', "ऑ"),
        ('ॆ', "ऎ"),
        ('ॊ', "ऒ"),
        ('ॢ', "ऌ"),
        ('ॣ', "ॡ"),
    ],
    vowel_to_matra: &[
        ("अ", ""),
        ("आ", "ा"),
        ("आा", "ा"),
        ("इ", "ि"),
        ("ई", "ी"),
        ("ईी", "ी"),
        ("उ", "ु"),
        ("ऊ", "ू"),
        ("ऊू", "ू"),
        ("ऋ", "ृ"),
        ("ॠ", "ॄ"),
        ("ॠॄ", "ॄ"),
        ("ए", "े"),
        ("एा", "े"),
        ("एाा", "े"),
        ("ऐ", "ै"),
        ("ऐो", "ै"),
        ("ऐोो", "ै"),
        ("ओ", "ो"),
        ("ओो", "ो"),
        ("ओोो", "ो"),
        ("औ", "ौ"),
        ("औौ", "ौ"),
        ("औौौ", "ौ"),
        ("ऍ", "ॅ"),
        ("ऑ", "ॉ"),
        ("ऎ", "ॆ"),
        ("ऒ", "ॊ"),
        ("ऌ", "ॢ"),
        ("ॡ", "ॣ"),
        ("ं", "ं"),
        ("ः", "ः"),
    ],
};

// ---------------------------------------------------------------------------
// Kannada
// ---------------------------------------------------------------------------

static KANNADA: Tables = Tables {
    alphabet: [
        "ಅ", "ಆ", "ಆಾ", "ಇ", "ಈ", "ಈೀ", "ಉ", "ಊ", "ಊೂ", "ಋ", "ೠ", "ೠೄ", "ಳ್", "ಳು", "ಳೂ", "ಎ", "ಏ",
        "ಏೋ", "ಐ", "ಐೖ", "ಐೖೖ", "ಒ", "ಓ", "ಓೋ", "ಔ", "ಔೌ", "ಔೌೌ", "ಕ್", "ಖ್", "ಗ್", "ಘ್", "ಙ್", "ಚ್",
        "ಛ್", "ಜ್", "ಝ್", "ಞ್", "ಟ್", "ಠ್", "ಡ್", "ಢ್", "ಣ್", "ತ್", "ಥ್", "ದ್", "ಧ್", "ನ್", "ಪ್", "ಫ್",
        "ಬ್", "ಭ್", "ಮ್", "ಯ್", "ರ್", "ಲ್", "ವ್", "ಶ್", "ಷ್", "ಸ್", "ಹ್", "ಂ", "ಃ", "...", "::",
    ],
    extras: &[":", "ೞ್", "ಱ್"],
    virama: '\u{0CCD}',
    nukta: Some('\u{0CBC}'),
    inherent_vowel: "ಅ",
    consonants: &[(0x0C95, 0x0CB9), (0x0CDE, 0x0CDE)],
    vowel_signs: &[(0x0CBE, 0x0CCC), (0x0CD5, 0x0CD6), (0x0CE2, 0x0CE3)],
    independent_vowels: &[(0x0C85, 0x0C94), (0x0CE0, 0x0CE1)],
    special_marks: &['\u{0C82}', '\u{0C83}', ':'],
    matra_to_vowel: &[
        ('ಾ', "ಆ"),
        ('ಿ', "ಇ"),
        ('ೀ', "ಈ"),
        ('ು', "ಉ"),
        ('ೂ', "ಊ"),
        ('ೃ', "ಋ"),
        ('ೄ', "ೠ"),
        ('ೆ', "ಎ"),
        ('ೇ', "ಏ"),
        ('ೈ', "ಐ"),
        ('ೊ', "ಒ"),
        ('ೋ', "ಓ"),
        ('ೌ', "ಔ"),
    ],
    vowel_to_matra: &[
        ("ಅ", ""),
        ("ಆ", "ಾ"),
        ("ಆಾ", "ಾ"),
        ("ಇ", "ಿ"),
        ("ಈ", "ೀ"),
        ("ಈೀ", "ೀ"),
        ("ಉ", "ು"),
        ("ಊ", "ೂ"),
        ("ಊೂ", "ೂ"),
        ("ಋ", "ೃ"),
        ("ೠ", "ೄ"),
        ("ೠೄ", "ೄ"),
        ("ಎ", "ೆ"),
        ("ಏ", "ೇ"),
        ("ಏೋ", "ೇ"),
        ("ಐ", "ೈ"),
        ("ಐೖ", "ೈ"),
        ("ಐೖೖ", "ೈ"),
        ("ಒ", "ೊ"),
        ("ಓ", "ೋ"),
        ("ಓೋ", "ೋ"),
        ("ಔ", "ೌ"),
        ("ಔೌ", "ೌ"),
        ("ಔೌೌ", "ೌ"),
        ("ಂ", "ಂ"),
        ("ಃ", "ಃ"),
    ],
};

fn in_ranges(c: char, ranges: &[(u32, u32)]) -> bool {
    let cp = c as u32;
    ranges.iter().any(|&(lo, hi)| (lo..=hi).contains(&cp))
}

impl Script {
    /// Every supported script, in rendering order.
    pub const ALL: [Script; 2] = [Script::Devanagari, Script::Kannada];

    fn tables(self) -> &'static Tables {
        match self {
            Script::Devanagari => &DEVANAGARI,
            Script::Kannada => &KANNADA,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Script::Devanagari => "devanagari",
            Script::Kannada => "kannada",
        }
    }

    // -- Grid code alphabet --------------------------------------------------

    /// The 64 letters addressed by grid codes 1..=64.
    pub fn alphabet(self) -> &'static [&'static str; ALPHABET_SIZE] {
        &self.tables().alphabet
    }

    /// Letters of the script that no grid code addresses.
    pub fn extra_letters(self) -> &'static [&'static str] {
        self.tables().extras
    }

    /// The letter for a 1-based grid code, if the code is in range.
    pub fn letter(self, code: u32) -> Option<&'static str> {
        let index = (code as usize).checked_sub(1)?;
        self.tables().alphabet.get(index).copied()
    }

    /// Map a code sequence to its letters. Out-of-range codes become
    /// [`UNKNOWN_LETTER`].
    pub fn letters(self, codes: &[u32]) -> Vec<&'static str> {
        codes
            .iter()
            .map(|&code| self.letter(code).unwrap_or(UNKNOWN_LETTER))
            .collect()
    }

    // -- Character classes ---------------------------------------------------

    pub fn virama(self) -> char {
        self.tables().virama
    }

    pub fn inherent_vowel(self) -> &'static str {
        self.tables().inherent_vowel
    }

    pub fn is_consonant(self, c: char) -> bool {
        in_ranges(c, self.tables().consonants)
    }

    pub fn is_nukta(self, c: char) -> bool {
        self.tables().nukta == Some(c)
    }

    /// Dependent vowel sign (matra).
    pub fn is_vowel_sign(self, c: char) -> bool {
        in_ranges(c, self.tables().vowel_signs)
    }

    pub fn is_independent_vowel(self, c: char) -> bool {
        in_ranges(c, self.tables().independent_vowels)
    }

    /// Anusvara, visarga, candrabindu and the punctuation marks that
    /// appear in the alphabet.
    pub fn is_special_mark(self, c: char) -> bool {
        self.tables().special_marks.contains(&c)
    }

    /// The independent vowel a matra denotes.
    pub fn vowel_for_matra(self, matra: char) -> Option<&'static str> {
        self.tables()
            .matra_to_vowel
            .iter()
            .find(|(m, _)| *m == matra)
            .map(|(_, v)| *v)
    }

    /// The matra written for a vowel unit after a half-letter. The
    /// inherent vowel maps to the empty string.
    pub fn matra_for_vowel(self, vowel: &str) -> Option<&'static str> {
        self.tables()
            .vowel_to_matra
            .iter()
            .find(|(v, _)| *v == vowel)
            .map(|(_, m)| *m)
    }

    // -- Unit predicates -----------------------------------------------------

    /// True for a "consonant + virama" unit, optionally with a nukta.
    pub fn is_half_letter(self, unit: &str) -> bool {
        let mut chars = unit.chars();
        let Some(first) = chars.next() else {
            return false;
        };
        if !self.is_consonant(first) {
            return false;
        }
        let rest: Vec<char> = chars.collect();
        match rest.as_slice() {
            [v] => *v == self.virama(),
            [n, v] => self.is_nukta(*n) && *v == self.virama(),
            _ => false,
        }
    }

    /// True for a single independent vowel or any vowel letter of the
    /// grid alphabet (codes 1..=27, which include lengthened forms).
    pub fn is_vowel_unit(self, unit: &str) -> bool {
        let mut chars = unit.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if self.is_independent_vowel(c) {
                return true;
            }
        }
        self.tables().alphabet[..27].contains(&unit)
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Script {
    type Err = ParseScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "devanagari" | "sanskrit" | "deva" => Ok(Script::Devanagari),
            "kannada" | "helaganda" | "knda" => Ok(Script::Kannada),
            _ => Err(ParseScriptError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_lookup_is_one_based() {
        assert_eq!(Script::Devanagari.letter(1), Some("अ"));
        assert_eq!(Script::Devanagari.letter(28), Some("क्"));
        assert_eq!(Script::Devanagari.letter(64), Some("::"));
        assert_eq!(Script::Devanagari.letter(0), None);
        assert_eq!(Script::Devanagari.letter(65), None);
        assert_eq!(Script::Kannada.letter(28), Some("ಕ್"));
        assert_eq!(Script::Kannada.letter(60), Some("ಹ್"));
    }

    #[test]
    fn letters_marks_unknown_codes() {
        let letters = Script::Devanagari.letters(&[1, 99, 28]);
        assert_eq!(letters, vec!["अ", UNKNOWN_LETTER, "क्"]);
    }

    #[test]
    fn consonant_codes_are_half_letters() {
        for script in Script::ALL {
            for code in 28..=60 {
                let letter = script.letter(code).unwrap();
                assert!(script.is_half_letter(letter), "{script} {letter}");
            }
            for code in 1..=27 {
                let letter = script.letter(code).unwrap();
                assert!(script.is_vowel_unit(letter), "{script} {letter}");
            }
        }
    }

    #[test]
    fn nukta_half_letter() {
        assert!(Script::Devanagari.is_half_letter("क़्"));
        assert!(Script::Devanagari.is_half_letter("क\u{093C}्"));
        assert!(!Script::Devanagari.is_half_letter("क"));
        assert!(!Script::Devanagari.is_half_letter(""));
    }

    #[test]
    fn matra_tables_agree() {
        for script in Script::ALL {
            for &(matra, vowel) in script.tables().matra_to_vowel {
                if let Some(back) = script.matra_for_vowel(vowel) {
                    assert_eq!(back, matra.to_string(), "{script} {vowel}");
                }
            }
        }
        assert_eq!(Script::Devanagari.matra_for_vowel("अ"), Some(""));
        assert_eq!(Script::Kannada.vowel_for_matra('ೋ'), Some("ಓ"));
    }

    #[test]
    fn parse_script_names() {
        assert_eq!("Devanagari".parse::<Script>().unwrap(), Script::Devanagari);
        assert_eq!("helaganda".parse::<Script>().unwrap(), Script::Kannada);
        assert!("latin".parse::<Script>().is_err());
    }
}
