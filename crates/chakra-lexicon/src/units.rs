// Orthographic units: splitting words into vowels, half-letters and
// marks, and rendering unit sequences back into conventional spelling.

use chakra_core::Script;

/// Split `word` into orthographic units.
///
/// - consonant + virama: one half-letter unit
/// - consonant + matra: the half-letter, then the vowel the matra denotes
/// - consonant + anything else: the half-letter, then the inherent vowel
/// - independent vowels and special marks: one unit each
///
/// A nukta directly after a consonant stays with it. Other characters
/// are skipped.
pub fn decompose(script: Script, word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let virama = script.virama();
    let mut units = Vec::with_capacity(chars.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if script.is_consonant(c) {
            let mut half = String::with_capacity(12);
            half.push(c);
            let mut j = i + 1;
            if let Some(&n) = chars.get(j) {
                if script.is_nukta(n) {
                    half.push(n);
                    j += 1;
                }
            }
            half.push(virama);
            units.push(half);

            match chars.get(j) {
                Some(&v) if v == virama => i = j + 1,
                Some(&m) if script.is_vowel_sign(m) => {
                    match script.vowel_for_matra(m) {
                        Some(vowel) => units.push(vowel.to_string()),
                        None => units.push(m.to_string()),
                    }
                    i = j + 1;
                }
                _ => {
                    units.push(script.inherent_vowel().to_string());
                    i = j;
                }
            }
        } else if script.is_independent_vowel(c) || script.is_special_mark(c) {
            units.push(c.to_string());
            i += 1;
        } else {
            i += 1;
        }
    }
    units
}

/// Render units as text. A vowel following a half-letter replaces the
/// virama with its matra (nothing for the inherent vowel); anusvara and
/// visarga attach to the bare consonant the same way.
pub fn render<S: AsRef<str>>(script: Script, units: &[S]) -> String {
    let mut out = String::new();
    let mut after_half = false;
    for unit in units {
        let unit = unit.as_ref();
        if after_half {
            if let Some(matra) = script.matra_for_vowel(unit) {
                out.pop();
                out.push_str(matra);
                after_half = false;
                continue;
            }
        }
        out.push_str(unit);
        after_half = script.is_half_letter(unit);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deva(word: &str) -> Vec<String> {
        decompose(Script::Devanagari, word)
    }

    #[test]
    fn consonant_with_matra() {
        assert_eq!(deva("कि"), vec!["क्", "इ"]);
        assert_eq!(deva("रामो"), vec!["र्", "आ", "म्", "ओ"]);
    }

    #[test]
    fn consonant_with_inherent_vowel() {
        assert_eq!(deva("नर"), vec!["न्", "अ", "र्", "अ"]);
    }

    #[test]
    fn explicit_virama_and_conjuncts() {
        assert_eq!(deva("क्ष"), vec!["क्", "ष्", "अ"]);
        assert_eq!(deva("वाक्"), vec!["व्", "आ", "क्"]);
    }

    #[test]
    fn vowels_marks_and_skipped_characters() {
        assert_eq!(deva("अं"), vec!["अ", "ं"]);
        assert_eq!(deva("इति "), vec!["इ", "त्", "इ"]);
        assert_eq!(deva("a1"), Vec::<String>::new());
        assert_eq!(deva("रामः"), vec!["र्", "आ", "म्", "अ", "ः"]);
    }

    #[test]
    fn nukta_stays_with_consonant() {
        assert_eq!(deva("क\u{093C}ा"), vec!["क\u{093C}्", "आ"]);
    }

    #[test]
    fn kannada_rules() {
        let units = decompose(Script::Kannada, "ಕನ್ನಡ");
        assert_eq!(units, vec!["ಕ್", "ಅ", "ನ್", "ನ್", "ಅ", "ಡ್", "ಅ"]);
        assert_eq!(decompose(Script::Kannada, "ಗೋ"), vec!["ಗ್", "ಓ"]);
    }

    #[test]
    fn render_inverts_decompose() {
        for word in ["राम", "कृष्ण", "वाक्", "अग्निः", "संस्कृतम्", "इति"] {
            assert_eq!(render(Script::Devanagari, &deva(word)), word, "{word}");
        }
        for word in ["ಕನ್ನಡ", "ಗೋವು", "ಅರಸ"] {
            let units = decompose(Script::Kannada, word);
            assert_eq!(render(Script::Kannada, &units), word, "{word}");
        }
    }

    #[test]
    fn render_grid_letters() {
        // Lengthened vowel letters still fold into the plain matra.
        assert_eq!(render(Script::Devanagari, &["क्", "आा"]), "का");
        assert_eq!(render(Script::Devanagari, &["क्", "ं"]), "कं");
        assert_eq!(render(Script::Devanagari, &["अ", "क्"]), "अक्");
        assert_eq!(render(Script::Devanagari, &["ं", "इ"]), "ंइ");
    }
}
