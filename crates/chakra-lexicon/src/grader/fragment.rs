// Structural checks on a single fragment, independent of any dictionary

use chakra_core::Script;

const BASE_QUALITY: f64 = 0.6;
const GOOD_PAIR_BONUS: f64 = 0.2;
const BAD_PAIR_PENALTY: f64 = 0.3;

/// Devanagari sign pairs that collapse to their second member's long form.
const DEVANAGARI_FOLDS: [(&str, &str); 7] = [
    ("ाी", "ी"),
    ("ीि", "ी"),
    ("ुू", "ू"),
    ("ूु", "ू"),
    ("ृॄ", "ॄ"),
    ("ेै", "ै"),
    ("ोौ", "ौ"),
];

/// Collapse doubled vowel signs that decoding can produce.
pub fn normalize_fragment(script: Script, fragment: &str) -> String {
    match script {
        Script::Devanagari => DEVANAGARI_FOLDS
            .iter()
            .fold(fragment.to_string(), |s, (from, to)| s.replace(from, to)),
        Script::Kannada => fragment.to_string(),
    }
}

/// False for empty fragments and for ones containing a doubled virama or
/// two vowel signs in a row.
pub fn is_valid_fragment(script: Script, fragment: &str) -> bool {
    if fragment.is_empty() {
        return false;
    }
    let virama = script.virama();
    let chars: Vec<char> = fragment.chars().collect();
    !chars.windows(2).any(|w| {
        (w[0] == virama && w[1] == virama) || (script.is_vowel_sign(w[0]) && script.is_vowel_sign(w[1]))
    })
}

/// Heuristic well-formedness in `[0, 1]`.
///
/// Starts at 0.6 after normalization; each consonant followed by a vowel
/// sign adds and each pair of adjacent independent vowels subtracts, both
/// scaled by the number of adjacent pairs. Invalid fragments score 0.
pub fn fragment_quality(script: Script, fragment: &str) -> f64 {
    let fragment = normalize_fragment(script, fragment);
    if !is_valid_fragment(script, &fragment) {
        return 0.0;
    }
    let chars: Vec<char> = fragment.chars().collect();
    if chars.len() < 2 {
        return BASE_QUALITY;
    }
    let (good, bad) = chars.windows(2).fold((0usize, 0usize), |(good, bad), w| {
        let g = script.is_consonant(w[0]) && script.is_vowel_sign(w[1]);
        let b = script.is_independent_vowel(w[0]) && script.is_independent_vowel(w[1]);
        (good + g as usize, bad + b as usize)
    });
    let pairs = (chars.len() - 1) as f64;
    let score = BASE_QUALITY + GOOD_PAIR_BONUS * good as f64 / pairs - BAD_PAIR_PENALTY * bad as f64 / pairs;
    score.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEVA: Script = Script::Devanagari;

    #[test]
    fn folds_doubled_signs() {
        assert_eq!(normalize_fragment(DEVA, "काी"), "की");
        assert_eq!(normalize_fragment(DEVA, "कोौ"), "कौ");
        assert_eq!(normalize_fragment(DEVA, "राम"), "राम");
        assert_eq!(normalize_fragment(Script::Kannada, "ಕಾ"), "ಕಾ");
    }

    #[test]
    fn rejects_malformed_fragments() {
        assert!(!is_valid_fragment(DEVA, ""));
        assert!(!is_valid_fragment(DEVA, "क््"));
        assert!(!is_valid_fragment(DEVA, "काि"));
        assert!(is_valid_fragment(DEVA, "क्ष"));
        assert!(is_valid_fragment(DEVA, "रामः"));
        assert!(!is_valid_fragment(Script::Kannada, "ಕ್್"));
    }

    #[test]
    fn quality_rewards_matras_and_penalizes_vowel_runs() {
        assert_eq!(fragment_quality(DEVA, "क््"), 0.0);
        assert_eq!(fragment_quality(DEVA, "क"), BASE_QUALITY);
        // one good pair out of one
        assert!((fragment_quality(DEVA, "का") - 0.8).abs() < 1e-9);
        // one bad pair out of one
        assert!((fragment_quality(DEVA, "अइ") - 0.3).abs() < 1e-9);
        let q = fragment_quality(DEVA, "रामायण");
        assert!((0.0..=1.0).contains(&q) && q > BASE_QUALITY);
    }

    #[test]
    fn quality_normalizes_first() {
        // "काी" would be invalid; it folds to "की" first.
        assert!((fragment_quality(DEVA, "काी") - 0.8).abs() < 1e-9);
    }
}
