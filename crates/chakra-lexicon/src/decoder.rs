// Decoding of grid code sequences into graded fragments per script

use chakra_core::{Grade, Script};
use serde::Serialize;

use crate::dictionary::{Dictionary, Lexicon, WordList};
use crate::grader::FragmentScorer;
use crate::segmenter::Segmenter;
use crate::trie::UnitTrie;

/// Segmentation and scores for one script.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptReport {
    pub script: Script,
    /// One letter per code.
    pub letters: Vec<String>,
    /// Fragments reading forward.
    pub fragments: Vec<String>,
    /// Fragments reading backward.
    pub reversed: Vec<String>,
    /// Fragments of every rotation; empty unless decoded as a cycle.
    pub rotations: Vec<Vec<String>>,
    /// Score of the forward fragments.
    pub score: f64,
    pub reversed_score: f64,
    /// Highest score over every reading.
    pub best_score: f64,
    /// Grade of `best_score`.
    pub grade: Grade,
}

impl ScriptReport {
    /// The highest scoring reading.
    pub fn best_fragments(&self) -> &[String] {
        if self.reversed_score > self.score {
            &self.reversed
        } else {
            &self.fragments
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DecodeReport {
    pub cycle: bool,
    pub scripts: Vec<ScriptReport>,
}

impl DecodeReport {
    pub fn get(&self, script: Script) -> Option<&ScriptReport> {
        self.scripts.iter().find(|r| r.script == script)
    }

    /// Best score over all scripts; 0 when nothing was decoded.
    pub fn best_score(&self) -> f64 {
        self.scripts.iter().map(|r| r.best_score).fold(0.0, f64::max)
    }
}

struct ScriptModel {
    script: Script,
    trie: UnitTrie,
    lexicon: Box<dyn Lexicon + Send + Sync>,
}

/// Per-script tries and lexicons behind one decode call.
///
/// Built once, then read-only; share it by reference across threads.
#[derive(Default)]
pub struct Decoder {
    models: Vec<ScriptModel>,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a parsed dictionary for `script`; its headwords feed the trie.
    pub fn with_dictionary(mut self, script: Script, dictionary: Dictionary) -> Self {
        let trie = UnitTrie::build(script, dictionary.all_words());
        self.add_script(script, trie, Box::new(dictionary));
        self
    }

    /// Use a plain word list for `script`, both as trie and lexicon.
    pub fn with_words(mut self, script: Script, words: Vec<String>) -> Self {
        let trie = UnitTrie::build(script, &words);
        self.add_script(script, trie, Box::new(WordList::new(words)));
        self
    }

    /// Register or replace the model for a script.
    pub fn add_script(&mut self, script: Script, trie: UnitTrie, lexicon: Box<dyn Lexicon + Send + Sync>) {
        log::info!("decoder: {script} trie with {} words ({} nodes)", trie.len(), trie.node_count());
        self.models.retain(|m| m.script != script);
        self.models.push(ScriptModel { script, trie, lexicon });
    }

    pub fn scripts(&self) -> impl Iterator<Item = Script> + '_ {
        self.models.iter().map(|m| m.script)
    }

    pub fn trie(&self, script: Script) -> Option<&UnitTrie> {
        self.model(script).map(|m| &m.trie)
    }

    pub fn lexicon(&self, script: Script) -> Option<&(dyn Lexicon + Send + Sync)> {
        self.model(script).map(|m| m.lexicon.as_ref())
    }

    fn model(&self, script: Script) -> Option<&ScriptModel> {
        self.models.iter().find(|m| m.script == script)
    }

    /// Decode a path read forward and backward in every loaded script.
    pub fn decode(&self, codes: &[u32]) -> DecodeReport {
        self.decode_as(codes, false)
    }

    /// Decode a cycle: every rotation is segmented as well.
    pub fn decode_cycle(&self, codes: &[u32]) -> DecodeReport {
        self.decode_as(codes, true)
    }

    fn decode_as(&self, codes: &[u32], cycle: bool) -> DecodeReport {
        let scripts = self
            .models
            .iter()
            .map(|m| Self::decode_script(m, codes, cycle))
            .collect();
        DecodeReport { cycle, scripts }
    }

    fn decode_script(model: &ScriptModel, codes: &[u32], cycle: bool) -> ScriptReport {
        let letters: Vec<String> = model.script.letters(codes).into_iter().map(str::to_string).collect();
        let segmenter = Segmenter::new(&model.trie);
        let scorer = FragmentScorer::new(model.lexicon.as_ref(), model.script);

        let fragments = segmenter.extract_words(&letters);
        let reversed = segmenter.extract_words_reversed(&letters);
        let rotations = if cycle {
            segmenter.segment_rotations(&letters)
        } else {
            Vec::new()
        };

        let score = scorer.score(&fragments);
        let reversed_score = scorer.score(&reversed);
        let best_score = rotations
            .iter()
            .map(|r| scorer.score(r))
            .fold(score.max(reversed_score), f64::max);

        log::debug!(
            "{}: {} letters, {} fragments, score {score:.1} / reversed {reversed_score:.1}",
            model.script,
            letters.len(),
            fragments.len()
        );

        ScriptReport {
            script: model.script,
            letters,
            fragments,
            reversed,
            rotations,
            score,
            reversed_score,
            best_score,
            grade: Grade::from_percentage(best_score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // क् = 28, आ = 2, र् = 54, म् = 52, अ = 1
    const KA_KA: [u32; 4] = [28, 2, 28, 2];

    fn decoder() -> Decoder {
        let (dict, _) = Dictionary::parse("का|ind.|crow\nराम|m.|Rama\n");
        Decoder::new().with_dictionary(Script::Devanagari, dict)
    }

    #[test]
    fn decodes_forward_and_backward() {
        let report = decoder().decode(&KA_KA);
        assert!(!report.cycle);
        let deva = report.get(Script::Devanagari).unwrap();
        assert_eq!(deva.letters, vec!["क्", "आ", "क्", "आ"]);
        assert_eq!(deva.fragments, vec!["का", "का"]);
        assert_eq!(deva.score, 100.0);
        assert_eq!(deva.reversed, vec!["आ", "का", "क्"]);
        assert_eq!(deva.best_score, 100.0);
        assert_eq!(deva.grade, Grade::APlus);
        assert_eq!(deva.best_fragments(), deva.fragments.as_slice());
        assert!(report.get(Script::Kannada).is_none());
    }

    #[test]
    fn cycles_include_rotations() {
        let report = decoder().decode_cycle(&[2, 28, 54, 2, 52, 1]);
        let deva = report.get(Script::Devanagari).unwrap();
        assert_eq!(deva.rotations.len(), 6);
        // Rotation 2 reads र् आ म् अ आ क् and starts with "राम".
        assert_eq!(deva.rotations[2][0], "राम");
        assert!(deva.best_score >= deva.score);
        assert!(deva.best_score >= deva.reversed_score);
    }

    #[test]
    fn word_lists_and_replacement() {
        let mut decoder = decoder().with_words(Script::Kannada, vec!["ಕಾ".to_string()]);
        assert_eq!(decoder.scripts().count(), 2);
        let report = decoder.decode(&KA_KA);
        assert_eq!(report.get(Script::Kannada).unwrap().fragments, vec!["ಕಾ", "ಕಾ"]);

        decoder.add_script(Script::Kannada, UnitTrie::new(Script::Kannada), Box::new(WordList::default()));
        assert_eq!(decoder.scripts().count(), 2);
        assert!(decoder.trie(Script::Kannada).unwrap().is_empty());
        // Only the two bare vowels count, at a quarter each.
        assert_eq!(decoder.decode(&KA_KA).get(Script::Kannada).unwrap().score, 12.5);
    }

    #[test]
    fn malformed_grid_letters_score_zero() {
        // Code 18 is एाा, two vowel signs in a row.
        let report = decoder().decode(&[18]);
        let deva = report.get(Script::Devanagari).unwrap();
        assert_eq!(deva.fragments, vec!["एाा"]);
        assert_eq!(deva.best_score, 0.0);
    }

    #[test]
    fn empty_decoder_reports_nothing() {
        let report = Decoder::new().decode(&KA_KA);
        assert!(report.scripts.is_empty());
        assert_eq!(report.best_score(), 0.0);
    }
}
