// Criterion benchmarks for chakra-lexicon.
//
// The word list is generated from the Devanagari alphabet, so no data
// files are needed.
//
// Run:
//   cargo bench -p chakra-lexicon

use chakra_core::Script;
use chakra_lexicon::units::render;
use chakra_lexicon::{Segmenter, UnitTrie, WordList, score_fragments};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Pseudo-random consonant-vowel words of two to four syllables.
fn words(count: usize) -> Vec<String> {
    let alphabet = Script::Devanagari.alphabet();
    (0..count as u32)
        .map(|i| {
            let h = i.wrapping_mul(2_654_435_761);
            let syllables = 2 + (h % 3) as usize;
            let units: Vec<&str> = (0..syllables)
                .flat_map(|s| {
                    let k = (h >> (s * 5)) as usize;
                    [alphabet[27 + k % 33], alphabet[k % 27]]
                })
                .collect();
            render(Script::Devanagari, &units)
        })
        .collect()
}

fn letters(len: usize) -> Vec<&'static str> {
    let codes: Vec<u32> = (0..len as u32).map(|i| 1 + (i * 29 + i / 3) % 64).collect();
    Script::Devanagari.letters(&codes)
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_build(c: &mut Criterion) {
    let list = words(20_000);
    c.bench_function("trie_build_20k", |b| {
        b.iter(|| UnitTrie::build(Script::Devanagari, black_box(&list)))
    });
}

fn bench_segment(c: &mut Criterion) {
    let trie = UnitTrie::build(Script::Devanagari, words(20_000));
    let input = letters(729);
    let segmenter = Segmenter::new(&trie);
    c.bench_function("segment_729", |b| b.iter(|| segmenter.segment(black_box(&input))));
}

fn bench_score(c: &mut Criterion) {
    let list = words(20_000);
    let lexicon = WordList::new(list.iter().cloned());
    let trie = UnitTrie::build(Script::Devanagari, &list);
    let fragments = Segmenter::new(&trie).extract_words(&letters(729));
    c.bench_function("score_729", |b| {
        b.iter(|| score_fragments(&lexicon, Script::Devanagari, black_box(&fragments)))
    });
}

criterion_group!(benches, bench_build, bench_segment, bench_score);
criterion_main!(benches);
