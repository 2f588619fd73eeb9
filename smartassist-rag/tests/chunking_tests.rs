//! Property tests for character-window chunking.

use proptest::prelude::*;
use smartassist_rag::{Chunker, Document, FixedSizeChunker, chunk_text};

/// Valid `(chunk_size, overlap)` pairs with `overlap < chunk_size`.
fn arb_params() -> impl Strategy<Value = (usize, usize)> {
    (1usize..64).prop_flat_map(|size| (Just(size), 0..size))
}

/// Undo the overlap: keep the first chunk whole, then drop from each later
/// chunk the characters it shares with its predecessor.
fn reconstruct(chunks: &[String], overlap: usize) -> String {
    let mut text = String::new();
    for (i, chunk) in chunks.iter().enumerate() {
        let skip = if i == 0 { 0 } else { overlap.min(chunk.chars().count()) };
        text.extend(chunk.chars().skip(skip));
    }
    text
}

/// **Chunk coverage**
/// *For any* non-empty text and valid parameters, removing the overlap from
/// consecutive chunks reconstructs the original text exactly.
mod prop_chunk_coverage {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn overlap_removal_reconstructs_text(
            text in "\\PC{1,300}",
            (size, overlap) in arb_params(),
        ) {
            let chunks = chunk_text(&text, size, overlap).unwrap();
            prop_assert!(!chunks.is_empty());
            prop_assert_eq!(reconstruct(&chunks, overlap), text);
        }

        #[test]
        fn chunks_respect_size_and_overlap(
            text in "[a-z ]{1,300}",
            (size, overlap) in arb_params(),
        ) {
            let chunks = chunk_text(&text, size, overlap).unwrap();
            prop_assert!(chunks.iter().all(|c| !c.is_empty() && c.chars().count() <= size));

            // Each chunk starts `size - overlap` characters after its
            // predecessor, so the predecessor's remainder is its prefix.
            let step = size - overlap;
            for pair in chunks.windows(2) {
                let shared: String = pair[0].chars().skip(step).collect();
                prop_assert!(shared.chars().count() <= overlap);
                prop_assert!(pair[1].starts_with(&shared));
            }
            prop_assert_eq!(chunks.len(), text.chars().count().div_ceil(step));
        }
    }
}

/// **Chunk determinism**
/// *For any* input, chunking twice yields identical sequences.
mod prop_chunk_determinism {
    use super::*;

    proptest! {
        #[test]
        fn identical_inputs_identical_chunks(
            text in "\\PC{0,200}",
            (size, overlap) in arb_params(),
        ) {
            let first = chunk_text(&text, size, overlap).unwrap();
            let second = chunk_text(&text, size, overlap).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn chunker_matches_chunk_text(
            text in "[a-z]{0,200}",
            (size, overlap) in arb_params(),
        ) {
            let chunker = FixedSizeChunker::new(size, overlap).unwrap();
            let chunks = chunker.chunk(&Document::new("doc.txt", text.clone()));
            let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
            prop_assert_eq!(texts, chunk_text(&text, size, overlap).unwrap());
            prop_assert!(chunks.iter().all(|c| c.source == "doc.txt"));
        }
    }
}

#[test]
fn invalid_parameters_fail_fast() {
    for (size, overlap) in [(0, 0), (5, 5), (5, 6)] {
        assert!(chunk_text("some text", size, overlap).is_err());
    }
}
