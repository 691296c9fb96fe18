//! # Property-Based Tests
//!
//! Reassembly must not depend on how the input stream happens to be chunked.

use graphiti_bridge_core::LineReassembler;
use proptest::collection::vec;
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

/// A frame body: printable, never blank, no newline.
fn frame() -> impl Strategy<Value = String> {
    "[a-z0-9{}\":,]{1,24}"
}

/// Split `bytes` at the given (unsorted, possibly repeated) cut points.
fn chunk(bytes: &[u8], mut cuts: Vec<usize>) -> Vec<Vec<u8>> {
    cuts.iter_mut().for_each(|c| *c %= bytes.len() + 1);
    cuts.sort_unstable();
    cuts.dedup();

    let mut chunks = Vec::new();
    let mut start = 0;
    for cut in cuts {
        chunks.push(bytes[start..cut].to_vec());
        start = cut;
    }
    chunks.push(bytes[start..].to_vec());
    chunks
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// N terminated frames plus a fragment: exactly N lines, fragment kept.
    #[test]
    fn any_chunking_yields_exactly_the_terminated_frames(
        frames in vec(frame(), 0..20),
        fragment in "[a-z0-9{}]{0,16}",
        cuts in vec(any::<usize>(), 0..12),
    ) {
        let mut stream = String::new();
        for f in &frames {
            stream.push_str(f);
            stream.push('\n');
        }
        stream.push_str(&fragment);

        let mut reassembler = LineReassembler::new();
        let mut lines = Vec::new();
        for piece in chunk(stream.as_bytes(), cuts) {
            lines.extend(reassembler.push(&piece));
        }

        let expected: Vec<Vec<u8>> = frames.iter().map(|f| f.as_bytes().to_vec()).collect();
        prop_assert_eq!(lines, expected);
        prop_assert_eq!(reassembler.pending_len(), fragment.len());
        prop_assert_eq!(reassembler.finish(), fragment.len());
    }

    /// Blank lines interleaved anywhere never surface as frames.
    #[test]
    fn blank_lines_never_surface(
        frames in vec(frame(), 1..10),
        blanks in vec(0usize..3, 1..10),
    ) {
        let mut stream = String::new();
        for (i, f) in frames.iter().enumerate() {
            let pad = blanks[i % blanks.len()];
            for _ in 0..pad {
                stream.push_str("  \n");
            }
            stream.push_str(f);
            stream.push('\n');
        }

        let mut reassembler = LineReassembler::new();
        let lines = reassembler.push(stream.as_bytes());
        prop_assert_eq!(lines.len(), frames.len());
        prop_assert_eq!(reassembler.pending_len(), 0);
    }
}
