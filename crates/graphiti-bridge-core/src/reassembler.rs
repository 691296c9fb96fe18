//! # Line Reassembler
//!
//! Turns an unbounded byte stream into complete lines.
//!
//! Bytes are buffered until a `\n` is seen; everything after the last
//! delimiter stays pending for the next chunk. Working on bytes rather than
//! text means a chunk boundary inside a multi-byte UTF-8 sequence is harmless.

/// Newline-delimited frame reassembler.
#[derive(Debug, Default)]
pub struct LineReassembler {
    pending: Vec<u8>,
}

impl LineReassembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and drain every completed, non-blank line.
    ///
    /// Returned lines do not include the delimiter. Lines that are empty
    /// after trimming whitespace are skipped.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Vec<u8>> {
        // Earlier bytes were already searched; only the new chunk can
        // contain a fresh delimiter.
        let Some(last_delim) = chunk
            .iter()
            .rposition(|&b| b == b'\n')
            .map(|i| self.pending.len() + i)
        else {
            self.pending.extend_from_slice(chunk);
            return Vec::new();
        };
        self.pending.extend_from_slice(chunk);

        let rest = self.pending.split_off(last_delim + 1);
        let complete = std::mem::replace(&mut self.pending, rest);

        complete[..last_delim]
            .split(|&b| b == b'\n')
            .filter(|line| !line.trim_ascii().is_empty())
            .map(<[u8]>::to_vec)
            .collect()
    }

    /// Bytes buffered but not yet terminated by a delimiter.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Drop the pending fragment at end of stream, returning its length.
    ///
    /// The fragment is never parsed.
    pub fn finish(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: Vec<Vec<u8>>) -> Vec<String> {
        raw.into_iter()
            .map(|l| String::from_utf8(l).expect("utf8"))
            .collect()
    }

    #[test]
    fn single_complete_line() {
        let mut r = LineReassembler::new();
        assert_eq!(lines(r.push(b"{\"a\":1}\n")), vec!["{\"a\":1}"]);
        assert_eq!(r.pending_len(), 0);
    }

    #[test]
    fn fragment_waits_for_delimiter() {
        let mut r = LineReassembler::new();
        assert!(r.push(b"{\"a\":").is_empty());
        assert_eq!(r.pending_len(), 5);
        assert_eq!(lines(r.push(b"1}\n{\"b\"")), vec!["{\"a\":1}"]);
        assert_eq!(r.pending_len(), 4);
    }

    #[test]
    fn several_lines_in_one_chunk() {
        let mut r = LineReassembler::new();
        let out = lines(r.push(b"one\ntwo\nthree\n"));
        assert_eq!(out, vec!["one", "two", "three"]);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let mut r = LineReassembler::new();
        let out = lines(r.push(b"\n   \none\n\t\r\ntwo\n"));
        assert_eq!(out, vec!["one", "two"]);
    }

    #[test]
    fn split_multibyte_character_is_reassembled() {
        let text = "{\"q\":\"記憶\"}\n".as_bytes();
        let mut r = LineReassembler::new();
        // Cut inside the first CJK character.
        assert!(r.push(&text[..8]).is_empty());
        let out = lines(r.push(&text[8..]));
        assert_eq!(out, vec!["{\"q\":\"記憶\"}"]);
    }

    #[test]
    fn large_frame_in_many_chunks() {
        let body = format!("{{\"pad\":\"{}\"}}", "x".repeat(64 * 1024));
        let mut r = LineReassembler::new();
        let mut out = Vec::new();
        for piece in body.as_bytes().chunks(8 * 1024) {
            out.extend(r.push(piece));
        }
        assert!(out.is_empty());
        assert_eq!(r.pending_len(), body.len());

        out.extend(r.push(b"\nnext"));
        assert_eq!(lines(out), vec![body]);
        assert_eq!(r.pending_len(), 4);
    }

    #[test]
    fn finish_discards_fragment() {
        let mut r = LineReassembler::new();
        let _ = r.push(b"done\npartial");
        assert_eq!(r.finish(), 7);
        assert_eq!(r.pending_len(), 0);
        assert!(r.push(b"\n").is_empty());
    }
}
