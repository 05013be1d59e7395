//! Byte-offset to line/column conversion.

use crate::types::{Position, Range};

/// Precomputed line table over one document's text.
///
/// Lines are split on `\n`, `\r\n`, and lone `\r`. Columns count characters
/// within the line, so multi-byte content maps to the positions an editor
/// shows. Both coordinates are zero-based.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        let bytes = text.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\n' => line_starts.push(i + 1),
                b'\r' => {
                    if bytes.get(i + 1) != Some(&b'\n') {
                        line_starts.push(i + 1);
                    }
                }
                _ => {}
            }
            i += 1;
        }
        Self { text, line_starts }
    }

    /// Convert a byte offset into a position. Offsets past the end of the
    /// text clamp to the final position; offsets are expected to sit on
    /// character boundaries (token spans always do).
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.text.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        let line_start = self.line_starts[line];
        let column = self.text[line_start..]
            .char_indices()
            .take_while(|(i, _)| line_start + i < offset)
            .count();
        Position {
            line: line as u32,
            column: column as u32,
        }
    }

    /// Convert a byte span into a range.
    pub fn range(&self, start: usize, end: usize) -> Range {
        Range {
            start: self.position(start),
            end: self.position(end.max(start)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_positions() {
        let index = LineIndex::new("abc def");
        assert_eq!(index.position(0), Position { line: 0, column: 0 });
        assert_eq!(index.position(4), Position { line: 0, column: 4 });
    }

    #[test]
    fn positions_across_lines() {
        let text = "{\n  \"a\": 1\n}";
        let index = LineIndex::new(text);
        assert_eq!(index.position(0), Position { line: 0, column: 0 });
        assert_eq!(index.position(2), Position { line: 1, column: 0 });
        assert_eq!(index.position(text.len() - 1), Position { line: 2, column: 0 });
    }

    #[test]
    fn crlf_counts_as_one_terminator() {
        let index = LineIndex::new("a\r\nb");
        assert_eq!(index.position(3), Position { line: 1, column: 0 });
    }

    #[test]
    fn multibyte_columns_count_characters() {
        let text = "{\"é\": \"日本\"}";
        let index = LineIndex::new(text);
        let quote = text.rfind('"').unwrap();
        // Bytes: { " é(2) " : space " 日(3) 本(3) " }, character column 9.
        assert_eq!(index.position(quote).column, 9);
    }

    #[test]
    fn offset_past_end_clamps() {
        let index = LineIndex::new("ab");
        assert_eq!(index.position(100), Position { line: 0, column: 2 });
    }

    #[test]
    fn range_spans_both_positions() {
        let index = LineIndex::new("one\ntwo");
        let range = index.range(0, 7);
        assert_eq!(range.start, Position { line: 0, column: 0 });
        assert_eq!(range.end, Position { line: 1, column: 3 });
    }
}
