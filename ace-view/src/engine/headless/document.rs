//! Line-structured text storage for the headless engine.

use regex::{Regex, RegexBuilder};

use crate::range::{AceRange, Position};
use crate::search::SearchOptions;

/// Document text addressed by row and column.
///
/// Columns count UTF-16 code units, as JavaScript string indices do. Lines are split on `\r\n`, `\r` and `\n`, and a
/// trailing terminator opens one more empty row, as in the widget.
#[derive(Debug, Clone, Default)]
pub(crate) struct Document {
    text: String,
}

impl Document {
    pub(crate) fn new(text: &str) -> Self {
        Self { text: text.to_string() }
    }

    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// Number of rows; never less than one.
    pub(crate) fn length(&self) -> usize {
        self.line_spans().len()
    }

    /// Row content without its terminator.
    pub(crate) fn line(&self, row: usize) -> Option<&str> {
        self.line_spans().get(row).map(|&(start, end)| &self.text[start..end])
    }

    /// The position just past the last character.
    pub(crate) fn end_position(&self) -> Position {
        let spans = self.line_spans();
        let row = spans.len() - 1;
        let (start, end) = spans[row];
        Position::new(row, utf16_len(&self.text[start..end]))
    }

    /// Moves `position` onto the document: the row onto the last row and
    /// the column onto the end of its row.
    pub(crate) fn clamp(&self, position: Position) -> Position {
        let spans = self.line_spans();
        let row = position.row.min(spans.len() - 1);
        let (start, end) = spans[row];
        Position::new(row, position.column.min(utf16_len(&self.text[start..end])))
    }

    /// Replaces the text covered by `range` and returns where the insertion
    /// ends.
    pub(crate) fn replace(&mut self, range: AceRange, text: &str) -> Position {
        let (start, end) = self.ordered(range);
        let start_byte = self.byte_offset(start);
        let end_byte = self.byte_offset(end);
        self.text.replace_range(start_byte..end_byte, text);
        self.position_of(start_byte + text.len())
    }

    /// Every match of `options.needle`, row by row.
    ///
    /// # Errors
    ///
    /// Returns the pattern error when `regExp` is set and the needle does
    /// not compile.
    pub(crate) fn find_all(&self, options: &SearchOptions) -> Result<Vec<AceRange>, regex::Error> {
        if options.needle.is_empty() {
            return Ok(Vec::new());
        }
        let pattern = search_pattern(options)?;
        let mut ranges = Vec::new();
        for (row, &(start, end)) in self.line_spans().iter().enumerate() {
            let line = &self.text[start..end];
            for found in pattern.find_iter(line) {
                if found.as_str().is_empty() {
                    continue;
                }
                let start_column = utf16_len(&line[..found.start()]);
                let end_column = start_column + utf16_len(found.as_str());
                ranges.push(AceRange::new(
                    Position::new(row, start_column),
                    Position::new(row, end_column),
                ));
            }
        }
        if options.backwards == Some(true) {
            ranges.reverse();
        }
        Ok(ranges)
    }

    fn ordered(&self, range: AceRange) -> (Position, Position) {
        let start = self.clamp(range.start);
        let end = self.clamp(range.end);
        if start <= end { (start, end) } else { (end, start) }
    }

    fn byte_offset(&self, position: Position) -> usize {
        let position = self.clamp(position);
        let (start, end) = self.line_spans()[position.row];
        // A column inside a surrogate pair rounds up past the character.
        let mut units = 0;
        for (offset, ch) in self.text[start..end].char_indices() {
            if units >= position.column {
                return start + offset;
            }
            units += ch.len_utf16();
        }
        end
    }

    fn position_of(&self, byte: usize) -> Position {
        let spans = self.line_spans();
        let row = spans.iter().rposition(|&(start, _)| start <= byte).unwrap_or(0);
        let (start, end) = spans[row];
        let byte = byte.min(end);
        Position::new(row, utf16_len(&self.text[start..byte]))
    }

    /// Byte spans of each row's content, terminators excluded.
    fn line_spans(&self) -> Vec<(usize, usize)> {
        let bytes = self.text.as_bytes();
        let mut spans = Vec::new();
        let mut start = 0;
        let mut index = 0;
        while index < bytes.len() {
            match bytes[index] {
                b'\n' => {
                    spans.push((start, index));
                    index += 1;
                    start = index;
                }
                b'\r' => {
                    spans.push((start, index));
                    index += if bytes.get(index + 1) == Some(&b'\n') { 2 } else { 1 };
                    start = index;
                }
                _ => index += 1,
            }
        }
        spans.push((start, bytes.len()));
        spans
    }
}

fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

fn search_pattern(options: &SearchOptions) -> Result<Regex, regex::Error> {
    let needle = if options.reg_exp == Some(true) {
        options.needle.clone()
    } else {
        regex::escape(&options.needle)
    };
    let needle = if options.whole_word == Some(true) { format!(r"\b(?:{needle})\b") } else { needle };
    RegexBuilder::new(&needle).case_insensitive(options.case_sensitive != Some(true)).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start_row: usize, start_column: usize, end_row: usize, end_column: usize) -> AceRange {
        AceRange::new(Position::new(start_row, start_column), Position::new(end_row, end_column))
    }

    #[test]
    fn test_length_counts_rows() {
        assert_eq!(Document::new("").length(), 1);
        assert_eq!(Document::new("This \n should \n take four \n rows").length(), 4);
        assert_eq!(Document::new("a\r\nb\rc\n").length(), 4);
    }

    #[test]
    fn test_line_excludes_terminator() {
        let document = Document::new("one\r\ntwo\nthree");
        assert_eq!(document.line(0), Some("one"));
        assert_eq!(document.line(1), Some("two"));
        assert_eq!(document.line(2), Some("three"));
        assert_eq!(document.line(3), None);
    }

    #[test]
    fn test_replace_across_rows() {
        let mut document = Document::new("hello\nbig\nworld");
        let end = document.replace(range(0, 2, 2, 3), "y, wo");
        assert_eq!(document.text(), "hey, wold");
        assert_eq!(end, Position::new(0, 7));
    }

    #[test]
    fn test_replace_clamps_columns() {
        let mut document = Document::new("ab\ncd");
        document.replace(range(0, 9, 0, 9), "!");
        assert_eq!(document.text(), "ab!\ncd");
    }

    #[test]
    fn test_replace_with_multibyte() {
        let mut document = Document::new("héllo");
        document.replace(range(0, 1, 0, 2), "e");
        assert_eq!(document.text(), "hello");
    }

    #[test]
    fn test_columns_count_utf16_units() {
        let mut document = Document::new("\u{1F600}ab\nc");
        assert_eq!(document.clamp(Position::new(0, 99)), Position::new(0, 4));
        let found = document.find_all(&SearchOptions::new("b")).unwrap_or_default();
        assert_eq!(found, vec![range(0, 3, 0, 4)]);

        let end = document.replace(range(0, 2, 0, 3), "\u{1F600}");
        assert_eq!(document.text(), "\u{1F600}\u{1F600}b\nc");
        assert_eq!(end, Position::new(0, 4));
        assert_eq!(document.end_position(), Position::new(1, 1));
    }

    #[test]
    fn test_find_all_case_rules() {
        let document = Document::new("Foo foo\nfoo");
        let insensitive = document.find_all(&SearchOptions::new("foo")).unwrap_or_default();
        assert_eq!(insensitive, vec![range(0, 0, 0, 3), range(0, 4, 0, 7), range(1, 0, 1, 3)]);

        let sensitive = document
            .find_all(&SearchOptions::new("Foo").case_sensitive(true))
            .unwrap_or_default();
        assert_eq!(sensitive, vec![range(0, 0, 0, 3)]);
    }

    #[test]
    fn test_find_all_whole_word_and_regex() {
        let document = Document::new("cat concat cat5 cat");
        let words = document
            .find_all(&SearchOptions::new("cat").whole_word(true))
            .unwrap_or_default();
        assert_eq!(words, vec![range(0, 0, 0, 3), range(0, 16, 0, 19)]);

        let digits = document
            .find_all(&SearchOptions::new(r"\d").reg_exp(true))
            .unwrap_or_default();
        assert_eq!(digits, vec![range(0, 14, 0, 15)]);

        assert!(matches!(document.find_all(&SearchOptions::new("(").reg_exp(true)), Err(_)));
    }

    #[test]
    fn test_find_all_literal_escapes_metacharacters() {
        let document = Document::new("a.b axb");
        let found = document.find_all(&SearchOptions::new("a.b")).unwrap_or_default();
        assert_eq!(found, vec![range(0, 0, 0, 3)]);
    }
}
