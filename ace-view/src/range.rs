//! Translation from flat character ranges to Ace row/column ranges.
//!
//! Hosts describe selections as an offset and a length over the document
//! text, counted in `char`s. Ace addresses text by row and column, where a
//! column is a JavaScript string index and so counts UTF-16 code units.
//! Every range handed to the script side goes through [`ace_range`] first.

use std::fmt;

use thiserror::Error;

/// A flat range over a string, counted in `char`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct TextRange {
    /// Offset of the first character
    pub location: usize,
    /// Number of characters covered
    pub length: usize,
}

impl TextRange {
    #[must_use]
    pub const fn new(location: usize, length: usize) -> Self {
        Self { location, length }
    }

    /// Offset one past the last character, or `None` on overflow.
    #[must_use]
    pub const fn end(&self) -> Option<usize> {
        self.location.checked_add(self.length)
    }
}

/// A row/column position in the document (both 0-based).
///
/// Columns count UTF-16 code units: a character outside the Basic
/// Multilingual Plane takes two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    #[must_use]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// A range expressed in Ace's row/column coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct AceRange {
    pub start: Position,
    pub end: Position,
}

impl AceRange {
    /// The empty range at the document origin.
    pub const ZERO: AceRange =
        AceRange { start: Position { row: 0, column: 0 }, end: Position { row: 0, column: 0 } };

    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// Renders the argument list of a script-side `new Range(...)` call.
impl fmt::Display for AceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}",
            self.start.row, self.start.column, self.end.row, self.end.column
        )
    }
}

/// Errors raised when a flat range does not fit the text it indexes.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    #[error("range ends at character {end} but the text has only {len} characters")]
    OutOfBounds { end: usize, len: usize },
    #[error("range end overflows")]
    Overflow,
}

/// Converts a flat range over `text` into an Ace row/column range.
///
/// A line runs up to and including its terminator (`\n`, `\r` or `\r\n`),
/// matching the widget's own line splitting. Scanning stops at the line that
/// contains the end of the range. Offsets in `range` count `char`s; the
/// resulting columns count UTF-16 code units.
///
/// # Errors
///
/// Returns [`RangeError::OutOfBounds`] when the range ends past the last
/// character and [`RangeError::Overflow`] when `location + length`
/// overflows.
///
/// # Examples
///
/// ```
/// use ace_view::{ace_range, Position, TextRange};
///
/// let text = "This \n should \n take four \n rows";
/// let range = ace_range(TextRange::new(0, text.chars().count()), text).unwrap();
/// assert_eq!(range.start, Position::new(0, 0));
/// assert_eq!(range.end, Position::new(3, 5));
/// ```
pub fn ace_range(range: TextRange, text: &str) -> Result<AceRange, RangeError> {
    let range_end = range.end().ok_or(RangeError::Overflow)?;

    let mut result = AceRange::ZERO;
    let mut consumed = 0;
    let mut start_found = false;

    for (row, line) in lines(text).enumerate() {
        let line_start = consumed;
        consumed += line.chars().count();

        if !start_found && consumed >= range.location {
            result.start = Position::new(row, utf16_column(line, range.location - line_start));
            start_found = true;
        }

        if start_found && consumed >= range_end {
            result.end = Position::new(row, utf16_column(line, range_end - line_start));
            return Ok(result);
        }
    }

    // Only reachable when the text is shorter than the range, or empty.
    if range_end == 0 {
        Ok(result)
    } else {
        Err(RangeError::OutOfBounds { end: range_end, len: consumed })
    }
}

/// Converts a flat range and renders it as `new Range(...)` arguments.
///
/// # Errors
///
/// See [`ace_range`].
pub fn script_range(range: TextRange, text: &str) -> Result<String, RangeError> {
    ace_range(range, text).map(|range| range.to_string())
}

/// The lines of `text`, terminators included.
fn lines(text: &str) -> impl Iterator<Item = &str> + '_ {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let end = match rest.find(['\n', '\r']) {
            Some(index) if rest[index..].starts_with("\r\n") => index + 2,
            Some(index) => index + 1,
            None => rest.len(),
        };
        let (line, tail) = rest.split_at(end);
        rest = tail;
        Some(line)
    })
}

/// UTF-16 width of the first `chars` characters of `line`.
fn utf16_column(line: &str, chars: usize) -> usize {
    line.chars().take(chars).map(char::len_utf16).sum()
}
