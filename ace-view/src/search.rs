//! Search request payloads and decoding of search results.
//!
//! Requests are serialised to JSON and spliced into an evaluated script;
//! results come back as a JSON array of Ace ranges. Decoding never fails:
//! anything unexpected becomes an empty list or zeroed fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Options understood by Ace's `Search.set` and `Editor.replaceAll`.
///
/// Unset options are left out of the payload so Ace applies its own
/// defaults.
///
/// # Examples
///
/// ```
/// use ace_view::SearchOptions;
///
/// let options = SearchOptions::new("foo").case_sensitive(true);
/// assert_eq!(options.to_json(), r#"{"needle":"foo","caseSensitive":true}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchOptions {
    /// Text or pattern to look for
    pub needle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backwards: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_sensitive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whole_word: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reg_exp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_current: Option<bool>,
}

impl SearchOptions {
    #[must_use]
    pub fn new(needle: &str) -> Self {
        Self { needle: needle.to_string(), ..Self::default() }
    }

    #[must_use]
    pub fn backwards(mut self, backwards: bool) -> Self {
        self.backwards = Some(backwards);
        self
    }

    #[must_use]
    pub fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = Some(wrap);
        self
    }

    #[must_use]
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = Some(case_sensitive);
        self
    }

    #[must_use]
    pub fn whole_word(mut self, whole_word: bool) -> Self {
        self.whole_word = Some(whole_word);
        self
    }

    #[must_use]
    pub fn reg_exp(mut self, reg_exp: bool) -> Self {
        self.reg_exp = Some(reg_exp);
        self
    }

    #[must_use]
    pub fn skip_current(mut self, skip_current: bool) -> Self {
        self.skip_current = Some(skip_current);
        self
    }

    /// The payload as a JSON object literal.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }

    /// The payload as a dictionary, for `replaceAll`.
    #[must_use]
    pub fn to_map(&self) -> serde_json::Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        }
    }

    /// The script that returns every match as a JSON string.
    #[must_use]
    pub fn find_all_script(&self) -> String {
        format!(
            "JSON.stringify(new Search().set({}).findAll(editor.getSession()));",
            self.to_json()
        )
    }
}

/// One search hit, in row/column coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct SearchMatch {
    pub start_row: usize,
    pub start_column: usize,
    pub end_row: usize,
    pub end_column: usize,
}

impl SearchMatch {
    /// Decodes a JSON array of `{start: {row, column}, end: {row, column}}`
    /// records.
    ///
    /// Entries that are not objects are skipped; missing or non-numeric
    /// fields read as zero. Anything that is not a JSON array decodes to an
    /// empty list.
    #[must_use]
    pub fn decode_all(json: &str) -> Vec<SearchMatch> {
        match serde_json::from_str::<Value>(json) {
            Ok(Value::Array(items)) => {
                items.iter().filter_map(Value::as_object).map(Self::from_record).collect()
            }
            Ok(other) => {
                log::warn!("search results are not an array: {other}");
                Vec::new()
            }
            Err(error) => {
                log::warn!("unreadable search results: {error}");
                Vec::new()
            }
        }
    }

    fn from_record(record: &serde_json::Map<String, Value>) -> Self {
        let (start_row, start_column) = point(record.get("start"));
        let (end_row, end_column) = point(record.get("end"));
        Self { start_row, start_column, end_row, end_column }
    }
}

fn point(value: Option<&Value>) -> (usize, usize) {
    let Some(Value::Object(point)) = value else {
        return (0, 0);
    };
    (count_or_zero(point.get("row")), count_or_zero(point.get("column")))
}

fn count_or_zero(value: Option<&Value>) -> usize {
    value
        .and_then(Value::as_u64)
        .and_then(|count| usize::try_from(count).ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_options_omit_unset_fields() {
        assert_eq!(SearchOptions::new("x").to_json(), r#"{"needle":"x"}"#);

        let options = SearchOptions::new("a\"b").whole_word(true).reg_exp(false).backwards(true);
        assert_eq!(
            options.to_json(),
            r#"{"needle":"a\"b","backwards":true,"wholeWord":true,"regExp":false}"#
        );
    }

    #[test]
    fn test_find_all_script() {
        assert_eq!(
            SearchOptions::new("foo").find_all_script(),
            r#"JSON.stringify(new Search().set({"needle":"foo"}).findAll(editor.getSession()));"#
        );
    }

    #[test]
    fn test_options_read_back_from_map() {
        let options = SearchOptions::new("foo").case_sensitive(true);
        let parsed: SearchOptions =
            serde_json::from_value(Value::Object(options.to_map())).unwrap_or_default();
        assert_eq!(parsed, options);
    }

    #[test]
    fn test_decode_matches() {
        let json = r#"[
            {"start": {"row": 0, "column": 4}, "end": {"row": 0, "column": 7}},
            {"start": {"row": 2, "column": 1}, "end": {"row": 3, "column": 0}}
        ]"#;
        assert_eq!(
            SearchMatch::decode_all(json),
            vec![
                SearchMatch { start_row: 0, start_column: 4, end_row: 0, end_column: 7 },
                SearchMatch { start_row: 2, start_column: 1, end_row: 3, end_column: 0 },
            ]
        );
    }

    #[test]
    fn test_decode_defaults_missing_fields_to_zero() {
        let json = r#"[{"start": {"row": "two"}, "end": 5}, 42, {"end": {"column": 9}}]"#;
        assert_eq!(
            SearchMatch::decode_all(json),
            vec![
                SearchMatch::default(),
                SearchMatch { end_column: 9, ..SearchMatch::default() },
            ]
        );
    }

    #[test]
    fn test_decode_malformed_payload_is_empty() {
        assert!(SearchMatch::decode_all("undefined").is_empty());
        assert!(SearchMatch::decode_all("{\"start\": {}}").is_empty());
        assert!(SearchMatch::decode_all("").is_empty());
    }
}
