//! Parser for the fixed set of statements the bridge evaluates.
//!
//! The headless engine is not a script interpreter. It recognises exactly
//! the statements the facades and the view emit, and rejects anything else
//! with a `SyntaxError` like a real engine would for unknown input.

use serde_json::{Map, Value};

use crate::bridge::ScriptException;
use crate::catalog::AceKeyboardHandler;
use crate::range::{AceRange, Position};
use crate::search::SearchOptions;

/// One recognised statement.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Statement {
    /// `reportChanges = <bool>`
    SetReportChanges(bool),
    /// `editor.getSession().setUndoManager(new ace.UndoManager())`
    ResetUndoManager,
    /// `<host>.aceTextDidChange()`
    NotifyHost(String),
    /// `editor.setKeyboardHandler(<command>)`
    SetKeyboardHandler(AceKeyboardHandler),
    /// `editor.setOptions(<object literal>)`
    SetOptions(Map<String, Value>),
    /// `focusEditor()`
    FocusEditor,
    /// `editor.session.selection.clearSelection()`
    ClearSelection,
    /// `editor.session.selection.setRange(new Range(..))`
    SelectRange(AceRange),
    /// `editor.centerSelection()`
    CenterSelection,
    /// `editor.session.replace(new Range(..), "<text>")`
    Replace(AceRange, String),
    /// `JSON.stringify(new Search().set(<options>).findAll(editor.getSession()))`
    FindAll(SearchOptions),
}

/// Parses every statement of `script` before any of them runs.
///
/// # Errors
///
/// Returns a `SyntaxError` naming the first statement that is not
/// recognised.
pub(crate) fn parse(script: &str) -> Result<Vec<Statement>, ScriptException> {
    split_statements(script).into_iter().map(parse_statement).collect()
}

fn parse_statement(statement: &str) -> Result<Statement, ScriptException> {
    let unexpected = || ScriptException::new("SyntaxError", format!("Unexpected statement: {statement}"));

    match statement {
        "editor.getSession().setUndoManager(new ace.UndoManager())" => {
            return Ok(Statement::ResetUndoManager);
        }
        "focusEditor()" => return Ok(Statement::FocusEditor),
        "editor.session.selection.clearSelection()" => return Ok(Statement::ClearSelection),
        "editor.centerSelection()" => return Ok(Statement::CenterSelection),
        _ => {}
    }

    if let Some((name, value)) = statement.split_once('=') {
        if name.trim() == "reportChanges" {
            return match value.trim() {
                "true" => Ok(Statement::SetReportChanges(true)),
                "false" => Ok(Statement::SetReportChanges(false)),
                _ => Err(unexpected()),
            };
        }
    }

    if let Some(host) = statement.strip_suffix(".aceTextDidChange()") {
        return Ok(Statement::NotifyHost(host.to_string()));
    }

    if let Some(command) = call_argument(statement, "editor.setKeyboardHandler(", ")") {
        return AceKeyboardHandler::from_command(command.trim())
            .map(Statement::SetKeyboardHandler)
            .map_err(|error| ScriptException::new("TypeError", error.to_string()));
    }

    if let Some(options) = call_argument(statement, "editor.setOptions(", ")") {
        return match serde_json::from_str(options) {
            Ok(Value::Object(map)) => Ok(Statement::SetOptions(map)),
            _ => Err(unexpected()),
        };
    }

    if let Some(arguments) =
        call_argument(statement, "editor.session.selection.setRange(new Range(", "))")
    {
        return parse_range(arguments).map(Statement::SelectRange).ok_or_else(unexpected);
    }

    if let Some(arguments) = call_argument(statement, "editor.session.replace(new Range(", ")") {
        let (range, text) = arguments.split_once("),").ok_or_else(unexpected)?;
        let range = parse_range(range).ok_or_else(unexpected)?;
        let text: String = serde_json::from_str(text.trim()).map_err(|_| unexpected())?;
        return Ok(Statement::Replace(range, text));
    }

    if let Some(options) = call_argument(
        statement,
        "JSON.stringify(new Search().set(",
        ").findAll(editor.getSession()))",
    ) {
        return serde_json::from_str(options).map(Statement::FindAll).map_err(|_| unexpected());
    }

    Err(unexpected())
}

fn call_argument<'a>(statement: &'a str, prefix: &str, suffix: &str) -> Option<&'a str> {
    statement.strip_prefix(prefix)?.strip_suffix(suffix)
}

/// Reads `r0, c0, r1, c1`.
fn parse_range(arguments: &str) -> Option<AceRange> {
    let numbers = arguments
        .split(',')
        .map(|part| part.trim().parse::<usize>().ok())
        .collect::<Option<Vec<_>>>()?;
    match numbers.as_slice() {
        &[start_row, start_column, end_row, end_column] => Some(AceRange::new(
            Position::new(start_row, start_column),
            Position::new(end_row, end_column),
        )),
        _ => None,
    }
}

/// Splits on top-level `;`, leaving string literals and bracketed
/// arguments intact. Empty statements are dropped.
fn split_statements(script: &str) -> Vec<&str> {
    let mut statements = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (index, ch) in script.char_indices() {
        if let Some(open) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == open {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' => quote = Some(ch),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ';' if depth == 0 => {
                statements.push(&script[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    statements.push(&script[start..]);

    statements.into_iter().map(str::trim).filter(|statement| !statement.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn range(start_row: usize, start_column: usize, end_row: usize, end_column: usize) -> AceRange {
        AceRange::new(Position::new(start_row, start_column), Position::new(end_row, end_column))
    }

    #[test]
    fn test_split_respects_strings_and_brackets() {
        let script = r#"a("x;y"); b({"k": ";"});  ;c('it\'s;')"#;
        assert_eq!(split_statements(script), vec![r#"a("x;y")"#, r#"b({"k": ";"})"#, r"c('it\'s;')"]);
    }

    #[test]
    fn test_parse_content_protocol() {
        let script = "reportChanges = false;\
                      editor.getSession().setUndoManager(new ace.UndoManager());\
                      ACEView.aceTextDidChange();";
        assert_eq!(
            parse(script),
            Ok(vec![
                Statement::SetReportChanges(false),
                Statement::ResetUndoManager,
                Statement::NotifyHost("ACEView".to_string()),
            ])
        );
    }

    #[test]
    fn test_parse_selection_statements() {
        let script = "editor.session.selection.clearSelection();\
                      editor.session.selection.setRange(new Range(1, 2, 3, 4));\
                      editor.centerSelection();";
        assert_eq!(
            parse(script),
            Ok(vec![
                Statement::ClearSelection,
                Statement::SelectRange(range(1, 2, 3, 4)),
                Statement::CenterSelection,
            ])
        );
    }

    #[test]
    fn test_parse_replace_unescapes_text() {
        let script = r#"editor.session.replace(new Range(0, 1, 0, 2), "a \"quoted\"; line\n");"#;
        assert_eq!(
            parse(script),
            Ok(vec![Statement::Replace(range(0, 1, 0, 2), "a \"quoted\"; line\n".to_string())])
        );
    }

    #[test]
    fn test_parse_find_all() {
        let script = SearchOptions::new("needle").whole_word(true).find_all_script();
        assert_eq!(
            parse(&script),
            Ok(vec![Statement::FindAll(SearchOptions::new("needle").whole_word(true))])
        );
    }

    #[test]
    fn test_parse_keyboard_handler() {
        let script = "editor.setKeyboardHandler(require(\"ace/keyboard/vim\").handler)";
        assert_eq!(parse(script), Ok(vec![Statement::SetKeyboardHandler(AceKeyboardHandler::Vim)]));

        let error = parse("editor.setKeyboardHandler(sublime)").err().unwrap_or_else(|| ScriptException::new("", ""));
        assert_eq!(error.name, "TypeError");
    }

    #[test]
    fn test_unknown_statement_is_a_syntax_error() {
        let error = parse("focusEditor(); window.close()").err().unwrap_or_else(|| ScriptException::new("", ""));
        assert_eq!(error.name, "SyntaxError");
        assert!(error.message.contains("window.close()"));
    }
}
