//! An in-process model of the script side of the editor page.
//!
//! [`HeadlessEngine`] answers the same calls a browser running Ace would:
//! the editor and session methods behind [`Operation`](crate::Operation),
//! the option dictionary, and the handful of statements the view evaluates.
//! It keeps the document, selection, undo depth and change-reporting flag
//! that those calls observe, and calls the bound host back when the
//! document changes while change reporting is on.

mod document;
mod script;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use serde_json::{Map, Value};

use self::document::Document;
use self::script::Statement;
use crate::bridge::{
    HOST_GLOBAL, HostExports, ObjectRef, RemoteObject, ScriptEngine, ScriptException, ScriptResult,
    ScriptValue,
};
use crate::catalog::AceKeyboardHandler;
use crate::config::EditorConfig;
use crate::range::{AceRange, Position};
use crate::search::SearchOptions;

/// Handle of the global `editor` object.
pub const EDITOR: ObjectRef = ObjectRef::new(1);
/// Handle of the editor's session.
pub const SESSION: ObjectRef = ObjectRef::new(2);
const KEYBOARD_HANDLER: ObjectRef = ObjectRef::new(3);
const WRAP_LIMIT: ObjectRef = ObjectRef::new(4);
const HOST: ObjectRef = ObjectRef::new(5);

/// Accessor names whose option key is not the accessor name itself.
const OPTION_ALIASES: &[(&str, &str)] = &[("useWrapMode", "wrap")];

#[derive(Default)]
struct State {
    document: Document,
    options: Map<String, Value>,
    report_changes: bool,
    undo_depth: usize,
    selection: AceRange,
    focused: bool,
    centered: Option<AceRange>,
    keyboard_handler: AceKeyboardHandler,
    wrap_limit: Option<(usize, usize)>,
    hosts: HashMap<String, Weak<dyn HostExports>>,
}

/// What a call asks of the host once the state borrow is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Followup {
    None,
    /// The document changed; notify if change reporting is on.
    DocumentChanged(usize),
}

/// The script side of the editor page, simulated in process.
///
/// Clones share state, so a test can keep one clone for inspection while
/// the view owns another.
///
/// # Examples
///
/// ```
/// use ace_view::{AceContext, HeadlessEngine};
///
/// let engine = HeadlessEngine::new();
/// let context = AceContext::new(Box::new(engine.clone()));
/// context.editor().set_string("hello");
/// assert_eq!(engine.text(), "hello");
/// ```
#[derive(Clone)]
pub struct HeadlessEngine {
    state: Rc<RefCell<State>>,
}

impl Default for HeadlessEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessEngine {
    /// An editor page loaded with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&EditorConfig::default())
    }

    /// An editor page loaded with `config`.
    #[must_use]
    pub fn with_config(config: &EditorConfig) -> Self {
        let state = State {
            options: config.to_options(),
            report_changes: true,
            keyboard_handler: config.keyboard_handler,
            ..State::default()
        };
        Self { state: Rc::new(RefCell::new(state)) }
    }

    /// Current document text.
    #[must_use]
    pub fn text(&self) -> String {
        self.state.borrow().document.text().to_string()
    }

    /// The selected range; empty when nothing is selected.
    #[must_use]
    pub fn selection(&self) -> AceRange {
        self.state.borrow().selection
    }

    /// The cursor, which sits at the end of the selection.
    #[must_use]
    pub fn cursor(&self) -> Position {
        self.state.borrow().selection.end
    }

    /// Number of undoable edits since the undo manager was last reset.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.state.borrow().undo_depth
    }

    #[must_use]
    pub fn reports_changes(&self) -> bool {
        self.state.borrow().report_changes
    }

    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.state.borrow().focused
    }

    /// The selection the viewport was last centred on.
    #[must_use]
    pub fn centered_selection(&self) -> Option<AceRange> {
        self.state.borrow().centered
    }

    #[must_use]
    pub fn keyboard_handler(&self) -> AceKeyboardHandler {
        self.state.borrow().keyboard_handler
    }

    fn host(&self, name: &str) -> Option<Rc<dyn HostExports>> {
        self.state.borrow().hosts.get(name).and_then(Weak::upgrade)
    }

    /// Runs the page's change listener after `count` document edits.
    fn settle(&self, followup: Followup) {
        let Followup::DocumentChanged(count) = followup else {
            return;
        };
        if count == 0 || !self.reports_changes() {
            return;
        }
        match self.host(HOST_GLOBAL) {
            Some(host) => (0..count).for_each(|_| host.ace_text_did_change()),
            None => log::debug!("document changed with no host bound"),
        }
    }

    fn execute(&self, statement: Statement) -> ScriptResult {
        match statement {
            Statement::NotifyHost(name) => {
                let host = self.host(&name).ok_or_else(|| ScriptException::reference(&name))?;
                host.ace_text_did_change();
                Ok(ScriptValue::Undefined)
            }
            statement => {
                let (value, followup) = self.state.borrow_mut().execute(statement)?;
                self.settle(followup);
                Ok(value)
            }
        }
    }
}

impl std::fmt::Debug for HeadlessEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("HeadlessEngine")
            .field("text", &state.document.text())
            .field("selection", &state.selection)
            .field("undo_depth", &state.undo_depth)
            .finish_non_exhaustive()
    }
}

impl ScriptEngine for HeadlessEngine {
    fn global(&self, name: &str) -> ScriptResult {
        match name {
            "editor" => Ok(ScriptValue::Object(RemoteObject::new(EDITOR))),
            "reportChanges" => Ok(ScriptValue::Bool(self.reports_changes())),
            _ if self.host(name).is_some() => Ok(ScriptValue::Object(RemoteObject::new(HOST))),
            _ => Err(ScriptException::reference(name)),
        }
    }

    fn invoke(&self, target: ObjectRef, method: &str, args: &[ScriptValue]) -> ScriptResult {
        let (value, followup) = {
            let mut state = self.state.borrow_mut();
            match target {
                EDITOR => state.invoke_editor(method, args)?,
                SESSION => state.invoke_session(method, args)?,
                _ => return Err(ScriptException::not_a_function(&target.to_string(), method)),
            }
        };
        self.settle(followup);
        Ok(value)
    }

    fn evaluate(&self, script: &str) -> ScriptResult {
        let mut last = ScriptValue::Undefined;
        for statement in script::parse(script)? {
            last = self.execute(statement)?;
        }
        Ok(last)
    }

    fn bind_host(&self, name: &str, host: Weak<dyn HostExports>) {
        self.state.borrow_mut().hosts.insert(name.to_string(), host);
    }
}

impl State {
    fn invoke_editor(&mut self, method: &str, args: &[ScriptValue]) -> Result<(ScriptValue, Followup), ScriptException> {
        let value = match method {
            "getValue" => ScriptValue::from(self.document.text()),
            "setValue" => {
                let text = argument(args, 0).to_js_string();
                self.document.set_text(&text);
                self.undo_depth += 1;
                // Ace selects the new content unless told otherwise.
                self.selection = AceRange::new(Position::default(), self.document.end_position());
                return Ok((ScriptValue::from(text), Followup::DocumentChanged(1)));
            }
            "clearSelection" => {
                self.clear_selection();
                ScriptValue::Undefined
            }
            "moveCursorTo" => {
                let cursor = self.document.clamp(Position::new(
                    argument(args, 0).to_usize(),
                    argument(args, 1).to_usize(),
                ));
                self.selection = AceRange::new(cursor, cursor);
                ScriptValue::Undefined
            }
            "gotoLine" => {
                let row = argument(args, 0).to_usize().saturating_sub(1);
                let cursor = self.document.clamp(Position::new(row, argument(args, 1).to_usize()));
                self.selection = AceRange::new(cursor, cursor);
                ScriptValue::Undefined
            }
            "getSession" => ScriptValue::Object(RemoteObject::new(SESSION)),
            "setTheme" => {
                self.options.insert("theme".to_string(), argument(args, 0).to_json());
                ScriptValue::Undefined
            }
            "getKeyboardHandler" => {
                let handler = RemoteObject::new(KEYBOARD_HANDLER);
                let handler = match self.keyboard_handler.module_id() {
                    Some(id) => handler.with_field("$id", id),
                    None => handler,
                };
                ScriptValue::Object(handler)
            }
            "focus" => {
                self.focused = true;
                ScriptValue::Undefined
            }
            "centerSelection" => {
                self.centered = Some(self.selection);
                ScriptValue::Undefined
            }
            "replaceAll" => return self.replace_all(args),
            _ => return self.invoke_shared("editor", method, args),
        };
        Ok((value, Followup::None))
    }

    fn invoke_session(&mut self, method: &str, args: &[ScriptValue]) -> Result<(ScriptValue, Followup), ScriptException> {
        let value = match method {
            "setMode" => {
                let path = match argument(args, 0) {
                    ScriptValue::Dictionary(mode) => {
                        let path = mode.get("path").and_then(Value::as_str).unwrap_or_default();
                        if mode.get("inline").and_then(Value::as_bool).unwrap_or(false) {
                            format!("{path}-inline")
                        } else {
                            path.to_string()
                        }
                    }
                    other => other.to_js_string(),
                };
                self.options.insert("mode".to_string(), Value::String(path));
                ScriptValue::Undefined
            }
            "getWrapLimitRange" => {
                let (min, max) = match self.wrap_limit {
                    Some((min, max)) => (Value::from(min), Value::from(max)),
                    None => (Value::Null, Value::Null),
                };
                ScriptValue::Object(
                    RemoteObject::new(WRAP_LIMIT).with_field("min", min).with_field("max", max),
                )
            }
            "setWrapLimitRange" => {
                self.wrap_limit = Some((argument(args, 0).to_usize(), argument(args, 1).to_usize()));
                ScriptValue::Undefined
            }
            "getLength" => ScriptValue::from(self.document.length()),
            "getLine" => {
                let row = argument(args, 0).to_usize();
                ScriptValue::from(self.document.line(row).unwrap_or_default())
            }
            _ => return self.invoke_shared("session", method, args),
        };
        Ok((value, Followup::None))
    }

    /// Option access shared by editor and session, plus the generic
    /// `getX`/`setX` accessors over existing options.
    fn invoke_shared(&mut self, target: &str, method: &str, args: &[ScriptValue]) -> Result<(ScriptValue, Followup), ScriptException> {
        let value = match method {
            "getOption" => self.option(&argument(args, 0).to_js_string()),
            "setOptions" => {
                if let Some(options) = argument(args, 0).to_dictionary() {
                    self.options.extend(options);
                }
                ScriptValue::Undefined
            }
            _ => {
                let key = accessor_key(method)
                    .filter(|(_, key)| self.options.contains_key(key))
                    .ok_or_else(|| ScriptException::not_a_function(target, method))?;
                match key {
                    (Accessor::Get, key) => self.option(&key),
                    (Accessor::Set, key) => {
                        self.options.insert(key, argument(args, 0).to_json());
                        ScriptValue::Undefined
                    }
                }
            }
        };
        Ok((value, Followup::None))
    }

    fn execute(&mut self, statement: Statement) -> Result<(ScriptValue, Followup), ScriptException> {
        let value = match statement {
            Statement::SetReportChanges(report) => {
                self.report_changes = report;
                ScriptValue::Bool(report)
            }
            Statement::ResetUndoManager => {
                self.undo_depth = 0;
                ScriptValue::Undefined
            }
            Statement::SetKeyboardHandler(handler) => {
                self.keyboard_handler = handler;
                ScriptValue::Undefined
            }
            Statement::SetOptions(options) => {
                self.options.extend(options);
                ScriptValue::Undefined
            }
            Statement::FocusEditor => {
                self.focused = true;
                ScriptValue::Undefined
            }
            Statement::ClearSelection => {
                self.clear_selection();
                ScriptValue::Undefined
            }
            Statement::SelectRange(range) => {
                self.selection = AceRange::new(self.document.clamp(range.start), self.document.clamp(range.end));
                ScriptValue::Undefined
            }
            Statement::CenterSelection => {
                self.centered = Some(self.selection);
                ScriptValue::Undefined
            }
            Statement::Replace(range, text) => {
                let end = self.document.replace(range, &text);
                self.undo_depth += 1;
                self.selection = AceRange::new(end, end);
                return Ok((ScriptValue::Undefined, Followup::DocumentChanged(1)));
            }
            Statement::FindAll(options) => {
                let matches = self.find_all(&options)?;
                ScriptValue::String(Value::Array(matches.iter().map(range_json).collect()).to_string())
            }
            // Host calls never borrow the state.
            Statement::NotifyHost(name) => return Err(ScriptException::reference(&name)),
        };
        Ok((value, Followup::None))
    }

    fn replace_all(&mut self, args: &[ScriptValue]) -> Result<(ScriptValue, Followup), ScriptException> {
        let replacement = argument(args, 0).to_js_string();
        let options = argument(args, 1)
            .to_dictionary()
            .and_then(|options| serde_json::from_value::<SearchOptions>(Value::Object(options)).ok())
            .unwrap_or_default();
        let mut matches = self.find_all(&options)?;
        let count = matches.len();
        // Back to front, so earlier ranges stay valid.
        matches.sort_by_key(|range| std::cmp::Reverse(range.start));
        for range in &matches {
            self.document.replace(*range, &replacement);
        }
        self.undo_depth += usize::from(count > 0);
        Ok((ScriptValue::from(count), Followup::DocumentChanged(count)))
    }

    fn find_all(&self, options: &SearchOptions) -> Result<Vec<AceRange>, ScriptException> {
        self.document
            .find_all(options)
            .map_err(|error| ScriptException::new("SyntaxError", format!("Invalid regular expression: {error}")))
    }

    fn clear_selection(&mut self) {
        let cursor = self.selection.end;
        self.selection = AceRange::new(cursor, cursor);
    }

    fn option(&self, name: &str) -> ScriptValue {
        self.options.get(name).map_or(ScriptValue::Undefined, ScriptValue::from)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Accessor {
    Get,
    Set,
}

/// Maps `getTabSize` to `(Get, "tabSize")`.
fn accessor_key(method: &str) -> Option<(Accessor, String)> {
    let (accessor, name) = if let Some(name) = method.strip_prefix("get") {
        (Accessor::Get, name)
    } else {
        (Accessor::Set, method.strip_prefix("set")?)
    };
    let mut chars = name.chars();
    let first = chars.next()?;
    let key = format!("{}{}", first.to_ascii_lowercase(), chars.as_str());
    let key = OPTION_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map_or(key, |(_, option)| (*option).to_string());
    Some((accessor, key))
}

fn argument(args: &[ScriptValue], index: usize) -> ScriptValue {
    args.get(index).cloned().unwrap_or_default()
}

fn range_json(range: &AceRange) -> Value {
    serde_json::json!({
        "start": { "row": range.start.row, "column": range.start.column },
        "end": { "row": range.end.row, "column": range.end.column },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchMatch;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    #[derive(Default)]
    struct CountingHost {
        changes: Cell<usize>,
    }

    impl HostExports for CountingHost {
        fn ace_text_did_change(&self) {
            self.changes.set(self.changes.get() + 1);
        }
    }

    fn bound_engine() -> (HeadlessEngine, Rc<CountingHost>) {
        let engine = HeadlessEngine::new();
        let host = Rc::new(CountingHost::default());
        let weak: Weak<CountingHost> = Rc::downgrade(&host);
        engine.bind_host(HOST_GLOBAL, weak);
        (engine, host)
    }

    fn set_value(engine: &HeadlessEngine, text: &str) {
        let result = engine.invoke(EDITOR, "setValue", &[ScriptValue::from(text)]);
        assert_eq!(result, Ok(ScriptValue::from(text)));
    }

    fn run(engine: &HeadlessEngine, script: &str) -> ScriptValue {
        let result = engine.evaluate(script);
        assert_eq!(result.as_ref().err(), None);
        result.unwrap_or_default()
    }

    #[test]
    fn test_accessor_key() {
        assert_eq!(accessor_key("getTabSize"), Some((Accessor::Get, "tabSize".to_string())));
        assert_eq!(accessor_key("setUseWrapMode"), Some((Accessor::Set, "wrap".to_string())));
        assert_eq!(accessor_key("get"), None);
        assert_eq!(accessor_key("focus"), None);
    }

    #[test]
    fn test_options_seeded_from_config() {
        let engine = HeadlessEngine::new();
        assert_eq!(engine.invoke(SESSION, "getTabSize", &[]), Ok(ScriptValue::from(4)));
        assert_eq!(
            engine.invoke(EDITOR, "getOption", &[ScriptValue::from("mode")]),
            Ok(ScriptValue::from("ace/mode/text"))
        );
        assert_eq!(
            engine.invoke(EDITOR, "getOption", &[ScriptValue::from("fontFamily")]),
            Ok(ScriptValue::Undefined)
        );
    }

    #[test]
    fn test_unknown_method_is_a_type_error() {
        let engine = HeadlessEngine::new();
        let error = engine.invoke(EDITOR, "goToLine", &[]).err();
        assert_eq!(error, Some(ScriptException::not_a_function("editor", "goToLine")));
    }

    #[test]
    fn test_bootstrap_script_matches_seeded_options() {
        let config = EditorConfig { tab_size: 2, ..EditorConfig::default() };
        let engine = HeadlessEngine::with_config(&EditorConfig::default());
        run(&engine, &config.bootstrap_script());
        assert_eq!(engine.invoke(SESSION, "getTabSize", &[]), Ok(ScriptValue::from(2)));
        assert_eq!(engine.keyboard_handler(), AceKeyboardHandler::Ace);
    }

    #[test]
    fn test_edits_notify_only_while_reporting() {
        let (engine, host) = bound_engine();
        set_value(&engine, "one");
        assert_eq!(host.changes.get(), 1);

        assert_eq!(run(&engine, "reportChanges = false"), ScriptValue::Bool(false));
        set_value(&engine, "two");
        assert_eq!(host.changes.get(), 1);

        run(&engine, "ACEView.aceTextDidChange();");
        assert_eq!(host.changes.get(), 2);
    }

    #[test]
    fn test_notify_without_host_is_a_reference_error() {
        let engine = HeadlessEngine::new();
        let error = engine.evaluate("ACEView.aceTextDidChange();").err();
        assert_eq!(error, Some(ScriptException::reference("ACEView")));
    }

    #[test]
    fn test_dropped_host_is_not_kept_alive() {
        let (engine, host) = bound_engine();
        drop(host);
        assert_eq!(engine.global(HOST_GLOBAL), Err(ScriptException::reference(HOST_GLOBAL)));
    }

    #[test]
    fn test_replace_and_find() {
        let engine = HeadlessEngine::new();
        set_value(&engine, "foo bar\nfoo");
        run(&engine, r#"editor.session.replace(new Range(0, 4, 0, 7), "baz");"#);
        assert_eq!(engine.text(), "foo baz\nfoo");
        assert_eq!(engine.undo_depth(), 2);

        let found = run(&engine, &SearchOptions::new("foo").find_all_script());
        let found = SearchMatch::decode_all(&found.to_js_string());
        assert_eq!(found.len(), 2);
        assert_eq!(found[1], SearchMatch { start_row: 1, start_column: 0, end_row: 1, end_column: 3 });
    }

    #[test]
    fn test_replace_all_counts_and_rewrites() {
        let (engine, host) = bound_engine();
        set_value(&engine, "a-a-a");
        let options = SearchOptions::new("a").to_map();
        let count = engine.invoke(EDITOR, "replaceAll", &[ScriptValue::from("bb"), ScriptValue::from(options)]);
        assert_eq!(count, Ok(ScriptValue::from(3)));
        assert_eq!(engine.text(), "bb-bb-bb");
        assert_eq!(host.changes.get(), 4);
    }

    #[test]
    fn test_invalid_pattern_throws() {
        let engine = HeadlessEngine::new();
        let script = SearchOptions::new("(").reg_exp(true).find_all_script();
        let error = engine.evaluate(&script).err().map(|error| error.name);
        assert_eq!(error.as_deref(), Some("SyntaxError"));
    }

    #[test]
    fn test_wrap_limit_range_defaults_to_null() {
        let engine = HeadlessEngine::new();
        let range = engine.invoke(SESSION, "getWrapLimitRange", &[]).map(|value| value.to_dictionary());
        let range = range.ok().flatten().unwrap_or_default();
        assert_eq!(range.get("min"), Some(&Value::Null));
    }

    #[test]
    fn test_goto_line_is_one_based() {
        let engine = HeadlessEngine::new();
        set_value(&engine, "a\nbcd\ne");
        let args = [ScriptValue::from(2), ScriptValue::from(1), ScriptValue::from(false)];
        assert_eq!(engine.invoke(EDITOR, "gotoLine", &args), Ok(ScriptValue::Undefined));
        assert_eq!(engine.cursor(), Position::new(1, 1));
    }
}
