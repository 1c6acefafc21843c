//! Document-level options: mode, wrapping, tabs and line access.

use serde_json::{Map, Value};

use crate::bridge::{BridgedObject, Operation, ScriptValue};
use crate::catalog::{AceMode, NewLineMode};

/// Soft-wrap column bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct WrapLimit {
    pub min: usize,
    pub max: usize,
}

impl WrapLimit {
    /// Bounds from `min` to `max` columns.
    #[must_use]
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

/// The editor's current session.
///
/// Obtained from [`Editor::session`](crate::Editor::session) and meant to be
/// dropped right after use: the session can be swapped on the script side,
/// so a fresh one should be fetched for every access.
#[derive(Debug, Clone, Copy)]
pub struct Session<'a> {
    object: BridgedObject<'a>,
}

impl<'a> Session<'a> {
    pub(crate) const fn new(object: BridgedObject<'a>) -> Self {
        Self { object }
    }

    /// Reads the session option `name`.
    pub fn option(&self, name: &str) -> ScriptValue {
        self.object.option(name)
    }

    /// Applies every entry of `options` in one call.
    pub fn set_options(&self, options: Map<String, Value>) {
        self.object.set_options(options);
    }

    /// The syntax mode, or `None` when the session reports a mode outside
    /// the catalog.
    pub fn mode(&self) -> Option<AceMode> {
        let path = self.option("mode").to_js_string();
        let name = path.rsplit('/').next().unwrap_or(&path);
        match AceMode::from_wire_name(name) {
            Ok(mode) => Some(mode),
            Err(error) => {
                log::warn!("{error}");
                None
            }
        }
    }

    /// Sets the mode, non-inline.
    pub fn set_mode(&self, mode: AceMode) {
        self.set_mode_inline(mode, false);
    }

    /// Sets the mode; `inline` lets embedded modes such as PHP highlight
    /// without their opening tag.
    pub fn set_mode_inline(&self, mode: AceMode, inline: bool) {
        let mut payload = Map::new();
        payload.insert("path".to_string(), Value::String(mode.resource_path()));
        payload.insert("inline".to_string(), Value::Bool(inline));
        self.object.set(Operation::SetMode, payload);
    }

    /// Whether soft wrap is on.
    pub fn use_wrap_mode(&self) -> bool {
        self.object.get(Operation::GetUseWrapMode).to_bool()
    }

    /// Turns soft wrap on or off.
    pub fn set_use_wrap_mode(&self, wrap: bool) {
        self.object.set(Operation::SetUseWrapMode, wrap);
    }

    /// Soft-wrap bounds; unset bounds read as zero.
    pub fn wrap_limit_range(&self) -> WrapLimit {
        let range = self.object.get(Operation::GetWrapLimitRange).to_dictionary().unwrap_or_default();
        let bound = |key: &str| {
            range.get(key).and_then(Value::as_u64).and_then(|bound| usize::try_from(bound).ok()).unwrap_or(0)
        };
        WrapLimit::new(bound("min"), bound("max"))
    }

    /// Sets soft-wrap bounds. Soft wrap is switched on first.
    pub fn set_wrap_limit_range(&self, limit: WrapLimit) {
        self.set_use_wrap_mode(true);
        self.object.call(
            Operation::SetWrapLimitRange,
            &[ScriptValue::from(limit.min), ScriptValue::from(limit.max)],
        );
    }

    /// Number of rows in the document.
    pub fn length(&self) -> usize {
        self.object.get(Operation::GetLength).to_usize()
    }

    /// Content of `row` without its line terminator.
    pub fn line(&self, row: usize) -> String {
        self.object.call(Operation::GetLine, &[ScriptValue::from(row)]).to_js_string()
    }

    /// The line terminator mode; unknown values read as [`NewLineMode::Auto`].
    pub fn new_line_mode(&self) -> NewLineMode {
        NewLineMode::from_wire_name(&self.object.get(Operation::GetNewLineMode).to_js_string())
            .unwrap_or_default()
    }

    /// Sets the line terminator used for new lines.
    pub fn set_new_line_mode(&self, mode: NewLineMode) {
        self.object.set(Operation::SetNewLineMode, mode.wire_name());
    }

    /// Whether Tab inserts spaces.
    pub fn use_soft_tabs(&self) -> bool {
        self.object.get(Operation::GetUseSoftTabs).to_bool()
    }

    /// Makes Tab insert spaces instead of a tab character.
    pub fn set_use_soft_tabs(&self, soft_tabs: bool) {
        self.object.set(Operation::SetUseSoftTabs, soft_tabs);
    }

    /// Width of a tab stop in columns.
    pub fn tab_size(&self) -> usize {
        self.object.get(Operation::GetTabSize).to_usize()
    }

    pub fn set_tab_size(&self, size: usize) {
        self.object.set(Operation::SetTabSize, size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AceContext;
    use crate::engine::HeadlessEngine;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let context = AceContext::new(Box::new(HeadlessEngine::new()));
        let session = context.editor().session();
        assert_eq!(session.tab_size(), 4);
        assert!(session.use_soft_tabs());
        assert_eq!(session.new_line_mode(), NewLineMode::Auto);
        assert!(!session.use_wrap_mode());
        assert_eq!(session.wrap_limit_range(), WrapLimit::default());
        assert_eq!(session.mode(), Some(AceMode::Text));
    }

    #[test]
    fn test_set_mode_inline() {
        let context = AceContext::new(Box::new(HeadlessEngine::new()));
        let session = context.editor().session();

        session.set_mode_inline(AceMode::Php, true);
        assert_eq!(session.option("mode").to_js_string(), "ace/mode/php-inline");
        assert_eq!(session.mode(), Some(AceMode::Php));

        session.set_mode(AceMode::Python);
        assert_eq!(session.mode(), Some(AceMode::Python));
    }

    #[test]
    fn test_unknown_mode_reads_as_none() {
        let context = AceContext::new(Box::new(HeadlessEngine::new()));
        let session = context.editor().session();
        let mut options = Map::new();
        options.insert("mode".to_string(), Value::from("ace/mode/brainfuck"));
        session.set_options(options);
        assert_eq!(session.mode(), None);
    }

    #[test]
    fn test_wrap_limit_forces_wrap_on() {
        let context = AceContext::new(Box::new(HeadlessEngine::new()));
        let session = context.editor().session();
        assert!(!session.use_wrap_mode());

        session.set_wrap_limit_range(WrapLimit::new(20, 80));
        assert!(session.use_wrap_mode());
        assert_eq!(session.wrap_limit_range(), WrapLimit::new(20, 80));

        // Only one direction is coupled.
        session.set_use_wrap_mode(false);
        session.set_use_wrap_mode(true);
        assert_eq!(session.wrap_limit_range(), WrapLimit::new(20, 80));
    }

    #[test]
    fn test_length_and_lines() {
        let context = AceContext::new(Box::new(HeadlessEngine::new()));
        let editor = context.editor();
        assert_eq!(editor.session().length(), 1);

        editor.set_string("This \n should \n take four \n rows");
        let session = editor.session();
        assert_eq!(session.length(), 4);
        assert_eq!(session.line(2), " take four ");
        assert_eq!(session.line(9), "");
    }

    #[test]
    fn test_tabs_and_line_endings() {
        let context = AceContext::new(Box::new(HeadlessEngine::new()));
        let session = context.editor().session();
        session.set_tab_size(2);
        session.set_use_soft_tabs(false);
        session.set_new_line_mode(NewLineMode::Windows);
        assert_eq!(session.tab_size(), 2);
        assert!(!session.use_soft_tabs());
        assert_eq!(session.new_line_mode(), NewLineMode::Windows);
    }

    #[test]
    fn test_option_reads_what_setters_wrote() {
        let context = AceContext::new(Box::new(HeadlessEngine::new()));
        let session = context.editor().session();
        session.set_tab_size(8);
        assert_eq!(session.option("tabSize").to_usize(), 8);

        let mut options = Map::new();
        options.insert("tabSize".to_string(), Value::from(3));
        session.set_options(options);
        assert_eq!(session.tab_size(), 3);
    }
}
