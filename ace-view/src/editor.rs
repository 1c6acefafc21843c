//! Editor-level options and commands.

use serde_json::{Map, Value};

use crate::bridge::{BridgedObject, HOST_GLOBAL, ObjectRef, Operation, ScriptValue};
use crate::catalog::{AceKeyboardHandler, AceTheme};
use crate::search::SearchOptions;
use crate::session::Session;

/// Font family reported when the editor uses its stylesheet default.
pub const DEFAULT_FONT_FAMILY: &str = "None";

/// The script-side `editor` object.
///
/// Borrowed from an [`AceContext`](crate::AceContext); every accessor is a
/// round-trip to the engine. Failed calls are reported to the context's
/// exception handler and read as the accessor's zero value.
#[derive(Debug, Clone, Copy)]
pub struct Editor<'a> {
    object: BridgedObject<'a>,
}

/// Boolean accessor pairs backed by `getX`/`setX` methods.
macro_rules! flag_accessors {
    ($($(#[$meta:meta])* $get:ident / $set:ident => $get_op:ident, $set_op:ident;)*) => {
        $(
            $(#[$meta])*
            pub fn $get(&self) -> bool {
                self.object.get(Operation::$get_op).to_bool()
            }

            #[doc = concat!("Sets [`", stringify!($get), "`](Self::", stringify!($get), ").")]
            pub fn $set(&self, flag: bool) {
                self.object.set(Operation::$set_op, flag);
            }
        )*
    };
}

/// Boolean accessor pairs backed by `getOption`/`setOptions`.
macro_rules! option_flags {
    ($($(#[$meta:meta])* $get:ident / $set:ident => $key:literal;)*) => {
        $(
            $(#[$meta])*
            pub fn $get(&self) -> bool {
                self.option($key).to_bool()
            }

            #[doc = concat!("Sets the `", $key, "` option.")]
            pub fn $set(&self, flag: bool) {
                self.set_option($key, flag);
            }
        )*
    };
}

impl<'a> Editor<'a> {
    pub(crate) const fn new(object: BridgedObject<'a>) -> Self {
        Self { object }
    }

    /// The document text.
    pub fn value(&self) -> String {
        self.object.get(Operation::GetValue).to_js_string()
    }

    /// Replaces the document text as an ordinary, undoable edit.
    pub fn set_value(&self, value: &str) {
        self.object.set(Operation::SetValue, value);
    }

    /// The document text; same as [`value`](Self::value).
    pub fn string(&self) -> String {
        self.value()
    }

    /// Loads `text` as fresh content.
    ///
    /// The replacement does not report a change while it runs, leaves the
    /// cursor at the origin with nothing selected, and cannot be undone.
    /// The host is then told about the change exactly once.
    pub fn set_string(&self, text: &str) {
        let bridge = self.object.bridge();
        bridge.evaluate("reportChanges = false;");
        self.set_value(text);
        self.object.call(Operation::ClearSelection, &[]);
        self.object.call(Operation::MoveCursorTo, &[ScriptValue::from(0), ScriptValue::from(0)]);
        bridge.evaluate("reportChanges = true;");
        bridge.evaluate("editor.getSession().setUndoManager(new ace.UndoManager());");
        bridge.evaluate(&format!("{HOST_GLOBAL}.aceTextDidChange();"));
    }

    /// The current session. Fetch a new one for every use.
    pub fn session(&self) -> Session<'a> {
        let handle = self
            .object
            .get(Operation::GetSession)
            .as_object()
            .map_or(ObjectRef::DANGLING, |session| session.handle);
        Session::new(BridgedObject::new(self.object.bridge(), handle))
    }

    /// The current theme; unknown names read as [`AceTheme::None`].
    pub fn theme(&self) -> AceTheme {
        let path = self.option("theme").to_js_string();
        AceTheme::from_wire_name(path.rsplit('/').next().unwrap_or(&path))
    }

    /// Applies `theme`. [`AceTheme::None`] has no stylesheet and is ignored.
    pub fn set_theme(&self, theme: AceTheme) {
        match theme.resource_path() {
            Some(path) => self.object.set(Operation::SetTheme, path),
            None => log::warn!("theme {theme} has no stylesheet; keeping the current theme"),
        }
    }

    flag_accessors! {
        /// Automatic pairing of brackets and quotes.
        wrap_behaviours_enabled / set_wrap_behaviours_enabled => GetWrapBehavioursEnabled, SetWrapBehavioursEnabled;
        /// Markers for spaces, tabs and line ends.
        show_invisibles / set_show_invisibles => GetShowInvisibles, SetShowInvisibles;
        /// Whether edits are refused.
        read_only / set_read_only => GetReadOnly, SetReadOnly;
        /// Fold arrows in the gutter.
        show_fold_widgets / set_show_fold_widgets => GetShowFoldWidgets, SetShowFoldWidgets;
        /// Fold arrows shown only on hover.
        fade_fold_widgets / set_fade_fold_widgets => GetFadeFoldWidgets, SetFadeFoldWidgets;
        highlight_active_line / set_highlight_active_line => GetHighlightActiveLine, SetHighlightActiveLine;
        highlight_gutter_line / set_highlight_gutter_line => GetHighlightGutterLine, SetHighlightGutterLine;
        highlight_selected_word / set_highlight_selected_word => GetHighlightSelectedWord, SetHighlightSelectedWord;
        display_indent_guides / set_display_indent_guides => GetDisplayIndentGuides, SetDisplayIndentGuides;
        /// Smooth scrolling.
        animated_scroll / set_animated_scroll => GetAnimatedScroll, SetAnimatedScroll;
        /// The vertical print-margin line.
        show_print_margin / set_show_print_margin => GetShowPrintMargin, SetShowPrintMargin;
    }

    option_flags! {
        /// Completion popup on Ctrl-Space.
        basic_autocompletion / set_basic_autocompletion => "enableBasicAutocompletion";
        /// Completion popup while typing.
        live_autocompletion / set_live_autocompletion => "enableLiveAutocompletion";
        /// Snippet expansion on Tab.
        snippets / set_snippets => "enableSnippets";
        emmet / set_emmet => "emmet";
        /// Line numbers in the gutter.
        show_line_numbers / set_show_line_numbers => "showLineNumbers";
        show_gutter / set_show_gutter => "showGutter";
    }

    /// Mouse wheel scroll speed.
    pub fn scroll_speed(&self) -> usize {
        self.object.get(Operation::GetScrollSpeed).to_usize()
    }

    /// Sets the mouse wheel scroll speed.
    pub fn set_scroll_speed(&self, speed: usize) {
        self.object.set(Operation::SetScrollSpeed, speed);
    }

    /// The active keyboard handler, read from the handler object's `$id`.
    pub fn keyboard_handler(&self) -> AceKeyboardHandler {
        let handler = self.object.get(Operation::GetKeyboardHandler).to_dictionary().unwrap_or_default();
        AceKeyboardHandler::from_module_id(handler.get("$id").and_then(Value::as_str))
    }

    /// Switches key bindings to `handler`.
    pub fn set_keyboard_handler(&self, handler: AceKeyboardHandler) {
        self.object.bridge().evaluate(&format!("editor.setKeyboardHandler({});", handler.command()));
    }

    /// Reads the editor option `name`.
    pub fn option(&self, name: &str) -> ScriptValue {
        self.object.option(name)
    }

    /// Applies every entry of `options` in one call.
    pub fn set_options(&self, options: Map<String, Value>) {
        self.object.set_options(options);
    }

    /// Sets a single editor option.
    pub fn set_option(&self, name: &str, value: impl Into<Value>) {
        self.object.set_option(name, value);
    }

    /// Column of the print margin.
    pub fn print_margin_column(&self) -> usize {
        self.object.get(Operation::GetPrintMarginColumn).to_usize()
    }

    /// Moves the print margin to `column`.
    pub fn set_print_margin_column(&self, column: usize) {
        self.object.set(Operation::SetPrintMarginColumn, column);
    }

    /// Font size in pixels.
    pub fn font_size(&self) -> usize {
        self.object.get(Operation::GetFontSize).to_usize()
    }

    /// Sets the font size in pixels.
    pub fn set_font_size(&self, size: usize) {
        self.object.set(Operation::SetFontSize, size);
    }

    /// The CSS font family, or [`DEFAULT_FONT_FAMILY`] when none is set.
    pub fn font_family(&self) -> String {
        let family = self.option("fontFamily").to_js_string();
        if family == "undefined" { DEFAULT_FONT_FAMILY.to_string() } else { family }
    }

    /// Sets the CSS font family.
    pub fn set_font_family(&self, family: &str) {
        self.set_option("fontFamily", family);
    }

    /// Moves the cursor to `column` on the 1-based `line`.
    pub fn go_to_line(&self, line: usize, column: usize, animated: bool) {
        self.object.call(
            Operation::GoToLine,
            &[ScriptValue::from(line), ScriptValue::from(column), ScriptValue::from(animated)],
        );
    }

    /// Gives the editor keyboard focus.
    pub fn focus(&self) {
        self.object.call(Operation::Focus, &[]);
    }

    /// Scrolls so the selection sits in the middle of the viewport.
    pub fn center_selection(&self) {
        self.object.call(Operation::CenterSelection, &[]);
    }

    /// Replaces every match of `options.needle` and returns how many were
    /// replaced.
    pub fn replace_all(&self, replacement: &str, options: &SearchOptions) -> usize {
        self.object
            .call(Operation::ReplaceAll, &[ScriptValue::from(replacement), ScriptValue::from(options.to_map())])
            .to_usize()
    }
}
