//! The host view around an editor page.
//!
//! An [`AceView`] is created before its page has loaded. The host calls
//! [`AceView::did_finish_load`] with the page's script engine once the
//! page is ready; until then every accessor fails with
//! [`ViewError::NotReady`]. After loading, the view forwards its accessors
//! to the [`Editor`] and [`Session`] facades and turns the page's change
//! reports into [`TEXT_DID_END_EDITING`] notifications.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use thiserror::Error;

use crate::bridge::{ExceptionHandler, HostExports, ScriptEngine, ScriptValue};
use crate::catalog::{AceKeyboardHandler, AceMode, AceTheme, NewLineMode};
use crate::context::AceContext;
use crate::editor::Editor;
use crate::notification::{
    Notification, NotificationCenter, ObserverToken, TEXT_DID_END_EDITING, ViewId,
};
use crate::range::{RangeError, TextRange, script_range};
use crate::search::{SearchMatch, SearchOptions};
use crate::session::{Session, WrapLimit};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ViewError {
    #[error("the editor page has not finished loading")]
    NotReady,
    #[error(transparent)]
    Range(#[from] RangeError),
}

/// Receives view lifecycle and change events.
pub trait AceViewDelegate {
    /// The page finished loading and the view's accessors are usable.
    fn ace_view_did_load(&self, _view: &AceView) {}

    /// The editor's text changed.
    fn text_did_change(&self, _notification: &Notification) {}
}

type ReadyCallback = Box<dyn FnOnce(&AceView)>;

struct ViewInner {
    id: ViewId,
    center: NotificationCenter,
    context: RefCell<Option<AceContext>>,
    delegate: RefCell<Option<Weak<dyn AceViewDelegate>>>,
    on_ready: RefCell<Option<ReadyCallback>>,
    first_selected_range: Cell<TextRange>,
}

impl ViewInner {
    fn delegate(&self) -> Option<Rc<dyn AceViewDelegate>> {
        self.delegate.borrow().as_ref().and_then(Weak::upgrade)
    }
}

impl HostExports for ViewInner {
    fn ace_text_did_change(&self) {
        let notification = Notification::new(TEXT_DID_END_EDITING, self.id);
        self.center.post(&notification);
        if let Some(delegate) = self.delegate() {
            delegate.text_did_change(&notification);
        }
    }
}

/// A native view hosting the editor page.
///
/// Clones refer to the same view.
///
/// # Examples
///
/// ```
/// use ace_view::{AceView, HeadlessEngine, ViewError};
///
/// let view = AceView::new();
/// assert_eq!(view.string(), Err(ViewError::NotReady));
///
/// view.did_finish_load(Box::new(HeadlessEngine::new()));
/// view.set_string("fn main() {}").unwrap();
/// assert_eq!(view.string().unwrap(), "fn main() {}");
/// ```
#[derive(Clone)]
pub struct AceView {
    inner: Rc<ViewInner>,
}

impl Default for AceView {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! editor_accessors {
    ($($(#[$meta:meta])* $get:ident / $set:ident : $ty:ty;)*) => {
        $(
            $(#[$meta])*
            ///
            /// # Errors
            ///
            /// Returns [`ViewError::NotReady`] before the page has loaded.
            pub fn $get(&self) -> Result<$ty, ViewError> {
                self.with_editor(|editor| editor.$get())
            }

            /// # Errors
            ///
            /// Returns [`ViewError::NotReady`] before the page has loaded.
            pub fn $set(&self, value: $ty) -> Result<(), ViewError> {
                self.with_editor(|editor| editor.$set(value))
            }
        )*
    };
}

macro_rules! session_accessors {
    ($($(#[$meta:meta])* $get:ident / $set:ident : $ty:ty;)*) => {
        $(
            $(#[$meta])*
            ///
            /// # Errors
            ///
            /// Returns [`ViewError::NotReady`] before the page has loaded.
            pub fn $get(&self) -> Result<$ty, ViewError> {
                self.with_session(|session| session.$get())
            }

            /// # Errors
            ///
            /// Returns [`ViewError::NotReady`] before the page has loaded.
            pub fn $set(&self, value: $ty) -> Result<(), ViewError> {
                self.with_session(|session| session.$set(value))
            }
        )*
    };
}

impl AceView {
    /// A view posting to the thread's shared notification center.
    #[must_use]
    pub fn new() -> Self {
        Self::with_notification_center(NotificationCenter::shared())
    }

    #[must_use]
    pub fn with_notification_center(center: NotificationCenter) -> Self {
        Self {
            inner: Rc::new(ViewInner {
                id: ViewId::next(),
                center,
                context: RefCell::new(None),
                delegate: RefCell::new(None),
                on_ready: RefCell::new(None),
                first_selected_range: Cell::new(TextRange::default()),
            }),
        }
    }

    #[must_use]
    pub fn id(&self) -> ViewId {
        self.inner.id
    }

    #[must_use]
    pub fn notification_center(&self) -> NotificationCenter {
        self.inner.center.clone()
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.inner.context.try_borrow().is_ok_and(|context| context.is_some())
    }

    /// Sets the delegate. The view does not keep it alive.
    pub fn set_delegate(&self, delegate: Weak<dyn AceViewDelegate>) {
        *self.inner.delegate.borrow_mut() = Some(delegate);
    }

    /// Runs `callback` once, when the page has loaded.
    pub fn on_ready(&self, callback: impl FnOnce(&AceView) + 'static) {
        *self.inner.on_ready.borrow_mut() = Some(Box::new(callback));
    }

    /// Attaches the loaded page's engine.
    ///
    /// Binds the view as the page's `ACEView` global, installs the logging
    /// exception handler, then tells the delegate and the ready callback.
    /// Loading again replaces the previous page; the ready callback only
    /// ever runs once.
    pub fn did_finish_load(&self, engine: Box<dyn ScriptEngine>) {
        let context = AceContext::new(engine);
        let host: Weak<ViewInner> = Rc::downgrade(&self.inner);
        context.set_host(host);
        let id = self.inner.id;
        context.set_exception_handler(Box::new(move |exception| {
            log::error!("Context exception in {id}: {exception}");
        }));

        match self.inner.context.try_borrow_mut() {
            Ok(mut slot) => *slot = Some(context),
            Err(_) => {
                log::error!("{id} reloaded while its editor was in use; keeping the old page");
                return;
            }
        }
        log::debug!("{id} finished loading");

        if let Some(delegate) = self.inner.delegate() {
            delegate.ace_view_did_load(self);
        }
        let on_ready = self.inner.on_ready.borrow_mut().take();
        if let Some(on_ready) = on_ready {
            on_ready(self);
        }
    }

    /// Replaces the exception handler of the loaded page.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::NotReady`] before the page has loaded.
    pub fn set_exception_handler(&self, handler: ExceptionHandler) -> Result<(), ViewError> {
        self.with_context(|context| context.set_exception_handler(handler))
    }

    /// Observes this view's text changes on its notification center.
    pub fn on_text_change(&self, observer: impl Fn(&Notification) + 'static) -> ObserverToken {
        self.inner.center.add_observer(TEXT_DID_END_EDITING, Some(self.inner.id), observer)
    }

    fn with_context<T>(&self, f: impl FnOnce(&AceContext) -> T) -> Result<T, ViewError> {
        let context = self.inner.context.try_borrow().map_err(|_| ViewError::NotReady)?;
        let context = context.as_ref().ok_or(ViewError::NotReady)?;
        Ok(f(context))
    }

    fn with_editor<T>(&self, f: impl FnOnce(Editor<'_>) -> T) -> Result<T, ViewError> {
        self.with_context(|context| f(context.editor()))
    }

    fn with_session<T>(&self, f: impl FnOnce(Session<'_>) -> T) -> Result<T, ViewError> {
        self.with_editor(|editor| f(editor.session()))
    }

    /// Evaluates raw script in the page.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::NotReady`] before the page has loaded.
    pub fn evaluate(&self, script: &str) -> Result<ScriptValue, ViewError> {
        self.with_context(|context| context.evaluate(script))
    }

    /// Gives the editor keyboard focus.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::NotReady`] before the page has loaded.
    pub fn focus(&self) -> Result<(), ViewError> {
        self.with_context(AceContext::focus_editor)
    }

    /// The document text.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::NotReady`] before the page has loaded.
    pub fn string(&self) -> Result<String, ViewError> {
        self.with_editor(|editor| editor.string())
    }

    /// Loads fresh content; see [`Editor::set_string`].
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::NotReady`] before the page has loaded.
    pub fn set_string(&self, text: &str) -> Result<(), ViewError> {
        self.with_editor(|editor| editor.set_string(text))
    }

    /// The syntax mode; `Ok(None)` for a mode outside the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::NotReady`] before the page has loaded.
    pub fn mode(&self) -> Result<Option<AceMode>, ViewError> {
        self.with_session(|session| session.mode())
    }

    /// # Errors
    ///
    /// Returns [`ViewError::NotReady`] before the page has loaded.
    pub fn set_mode(&self, mode: AceMode) -> Result<(), ViewError> {
        self.with_session(|session| session.set_mode(mode))
    }

    /// # Errors
    ///
    /// Returns [`ViewError::NotReady`] before the page has loaded.
    pub fn set_mode_inline(&self, mode: AceMode, inline: bool) -> Result<(), ViewError> {
        self.with_session(|session| session.set_mode_inline(mode, inline))
    }

    editor_accessors! {
        theme / set_theme: AceTheme;
        keyboard_handler / set_keyboard_handler: AceKeyboardHandler;
        wrap_behaviours_enabled / set_wrap_behaviours_enabled: bool;
        show_invisibles / set_show_invisibles: bool;
        read_only / set_read_only: bool;
        show_fold_widgets / set_show_fold_widgets: bool;
        fade_fold_widgets / set_fade_fold_widgets: bool;
        highlight_active_line / set_highlight_active_line: bool;
        highlight_gutter_line / set_highlight_gutter_line: bool;
        highlight_selected_word / set_highlight_selected_word: bool;
        display_indent_guides / set_display_indent_guides: bool;
        animated_scroll / set_animated_scroll: bool;
        scroll_speed / set_scroll_speed: usize;
        basic_autocompletion / set_basic_autocompletion: bool;
        live_autocompletion / set_live_autocompletion: bool;
        snippets / set_snippets: bool;
        emmet / set_emmet: bool;
        print_margin_column / set_print_margin_column: usize;
        show_print_margin / set_show_print_margin: bool;
        font_size / set_font_size: usize;
        show_line_numbers / set_show_line_numbers: bool;
        show_gutter / set_show_gutter: bool;
    }

    session_accessors! {
        /// Soft wrap.
        use_wrap_mode / set_use_wrap_mode: bool;
        /// Soft-wrap bounds. Setting them turns soft wrap on.
        wrap_limit_range / set_wrap_limit_range: WrapLimit;
        new_line_mode / set_new_line_mode: NewLineMode;
        use_soft_tabs / set_use_soft_tabs: bool;
        tab_size / set_tab_size: usize;
    }

    /// The CSS font family, `"None"` when unset.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::NotReady`] before the page has loaded.
    pub fn font_family(&self) -> Result<String, ViewError> {
        self.with_editor(|editor| editor.font_family())
    }

    /// # Errors
    ///
    /// Returns [`ViewError::NotReady`] before the page has loaded.
    pub fn set_font_family(&self, family: &str) -> Result<(), ViewError> {
        self.with_editor(|editor| editor.set_font_family(family))
    }

    /// # Errors
    ///
    /// Returns [`ViewError::NotReady`] before the page has loaded.
    pub fn go_to_line(&self, line: usize, column: usize, animated: bool) -> Result<(), ViewError> {
        self.with_editor(|editor| editor.go_to_line(line, column, animated))
    }

    /// Number of rows in the document.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::NotReady`] before the page has loaded.
    pub fn length(&self) -> Result<usize, ViewError> {
        self.with_session(|session| session.length())
    }

    /// # Errors
    ///
    /// Returns [`ViewError::NotReady`] before the page has loaded.
    pub fn line(&self, row: usize) -> Result<String, ViewError> {
        self.with_session(|session| session.line(row))
    }

    /// The range last passed to
    /// [`scroll_range_to_visible`](Self::scroll_range_to_visible).
    #[must_use]
    pub fn first_selected_range(&self) -> TextRange {
        self.inner.first_selected_range.get()
    }

    /// Selects `range` and centres it in the viewport.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::NotReady`] before the page has loaded and
    /// [`ViewError::Range`] when `range` does not fit the text.
    pub fn scroll_range_to_visible(&self, range: TextRange) -> Result<(), ViewError> {
        let arguments = script_range(range, &self.string()?)?;
        self.inner.first_selected_range.set(range);
        self.evaluate(&format!(
            "editor.session.selection.clearSelection();\
             editor.session.selection.setRange(new Range({arguments}));\
             editor.centerSelection();"
        ))?;
        Ok(())
    }

    /// Replaces the characters in `range` with `text`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::NotReady`] before the page has loaded and
    /// [`ViewError::Range`] when `range` does not fit the text.
    pub fn replace_characters(&self, range: TextRange, text: &str) -> Result<(), ViewError> {
        let arguments = script_range(range, &self.string()?)?;
        let literal = serde_json::Value::from(text);
        self.evaluate(&format!("editor.session.replace(new Range({arguments}), {literal});"))?;
        Ok(())
    }

    /// Every match of `options.needle`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::NotReady`] before the page has loaded.
    pub fn find_all(&self, options: &SearchOptions) -> Result<Vec<SearchMatch>, ViewError> {
        let results = self.evaluate(&options.find_all_script())?;
        Ok(SearchMatch::decode_all(&results.to_js_string()))
    }

    /// Replaces every match and returns how many were replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::NotReady`] before the page has loaded.
    pub fn replace_all(&self, replacement: &str, options: &SearchOptions) -> Result<usize, ViewError> {
        self.with_editor(|editor| editor.replace_all(replacement, options))
    }
}

impl fmt::Debug for AceView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AceView").field("id", &self.inner.id).field("ready", &self.is_ready()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::ScriptException;
    use crate::engine::HeadlessEngine;
    use crate::range::{AceRange, Position};
    use pretty_assertions::assert_eq;

    fn loaded_view() -> (AceView, HeadlessEngine) {
        let engine = HeadlessEngine::new();
        let view = AceView::with_notification_center(NotificationCenter::new());
        view.did_finish_load(Box::new(engine.clone()));
        (view, engine)
    }

    fn counter(view: &AceView) -> Rc<Cell<usize>> {
        let count = Rc::new(Cell::new(0));
        let sink = Rc::clone(&count);
        view.on_text_change(move |_| sink.set(sink.get() + 1));
        count
    }

    #[derive(Default)]
    struct RecordingDelegate {
        loads: Cell<usize>,
        changes: RefCell<Vec<Notification>>,
    }

    impl AceViewDelegate for RecordingDelegate {
        fn ace_view_did_load(&self, view: &AceView) {
            assert!(view.is_ready());
            self.loads.set(self.loads.get() + 1);
        }

        fn text_did_change(&self, notification: &Notification) {
            self.changes.borrow_mut().push(notification.clone());
        }
    }

    #[test]
    fn test_accessors_wait_for_load() {
        let view = AceView::with_notification_center(NotificationCenter::new());
        assert!(!view.is_ready());
        assert_eq!(view.string(), Err(ViewError::NotReady));
        assert_eq!(view.tab_size(), Err(ViewError::NotReady));
        assert_eq!(view.set_theme(AceTheme::Monokai), Err(ViewError::NotReady));
        assert_eq!(view.find_all(&SearchOptions::new("x")), Err(ViewError::NotReady));

        view.did_finish_load(Box::new(HeadlessEngine::new()));
        assert!(view.is_ready());
        assert_eq!(view.tab_size(), Ok(4));
    }

    #[test]
    fn test_load_notifies_delegate_and_ready_callback_once() {
        let view = AceView::with_notification_center(NotificationCenter::new());
        let delegate = Rc::new(RecordingDelegate::default());
        let weak: Weak<RecordingDelegate> = Rc::downgrade(&delegate);
        view.set_delegate(weak);

        let ready = Rc::new(Cell::new(0));
        let sink = Rc::clone(&ready);
        view.on_ready(move |view| {
            sink.set(sink.get() + 1);
            assert_eq!(view.font_size(), Ok(12));
        });

        view.did_finish_load(Box::new(HeadlessEngine::new()));
        view.did_finish_load(Box::new(HeadlessEngine::new()));
        assert_eq!(ready.get(), 1);
        assert_eq!(delegate.loads.get(), 2);
    }

    #[test]
    fn test_set_string_posts_exactly_one_notification() {
        let (view, _) = loaded_view();
        let delegate = Rc::new(RecordingDelegate::default());
        let weak: Weak<RecordingDelegate> = Rc::downgrade(&delegate);
        view.set_delegate(weak);
        let count = counter(&view);

        assert_eq!(view.set_string("hello"), Ok(()));
        assert_eq!(view.string(), Ok("hello".to_string()));
        assert_eq!(count.get(), 1);
        assert_eq!(
            *delegate.changes.borrow(),
            vec![Notification::new(TEXT_DID_END_EDITING, view.id())]
        );
    }

    #[test]
    fn test_observer_can_read_back_during_notification() {
        let (view, _) = loaded_view();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let reader = view.clone();
        view.on_text_change(move |_| sink.borrow_mut().push(reader.string()));

        assert_eq!(view.set_string("abc"), Ok(()));
        assert_eq!(*seen.borrow(), vec![Ok("abc".to_string())]);
    }

    #[test]
    fn test_notifications_are_scoped_to_the_view() {
        let center = NotificationCenter::new();
        let first = AceView::with_notification_center(center.clone());
        let second = AceView::with_notification_center(center);
        first.did_finish_load(Box::new(HeadlessEngine::new()));
        second.did_finish_load(Box::new(HeadlessEngine::new()));
        let first_count = counter(&first);

        assert_eq!(second.set_string("other"), Ok(()));
        assert_eq!(first_count.get(), 0);
    }

    #[test]
    fn test_dropped_view_is_not_kept_alive_by_its_page() {
        let engine = HeadlessEngine::new();
        let view = AceView::with_notification_center(NotificationCenter::new());
        view.did_finish_load(Box::new(engine.clone()));
        drop(view);
        assert_eq!(engine.global("ACEView"), Err(ScriptException::reference("ACEView")));
    }

    #[test]
    fn test_length() {
        let (view, _) = loaded_view();
        assert_eq!(view.set_string(""), Ok(()));
        assert_eq!(view.length(), Ok(1));
        assert_eq!(view.set_string("This \n should \n take four \n rows"), Ok(()));
        assert_eq!(view.length(), Ok(4));
        assert_eq!(view.line(3), Ok(" rows".to_string()));
    }

    #[test]
    fn test_wrap_limit_range_enables_wrap() {
        let (view, _) = loaded_view();
        assert_eq!(view.use_wrap_mode(), Ok(false));
        assert_eq!(view.set_wrap_limit_range(WrapLimit::new(10, 60)), Ok(()));
        assert_eq!(view.use_wrap_mode(), Ok(true));
        assert_eq!(view.wrap_limit_range(), Ok(WrapLimit::new(10, 60)));
    }

    #[test]
    fn test_scroll_range_to_visible() {
        let (view, engine) = loaded_view();
        assert_eq!(view.set_string("This \n should \n take four \n rows"), Ok(()));

        assert_eq!(view.scroll_range_to_visible(TextRange::new(7, 6)), Ok(()));
        let expected = AceRange::new(Position::new(1, 1), Position::new(1, 7));
        assert_eq!(engine.selection(), expected);
        assert_eq!(engine.centered_selection(), Some(expected));
        assert_eq!(view.first_selected_range(), TextRange::new(7, 6));

        assert_eq!(
            view.scroll_range_to_visible(TextRange::new(30, 10)),
            Err(ViewError::Range(RangeError::OutOfBounds { end: 40, len: 32 }))
        );
        assert_eq!(view.first_selected_range(), TextRange::new(7, 6));
    }

    #[test]
    fn test_replace_characters_escapes_text() {
        let (view, _) = loaded_view();
        assert_eq!(view.set_string("say hi\nbye"), Ok(()));
        let count = counter(&view);

        let replacement = "\"hello\"; \\ \n";
        assert_eq!(view.replace_characters(TextRange::new(4, 2), replacement), Ok(()));
        assert_eq!(view.string(), Ok(format!("say {replacement}\nbye")));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_replace_characters_uses_current_content() {
        let (view, _) = loaded_view();
        assert_eq!(view.set_string("ab\ncd"), Ok(()));
        // Offset 4 lies on the second row of the content, not of "X".
        assert_eq!(view.replace_characters(TextRange::new(4, 1), "X"), Ok(()));
        assert_eq!(view.string(), Ok("ab\ncX".to_string()));
    }

    #[test]
    fn test_ranges_after_astral_characters() {
        let (view, engine) = loaded_view();
        assert_eq!(view.set_string("\u{1F600} one\ntwo"), Ok(()));

        assert_eq!(view.scroll_range_to_visible(TextRange::new(2, 3)), Ok(()));
        assert_eq!(engine.selection(), AceRange::new(Position::new(0, 3), Position::new(0, 6)));

        assert_eq!(view.replace_characters(TextRange::new(2, 3), "1"), Ok(()));
        assert_eq!(view.string(), Ok("\u{1F600} 1\ntwo".to_string()));
    }

    #[test]
    fn test_find_all_and_replace_all() {
        let (view, _) = loaded_view();
        assert_eq!(view.set_string("one two\ntwo one two"), Ok(()));

        let matches = view.find_all(&SearchOptions::new("two"));
        assert_eq!(
            matches,
            Ok(vec![
                SearchMatch { start_row: 0, start_column: 4, end_row: 0, end_column: 7 },
                SearchMatch { start_row: 1, start_column: 0, end_row: 1, end_column: 3 },
                SearchMatch { start_row: 1, start_column: 8, end_row: 1, end_column: 11 },
            ])
        );

        assert_eq!(view.replace_all("2", &SearchOptions::new("two")), Ok(3));
        assert_eq!(view.string(), Ok("one 2\n2 one 2".to_string()));
    }

    #[test]
    fn test_find_all_with_bad_pattern_is_empty() {
        let (view, _) = loaded_view();
        let seen = Rc::new(Cell::new(0));
        let sink = Rc::clone(&seen);
        assert_eq!(view.set_exception_handler(Box::new(move |_| sink.set(sink.get() + 1))), Ok(()));
        assert_eq!(view.set_string("text"), Ok(()));

        assert_eq!(view.find_all(&SearchOptions::new("[").reg_exp(true)), Ok(Vec::new()));
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn test_forwarded_accessors() {
        let (view, engine) = loaded_view();
        assert_eq!(view.set_mode_inline(AceMode::Php, true), Ok(()));
        assert_eq!(view.mode(), Ok(Some(AceMode::Php)));
        assert_eq!(view.set_keyboard_handler(AceKeyboardHandler::Emacs), Ok(()));
        assert_eq!(view.keyboard_handler(), Ok(AceKeyboardHandler::Emacs));
        assert_eq!(view.font_family(), Ok("None".to_string()));
        assert_eq!(view.set_font_family("Hack"), Ok(()));
        assert_eq!(view.font_family(), Ok("Hack".to_string()));
        assert_eq!(view.set_new_line_mode(NewLineMode::Unix), Ok(()));
        assert_eq!(view.new_line_mode(), Ok(NewLineMode::Unix));
        assert_eq!(view.focus(), Ok(()));
        assert!(engine.is_focused());
    }
}
