//! The top-level script context: engine, exception sink and host binding.

use std::rc::Weak;

use crate::bridge::{
    Bridge, BridgedObject, ExceptionHandler, HOST_GLOBAL, HostExports, ObjectRef, ScriptEngine,
    ScriptValue,
};
use crate::editor::Editor;

/// Owns the bridge to a loaded editor page.
///
/// The global `editor` object is resolved once, when the context is built.
/// Facades borrow the context and hold no state of their own.
#[derive(Debug)]
pub struct AceContext {
    bridge: Bridge,
    editor: ObjectRef,
}

impl AceContext {
    /// Wraps an engine whose page has finished loading.
    ///
    /// A page without an `editor` global is reported through the exception
    /// handler; every editor call then fails the same way.
    #[must_use]
    pub fn new(engine: Box<dyn ScriptEngine>) -> Self {
        let bridge = Bridge::new(engine);
        let editor = bridge.global("editor").as_object().map_or(ObjectRef::DANGLING, |editor| editor.handle);
        log::debug!("editor context ready, editor handle {editor}");
        Self { bridge, editor }
    }

    pub fn editor(&self) -> Editor<'_> {
        Editor::new(BridgedObject::new(&self.bridge, self.editor))
    }

    /// Evaluates `script` and returns the value of its last statement.
    pub fn evaluate(&self, script: &str) -> ScriptValue {
        self.bridge.evaluate(script)
    }

    /// Gives the editor keyboard focus through the page's `focusEditor`.
    pub fn focus_editor(&self) {
        self.bridge.evaluate("focusEditor();");
    }

    /// Installs the handler that receives every script exception.
    ///
    /// Replaces and drops the previous handler.
    pub fn set_exception_handler(&self, handler: ExceptionHandler) {
        self.bridge.set_exception_handler(handler);
    }

    /// Exposes `host` to scripts as the `ACEView` global.
    ///
    /// The context keeps only the weak reference.
    pub fn set_host(&self, host: Weak<dyn HostExports>) {
        self.bridge.engine().bind_host(HOST_GLOBAL, host);
    }

    pub fn bridge(&self) -> &Bridge {
        &self.bridge
    }
}
