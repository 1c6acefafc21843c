//! The bridged call layer between Rust and the embedded script engine.
//!
//! A [`ScriptEngine`] is the opaque call/evaluate interface of whatever runs
//! the Ace scripts (a browser, a web view, or the in-process
//! [`HeadlessEngine`](crate::HeadlessEngine)). The [`Bridge`] wraps one
//! engine together with the single exception handler that receives every
//! script failure, and [`BridgedObject`] pairs the bridge with one remote
//! object handle.
//!
//! Calls never fail at the accessor boundary: a script exception is handed
//! to the exception handler and the call yields [`ScriptValue::Undefined`],
//! which each accessor coerces into its documented default.

mod operation;
mod value;

use std::cell::RefCell;
use std::rc::Weak;

use thiserror::Error;

pub use operation::Operation;
pub use value::{ObjectRef, RemoteObject, ScriptValue};

/// An exception thrown on the script side.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{name}: {message}")]
pub struct ScriptException {
    /// Error constructor name, e.g. `ReferenceError`
    pub name: String,
    pub message: String,
}

impl ScriptException {
    #[must_use]
    pub fn new(name: &str, message: impl Into<String>) -> Self {
        Self { name: name.to_string(), message: message.into() }
    }

    /// A `ReferenceError` for a name the script environment does not know.
    #[must_use]
    pub fn reference(name: &str) -> Self {
        Self::new("ReferenceError", format!("Can't find variable: {name}"))
    }

    /// A `TypeError` for a method missing on an object.
    #[must_use]
    pub fn not_a_function(target: &str, method: &str) -> Self {
        Self::new("TypeError", format!("{target}.{method} is not a function"))
    }
}

/// Result of a raw engine call.
pub type ScriptResult = Result<ScriptValue, ScriptException>;

/// Receives every exception raised by the engine.
pub type ExceptionHandler = Box<dyn FnMut(&ScriptException)>;

/// Script global under which the host view is exposed.
pub const HOST_GLOBAL: &str = "ACEView";

/// Host methods callable from scripts through the bound host object.
pub trait HostExports {
    /// The document content changed.
    fn ace_text_did_change(&self);
}

/// The call/evaluate interface of an embedded script engine.
///
/// Engines are single-threaded and use interior mutability, so every call
/// takes `&self`. An engine must release its internal borrows before it
/// calls back into a bound host object: the host may re-enter the engine
/// from its notification observers.
pub trait ScriptEngine {
    /// Reads a global variable.
    ///
    /// # Errors
    ///
    /// Returns the script exception raised by the lookup.
    fn global(&self, name: &str) -> ScriptResult;

    /// Calls `method` on the object behind `target` with `args`.
    ///
    /// # Errors
    ///
    /// Returns the script exception thrown by the call, including a
    /// `TypeError` for a missing method.
    fn invoke(&self, target: ObjectRef, method: &str, args: &[ScriptValue]) -> ScriptResult;

    /// Evaluates a script and returns the value of its last statement.
    ///
    /// # Errors
    ///
    /// Returns the script exception thrown while evaluating.
    fn evaluate(&self, script: &str) -> ScriptResult;

    /// Exposes `host` to scripts as the global `name`.
    ///
    /// The engine keeps only the weak reference; it must not extend the
    /// host's lifetime.
    fn bind_host(&self, name: &str, host: Weak<dyn HostExports>);
}

/// An engine plus the exception handler its failures are routed to.
pub struct Bridge {
    engine: Box<dyn ScriptEngine>,
    exception_handler: RefCell<ExceptionHandler>,
}

impl Bridge {
    /// Wraps `engine`, logging exceptions until a handler is installed.
    #[must_use]
    pub fn new(engine: Box<dyn ScriptEngine>) -> Self {
        Self { engine, exception_handler: RefCell::new(Box::new(log_exception)) }
    }

    /// The wrapped engine.
    #[must_use]
    pub fn engine(&self) -> &dyn ScriptEngine {
        self.engine.as_ref()
    }

    /// Installs the exception handler, dropping the previous one.
    pub fn set_exception_handler(&self, handler: ExceptionHandler) {
        match self.exception_handler.try_borrow_mut() {
            Ok(mut current) => *current = handler,
            Err(_) => log::warn!("exception handler replaced while it was running; ignoring"),
        }
    }

    /// Calls an operation on a remote object.
    pub fn invoke(&self, target: ObjectRef, operation: Operation, args: &[ScriptValue]) -> ScriptValue {
        log::trace!("{target}.{operation}({args:?})");
        self.settle(self.engine.invoke(target, operation.name(), args))
    }

    /// Evaluates raw script text.
    pub fn evaluate(&self, script: &str) -> ScriptValue {
        log::trace!("evaluate: {script}");
        self.settle(self.engine.evaluate(script))
    }

    /// Reads a global variable.
    pub fn global(&self, name: &str) -> ScriptValue {
        self.settle(self.engine.global(name))
    }

    /// Routes a failure to the exception handler and substitutes `undefined`.
    fn settle(&self, result: ScriptResult) -> ScriptValue {
        match result {
            Ok(value) => value,
            Err(exception) => {
                match self.exception_handler.try_borrow_mut() {
                    Ok(mut handler) => handler(&exception),
                    // The handler itself triggered a script failure.
                    Err(_) => log_exception(&exception),
                }
                ScriptValue::Undefined
            }
        }
    }
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge").finish_non_exhaustive()
    }
}

fn log_exception(exception: &ScriptException) {
    log::error!("Context exception: {exception}");
}

/// One remote object seen through the bridge.
///
/// Holds no state of its own; every call is a fresh round-trip.
#[derive(Debug, Clone, Copy)]
pub struct BridgedObject<'a> {
    bridge: &'a Bridge,
    handle: ObjectRef,
}

impl<'a> BridgedObject<'a> {
    #[must_use]
    pub const fn new(bridge: &'a Bridge, handle: ObjectRef) -> Self {
        Self { bridge, handle }
    }

    #[must_use]
    pub const fn bridge(&self) -> &'a Bridge {
        self.bridge
    }

    #[must_use]
    pub const fn handle(&self) -> ObjectRef {
        self.handle
    }

    /// Calls `operation` on this object.
    pub fn call(&self, operation: Operation, args: &[ScriptValue]) -> ScriptValue {
        self.bridge.invoke(self.handle, operation, args)
    }

    /// Calls a getter-style operation with no arguments.
    pub fn get(&self, operation: Operation) -> ScriptValue {
        self.call(operation, &[])
    }

    /// Calls a setter-style operation with a single argument.
    pub fn set(&self, operation: Operation, value: impl Into<ScriptValue>) {
        self.call(operation, &[value.into()]);
    }

    /// Reads a named option through `getOption`.
    pub fn option(&self, name: &str) -> ScriptValue {
        self.call(Operation::GetOption, &[ScriptValue::from(name)])
    }

    /// Writes options through `setOptions`.
    pub fn set_options(&self, options: serde_json::Map<String, serde_json::Value>) {
        self.call(Operation::SetOptions, &[ScriptValue::Dictionary(options)]);
    }

    /// Writes a single option through `setOptions`.
    pub fn set_option(&self, name: &str, value: impl Into<serde_json::Value>) {
        let mut options = serde_json::Map::new();
        options.insert(name.to_string(), value.into());
        self.set_options(options);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    /// Engine that answers `echo` and fails everything else.
    struct EchoEngine;

    impl ScriptEngine for EchoEngine {
        fn global(&self, name: &str) -> ScriptResult {
            Err(ScriptException::reference(name))
        }

        fn invoke(&self, _target: ObjectRef, method: &str, args: &[ScriptValue]) -> ScriptResult {
            match method {
                "getOption" => Ok(args.first().cloned().unwrap_or_default()),
                _ => Err(ScriptException::not_a_function("object", method)),
            }
        }

        fn evaluate(&self, script: &str) -> ScriptResult {
            Err(ScriptException::new("SyntaxError", format!("unexpected {script}")))
        }

        fn bind_host(&self, _name: &str, _host: Weak<dyn HostExports>) {}
    }

    fn collecting_bridge() -> (Bridge, Rc<RefCell<Vec<ScriptException>>>) {
        let bridge = Bridge::new(Box::new(EchoEngine));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        bridge.set_exception_handler(Box::new(move |exception| {
            sink.borrow_mut().push(exception.clone());
        }));
        (bridge, seen)
    }

    #[test]
    fn test_successful_call_returns_value() {
        let (bridge, seen) = collecting_bridge();
        let object = BridgedObject::new(&bridge, ObjectRef::new(1));
        assert_eq!(object.option("tabSize"), ScriptValue::from("tabSize"));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_failure_goes_to_handler_and_yields_undefined() {
        let (bridge, seen) = collecting_bridge();
        let object = BridgedObject::new(&bridge, ObjectRef::new(1));

        let value = object.get(Operation::GetTabSize);
        assert!(value.is_undefined());
        assert_eq!(value.to_int(), 0);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].name, "TypeError");
        assert_eq!(seen[0].message, "object.getTabSize is not a function");
    }

    #[test]
    fn test_replacing_handler_discards_previous() {
        let (bridge, first) = collecting_bridge();
        let second = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&second);
        bridge.set_exception_handler(Box::new(move |_| *counter.borrow_mut() += 1));

        bridge.evaluate("nonsense(");
        bridge.global("missing");

        assert!(first.borrow().is_empty());
        assert_eq!(*second.borrow(), 2);
    }

    #[test]
    fn test_exception_display() {
        let exception = ScriptException::reference("editor");
        assert_eq!(exception.to_string(), "ReferenceError: Can't find variable: editor");
    }
}
