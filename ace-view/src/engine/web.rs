//! The browser's Ace, reached through `wasm-bindgen`.
//!
//! Remote objects are kept in a bounded handle registry so the bridge can
//! refer to them by [`ObjectRef`]. Plain objects (option bags, wrap limits)
//! carry no behavior and cross as [`ScriptValue::Dictionary`] snapshots
//! without taking a handle. Host exports are installed as plain script
//! objects whose methods are closures over a weak host reference.

use std::cell::RefCell;
use std::rc::Weak;

use js_sys::{Array, Function, JSON, Object, Reflect};
use serde_json::{Map, Value};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::{Closure, JsValue};

use super::registry::{HandleRegistry, Identity};
use crate::bridge::{
    HostExports, ObjectRef, RemoteObject, ScriptEngine, ScriptException, ScriptResult, ScriptValue,
};

impl Identity for JsValue {
    fn same(&self, other: &Self) -> bool {
        Object::is(self, other)
    }
}

/// A [`ScriptEngine`] over the page's own JavaScript realm.
///
/// The page must define the `editor`, `Range`, `Search`, `reportChanges`
/// and `focusEditor` globals, as the bundled page template does.
#[derive(Default)]
pub struct WebEngine {
    objects: RefCell<HandleRegistry<JsValue>>,
    exports: RefCell<Vec<Closure<dyn Fn()>>>,
}

impl WebEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lookup(&self, handle: ObjectRef) -> Option<JsValue> {
        self.objects.borrow_mut().lookup(handle).cloned()
    }

    fn export(&self, value: &ScriptValue) -> JsValue {
        match value {
            ScriptValue::Undefined => JsValue::UNDEFINED,
            ScriptValue::Null => JsValue::NULL,
            ScriptValue::Bool(flag) => JsValue::from_bool(*flag),
            ScriptValue::Number(number) => JsValue::from_f64(*number),
            ScriptValue::String(text) => JsValue::from_str(text),
            ScriptValue::Dictionary(map) => {
                JSON::parse(&Value::Object(map.clone()).to_string()).unwrap_or(JsValue::NULL)
            }
            ScriptValue::Object(object) => self.lookup(object.handle).unwrap_or(JsValue::UNDEFINED),
        }
    }

    /// Converts a script value; `pinned` objects are never evicted.
    fn import(&self, value: JsValue, pinned: bool) -> ScriptValue {
        if value.is_undefined() {
            ScriptValue::Undefined
        } else if value.is_null() {
            ScriptValue::Null
        } else if let Some(flag) = value.as_bool() {
            ScriptValue::Bool(flag)
        } else if let Some(number) = value.as_f64() {
            ScriptValue::Number(number)
        } else if let Some(text) = value.as_string() {
            ScriptValue::String(text)
        } else if is_plain_object(&value) {
            ScriptValue::Dictionary(primitive_fields(&value))
        } else {
            let fields = primitive_fields(&value);
            let handle = self.objects.borrow_mut().register(value, pinned);
            ScriptValue::Object(RemoteObject { handle, fields })
        }
    }
}

impl ScriptEngine for WebEngine {
    fn global(&self, name: &str) -> ScriptResult {
        let global = js_sys::global();
        let key = JsValue::from_str(name);
        if !Reflect::has(&global, &key).map_err(|error| exception(&error))? {
            return Err(ScriptException::reference(name));
        }
        let value = Reflect::get(&global, &key).map_err(|error| exception(&error))?;
        Ok(self.import(value, true))
    }

    fn invoke(&self, target: ObjectRef, method: &str, args: &[ScriptValue]) -> ScriptResult {
        let object = self.lookup(target).ok_or_else(|| ScriptException::not_a_function(&target.to_string(), method))?;
        let function = Reflect::get(&object, &JsValue::from_str(method))
            .map_err(|error| exception(&error))?
            .dyn_into::<Function>()
            .map_err(|_| ScriptException::not_a_function(&target.to_string(), method))?;
        let arguments: Array = args.iter().map(|arg| self.export(arg)).collect();
        let result = function.apply(&object, &arguments).map_err(|error| exception(&error))?;
        Ok(self.import(result, false))
    }

    fn evaluate(&self, script: &str) -> ScriptResult {
        js_sys::eval(script).map(|value| self.import(value, false)).map_err(|error| exception(&error))
    }

    fn bind_host(&self, name: &str, host: Weak<dyn HostExports>) {
        let did_change = Closure::<dyn Fn()>::new(move || match host.upgrade() {
            Some(host) => host.ace_text_did_change(),
            None => log::debug!("text change reported after the host was dropped"),
        });
        let exports = Object::new();
        let installed = Reflect::set(&exports, &JsValue::from_str("aceTextDidChange"), did_change.as_ref())
            .and_then(|_| Reflect::set(&js_sys::global(), &JsValue::from_str(name), &exports));
        if let Err(error) = installed {
            log::error!("failed to bind host object {name}: {}", exception(&error));
        }
        self.exports.borrow_mut().push(did_change);
    }
}

fn exception(error: &JsValue) -> ScriptException {
    let field = |key: &str| {
        Reflect::get(error, &JsValue::from_str(key)).ok().and_then(|value| value.as_string())
    };
    match (field("name"), field("message")) {
        (Some(name), Some(message)) => ScriptException { name, message },
        _ => ScriptException::new("Error", error.as_string().unwrap_or_else(|| format!("{error:?}"))),
    }
}

/// An object literal or `Object.create(null)` result.
fn is_plain_object(value: &JsValue) -> bool {
    let Some(object) = value.dyn_ref::<Object>() else {
        return false;
    };
    if object.is_instance_of::<Function>() || Array::is_array(value) {
        return false;
    }
    let prototype = Object::get_prototype_of(value);
    prototype.is_null() || Object::is(&prototype, &Object::get_prototype_of(&Object::new()))
}

/// Own enumerable properties holding primitives, as JSON.
fn primitive_fields(value: &JsValue) -> Map<String, Value> {
    let Some(object) = value.dyn_ref::<Object>() else {
        return Map::new();
    };
    let mut fields = Map::new();
    for key in Object::keys(object).iter() {
        let (Some(name), Ok(field)) = (key.as_string(), Reflect::get(object, &key)) else {
            continue;
        };
        let field = if field.is_null() {
            Value::Null
        } else if let Some(flag) = field.as_bool() {
            Value::Bool(flag)
        } else if let Some(number) = field.as_f64() {
            serde_json::Number::from_f64(number).map_or(Value::Null, Value::Number)
        } else if let Some(text) = field.as_string() {
            Value::String(text)
        } else {
            continue;
        };
        fields.insert(name, field);
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::registry::DEFAULT_CAPACITY;
    use pretty_assertions::assert_eq;
    use wasm_bindgen_test::wasm_bindgen_test;

    fn counter_object(engine: &WebEngine) -> ObjectRef {
        let value = engine
            .evaluate("new (class Counter { constructor() { this.count = 1; } add(n) { return this.count + n; } })()")
            .unwrap_or_default();
        value.as_object().map_or(ObjectRef::DANGLING, |object| object.handle)
    }

    #[wasm_bindgen_test]
    fn test_evaluate_returns_primitives() {
        let engine = WebEngine::new();
        assert_eq!(engine.evaluate("1 + 1"), Ok(ScriptValue::Number(2.0)));
        assert_eq!(engine.evaluate("'a' + 'b'"), Ok(ScriptValue::String("ab".to_string())));
        assert_eq!(engine.evaluate("undefined"), Ok(ScriptValue::Undefined));
    }

    #[wasm_bindgen_test]
    fn test_global_reads_and_missing_names() {
        let engine = WebEngine::new();
        assert_eq!(engine.evaluate("globalThis.aceViewAnswer = 42"), Ok(ScriptValue::Number(42.0)));

        assert_eq!(engine.global("aceViewAnswer"), Ok(ScriptValue::Number(42.0)));
        assert_eq!(
            engine.global("aceViewMissing"),
            Err(ScriptException::reference("aceViewMissing"))
        );
    }

    #[wasm_bindgen_test]
    fn test_invoke_calls_methods_on_registered_objects() {
        let engine = WebEngine::new();
        let counter = counter_object(&engine);
        assert_ne!(counter, ObjectRef::DANGLING);

        assert_eq!(engine.invoke(counter, "add", &[ScriptValue::Number(41.0)]), Ok(ScriptValue::Number(42.0)));
        assert_eq!(
            engine.invoke(counter, "remove", &[]),
            Err(ScriptException::not_a_function(&counter.to_string(), "remove"))
        );
        assert_eq!(
            engine.invoke(ObjectRef::DANGLING, "add", &[]),
            Err(ScriptException::not_a_function(&ObjectRef::DANGLING.to_string(), "add"))
        );
    }

    #[wasm_bindgen_test]
    fn test_thrown_errors_map_to_exceptions() {
        let engine = WebEngine::new();
        assert_eq!(engine.evaluate("throw new RangeError('boom')"), Err(ScriptException::new("RangeError", "boom")));
        assert_eq!(engine.evaluate("throw 'plain'"), Err(ScriptException::new("Error", "plain")));
        assert_eq!(exception(&JsValue::from_str("text")), ScriptException::new("Error", "text"));
    }

    #[wasm_bindgen_test]
    fn test_plain_objects_cross_as_dictionaries() {
        let engine = WebEngine::new();
        assert_eq!(
            engine.evaluate("globalThis.aceViewWrapRange = () => ({ min: 40, max: 80 }); undefined"),
            Ok(ScriptValue::Undefined)
        );

        for _ in 0..200 {
            let range = engine.evaluate("aceViewWrapRange()").unwrap_or_default();
            assert_eq!(range.to_dictionary().and_then(|fields| fields.get("max").cloned()), Some(serde_json::json!(80.0)));
        }
        assert_eq!(engine.objects.borrow().len(), 0);
    }

    #[wasm_bindgen_test]
    fn test_fresh_objects_stay_bounded() {
        let engine = WebEngine::new();
        for _ in 0..(DEFAULT_CAPACITY * 3) {
            counter_object(&engine);
        }
        assert_eq!(engine.objects.borrow().len(), DEFAULT_CAPACITY);
    }
}
