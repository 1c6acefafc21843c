//! Values crossing the bridge and their explicit coercions.

use std::fmt;

use serde_json::{Map, Value};

/// Handle to an object living in the script engine's heap.
///
/// The handle does not keep the remote object alive; it is only meaningful
/// to the engine that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectRef(u64);

impl ObjectRef {
    /// A handle no engine issues. Every call on it fails.
    pub const DANGLING: ObjectRef = ObjectRef(0);

    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A script-side object: its handle plus a snapshot of its plain fields.
///
/// Engines fill `fields` with the object's own enumerable properties that
/// hold primitives, which is what [`ScriptValue::to_dictionary`] exposes.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteObject {
    pub handle: ObjectRef,
    pub fields: Map<String, Value>,
}

impl RemoteObject {
    #[must_use]
    pub fn new(handle: ObjectRef) -> Self {
        Self { handle, fields: Map::new() }
    }

    #[must_use]
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }
}

/// A value passed to or returned from the script engine.
///
/// Nothing is typed on the way back: callers coerce explicitly with
/// [`to_js_string`](Self::to_js_string), [`to_bool`](Self::to_bool),
/// [`to_int`](Self::to_int) or [`to_dictionary`](Self::to_dictionary),
/// which follow the script language's own conversion rules.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScriptValue {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// A host dictionary, converted to a plain script object on the way in
    Dictionary(Map<String, Value>),
    Object(RemoteObject),
}

impl ScriptValue {
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// String conversion, so `undefined` becomes `"undefined"`.
    #[must_use]
    pub fn to_js_string(&self) -> String {
        match self {
            Self::Undefined => "undefined".to_string(),
            Self::Null => "null".to_string(),
            Self::Bool(flag) => flag.to_string(),
            Self::Number(number) => number_to_string(*number),
            Self::String(text) => text.clone(),
            Self::Dictionary(_) | Self::Object(_) => "[object Object]".to_string(),
        }
    }

    /// Truthiness.
    #[must_use]
    pub fn to_bool(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Bool(flag) => *flag,
            Self::Number(number) => *number != 0.0 && !number.is_nan(),
            Self::String(text) => !text.is_empty(),
            Self::Dictionary(_) | Self::Object(_) => true,
        }
    }

    /// 32-bit integer conversion: truncates, wraps, and maps NaN and
    /// infinities to zero.
    #[must_use]
    pub fn to_int(&self) -> i32 {
        let number = match self {
            Self::Undefined | Self::Dictionary(_) | Self::Object(_) => f64::NAN,
            Self::Null => 0.0,
            Self::Bool(flag) => f64::from(u8::from(*flag)),
            Self::Number(number) => *number,
            Self::String(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() { 0.0 } else { trimmed.parse().unwrap_or(f64::NAN) }
            }
        };
        to_int32(number)
    }

    /// Same as [`to_int`](Self::to_int), clamped at zero for counts and sizes.
    #[must_use]
    pub fn to_usize(&self) -> usize {
        usize::try_from(self.to_int()).unwrap_or(0)
    }

    /// The dictionary view of an object, `None` for primitives.
    #[must_use]
    pub fn to_dictionary(&self) -> Option<Map<String, Value>> {
        match self {
            Self::Dictionary(map) => Some(map.clone()),
            Self::Object(object) => Some(object.fields.clone()),
            _ => None,
        }
    }

    /// The remote object behind this value, if it is one.
    #[must_use]
    pub fn as_object(&self) -> Option<&RemoteObject> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// JSON form of a primitive or dictionary. Remote objects become their
    /// field snapshot.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Undefined | Self::Null => Value::Null,
            Self::Bool(flag) => Value::Bool(*flag),
            Self::Number(number) => {
                serde_json::Number::from_f64(*number).map_or(Value::Null, Value::Number)
            }
            Self::String(text) => Value::String(text.clone()),
            Self::Dictionary(map) => Value::Object(map.clone()),
            Self::Object(object) => Value::Object(object.fields.clone()),
        }
    }
}

impl From<&Value> for ScriptValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Bool(*flag),
            Value::Number(number) => Self::Number(number.as_f64().unwrap_or(f64::NAN)),
            Value::String(text) => Self::String(text.clone()),
            Value::Array(_) => Self::String(value.to_string()),
            Value::Object(map) => Self::Dictionary(map.clone()),
        }
    }
}

impl From<bool> for ScriptValue {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<i32> for ScriptValue {
    fn from(number: i32) -> Self {
        Self::Number(f64::from(number))
    }
}

impl From<u32> for ScriptValue {
    fn from(number: u32) -> Self {
        Self::Number(f64::from(number))
    }
}

impl From<usize> for ScriptValue {
    fn from(number: usize) -> Self {
        Self::Number(number as f64)
    }
}

impl From<f64> for ScriptValue {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

impl From<&str> for ScriptValue {
    fn from(text: &str) -> Self {
        Self::String(text.to_string())
    }
}

impl From<String> for ScriptValue {
    fn from(text: String) -> Self {
        Self::String(text)
    }
}

impl From<Map<String, Value>> for ScriptValue {
    fn from(map: Map<String, Value>) -> Self {
        Self::Dictionary(map)
    }
}

fn number_to_string(number: f64) -> String {
    if number.is_nan() {
        "NaN".to_string()
    } else if number.is_infinite() {
        if number > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() }
    } else if number == 0.0 {
        "0".to_string()
    } else if number.fract() == 0.0 && number.abs() < 1e21 {
        format!("{number:.0}")
    } else {
        number.to_string()
    }
}

fn to_int32(number: f64) -> i32 {
    if !number.is_finite() {
        return 0;
    }
    let wrapped = number.trunc().rem_euclid(4_294_967_296.0);
    let wrapped = if wrapped >= 2_147_483_648.0 { wrapped - 4_294_967_296.0 } else { wrapped };
    wrapped as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_coercions() {
        let value = ScriptValue::Undefined;
        assert_eq!(value.to_js_string(), "undefined");
        assert!(!value.to_bool());
        assert_eq!(value.to_int(), 0);
        assert_eq!(value.to_dictionary(), None);
    }

    #[test]
    fn test_number_to_string() {
        assert_eq!(ScriptValue::from(12).to_js_string(), "12");
        assert_eq!(ScriptValue::from(1.5).to_js_string(), "1.5");
        assert_eq!(ScriptValue::from(-0.0).to_js_string(), "0");
        assert_eq!(ScriptValue::from(f64::NAN).to_js_string(), "NaN");
        assert_eq!(ScriptValue::from(f64::INFINITY).to_js_string(), "Infinity");
    }

    #[test]
    fn test_truthiness() {
        assert!(ScriptValue::from(1).to_bool());
        assert!(!ScriptValue::from(0).to_bool());
        assert!(!ScriptValue::from(f64::NAN).to_bool());
        assert!(!ScriptValue::from("").to_bool());
        assert!(ScriptValue::from("false").to_bool());
        assert!(!ScriptValue::Null.to_bool());
        assert!(ScriptValue::Dictionary(Map::new()).to_bool());
    }

    #[test]
    fn test_to_int_follows_int32_rules() {
        assert_eq!(ScriptValue::from(4.9).to_int(), 4);
        assert_eq!(ScriptValue::from(-4.9).to_int(), -4);
        assert_eq!(ScriptValue::from(4_294_967_297.0).to_int(), 1);
        assert_eq!(ScriptValue::from(2_147_483_648.0).to_int(), i32::MIN);
        assert_eq!(ScriptValue::from(" 42 ").to_int(), 42);
        assert_eq!(ScriptValue::from("4x").to_int(), 0);
        assert_eq!(ScriptValue::from(true).to_int(), 1);
        assert_eq!(ScriptValue::from(-3).to_usize(), 0);
    }

    #[test]
    fn test_object_dictionary_view() {
        let object = RemoteObject::new(ObjectRef::new(7)).with_field("min", 20).with_field("max", 80);
        let value = ScriptValue::Object(object);
        let fields = value.to_dictionary().unwrap_or_default();
        assert_eq!(fields.get("min").and_then(Value::as_i64), Some(20));
        assert_eq!(fields.get("max").and_then(Value::as_i64), Some(80));
        assert_eq!(value.to_js_string(), "[object Object]");
    }

    #[test]
    fn test_json_conversion() {
        let value = ScriptValue::from(&serde_json::json!({"path": "ace/mode/php", "inline": true}));
        let map = value.to_dictionary().unwrap_or_default();
        assert_eq!(map.get("inline"), Some(&Value::Bool(true)));
        assert_eq!(value.to_json(), serde_json::json!({"path": "ace/mode/php", "inline": true}));
    }
}
