//! Recursive option values held by widgets.
//!
//! Mappings keep insertion order (`IndexMap`) because key order is part of the
//! emitted output.

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};

pub type Mapping = IndexMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

impl Value {
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Sequence(_) | Value::Mapping(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Text of a scalar as a user would type it; `None` for containers.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            Value::Null => Some("null".to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Int(n) => Some(n.to_string()),
            Value::Float(f) => Some(crate::emit::format_float(*f)),
            Value::String(s) => Some(s.clone()),
            Value::Sequence(_) | Value::Mapping(_) => None,
        }
    }

    /// Convert a parsed YAML node. Tags are unwrapped and non-string mapping
    /// keys are stringified.
    pub fn from_yaml(node: serde_yaml::Value) -> Self {
        match node {
            serde_yaml::Value::Null => Value::Null,
            serde_yaml::Value::Bool(b) => Value::Bool(b),
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    // u64 beyond i64 range also lands here
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_yaml::Value::String(s) => Value::String(s),
            serde_yaml::Value::Sequence(items) => {
                Value::Sequence(items.into_iter().map(Value::from_yaml).collect())
            }
            serde_yaml::Value::Mapping(map) => Value::Mapping(
                map.into_iter()
                    .map(|(k, v)| (yaml_key_text(k), Value::from_yaml(v)))
                    .collect(),
            ),
            serde_yaml::Value::Tagged(tagged) => Value::from_yaml(tagged.value),
        }
    }

    /// Parse a value typed into a form field.
    ///
    /// Scalars follow YAML typing (`10` is an integer, `true` a boolean,
    /// `"a: b"` a string). Flow collections are accepted when the text starts
    /// with `[` or `{`. Anything else that YAML would read differently
    /// (`a: b`, `# note`, anchors, aliases, tags) is kept verbatim as a
    /// string. A blank value is the empty string.
    pub fn parse_form_value(text: &str) -> Value {
        let text = text.trim();
        if text.is_empty() {
            return Value::String(String::new());
        }
        if text.starts_with(['&', '*']) {
            return Value::String(text.to_string());
        }

        let flow = text.starts_with('[') || text.starts_with('{');
        match serde_yaml::from_str::<serde_yaml::Value>(text) {
            Ok(serde_yaml::Value::Null) if !is_null_literal(text) => {
                Value::String(text.to_string())
            }
            Ok(node @ (serde_yaml::Value::Sequence(_) | serde_yaml::Value::Mapping(_))) => {
                if flow {
                    Value::from_yaml(node)
                } else {
                    Value::String(text.to_string())
                }
            }
            Ok(serde_yaml::Value::Tagged(_)) | Err(_) => Value::String(text.to_string()),
            Ok(node) => Value::from_yaml(node),
        }
    }
}

fn is_null_literal(text: &str) -> bool {
    matches!(text, "~" | "null" | "Null" | "NULL")
}

fn yaml_key_text(key: serde_yaml::Value) -> String {
    match Value::from_yaml(key) {
        Value::String(s) => s,
        other => other
            .scalar_text()
            .unwrap_or_else(|| serde_json::to_string(&other).unwrap_or_default()),
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Mapping> for Value {
    fn from(m: Mapping) -> Self {
        Value::Mapping(m)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Mapping(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Mapping(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}
