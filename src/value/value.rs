//! Core value types and operations.

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Value represents one node of a parsed YAML/JSON document.
///
/// Every node is exactly one of three shapes (see [`Shape`]): a scalar
/// (`Null`, `Bool`, `Int`, `Float`, `String`), a mapping (`Map`) or a
/// sequence (`List`). Shapes are checked, never coerced: `Int(1)` and
/// `Float(1.0)` are different scalars.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(Map),
}

/// Shape is the coarse kind of a [`Value`] that decides how it is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Shape {
    Scalar,
    Mapping,
    Sequence,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Scalar => write!(f, "scalar"),
            Shape::Mapping => write!(f, "mapping"),
            Shape::Sequence => write!(f, "sequence"),
        }
    }
}

/// Map is a mapping with unique keys.
///
/// Any scalar key is accepted when parsing and stored in its textual form:
/// `200`, `true` and `1.5` become `"200"`, `"true"` and `"1.5"`. Keys are
/// kept sorted, so iteration order is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Map {
    pub fields: BTreeMap<String, Value>,
}

impl<'de> Deserialize<'de> for Map {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MapVisitor;

        impl<'de> Visitor<'de> for MapVisitor {
            type Value = Map;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a mapping with scalar keys")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Map, A::Error> {
                let mut fields = BTreeMap::new();
                while let Some(ScalarKey(key)) = access.next_key()? {
                    let value = access.next_value()?;
                    fields.insert(key, value);
                }
                Ok(Map { fields })
            }
        }

        deserializer.deserialize_map(MapVisitor)
    }
}

/// A mapping key of any scalar type, in textual form.
struct ScalarKey(String);

impl<'de> Deserialize<'de> for ScalarKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl<'de> Visitor<'de> for KeyVisitor {
            type Value = ScalarKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a scalar mapping key")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ScalarKey, E> {
                Ok(ScalarKey(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<ScalarKey, E> {
                Ok(ScalarKey(v))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<ScalarKey, E> {
                Ok(ScalarKey(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<ScalarKey, E> {
                Ok(ScalarKey(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<ScalarKey, E> {
                Ok(ScalarKey(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<ScalarKey, E> {
                Ok(ScalarKey(v.to_string()))
            }

            fn visit_unit<E: de::Error>(self) -> Result<ScalarKey, E> {
                Ok(ScalarKey("null".to_string()))
            }

            fn visit_none<E: de::Error>(self) -> Result<ScalarKey, E> {
                self.visit_unit()
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}

impl Value {
    /// Returns the shape of this value.
    pub fn shape(&self) -> Shape {
        match self {
            Value::Map(_) => Shape::Mapping,
            Value::List(_) => Shape::Sequence,
            Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::String(_) => {
                Shape::Scalar
            }
        }
    }

    pub fn is_scalar(&self) -> bool {
        self.shape() == Shape::Scalar
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

// NaN is the one value that is not equal to itself. It never matches
// anything, which is what the differ wants from it.
impl Eq for Value {}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(i) => i.hash(state),
            // 0.0 == -0.0, so both must land in the same bucket.
            Value::Float(f) if *f == 0.0 => 0u64.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::String(s) => s.hash(state),
            Value::List(l) => l.hash(state),
            Value::Map(m) => {
                for (k, v) in &m.fields {
                    k.hash(state);
                    v.hash(state);
                }
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::String(s) => write!(f, "{:?}", s),
            Value::List(_) | Value::Map(_) => match serde_json::to_string(self) {
                Ok(s) => write!(f, "{}", s),
                Err(_) => Err(fmt::Error),
            },
        }
    }
}

impl Map {
    pub fn new() -> Self {
        Map {
            fields: BTreeMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns the value for `key`, treating a missing key as `Null`.
    pub fn get_or_null(&self, key: &str) -> &Value {
        static NULL: Value = Value::Null;
        self.fields.get(key).unwrap_or(&NULL)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }
}

impl FromIterator<(String, Value)> for Map {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Map {
            fields: iter.into_iter().collect(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
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

impl From<Vec<Value>> for Value {
    fn from(l: Vec<Value>) -> Self {
        Value::List(l)
    }
}

impl From<Map> for Value {
    fn from(m: Map) -> Self {
        Value::Map(m)
    }
}

/// Parse a value from JSON.
pub fn from_json(json: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(json)
}

/// Serialize a value to JSON.
pub fn to_json(value: &Value) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

/// Parse a value from YAML.
pub fn from_yaml(yaml: &str) -> Result<Value, serde_yaml::Error> {
    serde_yaml::from_str(yaml)
}

/// Serialize a value to YAML.
pub fn to_yaml(value: &Value) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_value_shapes() {
        assert_eq!(Value::Null.shape(), Shape::Scalar);
        assert_eq!(Value::Bool(true).shape(), Shape::Scalar);
        assert_eq!(Value::Int(42).shape(), Shape::Scalar);
        assert_eq!(Value::Float(3.5).shape(), Shape::Scalar);
        assert_eq!(Value::String("hello".into()).shape(), Shape::Scalar);
        assert_eq!(Value::List(vec![]).shape(), Shape::Sequence);
        assert_eq!(Value::Map(Map::new()).shape(), Shape::Mapping);
    }

    #[test]
    fn test_value_equality_is_not_coercing() {
        assert_eq!(Value::Int(42), Value::Int(42));
        assert_ne!(Value::Int(1), Value::Float(1.0));
        assert_ne!(Value::Int(1), Value::Bool(true));
        assert_ne!(Value::Null, Value::String("".into()));
        assert_ne!(Value::Float(f64::NAN), Value::Float(f64::NAN));
    }

    #[test]
    fn test_signed_zero_hashes_alike() {
        let mut set = HashSet::new();
        set.insert(Value::Float(0.0));
        assert!(set.contains(&Value::Float(-0.0)));
    }

    #[test]
    fn test_map_get_or_null() {
        let mut map = Map::new();
        map.set("key", Value::from("value"));
        assert_eq!(map.get_or_null("key"), &Value::from("value"));
        assert_eq!(map.get_or_null("missing"), &Value::Null);
    }

    #[test]
    fn test_yaml_parsing() {
        let value = from_yaml("a: 1\nb: [x, 2.5, null]\nc: {d: true}\n").unwrap();
        let map = value.as_map().unwrap();
        assert_eq!(map.get("a"), Some(&Value::Int(1)));
        assert_eq!(
            map.get("b"),
            Some(&Value::List(vec![
                Value::from("x"),
                Value::Float(2.5),
                Value::Null
            ]))
        );
        assert!(map.get("c").unwrap().is_map());
    }

    #[test]
    fn test_scalar_keys_are_accepted() {
        let value = from_yaml("responses: {200: ok, 404: missing}\nflags: {true: x, 1.5: y}\n").unwrap();
        let map = value.as_map().unwrap();

        let responses = map.get("responses").unwrap().as_map().unwrap();
        let keys: Vec<&String> = responses.keys().collect();
        assert_eq!(keys, vec!["200", "404"]);
        assert_eq!(responses.get("404"), Some(&Value::from("missing")));

        let flags = map.get("flags").unwrap().as_map().unwrap();
        assert_eq!(flags.get("true"), Some(&Value::from("x")));
        assert_eq!(flags.get("1.5"), Some(&Value::from("y")));
    }

    #[test]
    fn test_non_scalar_keys_are_rejected() {
        assert!(from_yaml("? [a, b]\n: x\n").is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let value = from_yaml("{a: 1, b: [x, 2.5, null, true], c: {d: {}}, e: []}").unwrap();
        let json = to_json(&value).unwrap();
        assert_eq!(from_json(&json).unwrap(), value);
    }

    #[test]
    fn test_yaml_round_trip() {
        let value = from_yaml("{200: ok, b: [x, -3, 0.25, null], c: {d: [[1], {e: f}]}}").unwrap();
        let yaml = to_yaml(&value).unwrap();
        assert_eq!(from_yaml(&yaml).unwrap(), value);
    }

    #[test]
    fn test_json_parsing_matches_yaml() {
        let json = from_json(r#"{"a": 1, "b": ["x", 2.5, null]}"#).unwrap();
        let yaml = from_yaml("{a: 1, b: [x, 2.5, null]}").unwrap();
        assert_eq!(json, yaml);
    }
}
