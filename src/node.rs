//! Document model for nested data
//!
//! `Node` is the owned tree the CLI loads documents into and the richest
//! implementor of [`Traversable`](crate::access::Traversable):
//! - `Map` is keyed (string or integer keys)
//! - `List` is indexed
//! - `Object` is attributed (class name + named attributes)
//!
//! JSON documents only produce maps, lists and scalars. YAML documents can
//! also carry integer keys, and a tagged mapping (`!Container {..}`) becomes
//! an `Object` of that class.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{self, Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::error::EbbeError;

/// Mapping key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Int(i64),
    Str(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(n) => write!(f, "{n}"),
            Key::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Int(n)
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Key::Int(n) => serializer.serialize_i64(*n),
            Key::Str(s) => serializer.serialize_str(s),
        }
    }
}

/// A value exposing named attributes rather than items
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Object {
    class: String,
    attributes: BTreeMap<String, Node>,
}

impl Object {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Node>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn attribute(&self, name: &str) -> Option<&Node> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> &BTreeMap<String, Node> {
        &self.attributes
    }
}

/// Serialized as its attribute map; the class name is dropped.
impl Serialize for Object {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.attributes.len()))?;
        for (name, value) in &self.attributes {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Nested document value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    /// Integers above `i64::MAX`
    UInt(u64),
    Float(f64),
    Str(String),
    List(Vec<Node>),
    Map(BTreeMap<Key, Node>),
    Object(Object),
}

impl Node {
    /// Parse a JSON document
    pub fn from_json_str(input: &str) -> Result<Self, EbbeError> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        Ok(value.into())
    }

    /// Parse a YAML document (tagged mappings become objects)
    pub fn from_yaml_str(input: &str) -> Result<Self, EbbeError> {
        let value: serde_yaml::Value = serde_yaml::from_str(input)?;
        Node::try_from(value)
    }

    /// Short type name, used in log fields and error details
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "bool",
            Node::Int(_) | Node::UInt(_) => "int",
            Node::Float(_) => "float",
            Node::Str(_) => "string",
            Node::List(_) => "list",
            Node::Map(_) => "map",
            Node::Object(_) => "object",
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<Key, Node>> {
        match self {
            Node::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(items) => Some(items),
            _ => None,
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Null => serializer.serialize_unit(),
            Node::Bool(b) => serializer.serialize_bool(*b),
            Node::Int(n) => serializer.serialize_i64(*n),
            Node::UInt(n) => serializer.serialize_u64(*n),
            Node::Float(f) => serializer.serialize_f64(*f),
            Node::Str(s) => serializer.serialize_str(s),
            Node::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Node::Map(entries) => {
                // `1` and `'1'` would both become the JSON key "1"
                if let Some(n) = entries.keys().find_map(|key| match key {
                    Key::Int(n) if entries.contains_key(&Key::Str(n.to_string())) => Some(n),
                    _ => None,
                }) {
                    return Err(<S::Error as ser::Error>::custom(format!(
                        "key {n} appears both as an integer and as a string"
                    )));
                }

                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Node::Object(object) => object.serialize(serializer),
        }
    }
}

// ─────────────────────────────────────────────────────────────
// Conversions
// ─────────────────────────────────────────────────────────────

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Bool(b)
    }
}

impl From<i64> for Node {
    fn from(n: i64) -> Self {
        Node::Int(n)
    }
}

impl From<i32> for Node {
    fn from(n: i32) -> Self {
        Node::Int(n.into())
    }
}

impl From<f64> for Node {
    fn from(f: f64) -> Self {
        Node::Float(f)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Str(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Str(s)
    }
}

impl<T: Into<Node>> From<Vec<T>> for Node {
    fn from(items: Vec<T>) -> Self {
        Node::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<Key, Node>> for Node {
    fn from(map: BTreeMap<Key, Node>) -> Self {
        Node::Map(map)
    }
}

impl From<Object> for Node {
    fn from(object: Object) -> Self {
        Node::Object(object)
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => Node::Int(i),
                (None, Some(u)) => Node::UInt(u),
                (None, None) => Node::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Node::Str(s),
            Value::Array(items) => Node::List(items.into_iter().map(Node::from).collect()),
            Value::Object(entries) => Node::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (Key::Str(k), Node::from(v)))
                    .collect(),
            ),
        }
    }
}

impl TryFrom<serde_yaml::Value> for Node {
    type Error = EbbeError;

    fn try_from(value: serde_yaml::Value) -> Result<Self, Self::Error> {
        use serde_yaml::Value;

        Ok(match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => Node::Int(i),
                (None, Some(u)) => Node::UInt(u),
                (None, None) => Node::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Node::Str(s),
            Value::Sequence(items) => Node::List(
                items
                    .into_iter()
                    .map(Node::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Mapping(entries) => {
                let mut map = BTreeMap::new();
                for (k, v) in entries {
                    map.insert(yaml_key(k)?, Node::try_from(v)?);
                }
                Node::Map(map)
            }
            Value::Tagged(tagged) => {
                let class = tagged.tag.to_string().trim_start_matches('!').to_string();
                match tagged.value {
                    Value::Mapping(entries) => {
                        let mut object = Object::new(class);
                        for (k, v) in entries {
                            let name = yaml_key(k)?.to_string();
                            if object.attributes.insert(name.clone(), Node::try_from(v)?).is_some() {
                                return Err(EbbeError::InvalidDocument {
                                    details: format!("attribute '{name}' is defined twice"),
                                });
                            }
                        }
                        Node::Object(object)
                    }
                    // Tags on scalars and sequences carry no attributes
                    other => Node::try_from(other)?,
                }
            }
        })
    }
}

fn yaml_key(key: serde_yaml::Value) -> Result<Key, EbbeError> {
    use serde_yaml::Value;

    match key {
        Value::String(s) => Ok(Key::Str(s)),
        Value::Number(n) => Ok(match n.as_i64() {
            Some(i) => Key::Int(i),
            None => Key::Str(n.to_string()),
        }),
        Value::Bool(b) => Ok(Key::Str(b.to_string())),
        Value::Null => Ok(Key::Str("null".to_string())),
        other => Err(EbbeError::InvalidDocument {
            details: format!("mapping key must be a scalar, got {other:?}"),
        }),
    }
}
