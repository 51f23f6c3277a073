//! Access capabilities of traversable values
//!
//! Path resolution never duck-types: at each segment it asks the current
//! value which access modes it supports and dispatches on that.

use serde_json::Value;

use crate::node::{Key, Node};
use crate::path::Segment;

/// Access modes supported by a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Access {
    /// Lookup by mapping key
    pub keyed: bool,
    /// Lookup by sequence position
    pub indexed: bool,
    /// Lookup by attribute name
    pub attributed: bool,
}

impl Access {
    pub const NONE: Access = Access {
        keyed: false,
        indexed: false,
        attributed: false,
    };
    pub const KEYED: Access = Access {
        keyed: true,
        ..Access::NONE
    };
    pub const INDEXED: Access = Access {
        indexed: true,
        ..Access::NONE
    };
    pub const ATTRIBUTED: Access = Access {
        attributed: true,
        ..Access::NONE
    };

    /// Item lookup (key or index) is possible
    pub fn supports_items(&self) -> bool {
        self.keyed || self.indexed
    }
}

/// A value that path segments can descend into
///
/// `item` and `attribute` are only called when `access()` advertises the
/// matching mode; they return `None` for absent keys, out-of-range indices
/// and segments of the wrong kind.
pub trait Traversable {
    fn access(&self) -> Access;

    fn item(&self, segment: &Segment) -> Option<&Self>;

    fn attribute(&self, _name: &str) -> Option<&Self> {
        None
    }
}

/// Resolve a possibly negative index against a sequence length.
///
/// Negative indices count from the end exactly once: `-1` is the last item,
/// `-len` the first, anything further out is out of range.
pub fn normalize_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let position = if index < 0 { len + index } else { index };
    if (0..len).contains(&position) {
        usize::try_from(position).ok()
    } else {
        None
    }
}

impl Traversable for Node {
    fn access(&self) -> Access {
        match self {
            Node::Map(_) => Access::KEYED,
            Node::List(_) => Access::INDEXED,
            Node::Object(_) => Access::ATTRIBUTED,
            _ => Access::NONE,
        }
    }

    fn item(&self, segment: &Segment) -> Option<&Self> {
        match (self, segment) {
            (Node::List(items), Segment::Index(index)) => {
                items.get(normalize_index(*index, items.len())?)
            }
            // Integer keys are looked up verbatim, no wraparound
            (Node::Map(map), Segment::Index(index)) => map.get(&Key::Int(*index)),
            (Node::Map(map), Segment::Key(key)) => map.get(&Key::Str(key.clone())),
            _ => None,
        }
    }

    fn attribute(&self, name: &str) -> Option<&Self> {
        match self {
            Node::Object(object) => object.attribute(name),
            _ => None,
        }
    }
}

impl Traversable for Value {
    fn access(&self) -> Access {
        match self {
            Value::Object(_) => Access::KEYED,
            Value::Array(_) => Access::INDEXED,
            _ => Access::NONE,
        }
    }

    fn item(&self, segment: &Segment) -> Option<&Self> {
        match (self, segment) {
            (Value::Array(items), Segment::Index(index)) => {
                items.get(normalize_index(*index, items.len())?)
            }
            (Value::Object(map), Segment::Key(key)) => map.get(key),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Object;
    use serde_json::json;

    #[test]
    fn normalize_index_bounds() {
        assert_eq!(normalize_index(0, 3), Some(0));
        assert_eq!(normalize_index(2, 3), Some(2));
        assert_eq!(normalize_index(3, 3), None);
        assert_eq!(normalize_index(-1, 3), Some(2));
        assert_eq!(normalize_index(-3, 3), Some(0));
        assert_eq!(normalize_index(-4, 3), None);
        assert_eq!(normalize_index(0, 0), None);
        assert_eq!(normalize_index(i64::MIN, 3), None);
    }

    #[test]
    fn node_access_modes() {
        assert_eq!(Node::from(vec![1]).access(), Access::INDEXED);
        assert_eq!(Node::Map(Default::default()).access(), Access::KEYED);
        assert_eq!(Node::from(Object::new("C")).access(), Access::ATTRIBUTED);
        assert_eq!(Node::from("abc").access(), Access::NONE);
        assert!(!Access::ATTRIBUTED.supports_items());
    }

    #[test]
    fn node_map_integer_keys_do_not_wrap() {
        let node = Node::from_yaml_str("-1: minus-one\n0: zero\n").unwrap();
        assert_eq!(node.item(&Segment::Index(-1)), Some(&Node::from("minus-one")));
        assert_eq!(node.item(&Segment::Key("0".into())), None);
    }

    #[test]
    fn json_value_items() {
        let value = json!({"a": [1, 2, 3]});
        let list = value.item(&Segment::Key("a".into())).unwrap();
        assert_eq!(list.item(&Segment::Index(-1)), Some(&json!(3)));
        assert_eq!(list.item(&Segment::Key("0".into())), None);
        assert_eq!(value.item(&Segment::Index(0)), None);
        assert_eq!(value.attribute("a"), None);
    }
}
