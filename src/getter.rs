//! Reusable getters built from pre-parsed paths
//!
//! `PathGetter` parses its paths once and applies them to any number of
//! targets. `Getter` is the single-key flavour.

use tracing::debug;

use crate::access::Traversable;
use crate::error::EbbeError;
use crate::path::{get, Path, PathOptions, PathSpec, Segment};

/// Values produced by a [`PathGetter`] call
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<'a, T: ?Sized> {
    /// Exactly one path was declared
    One(Option<&'a T>),
    /// One slot per declared path, in declaration order
    Many(Vec<Option<&'a T>>),
}

impl<'a, T: ?Sized> Resolved<'a, T> {
    /// The value of a single-path result.
    ///
    /// Always `None` for `Many`, whatever its slots hold; read multi-path
    /// results with [`Resolved::into_vec`].
    pub fn one(self) -> Option<&'a T> {
        match self {
            Resolved::One(value) => value,
            Resolved::Many(_) => None,
        }
    }

    pub fn into_vec(self) -> Vec<Option<&'a T>> {
        match self {
            Resolved::One(value) => vec![value],
            Resolved::Many(values) => values,
        }
    }
}

/// Applies one or more paths with shared options
#[derive(Debug, Clone)]
pub struct PathGetter<T> {
    paths: Vec<Path>,
    options: PathOptions,
    default: Option<T>,
}

impl<T: Traversable> PathGetter<T> {
    /// Parse every path up front. Fails on zero paths or a malformed path.
    pub fn new<I, P>(paths: I, options: PathOptions) -> Result<Self, EbbeError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathSpec>,
    {
        let paths = paths
            .into_iter()
            .map(|spec| Path::parse(spec, &options))
            .collect::<Result<Vec<_>, _>>()?;

        if paths.is_empty() {
            return Err(EbbeError::NoPaths);
        }

        debug!(paths = paths.len(), ?options, "built path getter");

        Ok(Self {
            paths,
            options,
            default: None,
        })
    }

    /// Value returned for unresolved paths when no call-time default is given
    pub fn with_default(mut self, default: T) -> Self {
        self.default = Some(default);
        self
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn get<'a>(&'a self, target: &'a T) -> Resolved<'a, T> {
        self.apply(target, self.default.as_ref())
    }

    /// Like [`get`](Self::get), with `default` replacing the factory default
    /// for this call only
    pub fn get_or<'a>(&'a self, target: &'a T, default: &'a T) -> Resolved<'a, T> {
        self.apply(target, Some(default))
    }

    fn apply<'a>(&'a self, target: &'a T, default: Option<&'a T>) -> Resolved<'a, T> {
        let resolve = |path: &Path| path.resolve(target, &self.options).or(default);

        match self.paths.as_slice() {
            [single] => Resolved::One(resolve(single)),
            many => Resolved::Many(many.iter().map(resolve).collect()),
        }
    }
}

/// Single-key item getter with an optional default
#[derive(Debug, Clone)]
pub struct Getter<T> {
    segment: Segment,
    default: Option<T>,
}

impl<T: Traversable> Getter<T> {
    pub fn new(segment: impl Into<Segment>) -> Self {
        Self {
            segment: segment.into(),
            default: None,
        }
    }

    pub fn with_default(mut self, default: T) -> Self {
        self.default = Some(default);
        self
    }

    pub fn get<'a>(&'a self, target: &'a T) -> Option<&'a T> {
        get(target, self.segment.clone()).or(self.default.as_ref())
    }

    pub fn get_or<'a>(&'a self, target: &'a T, default: &'a T) -> &'a T {
        get(target, self.segment.clone()).unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use crate::path::tests::nested;
    use crate::segments;
    use serde_json::json;

    fn getter(path: impl Into<PathSpec>, options: PathOptions) -> PathGetter<Node> {
        PathGetter::new([path.into()], options).unwrap()
    }

    #[test]
    fn requires_at_least_one_path() {
        let empty: Vec<PathSpec> = Vec::new();
        let err = PathGetter::<Node>::new(empty, PathOptions::default()).unwrap_err();
        assert!(matches!(err, EbbeError::NoPaths));
    }

    #[test]
    fn malformed_paths_fail_at_construction() {
        let err = PathGetter::<Node>::new(["a.b"], PathOptions::default()).unwrap_err();
        assert!(matches!(err, EbbeError::MissingSplitChar { .. }));
    }

    #[test]
    fn single_path() {
        let doc = nested();
        let o = PathOptions::default();

        assert_eq!(getter(segments!["a", "d", "e"], o.clone()).get(&doc).one(), Some(&Node::Int(5)));
        assert_eq!(getter(segments!["a", "d", "e"], o.clone().items(false)).get(&doc).one(), None);
        assert_eq!(getter(segments!["a", "c"], o.clone()).get(&doc), Resolved::One(None));
        assert_eq!(
            getter(segments!["a", "c"], o.clone()).get_or(&doc, &Node::Int(67)).one(),
            Some(&Node::Int(67))
        );
        assert_eq!(
            getter(segments!["a", "b", -1, "f", -1], o.clone()).get(&doc).one(),
            Some(&Node::Int(3))
        );
        assert_eq!(
            getter(segments!["a", "d", "g", "numbers", 1], o.clone()).get(&doc).one(),
            None
        );
        assert_eq!(
            getter(segments!["a", "d", "g", "numbers", 1], o.attributes(true)).get(&doc).one(),
            Some(&Node::Int(5))
        );
    }

    #[test]
    fn text_paths() {
        let doc = nested();
        let split = PathOptions::new().split_char('.');

        assert_eq!(getter("a.d.e", split.clone()).get(&doc).one(), Some(&Node::Int(5)));
        assert_eq!(
            getter("a§d§e", PathOptions::new().split_char('§')).get(&doc).one(),
            Some(&Node::Int(5))
        );
        assert_eq!(
            getter("a.b.-1.f.-1", split.parse_indices(true)).get(&doc).one(),
            Some(&Node::Int(3))
        );
    }

    #[test]
    fn several_paths_resolve_in_declaration_order() {
        let doc = nested();
        let getter = PathGetter::new(
            [segments!["a", "d", "e"], segments!["a", "c"], segments!["a", "b", 1]],
            PathOptions::default(),
        )
        .unwrap();

        assert_eq!(
            getter.get(&doc),
            Resolved::Many(vec![Some(&Node::Int(5)), None, Some(&Node::Int(45))])
        );
        assert_eq!(getter.paths().len(), 3);
    }

    #[test]
    fn factory_default_and_call_override() {
        let getter = PathGetter::new([segments!["a", "d", "e"]], PathOptions::default())
            .unwrap()
            .with_default(json!(1337));

        assert_eq!(getter.get(&json!({"a": {"d": {"e": 5}}})).one(), Some(&json!(5)));
        assert_eq!(getter.get(&json!({})).one(), Some(&json!(1337)));
        assert_eq!(getter.get_or(&json!({}), &json!(1)).one(), Some(&json!(1)));
        // The override does not stick
        assert_eq!(getter.get(&json!({})).one(), Some(&json!(1337)));
    }

    #[test]
    fn resolved_shapes() {
        let a = json!(1);
        assert_eq!(Resolved::One(Some(&a)).into_vec(), vec![Some(&a)]);
        assert_eq!(Resolved::Many(vec![Some(&a), Some(&a)]).one(), None);
        assert_eq!(
            Resolved::Many(vec![Some(&a), None]).into_vec(),
            vec![Some(&a), None]
        );
    }

    #[test]
    fn single_key_getter() {
        let doc = nested();

        assert_eq!(Getter::new("t").get(&doc), Some(&Node::Int(32)));
        assert_eq!(Getter::new("l").get(&doc), None);
        assert_eq!(Getter::new("l").with_default(Node::Int(27)).get(&doc), Some(&Node::Int(27)));
        assert_eq!(Getter::new("l").get_or(&doc, &Node::Int(28)), &Node::Int(28));
        assert_eq!(
            Getter::new("l").with_default(Node::Int(27)).get_or(&doc, &Node::Int(28)),
            &Node::Int(28)
        );
    }
}
