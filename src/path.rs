//! Path resolution over nested values
//!
//! A path is a list of segments (keys or integer indices) walked left to
//! right against any [`Traversable`] value:
//! - `["a", "b", -1]` (segments, see [`segments!`](crate::segments))
//! - `"a.b.-1"` (text, split on `split_char`, indices parsed on demand)
//!
//! Resolution is total: absent keys, out-of-range indices and values that
//! do not support the needed access mode all resolve to `None`, never to an
//! error. Only malformed invocations (a text path without a split
//! character) fail.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::access::Traversable;
use crate::error::EbbeError;

/// Signed integer token, as accepted by `parse_indices`
static INDEX_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?[0-9]+$").unwrap());

/// One unit of a path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Mapping key, or attribute name in attribute mode
    Key(String),
    /// Sequence position (negative counts from the end) or integer key
    Index(i64),
}

impl Segment {
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Segment::Key(key) => Some(key),
            Segment::Index(_) => None,
        }
    }

    /// Turn a numeric-looking key into an index. Tokens overflowing `i64`
    /// stay keys.
    fn coerce_index(self) -> Self {
        match self {
            Segment::Key(key) if INDEX_TOKEN.is_match(&key) => match key.parse() {
                Ok(index) => Segment::Index(index),
                Err(_) => Segment::Key(key),
            },
            other => other,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => f.write_str(key),
            Segment::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::Key(key.to_string())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Segment::Key(key)
    }
}

impl From<i64> for Segment {
    fn from(index: i64) -> Self {
        Segment::Index(index)
    }
}

impl From<i32> for Segment {
    fn from(index: i32) -> Self {
        Segment::Index(index.into())
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Segment::Index(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

/// Build a `Vec<Segment>` from mixed key and index literals
///
/// ```
/// use ebbe::{segments, Segment};
///
/// let path = segments!["a", "b", -1];
/// assert_eq!(path[2], Segment::Index(-1));
/// ```
#[macro_export]
macro_rules! segments {
    ($($segment:expr),* $(,)?) => {
        vec![$($crate::Segment::from($segment)),*]
    };
}

/// A path as supplied by the caller, before parsing
#[derive(Debug, Clone, PartialEq)]
pub enum PathSpec {
    Segments(Vec<Segment>),
    /// Needs `split_char`
    Text(String),
}

impl From<&str> for PathSpec {
    fn from(text: &str) -> Self {
        PathSpec::Text(text.to_string())
    }
}

impl From<String> for PathSpec {
    fn from(text: String) -> Self {
        PathSpec::Text(text)
    }
}

impl From<Vec<Segment>> for PathSpec {
    fn from(segments: Vec<Segment>) -> Self {
        PathSpec::Segments(segments)
    }
}

impl From<&[Segment]> for PathSpec {
    fn from(segments: &[Segment]) -> Self {
        PathSpec::Segments(segments.to_vec())
    }
}

impl<const N: usize> From<[Segment; N]> for PathSpec {
    fn from(segments: [Segment; N]) -> Self {
        PathSpec::Segments(segments.into())
    }
}

/// Options shared by path parsing and resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathOptions {
    /// Let key segments resolve against object attributes
    pub attributes: bool,
    /// Attempt item lookup (keys and indices); off skips straight to
    /// attributes or the default
    pub items: bool,
    /// Separator for text paths
    pub split_char: Option<char>,
    /// Convert numeric-looking key segments into indices
    pub parse_indices: bool,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            attributes: false,
            items: true,
            split_char: None,
            parse_indices: false,
        }
    }
}

impl PathOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attributes(mut self, enabled: bool) -> Self {
        self.attributes = enabled;
        self
    }

    pub fn items(mut self, enabled: bool) -> Self {
        self.items = enabled;
        self
    }

    pub fn split_char(mut self, split_char: char) -> Self {
        self.split_char = Some(split_char);
        self
    }

    pub fn parse_indices(mut self, enabled: bool) -> Self {
        self.parse_indices = enabled;
        self
    }
}

/// A parsed path, ready to resolve against any number of targets
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Parse a path spec: split text paths and coerce index tokens.
    pub fn parse(spec: impl Into<PathSpec>, options: &PathOptions) -> Result<Self, EbbeError> {
        let segments: Vec<Segment> = match spec.into() {
            PathSpec::Segments(segments) => segments,
            PathSpec::Text(text) => {
                let Some(split_char) = options.split_char else {
                    return Err(EbbeError::MissingSplitChar { path: text });
                };
                text.split(split_char).map(Segment::from).collect()
            }
        };

        let segments = if options.parse_indices {
            segments.into_iter().map(Segment::coerce_index).collect()
        } else {
            segments
        };

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Walk the path. `None` means some segment did not resolve.
    pub fn resolve<'a, T>(&self, target: &'a T, options: &PathOptions) -> Option<&'a T>
    where
        T: Traversable + ?Sized,
    {
        let mut current = target;

        for (depth, segment) in self.segments.iter().enumerate() {
            match step(current, segment, options) {
                Some(next) => current = next,
                None => {
                    trace!(path = %self, depth, segment = %segment, "path did not resolve");
                    return None;
                }
            }
        }

        Some(current)
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// Descend one segment: items first, then attributes.
fn step<'a, T>(current: &'a T, segment: &Segment, options: &PathOptions) -> Option<&'a T>
where
    T: Traversable + ?Sized,
{
    let access = current.access();

    if options.items && access.supports_items() {
        if let Some(next) = current.item(segment) {
            return Some(next);
        }
        if !options.attributes {
            return None;
        }
    }

    if options.attributes && access.attributed {
        return segment.as_key().and_then(|name| current.attribute(name));
    }

    None
}

/// Parse and resolve a path in one step
pub fn getpath<'a, T, P>(
    target: &'a T,
    path: P,
    options: &PathOptions,
) -> Result<Option<&'a T>, EbbeError>
where
    T: Traversable + ?Sized,
    P: Into<PathSpec>,
{
    Ok(Path::parse(path, options)?.resolve(target, options))
}

/// [`getpath`] with an explicit default for unresolved paths
pub fn getpath_or<'a, T, P>(
    target: &'a T,
    path: P,
    default: &'a T,
    options: &PathOptions,
) -> Result<&'a T, EbbeError>
where
    T: Traversable + ?Sized,
    P: Into<PathSpec>,
{
    Ok(getpath(target, path, options)?.unwrap_or(default))
}

/// Single item lookup (no attributes)
pub fn get<'a, T>(target: &'a T, segment: impl Into<Segment>) -> Option<&'a T>
where
    T: Traversable + ?Sized,
{
    if !target.access().supports_items() {
        return None;
    }
    target.item(&segment.into())
}

pub fn get_or<'a, T>(target: &'a T, segment: impl Into<Segment>, default: &'a T) -> &'a T
where
    T: Traversable + ?Sized,
{
    get(target, segment).unwrap_or(default)
}
