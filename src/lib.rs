//! ebbe - helpers for nested data, grouping and timing
//!
//! - `getpath` / `PathGetter`: resolve key/index/attribute paths with defaults
//! - `grouped` / `partitioned`: bucket sequences by derived keys
//! - `pick` / `omit`: filtered copies of mappings
//! - `indexed`: map sequences by position or derived key
//! - `sorted_uniq`: sort with de-duplication
//! - `Timer`: report elapsed time when a scope ends

pub mod access;
pub mod error;
pub mod format;
pub mod getter;
pub mod grouping;
pub mod indexed;
pub mod mapping;
pub mod node;
pub mod path;
pub mod sorting;
pub mod timer;

pub use access::{Access, Traversable};
pub use error::{EbbeError, ErrorKind, FixSuggestion};
pub use format::{format_duration, Precision};
pub use getter::{Getter, PathGetter, Resolved};
pub use grouping::{
    grouped, grouped_by, grouped_items, partitioned, partitioned_by, partitioned_items, Bucket,
};
pub use indexed::{indexed, indexed_by, indexed_into, indexed_strict};
pub use mapping::{omit, pick};
pub use node::{Key, Node, Object};
pub use path::{get, get_or, getpath, getpath_or, Path, PathOptions, PathSpec, Segment};
pub use sorting::{sorted_uniq, sorted_uniq_by_key};
pub use timer::{Timer, TimerOptions};
