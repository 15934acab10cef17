//! Document tree operations: locating, deleting, and merging nodes.

pub mod merge;
pub mod path;
pub mod walker;

pub use merge::{merge, merge_at, merge_tables};
pub use path::{Breadcrumbs, Segment};
pub use walker::{delete, find, ExtendSite};
