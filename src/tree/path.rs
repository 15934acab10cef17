//! Breadcrumbs: locations inside a document tree

use serde::Serialize;
use std::fmt;

/// One step from a container to one of its children
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum Segment {
    /// Member of a table
    Key(String),
    /// Element of an array
    Index(usize),
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

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Segment::Index(index)
    }
}

/// Ordered path of segments from the document root.
///
/// Ordering is lexicographic over segments, which is the order extend sites
/// are resolved in during a pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Breadcrumbs(Vec<Segment>);

impl Breadcrumbs {
    /// The document root
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// New breadcrumbs with `segment` appended
    pub fn child(&self, segment: impl Into<Segment>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }
}

impl From<Vec<Segment>> for Breadcrumbs {
    fn from(segments: Vec<Segment>) -> Self {
        Self(segments)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => write!(f, "{}", key),
            Segment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

impl fmt::Display for Breadcrumbs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Key(key) if i > 0 => write!(f, ".{}", key)?,
                other => write!(f, "{}", other)?,
            }
        }
        Ok(())
    }
}

/// Build breadcrumbs from a list of segments.
///
/// ```
/// use drytoml::crumbs;
/// let path = crumbs!["tool", "black"];
/// assert_eq!(path.to_string(), "tool.black");
/// ```
#[macro_export]
macro_rules! crumbs {
    () => { $crate::tree::path::Breadcrumbs::root() };
    ($($segment:expr),+ $(,)?) => {
        $crate::tree::path::Breadcrumbs::from(vec![
            $($crate::tree::path::Segment::from($segment)),+
        ])
    };
}
