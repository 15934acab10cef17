//! Deep search over document trees.
//!
//! [`find`] yields every place where a table holds a member with a given name,
//! at any depth. It keeps no state between calls, so callers can mutate the
//! document and search again.

use crate::error::ResolveError;
use crate::tree::path::{Breadcrumbs, Segment};
use std::iter::Enumerate;
use std::slice;
use toml::{Table, Value};

/// A location where the extend key was found
#[derive(Debug, Clone, PartialEq)]
pub struct ExtendSite {
    /// Path to the table holding the extend key
    pub breadcrumbs: Breadcrumbs,
    /// Raw value of the extend key
    pub value: Value,
}

/// Lazily walk `document` and yield every table member named `key`.
///
/// Traversal is depth-first in member order. A table's own match is yielded
/// after every match nested below it. The value of a matching member is not
/// searched.
pub fn find<'a>(document: &'a Table, key: &'a str) -> Find<'a> {
    Find {
        key,
        stack: vec![Frame::Table {
            path: Breadcrumbs::root(),
            members: document.iter(),
            own: None,
        }],
    }
}

/// Iterator returned by [`find`]
pub struct Find<'a> {
    key: &'a str,
    stack: Vec<Frame<'a>>,
}

enum Frame<'a> {
    Table {
        path: Breadcrumbs,
        members: toml::map::Iter<'a>,
        /// Match held back until the table's members are exhausted
        own: Option<&'a Value>,
    },
    Array {
        path: Breadcrumbs,
        elements: Enumerate<slice::Iter<'a, Value>>,
    },
}

impl<'a> Frame<'a> {
    fn for_value(path: Breadcrumbs, value: &'a Value) -> Option<Self> {
        match value {
            Value::Table(table) => Some(Frame::Table {
                path,
                members: table.iter(),
                own: None,
            }),
            Value::Array(array) => Some(Frame::Array {
                path,
                elements: array.iter().enumerate(),
            }),
            _ => None,
        }
    }
}

enum Step<'a> {
    Yield(ExtendSite),
    Descend(Frame<'a>),
    Pop,
    Continue,
}

impl<'a> Iterator for Find<'a> {
    type Item = ExtendSite;

    fn next(&mut self) -> Option<ExtendSite> {
        loop {
            let key = self.key;
            let step = match self.stack.last_mut()? {
                Frame::Table { path, members, own } => match members.next() {
                    None => match own.take() {
                        Some(value) => Step::Yield(ExtendSite {
                            breadcrumbs: path.clone(),
                            value: value.clone(),
                        }),
                        None => Step::Pop,
                    },
                    Some((name, content)) if name == key => {
                        *own = Some(content);
                        Step::Continue
                    }
                    Some((name, content)) => {
                        match Frame::for_value(path.child(name.as_str()), content) {
                            Some(frame) => Step::Descend(frame),
                            None => Step::Continue,
                        }
                    }
                },
                Frame::Array { path, elements } => match elements.next() {
                    None => Step::Pop,
                    Some((index, element)) => match Frame::for_value(path.child(index), element) {
                        Some(frame) => Step::Descend(frame),
                        None => Step::Continue,
                    },
                },
            };

            match step {
                Step::Yield(site) => return Some(site),
                Step::Descend(frame) => self.stack.push(frame),
                Step::Pop => {
                    self.stack.pop();
                }
                Step::Continue => {}
            }
        }
    }
}

/// Follow `breadcrumbs` from the document root
pub fn get<'a>(document: &'a Table, breadcrumbs: &Breadcrumbs) -> Option<&'a Value> {
    let (first, rest) = breadcrumbs.segments().split_first()?;
    let mut current = match first {
        Segment::Key(key) => document.get(key)?,
        Segment::Index(_) => return None,
    };
    for segment in rest {
        current = child(current, segment)?;
    }
    Some(current)
}

/// Mutable variant of [`get`]
pub fn get_mut<'a>(document: &'a mut Table, breadcrumbs: &Breadcrumbs) -> Option<&'a mut Value> {
    let (first, rest) = breadcrumbs.segments().split_first()?;
    let mut current = match first {
        Segment::Key(key) => document.get_mut(key)?,
        Segment::Index(_) => return None,
    };
    for segment in rest {
        current = child_mut(current, segment)?;
    }
    Some(current)
}

pub(crate) fn child<'a>(value: &'a Value, segment: &Segment) -> Option<&'a Value> {
    match (value, segment) {
        (Value::Table(table), Segment::Key(key)) => table.get(key),
        (Value::Array(array), Segment::Index(index)) => array.get(*index),
        _ => None,
    }
}

pub(crate) fn child_mut<'a>(value: &'a mut Value, segment: &Segment) -> Option<&'a mut Value> {
    match (value, segment) {
        (Value::Table(table), Segment::Key(key)) => table.get_mut(key),
        (Value::Array(array), Segment::Index(index)) => array.get_mut(*index),
        _ => None,
    }
}

/// Remove member `key` from the table located at `breadcrumbs`.
///
/// Returns the removed value. Fails when any segment is absent, when the
/// location is not a table, or when the table has no member `key`.
pub fn delete(
    document: &mut Table,
    breadcrumbs: &Breadcrumbs,
    key: &str,
) -> Result<Value, ResolveError> {
    let missing = || ResolveError::MissingPath {
        path: breadcrumbs.child(key).to_string(),
    };

    let table = if breadcrumbs.is_root() {
        document
    } else {
        get_mut(document, breadcrumbs)
            .and_then(Value::as_table_mut)
            .ok_or_else(missing)?
    };

    table.remove(key).ok_or_else(missing)
}
