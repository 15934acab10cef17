//! Type-dispatched deep merge of document trees.
//!
//! The destination (`current`) always belongs to the more specific document,
//! so on scalar conflicts it keeps its own value. Arrays concatenate and
//! tables union recursively.

use crate::error::ResolveError;
use crate::tree::path::{Breadcrumbs, Segment};
use crate::tree::walker::{child, child_mut};
use toml::{Table, Value};

/// Human-readable name of a node kind, used in merge errors
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::String(_) => "string",
        Value::Integer(_) => "integer",
        Value::Float(_) => "float",
        Value::Boolean(_) => "boolean",
        Value::Datetime(_) => "datetime",
        Value::Array(array) if !array.is_empty() && array.iter().all(Value::is_table) => {
            "array of tables"
        }
        Value::Array(_) => "array",
        Value::Table(_) => "table",
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Table(_))
}

/// Empty container of the same kind as `value`; scalars have none
pub fn skeleton_of(value: &Value) -> Option<Value> {
    match value {
        Value::Table(_) => Some(Value::Table(Table::new())),
        Value::Array(_) => Some(Value::Array(Vec::new())),
        _ => None,
    }
}

/// Merge `incoming` into `current` in place.
pub fn merge(current: &mut Value, incoming: Value) -> Result<(), ResolveError> {
    match (current, incoming) {
        (Value::Array(current), Value::Array(incoming)) => {
            current.extend(incoming);
            Ok(())
        }
        (Value::Table(current), Value::Table(incoming)) => merge_tables(current, incoming),
        (current, incoming) if is_scalar(current) && is_scalar(&incoming) => Ok(()),
        (current, incoming) => Err(ResolveError::MergeType {
            current: kind_of(current),
            incoming: kind_of(&incoming),
        }),
    }
}

/// Table/table rule: adopt absent members, merge shared ones.
pub fn merge_tables(current: &mut Table, incoming: Table) -> Result<(), ResolveError> {
    for (key, value) in incoming {
        match current.get_mut(&key) {
            Some(existing) => merge(existing, value)?,
            None => {
                current.insert(key, value);
            }
        }
    }
    Ok(())
}

/// Merge the content found at `breadcrumbs` in `incoming` into the same
/// location of `document`.
///
/// Containers missing from `document` along the way are created empty, of
/// the same kind as their `incoming` counterpart. Empty breadcrumbs merge the
/// whole documents.
pub fn merge_at(
    document: &mut Table,
    incoming: Table,
    breadcrumbs: &Breadcrumbs,
) -> Result<(), ResolveError> {
    if breadcrumbs.is_root() {
        return merge_tables(document, incoming);
    }

    let mut root = Value::Table(std::mem::take(document));
    let result = merge_at_value(&mut root, Value::Table(incoming), breadcrumbs.segments());
    if let Value::Table(table) = root {
        *document = table;
    }
    result
}

fn merge_at_value(
    root: &mut Value,
    mut incoming: Value,
    segments: &[Segment],
) -> Result<(), ResolveError> {
    let prefix = |upto: usize| Breadcrumbs::from(segments[..upto].to_vec()).to_string();
    let Some((last, parents)) = segments.split_last() else {
        return merge(root, incoming);
    };

    // Detach the incoming subtree. The leaf slot is left empty; only its
    // ancestors are consulted below.
    let mut node = &mut incoming;
    for (depth, segment) in segments.iter().enumerate() {
        node = child_mut(node, segment).ok_or_else(|| ResolveError::MissingPath {
            path: format!("{} (in referenced document)", prefix(depth + 1)),
        })?;
    }
    let incoming_value = std::mem::replace(node, Value::Table(Table::new()));

    let mut location = root;
    for (depth, segment) in parents.iter().enumerate() {
        if let (Value::Table(table), Segment::Key(key)) = (&mut *location, segment) {
            if !table.contains_key(key) {
                let template = lookup(&incoming, &segments[..=depth]).ok_or_else(|| {
                    ResolveError::MissingPath {
                        path: format!("{} (in referenced document)", prefix(depth + 1)),
                    }
                })?;
                let skeleton = skeleton_of(template).ok_or(ResolveError::MergeType {
                    current: "table",
                    incoming: kind_of(template),
                })?;
                table.insert(key.clone(), skeleton);
            }
        }
        if !steps_into(location, segment) {
            return Err(blocked(location, &incoming, &segments[..depth]));
        }
        location = child_mut(location, segment).ok_or_else(|| ResolveError::MissingPath {
            path: prefix(depth + 1),
        })?;
    }

    if !steps_into(location, last) {
        return Err(blocked(location, &incoming, parents));
    }
    match (location, last) {
        (Value::Table(table), Segment::Key(key)) => match table.get_mut(key) {
            Some(existing) => merge(existing, incoming_value),
            None => {
                table.insert(key.clone(), incoming_value);
                Ok(())
            }
        },
        (Value::Array(array), Segment::Index(index)) => match array.get_mut(*index) {
            Some(existing) => merge(existing, incoming_value),
            None => Err(ResolveError::MissingPath {
                path: prefix(segments.len()),
            }),
        },
        _ => Err(ResolveError::MissingPath {
            path: prefix(segments.len()),
        }),
    }
}

/// Whether `segment` addresses a child of a container of `value`'s kind
fn steps_into(value: &Value, segment: &Segment) -> bool {
    matches!(
        (value, segment),
        (Value::Table(_), Segment::Key(_)) | (Value::Array(_), Segment::Index(_))
    )
}

/// Type error for a destination node that cannot hold the incoming path
fn blocked(location: &Value, incoming: &Value, segments: &[Segment]) -> ResolveError {
    ResolveError::MergeType {
        current: kind_of(location),
        incoming: lookup(incoming, segments).map_or("table", kind_of),
    }
}

fn lookup<'a>(value: &'a Value, segments: &[Segment]) -> Option<&'a Value> {
    segments
        .iter()
        .try_fold(value, |node, segment| child(node, segment))
}
