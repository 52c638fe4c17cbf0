//! Addressing nodes inside a widget's option tree.
//!
//! A path is a list of steps from the option root: `Key` steps into a mapping,
//! `Index` into a sequence. Textual form is `feeds[0].url`.

use std::fmt;

use crate::error::{GlanceError, Result};
use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    Key(String),
    Index(usize),
}

impl PathStep {
    pub fn key(key: impl Into<String>) -> Self {
        PathStep::Key(key.into())
    }

    /// Render a path as `a.b[2].c`; the empty path is `<root>`.
    pub fn display_path(path: &[PathStep]) -> String {
        if path.is_empty() {
            return "<root>".to_string();
        }
        let mut out = String::new();
        for step in path {
            match step {
                PathStep::Key(k) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(k);
                }
                PathStep::Index(i) => {
                    out.push_str(&format!("[{i}]"));
                }
            }
        }
        out
    }

    /// Parse `feeds[0].url` into steps. Keys may not be empty; an index must
    /// be a non-negative integer inside brackets.
    pub fn parse_path(text: &str) -> Result<Vec<PathStep>> {
        let text = text.trim();
        let invalid = || GlanceError::PathNotFound {
            path: text.to_string(),
        };

        let mut steps = Vec::new();
        let mut chars = text.chars().peekable();
        let mut key = String::new();
        let mut expect_key = true;

        while let Some(c) = chars.next() {
            match c {
                '.' => {
                    if key.is_empty() && expect_key {
                        return Err(invalid());
                    }
                    if !key.is_empty() {
                        steps.push(PathStep::Key(std::mem::take(&mut key)));
                    }
                    expect_key = true;
                }
                '[' => {
                    if !key.is_empty() {
                        steps.push(PathStep::Key(std::mem::take(&mut key)));
                    } else if steps.is_empty() {
                        return Err(invalid());
                    }
                    let mut digits = String::new();
                    loop {
                        match chars.next() {
                            Some(']') => break,
                            Some(d) if d.is_ascii_digit() => digits.push(d),
                            _ => return Err(invalid()),
                        }
                    }
                    let index = digits.parse::<usize>().map_err(|_| invalid())?;
                    steps.push(PathStep::Index(index));
                    expect_key = false;
                }
                ']' => return Err(invalid()),
                other => {
                    key.push(other);
                    expect_key = false;
                }
            }
        }

        if !key.is_empty() {
            steps.push(PathStep::Key(key));
        } else if expect_key {
            return Err(invalid());
        }

        Ok(steps)
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Key(k) => write!(f, "{k}"),
            PathStep::Index(i) => write!(f, "[{i}]"),
        }
    }
}

/// Follow `path` from `root`. The empty path resolves to `root` itself.
pub fn resolve<'a>(root: &'a Value, path: &[PathStep]) -> Result<&'a Value> {
    let mut node = root;
    for (depth, step) in path.iter().enumerate() {
        node = match (node, step) {
            (Value::Mapping(map), PathStep::Key(k)) => map
                .get(k)
                .ok_or_else(|| GlanceError::path_not_found(&path[..=depth]))?,
            (Value::Sequence(items), PathStep::Index(i)) => items
                .get(*i)
                .ok_or_else(|| GlanceError::path_not_found(&path[..=depth]))?,
            (Value::Mapping(_) | Value::Sequence(_), _) => {
                return Err(GlanceError::path_not_found(&path[..=depth]))
            }
            _ => return Err(GlanceError::not_a_container(&path[..depth])),
        };
    }
    Ok(node)
}

fn resolve_mut<'a>(root: &'a mut Value, path: &[PathStep]) -> Result<&'a mut Value> {
    let mut node = root;
    for (depth, step) in path.iter().enumerate() {
        node = match (node, step) {
            (Value::Mapping(map), PathStep::Key(k)) => map
                .get_mut(k)
                .ok_or_else(|| GlanceError::path_not_found(&path[..=depth]))?,
            (Value::Sequence(items), PathStep::Index(i)) => items
                .get_mut(*i)
                .ok_or_else(|| GlanceError::path_not_found(&path[..=depth]))?,
            (Value::Mapping(_) | Value::Sequence(_), _) => {
                return Err(GlanceError::path_not_found(&path[..=depth]))
            }
            _ => return Err(GlanceError::not_a_container(&path[..depth])),
        };
    }
    Ok(node)
}

fn split_last(path: &[PathStep]) -> Result<(&[PathStep], &PathStep)> {
    match path.split_last() {
        Some((last, parent)) => Ok((parent, last)),
        None => Err(GlanceError::path_not_found(path)),
    }
}

/// Create a new node at `path`.
///
/// A trailing `Key` adds a mapping entry and fails on a duplicate key. A
/// trailing `Index` inserts into a sequence at that position (equal to the
/// length appends); larger indices fail so the sequence never has gaps.
pub fn insert(root: &mut Value, path: &[PathStep], value: Value) -> Result<()> {
    let (parent_path, last) = split_last(path)?;
    let parent = resolve_mut(root, parent_path)?;
    match (parent, last) {
        (Value::Mapping(map), PathStep::Key(k)) => {
            if map.contains_key(k) {
                return Err(GlanceError::duplicate_key(k.clone(), parent_path));
            }
            map.insert(k.clone(), value);
            Ok(())
        }
        (Value::Sequence(items), PathStep::Index(i)) => {
            if *i > items.len() {
                return Err(GlanceError::path_not_found(path));
            }
            items.insert(*i, value);
            Ok(())
        }
        (Value::Mapping(_) | Value::Sequence(_), _) => Err(GlanceError::path_not_found(path)),
        _ => Err(GlanceError::not_a_container(parent_path)),
    }
}

/// Replace the existing node at `path`, returning the previous value.
pub fn replace(root: &mut Value, path: &[PathStep], value: Value) -> Result<Value> {
    if path.is_empty() {
        return Err(GlanceError::path_not_found(path));
    }
    let node = resolve_mut(root, path)?;
    Ok(std::mem::replace(node, value))
}

/// Remove the node at `path`. Mapping entries keep the order of their
/// siblings; sequence elements after the removed one shift down by one.
pub fn remove(root: &mut Value, path: &[PathStep]) -> Result<Value> {
    let (parent_path, last) = split_last(path)?;
    let parent = resolve_mut(root, parent_path)?;
    match (parent, last) {
        (Value::Mapping(map), PathStep::Key(k)) => map
            .shift_remove(k)
            .ok_or_else(|| GlanceError::path_not_found(path)),
        (Value::Sequence(items), PathStep::Index(i)) => {
            if *i >= items.len() {
                return Err(GlanceError::path_not_found(path));
            }
            Ok(items.remove(*i))
        }
        (Value::Mapping(_) | Value::Sequence(_), _) => Err(GlanceError::path_not_found(path)),
        _ => Err(GlanceError::not_a_container(parent_path)),
    }
}
