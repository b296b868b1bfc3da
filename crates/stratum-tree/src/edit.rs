use serde_json::{Map, Value};

use crate::error::{TreeError, TreeResult};
use crate::location::{Location, Segment};

/// Look up the value at `location`, if the path exists.
pub fn get<'a>(root: &'a Value, location: &Location) -> Option<&'a Value> {
    let mut node = root;
    for segment in location.segments() {
        node = match segment {
            Segment::Key(name) => node.get(name.as_str())?,
            Segment::Index(index) => node.get(index)?,
        };
    }
    Some(node)
}

/// Mutable counterpart of [`get`].
pub fn get_mut<'a>(root: &'a mut Value, location: &Location) -> Option<&'a mut Value> {
    location
        .segments()
        .iter()
        .try_fold(root, |node, segment| match segment {
            Segment::Key(name) => node.get_mut(name.as_str()),
            Segment::Index(index) => node.get_mut(index),
        })
}

/// Overwrite the value at `location` in place.
///
/// Every intermediate container on the path must already exist, which is
/// guaranteed when the location came from [`find_key`](crate::find_key)
/// over the same tree shape. Fails with [`TreeError::PathNotFound`]
/// otherwise.
pub fn set(root: &mut Value, location: &Location, value: Value) -> TreeResult<()> {
    let slot = get_mut(root, location).ok_or_else(|| TreeError::PathNotFound(location.clone()))?;
    *slot = value;
    Ok(())
}

/// Apply a batch of location/value overwrites in order.
pub fn write(root: &mut Value, entries: Vec<(Location, Value)>) -> TreeResult<()> {
    for (location, value) in entries {
        set(root, &location, value)?;
    }
    Ok(())
}

/// Look up a value by dotted path (`"a.b.c"`).
///
/// Each dot-separated segment names a mapping key; against a sequence an
/// all-digit segment is used as an index instead.
pub fn get_dotted<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut node = root;
    for segment in path.split('.') {
        node = match node {
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => node.get(segment)?,
        };
    }
    Some(node)
}

/// Set a value by dotted path, creating missing intermediate mappings.
///
/// Fails with [`TreeError::NotAContainer`] when an intermediate exists but
/// is not a mapping or sequence.
pub fn set_dotted(root: &mut Value, path: &str, value: Value) -> TreeResult<()> {
    let segments: Vec<&str> = path.split('.').collect();
    let parent = segments[..segments.len() - 1]
        .iter()
        .try_fold(root, |node, segment| match node {
            Value::Object(map) => Ok(map
                .entry((*segment).to_string())
                .or_insert_with(|| Value::Object(Map::new()))),
            Value::Array(items) => match segment.parse::<usize>() {
                Ok(index) => items
                    .get_mut(index)
                    .ok_or_else(|| TreeError::NotAContainer(path.to_string())),
                Err(_) => Err(TreeError::NotAContainer(path.to_string())),
            },
            _ => Err(TreeError::NotAContainer(path.to_string())),
        })?;
    let last = segments[segments.len() - 1];
    match parent {
        Value::Object(map) => {
            map.insert(last.to_string(), value);
            Ok(())
        }
        Value::Array(items) => {
            let index = last
                .parse::<usize>()
                .map_err(|_| TreeError::NotAContainer(path.to_string()))?;
            let slot = items
                .get_mut(index)
                .ok_or_else(|| TreeError::NotAContainer(path.to_string()))?;
            *slot = value;
            Ok(())
        }
        _ => Err(TreeError::NotAContainer(path.to_string())),
    }
}
