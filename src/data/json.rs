use super::{DataObject, ResolvedHead, Value};
use crate::error::DataError;
use serde::{Deserialize, Serialize};

/// A `DataObject` backed by a `serde_json::Value`.
///
/// Paths are dot-separated; a numeric segment indexes into an array. This is
/// the data model used when bundles are decoded and by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonObject {
    root: serde_json::Value,
}

impl JsonObject {
    pub fn new(root: serde_json::Value) -> Self {
        Self { root }
    }

    /// Shorthand for building a populated data slot.
    pub fn boxed(root: serde_json::Value) -> Box<dyn DataObject> {
        Box::new(Self::new(root))
    }

    pub fn as_json(&self) -> &serde_json::Value {
        &self.root
    }

    /// Parses a JSON array into data slots. `null` entries become empty slots.
    pub fn slots_from_json(json: serde_json::Value) -> Vec<Option<Box<dyn DataObject>>> {
        match json {
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    serde_json::Value::Null => None,
                    other => Some(Self::boxed(other)),
                })
                .collect(),
            serde_json::Value::Null => Vec::new(),
            other => vec![Some(Self::boxed(other))],
        }
    }

    fn segments(path: &str) -> impl Iterator<Item = &str> {
        path.split('.').filter(|s| !s.is_empty())
    }

    fn step<'a>(node: &'a serde_json::Value, segment: &str) -> Option<&'a serde_json::Value> {
        match node {
            serde_json::Value::Object(map) => map.get(segment),
            serde_json::Value::Array(items) => {
                segment.parse::<usize>().ok().and_then(|i| items.get(i))
            }
            _ => None,
        }
    }

    fn lookup(&self, path: &str) -> Option<&serde_json::Value> {
        Self::segments(path).try_fold(&self.root, |node, segment| Self::step(node, segment))
    }
}

impl DataObject for JsonObject {
    fn resolve(&self, path: &str) -> Value {
        match self.lookup(path) {
            Some(found) => Value::from(found.clone()),
            None => Value::Undefined,
        }
    }

    fn resolve_assign(&mut self, path: &str, value: Value) -> Result<(), DataError> {
        let segments: Vec<&str> = Self::segments(path).collect();
        let Some((last, leading)) = segments.split_last() else {
            return Err(DataError::EmptyPath(path.to_string()));
        };

        let mut node = &mut self.root;
        for segment in leading {
            node = match node {
                serde_json::Value::Object(map) => map
                    .entry(segment.to_string())
                    .or_insert_with(|| serde_json::Value::Object(Default::default())),
                serde_json::Value::Array(items) => {
                    let index =
                        segment
                            .parse::<usize>()
                            .map_err(|_| DataError::InvalidSegment {
                                path: path.to_string(),
                                segment: segment.to_string(),
                            })?;
                    items.get_mut(index).ok_or_else(|| DataError::InvalidSegment {
                        path: path.to_string(),
                        segment: segment.to_string(),
                    })?
                }
                _ => {
                    return Err(DataError::NotAContainer {
                        path: path.to_string(),
                        segment: segment.to_string(),
                    });
                }
            };
        }

        match node {
            serde_json::Value::Object(map) => {
                match value.to_json() {
                    Some(json) => map.insert(last.to_string(), json),
                    None => map.remove(*last),
                };
                Ok(())
            }
            serde_json::Value::Array(items) => {
                let index = last
                    .parse::<usize>()
                    .ok()
                    .filter(|i| *i < items.len())
                    .ok_or_else(|| DataError::InvalidSegment {
                        path: path.to_string(),
                        segment: last.to_string(),
                    })?;
                items[index] = value.to_json().unwrap_or(serde_json::Value::Null);
                Ok(())
            }
            _ => Err(DataError::NotAContainer {
                path: path.to_string(),
                segment: last.to_string(),
            }),
        }
    }

    fn resolve_head(&self, path: &str) -> ResolvedHead {
        let (head, tail) = match path.rsplit_once('.') {
            Some((head, tail)) => (head, tail),
            None => ("", path),
        };
        ResolvedHead {
            value: self.resolve(head),
            tail: tail.to_string(),
        }
    }

    fn clone_object(&self) -> Box<dyn DataObject> {
        Box::new(self.clone())
    }

    fn keys(&self) -> Vec<String> {
        match &self.root {
            serde_json::Value::Object(map) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    fn remove_key(&mut self, key: &str) {
        if let serde_json::Value::Object(map) = &mut self.root {
            map.remove(key);
        }
    }

    fn to_json(&self) -> serde_json::Value {
        self.root.clone()
    }

    fn length(&self) -> Option<usize> {
        Value::from(self.root.clone()).length()
    }
}
