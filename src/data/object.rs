use super::Value;
use crate::error::DataError;
use std::fmt;

/// The result of resolving every segment of a path except the last one.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedHead {
    /// The value addressed by the leading segments (the object itself for a
    /// single-segment path).
    pub value: Value,
    /// The final segment, still to be applied to `value`.
    pub tail: String,
}

/// Capability contract of an externally-owned data node.
///
/// The engine never owns data objects: a forest of them is lent to each
/// resolution call and addressed positionally. Implementations decide their
/// own path syntax for the relative part of an absolute path.
pub trait DataObject: fmt::Debug {
    /// Reads the value at `path`. An empty path addresses the object itself.
    fn resolve(&self, path: &str) -> Value;

    /// Writes `value` at `path`.
    fn resolve_assign(&mut self, path: &str, value: Value) -> Result<(), DataError>;

    /// Resolves all but the last segment of `path`.
    fn resolve_head(&self, path: &str) -> ResolvedHead;

    /// Deep copy.
    fn clone_object(&self) -> Box<dyn DataObject>;

    /// Own top-level keys, in a stable order.
    fn keys(&self) -> Vec<String>;

    fn remove_key(&mut self, key: &str);

    /// JSON form, used when the object is written into a resolution bundle.
    fn to_json(&self) -> serde_json::Value;

    /// Duck-typed `length` of the object itself, if it has one.
    fn length(&self) -> Option<usize> {
        None
    }
}

impl Clone for Box<dyn DataObject> {
    fn clone(&self) -> Self {
        self.clone_object()
    }
}

/// One position of the data array handed to a resolution call. `None` is a
/// missing (falsy) element.
pub type DataSlot = Option<Box<dyn DataObject>>;
