use crate::data::{DataObject, Value};
use std::fmt;

/// One entry of a resolution result.
///
/// Values read through a relative path are owned; whole data objects (from an
/// empty data path or a bare `%n%` anchor) are borrowed from the data array
/// for as long as the caller holds the result.
#[derive(Debug, Clone)]
pub enum Resolved<'d> {
    Value(Value),
    Object(&'d dyn DataObject),
}

impl Resolved<'_> {
    pub fn null() -> Self {
        Resolved::Value(Value::Null)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Resolved::Value(Value::Undefined))
    }

    /// Nullish, or a duck-typed `length` of zero.
    pub fn is_empty(&self) -> bool {
        match self {
            Resolved::Value(value) => value.is_empty(),
            Resolved::Object(object) => object.length() == Some(0),
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Resolved::Value(value) => Some(value),
            Resolved::Object(_) => None,
        }
    }

    /// Owned copy; borrowed objects are converted through their JSON form.
    pub fn to_value(&self) -> Value {
        match self {
            Resolved::Value(value) => value.clone(),
            Resolved::Object(object) => Value::from(object.to_json()),
        }
    }
}

impl PartialEq for Resolved<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.to_value() == other.to_value()
    }
}

impl From<Value> for Resolved<'_> {
    fn from(value: Value) -> Self {
        Resolved::Value(value)
    }
}

impl fmt::Display for Resolved<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolved::Value(value) => write!(f, "{}", value),
            Resolved::Object(object) => write!(f, "{}", object.to_json()),
        }
    }
}
