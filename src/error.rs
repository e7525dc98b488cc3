use thiserror::Error;

/// Errors that can occur while decoding or restructuring a definition tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DefinitionError {
    #[error("Failed to parse definition JSON: {0}")]
    JsonParseError(String),

    #[error("Definition '{key}' has an unregistered or invalid kind: '{kind}'")]
    UnknownKind { key: String, kind: String },

    #[error("Definition {child} already has parent {current}, refusing to re-parent it under {requested}")]
    AlreadyParented {
        child: usize,
        current: usize,
        requested: usize,
    },

    #[error("Definition {parent} lies inside the subtree of {child} and cannot become its parent")]
    CyclicParent { child: usize, parent: usize },

    #[error("Definition {0} does not exist in this tree")]
    UnknownDefinition(usize),

    #[error("Definition {0} is not a container and cannot own children")]
    NotAContainer(usize),

    #[error("Definition {owner} has no auxiliary slot named '{slot}'")]
    InvalidAuxiliarySlot { owner: usize, slot: String },

    #[error("Invalid custom definition: {0}")]
    ConversionError(String),
}

/// Errors raised while parsing an absolute path expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Path '{0}' is not anchored with a '%' index")]
    NotAnchored(String),

    #[error("Path '{0}' has an unterminated '%' anchor")]
    UnterminatedAnchor(String),

    #[error("Path '{path}' has a malformed index '{index}'")]
    MalformedIndex { path: String, index: String },
}

/// Errors reported by data objects when a path cannot be written.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("Segment '{segment}' of path '{path}' does not address a container")]
    NotAContainer { path: String, segment: String },

    #[error("Path '{0}' is empty and cannot be assigned")]
    EmptyPath(String),

    #[error("Segment '{segment}' of path '{path}' is not a valid array index")]
    InvalidSegment { path: String, segment: String },
}

/// Errors that can occur while restoring a persisted resolution bundle.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BundleError {
    #[error("Bundle is missing the '{0}' field")]
    MissingField(&'static str),

    #[error("Bundle field '{field}' is invalid: {message}")]
    InvalidField { field: &'static str, message: String },

    #[error(transparent)]
    Definition(#[from] DefinitionError),
}

/// Non-fatal conditions met during resolution. These are logged and recovered
/// locally; the tree always stays renderable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Diagnostic {
    #[error("Path '{path}' could not be resolved against {available} data object(s): {reason}")]
    PathResolution {
        path: String,
        available: usize,
        reason: String,
    },

    #[error("Observer capability '{capability}' is not available on definition '{definition}'")]
    CapabilityMissing {
        capability: &'static str,
        definition: String,
    },

    #[error("Cannot assign through definition '{definition}': {reason}")]
    AssignmentMismatch { definition: String, reason: String },
}
