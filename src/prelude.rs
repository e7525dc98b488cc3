//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the musubi crate.
//! Import this module to get access to the core functionality without having to import
//! each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use musubi::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let definition_json = std::fs::read_to_string("path/to/definition.json")?;
//! let data_json = std::fs::read_to_string("path/to/data.json")?;
//!
//! let tree = Decoder::default().decode(definition_json.as_str())?;
//! let data = JsonObject::slots_from_json(serde_json::from_str(&data_json)?);
//!
//! if let Some(root) = tree.root() {
//!     println!("{}", ReportFormatter::format(&tree, root, &data));
//! }
//! # Ok(())
//! # }
//! ```

// Definition tree
pub use crate::definition::{
    AuxiliarySlot, Decoder, DefinitionId, DefinitionKind, DefinitionNode, DefinitionSpec,
    DefinitionTree, IntoDefinition, KindTag,
};

// Data model
pub use crate::data::{DataObject, DataSlot, JsonObject, ResolvedHead, Value};

// Resolution
pub use crate::path::AbsolutePath;
pub use crate::resolver::{AssignOutcome, Resolved};

// Capabilities and bundles
pub use crate::bundle::ResolutionBundle;
pub use crate::observer::{
    CapabilityStream, Observer, ObserverBuilder, RemoteDefinition, ResolutionRequest,
};
pub use crate::validation::{ValidationIssue, ValidatorRegistry};

// Error types
pub use crate::error::{BundleError, DataError, DefinitionError, Diagnostic, PathError};

// Report formatting
pub use crate::report::ReportFormatter;

// Standard library re-exports commonly used with this crate
pub use std::rc::Rc;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
