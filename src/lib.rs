//! # Musubi - Definition Resolution and Data-Binding Engine
//!
//! **Musubi** binds a server-produced tree of abstract *definitions* to a flat
//! array of opaque data objects. For every definition it works out which
//! slice of data it refers to, whether it is visible, whether it has been
//! edited, and how to produce a minimal snapshot of itself that a remote
//! workflow can later be re-entered with.
//!
//! ## Core Workflow
//!
//! 1.  **Decode**: turn the producer's definition JSON (or your own format, via
//!     `IntoDefinition`) into a `DefinitionTree`. Parenting normalizes every
//!     comma-separated data path into absolute `%index%.relative` expressions.
//! 2.  **Observe**: inject an `Observer`, a bag of optional capabilities
//!     (translation, validators, remote resolution...), with `set_observer`.
//!     It cascades through the whole subtree.
//! 3.  **Resolve**: ask the tree what a definition shows (`resolve_data`),
//!     whether it is hidden (`is_hidden_for`) or edited (`has_data_changes`),
//!     always against whatever data array the caller lends for that call.
//! 4.  **Write back and resume**: `resolve_assign_data` writes through a
//!     definition and marks it dirty; `get_resolution_bundle` yields the
//!     snapshot to hand back to the remote workflow.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use musubi::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//!     let tree = Decoder::default().decode(json!({
//!         "kind": "form",
//!         "dataPath": "%0%.customer",
//!         "children": [
//!             { "kind": "input", "key": "name", "dataPath": "name", "label": "Name" },
//!             { "kind": "input", "key": "vat", "dataPath": "vat", "hideIfEmpty": true }
//!         ]
//!     }))?;
//!
//!     let data = vec![Some(JsonObject::boxed(json!({
//!         "customer": { "name": "Acme", "vat": "" }
//!     })))];
//!
//!     let root = tree.root().expect("decoded tree has a root");
//!     let name = tree.children(root)[0];
//!     let vat = tree.children(root)[1];
//!
//!     assert_eq!(tree.normalized_paths(name), ["%0%.customer.name"]);
//!     assert_eq!(tree.resolve_data_for_first_path(name, &data).to_value(), Value::from("Acme"));
//!     assert!(tree.is_hidden_for(vat, &data));
//!
//!     println!("{}", ReportFormatter::format(&tree, root, &data));
//!     Ok(())
//! }
//! ```

pub mod bundle;
pub mod data;
pub mod definition;
pub mod error;
pub mod observer;
pub mod path;
pub mod prelude;
pub mod report;
pub mod resolver;
pub mod validation;

mod dirty;
mod visibility;
