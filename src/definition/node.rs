use super::{DefinitionId, DefinitionKind};
use crate::bundle::ResolutionBundle;
use crate::observer::Observer;
use std::rc::Rc;

/// A single definition stored in a `DefinitionTree`.
///
/// Structural fields (`parent`, `children`, normalized paths, edit state, the
/// observer and the resolution bundle) are only changed through the tree so
/// their invariants hold.
#[derive(Debug, Clone)]
pub struct DefinitionNode {
    /// Server-assigned identity. When absent, the node is identified by its
    /// position in the tree.
    pub key: Option<String>,
    pub kind: DefinitionKind,
    pub hidden: bool,
    pub hide_if_empty: bool,
    pub hide_if_undefined: bool,
    /// Names of validators looked up through the observer.
    pub validators: Vec<String>,
    pub(crate) data_path: String,
    pub(crate) normalized_paths: Vec<String>,
    pub(crate) parent: Option<DefinitionId>,
    pub(crate) children: Vec<DefinitionId>,
    pub(crate) dirty: bool,
    pub(crate) observer: Option<Rc<Observer>>,
    pub(crate) resolution_bundle: Option<Box<ResolutionBundle>>,
}

impl DefinitionNode {
    pub fn new(kind: DefinitionKind, data_path: impl Into<String>) -> Self {
        let data_path = data_path.into();
        let normalized_paths = crate::path::normalize(&data_path, None);
        Self {
            key: None,
            kind,
            hidden: false,
            hide_if_empty: false,
            hide_if_undefined: false,
            validators: Vec::new(),
            data_path,
            normalized_paths,
            parent: None,
            children: Vec::new(),
            dirty: false,
            observer: None,
            resolution_bundle: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn with_hide_if_empty(mut self, hide_if_empty: bool) -> Self {
        self.hide_if_empty = hide_if_empty;
        self
    }

    pub fn with_hide_if_undefined(mut self, hide_if_undefined: bool) -> Self {
        self.hide_if_undefined = hide_if_undefined;
        self
    }

    pub fn with_validator(mut self, name: impl Into<String>) -> Self {
        self.validators.push(name.into());
        self
    }

    /// The raw, comma-separated data path as authored.
    pub fn data_path(&self) -> &str {
        &self.data_path
    }

    pub fn has_data_path(&self) -> bool {
        !self.data_path.trim().is_empty()
    }

    pub fn normalized_paths(&self) -> &[String] {
        &self.normalized_paths
    }

    pub fn parent(&self) -> Option<DefinitionId> {
        self.parent
    }

    pub fn children(&self) -> &[DefinitionId] {
        &self.children
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn observer(&self) -> Option<&Rc<Observer>> {
        self.observer.as_ref()
    }

    pub fn resolution_bundle(&self) -> Option<&ResolutionBundle> {
        self.resolution_bundle.as_deref()
    }
}
