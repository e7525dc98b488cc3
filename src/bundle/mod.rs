use crate::data::DataSlot;
use crate::definition::{DefinitionId, DefinitionTree};

mod codec;

/// Minimal snapshot from which a remote workflow can be re-entered: the
/// definition that was resolved, the pruned data it needed and, for
/// sub-definitions, the identity of the one asking.
#[derive(Debug, Clone)]
pub struct ResolutionBundle {
    pub definition: DefinitionTree,
    pub data: Vec<DataSlot>,
    pub constraint: Option<String>,
}

impl ResolutionBundle {
    pub fn new(definition: DefinitionTree, data: Vec<DataSlot>) -> Self {
        Self {
            definition,
            data,
            constraint: None,
        }
    }

    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraint = Some(constraint.into());
        self
    }
}

impl DefinitionTree {
    pub fn set_resolution_bundle(&mut self, id: DefinitionId, bundle: ResolutionBundle) {
        self[id].resolution_bundle = Some(Box::new(bundle));
    }

    /// The bundle that lets `id` be resolved again remotely.
    ///
    /// Looks at `id` and then its ancestors. A bundle owned by `id` is
    /// returned as is; one owned by an ancestor is copied with `constraint`
    /// set to the identity of `id`, so the remote side can target just that
    /// sub-definition.
    pub fn get_resolution_bundle(&self, id: DefinitionId) -> Option<ResolutionBundle> {
        let (owner, bundle) = self.lineage(id).find_map(|current| {
            self[current]
                .resolution_bundle
                .as_deref()
                .map(|bundle| (current, bundle))
        })?;

        if owner == id {
            Some(bundle.clone())
        } else {
            Some(
                ResolutionBundle::new(bundle.definition.clone(), bundle.data.clone())
                    .with_constraint(self.identity(id)),
            )
        }
    }
}
