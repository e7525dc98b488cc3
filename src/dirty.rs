use crate::definition::{DefinitionId, DefinitionTree};

impl DefinitionTree {
    /// Marks `id` itself as edited. Ancestors are not touched; they see the
    /// change through [`DefinitionTree::has_data_changes`].
    pub fn set_data_changed(&mut self, id: DefinitionId) {
        self[id].dirty = true;
    }

    /// `true` if `id` or anything it owns has been edited.
    pub fn has_data_changes(&self, id: DefinitionId) -> bool {
        self[id].dirty
            || self
                .owned(id)
                .into_iter()
                .any(|owned| self.has_data_changes(owned))
    }

    /// Drops the edit state of `id` and everything it owns.
    pub fn clear_data_change_state(&mut self, id: DefinitionId) {
        for current in self.subtree(id) {
            self[current].dirty = false;
        }
    }
}
