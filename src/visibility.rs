use crate::data::DataSlot;
use crate::definition::{DefinitionId, DefinitionTree};

impl DefinitionTree {
    /// Whether `id` should be hidden for `data`.
    ///
    /// A definition is hidden when flagged so, or when it has a data path and
    /// one of its resolved values trips `hide_if_empty` (nullish or a zero
    /// `length`) or `hide_if_undefined`. A container with `hide_if_empty` is
    /// additionally hidden when none of its children is visible.
    ///
    /// Evaluated afresh on every call: children may have been replaced since
    /// the last one.
    pub fn is_hidden_for(&self, id: DefinitionId, data: &[DataSlot]) -> bool {
        let node = &self[id];
        if node.hidden {
            return true;
        }

        if node.has_data_path() && (node.hide_if_empty || node.hide_if_undefined) {
            let trips = self.resolve_data(id, data).iter().any(|value| {
                (node.hide_if_empty && value.is_empty())
                    || (node.hide_if_undefined && value.is_undefined())
            });
            if trips {
                return true;
            }
        }

        node.kind.is_container()
            && node.hide_if_empty
            && !node
                .children
                .iter()
                .any(|child| !self.is_hidden_for(*child, data))
    }

    pub fn is_visible_for(&self, id: DefinitionId, data: &[DataSlot]) -> bool {
        !self.is_hidden_for(id, data)
    }
}
