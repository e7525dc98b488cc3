use super::Observer;
use crate::definition::{DefinitionId, DefinitionTree};
use std::rc::Rc;
use tracing::debug;

impl DefinitionTree {
    /// Hands `observer` to `id` and to everything it owns, children and
    /// auxiliary sub-definitions alike.
    ///
    /// Once the whole subtree holds the observer, its `after_set_observer`
    /// hook runs once, for `id`. Calling this again with another observer
    /// replaces the previous one everywhere below `id`.
    pub fn set_observer(&mut self, id: DefinitionId, observer: Rc<Observer>) {
        let subtree = self.subtree(id);
        debug!(definition = %id, reached = subtree.len(), "Cascading observer");
        for current in subtree {
            self[current].observer = Some(Rc::clone(&observer));
        }
        if let Some(hook) = &observer.after_set_observer {
            hook(&*self, id);
        }
    }

    pub fn observer(&self, id: DefinitionId) -> Option<&Rc<Observer>> {
        self[id].observer.as_ref()
    }
}
