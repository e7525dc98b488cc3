use super::{AuxiliarySlot, DefinitionNode};
use crate::error::DefinitionError;
use crate::path::normalize;
use ahash::AHashMap;
use itertools::Itertools;
use std::fmt;
use std::ops::{Index, IndexMut};
use tracing::debug;

/// Handle of a definition inside a `DefinitionTree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefinitionId(pub(crate) usize);

impl DefinitionId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for DefinitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Arena holding a forest of definitions.
///
/// Ownership flows downward only: a container owns its children and its
/// auxiliary sub-definitions; the `parent` link is a plain handle used for
/// path inheritance and bundle lookup. Removed slots are never reused, so a
/// stale `DefinitionId` can be detected with [`DefinitionTree::contains`].
#[derive(Debug, Clone, Default)]
pub struct DefinitionTree {
    nodes: Vec<Option<DefinitionNode>>,
}

impl DefinitionTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an unparented definition.
    pub fn insert(&mut self, node: DefinitionNode) -> DefinitionId {
        let id = DefinitionId(self.nodes.len());
        self.nodes.push(Some(node));
        id
    }

    pub fn get(&self, id: DefinitionId) -> Option<&DefinitionNode> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: DefinitionId) -> Option<&mut DefinitionNode> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: DefinitionId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live definitions.
    pub fn len(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live definitions in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = DefinitionId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(i, _)| DefinitionId(i))
    }

    /// The first unparented definition.
    pub fn root(&self) -> Option<DefinitionId> {
        self.ids().find(|id| self[*id].parent.is_none())
    }

    pub fn parent(&self, id: DefinitionId) -> Option<DefinitionId> {
        self[id].parent
    }

    pub fn children(&self, id: DefinitionId) -> &[DefinitionId] {
        &self[id].children
    }

    pub fn data_path(&self, id: DefinitionId) -> &str {
        &self[id].data_path
    }

    pub fn normalized_paths(&self, id: DefinitionId) -> &[String] {
        &self[id].normalized_paths
    }

    fn check(&self, id: DefinitionId) -> Result<(), DefinitionError> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(DefinitionError::UnknownDefinition(id.0))
        }
    }

    /// `id` followed by each of its ancestors up to the root.
    pub fn lineage(&self, id: DefinitionId) -> impl Iterator<Item = DefinitionId> + '_ {
        std::iter::successors(Some(id), move |current| {
            self.get(*current).and_then(|node| node.parent)
        })
    }

    /// Children followed by occupied auxiliary slots.
    pub fn owned(&self, id: DefinitionId) -> Vec<DefinitionId> {
        let node = &self[id];
        node.children
            .iter()
            .copied()
            .chain(node.kind.auxiliaries().into_iter().map(|(_, aux)| aux))
            .collect()
    }

    /// Pre-order walk over `id` and everything it owns.
    pub fn subtree(&self, id: DefinitionId) -> Vec<DefinitionId> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            order.push(current);
            stack.extend(self.owned(current).into_iter().rev());
        }
        order
    }

    /// Records `parent` as the owner of `child` and normalizes the child's
    /// paths against it. Setting the same parent again is a no-op; a different
    /// parent is rejected.
    pub fn set_parent(
        &mut self,
        child: DefinitionId,
        parent: DefinitionId,
    ) -> Result<(), DefinitionError> {
        self.check(child)?;
        self.check(parent)?;
        match self[child].parent {
            Some(current) if current == parent => return Ok(()),
            Some(current) => {
                return Err(DefinitionError::AlreadyParented {
                    child: child.0,
                    current: current.0,
                    requested: parent.0,
                });
            }
            None => {}
        }
        if !self[parent].kind.is_container() {
            return Err(DefinitionError::NotAContainer(parent.0));
        }
        self.reject_cycle(child, parent)?;

        self[child].parent = Some(parent);
        self[parent].children.push(child);
        self.renormalize(child);
        Ok(())
    }

    /// Installs `child` into an auxiliary slot of `owner`. A previous
    /// occupant of the slot is removed from the tree.
    pub fn attach_auxiliary(
        &mut self,
        owner: DefinitionId,
        slot: AuxiliarySlot,
        child: DefinitionId,
    ) -> Result<(), DefinitionError> {
        self.check(owner)?;
        self.check(child)?;
        if let Some(current) = self[child].parent {
            return Err(DefinitionError::AlreadyParented {
                child: child.0,
                current: current.0,
                requested: owner.0,
            });
        }
        self.reject_cycle(child, owner)?;

        let previous = match self[owner].kind.auxiliary_mut(slot) {
            Some(occupant) => occupant.replace(child),
            None => {
                return Err(DefinitionError::InvalidAuxiliarySlot {
                    owner: owner.0,
                    slot: slot.name().to_string(),
                });
            }
        };
        if let Some(previous) = previous {
            self.free(previous);
        }

        self[child].parent = Some(owner);
        self.renormalize(child);
        Ok(())
    }

    fn reject_cycle(
        &self,
        child: DefinitionId,
        parent: DefinitionId,
    ) -> Result<(), DefinitionError> {
        if self.lineage(parent).any(|ancestor| ancestor == child) {
            Err(DefinitionError::CyclicParent {
                child: child.0,
                parent: parent.0,
            })
        } else {
            Ok(())
        }
    }

    /// Replaces the raw data path of `id` and re-normalizes its subtree.
    pub fn set_data_path(&mut self, id: DefinitionId, data_path: impl Into<String>) {
        self[id].data_path = data_path.into();
        self.renormalize(id);
    }

    /// Recomputes normalized paths for `id` and then for everything it owns,
    /// parents first.
    pub(crate) fn renormalize(&mut self, id: DefinitionId) {
        for current in self.subtree(id) {
            let parent_path = self[current]
                .parent
                .and_then(|parent| self[parent].normalized_paths.first().cloned());
            let node = &self[current];
            let normalized = normalize(&node.data_path, parent_path.as_deref());
            debug!(
                definition = %current,
                data_path = %node.data_path,
                normalized = %normalized.iter().join(","),
                "Normalized data path"
            );
            self[current].normalized_paths = normalized;
        }
    }

    /// Detaches `id` from its owner and drops it together with everything it
    /// owns.
    pub fn remove_subtree(&mut self, id: DefinitionId) {
        if !self.contains(id) {
            return;
        }
        if let Some(parent) = self[id].parent {
            let owner = &mut self[parent];
            owner.children.retain(|child| *child != id);
            for slot in owner.kind.tag().auxiliary_slots() {
                if let Some(occupant) = owner.kind.auxiliary_mut(*slot) {
                    if *occupant == Some(id) {
                        *occupant = None;
                    }
                }
            }
        }
        self.free(id);
    }

    fn free(&mut self, id: DefinitionId) {
        for dropped in self.subtree(id) {
            self.nodes[dropped.0] = None;
        }
    }

    /// Copies the subtree rooted at `source_root` of `source` into this
    /// arena, unparented. Returns the id of the copied root.
    pub(crate) fn import(
        &mut self,
        source: &DefinitionTree,
        source_root: DefinitionId,
    ) -> DefinitionId {
        let mut remap: AHashMap<DefinitionId, DefinitionId> = AHashMap::new();
        let order = source.subtree(source_root);
        for old in &order {
            let new = self.insert(source[*old].clone());
            remap.insert(*old, new);
        }

        for old in &order {
            let new = remap[old];
            let node = &mut self[new];
            node.parent = if *old == source_root {
                None
            } else {
                node.parent.and_then(|p| remap.get(&p).copied())
            };
            node.children = node
                .children
                .iter()
                .filter_map(|c| remap.get(c).copied())
                .collect();
            for slot in node.kind.tag().auxiliary_slots() {
                if let Some(occupant) = node.kind.auxiliary_mut(*slot) {
                    *occupant = occupant.and_then(|aux| remap.get(&aux).copied());
                }
            }
        }
        remap[&source_root]
    }

    /// Moves the root of `other` under `parent` as its last child.
    ///
    /// The grafted subtree is re-normalized against `parent` and receives the
    /// parent's observer, if one is set.
    pub fn graft(
        &mut self,
        parent: DefinitionId,
        other: &DefinitionTree,
    ) -> Result<DefinitionId, DefinitionError> {
        self.check(parent)?;
        if !self[parent].kind.is_container() {
            return Err(DefinitionError::NotAContainer(parent.0));
        }
        let Some(source_root) = other.root() else {
            return Err(DefinitionError::ConversionError(
                "cannot graft an empty definition tree".to_string(),
            ));
        };
        let grafted = self.import(other, source_root);
        self.set_parent(grafted, parent)?;
        if let Some(observer) = self[parent].observer.clone() {
            self.set_observer(grafted, observer);
        }
        Ok(grafted)
    }

    /// Drops every child of `container` and grafts `replacements` in their
    /// place, in order.
    pub fn replace_children(
        &mut self,
        container: DefinitionId,
        replacements: &[DefinitionTree],
    ) -> Result<Vec<DefinitionId>, DefinitionError> {
        self.check(container)?;
        if !self[container].kind.is_container() {
            return Err(DefinitionError::NotAContainer(container.0));
        }
        for child in self[container].children.clone() {
            self.remove_subtree(child);
        }
        replacements
            .iter()
            .map(|replacement| self.graft(container, replacement))
            .collect()
    }

    /// Standalone copy of the subtree at `id`.
    ///
    /// The copied root keeps its absolute paths as its data path, so the
    /// snapshot resolves the same way without its original ancestors.
    /// Observers and resolution bundles stay behind; a snapshot never nests
    /// earlier snapshots.
    pub fn extract(&self, id: DefinitionId) -> DefinitionTree {
        let mut snapshot = DefinitionTree::new();
        let root = snapshot.import(self, id);
        for node in snapshot.nodes.iter_mut().flatten() {
            node.observer = None;
            node.resolution_bundle = None;
        }
        let node = &mut snapshot[root];
        if node.has_data_path() {
            node.data_path = node.normalized_paths.join(",");
        }
        snapshot
    }

    /// The key of `id`, or its position from the root (`/`, `/2`,
    /// `/2/header/0`) when it has none.
    pub fn identity(&self, id: DefinitionId) -> String {
        if let Some(key) = self[id].key.as_ref().filter(|k| !k.is_empty()) {
            return key.clone();
        }

        let mut segments = Vec::new();
        let mut current = id;
        while let Some(parent) = self[current].parent {
            let owner = &self[parent];
            let segment = match owner.children.iter().position(|c| *c == current) {
                Some(position) => position.to_string(),
                None => owner
                    .kind
                    .auxiliaries()
                    .into_iter()
                    .find(|(_, aux)| *aux == current)
                    .map(|(slot, _)| slot.name().to_string())
                    .unwrap_or_default(),
            };
            segments.push(segment);
            current = parent;
        }
        format!("/{}", segments.iter().rev().join("/"))
    }
}

impl Index<DefinitionId> for DefinitionTree {
    type Output = DefinitionNode;

    /// # Panics
    ///
    /// Panics if `id` was removed or belongs to another tree.
    fn index(&self, id: DefinitionId) -> &DefinitionNode {
        match self.get(id) {
            Some(node) => node,
            None => panic!("definition {} is not part of this tree", id),
        }
    }
}

impl IndexMut<DefinitionId> for DefinitionTree {
    fn index_mut(&mut self, id: DefinitionId) -> &mut DefinitionNode {
        match self.get_mut(id) {
            Some(node) => node,
            None => panic!("definition {} is not part of this tree", id),
        }
    }
}
