use crate::data::{DataSlot, Value};
use crate::definition::{DefinitionId, DefinitionTree};
use crate::error::Diagnostic;
use crate::path::AbsolutePath;
use tracing::warn;

mod prune;
mod resolved;

pub use prune::prune_paths;
pub use resolved::Resolved;

/// Result of a write-back through a definition.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignOutcome {
    /// The value was written and the definition marked as changed.
    Written,
    /// Old and new values are equal once blanks are collapsed; nothing written.
    Unchanged,
    /// The write could not be performed; the data is untouched.
    Skipped(Diagnostic),
}

/// Resolves each normalized path against `data`, in order.
///
/// An empty path list stands for the empty data path and expands to every
/// element of `data`. `%%` keeps its position as `Undefined`. Indices that
/// miss the array or land on an empty slot resolve to null and are reported.
pub fn resolve_paths<'d>(paths: &[String], data: &'d [DataSlot]) -> Vec<Resolved<'d>> {
    if paths.is_empty() {
        return data
            .iter()
            .map(|slot| match slot {
                Some(object) => Resolved::Object(object.as_ref()),
                None => Resolved::null(),
            })
            .collect();
    }

    paths
        .iter()
        .map(|path| match AbsolutePath::parse(path) {
            Ok(AbsolutePath::MatchAll) | Ok(AbsolutePath::Skip) => {
                Resolved::Value(Value::Undefined)
            }
            Ok(AbsolutePath::Null) => Resolved::null(),
            Ok(AbsolutePath::Indexed { index, relative }) => {
                match data.get(index).and_then(Option::as_ref) {
                    Some(object) if relative.is_empty() => Resolved::Object(object.as_ref()),
                    Some(object) => Resolved::Value(object.resolve(&relative)),
                    None => {
                        let reason = if index < data.len() {
                            format!("element {} is empty", index)
                        } else {
                            format!("index {} is out of range", index)
                        };
                        report_unresolved(path, data.len(), reason);
                        Resolved::null()
                    }
                }
            }
            Err(e) => {
                report_unresolved(path, data.len(), e.to_string());
                Resolved::null()
            }
        })
        .collect()
}

fn report_unresolved(path: &str, available: usize, reason: String) {
    let diagnostic = Diagnostic::PathResolution {
        path: path.to_string(),
        available,
        reason,
    };
    warn!(%diagnostic, "Path resolution fell back to null");
}

impl DefinitionTree {
    /// Resolved values of every path of `id`, positionally.
    pub fn resolve_data<'d>(&self, id: DefinitionId, data: &'d [DataSlot]) -> Vec<Resolved<'d>> {
        resolve_paths(&self[id].normalized_paths, data)
    }

    /// First resolved value of `id`, or null when there is none.
    pub fn resolve_data_for_first_path<'d>(
        &self,
        id: DefinitionId,
        data: &'d [DataSlot],
    ) -> Resolved<'d> {
        self.resolve_data(id, data)
            .into_iter()
            .next()
            .unwrap_or_else(Resolved::null)
    }

    /// Writes `value` through the single indexed path of `id`.
    ///
    /// Blank values (null, undefined, empty string) compare equal to each
    /// other, so a UI echoing an empty field back does not mark the
    /// definition as changed.
    pub fn resolve_assign_data(
        &mut self,
        id: DefinitionId,
        data: &mut [DataSlot],
        value: Value,
    ) -> AssignOutcome {
        let mismatch = |tree: &DefinitionTree, reason: String| {
            let diagnostic = Diagnostic::AssignmentMismatch {
                definition: tree.identity(id),
                reason,
            };
            warn!(%diagnostic, "Write-back skipped");
            AssignOutcome::Skipped(diagnostic)
        };

        let (index, relative) = match self[id].normalized_paths.as_slice() {
            [single] => match AbsolutePath::parse(single) {
                Ok(AbsolutePath::Indexed { index, relative }) => (index, relative),
                Ok(_) => return mismatch(&*self, format!("path '{}' is not indexed", single)),
                Err(e) => return mismatch(&*self, e.to_string()),
            },
            paths => {
                return mismatch(
                    &*self,
                    format!("expected exactly one path, found {}", paths.len()),
                );
            }
        };
        if relative.is_empty() {
            return mismatch(&*self, format!("path '%{}%' addresses a whole element", index));
        }
        let available = data.len();
        let Some(object) = data.get_mut(index).and_then(Option::as_mut) else {
            return mismatch(
                &*self,
                format!("no data element at index {} of {}", index, available),
            );
        };

        let head = object.resolve_head(&relative);
        if !head.value.is_container() {
            return mismatch(
                &*self,
                format!("'{}' has no container for '{}'", relative, head.tail),
            );
        }

        let current = object.resolve(&relative);
        if current.blank_reduced() == value.blank_reduced() {
            return AssignOutcome::Unchanged;
        }

        match object.resolve_assign(&relative, value) {
            Ok(()) => {
                self.set_data_changed(id);
                AssignOutcome::Written
            }
            Err(e) => mismatch(&*self, e.to_string()),
        }
    }

    /// Deep copy of `data` reduced to what the paths of `id` read.
    pub fn prune_data(&self, id: DefinitionId, data: &[DataSlot]) -> Vec<DataSlot> {
        prune_paths(&self[id].normalized_paths, data)
    }
}
