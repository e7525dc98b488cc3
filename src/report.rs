use crate::data::DataSlot;
use crate::definition::{DefinitionId, DefinitionTree};
use itertools::Itertools;

/// Formats a definition tree, resolved against a data set, into a
/// human-readable listing.
pub struct ReportFormatter;

impl ReportFormatter {
    /// One line per definition, indented by depth:
    /// `kind "label" [identity] paths -> values (hidden) *`.
    pub fn format(tree: &DefinitionTree, id: DefinitionId, data: &[DataSlot]) -> String {
        let mut lines = Vec::new();
        Self::format_recursive(tree, id, data, 0, None, &mut lines);
        lines.join("\n")
    }

    fn format_recursive(
        tree: &DefinitionTree,
        id: DefinitionId,
        data: &[DataSlot],
        depth: usize,
        slot: Option<&str>,
        lines: &mut Vec<String>,
    ) {
        let node = &tree[id];
        let mut line = "  ".repeat(depth);
        if let Some(slot) = slot {
            line.push_str(&format!("{}: ", slot));
        }
        line.push_str(node.kind.tag().name());
        if let Some(label) = node.kind.label().filter(|l| !l.is_empty()) {
            line.push_str(&format!(" {:?}", tree.translate(id, label)));
        }
        line.push_str(&format!(" [{}]", tree.identity(id)));

        if node.has_data_path() {
            let values = tree.resolve_data(id, data);
            line.push_str(&format!(
                " {} -> {}",
                node.normalized_paths().iter().join(","),
                values.iter().join(", ")
            ));
        }
        if tree.is_hidden_for(id, data) {
            line.push_str(" (hidden)");
        }
        if node.is_dirty() {
            line.push_str(" *");
        }
        lines.push(line);

        for child in node.children() {
            Self::format_recursive(tree, *child, data, depth + 1, None, lines);
        }
        for (aux_slot, aux) in node.kind.auxiliaries() {
            Self::format_recursive(tree, aux, data, depth + 1, Some(aux_slot.name()), lines);
        }
    }
}
