use crate::data::{DataSlot, Value};
use crate::definition::{AuxiliarySlot, DefinitionId, DefinitionKind, DefinitionTree, KindTag};
use ahash::AHashMap;
use tracing::debug;

/// Built-in check run for every definition of a kind.
pub type KindValidator = fn(&DefinitionTree, DefinitionId, &[DataSlot]) -> Option<String>;

/// A rejected value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Identity of the definition that failed.
    pub definition: String,
    pub message: String,
}

/// Dispatch table from definition kind to its built-in validators.
pub struct ValidatorRegistry {
    table: AHashMap<KindTag, Vec<KindValidator>>,
}

impl ValidatorRegistry {
    /// A registry with no validators at all.
    pub fn empty() -> Self {
        Self {
            table: AHashMap::new(),
        }
    }

    pub fn with_validator(mut self, kind: KindTag, validator: KindValidator) -> Self {
        self.table.entry(kind).or_default().push(validator);
        self
    }

    pub fn validators_for(&self, kind: KindTag) -> &[KindValidator] {
        self.table.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::empty()
            .with_validator(KindTag::Input, required_value)
            .with_validator(KindTag::Dropdown, required_value)
            .with_validator(KindTag::Dropdown, listed_value)
            .with_validator(KindTag::Checkbox, boolean_value)
    }
}

fn required_value(tree: &DefinitionTree, id: DefinitionId, data: &[DataSlot]) -> Option<String> {
    let required = matches!(
        tree[id].kind,
        DefinitionKind::Input { required: true, .. }
            | DefinitionKind::Dropdown { required: true, .. }
    );
    (required && tree.resolve_data_for_first_path(id, data).is_empty())
        .then(|| "A value is required".to_string())
}

fn boolean_value(tree: &DefinitionTree, id: DefinitionId, data: &[DataSlot]) -> Option<String> {
    match tree.resolve_data_for_first_path(id, data).to_value() {
        Value::Bool(_) | Value::Undefined | Value::Null => None,
        other => Some(format!("Expected a boolean, found {}", other)),
    }
}

/// A dropdown value must appear among its possible values, either directly
/// or as the `value` member of an entry.
fn listed_value(tree: &DefinitionTree, id: DefinitionId, data: &[DataSlot]) -> Option<String> {
    let holder = tree[id].kind.auxiliary(AuxiliarySlot::PossibleValues)?;
    let Value::Array(options) = tree.resolve_data_for_first_path(holder, data).to_value() else {
        return None;
    };
    let value = tree.resolve_data_for_first_path(id, data).to_value();
    if value.is_nullish() {
        return None;
    }
    let listed = options.iter().any(|option| match option {
        Value::Object(entry) => entry.get("value") == Some(&value),
        plain => *plain == value,
    });
    (!listed).then(|| format!("{} is not one of the possible values", value))
}

impl DefinitionTree {
    /// Validates the visible part of the subtree at `id`.
    ///
    /// Kind validators come from `registry`; named validators listed on a
    /// definition are looked up through its observer and skipped when the
    /// observer does not know them.
    pub fn validate(
        &self,
        id: DefinitionId,
        data: &[DataSlot],
        registry: &ValidatorRegistry,
    ) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        self.validate_into(id, data, registry, &mut issues);
        issues
    }

    fn validate_into(
        &self,
        id: DefinitionId,
        data: &[DataSlot],
        registry: &ValidatorRegistry,
        issues: &mut Vec<ValidationIssue>,
    ) {
        if self.is_hidden_for(id, data) {
            return;
        }
        let node = &self[id];

        let mut report = |message: String| {
            issues.push(ValidationIssue {
                definition: self.identity(id),
                message,
            })
        };
        for validator in registry.validators_for(node.kind.tag()) {
            if let Some(message) = validator(self, id, data) {
                report(message);
            }
        }
        if !node.validators.is_empty() {
            let value = self.resolve_data_for_first_path(id, data).to_value();
            for name in &node.validators {
                match self.validator(id, name) {
                    Some(validator) => {
                        if let Some(message) = validator(&value) {
                            report(message);
                        }
                    }
                    None => debug!(
                        definition = %self.identity(id),
                        validator = %name,
                        "Unknown validator skipped"
                    ),
                }
            }
        }

        let possible_values = node.kind.auxiliary(AuxiliarySlot::PossibleValues);
        for owned in self.owned(id) {
            if Some(owned) != possible_values {
                self.validate_into(owned, data, registry, issues);
            }
        }
    }
}
