use super::{
    AuxiliarySlot, DefinitionId, DefinitionKind, DefinitionNode, DefinitionSpec, DefinitionTree,
    KindTag,
};
use crate::error::DefinitionError;
use ahash::AHashMap;

/// A trait for producer formats that can be converted into a `DefinitionSpec`.
///
/// This is the extension point for feeding definitions from a custom remote
/// format into the engine: implement it on the producer's own structs and
/// hand the value to [`Decoder::decode`].
///
/// # Example
///
/// ```rust,no_run
/// use musubi::definition::{DefinitionSpec, IntoDefinition};
/// use musubi::error::DefinitionError;
///
/// struct Field { name: String, caption: String }
/// struct Screen { fields: Vec<Field> }
///
/// impl IntoDefinition for Screen {
///     fn into_definition(self) -> Result<DefinitionSpec, DefinitionError> {
///         let mut form = DefinitionSpec::new("form");
///         for field in self.fields {
///             let mut input = DefinitionSpec::new("input").with_data_path(field.name);
///             input.label = Some(field.caption);
///             form = form.with_child(input);
///         }
///         Ok(form)
///     }
/// }
/// ```
pub trait IntoDefinition {
    /// Consumes the value and converts it into the engine's wire form.
    fn into_definition(self) -> Result<DefinitionSpec, DefinitionError>;
}

impl IntoDefinition for DefinitionSpec {
    fn into_definition(self) -> Result<DefinitionSpec, DefinitionError> {
        Ok(self)
    }
}

impl IntoDefinition for serde_json::Value {
    fn into_definition(self) -> Result<DefinitionSpec, DefinitionError> {
        serde_json::from_value(self).map_err(|e| DefinitionError::JsonParseError(e.to_string()))
    }
}

impl IntoDefinition for &str {
    fn into_definition(self) -> Result<DefinitionSpec, DefinitionError> {
        serde_json::from_str(self).map_err(|e| DefinitionError::JsonParseError(e.to_string()))
    }
}

pub struct DecoderBuilder {
    aliases: AHashMap<String, KindTag>,
}

impl DecoderBuilder {
    pub fn new() -> Self {
        Self {
            aliases: AHashMap::new(),
        }
    }

    /// Maps a producer-specific kind name onto one of the engine's kinds.
    /// Unknown engine kind names are ignored.
    pub fn with_kind_alias(mut self, producer_kind: &str, engine_kind: &str) -> Self {
        if let Some(tag) = KindTag::from_name(engine_kind) {
            self.aliases.insert(producer_kind.to_string(), tag);
        }
        self
    }

    pub fn build(self) -> Decoder {
        Decoder {
            aliases: self.aliases,
        }
    }
}

impl Default for DecoderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds definition trees from their wire form.
///
/// Decoding runs top-down: each definition is parented (and its paths
/// normalized) before its own children are decoded.
#[derive(Default)]
pub struct Decoder {
    aliases: AHashMap<String, KindTag>,
}

impl Decoder {
    pub fn builder() -> DecoderBuilder {
        DecoderBuilder::new()
    }

    pub fn decode(&self, source: impl IntoDefinition) -> Result<DefinitionTree, DefinitionError> {
        let spec = source.into_definition()?;
        let mut tree = DefinitionTree::new();
        self.decode_node(&mut tree, &spec, None)?;
        Ok(tree)
    }

    /// Decodes `spec` into an existing tree as a new, unparented subtree.
    /// On error the tree is left as it was.
    pub fn decode_into(
        &self,
        tree: &mut DefinitionTree,
        spec: &DefinitionSpec,
    ) -> Result<DefinitionId, DefinitionError> {
        self.decode_node(tree, spec, None)
    }

    fn kind_of(&self, spec: &DefinitionSpec) -> Result<KindTag, DefinitionError> {
        self.aliases
            .get(&spec.kind)
            .copied()
            .or_else(|| KindTag::from_name(&spec.kind))
            .ok_or_else(|| DefinitionError::UnknownKind {
                key: spec.key.clone().unwrap_or_else(|| "N/A".to_string()),
                kind: spec.kind.clone(),
            })
    }

    fn build_kind(tag: KindTag, spec: &DefinitionSpec) -> DefinitionKind {
        let label = spec.label.clone().unwrap_or_default();
        let title = spec.title.clone().or_else(|| spec.label.clone()).unwrap_or_default();
        match tag {
            KindTag::TextItem => DefinitionKind::TextItem {
                text: spec.text.clone().or_else(|| spec.label.clone()).unwrap_or_default(),
            },
            KindTag::Input => DefinitionKind::Input {
                label,
                required: spec.required,
            },
            KindTag::Dropdown => DefinitionKind::Dropdown {
                label,
                required: spec.required,
                possible_values: None,
            },
            KindTag::Checkbox => DefinitionKind::Checkbox { label },
            KindTag::Button => DefinitionKind::Button {
                label,
                action: spec.action.clone(),
            },
            KindTag::Component => DefinitionKind::Component {
                component: spec.component.clone().unwrap_or_default(),
            },
            KindTag::Form => DefinitionKind::Form {
                title,
                header: None,
                footer: None,
            },
            KindTag::Panel => DefinitionKind::Panel { title },
            KindTag::Table => DefinitionKind::Table {
                header: None,
                details: None,
            },
            KindTag::Tree => DefinitionKind::Tree { details: None },
            KindTag::DefinitionList => DefinitionKind::DefinitionList,
        }
    }

    fn decode_node(
        &self,
        tree: &mut DefinitionTree,
        spec: &DefinitionSpec,
        owner: Option<(DefinitionId, Option<AuxiliarySlot>)>,
    ) -> Result<DefinitionId, DefinitionError> {
        let tag = self.kind_of(spec)?;
        let mut node = DefinitionNode::new(Self::build_kind(tag, spec), spec.data_path.clone());
        node.key = spec.key.clone();
        node.hidden = spec.hidden;
        node.hide_if_empty = spec.hide_if_empty;
        node.hide_if_undefined = spec.hide_if_undefined;
        node.validators = spec.validators.clone();

        let id = tree.insert(node);
        // A failure anywhere below drops everything decoded for this spec.
        if let Err(e) = self.decode_owned(tree, spec, id, owner) {
            tree.remove_subtree(id);
            return Err(e);
        }
        Ok(id)
    }

    fn decode_owned(
        &self,
        tree: &mut DefinitionTree,
        spec: &DefinitionSpec,
        id: DefinitionId,
        owner: Option<(DefinitionId, Option<AuxiliarySlot>)>,
    ) -> Result<(), DefinitionError> {
        match owner {
            Some((parent, None)) => tree.set_parent(id, parent)?,
            Some((parent, Some(slot))) => tree.attach_auxiliary(parent, slot, id)?,
            None => {}
        }

        for child in &spec.children {
            self.decode_node(tree, child, Some((id, None)))?;
        }
        let auxiliaries = [
            (AuxiliarySlot::Header, &spec.header),
            (AuxiliarySlot::Footer, &spec.footer),
            (AuxiliarySlot::PossibleValues, &spec.possible_values),
            (AuxiliarySlot::Details, &spec.details),
        ];
        for (slot, aux) in auxiliaries {
            if let Some(aux) = aux {
                self.decode_node(tree, aux, Some((id, Some(slot))))?;
            }
        }
        Ok(())
    }
}

impl DefinitionTree {
    /// Wire form of the subtree at `id`.
    pub fn encode(&self, id: DefinitionId) -> DefinitionSpec {
        let node = &self[id];
        let mut spec = DefinitionSpec::new(node.kind.tag().name());
        spec.key = node.key.clone();
        spec.data_path = node.data_path.clone();
        spec.hidden = node.hidden;
        spec.hide_if_empty = node.hide_if_empty;
        spec.hide_if_undefined = node.hide_if_undefined;
        spec.validators = node.validators.clone();

        match &node.kind {
            DefinitionKind::TextItem { text } => spec.text = Some(text.clone()),
            DefinitionKind::Input { label, required }
            | DefinitionKind::Dropdown {
                label, required, ..
            } => {
                spec.label = Some(label.clone());
                spec.required = *required;
            }
            DefinitionKind::Checkbox { label } => spec.label = Some(label.clone()),
            DefinitionKind::Button { label, action } => {
                spec.label = Some(label.clone());
                spec.action = action.clone();
            }
            DefinitionKind::Component { component } => spec.component = Some(component.clone()),
            DefinitionKind::Form { title, .. } | DefinitionKind::Panel { title } => {
                spec.title = Some(title.clone())
            }
            DefinitionKind::Table { .. }
            | DefinitionKind::Tree { .. }
            | DefinitionKind::DefinitionList => {}
        }

        spec.children = node.children.iter().map(|c| self.encode(*c)).collect();
        for (slot, aux) in node.kind.auxiliaries() {
            let encoded = Some(Box::new(self.encode(aux)));
            match slot {
                AuxiliarySlot::Header => spec.header = encoded,
                AuxiliarySlot::Footer => spec.footer = encoded,
                AuxiliarySlot::PossibleValues => spec.possible_values = encoded,
                AuxiliarySlot::Details => spec.details = encoded,
            }
        }
        spec
    }

    /// JSON form of the subtree at `id`.
    pub fn to_json(&self, id: DefinitionId) -> serde_json::Value {
        serde_json::to_value(self.encode(id)).unwrap_or_default()
    }
}
