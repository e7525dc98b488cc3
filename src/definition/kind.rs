use super::DefinitionId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind tag of a definition, used for dispatch and on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KindTag {
    TextItem,
    Input,
    Dropdown,
    Checkbox,
    Button,
    Component,
    Form,
    Panel,
    Table,
    Tree,
    DefinitionList,
}

impl KindTag {
    pub const ALL: [KindTag; 11] = [
        KindTag::TextItem,
        KindTag::Input,
        KindTag::Dropdown,
        KindTag::Checkbox,
        KindTag::Button,
        KindTag::Component,
        KindTag::Form,
        KindTag::Panel,
        KindTag::Table,
        KindTag::Tree,
        KindTag::DefinitionList,
    ];

    pub fn name(self) -> &'static str {
        match self {
            KindTag::TextItem => "textItem",
            KindTag::Input => "input",
            KindTag::Dropdown => "dropdown",
            KindTag::Checkbox => "checkbox",
            KindTag::Button => "button",
            KindTag::Component => "component",
            KindTag::Form => "form",
            KindTag::Panel => "panel",
            KindTag::Table => "table",
            KindTag::Tree => "tree",
            KindTag::DefinitionList => "definitionList",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.name() == name)
    }

    /// Container kinds own an ordered child list.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            KindTag::Form
                | KindTag::Panel
                | KindTag::Table
                | KindTag::Tree
                | KindTag::DefinitionList
        )
    }

    /// Auxiliary slots this kind can hold.
    pub fn auxiliary_slots(self) -> &'static [AuxiliarySlot] {
        match self {
            KindTag::Dropdown => &[AuxiliarySlot::PossibleValues],
            KindTag::Form => &[AuxiliarySlot::Header, AuxiliarySlot::Footer],
            KindTag::Table => &[AuxiliarySlot::Header, AuxiliarySlot::Details],
            KindTag::Tree => &[AuxiliarySlot::Details],
            _ => &[],
        }
    }
}

impl fmt::Display for KindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Owned sub-definitions that hang off a definition outside its child list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuxiliarySlot {
    Header,
    Footer,
    PossibleValues,
    Details,
}

impl AuxiliarySlot {
    pub fn name(self) -> &'static str {
        match self {
            AuxiliarySlot::Header => "header",
            AuxiliarySlot::Footer => "footer",
            AuxiliarySlot::PossibleValues => "possibleValues",
            AuxiliarySlot::Details => "details",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [
            AuxiliarySlot::Header,
            AuxiliarySlot::Footer,
            AuxiliarySlot::PossibleValues,
            AuxiliarySlot::Details,
        ]
        .into_iter()
        .find(|slot| slot.name() == name)
    }
}

/// Variant-specific payload of a definition.
#[derive(Debug, Clone, PartialEq)]
pub enum DefinitionKind {
    TextItem {
        text: String,
    },
    Input {
        label: String,
        required: bool,
    },
    Dropdown {
        label: String,
        required: bool,
        possible_values: Option<DefinitionId>,
    },
    Checkbox {
        label: String,
    },
    Button {
        label: String,
        action: Option<String>,
    },
    Component {
        component: String,
    },
    Form {
        title: String,
        header: Option<DefinitionId>,
        footer: Option<DefinitionId>,
    },
    Panel {
        title: String,
    },
    Table {
        header: Option<DefinitionId>,
        details: Option<DefinitionId>,
    },
    Tree {
        details: Option<DefinitionId>,
    },
    DefinitionList,
}

impl DefinitionKind {
    pub fn tag(&self) -> KindTag {
        match self {
            DefinitionKind::TextItem { .. } => KindTag::TextItem,
            DefinitionKind::Input { .. } => KindTag::Input,
            DefinitionKind::Dropdown { .. } => KindTag::Dropdown,
            DefinitionKind::Checkbox { .. } => KindTag::Checkbox,
            DefinitionKind::Button { .. } => KindTag::Button,
            DefinitionKind::Component { .. } => KindTag::Component,
            DefinitionKind::Form { .. } => KindTag::Form,
            DefinitionKind::Panel { .. } => KindTag::Panel,
            DefinitionKind::Table { .. } => KindTag::Table,
            DefinitionKind::Tree { .. } => KindTag::Tree,
            DefinitionKind::DefinitionList => KindTag::DefinitionList,
        }
    }

    pub fn is_container(&self) -> bool {
        self.tag().is_container()
    }

    /// The human-facing label or title, if the kind carries one.
    pub fn label(&self) -> Option<&str> {
        match self {
            DefinitionKind::Input { label, .. }
            | DefinitionKind::Dropdown { label, .. }
            | DefinitionKind::Checkbox { label }
            | DefinitionKind::Button { label, .. } => Some(label),
            DefinitionKind::Form { title, .. } | DefinitionKind::Panel { title } => Some(title),
            DefinitionKind::TextItem { text } => Some(text),
            _ => None,
        }
    }

    pub fn auxiliary(&self, slot: AuxiliarySlot) -> Option<DefinitionId> {
        match (self, slot) {
            (DefinitionKind::Dropdown { possible_values, .. }, AuxiliarySlot::PossibleValues) => {
                *possible_values
            }
            (DefinitionKind::Form { header, .. }, AuxiliarySlot::Header)
            | (DefinitionKind::Table { header, .. }, AuxiliarySlot::Header) => *header,
            (DefinitionKind::Form { footer, .. }, AuxiliarySlot::Footer) => *footer,
            (DefinitionKind::Table { details, .. }, AuxiliarySlot::Details)
            | (DefinitionKind::Tree { details }, AuxiliarySlot::Details) => *details,
            _ => None,
        }
    }

    /// Mutable access to a slot; `None` when this kind has no such slot.
    pub(crate) fn auxiliary_mut(
        &mut self,
        slot: AuxiliarySlot,
    ) -> Option<&mut Option<DefinitionId>> {
        match self {
            DefinitionKind::Dropdown {
                possible_values, ..
            } if slot == AuxiliarySlot::PossibleValues => Some(possible_values),
            DefinitionKind::Form { header, .. } | DefinitionKind::Table { header, .. }
                if slot == AuxiliarySlot::Header =>
            {
                Some(header)
            }
            DefinitionKind::Form { footer, .. } if slot == AuxiliarySlot::Footer => Some(footer),
            DefinitionKind::Table { details, .. } | DefinitionKind::Tree { details }
                if slot == AuxiliarySlot::Details =>
            {
                Some(details)
            }
            _ => None,
        }
    }

    /// Every occupied auxiliary slot, in slot declaration order.
    pub fn auxiliaries(&self) -> Vec<(AuxiliarySlot, DefinitionId)> {
        self.tag()
            .auxiliary_slots()
            .iter()
            .filter_map(|slot| self.auxiliary(*slot).map(|id| (*slot, id)))
            .collect()
    }
}
