use serde::{Deserialize, Serialize};

fn is_false(value: &bool) -> bool {
    !*value
}

/// Nested JSON form of a definition, as produced by a remote workflow and as
/// written into resolution bundles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionSpec {
    #[serde(alias = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty", alias = "path")]
    pub data_path: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub hide_if_empty: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub hide_if_undefined: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DefinitionSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<Box<DefinitionSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<Box<DefinitionSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub possible_values: Option<Box<DefinitionSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Box<DefinitionSpec>>,
}

impl DefinitionSpec {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_data_path(mut self, data_path: impl Into<String>) -> Self {
        self.data_path = data_path.into();
        self
    }

    pub fn with_child(mut self, child: DefinitionSpec) -> Self {
        self.children.push(child);
        self
    }
}
