//! Common test utilities for building definition trees and data.
use musubi::prelude::*;
use serde_json::json;

/// A customer form bound to element 0, with a country list in element 1.
///
/// Layout: form(header) > name, vat, address panel > (street, city),
/// country dropdown(possibleValues), active checkbox.
#[allow(dead_code)]
pub fn customer_form_json() -> serde_json::Value {
    json!({
        "kind": "form",
        "key": "customer",
        "title": "Customer",
        "dataPath": "%0%.customer",
        "header": { "kind": "textItem", "text": "Customer details", "dataPath": "name" },
        "children": [
            { "kind": "input", "key": "name", "dataPath": "name", "label": "Name", "required": true },
            { "kind": "input", "key": "vat", "dataPath": "vat", "label": "VAT", "hideIfEmpty": true },
            {
                "kind": "panel",
                "key": "address",
                "title": "Address",
                "dataPath": "address",
                "hideIfEmpty": true,
                "children": [
                    { "kind": "input", "key": "street", "dataPath": "street", "label": "Street" },
                    { "kind": "input", "key": "city", "dataPath": "city", "label": "City", "hideIfUndefined": true }
                ]
            },
            {
                "kind": "dropdown",
                "key": "country",
                "dataPath": "country",
                "label": "Country",
                "possibleValues": { "kind": "definitionList", "dataPath": "%1%.countries" }
            },
            { "kind": "checkbox", "key": "active", "dataPath": "active", "label": "Active" }
        ]
    })
}

#[allow(dead_code)]
pub fn customer_form() -> DefinitionTree {
    Decoder::default()
        .decode(customer_form_json())
        .expect("customer form fixture decodes")
}

#[allow(dead_code)]
pub fn customer_data_json() -> serde_json::Value {
    json!([
        {
            "customer": {
                "name": "Acme",
                "vat": "",
                "address": { "street": "Main Street 1", "city": "Springfield" },
                "country": "CH",
                "active": true
            },
            "audit": { "createdBy": "system" }
        },
        {
            "countries": [ { "value": "CH" }, { "value": "DE" } ]
        }
    ])
}

#[allow(dead_code)]
pub fn customer_data() -> Vec<DataSlot> {
    JsonObject::slots_from_json(customer_data_json())
}

/// A single data slot holding `json`.
#[allow(dead_code)]
pub fn xo(json: serde_json::Value) -> DataSlot {
    Some(JsonObject::boxed(json))
}

/// Finds a definition by its key.
#[allow(dead_code)]
pub fn by_key(tree: &DefinitionTree, key: &str) -> DefinitionId {
    tree.ids()
        .find(|id| tree[*id].key.as_deref() == Some(key))
        .unwrap_or_else(|| panic!("no definition keyed '{}'", key))
}

/// A standalone input with the given raw data path.
#[allow(dead_code)]
pub fn input(data_path: &str) -> DefinitionNode {
    DefinitionNode::new(
        DefinitionKind::Input {
            label: String::new(),
            required: false,
        },
        data_path,
    )
}

/// A standalone panel with the given raw data path.
#[allow(dead_code)]
pub fn panel(data_path: &str) -> DefinitionNode {
    DefinitionNode::new(
        DefinitionKind::Panel {
            title: String::new(),
        },
        data_path,
    )
}

/// Owned values of a resolution, for easy comparison.
#[allow(dead_code)]
pub fn values(resolved: Vec<Resolved<'_>>) -> Vec<Value> {
    resolved.iter().map(Resolved::to_value).collect()
}

/// JSON form of every slot, `null` for empty ones.
#[allow(dead_code)]
pub fn slots_json(data: &[DataSlot]) -> Vec<serde_json::Value> {
    data.iter()
        .map(|slot| {
            slot.as_ref()
                .map(|object| object.to_json())
                .unwrap_or(serde_json::Value::Null)
        })
        .collect()
}
