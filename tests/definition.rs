//! Tests for decoding, encoding and restructuring definition trees.
mod common;
use common::*;
use musubi::prelude::*;
use serde_json::json;

#[test]
fn test_decode_normalizes_every_path() {
    let tree = customer_form();

    assert_eq!(tree.len(), 10);
    assert_eq!(tree.normalized_paths(by_key(&tree, "customer")), ["%0%.customer"]);
    assert_eq!(tree.normalized_paths(by_key(&tree, "name")), ["%0%.customer.name"]);
    assert_eq!(
        tree.normalized_paths(by_key(&tree, "city")),
        ["%0%.customer.address.city"]
    );

    let root = tree.root().unwrap();
    let header = tree[root].kind.auxiliary(AuxiliarySlot::Header).unwrap();
    assert_eq!(tree.normalized_paths(header), ["%0%.customer.name"]);
    assert_eq!(tree.parent(header), Some(root));

    let holder = tree[by_key(&tree, "country")]
        .kind
        .auxiliary(AuxiliarySlot::PossibleValues)
        .unwrap();
    assert_eq!(tree.normalized_paths(holder), ["%1%.countries"]);
}

#[test]
fn test_decode_keeps_child_order_and_kinds() {
    let tree = customer_form();
    let root = tree.root().unwrap();
    let kinds: Vec<KindTag> = tree
        .children(root)
        .iter()
        .map(|child| tree[*child].kind.tag())
        .collect();
    assert_eq!(
        kinds,
        [
            KindTag::Input,
            KindTag::Input,
            KindTag::Panel,
            KindTag::Dropdown,
            KindTag::Checkbox
        ]
    );
    assert!(matches!(
        tree[by_key(&tree, "name")].kind,
        DefinitionKind::Input { required: true, .. }
    ));
    assert_eq!(tree[root].kind.label(), Some("Customer"));
}

#[test]
fn test_decode_accepts_legacy_field_names() {
    let tree = Decoder::default()
        .decode(json!({
            "type": "panel",
            "path": "%2%.order",
            "children": [{ "type": "input", "path": "number" }]
        }))
        .unwrap();
    let root = tree.root().unwrap();
    assert_eq!(tree[root].kind.tag(), KindTag::Panel);
    assert_eq!(
        tree.normalized_paths(tree.children(root)[0]),
        ["%2%.order.number"]
    );
}

#[test]
fn test_decode_from_str() {
    let tree = Decoder::default()
        .decode(r#"{ "kind": "checkbox", "dataPath": "active", "label": "Active" }"#)
        .unwrap();
    let root = tree.root().unwrap();
    assert_eq!(tree.normalized_paths(root), ["%0%.active"]);
}

#[test]
fn test_decode_with_kind_alias() {
    let decoder = Decoder::builder()
        .with_kind_alias("screen", "form")
        .with_kind_alias("broken", "notAKind")
        .build();

    let tree = decoder.decode(json!({ "kind": "screen" })).unwrap();
    assert_eq!(tree[tree.root().unwrap()].kind.tag(), KindTag::Form);

    let error = decoder.decode(json!({ "kind": "broken" })).unwrap_err();
    assert!(matches!(error, DefinitionError::UnknownKind { .. }));
}

#[test]
fn test_decode_errors() {
    let unknown = Decoder::default()
        .decode(json!({ "kind": "carousel", "key": "promo" }))
        .unwrap_err();
    assert_eq!(
        unknown,
        DefinitionError::UnknownKind {
            key: "promo".to_string(),
            kind: "carousel".to_string()
        }
    );

    let malformed = Decoder::default().decode("{ not json").unwrap_err();
    assert!(matches!(malformed, DefinitionError::JsonParseError(_)));

    let leaf_with_children = Decoder::default()
        .decode(json!({ "kind": "input", "children": [{ "kind": "input" }] }))
        .unwrap_err();
    assert!(matches!(
        leaf_with_children,
        DefinitionError::NotAContainer(_)
    ));

    let wrong_slot = Decoder::default()
        .decode(json!({ "kind": "panel", "header": { "kind": "textItem" } }))
        .unwrap_err();
    assert!(matches!(
        wrong_slot,
        DefinitionError::InvalidAuxiliarySlot { .. }
    ));
}

#[test]
fn test_custom_producer_format() {
    struct Field {
        name: &'static str,
        caption: &'static str,
    }
    struct Screen {
        binding: &'static str,
        fields: Vec<Field>,
    }

    impl IntoDefinition for Screen {
        fn into_definition(self) -> std::result::Result<DefinitionSpec, DefinitionError> {
            if self.fields.is_empty() {
                return Err(DefinitionError::ConversionError(
                    "screen without fields".to_string(),
                ));
            }
            let mut form = DefinitionSpec::new("form").with_data_path(self.binding);
            for field in self.fields {
                let mut input = DefinitionSpec::new("input")
                    .with_key(field.name)
                    .with_data_path(field.name);
                input.label = Some(field.caption.to_string());
                form = form.with_child(input);
            }
            Ok(form)
        }
    }

    let tree = Decoder::default()
        .decode(Screen {
            binding: "%1%",
            fields: vec![Field {
                name: "total",
                caption: "Total",
            }],
        })
        .unwrap();
    let total = by_key(&tree, "total");
    assert_eq!(tree.normalized_paths(total), ["%1%.total"]);
    assert_eq!(tree[total].kind.label(), Some("Total"));

    let empty = Decoder::default().decode(Screen {
        binding: "%0%",
        fields: vec![],
    });
    assert!(matches!(empty, Err(DefinitionError::ConversionError(_))));
}

#[test]
fn test_encode_round_trip() {
    let tree = customer_form();
    let root = tree.root().unwrap();
    let encoded = tree.to_json(root);

    assert_eq!(encoded["kind"], json!("form"));
    assert_eq!(encoded["dataPath"], json!("%0%.customer"));
    assert_eq!(encoded["children"][1]["hideIfEmpty"], json!(true));
    assert_eq!(
        encoded["children"][3]["possibleValues"]["dataPath"],
        json!("%1%.countries")
    );
    assert!(encoded["children"][0].get("hidden").is_none());

    let reparsed = Decoder::default().decode(encoded).unwrap();
    let reparsed_root = reparsed.root().unwrap();
    assert_eq!(reparsed.encode(reparsed_root), tree.encode(root));
}

#[test]
fn test_set_parent_rules() {
    let mut tree = DefinitionTree::new();
    let first = tree.insert(panel("%0%"));
    let second = tree.insert(panel("%1%"));
    let leaf = tree.insert(input("name"));

    tree.set_parent(leaf, first).unwrap();
    // Same parent again: nothing changes.
    tree.set_parent(leaf, first).unwrap();
    assert_eq!(tree.children(first), [leaf]);

    assert_eq!(
        tree.set_parent(leaf, second),
        Err(DefinitionError::AlreadyParented {
            child: leaf.index(),
            current: first.index(),
            requested: second.index()
        })
    );
    assert_eq!(tree.normalized_paths(leaf), ["%0%.name"]);

    let orphan = tree.insert(input("x"));
    assert_eq!(
        tree.set_parent(orphan, leaf),
        Err(DefinitionError::NotAContainer(leaf.index()))
    );

    tree.set_parent(second, first).unwrap();
    assert!(matches!(
        tree.set_parent(first, second),
        Err(DefinitionError::CyclicParent { .. })
    ));
}

#[test]
fn test_set_data_path_renormalizes_subtree() {
    let mut tree = customer_form();
    let root = tree.root().unwrap();
    tree.set_data_path(root, "%3%.supplier");

    assert_eq!(
        tree.normalized_paths(by_key(&tree, "street")),
        ["%3%.supplier.address.street"]
    );
    let header = tree[root].kind.auxiliary(AuxiliarySlot::Header).unwrap();
    assert_eq!(tree.normalized_paths(header), ["%3%.supplier.name"]);
    // Anchored paths are left alone.
    let holder = tree[by_key(&tree, "country")]
        .kind
        .auxiliary(AuxiliarySlot::PossibleValues)
        .unwrap();
    assert_eq!(tree.normalized_paths(holder), ["%1%.countries"]);
}

#[test]
fn test_attach_auxiliary_replaces_occupant() {
    let mut tree = customer_form();
    let root = tree.root().unwrap();
    let old_header = tree[root].kind.auxiliary(AuxiliarySlot::Header).unwrap();

    let new_header = tree.insert(DefinitionNode::new(
        DefinitionKind::TextItem {
            text: "Billing".to_string(),
        },
        "vat",
    ));
    tree.attach_auxiliary(root, AuxiliarySlot::Header, new_header)
        .unwrap();

    assert!(!tree.contains(old_header));
    assert_eq!(
        tree[root].kind.auxiliary(AuxiliarySlot::Header),
        Some(new_header)
    );
    assert_eq!(tree.normalized_paths(new_header), ["%0%.customer.vat"]);
}

#[test]
fn test_remove_subtree() {
    let mut tree = customer_form();
    let before = tree.len();
    let address = by_key(&tree, "address");
    let street = by_key(&tree, "street");
    let root = tree.root().unwrap();

    tree.remove_subtree(address);
    assert_eq!(tree.len(), before - 3);
    assert!(!tree.contains(address));
    assert!(!tree.contains(street));
    assert!(!tree.children(root).contains(&address));
    // Removing twice is harmless.
    tree.remove_subtree(address);
    assert_eq!(tree.len(), before - 3);
}

#[test]
#[should_panic(expected = "is not part of this tree")]
fn test_stale_handle_panics_on_index() {
    let mut tree = customer_form();
    let vat = by_key(&tree, "vat");
    tree.remove_subtree(vat);
    let _ = &tree[vat];
}

#[test]
fn test_graft_scopes_and_observes() {
    let mut tree = customer_form();
    let address = by_key(&tree, "address");
    let observer = Observer::builder().translate(|s| s.to_uppercase()).build();
    tree.set_observer(tree.root().unwrap(), observer.clone());

    let extra = Decoder::default()
        .decode(json!({
            "kind": "panel",
            "key": "geo",
            "dataPath": "geo",
            "children": [{ "kind": "input", "key": "lat", "dataPath": "lat" }]
        }))
        .unwrap();
    let geo = tree.graft(address, &extra).unwrap();

    assert_eq!(tree.children(address).last(), Some(&geo));
    assert_eq!(
        tree.normalized_paths(by_key(&tree, "lat")),
        ["%0%.customer.address.geo.lat"]
    );
    assert!(Rc::ptr_eq(
        tree.observer(by_key(&tree, "lat")).unwrap(),
        &observer
    ));

    let not_container = tree.graft(by_key(&tree, "name"), &extra);
    assert!(matches!(not_container, Err(DefinitionError::NotAContainer(_))));
    assert!(matches!(
        tree.graft(address, &DefinitionTree::new()),
        Err(DefinitionError::ConversionError(_))
    ));
}

#[test]
fn test_replace_children_keeps_order() {
    let mut tree = customer_form();
    let address = by_key(&tree, "address");
    let street = by_key(&tree, "street");
    let replacements: Vec<DefinitionTree> = ["zip", "town"]
        .into_iter()
        .map(|key| {
            Decoder::default()
                .decode(json!({ "kind": "input", "key": key, "dataPath": key }))
                .unwrap()
        })
        .collect();

    let added = tree.replace_children(address, &replacements).unwrap();
    assert_eq!(tree.children(address), added.as_slice());
    assert!(!tree.contains(street));
    assert_eq!(
        tree.normalized_paths(added[1]),
        ["%0%.customer.address.town"]
    );
    assert_eq!(tree.identity(added[0]), "zip");
}

#[test]
fn test_extract_is_standalone() {
    let tree = customer_form();
    let data = customer_data();
    let address = by_key(&tree, "address");

    let snapshot = tree.extract(address);
    let root = snapshot.root().unwrap();
    assert_eq!(snapshot.len(), 3);
    assert_eq!(snapshot.parent(root), None);
    assert_eq!(snapshot.data_path(root), "%0%.customer.address");

    // Decoding the snapshot on its own resolves the same values.
    let restored = Decoder::default().decode(snapshot.to_json(root)).unwrap();
    assert_eq!(
        values(restored.resolve_data(by_key(&restored, "city"), &data)),
        values(tree.resolve_data(by_key(&tree, "city"), &data))
    );
}

#[test]
fn test_extract_leaves_bundles_and_observers_behind() {
    let mut tree = customer_form();
    let data = customer_data();
    let root = tree.root().unwrap();
    tree.set_observer(root, Observer::builder().build());

    // Re-bundling the same definition over and over never nests snapshots.
    for _ in 0..4 {
        let request = tree.resolution_request(root, &data);
        tree.set_resolution_bundle(root, ResolutionBundle::new(request.definition, request.data));
    }
    let held = tree[root].resolution_bundle().unwrap();
    let held_root = held.definition.root().unwrap();
    assert!(held.definition[held_root].resolution_bundle().is_none());

    let snapshot = tree.extract(root);
    for id in snapshot.ids() {
        assert!(snapshot[id].resolution_bundle().is_none());
        assert!(snapshot[id].observer().is_none());
    }
    assert_eq!(snapshot.len(), tree.len());
}

#[test]
fn test_failed_decode_into_leaves_tree_untouched() {
    let mut tree = customer_form();
    let before = tree.ids().collect::<Vec<_>>();
    let spec: DefinitionSpec = serde_json::from_value(json!({
        "kind": "panel",
        "children": [
            { "kind": "input", "dataPath": "a" },
            { "kind": "panel", "children": [{ "kind": "carousel" }] }
        ]
    }))
    .unwrap();

    assert!(Decoder::default().decode_into(&mut tree, &spec).is_err());
    assert_eq!(tree.ids().collect::<Vec<_>>(), before);

    let leaf_with_children: DefinitionSpec = serde_json::from_value(json!({
        "kind": "input",
        "children": [{ "kind": "input" }]
    }))
    .unwrap();
    assert!(matches!(
        Decoder::default().decode_into(&mut tree, &leaf_with_children),
        Err(DefinitionError::NotAContainer(_))
    ));
    assert_eq!(tree.ids().collect::<Vec<_>>(), before);
    assert_eq!(tree.root(), before.first().copied());
}

#[test]
fn test_identity_prefers_key_then_position() {
    let tree = Decoder::default()
        .decode(json!({
            "kind": "form",
            "header": { "kind": "panel", "children": [{ "kind": "textItem" }] },
            "children": [
                { "kind": "input" },
                { "kind": "panel", "children": [{ "kind": "input" }, { "kind": "input", "key": "named" }] }
            ]
        }))
        .unwrap();
    let root = tree.root().unwrap();
    let header = tree[root].kind.auxiliary(AuxiliarySlot::Header).unwrap();
    let nested = tree.children(root)[1];

    assert_eq!(tree.identity(root), "/");
    assert_eq!(tree.identity(tree.children(root)[0]), "/0");
    assert_eq!(tree.identity(tree.children(nested)[0]), "/1/0");
    assert_eq!(tree.identity(tree.children(nested)[1]), "named");
    assert_eq!(tree.identity(header), "/header");
    assert_eq!(tree.identity(tree.children(header)[0]), "/header/0");
}

#[test]
fn test_lineage_and_subtree_order() {
    let tree = customer_form();
    let street = by_key(&tree, "street");
    let lineage: Vec<String> = tree.lineage(street).map(|id| tree.identity(id)).collect();
    assert_eq!(lineage, ["street", "address", "customer"]);

    let order: Vec<String> = tree
        .subtree(by_key(&tree, "customer"))
        .into_iter()
        .map(|id| tree.identity(id))
        .collect();
    assert_eq!(
        order,
        [
            "customer", "name", "vat", "address", "street", "city", "country",
            "/3/possibleValues", "active", "/header"
        ]
    );
}
