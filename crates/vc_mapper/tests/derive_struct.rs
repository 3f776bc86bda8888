use std::collections::BTreeMap;

use vc_mapper::info::{ScalarKind, TypeKind, Typed};
use vc_mapper::instantiate::FELL_BACK_TO_DEFAULT;
use vc_mapper::raw::RawValue;
use vc_mapper::registry::{TypeRegistry, TypeTraitStructure};
use vc_mapper::{Configurable, Mapper};

fn json(text: &str) -> RawValue {
    serde_json::from_str(text).unwrap()
}

#[derive(Debug, PartialEq, Configurable)]
struct Window {
    title: String,
    #[config(default = "default_size")]
    size: u32,
    #[config(default)]
    resizable: bool,
}

fn default_size() -> u32 {
    3
}

#[test]
fn defaulted_slot_records_one_diagnostic() {
    let raw = json(r#"{ "title": "main", "size": "huge" }"#);
    let conversion = Mapper::new().map_as::<Window>(&raw).unwrap();

    assert!(conversion.is_present());
    assert!(!conversion.is_fully_valid());

    // `resizable` is missing, `size` is unusable: both fall back.
    let diagnostics = conversion.diagnostics();
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics.messages_for("size"), [FELL_BACK_TO_DEFAULT]);
    assert_eq!(diagnostics.messages_for("resizable"), [FELL_BACK_TO_DEFAULT]);

    assert_eq!(
        conversion.into_value(),
        Some(Window {
            title: "main".into(),
            size: 3,
            resizable: false,
        })
    );
}

#[test]
fn complete_input_is_fully_valid() {
    let raw = json(r#"{ "title": "main", "size": 12, "resizable": true, "unknown": [1, 2] }"#);
    let conversion = Mapper::new().map_as::<Window>(&raw).unwrap();

    assert!(conversion.is_fully_valid());
    assert!(conversion.diagnostics().is_empty());
    assert_eq!(conversion.value().map(|window| window.size), Some(12));
}

#[test]
fn missing_mandatory_slot_makes_struct_absent() {
    let raw = json(r#"{ "size": 4 }"#);
    let conversion = Mapper::new().map_as::<Window>(&raw).unwrap();

    assert!(!conversion.is_present());
    assert!(!conversion.is_fully_valid());
}

#[test]
fn non_map_input_is_absent() {
    let conversion = Mapper::new().map_as::<Window>(&RawValue::from("main")).unwrap();
    assert!(!conversion.is_present());
    assert!(conversion.diagnostics().is_empty());
}

// -----------------------------------------------------------------------------
// Attributes

#[derive(Debug, Default, PartialEq, Configurable)]
struct Motd {
    #[config(name = "message", comment = "Shown on join")]
    text: String,
    #[config(skip)]
    rendered: Option<String>,
    r#type: String,
}

#[test]
fn export_names_follow_attributes() {
    let schema = Motd::schema();
    let names: Vec<_> = schema.slots().iter().map(|slot| slot.name()).collect();
    assert_eq!(names, ["message", "type"]);
    assert_eq!(schema.slots()[0].comments(), ["Shown on join"]);
    assert!(schema.has_constructor());
    assert!(!schema.has_default_constructor());
}

#[test]
fn skipped_fields_are_default_initialized() {
    let raw = json(r#"{ "message": "hello", "type": "plain", "rendered": "ignored" }"#);
    let motd = Mapper::new().map_as::<Motd>(&raw).unwrap().into_value().unwrap();

    assert_eq!(
        motd,
        Motd {
            text: "hello".into(),
            rendered: None,
            r#type: "plain".into(),
        }
    );
}

#[test]
fn derived_descriptor_and_registration() {
    let descriptor = Window::type_descriptor();
    assert!(matches!(descriptor.kind(), TypeKind::Struct));
    assert_eq!(descriptor.type_name(), "Window");

    let mut registry = TypeRegistry::empty();
    registry.register::<Window>();
    assert!(registry
        .get_type_trait::<TypeTraitStructure>(descriptor.type_id())
        .is_some());
    // Slot types are dependencies.
    assert!(registry.get_with_type_name("u32").is_some());
    assert!(registry.get_with_type_name("bool").is_some());
}

// -----------------------------------------------------------------------------
// Nesting

#[derive(Debug, Configurable)]
struct Endpoint {
    host: String,
    port: u16,
}

#[derive(Debug, Configurable)]
struct Cluster {
    name: String,
    primary: Endpoint,
    #[config(default)]
    replicas: Vec<Endpoint>,
    #[config(default)]
    labels: BTreeMap<String, String>,
    backup: Option<Endpoint>,
}

#[test]
fn nested_failures_report_full_paths() {
    let raw = json(
        r#"{
            "name": "eu",
            "primary": { "host": "a", "port": 1 },
            "replicas": [{ "host": "b", "port": 2 }, { "host": "c" }],
            "labels": { "tier": "gold", "zone": [3] },
            "backup": { "port": 7 }
        }"#,
    );
    let conversion = Mapper::new().map_as::<Cluster>(&raw).unwrap();
    let diagnostics = conversion.diagnostics();

    // The second replica misses `port`, so the whole list falls back.
    assert_eq!(diagnostics.messages_for("replicas"), [FELL_BACK_TO_DEFAULT]);
    // A label that is not a scalar is dropped from the map.
    assert_eq!(diagnostics.messages_for("labels"), ["cannot map value for key zone"]);
    assert_eq!(diagnostics.len(), 2);

    let cluster = conversion.into_value().unwrap();
    assert_eq!(cluster.primary.port, 1);
    assert!(cluster.replicas.is_empty());
    assert_eq!(cluster.labels.len(), 1);
    // An unusable optional is a valid `None`.
    assert!(cluster.backup.is_none());
}

#[test]
fn map_of_structures_keeps_usable_entries() {
    let raw = json(
        r#"{
            "a": { "host": "x", "port": 1 },
            "b": { "port": 2 },
            "c": { "host": "z", "port": 3 }
        }"#,
    );
    let conversion = Mapper::new()
        .map_as::<BTreeMap<String, Endpoint>>(&raw)
        .unwrap();

    assert!(!conversion.is_fully_valid());
    assert_eq!(conversion.diagnostics().len(), 1);
    assert_eq!(
        conversion.diagnostics().messages_for(""),
        ["cannot map value for key b"]
    );

    let endpoints = conversion.into_value().unwrap();
    assert_eq!(endpoints.keys().collect::<Vec<_>>(), ["a", "c"]);
    assert_eq!(endpoints["c"].host, "z");
}

#[test]
fn nested_round_trip() {
    let raw = json(
        r#"{
            "name": "us",
            "primary": { "host": "a", "port": 1 },
            "replicas": [{ "host": "b", "port": 2 }],
            "labels": { "tier": "silver" },
            "backup": { "host": "z", "port": 9 }
        }"#,
    );
    let mapper = Mapper::new();
    let cluster = mapper.map_as::<Cluster>(&raw).unwrap();
    assert!(cluster.is_fully_valid());

    let exported = mapper.export_value(cluster.value().unwrap()).unwrap().unwrap();
    assert_eq!(exported, raw);
}

#[test]
fn empty_optional_slot_is_omitted_on_export() {
    let raw = json(r#"{ "name": "x", "primary": { "host": "a", "port": 1 } }"#);
    let mapper = Mapper::new();
    let cluster = mapper.map_as::<Cluster>(&raw).unwrap().into_value().unwrap();

    let exported = mapper.export_value(&cluster).unwrap().unwrap();
    let keys: Vec<_> = exported.as_map().unwrap().keys().cloned().collect();
    assert_eq!(keys, ["name", "primary", "replicas", "labels"]);
    assert_eq!(exported.get("replicas"), Some(&RawValue::List(Vec::new())));
}

// -----------------------------------------------------------------------------
// Generics

#[derive(Debug, Configurable)]
struct Range<T> {
    low: T,
    high: T,
}

#[test]
fn generic_structs_have_one_descriptor_per_argument() {
    let bytes = Range::<u8>::type_descriptor();
    let floats = Range::<f64>::type_descriptor();
    assert_ne!(bytes, floats);
    assert_eq!(bytes.type_name(), "Range<u8>");

    let raw = json(r#"{ "low": 0.5, "high": 2.5 }"#);
    let range = Mapper::new().map_as::<Range<f64>>(&raw).unwrap().into_value().unwrap();
    assert_eq!((range.low, range.high), (0.5, 2.5));

    let schema = Range::<u8>::schema();
    assert_eq!(schema.slots()[0].declared().scalar_kind(), Some(&ScalarKind::U8));
}
