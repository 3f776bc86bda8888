use vc_mapper::instantiate::FELL_BACK_TO_DEFAULT;
use vc_mapper::raw::RawValue;
use vc_mapper::{Configurable, Mapper};

fn ron(text: &str) -> RawValue {
    ron::from_str(text).unwrap()
}

#[derive(Debug, Configurable)]
#[config(mutable)]
struct Limits {
    #[config(default)]
    max_users: u32,
    #[config(default = "default_motd")]
    motd: String,
    owner: String,
    #[config(skip)]
    loaded_from: String,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_users: 25,
            motd: String::from("welcome"),
            owner: String::new(),
            loaded_from: String::from("defaults"),
        }
    }
}

fn default_motd() -> String {
    String::from("hello")
}

#[test]
fn schema_uses_mutation() {
    let schema = Limits::schema();
    assert!(schema.has_default_constructor());
    assert!(!schema.has_constructor());
    assert_eq!(schema.slots().len(), 3);
    assert!(schema.slots().iter().all(|slot| slot.is_mutable()));
    assert!(!schema.slots()[2].has_default());
}

#[test]
fn defaults_come_from_the_instance_or_the_function() {
    let raw = ron(r#"{ "motd": ["not", "a", "string"], "owner": "ops" }"#);
    let conversion = Mapper::new().map_as::<Limits>(&raw).unwrap();

    assert!(!conversion.is_fully_valid());
    assert_eq!(conversion.diagnostics().messages_for("max_users"), [FELL_BACK_TO_DEFAULT]);
    assert_eq!(conversion.diagnostics().messages_for("motd"), [FELL_BACK_TO_DEFAULT]);

    let limits = conversion.into_value().unwrap();
    // Retained from `Default::default()`.
    assert_eq!(limits.max_users, 25);
    // Produced by `default_motd`, not the instance's "welcome".
    assert_eq!(limits.motd, "hello");
    assert_eq!(limits.owner, "ops");
    assert_eq!(limits.loaded_from, "defaults");
}

#[test]
fn assigned_slots_replace_instance_values() {
    let raw = ron(r#"{ "max_users": 300, "motd": "hi", "owner": "root" }"#);
    let conversion = Mapper::new().map_as::<Limits>(&raw).unwrap();

    assert!(conversion.is_fully_valid());
    let limits = conversion.into_value().unwrap();
    assert_eq!((limits.max_users, limits.motd.as_str()), (300, "hi"));
}

#[test]
fn missing_mandatory_slot_discards_the_instance() {
    let raw = ron(r#"{ "max_users": 3, "motd": "hi" }"#);
    let conversion = Mapper::new().map_as::<Limits>(&raw).unwrap();

    assert!(!conversion.is_present());
    assert!(conversion.diagnostics().is_empty());
}

#[test]
fn skipped_fields_are_not_exported() {
    let mapper = Mapper::new();
    let exported = mapper.export_value(&Limits::default()).unwrap().unwrap();

    let keys: Vec<_> = exported.as_map().unwrap().keys().cloned().collect();
    assert_eq!(keys, ["max_users", "motd", "owner"]);
    assert_eq!(exported.get("motd").and_then(RawValue::as_str), Some("welcome"));
}
