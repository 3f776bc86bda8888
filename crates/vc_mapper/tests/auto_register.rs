#![cfg(feature = "auto_register")]

use vc_mapper::diagnostics::ConversionDiagnostics;
use vc_mapper::info::Typed;
use vc_mapper::raw::RawValue;
use vc_mapper::registry::{TypeRegistry, TypeTraitEnum, TypeTraitStructure};
use vc_mapper::{Configurable, Mapper};

#[derive(Debug, PartialEq, Configurable)]
#[config(auto_register)]
enum Level {
    Debug,
    Info,
}

#[derive(Debug, Configurable)]
#[config(auto_register)]
struct Logging {
    level: Level,
    #[config(default)]
    targets: Vec<String>,
}

#[test]
fn annotated_types_are_collected() {
    let mut registry = TypeRegistry::empty();
    assert!(registry.auto_register());

    let logging = Logging::type_descriptor().type_id();
    let level = Level::type_descriptor().type_id();
    assert!(registry.get_type_trait::<TypeTraitStructure>(logging).is_some());
    assert!(registry.get_type_trait::<TypeTraitEnum>(level).is_some());
    // Dependencies come along.
    assert!(registry.get_with_type_name("Vec<String>").is_some());

    // Repeated calls are no-ops.
    let len = registry.len();
    assert!(registry.auto_register());
    assert_eq!(registry.len(), len);
}

#[test]
fn global_mapper_needs_no_registration() {
    let raw: RawValue = [("level", "INFO")].into_iter().collect();
    let mut diagnostics = ConversionDiagnostics::new();

    let converted = Mapper::global()
        .map(Some(&raw), Logging::type_descriptor(), &mut diagnostics)
        .unwrap()
        .unwrap();

    assert!(!converted.fully_valid);
    assert_eq!(diagnostics.messages_for("targets").len(), 1);

    let logging = converted.downcast::<Logging>().unwrap().into_value();
    assert_eq!(logging.level, Level::Info);
    assert!(logging.targets.is_empty());
}
