use std::collections::HashSet;

use vc_mapper::diagnostics::ConversionDiagnostics;
use vc_mapper::info::Typed;
use vc_mapper::ops::Enumeration;
use vc_mapper::raw::RawValue;
use vc_mapper::{Configurable, Mapper, MapperError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Configurable)]
enum Mode {
    Fast,
    #[config(name = "CAREFUL")]
    Slow,
}

#[derive(Debug, Configurable)]
struct Job {
    name: String,
    #[config(default = "default_mode")]
    mode: Mode,
}

fn default_mode() -> Mode {
    Mode::Slow
}

#[test]
fn variant_names_and_indexes() {
    let info = Mode::type_descriptor().scalar_kind().unwrap().as_enum().unwrap();
    assert_eq!(info.variants(), ["Fast", "CAREFUL"]);

    assert_eq!(Mode::from_variant_index(1), Some(Mode::Slow));
    assert_eq!(Mode::from_variant_index(2), None);
    assert_eq!(Mode::Fast.variant_index(), 0);
}

#[test]
fn input_is_matched_ignoring_case() {
    let mapper = Mapper::new();
    for (input, expected) in [
        ("fast", Mode::Fast),
        ("FAST", Mode::Fast),
        ("Careful", Mode::Slow),
    ] {
        let conversion = mapper.map_as::<Mode>(&RawValue::from(input)).unwrap();
        assert!(conversion.is_fully_valid());
        assert_eq!(conversion.into_value(), Some(expected));
    }

    // The Rust name of a renamed variant is not a valid input.
    assert!(!mapper.map_as::<Mode>(&RawValue::from("slow")).unwrap().is_present());
    assert!(!mapper.map_as::<Mode>(&RawValue::Int(0)).unwrap().is_present());
}

#[test]
fn export_writes_canonical_names() {
    let mapper = Mapper::new();
    assert_eq!(
        mapper.export_value(&Mode::Slow).unwrap(),
        Some(RawValue::from("CAREFUL"))
    );
    assert_eq!(
        mapper.export_value(&Mode::Fast).unwrap(),
        Some(RawValue::from("Fast"))
    );
}

#[test]
fn unknown_variant_falls_back_in_a_struct() {
    let raw: RawValue = [("name", "nightly"), ("mode", "turbo")].into_iter().collect();
    let conversion = Mapper::new().map_as::<Job>(&raw).unwrap();

    assert!(!conversion.is_fully_valid());
    assert_eq!(conversion.diagnostics().len(), 1);
    assert_eq!(conversion.into_value().map(|job| job.mode), Some(Mode::Slow));
}

#[test]
fn set_drops_unknown_variants() {
    let raw = RawValue::from(vec!["fast", "slow", "careful"]);
    let conversion = Mapper::new().map_as::<HashSet<Mode>>(&raw).unwrap();

    assert!(!conversion.is_fully_valid());
    assert_eq!(
        conversion.diagnostics().messages_for(""),
        ["cannot convert value at index 1"]
    );

    let modes = conversion.into_value().unwrap();
    assert_eq!(modes, HashSet::from([Mode::Fast, Mode::Slow]));
}

#[test]
fn unregistered_enums_are_errors() {
    let mapper = Mapper::new();
    let mut diagnostics = ConversionDiagnostics::new();

    let error = mapper
        .map(Some(&RawValue::from("fast")), Mode::type_descriptor(), &mut diagnostics)
        .unwrap_err();
    assert!(matches!(error, MapperError::UnregisteredType { .. }));

    let error = mapper.export(&Mode::Fast, Mode::type_descriptor()).unwrap_err();
    assert!(matches!(error, MapperError::UnregisteredType { .. }));

    // Once registered, a bad name is a data problem again.
    mapper.register::<Mode>();
    let converted = mapper
        .map(Some(&RawValue::from("turbo")), Mode::type_descriptor(), &mut diagnostics)
        .unwrap();
    assert!(converted.is_none());
    assert!(diagnostics.is_empty());
}
