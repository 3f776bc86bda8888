use vc_mapper::info::{NonGenericDescriptorCell, TypeDescriptor, Typed};
use vc_mapper::raw::RawValue;
use vc_mapper::registry::{GetTypeMeta, TypeMeta, TypeRegistry, TypeTraitStructure};
use vc_mapper::structure::{SchemaBuilder, StructureSchema};
use vc_mapper::{Configurable, Mapper, MapperError, Reflect};

/// Implements the reflection traits of a hand-written structure whose schema
/// is produced by `$schema`.
macro_rules! hand_built {
    ($ty:ident => $schema:expr) => {
        #[derive(Debug, Default)]
        struct $ty {
            host: String,
            port: u16,
        }

        impl Typed for $ty {
            fn type_descriptor() -> &'static TypeDescriptor {
                static CELL: NonGenericDescriptorCell = NonGenericDescriptorCell::new();
                CELL.get_or_init(TypeDescriptor::structure::<Self>)
            }
        }

        impl GetTypeMeta for $ty {
            fn get_type_meta() -> TypeMeta {
                let mut meta = TypeMeta::of::<Self>();
                meta.insert_trait(TypeTraitStructure::new(Self::schema));
                meta
            }

            fn register_dependencies(registry: &mut TypeRegistry) {
                registry.register::<String>();
                registry.register::<u16>();
            }
        }

        impl Configurable for $ty {
            fn schema() -> StructureSchema {
                let schema: fn() -> StructureSchema = $schema;
                schema()
            }
        }
    };
}

fn endpoint() -> RawValue {
    [
        ("host", RawValue::from("example.org")),
        ("port", RawValue::from(0_u16)),
    ]
    .into_iter()
    .collect()
}

fn slots<T: Reflect + Typed + HasEndpoint>() -> SchemaBuilder<T> {
    SchemaBuilder::<T>::new()
        .slot("host", |this: &T| this.host())
        .slot("port", |this: &T| this.port())
}

trait HasEndpoint {
    fn host(&self) -> &String;
    fn port(&self) -> &u16;
}

macro_rules! has_endpoint {
    ($($ty:ident),*) => {$(
        impl HasEndpoint for $ty {
            fn host(&self) -> &String {
                &self.host
            }
            fn port(&self) -> &u16 {
                &self.port
            }
        }
    )*};
}

hand_built!(WrongType => || {
    slots::<WrongType>()
        .construct(|args| {
            let host = args.next::<String>()?;
            let port = u16::try_from(args.next::<u32>()?).unwrap_or_default();
            Ok(WrongType { host, port })
        })
        .build()
});

hand_built!(TooFew => || {
    slots::<TooFew>()
        .construct(|args| Ok(TooFew { host: args.next()?, port: 0 }))
        .build()
});

hand_built!(TooMany => || {
    slots::<TooMany>()
        .construct(|args| {
            let endpoint = TooMany { host: args.next()?, port: args.next()? };
            let _extra: u16 = args.next()?;
            Ok(endpoint)
        })
        .build()
});

hand_built!(Validated => || {
    slots::<Validated>()
        .construct(|args| {
            let host = args.next()?;
            let port: u16 = args.next()?;
            if port == 0 {
                return Err(args.fail("port must not be zero"));
            }
            Ok(Validated { host, port })
        })
        .build()
});

hand_built!(Duplicate => || {
    SchemaBuilder::<Duplicate>::new()
        .slot("host", |this| &this.host)
        .slot("host", |this| &this.port)
        .default_construct(Duplicate::default)
        .build()
});

hand_built!(Unnamed => || {
    SchemaBuilder::<Unnamed>::new()
        .slot("", |this| &this.host)
        .default_construct(Unnamed::default)
        .build()
});

hand_built!(Immutable => || {
    SchemaBuilder::<Immutable>::new()
        .slot("host", |this| &this.host)
        .mutable(|this, value| this.host = value)
        .slot("port", |this| &this.port)
        .default_construct(Immutable::default)
        .build()
});

hand_built!(Unbuildable => || {
    slots::<Unbuildable>().build()
});

has_endpoint!(WrongType, TooFew, TooMany, Validated, Unbuildable);

#[derive(Debug, Configurable)]
struct Upstream {
    name: String,
    target: Validated,
}

#[test]
fn wrong_argument_type_is_a_slot_assignment_error() {
    let error = Mapper::new().map_as::<WrongType>(&endpoint()).unwrap_err();
    assert!(matches!(
        error,
        MapperError::SlotAssignment { ref slot, expected: "u32", .. } if slot == "port"
    ));
}

#[test]
fn argument_count_must_match_the_slots() {
    let mapper = Mapper::new();

    let error = mapper.map_as::<TooFew>(&endpoint()).unwrap_err();
    assert!(matches!(
        error,
        MapperError::Construction { ref message, .. }
            if message == "constructor left 1 of 2 slot values unused"
    ));

    let error = mapper.map_as::<TooMany>(&endpoint()).unwrap_err();
    assert!(matches!(
        error,
        MapperError::Construction { ref message, .. }
            if message == "constructor takes more than the 2 slot values"
    ));
}

#[test]
fn validation_failures_carry_the_path() {
    let mapper = Mapper::new();

    let error = mapper.map_as::<Validated>(&endpoint()).unwrap_err();
    assert_eq!(
        error.to_string(),
        format!(
            "failed to construct `{}` at ``: port must not be zero",
            Validated::type_descriptor().type_path()
        )
    );

    let raw: RawValue = [("name", RawValue::from("api")), ("target", endpoint())]
        .into_iter()
        .collect();
    let error = mapper.map_as::<Upstream>(&raw).unwrap_err();
    assert!(matches!(error, MapperError::Construction { ref path, .. } if path == "target"));
}

#[test]
fn valid_input_passes_validation() {
    let raw: RawValue = [("host", RawValue::from("a")), ("port", RawValue::from(443_u16))]
        .into_iter()
        .collect();
    let conversion = Mapper::new().map_as::<Validated>(&raw).unwrap();
    assert_eq!(conversion.into_value().map(|value| value.port), Some(443));
}

#[test]
fn broken_schemas_are_rejected_on_discovery() {
    let mapper = Mapper::new();

    assert!(matches!(
        mapper.map_as::<Duplicate>(&endpoint()),
        Err(MapperError::DuplicateExportName { ref name, .. }) if name == "host"
    ));
    assert!(matches!(
        mapper.map_as::<Unnamed>(&endpoint()),
        Err(MapperError::EmptyExportName { .. })
    ));
    assert!(matches!(
        mapper.map_as::<Immutable>(&endpoint()),
        Err(MapperError::MissingMutator { ref slot, .. }) if slot == "port"
    ));
    assert!(matches!(
        mapper.map_as::<Unbuildable>(&endpoint()),
        Err(MapperError::Unmappable { .. })
    ));
}

#[test]
fn export_reports_broken_schemas_too() {
    let error = Mapper::new().export_value(&Duplicate::default()).unwrap_err();
    assert!(matches!(error, MapperError::DuplicateExportName { .. }));
}
