//! The recursive, type-directed mapper.
//!
//! [`Mapper::map`] turns a [`RawValue`] into a typed value by walking the
//! target's [`TypeDescriptor`]. The first applicable rule wins:
//!
//! 1. An optional target maps its inner type. An unusable inner value gives
//!    a valid empty optional, so optionals never propagate absence.
//! 2. A missing or null input is absent.
//! 3. A [leaf converter](crate::leaf) accepting the target produces the value.
//! 4. A list needs list input. One unusable element makes the whole list absent.
//! 5. A set needs list input. Unusable elements are dropped with a diagnostic.
//! 6. A map needs map input and `String` keys. Unusable entries are dropped
//!    with a diagnostic.
//! 7. A structure needs map input. Each slot is mapped from the entry named
//!    after it, then the [`Instantiator`](crate::instantiate::Instantiator)
//!    builds the instance.
//! 8. Anything else is absent.
//!
//! A composite value is fully valid only if all its parts are and nothing
//! was dropped or defaulted.
//!
//! [`Mapper::export`] walks the same rules backwards. Values that cannot be
//! exported, such as empty optionals or untyped values, are omitted.

// -----------------------------------------------------------------------------
// Modules

mod convert;
mod converted;
mod export;

// -----------------------------------------------------------------------------
// Exports

pub use converted::{Conversion, ConvertedValue};
pub use export::ExportContext;

use alloc::string::String;
use std::sync::OnceLock;

use bigdecimal::BigDecimal;

use crate::diagnostics::{ConversionDiagnostics, MappingPath};
use crate::info::TypeDescriptor;
use crate::leaf::{BigNumberConverter, LeafConverter, LeafRegistry};
use crate::raw::RawValue;
use crate::registry::{GetTypeMeta, TypeRegistry, TypeRegistryArc};
use crate::structure::StructureCache;
use crate::{MapperError, Reflect};

use convert::Converter;
use export::Exporter;

// -----------------------------------------------------------------------------
// Mapper

/// Converts raw documents into typed values and back.
///
/// A mapper owns its type registry, its leaf converters and its structure
/// cache. Each call to [`map`](Self::map) or [`export`](Self::export) is
/// independent; one mapper can serve several threads.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
///
/// use vc_mapper::Mapper;
/// use vc_mapper::raw::RawValue;
///
/// let raw: RawValue = serde_json::from_str(r#"{ "a": 1, "b": "two", "c": 3 }"#).unwrap();
///
/// let mapper = Mapper::new();
/// let conversion = mapper.map_as::<BTreeMap<String, u32>>(&raw).unwrap();
///
/// assert!(!conversion.is_fully_valid());
/// assert_eq!(conversion.diagnostics().messages_for("").len(), 1);
///
/// let limits = conversion.into_value().unwrap();
/// assert_eq!(limits.len(), 2);
/// assert_eq!(limits["c"], 3);
/// ```
pub struct Mapper {
    registry: TypeRegistryArc,
    leaf: LeafRegistry,
    structures: StructureCache,
}

impl Default for Mapper {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Mapper {
    /// A mapper with the built-in types and the default leaf converters.
    ///
    /// Other types are registered on first use by the typed methods, or
    /// explicitly with [`register`](Self::register).
    pub fn new() -> Self {
        Self::builder().build()
    }

    #[inline]
    pub fn builder() -> MapperBuilder {
        MapperBuilder::new()
    }

    /// The process-wide mapper.
    ///
    /// Created on first use with default settings and every type annotated
    /// with `#[config(auto_register)]` registered.
    pub fn global() -> &'static Mapper {
        static GLOBAL: OnceLock<Mapper> = OnceLock::new();
        GLOBAL.get_or_init(|| Mapper::builder().auto_register(true).build())
    }

    #[inline]
    pub fn registry(&self) -> &TypeRegistryArc {
        &self.registry
    }

    #[inline]
    pub fn leaf_converters(&self) -> &LeafRegistry {
        &self.leaf
    }

    #[inline]
    pub fn structures(&self) -> &StructureCache {
        &self.structures
    }

    /// Registers `T` and the types it depends on.
    pub fn register<T: GetTypeMeta>(&self) {
        self.registry.write().register::<T>();
    }

    /// Maps `raw` to `target`, recording soft failures in `diagnostics`.
    ///
    /// `Ok(None)` means the input cannot be mapped to `target`. A missing or
    /// null `raw` is only accepted by optional targets. The target and the
    /// types it contains must be registered.
    ///
    /// # Errors
    ///
    /// A [`MapperError`] for broken type definitions and for failures of
    /// user construction code. Data problems are never errors.
    pub fn map(
        &self,
        raw: Option<&RawValue>,
        target: &'static TypeDescriptor,
        diagnostics: &mut ConversionDiagnostics,
    ) -> Result<Option<ConvertedValue>, MapperError> {
        let registry = self.registry.read();
        let mut converter = Converter {
            mapper: self,
            registry: &registry,
            diagnostics,
        };
        converter.convert(raw, target, &MappingPath::root())
    }

    /// Registers `T`, maps `raw` to it and recovers the typed value.
    ///
    /// # Errors
    ///
    /// See [`map`](Self::map).
    pub fn map_as<T: GetTypeMeta + Reflect>(&self, raw: &RawValue) -> Result<Conversion<T>, MapperError> {
        self.register::<T>();

        let mut diagnostics = ConversionDiagnostics::new();
        let target = T::type_descriptor();
        let Some(converted) = self.map(Some(raw), target, &mut diagnostics)? else {
            return Ok(Conversion::new(None, diagnostics));
        };

        match converted.downcast::<T>() {
            Ok(converted) => Ok(Conversion::new(Some(converted), diagnostics)),
            Err(converted) => Err(MapperError::TypeMismatch {
                expected: target.type_path(),
                found: converted.value.reflect_type_path(),
                path: String::new(),
            }),
        }
    }

    /// Exports `value` as `target`.
    ///
    /// `Ok(None)` means the value has no raw form, like an empty optional.
    ///
    /// # Errors
    ///
    /// [`MapperError::TypeMismatch`] if `value` is not a `target`, and the
    /// definition errors of [`map`](Self::map).
    pub fn export(
        &self,
        value: &dyn Reflect,
        target: &'static TypeDescriptor,
    ) -> Result<Option<RawValue>, MapperError> {
        self.export_inner(value, target, None)
    }

    /// Exports `value` as `target`, collecting slot comments into `context`.
    ///
    /// # Errors
    ///
    /// See [`export`](Self::export).
    pub fn export_with_comments(
        &self,
        value: &dyn Reflect,
        target: &'static TypeDescriptor,
        context: &mut ExportContext,
    ) -> Result<Option<RawValue>, MapperError> {
        self.export_inner(value, target, Some(context))
    }

    /// Registers `T` and exports `value` as a `T`.
    ///
    /// # Errors
    ///
    /// See [`export`](Self::export).
    pub fn export_value<T: GetTypeMeta + Reflect>(&self, value: &T) -> Result<Option<RawValue>, MapperError> {
        self.register::<T>();
        self.export(value, T::type_descriptor())
    }

    fn export_inner(
        &self,
        value: &dyn Reflect,
        target: &'static TypeDescriptor,
        context: Option<&mut ExportContext>,
    ) -> Result<Option<RawValue>, MapperError> {
        let registry = self.registry.read();
        let mut exporter = Exporter {
            mapper: self,
            registry: &registry,
            context,
        };
        exporter.export(value, target, &MappingPath::root())
    }
}

impl core::fmt::Debug for Mapper {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Mapper")
            .field("registry", &self.registry)
            .field("leaf", &self.leaf)
            .field("structures", &self.structures)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// MapperBuilder

/// Configures a [`Mapper`].
///
/// # Example
///
/// ```
/// use std::str::FromStr;
///
/// use bigdecimal::BigDecimal;
/// use vc_mapper::Mapper;
/// use vc_mapper::raw::RawValue;
///
/// let mapper = Mapper::builder()
///     .big_number_threshold(BigDecimal::from(1_000_000))
///     .build();
///
/// let value = BigDecimal::from_str("2500000").unwrap();
/// let exported = mapper.export_value(&value).unwrap();
///
/// assert!(matches!(exported, Some(RawValue::String(text)) if text.contains('e')));
/// ```
pub struct MapperBuilder {
    registry: Option<TypeRegistry>,
    leaf: LeafRegistry,
    custom_converters: usize,
    auto_register: bool,
}

impl Default for MapperBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl MapperBuilder {
    pub fn new() -> Self {
        Self {
            registry: None,
            leaf: LeafRegistry::new(),
            custom_converters: 0,
            auto_register: false,
        }
    }

    /// Uses `registry` instead of [`TypeRegistry::new`].
    pub fn registry(mut self, registry: TypeRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Adds a leaf converter tried before the default ones.
    ///
    /// Custom converters are tried in the order they are added.
    pub fn leaf_converter<C: LeafConverter>(mut self, converter: C) -> Self {
        self.leaf.insert(self.custom_converters, converter);
        self.custom_converters += 1;
        self
    }

    /// The magnitude from which big decimals export in scientific notation.
    pub fn big_number_threshold(mut self, threshold: BigDecimal) -> Self {
        self.leaf.replace(BigNumberConverter::with_threshold(threshold));
        self
    }

    /// Registers every `#[config(auto_register)]` type when building.
    ///
    /// Does nothing without the `auto_register` feature.
    pub fn auto_register(mut self, enabled: bool) -> Self {
        self.auto_register = enabled;
        self
    }

    pub fn build(self) -> Mapper {
        let mut registry = self.registry.unwrap_or_default();
        if self.auto_register && !registry.auto_register() {
            log::warn!("automatic type registration is not available");
        }
        Mapper {
            registry: TypeRegistryArc::new(registry),
            leaf: self.leaf,
            structures: StructureCache::new(),
        }
    }
}

impl core::fmt::Debug for MapperBuilder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MapperBuilder")
            .field("leaf", &self.leaf)
            .field("custom_converters", &self.custom_converters)
            .field("auto_register", &self.auto_register)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::{ExportContext, Mapper};
    use crate::MapperError;
    use crate::diagnostics::ConversionDiagnostics;
    use crate::info::Typed;
    use crate::raw::RawValue;
    use alloc::collections::{BTreeMap, BTreeSet};
    use alloc::string::String;
    use alloc::vec::Vec;

    fn json(text: &str) -> RawValue {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn lists_abort_on_unusable_element() {
        let mapper = Mapper::new();
        let conversion = mapper.map_as::<Vec<u8>>(&json(r#"[1, "x", 3]"#)).unwrap();
        assert!(!conversion.is_present());
        assert!(conversion.diagnostics().is_empty());

        let conversion = mapper.map_as::<Vec<u8>>(&json("[1, 2, 3]")).unwrap();
        assert!(conversion.is_fully_valid());
        assert_eq!(conversion.into_value(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn sets_drop_unusable_elements() {
        let mapper = Mapper::new();
        let conversion = mapper
            .map_as::<BTreeSet<String>>(&json(r#"["a", ["nested"], "b", "a"]"#))
            .unwrap();

        assert!(!conversion.is_fully_valid());
        assert_eq!(
            conversion.diagnostics().messages_for(""),
            ["cannot convert value at index 1"]
        );
        let set = conversion.into_value().unwrap();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn maps_drop_unusable_entries() {
        let mapper = Mapper::new();
        let raw = json(r#"{"a": [1], "b": 2, "c": [3, 4]}"#);
        let conversion = mapper.map_as::<BTreeMap<String, Vec<i64>>>(&raw).unwrap();

        assert_eq!(
            conversion.diagnostics().messages_for(""),
            ["cannot map value for key b"]
        );
        let map = conversion.into_value().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["c"], [3, 4]);
    }

    #[test]
    fn non_string_keys_are_rejected() {
        let mapper = Mapper::new();
        let error = mapper
            .map_as::<BTreeMap<u32, String>>(&json(r#"{"1": "one"}"#))
            .unwrap_err();
        assert!(matches!(error, MapperError::NonStringMapKey { key: "u32", .. }));

        // Non-map input never reaches the key check.
        let conversion = mapper.map_as::<BTreeMap<u32, String>>(&json("[]")).unwrap();
        assert!(!conversion.is_present());

        let mut value = BTreeMap::new();
        value.insert(1_u32, String::from("one"));
        assert!(mapper.export_value(&value).is_err());
    }

    #[test]
    fn optionals_never_propagate_absence() {
        let mapper = Mapper::new();
        mapper.register::<Option<u16>>();
        let target = <Option<u16>>::type_descriptor();
        let mut diagnostics = ConversionDiagnostics::new();

        for raw in [None, Some(RawValue::Null), Some(RawValue::from("x"))] {
            let converted = mapper
                .map(raw.as_ref(), target, &mut diagnostics)
                .unwrap()
                .unwrap();
            assert!(converted.fully_valid);
            assert_eq!(converted.downcast::<Option<u16>>().unwrap().value, None);
        }

        let converted = mapper
            .map(Some(&RawValue::Int(8)), target, &mut diagnostics)
            .unwrap()
            .unwrap();
        assert_eq!(converted.downcast::<Option<u16>>().unwrap().value, Some(8));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn missing_input_is_absent() {
        let mapper = Mapper::new();
        let mut diagnostics = ConversionDiagnostics::new();
        let converted = mapper
            .map(None, String::type_descriptor(), &mut diagnostics)
            .unwrap();
        assert!(converted.is_none());
    }

    #[test]
    fn untyped_values_pass_through_but_never_export() {
        let mapper = Mapper::new();
        let raw = json(r#"{"anything": [1, true]}"#);
        let conversion = mapper.map_as::<RawValue>(&raw).unwrap();
        assert_eq!(conversion.value(), Some(&raw));

        assert_eq!(mapper.export_value(&raw).unwrap(), None);
    }

    #[test]
    fn export_drops_empty_optionals_from_collections() {
        let mapper = Mapper::new();
        let value = vec![Some(1_i32), None, Some(3)];
        let exported = mapper.export_value(&value).unwrap();
        assert_eq!(exported, Some(RawValue::from(vec![1, 3])));
    }

    #[test]
    fn export_checks_the_runtime_type() {
        let mapper = Mapper::new();
        let error = mapper.export(&5_u8, String::type_descriptor()).unwrap_err();
        assert!(matches!(error, MapperError::TypeMismatch { found: "u8", .. }));

        let mut context = ExportContext::new();
        let exported = mapper
            .export_with_comments(&String::from("x"), String::type_descriptor(), &mut context)
            .unwrap();
        assert_eq!(exported, Some(RawValue::from("x")));
        assert!(context.comments().is_empty());
    }

    #[test]
    fn unregistered_targets_are_errors() {
        let mapper = Mapper::new();
        let mut diagnostics = ConversionDiagnostics::new();
        let error = mapper
            .map(Some(&json("[1]")), <Vec<u8>>::type_descriptor(), &mut diagnostics)
            .unwrap_err();
        assert!(matches!(error, MapperError::UnregisteredType { .. }));
    }
}
