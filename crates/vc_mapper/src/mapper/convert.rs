use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::diagnostics::{ConversionDiagnostics, MappingPath};
use crate::info::{DescriptorFn, TypeDescriptor, TypeKind};
use crate::mapper::{ConvertedValue, Mapper};
use crate::raw::RawValue;
use crate::registry::{
    TypeRegistry, TypeTrait, TypeTraitEnum, TypeTraitMapping, TypeTraitOptional, TypeTraitSequence,
};
use crate::{MapperError, Reflect};

/// One recursive descent from raw input to typed values.
pub(super) struct Converter<'a> {
    pub mapper: &'a Mapper,
    pub registry: &'a TypeRegistry,
    pub diagnostics: &'a mut ConversionDiagnostics,
}

pub(super) fn type_trait<'r, D: TypeTrait>(
    registry: &'r TypeRegistry,
    target: &TypeDescriptor,
    path: &MappingPath,
) -> Result<&'r D, MapperError> {
    let Some(type_meta) = registry.get(target.type_id()) else {
        return Err(MapperError::UnregisteredType {
            ty: target.type_path(),
            path: path.to_string(),
        });
    };
    type_meta
        .get_trait::<D>()
        .ok_or_else(|| MapperError::MissingTypeTrait {
            ty: target.type_path(),
            type_trait: core::any::type_name::<D>(),
            path: path.to_string(),
        })
}

/// Fails if `target` is an enum without a registered [`TypeTraitEnum`].
///
/// The enum leaf converter cannot tell a missing registration from a bad
/// variant name, so callers check this when no converter accepted a scalar.
pub(super) fn require_enum_trait(
    registry: &TypeRegistry,
    target: &TypeDescriptor,
    path: &MappingPath,
) -> Result<(), MapperError> {
    if target.scalar_kind().is_some_and(|kind| kind.as_enum().is_some()) {
        type_trait::<TypeTraitEnum>(registry, target, path)?;
    }
    Ok(())
}

pub(super) fn check_type(
    value: &dyn Reflect,
    target: &TypeDescriptor,
    path: &MappingPath,
) -> Result<(), MapperError> {
    if value.reflect_type_id() == target.type_id() {
        Ok(())
    } else {
        Err(MapperError::TypeMismatch {
            expected: target.type_path(),
            found: value.reflect_type_path(),
            path: path.to_string(),
        })
    }
}

fn rejected(target: &TypeDescriptor, path: &MappingPath) -> MapperError {
    MapperError::Construction {
        ty: target.type_path(),
        path: path.to_string(),
        message: String::from("the container rejected its converted contents"),
    }
}

impl Converter<'_> {
    /// Maps `raw` to `target`. `None` is a propagated absence.
    pub fn convert(
        &mut self,
        raw: Option<&RawValue>,
        target: &'static TypeDescriptor,
        path: &MappingPath,
    ) -> Result<Option<ConvertedValue>, MapperError> {
        let raw = raw.filter(|raw| !raw.is_null());

        if let TypeKind::Optional(inner) = *target.kind() {
            return self.convert_optional(raw, target, inner, path).map(Some);
        }

        let Some(raw) = raw else {
            return Ok(None);
        };

        if let Some(value) = self.mapper.leaf.try_convert(raw, target, self.registry) {
            check_type(&*value, target, path)?;
            return Ok(Some(ConvertedValue::valid(value)));
        }

        match *target.kind() {
            TypeKind::List(elem) => self.convert_list(raw, target, elem, path),
            TypeKind::Set(elem) => self.convert_set(raw, target, elem, path),
            TypeKind::Map { key, value } => self.convert_map(raw, target, key, value, path),
            TypeKind::Struct => self.convert_struct(raw, target, path),
            TypeKind::Scalar(_) | TypeKind::Optional(_) => {
                require_enum_trait(self.registry, target, path)?;
                log::trace!(
                    "no leaf converter accepts {} for `{}` at `{path}`",
                    raw.kind_name(),
                    target.type_path()
                );
                Ok(None)
            }
        }
    }

    fn convert_optional(
        &mut self,
        raw: Option<&RawValue>,
        target: &'static TypeDescriptor,
        inner: DescriptorFn,
        path: &MappingPath,
    ) -> Result<ConvertedValue, MapperError> {
        let optional = type_trait::<TypeTraitOptional>(self.registry, target, path)?;

        match self.convert(raw, inner(), &path.optional())? {
            Some(converted) => {
                let value = optional
                    .some(converted.value)
                    .ok_or_else(|| rejected(target, path))?;
                Ok(ConvertedValue::new(value, converted.fully_valid))
            }
            None => {
                if raw.is_some() {
                    log::trace!("unusable value at `{path}` becomes an empty optional");
                }
                Ok(ConvertedValue::valid(optional.none()))
            }
        }
    }

    fn convert_list(
        &mut self,
        raw: &RawValue,
        target: &'static TypeDescriptor,
        elem: DescriptorFn,
        path: &MappingPath,
    ) -> Result<Option<ConvertedValue>, MapperError> {
        let Some(items) = raw.as_list() else {
            return Ok(None);
        };
        let sequence = type_trait::<TypeTraitSequence>(self.registry, target, path)?;
        let elem = elem();

        let mut fully_valid = true;
        let mut values = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match self.convert(Some(item), elem, &path.index(index))? {
                Some(converted) => {
                    fully_valid &= converted.fully_valid;
                    values.push(converted.value);
                }
                None => {
                    log::debug!("element {index} of list at `{path}` is unusable, dropping the list");
                    return Ok(None);
                }
            }
        }

        let value = sequence
            .from_items(values)
            .ok_or_else(|| rejected(target, path))?;
        Ok(Some(ConvertedValue::new(value, fully_valid)))
    }

    fn convert_set(
        &mut self,
        raw: &RawValue,
        target: &'static TypeDescriptor,
        elem: DescriptorFn,
        path: &MappingPath,
    ) -> Result<Option<ConvertedValue>, MapperError> {
        let Some(items) = raw.as_list() else {
            return Ok(None);
        };
        let sequence = type_trait::<TypeTraitSequence>(self.registry, target, path)?;
        let elem = elem();

        let mut fully_valid = true;
        let mut values = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match self.convert(Some(item), elem, &path.index(index))? {
                Some(converted) => {
                    fully_valid &= converted.fully_valid;
                    values.push(converted.value);
                }
                None => {
                    log::debug!("dropping element {index} of set at `{path}`");
                    self.diagnostics
                        .record(path, format!("cannot convert value at index {index}"));
                    fully_valid = false;
                }
            }
        }

        let value = sequence
            .from_items(values)
            .ok_or_else(|| rejected(target, path))?;
        Ok(Some(ConvertedValue::new(value, fully_valid)))
    }

    fn convert_map(
        &mut self,
        raw: &RawValue,
        target: &'static TypeDescriptor,
        key: DescriptorFn,
        value: DescriptorFn,
        path: &MappingPath,
    ) -> Result<Option<ConvertedValue>, MapperError> {
        let Some(raw_entries) = raw.as_map() else {
            return Ok(None);
        };
        let key = key();
        if !key.is_string() {
            return Err(MapperError::NonStringMapKey {
                ty: target.type_path(),
                key: key.type_path(),
                path: path.to_string(),
            });
        }
        let mapping = type_trait::<TypeTraitMapping>(self.registry, target, path)?;
        let value = value();

        let mut fully_valid = true;
        let mut entries = Vec::with_capacity(raw_entries.len());
        for (entry_key, entry_value) in raw_entries {
            match self.convert(Some(entry_value), value, &path.key(entry_key))? {
                Some(converted) => {
                    fully_valid &= converted.fully_valid;
                    entries.push((entry_key.clone(), converted.value));
                }
                None => {
                    log::debug!("dropping entry `{entry_key}` of map at `{path}`");
                    self.diagnostics
                        .record(path, format!("cannot map value for key {entry_key}"));
                    fully_valid = false;
                }
            }
        }

        let value = mapping
            .from_entries(entries)
            .ok_or_else(|| rejected(target, path))?;
        Ok(Some(ConvertedValue::new(value, fully_valid)))
    }

    fn convert_struct(
        &mut self,
        raw: &RawValue,
        target: &'static TypeDescriptor,
        path: &MappingPath,
    ) -> Result<Option<ConvertedValue>, MapperError> {
        if raw.as_map().is_none() {
            return Ok(None);
        }
        let structure = self
            .mapper
            .structures
            .get_or_discover(self.registry, target, path)?;

        let mut values = Vec::with_capacity(structure.slots().len());
        for slot in structure.slots() {
            let slot_path = path.field(slot.export_name());
            values.push(self.convert(raw.get(slot.export_name()), slot.declared(), &slot_path)?);
        }

        structure
            .instantiator()
            .create(&structure, values, path, self.diagnostics)
    }
}
