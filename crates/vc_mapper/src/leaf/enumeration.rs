use alloc::boxed::Box;

use crate::Reflect;
use crate::info::TypeDescriptor;
use crate::leaf::LeafConverter;
use crate::raw::RawValue;
use crate::registry::{TypeRegistry, TypeTraitEnum};

/// Converts strings to unit enums, ignoring case.
///
/// Exports the canonical variant name. The variant is built and inspected
/// through the [`TypeTraitEnum`] registered for the target type.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumConverter;

impl LeafConverter for EnumConverter {
    fn try_convert(
        &self,
        raw: &RawValue,
        target: &TypeDescriptor,
        registry: &TypeRegistry,
    ) -> Option<Box<dyn Reflect>> {
        let info = target.scalar_kind()?.as_enum()?;
        let index = info.index_ignore_case(raw.as_str()?)?;
        registry
            .get_type_trait::<TypeTraitEnum>(target.type_id())?
            .from_index(index)
    }

    fn try_export(&self, value: &dyn Reflect, registry: &TypeRegistry) -> Option<RawValue> {
        let descriptor = value.reflect_descriptor();
        let info = descriptor.scalar_kind()?.as_enum()?;
        let index = registry
            .get_type_trait::<TypeTraitEnum>(descriptor.type_id())?
            .index_of(value)?;
        info.variant_name(index).map(RawValue::from)
    }
}
