use alloc::boxed::Box;

use crate::Reflect;
use crate::info::{ScalarKind, TypeDescriptor};
use crate::leaf::LeafConverter;
use crate::raw::RawValue;
use crate::registry::TypeRegistry;

/// Converts booleans to `bool`. Strings such as `"true"` are not accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolConverter;

impl LeafConverter for BoolConverter {
    fn try_convert(
        &self,
        raw: &RawValue,
        target: &TypeDescriptor,
        _: &TypeRegistry,
    ) -> Option<Box<dyn Reflect>> {
        match (target.scalar_kind(), raw) {
            (Some(ScalarKind::Bool), RawValue::Bool(value)) => Some(Box::new(*value)),
            _ => None,
        }
    }

    fn try_export(&self, value: &dyn Reflect, _: &TypeRegistry) -> Option<RawValue> {
        value.downcast_ref::<bool>().map(|value| RawValue::Bool(*value))
    }
}
