use alloc::boxed::Box;

use crate::Reflect;
use crate::info::{ScalarKind, TypeDescriptor};
use crate::leaf::LeafConverter;
use crate::raw::RawValue;
use crate::registry::TypeRegistry;

/// Hands any raw value to [`RawValue`] targets unchanged.
///
/// Untyped values are never exported.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughConverter;

impl LeafConverter for PassthroughConverter {
    fn try_convert(
        &self,
        raw: &RawValue,
        target: &TypeDescriptor,
        _: &TypeRegistry,
    ) -> Option<Box<dyn Reflect>> {
        match target.scalar_kind() {
            Some(ScalarKind::Untyped) => Some(Box::new(raw.clone())),
            _ => None,
        }
    }

    #[inline]
    fn try_export(&self, _: &dyn Reflect, _: &TypeRegistry) -> Option<RawValue> {
        None
    }
}
