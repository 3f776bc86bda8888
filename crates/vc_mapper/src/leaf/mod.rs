//! Scalar conversion.
//!
//! A [`LeafConverter`] turns a raw scalar into a typed value for the target
//! types it recognizes, and turns such typed values back into raw scalars.
//! A [`LeafRegistry`] tries its converters in order; the first present
//! result wins.
//!
//! Default order:
//!
//! 1. [`StringConverter`]: `String` from strings, numbers and booleans.
//! 2. [`BoolConverter`]: `bool` from booleans only.
//! 3. [`NumberConverter`]: fixed-width numbers from any number, by narrowing cast.
//! 4. [`BigNumberConverter`]: `BigInt` and `BigDecimal` from numbers and strings.
//! 5. [`EnumConverter`]: unit enums from strings, ignoring case.
//! 6. [`PassthroughConverter`]: [`RawValue`] targets, unchanged. Never exports.

// -----------------------------------------------------------------------------
// Modules

mod big_number;
mod boolean;
mod enumeration;
mod number;
mod passthrough;
mod string;

// -----------------------------------------------------------------------------
// Exports

pub use big_number::BigNumberConverter;
pub use boolean::BoolConverter;
pub use enumeration::EnumConverter;
pub use number::NumberConverter;
pub use passthrough::PassthroughConverter;
pub use string::StringConverter;

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::fmt;

use crate::Reflect;
use crate::info::TypeDescriptor;
use crate::raw::RawValue;
use crate::registry::TypeRegistry;

// -----------------------------------------------------------------------------
// LeafConverter

/// Converts one family of scalar types in both directions.
///
/// Both methods return `None` when the converter does not handle the
/// target or the value, so the next converter can be tried.
///
/// # Example
///
/// ```
/// use vc_mapper::Reflect;
/// use vc_mapper::info::TypeDescriptor;
/// use vc_mapper::leaf::LeafConverter;
/// use vc_mapper::raw::RawValue;
/// use vc_mapper::registry::TypeRegistry;
///
/// #[derive(Debug, PartialEq)]
/// struct Seconds(u64);
///
/// vc_mapper::impl_custom_scalar!(Seconds);
///
/// struct SecondsConverter;
///
/// impl LeafConverter for SecondsConverter {
///     fn try_convert(
///         &self,
///         raw: &RawValue,
///         target: &TypeDescriptor,
///         _: &TypeRegistry,
///     ) -> Option<Box<dyn Reflect>> {
///         if !target.is::<Seconds>() {
///             return None;
///         }
///         let digits = raw.as_str()?.strip_suffix('s')?;
///         Some(Box::new(Seconds(digits.parse().ok()?)))
///     }
///
///     fn try_export(&self, value: &dyn Reflect, _: &TypeRegistry) -> Option<RawValue> {
///         let Seconds(secs) = value.downcast_ref::<Seconds>()?;
///         Some(RawValue::String(format!("{secs}s")))
///     }
/// }
///
/// let mapper = vc_mapper::Mapper::builder()
///     .leaf_converter(SecondsConverter)
///     .build();
///
/// let converted = mapper.map_as::<Seconds>(&RawValue::from("30s")).unwrap();
/// assert_eq!(converted.into_value(), Some(Seconds(30)));
/// ```
pub trait LeafConverter: Any + Send + Sync {
    /// Converts `raw` for `target`, or returns `None` if not applicable.
    fn try_convert(
        &self,
        raw: &RawValue,
        target: &TypeDescriptor,
        registry: &TypeRegistry,
    ) -> Option<Box<dyn Reflect>>;

    /// Exports `value`, or returns `None` if this converter does not handle it.
    fn try_export(&self, value: &dyn Reflect, registry: &TypeRegistry) -> Option<RawValue>;
}

// -----------------------------------------------------------------------------
// LeafRegistry

/// An ordered, first-match list of [`LeafConverter`]s.
pub struct LeafRegistry {
    converters: Vec<Box<dyn LeafConverter>>,
}

impl LeafRegistry {
    /// A registry without converters.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            converters: Vec::new(),
        }
    }

    /// The default converters, in their default order.
    pub fn new() -> Self {
        Self::with_big_number_converter(BigNumberConverter::new())
    }

    /// The default converters with a custom big number converter.
    pub fn with_big_number_converter(big_number: BigNumberConverter) -> Self {
        let mut registry = Self::empty();
        registry.push(StringConverter);
        registry.push(BoolConverter);
        registry.push(NumberConverter);
        registry.push(big_number);
        registry.push(EnumConverter);
        registry.push(PassthroughConverter);
        registry
    }

    fn position_of(&self, type_id: TypeId) -> Option<usize> {
        self.converters.iter().position(|converter| {
            let any: &dyn Any = &**converter;
            any.type_id() == type_id
        })
    }

    /// Appends `converter` with the lowest priority.
    ///
    /// A second converter of the same type is ignored.
    pub fn push<C: LeafConverter>(&mut self, converter: C) {
        if self.position_of(TypeId::of::<C>()).is_some() {
            log::warn!(
                "leaf converter `{}` is already registered, ignoring",
                core::any::type_name::<C>()
            );
            return;
        }
        self.converters.push(Box::new(converter));
    }

    /// Inserts `converter` at `index`, or last if `index` is out of range.
    ///
    /// A converter of the same type already present is removed first.
    pub fn insert<C: LeafConverter>(&mut self, index: usize, converter: C) {
        let mut index = index;
        if let Some(existing) = self.position_of(TypeId::of::<C>()) {
            self.converters.remove(existing);
            if existing < index {
                index -= 1;
            }
        }
        let index = index.min(self.converters.len());
        self.converters.insert(index, Box::new(converter));
    }

    /// Inserts `converter` with the highest priority.
    #[inline]
    pub fn prepend<C: LeafConverter>(&mut self, converter: C) {
        self.insert(0, converter);
    }

    /// Replaces the converter of type `C` in place, keeping its priority.
    ///
    /// Returns `false`, leaving the registry unchanged, if there is none.
    pub fn replace<C: LeafConverter>(&mut self, converter: C) -> bool {
        match self.position_of(TypeId::of::<C>()) {
            Some(index) => {
                self.converters[index] = Box::new(converter);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    /// Returns the first present conversion.
    pub fn try_convert(
        &self,
        raw: &RawValue,
        target: &TypeDescriptor,
        registry: &TypeRegistry,
    ) -> Option<Box<dyn Reflect>> {
        self.converters
            .iter()
            .find_map(|converter| converter.try_convert(raw, target, registry))
    }

    /// Returns the first present export.
    pub fn try_export(&self, value: &dyn Reflect, registry: &TypeRegistry) -> Option<RawValue> {
        self.converters
            .iter()
            .find_map(|converter| converter.try_export(value, registry))
    }
}

impl Default for LeafRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LeafRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeafRegistry")
            .field("converters", &self.converters.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::Typed;
    use alloc::string::String;

    struct Shouting;

    impl LeafConverter for Shouting {
        fn try_convert(
            &self,
            raw: &RawValue,
            target: &TypeDescriptor,
            _: &TypeRegistry,
        ) -> Option<Box<dyn Reflect>> {
            if !target.is::<String>() {
                return None;
            }
            Some(Box::new(raw.as_str()?.to_uppercase()))
        }

        fn try_export(&self, _: &dyn Reflect, _: &TypeRegistry) -> Option<RawValue> {
            None
        }
    }

    #[test]
    fn first_match_wins() {
        let types = TypeRegistry::new();
        let raw = RawValue::from("quiet");

        let mut leaf = LeafRegistry::new();
        let value = leaf.try_convert(&raw, String::type_descriptor(), &types).unwrap();
        assert_eq!(value.downcast_ref::<String>().unwrap(), "quiet");

        leaf.prepend(Shouting);
        let value = leaf.try_convert(&raw, String::type_descriptor(), &types).unwrap();
        assert_eq!(value.downcast_ref::<String>().unwrap(), "QUIET");
    }

    #[test]
    fn duplicate_push_is_ignored() {
        let mut leaf = LeafRegistry::new();
        let len = leaf.len();
        leaf.push(StringConverter);
        assert_eq!(leaf.len(), len);

        leaf.prepend(StringConverter);
        assert_eq!(leaf.len(), len);
    }

    #[test]
    fn replace_keeps_priority() {
        let types = TypeRegistry::new();
        let mut leaf = LeafRegistry::new();
        assert!(leaf.replace(StringConverter));
        assert!(!leaf.replace(Shouting));

        let raw = RawValue::from("quiet");
        let value = leaf.try_convert(&raw, String::type_descriptor(), &types).unwrap();
        assert_eq!(value.downcast_ref::<String>().unwrap(), "quiet");
    }
}
