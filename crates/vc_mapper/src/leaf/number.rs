use alloc::boxed::Box;
use alloc::string::ToString;

use crate::Reflect;
use crate::info::{ScalarKind, TypeDescriptor};
use crate::leaf::LeafConverter;
use crate::raw::RawValue;
use crate::registry::TypeRegistry;

/// Converts numbers to fixed-width numeric types.
///
/// The value is narrowed with an `as` cast: integers wrap, floats are
/// truncated toward zero and saturate. Strings are not parsed, except for
/// `u128`: values above `i128::MAX` export as decimal strings and read back
/// from them.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberConverter;

macro_rules! narrow {
    ($raw:expr, $kind:expr, { $($variant:ident => $ty:ty),* $(,)? }) => {
        match ($kind, $raw) {
            $(
                (ScalarKind::$variant, RawValue::Int(value)) => {
                    Some(Box::new(*value as $ty) as Box<dyn Reflect>)
                }
                (ScalarKind::$variant, RawValue::Float(value)) => {
                    Some(Box::new(*value as $ty) as Box<dyn Reflect>)
                }
            )*
            _ => None,
        }
    };
}

macro_rules! widen {
    ($value:expr, { $($ty:ty => $variant:ident),* $(,)? }) => {
        $(
            if let Some(value) = $value.downcast_ref::<$ty>() {
                return Some(RawValue::$variant((*value).into()));
            }
        )*
    };
}

impl LeafConverter for NumberConverter {
    fn try_convert(
        &self,
        raw: &RawValue,
        target: &TypeDescriptor,
        _: &TypeRegistry,
    ) -> Option<Box<dyn Reflect>> {
        let kind = target.scalar_kind()?;
        if let (ScalarKind::U128, RawValue::String(text)) = (kind, raw) {
            return text
                .parse::<u128>()
                .ok()
                .map(|value| Box::new(value) as Box<dyn Reflect>);
        }
        narrow!(raw, kind, {
            I8 => i8,
            I16 => i16,
            I32 => i32,
            I64 => i64,
            I128 => i128,
            Isize => isize,
            U8 => u8,
            U16 => u16,
            U32 => u32,
            U64 => u64,
            U128 => u128,
            Usize => usize,
            F32 => f32,
            F64 => f64,
        })
    }

    fn try_export(&self, value: &dyn Reflect, _: &TypeRegistry) -> Option<RawValue> {
        widen!(value, {
            i8 => Int,
            i16 => Int,
            i32 => Int,
            i64 => Int,
            i128 => Int,
            u8 => Int,
            u16 => Int,
            u32 => Int,
            u64 => Int,
            f32 => Float,
            f64 => Float,
        });
        // No lossless `From` impl into `i128` for these.
        if let Some(value) = value.downcast_ref::<isize>() {
            return Some(RawValue::Int(*value as i128));
        }
        if let Some(value) = value.downcast_ref::<usize>() {
            return Some(RawValue::Int(*value as i128));
        }
        if let Some(value) = value.downcast_ref::<u128>() {
            return Some(
                i128::try_from(*value).map_or_else(|_| RawValue::String(value.to_string()), RawValue::Int),
            );
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::NumberConverter;
    use crate::Reflect;
    use crate::info::Typed;
    use crate::leaf::LeafConverter;
    use crate::raw::RawValue;
    use crate::registry::TypeRegistry;
    use alloc::string::{String, ToString};

    fn convert<T: Typed + Reflect>(raw: RawValue) -> Option<T> {
        let registry = TypeRegistry::new();
        NumberConverter
            .try_convert(&raw, T::type_descriptor(), &registry)
            .and_then(|value| value.take::<T>().ok())
    }

    #[test]
    fn casts_between_widths() {
        assert_eq!(convert::<i32>(RawValue::Int(42)), Some(42));
        assert_eq!(convert::<f64>(RawValue::Int(3)), Some(3.0));
        assert_eq!(convert::<i64>(RawValue::Float(3.9)), Some(3));
        assert_eq!(convert::<i64>(RawValue::Float(-3.9)), Some(-3));
        assert_eq!(convert::<u8>(RawValue::Int(300)), Some(44));
        assert_eq!(convert::<f32>(RawValue::Float(0.5)), Some(0.5));
    }

    #[test]
    fn non_numbers_are_rejected() {
        assert_eq!(convert::<i32>("42".into()), None);
        assert_eq!(convert::<i32>(RawValue::Bool(true)), None);
        assert_eq!(convert::<String>(RawValue::Int(1)), None);
    }

    #[test]
    fn exports_integers_and_floats() {
        let registry = TypeRegistry::new();
        assert_eq!(NumberConverter.try_export(&7_u16, &registry), Some(RawValue::Int(7)));
        assert_eq!(NumberConverter.try_export(&-7_isize, &registry), Some(RawValue::Int(-7)));
        assert_eq!(NumberConverter.try_export(&1.5_f32, &registry), Some(RawValue::Float(1.5)));
        assert_eq!(NumberConverter.try_export(&7_u128, &registry), Some(RawValue::Int(7)));
        assert_eq!(NumberConverter.try_export(&String::new(), &registry), None);
    }

    #[test]
    fn large_u128_uses_decimal_strings() {
        let registry = TypeRegistry::new();
        let exported = NumberConverter.try_export(&u128::MAX, &registry).unwrap();
        assert_eq!(exported, RawValue::from(u128::MAX.to_string()));
        assert_eq!(convert::<u128>(exported), Some(u128::MAX));

        // Only `u128` reads strings.
        assert_eq!(convert::<u64>("7".into()), None);
        assert_eq!(convert::<u128>("-1".into()), None);
    }
}
