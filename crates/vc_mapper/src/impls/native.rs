use alloc::string::String;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::info::{NonGenericDescriptorCell, ScalarKind, TypeDescriptor, Typed};
use crate::raw::RawValue;
use crate::registry::{GetTypeMeta, TypeMeta};

macro_rules! impl_scalar {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Typed for $ty {
                fn type_descriptor() -> &'static TypeDescriptor {
                    static CELL: NonGenericDescriptorCell = NonGenericDescriptorCell::new();
                    CELL.get_or_init(|| TypeDescriptor::scalar::<$ty>(ScalarKind::$kind))
                }
            }

            impl GetTypeMeta for $ty {
                #[inline]
                fn get_type_meta() -> TypeMeta {
                    TypeMeta::of::<$ty>()
                }
            }
        )*
    };
}

impl_scalar! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    String => String,
    BigInt => BigInt,
    BigDecimal => BigDecimal,
    RawValue => Untyped,
}

#[cfg(test)]
mod tests {
    use crate::info::{ScalarKind, Typed};
    use bigdecimal::BigDecimal;

    #[test]
    fn scalar_kinds() {
        assert_eq!(bool::type_descriptor().scalar_kind(), Some(&ScalarKind::Bool));
        assert_eq!(u16::type_descriptor().scalar_kind(), Some(&ScalarKind::U16));
        assert_eq!(
            BigDecimal::type_descriptor().scalar_kind(),
            Some(&ScalarKind::BigDecimal)
        );
        assert!(f32::type_descriptor().scalar_kind().unwrap().is_fixed_width_number());
        assert!(!BigDecimal::type_descriptor().scalar_kind().unwrap().is_fixed_width_number());
        assert_eq!(BigDecimal::type_descriptor().type_name(), "BigDecimal");
    }
}
