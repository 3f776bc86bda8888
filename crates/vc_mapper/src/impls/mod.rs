//! [`Typed`](crate::info::Typed) and [`GetTypeMeta`](crate::registry::GetTypeMeta)
//! implementations for foreign types.
//!
//! ## Implemented Menu
//!
//! - scalars: `bool`, `i8`-`i128`, `isize`, `u8`-`u128`, `usize`, `f32`, `f64`, `String`
//! - arbitrary precision: `num_bigint::BigInt`, `bigdecimal::BigDecimal`
//! - untyped: [`RawValue`](crate::raw::RawValue)
//! - lists and sets: `Vec<T>`, `BTreeSet<T>`, `HashSet<T, S>`, `IndexSet<T, S>`
//! - maps: `BTreeMap<K, V>`, `HashMap<K, V, S>`, `IndexMap<K, V, S>`
//! - optional: `Option<T>`
//!
//! Other leaf types can be declared with [`impl_custom_scalar!`](crate::impl_custom_scalar)
//! and converted by a custom [`LeafConverter`](crate::leaf::LeafConverter).

// -----------------------------------------------------------------------------
// Modules

mod collections;
mod native;
mod option;

// -----------------------------------------------------------------------------
// Macros

/// Implements `Typed` and `GetTypeMeta` for a type handled by a custom leaf converter.
///
/// The type gets the [`ScalarKind::Custom`](crate::info::ScalarKind::Custom) kind,
/// which no default converter accepts.
///
/// # Example
///
/// ```
/// use vc_mapper::info::{ScalarKind, Typed};
///
/// #[derive(Debug)]
/// struct Duration(u64);
///
/// vc_mapper::impl_custom_scalar!(Duration);
///
/// assert_eq!(Duration::type_descriptor().scalar_kind(), Some(&ScalarKind::Custom));
/// ```
#[macro_export]
macro_rules! impl_custom_scalar {
    ($ty:ty) => {
        impl $crate::info::Typed for $ty {
            fn type_descriptor() -> &'static $crate::info::TypeDescriptor {
                static CELL: $crate::info::NonGenericDescriptorCell =
                    $crate::info::NonGenericDescriptorCell::new();
                CELL.get_or_init(|| {
                    $crate::info::TypeDescriptor::scalar::<$ty>($crate::info::ScalarKind::Custom)
                })
            }
        }

        impl $crate::registry::GetTypeMeta for $ty {
            #[inline]
            fn get_type_meta() -> $crate::registry::TypeMeta {
                $crate::registry::TypeMeta::of::<$ty>()
            }
        }
    };
}
