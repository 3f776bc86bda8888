//! Items used by the code generated from `#[derive(Configurable)]`.
//!
//! Not part of the public API.
#![doc(hidden)]

// -----------------------------------------------------------------------------
// auto_register

#[cfg(feature = "auto_register")]
pub mod auto_register {
    use crate::registry::{GetTypeMeta, TypeRegistry};

    pub use inventory;

    /// A registration function submitted by an annotated type.
    pub struct __AutoRegisterFunc(pub fn(&mut TypeRegistry));

    inventory::collect!(__AutoRegisterFunc);

    pub trait __RegisterType {
        fn __register(registry: &mut TypeRegistry);
    }

    impl<T: GetTypeMeta> __RegisterType for T {
        #[inline]
        fn __register(registry: &mut TypeRegistry) {
            registry.register::<T>();
        }
    }

    /// Registered through `inventory` like any annotated type.
    ///
    /// Its presence in a registry after [`__register_types`] proves that
    /// static collection works on the current platform.
    #[derive(Debug)]
    pub struct __AvailFlag;

    crate::impl_custom_scalar!(__AvailFlag);

    inventory::submit! {
        __AutoRegisterFunc(<__AvailFlag as __RegisterType>::__register)
    }

    pub fn __register_types(registry: &mut TypeRegistry) {
        let mut count = 0_usize;
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry);
            count += 1;
        }
        log::debug!("auto registration ran {count} registration functions");
    }
}
