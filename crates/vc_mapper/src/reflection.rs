use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt::Debug;

use crate::info::{TypeDescriptor, Typed};

// -----------------------------------------------------------------------------
// Reflect

/// A type-erased value the mapper can produce or export.
///
/// Implemented for every [`Typed`] type that is `Send + Sync + Debug`, so it
/// never needs to be implemented by hand. Converted values travel through the
/// engine as `Box<dyn Reflect>` and are recovered with
/// [`take`](dyn Reflect::take) or [`downcast_ref`](dyn Reflect::downcast_ref).
///
/// `Debug` is required so that hard errors can show the offending value.
///
/// # Example
///
/// ```
/// use vc_mapper::Reflect;
///
/// let value: Box<dyn Reflect> = Box::new(7_u16);
///
/// assert!(value.is::<u16>());
/// assert_eq!(value.reflect_descriptor().type_path(), "u16");
/// assert_eq!(value.take::<u16>().ok(), Some(7));
/// ```
pub trait Reflect: Any + Send + Sync + Debug + 'static {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// The descriptor of the concrete type behind this value.
    fn reflect_descriptor(&self) -> &'static TypeDescriptor;

    #[inline]
    fn reflect_type_path(&self) -> &'static str {
        self.reflect_descriptor().type_path()
    }
}

impl<T: Typed + Send + Sync + Debug> Reflect for T {
    #[inline(always)]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline(always)]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    #[inline(always)]
    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    #[inline(always)]
    fn reflect_descriptor(&self) -> &'static TypeDescriptor {
        T::type_descriptor()
    }
}

impl dyn Reflect {
    /// The [`TypeId`] of the concrete type.
    #[inline]
    pub fn reflect_type_id(&self) -> TypeId {
        self.as_any().type_id()
    }

    #[inline]
    pub fn is<T: Reflect>(&self) -> bool {
        self.reflect_type_id() == TypeId::of::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Reflect>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    #[inline]
    pub fn downcast_mut<T: Reflect>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Moves the value out if it is a `T`, otherwise hands the box back.
    pub fn take<T: Reflect>(self: Box<Self>) -> Result<T, Box<dyn Reflect>> {
        if !self.is::<T>() {
            return Err(self);
        }
        match self.into_any().downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(_) => unreachable!("type id checked above"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Reflect;
    use alloc::boxed::Box;
    use alloc::string::String;

    #[test]
    fn take_returns_box_on_mismatch() {
        let value: Box<dyn Reflect> = Box::new(String::from("abc"));
        let value = value.take::<i32>().unwrap_err();
        assert_eq!(value.take::<String>().unwrap(), "abc");
    }

    #[test]
    fn downcast_mut_changes_value() {
        let mut value: Box<dyn Reflect> = Box::new(1_i64);
        *value.downcast_mut::<i64>().unwrap() += 41;
        assert_eq!(value.downcast_ref::<i64>(), Some(&42));
        assert!(!value.is::<i32>());
    }
}
