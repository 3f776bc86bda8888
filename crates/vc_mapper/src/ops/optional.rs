use alloc::boxed::Box;

use crate::Reflect;

/// A value that may be empty.
pub trait OptionalValue: Reflect + Sized {
    /// Wraps `value`, or returns `None` if it is not of the inner type.
    fn some(value: Box<dyn Reflect>) -> Option<Self>;

    fn none() -> Self;

    fn get(&self) -> Option<&dyn Reflect>;
}

impl<T: Reflect> OptionalValue for Option<T>
where
    Option<T>: Reflect,
{
    #[inline]
    fn some(value: Box<dyn Reflect>) -> Option<Self> {
        value.take::<T>().ok().map(Some)
    }

    #[inline]
    fn none() -> Self {
        None
    }

    #[inline]
    fn get(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|value| value as &dyn Reflect)
    }
}
