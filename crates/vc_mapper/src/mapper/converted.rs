use alloc::boxed::Box;

use crate::Reflect;
use crate::diagnostics::ConversionDiagnostics;

// -----------------------------------------------------------------------------
// ConvertedValue

/// A converted value and whether it was built entirely from usable input.
///
/// `fully_valid` is `false` as soon as a default was substituted anywhere
/// in the value's subtree, or an element or entry was dropped. It is the
/// signal that the source document should be rewritten.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedValue<V = Box<dyn Reflect>> {
    pub value: V,
    pub fully_valid: bool,
}

impl<V> ConvertedValue<V> {
    #[inline]
    pub const fn new(value: V, fully_valid: bool) -> Self {
        Self { value, fully_valid }
    }

    #[inline]
    pub const fn valid(value: V) -> Self {
        Self::new(value, true)
    }

    #[inline]
    pub fn into_value(self) -> V {
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(V) -> U) -> ConvertedValue<U> {
        ConvertedValue::new(f(self.value), self.fully_valid)
    }
}

impl ConvertedValue {
    /// Recovers the concrete value, or hands `self` back on a type mismatch.
    pub fn downcast<T: Reflect>(self) -> Result<ConvertedValue<T>, Self> {
        let fully_valid = self.fully_valid;
        self.value
            .take::<T>()
            .map(|value| ConvertedValue::new(value, fully_valid))
            .map_err(|value| ConvertedValue::new(value, fully_valid))
    }
}

// -----------------------------------------------------------------------------
// Conversion

/// The outcome of a typed top-level conversion.
///
/// An absent value means the input could not be mapped at all; the caller
/// decides what to use instead.
#[derive(Debug)]
pub struct Conversion<T> {
    value: Option<ConvertedValue<T>>,
    diagnostics: ConversionDiagnostics,
}

impl<T> Conversion<T> {
    #[inline]
    pub(crate) fn new(value: Option<ConvertedValue<T>>, diagnostics: ConversionDiagnostics) -> Self {
        Self { value, diagnostics }
    }

    #[inline]
    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    /// `true` if a value is present and nothing fell back to a default.
    #[inline]
    pub fn is_fully_valid(&self) -> bool {
        self.value.as_ref().is_some_and(|value| value.fully_valid)
    }

    #[inline]
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref().map(|value| &value.value)
    }

    #[inline]
    pub fn converted(&self) -> Option<&ConvertedValue<T>> {
        self.value.as_ref()
    }

    #[inline]
    pub fn diagnostics(&self) -> &ConversionDiagnostics {
        &self.diagnostics
    }

    #[inline]
    pub fn into_value(self) -> Option<T> {
        self.value.map(ConvertedValue::into_value)
    }

    #[inline]
    pub fn into_parts(self) -> (Option<ConvertedValue<T>>, ConversionDiagnostics) {
        (self.value, self.diagnostics)
    }
}
