use alloc::boxed::Box;
use alloc::format;
use core::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::Reflect;
use crate::info::{ScalarKind, TypeDescriptor};
use crate::leaf::LeafConverter;
use crate::raw::RawValue;
use crate::registry::TypeRegistry;

/// Converts numbers and numeric strings to `BigInt` and `BigDecimal`.
///
/// Strings are parsed with the target's own grammar; a string that does not
/// parse yields no value. Floats go through their shortest decimal
/// representation, and are truncated toward zero for `BigInt`.
///
/// Both types export as strings. `BigInt` always uses plain digits.
/// `BigDecimal` uses plain notation below the scientific threshold and
/// scientific notation from the threshold on.
///
/// # Example
///
/// ```
/// use std::str::FromStr;
///
/// use bigdecimal::BigDecimal;
/// use vc_mapper::leaf::{BigNumberConverter, LeafConverter};
/// use vc_mapper::raw::RawValue;
/// use vc_mapper::registry::TypeRegistry;
///
/// let converter = BigNumberConverter::with_threshold(BigDecimal::from(1000));
/// let registry = TypeRegistry::new();
///
/// let small = BigDecimal::from_str("999.5").unwrap();
/// let large = BigDecimal::from_str("1e3").unwrap();
///
/// assert_eq!(converter.try_export(&small, &registry), Some(RawValue::from("999.5")));
/// assert!(matches!(
///     converter.try_export(&large, &registry),
///     Some(RawValue::String(text)) if text.contains('e'),
/// ));
/// ```
#[derive(Debug, Clone)]
pub struct BigNumberConverter {
    threshold: BigDecimal,
}

impl Default for BigNumberConverter {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl BigNumberConverter {
    /// A converter switching to scientific notation at `1E100`.
    pub fn new() -> Self {
        Self::with_threshold(BigDecimal::new(BigInt::from(1), -100))
    }

    /// A converter switching to scientific notation at `threshold`.
    ///
    /// Only the magnitude of `threshold` is used.
    pub fn with_threshold(threshold: BigDecimal) -> Self {
        Self {
            threshold: threshold.abs(),
        }
    }

    #[inline]
    pub fn threshold(&self) -> &BigDecimal {
        &self.threshold
    }

    fn to_decimal(raw: &RawValue) -> Option<BigDecimal> {
        match raw {
            RawValue::String(text) => BigDecimal::from_str(text).ok(),
            RawValue::Int(value) => Some(BigDecimal::from(BigInt::from(*value))),
            RawValue::Float(value) => decimal_from_f64(*value).map(|value| value.normalized()),
            _ => None,
        }
    }

    fn to_integer(raw: &RawValue) -> Option<BigInt> {
        match raw {
            RawValue::String(text) => BigInt::from_str(text).ok(),
            RawValue::Int(value) => Some(BigInt::from(*value)),
            RawValue::Float(value) => {
                let (digits, _) = decimal_from_f64(*value)?.with_scale(0).into_bigint_and_exponent();
                Some(digits)
            }
            _ => None,
        }
    }
}

// Shortest representation that reads back as the same `f64`.
fn decimal_from_f64(value: f64) -> Option<BigDecimal> {
    if !value.is_finite() {
        return None;
    }
    BigDecimal::from_str(&format!("{value:e}")).ok()
}

impl LeafConverter for BigNumberConverter {
    fn try_convert(
        &self,
        raw: &RawValue,
        target: &TypeDescriptor,
        _: &TypeRegistry,
    ) -> Option<Box<dyn Reflect>> {
        match target.scalar_kind()? {
            ScalarKind::BigInt => Self::to_integer(raw).map(|value| Box::new(value) as Box<dyn Reflect>),
            ScalarKind::BigDecimal => {
                Self::to_decimal(raw).map(|value| Box::new(value) as Box<dyn Reflect>)
            }
            _ => None,
        }
    }

    fn try_export(&self, value: &dyn Reflect, _: &TypeRegistry) -> Option<RawValue> {
        if let Some(value) = value.downcast_ref::<BigInt>() {
            return Some(RawValue::String(value.to_string()));
        }
        let value = value.downcast_ref::<BigDecimal>()?;
        let text = if value.abs() >= self.threshold {
            value.to_scientific_notation()
        } else {
            value.to_plain_string()
        };
        Some(RawValue::String(text))
    }
}
