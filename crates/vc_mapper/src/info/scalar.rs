use core::fmt;

// -----------------------------------------------------------------------------
// ScalarKind

/// The leaf family of a scalar type.
///
/// The default leaf converters dispatch on this value. [`ScalarKind::Custom`]
/// is never handled by a default converter, only by user converters that
/// recognize the concrete type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    String,
    Bool,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
    /// Arbitrary precision integer.
    BigInt,
    /// Arbitrary precision decimal.
    BigDecimal,
    Enum(EnumInfo),
    /// Accepts any raw value unchanged.
    Untyped,
    Custom,
}

impl ScalarKind {
    /// Returns `true` for the fixed-width numeric kinds.
    pub const fn is_fixed_width_number(&self) -> bool {
        matches!(
            self,
            Self::I8
                | Self::I16
                | Self::I32
                | Self::I64
                | Self::I128
                | Self::Isize
                | Self::U8
                | Self::U16
                | Self::U32
                | Self::U64
                | Self::U128
                | Self::Usize
                | Self::F32
                | Self::F64
        )
    }

    #[inline]
    pub const fn as_enum(&self) -> Option<&EnumInfo> {
        match self {
            Self::Enum(info) => Some(info),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enum(_) => f.pad("Enum"),
            other => fmt::Debug::fmt(other, f),
        }
    }
}

// -----------------------------------------------------------------------------
// EnumInfo

/// The canonical variant names of a unit-only enum, in declaration order.
///
/// The position of a name is the variant index used by
/// [`TypeTraitEnum`](crate::registry::TypeTraitEnum).
///
/// # Example
///
/// ```
/// use vc_mapper::info::EnumInfo;
///
/// let info = EnumInfo::new(&["FIRST", "SECOND"]);
///
/// assert_eq!(info.index_ignore_case("second"), Some(1));
/// assert_eq!(info.index_ignore_case("Second"), Some(1));
/// assert_eq!(info.index_ignore_case("third"), None);
/// assert_eq!(info.variant_name(0), Some("FIRST"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumInfo {
    variants: &'static [&'static str],
}

impl EnumInfo {
    #[inline]
    pub const fn new(variants: &'static [&'static str]) -> Self {
        Self { variants }
    }

    #[inline]
    pub const fn variants(&self) -> &'static [&'static str] {
        self.variants
    }

    #[inline]
    pub fn variant_name(&self, index: usize) -> Option<&'static str> {
        self.variants.get(index).copied()
    }

    /// Finds the variant whose name equals `name`, ignoring case.
    pub fn index_ignore_case(&self, name: &str) -> Option<usize> {
        self.variants.iter().position(|variant| {
            variant.eq_ignore_ascii_case(name)
                || variant
                    .chars()
                    .flat_map(char::to_lowercase)
                    .eq(name.chars().flat_map(char::to_lowercase))
        })
    }
}
