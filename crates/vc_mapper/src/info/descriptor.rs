use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;

use crate::info::{EnumInfo, ScalarKind, Type, Typed};

/// Lazy pointer to a nested descriptor.
///
/// Nested descriptors are resolved on demand so that a type may refer to
/// itself through a collection or an optional.
pub type DescriptorFn = fn() -> &'static TypeDescriptor;

// -----------------------------------------------------------------------------
// TypeKind

/// The shape of a target type.
#[derive(Clone, Copy)]
pub enum TypeKind {
    Scalar(ScalarKind),
    List(DescriptorFn),
    Set(DescriptorFn),
    Map {
        key: DescriptorFn,
        value: DescriptorFn,
    },
    Optional(DescriptorFn),
    /// A structured type whose slots come from its registered schema.
    Struct,
}

impl TypeKind {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "Scalar",
            Self::List(_) => "List",
            Self::Set(_) => "Set",
            Self::Map { .. } => "Map",
            Self::Optional(_) => "Optional",
            Self::Struct => "Struct",
        }
    }
}

impl fmt::Debug for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => f.debug_tuple("Scalar").field(kind).finish(),
            Self::List(elem) => f.debug_tuple("List").field(elem().ty()).finish(),
            Self::Set(elem) => f.debug_tuple("Set").field(elem().ty()).finish(),
            Self::Map { key, value } => f
                .debug_struct("Map")
                .field("key", key().ty())
                .field("value", value().ty())
                .finish(),
            Self::Optional(inner) => f.debug_tuple("Optional").field(inner().ty()).finish(),
            Self::Struct => f.write_str("Struct"),
        }
    }
}

// -----------------------------------------------------------------------------
// TypeDescriptor

/// A resolved description of a target type.
///
/// Obtained through [`Typed::type_descriptor`], built once per distinct type
/// and immutable afterwards.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use vc_mapper::info::{ScalarKind, TypeKind, Typed};
///
/// let desc = <BTreeMap<String, Vec<u8>>>::type_descriptor();
///
/// assert!(matches!(desc.kind(), TypeKind::Map { .. }));
///
/// let args = desc.type_arguments();
/// assert_eq!(args.len(), 2);
/// assert_eq!(args[0].scalar_kind(), Some(&ScalarKind::String));
/// assert_eq!(args[1].type_name(), "Vec<u8>");
/// assert_eq!(args[1].type_arguments()[0].scalar_kind(), Some(&ScalarKind::U8));
/// ```
pub struct TypeDescriptor {
    ty: Type,
    kind: TypeKind,
}

impl TypeDescriptor {
    #[inline]
    pub const fn new(ty: Type, kind: TypeKind) -> Self {
        Self { ty, kind }
    }

    /// Descriptor of the scalar type `T`.
    #[inline]
    pub fn scalar<T: ?Sized + 'static>(kind: ScalarKind) -> Self {
        Self::new(Type::of::<T>(), TypeKind::Scalar(kind))
    }

    /// Descriptor of the unit-only enum `T`.
    #[inline]
    pub fn enumeration<T: 'static>(variants: &'static [&'static str]) -> Self {
        Self::scalar::<T>(ScalarKind::Enum(EnumInfo::new(variants)))
    }

    /// Descriptor of the list type `T` with elements `E`.
    #[inline]
    pub fn list<T: 'static, E: Typed>() -> Self {
        Self::new(Type::of::<T>(), TypeKind::List(E::type_descriptor))
    }

    /// Descriptor of the set type `T` with elements `E`.
    #[inline]
    pub fn set<T: 'static, E: Typed>() -> Self {
        Self::new(Type::of::<T>(), TypeKind::Set(E::type_descriptor))
    }

    /// Descriptor of the map type `T` with keys `K` and values `V`.
    #[inline]
    pub fn map<T: 'static, K: Typed, V: Typed>() -> Self {
        Self::new(
            Type::of::<T>(),
            TypeKind::Map {
                key: K::type_descriptor,
                value: V::type_descriptor,
            },
        )
    }

    /// Descriptor of the optional type `T` wrapping `I`.
    #[inline]
    pub fn optional<T: 'static, I: Typed>() -> Self {
        Self::new(Type::of::<T>(), TypeKind::Optional(I::type_descriptor))
    }

    /// Descriptor of the structured type `T`.
    #[inline]
    pub fn structure<T: 'static>() -> Self {
        Self::new(Type::of::<T>(), TypeKind::Struct)
    }

    #[inline(always)]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline(always)]
    pub const fn kind(&self) -> &TypeKind {
        &self.kind
    }

    #[inline(always)]
    pub const fn type_id(&self) -> TypeId {
        self.ty.id()
    }

    #[inline(always)]
    pub const fn type_path(&self) -> &'static str {
        self.ty.path()
    }

    #[inline(always)]
    pub const fn type_name(&self) -> &'static str {
        self.ty.name()
    }

    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.ty.is::<T>()
    }

    #[inline]
    pub const fn scalar_kind(&self) -> Option<&ScalarKind> {
        match &self.kind {
            TypeKind::Scalar(kind) => Some(kind),
            _ => None,
        }
    }

    /// Returns `true` if this is the `String` scalar.
    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self.kind, TypeKind::Scalar(ScalarKind::String))
    }

    /// The ordered descriptors of the type arguments.
    ///
    /// Empty for scalars and structures.
    pub fn type_arguments(&self) -> Vec<&'static TypeDescriptor> {
        match self.kind {
            TypeKind::Scalar(_) | TypeKind::Struct => Vec::new(),
            TypeKind::List(elem) | TypeKind::Set(elem) | TypeKind::Optional(elem) => {
                alloc::vec![elem()]
            }
            TypeKind::Map { key, value } => alloc::vec![key(), value()],
        }
    }
}

impl PartialEq for TypeDescriptor {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty
    }
}

impl Eq for TypeDescriptor {}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("ty", &self.ty)
            .field("kind", &self.kind)
            .finish()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ty.name())
    }
}
