use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

use crate::info::TypeDescriptor;
use crate::instantiate::Instantiator;
use crate::structure::{Accessor, Mutator, SlotDefault, StructureSchema};
use crate::utils::HashSet;
use crate::{MapperError, Reflect};

// -----------------------------------------------------------------------------
// CommentGroupId

static NEXT_COMMENT_GROUP: AtomicU64 = AtomicU64::new(0);

/// Process-unique identifier of the comments of one slot.
///
/// Assigned at discovery time to every slot with comments that are not
/// repeated. An export context emits the comments of a group only once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommentGroupId(u64);

impl CommentGroupId {
    fn next() -> Self {
        Self(NEXT_COMMENT_GROUP.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

// -----------------------------------------------------------------------------
// SlotDescriptor

/// One validated slot of a [`StructureDescriptor`].
pub struct SlotDescriptor {
    export_name: String,
    declared: &'static TypeDescriptor,
    accessor: Accessor,
    mutator: Option<Mutator>,
    default: SlotDefault,
    comments: Vec<String>,
    comment_group: Option<CommentGroupId>,
}

impl SlotDescriptor {
    /// The key of this slot in the raw map. Unique within the structure.
    #[inline]
    pub fn export_name(&self) -> &str {
        &self.export_name
    }

    #[inline]
    pub fn declared(&self) -> &'static TypeDescriptor {
        self.declared
    }

    #[inline]
    pub fn is_mutable(&self) -> bool {
        self.mutator.is_some()
    }

    #[inline]
    pub fn has_default(&self) -> bool {
        !matches!(self.default, SlotDefault::None)
    }

    #[inline]
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// `None` for slots without comments and for slots repeating their comments.
    #[inline]
    pub fn comment_group(&self) -> Option<CommentGroupId> {
        self.comment_group
    }

    /// Reads this slot out of `value`, or `None` if `value` is not of the owning type.
    #[inline]
    pub fn get<'a>(&self, value: &'a dyn Reflect) -> Option<&'a dyn Reflect> {
        (self.accessor)(value)
    }

    /// Assigns this slot, handing `value` back on a type mismatch or when
    /// the slot has no mutator.
    pub(crate) fn set(
        &self,
        target: &mut dyn Reflect,
        value: Box<dyn Reflect>,
    ) -> Result<(), Box<dyn Reflect>> {
        match &self.mutator {
            Some(mutator) => mutator(target, value),
            None => Err(value),
        }
    }

    #[inline]
    pub(crate) fn default(&self) -> &SlotDefault {
        &self.default
    }
}

impl fmt::Debug for SlotDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotDescriptor")
            .field("export_name", &self.export_name)
            .field("declared", &self.declared.type_path())
            .field("mutable", &self.is_mutable())
            .field("has_default", &self.has_default())
            .field("comments", &self.comments)
            .field("comment_group", &self.comment_group)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// StructureDescriptor

/// The validated slots of a structured type and how to instantiate it.
pub struct StructureDescriptor {
    ty: &'static TypeDescriptor,
    slots: Vec<SlotDescriptor>,
    instantiator: Instantiator,
}

impl StructureDescriptor {
    #[inline]
    pub fn ty(&self) -> &'static TypeDescriptor {
        self.ty
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty.type_path()
    }

    /// The slots, in declaration order.
    #[inline]
    pub fn slots(&self) -> &[SlotDescriptor] {
        &self.slots
    }

    pub fn slot(&self, export_name: &str) -> Option<&SlotDescriptor> {
        self.slots
            .iter()
            .find(|slot| slot.export_name == export_name)
    }

    #[inline]
    pub fn instantiator(&self) -> &Instantiator {
        &self.instantiator
    }
}

impl fmt::Debug for StructureDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructureDescriptor")
            .field("ty", &self.ty.type_path())
            .field("slots", &self.slots)
            .field("instantiator", &self.instantiator)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// discover

/// Validates `schema` and chooses its instantiation strategy.
///
/// Returns `Ok(None)` if the schema has neither a constructor nor a
/// zero-argument constructor.
///
/// # Errors
///
/// - [`MapperError::EmptyExportName`] if a slot has an empty name.
/// - [`MapperError::DuplicateExportName`] if two slots share a name.
/// - [`MapperError::MissingMutator`] if the type is built by mutation and a
///   slot cannot be assigned.
pub fn discover(schema: StructureSchema) -> Result<Option<StructureDescriptor>, MapperError> {
    let StructureSchema {
        ty,
        slots,
        constructor,
        default_constructor,
    } = schema;

    {
        let mut names = HashSet::default();
        for slot in &slots {
            if slot.name.is_empty() {
                return Err(MapperError::EmptyExportName {
                    ty: ty.type_path(),
                });
            }
            if !names.insert(slot.name.as_str()) {
                return Err(MapperError::DuplicateExportName {
                    ty: ty.type_path(),
                    name: slot.name.clone(),
                });
            }
        }
    }

    let instantiator = if let Some(constructor) = constructor {
        Instantiator::ByConstructor(constructor)
    } else if let Some(create) = default_constructor {
        if let Some(slot) = slots.iter().find(|slot| slot.mutator.is_none()) {
            return Err(MapperError::MissingMutator {
                ty: ty.type_path(),
                slot: slot.name.clone(),
            });
        }
        Instantiator::ByDefaultAndMutation(create)
    } else {
        return Ok(None);
    };

    let slots: Vec<SlotDescriptor> = slots
        .into_iter()
        .map(|slot| {
            let comment_group = (!slot.comments.is_empty() && !slot.repeat_comments)
                .then(CommentGroupId::next);
            SlotDescriptor {
                export_name: slot.name,
                declared: slot.declared,
                accessor: slot.accessor,
                mutator: slot.mutator,
                default: slot.default,
                comments: slot.comments,
                comment_group,
            }
        })
        .collect();

    log::debug!(
        "discovered structure `{}` with {} slots, {}",
        ty.type_path(),
        slots.len(),
        instantiator.name(),
    );

    Ok(Some(StructureDescriptor {
        ty,
        slots,
        instantiator,
    }))
}

#[cfg(test)]
mod tests {
    use super::discover;
    use crate::MapperError;
    use crate::info::{NonGenericDescriptorCell, TypeDescriptor, Typed};
    use crate::structure::SchemaBuilder;
    use alloc::string::String;

    #[derive(Debug, Default)]
    struct Motd {
        text: String,
        lines: u8,
    }

    impl Typed for Motd {
        fn type_descriptor() -> &'static TypeDescriptor {
            static CELL: NonGenericDescriptorCell = NonGenericDescriptorCell::new();
            CELL.get_or_init(TypeDescriptor::structure::<Self>)
        }
    }

    #[test]
    fn rejects_empty_and_duplicate_names() {
        let schema = SchemaBuilder::<Motd>::new()
            .slot("", |this| &this.text)
            .default_construct(Motd::default)
            .build();
        assert!(matches!(discover(schema), Err(MapperError::EmptyExportName { .. })));

        let schema = SchemaBuilder::<Motd>::new()
            .slot("text", |this| &this.text)
            .slot("text", |this| &this.lines)
            .construct(|args| Ok(Motd { text: args.next()?, lines: args.next()? }))
            .build();
        let error = discover(schema).unwrap_err();
        assert_eq!(
            error,
            MapperError::DuplicateExportName {
                ty: Motd::type_descriptor().type_path(),
                name: "text".into(),
            }
        );
    }

    #[test]
    fn mutation_requires_mutators() {
        let schema = SchemaBuilder::<Motd>::new()
            .slot("text", |this| &this.text)
            .mutable(|this, value| this.text = value)
            .slot("lines", |this| &this.lines)
            .default_construct(Motd::default)
            .build();
        let error = discover(schema).unwrap_err();
        assert!(matches!(error, MapperError::MissingMutator { slot, .. } if slot == "lines"));
    }

    #[test]
    fn no_constructor_is_not_a_structure() {
        let schema = SchemaBuilder::<Motd>::new()
            .slot("text", |this| &this.text)
            .build();
        assert!(discover(schema).unwrap().is_none());
    }

    #[test]
    fn constructor_wins_over_default_constructor() {
        let schema = SchemaBuilder::<Motd>::new()
            .slot("text", |this| &this.text)
            .slot("lines", |this| &this.lines)
            .construct(|args| Ok(Motd { text: args.next()?, lines: args.next()? }))
            .default_construct(Motd::default)
            .build();
        let descriptor = discover(schema).unwrap().unwrap();
        assert_eq!(descriptor.instantiator().name(), "by constructor");
        assert_eq!(descriptor.slots().len(), 2);
        assert!(descriptor.slot("lines").is_some());
    }

    #[test]
    fn comment_groups_are_unique() {
        let schema = SchemaBuilder::<Motd>::new()
            .slot("text", |this| &this.text)
            .comment("Shown on join")
            .slot("lines", |this| &this.lines)
            .comment("Line count")
            .repeat_comments()
            .construct(|args| Ok(Motd { text: args.next()?, lines: args.next()? }))
            .build();
        let first = discover(schema.clone()).unwrap().unwrap();
        let second = discover(schema).unwrap().unwrap();

        let group = first.slots()[0].comment_group().unwrap();
        assert!(first.slots()[1].comment_group().is_none());
        assert_ne!(Some(group), second.slots()[0].comment_group());
    }
}
