use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;

use crate::info::{TypeDescriptor, Typed};
use crate::instantiate::SlotArgs;
use crate::{MapperError, Reflect};

// -----------------------------------------------------------------------------
// Erased closures

/// Reads a slot out of a structure. `None` if the value has another type.
pub(crate) type Accessor =
    Arc<dyn for<'a> Fn(&'a dyn Reflect) -> Option<&'a dyn Reflect> + Send + Sync>;

/// Writes a slot. Hands the value back if either side has the wrong type.
pub(crate) type Mutator =
    Arc<dyn Fn(&mut dyn Reflect, Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> + Send + Sync>;

pub(crate) type Constructor =
    Arc<dyn Fn(&mut SlotArgs<'_>) -> Result<Box<dyn Reflect>, MapperError> + Send + Sync>;

pub(crate) type DefaultConstructor = Arc<dyn Fn() -> Box<dyn Reflect> + Send + Sync>;

// Closures passed straight to a bounded parameter get higher-ranked signatures.
fn erase_accessor<G>(get: G) -> Accessor
where
    G: for<'a> Fn(&'a dyn Reflect) -> Option<&'a dyn Reflect> + Send + Sync + 'static,
{
    Arc::new(get)
}

fn erase_mutator<S>(set: S) -> Mutator
where
    S: Fn(&mut dyn Reflect, Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> + Send + Sync + 'static,
{
    Arc::new(set)
}

fn erase_constructor<C>(construct: C) -> Constructor
where
    C: Fn(&mut SlotArgs<'_>) -> Result<Box<dyn Reflect>, MapperError> + Send + Sync + 'static,
{
    Arc::new(construct)
}

// -----------------------------------------------------------------------------
// SlotSchema

/// Where the value of a slot comes from when its input is unusable.
#[derive(Clone, Default)]
pub(crate) enum SlotDefault {
    /// The slot is mandatory.
    #[default]
    None,
    /// The value already held by a default-constructed instance.
    Retained,
    /// A freshly produced value.
    Value(DefaultConstructor),
}

/// One declared slot of a [`StructureSchema`].
#[derive(Clone)]
pub struct SlotSchema {
    pub(crate) name: String,
    pub(crate) declared: &'static TypeDescriptor,
    pub(crate) accessor: Accessor,
    pub(crate) mutator: Option<Mutator>,
    pub(crate) default: SlotDefault,
    pub(crate) comments: Vec<String>,
    pub(crate) repeat_comments: bool,
}

impl SlotSchema {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
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
}

impl fmt::Debug for SlotSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotSchema")
            .field("name", &self.name)
            .field("declared", &self.declared.type_path())
            .field("mutable", &self.is_mutable())
            .field("has_default", &self.has_default())
            .field("comments", &self.comments)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// StructureSchema

/// The declared shape of a structured type.
///
/// Produced by [`Configurable::schema`](crate::structure::Configurable::schema)
/// and validated by [`discover`](crate::structure::discover).
#[derive(Clone)]
pub struct StructureSchema {
    pub(crate) ty: &'static TypeDescriptor,
    pub(crate) slots: Vec<SlotSchema>,
    pub(crate) constructor: Option<Constructor>,
    pub(crate) default_constructor: Option<DefaultConstructor>,
}

impl StructureSchema {
    #[inline]
    pub fn ty(&self) -> &'static TypeDescriptor {
        self.ty
    }

    #[inline]
    pub fn slots(&self) -> &[SlotSchema] {
        &self.slots
    }

    #[inline]
    pub fn has_constructor(&self) -> bool {
        self.constructor.is_some()
    }

    #[inline]
    pub fn has_default_constructor(&self) -> bool {
        self.default_constructor.is_some()
    }
}

impl fmt::Debug for StructureSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructureSchema")
            .field("ty", &self.ty.type_path())
            .field("slots", &self.slots)
            .field("constructor", &self.has_constructor())
            .field("default_constructor", &self.has_default_constructor())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// SchemaBuilder

/// Builds the [`StructureSchema`] of `T` from typed closures.
///
/// Slot modifiers such as [`mutable`](Self::mutable) or
/// [`comment`](Self::comment) apply to the most recently added slot.
///
/// # Panics
///
/// Slot modifiers panic when no slot has been added yet.
///
/// # Example
///
/// ```
/// use vc_mapper::structure::SchemaBuilder;
///
/// #[derive(Debug, Default)]
/// struct Limits {
///     max_users: u32,
///     motd: String,
/// }
///
/// vc_mapper::impl_custom_scalar!(Limits);
///
/// let schema = SchemaBuilder::<Limits>::new()
///     .slot("max-users", |this| &this.max_users)
///     .mutable(|this, value| this.max_users = value)
///     .with_default()
///     .comment("Upper bound of concurrent users")
///     .slot("motd", |this| &this.motd)
///     .mutable(|this, value| this.motd = value)
///     .default_construct(Limits::default)
///     .build();
///
/// assert_eq!(schema.slots().len(), 2);
/// assert!(schema.slots()[0].has_default());
/// assert!(!schema.slots()[1].has_default());
/// assert_eq!(schema.slots()[0].comments(), ["Upper bound of concurrent users"]);
/// ```
pub struct SchemaBuilder<T> {
    slots: Vec<SlotSchema>,
    constructor: Option<Constructor>,
    default_constructor: Option<DefaultConstructor>,
    marker: PhantomData<fn() -> T>,
}

impl<T: Reflect + Typed> Default for SchemaBuilder<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Reflect + Typed> SchemaBuilder<T> {
    #[inline]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            constructor: None,
            default_constructor: None,
            marker: PhantomData,
        }
    }

    fn last_slot(&mut self, modifier: &str) -> &mut SlotSchema {
        match self.slots.last_mut() {
            Some(slot) => slot,
            None => panic!(
                "Called `SchemaBuilder::{modifier}` for `{}` before any slot was added",
                core::any::type_name::<T>(),
            ),
        }
    }

    /// Adds a slot exported as `name`, read through `get`.
    pub fn slot<F>(
        mut self,
        name: impl Into<String>,
        get: impl Fn(&T) -> &F + Send + Sync + 'static,
    ) -> Self
    where
        F: Reflect + Typed,
    {
        let accessor = erase_accessor(move |value| {
            value.downcast_ref::<T>().map(|this| get(this) as &dyn Reflect)
        });
        self.slots.push(SlotSchema {
            name: name.into(),
            declared: F::type_descriptor(),
            accessor,
            mutator: None,
            default: SlotDefault::None,
            comments: Vec::new(),
            repeat_comments: false,
        });
        self
    }

    /// Makes the last slot assignable through `set`.
    pub fn mutable<F>(mut self, set: impl Fn(&mut T, F) + Send + Sync + 'static) -> Self
    where
        F: Reflect,
    {
        let mutator = erase_mutator(move |this, value| {
            let Some(this) = this.downcast_mut::<T>() else {
                return Err(value);
            };
            set(this, value.take::<F>()?);
            Ok(())
        });
        self.last_slot("mutable").mutator = Some(mutator);
        self
    }

    /// The last slot keeps the value of a default-constructed instance when
    /// its input is unusable.
    pub fn with_default(mut self) -> Self {
        self.last_slot("with_default").default = SlotDefault::Retained;
        self
    }

    /// The last slot takes the value produced by `default` when its input is unusable.
    pub fn default_value<F>(mut self, produce: impl Fn() -> F + Send + Sync + 'static) -> Self
    where
        F: Reflect,
    {
        let produce: DefaultConstructor = Arc::new(move || Box::new(produce()) as Box<dyn Reflect>);
        self.last_slot("default_value").default = SlotDefault::Value(produce);
        self
    }

    /// Appends a comment line to the last slot.
    pub fn comment(mut self, line: impl Into<String>) -> Self {
        self.last_slot("comment").comments.push(line.into());
        self
    }

    /// The comments of the last slot are emitted on every export of the slot,
    /// instead of once per export context.
    pub fn repeat_comments(mut self) -> Self {
        self.last_slot("repeat_comments").repeat_comments = true;
        self
    }

    /// Builds `T` from all slot values, consumed in slot order from [`SlotArgs`].
    pub fn construct(
        mut self,
        construct: impl Fn(&mut SlotArgs<'_>) -> Result<T, MapperError> + Send + Sync + 'static,
    ) -> Self {
        self.constructor = Some(erase_constructor(move |args| {
            construct(args).map(|value| Box::new(value) as Box<dyn Reflect>)
        }));
        self
    }

    /// Creates `T` without arguments; slots are then assigned through their mutators.
    pub fn default_construct(mut self, create: impl Fn() -> T + Send + Sync + 'static) -> Self {
        self.default_constructor = Some(Arc::new(move || Box::new(create()) as Box<dyn Reflect>));
        self
    }

    pub fn build(self) -> StructureSchema {
        StructureSchema {
            ty: T::type_descriptor(),
            slots: self.slots,
            constructor: self.constructor,
            default_constructor: self.default_constructor,
        }
    }
}
