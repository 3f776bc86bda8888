//! Building structure instances from converted slot values.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::{self, Vec};
use core::fmt;

use crate::diagnostics::{ConversionDiagnostics, MappingPath};
use crate::mapper::ConvertedValue;
use crate::structure::{Constructor, DefaultConstructor, SlotDefault, StructureDescriptor};
use crate::{MapperError, Reflect};

/// The diagnostic recorded when a slot falls back to its default.
pub const FELL_BACK_TO_DEFAULT: &str = "fell back to default value";

// -----------------------------------------------------------------------------
// Instantiator

/// How a structure is built from its slot values.
#[derive(Clone)]
pub enum Instantiator {
    /// Every slot value, in slot order, is passed to one constructor.
    ByConstructor(Constructor),
    /// A default instance is created, then each slot is assigned.
    ByDefaultAndMutation(DefaultConstructor),
}

impl Instantiator {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ByConstructor(_) => "by constructor",
            Self::ByDefaultAndMutation(_) => "by default and mutation",
        }
    }

    /// Builds an instance of `structure` from `values`, one per slot.
    ///
    /// A `None` value is a slot whose input was missing or unusable. It takes
    /// the slot's default, recording a diagnostic at the slot's path and
    /// marking the result not fully valid. A mandatory slot without a value
    /// makes the whole instance absent.
    ///
    /// # Errors
    ///
    /// [`MapperError::SlotAssignment`] or [`MapperError::Construction`] when
    /// user code rejects a value or fails to construct.
    pub fn create(
        &self,
        structure: &StructureDescriptor,
        values: Vec<Option<ConvertedValue>>,
        path: &MappingPath,
        diagnostics: &mut ConversionDiagnostics,
    ) -> Result<Option<ConvertedValue>, MapperError> {
        match self {
            Self::ByConstructor(constructor) => {
                create_by_constructor(constructor, structure, values, path, diagnostics)
            }
            Self::ByDefaultAndMutation(create) => {
                create_by_mutation(create, structure, values, path, diagnostics)
            }
        }
    }
}

impl fmt::Debug for Instantiator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn fall_back(
    structure: &StructureDescriptor,
    slot: &str,
    path: &MappingPath,
    diagnostics: &mut ConversionDiagnostics,
) {
    log::debug!(
        "slot `{slot}` of `{}` at `{path}` fell back to its default",
        structure.type_path()
    );
    diagnostics.record(&path.field(slot), FELL_BACK_TO_DEFAULT);
}

fn missing_mandatory(structure: &StructureDescriptor, slot: &str, path: &MappingPath) {
    log::debug!(
        "mandatory slot `{slot}` of `{}` at `{path}` has no value",
        structure.type_path()
    );
}

fn create_by_constructor(
    constructor: &Constructor,
    structure: &StructureDescriptor,
    values: Vec<Option<ConvertedValue>>,
    path: &MappingPath,
    diagnostics: &mut ConversionDiagnostics,
) -> Result<Option<ConvertedValue>, MapperError> {
    let mut fully_valid = true;
    let mut args = Vec::with_capacity(values.len());

    for (slot, value) in structure.slots().iter().zip(values) {
        match (value, slot.default()) {
            (Some(value), _) => {
                fully_valid &= value.fully_valid;
                args.push(value.value);
            }
            (None, SlotDefault::Value(produce)) => {
                fall_back(structure, slot.export_name(), path, diagnostics);
                fully_valid = false;
                args.push(produce());
            }
            // Without an instance there is nothing to retain.
            (None, SlotDefault::None | SlotDefault::Retained) => {
                missing_mandatory(structure, slot.export_name(), path);
                return Ok(None);
            }
        }
    }

    let mut args = SlotArgs::new(structure, args, path);
    let value = constructor(&mut args)?;
    args.finish()?;

    Ok(Some(ConvertedValue::new(value, fully_valid)))
}

fn create_by_mutation(
    create: &DefaultConstructor,
    structure: &StructureDescriptor,
    values: Vec<Option<ConvertedValue>>,
    path: &MappingPath,
    diagnostics: &mut ConversionDiagnostics,
) -> Result<Option<ConvertedValue>, MapperError> {
    let mut fully_valid = true;
    let mut instance = create();

    for (slot, value) in structure.slots().iter().zip(values) {
        let assigned = match (value, slot.default()) {
            (Some(value), _) => {
                fully_valid &= value.fully_valid;
                value.value
            }
            (None, SlotDefault::Retained) => {
                fall_back(structure, slot.export_name(), path, diagnostics);
                fully_valid = false;
                continue;
            }
            (None, SlotDefault::Value(produce)) => {
                fall_back(structure, slot.export_name(), path, diagnostics);
                fully_valid = false;
                produce()
            }
            (None, SlotDefault::None) => {
                missing_mandatory(structure, slot.export_name(), path);
                return Ok(None);
            }
        };

        slot.set(&mut *instance, assigned)
            .map_err(|value| MapperError::SlotAssignment {
                ty: structure.type_path(),
                slot: slot.export_name().into(),
                expected: slot.declared().type_path(),
                value: format!("{value:?}"),
            })?;
    }

    Ok(Some(ConvertedValue::new(instance, fully_valid)))
}

// -----------------------------------------------------------------------------
// SlotArgs

/// The converted slot values handed to a constructor, in slot order.
pub struct SlotArgs<'a> {
    structure: &'a StructureDescriptor,
    values: vec::IntoIter<Box<dyn Reflect>>,
    consumed: usize,
    path: &'a MappingPath,
}

impl<'a> SlotArgs<'a> {
    fn new(
        structure: &'a StructureDescriptor,
        values: Vec<Box<dyn Reflect>>,
        path: &'a MappingPath,
    ) -> Self {
        Self {
            structure,
            values: values.into_iter(),
            consumed: 0,
            path,
        }
    }

    /// The number of values not consumed yet.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.values.len()
    }

    /// The export name of the slot returned by the next call to [`next`](Self::next).
    pub fn peek_slot(&self) -> Option<&str> {
        self.structure
            .slots()
            .get(self.consumed)
            .map(|slot| slot.export_name())
    }

    fn construction_error(&self, message: String) -> MapperError {
        MapperError::Construction {
            ty: self.structure.type_path(),
            path: self.path.to_string(),
            message,
        }
    }

    /// Takes the next slot value as a `V`.
    ///
    /// # Errors
    ///
    /// - [`MapperError::SlotAssignment`] if the value is not a `V`.
    /// - [`MapperError::Construction`] if every value was already taken.
    #[allow(
        clippy::should_implement_trait,
        reason = "typed extraction, not an iterator"
    )]
    pub fn next<V: Reflect>(&mut self) -> Result<V, MapperError> {
        let slot = self.peek_slot().map(String::from).unwrap_or_default();
        let Some(value) = self.values.next() else {
            let total = self.structure.slots().len();
            return Err(self.construction_error(format!(
                "constructor takes more than the {total} slot values"
            )));
        };
        self.consumed += 1;

        value.take::<V>().map_err(|value| MapperError::SlotAssignment {
            ty: self.structure.type_path(),
            slot,
            expected: core::any::type_name::<V>(),
            value: format!("{value:?}"),
        })
    }

    /// Wraps a validation failure of user code into [`MapperError::Construction`].
    pub fn fail(&self, message: impl Into<String>) -> MapperError {
        self.construction_error(message.into())
    }

    fn finish(self) -> Result<(), MapperError> {
        match self.remaining() {
            0 => Ok(()),
            left => Err(self.construction_error(format!(
                "constructor left {left} of {} slot values unused",
                self.structure.slots().len()
            ))),
        }
    }
}

impl fmt::Debug for SlotArgs<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotArgs")
            .field("ty", &self.structure.type_path())
            .field("consumed", &self.consumed)
            .field("remaining", &self.remaining())
            .finish()
    }
}
