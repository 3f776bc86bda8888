use alloc::string::{String, ToString};
use alloc::vec::Vec;

use indexmap::IndexMap;

use crate::diagnostics::MappingPath;
use crate::info::{DescriptorFn, TypeDescriptor, TypeKind};
use crate::mapper::Mapper;
use crate::mapper::convert::{check_type, require_enum_trait, type_trait};
use crate::raw::{RawMap, RawValue};
use crate::registry::{TypeRegistry, TypeTraitMapping, TypeTraitOptional, TypeTraitSequence};
use crate::structure::{CommentGroupId, SlotDescriptor};
use crate::utils::HashSet;
use crate::{MapperError, Reflect};

// -----------------------------------------------------------------------------
// ExportContext

/// Comments collected while exporting, keyed by slot path.
///
/// The comments of a [`CommentGroupId`] are collected at most once per
/// context, on the first present export of their slot. Reusing a context
/// across several exports keeps that guarantee across all of them.
#[derive(Debug, Clone, Default)]
pub struct ExportContext {
    used_groups: HashSet<CommentGroupId>,
    comments: IndexMap<String, Vec<String>>,
}

impl ExportContext {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_group_used(&self, group: CommentGroupId) -> bool {
        self.used_groups.contains(&group)
    }

    /// Comment lines per slot path.
    ///
    /// A slot's comments are collected once its value has been exported, so
    /// the paths inside a nested value come before the path of the slot
    /// holding it.
    #[inline]
    pub fn comments(&self) -> &IndexMap<String, Vec<String>> {
        &self.comments
    }

    pub fn comments_for(&self, path: &str) -> &[String] {
        self.comments.get(path).map_or(&[], Vec::as_slice)
    }

    #[inline]
    pub fn into_comments(self) -> IndexMap<String, Vec<String>> {
        self.comments
    }

    fn collect(&mut self, slot: &SlotDescriptor, path: &MappingPath) {
        if slot.comments().is_empty() {
            return;
        }
        if let Some(group) = slot.comment_group()
            && !self.used_groups.insert(group)
        {
            return;
        }
        self.comments
            .entry(path.to_string())
            .or_default()
            .extend(slot.comments().iter().cloned());
    }
}

// -----------------------------------------------------------------------------
// Exporter

/// One recursive descent from typed values back to raw values.
pub(super) struct Exporter<'a> {
    pub mapper: &'a Mapper,
    pub registry: &'a TypeRegistry,
    pub context: Option<&'a mut ExportContext>,
}

impl Exporter<'_> {
    /// Exports `value` as `target`. `None` means the value is omitted.
    pub fn export(
        &mut self,
        value: &dyn Reflect,
        target: &'static TypeDescriptor,
        path: &MappingPath,
    ) -> Result<Option<RawValue>, MapperError> {
        check_type(value, target, path)?;

        if let TypeKind::Optional(inner) = *target.kind() {
            let optional = type_trait::<TypeTraitOptional>(self.registry, target, path)?;
            return match optional.get(value).flatten() {
                Some(inner_value) => self.export(inner_value, inner(), &path.optional()),
                None => Ok(None),
            };
        }

        if let Some(raw) = self.mapper.leaf.try_export(value, self.registry) {
            return Ok(Some(raw));
        }

        match *target.kind() {
            TypeKind::List(elem) | TypeKind::Set(elem) => self.export_sequence(value, target, elem, path),
            TypeKind::Map { key, value: entry } => self.export_map(value, target, key, entry, path),
            TypeKind::Struct => self.export_struct(value, target, path),
            TypeKind::Scalar(_) | TypeKind::Optional(_) => {
                require_enum_trait(self.registry, target, path)?;
                log::trace!("`{}` at `{path}` has no export, omitting it", target.type_path());
                Ok(None)
            }
        }
    }

    fn export_sequence(
        &mut self,
        value: &dyn Reflect,
        target: &'static TypeDescriptor,
        elem: DescriptorFn,
        path: &MappingPath,
    ) -> Result<Option<RawValue>, MapperError> {
        let sequence = type_trait::<TypeTraitSequence>(self.registry, target, path)?;
        let Some(items) = sequence.items(value) else {
            return Ok(None);
        };
        let elem = elem();

        let mut exported = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match self.export(item, elem, &path.index(index))? {
                Some(raw) => exported.push(raw),
                None => log::trace!("dropping element {index} of `{path}` from export"),
            }
        }
        Ok(Some(RawValue::List(exported)))
    }

    fn export_map(
        &mut self,
        value: &dyn Reflect,
        target: &'static TypeDescriptor,
        key: DescriptorFn,
        entry: DescriptorFn,
        path: &MappingPath,
    ) -> Result<Option<RawValue>, MapperError> {
        let key = key();
        if !key.is_string() {
            return Err(MapperError::NonStringMapKey {
                ty: target.type_path(),
                key: key.type_path(),
                path: path.to_string(),
            });
        }
        let mapping = type_trait::<TypeTraitMapping>(self.registry, target, path)?;
        let Some(entries) = mapping.entries(value) else {
            return Ok(None);
        };
        let entry = entry();

        let mut exported = RawMap::with_capacity(entries.len());
        for (entry_key, entry_value) in entries {
            match self.export(entry_value, entry, &path.key(&entry_key))? {
                Some(raw) => {
                    exported.insert(entry_key.into_owned(), raw);
                }
                None => log::trace!("dropping entry `{entry_key}` of `{path}` from export"),
            }
        }
        Ok(Some(RawValue::Map(exported)))
    }

    fn export_struct(
        &mut self,
        value: &dyn Reflect,
        target: &'static TypeDescriptor,
        path: &MappingPath,
    ) -> Result<Option<RawValue>, MapperError> {
        let structure = self
            .mapper
            .structures
            .get_or_discover(self.registry, target, path)?;

        let mut exported = RawMap::with_capacity(structure.slots().len());
        for slot in structure.slots() {
            let slot_path = path.field(slot.export_name());
            let Some(slot_value) = slot.get(value) else {
                return Err(MapperError::TypeMismatch {
                    expected: target.type_path(),
                    found: value.reflect_type_path(),
                    path: path.to_string(),
                });
            };
            if let Some(raw) = self.export(slot_value, slot.declared(), &slot_path)? {
                if let Some(context) = self.context.as_deref_mut() {
                    context.collect(slot, &slot_path);
                }
                exported.insert(slot.export_name().into(), raw);
            }
        }
        Ok(Some(RawValue::Map(exported)))
    }
}
