use alloc::boxed::Box;
use alloc::string::{String, ToString};

use crate::Reflect;
use crate::info::TypeDescriptor;
use crate::leaf::LeafConverter;
use crate::raw::RawValue;
use crate::registry::TypeRegistry;

/// Converts strings, numbers and booleans to `String`.
///
/// Only `String` values are exported.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringConverter;

impl LeafConverter for StringConverter {
    fn try_convert(
        &self,
        raw: &RawValue,
        target: &TypeDescriptor,
        _: &TypeRegistry,
    ) -> Option<Box<dyn Reflect>> {
        if !target.is_string() {
            return None;
        }
        let text = match raw {
            RawValue::String(value) => value.clone(),
            RawValue::Bool(value) => value.to_string(),
            RawValue::Int(value) => value.to_string(),
            RawValue::Float(value) => value.to_string(),
            _ => return None,
        };
        Some(Box::new(text))
    }

    fn try_export(&self, value: &dyn Reflect, _: &TypeRegistry) -> Option<RawValue> {
        value
            .downcast_ref::<String>()
            .map(|value| RawValue::String(value.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::StringConverter;
    use crate::info::Typed;
    use crate::leaf::LeafConverter;
    use crate::raw::RawValue;
    use crate::registry::TypeRegistry;
    use alloc::string::String;

    fn convert(raw: RawValue) -> Option<String> {
        let registry = TypeRegistry::new();
        StringConverter
            .try_convert(&raw, String::type_descriptor(), &registry)
            .and_then(|value| value.take::<String>().ok())
    }

    #[test]
    fn scalars_become_text() {
        assert_eq!(convert("abc".into()).as_deref(), Some("abc"));
        assert_eq!(convert(RawValue::Int(-12)).as_deref(), Some("-12"));
        assert_eq!(convert(RawValue::Float(2.5)).as_deref(), Some("2.5"));
        assert_eq!(convert(RawValue::Bool(true)).as_deref(), Some("true"));
    }

    #[test]
    fn containers_are_rejected() {
        assert_eq!(convert(RawValue::List(vec![])), None);
        assert_eq!(convert(RawValue::Null), None);

        let registry = TypeRegistry::new();
        let raw = RawValue::from("abc");
        assert!(StringConverter.try_convert(&raw, i32::type_descriptor(), &registry).is_none());
    }
}
