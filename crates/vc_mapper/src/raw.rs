//! The weakly typed document tree consumed and produced by the mapper.
//!
//! A [`RawValue`] is what a document reader hands to the engine: scalars,
//! ordered lists and string-keyed maps. It carries no knowledge of the target
//! types, and the concrete text syntax it was parsed from is irrelevant here.
//!
//! Any serde data format can produce a raw tree through the
//! [`Deserialize`](serde_core::Deserialize) impl, and write it back through
//! [`Serialize`](serde_core::Serialize).
//!
//! ```
//! use vc_mapper::raw::RawValue;
//!
//! let raw: RawValue = serde_json::from_str(r#"{ "name": "web", "ports": [80, 443] }"#).unwrap();
//!
//! assert_eq!(raw.get("name").and_then(RawValue::as_str), Some("web"));
//! assert_eq!(raw.get("ports").and_then(RawValue::as_list).map(<[_]>::len), Some(2));
//! ```

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use indexmap::IndexMap;
use serde_core::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_core::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// Ordered, string-keyed map of raw values.
pub type RawMap = IndexMap<String, RawValue>;

// -----------------------------------------------------------------------------
// RawValue

/// A node of a parsed document.
///
/// [`RawValue::Null`] is treated exactly like a missing value by the mapper.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawValue {
    #[default]
    Null,
    Bool(bool),
    Int(i128),
    Float(f64),
    String(String),
    List(Vec<RawValue>),
    Map(RawMap),
}

impl RawValue {
    /// Returns `true` for [`RawValue::Null`].
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&[RawValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_map(&self) -> Option<&RawMap> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Looks up `key` if this value is a map.
    ///
    /// A key mapped to [`RawValue::Null`] is reported as missing.
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.as_map()
            .and_then(|entries| entries.get(key))
            .filter(|value| !value.is_null())
    }

    /// A short name of the value's shape, used in logs and diagnostics.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions

impl From<bool> for RawValue {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for RawValue {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::Int(value as i128)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl From<f32> for RawValue {
    #[inline]
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for RawValue {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for RawValue {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl From<String> for RawValue {
    #[inline]
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T: Into<RawValue>> From<Vec<T>> for RawValue {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

impl From<RawMap> for RawValue {
    #[inline]
    fn from(value: RawMap) -> Self {
        Self::Map(value)
    }
}

impl<K: Into<String>, V: Into<RawValue>> FromIterator<(K, V)> for RawValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Map(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

// -----------------------------------------------------------------------------
// Serialize

impl Serialize for RawValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Int(value) => {
                // Most formats have no 128-bit integers.
                if let Ok(value) = i64::try_from(*value) {
                    serializer.serialize_i64(value)
                } else if let Ok(value) = u64::try_from(*value) {
                    serializer.serialize_u64(value)
                } else {
                    serializer.serialize_i128(*value)
                }
            }
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::String(value) => serializer.serialize_str(value),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Deserialize

struct RawValueVisitor;

impl<'de> Visitor<'de> for RawValueVisitor {
    type Value = RawValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any document value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<RawValue, E> {
        Ok(RawValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<RawValue, E> {
        Ok(RawValue::Int(i128::from(v)))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<RawValue, E> {
        Ok(RawValue::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<RawValue, E> {
        Ok(RawValue::Int(i128::from(v)))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<RawValue, E> {
        i128::try_from(v)
            .map(RawValue::Int)
            .map_err(|_| E::custom("integer out of range"))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<RawValue, E> {
        Ok(RawValue::Float(v))
    }

    fn visit_char<E: de::Error>(self, v: char) -> Result<RawValue, E> {
        Ok(RawValue::String(v.into()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RawValue, E> {
        Ok(RawValue::String(v.into()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<RawValue, E> {
        Ok(RawValue::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<RawValue, E> {
        Ok(RawValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<RawValue, E> {
        Ok(RawValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<RawValue, D::Error> {
        RawValue::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<RawValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(RawValue::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawValue, A::Error> {
        let mut entries = RawMap::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, RawValue>()? {
            entries.insert(key, value);
        }
        Ok(RawValue::Map(entries))
    }
}

impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RawValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::{RawMap, RawValue};

    #[test]
    fn json_numbers_keep_their_kind() {
        let raw: RawValue = serde_json::from_str(r#"[1, -2, 2.5, 18446744073709551615]"#).unwrap();
        let items = raw.as_list().unwrap();
        assert_eq!(items[0], RawValue::Int(1));
        assert_eq!(items[1], RawValue::Int(-2));
        assert_eq!(items[2], RawValue::Float(2.5));
        assert_eq!(items[3], RawValue::Int(u64::MAX as i128));
    }

    #[test]
    fn map_order_is_preserved() {
        let raw: RawValue = serde_json::from_str(r#"{"b": 1, "a": 2, "c": 3}"#).unwrap();
        let keys: Vec<_> = raw.as_map().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn null_entries_read_as_missing() {
        let raw: RawValue = serde_json::from_str(r#"{"a": null, "b": true}"#).unwrap();
        assert!(raw.get("a").is_none());
        assert_eq!(raw.get("b").and_then(RawValue::as_bool), Some(true));
        assert!(raw.get("c").is_none());
    }

    #[test]
    fn ron_documents_parse() {
        let raw: RawValue = ron::from_str(r#"{ "title": "demo", "limits": [1, 2], "debug": false }"#)
            .unwrap();
        assert_eq!(raw.get("title").and_then(RawValue::as_str), Some("demo"));
        assert_eq!(raw.get("debug").and_then(RawValue::as_bool), Some(false));
    }

    #[test]
    fn serialized_output_reparses() {
        let raw: RawValue = [
            ("name", RawValue::from("x")),
            ("count", RawValue::from(3_u8)),
            ("tags", RawValue::from(vec!["a", "b"])),
        ]
        .into_iter()
        .collect();

        let text = serde_json::to_string(&raw).unwrap();
        assert_eq!(text, r#"{"name":"x","count":3,"tags":["a","b"]}"#);

        let mut expected = RawMap::new();
        expected.insert("name".into(), "x".into());
        assert_eq!(raw.get("name"), expected.get("name"));
    }
}
