use std::str::FromStr;

use bigdecimal::BigDecimal;
use vc_mapper::raw::RawValue;
use vc_mapper::registry::GetTypeMeta;
use vc_mapper::{Configurable, Mapper, Reflect};

#[derive(Debug, Clone, Copy, Configurable)]
enum Codec {
    Plain,
    #[config(name = "ZSTD")]
    Zstd,
}

#[derive(Debug, Configurable)]
struct Storage {
    path: String,
    compress: bool,
    codec: Codec,
    shards: u8,
    offset: i64,
    ratio: f32,
    weight: f64,
    capacity: u128,
}

fn storage() -> Storage {
    Storage {
        path: "/var/lib/data".into(),
        compress: true,
        codec: Codec::Zstd,
        shards: 12,
        offset: -40,
        ratio: 0.1,
        weight: 2.75,
        capacity: u128::MAX,
    }
}

/// Exports `value`, maps the result back and exports that again.
fn re_export<T: GetTypeMeta + Reflect>(
    mapper: &Mapper,
    value: &T,
) -> (RawValue, RawValue) {
    let first = mapper.export_value(value).unwrap().unwrap();
    let conversion = mapper.map_as::<T>(&first).unwrap();
    assert!(conversion.is_fully_valid());
    let second = mapper.export_value(conversion.value().unwrap()).unwrap().unwrap();
    (first, second)
}

#[test]
fn structures_export_the_same_document_twice() {
    let mapper = Mapper::new();
    let (first, second) = re_export(&mapper, &storage());
    assert_eq!(first, second);

    let map = first.as_map().unwrap();
    assert_eq!(map.len(), 8);
    assert_eq!(map["codec"], RawValue::from("ZSTD"));
    assert_eq!(map["capacity"], RawValue::from(u128::MAX.to_string()));
}

#[test]
fn every_leaf_family_is_stable() {
    let mapper = Mapper::new();

    let (first, second) = re_export(&mapper, &String::from("text"));
    assert_eq!(first, second);
    let (first, second) = re_export(&mapper, &false);
    assert_eq!(first, second);
    let (first, second) = re_export(&mapper, &-3_i16);
    assert_eq!(first, second);
    let (first, second) = re_export(&mapper, &1.1_f32);
    assert_eq!(first, second);
    let (first, second) = re_export(&mapper, &Codec::Plain);
    assert_eq!(first, second);
    let (first, second) = re_export(&mapper, &BigDecimal::from_str("1.5e120").unwrap());
    assert_eq!(first, second);
}

#[test]
fn documents_survive_a_text_round_trip() {
    let mapper = Mapper::new();
    let exported = mapper.export_value(&storage()).unwrap().unwrap();

    let text = serde_json::to_string(&exported).unwrap();
    let parsed: RawValue = serde_json::from_str(&text).unwrap();
    let conversion = mapper.map_as::<Storage>(&parsed).unwrap();
    assert!(conversion.is_fully_valid());

    let storage = conversion.into_value().unwrap();
    assert_eq!(storage.ratio, 0.1);
    assert_eq!(storage.capacity, u128::MAX);
    assert_eq!(mapper.export_value(&storage).unwrap().unwrap(), exported);
}
