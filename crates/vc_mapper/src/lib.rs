#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// The derive macro emits `::vc_mapper::...` paths, which must also resolve
// inside this crate's own tests and doc tests.
extern crate self as vc_mapper;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod reflection;

pub mod diagnostics;
pub mod impls;
pub mod info;
pub mod instantiate;
pub mod leaf;
pub mod mapper;
pub mod ops;
pub mod raw;
pub mod registry;
pub mod structure;
pub mod utils;

// -----------------------------------------------------------------------------
// Top-Level exports

pub mod __macro_exports;

pub use error::MapperError;
pub use mapper::{Conversion, ConvertedValue, Mapper, MapperBuilder};
pub use reflection::Reflect;
pub use structure::Configurable;

pub use vc_mapper_derive::Configurable;
pub use vc_mapper_derive as derive;
