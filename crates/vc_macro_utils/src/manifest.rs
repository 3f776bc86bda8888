use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// The facade package re-exporting every `vc_*` member as a module.
const FACADE_NAME: &str = "vc_config";
const MEMBER_PREFIX: &str = "vc_";

/// The parsed `Cargo.toml` of the crate invoking a derive macro.
///
/// Generated code must name `vc_mapper` the way the invoking crate can see
/// it. [`get_crate_path`](Self::get_crate_path) resolves a member crate to:
///
/// 1. `::vc_mapper` when it is a direct dependency;
/// 2. `::vc_config::mapper` when only the facade is a dependency;
/// 3. the same two checks against `dev-dependencies`;
/// 4. `::vc_mapper` otherwise.
///
/// The engine itself declares `extern crate self as vc_mapper;`, so rule 4
/// also holds inside it.
///
/// # Example
///
/// ```rust
/// # use vc_macro_utils::Manifest;
/// let path: syn::Path = Manifest::shared(|manifest| manifest.get_crate_path("vc_mapper"));
/// ```
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

impl Manifest {
    fn path() -> PathBuf {
        let Some(dir) = std::env::var_os("CARGO_MANIFEST_DIR") else {
            panic!("`CARGO_MANIFEST_DIR` is not set, proc-macros must run under cargo");
        };
        PathBuf::from(dir).join("Cargo.toml")
    }

    fn load(path: &std::path::Path, modified_time: SystemTime) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text.into_boxed_str(),
            Err(error) => panic!("cannot read `{}`: {error}", path.display()),
        };
        match Document::parse(text) {
            Ok(manifest) => Self {
                manifest,
                modified_time,
            },
            Err(error) => panic!("cannot parse `{}`: {error}", path.display()),
        }
    }

    fn crate_path(text: &str) -> syn::Path {
        match syn::parse_str(text) {
            Ok(path) => path,
            Err(error) => panic!("`{text}` is not a path: {error}"),
        }
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::crate_path(&format!("::{name}")));
        }
        let module = name.strip_prefix(MEMBER_PREFIX)?;
        deps.contains_key(FACADE_NAME)
            .then(|| Self::crate_path(&format!("::{FACADE_NAME}::{module}")))
    }

    fn dependency_table(&self, key: &str) -> Option<&Table> {
        match self.manifest.get(key) {
            Some(Item::Table(table)) => Some(table),
            _ => None,
        }
    }

    /// The path of the package `name` as seen from the invoking crate.
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        ["dependencies", "dev-dependencies"]
            .into_iter()
            .filter_map(|key| self.dependency_table(key))
            .find_map(|deps| Self::find_in_deps(deps, name))
            .unwrap_or_else(|| Self::crate_path(&format!("::{name}")))
    }

    /// Runs `func` with the invoking crate's manifest.
    ///
    /// Manifests are cached per path and reloaded when the file changes.
    /// Reading one is still costly for a proc-macro, so call this once per
    /// expansion and keep the resulting paths.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static CACHE: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let path = Self::path();
        let modified_time = match std::fs::metadata(&path).and_then(|meta| meta.modified()) {
            Ok(time) => time,
            Err(error) => panic!("cannot stat `{}`: {error}", path.display()),
        };

        {
            let cache = CACHE.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(manifest) = cache.get(&path)
                && manifest.modified_time == modified_time
            {
                return func(manifest);
            }
        }

        let manifest = Self::load(&path, modified_time);
        let result = func(&manifest);
        CACHE
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);
        result
    }
}
