//! Small containers shared by the registry, the caches and the descriptor cells.

// -----------------------------------------------------------------------------
// Modules

mod hash;
mod type_id_map;

// -----------------------------------------------------------------------------
// Exports

pub use hash::{FixedHashState, HashSet, NoOpHashState};
pub use type_id_map::TypeIdMap;
