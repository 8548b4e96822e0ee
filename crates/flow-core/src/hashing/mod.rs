//! Utilidades de hashing (JSON canónico + blake3) para el `definition_hash`.

mod canonical_json;
mod hash;

pub use canonical_json::to_canonical_json;
pub use hash::{hash_str, hash_value};
