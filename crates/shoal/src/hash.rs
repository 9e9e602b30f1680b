//! State hashing for determinism verification.
//!
//! Two fields with identical dimensions and amounts always hash equal within a
//! build. Used to compare replays and to log a short fingerprint of each turn.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::ResourceField;

/// Compute a deterministic hash of a resource field.
#[must_use]
pub fn hash_field(field: &ResourceField) -> u64 {
    let mut hasher = DefaultHasher::new();
    hash_field_into(field, &mut hasher);
    hasher.finish()
}

/// Feed a field into an existing hasher.
///
/// Lets larger state hashes (a whole turn snapshot, say) include the field
/// without hashing it twice.
pub fn hash_field_into<H: Hasher>(field: &ResourceField, hasher: &mut H) {
    field.torus().width().hash(hasher);
    field.torus().height().hash(hasher);
    field.as_slice().hash(hasher);
}
