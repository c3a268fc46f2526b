/// Checks that the invariants of core entities hold. Used in `debug_assert!` blocks.
pub mod assertions;

use std::hash::{DefaultHasher, Hash, Hasher};

/// Generates a process-unique identifier from a label and the current wall clock.
/// Not globally unique; good enough to tell apart entities created in one session.
pub fn pseudo_uid(label: &str) -> String {
    let mut hasher = DefaultHasher::new();
    label.hash(&mut hasher);
    jiff::Timestamp::now().as_nanosecond().hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}
