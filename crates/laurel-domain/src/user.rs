//! User identity as assigned by the external storage layer

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for a user
///
/// Laurel never creates users; identifiers are integer primary keys handed
/// in by the storage/CRUD collaborator. The newtype keeps them from being
/// mixed up with other integer ids at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw storage-layer user id
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw id value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}
