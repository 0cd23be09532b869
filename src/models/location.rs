//! Storage location selector

use std::fmt;

/// Which collection an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Location {
    /// Always-available internal store
    #[default]
    Internal,
    /// Removable media, present only when mounted
    Removable,
}

impl Location {
    /// Select the removable collection when `removable` is set
    pub fn from_flag(removable: bool) -> Self {
        if removable {
            Self::Removable
        } else {
            Self::Internal
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Internal => write!(f, "internal"),
            Self::Removable => write!(f, "removable"),
        }
    }
}
