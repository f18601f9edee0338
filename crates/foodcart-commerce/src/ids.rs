//! Newtype IDs for type-safe identifiers.
//!
//! Keeps catalog references and cart line ids from being mixed up; a
//! `LineId` is opaque and says nothing about where the line is displayed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Catalog reference of a menu item.
    ItemId
);
define_id!(
    /// Identifier of one line in a cart, stable for the line's lifetime.
    LineId
);

/// Monotonic line id source owned by a cart.
///
/// Ids are `<item>-<seq>`; the sequence never goes backwards, so two lines
/// added in the same instant still get distinct ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineIdSequence {
    next: u64,
}

impl LineIdSequence {
    /// Create a fresh sequence starting at 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id for a line of the given item.
    pub fn next_for(&mut self, item_id: &ItemId) -> LineId {
        self.next += 1;
        LineId(format!("{}-{}", item_id, self.next))
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ItemId::new("pizza");
        assert_eq!(id.as_str(), "pizza");
    }

    #[test]
    fn test_id_from_string() {
        let id: LineId = "pizza-1".into();
        assert_eq!(id.as_str(), "pizza-1");
        assert_eq!(format!("{}", id), "pizza-1");
    }

    #[test]
    fn test_sequence_never_repeats() {
        let mut seq = LineIdSequence::new();
        let item = ItemId::new("roll");
        let a = seq.next_for(&item);
        let b = seq.next_for(&item);
        assert_ne!(a, b);
        assert_eq!(a.as_str(), "roll-1");
        assert_eq!(b.as_str(), "roll-2");
        assert_eq!(seq.issued(), 2);
    }
}
