use core::fmt;
use core::num::NonZeroU32;

/// Declares a compact arena index newtype.
///
/// - `u32` keeps tables small
/// - `NonZero` lets `Option<Id>` stay the same size as the id
macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $tag:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(NonZeroU32);

        impl $name {
            /// Create an id from a 0-based table index.
            pub fn from_index(index: usize) -> Self {
                let raw = u32::try_from(index)
                    .ok()
                    .and_then(|i| i.checked_add(1))
                    .and_then(NonZeroU32::new)
                    .unwrap_or(NonZeroU32::MAX);
                Self(raw)
            }

            /// Recover the 0-based table index.
            pub fn index(self) -> usize {
                (self.0.get() - 1) as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", $tag, self.index())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.index())
            }
        }
    };
}

arena_id!(
    /// Index of a node in a graph's node table.
    NodeId,
    "NodeId"
);

arena_id!(
    /// Index of an edge in a graph's edge table.
    EdgeId,
    "EdgeId"
);
