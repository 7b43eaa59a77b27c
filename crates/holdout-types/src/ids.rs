//! Type-safe identifier wrappers around plain integers.
//!
//! Every entity in the simulation has a strongly-typed ID to prevent
//! accidental mixing of identifiers at compile time. IDs are small
//! integers issued sequentially by the world state, which keeps log
//! output readable and test fixtures deterministic.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around an integer with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident($raw:ty)
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub $raw);

        impl $name {
            /// Wrap a raw integer value.
            pub const fn new(raw: $raw) -> Self {
                Self(raw)
            }

            /// Return the raw integer value.
            pub const fn into_inner(self) -> $raw {
                self.0
            }

            /// Return the next sequential identifier.
            ///
            /// Saturates at the type maximum rather than wrapping; the
            /// simulation will never mint that many entities in practice.
            pub const fn next(self) -> Self {
                Self(self.0.saturating_add(1))
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$raw> for $name {
            fn from(raw: $raw) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for $raw {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for an agent in the simulation.
    AgentId(u32)
}

define_id! {
    /// Unique identifier for a hostile entity.
    HostileId(u32)
}

define_id! {
    /// Unique identifier for a proposal between two agents.
    ///
    /// Issued from a monotonic counter on the world state, so an id is
    /// unique across every sender/recipient/tick combination.
    ProposalId(u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_increment() {
        let first = AgentId::new(1);
        assert_eq!(first.next(), AgentId::new(2));
        assert_eq!(first.into_inner(), 1);
    }

    #[test]
    fn id_roundtrip_serde() {
        let original = HostileId::new(7);
        let json = serde_json::to_string(&original).ok();
        assert_eq!(json.as_deref(), Some("7"));
        let restored: Result<HostileId, _> = serde_json::from_str(json.as_deref().unwrap_or(""));
        assert_eq!(restored.ok(), Some(original));
    }

    #[test]
    fn id_display_is_plain_number() {
        let id = ProposalId::new(42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn next_saturates_at_max() {
        let id = AgentId::new(u32::MAX);
        assert_eq!(id.next(), AgentId::new(u32::MAX));
    }
}
