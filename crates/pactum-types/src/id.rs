use std::fmt;

use serde::{Deserialize, Serialize};

/// Declares a time-ordered UUID v7 identifier newtype.
macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Generate a new time-ordered identifier (UUID v7).
            pub fn new() -> Self {
                Self(uuid::Uuid::now_v7())
            }

            /// Create from an existing UUID.
            pub fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// The underlying UUID.
            pub fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }

            /// Short representation (first 8 characters of the UUID).
            pub fn short_id(&self) -> String {
                self.0.to_string()[..8].to_string()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.short_id())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id! {
    /// Identifier for a pacticipant (a consumer or provider application).
    PacticipantId
}

entity_id! {
    /// Identifier for a consumer application version.
    ConsumerVersionId
}

entity_id! {
    /// Identifier for a deduplicated, immutable pact version record.
    PactVersionId
}

entity_id! {
    /// Identifier for a pact publication row.
    PublicationId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = PublicationId::new();
        let b = PublicationId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn uuid_roundtrip() {
        let id = PactVersionId::new();
        let back = PactVersionId::from_uuid(*id.as_uuid());
        assert_eq!(id, back);
    }

    #[test]
    fn debug_uses_short_id() {
        let id = PacticipantId::new();
        let debug = format!("{id:?}");
        assert!(debug.starts_with("PacticipantId("));
        assert!(debug.contains(&id.short_id()));
    }
}
