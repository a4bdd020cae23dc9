use serde::{Deserialize, Serialize};

use crate::id::{ConsumerVersionId, PacticipantId};
use crate::order::VersionOrder;

/// An application participating in a pact: a consumer or a provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pacticipant {
    pub id: PacticipantId,
    pub name: String,
}

impl Pacticipant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PacticipantId::new(),
            name: name.into(),
        }
    }
}

/// A label attached to a consumer version (e.g. "prod", "feat-search").
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag(pub String);

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A recorded version of a consumer application.
///
/// The `number` is an opaque label chosen by the publisher. The `order` field
/// is assigned by the registry at creation time and is the only value used
/// for history comparisons.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerVersion {
    pub id: ConsumerVersionId,
    pub pacticipant_id: PacticipantId,
    pub number: String,
    pub order: VersionOrder,
    pub tags: Vec<Tag>,
}

impl ConsumerVersion {
    /// Returns `true` if the version carries the given tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.as_str() == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_tag_matches_by_name() {
        let version = ConsumerVersion {
            id: ConsumerVersionId::new(),
            pacticipant_id: PacticipantId::new(),
            number: "1.2.3".into(),
            order: VersionOrder::FIRST,
            tags: vec![Tag::new("prod"), Tag::new("main")],
        };
        assert!(version.has_tag("prod"));
        assert!(!version.has_tag("staging"));
    }
}
