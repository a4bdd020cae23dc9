use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pactum_types::{
    ConsumerVersion, ConsumerVersionId, ContentSha, PactContent, Pacticipant, PacticipantId,
    PactVersionId, PublicationId,
};

/// An immutable, deduplicated pact document.
///
/// At most one `PactVersion` exists per `(sha, consumer, provider)` triple.
/// The content is never mutated once stored; publications reference it, they
/// never edit it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PactVersion {
    pub id: PactVersionId,
    pub consumer_id: PacticipantId,
    pub provider_id: PacticipantId,
    pub sha: ContentSha,
    pub content: PactContent,
}

/// A publication row: one consumer version's pact pointing at a pact version.
///
/// Many publications may reference the same `PactVersion`. Updates never
/// rewrite a row; a content change appends a new row at `revision + 1`, so
/// every historical revision stays retrievable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PactPublication {
    pub id: PublicationId,
    pub consumer_version_id: ConsumerVersionId,
    pub provider_id: PacticipantId,
    pub pact_version_id: PactVersionId,
    pub revision_number: u64,
    pub created_at: DateTime<Utc>,
}

/// Parameters for publishing a pact.
#[derive(Clone, Debug)]
pub struct NewPublication {
    pub consumer_id: PacticipantId,
    pub consumer_version_id: ConsumerVersionId,
    pub provider_id: PacticipantId,
    pub content: PactContent,
}

/// A fully hydrated pact: a publication joined with its pacticipants,
/// consumer version (tags included), and content.
///
/// This is the shape the history queries traffic in. `consumer_version.order`
/// is the only field used for previous/next comparisons.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pact {
    pub id: PublicationId,
    pub consumer: Pacticipant,
    pub provider: Pacticipant,
    pub consumer_version: ConsumerVersion,
    pub pact_version_id: PactVersionId,
    pub sha: ContentSha,
    pub revision_number: u64,
    pub content: PactContent,
    pub created_at: DateTime<Utc>,
}

impl Pact {
    /// The consumer version number this pact was published at.
    pub fn consumer_version_number(&self) -> &str {
        &self.consumer_version.number
    }
}
