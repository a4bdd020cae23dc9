use pactum_types::{ConsumerVersionId, PacticipantId, PactVersionId, PublicationId};

/// Errors from pact store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The publication being updated does not exist.
    #[error("publication not found: {0}")]
    PublicationNotFound(PublicationId),

    /// A pacticipant referenced by id does not exist.
    #[error("pacticipant not found: {0}")]
    PacticipantNotFound(PacticipantId),

    /// A consumer version referenced by id does not exist.
    #[error("consumer version not found: {0}")]
    VersionNotFound(ConsumerVersionId),

    /// A publication points at a pact version that does not exist.
    #[error("pact version not found: {0}")]
    PactVersionNotFound(PactVersionId),

    /// The consumer id supplied with a publication does not own the
    /// consumer version it names.
    #[error("consumer {consumer} does not own version {version}")]
    CoordinateMismatch {
        consumer: PacticipantId,
        version: ConsumerVersionId,
    },

    /// A version number was registered twice for the same pacticipant.
    #[error("version number {number:?} already exists for pacticipant {pacticipant}")]
    DuplicateVersionNumber {
        pacticipant: PacticipantId,
        number: String,
    },

    /// Two concurrent updates raced to create the same next revision.
    /// Retryable: the caller should re-read and resubmit.
    #[error("concurrent update conflict at revision {revision}")]
    RevisionConflict { revision: u64 },
}

impl StoreError {
    /// Returns `true` if the operation may succeed when retried with
    /// fresh state.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::RevisionConflict { .. })
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
