use pactum_types::{PactContent, PacticipantId, PublicationId};

use crate::error::StoreResult;
use crate::query::PublicationQuery;
use crate::record::{NewPublication, Pact, PactVersion};

/// Deduplicating store of immutable pact versions.
///
/// Implementations must make `find_or_create_version` race-safe: under
/// concurrent publishers of identical content, all callers converge on the
/// single canonical row. Relational backends achieve this with a unique
/// constraint on `(sha, consumer, provider)` plus insert-or-fetch-on-conflict
/// semantics; a plain check-then-insert is not acceptable.
pub trait PactVersionStore: Send + Sync {
    /// Resolve content to its deduplicated version row, creating the row on
    /// first occurrence. Duplicate content is the normal dedup path, never a
    /// conflict. Creation is logged; lookups are not.
    fn find_or_create_version(
        &self,
        consumer_id: PacticipantId,
        provider_id: PacticipantId,
        content: &PactContent,
    ) -> StoreResult<PactVersion>;
}

/// Owner of the publication lifecycle.
pub trait PactPublicationStore: Send + Sync {
    /// Publish a pact. Resolves the content via the version store; the new
    /// row's revision number continues the `(consumer version, provider)`
    /// pair's history (0 for a fresh pair). Returns the hydrated pact.
    fn create(&self, params: NewPublication) -> StoreResult<Pact>;

    /// Resubmit content for an existing publication.
    ///
    /// If the content resolves to a different version than the one currently
    /// referenced, a new row is appended at `revision + 1` with the same
    /// coordinates. If it resolves to the same version, the existing
    /// publication is returned unchanged with no side effect.
    ///
    /// Implementations must protect the read-modify-write with row locking
    /// or optimistic retry: a conflicting concurrent update is retried once
    /// with fresh state, then surfaced as the retryable
    /// [`RevisionConflict`](crate::StoreError::RevisionConflict).
    fn update(&self, id: PublicationId, content: &PactContent) -> StoreResult<Pact>;

    /// Delete every publication at the named coordinates (all revisions).
    /// Returns the number of rows removed; 0 when nothing matched. Pact
    /// versions still referenced elsewhere are never removed.
    fn delete(
        &self,
        consumer_name: &str,
        provider_name: &str,
        consumer_version_number: &str,
    ) -> StoreResult<usize>;
}

/// Read boundary over publication history.
///
/// Holds no locks across calls and is safe for unlimited concurrent readers.
pub trait PublicationReader: Send + Sync {
    /// Evaluate a query, returning hydrated pacts in the requested order.
    /// An unknown consumer or provider name yields an empty result.
    fn query(&self, query: &PublicationQuery) -> StoreResult<Vec<Pact>>;

    /// Evaluate a query expecting at most one row.
    fn query_one(&self, query: &PublicationQuery) -> StoreResult<Option<Pact>> {
        let limited = query.clone().limit(1);
        Ok(self.query(&limited)?.into_iter().next())
    }
}

impl<T: PublicationReader + ?Sized> PublicationReader for &T {
    fn query(&self, query: &PublicationQuery) -> StoreResult<Vec<Pact>> {
        (**self).query(query)
    }
}

impl<T: PublicationReader + ?Sized> PublicationReader for std::sync::Arc<T> {
    fn query(&self, query: &PublicationQuery) -> StoreResult<Vec<Pact>> {
        (**self).query(query)
    }
}
