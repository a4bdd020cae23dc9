use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use tracing::debug;

use pactum_crypto::ContentHasher;
use pactum_types::{
    ConsumerVersion, ConsumerVersionId, ContentSha, PactContent, Pacticipant, PacticipantId,
    PactVersionId, PublicationId, Tag, VersionOrder,
};

use crate::error::{StoreError, StoreResult};
use crate::query::{PublicationQuery, SortOrder};
use crate::record::{NewPublication, Pact, PactPublication, PactVersion};
use crate::traits::{PactPublicationStore, PactVersionStore, PublicationReader};

/// In-memory pact store for tests and embedding.
///
/// Holds the pacticipant/version registry alongside the pact rows, behind a
/// single `RwLock`. The lock makes find-or-create and revision bumping
/// trivially atomic; relational backends must supply the unique-constraint
/// and row-locking disciplines documented on the traits instead.
pub struct InMemoryPactStore {
    inner: RwLock<State>,
}

#[derive(Default)]
struct State {
    pacticipants: HashMap<PacticipantId, Pacticipant>,
    names: HashMap<String, PacticipantId>,
    versions: HashMap<ConsumerVersionId, ConsumerVersion>,
    next_orders: HashMap<PacticipantId, VersionOrder>,
    pact_versions: HashMap<PactVersionId, PactVersion>,
    sha_index: HashMap<(ContentSha, PacticipantId, PacticipantId), PactVersionId>,
    publications: HashMap<PublicationId, PactPublication>,
}

impl InMemoryPactStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(State::default()),
        }
    }

    /// Look up a pacticipant by name, registering it on first use.
    pub fn find_or_create_pacticipant(&self, name: &str) -> Pacticipant {
        let mut state = self.inner.write().expect("lock poisoned");
        if let Some(id) = state.names.get(name) {
            return state.pacticipants[id].clone();
        }
        let pacticipant = Pacticipant::new(name);
        state.names.insert(name.to_string(), pacticipant.id);
        state
            .pacticipants
            .insert(pacticipant.id, pacticipant.clone());
        pacticipant
    }

    /// Register a new version of a pacticipant.
    ///
    /// The version's `order` is assigned here, monotonically per pacticipant,
    /// independent of wall-clock time. The number is an opaque label and must
    /// be unique per pacticipant.
    pub fn create_version(
        &self,
        pacticipant_id: PacticipantId,
        number: &str,
    ) -> StoreResult<ConsumerVersion> {
        let mut state = self.inner.write().expect("lock poisoned");
        if !state.pacticipants.contains_key(&pacticipant_id) {
            return Err(StoreError::PacticipantNotFound(pacticipant_id));
        }
        let duplicate = state
            .versions
            .values()
            .any(|v| v.pacticipant_id == pacticipant_id && v.number == number);
        if duplicate {
            return Err(StoreError::DuplicateVersionNumber {
                pacticipant: pacticipant_id,
                number: number.to_string(),
            });
        }
        let order = state
            .next_orders
            .get(&pacticipant_id)
            .copied()
            .unwrap_or(VersionOrder::FIRST);
        state.next_orders.insert(pacticipant_id, order.next());
        let version = ConsumerVersion {
            id: ConsumerVersionId::new(),
            pacticipant_id,
            number: number.to_string(),
            order,
            tags: Vec::new(),
        };
        state.versions.insert(version.id, version.clone());
        Ok(version)
    }

    /// Attach a tag to a registered version.
    pub fn tag_version(&self, version_id: ConsumerVersionId, tag: &str) -> StoreResult<()> {
        let mut state = self.inner.write().expect("lock poisoned");
        let version = state
            .versions
            .get_mut(&version_id)
            .ok_or(StoreError::VersionNotFound(version_id))?;
        if !version.has_tag(tag) {
            version.tags.push(Tag::new(tag));
        }
        Ok(())
    }

    /// Number of deduplicated pact version rows.
    pub fn version_count(&self) -> usize {
        self.inner.read().expect("lock poisoned").pact_versions.len()
    }

    /// Number of publication rows (all revisions).
    pub fn publication_count(&self) -> usize {
        self.inner.read().expect("lock poisoned").publications.len()
    }
}

impl Default for InMemoryPactStore {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    fn find_or_create_version(
        &mut self,
        consumer_id: PacticipantId,
        provider_id: PacticipantId,
        content: &PactContent,
    ) -> PactVersion {
        let sha = ContentHasher::PACT.hash_content(content);
        if let Some(id) = self.sha_index.get(&(sha, consumer_id, provider_id)) {
            return self.pact_versions[id].clone();
        }
        debug!(sha = %sha.short_hex(), "creating new pact version");
        let version = PactVersion {
            id: PactVersionId::new(),
            consumer_id,
            provider_id,
            sha,
            content: content.clone(),
        };
        self.sha_index
            .insert((sha, consumer_id, provider_id), version.id);
        self.pact_versions.insert(version.id, version.clone());
        version
    }

    /// Revision number for the next publication at the given coordinates:
    /// the pair's current count, i.e. 0 for a fresh pair.
    fn next_revision(
        &self,
        consumer_version_id: ConsumerVersionId,
        provider_id: PacticipantId,
    ) -> u64 {
        self.publications
            .values()
            .filter(|p| {
                p.consumer_version_id == consumer_version_id && p.provider_id == provider_id
            })
            .map(|p| p.revision_number + 1)
            .max()
            .unwrap_or(0)
    }

    fn revision_exists(
        &self,
        consumer_version_id: ConsumerVersionId,
        provider_id: PacticipantId,
        revision: u64,
    ) -> bool {
        self.publications.values().any(|p| {
            p.consumer_version_id == consumer_version_id
                && p.provider_id == provider_id
                && p.revision_number == revision
        })
    }

    fn hydrate(&self, publication: &PactPublication) -> StoreResult<Pact> {
        let consumer_version = self
            .versions
            .get(&publication.consumer_version_id)
            .ok_or(StoreError::VersionNotFound(publication.consumer_version_id))?;
        let consumer = self
            .pacticipants
            .get(&consumer_version.pacticipant_id)
            .ok_or(StoreError::PacticipantNotFound(consumer_version.pacticipant_id))?;
        let provider = self
            .pacticipants
            .get(&publication.provider_id)
            .ok_or(StoreError::PacticipantNotFound(publication.provider_id))?;
        let pact_version = self
            .pact_versions
            .get(&publication.pact_version_id)
            .ok_or(StoreError::PactVersionNotFound(publication.pact_version_id))?;
        Ok(Pact {
            id: publication.id,
            consumer: consumer.clone(),
            provider: provider.clone(),
            consumer_version: consumer_version.clone(),
            pact_version_id: pact_version.id,
            sha: pact_version.sha,
            revision_number: publication.revision_number,
            content: pact_version.content.clone(),
            created_at: publication.created_at,
        })
    }
}

impl PactVersionStore for InMemoryPactStore {
    fn find_or_create_version(
        &self,
        consumer_id: PacticipantId,
        provider_id: PacticipantId,
        content: &PactContent,
    ) -> StoreResult<PactVersion> {
        let mut state = self.inner.write().expect("lock poisoned");
        if !state.pacticipants.contains_key(&consumer_id) {
            return Err(StoreError::PacticipantNotFound(consumer_id));
        }
        if !state.pacticipants.contains_key(&provider_id) {
            return Err(StoreError::PacticipantNotFound(provider_id));
        }
        Ok(state.find_or_create_version(consumer_id, provider_id, content))
    }
}

impl PactPublicationStore for InMemoryPactStore {
    fn create(&self, params: NewPublication) -> StoreResult<Pact> {
        let mut state = self.inner.write().expect("lock poisoned");
        let version = state
            .versions
            .get(&params.consumer_version_id)
            .ok_or(StoreError::VersionNotFound(params.consumer_version_id))?;
        if version.pacticipant_id != params.consumer_id {
            return Err(StoreError::CoordinateMismatch {
                consumer: params.consumer_id,
                version: params.consumer_version_id,
            });
        }
        if !state.pacticipants.contains_key(&params.provider_id) {
            return Err(StoreError::PacticipantNotFound(params.provider_id));
        }
        let pact_version =
            state.find_or_create_version(params.consumer_id, params.provider_id, &params.content);
        let revision = state.next_revision(params.consumer_version_id, params.provider_id);
        let publication = PactPublication {
            id: PublicationId::new(),
            consumer_version_id: params.consumer_version_id,
            provider_id: params.provider_id,
            pact_version_id: pact_version.id,
            revision_number: revision,
            created_at: Utc::now(),
        };
        state.publications.insert(publication.id, publication.clone());
        state.hydrate(&publication)
    }

    fn update(&self, id: PublicationId, content: &PactContent) -> StoreResult<Pact> {
        let mut state = self.inner.write().expect("lock poisoned");
        let existing = state
            .publications
            .get(&id)
            .cloned()
            .ok_or(StoreError::PublicationNotFound(id))?;
        let consumer_id = state
            .versions
            .get(&existing.consumer_version_id)
            .ok_or(StoreError::VersionNotFound(existing.consumer_version_id))?
            .pacticipant_id;
        let pact_version =
            state.find_or_create_version(consumer_id, existing.provider_id, content);
        if pact_version.id == existing.pact_version_id {
            // Identical content: no new revision, no side effect beyond the
            // find-or-create lookup above.
            return state.hydrate(&existing);
        }
        let revision = existing.revision_number + 1;
        // Cannot trigger under this store's single write lock; relational
        // backends retry once with fresh state before surfacing this.
        if state.revision_exists(existing.consumer_version_id, existing.provider_id, revision) {
            return Err(StoreError::RevisionConflict { revision });
        }
        let publication = PactPublication {
            id: PublicationId::new(),
            consumer_version_id: existing.consumer_version_id,
            provider_id: existing.provider_id,
            pact_version_id: pact_version.id,
            revision_number: revision,
            created_at: Utc::now(),
        };
        state.publications.insert(publication.id, publication.clone());
        state.hydrate(&publication)
    }

    fn delete(
        &self,
        consumer_name: &str,
        provider_name: &str,
        consumer_version_number: &str,
    ) -> StoreResult<usize> {
        let mut state = self.inner.write().expect("lock poisoned");
        let (Some(&consumer_id), Some(&provider_id)) = (
            state.names.get(consumer_name),
            state.names.get(provider_name),
        ) else {
            return Ok(0);
        };
        let doomed: Vec<PublicationId> = state
            .publications
            .values()
            .filter(|p| {
                p.provider_id == provider_id
                    && state
                        .versions
                        .get(&p.consumer_version_id)
                        .is_some_and(|v| {
                            v.pacticipant_id == consumer_id && v.number == consumer_version_number
                        })
            })
            .map(|p| p.id)
            .collect();
        for id in &doomed {
            state.publications.remove(id);
        }
        // Pact versions are shared and never cascade-deleted here.
        Ok(doomed.len())
    }
}

impl PublicationReader for InMemoryPactStore {
    fn query(&self, query: &PublicationQuery) -> StoreResult<Vec<Pact>> {
        let state = self.inner.read().expect("lock poisoned");

        let consumer_id = match &query.consumer {
            Some(name) => match state.names.get(name) {
                Some(id) => Some(*id),
                None => return Ok(Vec::new()),
            },
            None => None,
        };
        let provider_id = match &query.provider {
            Some(name) => match state.names.get(name) {
                Some(id) => Some(*id),
                None => return Ok(Vec::new()),
            },
            None => None,
        };

        let mut hits: Vec<&PactPublication> = Vec::new();
        for publication in state.publications.values() {
            let Some(version) = state.versions.get(&publication.consumer_version_id) else {
                continue;
            };
            if !state.pact_versions.contains_key(&publication.pact_version_id) {
                continue;
            }
            if consumer_id.is_some_and(|id| version.pacticipant_id != id) {
                continue;
            }
            if provider_id.is_some_and(|id| publication.provider_id != id) {
                continue;
            }
            if query
                .consumer_version_number
                .as_ref()
                .is_some_and(|n| &version.number != n)
            {
                continue;
            }
            if query.tag.as_ref().is_some_and(|t| !version.has_tag(t)) {
                continue;
            }
            if query.order_before.is_some_and(|o| version.order >= o) {
                continue;
            }
            if query.order_after.is_some_and(|o| version.order <= o) {
                continue;
            }
            if query
                .revision_number
                .is_some_and(|r| publication.revision_number != r)
            {
                continue;
            }
            hits.push(publication);
        }

        if !query.all_revisions {
            let mut latest: HashMap<(ConsumerVersionId, PacticipantId), &PactPublication> =
                HashMap::new();
            for publication in hits {
                latest
                    .entry((publication.consumer_version_id, publication.provider_id))
                    .and_modify(|current| {
                        if publication.revision_number > current.revision_number {
                            *current = publication;
                        }
                    })
                    .or_insert(publication);
            }
            hits = latest.into_values().collect();
        }

        // Sha exclusion runs after the latest-revision collapse: it filters
        // the effective history, so a superseded revision's sha can never
        // bring that row back into view.
        if let Some(excluded) = query.exclude_sha {
            hits.retain(|p| {
                state
                    .pact_versions
                    .get(&p.pact_version_id)
                    .is_some_and(|v| v.sha != excluded)
            });
        }

        hits.sort_by_key(|p| {
            let order = state
                .versions
                .get(&p.consumer_version_id)
                .map(|v| v.order)
                .unwrap_or_default();
            (order, p.revision_number)
        });
        if query.sort == SortOrder::NewestFirst {
            hits.reverse();
        }
        if let Some(limit) = query.limit {
            hits.truncate(limit);
        }

        hits.into_iter().map(|p| state.hydrate(p)).collect()
    }
}

impl std::fmt::Debug for InMemoryPactStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryPactStore")
            .field("pact_versions", &self.version_count())
            .field("publications", &self.publication_count())
            .finish()
    }
}
