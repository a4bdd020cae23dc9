use pactum_types::{ContentSha, VersionOrder};

/// Sort direction for query results, keyed on consumer version order
/// (revision number as tiebreak within a version).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Highest order first ("latest").
    #[default]
    NewestFirst,
    /// Lowest order first ("earliest").
    OldestFirst,
}

/// A publication query: the filter/sort/limit primitives the persistence
/// boundary must support.
///
/// Built by chaining, interpreted by a [`PublicationReader`] backend:
///
/// ```
/// use pactum_store::PublicationQuery;
///
/// let query = PublicationQuery::new()
///     .consumer("Frontend")
///     .provider("Accounts")
///     .newest_first()
///     .limit(1);
/// assert_eq!(query.limit, Some(1));
/// ```
///
/// By default only the latest revision at each consumer version is visible,
/// matching the "effective" pact history. Filtering by an explicit
/// [`revision_number`](Self::revision_number) switches to all revisions so
/// superseded rows can be retrieved.
///
/// [`PublicationReader`]: crate::traits::PublicationReader
#[derive(Clone, Debug, Default)]
pub struct PublicationQuery {
    pub consumer: Option<String>,
    pub provider: Option<String>,
    pub consumer_version_number: Option<String>,
    pub revision_number: Option<u64>,
    pub tag: Option<String>,
    pub order_before: Option<VersionOrder>,
    pub order_after: Option<VersionOrder>,
    pub exclude_sha: Option<ContentSha>,
    pub all_revisions: bool,
    pub sort: SortOrder,
    pub limit: Option<usize>,
}

impl PublicationQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by consumer name (exact match).
    pub fn consumer(mut self, name: impl Into<String>) -> Self {
        self.consumer = Some(name.into());
        self
    }

    /// Filter by provider name (exact match).
    pub fn provider(mut self, name: impl Into<String>) -> Self {
        self.provider = Some(name.into());
        self
    }

    /// Filter by consumer version number (exact match, opaque label).
    pub fn consumer_version_number(mut self, number: impl Into<String>) -> Self {
        self.consumer_version_number = Some(number.into());
        self
    }

    /// Filter by explicit revision number. Implies all revisions are
    /// visible, not just the latest at each consumer version.
    pub fn revision_number(mut self, revision: u64) -> Self {
        self.revision_number = Some(revision);
        self.all_revisions = true;
        self
    }

    /// Filter to consumer versions carrying the given tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Only consumer versions ordered strictly before the given key.
    pub fn order_before(mut self, order: VersionOrder) -> Self {
        self.order_before = Some(order);
        self
    }

    /// Only consumer versions ordered strictly after the given key.
    pub fn order_after(mut self, order: VersionOrder) -> Self {
        self.order_after = Some(order);
        self
    }

    /// Exclude publications whose content sha equals the given digest.
    /// This is the cheap prefilter used by the distinct-pact walk.
    pub fn exclude_sha(mut self, sha: ContentSha) -> Self {
        self.exclude_sha = Some(sha);
        self
    }

    /// Sort highest consumer version order first.
    pub fn newest_first(mut self) -> Self {
        self.sort = SortOrder::NewestFirst;
        self
    }

    /// Sort lowest consumer version order first.
    pub fn oldest_first(mut self) -> Self {
        self.sort = SortOrder::OldestFirst;
        self
    }

    /// Cap the number of results.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}
