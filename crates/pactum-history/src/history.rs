use tracing::debug;

use pactum_diff::{diff_contents, DiffOptions};
use pactum_store::{Pact, PublicationQuery, PublicationReader};

use crate::error::HistoryResult;

/// Read-only history queries over a publication reader.
///
/// Cheap to construct; holds only the reader handle. Safe for unlimited
/// concurrent callers.
pub struct PactHistory<R> {
    reader: R,
}

impl<R: PublicationReader> PactHistory<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// The most recently ordered pact for the pair, optionally restricted to
    /// consumer versions carrying `tag`.
    pub fn find_latest_pact(
        &self,
        consumer: &str,
        provider: &str,
        tag: Option<&str>,
    ) -> HistoryResult<Option<Pact>> {
        let mut query = PublicationQuery::new()
            .consumer(consumer)
            .provider(provider)
            .newest_first();
        if let Some(tag) = tag {
            query = query.tag(tag);
        }
        Ok(self.reader.query_one(&query)?)
    }

    /// Exact lookup by coordinates. With `revision` omitted, the latest
    /// revision at that consumer version is returned.
    pub fn find_pact(
        &self,
        consumer: &str,
        consumer_version_number: &str,
        provider: &str,
        revision: Option<u64>,
    ) -> HistoryResult<Option<Pact>> {
        let mut query = PublicationQuery::new()
            .consumer(consumer)
            .provider(provider)
            .consumer_version_number(consumer_version_number)
            .newest_first();
        if let Some(revision) = revision {
            query = query.revision_number(revision);
        }
        Ok(self.reader.query_one(&query)?)
    }

    /// The nearest pact ordered strictly before the given one.
    pub fn find_previous_pact(&self, pact: &Pact) -> HistoryResult<Option<Pact>> {
        let query = self
            .pair_query(pact)
            .order_before(pact.consumer_version.order)
            .newest_first();
        Ok(self.reader.query_one(&query)?)
    }

    /// The nearest pact ordered strictly after the given one.
    pub fn find_next_pact(&self, pact: &Pact) -> HistoryResult<Option<Pact>> {
        let query = self
            .pair_query(pact)
            .order_after(pact.consumer_version.order)
            .oldest_first();
        Ok(self.reader.query_one(&query)?)
    }

    /// The nearest ancestor whose content differs *structurally* from the
    /// given pact.
    ///
    /// Two-tier walk. The sha-inequality prefilter skips whole runs of
    /// byte-identical publications with one query and no parsing; the
    /// structural diff then decides whether the surviving candidate is a
    /// genuine change or just a reformat. A reformat moves the cursor and
    /// the walk repeats from there, so the diff runs at most once per
    /// historical version.
    ///
    /// Any structural difference counts, including added keys
    /// ([`DiffOptions::strict`]). Each iteration strictly decreases the
    /// cursor's version order, so the walk terminates; callers on hot paths
    /// with very deep histories should apply their own timeout.
    pub fn find_previous_distinct_pact(&self, pact: &Pact) -> HistoryResult<Option<Pact>> {
        let mut current = pact.clone();
        loop {
            let Some(candidate) = self.previous_with_different_sha(&current)? else {
                return Ok(None);
            };
            let differences =
                diff_contents(&current.content, &candidate.content, DiffOptions::strict())?;
            if differences.is_empty() {
                // Different bytes, same structure: a reformat, not a change.
                debug!(
                    skipped = %candidate.consumer_version.number,
                    "skipping structurally identical ancestor"
                );
                current = candidate;
            } else {
                return Ok(Some(candidate));
            }
        }
    }

    /// Cheap prefilter: the highest-order earlier publication whose content
    /// sha differs from the cursor's.
    fn previous_with_different_sha(&self, current: &Pact) -> HistoryResult<Option<Pact>> {
        let query = self
            .pair_query(current)
            .order_before(current.consumer_version.order)
            .exclude_sha(current.sha)
            .newest_first();
        Ok(self.reader.query_one(&query)?)
    }

    fn pair_query(&self, pact: &Pact) -> PublicationQuery {
        PublicationQuery::new()
            .consumer(pact.consumer.name.as_str())
            .provider(pact.provider.name.as_str())
    }
}
