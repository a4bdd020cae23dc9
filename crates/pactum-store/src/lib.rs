//! Pact version and publication storage for Pactum.
//!
//! Two record kinds live here. A *pact version* is an immutable,
//! content-addressed document deduplicated per consumer/provider pair: the
//! same bytes published twice resolve to one row. A *publication* is a
//! mutable pointer from a consumer version to a pact version, carrying a
//! revision number that steps by one each time the referenced content
//! actually changes.
//!
//! # Boundaries
//!
//! All backends implement three traits:
//!
//! - [`PactVersionStore`] — `find_or_create` dedup of immutable versions
//! - [`PactPublicationStore`] — publication lifecycle (create/update/delete)
//! - [`PublicationReader`] — filter/sort/limit query primitives consumed by
//!   the history queries in `pactum-history`
//!
//! [`InMemoryPactStore`] is the reference backend for tests and embedding.
//!
//! # Design Rules
//!
//! 1. At most one pact version per `(sha, consumer, provider)`. Relational
//!    backends enforce this with a unique constraint plus
//!    insert-or-fetch-on-conflict, never a plain check-then-insert.
//! 2. Versions are immutable once written and are never deleted by this
//!    layer; publications reference them without owning them.
//! 3. Revision numbers per `(consumer version, provider)` start at 0 and
//!    increment by exactly 1, and only when content changes.
//! 4. Absent lookups return `Ok(None)` or an empty vec; absence is a normal
//!    outcome, not an error.

pub mod error;
pub mod memory;
pub mod query;
pub mod record;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryPactStore;
pub use query::{PublicationQuery, SortOrder};
pub use record::{NewPublication, Pact, PactPublication, PactVersion};
pub use traits::{PactPublicationStore, PactVersionStore, PublicationReader};
