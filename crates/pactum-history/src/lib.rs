//! History queries over the pact publication store.
//!
//! Read-only lookups scoped to a consumer/provider pair: the latest pact,
//! exact coordinates, nearest neighbours by consumer version order, and the
//! previous *distinct* pact — the nearest ancestor whose content differs
//! structurally, not just textually.
//!
//! All queries go through the [`PublicationReader`] boundary, hold no locks,
//! and return `None` for absence.
//!
//! [`PublicationReader`]: pactum_store::PublicationReader

pub mod error;
pub mod history;

pub use error::{HistoryError, HistoryResult};
pub use history::PactHistory;
