//! Structural pact comparison for Pactum.
//!
//! Two pact documents with different bytes can still describe the same
//! contract: whitespace, indentation, and key order carry no meaning. This
//! crate answers the expensive half of that question — given two parsed
//! documents, produce the list of structural differences between them. An
//! empty result means "same contract".
//!
//! # Key Types
//!
//! - [`DiffEntry`] — a single structural difference (added/removed/changed)
//! - [`DiffOptions`] — comparison switches, notably `allow_unexpected_keys`
//! - [`diff_contents`] / [`diff_values`] — the comparison entry points

pub mod error;
pub mod semantic;

pub use error::{DiffError, DiffResult};
pub use semantic::{diff_contents, diff_values, DiffEntry, DiffOptions};
