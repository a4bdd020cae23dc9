//! Foundation types for Pactum.
//!
//! This crate provides the identifier, ordering, and content types used
//! throughout the Pactum system. Every other Pactum crate depends on
//! `pactum-types`.
//!
//! # Key Types
//!
//! - [`PacticipantId`] / [`ConsumerVersionId`] / [`PactVersionId`] /
//!   [`PublicationId`] — UUID v7 entity identifiers
//! - [`ContentSha`] — content digest identifier for deduplicated pact documents
//! - [`VersionOrder`] — monotonic ordering key for consumer versions
//! - [`PactContent`] — a raw pact document as published
//! - [`Pacticipant`] / [`ConsumerVersion`] / [`Tag`] — registry records

pub mod content;
pub mod error;
pub mod id;
pub mod order;
pub mod participant;
pub mod sha;

pub use content::PactContent;
pub use error::TypeError;
pub use id::{ConsumerVersionId, PacticipantId, PactVersionId, PublicationId};
pub use order::VersionOrder;
pub use participant::{ConsumerVersion, Pacticipant, Tag};
pub use sha::ContentSha;
