//! Deployability summary over pact verification matrix rows.
//!
//! The matrix view joins pact publications with verification results; this
//! crate rolls those rows up into the tri-state answer to "can I deploy?".
//! `None` means the question cannot be answered yet — either nothing matched
//! the query or a verification is still outstanding.

pub mod summary;

pub use summary::{summarize, DeploySummary, MatrixRow};
