//! Content hashing for Pactum.
//!
//! A single concern lives here: computing the [`ContentSha`] that keys pact
//! version deduplication. The digest is a dedup/equality-acceleration key,
//! not a security boundary; collision risk is accepted as negligible.

pub mod hasher;

pub use hasher::ContentHasher;
