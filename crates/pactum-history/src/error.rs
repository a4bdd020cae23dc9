use pactum_diff::DiffError;
use pactum_store::StoreError;

/// Errors from history queries.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Stored content could not be structurally compared.
    #[error(transparent)]
    Diff(#[from] DiffError),
}

/// Result alias for history queries.
pub type HistoryResult<T> = Result<T, HistoryError>;
