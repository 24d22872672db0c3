use hogwarts_core::error::CoreError;

/// Error type returned by the repository layer.
///
/// Repositories produce domain errors from inside their transactions
/// (missing references, duplicate names), so the raw driver error and
/// the domain kinds travel in one type. A failure partway through a
/// multi-row write drops the transaction, which rolls it back.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A domain invariant was violated.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The underlying persistence layer failed.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Convenience type alias for repository return values.
pub type DbResult<T> = Result<T, DbError>;
