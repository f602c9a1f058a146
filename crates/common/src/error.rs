//! Common error types and handling for Flightdesk

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Flightdesk data layer
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Statement execution or connectivity fault reported by the driver.
    #[error("Persistence error: {0}")]
    Persistence(#[source] sqlx::Error),

    /// No connection could be checked out within the pool's bound.
    #[error("Connection pool exhausted: {0}")]
    PoolExhausted(#[source] sqlx::Error),

    /// An insert succeeded but the database handed back no primary key.
    #[error("Persistence error: insert into {table} returned no generated key")]
    MissingGeneratedKey { table: &'static str },

    /// A transactional operation failed and the rollback that followed failed too.
    #[error("{source} (rollback also failed: {rollback})")]
    RollbackFailed {
        #[source]
        source: Box<Error>,
        rollback: sqlx::Error,
    },

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => Error::PoolExhausted(err),
            other => Error::Persistence(other),
        }
    }
}

impl Error {
    /// Get the error code for logs and callers that switch on error kind.
    ///
    /// A failed rollback reports the code of the error that triggered it.
    pub fn error_code(&self) -> &'static str {
        match self.primary() {
            Error::Persistence(_)
            | Error::MissingGeneratedKey { .. }
            | Error::RollbackFailed { .. } => "PERSISTENCE_ERROR",
            Error::PoolExhausted(_) => "POOL_EXHAUSTED",
            Error::Validation(_) => "VALIDATION_ERROR",
        }
    }

    /// Whether the triggering error came from the storage layer rather than caller input
    pub fn is_persistence(&self) -> bool {
        !matches!(self.primary(), Error::Validation(_))
    }

    /// Whether a rollback failed after this error
    pub fn rollback_failed(&self) -> bool {
        matches!(self, Error::RollbackFailed { .. })
    }

    /// Whether the underlying driver error is a foreign-key violation
    pub fn is_foreign_key_violation(&self) -> bool {
        match self.primary() {
            Error::Persistence(sqlx::Error::Database(db)) => db.is_foreign_key_violation(),
            _ => false,
        }
    }

    /// The error that triggered a failed rollback, or `self` otherwise
    pub fn primary(&self) -> &Error {
        match self {
            Error::RollbackFailed { source, .. } => source.primary(),
            other => other,
        }
    }
}
