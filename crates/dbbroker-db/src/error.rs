//! Database-specific error types and conversions.

use dbbroker_core::error::BrokerError;

/// Registry-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Malformed {entity} record {id}: {reason}")]
    Decode {
        entity: String,
        id: String,
        reason: String,
    },
}

impl From<DbError> for BrokerError {
    fn from(err: DbError) -> Self {
        BrokerError::Database(err.to_string())
    }
}
