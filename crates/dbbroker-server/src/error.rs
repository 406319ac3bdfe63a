//! Startup error type for the broker process.

use dbbroker_core::error::AdminOperationError;
use dbbroker_db::DbError;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Registry connection failed: {0}")]
    Registry(#[source] surrealdb::Error),

    #[error("Admin connection failed: {0}")]
    AdminConnection(#[source] surrealdb::Error),

    #[error("Registry migration failed: {0}")]
    Migration(#[from] DbError),

    #[error("Admin setup failed: {0}")]
    Admin(#[from] AdminOperationError),

    #[error("Signal handling failed: {0}")]
    Signal(#[from] std::io::Error),
}
