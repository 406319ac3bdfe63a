//! Error types for the provisioning broker.

use thiserror::Error;

use crate::admin::CommandOutcome;

/// The single failure kind of the Admin Operations Layer.
///
/// Transport faults, timeouts, and rejected administrative commands all
/// end up here. The store's native error type never crosses this boundary;
/// only its message does.
#[derive(Debug, Clone, Error)]
#[error("admin operation failed: {message}")]
pub struct AdminOperationError {
    pub message: String,
    /// Structured result of the command that was rejected, if the failure
    /// came from a command outcome rather than the transport.
    pub outcome: Option<CommandOutcome>,
}

impl AdminOperationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            outcome: None,
        }
    }

    /// Failure carrying the raw command outcome for diagnostics.
    pub fn rejected(outcome: CommandOutcome) -> Self {
        Self {
            message: outcome.to_string(),
            outcome: Some(outcome),
        }
    }
}

#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("Service instance already exists: {id}")]
    InstanceAlreadyExists { id: String },

    #[error("Service instance does not exist: {id}")]
    InstanceDoesNotExist { id: String },

    #[error("Service instance binding already exists: {id}")]
    BindingAlreadyExists { id: String },

    #[error("Service instance binding does not exist: {id}")]
    BindingDoesNotExist { id: String },

    #[error("Provisioning failed: {0}")]
    Provisioning(#[source] AdminOperationError),

    #[error(transparent)]
    AdminOperation(#[from] AdminOperationError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification the API layer maps onto its status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Conflict,
    NotFound,
    Internal,
}

impl BrokerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BrokerError::InstanceAlreadyExists { .. } | BrokerError::BindingAlreadyExists { .. } => {
                ErrorKind::Conflict
            }
            BrokerError::InstanceDoesNotExist { .. } | BrokerError::BindingDoesNotExist { .. } => {
                ErrorKind::NotFound
            }
            BrokerError::Provisioning(_)
            | BrokerError::AdminOperation(_)
            | BrokerError::Database(_)
            | BrokerError::Internal(_) => ErrorKind::Internal,
        }
    }
}

pub type BrokerResult<T> = Result<T, BrokerError>;
