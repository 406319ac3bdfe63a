//! Administrative interface of the backing data store.
//!
//! Two layers live behind these traits:
//!
//! - [`AdminClient`] is the raw primitive set a store driver must offer
//!   (list/create/drop databases, run an administrative command, enumerate
//!   server endpoints).
//! - [`AdminOperations`] is the capability set the orchestrator consumes.
//!   It adds no business logic, only command sequencing and failure
//!   normalization on top of an [`AdminClient`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AdminOperationError;

pub type AdminResult<T> = Result<T, AdminOperationError>;

/// A data store server address as advertised to bound applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServerEndpoint {
    pub host: String,
    pub port: u16,
}

impl ServerEndpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for ServerEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Handle to a database created by [`AdminOperations::create_database`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseHandle {
    pub name: String,
}

/// Capability set granted to a database user. Bound applications only
/// ever receive read/write access to their own database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    /// Read and write, no administrative rights.
    Editor,
}

/// A structured administrative command scoped to one database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCommand {
    CreateUser {
        username: String,
        password: String,
        role: UserRole,
    },
    DropUser {
        username: String,
    },
    /// Write a marker document into `collection`, forcing the store to
    /// materialize the database.
    InsertMarker {
        collection: String,
    },
}

impl AdminCommand {
    /// Short name used in log fields. Never includes secrets.
    pub fn name(&self) -> &'static str {
        match self {
            AdminCommand::CreateUser { .. } => "create_user",
            AdminCommand::DropUser { .. } => "drop_user",
            AdminCommand::InsertMarker { .. } => "insert_marker",
        }
    }
}

/// Result of an administrative command that reached the store.
///
/// Transport faults are reported as `Err(AdminOperationError)` by the
/// client; a command the store received but refused is `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandOutcome {
    Succeeded,
    Failed { detail: String },
}

impl CommandOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CommandOutcome::Succeeded)
    }
}

impl fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandOutcome::Succeeded => f.write_str("command succeeded"),
            CommandOutcome::Failed { detail } => write!(f, "command failed: {detail}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Store primitives
// ---------------------------------------------------------------------------

pub trait AdminClient: Send + Sync {
    fn list_databases(&self) -> impl Future<Output = AdminResult<Vec<String>>> + Send;
    fn create_database(&self, name: &str) -> impl Future<Output = AdminResult<()>> + Send;
    /// Dropping a database that does not exist is not an error.
    fn drop_database(&self, name: &str) -> impl Future<Output = AdminResult<()>> + Send;
    fn run_command(
        &self,
        database: &str,
        command: AdminCommand,
    ) -> impl Future<Output = AdminResult<CommandOutcome>> + Send;
    /// Known server endpoints, in the store's enumeration order.
    fn server_endpoints(&self) -> Vec<ServerEndpoint>;
}

// ---------------------------------------------------------------------------
// Operations consumed by the orchestrator
// ---------------------------------------------------------------------------

pub trait AdminOperations: Send + Sync {
    fn database_exists(&self, name: &str) -> impl Future<Output = AdminResult<bool>> + Send;

    /// Create `name` and make sure it is enumerable by
    /// [`database_exists`](Self::database_exists) once this returns.
    fn create_database(&self, name: &str)
    -> impl Future<Output = AdminResult<DatabaseHandle>> + Send;

    /// Idempotent.
    fn delete_database(&self, name: &str) -> impl Future<Output = AdminResult<()>> + Send;

    fn create_user(
        &self,
        database: &str,
        username: &str,
        password: &str,
    ) -> impl Future<Output = AdminResult<()>> + Send;

    /// Best-effort; the command outcome is not inspected.
    fn delete_user(
        &self,
        database: &str,
        username: &str,
    ) -> impl Future<Output = AdminResult<()>> + Send;

    fn build_connection_string(&self, database: &str, username: &str, password: &str) -> String;
}
