//! SurrealDB implementation of [`AdminClient`].

use std::future::IntoFuture;
use std::time::Duration;

use dbbroker_core::admin::{
    AdminClient, AdminCommand, AdminResult, CommandOutcome, ServerEndpoint, UserRole,
};
use dbbroker_core::error::AdminOperationError;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::{debug, warn};

use super::surql::{ident, string_literal};

/// Configuration for the administrative side of the broker.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Namespace holding one database per provisioned instance.
    pub namespace: String,
    /// URI scheme used in binding connection strings.
    pub scheme: String,
    /// Endpoints advertised to bound applications, in order.
    pub endpoints: Vec<ServerEndpoint>,
    /// Upper bound for any single administrative call.
    pub command_timeout: Duration,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            namespace: "tenants".into(),
            scheme: "ws".into(),
            endpoints: vec![ServerEndpoint::new("127.0.0.1", 8000)],
            command_timeout: Duration::from_secs(10),
        }
    }
}

/// Only the `databases` section of `INFO FOR NS` is read.
#[derive(Debug, SurrealValue)]
struct NamespaceInfo {
    databases: serde_json::Value,
}

/// Administrative client bound to one SurrealDB namespace.
///
/// The connection must not be shared with the registry: commands that
/// target a tenant database switch the session with `USE` first.
#[derive(Clone)]
pub struct SurrealAdminClient<C: Connection> {
    db: Surreal<C>,
    config: AdminConfig,
}

impl<C: Connection> SurrealAdminClient<C> {
    /// Wrap `db` and make sure the tenant namespace exists.
    pub async fn connect(db: Surreal<C>, config: AdminConfig) -> AdminResult<Self> {
        let client = Self { db, config };
        let statement = format!(
            "DEFINE NAMESPACE IF NOT EXISTS {ns}; USE NS {ns};",
            ns = ident(&client.config.namespace)?
        );
        client.execute("define_namespace", statement).await?;
        Ok(client)
    }

    pub fn config(&self) -> &AdminConfig {
        &self.config
    }

    /// Bound `fut` by the configured timeout and translate store errors.
    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> AdminResult<T>
    where
        F: IntoFuture<Output = Result<T, surrealdb::Error>>,
    {
        match tokio::time::timeout(self.config.command_timeout, fut.into_future()).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(translate(operation, &err)),
            Err(_) => {
                let err = AdminOperationError::new(format!(
                    "{operation} timed out after {:?}",
                    self.config.command_timeout
                ));
                warn!(operation, error = %err, "Admin operation timed out");
                Err(err)
            }
        }
    }

    /// Run `statement` and fail on any statement-level error.
    async fn execute(&self, operation: &'static str, statement: String) -> AdminResult<()> {
        debug!(operation, namespace = %self.config.namespace, "Running admin statement");
        let response = self.bounded(operation, self.db.query(statement)).await?;
        response
            .check()
            .map_err(|err| translate(operation, &err))?;
        Ok(())
    }

    fn use_database(&self, database: &str) -> AdminResult<String> {
        Ok(format!(
            "USE NS {} DB {};",
            ident(&self.config.namespace)?,
            ident(database)?
        ))
    }
}

fn translate(operation: &str, err: &surrealdb::Error) -> AdminOperationError {
    warn!(operation, error = %err, "Admin operation failed");
    AdminOperationError::new(err.to_string())
}

fn role_keyword(role: UserRole) -> &'static str {
    match role {
        UserRole::Editor => "EDITOR",
    }
}

fn render_command(command: &AdminCommand) -> AdminResult<String> {
    Ok(match command {
        AdminCommand::CreateUser {
            username,
            password,
            role,
        } => format!(
            "DEFINE USER {} ON DATABASE PASSWORD {} ROLES {};",
            ident(username)?,
            string_literal(password),
            role_keyword(*role)
        ),
        AdminCommand::DropUser { username } => {
            format!("REMOVE USER IF EXISTS {} ON DATABASE;", ident(username)?)
        }
        AdminCommand::InsertMarker { collection } => format!(
            "CREATE {} SET marker = 'bootstrap', created_at = time::now();",
            ident(collection)?
        ),
    })
}

impl<C: Connection> AdminClient for SurrealAdminClient<C> {
    async fn list_databases(&self) -> AdminResult<Vec<String>> {
        let mut response = self
            .bounded("list_databases", self.db.query("INFO FOR NS"))
            .await?;
        let info: Option<NamespaceInfo> = response
            .take(0)
            .map_err(|err| translate("list_databases", &err))?;

        let names: Vec<String> = match info.map(|info| info.databases) {
            Some(serde_json::Value::Object(map)) => map.into_iter().map(|(name, _)| name).collect(),
            _ => Vec::new(),
        };
        Ok(names)
    }

    async fn create_database(&self, name: &str) -> AdminResult<()> {
        let statement = format!("DEFINE DATABASE IF NOT EXISTS {};", ident(name)?);
        self.execute("create_database", statement).await
    }

    async fn drop_database(&self, name: &str) -> AdminResult<()> {
        let statement = format!("REMOVE DATABASE IF EXISTS {};", ident(name)?);
        self.execute("drop_database", statement).await
    }

    async fn run_command(&self, database: &str, command: AdminCommand) -> AdminResult<CommandOutcome> {
        let operation = command.name();

        // `USE DB` would silently recreate a dropped database.
        let known = self.list_databases().await?;
        if !known.iter().any(|n| n == database) {
            debug!(operation, database, "Target database does not exist");
            return Ok(match command {
                AdminCommand::DropUser { .. } => CommandOutcome::Succeeded,
                _ => CommandOutcome::Failed {
                    detail: format!("database {database} does not exist"),
                },
            });
        }

        let statement = format!("{} {}", self.use_database(database)?, render_command(&command)?);
        debug!(operation, database, "Running admin command");

        let response = self.bounded(operation, self.db.query(statement)).await?;
        // A statement error means the store received and refused the
        // command; that is an outcome, not a transport failure.
        Ok(match response.check() {
            Ok(_) => CommandOutcome::Succeeded,
            Err(err) => CommandOutcome::Failed {
                detail: err.to_string(),
            },
        })
    }

    fn server_endpoints(&self) -> Vec<ServerEndpoint> {
        self.config.endpoints.clone()
    }
}
