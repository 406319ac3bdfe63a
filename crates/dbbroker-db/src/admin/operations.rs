//! [`AdminOperations`] over any [`AdminClient`].

use dbbroker_core::admin::{
    AdminClient, AdminCommand, AdminOperations, AdminResult, DatabaseHandle, UserRole,
};
use dbbroker_core::error::AdminOperationError;
use tracing::{debug, info, warn};

/// Collection that receives the marker document written on creation.
pub const BOOTSTRAP_COLLECTION: &str = "_bootstrap";

/// Database administration for provisioned instances.
#[derive(Clone)]
pub struct DatabaseAdmin<A: AdminClient> {
    client: A,
    scheme: String,
}

impl<A: AdminClient> DatabaseAdmin<A> {
    pub fn new(client: A, scheme: impl Into<String>) -> Self {
        Self {
            client,
            scheme: scheme.into(),
        }
    }

    pub fn client(&self) -> &A {
        &self.client
    }

    async fn materialize(&self, name: &str) -> AdminResult<()> {
        self.client.create_database(name).await?;

        // Some stores only create a database on first write.
        let outcome = self
            .client
            .run_command(
                name,
                AdminCommand::InsertMarker {
                    collection: BOOTSTRAP_COLLECTION.into(),
                },
            )
            .await?;
        if !outcome.is_success() {
            return Err(AdminOperationError::rejected(outcome));
        }
        Ok(())
    }
}

impl<A: AdminClient> AdminOperations for DatabaseAdmin<A> {
    async fn database_exists(&self, name: &str) -> AdminResult<bool> {
        let names = self.client.list_databases().await?;
        Ok(names.iter().any(|n| n == name))
    }

    async fn create_database(&self, name: &str) -> AdminResult<DatabaseHandle> {
        if let Err(err) = self.materialize(name).await {
            if let Err(cleanup) = self.client.drop_database(name).await {
                warn!(
                    database = name,
                    error = %cleanup,
                    "Cleanup of partially created database failed"
                );
            }
            return Err(err);
        }

        info!(database = name, "Database created");
        Ok(DatabaseHandle {
            name: name.to_string(),
        })
    }

    async fn delete_database(&self, name: &str) -> AdminResult<()> {
        self.client.drop_database(name).await?;
        info!(database = name, "Database dropped");
        Ok(())
    }

    async fn create_user(&self, database: &str, username: &str, password: &str) -> AdminResult<()> {
        let outcome = self
            .client
            .run_command(
                database,
                AdminCommand::CreateUser {
                    username: username.to_string(),
                    password: password.to_string(),
                    role: UserRole::Editor,
                },
            )
            .await?;

        if !outcome.is_success() {
            let err = AdminOperationError::rejected(outcome);
            warn!(database, username, error = %err, "User creation rejected");
            return Err(err);
        }

        info!(database, username, "User created");
        Ok(())
    }

    async fn delete_user(&self, database: &str, username: &str) -> AdminResult<()> {
        let outcome = self
            .client
            .run_command(
                database,
                AdminCommand::DropUser {
                    username: username.to_string(),
                },
            )
            .await?;
        debug!(database, username, %outcome, "User drop issued");
        Ok(())
    }

    fn build_connection_string(&self, database: &str, username: &str, password: &str) -> String {
        let hosts = self
            .client
            .server_endpoints()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        // Binding ids and tenant names are caller-chosen and may contain
        // URI delimiters.
        format!(
            "{}://{}:{}@{hosts}/{}",
            self.scheme,
            urlencoding::encode(username),
            urlencoding::encode(password),
            urlencoding::encode(database)
        )
    }
}
