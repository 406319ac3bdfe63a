//! SurrealDB connection management.

use surrealdb::Surreal;
use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;
use tracing::info;

/// Configuration for connecting to SurrealDB.
///
/// `namespace`/`database` locate the broker's own registry. Tenant
/// databases live in a separate namespace configured on
/// [`AdminConfig`](crate::AdminConfig).
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// WebSocket address (e.g., `127.0.0.1:8000`).
    pub url: String,
    /// Namespace holding the registry database.
    pub namespace: String,
    /// Registry database name.
    pub database: String,
    /// Root username for authentication.
    pub username: String,
    /// Root password for authentication.
    pub password: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "127.0.0.1:8000".into(),
            namespace: "dbbroker".into(),
            database: "registry".into(),
            username: "root".into(),
            password: "root".into(),
        }
    }
}

/// Manages a connection to SurrealDB.
#[derive(Clone)]
pub struct DbManager {
    db: Surreal<Client>,
}

impl DbManager {
    /// Connect to the registry database.
    ///
    /// Authenticates as root, selects the configured namespace and
    /// database, and returns a ready-to-use manager.
    pub async fn connect(config: &DbConfig) -> Result<Self, surrealdb::Error> {
        info!(
            url = %config.url,
            namespace = %config.namespace,
            database = %config.database,
            "Connecting to SurrealDB registry"
        );

        let db = Self::signin(config).await?;
        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await?;

        info!("Successfully connected to SurrealDB registry");

        Ok(Self { db })
    }

    /// Open a second, namespace-only connection for administrative work.
    ///
    /// Administrative commands switch the session database per query, so
    /// this connection must never be shared with the registry.
    pub async fn connect_admin(
        config: &DbConfig,
        namespace: &str,
    ) -> Result<Self, surrealdb::Error> {
        info!(url = %config.url, namespace, "Connecting to SurrealDB admin namespace");

        let db = Self::signin(config).await?;
        db.use_ns(namespace).await?;

        Ok(Self { db })
    }

    async fn signin(config: &DbConfig) -> Result<Surreal<Client>, surrealdb::Error> {
        let db = Surreal::new::<Ws>(&config.url).await?;

        db.signin(Root {
            username: config.username.clone(),
            password: config.password.clone(),
        })
        .await?;

        Ok(db)
    }

    /// Returns a reference to the underlying SurrealDB client.
    pub fn client(&self) -> &Surreal<Client> {
        &self.db
    }
}
