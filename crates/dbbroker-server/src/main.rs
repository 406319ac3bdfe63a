//! dbbroker — application entry point.

mod config;
mod error;

use clap::Parser;
use dbbroker_db::repository::{SurrealBindingRepository, SurrealInstanceRepository};
use dbbroker_db::{DatabaseAdmin, DbManager, SurrealAdminClient};
use dbbroker_service::{BindingService, InstanceService, KeyedLocks};
use surrealdb::engine::remote::ws::Client;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Args;
use error::ServerError;

type Admin = DatabaseAdmin<SurrealAdminClient<Client>>;

/// The two orchestrators, wired to the live store and sharing one lock
/// table. The HTTP catalog/provisioning API mounts on these two fields;
/// until then the process only verifies connectivity and migrations.
struct Broker {
    instances: InstanceService<Admin, SurrealInstanceRepository<Client>>,
    bindings:
        BindingService<Admin, SurrealInstanceRepository<Client>, SurrealBindingRepository<Client>>,
}

async fn build(args: &Args) -> Result<Broker, ServerError> {
    let db_config = args.db_config();

    let registry = DbManager::connect(&db_config)
        .await
        .map_err(ServerError::Registry)?;
    dbbroker_db::run_migrations(registry.client()).await?;

    let admin_config = args.admin_config();
    let admin_conn = DbManager::connect_admin(&db_config, &admin_config.namespace)
        .await
        .map_err(ServerError::AdminConnection)?;
    let client = SurrealAdminClient::connect(admin_conn.client().clone(), admin_config).await?;
    let scheme = client.config().scheme.clone();
    let admin = DatabaseAdmin::new(client, scheme);

    let broker_config = args.broker_config();
    let registry = registry.client().clone();
    let locks = KeyedLocks::new();
    Ok(Broker {
        instances: InstanceService::new(
            admin.clone(),
            SurrealInstanceRepository::new(registry.clone()),
            &broker_config,
        )
        .with_locks(locks.clone()),
        bindings: BindingService::new(
            admin,
            SurrealInstanceRepository::new(registry.clone()),
            SurrealBindingRepository::new(registry),
            broker_config,
        )
        .with_locks(locks),
    })
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dbbroker=info")),
        )
        .json()
        .init();

    let args = Args::parse();
    info!(
        db_url = %args.db_url,
        tenant_namespace = %args.tenant_namespace,
        "Starting dbbroker..."
    );

    let broker = build(&args).await?;
    info!(
        endpoints = args.endpoints.len(),
        per_id_locking = !args.no_id_locking,
        "Broker ready"
    );

    tokio::signal::ctrl_c().await?;

    drop(broker);
    info!("dbbroker stopped.");
    Ok(())
}
