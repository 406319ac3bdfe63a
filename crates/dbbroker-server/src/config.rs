use std::time::Duration;

use clap::Parser;
use dbbroker_core::admin::ServerEndpoint;
use dbbroker_db::{AdminConfig, DbConfig};
use dbbroker_service::BrokerConfig;

/// dbbroker - provisions one database and per-binding users per service instance
#[derive(Parser, Debug)]
#[command(name = "dbbroker")]
pub struct Args {
    /// SurrealDB address used for administration and the registry
    #[arg(long, env = "DBBROKER_DB_URL", default_value = "127.0.0.1:8000")]
    pub db_url: String,

    /// Root username
    #[arg(long, env = "DBBROKER_DB_USER", default_value = "root")]
    pub db_user: String,

    /// Root password
    #[arg(long, env = "DBBROKER_DB_PASSWORD", default_value = "root", hide_env_values = true)]
    pub db_password: String,

    /// Namespace holding the registry database
    #[arg(long, env = "DBBROKER_REGISTRY_NAMESPACE", default_value = "dbbroker")]
    pub registry_namespace: String,

    /// Registry database name
    #[arg(long, env = "DBBROKER_REGISTRY_DATABASE", default_value = "registry")]
    pub registry_database: String,

    /// Namespace receiving one database per service instance
    #[arg(long, env = "DBBROKER_TENANT_NAMESPACE", default_value = "tenants")]
    pub tenant_namespace: String,

    /// URI scheme for binding connection strings
    #[arg(long, env = "DBBROKER_URI_SCHEME", default_value = "ws")]
    pub uri_scheme: String,

    /// Endpoints advertised to bound applications (comma-separated host:port)
    #[arg(
        long,
        env = "DBBROKER_ENDPOINTS",
        value_delimiter = ',',
        value_parser = parse_endpoint,
        default_value = "127.0.0.1:8000"
    )]
    pub endpoints: Vec<ServerEndpoint>,

    /// Timeout for a single administrative call, in seconds
    #[arg(long, env = "DBBROKER_COMMAND_TIMEOUT_SECS", default_value_t = 10)]
    pub command_timeout_secs: u64,

    /// Random bytes behind each generated password
    #[arg(long, env = "DBBROKER_PASSWORD_BYTES", default_value_t = 32)]
    pub password_bytes: usize,

    /// Allow concurrent transitions for the same id (testing only)
    #[arg(long)]
    pub no_id_locking: bool,
}

impl Args {
    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            url: self.db_url.clone(),
            namespace: self.registry_namespace.clone(),
            database: self.registry_database.clone(),
            username: self.db_user.clone(),
            password: self.db_password.clone(),
        }
    }

    pub fn admin_config(&self) -> AdminConfig {
        AdminConfig {
            namespace: self.tenant_namespace.clone(),
            scheme: self.uri_scheme.clone(),
            endpoints: self.endpoints.clone(),
            command_timeout: Duration::from_secs(self.command_timeout_secs),
        }
    }

    pub fn broker_config(&self) -> BrokerConfig {
        BrokerConfig {
            password_bytes: self.password_bytes,
            per_id_locking: !self.no_id_locking,
        }
    }
}

/// Parse one `host:port` pair. The port is split at the last colon.
fn parse_endpoint(value: &str) -> Result<ServerEndpoint, String> {
    let (host, port) = value
        .trim()
        .rsplit_once(':')
        .ok_or_else(|| format!("expected host:port, got '{value}'"))?;
    if host.is_empty() {
        return Err(format!("missing host in '{value}'"));
    }
    let port = port
        .parse::<u16>()
        .map_err(|e| format!("invalid port in '{value}': {e}"))?;
    Ok(ServerEndpoint::new(host, port))
}
