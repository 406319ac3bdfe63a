//! Registry schema definitions and migration runner for SurrealDB.
//!
//! Both registry tables are SCHEMAFULL and keyed by the caller-supplied
//! id, so a record id is the instance or binding id itself.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "registry_tables",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Service instances
-- =======================================================================
DEFINE TABLE service_instance SCHEMAFULL;
DEFINE FIELD service_definition_id ON TABLE service_instance TYPE string;
DEFINE FIELD plan_id ON TABLE service_instance TYPE string;
DEFINE FIELD organization_guid ON TABLE service_instance TYPE string;
DEFINE FIELD space_guid ON TABLE service_instance TYPE string;
DEFINE FIELD dashboard_url ON TABLE service_instance TYPE option<string>;
DEFINE FIELD saved_at ON TABLE service_instance TYPE datetime \
    VALUE time::now();

-- =======================================================================
-- Service instance bindings
-- =======================================================================
DEFINE TABLE service_instance_binding SCHEMAFULL;
DEFINE FIELD service_instance_id ON TABLE service_instance_binding \
    TYPE string;
DEFINE FIELD credentials ON TABLE service_instance_binding \
    TYPE object FLEXIBLE DEFAULT {};
DEFINE FIELD syslog_drain_url ON TABLE service_instance_binding \
    TYPE option<string>;
DEFINE FIELD app_guid ON TABLE service_instance_binding TYPE string;
DEFINE FIELD saved_at ON TABLE service_instance_binding TYPE datetime \
    VALUE time::now();
DEFINE INDEX idx_binding_instance ON TABLE service_instance_binding \
    COLUMNS service_instance_id;
";

/// Run all pending registry migrations.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

        info!(
            version = migration.version,
            name = migration.name,
            "Applying registry migration"
        );
        db.query(migration.sql).await?.check().map_err(|e| {
            DbError::Migration(format!(
                "Migration v{} '{}' failed: {}",
                migration.version, migration.name, e,
            ))
        })?;

        db.query("CREATE _migration SET version = $version, name = $name")
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;
    }

    Ok(())
}

/// Returns the raw schema DDL for version 1.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}
