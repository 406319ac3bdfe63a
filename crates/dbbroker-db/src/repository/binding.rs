//! SurrealDB implementation of [`ServiceInstanceBindingRepository`].

use dbbroker_core::error::BrokerResult;
use dbbroker_core::models::binding::{Credentials, ServiceInstanceBinding};
use dbbroker_core::repository::ServiceInstanceBindingRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct BindingRow {
    service_instance_id: String,
    credentials: serde_json::Value,
    syslog_drain_url: Option<String>,
    app_guid: String,
}

impl BindingRow {
    fn try_into_binding(self, id: &str) -> Result<ServiceInstanceBinding, DbError> {
        let credentials = match self.credentials {
            serde_json::Value::Object(map) => map,
            other => {
                return Err(DbError::Decode {
                    entity: "service_instance_binding".into(),
                    id: id.to_string(),
                    reason: format!("credentials must be an object, got {other}"),
                });
            }
        };
        Ok(ServiceInstanceBinding {
            id: id.to_string(),
            service_instance_id: self.service_instance_id,
            credentials,
            syslog_drain_url: self.syslog_drain_url,
            app_guid: self.app_guid,
        })
    }
}

fn credentials_value(credentials: Credentials) -> serde_json::Value {
    serde_json::Value::Object(credentials)
}

/// SurrealDB implementation of the binding registry.
#[derive(Clone)]
pub struct SurrealBindingRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealBindingRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> ServiceInstanceBindingRepository for SurrealBindingRepository<C> {
    async fn find_by_id(&self, id: &str) -> BrokerResult<Option<ServiceInstanceBinding>> {
        let mut result = self
            .db
            .query("SELECT * FROM type::record('service_instance_binding', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<BindingRow> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.try_into_binding(id)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, binding: ServiceInstanceBinding) -> BrokerResult<()> {
        self.db
            .query(
                "UPSERT type::record('service_instance_binding', $id) CONTENT { \
                 service_instance_id: $service_instance_id, \
                 credentials: $credentials, \
                 syslog_drain_url: $syslog_drain_url, \
                 app_guid: $app_guid }",
            )
            .bind(("id", binding.id))
            .bind(("service_instance_id", binding.service_instance_id))
            .bind(("credentials", credentials_value(binding.credentials)))
            .bind(("syslog_drain_url", binding.syslog_drain_url))
            .bind(("app_guid", binding.app_guid))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> BrokerResult<()> {
        self.db
            .query("DELETE type::record('service_instance_binding', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        Ok(())
    }
}
