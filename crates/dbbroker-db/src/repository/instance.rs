//! SurrealDB implementation of [`ServiceInstanceRepository`].

use dbbroker_core::error::BrokerResult;
use dbbroker_core::models::instance::ServiceInstance;
use dbbroker_core::repository::ServiceInstanceRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use crate::error::DbError;

/// DB-side row struct; the id is the record key and is already known.
#[derive(Debug, SurrealValue)]
struct ServiceInstanceRow {
    service_definition_id: String,
    plan_id: String,
    organization_guid: String,
    space_guid: String,
    dashboard_url: Option<String>,
}

impl ServiceInstanceRow {
    fn into_instance(self, id: &str) -> ServiceInstance {
        ServiceInstance {
            service_instance_id: id.to_string(),
            service_definition_id: self.service_definition_id,
            plan_id: self.plan_id,
            organization_guid: self.organization_guid,
            space_guid: self.space_guid,
            dashboard_url: self.dashboard_url,
        }
    }
}

/// SurrealDB implementation of the service instance registry.
#[derive(Clone)]
pub struct SurrealInstanceRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealInstanceRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> ServiceInstanceRepository for SurrealInstanceRepository<C> {
    async fn find_by_id(&self, id: &str) -> BrokerResult<Option<ServiceInstance>> {
        let mut result = self
            .db
            .query("SELECT * FROM type::record('service_instance', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ServiceInstanceRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.into_iter().next().map(|row| row.into_instance(id)))
    }

    async fn save(&self, instance: ServiceInstance) -> BrokerResult<()> {
        // CONTENT replaces the whole record, so a save over an existing id
        // leaves no stale fields behind.
        let result = self
            .db
            .query(
                "UPSERT type::record('service_instance', $id) CONTENT { \
                 service_definition_id: $service_definition_id, \
                 plan_id: $plan_id, \
                 organization_guid: $organization_guid, \
                 space_guid: $space_guid, \
                 dashboard_url: $dashboard_url }",
            )
            .bind(("id", instance.service_instance_id))
            .bind(("service_definition_id", instance.service_definition_id))
            .bind(("plan_id", instance.plan_id))
            .bind(("organization_guid", instance.organization_guid))
            .bind(("space_guid", instance.space_guid))
            .bind(("dashboard_url", instance.dashboard_url))
            .await
            .map_err(DbError::from)?;

        result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> BrokerResult<()> {
        self.db
            .query("DELETE type::record('service_instance', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        Ok(())
    }
}
