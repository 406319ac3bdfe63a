//! Service instance lifecycle: `Absent → Provisioned → Absent`.
//!
//! The admin layer has no multi-step transactions, so every step on the
//! forward path is idempotent and re-entrant instead of tracked:
//!
//! - create always starts from a clean slate, dropping any database left
//!   behind by an earlier attempt that crashed before the registry save;
//! - delete always drops the database and the registry record, even for
//!   an id the registry has never heard of.

use dbbroker_core::admin::AdminOperations;
use dbbroker_core::error::{BrokerError, BrokerResult};
use dbbroker_core::models::instance::{InstanceState, ServiceInstance};
use dbbroker_core::repository::ServiceInstanceRepository;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::BrokerConfig;
use crate::locks::{self, KeyGuard, KeyedLocks};

/// Input for the create-instance flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInstanceRequest {
    pub service_instance_id: String,
    pub service_definition_id: String,
    pub plan_id: String,
    pub organization_guid: String,
    pub space_guid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateInstanceResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashboard_url: Option<String>,
    /// Provisioning is always synchronous, so this is always `false`.
    #[serde(rename = "async")]
    pub r#async: bool,
}

/// Input for the delete-instance flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteInstanceRequest {
    pub service_instance_id: String,
    pub service_definition_id: String,
    pub plan_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteInstanceResult {
    #[serde(rename = "async")]
    pub r#async: bool,
}

/// Service instance orchestrator.
///
/// Generic over the admin and registry implementations so that the
/// lifecycle logic has no dependency on the database crate.
pub struct InstanceService<A: AdminOperations, R: ServiceInstanceRepository> {
    admin: A,
    instances: R,
    locks: Option<KeyedLocks>,
}

impl<A: AdminOperations, R: ServiceInstanceRepository> InstanceService<A, R> {
    pub fn new(admin: A, instances: R, config: &BrokerConfig) -> Self {
        Self {
            admin,
            instances,
            locks: config.per_id_locking.then(KeyedLocks::new),
        }
    }

    /// Use `locks` instead of a private table. Has no effect when per-id
    /// locking is disabled.
    pub fn with_locks(mut self, locks: KeyedLocks) -> Self {
        if self.locks.is_some() {
            self.locks = Some(locks);
        }
        self
    }

    async fn lock(&self, id: &str) -> Option<KeyGuard> {
        match &self.locks {
            Some(locks) => Some(locks.acquire(&locks::instance_key(id)).await),
            None => None,
        }
    }

    /// Provision a new instance.
    pub async fn create_instance(
        &self,
        request: CreateInstanceRequest,
    ) -> BrokerResult<CreateInstanceResult> {
        let id = request.service_instance_id.clone();
        let _guard = self.lock(&id).await;

        // 1. Reject duplicates outright.
        if self.instances.find_by_id(&id).await?.is_some() {
            return Err(BrokerError::InstanceAlreadyExists { id });
        }

        info!(instance_id = %id, state = %InstanceState::Provisioning, "Provisioning service instance");

        // 2. Drop whatever an earlier, interrupted attempt left behind.
        if self
            .admin
            .database_exists(&id)
            .await
            .map_err(BrokerError::Provisioning)?
        {
            warn!(instance_id = %id, "Dropping leftover database before provisioning");
            self.admin
                .delete_database(&id)
                .await
                .map_err(BrokerError::Provisioning)?;
        }

        // 3. Create fresh. On failure the registry is untouched.
        self.admin
            .create_database(&id)
            .await
            .map_err(BrokerError::Provisioning)?;

        // 4. Record the instance.
        self.instances
            .save(ServiceInstance {
                service_instance_id: request.service_instance_id,
                service_definition_id: request.service_definition_id,
                plan_id: request.plan_id,
                organization_guid: request.organization_guid,
                space_guid: request.space_guid,
                dashboard_url: None,
            })
            .await?;

        info!(instance_id = %id, state = %InstanceState::Provisioned, "Service instance provisioned");

        Ok(CreateInstanceResult {
            dashboard_url: None,
            r#async: false,
        })
    }

    /// Deprovision an instance.
    ///
    /// Cleanup runs even when the registry has no record of `id`; the
    /// caller still gets [`BrokerError::InstanceDoesNotExist`] afterwards.
    pub async fn delete_instance(
        &self,
        request: DeleteInstanceRequest,
    ) -> BrokerResult<DeleteInstanceResult> {
        let id = request.service_instance_id;
        let _guard = self.lock(&id).await;

        let known = self.instances.find_by_id(&id).await?.is_some();
        info!(
            instance_id = %id,
            known,
            state = %InstanceState::Deprovisioning,
            "Deprovisioning service instance"
        );

        if let Err(err) = self.admin.delete_database(&id).await {
            if known {
                return Err(err.into());
            }
            warn!(instance_id = %id, error = %err, "Database cleanup for unknown instance failed");
        }

        if let Err(err) = self.instances.delete(&id).await {
            if known {
                return Err(err);
            }
            warn!(instance_id = %id, error = %err, "Registry cleanup for unknown instance failed");
        }

        if !known {
            return Err(BrokerError::InstanceDoesNotExist { id });
        }

        info!(instance_id = %id, state = %InstanceState::Absent, "Service instance deprovisioned");
        Ok(DeleteInstanceResult { r#async: false })
    }

    /// Registry lookup; `None` when the instance is unknown.
    pub async fn get_instance(&self, id: &str) -> BrokerResult<Option<ServiceInstance>> {
        self.instances.find_by_id(id).await
    }
}
