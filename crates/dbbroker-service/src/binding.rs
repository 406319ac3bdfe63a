//! Service instance binding lifecycle.
//!
//! A binding is one database user on the instance's database, named after
//! the binding id, plus a registry record holding its credentials.

use dbbroker_core::admin::AdminOperations;
use dbbroker_core::error::{BrokerError, BrokerResult};
use dbbroker_core::models::binding::{Credentials, ServiceInstanceBinding};
use dbbroker_core::repository::{ServiceInstanceBindingRepository, ServiceInstanceRepository};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::BrokerConfig;
use crate::credentials;
use crate::locks::{self, KeyGuard, KeyedLocks};

/// Input for the create-binding flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBindingRequest {
    pub binding_id: String,
    pub service_instance_id: String,
    pub app_guid: String,
}

/// Successful binding result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBindingResult {
    pub credentials: Credentials,
}

/// Input for the delete-binding flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteBindingRequest {
    pub binding_id: String,
    pub service_instance_id: String,
}

/// Binding orchestrator.
pub struct BindingService<A, R, B>
where
    A: AdminOperations,
    R: ServiceInstanceRepository,
    B: ServiceInstanceBindingRepository,
{
    admin: A,
    instances: R,
    bindings: B,
    config: BrokerConfig,
    locks: Option<KeyedLocks>,
}

impl<A, R, B> BindingService<A, R, B>
where
    A: AdminOperations,
    R: ServiceInstanceRepository,
    B: ServiceInstanceBindingRepository,
{
    pub fn new(admin: A, instances: R, bindings: B, config: BrokerConfig) -> Self {
        Self {
            admin,
            instances,
            bindings,
            locks: config.per_id_locking.then(KeyedLocks::new),
            config,
        }
    }

    /// Use `locks` instead of a private table. Pass the table of the
    /// [`InstanceService`](crate::InstanceService) so binding transitions
    /// exclude deletion of their instance. Has no effect when per-id
    /// locking is disabled.
    pub fn with_locks(mut self, locks: KeyedLocks) -> Self {
        if self.locks.is_some() {
            self.locks = Some(locks);
        }
        self
    }

    /// Hold the instance key, then the binding key.
    async fn lock(&self, instance_id: &str, binding_id: &str) -> Vec<KeyGuard> {
        let Some(locks) = &self.locks else {
            return Vec::new();
        };
        let instance = locks.acquire(&locks::instance_key(instance_id)).await;
        let binding = locks.acquire(&locks::binding_key(binding_id)).await;
        vec![instance, binding]
    }

    /// Create a database user for an existing instance and record it.
    pub async fn create_binding(
        &self,
        request: CreateBindingRequest,
    ) -> BrokerResult<CreateBindingResult> {
        let binding_id = request.binding_id.clone();
        let database = request.service_instance_id.clone();
        let _guards = self.lock(&database, &binding_id).await;

        if self.bindings.find_by_id(&binding_id).await?.is_some() {
            return Err(BrokerError::BindingAlreadyExists { id: binding_id });
        }
        if self.instances.find_by_id(&database).await?.is_none() {
            return Err(BrokerError::InstanceDoesNotExist { id: database });
        }

        let password = credentials::generate_password(self.config.password_bytes);
        self.admin
            .create_user(&database, &binding_id, &password)
            .await
            .map_err(BrokerError::Provisioning)?;

        let uri = self
            .admin
            .build_connection_string(&database, &binding_id, &password);
        let credentials = credentials::binding_credentials(uri, &database, &binding_id, &password);

        let binding = ServiceInstanceBinding {
            id: request.binding_id,
            service_instance_id: request.service_instance_id,
            credentials: credentials.clone(),
            syslog_drain_url: None,
            app_guid: request.app_guid,
        };
        if let Err(err) = self.bindings.save(binding).await {
            // Without a record nobody could ever delete this user.
            if let Err(cleanup) = self.admin.delete_user(&database, &binding_id).await {
                warn!(
                    binding_id = %binding_id,
                    error = %cleanup,
                    "Dropping user after failed binding save failed"
                );
            }
            return Err(err);
        }

        info!(binding_id = %binding_id, instance_id = %database, "Binding created");
        Ok(CreateBindingResult { credentials })
    }

    /// Drop the binding's database user and its record.
    pub async fn delete_binding(&self, request: DeleteBindingRequest) -> BrokerResult<()> {
        let _guards = self
            .lock(&request.service_instance_id, &request.binding_id)
            .await;

        let binding = self
            .bindings
            .find_by_id(&request.binding_id)
            .await?
            .ok_or_else(|| BrokerError::BindingDoesNotExist {
                id: request.binding_id.clone(),
            })?;

        if binding.service_instance_id != request.service_instance_id {
            warn!(
                binding_id = %binding.id,
                recorded = %binding.service_instance_id,
                requested = %request.service_instance_id,
                "Binding belongs to a different instance than requested; using the recorded one"
            );
        }

        self.admin
            .delete_user(&binding.service_instance_id, &binding.id)
            .await?;
        self.bindings.delete(&binding.id).await?;

        info!(binding_id = %binding.id, instance_id = %binding.service_instance_id, "Binding deleted");
        Ok(())
    }

    /// Registry lookup; `None` when the binding is unknown.
    pub async fn get_binding(&self, id: &str) -> BrokerResult<Option<ServiceInstanceBinding>> {
        self.bindings.find_by_id(id).await
    }
}
