//! Repository trait definitions for the instance/binding registry.
//!
//! All repository operations are async and keyed by caller-supplied ids.
//! A missing record is `Ok(None)`, never an error, and deleting a missing
//! record is a no-op.

use crate::error::BrokerResult;
use crate::models::binding::ServiceInstanceBinding;
use crate::models::instance::ServiceInstance;

pub trait ServiceInstanceRepository: Send + Sync {
    fn find_by_id(
        &self,
        id: &str,
    ) -> impl Future<Output = BrokerResult<Option<ServiceInstance>>> + Send;
    /// Upsert by `service_instance_id`.
    fn save(&self, instance: ServiceInstance) -> impl Future<Output = BrokerResult<()>> + Send;
    fn delete(&self, id: &str) -> impl Future<Output = BrokerResult<()>> + Send;
}

pub trait ServiceInstanceBindingRepository: Send + Sync {
    fn find_by_id(
        &self,
        id: &str,
    ) -> impl Future<Output = BrokerResult<Option<ServiceInstanceBinding>>> + Send;
    /// Upsert by binding `id`.
    fn save(
        &self,
        binding: ServiceInstanceBinding,
    ) -> impl Future<Output = BrokerResult<()>> + Send;
    fn delete(&self, id: &str) -> impl Future<Output = BrokerResult<()>> + Send;
}
