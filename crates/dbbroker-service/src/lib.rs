//! dbbroker service — the provisioning lifecycle state machine.
//!
//! [`InstanceService`] drives create/delete of service instances and
//! [`BindingService`] drives create/delete of credentials. Both are
//! generic over the registry and admin traits in `dbbroker-core`, so this
//! crate has no dependency on a concrete data store.

pub mod binding;
pub mod config;
pub mod credentials;
pub mod instance;
pub mod locks;

pub use binding::{BindingService, CreateBindingRequest, CreateBindingResult, DeleteBindingRequest};
pub use config::BrokerConfig;
pub use instance::{
    CreateInstanceRequest, CreateInstanceResult, DeleteInstanceRequest, DeleteInstanceResult,
    InstanceService,
};
pub use locks::{KeyGuard, KeyedLocks};
