//! Service instance domain model.
//!
//! A service instance is one provisioned tenant database. Its id is chosen
//! by the caller and doubles as the name of the backing database.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A provisioned service instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInstance {
    pub service_instance_id: String,
    pub service_definition_id: String,
    pub plan_id: String,
    pub organization_guid: String,
    pub space_guid: String,
    /// Never generated by the broker itself.
    pub dashboard_url: Option<String>,
}

/// Lifecycle of an instance as seen by the orchestrator.
///
/// Only `Absent` and `Provisioned` are observable between requests;
/// the other two exist while a transition is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceState {
    Absent,
    Provisioning,
    Provisioned,
    Deprovisioning,
}

impl fmt::Display for InstanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InstanceState::Absent => "absent",
            InstanceState::Provisioning => "provisioning",
            InstanceState::Provisioned => "provisioned",
            InstanceState::Deprovisioning => "deprovisioning",
        };
        f.write_str(s)
    }
}
