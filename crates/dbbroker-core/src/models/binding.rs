//! Service instance binding domain model.

use serde::{Deserialize, Serialize};

/// Opaque credential key/value pairs handed to a bound application.
pub type Credentials = serde_json::Map<String, serde_json::Value>;

/// A set of credentials granting one application access to an instance.
///
/// Bindings are independent records: deleting an instance does not
/// cascade to its bindings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceInstanceBinding {
    pub id: String,
    /// Must name an existing instance when the binding is created.
    pub service_instance_id: String,
    pub credentials: Credentials,
    pub syslog_drain_url: Option<String>,
    pub app_guid: String,
}
