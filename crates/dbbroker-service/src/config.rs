//! Orchestrator configuration.

/// Configuration for the provisioning services.
#[derive(Debug, Clone)]
pub struct BrokerConfig {
    /// Random bytes behind each generated binding password
    /// (default: 32, encoded as 43 base64url characters).
    pub password_bytes: usize,
    /// Serialize create/delete transitions per instance or binding id
    /// (default: true).
    pub per_id_locking: bool,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            password_bytes: 32,
            per_id_locking: true,
        }
    }
}
