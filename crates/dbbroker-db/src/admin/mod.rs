//! Admin Operations Layer for tenant databases.
//!
//! [`SurrealAdminClient`] implements the store primitives
//! ([`AdminClient`](dbbroker_core::admin::AdminClient)) against a SurrealDB
//! namespace. [`DatabaseAdmin`] layers the orchestrator-facing operations
//! ([`AdminOperations`](dbbroker_core::admin::AdminOperations)) on top of
//! any client.

mod client;
mod operations;
mod surql;

pub use client::{AdminConfig, SurrealAdminClient};
pub use operations::{BOOTSTRAP_COLLECTION, DatabaseAdmin};
