//! dbbroker DB — SurrealDB connection management, the instance/binding
//! registry, and the administrative client for tenant databases.
//!
//! This crate provides:
//! - Connection management ([`DbManager`], [`DbConfig`])
//! - Registry schema and migrations ([`run_migrations`])
//! - Registry repositories ([`repository`])
//! - The Admin Operations Layer over SurrealDB ([`admin`])
//! - Error types ([`DbError`])

pub mod admin;
mod connection;
mod error;
pub mod repository;
mod schema;

pub use admin::{AdminConfig, DatabaseAdmin, SurrealAdminClient};
pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use schema::{run_migrations, schema_v1};
