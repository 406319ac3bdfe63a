//! dbbroker core — shared domain types for the provisioning broker.
//!
//! This crate provides:
//! - Domain models for service instances and bindings ([`models`])
//! - The broker error taxonomy ([`error`])
//! - Registry traits implemented by storage backends ([`repository`])
//! - Administrative primitives and operations traits ([`admin`])
//!
//! It has no dependency on any concrete data store.

pub mod admin;
pub mod error;
pub mod models;
pub mod repository;

pub use error::{AdminOperationError, BrokerError, BrokerResult, ErrorKind};
