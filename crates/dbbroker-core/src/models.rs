//! Domain models for the provisioning broker.
//!
//! Records here are what the registry persists. The databases and users
//! they describe live in the backing data store and are reached through
//! [`crate::admin`].

pub mod binding;
pub mod instance;
