//! SurrealDB registry implementations.

mod binding;
mod instance;

pub use binding::SurrealBindingRepository;
pub use instance::SurrealInstanceRepository;
