//! Observability for the PropKart client.

pub mod tracing_setup;

pub use tracing_setup::init_tracing;
