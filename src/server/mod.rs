//! Server module for building the HTTP server
//!
//! `ServerBuilder` wires the configured table stores into a `ServerHost`
//! and exposes it through the REST router.

pub mod builder;
pub mod exposure;
pub mod host;

pub use builder::ServerBuilder;
pub use exposure::RestExposure;
pub use host::ServerHost;
