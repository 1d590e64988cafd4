//! Logging setup shared by the binaries and the test harnesses. Everything in
//! the workspace logs through `tracing`; this crate installs the subscriber
//! and routes panics through it.
pub mod config;
pub mod tracing;

pub use config::Config;
