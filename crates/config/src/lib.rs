//! Configuration management for the Axiom client.
//!
//! This crate provides types and loaders for managing Axiom connection
//! configuration from environment variables and explicit overrides.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader};
pub use types::{AuthConfig, Config, ConnectionConfig};
