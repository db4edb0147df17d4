//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions (Config, ServerConfig, LogConfig)
//! - [`listen`]: Network listener configuration (ListenConfig, TlsConfig)
//! - [`limits`]: Input limits configuration (LimitsConfig)
//! - [`validation`]: Startup checks

mod defaults;
mod limits;
mod listen;
mod types;
mod validation;

pub use types::{Config, LogConfig, LogFormat};
pub use validation::validate;
