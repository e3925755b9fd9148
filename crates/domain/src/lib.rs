//! Ferrous Route Domain Layer
pub mod client_info;
pub mod config;
pub mod errors;

pub use client_info::ClientInfo;
pub use config::{CliOverrides, Config, ConfigError};
pub use errors::{DomainError, RuleError};
