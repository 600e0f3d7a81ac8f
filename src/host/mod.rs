//! Host boundary.
//!
//! # Data Flow
//! ```text
//! host configuration store
//!     → PluginApi::load_plugin_configuration (typed Configuration)
//!     → plugin core
//!     → PluginApi::save_plugin_config (TransportMap only)
//!
//! user directory  ← UserDirectory::get_user (admin list validation)
//! command palette ← PluginApi::register_command / unregister_command
//! ```
//!
//! # Design Decisions
//! - The core only talks to the host through these traits, so tests can
//!   substitute a recording host
//! - `FileHost` is the standalone implementation used by the binary

pub mod file;
pub mod settings;

use async_trait::async_trait;
use thiserror::Error;

use crate::commands::Command;
use crate::config::{Configuration, TransportMap};

pub use file::FileHost;
pub use settings::HostSettings;

/// Errors reported by a host implementation.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("user '{0}' not found")]
    UserNotFound(String),

    #[error("invalid stored configuration: {0}")]
    InvalidConfiguration(String),

    #[error("host unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A user known to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
}

/// Identity lookup capability.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Look up a user by id; an error means the id cannot be used.
    async fn get_user(&self, user_id: &str) -> Result<User, HostError>;
}

/// Everything the plugin core needs from its host.
#[async_trait]
pub trait PluginApi: UserDirectory {
    /// Load the stored configuration into its typed shape.
    async fn load_plugin_configuration(&self) -> Result<Configuration, HostError>;

    /// Persist a configuration given as a transport map.
    async fn save_plugin_config(&self, config: TransportMap) -> Result<(), HostError>;

    async fn register_command(&self, command: Command) -> Result<(), HostError>;

    async fn unregister_command(&self, team_id: &str, trigger: &str) -> Result<(), HostError>;
}
