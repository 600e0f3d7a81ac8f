//! Plugin-level errors surfaced to the host or to the admin command.

use thiserror::Error;

use crate::config::EncodingError;
use crate::host::HostError;

#[derive(Debug, Error)]
pub enum PluginError {
    /// Stored configuration could not be loaded; the previous one stays active.
    #[error("failed to load plugin configuration: {0}")]
    LoadConfiguration(#[source] HostError),

    #[error("unable to convert config to map: {0}")]
    Encode(#[from] EncodingError),

    #[error("unable to save links: {0}")]
    SaveLinks(#[source] HostError),
}

pub type PluginResult<T> = Result<T, PluginError>;
