//! File-backed host.
//!
//! # Responsibilities
//! - Store the plugin configuration as a JSON file
//! - Validate user ids against a fixed directory
//! - Keep registered commands in memory
//!
//! # Design Decisions
//! - A missing configuration file loads as the default configuration
//! - Unregistering an unknown command is a no-op
//! - Saves go through a temp file + rename so the watcher never sees a
//!   half-written file

use std::collections::HashSet;
use std::path::PathBuf;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use crate::commands::Command;
use crate::config::{Configuration, TransportMap};
use crate::host::{HostError, PluginApi, User, UserDirectory};

/// `PluginApi` implementation over the local filesystem.
#[derive(Debug)]
pub struct FileHost {
    config_path: PathBuf,
    users: HashSet<String>,
    commands: DashMap<String, Command>,
}

impl FileHost {
    pub fn new(config_path: impl Into<PathBuf>, users: impl IntoIterator<Item = String>) -> Self {
        Self {
            config_path: config_path.into(),
            users: users.into_iter().collect(),
            commands: DashMap::new(),
        }
    }

    /// Currently registered command, if any.
    pub fn registered_command(&self, trigger: &str) -> Option<Command> {
        self.commands.get(trigger).map(|c| c.value().clone())
    }
}

#[async_trait]
impl UserDirectory for FileHost {
    async fn get_user(&self, user_id: &str) -> Result<User, HostError> {
        if self.users.contains(user_id) {
            Ok(User {
                id: user_id.to_string(),
            })
        } else {
            Err(HostError::UserNotFound(user_id.to_string()))
        }
    }
}

#[async_trait]
impl PluginApi for FileHost {
    async fn load_plugin_configuration(&self) -> Result<Configuration, HostError> {
        let content = match tokio::fs::read_to_string(&self.config_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(
                    path = ?self.config_path,
                    "No plugin configuration file, using defaults"
                );
                return Ok(Configuration::default());
            }
            Err(e) => return Err(HostError::Io(e)),
        };

        serde_json::from_str(&content).map_err(|e| {
            HostError::InvalidConfiguration(format!("{}: {}", self.config_path.display(), e))
        })
    }

    async fn save_plugin_config(&self, config: TransportMap) -> Result<(), HostError> {
        let content = serde_json::to_string_pretty(&Value::Object(config))?;

        let tmp_path = self.config_path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, content).await?;
        tokio::fs::rename(&tmp_path, &self.config_path).await?;

        tracing::debug!(path = ?self.config_path, "Plugin configuration saved");
        Ok(())
    }

    async fn register_command(&self, command: Command) -> Result<(), HostError> {
        tracing::info!(trigger = %command.trigger, "Command registered");
        self.commands.insert(command.trigger.clone(), command);
        Ok(())
    }

    async fn unregister_command(&self, team_id: &str, trigger: &str) -> Result<(), HostError> {
        if self.commands.remove(trigger).is_some() {
            tracing::info!(team_id = %team_id, trigger = %trigger, "Command unregistered");
        }
        Ok(())
    }
}
