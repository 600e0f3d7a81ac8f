//! Shared utilities for integration tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use autolink_config::commands::Command;
use autolink_config::config::TransportMap;
use autolink_config::host::{HostError, PluginApi, User, UserDirectory};
use autolink_config::Configuration;

/// In-memory host that records every call made by the plugin.
#[derive(Default)]
pub struct MockHost {
    stored: Mutex<Configuration>,
    users: Mutex<HashSet<String>>,
    pub fail_load: AtomicBool,
    pub fail_save: AtomicBool,
    pub fail_register: AtomicBool,
    /// Flip `enable_admin_command` in the stored configuration on every load.
    pub toggle_on_load: AtomicBool,
    pub lookups: AtomicUsize,
    pub registers: AtomicUsize,
    pub unregisters: AtomicUsize,
    pub saved: Mutex<Vec<TransportMap>>,
    pub last_command: Mutex<Option<Command>>,
    /// Whether the command is registered after the last successful call.
    pub command_registered: Mutex<Option<bool>>,
}

#[allow(dead_code)]
impl MockHost {
    pub fn new(stored: Configuration, users: &[&str]) -> Self {
        let host = Self::default();
        host.set_stored(stored);
        *host.users.lock().unwrap() = users.iter().map(|u| u.to_string()).collect();
        host
    }

    pub fn set_stored(&self, config: Configuration) {
        *self.stored.lock().unwrap() = config;
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn registers(&self) -> usize {
        self.registers.load(Ordering::SeqCst)
    }

    pub fn unregisters(&self) -> usize {
        self.unregisters.load(Ordering::SeqCst)
    }

    pub fn command_registered(&self) -> Option<bool> {
        *self.command_registered.lock().unwrap()
    }
}

#[async_trait]
impl UserDirectory for MockHost {
    async fn get_user(&self, user_id: &str) -> Result<User, HostError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.users.lock().unwrap().contains(user_id) {
            Ok(User {
                id: user_id.to_string(),
            })
        } else {
            Err(HostError::UserNotFound(user_id.to_string()))
        }
    }
}

#[async_trait]
impl PluginApi for MockHost {
    async fn load_plugin_configuration(&self) -> Result<Configuration, HostError> {
        if self.fail_load.load(Ordering::SeqCst) {
            return Err(HostError::InvalidConfiguration("malformed".to_string()));
        }
        let mut stored = self.stored.lock().unwrap();
        if self.toggle_on_load.load(Ordering::SeqCst) {
            stored.enable_admin_command = !stored.enable_admin_command;
        }
        Ok(stored.clone())
    }

    async fn save_plugin_config(&self, config: TransportMap) -> Result<(), HostError> {
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(HostError::Unavailable("store offline".to_string()));
        }
        self.saved.lock().unwrap().push(config);
        Ok(())
    }

    async fn register_command(&self, command: Command) -> Result<(), HostError> {
        self.registers.fetch_add(1, Ordering::SeqCst);
        if self.fail_register.load(Ordering::SeqCst) {
            return Err(HostError::Unavailable("registration refused".to_string()));
        }
        *self.last_command.lock().unwrap() = Some(command);
        *self.command_registered.lock().unwrap() = Some(true);
        Ok(())
    }

    async fn unregister_command(&self, _team_id: &str, _trigger: &str) -> Result<(), HostError> {
        self.unregisters.fetch_add(1, Ordering::SeqCst);
        *self.command_registered.lock().unwrap() = Some(false);
        Ok(())
    }
}
