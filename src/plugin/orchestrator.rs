//! Configuration change handling.
//!
//! # Responsibilities
//! - Reload the stored configuration when the host signals a change
//! - Compile links and resolve plugin admins before publishing
//! - Publish the new snapshot atomically
//! - Keep the `/autolink` command registration in line with the toggle
//! - Persist link edits back to the host
//!
//! # Design Decisions
//! - Only a failed load aborts a change; per-link and per-admin failures are
//!   logged and returned in a `ChangeReport`
//! - Slow work (compile, user lookups) happens before the store is touched
//! - Command registration runs on its own task and never rolls back a swap

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::admin::{resolve_admin_list, AdminFailure};
use crate::autolink::Autolink;
use crate::commands::{build_command, TRIGGER};
use crate::config::{to_transport_map, ConfigStore, Configuration, Published};
use crate::host::PluginApi;
use crate::observability::metrics;
use crate::plugin::error::{PluginError, PluginResult};

/// A link that failed to compile during a reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFailure {
    /// Position in the configured link list.
    pub index: usize,
    pub name: String,
    pub error: String,
}

/// Per-item failures recorded while building a configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeReport {
    pub rule_failures: Vec<RuleFailure>,
    pub admin_failures: Vec<AdminFailure>,
}

impl ChangeReport {
    pub fn is_clean(&self) -> bool {
        self.rule_failures.is_empty() && self.admin_failures.is_empty()
    }
}

/// Result of a successful `on_configuration_change`.
#[derive(Debug)]
pub struct ConfigurationChange {
    /// The snapshot that was published.
    pub snapshot: Arc<Configuration>,
    pub report: ChangeReport,
    /// Background command (un)registration.
    pub registration: JoinHandle<()>,
}

/// The plugin core: owns the host handle and the configuration store.
pub struct AutolinkPlugin {
    api: Arc<dyn PluginApi>,
    store: Arc<ConfigStore>,
    /// Store version whose command registration was applied last.
    applied_version: Arc<Mutex<u64>>,
}

impl AutolinkPlugin {
    pub fn new(api: Arc<dyn PluginApi>, store: Arc<ConfigStore>) -> Self {
        Self {
            api,
            store,
            applied_version: Arc::new(Mutex::new(0)),
        }
    }

    /// Current configuration snapshot.
    pub fn get_config(&self) -> Arc<Configuration> {
        self.store.get()
    }

    pub fn get_links(&self) -> Vec<Autolink> {
        self.store.get().links.clone()
    }

    pub fn is_plugin_admin(&self, user_id: &str) -> bool {
        self.store.get().is_plugin_admin(user_id)
    }

    /// Reload the configuration from the host and publish it.
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn on_configuration_change(&self) -> PluginResult<ConfigurationChange> {
        let mut config = match self.api.load_plugin_configuration().await {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load plugin configuration, keeping current");
                metrics::record_config_reload("error");
                return Err(PluginError::LoadConfiguration(e));
            }
        };

        let rule_failures = compile_links(&mut config.links);

        // Admin validation failures are not fatal: with an empty set only the
        // system admin can manage the plugin.
        let resolution = resolve_admin_list(&config.plugin_admins, self.api.as_ref()).await;
        config.admin_user_ids = resolution.admins;

        let enable_admin_command = config.enable_admin_command;
        let Published { snapshot, version } = self.store.replace(config);

        tracing::info!(
            links = snapshot.links.len(),
            invalid_links = rule_failures.len(),
            plugin_admins = snapshot.admin_user_ids.len(),
            enable_admin_command,
            "Plugin configuration applied"
        );
        metrics::record_config_reload("ok");

        let registration = self.spawn_command_sync(enable_admin_command, version);

        Ok(ConfigurationChange {
            snapshot,
            report: ChangeReport {
                rule_failures,
                admin_failures: resolution.failures,
            },
            registration,
        })
    }

    /// Replace the link list and persist the whole configuration.
    ///
    /// The new links are visible through `get_config` before the host call
    /// completes.
    pub async fn save_links(&self, links: Vec<Autolink>) -> PluginResult<()> {
        let snapshot = self.store.mutate(move |conf| conf.links = links);

        let config_map = to_transport_map(&snapshot).map_err(|e| {
            tracing::error!(error = %e, "Unable to convert config to map");
            PluginError::from(e)
        })?;

        self.api.save_plugin_config(config_map).await.map_err(|e| {
            tracing::error!(error = %e, "Unable to save links");
            PluginError::SaveLinks(e)
        })?;

        tracing::debug!(links = snapshot.links.len(), "Links saved");
        Ok(())
    }

    /// Register or unregister `/autolink` in the background.
    ///
    /// `version` is the store version of the snapshot `enabled` was read
    /// from. A task that finds a later snapshot already applied does nothing,
    /// so the registered state always follows the published snapshot.
    fn spawn_command_sync(&self, enabled: bool, version: u64) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let applied = Arc::clone(&self.applied_version);

        tokio::spawn(async move {
            let mut applied = applied.lock().await;
            if *applied > version {
                tracing::debug!(version, applied = *applied, "Skipping stale command registration");
                return;
            }
            sync_admin_command(api.as_ref(), enabled).await;
            *applied = version;
        })
    }
}

fn compile_links(links: &mut [Autolink]) -> Vec<RuleFailure> {
    links
        .iter_mut()
        .enumerate()
        .filter_map(|(index, link)| {
            link.compile().err().map(|e| {
                tracing::error!(
                    link = %link.display_name(),
                    index,
                    error = %e,
                    "Error creating autolinker"
                );
                metrics::record_rule_compile_failure();
                RuleFailure {
                    index,
                    name: link.display_name().to_string(),
                    error: e.to_string(),
                }
            })
        })
        .collect()
}

async fn sync_admin_command(api: &dyn PluginApi, enabled: bool) {
    if enabled {
        let result = api.register_command(build_command()).await;
        metrics::record_command_registration("register", result.is_ok());
        if let Err(e) = result {
            tracing::error!(trigger = TRIGGER, error = %e, "Failed to register command");
        }
    } else {
        let result = api.unregister_command("", TRIGGER).await;
        metrics::record_command_registration("unregister", result.is_ok());
        if let Err(e) = result {
            tracing::error!(trigger = TRIGGER, error = %e, "Failed to unregister command");
        }
    }
}
