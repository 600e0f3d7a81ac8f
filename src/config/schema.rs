//! Plugin configuration schema.
//!
//! This is the shape the host stores for the plugin. Field names are part of
//! the persisted contract and are matched case-sensitively.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::autolink::Autolink;

/// Root plugin configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Configuration {
    /// Register the `/autolink` administration command.
    #[serde(rename = "enableadmincommand")]
    pub enable_admin_command: bool,

    /// Re-apply rules when a message is edited.
    #[serde(rename = "enableonupdate")]
    pub enable_on_update: bool,

    /// Raw comma-separated list of user ids allowed to administer the plugin.
    #[serde(rename = "pluginadmins")]
    pub plugin_admins: String,

    /// Rules in their canonical order.
    #[serde(rename = "links")]
    pub links: Vec<Autolink>,

    /// Validated user ids parsed from `plugin_admins`.
    ///
    /// Rebuilt on every configuration change and never persisted.
    #[serde(skip)]
    pub admin_user_ids: HashSet<String>,
}

impl Configuration {
    /// Whether `user_id` is one of the validated plugin admins.
    pub fn is_plugin_admin(&self, user_id: &str) -> bool {
        self.admin_user_ids.contains(user_id)
    }

    /// Independent copy with links ordered by display name.
    ///
    /// `self` is left untouched.
    pub fn sorted(&self) -> Configuration {
        let mut sorted = self.clone();
        sorted
            .links
            .sort_by(|a, b| a.display_name().cmp(b.display_name()));
        sorted
    }
}
