//! Live configuration core for the autolink plugin.

pub mod admin;
pub mod autolink;
pub mod commands;
pub mod config;
pub mod host;
pub mod observability;
pub mod plugin;

pub use config::{ConfigStore, Configuration};
pub use plugin::AutolinkPlugin;
