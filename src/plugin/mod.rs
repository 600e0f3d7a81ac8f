//! Plugin core.
//!
//! # Data Flow
//! ```text
//! host change notification
//!     → orchestrator.rs load (abort on error, previous config stays)
//!     → compile each link (failures recorded, link left inert)
//!     → admin::resolve_admin_list (failures recorded)
//!     → ConfigStore::replace
//!     → background task: register / unregister `/autolink`
//! ```

pub mod error;
pub mod orchestrator;

pub use error::{PluginError, PluginResult};
pub use orchestrator::{AutolinkPlugin, ChangeReport, ConfigurationChange, RuleFailure};
