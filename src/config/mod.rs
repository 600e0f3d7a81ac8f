//! Plugin configuration subsystem.
//!
//! # Data Flow
//! ```text
//! host store (JSON object)
//!     → schema.rs (typed Configuration, derived admin set skipped)
//!     → plugin orchestrator (compile links, resolve admins)
//!     → store.rs (atomic swap of Arc<Configuration>)
//!     → readers observe the new snapshot
//!
//! On save:
//!     store.rs mutate (copy-on-write)
//!     → persistence.rs (Configuration → TransportMap)
//!     → host save call
//!
//! watcher.rs signals on-disk changes for the standalone host.
//! ```
//!
//! # Design Decisions
//! - A published snapshot is never modified in place
//! - Derived state (compiled links, admin ids) is never persisted

pub mod persistence;
pub mod schema;
pub mod store;
pub mod watcher;

pub use persistence::{to_transport_map, EncodingError, TransportMap};
pub use schema::Configuration;
pub use store::{ConfigStore, Published};
pub use watcher::{ConfigChanged, ConfigWatcher};
