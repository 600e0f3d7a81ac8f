//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! reload / save / registration paths produce:
//!     → tracing events (structured fields: link, user_id, error)
//!     → metrics.rs counters
//!
//! Consumers:
//!     → logging.rs subscriber (stdout)
//!     → any metrics recorder installed by the embedding process
//! ```

pub mod logging;
pub mod metrics;
