//! Active configuration snapshot.
//!
//! # Responsibilities
//! - Own the single published `Configuration`
//! - Hand out snapshots to readers
//! - Serialize writers (replace / mutate)
//!
//! # Design Decisions
//! - Readers go through `ArcSwap` and never block, not even on writers
//! - Writers take a mutex so two `mutate` calls cannot lose each other's update
//! - `mutate` is copy-on-write: snapshots already handed out stay unchanged.
//!   The copy is taken under the writer mutex, so a write costs O(links);
//!   only writers wait on it, readers keep loading the previous snapshot
//! - Every publication gets a version from the writer mutex, so versions
//!   follow publication order exactly

use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;

use crate::config::schema::Configuration;

/// Holder of the active configuration.
#[derive(Debug)]
pub struct ConfigStore {
    current: ArcSwap<Configuration>,
    /// Version of the last published snapshot.
    writer: Mutex<u64>,
}

/// A snapshot together with its publication version.
#[derive(Debug, Clone)]
pub struct Published {
    pub snapshot: Arc<Configuration>,
    pub version: u64,
}

impl ConfigStore {
    pub fn new(initial: Configuration) -> Self {
        Self {
            current: ArcSwap::from_pointee(initial),
            writer: Mutex::new(0),
        }
    }

    /// Current snapshot.
    pub fn get(&self) -> Arc<Configuration> {
        self.current.load_full()
    }

    /// Publish `config` as the new snapshot.
    ///
    /// A later publication always carries a higher version.
    pub fn replace(&self, config: Configuration) -> Published {
        let next = Arc::new(config);
        let mut version = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        *version += 1;
        self.current.store(Arc::clone(&next));
        Published {
            snapshot: next,
            version: *version,
        }
    }

    /// Apply `f` to a copy of the current configuration and publish the result.
    ///
    /// Returns the snapshot that was published.
    pub fn mutate<F>(&self, f: F) -> Arc<Configuration>
    where
        F: FnOnce(&mut Configuration),
    {
        let mut version = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = Configuration::clone(&self.current.load());
        f(&mut next);
        let next = Arc::new(next);
        *version += 1;
        self.current.store(Arc::clone(&next));
        next
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(Configuration::default())
    }
}
