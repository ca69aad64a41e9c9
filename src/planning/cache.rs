// src/planning/cache.rs

use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::error::Result;
use crate::planning::engine::InventorySnapshot;

/// Host-owned cache of the last loaded snapshot.
///
/// The caller passes `now` explicitly; the engine only ever sees the
/// snapshot, never the cache.
#[derive(Debug)]
pub struct SnapshotCache {
    ttl: Duration,
    entry: Option<(InventorySnapshot, Instant)>,
}

impl SnapshotCache {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn store(&mut self, snapshot: InventorySnapshot, now: Instant) {
        debug!(items = snapshot.items.len(), "snapshot cached");
        self.entry = Some((snapshot, now));
    }

    /// The cached snapshot, or `None` once it is `ttl` old.
    pub fn get(&self, now: Instant) -> Option<&InventorySnapshot> {
        match &self.entry {
            Some((snapshot, stored_at)) if now.saturating_duration_since(*stored_at) < self.ttl => {
                Some(snapshot)
            }
            _ => None,
        }
    }

    pub fn is_fresh(&self, now: Instant) -> bool {
        self.get(now).is_some()
    }

    /// Reuses the cached snapshot while it is fresh, otherwise calls `load`.
    ///
    /// A freshly loaded snapshot is returned even when `ttl` is zero. When
    /// `load` fails the last good snapshot is returned, however old, so the
    /// previous forecast stays visible. `None` only if nothing was ever loaded.
    pub fn refresh_with<F>(&mut self, now: Instant, load: F) -> Option<&InventorySnapshot>
    where
        F: FnOnce() -> Result<InventorySnapshot>,
    {
        if !self.is_fresh(now) {
            match load() {
                Ok(snapshot) => self.store(snapshot, now),
                Err(e) => warn!("Reload failed, keeping last good snapshot: {e}"),
            }
        }
        self.entry.as_ref().map(|(snapshot, _)| snapshot)
    }

    pub fn invalidate(&mut self) {
        if self.entry.take().is_some() {
            debug!("snapshot cache invalidated");
        }
    }
}
