//! Per-document index cache with debounced rebuilds
//!
//! Each open document (keyed by its identity, not its content) owns at most
//! one cached `DocumentIndex` and at most one pending rebuild.
//!
//! ```text
//! didChange(key, text)
//!     ↓
//! abort pending rebuild for key (if any)
//!     ↓
//! spawn single-shot task: sleep(debounce) → build(text) → install
//! ```
//!
//! Installation is an `Arc` swap, so a reader holding the previous index keeps
//! a complete snapshot. Every scheduled rebuild carries a generation number;
//! a task whose generation is no longer the pending one for its key discards
//! its result instead of installing it.
//!
//! Queries never schedule rebuilds. They read whatever index is cached, which
//! may lag the text by up to one debounce interval.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use crate::index::DocumentIndex;

/// Counters for monitoring and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Synchronous builds (first access, document switch)
    pub builds: u64,
    /// Debounced rebuilds that were installed
    pub rebuilds: u64,
    /// Pending rebuilds aborted by a newer change or by eviction
    pub cancelled: u64,
    /// Rebuilds that finished after being superseded and were discarded
    pub superseded: u64,
}

struct PendingRebuild {
    generation: u64,
    handle: JoinHandle<()>,
}

pub struct IndexManager {
    indexes: DashMap<String, Arc<DocumentIndex>>,
    pending: Mutex<HashMap<String, PendingRebuild>>,
    next_generation: AtomicU64,
    active: RwLock<Option<String>>,
    debounce: RwLock<Duration>,
    stats: Mutex<IndexStats>,
}

impl std::fmt::Debug for IndexManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexManager")
            .field("documents", &self.indexes.len())
            .field("pending", &self.pending.lock().len())
            .field("debounce", &*self.debounce.read())
            .finish()
    }
}

impl IndexManager {
    pub fn new(debounce: Duration) -> Self {
        Self {
            indexes: DashMap::new(),
            pending: Mutex::new(HashMap::new()),
            next_generation: AtomicU64::new(0),
            active: RwLock::new(None),
            debounce: RwLock::new(debounce),
            stats: Mutex::new(IndexStats::default()),
        }
    }

    pub fn debounce(&self) -> Duration {
        *self.debounce.read()
    }

    /// Changes the quiet period for rebuilds scheduled from now on.
    pub fn set_debounce(&self, debounce: Duration) {
        *self.debounce.write() = debounce;
    }

    /// Cached index for `key`, without building anything.
    pub fn get(&self, key: &str) -> Option<Arc<DocumentIndex>> {
        self.indexes.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Cached index for `key`, building it synchronously from `text` on first access.
    pub fn get_or_build(&self, key: &str, text: &str) -> Arc<DocumentIndex> {
        if let Some(index) = self.get(key) {
            return index;
        }
        let index = Arc::new(DocumentIndex::build(text));
        self.stats.lock().builds += 1;
        debug!(
            "Built index for {}: {} functions, {} variables",
            key,
            index.functions.len(),
            index.variables.len()
        );
        self.indexes
            .entry(key.to_string())
            .or_insert(index)
            .value()
            .clone()
    }

    /// Replaces the index for `key` outright.
    pub fn insert(&self, key: &str, index: DocumentIndex) {
        self.indexes.insert(key.to_string(), Arc::new(index));
    }

    /// Document switch: records `key` as active and builds or reuses its index.
    pub fn activate(&self, key: &str, text: &str) -> Arc<DocumentIndex> {
        *self.active.write() = Some(key.to_string());
        self.get_or_build(key, text)
    }

    pub fn active(&self) -> Option<String> {
        self.active.read().clone()
    }

    /// Content-change notification: supersedes any pending rebuild for `key`
    /// and schedules a new one with the given text after the debounce interval.
    ///
    /// A document seen for the first time is indexed immediately as well, so
    /// queries between now and the rebuild have something to read.
    pub fn notify_change(self: &Arc<Self>, key: &str, text: String) {
        self.get_or_build(key, &text);

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("No async runtime available; rebuilding index for {} immediately", key);
            self.cancel_pending(key);
            self.indexes.insert(key.to_string(), Arc::new(DocumentIndex::build(&text)));
            self.stats.lock().rebuilds += 1;
            return;
        };

        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let delay = self.debounce();

        // Held across spawn + insert so the task cannot observe the map
        // before its own entry is registered.
        let mut pending = self.pending.lock();
        if let Some(previous) = pending.remove(key) {
            previous.handle.abort();
            self.stats.lock().cancelled += 1;
            trace!("Cancelled pending rebuild {} for {}", previous.generation, key);
        }

        let manager = Arc::clone(self);
        let task_key = key.to_string();
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            manager.complete_rebuild(&task_key, generation, &text);
        });

        trace!("Scheduled rebuild {} for {} in {:?}", generation, key, delay);
        pending.insert(key.to_string(), PendingRebuild { generation, handle });
    }

    fn complete_rebuild(&self, key: &str, generation: u64, text: &str) {
        let index = Arc::new(DocumentIndex::build(text));

        let mut pending = self.pending.lock();
        match pending.get(key) {
            Some(current) if current.generation == generation => {
                pending.remove(key);
            }
            _ => {
                self.stats.lock().superseded += 1;
                trace!("Discarding superseded rebuild {} for {}", generation, key);
                return;
            }
        }
        self.indexes.insert(key.to_string(), index);
        drop(pending);

        self.stats.lock().rebuilds += 1;
        debug!("Rebuilt index for {} (generation {})", key, generation);
    }

    fn cancel_pending(&self, key: &str) {
        if let Some(previous) = self.pending.lock().remove(key) {
            previous.handle.abort();
            self.stats.lock().cancelled += 1;
        }
    }

    /// Drops everything held for a closed document.
    pub fn evict(&self, key: &str) {
        self.cancel_pending(key);
        self.indexes.remove(key);
        let mut active = self.active.write();
        if active.as_deref() == Some(key) {
            *active = None;
        }
        debug!("Evicted index for {}", key);
    }

    pub fn has_pending_rebuild(&self, key: &str) -> bool {
        self.pending.lock().contains_key(key)
    }

    pub fn stats(&self) -> IndexStats {
        self.stats.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }
}
