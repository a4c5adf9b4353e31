//! Open-node parent registry and legacy root tracking
//!
//! The registry maps the id of every currently open suite or test to its
//! parent id. An entry exists exactly between an element's start event and
//! its finish event, so the map never grows beyond the current open-nesting
//! depth. Chain walks over the map resolve an event's root ancestor, which
//! becomes the flow id on emitted service messages.
//!
//! Locking discipline per the concurrency model: chain walks take shared read
//! access and may run concurrently with each other; `set`/`clear`/`clear_all`
//! take exclusive access. The legacy nesting depth is a lone atomic integer
//! with no compound invariant, so it needs no lock.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{PoisonError, RwLock};

/// Concurrency-safe `id -> parentId` map for currently open suites and tests
#[derive(Debug, Default)]
pub struct ParentRegistry {
    entries: RwLock<HashMap<String, String>>,
}

impl ParentRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `id` as open, with the given parent id (empty for no parent)
    pub fn set(&self, id: &str, parent_id: &str) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(id.to_string(), parent_id.to_string());
    }

    /// Remove `id`'s entry. Returns whether an entry was present, which is
    /// how the publisher detects a finish event with no matching start.
    pub fn clear(&self, id: &str) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(id).is_some()
    }

    /// Discard every entry (a new test run began)
    pub fn clear_all(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.clear();
    }

    /// Look up `id`'s parent. Absent both when there is no entry and when the
    /// stored parent id is empty; either way `id` is a root.
    #[must_use]
    pub fn try_get_parent(&self, id: &str) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        lookup(&entries, id).map(str::to_string)
    }

    /// Resolve the root ancestor of `id` by walking the parent chain.
    ///
    /// Returns `None` only for an empty starting id. An id with no entry
    /// resolves to itself: a parent referenced before (or after) its own
    /// registration window is treated as the root of its subtree. A
    /// self-referential entry terminates at itself, and the walk is bounded
    /// by the number of live entries so malformed cyclic input cannot hang
    /// the publisher.
    ///
    /// The whole walk runs under one read guard, so it never observes a
    /// half-applied write.
    #[must_use]
    pub fn find_root(&self, id: &str) -> Option<String> {
        if id.is_empty() {
            return None;
        }
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut current = id;
        let mut hops = entries.len();
        while let Some(parent) = lookup(&entries, current) {
            if parent == current || hops == 0 {
                break;
            }
            current = parent;
            hops -= 1;
        }
        Some(current.to_string())
    }

    /// Number of currently open suites and tests
    #[must_use]
    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.len()
    }

    /// Whether nothing is currently open
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Shared lookup: a missing entry and an empty stored parent are the same
fn lookup<'a>(entries: &'a HashMap<String, String>, id: &str) -> Option<&'a str> {
    entries.get(id).map(String::as_str).filter(|p| !p.is_empty())
}

/// Nesting state for the legacy event convention.
///
/// Legacy streams carry no parent ids at all; rootness is inferred by
/// counting unparented suite starts and finishes. The id recorded on the
/// 0 to 1 depth transition becomes the flow id for every legacy event until
/// the depth returns to 0. Both pieces are owned instance state, created
/// empty at publisher construction and reset on `start-run`.
#[derive(Debug, Default)]
pub struct LegacyRoot {
    depth: AtomicI64,
    root_id: RwLock<Option<String>>,
}

impl LegacyRoot {
    /// Create with zero depth and no root
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An unparented suite started. Returns true when this was the outermost
    /// one, in which case `id` is recorded as the legacy root.
    pub fn enter(&self, id: &str) -> bool {
        if self.depth.fetch_add(1, Ordering::SeqCst) == 0 {
            let mut root = self.root_id.write().unwrap_or_else(PoisonError::into_inner);
            *root = Some(id.to_string());
            true
        } else {
            false
        }
    }

    /// An unparented suite finished. Returns true when the outermost one
    /// closed, in which case the recorded root is cleared.
    pub fn leave(&self) -> bool {
        if self.depth.fetch_sub(1, Ordering::SeqCst) == 1 {
            let mut root = self.root_id.write().unwrap_or_else(PoisonError::into_inner);
            *root = None;
            true
        } else {
            false
        }
    }

    /// The current legacy root id, if an unparented suite is open
    #[must_use]
    pub fn current_root(&self) -> Option<String> {
        self.root_id
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Forget all nesting state (a new test run began)
    pub fn reset(&self) {
        self.depth.store(0, Ordering::SeqCst);
        let mut root = self.root_id.write().unwrap_or_else(PoisonError::into_inner);
        *root = None;
    }
}
