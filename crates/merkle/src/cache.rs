//! Bounded cache of built trees keyed by address set content
//!
//! Building a tree hashes every identifier, so serving many proofs for the
//! same set should not rebuild it each time. [`TreeCache`] keeps recently built
//! trees behind [`Arc`]s, keyed by [`SetKey`]. A changed set produces a new key,
//! so stale trees are never returned; they age out or can be dropped with
//! [`TreeCache::invalidate`].
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//! use allowlist_merkle::{AddressSet, CacheConfig, TreeCache};
//!
//! let cache = TreeCache::new(CacheConfig::default());
//! let set = AddressSet::new(["0xAAAA", "0xBBBB", "0xCCCC"]);
//!
//! let first = cache.get_or_build(&set).unwrap();
//! let second = cache.get_or_build(&set).unwrap();
//! assert!(Arc::ptr_eq(&first, &second));
//!
//! assert!(cache.invalidate(&set.key()));
//! assert!(cache.get(&set.key()).is_none());
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::config::CacheConfig;
use crate::error::Result;
use crate::set::{AddressSet, SetKey};
use crate::tree::MerkleTree;

#[derive(Debug, Default)]
struct Entries {
    trees: HashMap<SetKey, Arc<MerkleTree>>,
    /// Insertion order, oldest first.
    order: VecDeque<SetKey>,
}

/// Thread-safe, capacity-bounded cache of trees.
///
/// The lock is never held while a tree is being built. Two threads missing on
/// the same key may both build; the first insert wins and both receive it.
#[derive(Debug)]
pub struct TreeCache {
    config: CacheConfig,
    entries: RwLock<Entries>,
}

impl TreeCache {
    /// Create an empty cache
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            entries: RwLock::new(Entries::default()),
        }
    }

    /// The cache configuration
    #[inline]
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Look up a previously built tree
    pub fn get(&self, key: &SetKey) -> Option<Arc<MerkleTree>> {
        self.entries.read().trees.get(key).cloned()
    }

    /// Return the cached tree for `set`, building and caching it on a miss
    pub fn get_or_build(&self, set: &AddressSet) -> Result<Arc<MerkleTree>> {
        set.leaves_with(self.config.tree());
        let key = set.key();

        if let Some(tree) = self.get(&key) {
            debug!(%key, "tree cache hit");
            return Ok(tree);
        }

        debug!(%key, identifiers = set.len(), "tree cache miss");
        let tree = Arc::new(set.build(self.config.tree())?);

        if self.config.capacity() == 0 {
            return Ok(tree);
        }

        let mut entries = self.entries.write();

        if let Some(existing) = entries.trees.get(&key) {
            return Ok(Arc::clone(existing));
        }

        while entries.trees.len() >= self.config.capacity() {
            let Some(oldest) = entries.order.pop_front() else {
                break;
            };
            entries.trees.remove(&oldest);
            debug!(key = %oldest, "evicted tree from cache");
        }

        entries.trees.insert(key, Arc::clone(&tree));
        entries.order.push_back(key);

        Ok(tree)
    }

    /// Drop the tree for `key`, returning whether one was cached
    pub fn invalidate(&self, key: &SetKey) -> bool {
        let mut entries = self.entries.write();
        let removed = entries.trees.remove(key).is_some();
        if removed {
            entries.order.retain(|cached| cached != key);
            debug!(%key, "invalidated cached tree");
        }
        removed
    }

    /// Drop every cached tree
    pub fn clear(&self) {
        let mut entries = self.entries.write();
        entries.trees.clear();
        entries.order.clear();
    }

    /// Number of cached trees
    pub fn len(&self) -> usize {
        self.entries.read().trees.len()
    }

    /// True if no trees are cached
    pub fn is_empty(&self) -> bool {
        self.entries.read().trees.is_empty()
    }
}

impl Default for TreeCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
