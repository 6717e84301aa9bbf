//! Tree and cache configuration.

/// Identifier count at which leaf hashing moves onto the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1024;

/// Number of trees a [`TreeCache`](crate::TreeCache) keeps by default
pub const DEFAULT_CACHE_CAPACITY: usize = 16;

/// What to do when the same identifier appears more than once.
///
/// Duplicates are compared after normalization, so `0xAB` and `0xab` collide.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[derive(strum::Display, strum::EnumString, strum::IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum DuplicatePolicy {
    /// Keep every occurrence. Lookups by digest resolve to the first one;
    /// later occurrences remain provable through [`MerkleTree::prove_index`].
    ///
    /// [`MerkleTree::prove_index`]: crate::MerkleTree::prove_index
    #[default]
    Allow,
    /// Fail the build with [`MerkleError::DuplicateLeaf`](crate::MerkleError::DuplicateLeaf).
    Reject,
}

/// Parameters for building a [`MerkleTree`](crate::MerkleTree).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TreeConfig {
    duplicates: DuplicatePolicy,
    parallel_threshold: usize,
}

impl TreeConfig {
    /// Default configuration: duplicates allowed, parallel hashing from 1024 leaves
    #[inline]
    pub const fn new() -> Self {
        Self {
            duplicates: DuplicatePolicy::Allow,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Set the duplicate identifier policy
    #[inline]
    #[must_use]
    pub const fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    /// Set the size at which hashing switches to the rayon pool
    #[inline]
    #[must_use]
    pub const fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// The duplicate identifier policy
    #[inline]
    pub const fn duplicates(&self) -> DuplicatePolicy {
        self.duplicates
    }

    /// The size at which hashing switches to the rayon pool
    #[inline]
    pub const fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters for a [`TreeCache`](crate::TreeCache).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CacheConfig {
    capacity: usize,
    tree: TreeConfig,
}

impl CacheConfig {
    /// Default configuration: 16 trees, default tree parameters
    #[inline]
    pub const fn new() -> Self {
        Self {
            capacity: DEFAULT_CACHE_CAPACITY,
            tree: TreeConfig::new(),
        }
    }

    /// Set the maximum number of cached trees; zero disables caching
    #[inline]
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the parameters used for trees built by the cache
    #[inline]
    #[must_use]
    pub const fn with_tree(mut self, tree: TreeConfig) -> Self {
        self.tree = tree;
        self
    }

    /// Maximum number of cached trees
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Parameters used for trees built by the cache
    #[inline]
    pub const fn tree(&self) -> &TreeConfig {
        &self.tree
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new()
    }
}
