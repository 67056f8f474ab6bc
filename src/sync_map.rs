//! Size helpers for concurrent containers (DashMap / DashSet)
//!
//! The count is taken by walking every shard at call time. Each shard is
//! read-locked only while it is visited, so writers to other shards are not
//! blocked and the returned size may already be stale. There is no snapshot
//! isolation across shards.

use std::hash::{BuildHasher, Hash};

use dashmap::{DashMap, DashSet};

/// Number of entries in a [`DashMap`], counted by enumeration
pub fn map_size<K, V, S>(map: &DashMap<K, V, S>) -> usize
where
    K: Eq + Hash,
    S: BuildHasher + Clone,
{
    map.iter().count()
}

/// Number of keys in a [`DashSet`], counted by enumeration
pub fn set_size<K, S>(set: &DashSet<K, S>) -> usize
where
    K: Eq + Hash,
    S: BuildHasher + Clone,
{
    set.iter().count()
}
