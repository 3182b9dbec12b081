use std::collections::BTreeMap;

use parking_lot::{Mutex, MutexGuard};

/// Integer key routing for the sharded accumulator.
pub trait ShardKey: Copy {
    fn shard_index(self, shard_count: usize) -> usize;
}

impl ShardKey for i32 {
    fn shard_index(self, shard_count: usize) -> usize {
        self as u32 as usize % shard_count
    }
}

impl ShardKey for i64 {
    fn shard_index(self, shard_count: usize) -> usize {
        (self as u64 % shard_count as u64) as usize
    }
}

impl ShardKey for u64 {
    fn shard_index(self, shard_count: usize) -> usize {
        (self % shard_count as u64) as usize
    }
}

impl ShardKey for crate::core::types::DocumentId {
    fn shard_index(self, shard_count: usize) -> usize {
        self.0.shard_index(shard_count)
    }
}

/// A map split into a fixed number of independently locked sub-maps.
///
/// A key always lives in the shard selected by `key mod shard_count`, so
/// concurrent writers only contend when their keys share a shard. Critical
/// sections are one map access long.
pub struct ConcurrentMap<K, V> {
    shards: Vec<Mutex<BTreeMap<K, V>>>,
}

/// Scoped handle over one slot: holds the shard's lock for its lifetime and
/// exposes the slot's value, default-initialized when absent.
pub struct Access<'a, K: Ord + Copy, V: Default> {
    guard: MutexGuard<'a, BTreeMap<K, V>>,
    key: K,
}

impl<'a, K: Ord + Copy, V: Default> Access<'a, K, V> {
    pub fn value_mut(&mut self) -> &mut V {
        self.guard.entry(self.key).or_default()
    }
}

impl<K, V> ConcurrentMap<K, V>
where
    K: ShardKey + Ord + Copy,
    V: Default,
{
    pub fn new(shard_count: usize) -> Self {
        assert!(shard_count > 0, "shard count must be positive");
        ConcurrentMap {
            shards: (0..shard_count).map(|_| Mutex::new(BTreeMap::new())).collect(),
        }
    }

    /// Locks the shard owning `key` and returns the slot handle. The lock is
    /// released when the handle goes out of scope.
    pub fn lock(&self, key: K) -> Access<'_, K, V> {
        let shard = &self.shards[key.shard_index(self.shards.len())];
        Access {
            guard: shard.lock(),
            key,
        }
    }

    /// Flattens the shards into a single ordered map, locking them one at a
    /// time. Not meant to run concurrently with live handles.
    pub fn build_ordinary_map(&self) -> BTreeMap<K, V>
    where
        V: Clone,
    {
        let mut result = BTreeMap::new();
        for shard in &self.shards {
            let guard = shard.lock();
            result.extend(guard.iter().map(|(key, value)| (*key, value.clone())));
        }
        result
    }
}
