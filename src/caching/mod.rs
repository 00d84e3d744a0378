//! # Caching Module
//!
//! This module provides caching wrappers for objectives. Caching pays off for
//! expensive objectives that are queried repeatedly at the same position, which
//! happens when elites are re-evaluated or opposition points coincide.
//!
//! Objectives are deterministic, so a cost can be keyed by the exact bit pattern
//! of its position. Two positions that differ only in the sign of a zero are
//! treated as different keys.
//!
//! The run itself still counts every query as an evaluation; the cache only
//! saves the work of calling the wrapped objective.
//!
//! Neither cache evicts. In a continuous search nearly every position is new,
//! so memory grows with the number of evaluations while hits stay rare. Call
//! `clear_cache` between batches when a wrapper outlives a single run; the
//! thread-local cache only clears the calling thread's entries.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thread_local::ThreadLocal;

use crate::objective::Objective;

/// Exact bit pattern of a position, usable as a hash key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PositionKey(Vec<u64>);

impl PositionKey {
    pub fn new(position: &[f64]) -> Self {
        Self(position.iter().map(|x| x.to_bits()).collect())
    }
}

/// A wrapper around an objective that caches costs in one shared map.
///
/// Clones share the cache.
#[derive(Debug, Clone)]
pub struct CachedObjective<O>
where
    O: Objective,
{
    /// The wrapped objective
    objective: O,
    cache: Arc<Mutex<HashMap<PositionKey, f64>>>,
}

impl<O> CachedObjective<O>
where
    O: Objective,
{
    pub fn new(objective: O) -> Self {
        Self::with_cache(objective, HashMap::new())
    }

    /// Creates a cached objective with a pre-populated cache.
    pub fn with_cache(objective: O, cache: HashMap<PositionKey, f64>) -> Self {
        Self {
            objective,
            cache: Arc::new(Mutex::new(cache)),
        }
    }

    /// Returns a reference to the wrapped objective.
    pub fn inner(&self) -> &O {
        &self.objective
    }

    pub fn cache_size(&self) -> usize {
        self.lock().len()
    }

    pub fn clear_cache(&self) {
        self.lock().clear();
    }

    /// Returns a copy of the cache.
    pub fn get_cache(&self) -> HashMap<PositionKey, f64> {
        self.lock().clone()
    }

    // A panicking objective cannot leave the map half-written, so a poisoned
    // lock is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<PositionKey, f64>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<O> Objective for CachedObjective<O>
where
    O: Objective,
{
    fn evaluate(&self, position: &[f64]) -> f64 {
        let key = PositionKey::new(position);
        if let Some(cost) = self.lock().get(&key) {
            return *cost;
        }

        // Evaluate without holding the lock
        let cost = self.objective.evaluate(position);
        self.lock().insert(key, cost);
        cost
    }

    fn objective_count(&self) -> usize {
        self.objective.objective_count()
    }

    fn evaluate_objectives(&self, position: &[f64]) -> Vec<f64> {
        self.objective.evaluate_objectives(position)
    }
}

/// A per-thread cost cache.
///
/// Each thread sees only its own entries, so parallel batch runs never contend
/// on a lock.
#[derive(Debug, Default)]
pub struct ThreadLocalCache {
    cache: ThreadLocal<RefCell<HashMap<PositionKey, f64>>>,
}

impl ThreadLocalCache {
    pub fn new() -> Self {
        Self {
            cache: ThreadLocal::new(),
        }
    }

    pub fn get(&self, key: &PositionKey) -> Option<f64> {
        self.cache
            .get()
            .and_then(|cell| cell.try_borrow().ok())
            .and_then(|cache| cache.get(key).copied())
    }

    pub fn insert(&self, key: PositionKey, value: f64) {
        let cell = self.cache.get_or(|| RefCell::new(HashMap::new()));
        if let Ok(mut cache) = cell.try_borrow_mut() {
            cache.insert(key, value);
        }
    }

    /// Clears the cache of the current thread.
    pub fn clear(&self) {
        if let Some(cell) = self.cache.get() {
            if let Ok(mut cache) = cell.try_borrow_mut() {
                cache.clear();
            }
        }
    }

    /// Returns the number of costs cached by the current thread.
    pub fn len(&self) -> usize {
        self.cache
            .get()
            .and_then(|cell| cell.try_borrow().ok())
            .map_or(0, |cache| cache.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A wrapper around an objective that caches costs per thread.
#[derive(Debug, Clone)]
pub struct ThreadLocalCachedObjective<O>
where
    O: Objective,
{
    objective: O,
    cache: Arc<ThreadLocalCache>,
}

impl<O> ThreadLocalCachedObjective<O>
where
    O: Objective,
{
    pub fn new(objective: O) -> Self {
        Self {
            objective,
            cache: Arc::new(ThreadLocalCache::new()),
        }
    }

    pub fn inner(&self) -> &O {
        &self.objective
    }

    /// Clears the cache of the current thread.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Returns the number of costs cached by the current thread.
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl<O> Objective for ThreadLocalCachedObjective<O>
where
    O: Objective,
{
    fn evaluate(&self, position: &[f64]) -> f64 {
        let key = PositionKey::new(position);
        if let Some(cost) = self.cache.get(&key) {
            return cost;
        }

        let cost = self.objective.evaluate(position);
        self.cache.insert(key, cost);
        cost
    }

    fn objective_count(&self) -> usize {
        self.objective.objective_count()
    }

    fn evaluate_objectives(&self, position: &[f64]) -> Vec<f64> {
        self.objective.evaluate_objectives(position)
    }
}

/// Extension methods that wrap an objective in a cache.
///
/// ```rust
/// use mayfly::caching::CachingObjective;
/// use mayfly::objective::Objective;
///
/// let cached = (|x: &[f64]| x[0] * 2.0).with_global_cache();
/// assert_eq!(cached.evaluate(&[1.5]), 3.0);
/// assert_eq!(cached.cache_size(), 1);
/// ```
pub trait CachingObjective: Objective + Sized {
    /// Wraps the objective in a cache shared by all threads.
    fn with_global_cache(self) -> CachedObjective<Self> {
        CachedObjective::new(self)
    }

    /// Wraps the objective in a per-thread cache.
    fn with_thread_local_cache(self) -> ThreadLocalCachedObjective<Self> {
        ThreadLocalCachedObjective::new(self)
    }
}

impl<O> CachingObjective for O where O: Objective {}
