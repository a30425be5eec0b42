//! Memoisation of batch results by canonical parameter key.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use parking_lot::RwLock;

use super::OptimizationRequest;
use crate::cost::OverrideSelection;
use crate::optimizer::OptimizedResult;

/// Hashable identity of an [`OptimizationRequest`].
///
/// Floats are stored as bit patterns with `-0.0` folded into `0.0` and every
/// NaN folded into one pattern, so equal-valued requests share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    mode: &'static str,
    target: u64,
    financial: [u64; 8],
    lives: (u32, u32),
    selection: OverrideSelection,
    year: u32,
}

impl CacheKey {
    /// Builds the key for `request`.
    pub fn from_request(request: &OptimizationRequest) -> Self {
        let p = &request.params;
        Self {
            mode: request.target.label(),
            target: canonical_bits(request.target.threshold()),
            financial: [
                canonical_bits(p.solar_capex_per_kw),
                canonical_bits(p.battery_capex_per_kwh),
                canonical_bits(p.solar_opex_fraction),
                canonical_bits(p.battery_opex_fraction),
                canonical_bits(p.wacc),
                canonical_bits(p.inverter_load_ratio),
                canonical_bits(p.cost_multipliers.solar),
                canonical_bits(p.cost_multipliers.battery),
            ],
            lives: (p.solar_life_years, p.battery_life_years),
            selection: request.selection,
            year: request.year,
        }
    }
}

fn canonical_bits(value: f64) -> u64 {
    if value == 0.0 {
        0.0_f64.to_bits()
    } else if value.is_nan() {
        f64::NAN.to_bits()
    } else {
        value.to_bits()
    }
}

/// Batches kept by [`ResultCache::new`].
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

#[derive(Debug, Default)]
struct Entries {
    batches: HashMap<CacheKey, Arc<Vec<OptimizedResult>>>,
    // insertion order, oldest first
    order: VecDeque<CacheKey>,
}

/// Thread-safe store of computed batches.
///
/// Holds at most `capacity` batches; inserting past the limit evicts the
/// oldest entry.
#[derive(Debug)]
pub struct ResultCache {
    entries: RwLock<Entries>,
    capacity: usize,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl ResultCache {
    /// Creates a cache holding up to [`DEFAULT_CACHE_CAPACITY`] batches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache holding up to `capacity` batches (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(Entries::default()),
            capacity: capacity.max(1),
        }
    }

    /// Looks up a previously stored batch.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<Vec<OptimizedResult>>> {
        self.entries.read().batches.get(key).cloned()
    }

    /// Stores `results` under `key` unless an entry already exists, and
    /// returns whichever batch is now cached.
    pub fn insert(&self, key: CacheKey, results: Vec<OptimizedResult>) -> Arc<Vec<OptimizedResult>> {
        let mut entries = self.entries.write();
        if let Some(existing) = entries.batches.get(&key) {
            return Arc::clone(existing);
        }

        while entries.order.len() >= self.capacity {
            let Some(oldest) = entries.order.pop_front() else { break };
            entries.batches.remove(&oldest);
        }

        let batch = Arc::new(results);
        entries.order.push_back(key.clone());
        entries.batches.insert(key, Arc::clone(&batch));
        batch
    }

    /// Number of cached batches.
    pub fn len(&self) -> usize {
        self.entries.read().batches.len()
    }

    /// `true` when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.read().batches.is_empty()
    }

    /// Maximum number of batches kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops every cached batch.
    pub fn clear(&self) {
        let mut entries = self.entries.write();
        entries.batches.clear();
        entries.order.clear();
    }
}
