/// Callsign hash cache for resolving non-standard callsigns
///
/// Maintains mappings from hash values to full callsigns, allowing
/// subsequent messages to reference callsigns by hash rather than
/// transmitting the full text each time.
///
/// Implementation follows WSJT-X behavior with bounded caches and FIFO eviction.

use std::string::{String, ToString};
use std::vec::Vec;
use hashbrown::HashMap;
use ahash::AHasher;
use core::hash::BuildHasherDefault;

type AHashMap<K, V> = HashMap<K, V, BuildHasherDefault<AHasher>>;

/// Maximum capacity for 22-bit hash cache (from WSJT-X MAXHASH constant)
pub const MAX_22BIT_CAPACITY: usize = 1000;

/// Maximum capacity for 10-bit hash cache (implicitly bounded by 10 bits = 1024 entries)
pub const MAX_10BIT_CAPACITY: usize = 1024;

/// Maximum capacity for 12-bit hash cache (implicitly bounded by 12 bits = 4096 entries)
pub const MAX_12BIT_CAPACITY: usize = 4096;

/// Callsign hash cache for resolving non-standard callsigns
///
/// In FT8, non-standard callsigns (those that don't fit pack28) are handled
/// using a two-message protocol:
/// 1. First message includes full callsign text + hash
/// 2. Subsequent messages reference callsign by hash only
///
/// This cache stores the mapping from hash values to full callsigns.
///
/// The 22-bit cache uses FIFO eviction matching WSJT-X behavior:
/// - New entries are inserted at the front (index 0)
/// - When capacity is exceeded, oldest entries (at the end) are removed
/// - Duplicate hashes are updated in-place without reordering
#[derive(Debug, Clone)]
pub struct CallsignHashCache {
    /// 10-bit hash cache (for DXpedition mode Type 0.1 messages)
    cache_10bit: AHashMap<u16, String>,

    /// 12-bit hash cache (for Type 2 messages)
    cache_12bit: AHashMap<u16, String>,

    /// 22-bit hash cache with FIFO ordering (for Type 1 hash references)
    /// Stores (hash, callsign) pairs in insertion order (newest at index 0)
    cache_22bit: Vec<(u32, String)>,

    /// Quick lookup index for 22-bit hashes: maps hash to position in Vec
    cache_22bit_index: AHashMap<u32, usize>,

    /// Maximum capacity for 22-bit cache
    max_22bit_capacity: usize,
}

impl CallsignHashCache {
    /// Create a new empty hash cache with default WSJTX capacity limits
    pub fn new() -> Self {
        Self {
            cache_10bit: AHashMap::default(),
            cache_12bit: AHashMap::default(),
            cache_22bit: Vec::with_capacity(MAX_22BIT_CAPACITY),
            cache_22bit_index: AHashMap::default(),
            max_22bit_capacity: MAX_22BIT_CAPACITY,
        }
    }

    /// Create a new hash cache with a specified 22-bit capacity
    ///
    /// This is only available for tests to allow testing FIFO behavior
    /// with smaller cache sizes without inserting 1000+ entries.
    ///
    /// # Arguments
    /// * `max_22bit_capacity` - Maximum number of entries in the 22-bit cache
    #[cfg(test)]
    pub(crate) fn with_capacity(max_22bit_capacity: usize) -> Self {
        Self {
            cache_10bit: AHashMap::default(),
            cache_12bit: AHashMap::default(),
            cache_22bit: Vec::with_capacity(max_22bit_capacity),
            cache_22bit_index: AHashMap::default(),
            max_22bit_capacity,
        }
    }
    
    /// Insert a callsign into all hash caches
    ///
    /// Computes 10-bit, 12-bit and 22-bit hashes and stores the callsign
    /// under all keys for future lookup.
    ///
    /// # Arguments
    /// * `callsign` - The callsign to cache
    pub fn insert(&mut self, callsign: &str) {
        use crate::message::callsign::{hash10, hash12, hash22};
        let hash10 = hash10(callsign) as u16;
        let h12 = hash12(callsign);
        let h22 = hash22(callsign);
        self.cache_10bit.insert(hash10, callsign.to_string());
        self.cache_12bit.insert(h12, callsign.to_string());
        self.insert_22bit(h22, callsign);
    }

    /// Insert a callsign into the 22-bit cache with FIFO eviction
    ///
    /// Implements WSJT-X behavior:
    /// - If hash exists: update callsign in-place (no reordering)
    /// - If hash is new: insert at front, evict oldest if at capacity
    ///
    /// # Arguments
    /// * `hash22` - The 22-bit hash value
    /// * `callsign` - The callsign to cache
    fn insert_22bit(&mut self, hash22: u32, callsign: &str) {
        // Check if hash already exists (update-on-hit)
        if let Some(&pos) = self.cache_22bit_index.get(&hash22) {
            // Update in-place without reordering
            if pos < self.cache_22bit.len() {
                self.cache_22bit[pos].1 = callsign.to_string();
            }
            return;
        }

        // New entry: insert at front (index 0)
        self.cache_22bit.insert(0, (hash22, callsign.to_string()));

        // Rebuild index since all positions shifted
        self.cache_22bit_index.clear();
        for (idx, (hash, _)) in self.cache_22bit.iter().enumerate() {
            self.cache_22bit_index.insert(*hash, idx);
        }

        // Evict oldest entry if over capacity
        if self.cache_22bit.len() > self.max_22bit_capacity {
            if let Some((old_hash, _)) = self.cache_22bit.pop() {
                self.cache_22bit_index.remove(&old_hash);
            }
        }
    }
    
    /// Look up a callsign by its 10-bit hash
    pub fn lookup_10bit(&self, hash10: u16) -> Option<&str> {
        self.cache_10bit.get(&hash10).map(|s| s.as_str())
    }

    /// Look up a callsign by its 12-bit hash
    pub fn lookup_12bit(&self, hash12: u16) -> Option<&str> {
        self.cache_12bit.get(&hash12).map(|s| s.as_str())
    }

    /// Look up a callsign by its 22-bit hash
    pub fn lookup_22bit(&self, hash22: u32) -> Option<&str> {
        self.cache_22bit_index.get(&hash22).and_then(|&pos| {
            self.cache_22bit.get(pos).map(|(_, callsign)| callsign.as_str())
        })
    }
    
    /// Clear all cached entries
    pub fn clear(&mut self) {
        self.cache_10bit.clear();
        self.cache_12bit.clear();
        self.cache_22bit.clear();
        self.cache_22bit_index.clear();
    }

    /// Get the number of cached entries (10-bit count, 12-bit count, 22-bit count)
    pub fn len(&self) -> (usize, usize, usize) {
        (
            self.cache_10bit.len(),
            self.cache_12bit.len(),
            self.cache_22bit.len(),
        )
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache_10bit.is_empty()
            && self.cache_12bit.is_empty()
            && self.cache_22bit.is_empty()
    }

    /// Get the maximum capacity for the 22-bit cache
    pub fn max_22bit_capacity(&self) -> usize {
        self.max_22bit_capacity
    }
}

impl Default for CallsignHashCache {
    fn default() -> Self {
        Self::new()
    }
}
