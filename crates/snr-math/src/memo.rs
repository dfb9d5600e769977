// ─────────────────────────────────────────────────────────────────────
// SNR Evolution Core — Memo
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Per-owner memo caches for expensive scalar evaluations.
//!
//! Keys are floating-point arguments compared bit-exactly. The cache
//! lives inside the object that owns it and is dropped with it.

use snr_types::error::SnrResult;
use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::Hash;

/// Bit-exact hash key for an `f64` argument.
pub fn f64_key(x: f64) -> u64 {
    // Fold -0.0 onto 0.0
    if x == 0.0 {
        0
    } else {
        x.to_bits()
    }
}

/// Interior-mutable memo table.
#[derive(Debug)]
pub struct MemoCache<K, V> {
    entries: RefCell<HashMap<K, V>>,
}

impl<K, V> Default for MemoCache<K, V> {
    fn default() -> Self {
        MemoCache {
            entries: RefCell::new(HashMap::new()),
        }
    }
}

impl<K: Hash + Eq, V: Clone> MemoCache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value for `key`, computing and storing it on a miss.
    ///
    /// The table is not borrowed while `compute` runs, so `compute` may
    /// itself consult this cache. Errors are not cached.
    pub fn get_or_try_insert_with<F>(&self, key: K, compute: F) -> SnrResult<V>
    where
        F: FnOnce() -> SnrResult<V>,
    {
        if let Some(v) = self.entries.borrow().get(&key) {
            return Ok(v.clone());
        }
        let value = compute()?;
        self.entries.borrow_mut().insert(key, value.clone());
        Ok(value)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snr_types::error::SnrError;
    use std::cell::Cell;

    #[test]
    fn test_hit_skips_compute() {
        let cache: MemoCache<u64, f64> = MemoCache::new();
        let calls = Cell::new(0);
        for _ in 0..3 {
            let v = cache
                .get_or_try_insert_with(f64_key(0.5), || {
                    calls.set(calls.get() + 1);
                    Ok(0.25)
                })
                .unwrap();
            assert_eq!(v, 0.25);
        }
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_errors_not_cached() {
        let cache: MemoCache<u64, f64> = MemoCache::new();
        assert!(cache
            .get_or_try_insert_with(1, || Err(SnrError::IntegrationFailed("x".into())))
            .is_err());
        assert!(cache.is_empty());
        assert_eq!(cache.get_or_try_insert_with(1, || Ok(2.0)).unwrap(), 2.0);
    }

    #[test]
    fn test_reentrant_compute() {
        let cache: MemoCache<u64, f64> = MemoCache::new();
        let outer = cache
            .get_or_try_insert_with(2, || {
                let inner = cache.get_or_try_insert_with(1, || Ok(10.0))?;
                Ok(inner * 2.0)
            })
            .unwrap();
        assert_eq!(outer, 20.0);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_signed_zero_shares_key() {
        assert_eq!(f64_key(0.0), f64_key(-0.0));
        assert_ne!(f64_key(1.0), f64_key(-1.0));
    }

    #[test]
    fn test_clear() {
        let cache: MemoCache<(u64, u64), f64> = MemoCache::new();
        cache
            .get_or_try_insert_with((f64_key(0.1), f64_key(2.0)), || Ok(1.0))
            .unwrap();
        cache.clear();
        assert!(cache.is_empty());
    }
}
