// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A path-keyed cache guaranteeing at most one load per asset.

use std::collections::HashMap;
use std::fmt::Display;
use std::sync::{Arc, Mutex, OnceLock};

type Slot<T> = Arc<OnceLock<Option<Arc<T>>>>;

/// A thread-safe cache mapping an asset key (usually its path) to the loaded value.
///
/// The key lookup and slot insertion happen under one lock, and the load itself
/// runs outside of it through a per-key [`OnceLock`]. Two threads asking for the
/// same key therefore share one load, while loads of distinct keys run in
/// parallel. Failures are cached as well: a key that failed once is not retried.
pub struct ResourceCache<T> {
    slots: Mutex<HashMap<String, Slot<T>>>,
}

impl<T> ResourceCache<T> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }

    fn slot(&self, key: &str) -> Slot<T> {
        let mut slots = match self.slots.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        slots.entry(key.to_owned()).or_default().clone()
    }

    /// Returns the cached value for `key`, running `load` if this is the first request.
    ///
    /// A failed load is logged once as a warning and yields `None` for every
    /// later request of the same key.
    pub fn get_or_load<E, F>(&self, key: &str, load: F) -> Option<Arc<T>>
    where
        E: Display,
        F: FnOnce(&str) -> Result<T, E>,
    {
        let slot = self.slot(key);
        slot.get_or_init(|| match load(key) {
            Ok(value) => {
                log::debug!("Loaded resource '{key}'");
                Some(Arc::new(value))
            }
            Err(e) => {
                log::warn!("Failed to load resource '{key}': {e}");
                None
            }
        })
        .clone()
    }

    /// Returns the value for `key` if it was loaded successfully.
    pub fn get(&self, key: &str) -> Option<Arc<T>> {
        let slots = match self.slots.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        slots.get(key).and_then(|slot| slot.get().cloned().flatten())
    }

    /// Number of keys requested so far, including failed ones.
    pub fn len(&self) -> usize {
        match self.slots.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    /// Returns `true` if nothing was requested yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for ResourceCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for ResourceCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceCache")
            .field("entries", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_same_key_loads_once() {
        let cache = ResourceCache::<String>::new();
        let loads = AtomicUsize::new(0);
        let load = |key: &str| -> Result<String, String> {
            loads.fetch_add(1, Ordering::SeqCst);
            Ok(key.to_uppercase())
        };

        let a = cache.get_or_load("mesh.obj", load).unwrap();
        let b = cache.get_or_load("mesh.obj", load).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(*a, "MESH.OBJ");
        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_failed_load_is_cached() {
        let cache = ResourceCache::<u32>::new();
        let loads = AtomicUsize::new(0);
        let load = |_: &str| -> Result<u32, &str> {
            loads.fetch_add(1, Ordering::SeqCst);
            Err("corrupt")
        };
        assert!(cache.get_or_load("bad.png", load).is_none());
        assert!(cache.get_or_load("bad.png", load).is_none());
        assert!(cache.get("bad.png").is_none());
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concurrent_requests_share_one_load() {
        let cache = ResourceCache::<usize>::new();
        let loads = AtomicUsize::new(0);

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    let value = cache.get_or_load("shared.png", |_| -> Result<usize, String> {
                        std::thread::sleep(std::time::Duration::from_millis(5));
                        Ok(loads.fetch_add(1, Ordering::SeqCst))
                    });
                    assert_eq!(value.as_deref(), Some(&0));
                });
            }
        });

        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }
}
