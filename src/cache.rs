//! Caller-owned memoization of generator matrices and frozen maps
//!
//! Generator matrices depend only on the number of stages, and frozen maps from a deterministic
//! [`FrozenSetProvider`] depend only on the block length and number of information bits, so both
//! can be computed once and reused across calls. The caches here are plain values owned by the
//! caller; nothing is shared between threads or stored globally.
//!
//! # Examples
//!
//! ```
//! use polar::cache::FrozenMapCache;
//! use polar::BecConstruction;
//!
//! let mut cache = FrozenMapCache::new(BecConstruction::new(0.0)?);
//! let info_positions = cache.frozen_map(8, 4)?.info_positions();
//! assert_eq!(info_positions, [3, 5, 6, 7]);
//! assert_eq!(cache.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use log::debug;

use crate::{kernel, BitMatrix, Error, FrozenMap, FrozenSetProvider};

/// Cache of generator matrices, keyed by number of stages
#[derive(Clone, Debug, Default)]
pub struct GeneratorCache {
    /// Generator matrix for each number of stages computed so far
    matrices: HashMap<usize, BitMatrix>,
}

impl GeneratorCache {
    /// Returns empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns generator matrix for given number of stages, computing it on first use.
    pub fn generator_matrix(&mut self, num_stages: usize) -> &BitMatrix {
        self.matrices.entry(num_stages).or_insert_with(|| {
            debug!("Computing generator matrix for {num_stages} stages");
            kernel::generator_matrix(num_stages)
        })
    }

    /// Returns number of cached matrices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    /// Returns `true` if no matrix has been cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }
}

/// Cache of frozen maps from a given provider, keyed by block length and number of information
/// bits
#[derive(Clone, Debug)]
pub struct FrozenMapCache<P: FrozenSetProvider> {
    /// Source of frozen maps
    provider: P,
    /// Frozen map for each `(block_length, num_info_bits)` pair requested so far
    frozen_maps: HashMap<(usize, usize), FrozenMap>,
}

impl<P: FrozenSetProvider> FrozenMapCache<P> {
    /// Returns empty cache for given provider.
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            frozen_maps: HashMap::new(),
        }
    }

    /// Returns provider.
    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Returns frozen map for given block length and number of information bits, asking the
    /// provider on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails. Failures are not cached.
    pub fn frozen_map(
        &mut self,
        block_length: usize,
        num_info_bits: usize,
    ) -> Result<&FrozenMap, Error> {
        match self.frozen_maps.entry((block_length, num_info_bits)) {
            Entry::Occupied(entry) => {
                debug!("Frozen map cache hit for ({block_length}, {num_info_bits})");
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                debug!("Frozen map cache miss for ({block_length}, {num_info_bits})");
                let frozen_map = self.provider.frozen_map(block_length, num_info_bits)?;
                Ok(entry.insert(frozen_map))
            }
        }
    }

    /// Returns number of cached frozen maps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frozen_maps.len()
    }

    /// Returns `true` if no frozen map has been cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frozen_maps.is_empty()
    }
}

#[cfg(test)]
mod tests_of_generator_cache {
    use super::*;

    #[test]
    fn test_generator_matrix() {
        let mut cache = GeneratorCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.generator_matrix(3), &kernel::generator_matrix(3));
        assert_eq!(cache.generator_matrix(0), &BitMatrix::identity(1));
        assert_eq!(cache.generator_matrix(3).num_rows(), 8);
        assert_eq!(cache.len(), 2);
    }
}

#[cfg(test)]
mod tests_of_frozen_map_cache {
    use std::cell::Cell;

    use super::*;
    use crate::BecConstruction;

    /// Provider that counts how often it is asked for a frozen map
    struct CountingProvider {
        inner: BecConstruction,
        num_calls: Cell<usize>,
    }

    impl FrozenSetProvider for CountingProvider {
        fn frozen_map(
            &self,
            block_length: usize,
            num_info_bits: usize,
        ) -> Result<FrozenMap, Error> {
            self.num_calls.set(self.num_calls.get() + 1);
            self.inner.frozen_map(block_length, num_info_bits)
        }
    }

    #[test]
    fn test_frozen_map() {
        let mut cache = FrozenMapCache::new(CountingProvider {
            inner: BecConstruction::new(0.0).unwrap(),
            num_calls: Cell::new(0),
        });
        // Invalid input
        assert!(cache.frozen_map(12, 6).is_err());
        assert!(cache.frozen_map(8, 9).is_err());
        assert!(cache.is_empty());
        // Valid input
        let expected = BecConstruction::new(0.0).unwrap().frozen_map(16, 8).unwrap();
        assert_eq!(cache.frozen_map(16, 8).unwrap(), &expected);
        assert_eq!(cache.frozen_map(16, 8).unwrap(), &expected);
        assert_eq!(cache.provider().num_calls.get(), 3);
        assert_eq!(cache.frozen_map(16, 4).unwrap().num_info_bits(), 4);
        assert_eq!(cache.provider().num_calls.get(), 4);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_fixed_frozen_map_provider() {
        let frozen_map = FrozenMap::from_frozen_positions(8, &[0, 2, 4]).unwrap();
        let mut cache = FrozenMapCache::new(frozen_map.clone());
        assert!(cache.frozen_map(8, 4).is_err());
        assert_eq!(cache.frozen_map(8, 5).unwrap(), &frozen_map);
    }
}
