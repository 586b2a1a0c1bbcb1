use crate::algorithm::bitset::VariantSet;
use crate::spatial::tiles::{Palette, Signature};
use std::collections::HashMap;

/// Memoization cache for signature compatibility calculations
///
/// A signature has three states on each of four edges, so at most 81 distinct
/// filters are ever computed against a palette.
#[derive(Default)]
pub struct SignatureCache {
    /// Signature to compatible variants mapping
    signature_cache: HashMap<Signature, VariantSet>,

    /// Cache performance statistics
    pub stats: CacheStats,
}

/// Performance metrics for cache effectiveness
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
}

impl SignatureCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct signatures stored
    pub fn len(&self) -> usize {
        self.signature_cache.len()
    }

    /// Whether nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.signature_cache.is_empty()
    }

    /// Retrieve cached result or compute and store new one
    ///
    /// Uses the provided closure to compute compatible variants only when
    /// the signature is not already cached.
    pub fn get_or_compute<F>(&mut self, signature: Signature, compute_fn: F) -> &VariantSet
    where
        F: FnOnce() -> VariantSet,
    {
        use std::collections::hash_map::Entry;

        match self.signature_cache.entry(signature) {
            Entry::Occupied(entry) => {
                self.stats.hits += 1;
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                self.stats.misses += 1;
                entry.insert(compute_fn())
            }
        }
    }

    /// Compatible palette indexes for a signature, filtering the palette on a miss
    pub fn compatible(&mut self, signature: Signature, palette: &Palette) -> &VariantSet {
        self.get_or_compute(signature, || palette.compatible(&signature))
    }
}
