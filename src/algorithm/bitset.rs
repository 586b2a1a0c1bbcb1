use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset of palette indexes compatible with a cell
///
/// Indexes are 0-based positions in the palette. Provides O(1) membership
/// testing; the entropy of a cell is the number of set bits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariantSet {
    bits: BitVec,
}

impl VariantSet {
    /// Create a set with no variants present
    pub fn new(palette_len: usize) -> Self {
        Self {
            bits: bitvec![0; palette_len],
        }
    }

    /// Create a set containing the whole palette
    pub fn all(palette_len: usize) -> Self {
        Self {
            bits: bitvec![1; palette_len],
        }
    }

    /// Palette size this set was built for
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Insert a palette index; out-of-range indexes are ignored
    pub fn insert(&mut self, index: usize) {
        if index < self.bits.len() {
            self.bits.set(index, true);
        }
    }

    /// Test palette index membership
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).as_deref() == Some(&true)
    }

    /// Remove every index
    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    /// Test if no variants are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count variants in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Palette indexes in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> {
        self.bits.iter_ones()
    }

    /// The n-th palette index in ascending order
    pub fn nth(&self, n: usize) -> Option<usize> {
        self.bits.iter_ones().nth(n)
    }

    /// Extract all palette indexes as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }

    /// Build a set from explicit palette indexes
    pub fn from_indices(indices: &[usize], palette_len: usize) -> Self {
        let mut set = Self::new(palette_len);
        for &index in indices {
            set.insert(index);
        }
        set
    }
}

impl fmt::Display for VariantSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VariantSet({} variants: {:?})",
            self.count(),
            self.to_vec()
        )
    }
}
