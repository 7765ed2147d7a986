#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
type SparseMap<V> = HashMap<usize, V>;
#[cfg(not(feature = "std"))]
type SparseMap<V> = BTreeMap<usize, V>;

/// Sparse per-index store of measured item sizes.
///
/// Entries are written by the Variable read-back pass and survive across
/// reconciliation passes; they are the third stop in the size resolution
/// order, after a static uniform size and a caller-supplied getter.
#[derive(Clone, Debug, Default)]
pub struct SizeCache {
    sizes: SparseMap<u32>,
}

impl SizeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<u32> {
        self.sizes.get(&index).copied()
    }

    /// Records a measured size. Returns `true` when the entry changed,
    /// so callers know dependent cumulative offsets went stale.
    pub fn insert(&mut self, index: usize, size: u32) -> bool {
        self.sizes.insert(index, size) != Some(size)
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn clear(&mut self) {
        self.sizes.clear();
    }
}

/// Sparse per-index store of cumulative space-before values.
///
/// `offsets[i]` is the total size of all items preceding index `i` at the
/// time it was computed. Entries above an index whose size changed are
/// stale and must be dropped; entries at or below it stay valid because
/// space-before excludes the item itself.
#[derive(Clone, Debug, Default)]
pub struct OffsetCache {
    offsets: SparseMap<u64>,
}

impl OffsetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<u64> {
        self.offsets.get(&index).copied()
    }

    pub fn insert(&mut self, index: usize, space: u64) {
        self.offsets.insert(index, space);
    }

    /// Drops every entry strictly above `index`.
    pub fn invalidate_from(&mut self, index: usize) {
        self.offsets.retain(|&i, _| i <= index);
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn clear(&mut self) {
        self.offsets.clear();
    }
}
