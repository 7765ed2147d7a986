use alloc::sync::Arc;

use crate::cache::SizeCache;
use crate::types::{Axis, SizingType};

/// Authoritative per-index size contract. When present it wins over cached
/// and live measurements for every index.
pub type ItemSizeGetter = Arc<dyn Fn(usize) -> u32 + Send + Sync>;

/// Heuristic per-index size, consulted only after every other source failed.
/// Receives the measurement cache so estimators can extrapolate from what
/// has already been observed.
pub type ItemSizeEstimator = Arc<dyn Fn(usize, &SizeCache) -> u32 + Send + Sync>;

/// Configuration for [`crate::WindowedList`].
///
/// Cheap to clone: the size callbacks are stored in `Arc`s so hosts can
/// tweak a few fields and call `set_options` without reallocating closures.
pub struct WindowedOptions {
    /// Scroll direction. Fixed for the life of an instance.
    pub axis: Axis,
    /// Total logical item count.
    pub length: usize,
    /// Item to scroll to on mount; also the fallback target for
    /// `scroll_to(None)`.
    pub initial_index: Option<usize>,
    /// Which frame-size policy runs each reconciliation pass.
    pub sizing: SizingType,
    /// Growth increment for Simple windows; fallback step for Variable
    /// windows when a size lookup comes back unknown mid-scan.
    pub page_size: usize,
    /// Floor on the computed window size.
    pub min_size: usize,
    /// Extra pixels rendered beyond both viewport edges to mask scroll
    /// pop-in.
    pub threshold: u32,
    /// With `sizing == Uniform`, start from a single row instead of a full
    /// page.
    pub is_lazy: bool,
    /// Skip re-measuring the uniform item size once it is known.
    pub use_static_size: bool,
    /// Position the rendered run with offsets instead of a transform.
    pub use_position: bool,
    /// Use a 3d transform when `use_position` is off.
    pub use_translate_3d: bool,
    /// Freezes reconciliation while set; un-hiding behaves like a fresh
    /// mount.
    pub is_hidden: bool,
    /// Milliseconds to debounce post-commit reconciliation; `None` means
    /// next-frame cadence.
    pub debounce_reconciler: Option<u64>,
    /// Ceiling on commit-driven reconciliation passes within one frame
    /// tick before the instance is declared unstable.
    pub max_sync_updates: usize,
    pub item_size_getter: Option<ItemSizeGetter>,
    pub item_size_estimator: Option<ItemSizeEstimator>,
}

impl WindowedOptions {
    pub fn new(length: usize) -> Self {
        Self {
            axis: Axis::Y,
            length,
            initial_index: None,
            sizing: SizingType::Simple,
            page_size: 10,
            min_size: 1,
            threshold: 100,
            is_lazy: false,
            use_static_size: false,
            use_position: false,
            use_translate_3d: false,
            is_hidden: false,
            debounce_reconciler: None,
            max_sync_updates: 100,
            item_size_getter: None,
            item_size_estimator: None,
        }
    }

    /// Whether total occupied space can be computed without rendering:
    /// either every item shares the uniform size or the caller declares
    /// sizes per index.
    pub fn has_determinate_size(&self) -> bool {
        self.sizing == SizingType::Uniform || self.item_size_getter.is_some()
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    pub fn with_initial_index(mut self, initial_index: Option<usize>) -> Self {
        self.initial_index = initial_index;
        self
    }

    pub fn with_sizing(mut self, sizing: SizingType) -> Self {
        self.sizing = sizing;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_min_size(mut self, min_size: usize) -> Self {
        self.min_size = min_size;
        self
    }

    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_is_lazy(mut self, is_lazy: bool) -> Self {
        self.is_lazy = is_lazy;
        self
    }

    pub fn with_use_static_size(mut self, use_static_size: bool) -> Self {
        self.use_static_size = use_static_size;
        self
    }

    pub fn with_use_position(mut self, use_position: bool) -> Self {
        self.use_position = use_position;
        self
    }

    pub fn with_use_translate_3d(mut self, use_translate_3d: bool) -> Self {
        self.use_translate_3d = use_translate_3d;
        self
    }

    pub fn with_is_hidden(mut self, is_hidden: bool) -> Self {
        self.is_hidden = is_hidden;
        self
    }

    pub fn with_debounce_reconciler(mut self, debounce_reconciler: Option<u64>) -> Self {
        self.debounce_reconciler = debounce_reconciler;
        self
    }

    pub fn with_max_sync_updates(mut self, max_sync_updates: usize) -> Self {
        self.max_sync_updates = max_sync_updates;
        self
    }

    pub fn with_item_size_getter(
        mut self,
        item_size_getter: Option<impl Fn(usize) -> u32 + Send + Sync + 'static>,
    ) -> Self {
        self.item_size_getter = item_size_getter.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_item_size_estimator(
        mut self,
        item_size_estimator: Option<impl Fn(usize, &SizeCache) -> u32 + Send + Sync + 'static>,
    ) -> Self {
        self.item_size_estimator = item_size_estimator.map(|f| Arc::new(f) as _);
        self
    }
}

impl Clone for WindowedOptions {
    fn clone(&self) -> Self {
        Self {
            axis: self.axis,
            length: self.length,
            initial_index: self.initial_index,
            sizing: self.sizing,
            page_size: self.page_size,
            min_size: self.min_size,
            threshold: self.threshold,
            is_lazy: self.is_lazy,
            use_static_size: self.use_static_size,
            use_position: self.use_position,
            use_translate_3d: self.use_translate_3d,
            is_hidden: self.is_hidden,
            debounce_reconciler: self.debounce_reconciler,
            max_sync_updates: self.max_sync_updates,
            item_size_getter: self.item_size_getter.clone(),
            item_size_estimator: self.item_size_estimator.clone(),
        }
    }
}

impl core::fmt::Debug for WindowedOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowedOptions")
            .field("axis", &self.axis)
            .field("length", &self.length)
            .field("initial_index", &self.initial_index)
            .field("sizing", &self.sizing)
            .field("page_size", &self.page_size)
            .field("min_size", &self.min_size)
            .field("threshold", &self.threshold)
            .field("is_lazy", &self.is_lazy)
            .field("use_static_size", &self.use_static_size)
            .field("use_position", &self.use_position)
            .field("use_translate_3d", &self.use_translate_3d)
            .field("is_hidden", &self.is_hidden)
            .field("debounce_reconciler", &self.debounce_reconciler)
            .field("max_sync_updates", &self.max_sync_updates)
            .finish_non_exhaustive()
    }
}
