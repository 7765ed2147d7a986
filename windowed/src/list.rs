use core::cmp;
use core::mem;

use crate::cache::{OffsetCache, SizeCache};
use crate::frame;
use crate::options::WindowedOptions;
use crate::types::{Bounds, RenderedItems, SizingType, Window};

/// The windowing engine.
///
/// Tracks where the viewport sits in the logical item space and computes the
/// contiguous window of indices that must be materialized to cover it plus
/// the configured threshold. The engine is headless: scroll offsets and
/// viewport sizes are pushed in by the host layer, and rendered geometry is
/// read back through [`RenderedItems`].
///
/// One instance owns one window, one measurement cache, and one offset
/// cache; none of them are shared across instances.
#[derive(Debug)]
pub struct WindowedList {
    options: WindowedOptions,
    window: Window,
    sizes: SizeCache,
    offsets: OffsetCache,
}

impl WindowedList {
    /// Creates an engine with the initial window derived from
    /// `initial_index` (one normalization pass over an empty window, the
    /// same path a fresh mount takes).
    pub fn new(options: WindowedOptions) -> Self {
        let initial_from = options.initial_index.unwrap_or(0);
        let (from, size) = frame::from_and_size(initial_from, 0, 1, &options);
        wdebug!(
            length = options.length,
            from,
            size,
            "WindowedList::new"
        );
        Self {
            window: Window {
                from,
                size,
                item_size: None,
                items_per_row: 1,
            },
            sizes: SizeCache::new(),
            offsets: OffsetCache::new(),
            options,
        }
    }

    pub fn options(&self) -> &WindowedOptions {
        &self.options
    }

    pub fn window(&self) -> Window {
        self.window
    }

    /// Replaces the options and reclamps the current window through the
    /// shared normalization. Returns `true` when the window changed.
    pub fn set_options(&mut self, options: WindowedOptions) -> bool {
        let sizing_changed = self.options.sizing != options.sizing;
        let shrunk = options.length < self.options.length;
        self.options = options;
        wtrace!(
            length = self.options.length,
            sizing_changed,
            "WindowedList::set_options"
        );

        let mut window = self.window;
        if sizing_changed {
            // A different policy re-derives row geometry from scratch, and
            // measurements taken under the old policy no longer apply.
            self.sizes.clear();
            self.offsets.clear();
            window.item_size = None;
            window.items_per_row = 1;
        } else if shrunk {
            self.offsets.invalidate_from(self.options.length);
        }

        let (from, size) = frame::from_and_size(
            window.from,
            window.size,
            window.items_per_row,
            &self.options,
        );
        self.apply(Window { from, size, ..window })
    }

    /// The no-op gate: every policy result funnels through here. Equal
    /// windows leave the state untouched and report no change, which is
    /// what lets the reconciliation loop detect convergence.
    pub(crate) fn apply(&mut self, next: Window) -> bool {
        if self.window == next {
            return false;
        }
        if next.item_size != self.window.item_size
            || next.items_per_row != self.window.items_per_row
        {
            // Cumulative offsets computed under the old row geometry no
            // longer hold.
            self.offsets.clear();
        }
        wtrace!(from = next.from, size = next.size, "window updated");
        self.window = next;
        true
    }

    /// Resolves the size of one item. Resolution order, first hit wins:
    /// the measured uniform size, the caller's getter, the measurement
    /// cache, a live probe of the rendered output (Simple sizing only, and
    /// only inside the current window), the caller's estimator. `None`
    /// means the size cannot be determined yet.
    pub fn size_of_item(&self, rendered: Option<&dyn RenderedItems>, index: usize) -> Option<u32> {
        if let Some(item_size) = self.window.item_size {
            if item_size > 0 {
                return Some(item_size);
            }
        }

        if let Some(getter) = &self.options.item_size_getter {
            return Some(getter(index));
        }

        if let Some(size) = self.sizes.get(index) {
            return Some(size);
        }

        if let Some(rendered) = rendered {
            if self.options.sizing == SizingType::Simple
                && index >= self.window.from
                && index < self.window.end()
            {
                if let Some(extent) = rendered.extent(index - self.window.from) {
                    return Some(extent.size);
                }
            }
        }

        if let Some(estimator) = &self.options.item_size_estimator {
            return Some(estimator(index, &self.sizes));
        }

        None
    }

    /// Cumulative space before `index`, using the persistent offset cache.
    /// `index == length` is a valid query and yields the total occupied
    /// space. The result is provisional when a size lookup came back
    /// unknown mid-accumulation.
    pub fn space_before(&mut self, rendered: Option<&dyn RenderedItems>, index: usize) -> u64 {
        let mut offsets = mem::take(&mut self.offsets);
        let space = self.space_before_with(&mut offsets, rendered, index);
        self.offsets = offsets;
        space
    }

    /// Like [`Self::space_before`] but accumulating into a caller-provided
    /// cache, so transient lookups (e.g. a per-call range scan) don't bleed
    /// into the persistent one.
    pub fn space_before_with(
        &self,
        cache: &mut OffsetCache,
        rendered: Option<&dyn RenderedItems>,
        index: usize,
    ) -> u64 {
        if let Some(item_size) = self.window.item_size {
            if item_size > 0 {
                return (index / self.window.items_per_row.max(1)) as u64 * item_size as u64;
            }
        }

        if let Some(space) = cache.get(index) {
            return space;
        }

        let space =
            frame::calculated_space_before(cache, index, |i| self.size_of_item(rendered, i));
        cache.insert(index, space);
        space
    }

    /// The pixel bounds the window must cover: scroll position extended by
    /// the threshold on both ends, with the end clamped to total occupied
    /// space when sizes are determinate.
    pub fn start_and_end(
        &mut self,
        rendered: Option<&dyn RenderedItems>,
        scroll_offset: u64,
        viewport_size: u32,
        threshold: Option<u32>,
    ) -> Bounds {
        let mut offsets = mem::take(&mut self.offsets);
        let bounds =
            self.start_and_end_with(&mut offsets, rendered, scroll_offset, viewport_size, threshold);
        self.offsets = offsets;
        bounds
    }

    fn start_and_end_with(
        &self,
        cache: &mut OffsetCache,
        rendered: Option<&dyn RenderedItems>,
        scroll_offset: u64,
        viewport_size: u32,
        threshold: Option<u32>,
    ) -> Bounds {
        let threshold = threshold.unwrap_or(self.options.threshold) as u64;
        let start = scroll_offset.saturating_sub(threshold);
        let mut end = scroll_offset
            .saturating_add(viewport_size as u64)
            .saturating_add(threshold);
        if self.options.has_determinate_size() {
            end = cmp::min(
                end,
                self.space_before_with(cache, rendered, self.options.length),
            );
        }
        Bounds { start, end }
    }

    /// Runs one frame-size policy pass for the configured sizing type.
    /// Returns `true` when the window changed (the no-op gate reported a
    /// difference).
    pub fn update_frame(
        &mut self,
        rendered: Option<&dyn RenderedItems>,
        scroll_offset: u64,
        viewport_size: u32,
    ) -> bool {
        match self.options.sizing {
            SizingType::Simple => self.update_simple_frame(rendered, scroll_offset, viewport_size),
            SizingType::Uniform => {
                self.update_uniform_frame(rendered, scroll_offset, viewport_size)
            }
            SizingType::Variable => {
                self.update_variable_frame(rendered, scroll_offset, viewport_size)
            }
        }
    }

    /// Grow-only policy: while the measured end of the rendered run has not
    /// passed the covered bounds, extend by one page. `from` stays pinned
    /// at 0.
    fn update_simple_frame(
        &mut self,
        rendered: Option<&dyn RenderedItems>,
        scroll_offset: u64,
        viewport_size: u32,
    ) -> bool {
        let Some(rendered) = rendered else {
            return false;
        };
        let bounds = self.start_and_end(Some(rendered), scroll_offset, viewport_size, None);
        if frame::element_end(rendered) > bounds.end {
            return false;
        }

        let size = cmp::min(
            self.window.size + self.options.page_size,
            self.options.length,
        );
        self.apply(Window {
            size,
            ..self.window
        })
    }

    /// Arithmetic policy: derive `(item_size, items_per_row)` from the
    /// first rendered row (unless a static size is pinned), then place the
    /// window by division. Defers without any state change while the row
    /// geometry is unresolved.
    fn update_uniform_frame(
        &mut self,
        rendered: Option<&dyn RenderedItems>,
        scroll_offset: u64,
        viewport_size: u32,
    ) -> bool {
        let measured = if self.options.use_static_size && self.window.item_size.is_some() {
            self.window.item_size.map(|s| (s, self.window.items_per_row))
        } else {
            rendered.and_then(|r| frame::item_size_and_items_per_row(r, self.window.item_size))
        };
        let Some((item_size, items_per_row)) = measured else {
            return false;
        };

        let bounds = self.start_and_end(rendered, scroll_offset, viewport_size, None);
        let from = (bounds.start / item_size as u64) as usize * items_per_row;
        let size = (bounds.span().div_ceil(item_size as u64) as usize + 1) * items_per_row;
        let (from, size) = frame::from_and_size(from, size, items_per_row, &self.options);

        self.apply(Window {
            from,
            size,
            item_size: Some(item_size),
            items_per_row,
        })
    }

    /// Measured policy: refresh the cache from the rendered run (when no
    /// getter declares sizes), then scan forward accumulating sizes to
    /// place the window against the covered bounds.
    fn update_variable_frame(
        &mut self,
        rendered: Option<&dyn RenderedItems>,
        scroll_offset: u64,
        viewport_size: u32,
    ) -> bool {
        let Some(rendered) = rendered else {
            return false;
        };
        if self.options.item_size_getter.is_none() {
            self.read_back_sizes(rendered);
        }

        let bounds = self.start_and_end(Some(rendered), scroll_offset, viewport_size, None);
        let current = (self.window.from, self.window.size);
        let (from, size) = frame::from_and_size_from_item_sizes(
            bounds,
            self.options.length,
            self.options.page_size,
            |i| self.size_of_item(Some(rendered), i),
            current,
        );

        self.apply(Window {
            from,
            size,
            ..self.window
        })
    }

    /// Writes the rendered run's measured sizes into the cache and drops
    /// cumulative offsets invalidated by any size that actually changed.
    fn read_back_sizes(&mut self, rendered: &dyn RenderedItems) {
        let from = self.window.from;
        let mut stale: Option<usize> = None;

        for slot in 0..rendered.len() {
            let Some(extent) = rendered.extent(slot) else {
                continue;
            };
            let index = from + slot;
            if self.sizes.insert(index, extent.size) {
                stale = Some(stale.map_or(index, |s| cmp::min(s, index)));
            }
        }

        if let Some(index) = stale {
            wtrace!(index, "measurements changed, invalidating offsets");
            self.offsets.invalidate_from(index);
        }
    }

    /// First and last item indices whose spans intersect the bare viewport
    /// (threshold ignored). Scans only the current window with a scratch
    /// offset cache. `None` until some rendered item intersects.
    pub fn visible_range(
        &self,
        rendered: Option<&dyn RenderedItems>,
        scroll_offset: u64,
        viewport_size: u32,
    ) -> Option<(usize, usize)> {
        let mut scratch = OffsetCache::new();
        let bounds =
            self.start_and_end_with(&mut scratch, rendered, scroll_offset, viewport_size, Some(0));

        let mut first = None;
        let mut last = None;

        for index in self.window.from..self.window.end() {
            let item_start = self.space_before_with(&mut scratch, rendered, index);
            if first.is_none() {
                if let Some(item_size) = self.size_of_item(rendered, index) {
                    if item_start + item_size as u64 > bounds.start {
                        first = Some(index);
                    }
                }
            } else if item_start < bounds.end {
                last = Some(index);
            }
        }

        first.map(|first| (first, last.unwrap_or(first)))
    }

    /// Scroll offset that places `index` (or the configured initial index)
    /// at the start of the viewport. `None` when no target resolves.
    pub fn scroll_to_offset(
        &mut self,
        rendered: Option<&dyn RenderedItems>,
        index: Option<usize>,
    ) -> Option<u64> {
        let target = index.or(self.options.initial_index)?;
        Some(self.space_before(rendered, target))
    }

    /// Minimal scroll movement that brings `index` into view: the nearer of
    /// the item's start and its end-minus-viewport, or `None` when the item
    /// is already within view (or its size is unknown).
    pub fn scroll_around_offset(
        &mut self,
        rendered: Option<&dyn RenderedItems>,
        index: usize,
        scroll_offset: u64,
        viewport_size: u32,
    ) -> Option<u64> {
        let bottom = self.space_before(rendered, index);
        let item_size = self.size_of_item(rendered, index)? as u64;
        let top = bottom
            .saturating_add(item_size)
            .saturating_sub(viewport_size as u64);

        let min = cmp::min(top, bottom);
        if scroll_offset <= min {
            return Some(min);
        }
        let max = cmp::max(top, bottom);
        if scroll_offset > max {
            return Some(max);
        }
        None
    }

    /// Total occupied space of the collection, rounded up to whole rows
    /// when the uniform size is known. Provisional while sizes are still
    /// unknown.
    pub fn total_space(&mut self, rendered: Option<&dyn RenderedItems>) -> u64 {
        let items_per_row = self.window.items_per_row.max(1);
        match self.window.item_size {
            Some(item_size) => {
                self.options.length.div_ceil(items_per_row) as u64 * item_size as u64
            }
            None => self.space_before(rendered, self.options.length),
        }
    }

    /// Drops all measured sizes and cumulative offsets.
    pub fn reset_measurements(&mut self) {
        self.sizes.clear();
        self.offsets.clear();
    }

    /// Number of per-index measured sizes currently cached.
    pub fn measurement_cache_len(&self) -> usize {
        self.sizes.len()
    }

    /// Number of cumulative offsets currently cached.
    pub fn offset_cache_len(&self) -> usize {
        self.offsets.len()
    }
}
