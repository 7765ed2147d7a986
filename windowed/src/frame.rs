use core::cmp;

use crate::cache::OffsetCache;
use crate::options::WindowedOptions;
use crate::types::{Bounds, RenderedItems, SizingType};

/// Normalizes a proposed `(from, size)` pair: enforces the page/min-size
/// floor, snaps both values to row boundaries, and clamps the window into
/// `[0, length]`.
pub(crate) fn from_and_size(
    current_from: usize,
    current_size: usize,
    items_per_row: usize,
    options: &WindowedOptions,
) -> (usize, usize) {
    let items_per_row = items_per_row.max(1);
    let comparator = cmp::max(
        options.min_size,
        if options.is_lazy && options.sizing == SizingType::Uniform {
            1
        } else {
            options.page_size
        },
    );

    let mut size = cmp::max(current_size, comparator);
    let rem = size % items_per_row;
    if rem != 0 {
        size += items_per_row - rem;
    }
    if size > options.length {
        size = options.length;
    }

    let mut from = if current_from == 0 || options.sizing == SizingType::Simple {
        0
    } else {
        cmp::min(current_from, options.length - size)
    };
    let rem = from % items_per_row;
    if rem != 0 {
        from -= rem;
        size += rem;
    }

    (from, size)
}

/// Scans item sizes to find the window covering `bounds`.
///
/// `from` is the last index wholly before `bounds.start`; `size` extends
/// until the accumulated space reaches `bounds.end` or the collection is
/// exhausted. An unknown size ends the scan: during the leading scan it
/// fixes `from`, during the trailing scan it extends `size` by one page as
/// a provisional guess. When nothing contributed any measurable space the
/// prior window is returned unchanged.
pub(crate) fn from_and_size_from_item_sizes(
    bounds: Bounds,
    length: usize,
    page_size: usize,
    size_of: impl Fn(usize) -> Option<u32>,
    current: (usize, usize),
) -> (usize, usize) {
    if length == 0 {
        return current;
    }

    let max_from = length - 1;
    let mut space = 0u64;
    let mut from = 0usize;

    while from < max_from {
        match size_of(from) {
            Some(item_size) if space + item_size as u64 <= bounds.start => {
                space += item_size as u64;
                from += 1;
            }
            _ => {
                // Landing on index 1 would unmount and remount index 0 on
                // the next commit, which jitters; render from the top
                // instead.
                if from == 1 {
                    from = 0;
                }
                break;
            }
        }
    }

    let max_size = length - from;
    let mut size = 0usize;

    while size < max_size && space < bounds.end {
        match size_of(from + size) {
            None => {
                size = cmp::min(size + page_size, max_size);
                break;
            }
            Some(item_size) => {
                space += item_size as u64;
                size += 1;
            }
        }
    }

    if space > 0 { (from, size) } else { current }
}

/// Derives the uniform item size and per-row count from the first rendered
/// row. A re-measure that reads back the same size keeps the current value;
/// any real change wins. Unresolvable geometry (nothing rendered, zero
/// size) yields `None` and the caller defers the pass.
pub(crate) fn item_size_and_items_per_row(
    rendered: &dyn RenderedItems,
    current_item_size: Option<u32>,
) -> Option<(u32, usize)> {
    let first = rendered.extent(0)?;
    let item_size = match current_item_size {
        Some(current) if first.size == current => current,
        _ => first.size,
    };
    if item_size == 0 {
        return None;
    }

    let mut items_per_row = 1usize;
    while let Some(next) = rendered.extent(items_per_row) {
        if next.start != first.start {
            break;
        }
        items_per_row += 1;
    }

    Some((item_size, items_per_row))
}

/// Measured end of the rendered run: the last element's end offset relative
/// to the first element's start. Zero when nothing is rendered.
pub(crate) fn element_end(rendered: &dyn RenderedItems) -> u64 {
    if rendered.is_empty() {
        return 0;
    }
    match (rendered.extent(0), rendered.extent(rendered.len() - 1)) {
        (Some(first), Some(last)) => last.end().saturating_sub(first.start),
        _ => 0,
    }
}

/// Forward-fill computation of cumulative space before `target`.
///
/// Finds the nearest cached index at or below `target`, then accumulates
/// item sizes forward, writing each intermediate cumulative value into
/// `cache`. Stops at the first unknown size; the partial sum is returned
/// and must be treated as provisional.
pub(crate) fn calculated_space_before(
    cache: &mut OffsetCache,
    target: usize,
    size_of: impl Fn(usize) -> Option<u32>,
) -> u64 {
    let mut from = target;
    while from > 0 && cache.get(from).is_none() {
        from -= 1;
    }

    let mut space = cache.get(from).unwrap_or(0);
    for index in from..target {
        cache.insert(index, space);
        let Some(item_size) = size_of(index) else {
            break;
        };
        space += item_size as u64;
    }

    space
}
