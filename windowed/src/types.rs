/// The scroll direction a list instance operates on.
///
/// The core works in resolved scalar units; the host layer uses the axis to
/// pick which geometric keys (offsets, sizes, scroll positions) to read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::X)
    }
}

/// How item sizes are established.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SizingType {
    /// Sizes are read from the rendered output after the fact; the window
    /// grows from index 0 in fixed page increments until the viewport is
    /// covered.
    Simple,
    /// All items share one measured size and a fixed per-row count; the
    /// window is computed arithmetically from the viewport bounds.
    Uniform,
    /// Each item may have a distinct size, supplied by a caller getter or
    /// discovered by measuring rendered elements.
    Variable,
}

/// The contiguous index range `[from, from + size)` currently materialized
/// for rendering, plus the uniform-row geometry once it is known.
///
/// Invariants: `from + size <= length`; for [`SizingType::Simple`], `from`
/// is always 0. Field-wise equality is the reconciliation no-op gate: a
/// policy pass that proposes an equal window is a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    pub from: usize,
    pub size: usize,
    /// Measured uniform item size; populated only by the Uniform policy.
    pub item_size: Option<u32>,
    pub items_per_row: usize,
}

impl Window {
    pub fn end(&self) -> usize {
        self.from.saturating_add(self.size)
    }
}

impl Default for Window {
    fn default() -> Self {
        Self {
            from: 0,
            size: 0,
            item_size: None,
            items_per_row: 1,
        }
    }
}

/// The scroll-derived pixel window the frame policies must cover: viewport
/// position extended by the threshold on both ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub start: u64,
    pub end: u64,
}

impl Bounds {
    pub fn span(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }
}

/// Measured geometry of one rendered element along the configured axis,
/// relative to the start of the list container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extent {
    pub start: u64,
    pub size: u32,
}

impl Extent {
    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.size as u64)
    }
}

/// Read-back access to the host's currently rendered item elements.
///
/// Slot `i` is the element rendered for index `window.from + i`. Extents are
/// container-relative and already resolved to the instance's axis; a slot
/// that cannot be measured yet reports `None`.
pub trait RenderedItems {
    fn len(&self) -> usize;

    fn extent(&self, slot: usize) -> Option<Extent>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
