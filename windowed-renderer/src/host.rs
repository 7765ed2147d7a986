use windowed::{Axis, Extent, RenderedItems};

use crate::plan::RenderPlan;

/// Computed overflow behavior of a host element on one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Overflow {
    Visible,
    Hidden,
    Auto,
    Scroll,
    Overlay,
}

impl Overflow {
    /// Whether an element with this overflow owns a scrollable surface.
    pub fn is_scrollable(self) -> bool {
        matches!(self, Self::Auto | Self::Scroll | Self::Overlay)
    }
}

/// The surface that actually scrolls for a list instance: either a concrete
/// ancestor element or the host's top-level viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollParent<N> {
    Viewport,
    Element(N),
}

/// Everything the renderer needs from its embedding: element-tree access,
/// geometry reads, scroll control, listener lifecycle, and a commit sink.
///
/// The trait is deliberately shaped so it can be implemented over a DOM, a
/// retained widget tree, or a terminal cell grid; `Node` is whatever handle
/// the host uses for elements.
pub trait Host {
    type Node: Copy + PartialEq + core::fmt::Debug;

    /// The mounted outer container, or `None` before mount / after unmount.
    fn container(&self) -> Option<Self::Node>;

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    fn overflow(&self, node: Self::Node, axis: Axis) -> Overflow;

    /// Accumulated offset of `node` from the coordinate origin along `axis`.
    fn offset(&self, node: Self::Node, axis: Axis) -> u64;

    fn viewport_size(&self, surface: ScrollParent<Self::Node>, axis: Axis) -> u32;

    fn scroll_size(&self, surface: ScrollParent<Self::Node>, axis: Axis) -> u64;

    fn scroll_position(&self, surface: ScrollParent<Self::Node>, axis: Axis) -> u64;

    fn set_scroll_position(&mut self, surface: ScrollParent<Self::Node>, axis: Axis, position: u64);

    fn attach_scroll_listener(&mut self, surface: ScrollParent<Self::Node>);

    fn detach_scroll_listener(&mut self, surface: ScrollParent<Self::Node>);

    fn attach_wheel_listener(&mut self, surface: ScrollParent<Self::Node>);

    fn detach_wheel_listener(&mut self, surface: ScrollParent<Self::Node>);

    /// Number of item elements currently committed under the list container.
    fn rendered_len(&self) -> usize;

    /// Extent of the committed item element in `slot`, relative to the list
    /// container, along `axis`. `None` when it cannot be measured yet.
    fn rendered_extent(&self, slot: usize, axis: Axis) -> Option<Extent>;

    /// Replaces the committed output with a freshly rendered container.
    /// After this returns, `rendered_len`/`rendered_extent` must reflect the
    /// new output.
    fn commit(&mut self, container: Self::Node, plan: &RenderPlan);
}

/// Adapts a [`Host`]'s committed output to the core's [`RenderedItems`]
/// measurement capability, with the axis already resolved.
pub struct HostRendered<'a, H: Host + ?Sized> {
    host: &'a H,
    axis: Axis,
}

impl<'a, H: Host + ?Sized> HostRendered<'a, H> {
    pub fn new(host: &'a H, axis: Axis) -> Self {
        Self { host, axis }
    }
}

impl<H: Host + ?Sized> RenderedItems for HostRendered<'_, H> {
    fn len(&self) -> usize {
        self.host.rendered_len()
    }

    fn extent(&self, slot: usize) -> Option<Extent> {
        self.host.rendered_extent(slot, self.axis)
    }
}
