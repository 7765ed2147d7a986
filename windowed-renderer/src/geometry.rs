use windowed::Axis;

use crate::host::{Host, ScrollParent};

fn surface_offset<H: Host>(host: &H, surface: ScrollParent<H::Node>, axis: Axis) -> u64 {
    match surface {
        ScrollParent::Viewport => 0,
        ScrollParent::Element(node) => host.offset(node, axis),
    }
}

/// The scroll surface's position translated into list space: how far the
/// viewport has moved past the start of the outer container.
///
/// The raw position is clamped into `[0, scroll_size - viewport_size]`
/// before translating, so overscrolled surfaces read as their resting
/// bounds. A list sitting below the surface's own top reads as 0 until it
/// is reached.
pub fn scroll_offset<H: Host>(
    host: &H,
    surface: ScrollParent<H::Node>,
    container: H::Node,
    axis: Axis,
) -> u64 {
    let raw = host.scroll_position(surface, axis);
    let max = host
        .scroll_size(surface, axis)
        .saturating_sub(host.viewport_size(surface, axis) as u64);
    let clamped = raw.min(max);

    surface_offset(host, surface, axis)
        .saturating_add(clamped)
        .saturating_sub(host.offset(container, axis))
}

/// Sets the scroll surface's position so the viewport lands `offset_in_list`
/// past the start of the outer container.
pub fn set_scroll<H: Host>(
    host: &mut H,
    surface: ScrollParent<H::Node>,
    container: H::Node,
    axis: Axis,
    offset_in_list: u64,
) {
    let absolute = offset_in_list.saturating_add(host.offset(container, axis));
    let position = match surface {
        ScrollParent::Viewport => absolute,
        ScrollParent::Element(node) => absolute.saturating_sub(host.offset(node, axis)),
    };
    host.set_scroll_position(surface, axis, position);
}
