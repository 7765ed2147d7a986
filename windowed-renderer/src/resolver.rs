use alloc::sync::Arc;

use windowed::Axis;

use crate::host::{Host, ScrollParent};

/// Caller override for scroll-parent resolution. When present it is
/// deferred to unconditionally.
pub type ScrollParentGetter<H> =
    Arc<dyn Fn(&H) -> ScrollParent<<H as Host>::Node> + Send + Sync>;

/// Finds the scrollable surface for the configured axis: the caller
/// override when present, else the nearest ancestor whose overflow is one
/// of auto/scroll/overlay, else the top-level viewport. Never fails.
pub fn resolve_scroll_parent<H: Host>(
    host: &H,
    container: H::Node,
    axis: Axis,
    getter: Option<&ScrollParentGetter<H>>,
) -> ScrollParent<H::Node> {
    if let Some(getter) = getter {
        return getter(host);
    }

    let mut node = container;
    while let Some(parent) = host.parent(node) {
        if host.overflow(parent, axis).is_scrollable() {
            return ScrollParent::Element(parent);
        }
        node = parent;
    }

    ScrollParent::Viewport
}
