//! A headless windowed-list engine.
//!
//! For the host-side orchestration (scroll-parent resolution, reconciliation
//! scheduling, render plans), see the `windowed-renderer` crate.
//!
//! Given a very large ordered collection, this crate computes the contiguous
//! window of item indices that must be materialized to cover a scrollable
//! viewport plus a pixel threshold, and keeps that window converging against
//! live measurements. Rendering cost is bounded by viewport size, not
//! collection size.
//!
//! It is UI-agnostic. A host layer is expected to provide:
//! - the current scroll offset and viewport size
//! - measured geometry for the currently rendered elements (via
//!   [`RenderedItems`])
//! - per-item size callbacks when the collection declares its own sizes
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod cache;
mod frame;
mod list;
mod options;
mod types;

#[cfg(test)]
mod tests;

pub use cache::{OffsetCache, SizeCache};
pub use list::WindowedList;
pub use options::{ItemSizeEstimator, ItemSizeGetter, WindowedOptions};
pub use types::{Axis, Bounds, Extent, RenderedItems, SizingType, Window};
