//! Host-side orchestration for the `windowed` crate.
//!
//! The `windowed` crate is UI-agnostic and focuses on the core window math
//! and state. This crate drives it against a concrete element tree through
//! the [`Host`] trait:
//!
//! - Scroll-parent discovery and scroll/wheel listener lifecycle
//! - The reconciliation loop with its stability circuit breaker
//! - Next-frame or debounced reconcile scheduling
//! - Render plans (container sizing, window placement) and the imperative
//!   scroll API
//!
//! This crate is intentionally framework-agnostic: hosts implement a handful
//! of geometry and tree callbacks and forward their mount/commit/unmount
//! lifecycle into [`Renderer::on_attach`], [`Renderer::on_commit_observed`],
//! [`Renderer::on_frame`] and [`Renderer::on_detach`].
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod geometry;
mod host;
mod plan;
mod renderer;
mod resolver;
mod scheduler;


pub use geometry::{scroll_offset, set_scroll};
pub use host::{Host, HostRendered, Overflow, ScrollParent};
pub use plan::{Placement, RenderPlan};
pub use renderer::{
    ContainerRenderer, ItemRenderer, OnReconcile, Phase, Renderer, RendererOptions,
};
pub use resolver::{ScrollParentGetter, resolve_scroll_parent};
pub use scheduler::ReconcileSchedule;
