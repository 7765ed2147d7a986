use alloc::sync::Arc;
use alloc::vec::Vec;

use windowed::{RenderedItems, SizingType, Window, WindowedList, WindowedOptions};

use crate::geometry;
use crate::host::{Host, HostRendered, ScrollParent};
use crate::plan::{self, RenderPlan};
use crate::resolver::{ScrollParentGetter, resolve_scroll_parent};
use crate::scheduler::ReconcileSchedule;

/// Produces the host element for one item: `(host, index, slot)` where
/// `slot` is the position inside the rendered run.
pub type ItemRenderer<H> =
    Arc<dyn Fn(&mut H, usize, usize) -> <H as Host>::Node + Send + Sync>;

/// Wraps the rendered items into the list container element.
pub type ContainerRenderer<H> =
    Arc<dyn Fn(&mut H, Vec<<H as Host>::Node>) -> <H as Host>::Node + Send + Sync>;

/// Completion callback fired after every reconciliation pass. The second
/// argument reports whether the window changed.
pub type OnReconcile = Arc<dyn Fn(Window, bool) + Send + Sync>;

/// Configuration for [`Renderer`]: the engine options plus the host
/// collaborators.
pub struct RendererOptions<H: Host> {
    pub list: WindowedOptions,
    pub item_renderer: ItemRenderer<H>,
    pub container_renderer: ContainerRenderer<H>,
    pub scroll_parent_getter: Option<ScrollParentGetter<H>>,
    pub on_reconcile: Option<OnReconcile>,
}

impl<H: Host> RendererOptions<H> {
    pub fn new(
        list: WindowedOptions,
        item_renderer: impl Fn(&mut H, usize, usize) -> H::Node + Send + Sync + 'static,
        container_renderer: impl Fn(&mut H, Vec<H::Node>) -> H::Node + Send + Sync + 'static,
    ) -> Self {
        Self {
            list,
            item_renderer: Arc::new(item_renderer),
            container_renderer: Arc::new(container_renderer),
            scroll_parent_getter: None,
            on_reconcile: None,
        }
    }

    pub fn with_list(mut self, list: WindowedOptions) -> Self {
        self.list = list;
        self
    }

    pub fn with_scroll_parent_getter(
        mut self,
        getter: Option<impl Fn(&H) -> ScrollParent<H::Node> + Send + Sync + 'static>,
    ) -> Self {
        self.scroll_parent_getter = getter.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_reconcile(
        mut self,
        on_reconcile: Option<impl Fn(Window, bool) + Send + Sync + 'static>,
    ) -> Self {
        self.on_reconcile = on_reconcile.map(|f| Arc::new(f) as _);
        self
    }
}

impl<H: Host> Clone for RendererOptions<H> {
    fn clone(&self) -> Self {
        Self {
            list: self.list.clone(),
            item_renderer: Arc::clone(&self.item_renderer),
            container_renderer: Arc::clone(&self.container_renderer),
            scroll_parent_getter: self.scroll_parent_getter.clone(),
            on_reconcile: self.on_reconcile.clone(),
        }
    }
}

impl<H: Host> core::fmt::Debug for RendererOptions<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RendererOptions")
            .field("list", &self.list)
            .finish_non_exhaustive()
    }
}

/// Where the reconciliation loop currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Idle,
    Scheduled,
    Reconciling,
    Unstable,
}

/// Drives a [`WindowedList`] against a [`Host`].
///
/// The host forwards its lifecycle: [`Renderer::on_attach`] on mount,
/// [`Renderer::on_commit_observed`] after each committed update,
/// [`Renderer::on_frame`] on every paint tick, [`Renderer::on_scroll`] from
/// the attached scroll listener, and [`Renderer::on_detach`] on unmount.
/// Each reconciliation pass re-resolves the scroll parent, runs the
/// engine's frame policy, re-renders when the window changed, and fires the
/// completion callback.
///
/// Commit-driven passes are counted against `max_sync_updates` per frame
/// tick; crossing the ceiling latches the instance unstable, emits a single
/// diagnostic, and suspends automatic reconciliation. The imperative API
/// and scroll events keep working while unstable.
pub struct Renderer<H: Host> {
    options: RendererOptions<H>,
    list: WindowedList,
    scroll_parent: Option<ScrollParent<H::Node>>,
    schedule: ReconcileSchedule,
    sync_updates: usize,
    unstable: bool,
    pending_mount: bool,
    attached: bool,
    disposed: bool,
    reconciling: bool,
}

impl<H: Host> Renderer<H> {
    pub fn new(options: RendererOptions<H>) -> Self {
        let schedule = ReconcileSchedule::new(options.list.debounce_reconciler);
        let list = WindowedList::new(options.list.clone());
        Self {
            list,
            scroll_parent: None,
            schedule,
            sync_updates: 0,
            unstable: false,
            pending_mount: false,
            attached: false,
            disposed: false,
            reconciling: false,
            options,
        }
    }

    pub fn list(&self) -> &WindowedList {
        &self.list
    }

    pub fn window(&self) -> Window {
        self.list.window()
    }

    pub fn scroll_parent(&self) -> Option<ScrollParent<H::Node>> {
        self.scroll_parent
    }

    pub fn phase(&self) -> Phase {
        if self.unstable {
            Phase::Unstable
        } else if self.reconciling {
            Phase::Reconciling
        } else if self.schedule.is_pending() {
            Phase::Scheduled
        } else {
            Phase::Idle
        }
    }

    pub fn is_unstable(&self) -> bool {
        self.unstable
    }

    /// Clears the unstable latch so automatic reconciliation resumes.
    pub fn reset_instability(&mut self) {
        self.unstable = false;
        self.sync_updates = 0;
    }

    /// Mount: render the initial window and queue the first reconciliation
    /// pass, which will also scroll to the configured initial index.
    pub fn on_attach(&mut self, host: &mut H, now_ms: u64) {
        if self.disposed {
            return;
        }
        wtrace!(now_ms, "on_attach");
        self.attached = true;
        self.pending_mount = true;
        self.render(host);
        if !self.options.list.is_hidden {
            self.schedule.request(now_ms);
        }
    }

    /// A committed update was observed by the host. Counts against the
    /// stability ceiling, then queues the next pass.
    pub fn on_commit_observed(&mut self, now_ms: u64) {
        if self.disposed || !self.attached || self.unstable {
            return;
        }
        if self.options.list.is_hidden {
            return;
        }

        self.sync_updates += 1;
        if self.sync_updates > self.options.list.max_sync_updates {
            self.unstable = true;
            wwarn!("windowed renderer failed to reach a stable state");
            return;
        }

        self.schedule.request(now_ms);
    }

    /// A paint tick. Resets the stability counter and runs a due pass.
    pub fn on_frame(&mut self, host: &mut H, now_ms: u64) {
        if self.disposed {
            return;
        }
        self.sync_updates = 0;
        if self.unstable || self.options.list.is_hidden {
            return;
        }
        if !self.schedule.take_due(now_ms) {
            return;
        }
        self.reconcile(host);
    }

    /// The attached scroll listener fired. Scroll-driven passes run even
    /// while the instance is flagged unstable.
    pub fn on_scroll(&mut self, host: &mut H) {
        if self.disposed || !self.attached || self.options.list.is_hidden {
            return;
        }
        self.reconcile(host);
    }

    /// Unmount: detach listeners and refuse any still-pending callbacks.
    pub fn on_detach(&mut self, host: &mut H) {
        if let Some(surface) = self.scroll_parent.take() {
            host.detach_scroll_listener(surface);
            host.detach_wheel_listener(surface);
        }
        self.attached = false;
        self.disposed = true;
    }

    /// Replaces the options. The window is reclamped immediately (and
    /// re-rendered when that changed it), the scheduling strategy is
    /// rebuilt when the debounce interval changed, and un-hiding queues a
    /// mount-equivalent pass.
    pub fn set_options(&mut self, host: &mut H, options: RendererOptions<H>, now_ms: u64) {
        if self.disposed {
            return;
        }
        let was_hidden = self.options.list.is_hidden;
        let prev_debounce = self.options.list.debounce_reconciler;
        let changed = self.list.set_options(options.list.clone());
        self.options = options;

        if self.options.list.debounce_reconciler != prev_debounce {
            self.schedule
                .replace(self.options.list.debounce_reconciler, now_ms);
        }
        if was_hidden && !self.options.list.is_hidden {
            self.pending_mount = true;
            self.schedule.request(now_ms);
        }
        if changed && self.attached {
            self.render(host);
        }
    }

    fn reconcile(&mut self, host: &mut H) {
        self.reconciling = true;
        wtrace!("reconcile");
        self.update_scroll_parent(host);

        if self.pending_mount {
            self.pending_mount = false;
            self.scroll_to_target(host, None);
        }

        let changed = match (host.container(), self.scroll_parent) {
            (Some(container), Some(surface)) => {
                let axis = self.options.list.axis;
                let scroll = geometry::scroll_offset(host, surface, container, axis);
                let viewport = host.viewport_size(surface, axis);
                let rendered = HostRendered::new(&*host, axis);
                self.list
                    .update_frame(Some(&rendered as &dyn RenderedItems), scroll, viewport)
            }
            _ => false,
        };

        if changed {
            self.render(host);
        }
        self.reconciling = false;

        if let Some(on_reconcile) = &self.options.on_reconcile {
            on_reconcile(self.list.window(), changed);
        }
    }

    fn update_scroll_parent(&mut self, host: &mut H) {
        let next = host.container().map(|container| {
            resolve_scroll_parent(
                host,
                container,
                self.options.list.axis,
                self.options.scroll_parent_getter.as_ref(),
            )
        });
        if next == self.scroll_parent {
            return;
        }

        if let Some(previous) = self.scroll_parent.take() {
            host.detach_scroll_listener(previous);
            host.detach_wheel_listener(previous);
        }
        self.scroll_parent = next;
        if let Some(surface) = self.scroll_parent {
            host.attach_scroll_listener(surface);
            // The wheel listener only normalizes scroll behavior across
            // surfaces.
            host.attach_wheel_listener(surface);
        }
    }

    /// What the host must render for the current window.
    pub fn render_plan(&mut self, host: &H) -> RenderPlan {
        let window = self.list.window();
        if self.options.list.sizing == SizingType::Simple {
            return RenderPlan {
                from: window.from,
                size: window.size,
                space: None,
                placement: None,
            };
        }

        let axis = self.options.list.axis;
        let (space, offset) = {
            let rendered = HostRendered::new(host, axis);
            let rendered = Some(&rendered as &dyn RenderedItems);
            (
                self.list.total_space(rendered),
                self.list.space_before(rendered, window.from),
            )
        };

        RenderPlan {
            from: window.from,
            size: window.size,
            space: Some(space),
            placement: Some(plan::placement(
                axis,
                offset,
                self.options.list.use_position,
                self.options.list.use_translate_3d,
            )),
        }
    }

    fn render(&mut self, host: &mut H) {
        let plan = self.render_plan(host);
        let window = self.list.window();

        let mut items = Vec::with_capacity(window.size);
        for slot in 0..window.size {
            items.push((self.options.item_renderer)(host, window.from + slot, slot));
        }
        let container = (self.options.container_renderer)(host, items);
        host.commit(container, &plan);
    }

    fn scroll_to_target(&mut self, host: &mut H, index: Option<usize>) {
        let (Some(container), Some(surface)) = (host.container(), self.scroll_parent) else {
            return;
        };
        let axis = self.options.list.axis;
        let offset = {
            let rendered = HostRendered::new(&*host, axis);
            self.list
                .scroll_to_offset(Some(&rendered as &dyn RenderedItems), index)
        };
        if let Some(offset) = offset {
            geometry::set_scroll(host, surface, container, axis, offset);
        }
    }

    /// Scrolls so the target index (or the configured initial index) sits
    /// at the viewport start. A no-op before mount or while the scroll
    /// parent is unresolved.
    pub fn scroll_to(&mut self, host: &mut H, index: Option<usize>) {
        if self.disposed {
            return;
        }
        self.scroll_to_target(host, index);
    }

    /// Scrolls the minimal distance that brings `index` into view; items
    /// already visible produce no scroll at all.
    pub fn scroll_around(&mut self, host: &mut H, index: usize) {
        if self.disposed {
            return;
        }
        let (Some(container), Some(surface)) = (host.container(), self.scroll_parent) else {
            return;
        };
        let axis = self.options.list.axis;
        let scroll = geometry::scroll_offset(host, surface, container, axis);
        let viewport = host.viewport_size(surface, axis);
        let target = {
            let rendered = HostRendered::new(&*host, axis);
            self.list.scroll_around_offset(
                Some(&rendered as &dyn RenderedItems),
                index,
                scroll,
                viewport,
            )
        };
        if let Some(target) = target {
            geometry::set_scroll(host, surface, container, axis, target);
        }
    }

    /// First and last indices currently intersecting the bare viewport.
    /// `None` before mount or while nothing is measurable.
    pub fn visible_range(&self, host: &H) -> Option<(usize, usize)> {
        let container = host.container()?;
        let surface = self.scroll_parent?;
        let axis = self.options.list.axis;
        let scroll = geometry::scroll_offset(host, surface, container, axis);
        let viewport = host.viewport_size(surface, axis);
        let rendered = HostRendered::new(host, axis);
        self.list
            .visible_range(Some(&rendered as &dyn RenderedItems), scroll, viewport)
    }
}

impl<H: Host> core::fmt::Debug for Renderer<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Renderer")
            .field("window", &self.list.window())
            .field("scroll_parent", &self.scroll_parent)
            .field("schedule", &self.schedule)
            .field("sync_updates", &self.sync_updates)
            .field("unstable", &self.unstable)
            .field("attached", &self.attached)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}
