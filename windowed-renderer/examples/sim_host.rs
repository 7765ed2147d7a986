// Example: a tiny in-memory host driving the full reconciliation loop.
use windowed::{Axis, Extent, SizingType, WindowedOptions};
use windowed_renderer::{Host, Overflow, RenderPlan, Renderer, RendererOptions, ScrollParent};

/// One scrollable pane with the list container inside it. Committed items
/// are laid out as fixed 24px rows, the way a real toolkit would.
struct Pane {
    viewport: u32,
    scroll_position: u64,
    rendered: usize,
    commits: usize,
}

impl Host for Pane {
    type Node = u8;

    fn container(&self) -> Option<u8> {
        Some(0)
    }

    fn parent(&self, node: u8) -> Option<u8> {
        (node == 0).then_some(1)
    }

    fn overflow(&self, node: u8, _axis: Axis) -> Overflow {
        if node == 1 {
            Overflow::Auto
        } else {
            Overflow::Visible
        }
    }

    fn offset(&self, _node: u8, _axis: Axis) -> u64 {
        0
    }

    fn viewport_size(&self, _surface: ScrollParent<u8>, _axis: Axis) -> u32 {
        self.viewport
    }

    fn scroll_size(&self, _surface: ScrollParent<u8>, _axis: Axis) -> u64 {
        u64::MAX
    }

    fn scroll_position(&self, _surface: ScrollParent<u8>, _axis: Axis) -> u64 {
        self.scroll_position
    }

    fn set_scroll_position(&mut self, _surface: ScrollParent<u8>, _axis: Axis, position: u64) {
        self.scroll_position = position;
    }

    fn attach_scroll_listener(&mut self, surface: ScrollParent<u8>) {
        println!("scroll listener attached to {surface:?}");
    }

    fn detach_scroll_listener(&mut self, surface: ScrollParent<u8>) {
        println!("scroll listener detached from {surface:?}");
    }

    fn attach_wheel_listener(&mut self, _surface: ScrollParent<u8>) {}

    fn detach_wheel_listener(&mut self, _surface: ScrollParent<u8>) {}

    fn rendered_len(&self) -> usize {
        self.rendered
    }

    fn rendered_extent(&self, slot: usize, _axis: Axis) -> Option<Extent> {
        (slot < self.rendered).then(|| Extent {
            start: slot as u64 * 24,
            size: 24,
        })
    }

    fn commit(&mut self, _container: u8, plan: &RenderPlan) {
        self.commits += 1;
        self.rendered = plan.size;
        println!(
            "commit #{}: items {}..{} (space {:?})",
            self.commits,
            plan.from,
            plan.from + plan.size,
            plan.space
        );
    }
}

fn main() {
    let mut host = Pane {
        viewport: 480,
        scroll_position: 0,
        rendered: 0,
        commits: 0,
    };

    // The getter lets the mount-time scroll target resolve before anything
    // has been measured; the uniform policy still measures rendered rows.
    let list = WindowedOptions::new(100_000)
        .with_sizing(SizingType::Uniform)
        .with_threshold(120)
        .with_initial_index(Some(5000))
        .with_item_size_getter(Some(|_| 24u32));
    let mut renderer = Renderer::new(RendererOptions::new(
        list,
        |_pane: &mut Pane, _index, _slot| 0u8,
        |_pane: &mut Pane, _items| 0u8,
    ));

    // Mount, then pump frame ticks, echoing each commit back the way a
    // host framework reports completed updates.
    renderer.on_attach(&mut host, 0);
    for now_ms in 1..10 {
        let commits = host.commits;
        renderer.on_frame(&mut host, now_ms);
        if host.commits > commits {
            renderer.on_commit_observed(now_ms);
        }
    }
    println!("settled on {:?}", renderer.window());
    println!("scroll offset {}", host.scroll_position);
    println!("visible range {:?}", renderer.visible_range(&host));

    // A user scroll comes in through the attached listener.
    host.scroll_position += 10_000;
    renderer.on_scroll(&mut host);
    println!("after scrolling: {:?}", renderer.window());
}
