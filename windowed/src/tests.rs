use crate::*;

use alloc::vec::Vec;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_range_u32(&mut self, start: u32, end_exclusive: u32) -> u32 {
        self.gen_range_u64(start as u64, end_exclusive as u64) as u32
    }
}

#[derive(Debug, Default)]
struct FakeRendered {
    extents: Vec<Extent>,
}

impl FakeRendered {
    fn empty() -> Self {
        Self::default()
    }

    fn uniform(count: usize, size: u32) -> Self {
        Self {
            extents: (0..count)
                .map(|i| Extent {
                    start: i as u64 * size as u64,
                    size,
                })
                .collect(),
        }
    }

    fn grid(rows: usize, cols: usize, size: u32) -> Self {
        let mut extents = Vec::new();
        for row in 0..rows {
            for _ in 0..cols {
                extents.push(Extent {
                    start: row as u64 * size as u64,
                    size,
                });
            }
        }
        Self { extents }
    }

    fn from_sizes(sizes: &[u32]) -> Self {
        let mut start = 0u64;
        let mut extents = Vec::with_capacity(sizes.len());
        for &size in sizes {
            extents.push(Extent { start, size });
            start += size as u64;
        }
        Self { extents }
    }
}

impl RenderedItems for FakeRendered {
    fn len(&self) -> usize {
        self.extents.len()
    }

    fn extent(&self, slot: usize) -> Option<Extent> {
        self.extents.get(slot).copied()
    }
}

fn view(rendered: &FakeRendered) -> Option<&dyn RenderedItems> {
    Some(rendered)
}

fn variable_options(length: usize) -> WindowedOptions {
    WindowedOptions::new(length)
        .with_sizing(SizingType::Variable)
        .with_threshold(0)
}

#[test]
fn initial_window_derives_from_initial_index() {
    let list = WindowedList::new(variable_options(100).with_initial_index(Some(30)));
    let w = list.window();
    assert_eq!((w.from, w.size), (30, 10));

    // Simple lists always render from the top.
    let list = WindowedList::new(
        WindowedOptions::new(100)
            .with_sizing(SizingType::Simple)
            .with_initial_index(Some(30)),
    );
    assert_eq!(list.window().from, 0);
}

#[test]
fn from_and_size_applies_floors_and_row_snapping() {
    // min_size floors the computed size.
    let opts = variable_options(100).with_min_size(3).with_page_size(0);
    assert_eq!(crate::frame::from_and_size(0, 0, 1, &opts), (0, 3));

    // Lazy uniform lists start from a single row.
    let opts = WindowedOptions::new(100)
        .with_sizing(SizingType::Uniform)
        .with_is_lazy(true);
    assert_eq!(crate::frame::from_and_size(0, 0, 1, &opts), (0, 1));

    // Both edges snap to row boundaries; the leading remainder folds into
    // the size so no covered row is lost.
    let opts = variable_options(100);
    assert_eq!(crate::frame::from_and_size(6, 10, 4, &opts), (4, 14));

    // Clamped into the collection.
    let opts = variable_options(5);
    assert_eq!(crate::frame::from_and_size(3, 100, 1, &opts), (0, 5));
}

#[test]
fn uniform_policy_converges_within_three_passes() {
    let mut list = WindowedList::new(
        WindowedOptions::new(1000)
            .with_sizing(SizingType::Uniform)
            .with_threshold(0),
    );
    let rendered = FakeRendered::uniform(10, 30);

    let mut passes = 0;
    while list.update_frame(view(&rendered), 0, 300) {
        passes += 1;
        assert!(passes <= 3, "uniform window failed to converge");
    }

    let w = list.window();
    assert_eq!((w.from, w.size), (0, 11));
    assert_eq!(w.item_size, Some(30));
    assert_eq!(w.items_per_row, 1);

    // Converged: further passes are no-ops.
    assert!(!list.update_frame(view(&rendered), 0, 300));
}

#[test]
fn uniform_policy_defers_until_row_geometry_resolves() {
    let mut list = WindowedList::new(
        WindowedOptions::new(1000).with_sizing(SizingType::Uniform),
    );
    let before = list.window();

    assert!(!list.update_frame(view(&FakeRendered::empty()), 0, 300));
    assert!(!list.update_frame(None, 0, 300));
    assert_eq!(list.window(), before);
}

#[test]
fn uniform_policy_detects_items_per_row() {
    let mut list = WindowedList::new(
        WindowedOptions::new(99)
            .with_sizing(SizingType::Uniform)
            .with_threshold(0),
    );
    let rendered = FakeRendered::grid(4, 3, 30);

    while list.update_frame(view(&rendered), 0, 300) {}

    let w = list.window();
    assert_eq!(w.items_per_row, 3);
    assert_eq!(w.from % 3, 0);
    assert_eq!(w.size % 3, 0);
    // ceil(300 / 30) + 1 = 11 rows of 3.
    assert_eq!(w.size, 33);
}

#[test]
fn simple_growth_increments_by_page_size_and_clamps() {
    let mut list = WindowedList::new(
        WindowedOptions::new(95)
            .with_sizing(SizingType::Simple)
            .with_threshold(0),
    );
    let rendered = FakeRendered::empty();

    let mut previous = list.window().size;
    assert_eq!(previous, 10);

    while list.update_frame(view(&rendered), 0, 300) {
        let size = list.window().size;
        assert!(size == previous + 10 || size == 95);
        assert!(size <= 95);
        previous = size;
    }

    assert_eq!(list.window().size, 95);
    assert_eq!(list.window().from, 0);
}

#[test]
fn simple_growth_stops_once_rendered_end_passes_bounds() {
    let mut list = WindowedList::new(
        WindowedOptions::new(1000)
            .with_sizing(SizingType::Simple)
            .with_threshold(0),
    );
    // 20 items of 30px rendered: 600px, past the 300px bound.
    let rendered = FakeRendered::uniform(20, 30);

    assert!(!list.update_frame(view(&rendered), 0, 300));
    assert_eq!(list.window().size, 10);
}

#[test]
fn variable_scan_places_window_from_item_sizes() {
    let mut list =
        WindowedList::new(variable_options(100).with_item_size_getter(Some(|_| 10u32)));

    assert!(list.update_frame(view(&FakeRendered::empty()), 25, 50));
    let w = list.window();
    // Items 2..8 span 20..80, covering [25, 75).
    assert_eq!((w.from, w.size), (2, 6));
}

#[test]
fn variable_scan_landing_on_index_one_renders_from_top() {
    let mut list =
        WindowedList::new(variable_options(100).with_item_size_getter(Some(|_| 10u32)));

    list.update_frame(view(&FakeRendered::empty()), 15, 50);
    assert_eq!(list.window().from, 0);

    // One item further down the scan settles normally.
    list.update_frame(view(&FakeRendered::empty()), 25, 50);
    assert_eq!(list.window().from, 2);
}

#[test]
fn variable_unknown_size_extends_window_by_one_page() {
    let mut list = WindowedList::new(variable_options(100));
    let rendered = FakeRendered::from_sizes(&[10, 10, 10]);

    // Read-back measures indices 0..3; index 3 is unknown, so the trailing
    // scan stops there and extends by one page.
    assert!(list.update_frame(view(&rendered), 0, 50));
    assert_eq!((list.window().from, list.window().size), (0, 13));
}

#[test]
fn variable_zero_space_keeps_prior_window() {
    let mut list = WindowedList::new(variable_options(100));
    let rendered = FakeRendered::from_sizes(&[10, 10, 10]);
    list.update_frame(view(&rendered), 0, 50);
    let before = list.window();

    // No measurements at all: the window must not collapse.
    list.reset_measurements();
    assert!(!list.update_frame(view(&FakeRendered::empty()), 0, 50));
    assert_eq!(list.window(), before);
}

#[test]
fn size_resolution_prefers_uniform_size_over_getter() {
    let mut list = WindowedList::new(
        WindowedOptions::new(100)
            .with_sizing(SizingType::Uniform)
            .with_threshold(0)
            .with_item_size_getter(Some(|_| 99u32)),
    );
    let rendered = FakeRendered::uniform(5, 30);
    while list.update_frame(view(&rendered), 0, 300) {}

    assert_eq!(list.size_of_item(None, 0), Some(30));
}

#[test]
fn size_resolution_prefers_getter_over_cache() {
    let mut list = WindowedList::new(variable_options(100));
    let rendered = FakeRendered::from_sizes(&[10, 10, 10]);
    list.update_frame(view(&rendered), 0, 20);
    assert_eq!(list.size_of_item(None, 0), Some(10));

    let with_getter = list
        .options()
        .clone()
        .with_item_size_getter(Some(|_| 99u32));
    list.set_options(with_getter);
    assert_eq!(list.size_of_item(None, 0), Some(99));
}

#[test]
fn size_resolution_prefers_cache_over_estimator() {
    let mut list = WindowedList::new(
        variable_options(100).with_item_size_estimator(Some(|_, _: &SizeCache| 77u32)),
    );
    let rendered = FakeRendered::from_sizes(&[10, 10, 10]);
    list.update_frame(view(&rendered), 0, 20);

    assert_eq!(list.size_of_item(None, 0), Some(10));
    assert_eq!(list.size_of_item(None, 50), Some(77));
}

#[test]
fn size_resolution_probes_rendered_output_only_for_simple_windows() {
    let list = WindowedList::new(WindowedOptions::new(100).with_sizing(SizingType::Simple));
    let rendered = FakeRendered::from_sizes(&[10, 20, 30]);

    assert_eq!(list.size_of_item(view(&rendered), 1), Some(20));
    // Inside the window but not rendered yet.
    assert_eq!(list.size_of_item(view(&rendered), 5), None);
    // Outside the window entirely.
    assert_eq!(list.size_of_item(view(&rendered), 50), None);

    // Variable sizing never probes the rendered output directly.
    let list = WindowedList::new(variable_options(100));
    assert_eq!(list.size_of_item(view(&rendered), 1), None);
}

#[test]
fn space_before_uses_uniform_arithmetic_when_size_is_known() {
    let mut list = WindowedList::new(
        WindowedOptions::new(100)
            .with_sizing(SizingType::Uniform)
            .with_threshold(0),
    );
    let rendered = FakeRendered::grid(4, 3, 30);
    while list.update_frame(view(&rendered), 0, 300) {}

    assert_eq!(list.space_before(None, 0), 0);
    assert_eq!(list.space_before(None, 2), 0);
    assert_eq!(list.space_before(None, 7), 60);
    // The fast path never touches the offset cache.
    assert_eq!(list.offset_cache_len(), 0);
}

#[test]
fn space_before_is_monotonic() {
    let mut rng = Lcg::new(7);
    for _ in 0..20 {
        let length = rng.gen_range_usize(1, 60);
        let mut sizes = Vec::with_capacity(length);
        for _ in 0..length {
            sizes.push(rng.gen_range_u32(0, 20));
        }
        let sizes_for_getter = sizes.clone();
        let mut list = WindowedList::new(
            variable_options(length)
                .with_item_size_getter(Some(move |i: usize| sizes_for_getter[i.min(length - 1)])),
        );

        let mut previous = 0u64;
        let mut expected = 0u64;
        for index in 0..=length {
            let space = list.space_before(None, index);
            assert_eq!(space, expected);
            assert!(space >= previous, "space_before must be monotonic");
            previous = space;
            if index < length {
                expected += sizes[index] as u64;
            }
        }
    }
}

#[test]
fn space_before_returns_partial_sum_on_unknown_sizes() {
    let mut list = WindowedList::new(variable_options(100));
    let rendered = FakeRendered::from_sizes(&[5, 5, 5]);
    list.update_frame(view(&rendered), 0, 10);

    // Only 0..3 are measured; the fill stops there.
    assert_eq!(list.space_before(None, 10), 15);
}

#[test]
fn visible_range_scans_the_current_window() {
    let mut list = WindowedList::new(
        variable_options(200)
            .with_page_size(10)
            .with_item_size_getter(Some(|_| 30u32)),
    );
    list.update_frame(view(&FakeRendered::empty()), 165, 3000);
    assert_eq!(list.window().from, 5);

    // Viewport [15, 985): first item ending after 15 inside the window is
    // index 5 (150..180); last item starting before 985 is index 32 (960).
    assert_eq!(
        list.visible_range(view(&FakeRendered::empty()), 15, 970),
        Some((5, 32))
    );
}

#[test]
fn visible_range_is_none_before_anything_is_measurable() {
    let list = WindowedList::new(variable_options(100));
    assert_eq!(list.visible_range(None, 0, 100), None);
}

#[test]
fn visible_range_leaves_persistent_offsets_untouched() {
    let mut list = WindowedList::new(
        variable_options(200).with_item_size_getter(Some(|_| 30u32)),
    );
    list.update_frame(view(&FakeRendered::empty()), 165, 300);
    let cached = list.offset_cache_len();

    list.visible_range(view(&FakeRendered::empty()), 15, 100);
    assert_eq!(list.offset_cache_len(), cached);
}

#[test]
fn scroll_around_moves_minimally() {
    let mut list = WindowedList::new(
        variable_options(100).with_item_size_getter(Some(|_| 30u32)),
    );

    // Item 10 spans 300..330; viewport is 100.
    // Fully above the viewport: jump back to its start.
    assert_eq!(list.scroll_around_offset(None, 10, 500, 100), Some(300));
    // Fully below the viewport: scroll just far enough to reveal its end.
    assert_eq!(list.scroll_around_offset(None, 10, 100, 100), Some(230));
    // Already in view: no movement.
    assert_eq!(list.scroll_around_offset(None, 10, 250, 100), None);
}

#[test]
fn scroll_around_is_noop_while_size_is_unknown() {
    let mut list = WindowedList::new(variable_options(100));
    assert_eq!(list.scroll_around_offset(None, 10, 0, 100), None);
}

#[test]
fn scroll_to_falls_back_to_the_initial_index() {
    let mut list = WindowedList::new(
        variable_options(100)
            .with_initial_index(Some(7))
            .with_item_size_getter(Some(|_| 10u32)),
    );
    assert_eq!(list.scroll_to_offset(None, None), Some(70));
    assert_eq!(list.scroll_to_offset(None, Some(3)), Some(30));

    let mut list = WindowedList::new(variable_options(100));
    assert_eq!(list.scroll_to_offset(None, None), None);
}

#[test]
fn window_invariant_holds_under_random_updates() {
    let mut rng = Lcg::new(42);
    for _ in 0..50 {
        let length = rng.gen_range_usize(0, 40);
        let mut list = WindowedList::new(
            variable_options(length).with_item_size_getter(Some(|_| 5u32)),
        );

        for _ in 0..10 {
            let scroll = rng.gen_range_u64(0, 400);
            let viewport = rng.gen_range_u32(1, 200);
            list.update_frame(view(&FakeRendered::empty()), scroll, viewport);

            let w = list.window();
            assert!(w.from + w.size <= list.options().length);

            let next_length = rng.gen_range_usize(0, 40);
            let next = list.options().clone().with_length(next_length);
            list.set_options(next);
            let w = list.window();
            assert!(w.from + w.size <= list.options().length);
        }
    }
}

#[test]
fn set_options_reclamps_the_window() {
    let mut list =
        WindowedList::new(variable_options(100).with_item_size_getter(Some(|_| 10u32)));
    list.update_frame(view(&FakeRendered::empty()), 25, 50);
    assert_eq!(list.window().from, 2);

    let shrunk = list.options().clone().with_length(4);
    assert!(list.set_options(shrunk));
    let w = list.window();
    assert_eq!((w.from, w.size), (0, 4));
}

#[test]
fn set_options_sizing_change_drops_measurements() {
    let mut list = WindowedList::new(variable_options(100));
    let rendered = FakeRendered::from_sizes(&[10, 10, 10]);
    list.update_frame(view(&rendered), 0, 20);
    assert!(list.measurement_cache_len() > 0);

    let uniform = list.options().clone().with_sizing(SizingType::Uniform);
    list.set_options(uniform);
    assert_eq!(list.measurement_cache_len(), 0);
    assert_eq!(list.window().item_size, None);
}

#[test]
fn variable_convergence_reaches_a_fixed_point() {
    let mut list = WindowedList::new(
        variable_options(500).with_item_size_getter(Some(|i| 10 + (i % 7) as u32)),
    );

    let mut passes = 0;
    while list.update_frame(view(&FakeRendered::empty()), 333, 240) {
        passes += 1;
        assert!(passes <= 3, "variable window failed to converge");
    }
    assert!(!list.update_frame(view(&FakeRendered::empty()), 333, 240));
}

#[test]
fn total_space_rounds_up_to_whole_rows() {
    let mut list = WindowedList::new(
        WindowedOptions::new(10)
            .with_sizing(SizingType::Uniform)
            .with_threshold(0),
    );
    let rendered = FakeRendered::grid(2, 3, 30);
    while list.update_frame(view(&rendered), 0, 60) {}

    // 10 items in rows of 3: four rows.
    assert_eq!(list.total_space(None), 120);

    let mut list = WindowedList::new(
        variable_options(50).with_item_size_getter(Some(|_| 10u32)),
    );
    assert_eq!(list.total_space(None), 500);
}

#[test]
fn read_back_invalidates_stale_offsets() {
    let mut list = WindowedList::new(variable_options(100));
    let rendered = FakeRendered::from_sizes(&[10, 10, 10]);
    list.update_frame(view(&rendered), 0, 20);
    let total = list.space_before(None, 10);
    assert_eq!(total, 30);

    // Item 1 grows; cumulative offsets above it must be recomputed.
    let regrown = FakeRendered::from_sizes(&[10, 40, 10]);
    list.update_frame(view(&regrown), 0, 20);
    assert_eq!(list.space_before(None, 10), 60);
    assert_eq!(list.space_before(None, 1), 10);
}
