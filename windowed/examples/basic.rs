// Example: a uniform list converging on a covering window.
use windowed::{Extent, RenderedItems, SizingType, WindowedList, WindowedOptions};

struct Rendered(Vec<Extent>);

impl RenderedItems for Rendered {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn extent(&self, slot: usize) -> Option<Extent> {
        self.0.get(slot).copied()
    }
}

fn rows(count: usize, size: u32) -> Rendered {
    Rendered(
        (0..count)
            .map(|i| Extent {
                start: i as u64 * size as u64,
                size,
            })
            .collect(),
    )
}

fn main() {
    let mut list = WindowedList::new(
        WindowedOptions::new(10_000)
            .with_sizing(SizingType::Uniform)
            .with_threshold(0),
    );

    // The host rendered the initial window as 24px rows; feed the measured
    // geometry back in until the window stops moving.
    let mut passes = 0;
    loop {
        let rendered = rows(list.window().size, 24);
        let changed = list.update_frame(Some(&rendered as &dyn RenderedItems), 0, 600);
        passes += 1;
        if !changed {
            break;
        }
    }
    println!("converged after {passes} passes: {:?}", list.window());
    println!("total space: {}", list.total_space(None));

    // Jump the viewport and reconcile again.
    let rendered = rows(list.window().size, 24);
    list.update_frame(Some(&rendered as &dyn RenderedItems), 120_000, 600);
    println!("after scrolling to 120000: {:?}", list.window());
    println!(
        "visible range: {:?}",
        list.visible_range(None, 120_000, 600)
    );
}
