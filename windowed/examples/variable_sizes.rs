// Example: caller-declared variable sizes and the scroll helpers.
use windowed::{Extent, RenderedItems, SizingType, WindowedList, WindowedOptions};

struct Nothing;

impl RenderedItems for Nothing {
    fn len(&self) -> usize {
        0
    }

    fn extent(&self, _slot: usize) -> Option<Extent> {
        None
    }
}

fn main() {
    let mut list = WindowedList::new(
        WindowedOptions::new(1000)
            .with_sizing(SizingType::Variable)
            .with_threshold(50)
            .with_item_size_getter(Some(|i: usize| 20 + (i % 5) as u32 * 8)),
    );

    list.update_frame(Some(&Nothing as &dyn RenderedItems), 4000, 480);
    println!("window at offset 4000: {:?}", list.window());
    println!("visible range: {:?}", list.visible_range(None, 4000, 480));

    println!("space before item 700: {}", list.space_before(None, 700));
    println!(
        "scroll_to(700) would set offset {:?}",
        list.scroll_to_offset(None, Some(700))
    );
    println!(
        "scroll_around(130) from offset 4000: {:?}",
        list.scroll_around_offset(None, 130, 4000, 480)
    );
}
