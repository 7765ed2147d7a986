use windowed::Axis;

/// How the rendered run is offset inside the inner container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Placement {
    /// Relative positioning by plain offsets.
    Position { x: u64, y: u64 },
    /// A translate transform, optionally promoted to 3d.
    Translate { x: u64, y: u64, three_d: bool },
}

/// What the host must materialize for the current window: which indices to
/// render, how large the inner container is, and where the rendered run
/// sits inside it.
///
/// Simple lists render bare (`space` and `placement` are `None`): the
/// collection always starts at the top, so no spacer or offset is needed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderPlan {
    pub from: usize,
    pub size: usize,
    /// Inner container extent along the axis, so the scrollbar reflects the
    /// whole collection.
    pub space: Option<u64>,
    pub placement: Option<Placement>,
}

pub(crate) fn placement(
    axis: Axis,
    offset: u64,
    use_position: bool,
    use_translate_3d: bool,
) -> Placement {
    let x = if axis.is_horizontal() { offset } else { 0 };
    let y = if axis.is_horizontal() { 0 } else { offset };

    if use_position {
        Placement::Position { x, y }
    } else {
        Placement::Translate {
            x,
            y,
            three_d: use_translate_3d,
        }
    }
}
