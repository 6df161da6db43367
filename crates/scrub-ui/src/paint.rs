//! Paint pass: a pure function from the scrubber's visible state to a
//! draw list the host replays.

use scrub_core::{DisplayList, DrawCmd, Rect, Size, TextExtent, Vec2};

use crate::config::{Alignment, ScrubberConfig, VisualState};

/// Horizontal inset for left/right aligned text.
pub const TEXT_MARGIN_PX: f32 = 4.0;

/// Build the draw list for one frame.
///
/// Background: the palette fill for `state`, or a `ParentFill` when the
/// palette resolves to transparent. A border rectangle is added only
/// when configured, so a colorless, borderless scrubber draws no
/// rectangle at all. Text goes last, in the configured text color.
///
/// `extent` must be the measured extent of `text` (of `"M"` when the
/// display text is empty or whitespace, which keeps the vertical
/// centering stable for blank values).
pub fn paint(
    text: &str,
    size: Size,
    extent: TextExtent,
    state: VisualState,
    config: &ScrubberConfig,
) -> DisplayList {
    let mut list = DisplayList::new();
    let bounds = Rect::from_size(size);

    match config.fill(state) {
        Some(color) => list.push(DrawCmd::Rect {
            rect: bounds,
            color,
        }),
        None => list.push(DrawCmd::ParentFill),
    }
    if let Some(color) = config.border_color {
        list.push(DrawCmd::Border {
            rect: bounds,
            color,
        });
    }
    list.push(DrawCmd::Text {
        pos: text_origin(size, extent, config.alignment),
        text: text.to_string(),
        color: config.text_color,
    });
    list
}

/// Where the display text is drawn: left margin, centered, or right
/// margin, vertically centered with the font descent taken out.
pub fn text_origin(size: Size, extent: TextExtent, alignment: Alignment) -> Vec2 {
    let x = match alignment {
        Alignment::Left => TEXT_MARGIN_PX,
        Alignment::Center => (size.width - extent.width) / 2.0,
        Alignment::Right => size.width - extent.width - TEXT_MARGIN_PX,
    };
    let y = (size.height - (extent.height - extent.descent)) / 2.0 - 1.0;
    Vec2 { x, y }
}
