//! Factory-level configuration for a scrubber, and the palette lookup
//! derived from it.

use scrub_core::Color;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

/// Which palette entry applies right now. Hover and drag are tracked
/// independently; drag wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisualState {
    Normal,
    Hover,
    Active,
}

macro_rules! builder_field {
    ($(#[$meta:meta])* $name:ident: $ty:ty) => {
        $(#[$meta])*
        pub fn $name(mut self, $name: $ty) -> Self {
            self.$name = $name;
            self
        }
    };
}

/// Options a host hands the widget factory. All colors are nullable;
/// `None` means transparent / inherit from the parent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrubberConfig {
    /// Static low bound. Only honored together with `high` when
    /// `high > low`; otherwise bounds come from the binding itself.
    pub low: f64,
    /// Static high bound (see `low`).
    pub high: f64,
    /// Drag increment; 0 means auto-compute from the range.
    pub increment: f64,
    pub alignment: Alignment,
    pub color: Option<Color>,
    pub hover_color: Option<Color>,
    pub active_color: Option<Color>,
    pub border_color: Option<Color>,
    pub text_color: Color,
    /// Fixed tooltip; when set it wins over the generated range tooltip.
    pub tooltip: Option<String>,
}

impl Default for ScrubberConfig {
    fn default() -> Self {
        Self {
            low: 0.0,
            high: 0.0,
            increment: 0.0,
            alignment: Alignment::default(),
            color: None,
            hover_color: None,
            active_color: None,
            border_color: None,
            text_color: Color::BLACK,
            tooltip: None,
        }
    }
}

impl ScrubberConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounds(mut self, low: f64, high: f64) -> Self {
        self.low = low;
        self.high = high;
        self
    }

    builder_field!(increment: f64);
    builder_field!(alignment: Alignment);
    builder_field!(color: Option<Color>);
    builder_field!(hover_color: Option<Color>);
    builder_field!(active_color: Option<Color>);
    builder_field!(border_color: Option<Color>);
    builder_field!(text_color: Color);
    builder_field!(tooltip: Option<String>);

    /// The configured bounds, when they are usable as-is. `high > low`
    /// is the sole trigger; anything else defers to the binding's own
    /// declared range.
    pub fn static_bounds(&self) -> Option<(Option<f64>, Option<f64>)> {
        (self.high > self.low).then_some((Some(self.low), Some(self.high)))
    }

    /// Background fill for a visual state. Active and hover colors fall
    /// back to the base color when unconfigured; `None` all the way
    /// down means the parent paints the background.
    pub fn fill(&self, state: VisualState) -> Option<Color> {
        match state {
            VisualState::Active => self.active_color.or(self.color),
            VisualState::Hover => self.hover_color.or(self.color),
            VisualState::Normal => self.color,
        }
    }
}
