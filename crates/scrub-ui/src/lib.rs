//! # Scrubber widget
//!
//! A custom-drawn numeric control: the value is displayed as text and
//! changed either by dragging (scrubbing) or by a transient inline text
//! entry popped up on click or keyboard focus.
//!
//! The widget never talks to a toolkit directly. It consumes
//! [`host::WindowHost`] for window/control primitives, emits a
//! `DisplayList` from [`Scrubber::paint`], reads and writes its value
//! through `scrub_core::BoundValue`, and schedules its single deferred
//! callback on `scrub_core::Timers`. Everything is single-threaded and
//! event-driven; the host forwards `InputEvent`s into
//! [`Scrubber::handle_event`].

pub mod config;
pub mod controller;
pub mod editor;
pub mod host;
pub mod paint;
pub mod range;
pub mod scrubber;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::{Alignment, ScrubberConfig, VisualState};
pub use controller::{DRAG_THRESHOLD_PX, DragSession, InteractionController, scrub_target};
pub use editor::{ERROR_COLOR, EditKey, InlineTextEditor};
pub use host::{TextEntry, TextEntryInit, WindowHost};
pub use paint::{TEXT_MARGIN_PX, paint, text_origin};
pub use range::{ValueRange, display_number};
pub use scrubber::Scrubber;
