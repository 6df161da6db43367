//! The narrow interfaces the widget consumes from its host toolkit.
//!
//! The host owns the real window, the drawing surface, and the child
//! text control; the widget only ever talks through these traits.

use scrub_core::{Color, Cursor, FocusDirection, Size, TextExtent};

use crate::config::Alignment;

/// What the widget needs from the control it lives in.
pub trait WindowHost {
    fn set_cursor(&self, cursor: Cursor);

    /// Exclusive pointer grab. Acquired on button-down, released on
    /// button-up and on teardown, never left dangling.
    fn capture_pointer(&self);
    fn release_pointer(&self);

    fn request_focus(&self);
    fn client_size(&self) -> Size;
    fn request_repaint(&self);
    fn set_tooltip(&self, text: &str);

    /// Move keyboard focus to the next/previous control in the host UI.
    fn navigate_focus(&self, dir: FocusDirection);

    /// Measure a run of text in the control's font.
    fn text_extent(&self, text: &str) -> TextExtent;

    /// Create the transient child text control for inline editing.
    fn create_text_entry(&self, init: TextEntryInit) -> Box<dyn TextEntry>;
}

/// Initial state for a freshly created text entry.
#[derive(Clone, Debug)]
pub struct TextEntryInit {
    pub text: String,
    pub alignment: Alignment,
    pub size: Size,
}

/// The host-owned child text control. Dropping the box destroys the
/// control, so teardown holds on any exit path.
pub trait TextEntry {
    fn set_text(&mut self, text: &str);
    fn select_all(&mut self);
    fn focus(&mut self);
    fn set_size(&mut self, size: Size);
    /// `None` restores the host's normal entry background.
    fn set_background(&mut self, color: Option<Color>);
}
