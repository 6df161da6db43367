//! Inline text entry: the transient keyboard-editing session popped up
//! by a click (or by keyboard focus) on the scrubber.

use scrub_core::{Color, Cursor, FocusDirection, Key, KeyEvent, ParseError};
use unicode_segmentation::UnicodeSegmentation;

use crate::config::Alignment;
use crate::host::{TextEntry, TextEntryInit, WindowHost};

/// Entry background while the buffer holds something unparseable.
pub const ERROR_COLOR: Color = Color(255, 192, 192, 255);

/// What a key press amounts to, decided here, acted on by the widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditKey {
    Commit,
    CommitAndNavigate(FocusDirection),
    Cancel,
    Edited,
    Ignored,
}

struct EditSession {
    entry: Box<dyn TextEntry>,
    buffer: String,
    /// The pre-filled text starts fully selected; the first edit
    /// replaces it wholesale.
    all_selected: bool,
    faulted: bool,
}

impl EditSession {
    fn sync_entry(&mut self) {
        self.entry.set_text(&self.buffer);
        if self.faulted {
            self.faulted = false;
            self.entry.set_background(None);
        }
    }
}

#[derive(Default)]
pub struct InlineTextEditor {
    session: Option<EditSession>,
}

impl InlineTextEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Pop up the entry over the scrubber: text cursor, sized to the
    /// widget, pre-filled with the display text, fully selected,
    /// focused. No-op while a session is already live.
    pub fn open(&mut self, window: &dyn WindowHost, text: &str, alignment: Alignment) {
        if self.session.is_some() {
            return;
        }
        window.set_cursor(Cursor::Text);
        let mut entry = window.create_text_entry(TextEntryInit {
            text: text.to_string(),
            alignment,
            size: window.client_size(),
        });
        entry.select_all();
        entry.focus();
        self.session = Some(EditSession {
            entry,
            buffer: text.to_string(),
            all_selected: true,
            faulted: false,
        });
    }

    /// Tear down the entry (the host control dies with the box) and
    /// restore the draggable cursor.
    pub fn close(&mut self, window: &dyn WindowHost) {
        if self.session.take().is_some() {
            window.set_cursor(Cursor::Hand);
        }
    }

    pub fn on_key(&mut self, event: &KeyEvent) -> EditKey {
        let Some(session) = &mut self.session else {
            return EditKey::Ignored;
        };
        match event.key {
            Key::Enter => EditKey::Commit,
            Key::Escape => EditKey::Cancel,
            Key::Tab => EditKey::CommitAndNavigate(if event.modifiers.shift {
                FocusDirection::Backward
            } else {
                FocusDirection::Forward
            }),
            Key::Character(c) => {
                if session.all_selected {
                    session.buffer.clear();
                    session.all_selected = false;
                }
                session.buffer.push(c);
                session.sync_entry();
                EditKey::Edited
            }
            Key::Backspace => {
                if session.all_selected {
                    session.buffer.clear();
                    session.all_selected = false;
                } else if let Some((idx, _)) = session.buffer.grapheme_indices(true).next_back() {
                    session.buffer.truncate(idx);
                }
                session.sync_entry();
                EditKey::Edited
            }
            _ => EditKey::Ignored,
        }
    }

    /// Current buffer, when a session is live.
    pub fn buffer(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.buffer.as_str())
    }

    /// Parse the buffer as a number.
    pub fn parse(&self) -> Result<f64, ParseError> {
        let buffer = self.buffer().unwrap_or_default();
        buffer.trim().parse::<f64>().map_err(|_| ParseError {
            input: buffer.to_string(),
        })
    }

    /// Flag the entry as holding a bad value: recolored background,
    /// session stays open for correction. The next edit clears it.
    pub fn mark_faulted(&mut self) {
        if let Some(session) = &mut self.session {
            session.faulted = true;
            session.entry.set_background(Some(ERROR_COLOR));
        }
    }

    pub fn is_faulted(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.faulted)
    }

    /// The parent control resized; keep the entry matching it.
    pub fn resized(&mut self, size: scrub_core::Size) {
        if let Some(session) = &mut self.session {
            session.entry.set_size(size);
        }
    }
}
