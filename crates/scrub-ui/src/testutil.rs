//! Recording host stubs shared by the module tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use scrub_core::{
    Color, Cursor, FocusDirection, InputEvent, Key, KeyEvent, Modifiers, PointerEvent,
    PointerEventKind, Size, TextExtent, Vec2,
};

use crate::host::{TextEntry, TextEntryInit, WindowHost};

#[derive(Debug, Default)]
pub(crate) struct EntryState {
    pub text: String,
    pub background: Option<Color>,
    pub size: Size,
    pub focused: bool,
    pub selected_all: bool,
    pub destroyed: bool,
}

pub(crate) struct StubEntry {
    state: Rc<RefCell<EntryState>>,
}

impl TextEntry for StubEntry {
    fn set_text(&mut self, text: &str) {
        self.state.borrow_mut().text = text.to_string();
    }
    fn select_all(&mut self) {
        self.state.borrow_mut().selected_all = true;
    }
    fn focus(&mut self) {
        self.state.borrow_mut().focused = true;
    }
    fn set_size(&mut self, size: Size) {
        self.state.borrow_mut().size = size;
    }
    fn set_background(&mut self, color: Option<Color>) {
        self.state.borrow_mut().background = color;
    }
}

impl Drop for StubEntry {
    fn drop(&mut self) {
        self.state.borrow_mut().destroyed = true;
    }
}

pub(crate) struct StubWindow {
    pub cursor: Cell<Cursor>,
    pub captured: Cell<bool>,
    pub focused: Cell<bool>,
    pub repaints: Cell<usize>,
    pub tooltip: RefCell<String>,
    pub navigations: RefCell<Vec<FocusDirection>>,
    pub size: Cell<Size>,
    entry: RefCell<Option<Rc<RefCell<EntryState>>>>,
}

impl StubWindow {
    pub fn new() -> Self {
        Self {
            cursor: Cell::new(Cursor::Arrow),
            captured: Cell::new(false),
            focused: Cell::new(false),
            repaints: Cell::new(0),
            tooltip: RefCell::new(String::new()),
            navigations: RefCell::new(Vec::new()),
            // the widget's default control size
            size: Cell::new(Size::new(50.0, 18.0)),
            entry: RefCell::new(None),
        }
    }

    /// State of the most recently created text entry.
    pub fn entry_state(&self) -> Rc<RefCell<EntryState>> {
        self.entry
            .borrow()
            .clone()
            .expect("no text entry was created")
    }

    pub fn has_entry(&self) -> bool {
        self.entry.borrow().is_some()
    }
}

impl WindowHost for StubWindow {
    fn set_cursor(&self, cursor: Cursor) {
        self.cursor.set(cursor);
    }
    fn capture_pointer(&self) {
        self.captured.set(true);
    }
    fn release_pointer(&self) {
        self.captured.set(false);
    }
    fn request_focus(&self) {
        self.focused.set(true);
    }
    fn client_size(&self) -> Size {
        self.size.get()
    }
    fn request_repaint(&self) {
        self.repaints.set(self.repaints.get() + 1);
    }
    fn set_tooltip(&self, text: &str) {
        *self.tooltip.borrow_mut() = text.to_string();
    }
    fn navigate_focus(&self, dir: FocusDirection) {
        self.navigations.borrow_mut().push(dir);
    }
    fn text_extent(&self, text: &str) -> TextExtent {
        // fixed-pitch fake font: 7px advance, 12px tall, 2px descent
        TextExtent {
            width: 7.0 * text.chars().count() as f32,
            height: 12.0,
            descent: 2.0,
            leading: 0.0,
        }
    }
    fn create_text_entry(&self, init: TextEntryInit) -> Box<dyn TextEntry> {
        let state = Rc::new(RefCell::new(EntryState {
            text: init.text,
            size: init.size,
            ..EntryState::default()
        }));
        *self.entry.borrow_mut() = Some(state.clone());
        Box::new(StubEntry { state })
    }
}

pub(crate) fn ptr(kind: PointerEventKind, x: f32, y: f32) -> InputEvent {
    ptr_mod(kind, x, y, Modifiers::NONE)
}

pub(crate) fn ptr_mod(kind: PointerEventKind, x: f32, y: f32, modifiers: Modifiers) -> InputEvent {
    InputEvent::Pointer(PointerEvent {
        event: kind,
        position: Vec2::new(x, y),
        modifiers,
    })
}

pub(crate) fn key(k: Key) -> InputEvent {
    key_mod(k, Modifiers::NONE)
}

pub(crate) fn key_mod(k: Key, modifiers: Modifiers) -> InputEvent {
    InputEvent::Key(KeyEvent { key: k, modifiers })
}

/// Tests that install a `TestClock` must hold this; the clock is
/// process-global and the test harness runs threads in parallel.
pub(crate) fn clock_lock() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
