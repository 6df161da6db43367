//! Headless walkthrough of the scrubber widget against logging stub
//! hosts: mount, hover, scrub, click-to-edit, commit, dispose.
//!
//! Run with `RUST_LOG=debug` to also see the widget's own logging.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use anyhow::Result;

use scrub_core::{
    BoundValue, Color, Cursor, Dispose, FocusDirection, InputEvent, Key, KeyEvent, Modifiers,
    PointerButton, PointerEvent, PointerEventKind, Property, Size, TextExtent, Timers, Vec2,
};
use scrub_ui::{Scrubber, ScrubberConfig, TextEntry, TextEntryInit, WindowHost};

struct LoggingWindow {
    size: Cell<Size>,
}

impl WindowHost for LoggingWindow {
    fn set_cursor(&self, cursor: Cursor) {
        log::info!("host: cursor -> {cursor:?}");
    }
    fn capture_pointer(&self) {
        log::info!("host: pointer captured");
    }
    fn release_pointer(&self) {
        log::info!("host: pointer released");
    }
    fn request_focus(&self) {
        log::info!("host: focus requested");
    }
    fn client_size(&self) -> Size {
        self.size.get()
    }
    fn request_repaint(&self) {
        log::debug!("host: repaint requested");
    }
    fn set_tooltip(&self, text: &str) {
        log::info!("host: tooltip -> {text:?}");
    }
    fn navigate_focus(&self, dir: FocusDirection) {
        log::info!("host: focus moves {dir:?}");
    }
    fn text_extent(&self, text: &str) -> TextExtent {
        TextExtent {
            width: 7.0 * text.chars().count() as f32,
            height: 12.0,
            descent: 2.0,
            leading: 0.0,
        }
    }
    fn create_text_entry(&self, init: TextEntryInit) -> Box<dyn TextEntry> {
        log::info!(
            "host: text entry created ({:?}, {:?} aligned)",
            init.text,
            init.alignment
        );
        Box::new(LoggingEntry { text: init.text })
    }
}

struct LoggingEntry {
    text: String,
}

impl TextEntry for LoggingEntry {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        log::info!("entry: text -> {text:?}");
    }
    fn select_all(&mut self) {
        log::info!("entry: select all");
    }
    fn focus(&mut self) {
        log::info!("entry: focused");
    }
    fn set_size(&mut self, size: Size) {
        log::info!("entry: resized to {size:?}");
    }
    fn set_background(&mut self, color: Option<Color>) {
        log::info!("entry: background -> {color:?}");
    }
}

impl Drop for LoggingEntry {
    fn drop(&mut self) {
        log::info!("entry: destroyed (held {:?})", self.text);
    }
}

fn pointer(kind: PointerEventKind, x: f32, y: f32) -> InputEvent {
    InputEvent::Pointer(PointerEvent {
        event: kind,
        position: Vec2::new(x, y),
        modifiers: Modifiers::NONE,
    })
}

fn character(c: char) -> InputEvent {
    InputEvent::Key(KeyEvent {
        key: Key::Character(c),
        modifiers: Modifiers::NONE,
    })
}

fn send(scrubber: &Rc<RefCell<Scrubber>>, event: InputEvent) {
    scrubber.borrow_mut().handle_event(&event);
}

fn render(scrubber: &Rc<RefCell<Scrubber>>) {
    for cmd in scrubber.borrow_mut().paint().iter() {
        log::info!("draw: {cmd:?}");
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let property = Rc::new(Property::float(50.0));
    let window = Rc::new(LoggingWindow {
        size: Cell::new(Size::new(50.0, 18.0)),
    });
    let timers = Timers::new();

    let config = ScrubberConfig::new()
        .bounds(0.0, 100.0)
        .color(Some(Color::from_hex("#303030")))
        .hover_color(Some(Color::from_hex("#3a3a3a")))
        .active_color(Some(Color::from_hex("#1f6feb")))
        .border_color(Some(Color::from_hex("#555555")))
        .text_color(Color::WHITE);

    let scrubber = Scrubber::mount(config, property.clone(), window.clone(), timers.clone());
    scrubber
        .borrow_mut()
        .add_teardown(Dispose::new(|| log::info!("host: handlers unbound")));
    log::info!(
        "mounted: value={} display={:?}",
        property.get(),
        scrubber.borrow().display_text()
    );
    render(&scrubber);

    // Hover in and drag 30px right: divisor 3, increment 1 -> +10.
    send(&scrubber, pointer(PointerEventKind::Enter, 0.0, 9.0));
    send(
        &scrubber,
        pointer(PointerEventKind::Down(PointerButton::Primary), 10.0, 9.0),
    );
    send(&scrubber, pointer(PointerEventKind::Move, 40.0, 9.0));
    render(&scrubber);
    send(
        &scrubber,
        pointer(PointerEventKind::Up(PointerButton::Primary), 40.0, 9.0),
    );
    log::info!("after scrub: value={}", property.get());

    // A quick click pops the inline editor; type a value and commit.
    send(
        &scrubber,
        pointer(PointerEventKind::Down(PointerButton::Primary), 20.0, 9.0),
    );
    send(
        &scrubber,
        pointer(PointerEventKind::Up(PointerButton::Primary), 20.0, 9.0),
    );
    for c in "42".chars() {
        send(&scrubber, character(c));
    }
    send(
        &scrubber,
        InputEvent::Key(KeyEvent {
            key: Key::Enter,
            modifiers: Modifiers::NONE,
        }),
    );
    log::info!("after inline edit: value={}", property.get());

    // A held press is not a click: the 150ms timer clears the pending
    // flag, so release does not reopen the editor.
    send(
        &scrubber,
        pointer(PointerEventKind::Down(PointerButton::Primary), 20.0, 9.0),
    );
    thread::sleep(Duration::from_millis(160));
    timers.fire_due();
    send(
        &scrubber,
        pointer(PointerEventKind::Up(PointerButton::Primary), 20.0, 9.0),
    );
    log::info!(
        "after held press: editing={}",
        scrubber.borrow().is_editing()
    );

    // An external push lands back in the display.
    property.set(75.0)?;
    log::info!("after external set: display={:?}", {
        let s = scrubber.borrow();
        s.display_text().to_string()
    });

    scrubber.borrow_mut().dispose();
    Ok(())
}
