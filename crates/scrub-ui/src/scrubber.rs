//! The scrubber widget: composition of range, drag controller, inline
//! editor and paint, bridged to the host through `WindowHost` and
//! `BoundValue`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use web_time::Duration;

use scrub_core::{
    BindingError, BoundValue, Change, Cursor, DisplayList, Dispose, InputEvent, KeyEvent,
    PointerButton, PointerEvent, PointerEventKind, Size, Subscription, TextExtent, TimerHandle,
    Timers,
};

use crate::config::ScrubberConfig;
use crate::controller::InteractionController;
use crate::editor::{EditKey, InlineTextEditor};
use crate::host::WindowHost;
use crate::paint;
use crate::range::{ValueRange, display_number};

/// How long a press may rest before its release stops counting as a
/// click (and so stops popping the editor).
const CLICK_DELAY: Duration = Duration::from_millis(150);

pub struct Scrubber {
    config: ScrubberConfig,
    binding: Rc<dyn BoundValue>,
    window: Rc<dyn WindowHost>,
    timers: Timers,

    range: ValueRange,
    value: f64,
    text: String,
    extent: Option<TextExtent>,

    controller: InteractionController,
    editor: InlineTextEditor,
    click_timer: Option<TimerHandle>,

    _subscription: Option<Subscription>,
    teardowns: Vec<Dispose>,
    error_hook: Option<Box<dyn Fn(&BindingError)>>,
    weak_self: Weak<RefCell<Scrubber>>,
    disposed: bool,
}

impl Scrubber {
    /// Create the widget and wire it to its collaborators. The returned
    /// cell is what the host's event handlers borrow into.
    pub fn mount(
        config: ScrubberConfig,
        binding: Rc<dyn BoundValue>,
        window: Rc<dyn WindowHost>,
        timers: Timers,
    ) -> Rc<RefCell<Scrubber>> {
        let value = binding.get();
        let cell = Rc::new(RefCell::new(Scrubber {
            config,
            binding: binding.clone(),
            window,
            timers,
            range: ValueRange {
                low: None,
                high: None,
                increment: 1.0,
            },
            value,
            text: String::new(),
            extent: None,
            controller: InteractionController::new(),
            editor: InlineTextEditor::new(),
            click_timer: None,
            _subscription: None,
            teardowns: Vec::new(),
            error_hook: None,
            weak_self: Weak::new(),
            disposed: false,
        }));

        let weak = Rc::downgrade(&cell);
        let subscription = Subscription::new(
            &binding,
            Box::new(move |change| {
                let Some(cell) = weak.upgrade() else { return };
                // A set issued by the widget itself lands here while the
                // widget is still borrowed; update_object refreshes
                // directly, so the re-entrant notification is skipped.
                let Ok(mut scrubber) = cell.try_borrow_mut() else {
                    return;
                };
                match change {
                    Change::Value => scrubber.update_editor(),
                    Change::Bounds => scrubber.reset_scrubber(),
                }
            }),
        );

        {
            let mut scrubber = cell.borrow_mut();
            scrubber.weak_self = Rc::downgrade(&cell);
            scrubber._subscription = Some(subscription);
            scrubber.reset_scrubber();
        }
        log::debug!("scrubber mounted (value {})", cell.borrow().value);
        cell
    }

    /// Re-resolve bounds and increment, regenerate the tooltip, refresh
    /// the display. Runs at mount and whenever the binding's declared
    /// range changes. The increment is recomputed only when none was
    /// configured (resolve handles that).
    pub fn reset_scrubber(&mut self) {
        let (low, high) = match self.config.static_bounds() {
            Some(bounds) => bounds,
            None => self.binding.declared_range(),
        };
        self.range = ValueRange::resolve(
            low,
            high,
            self.config.increment,
            self.binding.is_integral(),
        );
        let tooltip = match &self.config.tooltip {
            Some(fixed) => fixed.clone(),
            None => self.range.tooltip(),
        };
        self.window.set_tooltip(&tooltip);
        self.update_editor();
    }

    /// Refresh the displayed value from the binding. Idempotent and
    /// safe to run re-entrantly: it only re-reads, reformats, drops the
    /// stale text extent, and asks for a repaint.
    pub fn update_editor(&mut self) {
        self.value = self.binding.get();
        let text = display_number(self.value);
        if text != self.text {
            self.text = text;
            self.extent = None;
        }
        self.window.request_repaint();
    }

    /// Push a value into the binding. Equal values are a no-op. A
    /// rejected value is retried truncated to an integer; if the
    /// truncation equals the current value the rejection was benign.
    /// A second failure goes to the error hook and back to the caller.
    pub fn update_object(&mut self, value: f64) -> Result<(), BindingError> {
        if value == self.value {
            return Ok(());
        }
        match self.binding.set(value) {
            Ok(()) => {
                self.update_editor();
                Ok(())
            }
            Err(first) => {
                let fallback = value.trunc();
                if fallback == self.value {
                    log::debug!("set {value} rejected ({first}); integer fallback is current");
                    return Ok(());
                }
                match self.binding.set(fallback) {
                    Ok(()) => {
                        self.update_editor();
                        Ok(())
                    }
                    Err(err) => {
                        self.error(&err);
                        Err(err)
                    }
                }
            }
        }
    }

    /// Hook for binding failures that survive the integer fallback.
    /// Does nothing unless the host overrides it.
    fn error(&self, err: &BindingError) {
        if let Some(hook) = &self.error_hook {
            hook(err);
        }
    }

    pub fn set_error_hook(&mut self, hook: impl Fn(&BindingError) + 'static) {
        self.error_hook = Some(Box::new(hook));
    }

    /// Register extra cleanup (host-side handler unbinding) to run at
    /// dispose.
    pub fn add_teardown(&mut self, dispose: Dispose) {
        self.teardowns.push(dispose);
    }

    pub fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::Pointer(pe) => match pe.event {
                PointerEventKind::Enter => {
                    self.controller.set_hover(true);
                    // the live text entry keeps its own cursor
                    if !self.editor.is_open() {
                        self.window.set_cursor(Cursor::Hand);
                    }
                    self.window.request_repaint();
                }
                PointerEventKind::Leave => {
                    self.controller.set_hover(false);
                    self.window.request_repaint();
                }
                PointerEventKind::Down(PointerButton::Primary) => self.pointer_down(pe),
                PointerEventKind::Up(PointerButton::Primary) => self.pointer_up(),
                PointerEventKind::Move => self.pointer_move(pe),
                _ => {}
            },
            InputEvent::Key(ke) => self.key_down(ke),
            InputEvent::FocusGained => {
                if !self.controller.is_dragging() && !self.editor.is_open() {
                    self.open_editor();
                }
            }
            InputEvent::FocusLost => {
                if self.editor.is_open() {
                    self.commit_edit(None);
                }
            }
        }
    }

    fn pointer_down(&mut self, pe: &PointerEvent) {
        if self.editor.is_open() {
            // the text entry owns the surface while editing
            return;
        }
        self.controller.begin_drag(pe.position, self.value);
        self.window.capture_pointer();
        self.window.request_focus();
        if self.config.active_color != self.config.hover_color {
            self.window.request_repaint();
        }
        if let Some(timer) = self.click_timer.take() {
            timer.cancel();
        }
        let weak = self.weak_self.clone();
        self.click_timer = Some(self.timers.schedule_once(CLICK_DELAY, move || {
            let Some(cell) = weak.upgrade() else { return };
            if let Ok(mut scrubber) = cell.try_borrow_mut() {
                scrubber.controller.clear_pending();
            }
        }));
    }

    fn pointer_move(&mut self, pe: &PointerEvent) {
        let Some(target) = self
            .controller
            .pointer_moved(pe.position, &pe.modifiers, &self.range)
        else {
            return;
        };
        // Scrubbing must never surface an error; a doubly-rejected
        // value is dropped and motion continues.
        if let Err(err) = self.update_object(target) {
            log::debug!("scrub update dropped: {err}");
        }
    }

    fn pointer_up(&mut self) {
        if !self.controller.is_dragging() {
            return;
        }
        // Capture is exclusive: released unconditionally, before
        // anything else can bail out.
        self.window.release_pointer();
        if let Some(timer) = self.click_timer.take() {
            timer.cancel();
        }
        let was_click = self.controller.end_drag();
        if was_click {
            self.open_editor();
        }
        if self.controller.hovering() {
            self.window.request_repaint();
        }
    }

    fn open_editor(&mut self) {
        self.editor
            .open(self.window.as_ref(), &self.text, self.config.alignment);
    }

    fn key_down(&mut self, ke: &KeyEvent) {
        match self.editor.on_key(ke) {
            EditKey::Commit => self.commit_edit(None),
            EditKey::CommitAndNavigate(dir) => self.commit_edit(Some(dir)),
            EditKey::Cancel => self.editor.close(self.window.as_ref()),
            EditKey::Edited | EditKey::Ignored => {}
        }
    }

    /// Commit the edit buffer. Parse or binding failure recolors the
    /// entry and keeps it open; success closes it and optionally moves
    /// focus on.
    fn commit_edit(&mut self, navigate: Option<scrub_core::FocusDirection>) {
        let parsed = match self.editor.parse() {
            Ok(v) => v,
            Err(err) => {
                log::debug!("inline edit not committed: {err}");
                self.editor.mark_faulted();
                return;
            }
        };
        match self.update_object(parsed) {
            Ok(()) => {
                self.editor.close(self.window.as_ref());
                if let Some(dir) = navigate {
                    self.window.navigate_focus(dir);
                }
            }
            Err(_) => self.editor.mark_faulted(),
        }
    }

    /// Build this frame's draw list, measuring the display text lazily.
    pub fn paint(&mut self) -> DisplayList {
        let extent = self.ensure_extent();
        paint::paint(
            &self.text,
            self.window.client_size(),
            extent,
            self.controller.visual_state(),
            &self.config,
        )
    }

    fn ensure_extent(&mut self) -> TextExtent {
        if let Some(extent) = self.extent {
            return extent;
        }
        // Blank text measures as "M" so centering stays put.
        let probe = if self.text.trim().is_empty() {
            "M"
        } else {
            self.text.as_str()
        };
        let extent = self.window.text_extent(probe);
        self.extent = Some(extent);
        extent
    }

    /// The parent control resized; the live text entry follows it.
    pub fn resized(&mut self, size: Size) {
        self.editor.resized(size);
    }

    /// Tear everything down: pending timer, text entry, pointer grab,
    /// binding subscription, and any host-registered cleanups. Runs at
    /// most once; `Drop` calls it as a backstop.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        if let Some(timer) = self.click_timer.take() {
            timer.cancel();
        }
        if self.controller.is_dragging() {
            self.controller.end_drag();
            self.window.release_pointer();
        }
        if self.editor.is_open() {
            self.editor.close(self.window.as_ref());
        }
        self._subscription = None;
        for dispose in self.teardowns.drain(..) {
            dispose.run();
        }
        log::debug!("scrubber disposed");
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn display_text(&self) -> &str {
        &self.text
    }

    pub fn range(&self) -> &ValueRange {
        &self.range
    }

    pub fn is_editing(&self) -> bool {
        self.editor.is_open()
    }
}

impl Drop for Scrubber {
    fn drop(&mut self) {
        self.dispose();
    }
}
