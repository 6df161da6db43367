//! One-shot timers and the clock they read.
//!
//! The widget schedules a single deferred callback (the pending-click
//! timer); the host pumps [`Timers::fire_due`] from its event loop.
//! Time comes from an installable [`Clock`], so tests drive the queue
//! deterministically with [`TestClock`].

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use parking_lot::RwLock;
use slotmap::{SlotMap, new_key_type};
use web_time::{Duration, Instant};

pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock tests can drive by re-installing it with a new `t`.
#[derive(Clone, Copy)]
pub struct TestClock {
    pub t: Instant,
}

impl Clock for TestClock {
    fn now(&self) -> Instant {
        self.t
    }
}

static CLOCK: RwLock<Option<Box<dyn Clock>>> = RwLock::new(None);

/// Install the process-wide clock. Replaces any previous one.
pub fn set_clock(clock: Box<dyn Clock>) {
    *CLOCK.write() = Some(clock);
}

pub fn now() -> Instant {
    CLOCK
        .read()
        .as_ref()
        .map(|c| c.now())
        .unwrap_or_else(Instant::now)
}

new_key_type! {
    pub struct TimerKey;
}

struct Entry {
    deadline: Instant,
    callback: Option<Box<dyn FnOnce()>>,
}

type Queue = Rc<RefCell<SlotMap<TimerKey, Entry>>>;

/// A queue of pending one-shot callbacks. Cloning shares the queue; the
/// host keeps one handle to pump and the widget keeps one to schedule.
#[derive(Clone)]
pub struct Timers {
    queue: Queue,
}

impl Default for Timers {
    fn default() -> Self {
        Self::new()
    }
}

impl Timers {
    pub fn new() -> Self {
        Self {
            queue: Rc::new(RefCell::new(SlotMap::with_key())),
        }
    }

    pub fn schedule_once(&self, delay: Duration, f: impl FnOnce() + 'static) -> TimerHandle {
        let key = self.queue.borrow_mut().insert(Entry {
            deadline: now() + delay,
            callback: Some(Box::new(f)),
        });
        TimerHandle {
            key,
            queue: Rc::downgrade(&self.queue),
        }
    }

    /// Runs and removes every entry whose deadline has passed. Returns
    /// how many fired. Callbacks may schedule further timers; those run
    /// in this pass only if already due.
    pub fn fire_due(&self) -> usize {
        let mut fired = 0;
        loop {
            let t = now();
            let due = {
                let queue = self.queue.borrow();
                queue
                    .iter()
                    .find(|(_, e)| e.deadline <= t)
                    .map(|(key, _)| key)
            };
            let Some(key) = due else { break };
            // Remove before running so the callback sees itself gone.
            let callback = self.queue.borrow_mut().remove(key).and_then(|e| e.callback);
            if let Some(callback) = callback {
                callback();
            }
            fired += 1;
        }
        fired
    }

    /// Earliest pending deadline, if any; lets the host sleep precisely.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.borrow().values().map(|e| e.deadline).min()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

/// Handle to one scheduled callback. Cancellation after the queue has
/// been torn down is a no-op.
pub struct TimerHandle {
    key: TimerKey,
    queue: Weak<RefCell<SlotMap<TimerKey, Entry>>>,
}

impl TimerHandle {
    pub fn cancel(&self) {
        if let Some(queue) = self.queue.upgrade() {
            queue.borrow_mut().remove(self.key);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.queue
            .upgrade()
            .is_some_and(|q| q.borrow().contains_key(self.key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    // The clock is process-global; tests that drive it must not overlap.
    static CLOCK_LOCK: parking_lot::Mutex<()> = parking_lot::Mutex::new(());

    fn at(base: Instant, ms: u64) {
        set_clock(Box::new(TestClock {
            t: base + Duration::from_millis(ms),
        }));
    }

    #[test]
    fn fires_once_after_deadline() {
        let _guard = CLOCK_LOCK.lock();
        let base = Instant::now();
        at(base, 0);
        let timers = Timers::new();
        let count = Rc::new(Cell::new(0));
        let count2 = count.clone();
        let handle = timers.schedule_once(Duration::from_millis(150), move || {
            count2.set(count2.get() + 1)
        });

        at(base, 100);
        assert_eq!(timers.fire_due(), 0);
        assert!(handle.is_pending());

        at(base, 150);
        assert_eq!(timers.fire_due(), 1);
        assert_eq!(count.get(), 1);
        assert!(!handle.is_pending());

        at(base, 500);
        assert_eq!(timers.fire_due(), 0);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn cancel_prevents_firing() {
        let _guard = CLOCK_LOCK.lock();
        let base = Instant::now();
        at(base, 0);
        let timers = Timers::new();
        let fired = Rc::new(Cell::new(false));
        let fired2 = fired.clone();
        let handle = timers.schedule_once(Duration::from_millis(10), move || fired2.set(true));
        handle.cancel();
        at(base, 50);
        assert_eq!(timers.fire_due(), 0);
        assert!(!fired.get());
    }

    #[test]
    fn cancel_after_queue_dropped_is_safe() {
        let _guard = CLOCK_LOCK.lock();
        let base = Instant::now();
        at(base, 0);
        let timers = Timers::new();
        let handle = timers.schedule_once(Duration::from_millis(10), || {});
        drop(timers);
        handle.cancel(); // must not panic
        assert!(!handle.is_pending());
    }

    #[test]
    fn next_deadline_is_earliest() {
        let _guard = CLOCK_LOCK.lock();
        let base = Instant::now();
        at(base, 0);
        let timers = Timers::new();
        timers.schedule_once(Duration::from_millis(300), || {});
        timers.schedule_once(Duration::from_millis(150), || {});
        assert_eq!(
            timers.next_deadline(),
            Some(base + Duration::from_millis(150))
        );
    }

    #[test]
    fn callback_may_reschedule() {
        let _guard = CLOCK_LOCK.lock();
        let base = Instant::now();
        at(base, 0);
        let timers = Timers::new();
        let again = timers.clone();
        let count = Rc::new(Cell::new(0));
        let count2 = count.clone();
        timers.schedule_once(Duration::from_millis(10), move || {
            count2.set(count2.get() + 1);
            let count3 = count2.clone();
            again.schedule_once(Duration::from_millis(10), move || {
                count3.set(count3.get() + 1)
            });
        });
        at(base, 10);
        timers.fire_due();
        assert_eq!(count.get(), 1);
        at(base, 20);
        timers.fire_due();
        assert_eq!(count.get(), 2);
    }
}
