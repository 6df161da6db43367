//! The external value binding: an observable numeric property the widget
//! reads, writes, and watches.
//!
//! `BoundValue` is the seam the host implements; [`Property`] is the
//! standard single-threaded implementation, and doubles as the test
//! double everywhere the widget's own tests need a binding.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use slotmap::{SlotMap, new_key_type};

use crate::error::BindingError;

new_key_type! {
    pub struct SubKey;
}

/// What a change notification is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Change {
    /// The bound value itself changed.
    Value,
    /// The property's declared low/high range changed (dynamic bounds).
    Bounds,
}

/// A numeric property with optional declared bounds and an optional
/// integral constraint, exposed to the widget through a narrow surface.
///
/// Notifications are synchronous: `set` calls subscribers before it
/// returns, and subscribers may re-enter `get`.
pub trait BoundValue {
    fn get(&self) -> f64;

    /// Assign a value. Fails when the value violates the property's
    /// integral constraint or its declared range; on failure the stored
    /// value is untouched and nothing is notified.
    fn set(&self, value: f64) -> Result<(), BindingError>;

    /// The range declared on the property itself, if any.
    fn declared_range(&self) -> (Option<f64>, Option<f64>);

    /// Whether the property only accepts whole numbers.
    fn is_integral(&self) -> bool;

    fn subscribe(&self, f: Box<dyn Fn(Change)>) -> SubKey;
    fn unsubscribe(&self, key: SubKey);
}

struct PropertyInner {
    value: f64,
    low: Option<f64>,
    high: Option<f64>,
    integral: bool,
    subs: SlotMap<SubKey, Rc<dyn Fn(Change)>>,
}

/// Standard in-process [`BoundValue`]. Hosts wrap one in an `Rc` and
/// hand it to the widget; external writers keep their own `Rc` and call
/// `set`/`declare_range` to push changes in.
pub struct Property {
    inner: RefCell<PropertyInner>,
}

impl Property {
    pub fn float(value: f64) -> Self {
        Self {
            inner: RefCell::new(PropertyInner {
                value,
                low: None,
                high: None,
                integral: false,
                subs: SlotMap::with_key(),
            }),
        }
    }

    /// A property constrained to whole numbers.
    pub fn int(value: i64) -> Self {
        let p = Self::float(value as f64);
        p.inner.borrow_mut().integral = true;
        p
    }

    /// Declare (or re-declare) the property's own range. Subscribers are
    /// told the bounds changed. Both-set bounds must satisfy low <= high.
    pub fn declare_range(&self, low: Option<f64>, high: Option<f64>) {
        if let (Some(lo), Some(hi)) = (low, high) {
            debug_assert!(lo <= hi, "declared range inverted: {lo} > {hi}");
        }
        {
            let mut inner = self.inner.borrow_mut();
            inner.low = low;
            inner.high = high;
        }
        self.notify(Change::Bounds);
    }

    fn validate(inner: &PropertyInner, value: f64) -> Result<(), BindingError> {
        if inner.integral && value.fract() != 0.0 {
            return Err(BindingError::NotIntegral { value });
        }
        let below = inner.low.is_some_and(|lo| value < lo);
        let above = inner.high.is_some_and(|hi| value > hi);
        if below || above {
            return Err(BindingError::OutOfRange {
                value,
                low: inner.low,
                high: inner.high,
            });
        }
        Ok(())
    }

    fn notify(&self, change: Change) {
        // Collect first so subscribers can re-enter the property (get,
        // subscribe, even set) without tripping the RefCell.
        let subs: Vec<Rc<dyn Fn(Change)>> = self.inner.borrow().subs.values().cloned().collect();
        for sub in subs {
            sub(change);
        }
    }
}

impl BoundValue for Property {
    fn get(&self) -> f64 {
        self.inner.borrow().value
    }

    fn set(&self, value: f64) -> Result<(), BindingError> {
        {
            let mut inner = self.inner.borrow_mut();
            Self::validate(&inner, value).inspect_err(|err| {
                log::debug!("property rejected {value}: {err}");
            })?;
            if inner.value == value {
                return Ok(());
            }
            inner.value = value;
        }
        self.notify(Change::Value);
        Ok(())
    }

    fn declared_range(&self) -> (Option<f64>, Option<f64>) {
        let inner = self.inner.borrow();
        (inner.low, inner.high)
    }

    fn is_integral(&self) -> bool {
        self.inner.borrow().integral
    }

    fn subscribe(&self, f: Box<dyn Fn(Change)>) -> SubKey {
        self.inner.borrow_mut().subs.insert(Rc::from(f))
    }

    fn unsubscribe(&self, key: SubKey) {
        self.inner.borrow_mut().subs.remove(key);
    }
}

/// RAII subscription: unsubscribes on drop. Holds only a weak reference
/// to the source, so dropping after the property is gone is a no-op.
pub struct Subscription {
    key: SubKey,
    source: Weak<dyn BoundValue>,
}

impl Subscription {
    pub fn new(source: &Rc<dyn BoundValue>, f: Box<dyn Fn(Change)>) -> Self {
        let key = source.subscribe(f);
        Self {
            key,
            source: Rc::downgrade(source),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(source) = self.source.upgrade() {
            source.unsubscribe(self.key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn set_and_get() {
        let p = Property::float(42.0);
        assert_eq!(p.get(), 42.0);
        p.set(100.0).unwrap();
        assert_eq!(p.get(), 100.0);
    }

    #[test]
    fn integral_rejects_fractions() {
        let p = Property::int(5);
        assert_eq!(
            p.set(5.7),
            Err(BindingError::NotIntegral { value: 5.7 })
        );
        assert_eq!(p.get(), 5.0);
        p.set(6.0).unwrap();
        assert_eq!(p.get(), 6.0);
    }

    #[test]
    fn declared_range_rejects_outside() {
        let p = Property::float(5.0);
        p.declare_range(Some(0.0), Some(10.0));
        assert!(p.set(11.0).is_err());
        assert!(p.set(-0.5).is_err());
        assert_eq!(p.get(), 5.0);
        p.set(10.0).unwrap();
    }

    #[test]
    fn notifies_value_and_bounds() {
        let p = Property::float(0.0);
        let last = Rc::new(Cell::new(None));
        let last2 = last.clone();
        p.subscribe(Box::new(move |c| last2.set(Some(c))));

        p.set(1.0).unwrap();
        assert_eq!(last.get(), Some(Change::Value));
        p.declare_range(Some(0.0), None);
        assert_eq!(last.get(), Some(Change::Bounds));
    }

    #[test]
    fn equal_set_does_not_notify() {
        let p = Property::float(3.0);
        let count = Rc::new(Cell::new(0));
        let count2 = count.clone();
        p.subscribe(Box::new(move |_| count2.set(count2.get() + 1)));
        p.set(3.0).unwrap();
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn failed_set_does_not_notify() {
        let p = Property::int(1);
        let count = Rc::new(Cell::new(0));
        let count2 = count.clone();
        p.subscribe(Box::new(move |_| count2.set(count2.get() + 1)));
        let _ = p.set(1.5);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn subscriber_may_reenter() {
        let p: Rc<dyn BoundValue> = Rc::new(Property::float(0.0));
        let seen = Rc::new(Cell::new(0.0));
        let p2 = Rc::downgrade(&p);
        let seen2 = seen.clone();
        p.subscribe(Box::new(move |_| {
            if let Some(p) = p2.upgrade() {
                seen2.set(p.get());
            }
        }));
        p.set(7.0).unwrap();
        assert_eq!(seen.get(), 7.0);
    }

    #[test]
    fn subscription_drop_unsubscribes() {
        let p: Rc<dyn BoundValue> = Rc::new(Property::float(0.0));
        let count = Rc::new(Cell::new(0));
        let count2 = count.clone();
        let sub = Subscription::new(&p, Box::new(move |_| count2.set(count2.get() + 1)));
        p.set(1.0).unwrap();
        assert_eq!(count.get(), 1);
        drop(sub);
        p.set(2.0).unwrap();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn subscription_outliving_source_is_harmless() {
        let p: Rc<dyn BoundValue> = Rc::new(Property::float(0.0));
        let sub = Subscription::new(&p, Box::new(|_| {}));
        drop(p);
        drop(sub); // must not panic
    }
}
