#![forbid(unsafe_code)]

//! Bounded integer property.
//!
//! Candidates are clamped into `[min, max]` and truncated toward zero. Either
//! bound may be absent. The control is a number input whose text is parsed
//! with [`parse_int`] when the user commits an edit.

use std::ops::{RangeFrom, RangeFull, RangeInclusive, RangeToInclusive};
use std::rc::Rc;

use super::{Property, PropertyCore, bind_user_change};
use crate::channel::Subscription;
use crate::control::{Control, Toolkit, UserTrigger};
use crate::error::{PropertyError, Result};

/// Inclusive bounds; `None` leaves that side open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IntBounds {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl IntBounds {
    /// No bounds at all.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    #[must_use]
    pub const fn new(min: i64, max: i64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    #[must_use]
    pub const fn at_least(min: i64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    #[must_use]
    pub const fn at_most(max: i64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// Reject `min > max`.
    pub fn validate(&self) -> Result<()> {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min > max => Err(PropertyError::InvalidBounds { min, max }),
            _ => Ok(()),
        }
    }

    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }

    /// `max(min, min(max, value))`, skipping open sides.
    #[must_use]
    pub fn clamp(&self, value: i64) -> i64 {
        let mut v = value;
        if let Some(max) = self.max {
            v = v.min(max);
        }
        if let Some(min) = self.min {
            v = v.max(min);
        }
        v
    }

    /// Clamp, then truncate toward zero. `None` for a NaN candidate.
    #[must_use]
    pub fn resolve(&self, candidate: IntCandidate) -> Option<i64> {
        match candidate {
            IntCandidate::Whole(v) => Some(self.clamp(v)),
            IntCandidate::Fraction(f) if f.is_nan() => None,
            IntCandidate::Fraction(f) => {
                let mut x = f;
                if let Some(max) = self.max {
                    x = x.min(max as f64);
                }
                if let Some(min) = self.min {
                    x = x.max(min as f64);
                }
                // `as` saturates; the final clamp absorbs bounds that do not
                // round-trip through f64.
                Some(self.clamp(x.trunc() as i64))
            }
        }
    }
}

macro_rules! bounds_from_ranges {
    ($($t:ty),*) => {$(
        impl From<RangeInclusive<$t>> for IntBounds {
            fn from(range: RangeInclusive<$t>) -> Self {
                Self::new(i64::from(*range.start()), i64::from(*range.end()))
            }
        }

        impl From<RangeFrom<$t>> for IntBounds {
            fn from(range: RangeFrom<$t>) -> Self {
                Self::at_least(i64::from(range.start))
            }
        }

        impl From<RangeToInclusive<$t>> for IntBounds {
            fn from(range: RangeToInclusive<$t>) -> Self {
                Self::at_most(i64::from(range.end))
            }
        }
    )*};
}

bounds_from_ranges!(i64, i32);

impl From<RangeFull> for IntBounds {
    fn from(_: RangeFull) -> Self {
        Self::unbounded()
    }
}

/// A value offered to an integer property before validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntCandidate {
    Whole(i64),
    Fraction(f64),
}

impl From<i64> for IntCandidate {
    fn from(v: i64) -> Self {
        Self::Whole(v)
    }
}

impl From<i32> for IntCandidate {
    fn from(v: i32) -> Self {
        Self::Whole(i64::from(v))
    }
}

impl From<u32> for IntCandidate {
    fn from(v: u32) -> Self {
        Self::Whole(i64::from(v))
    }
}

impl From<f64> for IntCandidate {
    fn from(v: f64) -> Self {
        Self::Fraction(v)
    }
}

/// Parse the leading base-10 integer of `text`.
///
/// Leading whitespace and one sign are accepted; parsing stops at the first
/// non-digit, so `"3.7"` gives 3 and `"12px"` gives 12. Text without a digit
/// prefix gives `None`. Values beyond `i64` saturate.
#[must_use]
pub fn parse_int(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let mut acc: i64 = 0;
    for b in digits[..end].bytes() {
        let d = i64::from(b - b'0');
        acc = if negative {
            acc.saturating_mul(10).saturating_sub(d)
        } else {
            acc.saturating_mul(10).saturating_add(d)
        };
    }
    Some(acc)
}

struct IntState {
    core: PropertyCore<i64>,
    bounds: IntBounds,
}

impl IntState {
    fn apply(&self, candidate: IntCandidate) {
        match self.bounds.resolve(candidate) {
            Some(value) => {
                if candidate != IntCandidate::Whole(value) {
                    tracing::trace!(
                        property = %self.core.name(),
                        ?candidate,
                        value,
                        "candidate clamped"
                    );
                }
                self.core.commit(value);
            }
            None => {
                tracing::debug!(property = %self.core.name(), "ignoring NaN candidate");
            }
        }
        self.sync_display();
    }

    fn sync_display(&self) {
        self.core.sync_display(|v| v.to_string());
    }

    fn on_user_change(&self, trigger: UserTrigger) {
        if trigger != UserTrigger::Change {
            return;
        }
        let raw = self.core.control().display_value();
        match parse_int(&raw) {
            Some(parsed) if parsed != self.core.get() => self.apply(IntCandidate::Whole(parsed)),
            Some(_) => self.sync_display(),
            None => {
                tracing::debug!(
                    property = %self.core.name(),
                    raw = %raw,
                    "control text is not an integer; keeping canonical value"
                );
                self.sync_display();
            }
        }
    }
}

/// Integer property clamped to [`IntBounds`].
///
/// # Example
///
/// ```ignore
/// let opacity = IntProperty::new(&toolkit, "opacity", 50, 0..=100)?;
/// opacity.set_value(150);
/// assert_eq!(opacity.value(), 100);
/// opacity.set_value(-3.7);
/// assert_eq!(opacity.value(), 0);
/// ```
pub struct IntProperty {
    state: Rc<IntState>,
}

impl IntProperty {
    /// Build the property and its number input.
    ///
    /// The initial value is clamped like any candidate but does not notify.
    /// A NaN initial value falls back to `0` clamped into the bounds.
    pub fn new(
        toolkit: &dyn Toolkit,
        name: impl Into<String>,
        initial: impl Into<IntCandidate>,
        bounds: impl Into<IntBounds>,
    ) -> Result<Self> {
        let name = name.into();
        let bounds = bounds.into();
        bounds.validate()?;
        let value = bounds
            .resolve(initial.into())
            .unwrap_or_else(|| bounds.clamp(0));

        let _span = tracing::debug_span!("int_property", property = %name).entered();
        let control = toolkit.number_input(bounds.min, bounds.max)?;
        let state = Rc::new(IntState {
            core: PropertyCore::new(name, value, control),
            bounds,
        });
        bind_user_change(&state, state.core.control(), IntState::on_user_change);
        state.sync_display();
        Ok(Self { state })
    }

    #[must_use]
    pub fn bounds(&self) -> IntBounds {
        self.state.bounds
    }

    #[must_use]
    pub fn min(&self) -> Option<i64> {
        self.state.bounds.min
    }

    #[must_use]
    pub fn max(&self) -> Option<i64> {
        self.state.bounds.max
    }
}

impl Property for IntProperty {
    type Value = i64;
    type Input = IntCandidate;

    fn name(&self) -> &str {
        self.state.core.name()
    }

    fn value(&self) -> i64 {
        self.state.core.get()
    }

    fn set_value(&self, candidate: impl Into<Self::Input>) {
        self.state.apply(candidate.into());
    }

    fn node(&self) -> &dyn Control {
        self.state.core.control()
    }

    fn subscribe(&self, callback: impl Fn(&i64) + 'static) -> Subscription {
        self.state.core.subscribe(callback)
    }

    fn version(&self) -> u64 {
        self.state.core.version()
    }
}

impl std::fmt::Debug for IntProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntProperty")
            .field("name", &self.name())
            .field("value", &self.value())
            .field("bounds", &self.state.bounds)
            .field("version", &self.version())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::testing::{StubToolkit, stub};
    use proptest::prelude::*;
    use std::cell::RefCell;

    fn opacity() -> IntProperty {
        IntProperty::new(&StubToolkit, "opacity", 50, 0..=100).unwrap()
    }

    fn record(p: &IntProperty) -> (Rc<RefCell<Vec<i64>>>, Subscription) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = Rc::clone(&seen);
        let sub = p.subscribe(move |v| seen_clone.borrow_mut().push(*v));
        (seen, sub)
    }

    #[test]
    fn parse_int_prefix_rules() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int("  -7"), Some(-7));
        assert_eq!(parse_int("+8"), Some(8));
        assert_eq!(parse_int("3.7"), Some(3));
        assert_eq!(parse_int("-3.7"), Some(-3));
        assert_eq!(parse_int("12px"), Some(12));
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int(".5"), None);
        assert_eq!(parse_int("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_int("-99999999999999999999"), Some(i64::MIN));
    }

    #[test]
    fn bounds_validation() {
        assert!(IntBounds::new(0, 0).validate().is_ok());
        assert_eq!(
            IntBounds::new(5, 1).validate(),
            Err(PropertyError::InvalidBounds { min: 5, max: 1 })
        );
        assert!(IntBounds::unbounded().validate().is_ok());
    }

    #[test]
    fn resolve_clamps_then_truncates() {
        let b = IntBounds::new(-10, 10);
        assert_eq!(b.resolve(3.7.into()), Some(3));
        assert_eq!(b.resolve((-3.7).into()), Some(-3));
        assert_eq!(b.resolve(11.9.into()), Some(10));
        assert_eq!(b.resolve(f64::NEG_INFINITY.into()), Some(-10));
        assert_eq!(b.resolve(f64::NAN.into()), None);
        assert_eq!(IntBounds::unbounded().resolve(f64::INFINITY.into()), Some(i64::MAX));
    }

    #[test]
    fn range_conversions() {
        assert_eq!(IntBounds::from(1..=9), IntBounds::new(1, 9));
        assert_eq!(IntBounds::from(3..), IntBounds::at_least(3));
        assert_eq!(IntBounds::from(..=3), IntBounds::at_most(3));
        assert_eq!(IntBounds::from(..), IntBounds::unbounded());
    }

    #[test]
    fn invalid_bounds_fail_construction() {
        let err = IntProperty::new(&StubToolkit, "x", 0, 10..=0).unwrap_err();
        assert_eq!(err, PropertyError::InvalidBounds { min: 10, max: 0 });
    }

    #[test]
    fn initial_value_is_clamped_and_shown() {
        let p = IntProperty::new(&StubToolkit, "x", 500, 0..=100).unwrap();
        assert_eq!(p.value(), 100);
        assert_eq!(p.version(), 0);
        assert_eq!(p.node().display_value(), "100");
    }

    #[test]
    fn opacity_scenario() {
        let p = opacity();
        let (seen, _sub) = record(&p);

        p.set_value(150);
        assert_eq!(p.value(), 100);
        p.set_value(-5);
        assert_eq!(p.value(), 0);

        assert_eq!(*seen.borrow(), vec![100, 0]);
        assert_eq!(p.version(), 2);
    }

    #[test]
    fn same_value_does_not_notify() {
        let p = opacity();
        let (seen, _sub) = record(&p);

        p.set_value(70);
        p.set_value(70);
        p.set_value(70.9);

        assert_eq!(*seen.borrow(), vec![70]);
    }

    #[test]
    fn user_edit_goes_through_clamp() {
        let p = opacity();
        let (seen, _sub) = record(&p);

        stub(p.node()).user_edit("250", UserTrigger::Change);

        assert_eq!(p.value(), 100);
        assert_eq!(p.node().display_value(), "100");
        assert_eq!(*seen.borrow(), vec![100]);
    }

    #[test]
    fn clamped_user_edit_resyncs_even_without_change() {
        let p = IntProperty::new(&StubToolkit, "x", 100, 0..=100).unwrap();
        let (seen, _sub) = record(&p);

        stub(p.node()).user_edit("4000", UserTrigger::Change);

        assert_eq!(p.value(), 100);
        assert_eq!(p.node().display_value(), "100");
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn unparsable_text_is_dropped() {
        let p = opacity();
        let (seen, _sub) = record(&p);

        stub(p.node()).user_edit("fifty", UserTrigger::Change);

        assert_eq!(p.value(), 50);
        assert_eq!(p.node().display_value(), "50");
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn keyup_is_ignored() {
        let p = opacity();
        stub(p.node()).user_edit("7", UserTrigger::KeyUp);
        assert_eq!(p.value(), 50);
    }

    #[test]
    fn unbounded_sides_expose_no_attribute() {
        let p = IntProperty::new(&StubToolkit, "x", 0, IntBounds::at_least(-1)).unwrap();
        assert_eq!(p.node().attribute("min").as_deref(), Some("-1"));
        assert_eq!(p.node().attribute("max"), None);
        assert_eq!(p.min(), Some(-1));
        assert_eq!(p.max(), None);
    }

    #[test]
    fn reentrant_observer_leaves_display_faithful() {
        let p = Rc::new(opacity());
        let weak = Rc::downgrade(&p);
        let _sub = p.subscribe(move |v| {
            if *v > 90 {
                if let Some(p) = weak.upgrade() {
                    p.set_value(90);
                }
            }
        });

        p.set_value(99);

        assert_eq!(p.value(), 90);
        assert_eq!(p.node().display_value(), "90");
        assert_eq!(p.version(), 2);
    }

    #[test]
    fn dropped_property_ignores_late_control_events() {
        let p = IntProperty::new(&StubToolkit, "x", 1, ..).unwrap();
        let weak = Rc::downgrade(&p.state);
        let handlers = stub(p.node()).handlers();
        assert_eq!(handlers.len(), 1);

        drop(p);
        assert!(weak.upgrade().is_none());
        for handler in &handlers {
            handler(UserTrigger::Change);
        }
    }

    #[test]
    fn bounds_accessor_matches_construction() {
        let p = IntProperty::new(&StubToolkit, "x", 0, -5..=5).unwrap();
        assert_eq!(p.bounds(), IntBounds::new(-5, 5));
        assert!(p.bounds().contains(-5));
        assert!(p.bounds().contains(5));
        assert!(!p.bounds().contains(6));
        assert!(IntBounds::at_most(0).contains(i64::MIN));
    }

    proptest! {
        #[test]
        fn stored_value_always_within_bounds(
            min in -1000i64..1000,
            span in 0i64..1000,
            candidates in prop::collection::vec(any::<i64>(), 1..16),
        ) {
            let p = IntProperty::new(&StubToolkit, "x", min, min..=min + span).unwrap();
            for v in candidates {
                p.set_value(v);
                prop_assert!(p.bounds().contains(p.value()));
                prop_assert_eq!(p.node().display_value(), p.value().to_string());
            }
        }

        #[test]
        fn parse_int_reads_back_formatted_integers(v in any::<i64>(), suffix in "[.a-z]{0,4}") {
            prop_assert_eq!(parse_int(&format!("{v}{suffix}")), Some(v));
        }

        #[test]
        fn fraction_resolves_like_truncated_whole(x in -1.0e6f64..1.0e6) {
            let b = IntBounds::new(-1000, 1000);
            prop_assert_eq!(
                b.resolve(IntCandidate::Fraction(x)),
                Some(b.clamp(x.trunc() as i64))
            );
        }
    }
}
