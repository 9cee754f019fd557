#![forbid(unsafe_code)]

//! Named, observable values bound one-to-one to a control.
//!
//! # Design
//!
//! The shared contract is the [`Property`] trait. The variants ([`IntProperty`],
//! [`TextProperty`], [`ColourProperty`]) form a closed set and [`AnyProperty`]
//! wraps them for code that handles properties uniformly.
//!
//! Each variant keeps its state in a private `PropertyCore<T>`:
//!
//! ```text
//! Variant (Rc<State>)
//!     │
//!     ├── PropertyCore<T>
//!     │       ├── name, value, version
//!     │       ├── Channel<T> ──> observers
//!     │       └── Box<dyn Control> ──(Weak<State>)──> user-change path
//!     │
//!     └── variant data (bounds, ...)
//! ```
//!
//! Every mutation, programmatic or user-driven, runs the same three steps:
//! validate the candidate, `PropertyCore::commit` (compare, store, publish),
//! then re-sync the control from the stored value.
//!
//! # Invariants
//!
//! 1. The stored value always passes the variant's validation.
//! 2. A notification fires iff the validated value differs from the stored one
//!    (`PartialEq`), and the version bumps by exactly one at the same time.
//! 3. When `set_value` returns, the control shows the canonical value.
//! 4. No borrow is held while observers run, so an observer may call back
//!    into the same property.

mod colour;
mod int;
mod text;

pub use colour::{ColourProperty, colour_options};
pub use int::{IntBounds, IntCandidate, IntProperty, parse_int};
pub use text::TextProperty;

use std::cell::{Cell, RefCell};
use std::fmt::Debug;
use std::rc::Rc;

use crate::channel::{Channel, Subscription};
use crate::control::{Control, UserTrigger};
use crate::error::{PropertyError, Result};
use crate::palette::Colour;

/// The contract every property variant implements.
pub trait Property {
    /// Canonical value type.
    type Value: Clone + PartialEq + Debug + 'static;
    /// What `set_value` accepts before validation.
    type Input;

    /// Immutable identifier.
    fn name(&self) -> &str;

    /// Current canonical value.
    fn value(&self) -> Self::Value;

    /// Validate `candidate`, store it if it differs, notify, re-sync the
    /// control.
    fn set_value(&self, candidate: impl Into<Self::Input>);

    /// The bound control.
    fn node(&self) -> &dyn Control;

    /// Observe value changes.
    fn subscribe(&self, callback: impl Fn(&Self::Value) + 'static) -> Subscription;

    /// Number of value-changing mutations since construction.
    fn version(&self) -> u64;
}

/// State shared by every variant.
pub(crate) struct PropertyCore<T> {
    name: String,
    value: RefCell<T>,
    version: Cell<u64>,
    channel: Channel<T>,
    control: Box<dyn Control>,
}

impl<T: Clone + PartialEq + Debug + 'static> PropertyCore<T> {
    pub(crate) fn new(name: String, value: T, control: Box<dyn Control>) -> Self {
        Self {
            name,
            value: RefCell::new(value),
            version: Cell::new(0),
            channel: Channel::new(),
            control,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn get(&self) -> T {
        self.value.borrow().clone()
    }

    pub(crate) fn version(&self) -> u64 {
        self.version.get()
    }

    pub(crate) fn control(&self) -> &dyn Control {
        self.control.as_ref()
    }

    pub(crate) fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.channel.subscribe(callback)
    }

    /// Compare-and-notify. Stores `validated` and publishes it when it differs
    /// from the current value. Returns whether a change happened.
    pub(crate) fn commit(&self, validated: T) -> bool {
        {
            let mut value = self.value.borrow_mut();
            if *value == validated {
                return false;
            }
            *value = validated.clone();
        }
        let version = self.version.get() + 1;
        self.version.set(version);
        tracing::debug!(property = %self.name, version, value = ?validated, "property changed");
        self.channel.publish(&validated);
        true
    }

    /// Overwrite the control's text with the rendering of the stored value.
    pub(crate) fn sync_display(&self, render: impl FnOnce(&T) -> String) {
        let shown = render(&self.value.borrow());
        tracing::trace!(property = %self.name, shown = %shown, "display synced");
        self.control.set_display_value(&shown);
    }
}

/// Route the control's user-change signal to `on_change`, holding the state
/// weakly so the control never keeps its property alive.
pub(crate) fn bind_user_change<S: 'static>(
    state: &Rc<S>,
    control: &dyn Control,
    on_change: fn(&S, UserTrigger),
) {
    let weak = Rc::downgrade(state);
    control.on_user_change(Rc::new(move |trigger: UserTrigger| {
        if let Some(state) = weak.upgrade() {
            on_change(&state, trigger);
        }
    }));
}

// ---------------------------------------------------------------------------
// Type-erased access
// ---------------------------------------------------------------------------

/// A value of any property variant.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Int(i64),
    Text(String),
    Colour(Colour),
}

impl PropertyValue {
    /// Short name of the variant, used in error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Text(_) => "text",
            Self::Colour(_) => "colour",
        }
    }
}

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
            Self::Colour(c) => write!(f, "{c}"),
        }
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for PropertyValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<Colour> for PropertyValue {
    fn from(c: Colour) -> Self {
        Self::Colour(c)
    }
}

/// Any property variant behind one interface.
#[derive(Debug)]
pub enum AnyProperty {
    Int(IntProperty),
    Text(TextProperty),
    Colour(ColourProperty),
}

impl AnyProperty {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Int(p) => p.name(),
            Self::Text(p) => p.name(),
            Self::Colour(p) => p.name(),
        }
    }

    /// Short name of the variant.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Text(_) => "text",
            Self::Colour(_) => "colour",
        }
    }

    #[must_use]
    pub fn value(&self) -> PropertyValue {
        match self {
            Self::Int(p) => PropertyValue::Int(p.value()),
            Self::Text(p) => PropertyValue::Text(p.value()),
            Self::Colour(p) => PropertyValue::Colour(p.value()),
        }
    }

    /// Forward `value` to the wrapped property. Fails without side effects
    /// when the value belongs to another variant.
    pub fn set_value(&self, value: PropertyValue) -> Result<()> {
        match (self, value) {
            (Self::Int(p), PropertyValue::Int(v)) => p.set_value(v),
            (Self::Text(p), PropertyValue::Text(s)) => p.set_value(s),
            (Self::Colour(p), PropertyValue::Colour(c)) => p.set_value(c),
            (p, v) => {
                return Err(PropertyError::TypeMismatch {
                    property: p.name().to_string(),
                    expected: p.kind_name(),
                    found: v.kind_name(),
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn node(&self) -> &dyn Control {
        match self {
            Self::Int(p) => p.node(),
            Self::Text(p) => p.node(),
            Self::Colour(p) => p.node(),
        }
    }

    pub fn subscribe(&self, callback: impl Fn(&PropertyValue) + 'static) -> Subscription {
        match self {
            Self::Int(p) => p.subscribe(move |v| callback(&PropertyValue::Int(*v))),
            Self::Text(p) => p.subscribe(move |s| callback(&PropertyValue::Text(s.clone()))),
            Self::Colour(p) => p.subscribe(move |c| callback(&PropertyValue::Colour(*c))),
        }
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        match self {
            Self::Int(p) => p.version(),
            Self::Text(p) => p.version(),
            Self::Colour(p) => p.version(),
        }
    }
}

impl From<IntProperty> for AnyProperty {
    fn from(p: IntProperty) -> Self {
        Self::Int(p)
    }
}

impl From<TextProperty> for AnyProperty {
    fn from(p: TextProperty) -> Self {
        Self::Text(p)
    }
}

impl From<ColourProperty> for AnyProperty {
    fn from(p: ColourProperty) -> Self {
        Self::Colour(p)
    }
}
