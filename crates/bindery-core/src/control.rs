#![forbid(unsafe_code)]

//! Boundary between properties and whatever UI toolkit draws them.
//!
//! A property never knows how its control is rendered. It asks a
//! [`Toolkit`] for a control of a given [`ControlKind`], then talks to the
//! returned handle through the [`Control`] trait only:
//!
//! - read the displayed text ([`Control::display_value`]),
//! - overwrite it programmatically ([`Control::set_display_value`]),
//! - listen for user edits ([`Control::on_user_change`]).
//!
//! Programmatic writes must never fire user-change handlers. That is what
//! keeps model -> control synchronisation from looping back into the model.

use std::any::Any;
use std::rc::Rc;

use crate::error::{PropertyError, Result};

/// What the user did to make the control report a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserTrigger {
    /// A key was released while the control had focus.
    KeyUp,
    /// The edit was committed (enter, blur, selection made).
    Change,
}

/// The kinds of control a property can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    NumberInput,
    TextInput,
    Select,
}

impl std::fmt::Display for ControlKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::NumberInput => "number input",
            Self::TextInput => "text input",
            Self::Select => "select",
        })
    }
}

/// One entry of a selection control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectOption {
    /// Underlying value reported by [`Control::display_value`].
    pub value: &'static str,
    /// Visible text.
    pub label: &'static str,
}

impl SelectOption {
    #[must_use]
    pub const fn new(value: &'static str, label: &'static str) -> Self {
        Self { value, label }
    }
}

/// Callback registered through [`Control::on_user_change`].
pub type ChangeHandler = Rc<dyn Fn(UserTrigger)>;

/// Opaque handle to an interactive control.
///
/// Methods take `&self`: controls are single-threaded handles with interior
/// state, the same way the property that owns them is.
pub trait Control {
    /// Which kind of control this is.
    fn kind(&self) -> ControlKind;

    /// The text currently shown. For a select, the chosen option's value.
    fn display_value(&self) -> String;

    /// Replace the shown text without notifying user-change handlers.
    fn set_display_value(&self, value: &str);

    /// Register a handler for user-driven edits.
    fn on_user_change(&self, handler: ChangeHandler);

    /// An exposed attribute such as `min` or `max`, if the control has it.
    fn attribute(&self, _name: &str) -> Option<String> {
        None
    }

    /// Access to the concrete toolkit type.
    fn as_any(&self) -> &dyn Any;
}

impl std::fmt::Debug for dyn Control {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Control")
            .field("kind", &self.kind())
            .field("display_value", &self.display_value())
            .finish()
    }
}

/// Factory for the controls a property binds to.
///
/// Every method defaults to [`PropertyError::NotImplemented`], so a toolkit
/// only implements the kinds it can actually draw and property construction
/// fails for the rest.
pub trait Toolkit {
    /// A numeric input. `None` bounds expose no attribute for that side.
    fn number_input(&self, min: Option<i64>, max: Option<i64>) -> Result<Box<dyn Control>> {
        let _ = (min, max);
        Err(PropertyError::NotImplemented {
            control: ControlKind::NumberInput,
        })
    }

    /// A single-line text input.
    fn text_input(&self) -> Result<Box<dyn Control>> {
        Err(PropertyError::NotImplemented {
            control: ControlKind::TextInput,
        })
    }

    /// A selection list offering exactly `options`, in order.
    fn select(&self, options: &[SelectOption]) -> Result<Box<dyn Control>> {
        let _ = options;
        Err(PropertyError::NotImplemented {
            control: ControlKind::Select,
        })
    }
}
