#![forbid(unsafe_code)]

//! In-memory controls with scripted user interaction.
//!
//! [`HeadlessControl`] keeps the displayed text and the registered
//! user-change handlers. The `press`/`type_text`/`blur`/`enter`/`select_option`
//! methods act like a user would and fire handlers; [`Control::set_display_value`]
//! acts like the program and never does.
//!
//! # Example
//! ```ignore
//! use bindery_core::prelude::*;
//! use bindery_widgets::{HeadlessToolkit, headless};
//!
//! let tk = HeadlessToolkit::new();
//! let title = TextProperty::new(&tk, "title", "")?;
//! headless(title.node()).unwrap().type_text("hi");
//! assert_eq!(title.value(), "hi");
//! ```

use std::any::Any;
use std::cell::{Cell, RefCell};

use bindery_core::control::{
    ChangeHandler, Control, ControlKind, SelectOption, Toolkit, UserTrigger,
};
use bindery_core::error::Result;
use unicode_segmentation::UnicodeSegmentation;

/// A key the user can press on a focused control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Backspace,
}

/// Characters a number input lets through.
fn accepts_numeric(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E')
}

/// A control that lives only in memory.
pub struct HeadlessControl {
    kind: ControlKind,
    text: RefCell<String>,
    min: Option<i64>,
    max: Option<i64>,
    options: Vec<SelectOption>,
    handlers: RefCell<Vec<ChangeHandler>>,
    /// Number of user-change events fired so far.
    fired: Cell<u64>,
}

impl HeadlessControl {
    fn with_kind(kind: ControlKind) -> Self {
        Self {
            kind,
            text: RefCell::new(String::new()),
            min: None,
            max: None,
            options: Vec::new(),
            handlers: RefCell::new(Vec::new()),
            fired: Cell::new(0),
        }
    }

    /// A number input exposing `min`/`max` only for bounded sides.
    #[must_use]
    pub fn number(min: Option<i64>, max: Option<i64>) -> Self {
        Self {
            min,
            max,
            ..Self::with_kind(ControlKind::NumberInput)
        }
    }

    /// A single-line text input.
    #[must_use]
    pub fn text() -> Self {
        Self::with_kind(ControlKind::TextInput)
    }

    /// A selection list. The first option starts selected.
    #[must_use]
    pub fn select(options: &[SelectOption]) -> Self {
        let first = options.first().map(|o| o.value.to_string()).unwrap_or_default();
        Self {
            text: RefCell::new(first),
            options: options.to_vec(),
            ..Self::with_kind(ControlKind::Select)
        }
    }

    /// Options of a select, in display order. Empty for other kinds.
    #[must_use]
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Label of the selected option.
    #[must_use]
    pub fn selected_label(&self) -> Option<&'static str> {
        let text = self.text.borrow();
        self.options
            .iter()
            .find(|o| o.value == text.as_str())
            .map(|o| o.label)
    }

    /// How many user-change events this control has fired.
    #[must_use]
    pub fn fired(&self) -> u64 {
        self.fired.get()
    }

    /// Press one key and release it (fires [`UserTrigger::KeyUp`]).
    ///
    /// Returns `false` when the control ignores the key: selects take no
    /// typing and number inputs refuse non-numeric characters.
    pub fn press(&self, key: Key) -> bool {
        if self.kind == ControlKind::Select {
            return false;
        }
        {
            let mut text = self.text.borrow_mut();
            match key {
                Key::Char(c) => {
                    if self.kind == ControlKind::NumberInput && !accepts_numeric(c) {
                        return false;
                    }
                    text.push(c);
                }
                Key::Backspace => {
                    let cut = text.grapheme_indices(true).next_back().map(|(i, _)| i);
                    match cut {
                        Some(i) => text.truncate(i),
                        None => return false,
                    }
                }
            }
        }
        self.fire(UserTrigger::KeyUp);
        true
    }

    /// Press every character of `s` in turn.
    pub fn type_text(&self, s: &str) {
        for c in s.chars() {
            self.press(Key::Char(c));
        }
    }

    /// Select-all and delete.
    pub fn clear(&self) {
        if self.kind == ControlKind::Select {
            return;
        }
        self.text.borrow_mut().clear();
        self.fire(UserTrigger::KeyUp);
    }

    /// Leave the control, committing the edit (fires [`UserTrigger::Change`]).
    pub fn blur(&self) {
        self.fire(UserTrigger::Change);
    }

    /// Replace the text and commit in one step, like a spinner click or a
    /// paste followed by enter. No key events fire.
    pub fn enter(&self, s: &str) {
        if self.kind == ControlKind::Select {
            return;
        }
        *self.text.borrow_mut() = s.to_string();
        self.fire(UserTrigger::Change);
    }

    /// Pick the option whose value is `value`. Unknown values are refused.
    pub fn select_option(&self, value: &str) -> bool {
        if !self.options.iter().any(|o| o.value == value) {
            return false;
        }
        *self.text.borrow_mut() = value.to_string();
        self.fire(UserTrigger::Change);
        true
    }

    /// One-line rendering for logs and snapshots.
    #[must_use]
    pub fn render_line(&self) -> String {
        let text = self.text.borrow();
        match self.kind {
            ControlKind::NumberInput => {
                let range = match (self.min, self.max) {
                    (None, None) => String::new(),
                    (min, max) => format!(
                        " {}..{}",
                        min.map(|v| v.to_string()).unwrap_or_default(),
                        max.map(|v| format!("={v}")).unwrap_or_default()
                    ),
                };
                format!("[{text}]{range}")
            }
            ControlKind::TextInput => format!("[{text}]"),
            ControlKind::Select => self
                .options
                .iter()
                .map(|o| {
                    if o.value == text.as_str() {
                        format!("[{}]", o.label)
                    } else {
                        o.label.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    fn fire(&self, trigger: UserTrigger) {
        self.fired.set(self.fired.get() + 1);
        tracing::trace!(kind = %self.kind, ?trigger, text = %self.text.borrow(), "user change");
        // Handlers may write back into this control.
        let handlers: Vec<ChangeHandler> = self.handlers.borrow().clone();
        for handler in &handlers {
            handler(trigger);
        }
    }
}

impl Control for HeadlessControl {
    fn kind(&self) -> ControlKind {
        self.kind
    }

    fn display_value(&self) -> String {
        self.text.borrow().clone()
    }

    fn set_display_value(&self, value: &str) {
        let mut text = self.text.borrow_mut();
        if *text != value {
            text.clear();
            text.push_str(value);
        }
    }

    fn on_user_change(&self, handler: ChangeHandler) {
        self.handlers.borrow_mut().push(handler);
    }

    fn attribute(&self, name: &str) -> Option<String> {
        match (self.kind, name) {
            (ControlKind::NumberInput, "min") => self.min.map(|v| v.to_string()),
            (ControlKind::NumberInput, "max") => self.max.map(|v| v.to_string()),
            (ControlKind::NumberInput, "type") => Some("number".to_string()),
            (ControlKind::TextInput, "type") => Some("text".to_string()),
            _ => None,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl std::fmt::Debug for HeadlessControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessControl")
            .field("kind", &self.kind)
            .field("text", &self.text.borrow())
            .field("handlers", &self.handlers.borrow().len())
            .finish()
    }
}

/// Downcast a property's control to the headless implementation.
#[must_use]
pub fn headless(control: &dyn Control) -> Option<&HeadlessControl> {
    control.as_any().downcast_ref()
}

/// [`Toolkit`] producing [`HeadlessControl`]s.
#[derive(Debug, Default)]
pub struct HeadlessToolkit {
    built: Cell<usize>,
}

impl HeadlessToolkit {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Controls built so far.
    #[must_use]
    pub fn built(&self) -> usize {
        self.built.get()
    }

    fn build(&self, control: HeadlessControl) -> Result<Box<dyn Control>> {
        self.built.set(self.built.get() + 1);
        tracing::debug!(kind = %control.kind, "headless control built");
        Ok(Box::new(control))
    }
}

impl Toolkit for HeadlessToolkit {
    fn number_input(&self, min: Option<i64>, max: Option<i64>) -> Result<Box<dyn Control>> {
        self.build(HeadlessControl::number(min, max))
    }

    fn text_input(&self) -> Result<Box<dyn Control>> {
        self.build(HeadlessControl::text())
    }

    fn select(&self, options: &[SelectOption]) -> Result<Box<dyn Control>> {
        self.build(HeadlessControl::select(options))
    }
}
