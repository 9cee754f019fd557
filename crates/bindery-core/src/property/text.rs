#![forbid(unsafe_code)]

//! Free-text property. Any string is valid and is stored exactly as given.

use std::rc::Rc;

use super::{Property, PropertyCore, bind_user_change};
use crate::channel::Subscription;
use crate::control::{Control, Toolkit, UserTrigger};
use crate::error::Result;

fn apply(core: &PropertyCore<String>, text: String) {
    core.commit(text);
    core.sync_display(Clone::clone);
}

// Both triggers propagate: key-up for live updates, change for blur and
// edits that produce no keystroke (paste, autofill).
fn on_user_change(core: &PropertyCore<String>, trigger: UserTrigger) {
    let raw = core.control().display_value();
    if raw != core.get() {
        tracing::trace!(property = %core.name(), ?trigger, "text edited");
        apply(core, raw);
    }
}

/// Unconstrained string property bound to a single-line text input.
pub struct TextProperty {
    core: Rc<PropertyCore<String>>,
}

impl TextProperty {
    pub fn new(
        toolkit: &dyn Toolkit,
        name: impl Into<String>,
        initial: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        let _span = tracing::debug_span!("text_property", property = %name).entered();
        let control = toolkit.text_input()?;
        let core = Rc::new(PropertyCore::new(name, initial.into(), control));
        bind_user_change(&core, core.control(), on_user_change);
        core.sync_display(Clone::clone);
        Ok(Self { core })
    }
}

impl Property for TextProperty {
    type Value = String;
    type Input = String;

    fn name(&self) -> &str {
        self.core.name()
    }

    fn value(&self) -> String {
        self.core.get()
    }

    fn set_value(&self, candidate: impl Into<Self::Input>) {
        apply(&self.core, candidate.into());
    }

    fn node(&self) -> &dyn Control {
        self.core.control()
    }

    fn subscribe(&self, callback: impl Fn(&String) + 'static) -> Subscription {
        self.core.subscribe(callback)
    }

    fn version(&self) -> u64 {
        self.core.version()
    }
}

impl std::fmt::Debug for TextProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextProperty")
            .field("name", &self.name())
            .field("value", &self.value())
            .field("version", &self.version())
            .finish()
    }
}
