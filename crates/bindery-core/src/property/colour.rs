#![forbid(unsafe_code)]

//! Colour property restricted to the fixed [`Colour`] palette.

use std::rc::Rc;

use super::{Property, PropertyCore, bind_user_change};
use crate::channel::Subscription;
use crate::control::{Control, SelectOption, Toolkit, UserTrigger};
use crate::error::Result;
use crate::palette::Colour;

fn apply(core: &PropertyCore<Colour>, colour: Colour) {
    core.commit(colour);
    core.sync_display(|c| c.name().to_string());
}

fn on_user_change(core: &PropertyCore<Colour>, trigger: UserTrigger) {
    if trigger != UserTrigger::Change {
        return;
    }
    let raw = core.control().display_value();
    match Colour::from_name(&raw) {
        Some(colour) if colour != core.get() => apply(core, colour),
        Some(_) => {}
        None => {
            tracing::debug!(property = %core.name(), raw = %raw, "unknown colour option; keeping canonical value");
            core.sync_display(|c| c.name().to_string());
        }
    }
}

/// Select options for the palette, in palette order.
#[must_use]
pub fn colour_options() -> [SelectOption; 3] {
    Colour::ALL.map(|c| SelectOption::new(c.name(), c.label()))
}

/// Colour property bound to a selection control listing the palette.
pub struct ColourProperty {
    core: Rc<PropertyCore<Colour>>,
}

impl ColourProperty {
    pub fn new(toolkit: &dyn Toolkit, name: impl Into<String>, initial: Colour) -> Result<Self> {
        let name = name.into();
        let _span = tracing::debug_span!("colour_property", property = %name).entered();
        let control = toolkit.select(&colour_options())?;
        let core = Rc::new(PropertyCore::new(name, initial, control));
        bind_user_change(&core, core.control(), on_user_change);
        core.sync_display(|c| c.name().to_string());
        Ok(Self { core })
    }
}

impl Property for ColourProperty {
    type Value = Colour;
    type Input = Colour;

    fn name(&self) -> &str {
        self.core.name()
    }

    fn value(&self) -> Colour {
        self.core.get()
    }

    fn set_value(&self, candidate: impl Into<Self::Input>) {
        apply(&self.core, candidate.into());
    }

    fn node(&self) -> &dyn Control {
        self.core.control()
    }

    fn subscribe(&self, callback: impl Fn(&Colour) + 'static) -> Subscription {
        self.core.subscribe(callback)
    }

    fn version(&self) -> u64 {
        self.core.version()
    }
}

impl std::fmt::Debug for ColourProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColourProperty")
            .field("name", &self.name())
            .field("value", &self.value())
            .field("version", &self.version())
            .finish()
    }
}
