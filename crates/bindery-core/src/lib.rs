#![forbid(unsafe_code)]

//! Core: typed properties bound one-to-one to interactive controls.
//!
//! # Role in Bindery
//! `bindery-core` owns the property model. A property is a named value with
//! type-specific validation, a change channel, and exactly one control that
//! displays and edits it. Define it once and get a validated value, a live
//! control, and change notifications for free.
//!
//! # Primary responsibilities
//! - **[`Property`]**: the shared contract (`name`, `value`, `set_value`,
//!   `node`, `subscribe`).
//! - **Variants**: [`IntProperty`] (clamped integer), [`TextProperty`] (free
//!   text), [`ColourProperty`] (fixed [`Colour`] palette).
//! - **[`Channel`]**: synchronous one-to-many change notification.
//! - **[`Toolkit`] / [`Control`]**: the boundary to whatever draws controls.
//! - **[`PropertySheet`]**: named collection with uniform access.
//!
//! # How it fits in the system
//! `bindery-widgets` provides a headless [`Toolkit`]. A GUI or TUI adapter
//! implements the same trait to put real widgets on screen; the property
//! model does not change.
//!
//! # Example
//! ```ignore
//! use bindery_core::prelude::*;
//!
//! let opacity = IntProperty::new(&toolkit, "opacity", 50, 0..=100)?;
//! let _sub = opacity.subscribe(|v| println!("opacity -> {v}"));
//! opacity.set_value(150); // prints "opacity -> 100"
//! ```

pub mod channel;
pub mod control;
pub mod error;
pub mod logging;
pub mod palette;
pub mod property;
pub mod sheet;

pub use channel::{Channel, Subscription};
pub use control::{ChangeHandler, Control, ControlKind, SelectOption, Toolkit, UserTrigger};
pub use error::{PropertyError, Result};
pub use palette::Colour;
pub use property::{
    AnyProperty, ColourProperty, IntBounds, IntCandidate, IntProperty, Property, PropertyValue,
    TextProperty, colour_options, parse_int,
};
pub use sheet::PropertySheet;

/// Common imports.
pub mod prelude {
    pub use crate::channel::Subscription;
    pub use crate::control::{Control, Toolkit, UserTrigger};
    pub use crate::error::{PropertyError, Result};
    pub use crate::palette::Colour;
    pub use crate::property::{
        AnyProperty, ColourProperty, IntBounds, IntProperty, Property, PropertyValue, TextProperty,
    };
    pub use crate::sheet::PropertySheet;
}
