#![forbid(unsafe_code)]

//! Headless control toolkit for Bindery properties.
//!
//! [`HeadlessToolkit`] builds every control kind a property can ask for and
//! keeps them in memory. Tests, scripts and non-visual front-ends use it to
//! drive properties exactly as a user would: type, blur, pick an option.

pub mod headless;

pub use headless::{HeadlessControl, HeadlessToolkit, Key, headless};
