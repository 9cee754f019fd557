#![forbid(unsafe_code)]

//! Error type for property construction and type-erased access.
//!
//! Only programming errors surface here. Out-of-range numbers clamp and bad
//! control text is dropped; neither produces an error.

use crate::control::ControlKind;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, PropertyError>;

/// Errors from building or addressing properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    /// The toolkit cannot build the control a variant needs.
    NotImplemented { control: ControlKind },
    /// `min` is greater than `max`.
    InvalidBounds { min: i64, max: i64 },
    /// A type-erased value was routed to a property of another kind.
    TypeMismatch {
        property: String,
        expected: &'static str,
        found: &'static str,
    },
    /// A sheet already holds a property with this name.
    DuplicateName(String),
    /// No property with this name exists in the sheet.
    UnknownProperty(String),
}

impl std::fmt::Display for PropertyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotImplemented { control } => {
                write!(f, "not implemented: toolkit cannot build a {control}")
            }
            Self::InvalidBounds { min, max } => {
                write!(f, "invalid bounds: min {min} is greater than max {max}")
            }
            Self::TypeMismatch {
                property,
                expected,
                found,
            } => write!(
                f,
                "type mismatch on '{property}': expected {expected} value, found {found}"
            ),
            Self::DuplicateName(name) => write!(f, "duplicate property name '{name}'"),
            Self::UnknownProperty(name) => write!(f, "unknown property '{name}'"),
        }
    }
}

impl std::error::Error for PropertyError {}
