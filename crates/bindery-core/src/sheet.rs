#![forbid(unsafe_code)]

//! An ordered collection of properties addressed by name.
//!
//! A sheet is what an inspector panel or a canvas binds against: every style
//! property of a shape, in display order, with one place to observe them all.

use crate::channel::Subscription;
use crate::error::{PropertyError, Result};
use crate::property::{AnyProperty, PropertyValue};

/// Insertion-ordered properties with unique names.
#[derive(Debug, Default)]
pub struct PropertySheet {
    properties: Vec<AnyProperty>,
}

impl PropertySheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a property. Names must be unique within the sheet.
    pub fn insert(&mut self, property: impl Into<AnyProperty>) -> Result<()> {
        let property = property.into();
        if self.get(property.name()).is_some() {
            return Err(PropertyError::DuplicateName(property.name().to_string()));
        }
        tracing::debug!(property = %property.name(), kind = property.kind_name(), "sheet insert");
        self.properties.push(property);
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, property: impl Into<AnyProperty>) -> Result<Self> {
        self.insert(property)?;
        Ok(self)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AnyProperty> {
        self.properties.iter().find(|p| p.name() == name)
    }

    /// Remove and return a property, keeping the order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<AnyProperty> {
        let idx = self.properties.iter().position(|p| p.name() == name)?;
        Some(self.properties.remove(idx))
    }

    /// Route `value` to the named property.
    pub fn set(&self, name: &str, value: impl Into<PropertyValue>) -> Result<()> {
        self.get(name)
            .ok_or_else(|| PropertyError::UnknownProperty(name.to_string()))?
            .set_value(value.into())
    }

    /// Current value of the named property.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<PropertyValue> {
        self.get(name).map(AnyProperty::value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnyProperty> {
        self.properties.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(AnyProperty::name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Observe every property currently in the sheet. The callback gets the
    /// property name and its new value. Properties inserted later are not
    /// covered.
    pub fn watch_all(
        &self,
        callback: impl Fn(&str, &PropertyValue) + 'static,
    ) -> Vec<Subscription> {
        let callback = std::rc::Rc::new(callback);
        self.properties
            .iter()
            .map(|p| {
                let cb = std::rc::Rc::clone(&callback);
                let name = p.name().to_string();
                p.subscribe(move |v| cb(&name, v))
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a PropertySheet {
    type Item = &'a AnyProperty;
    type IntoIter = std::slice::Iter<'a, AnyProperty>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.iter()
    }
}
