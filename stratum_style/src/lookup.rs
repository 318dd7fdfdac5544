// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;

use stratum_property::{Property, PropertySet, Value};

use crate::section::Section;

/// The sparse set of specified values feeding one cascade call.
///
/// A lookup maps property ids to specified values, with an optional
/// [`Section`] recording where each declaration came from. The provider
/// that matched declarations builds one lookup per element per restyle;
/// the resolver consumes it once.
///
/// The "set" bitmask is maintained alongside the slots so the resolver
/// can test whole groups for emptiness without touching the slot array.
///
/// # Example
///
/// ```rust
/// use stratum_property::{Color, Property, Value};
/// use stratum_style::Lookup;
///
/// let mut lookup = Lookup::new();
/// lookup.set(Property::Color, Value::Color(Color::rgb(1.0, 0.0, 0.0)));
///
/// assert!(lookup.set_properties().contains(Property::Color));
/// assert!(lookup.value(Property::Opacity).is_none());
/// ```
#[derive(Debug)]
pub struct Lookup {
    set: PropertySet,
    slots: Box<[Option<Slot>]>,
}

#[derive(Debug)]
struct Slot {
    value: Value,
    section: Option<Section>,
}

impl Default for Lookup {
    fn default() -> Self {
        Self::new()
    }
}

impl Lookup {
    /// Creates an empty lookup.
    #[must_use]
    pub fn new() -> Self {
        Self {
            set: PropertySet::new(),
            slots: (0..Property::COUNT).map(|_| None).collect(),
        }
    }

    /// Sets the specified value for a property.
    ///
    /// A later write for the same property replaces an earlier one, so
    /// providers apply declarations in ascending precedence order.
    pub fn set(&mut self, property: Property, value: Value) {
        self.set_with_section(property, value, None);
    }

    /// Sets the specified value for a property, recording its source.
    pub fn set_with_section(
        &mut self,
        property: Property,
        value: Value,
        section: Option<Section>,
    ) {
        self.set.insert(property);
        self.slots[property.index() as usize] = Some(Slot { value, section });
    }

    /// Returns the bitmask of properties with a specified value.
    #[must_use]
    pub const fn set_properties(&self) -> PropertySet {
        self.set
    }

    /// Returns `true` if no property has a specified value.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Returns the specified value for a property, if one is set.
    #[must_use]
    pub fn value(&self, property: Property) -> Option<&Value> {
        self.slots[property.index() as usize]
            .as_ref()
            .map(|slot| &slot.value)
    }

    /// Returns the section the property's declaration came from, if any.
    #[must_use]
    pub fn section(&self, property: Property) -> Option<&Section> {
        self.slots[property.index() as usize]
            .as_ref()
            .and_then(|slot| slot.section.as_ref())
    }
}
