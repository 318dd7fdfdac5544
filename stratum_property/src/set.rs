// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dense bitsets over property ids.
//!
//! [`PropertySet`] is the workhorse of the cascade's bookkeeping: lookup
//! "set" masks, the per-style dependency masks, and changed-property sets
//! are all values of this type. The catalog is known to fit in 64 ids at
//! compile time, so a single `u64` suffices.

use core::fmt;
use core::iter::FromIterator;
use core::ops::{BitAnd, BitOr};

use crate::catalog::Property;

/// A set of [`Property`] ids, backed by a `u64`.
///
/// All combining operations are by value; `PropertySet` is `Copy`.
///
/// # Example
///
/// ```rust
/// use stratum_property::{Property, PropertySet};
///
/// let mut set = PropertySet::new();
/// set.insert(Property::Color);
/// set.insert(Property::FontSize);
///
/// assert!(set.contains(Property::Color));
/// assert!(!set.contains(Property::Opacity));
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct PropertySet(u64);

impl PropertySet {
    /// Creates an empty set.
    #[must_use]
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Creates a set from a raw bit pattern.
    ///
    /// Bits at or above [`Property::COUNT`] must be zero.
    #[must_use]
    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Returns the set containing every property in the catalog.
    #[must_use]
    #[inline]
    pub const fn all() -> Self {
        Self(if Property::COUNT == 64 {
            u64::MAX
        } else {
            (1_u64 << Property::COUNT) - 1
        })
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of properties in the set.
    #[must_use]
    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns `true` if the set contains `property`.
    #[must_use]
    #[inline]
    pub const fn contains(self, property: Property) -> bool {
        self.0 & (1 << property.index()) != 0
    }

    /// Adds a property to the set.
    #[inline]
    pub fn insert(&mut self, property: Property) {
        self.0 |= 1 << property.index();
    }

    /// Removes a property from the set.
    #[inline]
    pub fn remove(&mut self, property: Property) {
        self.0 &= !(1 << property.index());
    }

    /// Returns the union of the two sets.
    #[must_use]
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns the intersection of the two sets.
    #[must_use]
    #[inline]
    pub const fn intersect(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Returns the properties in `self` that are not in `other`.
    #[must_use]
    #[inline]
    pub const fn subtract(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Returns `true` if the two sets have any property in common.
    #[must_use]
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns an iterator over the properties in the set, in id order.
    pub fn iter(self) -> impl Iterator<Item = Property> {
        let mut bits = self.0;
        core::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            #[expect(clippy::cast_possible_truncation, reason = "bit index < 64")]
            let index = bits.trailing_zeros() as u16;
            bits &= bits - 1;
            Property::from_index(index)
        })
    }
}

impl BitOr for PropertySet {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitAnd for PropertySet {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        self.intersect(rhs)
    }
}

impl FromIterator<Property> for PropertySet {
    fn from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Self {
        let mut set = Self::new();
        for property in iter {
            set.insert(property);
        }
        set
    }
}

impl fmt::Debug for PropertySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec::Vec;

    #[test]
    fn empty_set() {
        let set = PropertySet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert!(!set.contains(Property::Color));
        assert_eq!(set.iter().count(), 0);
    }

    #[test]
    fn insert_and_remove() {
        let mut set = PropertySet::new();
        set.insert(Property::Color);
        set.insert(Property::Opacity);
        assert!(set.contains(Property::Color));
        assert!(set.contains(Property::Opacity));

        set.remove(Property::Color);
        assert!(!set.contains(Property::Color));
        assert!(set.contains(Property::Opacity));
    }

    #[test]
    fn set_algebra() {
        let a: PropertySet = [Property::Color, Property::FontSize].into_iter().collect();
        let b: PropertySet = [Property::FontSize, Property::Opacity].into_iter().collect();

        assert_eq!(a.union(b).len(), 3);
        assert_eq!(a.intersect(b).iter().collect::<Vec<_>>(), [Property::FontSize]);
        assert_eq!(a.subtract(b).iter().collect::<Vec<_>>(), [Property::Color]);
        assert!(a.intersects(b));
        assert!(!a.intersects(PropertySet::new()));

        assert_eq!(a | b, a.union(b));
        assert_eq!(a & b, a.intersect(b));
    }

    #[test]
    fn all_covers_catalog() {
        let all = PropertySet::all();
        assert_eq!(all.len(), Property::COUNT);
        for p in all.iter() {
            assert!(all.contains(p));
        }
    }

    #[test]
    fn iter_is_in_id_order() {
        let set: PropertySet = [Property::Opacity, Property::Color, Property::MinWidth]
            .into_iter()
            .collect();
        let ids: Vec<u16> = set.iter().map(Property::index).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn debug_lists_names() {
        let set: PropertySet = [Property::Color].into_iter().collect();
        assert!(format!("{set:?}").contains("Color"));
    }
}
