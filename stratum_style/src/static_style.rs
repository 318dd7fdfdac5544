// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;

use stratum_property::{
    ComputeContext, Dependencies, Group, Keyword, Number, Property, PropertySet, StyleAccess,
    Value,
};

use crate::lookup::Lookup;
use crate::section::Section;

/// The common read contract of resolved styles.
///
/// Both [`StaticStyle`] and the animated wrapper in this crate implement
/// it, so parents of either kind can feed a child's cascade.
pub trait Style: StyleAccess {
    /// Returns the section the property's declaration came from, if any.
    fn get_section(&self, property: Property) -> Option<&Section>;

    /// Maps a parent's changed-property set to this style's stale set.
    fn compute_dependencies(&self, parent_changed: PropertySet) -> PropertySet;

    /// Returns the group's value bundle when it may be shared by
    /// reference, or `None` when the caller must recompute the group.
    fn shareable_bundle(&self, group: Group) -> Option<&Rc<[Value]>>;
}

/// The four per-style dependency bitmasks, filled in during resolution.
#[derive(Clone, Copy, Debug, Default)]
struct DependencyMasks {
    parent: PropertySet,
    equals: PropertySet,
    color: PropertySet,
    font_size: PropertySet,
}

impl DependencyMasks {
    fn record(&mut self, property: Property, deps: Dependencies) {
        if deps.contains(Dependencies::DEPENDS_ON_PARENT) {
            self.parent.insert(property);
        }
        if deps.contains(Dependencies::EQUALS_PARENT) {
            self.equals.insert(property);
        }
        if deps.contains(Dependencies::DEPENDS_ON_COLOR) {
            self.color.insert(property);
        }
        if deps.contains(Dependencies::DEPENDS_ON_FONT_SIZE) {
            self.font_size.insert(property);
        }
    }
}

/// A fully resolved, immutable style for one element in context.
///
/// Values are stored as one reference-counted bundle per [`Group`];
/// bundles are shared across styles whenever the cascade can prove the
/// group's inputs were identical. The four dependency bitmasks drive
/// incremental restyling via [`compute_dependencies`](Self::compute_dependencies).
#[derive(Clone, Debug)]
pub struct StaticStyle {
    bundles: [Rc<[Value]>; Group::COUNT],
    sections: Option<Box<[Option<Section>]>>,
    depends_on_parent: PropertySet,
    equals_parent: PropertySet,
    depends_on_color: PropertySet,
    depends_on_font_size: PropertySet,
}

impl StaticStyle {
    /// Returns the computed value for a property.
    #[must_use]
    pub fn get_value(&self, property: Property) -> &Value {
        &self.bundles[property.group().index()][property.group_offset()]
    }

    /// Returns the section the property's declaration came from, if any.
    #[must_use]
    pub fn get_section(&self, property: Property) -> Option<&Section> {
        self.sections
            .as_ref()
            .and_then(|sections| sections[property.index() as usize].as_ref())
    }

    /// Maps a parent's changed-property set to this style's stale set.
    ///
    /// The result is the subset of `parent_changed` this style actually
    /// read, fanned out to the properties that read this style's `color`
    /// or `font-size` when those themselves went stale. Callers use this
    /// to restyle a subtree incrementally, without re-running the cascade
    /// for elements whose result cannot have changed.
    #[must_use]
    pub fn compute_dependencies(&self, parent_changed: PropertySet) -> PropertySet {
        let mut changed = parent_changed.intersect(self.depends_on_parent);
        if changed.contains(Property::Color) {
            changed = changed.union(self.depends_on_color);
        }
        if changed.contains(Property::FontSize) {
            changed = changed.union(self.depends_on_font_size);
        }
        changed
    }

    /// Returns the properties whose computed value reads the parent.
    #[must_use]
    pub const fn depends_on_parent(&self) -> PropertySet {
        self.depends_on_parent
    }

    /// Returns the properties whose computed value is identical to the
    /// parent's. Always a subset of [`depends_on_parent`](Self::depends_on_parent).
    #[must_use]
    pub const fn equals_parent(&self) -> PropertySet {
        self.equals_parent
    }

    /// Returns the properties whose computed value reads this style's
    /// `color`.
    #[must_use]
    pub const fn depends_on_color(&self) -> PropertySet {
        self.depends_on_color
    }

    /// Returns the properties whose computed value reads this style's
    /// `font-size`.
    #[must_use]
    pub const fn depends_on_font_size(&self) -> PropertySet {
        self.depends_on_font_size
    }
}

impl StyleAccess for StaticStyle {
    fn get_value(&self, property: Property) -> &Value {
        Self::get_value(self, property)
    }
}

impl Style for StaticStyle {
    fn get_section(&self, property: Property) -> Option<&Section> {
        Self::get_section(self, property)
    }

    fn compute_dependencies(&self, parent_changed: PropertySet) -> PropertySet {
        Self::compute_dependencies(self, parent_changed)
    }

    fn shareable_bundle(&self, group: Group) -> Option<&Rc<[Value]>> {
        Some(&self.bundles[group.index()])
    }
}

/// The cascade resolver.
///
/// A cascade owns the process-wide initial bundles (one per group) that
/// unspecified, non-inherited groups borrow by reference. Construct one
/// and reuse it for every element; two cascades never share bundles.
///
/// # Example
///
/// ```rust
/// use stratum_property::{Color, Property, Value};
/// use stratum_style::{Cascade, Lookup};
///
/// let cascade = Cascade::new();
///
/// let mut lookup = Lookup::new();
/// lookup.set(Property::Color, Value::Color(Color::rgb(1.0, 0.0, 0.0)));
/// let parent = cascade.resolve(&lookup, None);
///
/// // A child with nothing specified inherits the parent's color.
/// let child = cascade.resolve(&Lookup::new(), Some(&parent));
/// assert_eq!(
///     child.get_value(Property::Color),
///     &Value::Color(Color::rgb(1.0, 0.0, 0.0)),
/// );
/// ```
#[derive(Debug)]
pub struct Cascade {
    initial: [Rc<[Value]>; Group::COUNT],
}

impl Default for Cascade {
    fn default() -> Self {
        Self::new()
    }
}

impl Cascade {
    /// Creates a cascade, resolving the initial bundle for every group.
    ///
    /// Initial bundles go through the same group computation as any other
    /// style, so order-dependent rules (the border-width short-circuit in
    /// particular) hold for them too.
    #[must_use]
    pub fn new() -> Self {
        let raw: [Rc<[Value]>; Group::COUNT] = Group::ALL
            .map(|group| group.properties().map(Property::initial_value).collect());
        let lookup = Lookup::new();
        let mut bundles: [Option<Rc<[Value]>>; Group::COUNT] = Default::default();
        let mut deps = DependencyMasks::default();
        let mut sections = None;
        for group in Group::ALL {
            let bundle = {
                let view = PartialStyle {
                    fallback: &raw,
                    resolved: &bundles,
                };
                compute_group(group, &lookup, &view, None, &mut deps, &mut sections)
            };
            bundles[group.index()] = Some(bundle);
        }
        debug_assert!(
            deps.parent.is_empty() && deps.color.is_empty() && deps.font_size.is_empty(),
            "initial values must not read their context"
        );
        Self {
            initial: bundles.map(|bundle| bundle.expect("every group resolved")),
        }
    }

    /// Resolves a lookup against an optional parent into a [`StaticStyle`].
    ///
    /// Groups with no specified property either share the parent's bundle
    /// (inherited groups) or borrow this cascade's initial bundle, both by
    /// reference; only groups the lookup touches are recomputed. With an
    /// empty lookup the whole call is O(groups), not O(properties).
    ///
    /// Resolution is lenient: a specified value that cannot be computed
    /// for its property degrades to the initial value, never an error.
    #[must_use]
    pub fn resolve(&self, lookup: &Lookup, parent: Option<&dyn Style>) -> StaticStyle {
        let set = lookup.set_properties();
        let mut bundles: [Option<Rc<[Value]>>; Group::COUNT] = Default::default();
        let mut deps = DependencyMasks::default();
        let mut sections = None;
        for group in Group::ALL {
            let shared = if set.intersects(group.mask()) {
                None
            } else {
                self.share_group(group, parent, &mut deps)
            };
            let bundle = match shared {
                Some(bundle) => bundle,
                None => {
                    let view = PartialStyle {
                        fallback: &self.initial,
                        resolved: &bundles,
                    };
                    compute_group(group, lookup, &view, parent, &mut deps, &mut sections)
                }
            };
            bundles[group.index()] = Some(bundle);
        }
        StaticStyle {
            bundles: bundles.map(|bundle| bundle.expect("every group resolved")),
            sections,
            depends_on_parent: deps.parent,
            equals_parent: deps.equals,
            depends_on_color: deps.color,
            depends_on_font_size: deps.font_size,
        }
    }

    /// Picks the bundle to share for a group none of whose properties are
    /// specified, or `None` when the group must be recomputed after all
    /// (an animated parent may be overriding one of its values).
    fn share_group(
        &self,
        group: Group,
        parent: Option<&dyn Style>,
        deps: &mut DependencyMasks,
    ) -> Option<Rc<[Value]>> {
        if group.inherits()
            && let Some(parent) = parent
        {
            let bundle = parent.shareable_bundle(group)?;
            deps.parent = deps.parent.union(group.mask());
            deps.equals = deps.equals.union(group.mask());
            return Some(Rc::clone(bundle));
        }
        Some(Rc::clone(&self.initial[group.index()]))
    }
}

/// Computes one group's bundle from scratch, in ascending id order.
fn compute_group(
    group: Group,
    lookup: &Lookup,
    view: &PartialStyle<'_>,
    parent: Option<&dyn Style>,
    deps: &mut DependencyMasks,
    sections: &mut Option<Box<[Option<Section>]>>,
) -> Rc<[Value]> {
    let cx = ComputeContext {
        style: view,
        parent: parent.map(|p| p as &dyn StyleAccess),
    };
    let mut values: Vec<Value> = Vec::with_capacity(group.len());
    for property in group.properties() {
        // A border or outline without a visible line style has no width,
        // whatever was specified. The paired style property has the
        // immediately preceding id, so it is already in `values`.
        if let Some(style_property) = property.paired_style() {
            let line_style = &values[style_property.group_offset()];
            if matches!(
                line_style.as_keyword(),
                Some(Keyword::None | Keyword::Hidden)
            ) {
                values.push(Value::Number(Number::px(0.0)));
                continue;
            }
        }
        let fallback = if parent.is_some() && property.inherits() {
            Value::Inherit
        } else {
            Value::Initial
        };
        let specified = lookup.value(property).unwrap_or(&fallback);
        let (value, value_deps) = specified.compute(property, &cx);
        deps.record(property, value_deps);
        if let Some(section) = lookup.section(property) {
            let slots = sections
                .get_or_insert_with(|| (0..Property::COUNT).map(|_| None).collect());
            slots[property.index() as usize] = Some(section.clone());
        }
        values.push(value);
    }
    values.into()
}

/// The resolver's view of the style being built.
///
/// Groups resolve in storage order and `color`/`font-size` live in the
/// first group, so context reads issued while computing later groups see
/// final values. Reads into a group that has not been resolved yet fall
/// back to the initial bundles; the catalog's evaluation-order rules
/// keep well-formed values from ever taking that path.
struct PartialStyle<'a> {
    fallback: &'a [Rc<[Value]>; Group::COUNT],
    resolved: &'a [Option<Rc<[Value]>>; Group::COUNT],
}

impl StyleAccess for PartialStyle<'_> {
    fn get_value(&self, property: Property) -> &Value {
        let group = property.group();
        let bundle: &[Value] = match &self.resolved[group.index()] {
            Some(bundle) => bundle,
            None => &self.fallback[group.index()],
        };
        &bundle[property.group_offset()]
    }
}
