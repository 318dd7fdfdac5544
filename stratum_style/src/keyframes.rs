// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::Rc;
use alloc::vec::Vec;

use stratum_property::{ComputeContext, Property, PropertySet, StyleAccess, Value};

/// One frame of a keyframe set.
///
/// A frame declares values for some properties (and custom variables) at
/// a fixed offset within the animation.
#[derive(Clone, Debug)]
pub struct Keyframe {
    offset: f64,
    declarations: Vec<(Property, Value)>,
    variables: Vec<(Rc<str>, Value)>,
}

impl Keyframe {
    /// Creates an empty frame at the given offset in `[0, 1]`.
    #[must_use]
    pub fn new(offset: f64) -> Self {
        debug_assert!((0.0..=1.0).contains(&offset), "offset must lie in [0, 1]");
        Self {
            offset,
            declarations: Vec::new(),
            variables: Vec::new(),
        }
    }

    /// Declares a property value on this frame.
    #[must_use]
    pub fn set(mut self, property: Property, value: Value) -> Self {
        self.declarations.push((property, value));
        self
    }

    /// Declares a custom variable on this frame.
    #[must_use]
    pub fn set_variable(mut self, name: &str, value: Value) -> Self {
        self.variables.push((Rc::from(name), value));
        self
    }
}

/// A named animation's keyframes, as supplied by the provider.
///
/// Frames are kept sorted by offset. Properties a frame set animates but
/// does not declare at offset 0 or 1 implicitly start or end at the
/// style's own value.
///
/// # Example
///
/// ```rust
/// use stratum_property::{Number, Property, Value};
/// use stratum_style::{Keyframe, Keyframes};
///
/// let keyframes = Keyframes::new([
///     Keyframe::new(0.0).set(Property::Opacity, Value::Number(Number::new(0.0))),
///     Keyframe::new(1.0).set(Property::Opacity, Value::Number(Number::new(1.0))),
/// ]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Keyframes {
    frames: Vec<Keyframe>,
}

impl Keyframes {
    /// Creates a keyframe set, sorting frames by offset.
    #[must_use]
    pub fn new(frames: impl IntoIterator<Item = Keyframe>) -> Self {
        let mut frames: Vec<Keyframe> = frames.into_iter().collect();
        frames.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        Self { frames }
    }

    /// Returns `true` if the set declares nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames
            .iter()
            .all(|f| f.declarations.is_empty() && f.variables.is_empty())
    }

    /// Resolves every declared value against the given style context.
    ///
    /// Animations sample computed values, so the declared (specified)
    /// values are computed once, when the animation starts.
    #[must_use]
    pub(crate) fn compute(
        &self,
        style: &dyn StyleAccess,
        parent: Option<&dyn StyleAccess>,
    ) -> Self {
        let cx = ComputeContext { style, parent };
        let frames = self
            .frames
            .iter()
            .map(|frame| Keyframe {
                offset: frame.offset,
                declarations: frame
                    .declarations
                    .iter()
                    .map(|(property, value)| (*property, value.compute(*property, &cx).0))
                    .collect(),
                variables: frame.variables.clone(),
            })
            .collect();
        Self { frames }
    }

    /// Returns the set of properties any frame declares.
    pub(crate) fn properties(&self) -> PropertySet {
        self.frames
            .iter()
            .flat_map(|f| f.declarations.iter().map(|(p, _)| *p))
            .collect()
    }

    /// Returns the names of all declared variables, with duplicates.
    pub(crate) fn variable_names(&self) -> impl Iterator<Item = &Rc<str>> {
        self.frames
            .iter()
            .flat_map(|f| f.variables.iter().map(|(name, _)| name))
    }

    /// Samples a property at the given eased progress.
    ///
    /// `fallback` is the style's own value, used for the implicit start
    /// and end frames. Progress outside `[0, 1]` extrapolates on the
    /// outermost segment, so overshooting easings overshoot here too.
    pub(crate) fn value(&self, property: Property, progress: f64, fallback: &Value) -> Value {
        let mut entries: Vec<(f64, &Value)> = self
            .frames
            .iter()
            .filter_map(|frame| {
                frame
                    .declarations
                    .iter()
                    .find(|(p, _)| *p == property)
                    .map(|(_, v)| (frame.offset, v))
            })
            .collect();
        if entries.is_empty() {
            return fallback.clone();
        }
        if entries[0].0 > 0.0 {
            entries.insert(0, (0.0, fallback));
        }
        if entries[entries.len() - 1].0 < 1.0 {
            entries.push((1.0, fallback));
        }
        sample(&entries, progress)
    }

    /// Samples a custom variable at the given eased progress.
    ///
    /// Variables have no style fallback; outside the declared range the
    /// nearest declared value holds.
    pub(crate) fn variable_value(&self, name: &str, progress: f64) -> Option<Value> {
        let mut entries: Vec<(f64, &Value)> = self
            .frames
            .iter()
            .filter_map(|frame| {
                frame
                    .variables
                    .iter()
                    .find(|(n, _)| **n == *name)
                    .map(|(_, v)| (frame.offset, v))
            })
            .collect();
        if entries.is_empty() {
            return None;
        }
        if entries[0].0 > 0.0 {
            entries.insert(0, (0.0, entries[0].1));
        }
        if entries[entries.len() - 1].0 < 1.0 {
            entries.push((1.0, entries[entries.len() - 1].1));
        }
        Some(sample(&entries, progress))
    }
}

/// Interpolates within the segment of `entries` surrounding `progress`.
///
/// `entries` is sorted and has at least two elements spanning offsets 0
/// to 1. Non-interpolable segments snap to the nearer endpoint.
fn sample(entries: &[(f64, &Value)], progress: f64) -> Value {
    debug_assert!(entries.len() >= 2);
    let hi = entries
        .iter()
        .position(|(offset, _)| *offset >= progress)
        .unwrap_or(entries.len() - 1)
        .max(1);
    let (lo_offset, lo_value) = entries[hi - 1];
    let (hi_offset, hi_value) = entries[hi];
    let local = if hi_offset > lo_offset {
        (progress - lo_offset) / (hi_offset - lo_offset)
    } else {
        1.0
    };
    lo_value.transition(hi_value, local).unwrap_or_else(|| {
        if local < 0.5 {
            lo_value.clone()
        } else {
            hi_value.clone()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratum_property::{Keyword, Number};

    fn opacity(value: f64) -> Value {
        Value::Number(Number::new(value))
    }

    fn fade() -> Keyframes {
        Keyframes::new([
            Keyframe::new(1.0).set(Property::Opacity, opacity(1.0)),
            Keyframe::new(0.0).set(Property::Opacity, opacity(0.0)),
        ])
    }

    #[test]
    fn frames_are_sorted_by_offset() {
        let keyframes = fade();
        assert_eq!(keyframes.value(Property::Opacity, 0.0, &opacity(9.0)), opacity(0.0));
        assert_eq!(keyframes.value(Property::Opacity, 0.25, &opacity(9.0)), opacity(0.25));
        assert_eq!(keyframes.value(Property::Opacity, 1.0, &opacity(9.0)), opacity(1.0));
    }

    #[test]
    fn missing_endpoints_use_the_fallback() {
        let keyframes = Keyframes::new([
            Keyframe::new(0.5).set(Property::Opacity, opacity(0.0)),
        ]);
        let fallback = opacity(1.0);
        assert_eq!(keyframes.value(Property::Opacity, 0.0, &fallback), opacity(1.0));
        assert_eq!(keyframes.value(Property::Opacity, 0.5, &fallback), opacity(0.0));
        assert_eq!(keyframes.value(Property::Opacity, 0.75, &fallback), opacity(0.5));
        assert_eq!(keyframes.value(Property::Opacity, 1.0, &fallback), opacity(1.0));
    }

    #[test]
    fn undeclared_property_returns_fallback() {
        let keyframes = fade();
        let fallback = Value::Keyword(Keyword::None);
        assert_eq!(keyframes.value(Property::Filter, 0.5, &fallback), fallback);
    }

    #[test]
    fn non_interpolable_segments_snap_at_the_midpoint() {
        let keyframes = Keyframes::new([
            Keyframe::new(0.0).set(Property::Filter, Value::Keyword(Keyword::None)),
            Keyframe::new(1.0).set(Property::Filter, Value::ident("blur")),
        ]);
        let fallback = Value::Keyword(Keyword::None);
        assert_eq!(
            keyframes.value(Property::Filter, 0.4, &fallback),
            Value::Keyword(Keyword::None)
        );
        assert_eq!(
            keyframes.value(Property::Filter, 0.6, &fallback),
            Value::ident("blur")
        );
    }

    #[test]
    fn overshoot_extrapolates_on_the_outer_segment() {
        let keyframes = fade();
        assert_eq!(
            keyframes.value(Property::Opacity, 1.2, &opacity(9.0)),
            opacity(1.2)
        );
    }

    #[test]
    fn variables_clamp_outside_their_range() {
        let keyframes = Keyframes::new([
            Keyframe::new(0.25).set_variable("glow", opacity(2.0)),
            Keyframe::new(0.75).set_variable("glow", opacity(4.0)),
        ]);
        assert_eq!(keyframes.variable_value("glow", 0.0), Some(opacity(2.0)));
        assert_eq!(keyframes.variable_value("glow", 0.5), Some(opacity(3.0)));
        assert_eq!(keyframes.variable_value("glow", 1.0), Some(opacity(4.0)));
        assert_eq!(keyframes.variable_value("other", 0.5), None);
    }

    #[test]
    fn properties_collects_all_frames() {
        let keyframes = Keyframes::new([
            Keyframe::new(0.0).set(Property::Opacity, opacity(0.0)),
            Keyframe::new(1.0).set(Property::MinWidth, Value::Number(Number::px(10.0))),
        ]);
        let set = keyframes.properties();
        assert!(set.contains(Property::Opacity));
        assert!(set.contains(Property::MinWidth));
        assert_eq!(set.len(), 2);
    }
}
