// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::rc::Rc;

use hashbrown::HashMap;
use smallvec::SmallVec;

use stratum_property::{
    Ease, Group, Keyword, Number, Property, PropertySet, StyleAccess, Value,
};

use crate::animation::{Direction, FillMode, KeyframeAnimation, PlayState, StyleAnimation};
use crate::dynamic::DynamicAnimation;
use crate::provider::StyleProvider;
use crate::section::Section;
use crate::static_style::{StaticStyle, Style};
use crate::transition::Transition;

/// The style the previous frame rendered with, if any.
///
/// Passed to [`AnimatedStyle::new`] so a restyle can carry in-flight
/// transitions and running keyframe animations across, instead of
/// restarting them.
#[derive(Clone, Copy, Debug)]
pub enum PreviousStyle<'a> {
    /// First style for this element; nothing to carry over.
    None,
    /// The element was not animating.
    Static(&'a StaticStyle),
    /// The element was animating.
    Animated(&'a AnimatedStyle),
}

impl<'a> PreviousStyle<'a> {
    /// The previous cascade result for `property`, ignoring overrides.
    fn intrinsic_value(&self, property: Property) -> Option<&'a Value> {
        match self {
            Self::None => None,
            Self::Static(style) => Some(style.get_value(property)),
            Self::Animated(style) => Some(style.intrinsic.get_value(property)),
        }
    }

    /// The previous effective value for `property`, overrides included.
    fn effective_value(&self, property: Property) -> Option<&'a Value> {
        match self {
            Self::None => None,
            Self::Static(style) => Some(style.get_value(property)),
            Self::Animated(style) => Some(style.get_value(property)),
        }
    }

    fn find_transition(&self, property: Property) -> Option<&'a Transition> {
        match self {
            Self::Animated(style) => find_transition(&style.animations, property),
            _ => None,
        }
    }

    fn find_animation(&self, name: &str) -> Option<&'a KeyframeAnimation> {
        match self {
            Self::Animated(style) => find_keyframe(&style.animations, name),
            _ => None,
        }
    }
}

/// The per-frame override table.
///
/// Replaced wholesale on every advance, never edited in place, so the
/// changed-set diff in [`AnimatedStyle::advance`] always compares two
/// complete generations.
#[derive(Debug)]
pub(crate) struct Overrides {
    set: PropertySet,
    values: Box<[Option<Value>]>,
    variables: HashMap<Rc<str>, Value>,
}

impl Overrides {
    fn new() -> Self {
        Self {
            set: PropertySet::new(),
            values: (0..Property::COUNT).map(|_| None).collect(),
            variables: HashMap::new(),
        }
    }

    pub(crate) fn set(&mut self, property: Property, value: Value) {
        self.set.insert(property);
        self.values[property.index() as usize] = Some(value);
    }

    pub(crate) fn set_variable(&mut self, name: Rc<str>, value: Value) {
        self.variables.insert(name, value);
    }

    fn get(&self, property: Property) -> Option<&Value> {
        self.values[property.index() as usize].as_ref()
    }
}

/// A resolved style with time-based overrides layered on top.
///
/// Wraps one intrinsic [`StaticStyle`] and maintains the set of active
/// animations plus their current contribution. This is the one mutable
/// entity in the model: it represents this frame's rendering state, not
/// a cached cascade result.
///
/// Dependency tracking ([`compute_dependencies`](Self::compute_dependencies))
/// delegates to the intrinsic style only. Dependency changes caused
/// purely by animation are not tracked, so a parent restyle cannot
/// perfectly predict animated-property staleness; callers compensate by
/// ticking animated subtrees every frame anyway.
#[derive(Debug)]
pub struct AnimatedStyle {
    intrinsic: Rc<StaticStyle>,
    overrides: Overrides,
    animations: SmallVec<[StyleAnimation; 2]>,
}

impl AnimatedStyle {
    /// Wraps a freshly resolved style, starting and carrying over
    /// animations as its `transition-*` and `animation-*` values demand.
    ///
    /// `previous` is the style the element rendered with last frame;
    /// in-flight transitions whose endpoints still match are carried
    /// over with their progress intact, and running keyframe animations
    /// named again keep their play position. The initial contribution
    /// for `timestamp` is applied before returning.
    #[must_use]
    pub fn new(
        intrinsic: Rc<StaticStyle>,
        parent: Option<&dyn Style>,
        timestamp: u64,
        provider: &dyn StyleProvider,
        previous: PreviousStyle<'_>,
    ) -> Self {
        let mut animations: SmallVec<[StyleAnimation; 2]> = SmallVec::new();
        create_transitions(&intrinsic, timestamp, &previous, &mut animations);
        create_animations(&intrinsic, parent, timestamp, provider, &previous, &mut animations);
        if let Some(dynamic) = DynamicAnimation::new(&intrinsic, timestamp) {
            animations.push(StyleAnimation::Dynamic(dynamic));
        }
        let mut style = Self {
            intrinsic,
            overrides: Overrides::new(),
            animations,
        };
        style.apply_all();
        style
    }

    /// Returns the effective value: the animated override if present,
    /// the intrinsic computed value otherwise.
    #[must_use]
    pub fn get_value(&self, property: Property) -> &Value {
        self.overrides
            .get(property)
            .unwrap_or_else(|| self.intrinsic.get_value(property))
    }

    /// Returns the current value of an animated custom variable.
    #[must_use]
    pub fn get_variable(&self, name: &str) -> Option<&Value> {
        self.overrides.variables.get(name)
    }

    /// Always the intrinsic style's section; animations carry no
    /// provenance.
    #[must_use]
    pub fn get_section(&self, property: Property) -> Option<&Section> {
        self.intrinsic.get_section(property)
    }

    /// Delegates to the intrinsic style. See the type documentation for
    /// the limitation this implies.
    #[must_use]
    pub fn compute_dependencies(&self, parent_changed: PropertySet) -> PropertySet {
        self.intrinsic.compute_dependencies(parent_changed)
    }

    /// Returns the wrapped cascade result.
    #[must_use]
    pub fn intrinsic(&self) -> &Rc<StaticStyle> {
        &self.intrinsic
    }

    /// Returns `true` while any animation is active.
    ///
    /// A wrapper that returns `false` here will never change again and
    /// can be unwrapped back to its intrinsic style.
    #[must_use]
    pub fn has_animations(&self) -> bool {
        !self.animations.is_empty()
    }

    /// Returns `true` if no animation will produce further visible
    /// change at or after `timestamp`.
    #[must_use]
    pub fn is_static(&self, timestamp: u64) -> bool {
        self.animations.iter().all(|a| a.is_static(timestamp))
    }

    /// Advances all animations to `timestamp` and re-applies their
    /// contributions, dropping finished transitions.
    ///
    /// Returns the set of properties whose effective value changed since
    /// the previous advance.
    pub fn advance(&mut self, timestamp: u64) -> PropertySet {
        let mut advanced: SmallVec<[StyleAnimation; 2]> = SmallVec::new();
        for animation in &self.animations {
            let next = animation.advance(timestamp);
            if next.is_finished() {
                continue;
            }
            advanced.push(next);
        }
        self.animations = advanced;

        let old = core::mem::replace(&mut self.overrides, Overrides::new());
        self.apply_all();

        let mut changed = PropertySet::new();
        for property in (old.set | self.overrides.set).iter() {
            let was = old
                .get(property)
                .unwrap_or_else(|| self.intrinsic.get_value(property));
            let now = self
                .overrides
                .get(property)
                .unwrap_or_else(|| self.intrinsic.get_value(property));
            if was != now {
                changed.insert(property);
            }
        }
        changed
    }

    fn apply_all(&mut self) {
        let intrinsic: &StaticStyle = &self.intrinsic;
        for animation in &self.animations {
            animation.apply_values(intrinsic, &mut self.overrides);
        }
    }
}

impl StyleAccess for AnimatedStyle {
    fn get_value(&self, property: Property) -> &Value {
        Self::get_value(self, property)
    }
}

impl Style for AnimatedStyle {
    fn get_section(&self, property: Property) -> Option<&Section> {
        Self::get_section(self, property)
    }

    fn compute_dependencies(&self, parent_changed: PropertySet) -> PropertySet {
        Self::compute_dependencies(self, parent_changed)
    }

    /// A child may share a bundle only while no animation overrides any
    /// of the group's values; otherwise it must recompute against the
    /// advanced values.
    fn shareable_bundle(&self, group: Group) -> Option<&Rc<[Value]>> {
        if self.overrides.set.intersects(group.mask()) {
            return None;
        }
        self.intrinsic.shareable_bundle(group)
    }
}

fn find_transition(animations: &[StyleAnimation], property: Property) -> Option<&Transition> {
    animations.iter().find_map(|animation| match animation {
        StyleAnimation::Transition(t) if t.property() == property => Some(t),
        _ => None,
    })
}

fn find_keyframe<'a>(
    animations: &'a [StyleAnimation],
    name: &str,
) -> Option<&'a KeyframeAnimation> {
    animations.iter().find_map(|animation| match animation {
        StyleAnimation::Keyframe(k) if k.name() == name => Some(k),
        _ => None,
    })
}

/// Indexes a layered value list the CSS way: shorter lists repeat.
fn nth_cyclic(values: &[Value], index: usize) -> Option<&Value> {
    if values.is_empty() {
        None
    } else {
        Some(&values[index % values.len()])
    }
}

#[expect(clippy::cast_possible_truncation, reason = "non-negative and far below u64::MAX")]
#[expect(clippy::cast_sign_loss, reason = "clamped non-negative")]
fn to_micros(millis: f64) -> u64 {
    if millis <= 0.0 { 0 } else { (millis * 1000.0) as u64 }
}

fn create_transitions(
    intrinsic: &Rc<StaticStyle>,
    timestamp: u64,
    previous: &PreviousStyle<'_>,
    animations: &mut SmallVec<[StyleAnimation; 2]>,
) {
    if matches!(previous, PreviousStyle::None) {
        return;
    }
    let entries = intrinsic.get_value(Property::TransitionProperty).as_slice();
    let durations = intrinsic.get_value(Property::TransitionDuration).as_slice();
    let delays = intrinsic.get_value(Property::TransitionDelay).as_slice();
    let eases = intrinsic
        .get_value(Property::TransitionTimingFunction)
        .as_slice();
    for (i, entry) in entries.iter().enumerate() {
        let duration = to_micros(
            nth_cyclic(durations, i)
                .and_then(Value::as_number)
                .map_or(0.0, Number::millis),
        );
        let delay = to_micros(
            nth_cyclic(delays, i)
                .and_then(Value::as_number)
                .map_or(0.0, Number::millis),
        );
        if duration + delay == 0 {
            continue;
        }
        let ease = nth_cyclic(eases, i)
            .and_then(Value::as_ease)
            .unwrap_or(Ease::EASE);
        match entry.as_keyword() {
            Some(Keyword::None) => {}
            Some(Keyword::All) => {
                for property in PropertySet::all().iter().filter(|p| p.animatable()) {
                    start_transition(
                        intrinsic, property, ease, duration, delay, timestamp, previous,
                        animations,
                    );
                }
            }
            _ => {
                if let Some(property) = entry.as_ident().and_then(Property::by_name)
                    && property.animatable()
                {
                    start_transition(
                        intrinsic, property, ease, duration, delay, timestamp, previous,
                        animations,
                    );
                }
            }
        }
    }
}

fn start_transition(
    intrinsic: &StaticStyle,
    property: Property,
    ease: Ease,
    duration: u64,
    delay: u64,
    timestamp: u64,
    previous: &PreviousStyle<'_>,
    animations: &mut SmallVec<[StyleAnimation; 2]>,
) {
    // `all` plus an explicit entry may both name a property; first wins.
    if find_transition(animations, property).is_some() {
        return;
    }
    let end = intrinsic.get_value(property);
    let Some(previous_end) = previous.intrinsic_value(property) else {
        return;
    };
    if previous_end == end {
        // Same endpoints as before: keep the in-flight transition (with
        // its progress) rather than restarting it.
        if let Some(transition) = previous.find_transition(property)
            && !transition.is_finished()
        {
            animations.push(StyleAnimation::Transition(transition.advance(timestamp)));
        }
        return;
    }
    let Some(observed) = previous.effective_value(property) else {
        return;
    };
    if observed == end {
        return;
    }
    animations.push(StyleAnimation::Transition(Transition::new(
        property,
        observed.clone(),
        ease,
        duration,
        delay,
        timestamp,
    )));
}

fn create_animations(
    intrinsic: &Rc<StaticStyle>,
    parent: Option<&dyn Style>,
    timestamp: u64,
    provider: &dyn StyleProvider,
    previous: &PreviousStyle<'_>,
    animations: &mut SmallVec<[StyleAnimation; 2]>,
) {
    let names = intrinsic.get_value(Property::AnimationName).as_slice();
    let durations = intrinsic.get_value(Property::AnimationDuration).as_slice();
    let delays = intrinsic.get_value(Property::AnimationDelay).as_slice();
    let eases = intrinsic
        .get_value(Property::AnimationTimingFunction)
        .as_slice();
    let counts = intrinsic
        .get_value(Property::AnimationIterationCount)
        .as_slice();
    let directions = intrinsic.get_value(Property::AnimationDirection).as_slice();
    let play_states = intrinsic.get_value(Property::AnimationPlayState).as_slice();
    let fill_modes = intrinsic.get_value(Property::AnimationFillMode).as_slice();
    for (i, entry) in names.iter().enumerate() {
        // `none` and anything else that is not a name is skipped.
        let Some(name) = entry.as_ident() else {
            continue;
        };
        if find_keyframe(animations, name).is_some() {
            continue;
        }
        let play_state = nth_cyclic(play_states, i).map_or(PlayState::Running, PlayState::from_value);
        if let Some(running) = previous.find_animation(name) {
            // Named again across a restyle: keep the play position, but
            // honor a changed play-state.
            animations.push(StyleAnimation::Keyframe(
                running.advance_with_play_state(timestamp, play_state),
            ));
            continue;
        }
        let Some(keyframes) = provider.keyframes(name) else {
            log::debug!("no keyframes named `{name}`, skipping animation");
            continue;
        };
        if keyframes.is_empty() {
            continue;
        }
        let duration = to_micros(
            nth_cyclic(durations, i)
                .and_then(Value::as_number)
                .map_or(0.0, Number::millis),
        );
        if duration == 0 {
            continue;
        }
        let delay = to_micros(
            nth_cyclic(delays, i)
                .and_then(Value::as_number)
                .map_or(0.0, Number::millis),
        );
        let iteration_count = nth_cyclic(counts, i).map_or(1.0, |value| {
            if value.as_keyword() == Some(Keyword::Infinite) {
                f64::INFINITY
            } else {
                value.as_number().map_or(1.0, |n| n.value)
            }
        });
        let ease = nth_cyclic(eases, i)
            .and_then(Value::as_ease)
            .unwrap_or(Ease::EASE);
        let direction = nth_cyclic(directions, i).map_or(Direction::Normal, Direction::from_value);
        let fill_mode = nth_cyclic(fill_modes, i).map_or(FillMode::None, FillMode::from_value);
        let computed = keyframes.compute(
            intrinsic.as_ref(),
            parent.map(|p| p as &dyn StyleAccess),
        );
        animations.push(StyleAnimation::Keyframe(KeyframeAnimation::new(
            Rc::from(name),
            Rc::new(computed),
            timestamp,
            duration,
            delay,
            iteration_count,
            ease,
            direction,
            play_state,
            fill_mode,
        )));
    }
}
