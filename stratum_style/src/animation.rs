// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::Rc;

use stratum_progress::{ProgressTracker, State};
use stratum_property::{Ease, Keyword, Value};

use crate::animated_style::Overrides;
use crate::dynamic::DynamicAnimation;
use crate::keyframes::Keyframes;
use crate::static_style::StaticStyle;
use crate::transition::Transition;

/// Which way each iteration cycle of an animation plays.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    Normal,
    Reverse,
    Alternate,
    AlternateReverse,
}

impl Direction {
    /// Unrecognized values fall back to `normal`, lenient as everywhere
    /// else in the cascade.
    pub(crate) fn from_value(value: &Value) -> Self {
        match value.as_keyword() {
            Some(Keyword::Reverse) => Self::Reverse,
            Some(Keyword::Alternate) => Self::Alternate,
            Some(Keyword::AlternateReverse) => Self::AlternateReverse,
            _ => Self::Normal,
        }
    }

    /// Returns whether the given iteration cycle plays backwards.
    pub(crate) const fn is_reversed(self, cycle: u64) -> bool {
        match self {
            Self::Normal => false,
            Self::Reverse => true,
            Self::Alternate => cycle % 2 == 1,
            Self::AlternateReverse => cycle % 2 == 0,
        }
    }
}

/// Whether an animation's clock is advancing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum PlayState {
    Running,
    Paused,
}

impl PlayState {
    pub(crate) fn from_value(value: &Value) -> Self {
        match value.as_keyword() {
            Some(Keyword::Paused) => Self::Paused,
            _ => Self::Running,
        }
    }
}

/// Whether an animation's effect applies outside its active interval.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum FillMode {
    None,
    Forwards,
    Backwards,
    Both,
}

impl FillMode {
    pub(crate) fn from_value(value: &Value) -> Self {
        match value.as_keyword() {
            Some(Keyword::Forwards) => Self::Forwards,
            Some(Keyword::Backwards) => Self::Backwards,
            Some(Keyword::Both) => Self::Both,
            _ => Self::None,
        }
    }

    /// Returns whether the animation installs overrides in `state`.
    pub(crate) fn is_executing(self, state: State) -> bool {
        match state {
            State::Before => matches!(self, Self::Backwards | Self::Both),
            State::During => true,
            State::After => matches!(self, Self::Forwards | Self::Both),
        }
    }
}

/// A named, repeatable, multi-property keyframe animation.
///
/// Keyframe animations never report themselves finished: they loop while
/// the tracker runs and persist per fill mode afterwards. They leave the
/// active list only when a restyle stops naming them.
#[derive(Clone, Debug)]
pub(crate) struct KeyframeAnimation {
    name: Rc<str>,
    keyframes: Rc<Keyframes>,
    ease: Ease,
    direction: Direction,
    play_state: PlayState,
    fill_mode: FillMode,
    tracker: ProgressTracker,
}

impl KeyframeAnimation {
    pub(crate) fn new(
        name: Rc<str>,
        keyframes: Rc<Keyframes>,
        timestamp: u64,
        duration: u64,
        delay: u64,
        iteration_count: f64,
        ease: Ease,
        direction: Direction,
        play_state: PlayState,
        fill_mode: FillMode,
    ) -> Self {
        let mut tracker = ProgressTracker::new();
        tracker.start(duration, delay, iteration_count);
        let mut animation = Self {
            name,
            keyframes,
            ease,
            direction,
            play_state,
            fill_mode,
            tracker,
        };
        animation.step(timestamp);
        animation
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    fn step(&mut self, timestamp: u64) {
        match self.play_state {
            PlayState::Running => self.tracker.advance_frame(timestamp),
            PlayState::Paused => self.tracker.skip_frame(timestamp),
        }
    }

    /// Returns a snapshot advanced to `timestamp`.
    pub(crate) fn advance(&self, timestamp: u64) -> Self {
        let mut next = self.clone();
        next.step(timestamp);
        next
    }

    /// Returns a snapshot advanced to `timestamp` under a possibly
    /// changed `animation-play-state`. Used when a restyle carries a
    /// running animation over, preserving its play position.
    pub(crate) fn advance_with_play_state(&self, timestamp: u64, play_state: PlayState) -> Self {
        let mut next = self.clone();
        next.play_state = play_state;
        next.step(timestamp);
        next
    }

    pub(crate) fn apply_values(&self, intrinsic: &StaticStyle, overrides: &mut Overrides) {
        if !self.fill_mode.is_executing(self.tracker.get_state()) {
            return;
        }
        let reversed = self.direction.is_reversed(self.tracker.get_iteration_cycle());
        let progress = self.ease.transform(self.tracker.get_progress(reversed));
        for property in self.keyframes.properties().iter() {
            let fallback = intrinsic.get_value(property);
            overrides.set(property, self.keyframes.value(property, progress, fallback));
        }
        for name in self.keyframes.variable_names() {
            if let Some(value) = self.keyframes.variable_value(name, progress) {
                overrides.set_variable(name.clone(), value);
            }
        }
    }

    pub(crate) fn is_static(&self, timestamp: u64) -> bool {
        if self.play_state == PlayState::Paused {
            return true;
        }
        let mut probe = self.tracker.clone();
        probe.advance_frame(timestamp);
        probe.get_state() == State::After
    }
}

/// One active animation of any kind.
#[derive(Clone, Debug)]
pub(crate) enum StyleAnimation {
    Transition(Transition),
    Keyframe(KeyframeAnimation),
    Dynamic(DynamicAnimation),
}

impl StyleAnimation {
    /// Returns a snapshot advanced to `timestamp`.
    ///
    /// Animations advance as new immutable snapshots rather than in
    /// place, so a style under construction can still read its
    /// predecessor's un-advanced state.
    pub(crate) fn advance(&self, timestamp: u64) -> Self {
        match self {
            Self::Transition(t) => Self::Transition(t.advance(timestamp)),
            Self::Keyframe(k) => Self::Keyframe(k.advance(timestamp)),
            Self::Dynamic(d) => Self::Dynamic(d.advance(timestamp)),
        }
    }

    /// Installs this animation's contribution into the override table.
    pub(crate) fn apply_values(&self, intrinsic: &StaticStyle, overrides: &mut Overrides) {
        match self {
            Self::Transition(t) => t.apply_values(intrinsic, overrides),
            Self::Keyframe(k) => k.apply_values(intrinsic, overrides),
            Self::Dynamic(d) => d.apply_values(intrinsic, overrides),
        }
    }

    /// Only transitions ever finish; keyframe animations persist per
    /// fill mode and dynamic values run forever.
    pub(crate) fn is_finished(&self) -> bool {
        match self {
            Self::Transition(t) => t.is_finished(),
            Self::Keyframe(_) | Self::Dynamic(_) => false,
        }
    }

    /// Returns whether no further visible change can occur at or after
    /// `timestamp`.
    pub(crate) fn is_static(&self, timestamp: u64) -> bool {
        match self {
            Self::Transition(t) => t.is_static(timestamp),
            Self::Keyframe(k) => k.is_static(timestamp),
            Self::Dynamic(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_reversal_per_cycle() {
        assert!(!Direction::Normal.is_reversed(0));
        assert!(!Direction::Normal.is_reversed(1));
        assert!(Direction::Reverse.is_reversed(0));
        assert!(Direction::Reverse.is_reversed(1));
        assert!(!Direction::Alternate.is_reversed(0));
        assert!(Direction::Alternate.is_reversed(1));
        assert!(!Direction::Alternate.is_reversed(2));
        assert!(Direction::AlternateReverse.is_reversed(0));
        assert!(!Direction::AlternateReverse.is_reversed(1));
    }

    #[test]
    fn fill_mode_execution_windows() {
        assert!(!FillMode::None.is_executing(State::Before));
        assert!(FillMode::None.is_executing(State::During));
        assert!(!FillMode::None.is_executing(State::After));

        assert!(FillMode::Backwards.is_executing(State::Before));
        assert!(!FillMode::Backwards.is_executing(State::After));

        assert!(!FillMode::Forwards.is_executing(State::Before));
        assert!(FillMode::Forwards.is_executing(State::After));

        assert!(FillMode::Both.is_executing(State::Before));
        assert!(FillMode::Both.is_executing(State::After));
    }

    #[test]
    fn keyword_parsing_is_lenient() {
        assert_eq!(Direction::from_value(&Value::ident("sideways")), Direction::Normal);
        assert_eq!(
            PlayState::from_value(&Value::Keyword(Keyword::Paused)),
            PlayState::Paused
        );
        assert_eq!(
            FillMode::from_value(&Value::Keyword(Keyword::Solid)),
            FillMode::None
        );
    }
}
