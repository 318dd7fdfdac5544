// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use stratum_progress::{ProgressTracker, State};
use stratum_property::{Ease, Property, Value};

use crate::animated_style::Overrides;
use crate::static_style::StaticStyle;

/// A one-shot, single-property transition.
///
/// The start value is captured when the transition begins; the end value
/// is read from the current intrinsic style at apply time, so a
/// transition tracks a moving target if the cascade changes again while
/// it runs.
#[derive(Clone, Debug)]
pub(crate) struct Transition {
    property: Property,
    start: Value,
    ease: Ease,
    tracker: ProgressTracker,
}

impl Transition {
    pub(crate) fn new(
        property: Property,
        start: Value,
        ease: Ease,
        duration: u64,
        delay: u64,
        timestamp: u64,
    ) -> Self {
        let mut tracker = ProgressTracker::new();
        tracker.start(duration, delay, 1.0);
        tracker.advance_frame(timestamp);
        Self {
            property,
            start,
            ease,
            tracker,
        }
    }

    pub(crate) const fn property(&self) -> Property {
        self.property
    }

    /// Returns a snapshot advanced to `timestamp`.
    pub(crate) fn advance(&self, timestamp: u64) -> Self {
        let mut next = self.clone();
        next.tracker.advance_frame(timestamp);
        next
    }

    pub(crate) fn apply_values(&self, intrinsic: &StaticStyle, overrides: &mut Overrides) {
        match self.tracker.get_state() {
            // Still in the delay: hold the captured start value.
            State::Before => overrides.set(self.property, self.start.clone()),
            State::During => {
                let end = intrinsic.get_value(self.property);
                let progress = self.ease.transform(self.tracker.get_progress(false));
                let value = self
                    .start
                    .transition(end, progress)
                    .unwrap_or_else(|| end.clone());
                overrides.set(self.property, value);
            }
            // Finished: no override, the style falls through to intrinsic.
            State::After => {}
        }
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.tracker.get_state() == State::After
    }

    pub(crate) fn is_static(&self, timestamp: u64) -> bool {
        let mut probe = self.tracker.clone();
        probe.advance_frame(timestamp);
        probe.get_state() == State::After
    }

    #[cfg(test)]
    pub(crate) fn progress(&self) -> f64 {
        self.tracker.get_progress(false)
    }
}
