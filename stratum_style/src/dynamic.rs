// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use stratum_property::PropertySet;

use crate::animated_style::Overrides;
use crate::static_style::StaticStyle;

/// The perpetual re-evaluator for time-varying intrinsic values.
///
/// Unlike transitions and keyframe animations this carries no tracker:
/// the timestamp itself is the whole state. It never finishes and never
/// reports itself static, which keeps the surrounding machinery ticking
/// for as long as the style contains a dynamic value.
#[derive(Clone, Debug)]
pub(crate) struct DynamicAnimation {
    timestamp: u64,
    properties: PropertySet,
}

impl DynamicAnimation {
    /// Creates the re-evaluator if any intrinsic value is dynamic.
    pub(crate) fn new(intrinsic: &StaticStyle, timestamp: u64) -> Option<Self> {
        let properties: PropertySet = PropertySet::all()
            .iter()
            .filter(|p| intrinsic.get_value(*p).is_dynamic())
            .collect();
        if properties.is_empty() {
            return None;
        }
        Some(Self {
            timestamp,
            properties,
        })
    }

    pub(crate) const fn advance(&self, timestamp: u64) -> Self {
        Self {
            timestamp,
            properties: self.properties,
        }
    }

    pub(crate) fn apply_values(&self, intrinsic: &StaticStyle, overrides: &mut Overrides) {
        for property in self.properties.iter() {
            let value = intrinsic.get_value(property).get_dynamic_value(self.timestamp);
            overrides.set(property, value);
        }
    }
}
