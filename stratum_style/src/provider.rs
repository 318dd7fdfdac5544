// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::keyframes::Keyframes;

/// The boundary through which the style system reaches external data.
///
/// The provider owns everything parsed from stylesheets that is not part
/// of a single element's lookup, which today means named keyframe sets.
/// The animated layer asks for them when an `animation-name` entry does
/// not match a running or previous animation.
pub trait StyleProvider {
    /// Returns the keyframes registered under `name`, if any.
    fn keyframes(&self, name: &str) -> Option<&Keyframes>;
}

/// A provider with no external data.
impl StyleProvider for () {
    fn keyframes(&self, _name: &str) -> Option<&Keyframes> {
        None
    }
}
