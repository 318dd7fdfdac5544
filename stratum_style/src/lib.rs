// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stratum Style: cascade resolution and animated styles.
//!
//! This crate turns sparse specified values into fully resolved styles
//! and layers time-based animation on top. It builds on the property
//! catalog and [`Value`](stratum_property::Value) contract from
//! `stratum_property` and the frame timing from `stratum_progress`.
//!
//! ## Core Concepts
//!
//! ### The cascade
//!
//! [`Cascade::resolve`] takes a [`Lookup`] (the specified values an
//! external provider matched for one element) plus an optional parent
//! [`Style`] and produces a [`StaticStyle`]: one computed value per
//! property, stored as reference-counted per-group bundles. Whole
//! bundles are shared with the parent or with the cascade's initial
//! values whenever nothing in the group was specified, which makes the
//! common "nothing special about this element" case O(groups).
//!
//! Each style also carries dependency bitmasks; given a parent's
//! changed-property set, [`StaticStyle::compute_dependencies`] reports
//! which of this style's properties went stale, enabling incremental
//! tree-wide restyles without re-running the cascade.
//!
//! ### Animation
//!
//! When `transition-*` or `animation-*` properties are in play,
//! [`AnimatedStyle::new`] wraps the resolved style, seeds transitions
//! and keyframe animations from the previous frame's style, and
//! [`AnimatedStyle::advance`] re-applies interpolated overrides each
//! frame tick.
//!
//! ## Quick Start
//!
//! ```rust
//! use stratum_property::{Color, Property, Value};
//! use stratum_style::{Cascade, Lookup};
//!
//! let cascade = Cascade::new();
//!
//! let mut lookup = Lookup::new();
//! lookup.set(Property::Color, Value::Color(Color::rgb(0.0, 0.5, 1.0)));
//! let parent = cascade.resolve(&lookup, None);
//!
//! let child = cascade.resolve(&Lookup::new(), Some(&parent));
//! assert_eq!(child.get_value(Property::Color), parent.get_value(Property::Color));
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod animated_style;
mod animation;
mod dynamic;
mod keyframes;
mod lookup;
mod provider;
mod section;
mod static_style;
mod transition;

pub use animated_style::{AnimatedStyle, PreviousStyle};
pub use keyframes::{Keyframe, Keyframes};
pub use lookup::Lookup;
pub use provider::StyleProvider;
pub use section::Section;
pub use static_style::{Cascade, StaticStyle, Style};
