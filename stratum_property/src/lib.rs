// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stratum Property: the style property catalog and its values.
//!
//! This crate defines the closed set of style properties the cascade
//! operates on, and the polymorphic [`Value`] type that carries their
//! data. Style resolution, animation, and providers live in
//! `stratum_style`; frame-clock progress tracking lives in
//! `stratum_progress`.
//!
//! ## Core Concepts
//!
//! ### The catalog
//!
//! [`Property`] is a dense enumeration of every property, grouped into
//! [`Group`]s whose members are contiguous in id order. Group layout is
//! checked at compile time, which lets the cascade store computed values
//! as one shared slice per group and lets [`PropertySet`] fit in a single
//! `u64`.
//!
//! ### Values
//!
//! [`Value`] is immutable and cheap to clone. Four operations define its
//! contract:
//!
//! - [`Value::compute`] - specified value to computed value, reporting
//!   [`Dependencies`] on the parent, `color`, and `font-size`
//! - equality via `PartialEq` - drives change detection
//! - [`Value::transition`] - interpolation, `None` when shapes mismatch
//! - `Display` - deterministic serialization for diagnostics
//!
//! ## Quick Start
//!
//! ```rust
//! use stratum_property::{Number, Property, Value};
//!
//! // Interpolate a pixel length halfway.
//! let from = Value::Number(Number::px(0.0));
//! let to = Value::Number(Number::px(10.0));
//! assert_eq!(
//!     from.transition(&to, 0.5),
//!     Some(Value::Number(Number::px(5.0))),
//! );
//!
//! // Every property has an initial value and a group.
//! let initial = Property::Opacity.initial_value();
//! assert_eq!(initial, Value::Number(Number::new(1.0)));
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod catalog;
mod ease;
mod set;
mod value;

pub use catalog::{Group, Property};
pub use ease::Ease;
pub use set::PropertySet;
pub use value::{
    ArrayPolicy, Color, ComputeContext, Dependencies, Keyword, Number, Pulse, StyleAccess, Unit,
    Value, parse_simple,
};
