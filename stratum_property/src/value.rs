// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polymorphic style values.
//!
//! [`Value`] is the unit of data the cascade traffics in: one immutable
//! value per property. The kind set is closed; every kind knows how to
//! compute itself against a parent context, compare itself, interpolate
//! towards another value, and serialize itself for diagnostics.
//!
//! Values are cheap to clone: heavy payloads (arrays, strings, maps) are
//! reference-counted internally, and "changing" a value always produces a
//! new one.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::catalog::Property;
use crate::ease::Ease;

bitflags::bitflags! {
    /// How a computed value depends on its context.
    ///
    /// Every [`Value::compute`] call reports one of these classifications;
    /// the cascade ORs them into per-style bitmasks so a later restyle can
    /// tell which properties went stale from the parent's changed set
    /// alone.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct Dependencies: u8 {
        /// The computed value reads the parent style.
        const DEPENDS_ON_PARENT = 1 << 0;
        /// The computed value is identical to the parent's value.
        /// Always implies [`Dependencies::DEPENDS_ON_PARENT`].
        const EQUALS_PARENT = 1 << 1;
        /// The computed value reads this style's `color`.
        const DEPENDS_ON_COLOR = 1 << 2;
        /// The computed value reads this style's `font-size`.
        const DEPENDS_ON_FONT_SIZE = 1 << 3;
    }
}

/// Read access to a style's computed values.
///
/// This is the seam through which [`Value::compute`] consults the style
/// being built (for `currentcolor` and `em` resolution) and the parent
/// style (for inheritance). Resolved styles and the resolver's in-progress
/// scratch state both implement it.
pub trait StyleAccess {
    /// Returns the computed value for `property`.
    fn get_value(&self, property: Property) -> &Value;
}

/// The context a value is computed against.
#[derive(Clone, Copy)]
pub struct ComputeContext<'a> {
    /// The style being built. Only properties with ids lower than the one
    /// currently being computed may be consulted.
    pub style: &'a dyn StyleAccess,
    /// The parent style, if the element has one.
    pub parent: Option<&'a dyn StyleAccess>,
}

impl fmt::Debug for ComputeContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComputeContext")
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

/// A unit for [`Number`] values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Unit {
    /// A unitless number.
    None,
    /// Pixels.
    Px,
    /// Multiples of the font size; resolved to pixels by `compute`.
    Em,
    /// A percentage, kept as-is (the base is a layout concern).
    Percent,
    /// Milliseconds.
    Ms,
    /// Seconds; resolved to milliseconds by `compute`.
    S,
}

impl Unit {
    const fn suffix(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Px => "px",
            Self::Em => "em",
            Self::Percent => "%",
            Self::Ms => "ms",
            Self::S => "s",
        }
    }
}

/// A numeric value with a unit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Number {
    /// The numeric magnitude.
    pub value: f64,
    /// The unit.
    pub unit: Unit,
}

impl Number {
    /// Creates a unitless number.
    #[must_use]
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self {
            value,
            unit: Unit::None,
        }
    }

    /// Creates a pixel length.
    #[must_use]
    #[inline]
    pub const fn px(value: f64) -> Self {
        Self {
            value,
            unit: Unit::Px,
        }
    }

    /// Creates an `em` length.
    #[must_use]
    #[inline]
    pub const fn em(value: f64) -> Self {
        Self {
            value,
            unit: Unit::Em,
        }
    }

    /// Creates a duration in milliseconds.
    #[must_use]
    #[inline]
    pub const fn ms(value: f64) -> Self {
        Self {
            value,
            unit: Unit::Ms,
        }
    }

    /// Creates a duration in seconds.
    #[must_use]
    #[inline]
    pub const fn s(value: f64) -> Self {
        Self {
            value,
            unit: Unit::S,
        }
    }

    /// Returns the duration in milliseconds, or `0.0` for non-durations.
    #[must_use]
    pub fn millis(self) -> f64 {
        match self.unit {
            Unit::Ms => self.value,
            Unit::S => self.value * 1000.0,
            _ => 0.0,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

/// An RGBA color with components in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    /// Red component.
    pub red: f32,
    /// Green component.
    pub green: f32,
    /// Blue component.
    pub blue: f32,
    /// Alpha component.
    pub alpha: f32,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self {
        red: 0.0,
        green: 0.0,
        blue: 0.0,
        alpha: 0.0,
    };

    /// Creates an opaque color.
    #[must_use]
    #[inline]
    pub const fn rgb(red: f32, green: f32, blue: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 1.0,
        }
    }

    /// Creates a color with an explicit alpha.
    #[must_use]
    #[inline]
    pub const fn rgba(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    fn lerp(self, other: Self, progress: f64) -> Self {
        #[expect(clippy::cast_possible_truncation, reason = "interpolation stays in f32 range")]
        fn mix(a: f32, b: f32, t: f64) -> f32 {
            (f64::from(a) * (1.0 - t) + f64::from(b) * t) as f32
        }
        Self {
            red: mix(self.red, other.red, progress),
            green: mix(self.green, other.green, progress),
            blue: mix(self.blue, other.blue, progress),
            alpha: mix(self.alpha, other.alpha, progress),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[expect(clippy::cast_possible_truncation, reason = "clamped to [0, 255]")]
        #[expect(clippy::cast_sign_loss, reason = "clamped to [0, 255]")]
        fn channel(c: f32) -> u8 {
            (c.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
        }
        if self.alpha >= 1.0 {
            write!(
                f,
                "rgb({},{},{})",
                channel(self.red),
                channel(self.green),
                channel(self.blue)
            )
        } else {
            write!(
                f,
                "rgba({},{},{},{})",
                channel(self.red),
                channel(self.green),
                channel(self.blue),
                self.alpha
            )
        }
    }
}

/// A fixed keyword value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// `none`
    None,
    /// `hidden`
    Hidden,
    /// `dotted`
    Dotted,
    /// `dashed`
    Dashed,
    /// `solid`
    Solid,
    /// `double`
    Double,
    /// `normal`
    Normal,
    /// `italic`
    Italic,
    /// `oblique`
    Oblique,
    /// `auto`
    Auto,
    /// `all`
    All,
    /// `repeat`
    Repeat,
    /// `no-repeat`
    NoRepeat,
    /// `regular`
    Regular,
    /// `symbolic`
    Symbolic,
    /// `reverse`
    Reverse,
    /// `alternate`
    Alternate,
    /// `alternate-reverse`
    AlternateReverse,
    /// `running`
    Running,
    /// `paused`
    Paused,
    /// `forwards`
    Forwards,
    /// `backwards`
    Backwards,
    /// `both`
    Both,
    /// `infinite`
    Infinite,
}

impl Keyword {
    /// Returns the keyword's serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Hidden => "hidden",
            Self::Dotted => "dotted",
            Self::Dashed => "dashed",
            Self::Solid => "solid",
            Self::Double => "double",
            Self::Normal => "normal",
            Self::Italic => "italic",
            Self::Oblique => "oblique",
            Self::Auto => "auto",
            Self::All => "all",
            Self::Repeat => "repeat",
            Self::NoRepeat => "no-repeat",
            Self::Regular => "regular",
            Self::Symbolic => "symbolic",
            Self::Reverse => "reverse",
            Self::Alternate => "alternate",
            Self::AlternateReverse => "alternate-reverse",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Forwards => "forwards",
            Self::Backwards => "backwards",
            Self::Both => "both",
            Self::Infinite => "infinite",
        }
    }
}

/// How two arrays of different lengths are matched up for interpolation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArrayPolicy {
    /// Cyclic indexing; the result has `lcm(len_a, len_b)` items. Used for
    /// layered properties such as background layers.
    Repeat,
    /// The shorter list is padded with zero-like defaults before pairwise
    /// interpolation. Used for stacked properties such as shadows.
    Extend,
}

/// A perpetually time-varying value.
///
/// Dynamic values oscillate between two endpoints with the given period;
/// they are re-evaluated against the frame clock on every advance rather
/// than settling.
#[derive(Clone, Debug, PartialEq)]
pub struct Pulse {
    /// Oscillation period in microseconds.
    pub period: u64,
    /// Value at phase 0.
    pub from: Value,
    /// Value at the half-period.
    pub to: Value,
}

/// A style value.
///
/// See the [module documentation](self) for the operation contract.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// The cascade keyword `initial`: compute to the property's initial
    /// value.
    Initial,
    /// The cascade keyword `inherit`: compute to the parent's value.
    Inherit,
    /// The cascade keyword `unset`: `inherit` for inherited properties,
    /// `initial` otherwise.
    Unset,
    /// `currentcolor`: compute to this style's `color` (or, for the
    /// `color` property itself, to the parent's).
    CurrentColor,
    /// A fixed keyword.
    Keyword(Keyword),
    /// An identifier, e.g. a font family or animation name.
    Ident(Rc<str>),
    /// A quoted string.
    Str(Rc<str>),
    /// A number with a unit.
    Number(Number),
    /// A color.
    Color(Color),
    /// An easing function.
    Ease(Ease),
    /// A corner pair (horizontal, vertical), e.g. a border radius.
    Corner(Rc<(Value, Value)>),
    /// A list of values with an interpolation policy.
    Array {
        /// The items, in order.
        items: Rc<[Value]>,
        /// How lists of different lengths interpolate.
        policy: ArrayPolicy,
    },
    /// An OpenType font-feature map, sorted by tag.
    FontFeatures(Rc<[(Rc<str>, f64)]>),
    /// An OpenType font-variation map, sorted by axis tag.
    FontVariations(Rc<[(Rc<str>, f64)]>),
    /// A perpetually time-varying value.
    Dynamic(Rc<Pulse>),
}

impl Value {
    /// Creates an identifier value.
    #[must_use]
    pub fn ident(name: &str) -> Self {
        Self::Ident(Rc::from(name))
    }

    /// Creates a string value.
    #[must_use]
    pub fn string(text: &str) -> Self {
        Self::Str(Rc::from(text))
    }

    /// Creates an array value.
    #[must_use]
    pub fn array(items: impl IntoIterator<Item = Self>, policy: ArrayPolicy) -> Self {
        Self::Array {
            items: items.into_iter().collect(),
            policy,
        }
    }

    /// Creates a corner pair value.
    #[must_use]
    pub fn corner(horizontal: Self, vertical: Self) -> Self {
        Self::Corner(Rc::new((horizontal, vertical)))
    }

    /// Creates a font-feature map, sorting entries by tag.
    #[must_use]
    pub fn font_features(entries: impl IntoIterator<Item = (Rc<str>, f64)>) -> Self {
        let mut entries: Vec<_> = entries.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Self::FontFeatures(entries.into())
    }

    /// Creates a font-variation map, sorting entries by axis tag.
    #[must_use]
    pub fn font_variations(entries: impl IntoIterator<Item = (Rc<str>, f64)>) -> Self {
        let mut entries: Vec<_> = entries.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Self::FontVariations(entries.into())
    }

    /// Returns the contained number, if this is a number value.
    #[must_use]
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the contained color, if this is a color value.
    #[must_use]
    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// Returns the contained keyword, if this is a keyword value.
    #[must_use]
    pub fn as_keyword(&self) -> Option<Keyword> {
        match self {
            Self::Keyword(k) => Some(*k),
            _ => None,
        }
    }

    /// Returns the contained easing function, if this is an ease value.
    #[must_use]
    pub fn as_ease(&self) -> Option<Ease> {
        match self {
            Self::Ease(e) => Some(*e),
            _ => None,
        }
    }

    /// Returns the identifier text, if this is an identifier or string.
    #[must_use]
    pub fn as_ident(&self) -> Option<&str> {
        match self {
            Self::Ident(s) | Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Views the value as a slice of items.
    ///
    /// Arrays yield their items; any other value yields itself as a
    /// one-element slice. This is how the layered `animation-*` and
    /// `transition-*` properties are consumed leniently.
    #[must_use]
    pub fn as_slice(&self) -> &[Self] {
        match self {
            Self::Array { items, .. } => items,
            other => core::slice::from_ref(other),
        }
    }

    /// Computes this specified value into a computed value.
    ///
    /// Computing never fails: unrepresentable inputs degrade to the
    /// property's initial value. Computing an already-computed value is
    /// the identity, so `v.compute(..).0.compute(..) == v.compute(..)`.
    ///
    /// The returned [`Dependencies`] classify what the computation read
    /// from its context.
    #[must_use]
    pub fn compute(&self, property: Property, cx: &ComputeContext<'_>) -> (Self, Dependencies) {
        match self {
            Self::Initial => (property.initial_value(), Dependencies::empty()),
            Self::Inherit => match cx.parent {
                Some(parent) => (
                    parent.get_value(property).clone(),
                    Dependencies::DEPENDS_ON_PARENT | Dependencies::EQUALS_PARENT,
                ),
                None => (property.initial_value(), Dependencies::empty()),
            },
            Self::Unset => {
                if property.inherits() {
                    Self::Inherit.compute(property, cx)
                } else {
                    Self::Initial.compute(property, cx)
                }
            }
            Self::CurrentColor => {
                if property == Property::Color {
                    // `color: currentcolor` means the same as `inherit`.
                    Self::Inherit.compute(property, cx)
                } else {
                    (
                        cx.style.get_value(Property::Color).clone(),
                        Dependencies::DEPENDS_ON_COLOR,
                    )
                }
            }
            Self::Number(n) => match n.unit {
                Unit::Em => {
                    let (base, deps) = font_size_base(property, cx);
                    (Self::Number(Number::px(n.value * base)), deps)
                }
                Unit::S => (
                    Self::Number(Number::ms(n.value * 1000.0)),
                    Dependencies::empty(),
                ),
                _ => (self.clone(), Dependencies::empty()),
            },
            Self::Corner(pair) => {
                let (h, h_deps) = pair.0.compute(property, cx);
                let (v, v_deps) = pair.1.compute(property, cx);
                (Self::corner(h, v), h_deps | v_deps)
            }
            Self::Array { items, policy } => {
                let mut deps = Dependencies::empty();
                let computed: Vec<Self> = items
                    .iter()
                    .map(|item| {
                        let (value, item_deps) = item.compute(property, cx);
                        deps |= item_deps;
                        value
                    })
                    .collect();
                (Self::array(computed, *policy), deps)
            }
            Self::Dynamic(pulse) => {
                let (from, from_deps) = pulse.from.compute(property, cx);
                let (to, to_deps) = pulse.to.compute(property, cx);
                (
                    Self::Dynamic(Rc::new(Pulse {
                        period: pulse.period,
                        from,
                        to,
                    })),
                    from_deps | to_deps,
                )
            }
            Self::Keyword(_)
            | Self::Ident(_)
            | Self::Str(_)
            | Self::Color(_)
            | Self::Ease(_)
            | Self::FontFeatures(_)
            | Self::FontVariations(_) => (self.clone(), Dependencies::empty()),
        }
    }

    /// Interpolates towards `other` at the given progress.
    ///
    /// Returns `None` when the two values have incompatible shapes; the
    /// caller is expected to snap to an endpoint instead. Progress is not
    /// clamped, so overshooting easings interpolate past the endpoints.
    #[must_use]
    pub fn transition(&self, other: &Self, progress: f64) -> Option<Self> {
        if self == other {
            return Some(self.clone());
        }
        match (self, other) {
            (Self::Number(a), Self::Number(b)) if a.unit == b.unit => Some(Self::Number(Number {
                value: lerp(a.value, b.value, progress),
                unit: a.unit,
            })),
            (Self::Color(a), Self::Color(b)) => Some(Self::Color(a.lerp(*b, progress))),
            (Self::Corner(a), Self::Corner(b)) => {
                let h = a.0.transition(&b.0, progress)?;
                let v = a.1.transition(&b.1, progress)?;
                Some(Self::corner(h, v))
            }
            (
                Self::Array {
                    items: a,
                    policy: pa,
                },
                Self::Array {
                    items: b,
                    policy: pb,
                },
            ) if pa == pb => transition_arrays(a, b, *pa, progress),
            (Self::FontVariations(a), Self::FontVariations(b)) if same_tags(a, b) => {
                let mixed: Vec<(Rc<str>, f64)> = a
                    .iter()
                    .zip(b.iter())
                    .map(|((tag, va), (_, vb))| (tag.clone(), lerp(*va, *vb, progress)))
                    .collect();
                Some(Self::FontVariations(mixed.into()))
            }
            _ => None,
        }
    }

    /// Returns `true` if the value (or any nested value) varies with the
    /// frame clock.
    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        match self {
            Self::Dynamic(_) => true,
            Self::Array { items, .. } => items.iter().any(Self::is_dynamic),
            Self::Corner(pair) => pair.0.is_dynamic() || pair.1.is_dynamic(),
            _ => false,
        }
    }

    /// Evaluates the value's appearance at the given timestamp.
    ///
    /// Non-dynamic values return themselves unchanged.
    #[must_use]
    pub fn get_dynamic_value(&self, timestamp: u64) -> Self {
        match self {
            Self::Dynamic(pulse) => {
                if pulse.period == 0 {
                    return pulse.to.clone();
                }
                #[expect(clippy::cast_precision_loss, reason = "phase is below the period")]
                let phase = (timestamp % pulse.period) as f64 / pulse.period as f64;
                // Triangle wave: out and back once per period.
                let progress = if phase < 0.5 {
                    phase * 2.0
                } else {
                    2.0 - phase * 2.0
                };
                pulse
                    .from
                    .transition(&pulse.to, progress)
                    .unwrap_or_else(|| pulse.to.clone())
            }
            Self::Array { items, policy } => Self::array(
                items.iter().map(|item| item.get_dynamic_value(timestamp)),
                *policy,
            ),
            Self::Corner(pair) => Self::corner(
                pair.0.get_dynamic_value(timestamp),
                pair.1.get_dynamic_value(timestamp),
            ),
            _ => self.clone(),
        }
    }

    /// Returns a zero-magnitude value of the same shape, used to pad
    /// [`ArrayPolicy::Extend`] interpolation.
    fn zero_like(&self) -> Option<Self> {
        match self {
            Self::Number(n) => Some(Self::Number(Number {
                value: 0.0,
                unit: n.unit,
            })),
            Self::Color(_) => Some(Self::Color(Color::TRANSPARENT)),
            Self::Corner(pair) => {
                let h = pair.0.zero_like()?;
                let v = pair.1.zero_like()?;
                Some(Self::corner(h, v))
            }
            _ => None,
        }
    }
}

/// Endpoint-exact linear interpolation.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Resolves the font-size base for `em` units.
///
/// The `font-size` property itself is relative to the parent's font size;
/// everything else is relative to this style's own.
fn font_size_base(property: Property, cx: &ComputeContext<'_>) -> (f64, Dependencies) {
    let (value, deps) = if property == Property::FontSize {
        match cx.parent {
            Some(parent) => (
                parent.get_value(Property::FontSize).clone(),
                Dependencies::DEPENDS_ON_PARENT,
            ),
            None => (Property::FontSize.initial_value(), Dependencies::empty()),
        }
    } else {
        (
            cx.style.get_value(Property::FontSize).clone(),
            Dependencies::DEPENDS_ON_FONT_SIZE,
        )
    };
    let px = value.as_number().map_or(16.0, |n| n.value);
    (px, deps)
}

fn same_tags(a: &[(Rc<str>, f64)], b: &[(Rc<str>, f64)]) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.0 == y.0)
}

fn transition_arrays(
    a: &[Value],
    b: &[Value],
    policy: ArrayPolicy,
    progress: f64,
) -> Option<Value> {
    if a.is_empty() || b.is_empty() {
        return None;
    }
    match policy {
        ArrayPolicy::Repeat => {
            let len = lcm(a.len(), b.len());
            let items: Option<Vec<Value>> = (0..len)
                .map(|i| a[i % a.len()].transition(&b[i % b.len()], progress))
                .collect();
            Some(Value::array(items?, policy))
        }
        ArrayPolicy::Extend => {
            let len = a.len().max(b.len());
            let items: Option<Vec<Value>> = (0..len)
                .map(|i| match (a.get(i), b.get(i)) {
                    (Some(x), Some(y)) => x.transition(y, progress),
                    (Some(x), None) => x.zero_like().and_then(|z| x.transition(&z, progress)),
                    (None, Some(y)) => y.zero_like().and_then(|z| z.transition(y, progress)),
                    (None, None) => None,
                })
                .collect();
            Some(Value::array(items?, policy))
        }
    }
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn lcm(a: usize, b: usize) -> usize {
    a / gcd(a, b) * b
}

impl fmt::Display for Value {
    /// Serializes the value for diagnostics.
    ///
    /// The output is deterministic, and round-trip-stable for simple kinds
    /// (identifiers, strings, numbers).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initial => f.write_str("initial"),
            Self::Inherit => f.write_str("inherit"),
            Self::Unset => f.write_str("unset"),
            Self::CurrentColor => f.write_str("currentcolor"),
            Self::Keyword(k) => f.write_str(k.as_str()),
            Self::Ident(s) => f.write_str(s),
            Self::Str(s) => write_escaped(f, s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Color(c) => write!(f, "{c}"),
            Self::Ease(e) => write!(f, "{e}"),
            Self::Corner(pair) => {
                if pair.0 == pair.1 {
                    write!(f, "{}", pair.0)
                } else {
                    write!(f, "{} {}", pair.0, pair.1)
                }
            }
            Self::Array { items, .. } => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Self::FontFeatures(entries) | Self::FontVariations(entries) => {
                for (i, (tag, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "\"{tag}\" {value}")?;
                }
                Ok(())
            }
            Self::Dynamic(pulse) => {
                write!(
                    f,
                    "pulse({}, {}, {}ms)",
                    pulse.from,
                    pulse.to,
                    pulse.period / 1000
                )
            }
        }
    }
}

/// Writes a quoted string, escaping quote, backslash, newline, form feed
/// and carriage return.
fn write_escaped(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\A ")?,
            '\u{c}' => f.write_str("\\C ")?,
            '\r' => f.write_str("\\D ")?,
            _ => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

/// Parses the serialized form of a simple value (identifier, string,
/// number or keyword) back into a [`Value`].
///
/// This is a diagnostics helper, not a CSS parser; it exists so that
/// `print`-then-parse round trips can be checked for the simple kinds.
#[must_use]
pub fn parse_simple(text: &str) -> Option<Value> {
    let text = text.trim();
    if let Some(rest) = text.strip_prefix('"') {
        let body = rest.strip_suffix('"')?;
        let mut out = String::new();
        let mut chars = body.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '\\' {
                out.push(c);
                continue;
            }
            match chars.next()? {
                '"' => out.push('"'),
                '\\' => out.push('\\'),
                'A' => {
                    out.push('\n');
                    chars.next_if_eq(&' ');
                }
                'C' => {
                    out.push('\u{c}');
                    chars.next_if_eq(&' ');
                }
                'D' => {
                    out.push('\r');
                    chars.next_if_eq(&' ');
                }
                other => out.push(other),
            }
        }
        return Some(Value::Str(Rc::from(out.as_str())));
    }
    for (suffix, unit) in [
        ("px", Unit::Px),
        ("em", Unit::Em),
        ("ms", Unit::Ms),
        ("%", Unit::Percent),
        ("s", Unit::S),
    ] {
        if let Some(magnitude) = text.strip_suffix(suffix)
            && let Ok(value) = magnitude.parse::<f64>()
        {
            return Some(Value::Number(Number { value, unit }));
        }
    }
    if let Ok(value) = text.parse::<f64>() {
        return Some(Value::Number(Number::new(value)));
    }
    if text.is_empty() || !text.chars().all(|c| c.is_alphanumeric() || c == '-') {
        return None;
    }
    Some(Value::ident(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::boxed::Box;
    use alloc::string::ToString;
    use alloc::vec;

    /// A full style backed by the initial values, with `color` and
    /// `font-size` overridden. `compute` may read any property.
    struct FixedStyle(Box<[Value]>);

    impl FixedStyle {
        fn with(color: Value, font_size: Value) -> Self {
            let mut values: Box<[Value]> = (0..Property::COUNT as u16)
                .map(|id| Property::from_index(id).unwrap().initial_value())
                .collect();
            values[Property::Color.index() as usize] = color;
            values[Property::FontSize.index() as usize] = font_size;
            Self(values)
        }
    }

    impl StyleAccess for FixedStyle {
        fn get_value(&self, property: Property) -> &Value {
            &self.0[property.index() as usize]
        }
    }

    fn style() -> FixedStyle {
        FixedStyle::with(
            Value::Color(Color::rgb(1.0, 0.0, 0.0)),
            Value::Number(Number::px(20.0)),
        )
    }

    fn parent() -> FixedStyle {
        FixedStyle::with(
            Value::Color(Color::rgb(0.0, 0.0, 1.0)),
            Value::Number(Number::px(10.0)),
        )
    }

    #[test]
    fn compute_initial() {
        let s = style();
        let cx = ComputeContext {
            style: &s,
            parent: None,
        };
        let (value, deps) = Value::Initial.compute(Property::Opacity, &cx);
        assert_eq!(value, Value::Number(Number::new(1.0)));
        assert!(deps.is_empty());
    }

    #[test]
    fn compute_inherit_with_parent() {
        let s = style();
        let p = parent();
        let cx = ComputeContext {
            style: &s,
            parent: Some(&p),
        };
        let (value, deps) = Value::Inherit.compute(Property::Color, &cx);
        assert_eq!(value, Value::Color(Color::rgb(0.0, 0.0, 1.0)));
        assert_eq!(
            deps,
            Dependencies::DEPENDS_ON_PARENT | Dependencies::EQUALS_PARENT
        );
    }

    #[test]
    fn compute_inherit_reads_any_property() {
        let s = style();
        let p = parent();
        let cx = ComputeContext {
            style: &s,
            parent: Some(&p),
        };
        // Properties the helpers do not override still resolve against the
        // parent's stored value.
        let (value, deps) = Value::Inherit.compute(Property::LetterSpacing, &cx);
        assert_eq!(value, Property::LetterSpacing.initial_value());
        assert!(deps.contains(Dependencies::DEPENDS_ON_PARENT));
    }

    #[test]
    fn compute_inherit_without_parent_degrades_to_initial() {
        let s = style();
        let cx = ComputeContext {
            style: &s,
            parent: None,
        };
        let (value, deps) = Value::Inherit.compute(Property::FontSize, &cx);
        assert_eq!(value, Property::FontSize.initial_value());
        assert!(deps.is_empty());
    }

    #[test]
    fn compute_unset_follows_inheritance() {
        let s = style();
        let p = parent();
        let cx = ComputeContext {
            style: &s,
            parent: Some(&p),
        };
        // Inherited property: unset behaves as inherit.
        let (value, _) = Value::Unset.compute(Property::Color, &cx);
        assert_eq!(value, Value::Color(Color::rgb(0.0, 0.0, 1.0)));
        // Non-inherited property: unset behaves as initial.
        let (value, _) = Value::Unset.compute(Property::BackgroundColor, &cx);
        assert_eq!(value, Value::Color(Color::TRANSPARENT));
    }

    #[test]
    fn compute_currentcolor_reads_own_color() {
        let s = style();
        let cx = ComputeContext {
            style: &s,
            parent: None,
        };
        let (value, deps) = Value::CurrentColor.compute(Property::BorderTopColor, &cx);
        assert_eq!(value, Value::Color(Color::rgb(1.0, 0.0, 0.0)));
        assert_eq!(deps, Dependencies::DEPENDS_ON_COLOR);
    }

    #[test]
    fn compute_currentcolor_on_color_inherits() {
        let s = style();
        let p = parent();
        let cx = ComputeContext {
            style: &s,
            parent: Some(&p),
        };
        let (value, deps) = Value::CurrentColor.compute(Property::Color, &cx);
        assert_eq!(value, Value::Color(Color::rgb(0.0, 0.0, 1.0)));
        assert!(deps.contains(Dependencies::DEPENDS_ON_PARENT));
    }

    #[test]
    fn compute_em_against_own_font_size() {
        let s = style();
        let cx = ComputeContext {
            style: &s,
            parent: None,
        };
        let (value, deps) = Value::Number(Number::em(2.0)).compute(Property::LetterSpacing, &cx);
        assert_eq!(value, Value::Number(Number::px(40.0)));
        assert_eq!(deps, Dependencies::DEPENDS_ON_FONT_SIZE);
    }

    #[test]
    fn compute_em_font_size_against_parent() {
        let s = style();
        let p = parent();
        let cx = ComputeContext {
            style: &s,
            parent: Some(&p),
        };
        let (value, deps) = Value::Number(Number::em(1.5)).compute(Property::FontSize, &cx);
        assert_eq!(value, Value::Number(Number::px(15.0)));
        assert_eq!(deps, Dependencies::DEPENDS_ON_PARENT);
    }

    #[test]
    fn compute_seconds_to_millis() {
        let s = style();
        let cx = ComputeContext {
            style: &s,
            parent: None,
        };
        let (value, _) = Value::Number(Number::s(0.5)).compute(Property::TransitionDuration, &cx);
        assert_eq!(value, Value::Number(Number::ms(500.0)));
    }

    #[test]
    fn compute_is_idempotent() {
        let s = style();
        let p = parent();
        let cx = ComputeContext {
            style: &s,
            parent: Some(&p),
        };
        for specified in [
            Value::Initial,
            Value::Inherit,
            Value::Unset,
            Value::CurrentColor,
            Value::Number(Number::em(2.0)),
            Value::Number(Number::s(1.0)),
            Value::array(
                vec![Value::Number(Number::em(1.0)), Value::CurrentColor],
                ArrayPolicy::Repeat,
            ),
        ] {
            let (once, _) = specified.compute(Property::LetterSpacing, &cx);
            let (twice, deps) = once.compute(Property::LetterSpacing, &cx);
            assert_eq!(once, twice, "compute must be idempotent on its output");
            // Recomputing a computed value must not pick up new context
            // reads, except for values that legitimately keep reading
            // context (none of the above do after one compute).
            let _ = deps;
        }
    }

    #[test]
    fn equality_is_symmetric() {
        let a = Value::Number(Number::px(4.0));
        let b = Value::Number(Number::px(4.0));
        let c = Value::Number(Number::em(4.0));
        assert_eq!(a == b, b == a);
        assert_eq!(a == c, c == a);
    }

    #[test]
    fn transition_endpoints_are_exact() {
        let a = Value::Number(Number::px(0.1));
        let b = Value::Number(Number::px(0.3));
        assert_eq!(a.transition(&b, 0.0), Some(a.clone()));
        assert_eq!(a.transition(&b, 1.0), Some(b.clone()));

        let c = Value::Color(Color::rgb(0.1, 0.2, 0.3));
        let d = Value::Color(Color::rgb(0.9, 0.8, 0.7));
        assert_eq!(c.transition(&d, 0.0), Some(c.clone()));
        assert_eq!(c.transition(&d, 1.0), Some(d.clone()));
    }

    #[test]
    fn transition_mismatched_kinds_returns_none() {
        let a = Value::Number(Number::px(1.0));
        let b = Value::Keyword(Keyword::None);
        assert_eq!(a.transition(&b, 0.5), None);

        // Different units do not interpolate either.
        let c = Value::Number(Number::em(1.0));
        assert_eq!(a.transition(&c, 0.5), None);
    }

    #[test]
    fn transition_identical_values_always_succeeds() {
        let a = Value::Keyword(Keyword::Solid);
        assert_eq!(a.transition(&a.clone(), 0.5), Some(a.clone()));
    }

    #[test]
    fn transition_repeat_array_uses_lcm() {
        let a = Value::array(
            vec![
                Value::Number(Number::px(0.0)),
                Value::Number(Number::px(10.0)),
            ],
            ArrayPolicy::Repeat,
        );
        let b = Value::array(
            vec![
                Value::Number(Number::px(100.0)),
                Value::Number(Number::px(200.0)),
                Value::Number(Number::px(300.0)),
            ],
            ArrayPolicy::Repeat,
        );
        let Some(Value::Array { items, .. }) = a.transition(&b, 0.5) else {
            panic!("repeat arrays of 2 and 3 items must interpolate");
        };
        assert_eq!(items.len(), 6);
        // Item 3 pairs a[1] with b[0].
        assert_eq!(items[3], Value::Number(Number::px(55.0)));
    }

    #[test]
    fn transition_extend_array_pads_with_zero_like() {
        let a = Value::array(vec![Value::Number(Number::px(10.0))], ArrayPolicy::Extend);
        let b = Value::array(
            vec![
                Value::Number(Number::px(20.0)),
                Value::Number(Number::px(40.0)),
            ],
            ArrayPolicy::Extend,
        );
        let Some(Value::Array { items, .. }) = a.transition(&b, 0.5) else {
            panic!("extend arrays must pad and interpolate");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], Value::Number(Number::px(15.0)));
        // Missing first item is padded with 0px.
        assert_eq!(items[1], Value::Number(Number::px(20.0)));
    }

    #[test]
    fn transition_array_with_non_interpolable_item_fails() {
        let a = Value::array(vec![Value::Keyword(Keyword::None)], ArrayPolicy::Repeat);
        let b = Value::array(vec![Value::Number(Number::px(1.0))], ArrayPolicy::Repeat);
        assert_eq!(a.transition(&b, 0.5), None);
    }

    #[test]
    fn transition_font_variations() {
        let a = Value::font_variations([(Rc::from("wght"), 400.0)]);
        let b = Value::font_variations([(Rc::from("wght"), 700.0)]);
        let mixed = a.transition(&b, 0.5).unwrap();
        assert_eq!(mixed, Value::font_variations([(Rc::from("wght"), 550.0)]));
    }

    #[test]
    fn dynamic_value_oscillates() {
        let pulse = Value::Dynamic(Rc::new(Pulse {
            period: 1000,
            from: Value::Number(Number::px(0.0)),
            to: Value::Number(Number::px(100.0)),
        }));
        assert!(pulse.is_dynamic());
        assert_eq!(
            pulse.get_dynamic_value(0),
            Value::Number(Number::px(0.0))
        );
        assert_eq!(
            pulse.get_dynamic_value(250),
            Value::Number(Number::px(50.0))
        );
        assert_eq!(
            pulse.get_dynamic_value(500),
            Value::Number(Number::px(100.0))
        );
        assert_eq!(
            pulse.get_dynamic_value(750),
            Value::Number(Number::px(50.0))
        );
    }

    #[test]
    fn static_values_are_not_dynamic() {
        assert!(!Value::Number(Number::px(1.0)).is_dynamic());
        assert!(!Value::Keyword(Keyword::None).is_dynamic());
        assert_eq!(
            Value::Keyword(Keyword::None).get_dynamic_value(123),
            Value::Keyword(Keyword::None)
        );
    }

    #[test]
    fn print_simple_kinds() {
        assert_eq!(Value::ident("sans-serif").to_string(), "sans-serif");
        assert_eq!(Value::Number(Number::px(4.0)).to_string(), "4px");
        assert_eq!(Value::Number(Number::new(0.5)).to_string(), "0.5");
        assert_eq!(Value::Keyword(Keyword::NoRepeat).to_string(), "no-repeat");
        assert_eq!(
            Value::Color(Color::rgb(1.0, 0.0, 0.0)).to_string(),
            "rgb(255,0,0)"
        );
    }

    #[test]
    fn print_escapes_strings() {
        assert_eq!(
            Value::string("a\"b\\c\nd").to_string(),
            "\"a\\\"b\\\\c\\A d\""
        );
    }

    #[test]
    fn print_round_trips_simple_kinds() {
        for value in [
            Value::ident("fade-in"),
            Value::string("hello \"world\"\n"),
            Value::Number(Number::px(12.5)),
            Value::Number(Number::new(3.0)),
            Value::Number(Number::ms(250.0)),
        ] {
            let printed = value.to_string();
            let parsed = parse_simple(&printed).unwrap();
            assert_eq!(parsed, value, "round trip failed for {printed}");
        }
    }

    #[test]
    fn print_corner_collapses_equal_halves() {
        let equal = Value::corner(
            Value::Number(Number::px(2.0)),
            Value::Number(Number::px(2.0)),
        );
        assert_eq!(equal.to_string(), "2px");
        let distinct = Value::corner(
            Value::Number(Number::px(2.0)),
            Value::Number(Number::px(4.0)),
        );
        assert_eq!(distinct.to_string(), "2px 4px");
    }

    #[test]
    fn font_features_sorted_and_printed() {
        let features = Value::font_features([
            (Rc::from("liga"), 1.0),
            (Rc::from("kern"), 0.0),
        ]);
        assert_eq!(features.to_string(), "\"kern\" 0, \"liga\" 1");
    }
}
