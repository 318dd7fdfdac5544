// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The fixed style property catalog.
//!
//! This module defines [`Property`], the closed, densely-numbered set of
//! style properties, and [`Group`], the storage groups the cascade shares
//! between styles. The id space is fixed at compile time so that bitset
//! operations over property ids are bounds-checked and dense.

use crate::ease::Ease;
use crate::set::PropertySet;
use crate::value::{ArrayPolicy, Color, Keyword, Number, Value};

/// A style property.
///
/// Properties have dense ids (`0..Property::COUNT`) assigned by declaration
/// order. The declaration order is load-bearing in two ways:
///
/// - properties are computed in ascending id order within a group, and
/// - each `*-style` property immediately precedes its paired `*-width`
///   property, so the width computation can consult the already-computed
///   border style (see [`Property::paired_style`]).
///
/// # Example
///
/// ```rust
/// use stratum_property::Property;
///
/// assert_eq!(Property::Color.name(), "color");
/// assert_eq!(Property::by_name("font-size"), Some(Property::FontSize));
/// assert!(Property::Color.inherits());
/// assert!(!Property::BackgroundColor.inherits());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum Property {
    // Core (inherited)
    /// `color`
    Color,
    /// `font-size`
    FontSize,
    // Font (inherited)
    /// `font-family`
    FontFamily,
    /// `font-style`
    FontStyle,
    /// `font-weight`
    FontWeight,
    /// `letter-spacing`
    LetterSpacing,
    // FontVariant
    /// `font-kerning`
    FontKerning,
    /// `font-variant-ligatures`
    FontVariantLigatures,
    /// `font-feature-settings`
    FontFeatureSettings,
    /// `font-variation-settings`
    FontVariationSettings,
    // Icon (inherited)
    /// `icon-size`
    IconSize,
    /// `icon-style`
    IconStyle,
    // Background
    /// `background-color`
    BackgroundColor,
    /// `background-image`
    BackgroundImage,
    /// `background-repeat`
    BackgroundRepeat,
    /// `background-position`
    BackgroundPosition,
    /// `background-size`
    BackgroundSize,
    /// `box-shadow`
    BoxShadow,
    // Border
    /// `border-top-style`
    BorderTopStyle,
    /// `border-top-width`
    BorderTopWidth,
    /// `border-right-style`
    BorderRightStyle,
    /// `border-right-width`
    BorderRightWidth,
    /// `border-bottom-style`
    BorderBottomStyle,
    /// `border-bottom-width`
    BorderBottomWidth,
    /// `border-left-style`
    BorderLeftStyle,
    /// `border-left-width`
    BorderLeftWidth,
    /// `border-top-left-radius`
    BorderTopLeftRadius,
    /// `border-top-right-radius`
    BorderTopRightRadius,
    /// `border-bottom-right-radius`
    BorderBottomRightRadius,
    /// `border-bottom-left-radius`
    BorderBottomLeftRadius,
    /// `border-top-color`
    BorderTopColor,
    /// `border-right-color`
    BorderRightColor,
    /// `border-bottom-color`
    BorderBottomColor,
    /// `border-left-color`
    BorderLeftColor,
    // Outline
    /// `outline-style`
    OutlineStyle,
    /// `outline-width`
    OutlineWidth,
    /// `outline-color`
    OutlineColor,
    /// `outline-offset`
    OutlineOffset,
    // Animation
    /// `animation-name`
    AnimationName,
    /// `animation-duration`
    AnimationDuration,
    /// `animation-timing-function`
    AnimationTimingFunction,
    /// `animation-iteration-count`
    AnimationIterationCount,
    /// `animation-direction`
    AnimationDirection,
    /// `animation-play-state`
    AnimationPlayState,
    /// `animation-delay`
    AnimationDelay,
    /// `animation-fill-mode`
    AnimationFillMode,
    // Transition
    /// `transition-property`
    TransitionProperty,
    /// `transition-duration`
    TransitionDuration,
    /// `transition-timing-function`
    TransitionTimingFunction,
    /// `transition-delay`
    TransitionDelay,
    // Size
    /// `margin-top`
    MarginTop,
    /// `margin-right`
    MarginRight,
    /// `margin-bottom`
    MarginBottom,
    /// `margin-left`
    MarginLeft,
    /// `padding-top`
    PaddingTop,
    /// `padding-right`
    PaddingRight,
    /// `padding-bottom`
    PaddingBottom,
    /// `padding-left`
    PaddingLeft,
    /// `min-width`
    MinWidth,
    /// `min-height`
    MinHeight,
    // Other
    /// `opacity`
    Opacity,
    /// `filter`
    Filter,
}

/// A storage group of properties.
///
/// Groups exist purely for storage and sharing efficiency: a resolved style
/// holds one reference-counted bundle of values per group, and the cascade
/// shares whole bundles between styles whose inputs for that group were
/// unset or unchanged. Every property belongs to exactly one group, and
/// each group's ids are contiguous.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Group {
    /// `color` and `font-size`; inherited.
    Core,
    /// Font selection properties; inherited.
    Font,
    /// Font variant and feature properties.
    FontVariant,
    /// Icon properties; inherited.
    Icon,
    /// Background layers and shadows.
    Background,
    /// Border styles, widths, radii and colors.
    Border,
    /// Outline properties.
    Outline,
    /// The `animation-*` meta properties.
    Animation,
    /// The `transition-*` meta properties.
    Transition,
    /// Margins, paddings and minimum sizes.
    Size,
    /// Everything else.
    Other,
}

/// `(first id, property count)` per group, indexed by `Group as usize`.
const GROUP_SPANS: [(u16, u16); Group::COUNT] = [
    (0, 2),   // Core
    (2, 4),   // Font
    (6, 4),   // FontVariant
    (10, 2),  // Icon
    (12, 6),  // Background
    (18, 16), // Border
    (34, 4),  // Outline
    (38, 8),  // Animation
    (46, 4),  // Transition
    (50, 10), // Size
    (60, 2),  // Other
];

// The group spans must tile the id space exactly, and the paired
// style/width properties must be adjacent.
const _: () = {
    assert!(Property::COUNT <= 64, "PropertySet is backed by a u64");
    let mut next = 0_u16;
    let mut i = 0;
    while i < GROUP_SPANS.len() {
        assert!(GROUP_SPANS[i].0 == next, "groups must be contiguous");
        next += GROUP_SPANS[i].1;
        i += 1;
    }
    assert!(next as usize == Property::COUNT, "groups must cover all ids");

    assert!(Property::BorderTopStyle as u16 + 1 == Property::BorderTopWidth as u16);
    assert!(Property::BorderRightStyle as u16 + 1 == Property::BorderRightWidth as u16);
    assert!(Property::BorderBottomStyle as u16 + 1 == Property::BorderBottomWidth as u16);
    assert!(Property::BorderLeftStyle as u16 + 1 == Property::BorderLeftWidth as u16);
    assert!(Property::OutlineStyle as u16 + 1 == Property::OutlineWidth as u16);
};

impl Group {
    /// The number of groups.
    pub const COUNT: usize = 11;

    /// All groups, in storage order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Core,
        Self::Font,
        Self::FontVariant,
        Self::Icon,
        Self::Background,
        Self::Border,
        Self::Outline,
        Self::Animation,
        Self::Transition,
        Self::Size,
        Self::Other,
    ];

    /// Returns the group's position in storage order.
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns whether every property in this group is inherited.
    ///
    /// Inherited groups are the ones the cascade may share with the parent
    /// style when none of their properties are specified.
    #[must_use]
    #[inline]
    pub const fn inherits(self) -> bool {
        matches!(self, Self::Core | Self::Font | Self::Icon)
    }

    /// Returns the bitset covering this group's property ids.
    #[must_use]
    #[inline]
    pub const fn mask(self) -> PropertySet {
        let (first, len) = GROUP_SPANS[self as usize];
        PropertySet::from_bits(((1_u64 << len) - 1) << first)
    }

    /// Returns the number of properties in this group.
    #[must_use]
    #[inline]
    pub const fn len(self) -> usize {
        GROUP_SPANS[self as usize].1 as usize
    }

    /// Returns `false`; no group is empty.
    #[must_use]
    #[inline]
    pub const fn is_empty(self) -> bool {
        false
    }

    /// Returns an iterator over this group's properties in id order.
    pub fn properties(self) -> impl Iterator<Item = Property> {
        let (first, len) = GROUP_SPANS[self as usize];
        (first..first + len).map(|id| {
            Property::from_index(id).expect("group spans lie within the catalog")
        })
    }
}

impl Property {
    /// The number of properties in the catalog.
    pub const COUNT: usize = 62;

    /// Returns the property's dense id.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u16 {
        self as u16
    }

    /// Returns the property with the given id, if it lies in the catalog.
    #[must_use]
    pub fn from_index(index: u16) -> Option<Self> {
        ALL_PROPERTIES.get(index as usize).copied()
    }

    /// Returns the storage group this property belongs to.
    #[must_use]
    pub const fn group(self) -> Group {
        let id = self as u16;
        let mut i = 0;
        while i < GROUP_SPANS.len() {
            let (first, len) = GROUP_SPANS[i];
            if id >= first && id < first + len {
                return Group::ALL[i];
            }
            i += 1;
        }
        // Unreachable: the spans tile the id space (checked at compile time).
        Group::Other
    }

    /// Returns the property's offset within its group's bundle.
    #[must_use]
    #[inline]
    pub const fn group_offset(self) -> usize {
        (self as u16 - GROUP_SPANS[self.group() as usize].0) as usize
    }

    /// Returns whether the property's unset value is taken from the parent
    /// style rather than from the initial value.
    #[must_use]
    #[inline]
    pub const fn inherits(self) -> bool {
        self.group().inherits()
    }

    /// Returns whether the property participates in transitions.
    ///
    /// The `animation-*` and `transition-*` meta properties never animate;
    /// everything else exposes the interpolation mechanism, with
    /// [`Value::transition`](crate::Value::transition) deciding per value
    /// pair whether interpolation is actually possible.
    #[must_use]
    #[inline]
    pub const fn animatable(self) -> bool {
        !matches!(self.group(), Group::Animation | Group::Transition)
    }

    /// For a `*-width` property, returns the paired `*-style` property.
    ///
    /// The paired property always has the immediately preceding id, so it
    /// is guaranteed to be computed first.
    #[must_use]
    pub const fn paired_style(self) -> Option<Self> {
        match self {
            Self::BorderTopWidth => Some(Self::BorderTopStyle),
            Self::BorderRightWidth => Some(Self::BorderRightStyle),
            Self::BorderBottomWidth => Some(Self::BorderBottomStyle),
            Self::BorderLeftWidth => Some(Self::BorderLeftStyle),
            Self::OutlineWidth => Some(Self::OutlineStyle),
            _ => None,
        }
    }

    /// Returns the property's CSS-style name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        PROPERTY_NAMES[self as usize]
    }

    /// Looks up a property by its CSS-style name.
    #[must_use]
    pub fn by_name(name: &str) -> Option<Self> {
        ALL_PROPERTIES
            .iter()
            .copied()
            .find(|p| p.name() == name)
    }

    /// Returns the property's initial value, in computed form.
    ///
    /// Initial values never contain cascade keywords or context-relative
    /// units, so computing them is the identity.
    #[must_use]
    pub fn initial_value(self) -> Value {
        match self {
            Self::Color => Value::Color(Color::BLACK),
            Self::FontSize => Value::Number(Number::px(16.0)),
            Self::FontFamily => Value::array([Value::ident("sans-serif")], ArrayPolicy::Repeat),
            Self::FontStyle => Value::Keyword(Keyword::Normal),
            Self::FontWeight => Value::Number(Number::new(400.0)),
            Self::LetterSpacing => Value::Number(Number::px(0.0)),
            Self::FontKerning => Value::Keyword(Keyword::Auto),
            Self::FontVariantLigatures => Value::Keyword(Keyword::Normal),
            Self::FontFeatureSettings => Value::Keyword(Keyword::Normal),
            Self::FontVariationSettings => Value::Keyword(Keyword::Normal),
            Self::IconSize => Value::Number(Number::px(16.0)),
            Self::IconStyle => Value::Keyword(Keyword::Regular),
            Self::BackgroundColor => Value::Color(Color::TRANSPARENT),
            Self::BackgroundImage => {
                Value::array([Value::Keyword(Keyword::None)], ArrayPolicy::Repeat)
            }
            Self::BackgroundRepeat => {
                Value::array([Value::Keyword(Keyword::Repeat)], ArrayPolicy::Repeat)
            }
            Self::BackgroundPosition => Value::array(
                [Value::corner(
                    Value::Number(Number::px(0.0)),
                    Value::Number(Number::px(0.0)),
                )],
                ArrayPolicy::Repeat,
            ),
            Self::BackgroundSize => {
                Value::array([Value::Keyword(Keyword::Auto)], ArrayPolicy::Repeat)
            }
            Self::BoxShadow => Value::Keyword(Keyword::None),
            Self::BorderTopStyle
            | Self::BorderRightStyle
            | Self::BorderBottomStyle
            | Self::BorderLeftStyle
            | Self::OutlineStyle => Value::Keyword(Keyword::None),
            // `medium`, per the border-width computed-value rules.
            Self::BorderTopWidth
            | Self::BorderRightWidth
            | Self::BorderBottomWidth
            | Self::BorderLeftWidth
            | Self::OutlineWidth => Value::Number(Number::px(3.0)),
            Self::BorderTopLeftRadius
            | Self::BorderTopRightRadius
            | Self::BorderBottomRightRadius
            | Self::BorderBottomLeftRadius => Value::corner(
                Value::Number(Number::px(0.0)),
                Value::Number(Number::px(0.0)),
            ),
            Self::BorderTopColor
            | Self::BorderRightColor
            | Self::BorderBottomColor
            | Self::BorderLeftColor
            | Self::OutlineColor => Value::Color(Color::BLACK),
            Self::OutlineOffset => Value::Number(Number::px(0.0)),
            Self::AnimationName => {
                Value::array([Value::Keyword(Keyword::None)], ArrayPolicy::Repeat)
            }
            Self::AnimationDuration | Self::AnimationDelay => {
                Value::array([Value::Number(Number::ms(0.0))], ArrayPolicy::Repeat)
            }
            Self::AnimationTimingFunction => {
                Value::array([Value::Ease(Ease::EASE)], ArrayPolicy::Repeat)
            }
            Self::AnimationIterationCount => {
                Value::array([Value::Number(Number::new(1.0))], ArrayPolicy::Repeat)
            }
            Self::AnimationDirection => {
                Value::array([Value::Keyword(Keyword::Normal)], ArrayPolicy::Repeat)
            }
            Self::AnimationPlayState => {
                Value::array([Value::Keyword(Keyword::Running)], ArrayPolicy::Repeat)
            }
            Self::AnimationFillMode => {
                Value::array([Value::Keyword(Keyword::None)], ArrayPolicy::Repeat)
            }
            Self::TransitionProperty => {
                Value::array([Value::Keyword(Keyword::All)], ArrayPolicy::Repeat)
            }
            Self::TransitionDuration | Self::TransitionDelay => {
                Value::array([Value::Number(Number::ms(0.0))], ArrayPolicy::Repeat)
            }
            Self::TransitionTimingFunction => {
                Value::array([Value::Ease(Ease::EASE)], ArrayPolicy::Repeat)
            }
            Self::MarginTop
            | Self::MarginRight
            | Self::MarginBottom
            | Self::MarginLeft
            | Self::PaddingTop
            | Self::PaddingRight
            | Self::PaddingBottom
            | Self::PaddingLeft
            | Self::MinWidth
            | Self::MinHeight => Value::Number(Number::px(0.0)),
            Self::Opacity => Value::Number(Number::new(1.0)),
            Self::Filter => Value::Keyword(Keyword::None),
        }
    }
}

impl core::fmt::Display for Property {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// All properties in id order.
const ALL_PROPERTIES: [Property; Property::COUNT] = [
    Property::Color,
    Property::FontSize,
    Property::FontFamily,
    Property::FontStyle,
    Property::FontWeight,
    Property::LetterSpacing,
    Property::FontKerning,
    Property::FontVariantLigatures,
    Property::FontFeatureSettings,
    Property::FontVariationSettings,
    Property::IconSize,
    Property::IconStyle,
    Property::BackgroundColor,
    Property::BackgroundImage,
    Property::BackgroundRepeat,
    Property::BackgroundPosition,
    Property::BackgroundSize,
    Property::BoxShadow,
    Property::BorderTopStyle,
    Property::BorderTopWidth,
    Property::BorderRightStyle,
    Property::BorderRightWidth,
    Property::BorderBottomStyle,
    Property::BorderBottomWidth,
    Property::BorderLeftStyle,
    Property::BorderLeftWidth,
    Property::BorderTopLeftRadius,
    Property::BorderTopRightRadius,
    Property::BorderBottomRightRadius,
    Property::BorderBottomLeftRadius,
    Property::BorderTopColor,
    Property::BorderRightColor,
    Property::BorderBottomColor,
    Property::BorderLeftColor,
    Property::OutlineStyle,
    Property::OutlineWidth,
    Property::OutlineColor,
    Property::OutlineOffset,
    Property::AnimationName,
    Property::AnimationDuration,
    Property::AnimationTimingFunction,
    Property::AnimationIterationCount,
    Property::AnimationDirection,
    Property::AnimationPlayState,
    Property::AnimationDelay,
    Property::AnimationFillMode,
    Property::TransitionProperty,
    Property::TransitionDuration,
    Property::TransitionTimingFunction,
    Property::TransitionDelay,
    Property::MarginTop,
    Property::MarginRight,
    Property::MarginBottom,
    Property::MarginLeft,
    Property::PaddingTop,
    Property::PaddingRight,
    Property::PaddingBottom,
    Property::PaddingLeft,
    Property::MinWidth,
    Property::MinHeight,
    Property::Opacity,
    Property::Filter,
];

/// CSS-style names, in id order.
const PROPERTY_NAMES: [&str; Property::COUNT] = [
    "color",
    "font-size",
    "font-family",
    "font-style",
    "font-weight",
    "letter-spacing",
    "font-kerning",
    "font-variant-ligatures",
    "font-feature-settings",
    "font-variation-settings",
    "icon-size",
    "icon-style",
    "background-color",
    "background-image",
    "background-repeat",
    "background-position",
    "background-size",
    "box-shadow",
    "border-top-style",
    "border-top-width",
    "border-right-style",
    "border-right-width",
    "border-bottom-style",
    "border-bottom-width",
    "border-left-style",
    "border-left-width",
    "border-top-left-radius",
    "border-top-right-radius",
    "border-bottom-right-radius",
    "border-bottom-left-radius",
    "border-top-color",
    "border-right-color",
    "border-bottom-color",
    "border-left-color",
    "outline-style",
    "outline-width",
    "outline-color",
    "outline-offset",
    "animation-name",
    "animation-duration",
    "animation-timing-function",
    "animation-iteration-count",
    "animation-direction",
    "animation-play-state",
    "animation-delay",
    "animation-fill-mode",
    "transition-property",
    "transition-duration",
    "transition-timing-function",
    "transition-delay",
    "margin-top",
    "margin-right",
    "margin-bottom",
    "margin-left",
    "padding-top",
    "padding-right",
    "padding-bottom",
    "padding-left",
    "min-width",
    "min-height",
    "opacity",
    "filter",
];
