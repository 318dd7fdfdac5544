// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easing functions for transitions and animations.
//!
//! An [`Ease`] maps an input progress in `[0, 1]` to an output progress.
//! Cubic-bezier output may overshoot `[0, 1]`; interpolation must accept
//! unclamped progress values for that reason.

use core::fmt;

/// An easing function.
///
/// # Example
///
/// ```rust
/// use stratum_property::Ease;
///
/// assert_eq!(Ease::Linear.transform(0.25), 0.25);
///
/// // `ease-in-out` is symmetric around the midpoint.
/// let f = Ease::EASE_IN_OUT;
/// assert!((f.transform(0.5) - 0.5).abs() < 1e-6);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Ease {
    /// The identity easing.
    Linear,
    /// A cubic bezier timing curve through `(0,0)`, `(x1,y1)`, `(x2,y2)`,
    /// `(1,1)`. The x control coordinates must lie in `[0, 1]` so the curve
    /// is a function of progress.
    CubicBezier {
        /// First control point, x.
        x1: f64,
        /// First control point, y.
        y1: f64,
        /// Second control point, x.
        x2: f64,
        /// Second control point, y.
        y2: f64,
    },
    /// A step function with `count` equal intervals.
    Steps {
        /// Number of steps; must be at least 1.
        count: u32,
        /// `true` jumps at the start of each interval, `false` at the end.
        jump_start: bool,
    },
}

impl Ease {
    /// The CSS `ease` curve.
    pub const EASE: Self = Self::CubicBezier {
        x1: 0.25,
        y1: 0.1,
        x2: 0.25,
        y2: 1.0,
    };

    /// The CSS `ease-in` curve.
    pub const EASE_IN: Self = Self::CubicBezier {
        x1: 0.42,
        y1: 0.0,
        x2: 1.0,
        y2: 1.0,
    };

    /// The CSS `ease-out` curve.
    pub const EASE_OUT: Self = Self::CubicBezier {
        x1: 0.0,
        y1: 0.0,
        x2: 0.58,
        y2: 1.0,
    };

    /// The CSS `ease-in-out` curve.
    pub const EASE_IN_OUT: Self = Self::CubicBezier {
        x1: 0.42,
        y1: 0.0,
        x2: 0.58,
        y2: 1.0,
    };

    /// Maps an input progress to an output progress.
    ///
    /// Inputs outside `[0, 1]` are clamped before evaluation.
    #[must_use]
    pub fn transform(&self, progress: f64) -> f64 {
        let p = progress.clamp(0.0, 1.0);
        match *self {
            Self::Linear => p,
            Self::CubicBezier { x1, y1, x2, y2 } => {
                if p <= 0.0 {
                    return 0.0;
                }
                if p >= 1.0 {
                    return 1.0;
                }
                let t = solve_bezier_t(x1, x2, p);
                bezier(y1, y2, t)
            }
            Self::Steps { count, jump_start } => {
                let count = count.max(1);
                let mut step = libm::floor(p * f64::from(count));
                if jump_start {
                    step += 1.0;
                }
                (step / f64::from(count)).clamp(0.0, 1.0)
            }
        }
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Linear => f.write_str("linear"),
            Self::CubicBezier { x1, y1, x2, y2 } => {
                write!(f, "cubic-bezier({x1}, {y1}, {x2}, {y2})")
            }
            Self::Steps { count, jump_start } => {
                if jump_start {
                    write!(f, "steps({count}, start)")
                } else {
                    write!(f, "steps({count}, end)")
                }
            }
        }
    }
}

/// Evaluates the one-dimensional bezier with control values `c1`, `c2` and
/// endpoints 0, 1 at parameter `t`.
fn bezier(c1: f64, c2: f64, t: f64) -> f64 {
    let s = 1.0 - t;
    3.0 * s * s * t * c1 + 3.0 * s * t * t * c2 + t * t * t
}

/// Finds `t` such that the x spline equals `x`, by bisection.
///
/// The x spline is monotonic for control x coordinates in `[0, 1]`, which
/// the constructor contract guarantees.
fn solve_bezier_t(x1: f64, x2: f64, x: f64) -> f64 {
    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    let mut t = x;
    for _ in 0..52 {
        let current = bezier(x1, x2, t);
        if (current - x).abs() < 1e-9 {
            break;
        }
        if current < x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) / 2.0;
    }
    t
}
