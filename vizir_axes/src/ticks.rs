// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick value generation.
//!
//! Automatic ticks use "nice" spacings, i.e. values from {1, 2, 5} × 10^k, so
//! labels read as `0, 20, 40, 60` rather than arbitrary fractions. The tick count
//! is bounded by the space the axis is offered: at least 50px per tick and never
//! more than 11 ticks.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::options::TickOverride;

/// Minimum pixel distance between two automatic ticks.
pub const MIN_TICK_SPACING_PX: f64 = 50.0;
/// Upper bound on the number of automatic ticks (10 intervals).
pub const MAX_TICKS: usize = 11;

const MANTISSAS: [f64; 3] = [1.0, 2.0, 5.0];
// Spacing only grows from the floor estimate; each step at least doubles it.
const MAX_SPACING_STEPS: usize = 64;

/// Returns how many ticks fit along an axis of the given pixel extent.
///
/// This is `min(11, ceil(extent / 50))`, floored at 2 so there is always at
/// least one interval to space.
pub fn max_ticks_for(extent: f64) -> usize {
    if !extent.is_finite() || extent <= 0.0 {
        return 2;
    }
    let n = (extent / MIN_TICK_SPACING_PX).ceil().min(MAX_TICKS as f64);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "positive, finite and capped at MAX_TICKS"
    )]
    let n = n as usize;
    n.max(2)
}

/// Generates the ticks of a manual override: `steps + 1` values, closing tick included.
pub fn override_ticks(o: TickOverride) -> Vec<f64> {
    (0..=o.steps)
        .map(|i| o.start + i as f64 * o.step_width)
        .collect()
}

/// A nice spacing value `MANTISSAS[mantissa] × 10^exponent`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NiceStep {
    mantissa: usize,
    exponent: i32,
}

impl NiceStep {
    /// Returns the largest nice value that is `<= x`.
    ///
    /// Returns `None` for non-positive or non-finite input.
    pub fn floor(x: f64) -> Option<Self> {
        if !x.is_finite() || x <= 0.0 {
            return None;
        }
        let e = x.log10().floor().clamp(-300.0, 300.0);
        #[allow(clippy::cast_possible_truncation, reason = "clamped to +/-300")]
        let mut exponent = e as i32;
        let mut fraction = x / pow10(exponent);
        // log10 can land one decade off right at powers of ten.
        if fraction < 1.0 {
            exponent -= 1;
            fraction *= 10.0;
        } else if fraction >= 10.0 {
            exponent += 1;
            fraction /= 10.0;
        }
        let mantissa = if fraction >= 5.0 {
            2
        } else if fraction >= 2.0 {
            1
        } else {
            0
        };
        Some(Self { mantissa, exponent })
    }

    /// The spacing as a float.
    pub fn value(self) -> f64 {
        MANTISSAS[self.mantissa] * pow10(self.exponent)
    }

    /// The next larger nice value (1 → 2 → 5 → 10 → ...).
    #[must_use]
    pub fn next(self) -> Self {
        if self.mantissa + 1 < MANTISSAS.len() {
            Self {
                mantissa: self.mantissa + 1,
                exponent: self.exponent,
            }
        } else {
            Self {
                mantissa: 0,
                exponent: self.exponent + 1,
            }
        }
    }

    /// Decimal places needed to print multiples of this spacing exactly.
    fn decimals(self) -> i32 {
        (-self.exponent).max(0)
    }
}

/// The result of nice-number tick generation.
#[derive(Clone, Debug, PartialEq)]
pub struct NiceTicks {
    /// Distance between ticks; `0.0` for a degenerate range.
    pub spacing: f64,
    /// First tick (the range minimum rounded down to a multiple of `spacing`).
    pub min: f64,
    /// Last tick (the range maximum rounded up to a multiple of `spacing`).
    pub max: f64,
    /// Every multiple of `spacing` in `[min, max]`, ascending.
    pub values: Vec<f64>,
}

impl NiceTicks {
    /// Computes at most `max_ticks` nice ticks covering `[min, max]`.
    ///
    /// The spacing is the smallest nice value whose rounded bounds need no more
    /// than `max_ticks - 1` intervals. A zero-length range yields the single
    /// tick `min`.
    pub fn compute(min: f64, max: f64, max_ticks: usize) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let max_intervals = max_ticks.max(2) - 1;
        let n = max_intervals as f64;
        // Dividing first keeps the estimate finite when `max - min` overflows.
        let Some(mut step) = NiceStep::floor(max / n - min / n) else {
            return Self::single(min);
        };

        for _ in 0..MAX_SPACING_STEPS {
            let spacing = step.value();
            let lo = (min / spacing).floor();
            let hi = (max / spacing).ceil();
            let intervals = hi - lo;
            if intervals <= n {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "bounded by max_intervals above"
                )]
                let count = intervals.max(0.0) as usize;
                let values = (0..=count)
                    .map(|i| snap((lo + i as f64) * spacing, step))
                    .collect();
                return Self {
                    spacing,
                    min: snap(lo * spacing, step),
                    max: snap(hi * spacing, step),
                    values,
                };
            }
            step = step.next();
        }

        // Unreachable for finite bounds; keep the range endpoints as ticks.
        Self {
            spacing: max / n - min / n,
            min,
            max,
            values: vec![min, max],
        }
    }

    fn single(value: f64) -> Self {
        Self {
            spacing: 0.0,
            min: value,
            max: value,
            values: vec![value],
        }
    }
}

fn pow10(exponent: i32) -> f64 {
    10_f64.powi(exponent)
}

/// Rounds `v` to the decimal precision of `step` and folds `-0` into `0`.
fn snap(v: f64, step: NiceStep) -> f64 {
    let factor = pow10(step.decimals());
    let scaled = v * factor;
    let v = if scaled.is_finite() {
        scaled.round() / factor
    } else {
        v
    };
    if v == 0.0 { 0.0 } else { v }
}
