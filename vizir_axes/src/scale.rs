// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The axis capability interface.
//!
//! Every axis type (linear today; logarithmic, category or time variants later)
//! implements [`Scale`]. The coordinator only talks to axes through this trait:
//! it asks each one to [`fit`](Scale::fit) into an offered box, then commits the
//! final placement with [`set_bounds`](Scale::set_bounds).

extern crate alloc;

use alloc::string::String;
use alloc::rc::Rc;
use core::fmt;

use kurbo::{Rect, Size};
use vizir_text::TextMeasurer;

use crate::error::FitError;
use crate::options::SharedAxisOptions;
use crate::paint::AxisPainter;

/// The edge of the plotting area an axis is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisPosition {
    /// Vertical axis left of the plotting area.
    Left,
    /// Vertical axis right of the plotting area.
    Right,
    /// Horizontal axis above the plotting area.
    Top,
    /// Horizontal axis below the plotting area.
    Bottom,
}

impl AxisPosition {
    /// `true` for top and bottom axes.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// The data range an axis spans, with `min <= max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
    min: f64,
    max: f64,
}

impl ValueRange {
    /// Creates a range from two bounds in either order.
    pub fn new(a: f64, b: f64) -> Self {
        if b < a {
            Self { min: b, max: a }
        } else {
            Self { min: a, max: b }
        }
    }

    /// Lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// `max - min`; zero for a degenerate range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

/// Host callback that computes an axis's value range from the current data.
///
/// Invoked at the start of every fit. Returning `None` keeps the previously
/// set range.
#[derive(Clone)]
pub struct RangeHook(Rc<dyn Fn() -> Option<ValueRange>>);

impl RangeHook {
    /// Wraps a range callback.
    pub fn new(f: impl Fn() -> Option<ValueRange> + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub(crate) fn call(&self) -> Option<ValueRange> {
        (self.0)()
    }
}

impl fmt::Debug for RangeHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RangeHook(..)")
    }
}

/// An axis that can size itself, map values to pixels, and draw.
///
/// Geometry ([`bounds`](Self::bounds), [`pixel_for_value`](Self::pixel_for_value))
/// is meaningful only after a fit and a placement by the coordinator.
pub trait Scale: fmt::Debug {
    /// The edge this axis is attached to. Fixed at construction.
    fn position(&self) -> AxisPosition;

    /// `true` for top and bottom axes.
    fn is_horizontal(&self) -> bool {
        self.position().is_horizontal()
    }

    /// The options shared with the host.
    fn options(&self) -> &SharedAxisOptions;

    /// The value range as last set by the host or the range hook.
    fn value_range(&self) -> Option<ValueRange>;

    /// Sets the value range for the next fit.
    fn set_value_range(&mut self, range: ValueRange);

    /// Refreshes the value range (running the range hook, if any).
    fn calculate_range(&mut self) -> Result<ValueRange, FitError>;

    /// Recomputes the tick values for an axis of the given size.
    fn generate_ticks(&mut self, width: f64, height: f64);

    /// Recomputes one label per tick.
    fn build_labels(&mut self);

    /// Sizes the axis into at most `max_width x max_height`.
    ///
    /// Returns the minimum size the axis needs; the same value is afterwards
    /// available through [`size`](Self::size).
    fn fit(
        &mut self,
        max_width: f64,
        max_height: f64,
        measurer: &dyn TextMeasurer,
    ) -> Result<Size, FitError>;

    /// The size computed by the last fit.
    fn size(&self) -> Size;

    /// The committed placement.
    fn bounds(&self) -> Rect;

    /// Commits the placement. Called by the coordinator after allocation.
    fn set_bounds(&mut self, bounds: Rect);

    /// Tick values; descending for vertical axes.
    fn ticks(&self) -> &[f64];

    /// Tick labels, index-aligned with [`ticks`](Self::ticks).
    fn labels(&self) -> &[String];

    /// Label rotation in degrees, `0..=90`. Always `0` for vertical axes.
    fn label_rotation(&self) -> f64;

    /// Maps a data value to a surface coordinate along the axis.
    fn pixel_for_value(&self, value: f64) -> f64;

    /// Paints grid lines, tick marks and labels.
    fn draw(&self, chart_area: Rect, painter: &mut dyn AxisPainter);
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn value_range_orders_bounds() {
        let r = ValueRange::new(80.0, 20.0);
        assert_eq!(r.min(), 20.0);
        assert_eq!(r.max(), 80.0);
        assert_eq!(r.span(), 60.0);
    }

    #[test]
    fn horizontal_positions() {
        assert!(AxisPosition::Top.is_horizontal());
        assert!(AxisPosition::Bottom.is_horizontal());
        assert!(!AxisPosition::Left.is_horizontal());
        assert!(!AxisPosition::Right.is_horizontal());
    }
}
