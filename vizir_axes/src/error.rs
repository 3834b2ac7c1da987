// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors surfaced by axis fitting and chart layout.
//!
//! Most degenerate inputs (zero-sized surfaces, empty ranges, missing label
//! sources) are handled in place. What remains here are host contract
//! violations, which are reported instead of producing garbage geometry.

use core::fmt;

use crate::coordinator::{AxisId, ChartId};
use crate::scale::AxisPosition;

/// Errors returned by [`Scale::fit`](crate::Scale::fit).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FitError {
    /// No value range was set, and the range hook (if any) produced none.
    MissingValueRange {
        /// Position of the axis that was fit.
        position: AxisPosition,
    },
    /// The value range has a NaN or infinite bound.
    NonFiniteValueRange {
        /// Lower bound as supplied.
        min: f64,
        /// Upper bound as supplied.
        max: f64,
    },
}

impl fmt::Display for FitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingValueRange { position } => {
                write!(f, "{position:?} axis was fit before a value range was set")
            }
            Self::NonFiniteValueRange { min, max } => {
                write!(f, "value range [{min}, {max}] is not finite")
            }
        }
    }
}

impl core::error::Error for FitError {}

/// Errors returned by [`LayoutCoordinator::fit_axes_for_chart`](crate::LayoutCoordinator::fit_axes_for_chart).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LayoutError {
    /// The chart has never been registered (or was removed).
    UnknownChart(ChartId),
    /// The surface size is negative or not finite.
    InvalidSurface {
        /// Offered width.
        width: f64,
        /// Offered height.
        height: f64,
    },
    /// Fitting one of the chart's axes failed.
    Axis {
        /// The axis that failed.
        axis: AxisId,
        /// The underlying fit error.
        err: FitError,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownChart(chart) => write!(f, "chart {} has no registered axes", chart.0),
            Self::InvalidSurface { width, height } => {
                write!(f, "cannot lay out axes on a {width}x{height} surface")
            }
            Self::Axis { axis, err } => write!(f, "axis {} failed to fit: {err}", axis.0),
        }
    }
}

impl core::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Axis { err, .. } => Some(err),
            Self::UnknownChart(_) | Self::InvalidSurface { .. } => None,
        }
    }
}
