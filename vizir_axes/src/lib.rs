// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis fitting and multi-axis chart layout.
//!
//! This crate decides how much room each axis of a chart needs and where it
//! goes:
//! - **Axes** ([`LinearScale`], or anything implementing [`Scale`]) pick nice
//!   tick values for their length, build labels, rotate labels that would
//!   collide, and report the minimum box they need.
//! - **Layout** ([`LayoutCoordinator`]) splits a chart surface between the axes
//!   on each edge and the plotting area, in two passes, optionally keeping the
//!   surface's aspect ratio.
//!
//! Nothing here rasterizes. Text is measured through [`vizir_text::TextMeasurer`]
//! and drawing is handed to an [`AxisPainter`] supplied by the renderer.
//!
//! ```
//! use vizir_axes::{
//!     AxisOptions, AxisPosition, ChartId, FixedAdvanceMeasurer, LayoutCoordinator, LinearScale,
//!     ValueRange,
//! };
//!
//! let mut layout = LayoutCoordinator::new(FixedAdvanceMeasurer::new(7.0));
//! let chart = ChartId(1);
//! let y = LinearScale::new(AxisPosition::Left, AxisOptions::new())
//!     .with_value_range(ValueRange::new(0.0, 95.0));
//! let x = LinearScale::new(AxisPosition::Bottom, AxisOptions::new())
//!     .with_value_range(ValueRange::new(-1.0, 1.0));
//! layout.register(chart, Box::new(y));
//! layout.register(chart, Box::new(x));
//!
//! let area = layout.fit_axes_for_chart(chart, 500.0, 300.0).unwrap();
//! assert!(area.width() < 500.0 && area.height() < 300.0);
//! ```

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod coordinator;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod label;
#[cfg(test)]
mod layout_tests;
mod linear;
mod options;
mod paint;
mod registry;
mod scale;
pub mod ticks;

pub use coordinator::{AxisId, ChartId, ChartLayoutOptions, LayoutCoordinator};
pub use error::{FitError, LayoutError};
pub use label::{format_tick_value, render_template};
pub use linear::{GRID_RESERVE, LABEL_HEIGHT_PADDING, LABEL_SLOT_PADDING, LinearScale};
pub use options::{
    AxisOptions, GridLineOptions, LabelCallback, LabelOptions, SharedAxisOptions, TickOverride,
};
pub use paint::{AxisPainter, TextAlign, TextBaseline, TextRun};
pub use registry::{LINEAR, ScaleConstructor, ScaleTypeRegistry};
pub use scale::{AxisPosition, RangeHook, Scale, ValueRange};

pub use vizir_text::{
    FixedAdvanceMeasurer, FontFamily, FontStyle, FontWeight, HeuristicTextMeasurer, TextMeasurer,
    TextMetrics, TextStyle,
};
