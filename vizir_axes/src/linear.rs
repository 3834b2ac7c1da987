// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The linear axis.
//!
//! Fitting runs in three steps, each recomputed from scratch on every call:
//!
//! 1. **Ticks**: a manual [`TickOverride`](crate::TickOverride), or nice-number
//!    spacing sized to the axis length (see [`crate::ticks`]).
//! 2. **Labels**: label callback, else label template, else empty.
//! 3. **Minimum box**: the axis always claims its full length; its thickness is
//!    25px for tick marks (if grid lines are shown) plus whatever the labels
//!    need. Vertical axes take the width of the longest label. Horizontal axes
//!    rotate labels that would overlap and take the rotated height.
//!
//! ```text
//!   horizontal                       vertical
//!   |-----|-----|-----|-----|          -|
//!   0    20    40    60    80           |  80
//!                                      -|
//!                                       |  60
//! ```

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use kurbo::{Line, Rect, Size};
use peniko::Brush;
use vizir_text::{TextMeasurer, TextStyle, longest_advance};

use crate::error::FitError;
use crate::label::render_template;
use crate::options::{AxisOptions, SharedAxisOptions};
use crate::paint::{AxisPainter, TextAlign, TextBaseline, TextRun, alias_pixel};
use crate::scale::{AxisPosition, RangeHook, Scale, ValueRange};
use crate::ticks::{NiceTicks, max_ticks_for, override_ticks};

/// Thickness reserved for tick marks when grid lines are shown.
pub const GRID_RESERVE: f64 = 25.0;
/// Horizontal padding around each label slot (3px per side).
pub const LABEL_SLOT_PADDING: f64 = 6.0;
/// Padding added to the font size for unrotated horizontal labels.
pub const LABEL_HEIGHT_PADDING: f64 = 10.0;

const TICK_MARK_LENGTH: f64 = 10.0;
const AXIS_LINE_INSET: f64 = 5.0;
const LABEL_OFFSET: f64 = 20.0;

/// A continuous axis with evenly spaced ticks.
#[derive(Debug)]
pub struct LinearScale {
    position: AxisPosition,
    options: SharedAxisOptions,
    range_hook: Option<RangeHook>,
    value_range: Option<ValueRange>,
    // Effective range used for pixel mapping: the nice tick bounds for
    // automatic ticks, the value range otherwise.
    min: f64,
    max: f64,
    ticks: Vec<f64>,
    labels: Vec<String>,
    label_rotation: f64,
    size: Size,
    bounds: Rect,
}

impl LinearScale {
    /// Creates an axis at `position` reading the shared `options`.
    pub fn new(position: AxisPosition, options: impl Into<SharedAxisOptions>) -> Self {
        Self {
            position,
            options: options.into(),
            range_hook: None,
            value_range: None,
            min: 0.0,
            max: 0.0,
            ticks: Vec::new(),
            labels: Vec::new(),
            label_rotation: 0.0,
            size: Size::ZERO,
            bounds: Rect::ZERO,
        }
    }

    /// Sets a hook that recomputes the value range at the start of every fit.
    pub fn with_range_hook(mut self, hook: RangeHook) -> Self {
        self.range_hook = Some(hook);
        self
    }

    /// Sets the value range directly.
    pub fn with_value_range(mut self, range: ValueRange) -> Self {
        self.value_range = Some(range);
        self
    }

    /// Lower bound of the range used for pixel mapping.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound of the range used for pixel mapping.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Maps a surface coordinate back to a data value.
    ///
    /// Inverse of [`Scale::pixel_for_value`]; a degenerate axis maps every
    /// pixel to its minimum.
    pub fn value_for_pixel(&self, pixel: f64) -> f64 {
        let extent = self.extent();
        let finite = self.min.is_finite() && self.max.is_finite();
        if self.max == self.min || !finite || extent == 0.0 {
            return self.min;
        }
        let b = self.bounds;
        let t = if self.position.is_horizontal() {
            (pixel - b.x0) / extent
        } else {
            (b.y1 - pixel) / extent
        };
        let range = self.max - self.min;
        if range.is_finite() {
            self.min + t * range
        } else {
            self.min * (1.0 - t) + self.max * t
        }
    }

    fn extent(&self) -> f64 {
        if self.position.is_horizontal() {
            self.bounds.width()
        } else {
            self.bounds.height()
        }
    }

    /// Picks the smallest label rotation that stops labels from overlapping.
    ///
    /// Horizontal axes only. `width` is the axis length and `height` the space
    /// left for labels. Sets [`Scale::label_rotation`] and returns the height
    /// the labels need.
    ///
    /// Each label gets a slot of `width / (ticks - 1) - 6`. If the longest label
    /// is wider, rotations of 1°, 2°, ... are tried (up to the angle at which
    /// the label would stand taller than `height`, and never 90°) until its
    /// projected width fits. If none fits, the last angle tried is kept.
    pub fn calculate_label_rotation(
        &mut self,
        width: f64,
        height: f64,
        style: &TextStyle,
        measurer: &dyn TextMeasurer,
    ) -> f64 {
        self.label_rotation = 0.0;
        let height = height.max(0.0);

        let longest = longest_advance(measurer, style, self.labels.iter().map(String::as_str));
        let slots = self.ticks.len().saturating_sub(1).max(1);
        let max_available_width = width / slots as f64 - LABEL_SLOT_PADDING;

        if longest <= 0.0 || longest <= max_available_width {
            return height.min(style.font_size + LABEL_HEIGHT_PADDING);
        }

        let ideal = (height / longest).clamp(0.0, 1.0).asin().to_degrees().floor();
        #[allow(clippy::cast_possible_truncation, reason = "asin is within 0..=90 degrees")]
        let max_rotation = ideal.min(90.0) as u32;
        for degrees in 1..max_rotation {
            let rotation = f64::from(degrees);
            self.label_rotation = rotation;
            if rotation.to_radians().cos() * longest <= max_available_width {
                break;
            }
        }

        height.min(longest * self.label_rotation.to_radians().sin())
    }

    fn draw_horizontal(
        &self,
        options: &AxisOptions,
        chart_area: Rect,
        painter: &mut dyn AxisPainter,
    ) {
        let b = self.bounds;
        let on_bottom = self.position == AxisPosition::Bottom;
        let grid = &options.grid_lines;

        if grid.show {
            let (tick_start, tick_end) = if on_bottom {
                (b.y0, b.y0 + TICK_MARK_LENGTH)
            } else {
                (b.y1 - TICK_MARK_LENGTH, b.y1)
            };
            let axis_y = if on_bottom {
                b.y0 + AXIS_LINE_INSET
            } else {
                b.y1 - AXIS_LINE_INSET
            };
            painter.stroke_line(
                Line::new((b.x0, axis_y), (b.x1, axis_y)),
                &grid.zero_line_color,
                grid.zero_line_width,
            );

            let has_zero = self.ticks.contains(&0.0);
            for (i, &tick) in self.ticks.iter().enumerate() {
                let (brush, width) = line_style(options, tick, i, has_zero);
                let x = self.pixel_for_value(tick) + alias_pixel(width);
                painter.stroke_line(Line::new((x, tick_start), (x, tick_end)), brush, width);
                if grid.draw_on_chart_area {
                    painter.stroke_line(
                        Line::new((x, chart_area.y0), (x, chart_area.y1)),
                        brush,
                        width,
                    );
                }
            }
        }

        if options.labels.show {
            let label_y = if on_bottom { b.y0 + LABEL_OFFSET } else { b.y0 };
            let rotated = self.label_rotation != 0.0;
            for (label, &tick) in self.labels.iter().zip(&self.ticks) {
                painter.fill_text(&TextRun {
                    text: label,
                    origin: (self.pixel_for_value(tick), label_y).into(),
                    style: &options.labels.style,
                    brush: &options.labels.color,
                    align: if rotated { TextAlign::End } else { TextAlign::Center },
                    baseline: if rotated {
                        TextBaseline::Middle
                    } else {
                        TextBaseline::Top
                    },
                    rotation: -self.label_rotation,
                    max_width: None,
                });
            }
        }
    }

    fn draw_vertical(
        &self,
        options: &AxisOptions,
        chart_area: Rect,
        painter: &mut dyn AxisPainter,
    ) {
        let b = self.bounds;
        let on_left = self.position == AxisPosition::Left;
        let grid = &options.grid_lines;

        if grid.show {
            let (tick_start, tick_end) = if on_left {
                (b.x0, b.x0 + TICK_MARK_LENGTH)
            } else {
                (b.x1 - TICK_MARK_LENGTH, b.x1)
            };
            let axis_x = if on_left {
                b.x1 - AXIS_LINE_INSET
            } else {
                b.x0 + AXIS_LINE_INSET
            };
            painter.stroke_line(
                Line::new((axis_x, b.y0), (axis_x, b.y1)),
                &grid.zero_line_color,
                grid.zero_line_width,
            );

            let has_zero = self.ticks.contains(&0.0);
            for (i, &tick) in self.ticks.iter().enumerate() {
                let (brush, width) = line_style(options, tick, i, has_zero);
                let y = self.pixel_for_value(tick);
                painter.stroke_line(Line::new((tick_start, y), (tick_end, y)), brush, width);
                if grid.draw_on_chart_area {
                    painter.stroke_line(
                        Line::new((chart_area.x0, y), (chart_area.x1, y)),
                        brush,
                        width,
                    );
                }
            }
        }

        if options.labels.show {
            let label_x = if on_left { b.x0 } else { b.x0 + LABEL_OFFSET };
            let reserved = if grid.show { GRID_RESERVE } else { 0.0 };
            let max_width = (b.width() - reserved).max(0.0);
            for (label, &tick) in self.labels.iter().zip(&self.ticks) {
                painter.fill_text(&TextRun {
                    text: label,
                    origin: (label_x, self.pixel_for_value(tick)).into(),
                    style: &options.labels.style,
                    brush: &options.labels.color,
                    align: TextAlign::Start,
                    baseline: TextBaseline::Middle,
                    rotation: 0.0,
                    max_width: Some(max_width),
                });
            }
        }
    }
}

/// Where `value` sits in `[min, max]`, as a fraction; `None` for a degenerate range.
fn range_fraction(value: f64, min: f64, max: f64) -> Option<f64> {
    if min == max || !(min.is_finite() && max.is_finite()) {
        return None;
    }
    let range = max - min;
    if range.is_finite() {
        Some((value - min) / range)
    } else {
        // Halved so ranges wider than `f64::MAX` stay finite.
        Some((0.5 * value - 0.5 * min) / (0.5 * max - 0.5 * min))
    }
}

/// Zero (or, without a zero tick, the first tick) gets the zero-line style.
fn line_style(options: &AxisOptions, tick: f64, index: usize, has_zero: bool) -> (&Brush, f64) {
    let grid = &options.grid_lines;
    if tick == 0.0 || (!has_zero && index == 0) {
        (&grid.zero_line_color, grid.zero_line_width)
    } else {
        (&grid.color, grid.line_width)
    }
}

impl Scale for LinearScale {
    fn position(&self) -> AxisPosition {
        self.position
    }

    fn options(&self) -> &SharedAxisOptions {
        &self.options
    }

    fn value_range(&self) -> Option<ValueRange> {
        self.value_range
    }

    fn set_value_range(&mut self, range: ValueRange) {
        self.value_range = Some(range);
    }

    fn calculate_range(&mut self) -> Result<ValueRange, FitError> {
        if let Some(range) = self.range_hook.as_ref().and_then(RangeHook::call) {
            self.value_range = Some(range);
        }
        let range = self.value_range.ok_or(FitError::MissingValueRange {
            position: self.position,
        })?;
        if !range.is_finite() {
            return Err(FitError::NonFiniteValueRange {
                min: range.min(),
                max: range.max(),
            });
        }
        Ok(range)
    }

    fn generate_ticks(&mut self, width: f64, height: f64) {
        self.ticks.clear();
        let Some(range) = self.value_range else {
            return;
        };
        let options = self.options.clone();
        let options = options.read();

        let min = if options.begin_at_zero {
            range.min().min(0.0)
        } else {
            range.min()
        };
        if let Some(o) = options.override_ticks {
            self.ticks = override_ticks(o);
            self.min = min;
            self.max = range.max();
        } else {
            let extent = if self.position.is_horizontal() {
                width
            } else {
                height
            };
            let nice = NiceTicks::compute(min, range.max(), max_ticks_for(extent));
            self.min = nice.min;
            self.max = nice.max;
            self.ticks = nice.values;
        }

        // Top of the screen is the largest value.
        if !self.position.is_horizontal() {
            self.ticks.reverse();
        }
    }

    fn build_labels(&mut self) {
        let options = self.options.clone();
        let options = options.read();
        let ticks = &self.ticks;
        self.labels = ticks
            .iter()
            .enumerate()
            .map(|(i, &tick)| {
                if let Some(callback) = &options.label_callback {
                    callback(tick, i, ticks.as_slice()).unwrap_or_default()
                } else if let Some(template) = &options.labels.template {
                    render_template(template, tick)
                } else {
                    String::new()
                }
            })
            .collect();
    }

    fn fit(
        &mut self,
        max_width: f64,
        max_height: f64,
        measurer: &dyn TextMeasurer,
    ) -> Result<Size, FitError> {
        let max_width = max_width.max(0.0);
        let max_height = max_height.max(0.0);

        self.calculate_range()?;
        self.generate_ticks(max_width, max_height);
        self.build_labels();
        self.label_rotation = 0.0;

        let options = self.options.clone();
        let options = options.read();
        let reserve = if options.grid_lines.show {
            GRID_RESERVE
        } else {
            0.0
        };

        let mut min_size = if self.position.is_horizontal() {
            Size::new(max_width, reserve.min(max_height))
        } else {
            Size::new(reserve.min(max_width), max_height)
        };

        if options.labels.show {
            let style = &options.labels.style;
            if self.position.is_horizontal() {
                let max_label_height = max_height - min_size.height;
                let label_height =
                    self.calculate_label_rotation(min_size.width, max_label_height, style, measurer);
                min_size.height = max_height.min(min_size.height + label_height);
            } else {
                let max_label_width = max_width - min_size.width;
                let largest =
                    longest_advance(measurer, style, self.labels.iter().map(String::as_str));
                if largest < max_label_width {
                    min_size.width += largest;
                } else {
                    // Labels get clipped when drawn.
                    min_size.width = max_width;
                }
            }
        }

        tracing::trace!(
            position = ?self.position,
            ticks = self.ticks.len(),
            rotation = self.label_rotation,
            width = min_size.width,
            height = min_size.height,
            "fit axis"
        );

        self.size = min_size;
        Ok(min_size)
    }

    fn size(&self) -> Size {
        self.size
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn ticks(&self) -> &[f64] {
        &self.ticks
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn label_rotation(&self) -> f64 {
        self.label_rotation
    }

    fn pixel_for_value(&self, value: f64) -> f64 {
        let b = self.bounds;
        let Some(t) = range_fraction(value, self.min, self.max) else {
            return if self.position.is_horizontal() {
                0.5 * (b.x0 + b.x1)
            } else {
                0.5 * (b.y0 + b.y1)
            };
        };
        if self.position.is_horizontal() {
            b.x0 + b.width() * t
        } else {
            // Screen y grows downward.
            b.y1 - b.height() * t
        }
    }

    fn draw(&self, chart_area: Rect, painter: &mut dyn AxisPainter) {
        let options = self.options.read();
        if !options.show {
            return;
        }
        if self.position.is_horizontal() {
            self.draw_horizontal(&options, chart_area, painter);
        } else {
            self.draw_vertical(&options, chart_area, painter);
        }
    }
}
