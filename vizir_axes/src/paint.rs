// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing handoff.
//!
//! Axes do not rasterize anything. After layout, [`Scale::draw`](crate::Scale::draw)
//! walks the committed ticks, labels and geometry and issues stroke/text calls on
//! an [`AxisPainter`] implemented by the renderer (canvas, SVG writer, GPU scene).

use kurbo::{Line, Point};
use peniko::Brush;
use vizir_text::TextStyle;

/// Horizontal text alignment relative to a run's origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    /// Origin is the left edge of the text.
    Start,
    /// Origin is the horizontal center.
    Center,
    /// Origin is the right edge.
    End,
}

/// Vertical text alignment relative to a run's origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextBaseline {
    /// Origin is the top of the em box.
    Top,
    /// Origin is the vertical middle.
    Middle,
    /// Origin is the alphabetic baseline.
    Alphabetic,
}

/// A single line of label text to paint.
#[derive(Clone, Debug)]
pub struct TextRun<'a> {
    /// The text, unshaped.
    pub text: &'a str,
    /// Anchor point in surface coordinates.
    pub origin: Point,
    /// Font.
    pub style: &'a TextStyle,
    /// Fill paint.
    pub brush: &'a Brush,
    /// Horizontal alignment at `origin`.
    pub align: TextAlign,
    /// Vertical alignment at `origin`.
    pub baseline: TextBaseline,
    /// Clockwise rotation about `origin`, in degrees.
    pub rotation: f64,
    /// Clip width; text wider than this is truncated by the renderer.
    pub max_width: Option<f64>,
}

/// Receives the primitive drawing calls produced by an axis.
pub trait AxisPainter {
    /// Stroke a straight line.
    fn stroke_line(&mut self, line: Line, brush: &Brush, width: f64);

    /// Fill a line of text.
    fn fill_text(&mut self, run: &TextRun<'_>);
}

/// Offset that puts odd-width strokes on pixel centers.
pub(crate) fn alias_pixel(line_width: f64) -> f64 {
    if line_width % 2.0 == 0.0 { 0.0 } else { 0.5 }
}
