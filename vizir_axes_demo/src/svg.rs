// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG output for `vizir_axes_demo`.

use std::fmt::Write as _;

use kurbo::{Line, Rect};
use peniko::Brush;
use vizir_axes::{AxisPainter, TextAlign, TextBaseline, TextRun};

/// Collects axis drawing calls as SVG elements.
#[derive(Debug)]
pub(crate) struct SvgPainter {
    view_box: Rect,
    body: String,
}

impl SvgPainter {
    pub(crate) fn new(view_box: Rect) -> Self {
        Self {
            view_box,
            body: String::new(),
        }
    }

    /// Outlines the plotting area so the layout result is visible.
    pub(crate) fn plot_frame(&mut self, area: Rect) {
        let _ = writeln!(
            self.body,
            r##"<rect x="{}" y="{}" width="{}" height="{}" fill="#f4f6fa" stroke="#c8cdd8"/>"##,
            area.x0,
            area.y0,
            area.width(),
            area.height()
        );
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let vb = self.view_box;
        let mut out = String::new();
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        let _ = writeln!(
            out,
            r#"viewBox="{} {} {} {}" width="{}" height="{}">"#,
            vb.x0,
            vb.y0,
            vb.width(),
            vb.height(),
            vb.width(),
            vb.height()
        );
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

impl AxisPainter for SvgPainter {
    fn stroke_line(&mut self, line: Line, brush: &Brush, width: f64) {
        let _ = write!(
            self.body,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke-width="{width}""#,
            line.p0.x, line.p0.y, line.p1.x, line.p1.y
        );
        write_paint_attr(&mut self.body, "stroke", brush);
        self.body.push_str("/>\n");
    }

    fn fill_text(&mut self, run: &TextRun<'_>) {
        let anchor = match run.align {
            TextAlign::Start => "start",
            TextAlign::Center => "middle",
            TextAlign::End => "end",
        };
        let baseline = match run.baseline {
            TextBaseline::Top => "hanging",
            TextBaseline::Middle => "middle",
            TextBaseline::Alphabetic => "alphabetic",
        };
        let (x, y) = (run.origin.x, run.origin.y);
        let _ = write!(
            self.body,
            r#"<text x="{x}" y="{y}" style="font: {}" text-anchor="{anchor}" dominant-baseline="{baseline}""#,
            escape_xml(&run.style.to_css_font()),
        );
        if run.rotation != 0.0 {
            let _ = write!(
                self.body,
                r#" transform="rotate({} {x} {y})""#,
                run.rotation
            );
        }
        if let Some(max_width) = run.max_width {
            let _ = write!(self.body, r#" data-max-width="{max_width}""#);
        }
        write_paint_attr(&mut self.body, "fill", run.brush);
        self.body.push('>');
        self.body.push_str(&escape_xml(run.text));
        self.body.push_str("</text>\n");
    }
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let paint = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (paint, opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o}""#);
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
