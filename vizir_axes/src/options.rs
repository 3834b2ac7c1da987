// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis configuration.
//!
//! Options are authored by the host and *shared* with the axis rather than
//! copied into it: [`SharedAxisOptions`] is a reference-counted cell, so an edit
//! made through the host's handle is picked up by the very next fit without any
//! explicit update call.
//!
//! The sharing discipline is single writer, many readers. The host mutates the
//! options between layout passes; axes and the coordinator only read them
//! while fitting or drawing. Mutating options from inside a label callback
//! panics (the cell is already borrowed for reading).

extern crate alloc;

use alloc::rc::Rc;
use alloc::string::String;
use core::cell::{Ref, RefCell};

use peniko::Brush;
use peniko::color::palette::css;
use vizir_text::TextStyle;

/// Produces the label for a tick: `(value, index, all_ticks)`.
///
/// Returning `None` renders an empty label.
pub type LabelCallback = Rc<dyn Fn(f64, usize, &[f64]) -> Option<String>>;

/// A manual tick layout that bypasses automatic spacing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickOverride {
    /// Value of the first tick.
    pub start: f64,
    /// Distance between consecutive ticks.
    pub step_width: f64,
    /// Number of intervals; `steps + 1` ticks are generated.
    pub steps: usize,
}

impl TickOverride {
    /// Creates an override of `steps` intervals of `step_width` starting at `start`.
    pub fn new(start: f64, step_width: f64, steps: usize) -> Self {
        Self {
            start,
            step_width,
            steps,
        }
    }
}

/// Grid line and tick mark styling.
#[derive(Clone, Debug, PartialEq)]
pub struct GridLineOptions {
    /// Whether tick marks and grid lines are drawn (and space reserved for them).
    pub show: bool,
    /// Paint for ordinary grid lines.
    pub color: Brush,
    /// Stroke width for ordinary grid lines.
    pub line_width: f64,
    /// Paint for the zero line (or the first line when zero is not a tick).
    pub zero_line_color: Brush,
    /// Stroke width for the zero line.
    pub zero_line_width: f64,
    /// Whether grid lines extend across the plotting area.
    pub draw_on_chart_area: bool,
}

impl Default for GridLineOptions {
    fn default() -> Self {
        Self {
            show: true,
            color: Brush::Solid(css::BLACK.with_alpha(0.05)),
            line_width: 1.0,
            zero_line_color: Brush::Solid(css::BLACK.with_alpha(0.25)),
            zero_line_width: 1.0,
            draw_on_chart_area: true,
        }
    }
}

/// Tick label options.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelOptions {
    /// Whether labels are drawn (and space reserved for them).
    pub show: bool,
    /// Template used when no callback is set, e.g. `"<%=value%>"`.
    pub template: Option<String>,
    /// Label font.
    pub style: TextStyle,
    /// Label fill paint.
    pub color: Brush,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            show: true,
            template: Some(String::from("<%=value%>")),
            style: TextStyle::new(12.0),
            color: Brush::Solid(peniko::Color::from_rgb8(0x66, 0x66, 0x66)),
        }
    }
}

/// Configuration for a single axis.
#[derive(Clone)]
pub struct AxisOptions {
    /// Whether the axis draws anything at all.
    ///
    /// Hidden axes still take part in layout.
    pub show: bool,
    /// Extend the range down to zero before choosing tick spacing.
    pub begin_at_zero: bool,
    /// Manual tick layout.
    pub override_ticks: Option<TickOverride>,
    /// Grid line options.
    pub grid_lines: GridLineOptions,
    /// Label options.
    pub labels: LabelOptions,
    /// Label callback, preferred over [`LabelOptions::template`].
    pub label_callback: Option<LabelCallback>,
}

impl core::fmt::Debug for AxisOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AxisOptions")
            .field("show", &self.show)
            .field("begin_at_zero", &self.begin_at_zero)
            .field("override_ticks", &self.override_ticks)
            .field("grid_lines", &self.grid_lines)
            .field("labels", &self.labels)
            .field("label_callback", &self.label_callback.is_some())
            .finish()
    }
}

impl Default for AxisOptions {
    fn default() -> Self {
        Self {
            show: true,
            begin_at_zero: false,
            override_ticks: None,
            grid_lines: GridLineOptions::default(),
            labels: LabelOptions::default(),
            label_callback: None,
        }
    }
}

impl AxisOptions {
    /// Creates options with the default styling: visible, grid lines on, labels
    /// rendered through the `<%=value%>` template.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show or hide the axis.
    pub fn with_show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    /// Force zero into the range.
    pub fn with_begin_at_zero(mut self, begin_at_zero: bool) -> Self {
        self.begin_at_zero = begin_at_zero;
        self
    }

    /// Use a manual tick layout.
    pub fn with_override(mut self, ticks: TickOverride) -> Self {
        self.override_ticks = Some(ticks);
        self
    }

    /// Enable or disable grid lines and tick marks.
    pub fn with_grid_lines(mut self, show: bool) -> Self {
        self.grid_lines.show = show;
        self
    }

    /// Replace grid line styling.
    pub fn with_grid_line_options(mut self, grid_lines: GridLineOptions) -> Self {
        self.grid_lines = grid_lines;
        self
    }

    /// Enable or disable tick labels.
    pub fn with_labels(mut self, show: bool) -> Self {
        self.labels.show = show;
        self
    }

    /// Set the label template.
    pub fn with_label_template(mut self, template: impl Into<String>) -> Self {
        self.labels.template = Some(template.into());
        self
    }

    /// Clear the label template.
    pub fn without_label_template(mut self) -> Self {
        self.labels.template = None;
        self
    }

    /// Set the label font.
    pub fn with_label_style(mut self, style: TextStyle) -> Self {
        self.labels.style = style;
        self
    }

    /// Set a label callback.
    pub fn with_label_callback(
        mut self,
        f: impl Fn(f64, usize, &[f64]) -> Option<String> + 'static,
    ) -> Self {
        self.label_callback = Some(Rc::new(f));
        self
    }

    /// Wrap into a shared handle.
    pub fn shared(self) -> SharedAxisOptions {
        SharedAxisOptions::new(self)
    }
}

/// Axis options shared between the host and an axis.
///
/// Cloning the handle shares the same options.
#[derive(Clone, Debug, Default)]
pub struct SharedAxisOptions(Rc<RefCell<AxisOptions>>);

impl SharedAxisOptions {
    /// Creates a new shared handle.
    pub fn new(options: AxisOptions) -> Self {
        Self(Rc::new(RefCell::new(options)))
    }

    /// Borrows the options for reading.
    ///
    /// Panics if the host is mutating the options at the same time.
    pub fn read(&self) -> Ref<'_, AxisOptions> {
        self.0.borrow()
    }

    /// Mutates the options in place. Changes are visible on the next fit.
    ///
    /// Panics if an axis is reading the options at the same time.
    pub fn update<R>(&self, f: impl FnOnce(&mut AxisOptions) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }

    /// Returns `true` if both handles point at the same options.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl From<AxisOptions> for SharedAxisOptions {
    fn from(options: AxisOptions) -> Self {
        Self::new(options)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn shared_options_see_host_updates() {
        let host = AxisOptions::new().shared();
        let axis_view = host.clone();
        assert!(!axis_view.read().begin_at_zero);

        host.update(|o| o.begin_at_zero = true);
        assert!(axis_view.read().begin_at_zero);
        assert!(host.ptr_eq(&axis_view));
    }

    #[test]
    fn cloned_options_share_the_label_callback() {
        use alloc::string::ToString;
        use core::cell::Cell;

        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let o = AxisOptions::new().with_label_callback(move |v, _, _| {
            counter.set(counter.get() + 1);
            Some(v.to_string())
        });
        let copy = o.clone();
        let (Some(a), Some(b)) = (&o.label_callback, &copy.label_callback) else {
            panic!("callback set");
        };
        assert!(Rc::ptr_eq(a, b));
        assert_eq!(b(2.5, 0, &[2.5]).as_deref(), Some("2.5"));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn new_options_are_visible_with_default_template() {
        let o = AxisOptions::new();
        assert!(o.show);
        assert!(o.grid_lines.show);
        assert!(o.labels.show);
        assert_eq!(o.labels.template.as_deref(), Some("<%=value%>"));
    }
}
