// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multi-axis layout.
//!
//! A [`LayoutCoordinator`] owns the axes of any number of charts, keyed by
//! [`ChartId`]. Fitting a chart divides its surface between the axes on each
//! edge and the plotting area in the middle:
//!
//! ```text
//! |-----------------------------------------------|
//! |         |            T1              |        |
//! |----|----|----------------------------|--------|
//! |    |    |                            |        |
//! | L1 | L2 |       plotting area        |   R1   |
//! |    |    |                            |        |
//! |----|----|----------------------------|--------|
//! |         |            B1              |        |
//! |-----------------------------------------------|
//! ```
//!
//! Sizing takes two passes:
//!
//! 1. **Probe**: the plotting area is guaranteed half of each dimension. The
//!    rest is split evenly between the axes of each orientation and every axis
//!    is fit into its share, reporting the thickness it needs.
//! 2. **Commit**: the reported thicknesses are subtracted from the surface to
//!    get the real plotting area (shrunk to the surface's aspect ratio if the
//!    chart asks for that). Every axis is refit against the real plotting area
//!    so its ticks match the length it will actually be drawn at.
//!
//! Axes on the same edge stack outward from the plotting area in registration
//! order.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use kurbo::{Rect, Size};
use smallvec::SmallVec;
use vizir_text::{HeuristicTextMeasurer, TextMeasurer};

use crate::error::LayoutError;
use crate::paint::AxisPainter;
use crate::scale::{AxisPosition, Scale};

/// Host-chosen handle for a chart surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChartId(pub u64);

/// Handle for a registered axis, unique within a coordinator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AxisId(pub u64);

/// Per-chart layout settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChartLayoutOptions {
    /// Keep the plotting area at the surface's height/width ratio.
    pub maintain_aspect_ratio: bool,
}

impl ChartLayoutOptions {
    /// Sets [`maintain_aspect_ratio`](Self::maintain_aspect_ratio).
    pub fn with_maintain_aspect_ratio(mut self, maintain: bool) -> Self {
        self.maintain_aspect_ratio = maintain;
        self
    }
}

#[derive(Debug)]
struct RegisteredAxis {
    id: AxisId,
    scale: Box<dyn Scale>,
}

impl RegisteredAxis {
    fn scale(&self) -> &dyn Scale {
        self.scale.as_ref()
    }
}

#[derive(Debug, Default)]
struct ChartAxes {
    options: ChartLayoutOptions,
    axes: Vec<RegisteredAxis>,
    area: Option<Rect>,
}

type EdgeGroup = SmallVec<[usize; 4]>;

/// Indices into a chart's axis list, one group per edge, in registration order.
#[derive(Debug, Default)]
struct EdgeGroups {
    left: EdgeGroup,
    right: EdgeGroup,
    top: EdgeGroup,
    bottom: EdgeGroup,
}

impl EdgeGroups {
    fn partition(axes: &[RegisteredAxis]) -> Self {
        let mut groups = Self::default();
        for (i, axis) in axes.iter().enumerate() {
            match axis.scale.position() {
                AxisPosition::Left => groups.left.push(i),
                AxisPosition::Right => groups.right.push(i),
                AxisPosition::Top => groups.top.push(i),
                AxisPosition::Bottom => groups.bottom.push(i),
            }
        }
        groups
    }

    fn vertical(&self) -> impl Iterator<Item = usize> + '_ {
        self.left.iter().chain(&self.right).copied()
    }

    fn horizontal(&self) -> impl Iterator<Item = usize> + '_ {
        self.top.iter().chain(&self.bottom).copied()
    }
}

/// Owns the axes of each chart and lays them out around the plotting area.
pub struct LayoutCoordinator {
    measurer: Box<dyn TextMeasurer>,
    charts: HashMap<ChartId, ChartAxes>,
    next_axis: u64,
}

impl fmt::Debug for LayoutCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutCoordinator")
            .field("measurer", &"..")
            .field("charts", &self.charts)
            .field("next_axis", &self.next_axis)
            .finish()
    }
}

impl Default for LayoutCoordinator {
    fn default() -> Self {
        Self::new(HeuristicTextMeasurer)
    }
}

impl LayoutCoordinator {
    /// Creates a coordinator that measures labels with `measurer`.
    pub fn new(measurer: impl TextMeasurer + 'static) -> Self {
        Self {
            measurer: Box::new(measurer),
            charts: HashMap::new(),
            next_axis: 0,
        }
    }

    /// Adds `scale` to `chart`, creating the chart entry if needed.
    pub fn register(&mut self, chart: ChartId, scale: Box<dyn Scale>) -> AxisId {
        let id = AxisId(self.next_axis);
        self.next_axis += 1;
        self.charts
            .entry(chart)
            .or_default()
            .axes
            .push(RegisteredAxis { id, scale });
        id
    }

    /// Removes one axis from `chart` and hands it back.
    ///
    /// Unknown charts and axes are ignored.
    pub fn remove_axis(&mut self, chart: ChartId, axis: AxisId) -> Option<Box<dyn Scale>> {
        let Some(entry) = self.charts.get_mut(&chart) else {
            tracing::debug!(chart = chart.0, axis = axis.0, "remove_axis: unknown chart");
            return None;
        };
        let Some(index) = entry.axes.iter().position(|a| a.id == axis) else {
            tracing::debug!(chart = chart.0, axis = axis.0, "remove_axis: unknown axis");
            return None;
        };
        Some(entry.axes.remove(index).scale)
    }

    /// Removes a chart and all of its axes. Returns `false` if it was not registered.
    pub fn remove_chart(&mut self, chart: ChartId) -> bool {
        let removed = self.charts.remove(&chart).is_some();
        if !removed {
            tracing::debug!(chart = chart.0, "remove_chart: unknown chart");
        }
        removed
    }

    /// Sets the layout options of `chart`, creating the chart entry if needed.
    pub fn configure_chart(&mut self, chart: ChartId, options: ChartLayoutOptions) {
        self.charts.entry(chart).or_default().options = options;
    }

    /// The layout options of `chart`, if registered.
    pub fn chart_options(&self, chart: ChartId) -> Option<ChartLayoutOptions> {
        self.charts.get(&chart).map(|c| c.options)
    }

    /// The plotting area committed by the last successful fit of `chart`.
    pub fn chart_area(&self, chart: ChartId) -> Option<Rect> {
        self.charts.get(&chart).and_then(|c| c.area)
    }

    /// Looks up an axis.
    pub fn axis(&self, chart: ChartId, axis: AxisId) -> Option<&dyn Scale> {
        let entry = self.charts.get(&chart)?.axes.iter().find(|a| a.id == axis)?;
        Some(entry.scale())
    }

    /// Looks up an axis for mutation, e.g. to set its value range.
    pub fn axis_mut(&mut self, chart: ChartId, axis: AxisId) -> Option<&mut dyn Scale> {
        let entry = self
            .charts
            .get_mut(&chart)?
            .axes
            .iter_mut()
            .find(|a| a.id == axis)?;
        let scale: &mut dyn Scale = entry.scale.as_mut();
        Some(scale)
    }

    /// The axes of `chart` in registration order.
    pub fn axes(&self, chart: ChartId) -> impl Iterator<Item = (AxisId, &dyn Scale)> + '_ {
        self.charts
            .get(&chart)
            .into_iter()
            .flat_map(|c| c.axes.iter())
            .map(|a| (a.id, a.scale()))
    }

    /// Number of registered charts.
    pub fn chart_count(&self) -> usize {
        self.charts.len()
    }

    /// Fits every axis of `chart` to a `width x height` surface.
    ///
    /// Commits each axis's bounds and returns the plotting area, which is also
    /// available afterwards from [`chart_area`](Self::chart_area).
    ///
    /// Every axis's value range is checked before any axis is fit, so a range
    /// error leaves ticks, labels and geometry from the previous fit in place.
    pub fn fit_axes_for_chart(
        &mut self,
        chart: ChartId,
        width: f64,
        height: f64,
    ) -> Result<Rect, LayoutError> {
        if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
            return Err(LayoutError::InvalidSurface { width, height });
        }
        let measurer: &dyn TextMeasurer = self.measurer.as_ref();
        let entry = self
            .charts
            .get_mut(&chart)
            .ok_or(LayoutError::UnknownChart(chart))?;
        tracing::debug!(
            chart = chart.0,
            width,
            height,
            axes = entry.axes.len(),
            "fitting axes"
        );

        let maintain = entry.options.maintain_aspect_ratio;
        let axes = &mut entry.axes;
        for axis in axes.iter_mut() {
            axis.scale
                .calculate_range()
                .map_err(|err| LayoutError::Axis { axis: axis.id, err })?;
        }

        let groups = EdgeGroups::partition(axes);
        let vertical_count = groups.left.len() + groups.right.len();
        let horizontal_count = groups.top.len() + groups.bottom.len();

        // The plotting area keeps at least half of each dimension while probing.
        let chart_width = width / 2.0;
        let mut chart_height = height / 2.0;
        let screen_ratio = (width > 0.0).then(|| height / width);
        if maintain && let Some(ratio) = screen_ratio {
            chart_height = chart_width * ratio;
        }

        let vertical_share = share(width - chart_width, vertical_count);
        let horizontal_share = share(height - chart_height, horizontal_count);

        // Pass one: probe each axis with the most it may take.
        let mut measured: Vec<Size> = Vec::with_capacity(axes.len());
        for axis in axes.iter_mut() {
            let (w, h) = if axis.scale.is_horizontal() {
                (chart_width, horizontal_share)
            } else {
                (vertical_share, chart_height)
            };
            let size = axis
                .scale
                .fit(w, h, measurer)
                .map_err(|err| LayoutError::Axis { axis: axis.id, err })?;
            measured.push(size);
        }

        let mut plot_width = (width - thickness(groups.vertical(), |i| measured[i].width)).max(0.0);
        let mut plot_height =
            (height - thickness(groups.horizontal(), |i| measured[i].height)).max(0.0);

        if maintain {
            match screen_ratio {
                Some(ratio) if plot_width > 0.0 && plot_height > 0.0 => {
                    // Shrink only: the area never grows past the surface.
                    if plot_height / plot_width > ratio {
                        plot_height = plot_width * ratio;
                    } else {
                        plot_width = plot_height / ratio;
                    }
                }
                _ => tracing::warn!(
                    chart = chart.0,
                    plot_width,
                    plot_height,
                    "axes leave no room to keep the aspect ratio"
                ),
            }
        }

        // Pass two: refit against the real plotting area.
        for (axis, size) in axes.iter_mut().zip(&measured) {
            let (w, h) = if axis.scale.is_horizontal() {
                (plot_width, size.height)
            } else {
                (size.width, plot_height)
            };
            axis.scale
                .fit(w, h, measurer)
                .map_err(|err| LayoutError::Axis { axis: axis.id, err })?;
        }

        // Placement.
        let total_left = thickness(groups.left.iter().copied(), |i| measured[i].width);
        let total_top = thickness(groups.top.iter().copied(), |i| measured[i].height);

        let mut left = 0.0;
        for &i in &groups.left {
            let width = measured[i].width;
            left = place_vertical(axes[i].scale.as_mut(), left, width, total_top, plot_height);
        }
        left += plot_width;
        for &i in &groups.right {
            let width = measured[i].width;
            left = place_vertical(axes[i].scale.as_mut(), left, width, total_top, plot_height);
        }

        let mut top = 0.0;
        for &i in &groups.top {
            let height = measured[i].height;
            top = place_horizontal(axes[i].scale.as_mut(), top, height, total_left, plot_width);
        }
        top += plot_height;
        for &i in &groups.bottom {
            let height = measured[i].height;
            top = place_horizontal(axes[i].scale.as_mut(), top, height, total_left, plot_width);
        }

        let area = Rect::new(
            total_left,
            total_top,
            total_left + plot_width,
            total_top + plot_height,
        );
        entry.area = Some(area);
        tracing::debug!(chart = chart.0, ?area, "fitted axes");
        Ok(area)
    }

    /// Draws every visible axis of `chart` against its committed plotting area.
    pub fn draw_chart(
        &self,
        chart: ChartId,
        painter: &mut dyn AxisPainter,
    ) -> Result<(), LayoutError> {
        let entry = self
            .charts
            .get(&chart)
            .ok_or(LayoutError::UnknownChart(chart))?;
        let Some(area) = entry.area else {
            return Ok(());
        };
        for axis in &entry.axes {
            axis.scale.draw(area, painter);
        }
        Ok(())
    }
}

/// Even split of `space` between `count` axes; no axes take nothing.
fn share(space: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        space / count as f64
    }
}

/// Summed thickness of a group of axes.
fn thickness(group: impl Iterator<Item = usize>, measure: impl Fn(usize) -> f64) -> f64 {
    group.fold(0.0, |total, i| total + measure(i))
}

/// Places a left/right axis at `left`; returns its right edge.
fn place_vertical(scale: &mut dyn Scale, left: f64, width: f64, top: f64, height: f64) -> f64 {
    let right = left + width;
    scale.set_bounds(Rect::new(left, top, right, top + height));
    right
}

/// Places a top/bottom axis at `top`; returns its bottom edge.
fn place_horizontal(scale: &mut dyn Scale, top: f64, height: f64, left: f64, width: f64) -> f64 {
    let bottom = top + height;
    scale.set_bounds(Rect::new(left, top, left + width, bottom));
    bottom
}
