// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Line, Rect};
use peniko::Brush;

use crate::{
    AxisId, AxisOptions, AxisPainter, AxisPosition, ChartId, ChartLayoutOptions, FitError,
    FixedAdvanceMeasurer, LayoutCoordinator, LayoutError, LinearScale, Scale, TextRun, ValueRange,
};

const EPS: f64 = 1e-9;

fn coordinator() -> LayoutCoordinator {
    LayoutCoordinator::new(FixedAdvanceMeasurer::new(6.0))
}

fn linear(position: AxisPosition, min: f64, max: f64) -> Box<dyn Scale> {
    Box::new(
        LinearScale::new(position, AxisOptions::new()).with_value_range(ValueRange::new(min, max)),
    )
}

fn bounds(layout: &LayoutCoordinator, chart: ChartId, axis: AxisId) -> Rect {
    layout.axis(chart, axis).expect("registered axis").bounds()
}

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < EPS, "{a} != {b}");
}

#[test]
fn plotting_area_is_surface_minus_axes() {
    let mut layout = coordinator();
    let chart = ChartId(1);
    let left = layout.register(chart, linear(AxisPosition::Left, 0.0, 100.0));
    let bottom = layout.register(chart, linear(AxisPosition::Bottom, 0.0, 100.0));

    let area = layout
        .fit_axes_for_chart(chart, 500.0, 300.0)
        .expect("fit succeeds");
    let left_bounds = bounds(&layout, chart, left);
    let bottom_bounds = bounds(&layout, chart, bottom);

    // Grid reserve plus "100" at 6px per char.
    assert_close(left_bounds.width(), 43.0);
    assert_close(area.width(), 500.0 - left_bounds.width());
    assert_close(area.height(), 300.0 - bottom_bounds.height());
    assert_eq!(layout.chart_area(chart), Some(area));

    assert_close(left_bounds.x0, 0.0);
    assert_close(left_bounds.x1, area.x0);
    assert_close(left_bounds.y0, area.y0);
    assert_close(left_bounds.y1, area.y1);
    assert_close(bottom_bounds.y0, area.y1);
    assert_close(bottom_bounds.y1, 300.0);
    assert_close(bottom_bounds.x0, area.x0);
    assert_close(bottom_bounds.x1, area.x1);
}

#[test]
fn axes_refit_against_final_plotting_area() {
    let mut layout = coordinator();
    let chart = ChartId(1);
    let left = layout.register(chart, linear(AxisPosition::Left, 0.0, 100.0));
    layout.register(chart, linear(AxisPosition::Bottom, 0.0, 100.0));
    layout
        .fit_axes_for_chart(chart, 500.0, 300.0)
        .expect("fit succeeds");

    // The probe only offered half the height (3 ticks); the committed axis is
    // 253px tall, which fits 6.
    let axis = layout.axis(chart, left).expect("registered axis");
    assert_eq!(axis.ticks(), [100.0, 80.0, 60.0, 40.0, 20.0, 0.0]);
    assert_close(axis.pixel_for_value(100.0), axis.bounds().y0);
    assert_close(axis.pixel_for_value(0.0), axis.bounds().y1);
}

#[test]
fn aspect_ratio_is_kept() {
    let mut layout = coordinator();
    let chart = ChartId(7);
    layout.configure_chart(
        chart,
        ChartLayoutOptions::default().with_maintain_aspect_ratio(true),
    );
    layout.register(chart, linear(AxisPosition::Left, 0.0, 100.0));
    layout.register(chart, linear(AxisPosition::Bottom, 0.0, 100.0));

    let area = layout
        .fit_axes_for_chart(chart, 600.0, 300.0)
        .expect("fit succeeds");
    assert!((area.height() / area.width() - 0.5).abs() < 1e-6);
    assert!(area.x1 <= 600.0 + EPS && area.y1 <= 300.0 + EPS);

    // Height-constrained the other way round.
    let area = layout
        .fit_axes_for_chart(chart, 300.0, 600.0)
        .expect("fit succeeds");
    assert!((area.height() / area.width() - 2.0).abs() < 1e-6);
    assert!(area.x1 <= 300.0 + EPS && area.y1 <= 600.0 + EPS);

    // A flat or thin surface leaves nothing to scale; the area collapses
    // instead of going negative or NaN.
    let area = layout
        .fit_axes_for_chart(chart, 100.0, 0.0)
        .expect("fit succeeds");
    assert_close(area.height(), 0.0);
    assert!(area.width() >= 0.0 && area.x1 <= 100.0 + EPS);
    let area = layout
        .fit_axes_for_chart(chart, 0.0, 100.0)
        .expect("fit succeeds");
    assert_close(area.width(), 0.0);
    assert!(area.height() >= 0.0 && area.y1 <= 100.0 + EPS);
}

#[test]
fn axes_stack_outward_in_registration_order() {
    let mut layout = coordinator();
    let chart = ChartId(3);
    let l1 = layout.register(chart, linear(AxisPosition::Left, 0.0, 100.0));
    let l2 = layout.register(chart, linear(AxisPosition::Left, -5.0, 5.0));
    let r1 = layout.register(chart, linear(AxisPosition::Right, 0.0, 1.0));
    let t1 = layout.register(chart, linear(AxisPosition::Top, 0.0, 10.0));
    let b1 = layout.register(chart, linear(AxisPosition::Bottom, 0.0, 100.0));

    let area = layout
        .fit_axes_for_chart(chart, 800.0, 600.0)
        .expect("fit succeeds");
    let (l1, l2, r1, t1, b1) = (
        bounds(&layout, chart, l1),
        bounds(&layout, chart, l2),
        bounds(&layout, chart, r1),
        bounds(&layout, chart, t1),
        bounds(&layout, chart, b1),
    );

    assert_close(l1.x0, 0.0);
    assert_close(l1.x1, l2.x0);
    assert_close(l2.x1, area.x0);
    assert_close(r1.x0, area.x1);
    assert_close(r1.x1, 800.0);
    assert_close(t1.y0, 0.0);
    assert_close(t1.y1, area.y0);
    assert_close(b1.y0, area.y1);
    assert_close(b1.y1, 600.0);

    for vertical in [l1, l2, r1] {
        assert_close(vertical.y0, area.y0);
        assert_close(vertical.y1, area.y1);
    }
    for horizontal in [t1, b1] {
        assert_close(horizontal.x0, area.x0);
        assert_close(horizontal.x1, area.x1);
    }
}

#[test]
fn empty_chart_gets_whole_surface() {
    let mut layout = coordinator();
    let chart = ChartId(2);
    layout.configure_chart(chart, ChartLayoutOptions::default());
    let area = layout
        .fit_axes_for_chart(chart, 320.0, 200.0)
        .expect("fit succeeds");
    assert_eq!(area, Rect::new(0.0, 0.0, 320.0, 200.0));
}

#[test]
fn zero_surface_is_not_an_error() {
    let mut layout = coordinator();
    let chart = ChartId(2);
    layout.register(chart, linear(AxisPosition::Left, 0.0, 100.0));
    layout.register(chart, linear(AxisPosition::Bottom, 0.0, 100.0));
    let area = layout
        .fit_axes_for_chart(chart, 0.0, 0.0)
        .expect("fit succeeds");
    assert_close(area.width(), 0.0);
    assert_close(area.height(), 0.0);
}

#[test]
fn invalid_surface_and_unknown_chart_are_errors() {
    let mut layout = coordinator();
    assert_eq!(
        layout.fit_axes_for_chart(ChartId(5), 100.0, 100.0),
        Err(LayoutError::UnknownChart(ChartId(5)))
    );
    layout.configure_chart(ChartId(5), ChartLayoutOptions::default());
    assert!(matches!(
        layout.fit_axes_for_chart(ChartId(5), f64::NAN, 100.0),
        Err(LayoutError::InvalidSurface { .. })
    ));
    assert!(matches!(
        layout.fit_axes_for_chart(ChartId(5), 100.0, -1.0),
        Err(LayoutError::InvalidSurface { .. })
    ));
}

#[test]
fn axis_without_range_fails_the_fit() {
    let mut layout = coordinator();
    let chart = ChartId(1);
    layout.register(chart, linear(AxisPosition::Left, 0.0, 10.0));
    let bare = layout.register(
        chart,
        Box::new(LinearScale::new(AxisPosition::Bottom, AxisOptions::new())),
    );
    assert_eq!(
        layout.fit_axes_for_chart(chart, 400.0, 300.0),
        Err(LayoutError::Axis {
            axis: bare,
            err: FitError::MissingValueRange {
                position: AxisPosition::Bottom
            },
        })
    );
    assert_eq!(layout.chart_area(chart), None);

    layout
        .axis_mut(chart, bare)
        .expect("registered axis")
        .set_value_range(ValueRange::new(0.0, 1.0));
    assert!(layout.fit_axes_for_chart(chart, 400.0, 300.0).is_ok());
}

#[test]
fn failed_refit_keeps_previous_layout() {
    let mut layout = coordinator();
    let chart = ChartId(1);
    let left = layout.register(chart, linear(AxisPosition::Left, 0.0, 100.0));
    let bottom = layout.register(chart, linear(AxisPosition::Bottom, 0.0, 100.0));
    let area = layout
        .fit_axes_for_chart(chart, 500.0, 300.0)
        .expect("fit succeeds");
    let left_bounds = bounds(&layout, chart, left);
    let left_ticks = layout.axis(chart, left).expect("registered axis").ticks().to_vec();
    let left_labels = layout.axis(chart, left).expect("registered axis").labels().to_vec();

    layout
        .axis_mut(chart, bottom)
        .expect("registered axis")
        .set_value_range(ValueRange::new(0.0, f64::INFINITY));
    assert!(matches!(
        layout.fit_axes_for_chart(chart, 200.0, 120.0),
        Err(LayoutError::Axis {
            err: FitError::NonFiniteValueRange { .. },
            ..
        })
    ));

    // The left axis was not refit at the smaller size.
    let axis = layout.axis(chart, left).expect("registered axis");
    assert_eq!(axis.ticks(), left_ticks.as_slice());
    assert_eq!(axis.labels(), left_labels.as_slice());
    assert_eq!(axis.bounds(), left_bounds);
    assert_eq!(layout.chart_area(chart), Some(area));
}

#[test]
fn removing_unknown_chart_is_a_no_op() {
    let mut layout = coordinator();
    let chart = ChartId(1);
    layout.register(chart, linear(AxisPosition::Left, 0.0, 10.0));
    layout.register(chart, linear(AxisPosition::Bottom, 0.0, 10.0));

    assert!(!layout.remove_chart(ChartId(99)));
    assert_eq!(layout.chart_count(), 1);
    assert_eq!(layout.axes(chart).count(), 2);
    assert!(layout.remove_chart(chart));
    assert_eq!(layout.chart_count(), 0);
    assert_eq!(layout.axes(chart).count(), 0);
}

#[test]
fn first_registered_axis_can_be_removed() {
    let mut layout = coordinator();
    let chart = ChartId(1);
    let first = layout.register(chart, linear(AxisPosition::Left, 0.0, 10.0));
    let second = layout.register(chart, linear(AxisPosition::Left, 0.0, 20.0));

    let removed = layout.remove_axis(chart, first).expect("registered axis");
    assert_eq!(removed.position(), AxisPosition::Left);
    let ids: Vec<AxisId> = layout.axes(chart).map(|(id, _)| id).collect();
    assert_eq!(ids, [second]);

    assert!(layout.remove_axis(chart, first).is_none());
    assert!(layout.remove_axis(ChartId(42), second).is_none());
    assert_eq!(layout.axes(chart).count(), 1);
}

#[test]
fn charts_are_fit_independently() {
    let mut layout = coordinator();
    let a = ChartId(1);
    let b = ChartId(2);
    layout.register(a, linear(AxisPosition::Left, 0.0, 100.0));
    layout.register(b, linear(AxisPosition::Left, 0.0, 100.0));
    layout.register(b, linear(AxisPosition::Top, 0.0, 100.0));

    let area_a = layout.fit_axes_for_chart(a, 500.0, 300.0).expect("fit a");
    let area_b = layout.fit_axes_for_chart(b, 200.0, 100.0).expect("fit b");
    assert_ne!(area_a, area_b);
    assert_eq!(layout.chart_area(a), Some(area_a));
    assert_close(area_a.height(), 300.0);
}

#[test]
fn option_changes_apply_on_next_layout() {
    let mut layout = coordinator();
    let chart = ChartId(1);
    let options = AxisOptions::new().shared();
    let scale = LinearScale::new(AxisPosition::Left, options.clone())
        .with_value_range(ValueRange::new(0.0, 100.0));
    layout.register(chart, Box::new(scale));

    let before = layout
        .fit_axes_for_chart(chart, 400.0, 300.0)
        .expect("fit succeeds");
    options.update(|o| o.labels.show = false);
    let after = layout
        .fit_axes_for_chart(chart, 400.0, 300.0)
        .expect("fit succeeds");
    assert_close(before.x0, 43.0);
    assert_close(after.x0, 25.0);
}

#[derive(Default)]
struct Counter {
    lines: usize,
    texts: Vec<String>,
}

impl AxisPainter for Counter {
    fn stroke_line(&mut self, _line: Line, _brush: &Brush, _width: f64) {
        self.lines += 1;
    }

    fn fill_text(&mut self, run: &TextRun<'_>) {
        self.texts.push(String::from(run.text));
    }
}

#[test]
fn draw_chart_paints_every_axis() {
    let mut layout = coordinator();
    let chart = ChartId(1);
    layout.register(chart, linear(AxisPosition::Left, 0.0, 100.0));
    layout.register(chart, linear(AxisPosition::Bottom, 0.0, 100.0));

    let mut painter = Counter::default();
    layout
        .draw_chart(chart, &mut painter)
        .expect("known chart");
    assert_eq!(painter.lines, 0, "nothing to draw before the first fit");

    layout
        .fit_axes_for_chart(chart, 500.0, 300.0)
        .expect("fit succeeds");
    layout
        .draw_chart(chart, &mut painter)
        .expect("known chart");
    let ticks: usize = layout.axes(chart).map(|(_, a)| a.ticks().len()).sum();
    assert_eq!(painter.texts.len(), ticks);
    assert_eq!(painter.lines, 2 + 2 * ticks);
    assert!(painter.texts.iter().any(|t| t == "100"));

    assert_eq!(
        layout.draw_chart(ChartId(9), &mut painter),
        Err(LayoutError::UnknownChart(ChartId(9)))
    );
}
