// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis layout demos for `vizir_axes`.
//!
//! Lays out two charts at a few surface sizes and writes each result as an SVG
//! file in the current directory. Set `RUST_LOG=vizir_axes=trace` to watch the
//! individual axis fits.

mod svg;

use kurbo::Rect;
use peniko::Color;
use peniko::color::palette::css;
use tracing_subscriber::EnvFilter;
use vizir_axes::{
    AxisOptions, AxisPosition, ChartId, ChartLayoutOptions, GridLineOptions,
    HeuristicTextMeasurer, LINEAR, LayoutCoordinator, LinearScale, RangeHook, ScaleTypeRegistry,
    SharedAxisOptions, TextStyle, TickOverride, ValueRange,
};

const MULTI_AXIS: ChartId = ChartId(1);
const SQUARE: ChartId = ChartId(2);

const SURFACES: [(f64, f64); 3] = [(640.0, 400.0), (320.0, 220.0), (900.0, 300.0)];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let registry = ScaleTypeRegistry::with_builtin_types();
    let mut layout = LayoutCoordinator::new(HeuristicTextMeasurer);

    let temperature = multi_axis_chart(&registry, &mut layout);
    square_chart(&mut layout);

    for (width, height) in SURFACES {
        for (name, chart) in [("multi_axis", MULTI_AXIS), ("square", SQUARE)] {
            render(&layout_for(&mut layout, chart, width, height), name, width, height);
        }
        // Later surfaces pick up the wider unit label without re-registering.
        temperature.update(|o| o.labels.template = Some("<%=value%> °C".into()));
    }
    tracing::info!(charts = layout.chart_count(), "done");
}

fn multi_axis_chart(
    registry: &ScaleTypeRegistry,
    layout: &mut LayoutCoordinator,
) -> SharedAxisOptions {
    let samples = [12.0, 31.5, 47.25, 88.0, 64.0, 95.0];

    let revenue_options = AxisOptions::new().with_begin_at_zero(true);
    let revenue = LinearScale::new(AxisPosition::Left, revenue_options)
        .with_range_hook(RangeHook::new(move || {
            let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
            let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            Some(ValueRange::new(min, max))
        }));
    layout.register(MULTI_AXIS, Box::new(revenue));

    let temperature = AxisOptions::new()
        .with_grid_lines(false)
        .with_label_style(TextStyle::new(11.0))
        .shared();
    let mut axis = registry
        .create(LINEAR, AxisPosition::Left, temperature.clone())
        .expect("linear is built in");
    axis.set_value_range(ValueRange::new(-2.5, 2.5));
    layout.register(MULTI_AXIS, axis);

    let share = AxisOptions::new()
        .with_override(TickOverride::new(0.0, 0.25, 4))
        .with_label_callback(|v, _, _| Some(format!("{}%", v * 100.0)))
        .with_grid_line_options(GridLineOptions {
            draw_on_chart_area: false,
            ..GridLineOptions::default()
        });
    let mut axis = registry
        .create(LINEAR, AxisPosition::Right, share.into())
        .expect("linear is built in");
    axis.set_value_range(ValueRange::new(0.0, 1.0));
    layout.register(MULTI_AXIS, axis);

    // Long labels force rotation on narrow surfaces.
    let volume = AxisOptions::new().with_label_callback(|v, i, ticks| {
        (i + 1 < ticks.len() || ticks.len() == 1).then(|| format!("{v} units sold"))
    });
    let mut axis = registry
        .create(LINEAR, AxisPosition::Top, volume.into())
        .expect("linear is built in");
    axis.set_value_range(ValueRange::new(0.0, 1_000_000.0));
    layout.register(MULTI_AXIS, axis);

    let time = AxisOptions::new().with_label_template("t=<%= value %>s");
    let mut axis = registry
        .create(LINEAR, AxisPosition::Bottom, time.into())
        .expect("linear is built in");
    axis.set_value_range(ValueRange::new(0.0, 60.0));
    layout.register(MULTI_AXIS, axis);

    temperature
}

fn square_chart(layout: &mut LayoutCoordinator) {
    layout.configure_chart(
        SQUARE,
        ChartLayoutOptions::default().with_maintain_aspect_ratio(true),
    );
    let grid = GridLineOptions {
        color: css::STEEL_BLUE.with_alpha(0.15).into(),
        zero_line_color: Color::from_rgb8(0x33, 0x44, 0x55).into(),
        zero_line_width: 2.0,
        ..GridLineOptions::default()
    };
    for position in [AxisPosition::Left, AxisPosition::Bottom] {
        let options = AxisOptions::new().with_grid_line_options(grid.clone());
        let axis =
            LinearScale::new(position, options).with_value_range(ValueRange::new(-1.0, 1.0));
        layout.register(SQUARE, Box::new(axis));
    }
}

fn layout_for(layout: &mut LayoutCoordinator, chart: ChartId, width: f64, height: f64) -> String {
    let area = match layout.fit_axes_for_chart(chart, width, height) {
        Ok(area) => area,
        Err(err) => {
            tracing::error!(chart = chart.0, %err, "layout failed");
            return String::new();
        }
    };
    tracing::info!(
        chart = chart.0,
        width,
        height,
        plot = ?area,
        "laid out chart"
    );
    for (id, axis) in layout.axes(chart) {
        tracing::info!(
            axis = id.0,
            position = ?axis.position(),
            bounds = ?axis.bounds(),
            ticks = ?axis.ticks(),
            rotation = axis.label_rotation(),
            "axis"
        );
    }

    let mut painter = svg::SvgPainter::new(Rect::new(0.0, 0.0, width, height));
    painter.plot_frame(area);
    if let Err(err) = layout.draw_chart(chart, &mut painter) {
        tracing::error!(chart = chart.0, %err, "draw failed");
    }
    painter.to_svg_string()
}

fn render(svg: &str, name: &str, width: f64, height: f64) {
    if svg.is_empty() {
        return;
    }
    let path = format!("{name}_{width}x{height}.svg");
    match std::fs::write(&path, svg) {
        Ok(()) => tracing::info!(%path, "wrote"),
        Err(err) => tracing::error!(%path, %err, "write failed"),
    }
}
