// Copyright 2025 the Skala Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart demos for `skala_charts`.
//!
//! Every chart here is assembled from the core's plain outputs (path strings,
//! tick lists, pixel positions); this binary only wraps them in SVG markup.
mod html;

use kurbo::Rect;
use peniko::Color;
use peniko::color::palette::css;
use skala_charts::{
    AxisKind, AxisProps, Bounds, CurveKind, Datum, HeuristicTextMeasurer, LabelDimension,
    LabelSide, ScaleKind, Series, TickRequest, build_area_path, build_bar_path, build_line_path,
    choose_label_side, format_tick, generate_ticks, max_label_width, project_point,
    resolve_axis_config, resolve_index_from_pixel, resolve_label_positions, stack_spans,
    TextMeasurer,
};

const VIEW_W: f64 = 340.0;
const VIEW_H: f64 = 190.0;

fn main() {
    let sections = vec![
        line_demo(),
        curves_demo(),
        stacked_area_demo(),
        bar_demo(),
        scrub_demo(),
    ];

    let html = html::render_report("skala charts demo", &sections);
    std::fs::write("skala_charts_demo.html", html).expect("write skala_charts_demo.html");
    println!("wrote skala_charts_demo.html");
}

fn drawing_rect() -> Rect {
    Rect::new(42.0, 12.0, VIEW_W - 14.0, VIEW_H - 28.0)
}

fn css_color(color: Color) -> String {
    let rgba = color.to_rgba8();
    format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
}

fn svg_open(out: &mut String) {
    out.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {VIEW_W} {VIEW_H}" width="{VIEW_W}" height="{VIEW_H}">"#
    ));
    out.push('\n');
}

fn path_el(out: &mut String, d: &str, stroke: Option<&str>, fill: Option<&str>) {
    if d.is_empty() {
        return;
    }
    out.push_str(&format!(r#"<path d="{d}""#));
    out.push_str(&format!(r#" fill="{}""#, fill.unwrap_or("none")));
    if let Some(stroke) = stroke {
        out.push_str(&format!(r#" stroke="{stroke}" stroke-width="2""#));
    }
    out.push_str("/>\n");
}

fn text_el(out: &mut String, x: f64, y: f64, anchor: &str, text: &str) {
    out.push_str(&format!(
        r##"<text x="{x}" y="{y}" font-size="9" fill="#444" text-anchor="{anchor}">{text}</text>"##
    ));
    out.push('\n');
}

/// Draws bottom and left tick labels plus a light grid.
fn draw_axes(out: &mut String, x_scale: &skala_charts::Scale, y_scale: &skala_charts::Scale) {
    let rect = drawing_rect();
    let x_ticks = generate_ticks(x_scale, &TickRequest::new().with_count(6));
    let y_ticks = generate_ticks(y_scale, &TickRequest::new().with_count(5));
    let x_step = if x_ticks.len() > 1 {
        x_ticks[1].value - x_ticks[0].value
    } else {
        1.0
    };
    let y_step = if y_ticks.len() > 1 {
        (y_ticks[1].value - y_ticks[0].value).abs()
    } else {
        1.0
    };
    for t in &y_ticks {
        out.push_str(&format!(
            r##"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="#eee"/>"##,
            rect.x0, t.position, rect.x1, t.position
        ));
        out.push('\n');
        text_el(
            out,
            rect.x0 - 6.0,
            t.position + 3.0,
            "end",
            &format_tick(t.value, y_step),
        );
    }
    for t in &x_ticks {
        text_el(
            out,
            t.position,
            rect.y1 + 14.0,
            "middle",
            &format_tick(t.value, x_step),
        );
    }
}

/// Resolves the standard x/y axis pair for a set of series: x across the
/// rect, y flipped so larger values render higher.
fn resolve_xy(series: &[Series]) -> (skala_charts::Scale, skala_charts::Scale) {
    let rect = drawing_rect();
    let x = resolve_axis_config(&AxisProps::new(), series, rect, AxisKind::X)
        .scale()
        .expect("x axis bounds are finite");
    let y_props = AxisProps::new().with_range_map(|b| Bounds::new(b.max, b.min));
    let y = resolve_axis_config(&y_props, series, rect, AxisKind::Y)
        .scale()
        .expect("y axis bounds are finite");
    (x, y)
}

fn line_demo() -> html::HtmlSection {
    let series = [
        Series::new(
            "visits",
            [
                Datum::Value(120.0),
                Datum::Value(180.0),
                Datum::Null,
                Datum::Value(240.0),
                Datum::Value(210.0),
                Datum::Value(320.0),
            ],
        )
        .with_color(css::CORNFLOWER_BLUE),
        Series::from_values("orders", [40.0, 90.0, 60.0, 120.0, 80.0, 150.0])
            .with_color(css::TOMATO),
    ];
    let (x, y) = resolve_xy(&series);

    let mut svg = String::new();
    svg_open(&mut svg);
    draw_axes(&mut svg, &x, &y);
    for s in &series {
        let color = css_color(s.color.expect("demo series carry colors"));
        let broken = build_line_path(&s.data, &x, &y, CurveKind::Linear, None, false);
        path_el(&mut svg, &broken, Some(&color), None);
    }
    // The gap in "visits", bridged with a dashed connector.
    let joined = build_line_path(&series[0].data, &x, &y, CurveKind::Linear, None, true);
    svg.push_str(&format!(
        r##"<path d="{joined}" fill="none" stroke="#888" stroke-width="1" stroke-dasharray="4 3"/>"##
    ));
    svg.push_str("\n</svg>");

    html::HtmlSection {
        title: "Lines with a gap",
        description: "Two line series; the null in the first splits its path into subpaths, \
                      while the dashed overlay connects across the gap.",
        svg,
    }
}

fn curves_demo() -> html::HtmlSection {
    let values = [40.0, 160.0, 60.0, 220.0, 120.0, 260.0];
    let kinds = [
        (CurveKind::Linear, css::DARK_GRAY),
        (CurveKind::Monotone, css::CORNFLOWER_BLUE),
        (CurveKind::Natural, css::TOMATO),
        (CurveKind::CatmullRom, css::MEDIUM_SEA_GREEN),
        (CurveKind::Step, css::GOLDENROD),
    ];
    let series = [Series::from_values("base", values)];
    let (x, y) = resolve_xy(&series);

    let mut svg = String::new();
    svg_open(&mut svg);
    draw_axes(&mut svg, &x, &y);
    for (kind, color) in kinds {
        let d = build_line_path(&series[0].data, &x, &y, kind, None, false);
        path_el(&mut svg, &d, Some(&css_color(color)), None);
    }
    svg.push_str("</svg>");

    html::HtmlSection {
        title: "Curve interpolation",
        description: "One data set drawn with linear, monotone, natural, Catmull-Rom, and \
                      step interpolation.",
        svg,
    }
}

fn stacked_area_demo() -> html::HtmlSection {
    let series = [
        Series::from_values("mobile", [30.0, 60.0, 45.0, 90.0, 70.0])
            .with_stack_id("traffic")
            .with_color(css::CORNFLOWER_BLUE),
        Series::from_values("desktop", [50.0, 40.0, 70.0, 60.0, 100.0])
            .with_stack_id("traffic")
            .with_color(css::TOMATO),
    ];
    let stacked = stack_spans(&series);
    let derived: Vec<Series> = series
        .iter()
        .map(|s| {
            let data: Vec<Datum> = stacked[&s.id]
                .iter()
                .map(|span| match span {
                    Some((low, high)) => Datum::Span(*low, *high),
                    None => Datum::Null,
                })
                .collect();
            Series::new(s.id.clone(), data)
        })
        .collect();
    let (x, y) = resolve_xy(&derived);

    let mut svg = String::new();
    svg_open(&mut svg);
    draw_axes(&mut svg, &x, &y);
    for (s, raw) in derived.iter().zip(series.iter()) {
        let color = css_color(raw.color.expect("demo series carry colors"));
        let d = build_area_path(&s.data, &x, &y, CurveKind::Monotone, None, false);
        path_el(&mut svg, &d, None, Some(&color));
    }
    svg.push_str("</svg>");

    html::HtmlSection {
        title: "Stacked area",
        description: "Two series stacked cumulatively; each band fills between its low and \
                      high stack edges with monotone interpolation.",
        svg,
    }
}

fn bar_demo() -> html::HtmlSection {
    let categories = ["q1", "q2", "q3", "q4"];
    let values = [120.0, 260.0, 180.0, 310.0];
    let series = [Series::from_values("revenue", values)];
    let rect = drawing_rect();

    let x_props = AxisProps::new()
        .with_scale_kind(ScaleKind::Band)
        .with_categories(categories)
        .with_category_padding(0.25);
    let x = resolve_axis_config(&x_props, &series, rect, AxisKind::X)
        .scale()
        .expect("x axis bounds are finite");
    let y_props = AxisProps::new()
        .with_domain_min(0.0)
        .with_range_map(|b| Bounds::new(b.max, b.min));
    let y = resolve_axis_config(&y_props, &series, rect, AxisKind::Y)
        .scale()
        .expect("y axis bounds are finite");

    let mut svg = String::new();
    svg_open(&mut svg);
    let floor = y.map(y.domain().min).expect("domain min maps");
    let width = x.band_width();
    for (i, &v) in values.iter().enumerate() {
        let x0 = x.map(i as f64).expect("index is in the band domain");
        let top = y.map(v).expect("value is finite");
        let d = build_bar_path(x0, top, width, floor - top, 5.0, true, false);
        path_el(&mut svg, &d, None, Some(&css_color(css::CORNFLOWER_BLUE)));
    }
    for t in generate_ticks(&x, &TickRequest::new()) {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "band tick values are category indices"
        )]
        let label = categories[t.value as usize];
        text_el(&mut svg, t.position, rect.y1 + 14.0, "middle", label);
    }
    svg.push_str("</svg>");

    html::HtmlSection {
        title: "Bars on a band axis",
        description: "A categorical band axis with 25% padding and rounded-top bar paths; \
                      ticks sit at band centers.",
        svg,
    }
}

fn scrub_demo() -> html::HtmlSection {
    let series = [
        Series::from_values("alpha", [60.0, 120.0, 90.0, 180.0, 150.0, 240.0])
            .with_color(css::CORNFLOWER_BLUE)
            .with_label("alpha"),
        Series::from_values("beta", [50.0, 110.0, 100.0, 170.0, 160.0, 230.0])
            .with_color(css::TOMATO)
            .with_label("beta"),
        Series::from_values("gamma", [40.0, 100.0, 110.0, 160.0, 170.0, 220.0])
            .with_color(css::MEDIUM_SEA_GREEN)
            .with_label("gamma"),
    ];
    let (x, y) = resolve_xy(&series);
    let rect = drawing_rect();

    // Simulate a pointer two thirds of the way across the plot.
    let pointer_x = rect.x0 + rect.width() * 0.66;
    let index = resolve_index_from_pixel(pointer_x, &x, None);

    let measurer = HeuristicTextMeasurer;
    let font_size = 9.0;
    let labels: Vec<&str> = series.iter().filter_map(|s| s.label.as_deref()).collect();
    let side = choose_label_side(
        pointer_x,
        max_label_width(&measurer, labels.iter().copied(), font_size),
        rect,
        skala_charts::DEFAULT_LABEL_X_OFFSET,
    );

    let mut dims = Vec::new();
    let mut beacons = Vec::new();
    for s in &series {
        let value = s.data[index].top().expect("demo data has no gaps");
        let beacon = project_point(index as f64, value, &x, &y).expect("beacon projects");
        let label = s.label.as_deref().expect("demo series carry labels");
        let (w, h) = measurer.measure(label, font_size);
        dims.push(LabelDimension::new(s.id.clone(), w, h, beacon.x, beacon.y));
        beacons.push((beacon, css_color(s.color.expect("demo series carry colors"))));
    }
    let positions = resolve_label_positions(&dims, rect, 12.0, 3.0);

    let mut svg = String::new();
    svg_open(&mut svg);
    draw_axes(&mut svg, &x, &y);
    for s in &series {
        let color = css_color(s.color.expect("demo series carry colors"));
        let d = build_line_path(&s.data, &x, &y, CurveKind::Monotone, None, false);
        path_el(&mut svg, &d, Some(&color), None);
    }
    svg.push_str(&format!(
        r##"<line x1="{0}" y1="{1}" x2="{0}" y2="{2}" stroke="#999" stroke-dasharray="2 2"/>"##,
        beacons[0].0.x, rect.y0, rect.y1
    ));
    svg.push('\n');
    for ((beacon, color), dim) in beacons.iter().zip(dims.iter()) {
        svg.push_str(&format!(
            r#"<circle cx="{}" cy="{}" r="3" fill="{color}"/>"#,
            beacon.x, beacon.y
        ));
        svg.push('\n');
        let (label_x, anchor) = match side {
            LabelSide::Right => (beacon.x + skala_charts::DEFAULT_LABEL_X_OFFSET, "start"),
            LabelSide::Left => (beacon.x - skala_charts::DEFAULT_LABEL_X_OFFSET, "end"),
        };
        let label_y = positions[&dim.series_id] + 3.0;
        text_el(&mut svg, label_x, label_y, anchor, &dim.series_id);
    }
    svg.push_str("</svg>");

    html::HtmlSection {
        title: "Scrubbing with stacked labels",
        description: "A pointer position resolves to the nearest data index; each series gets \
                      a beacon, and the labels stack without overlap on the side with room.",
        svg,
    }
}
