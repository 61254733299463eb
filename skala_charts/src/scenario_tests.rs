// Copyright 2025 the Skala Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;

use crate::{
    AxisKind, AxisProps, Bounds, CurveKind, Datum, DomainLimit, LabelDimension, ScaleKind,
    ScrubKey, Series, TickRequest, build_area_path, build_line_path, choose_label_side,
    generate_ticks, project_points, resolve_axis_config, resolve_axis_props,
    resolve_index_from_pixel, resolve_label_positions, stack_spans, step_index,
};

fn drawing_rect() -> Rect {
    Rect::new(0.0, 0.0, 100.0, 100.0)
}

/// The axis pair used by the path fixtures: x [0,10] -> [0,100] and a
/// flipped y [0,10] -> [100,0].
fn fixture_axes(series: &[Series]) -> (crate::Scale, crate::Scale) {
    let x_props = AxisProps::new().with_domain_max(10.0);
    let y_props = AxisProps::new()
        .with_domain_limit(DomainLimit::Strict)
        .with_domain_min(0.0)
        .with_domain_max(10.0)
        .with_range_map(|b| Bounds::new(b.max, b.min));
    let x = resolve_axis_config(&x_props, series, drawing_rect(), AxisKind::X)
        .scale()
        .unwrap();
    let y = resolve_axis_config(&y_props, series, drawing_rect(), AxisKind::Y)
        .scale()
        .unwrap();
    (x, y)
}

#[test]
fn resolved_axes_reproduce_the_line_fixture() {
    let series = [Series::from_values("s", [1.0, 2.0, 3.0])];
    let (x, y) = fixture_axes(&series);
    let d = build_line_path(&series[0].data, &x, &y, CurveKind::Linear, None, false);
    assert_eq!(d, "M0,90L10,80L20,70");
}

#[test]
fn resolved_axes_reproduce_the_area_fixture() {
    let series = [Series::from_values("s", [1.0, 2.0, 3.0])];
    let (x, y) = fixture_axes(&series);
    let d = build_area_path(&series[0].data, &x, &y, CurveKind::Linear, None, false);
    assert_eq!(d, "M0,90L10,80L20,70L20,100L10,100L0,100Z");
}

#[test]
fn stacked_series_flow_from_spans_to_paths() {
    let series = [
        Series::from_values("lo", [1.0, 2.0, 3.0]).with_stack_id("stack"),
        Series::from_values("hi", [2.0, 2.0, 2.0]).with_stack_id("stack"),
    ];
    let stacked = stack_spans(&series);

    // The derived span series replace the raw ones for domain resolution,
    // so the y axis covers the summed stack.
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

    let y_props = AxisProps::new().with_domain_limit(DomainLimit::Strict);
    let domain = crate::resolve_domain(&y_props, &derived, AxisKind::Y);
    assert_eq!(domain, Bounds::new(0.0, 5.0));

    let (x, y) = fixture_axes(&derived);
    let d = build_area_path(&derived[1].data, &x, &y, CurveKind::Linear, None, false);
    // Top edge follows the stack top (3, 4, 5), bottom follows (1, 2, 3).
    assert_eq!(d, "M0,70L10,60L20,50L20,70L10,80L0,90Z");
}

#[test]
fn band_chart_flow_ticks_and_scrubbing_agree() {
    let props = AxisProps::new()
        .with_scale_kind(ScaleKind::Band)
        .with_categories(["q1", "q2", "q3", "q4"])
        .with_category_padding(0.0);
    let resolved = resolve_axis_props(AxisKind::X, &[props], ScaleKind::Band).unwrap();
    let config = resolve_axis_config(&resolved[0], &[], drawing_rect(), AxisKind::X);
    let scale = config.scale().unwrap();

    let ticks = generate_ticks(&scale, &TickRequest::new());
    assert_eq!(ticks.len(), 4);

    // Every tick position scrubs back to its own index.
    for (i, tick) in ticks.iter().enumerate() {
        assert_eq!(resolve_index_from_pixel(tick.position, &scale, None), i);
    }

    // Tick positions are the band centers projected points use.
    let data = [Datum::Value(1.0)];
    let y = resolve_axis_config(
        &AxisProps::new().with_domain_max(1.0),
        &[],
        drawing_rect(),
        AxisKind::Y,
    )
    .scale()
    .unwrap();
    let projected = project_points(&data, &scale, &y, None);
    assert!((projected[0].unwrap().x - ticks[0].position).abs() < 1e-9);
}

#[test]
fn scrub_session_over_uneven_timestamps() {
    let timestamps = [0.0, 10.0, 100.0, 1000.0];
    let props = AxisProps::new().with_numbers(timestamps);
    let config = resolve_axis_config(&props, &[], drawing_rect(), AxisKind::X);
    assert_eq!(config.domain, Bounds::new(0.0, 1000.0));
    let scale = config.scale().unwrap();

    // Pixel 11 is nearest the projected timestamp 100 (pixel 10), not the
    // midpoint of the index range.
    assert_eq!(resolve_index_from_pixel(11.0, &scale, Some(&timestamps)), 2);

    // Keyboard traversal: enter from the right edge, walk home, clear.
    let mut selection = step_index(None, ScrubKey::Left, false, timestamps.len());
    assert_eq!(selection, Some(3));
    selection = step_index(selection, ScrubKey::Home, false, timestamps.len());
    assert_eq!(selection, Some(0));
    selection = step_index(selection, ScrubKey::Clear, false, timestamps.len());
    assert_eq!(selection, None);
}

#[test]
fn scrub_labels_place_without_overlap_and_pick_a_side() {
    let area = Rect::new(0.0, 0.0, 500.0, 300.0);
    let dims = [
        LabelDimension::new("a", 50.0, 24.0, 450.0, 50.0),
        LabelDimension::new("b", 42.0, 24.0, 450.0, 60.0),
    ];
    let resolved = resolve_label_positions(&dims, area, 24.0, 4.0);
    assert!((resolved["a"] - 41.0).abs() < 1e-9);
    assert!((resolved["b"] - 69.0).abs() < 1e-9);

    // Beacon at x=450 with a 50px label: 66 needed > 50 available.
    assert_eq!(
        choose_label_side(450.0, 50.0, area, crate::DEFAULT_LABEL_X_OFFSET),
        crate::LabelSide::Left
    );
}

#[test]
fn degenerate_geometry_renders_trivially_instead_of_failing() {
    let series = [Series::from_values("s", [5.0])];
    let zero_rect = Rect::new(10.0, 10.0, 10.0, 10.0);
    let x = resolve_axis_config(&AxisProps::new(), &series, zero_rect, AxisKind::X)
        .scale()
        .unwrap();
    let y = resolve_axis_config(&AxisProps::new(), &series, zero_rect, AxisKind::Y)
        .scale()
        .unwrap();
    let d = build_line_path(&series[0].data, &x, &y, CurveKind::Linear, None, false);
    assert_eq!(d, "M10,10Z");

    let empty: [Datum; 0] = [];
    assert_eq!(
        build_line_path(&empty, &x, &y, CurveKind::Linear, None, false),
        ""
    );
}

#[test]
fn smooth_curves_share_the_gap_semantics_of_linear_paths() {
    let series = [Series::new(
        "s",
        [
            Datum::Value(1.0),
            Datum::Value(4.0),
            Datum::Null,
            Datum::Value(2.0),
            Datum::Value(5.0),
            Datum::Value(3.0),
        ],
    )];
    let (x, y) = fixture_axes(&series);
    for kind in [
        CurveKind::Monotone,
        CurveKind::Natural,
        CurveKind::CatmullRom,
        CurveKind::Bump,
        CurveKind::Step,
    ] {
        let broken = build_line_path(&series[0].data, &x, &y, kind, None, false);
        assert_eq!(
            broken.matches('M').count(),
            2,
            "{kind:?} must split at the gap: {broken}"
        );
        let joined = build_line_path(&series[0].data, &x, &y, kind, None, true);
        assert_eq!(
            joined.matches('M').count(),
            1,
            "{kind:?} must bridge the gap: {joined}"
        );
    }
}

#[test]
fn tick_labels_format_against_the_generated_step() {
    let props = AxisProps::new().with_domain_max(1.0);
    let config = resolve_axis_config(&props, &[], drawing_rect(), AxisKind::X);
    let scale = config.scale().unwrap();
    let ticks = generate_ticks(&scale, &TickRequest::new().with_count(5));
    assert!(ticks.len() > 2);
    let step = ticks[1].value - ticks[0].value;
    let labels: Vec<String> = ticks
        .iter()
        .map(|t| crate::format_tick(t.value, step))
        .collect();
    assert_eq!(labels[0], "0.0");
    assert_eq!(labels[1], "0.2");
}
