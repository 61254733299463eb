// Copyright 2025 the Skala Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG path string generation for line, area, and bar geometry.
//!
//! Gap handling is uniform across curve kinds: with `connect_nulls` off, a
//! gap splits the path into disjoint subpaths; with it on, gaps are removed
//! up front and the path runs continuously through the defined points. Bad
//! data never raises an error here; it degrades to gaps or empty strings.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use core::fmt::Write as _;

use kurbo::Point;

use crate::curve::{CurveKind, PathCommand, emit};
use crate::project::{datum_x, project_point, project_points, project_scalar};
use crate::scale::Scale;
use crate::series::Datum;

fn write_commands(out: &mut String, commands: &[PathCommand]) {
    for cmd in commands {
        // String formatting is infallible.
        let _ = match cmd {
            PathCommand::MoveTo(p) => write!(out, "M{},{}", p.x, p.y),
            PathCommand::LineTo(p) => write!(out, "L{},{}", p.x, p.y),
            PathCommand::CurveTo(c1, c2, p) => write!(
                out,
                "C{},{},{},{},{},{}",
                c1.x, c1.y, c2.x, c2.y, p.x, p.y
            ),
            PathCommand::Close => write!(out, "Z"),
        };
    }
}

/// Splits projected points into runs of defined points.
///
/// With `connect_nulls` the gaps are dropped and a single run remains.
fn segments(points: &[Option<Point>], connect_nulls: bool) -> Vec<Vec<Point>> {
    if connect_nulls {
        let joined: Vec<Point> = points.iter().copied().flatten().collect();
        return if joined.is_empty() {
            Vec::new()
        } else {
            alloc::vec![joined]
        };
    }
    let mut out = Vec::new();
    let mut current: Vec<Point> = Vec::new();
    for p in points {
        match p {
            Some(p) => current.push(*p),
            None => {
                if !current.is_empty() {
                    out.push(core::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// Builds the SVG `d` string for a line series.
///
/// Empty input (or input that is all gaps) yields an empty string. A subpath
/// reduced to a single point is closed into a degenerate dot.
pub fn build_line_path(
    data: &[Datum],
    x_scale: &Scale,
    y_scale: &Scale,
    curve: CurveKind,
    x_data: Option<&[f64]>,
    connect_nulls: bool,
) -> String {
    let points = project_points(data, x_scale, y_scale, x_data);
    let mut commands = Vec::new();
    for segment in segments(&points, connect_nulls) {
        emit(curve, &segment, false, &mut commands);
        if segment.len() == 1 {
            commands.push(PathCommand::Close);
        }
    }
    let mut out = String::new();
    write_commands(&mut out, &commands);
    out
}

/// Builds the SVG `d` string for an area series.
///
/// A bare value fills from the y domain minimum (the axis floor) up to the
/// value; a span fills between its low and high edges. Every disjoint
/// sub-area closes into its own polygon: top edge forward, bottom edge
/// reversed, then `Z`. A single defined point still yields a closed
/// degenerate polygon.
pub fn build_area_path(
    data: &[Datum],
    x_scale: &Scale,
    y_scale: &Scale,
    curve: CurveKind,
    x_data: Option<&[f64]>,
    connect_nulls: bool,
) -> String {
    let floor = y_scale.domain().min;
    let edges: Vec<Option<(Point, Point)>> = data
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let top = d.top()?;
            // A span with a malformed low edge is a gap, not a re-based area.
            let base = match d {
                Datum::Span(..) => d.low()?,
                _ => floor,
            };
            let x = datum_x(d, i, x_data);
            let top = project_point(x, top, x_scale, y_scale)?;
            let base_y = project_scalar(y_scale, base)?;
            Some((top, Point::new(top.x, base_y)))
        })
        .collect();

    let tops: Vec<Option<Point>> = edges.iter().map(|e| e.map(|(t, _)| t)).collect();
    let bases: Vec<Option<Point>> = edges.iter().map(|e| e.map(|(_, b)| b)).collect();

    let top_segments = segments(&tops, connect_nulls);
    let base_segments = segments(&bases, connect_nulls);

    let mut commands = Vec::new();
    for (top, base) in top_segments.iter().zip(base_segments.iter()) {
        emit(curve, top, false, &mut commands);
        let reversed: Vec<Point> = base.iter().rev().copied().collect();
        emit(curve, &reversed, true, &mut commands);
        commands.push(PathCommand::Close);
    }
    let mut out = String::new();
    write_commands(&mut out, &commands);
    out
}

/// Builds a rectangle path with independently rounded top/bottom corners.
///
/// The effective radius is clamped so the arcs can never self-intersect:
/// at most half the width, and at most half the height when both ends are
/// rounded (the full height when only one end is).
pub fn build_bar_path(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    radius: f64,
    round_top: bool,
    round_bottom: bool,
) -> String {
    let w = width.max(0.0);
    let h = height.max(0.0);
    let height_cap = if round_top && round_bottom { h / 2.0 } else { h };
    let r = radius.min(w / 2.0).min(height_cap).max(0.0);
    let rt = if round_top { r } else { 0.0 };
    let rb = if round_bottom { r } else { 0.0 };

    let mut d = String::new();
    let _ = write!(d, "M {} {}", x, y + rt);
    if rt > 0.0 {
        let _ = write!(d, " A {rt} {rt} 0 0 1 {} {}", x + rt, y);
    }
    let _ = write!(d, " L {} {}", x + w - rt, y);
    if rt > 0.0 {
        let _ = write!(d, " A {rt} {rt} 0 0 1 {} {}", x + w, y + rt);
    }
    let _ = write!(d, " L {} {}", x + w, y + h - rb);
    if rb > 0.0 {
        let _ = write!(d, " A {rb} {rb} 0 0 1 {} {}", x + w - rb, y + h);
    }
    let _ = write!(d, " L {} {}", x + rb, y + h);
    if rb > 0.0 {
        let _ = write!(d, " A {rb} {rb} 0 0 1 {} {}", x, y + h - rb);
    }
    d.push_str(" Z");
    d
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::scale::{Bounds, LinearScale};

    fn fixture_scales() -> (Scale, Scale) {
        let x = Scale::Linear(LinearScale::new(
            Bounds::new(0.0, 10.0),
            Bounds::new(0.0, 100.0),
        ));
        let y = Scale::Linear(LinearScale::new(
            Bounds::new(0.0, 10.0),
            Bounds::new(100.0, 0.0),
        ));
        (x, y)
    }

    fn values(vs: &[f64]) -> Vec<Datum> {
        vs.iter().map(|&v| Datum::Value(v)).collect()
    }

    #[test]
    fn empty_data_yields_empty_strings() {
        let (x, y) = fixture_scales();
        assert_eq!(
            build_line_path(&[], &x, &y, CurveKind::Linear, None, false),
            ""
        );
        assert_eq!(
            build_area_path(&[], &x, &y, CurveKind::Linear, None, false),
            ""
        );
    }

    #[test]
    fn line_path_matches_projected_pixels() {
        let (x, y) = fixture_scales();
        let d = build_line_path(
            &values(&[1.0, 2.0, 3.0]),
            &x,
            &y,
            CurveKind::Linear,
            None,
            false,
        );
        assert_eq!(d, "M0,90L10,80L20,70");
    }

    #[test]
    fn gaps_split_the_line_into_subpaths() {
        let (x, y) = fixture_scales();
        let data = [Datum::Value(1.0), Datum::Null, Datum::Value(3.0)];
        let d = build_line_path(&data, &x, &y, CurveKind::Linear, None, false);
        assert_eq!(d, "M0,90ZM20,70Z");
    }

    #[test]
    fn connect_nulls_bridges_the_gap() {
        let (x, y) = fixture_scales();
        let data = [Datum::Value(1.0), Datum::Null, Datum::Value(3.0)];
        let d = build_line_path(&data, &x, &y, CurveKind::Linear, None, true);
        assert_eq!(d, "M0,90L20,70");
    }

    #[test]
    fn non_finite_values_read_as_gaps_not_errors() {
        let (x, y) = fixture_scales();
        let data = [Datum::Value(1.0), Datum::Value(f64::NAN), Datum::Value(3.0)];
        let d = build_line_path(&data, &x, &y, CurveKind::Linear, None, false);
        assert_eq!(d, "M0,90ZM20,70Z");
    }

    #[test]
    fn area_closes_back_along_the_baseline() {
        let (x, y) = fixture_scales();
        let d = build_area_path(
            &values(&[1.0, 2.0, 3.0]),
            &x,
            &y,
            CurveKind::Linear,
            None,
            false,
        );
        assert_eq!(d, "M0,90L10,80L20,70L20,100L10,100L0,100Z");
    }

    #[test]
    fn span_data_uses_its_own_baseline() {
        let (x, y) = fixture_scales();
        let data = [Datum::Span(1.0, 2.0), Datum::Span(1.0, 3.0)];
        let d = build_area_path(&data, &x, &y, CurveKind::Linear, None, false);
        assert_eq!(d, "M0,80L10,70L10,90L0,90Z");
    }

    #[test]
    fn broken_area_closes_each_sub_polygon() {
        let (x, y) = fixture_scales();
        let data = [
            Datum::Value(1.0),
            Datum::Value(2.0),
            Datum::Null,
            Datum::Value(3.0),
        ];
        let d = build_area_path(&data, &x, &y, CurveKind::Linear, None, false);
        let closes = d.matches('Z').count();
        assert_eq!(closes, 2, "each disjoint sub-area closes itself: {d}");
        assert!(d.starts_with("M0,90L10,80L10,100L0,100Z"));
    }

    #[test]
    fn single_point_area_is_a_degenerate_polygon() {
        let (x, y) = fixture_scales();
        let d = build_area_path(&values(&[5.0]), &x, &y, CurveKind::Linear, None, false);
        assert_eq!(d, "M0,50L0,100Z");
    }

    #[test]
    fn unrounded_bar_is_a_plain_rectangle() {
        let d = build_bar_path(10.0, 20.0, 30.0, 40.0, 0.0, false, false);
        assert_eq!(d, "M 10 20 L 40 20 L 40 60 L 10 60 Z");
    }

    #[test]
    fn rounded_top_emits_arcs_and_clamps_radius() {
        let d = build_bar_path(0.0, 0.0, 10.0, 100.0, 50.0, true, false);
        // Radius clamps to width/2 = 5.
        assert!(d.starts_with("M 0 5 A 5 5 0 0 1 5 0"), "got {d}");
        assert!(d.ends_with("Z"));
        assert_eq!(d.matches('A').count(), 2);
    }

    #[test]
    fn fully_rounded_bar_clamps_to_half_height() {
        let d = build_bar_path(0.0, 0.0, 100.0, 10.0, 50.0, true, true);
        // Radius clamps to height/2 = 5, not width/2 = 50.
        assert_eq!(d.matches('A').count(), 4);
        assert!(d.contains("A 5 5 0 0 1"), "got {d}");
    }
}
