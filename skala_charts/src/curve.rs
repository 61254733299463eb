// Copyright 2025 the Skala Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Curve interpolation strategies.
//!
//! Each strategy turns a run of projected points into path commands. The
//! null-gap/connect segmentation lives in [`crate::path`] and never varies by
//! curve; adding a curve kind here requires no change to the path builders.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Point;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// How consecutive points are interpolated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CurveKind {
    /// Straight segments.
    #[default]
    Linear,
    /// Straight segments, closed back to the first point.
    LinearClosed,
    /// Horizontal-vertical steps switching at the midpoint.
    Step,
    /// Steps switching at the previous point.
    StepBefore,
    /// Steps switching at the next point.
    StepAfter,
    /// Smooth eased steps (cubic with horizontal tangents).
    Bump,
    /// Monotonicity-preserving cubic interpolation.
    Monotone,
    /// Natural cubic spline.
    Natural,
    /// Centripetal Catmull-Rom spline.
    CatmullRom,
}

/// One SVG-style path command over pixel points.
///
/// Internal currency between curve strategies and the path serializers; the
/// public surface is the finished `d` string.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CurveTo(Point, Point, Point),
    Close,
}

/// Appends commands interpolating `pts` with the chosen curve.
///
/// With `continue_line` the run starts with a line instead of a move, which
/// is how an area's bottom edge joins its top edge.
pub(crate) fn emit(kind: CurveKind, pts: &[Point], continue_line: bool, out: &mut Vec<PathCommand>) {
    match kind {
        CurveKind::Linear => emit_linear(pts, continue_line, false, out),
        CurveKind::LinearClosed => emit_linear(pts, continue_line, true, out),
        CurveKind::Step => emit_step(pts, continue_line, 0.5, out),
        CurveKind::StepBefore => emit_step(pts, continue_line, 0.0, out),
        CurveKind::StepAfter => emit_step(pts, continue_line, 1.0, out),
        CurveKind::Bump => emit_bump(pts, continue_line, out),
        CurveKind::Monotone => emit_monotone(pts, continue_line, out),
        CurveKind::Natural => emit_natural(pts, continue_line, out),
        CurveKind::CatmullRom => emit_catmull_rom(pts, continue_line, out),
    }
}

fn start(p: Point, continue_line: bool, out: &mut Vec<PathCommand>) {
    if continue_line {
        out.push(PathCommand::LineTo(p));
    } else {
        out.push(PathCommand::MoveTo(p));
    }
}

fn emit_linear(pts: &[Point], continue_line: bool, closed: bool, out: &mut Vec<PathCommand>) {
    let Some((&first, rest)) = pts.split_first() else {
        return;
    };
    start(first, continue_line, out);
    for &p in rest {
        out.push(PathCommand::LineTo(p));
    }
    if closed && pts.len() > 1 {
        out.push(PathCommand::Close);
    }
}

/// Step interpolation; `t` is the fraction of each span where the riser sits
/// (0 = before, 0.5 = midpoint, 1 = after).
fn emit_step(pts: &[Point], continue_line: bool, t: f64, out: &mut Vec<PathCommand>) {
    let Some((&first, rest)) = pts.split_first() else {
        return;
    };
    start(first, continue_line, out);
    let mut prev = first;
    for &p in rest {
        if t <= 0.0 {
            out.push(PathCommand::LineTo(Point::new(prev.x, p.y)));
        } else if t >= 1.0 {
            out.push(PathCommand::LineTo(Point::new(p.x, prev.y)));
        } else {
            let riser = prev.x * (1.0 - t) + p.x * t;
            out.push(PathCommand::LineTo(Point::new(riser, prev.y)));
            out.push(PathCommand::LineTo(Point::new(riser, p.y)));
        }
        out.push(PathCommand::LineTo(p));
        prev = p;
    }
}

fn emit_bump(pts: &[Point], continue_line: bool, out: &mut Vec<PathCommand>) {
    let Some((&first, rest)) = pts.split_first() else {
        return;
    };
    start(first, continue_line, out);
    let mut prev = first;
    for &p in rest {
        let mid = (prev.x + p.x) / 2.0;
        out.push(PathCommand::CurveTo(
            Point::new(mid, prev.y),
            Point::new(mid, p.y),
            p,
        ));
        prev = p;
    }
}

fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Fritsch-Carlson tangent at the middle of three points.
fn slope3(p0: Point, p1: Point, p2: Point) -> f64 {
    let h0 = p1.x - p0.x;
    let h1 = p2.x - p1.x;
    let d0 = if h0 != 0.0 {
        h0
    } else if h1 < 0.0 {
        -0.0
    } else {
        0.0
    };
    let d1 = if h1 != 0.0 {
        h1
    } else if h0 < 0.0 {
        -0.0
    } else {
        0.0
    };
    let s0 = (p1.y - p0.y) / d0;
    let s1 = (p2.y - p1.y) / d1;
    let p = (s0 * h1 + s1 * h0) / (h0 + h1);
    let m = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if m.is_finite() { m } else { 0.0 }
}

/// One-sided tangent at an endpoint, given the neighbor tangent `t`.
fn slope2(p0: Point, p1: Point, t: f64) -> f64 {
    let h = p1.x - p0.x;
    if h != 0.0 {
        (3.0 * (p1.y - p0.y) / h - t) / 2.0
    } else {
        t
    }
}

fn emit_monotone(pts: &[Point], continue_line: bool, out: &mut Vec<PathCommand>) {
    let n = pts.len();
    if n < 3 {
        emit_linear(pts, continue_line, false, out);
        return;
    }
    let mut m = alloc::vec![0.0_f64; n];
    for i in 1..n - 1 {
        m[i] = slope3(pts[i - 1], pts[i], pts[i + 1]);
    }
    m[0] = slope2(pts[0], pts[1], m[1]);
    m[n - 1] = slope2(pts[n - 2], pts[n - 1], m[n - 2]);

    start(pts[0], continue_line, out);
    for i in 0..n - 1 {
        let (p0, p1) = (pts[i], pts[i + 1]);
        let dx = (p1.x - p0.x) / 3.0;
        out.push(PathCommand::CurveTo(
            Point::new(p0.x + dx, p0.y + dx * m[i]),
            Point::new(p1.x - dx, p1.y - dx * m[i + 1]),
            p1,
        ));
    }
}

/// Solves the tridiagonal system for natural spline control points along one
/// coordinate; returns the first and second control values per segment.
fn natural_controls(x: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let n = x.len() - 1;
    let mut a = alloc::vec![0.0_f64; n];
    let mut b = alloc::vec![0.0_f64; n];
    let mut r = alloc::vec![0.0_f64; n];
    a[0] = 0.0;
    b[0] = 2.0;
    r[0] = x[0] + 2.0 * x[1];
    for i in 1..n - 1 {
        a[i] = 1.0;
        b[i] = 4.0;
        r[i] = 4.0 * x[i] + 2.0 * x[i + 1];
    }
    a[n - 1] = 2.0;
    b[n - 1] = 7.0;
    r[n - 1] = 8.0 * x[n - 1] + x[n];
    for i in 1..n {
        let m = a[i] / b[i - 1];
        b[i] -= m;
        r[i] -= m * r[i - 1];
    }
    a[n - 1] = r[n - 1] / b[n - 1];
    for i in (0..n - 1).rev() {
        a[i] = (r[i] - a[i + 1]) / b[i];
    }
    b[n - 1] = (x[n] + a[n - 1]) / 2.0;
    for i in 0..n - 1 {
        b[i] = 2.0 * x[i + 1] - a[i + 1];
    }
    (a, b)
}

fn emit_natural(pts: &[Point], continue_line: bool, out: &mut Vec<PathCommand>) {
    let n = pts.len();
    if n < 3 {
        emit_linear(pts, continue_line, false, out);
        return;
    }
    let xs: Vec<f64> = pts.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = pts.iter().map(|p| p.y).collect();
    let (ax, bx) = natural_controls(&xs);
    let (ay, by) = natural_controls(&ys);

    start(pts[0], continue_line, out);
    for i in 0..n - 1 {
        out.push(PathCommand::CurveTo(
            Point::new(ax[i], ay[i]),
            Point::new(bx[i], by[i]),
            pts[i + 1],
        ));
    }
}

/// Centripetal parametrization exponent.
const CATMULL_ROM_ALPHA: f64 = 0.5;
const CATMULL_ROM_EPSILON: f64 = 1e-12;

fn emit_catmull_rom(pts: &[Point], continue_line: bool, out: &mut Vec<PathCommand>) {
    let n = pts.len();
    if n < 3 {
        emit_linear(pts, continue_line, false, out);
        return;
    }

    let alpha_dist = |a: Point, b: Point| -> f64 {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        (dx * dx + dy * dy).powf(CATMULL_ROM_ALPHA)
    };

    start(pts[0], continue_line, out);
    for i in 0..n - 1 {
        let p1 = pts[i];
        let p2 = pts[i + 1];
        let p0 = pts[i.saturating_sub(1)];
        let p3 = pts[(i + 2).min(n - 1)];

        let l01_2a = alpha_dist(p0, p1);
        let l12_2a = alpha_dist(p1, p2);
        let l23_2a = alpha_dist(p2, p3);
        let l01_a = l01_2a.sqrt();
        let l12_a = l12_2a.sqrt();
        let l23_a = l23_2a.sqrt();

        let mut c1 = p1;
        if l01_a > CATMULL_ROM_EPSILON {
            let a = 2.0 * l01_2a + 3.0 * l01_a * l12_a + l12_2a;
            let d = 3.0 * l01_a * (l01_a + l12_a);
            c1 = Point::new(
                (p1.x * a - p0.x * l12_2a + p2.x * l01_2a) / d,
                (p1.y * a - p0.y * l12_2a + p2.y * l01_2a) / d,
            );
        }
        let mut c2 = p2;
        if l23_a > CATMULL_ROM_EPSILON {
            let b = 2.0 * l23_2a + 3.0 * l23_a * l12_a + l12_2a;
            let d = 3.0 * l23_a * (l23_a + l12_a);
            c2 = Point::new(
                (p2.x * b + p1.x * l23_2a - p3.x * l12_2a) / d,
                (p2.y * b + p1.y * l23_2a - p3.y * l12_2a) / d,
            );
        }
        out.push(PathCommand::CurveTo(c1, c2, p2));
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn linear_emits_move_then_lines() {
        let mut out = Vec::new();
        emit(CurveKind::Linear, &pts(&[(0.0, 0.0), (10.0, 5.0)]), false, &mut out);
        assert_eq!(
            out,
            alloc::vec![
                PathCommand::MoveTo(Point::new(0.0, 0.0)),
                PathCommand::LineTo(Point::new(10.0, 5.0)),
            ]
        );
    }

    #[test]
    fn continue_line_starts_with_a_line() {
        let mut out = Vec::new();
        emit(CurveKind::Linear, &pts(&[(0.0, 0.0)]), true, &mut out);
        assert_eq!(out, alloc::vec![PathCommand::LineTo(Point::new(0.0, 0.0))]);
    }

    #[test]
    fn step_midpoint_places_riser_halfway() {
        let mut out = Vec::new();
        emit(CurveKind::Step, &pts(&[(0.0, 0.0), (10.0, 8.0)]), false, &mut out);
        assert_eq!(
            out,
            alloc::vec![
                PathCommand::MoveTo(Point::new(0.0, 0.0)),
                PathCommand::LineTo(Point::new(5.0, 0.0)),
                PathCommand::LineTo(Point::new(5.0, 8.0)),
                PathCommand::LineTo(Point::new(10.0, 8.0)),
            ]
        );
    }

    #[test]
    fn step_before_rises_at_the_previous_x() {
        let mut out = Vec::new();
        emit(
            CurveKind::StepBefore,
            &pts(&[(0.0, 0.0), (10.0, 8.0)]),
            false,
            &mut out,
        );
        assert_eq!(
            out,
            alloc::vec![
                PathCommand::MoveTo(Point::new(0.0, 0.0)),
                PathCommand::LineTo(Point::new(0.0, 8.0)),
                PathCommand::LineTo(Point::new(10.0, 8.0)),
            ]
        );
    }

    #[test]
    fn monotone_interpolates_through_every_input_point() {
        let input = pts(&[(0.0, 0.0), (10.0, 10.0), (20.0, 10.0), (30.0, 0.0)]);
        let mut out = Vec::new();
        emit(CurveKind::Monotone, &input, false, &mut out);
        assert_eq!(out.len(), input.len());
        let mut ends = alloc::vec![];
        for cmd in &out {
            match cmd {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => ends.push(*p),
                PathCommand::CurveTo(_, _, p) => ends.push(*p),
                PathCommand::Close => {}
            }
        }
        assert_eq!(ends, input);
    }

    #[test]
    fn natural_spline_control_points_are_finite() {
        let input = pts(&[(0.0, 3.0), (10.0, 7.0), (20.0, 2.0), (30.0, 9.0)]);
        let mut out = Vec::new();
        emit(CurveKind::Natural, &input, false, &mut out);
        for cmd in &out {
            if let PathCommand::CurveTo(c1, c2, p) = cmd {
                assert!(c1.x.is_finite() && c1.y.is_finite());
                assert!(c2.x.is_finite() && c2.y.is_finite());
                assert!(p.x.is_finite() && p.y.is_finite());
            }
        }
    }

    #[test]
    fn catmull_rom_clamps_endpoint_controls_to_the_data() {
        let input = pts(&[(0.0, 0.0), (10.0, 10.0), (20.0, 0.0)]);
        let mut out = Vec::new();
        emit(CurveKind::CatmullRom, &input, false, &mut out);
        // First segment's incoming control collapses onto p1.
        let PathCommand::CurveTo(c1, _, _) = out[1] else {
            panic!("expected a curve segment");
        };
        assert_eq!(c1, Point::new(0.0, 0.0));
    }

    #[test]
    fn two_point_splines_fall_back_to_lines() {
        for kind in [CurveKind::Monotone, CurveKind::Natural, CurveKind::CatmullRom] {
            let mut out = Vec::new();
            emit(kind, &pts(&[(0.0, 0.0), (10.0, 5.0)]), false, &mut out);
            assert_eq!(out.len(), 2, "{kind:?} with two points is a line");
        }
    }
}
