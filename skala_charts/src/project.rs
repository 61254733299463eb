// Copyright 2025 the Skala Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data-to-pixel projection.
//!
//! The projector is the one place band centering and log clamping are
//! applied, so every consumer (paths, scrub beacons, point marks) agrees on
//! where a datum sits.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Point;

use crate::scale::Scale;
use crate::series::Datum;

/// Projects one coordinate through a scale.
///
/// Band values land on the band *center* (start plus half a band width);
/// log scales clamp non-positive values internally. Returns `None` for
/// non-finite values and out-of-domain band indices.
pub fn project_scalar(scale: &Scale, value: f64) -> Option<f64> {
    let px = scale.map(value)?;
    if scale.is_band() {
        Some(px + scale.band_width() / 2.0)
    } else {
        Some(px)
    }
}

/// Projects a data coordinate pair into pixel space.
pub fn project_point(x: f64, y: f64, x_scale: &Scale, y_scale: &Scale) -> Option<Point> {
    let px = project_scalar(x_scale, x)?;
    let py = project_scalar(y_scale, y)?;
    Some(Point::new(px, py))
}

/// Projects a whole series, preserving index alignment.
///
/// A gap in `data` produces `None` at the same index. A datum's x comes from
/// its own `{x, y}` pair when it has one, else from `x_data`, else from its
/// index. Spans project at their high edge.
pub fn project_points(
    data: &[Datum],
    x_scale: &Scale,
    y_scale: &Scale,
    x_data: Option<&[f64]>,
) -> Vec<Option<Point>> {
    data.iter()
        .enumerate()
        .map(|(i, d)| {
            let y = d.top()?;
            let x = datum_x(d, i, x_data);
            project_point(x, y, x_scale, y_scale)
        })
        .collect()
}

/// The x coordinate a datum projects at.
pub(crate) fn datum_x(d: &Datum, index: usize, x_data: Option<&[f64]>) -> f64 {
    d.x()
        .or_else(|| x_data.and_then(|xs| xs.get(index).copied()))
        .unwrap_or(index as f64)
}
