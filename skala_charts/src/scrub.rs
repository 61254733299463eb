// Copyright 2025 the Skala Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrub position resolution: pointer and keyboard input to data index.
//!
//! Runs at pointer-move frequency, so the work per call is one inverse
//! mapping or one linear scan over the axis data.

extern crate alloc;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::scale::Scale;

/// Resolves the data index nearest to a pointer's pixel x position.
///
/// - Band axes scan every band center; ties keep the first match.
/// - Numeric axes with explicit `x_data` scan the data values' projected
///   positions, which handles unevenly spaced x data (e.g. timestamps).
/// - Numeric axes without data invert the pixel, round, and clamp into the
///   domain.
pub fn resolve_index_from_pixel(pixel_x: f64, x_scale: &Scale, x_data: Option<&[f64]>) -> usize {
    if let Scale::Band(band) = x_scale {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for i in 0..band.count() {
            let dist = (band.center(i) - pixel_x).abs();
            if dist < best_dist {
                best = i;
                best_dist = dist;
            }
        }
        return best;
    }

    if let Some(xs) = x_data.filter(|xs| !xs.is_empty()) {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (i, &v) in xs.iter().enumerate() {
            let Some(px) = x_scale.map(v) else {
                continue;
            };
            let dist = (px - pixel_x).abs();
            if dist < best_dist {
                best = i;
                best_dist = dist;
            }
        }
        return best;
    }

    let domain = x_scale.domain();
    let lo = domain.min.min(domain.max).max(0.0);
    let hi = domain.min.max(domain.max).max(0.0);
    let v = x_scale
        .invert(pixel_x)
        .unwrap_or(lo)
        .round()
        .clamp(lo, hi);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "clamped non-negative and finite above"
    )]
    {
        v as usize
    }
}

/// A scrub keyboard action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrubKey {
    /// Move one step (or one stride) toward lower indices.
    Left,
    /// Move one step (or one stride) toward higher indices.
    Right,
    /// Jump to the first valid index.
    Home,
    /// Jump to the last valid index.
    End,
    /// Drop the selection entirely (distinct from selecting index 0).
    Clear,
}

/// Advances a scrub selection by one keyboard action.
///
/// `fast` (a held modifier) moves by roughly a tenth of the data instead of
/// a single step. Arrowing from no selection enters at the nearest edge:
/// `Left` lands on the last index, `Right` on the first.
pub fn step_index(
    current: Option<usize>,
    key: ScrubKey,
    fast: bool,
    point_count: usize,
) -> Option<usize> {
    if point_count == 0 {
        return None;
    }
    let last = point_count - 1;
    let stride = if fast {
        let s = (0.1 * point_count as f64).max(1.0).round();
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "at least 1 and bounded by the point count"
        )]
        {
            s as usize
        }
    } else {
        1
    };
    match key {
        ScrubKey::Clear => None,
        ScrubKey::Home => Some(0),
        ScrubKey::End => Some(last),
        ScrubKey::Left => Some(match current {
            Some(i) => i.saturating_sub(stride),
            None => last,
        }),
        ScrubKey::Right => Some(match current {
            Some(i) => (i + stride).min(last),
            None => 0,
        }),
    }
}
