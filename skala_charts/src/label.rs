// Copyright 2025 the Skala Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrub label layout: stacking series labels vertically without overlap,
//! and choosing which side of the beacon they render on.
//!
//! Positions are label *centers*. The resolver is a pure function from
//! measured label boxes to final y positions; it holds no state between
//! pointer moves.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::Rect;

/// Default horizontal offset between the beacon and its labels.
pub const DEFAULT_LABEL_X_OFFSET: f64 = 16.0;

/// Hard floor for the inter-label gap when labels must be compressed to fit.
pub const MIN_PRACTICAL_GAP: f64 = 2.0;

/// Two labels whose spacing is within this tolerance of the minimum are
/// considered touching (one collision group).
const TOUCH_EPSILON: f64 = 1e-6;

/// A measured label box and where it wants to sit.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelDimension {
    /// The series the label belongs to; keys the output map.
    pub series_id: String,
    /// Measured label width.
    pub width: f64,
    /// Measured label height.
    pub height: f64,
    /// Desired x position (center).
    pub preferred_x: f64,
    /// Desired y position (center), typically the series' beacon pixel.
    pub preferred_y: f64,
}

impl LabelDimension {
    /// Creates a label dimension.
    pub fn new(
        series_id: impl Into<String>,
        width: f64,
        height: f64,
        preferred_x: f64,
        preferred_y: f64,
    ) -> Self {
        Self {
            series_id: series_id.into(),
            width,
            height,
            preferred_x,
            preferred_y,
        }
    }
}

/// Which side of the beacon labels render on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelSide {
    /// Labels sit to the left of the beacon.
    Left,
    /// Labels sit to the right of the beacon (the preferred side).
    Right,
}

/// Picks the label side for a beacon at `beacon_x`.
///
/// Right is preferred; left wins only when the widest label plus the offset
/// no longer fits between the beacon and the right edge of `bounds`.
pub fn choose_label_side(
    beacon_x: f64,
    max_label_width: f64,
    bounds: Rect,
    x_offset: f64,
) -> LabelSide {
    let available = bounds.x1 - beacon_x;
    if max_label_width + x_offset > available {
        LabelSide::Left
    } else {
        LabelSide::Right
    }
}

/// Resolves non-overlapping label y positions within `bounds`.
///
/// Labels are sorted by preferred y, clamped into the bounds, swept downward
/// to enforce `label_height + min_gap` spacing, then each run of touching
/// labels is treated as a collision group: re-centered around the mean of
/// its preferred positions when it fits, shifted up when it overflows the
/// bottom, redistributed evenly when shifting is not enough, and finally
/// compressed (never below [`MIN_PRACTICAL_GAP`]) against the bottom bound.
///
/// Returns a map from series id to final y center.
pub fn resolve_label_positions(
    dimensions: &[LabelDimension],
    bounds: Rect,
    label_height: f64,
    min_gap: f64,
) -> HashMap<String, f64> {
    let mut out = HashMap::with_capacity(dimensions.len());
    if dimensions.is_empty() {
        return out;
    }

    let min_y = bounds.y0 + label_height / 2.0;
    let max_y = (bounds.y1 - label_height / 2.0).max(min_y);
    let spacing = label_height + min_gap;

    let mut order: Vec<usize> = (0..dimensions.len()).collect();
    order.sort_by(|&a, &b| {
        dimensions[a]
            .preferred_y
            .partial_cmp(&dimensions[b].preferred_y)
            .unwrap_or(core::cmp::Ordering::Equal)
    });
    let preferred: Vec<f64> = order.iter().map(|&i| dimensions[i].preferred_y).collect();
    let mut finals: Vec<f64> = preferred.iter().map(|p| p.clamp(min_y, max_y)).collect();

    // Alternate sweeping and group adjustment until a fixed point: group
    // re-centering can bring a group back into range of its neighbor, and
    // the next sweep then merges the two. Every pass is deterministic, so
    // an unchanged pass means the layout is final; the label count bounds
    // the merging.
    for _ in 0..dimensions.len() {
        let before = finals.clone();
        sweep_down(&mut finals, spacing);
        let mut start = 0;
        while start < finals.len() {
            let mut end = start + 1;
            while end < finals.len() && finals[end] - finals[end - 1] <= spacing + TOUCH_EPSILON {
                end += 1;
            }
            if end - start > 1 {
                adjust_group(
                    &mut finals[start..end],
                    &preferred[start..end],
                    min_y,
                    max_y,
                    label_height,
                    spacing,
                );
            }
            start = end;
        }
        if finals == before {
            break;
        }
    }

    for (k, &i) in order.iter().enumerate() {
        out.insert(dimensions[i].series_id.clone(), finals[k]);
    }
    out
}

/// Pushes each label down until it clears the one above it.
fn sweep_down(finals: &mut [f64], spacing: f64) {
    for i in 1..finals.len() {
        let limit = finals[i - 1] + spacing;
        if finals[i] < limit {
            finals[i] = limit;
        }
    }
}

/// Places one collision group of evenly spaced labels within `[min_y, max_y]`.
fn adjust_group(
    finals: &mut [f64],
    preferred: &[f64],
    min_y: f64,
    max_y: f64,
    label_height: f64,
    spacing: f64,
) {
    let n = finals.len();
    let span = finals[n - 1] - finals[0];

    if finals[n - 1] <= max_y + TOUCH_EPSILON {
        // Fits as swept: slide the whole group toward its preferred center,
        // as far as the bounds allow, keeping intra-group spacing.
        let center = preferred.iter().sum::<f64>() / n as f64;
        let first = (center - span / 2.0).clamp(min_y, max_y - span);
        let shift = first - finals[0];
        for f in finals.iter_mut() {
            *f += shift;
        }
        return;
    }

    let overflow = finals[n - 1] - max_y;
    if finals[0] - overflow >= min_y - TOUCH_EPSILON {
        for f in finals.iter_mut() {
            *f -= overflow;
        }
        return;
    }

    let available = max_y - min_y;
    let even = available / (n - 1) as f64;
    if even >= label_height + MIN_PRACTICAL_GAP {
        for (j, f) in finals.iter_mut().enumerate() {
            *f = min_y + even * j as f64;
        }
        return;
    }

    // Too many labels for the bounds: compress to the practical floor and
    // anchor the last label at the bottom, letting the top run past.
    let compressed = (label_height + MIN_PRACTICAL_GAP).min(spacing);
    for (j, f) in finals.iter_mut().enumerate() {
        *f = max_y - compressed * (n - 1 - j) as f64;
    }
}

/// A minimal text measurement interface for estimating label boxes.
///
/// Callers plug in a real shaping backend when they have one, or use
/// [`HeuristicTextMeasurer`] for rough interactive layout.
pub trait TextMeasurer {
    /// Returns `(width, height)` in pixel units.
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64);
}

/// A tiny heuristic measurer: ~0.6 em per glyph, 1 em tall.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64) {
        let width = 0.6 * font_size * text.chars().count() as f64;
        (width, font_size)
    }
}

/// Widest measured label, for [`choose_label_side`].
pub fn max_label_width<'a>(
    measurer: &impl TextMeasurer,
    labels: impl IntoIterator<Item = &'a str>,
    font_size: f64,
) -> f64 {
    let mut max = 0.0_f64;
    for label in labels {
        let (w, _) = measurer.measure(label, font_size);
        max = max.max(w);
    }
    max
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn dims(ys: &[f64]) -> Vec<LabelDimension> {
        ys.iter()
            .enumerate()
            .map(|(i, &y)| LabelDimension::new(alloc::format!("s{i}"), 40.0, 24.0, 0.0, y))
            .collect()
    }

    fn bounds() -> Rect {
        Rect::new(0.0, 0.0, 500.0, 300.0)
    }

    #[test]
    fn colliding_pair_centers_on_its_preferred_mean() {
        let resolved = resolve_label_positions(&dims(&[50.0, 60.0]), bounds(), 24.0, 4.0);
        assert!((resolved["s0"] - 41.0).abs() < 1e-9);
        assert!((resolved["s1"] - 69.0).abs() < 1e-9);
    }

    #[test]
    fn separated_labels_keep_their_preferred_positions() {
        let resolved = resolve_label_positions(&dims(&[40.0, 120.0, 250.0]), bounds(), 24.0, 4.0);
        assert_eq!(resolved["s0"], 40.0);
        assert_eq!(resolved["s1"], 120.0);
        assert_eq!(resolved["s2"], 250.0);
    }

    #[test]
    fn spacing_invariant_holds_for_tight_clusters() {
        let resolved = resolve_label_positions(
            &dims(&[100.0, 100.0, 100.0, 101.0, 102.0]),
            bounds(),
            24.0,
            4.0,
        );
        let mut ys: Vec<f64> = resolved.values().copied().collect();
        ys.sort_by(|a, b| a.partial_cmp(b).unwrap());
        for w in ys.windows(2) {
            assert!(w[1] - w[0] >= 28.0 - 1e-6, "spacing violated: {ys:?}");
        }
        for &y in &ys {
            assert!((12.0..=288.0).contains(&y), "out of bounds: {y}");
        }
    }

    #[test]
    fn every_final_position_stays_inside_bounds() {
        let resolved =
            resolve_label_positions(&dims(&[-500.0, 0.0, 295.0, 800.0]), bounds(), 24.0, 4.0);
        for &y in resolved.values() {
            assert!((12.0..=288.0).contains(&y), "out of bounds: {y}");
        }
    }

    #[test]
    fn bottom_overflow_shifts_the_group_up() {
        // Two labels pinned near the bottom edge.
        let resolved = resolve_label_positions(&dims(&[285.0, 286.0]), bounds(), 24.0, 4.0);
        let mut ys: Vec<f64> = resolved.values().copied().collect();
        ys.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!((ys[1] - 288.0).abs() < 1e-9, "last label anchors the bottom: {ys:?}");
        assert!((ys[1] - ys[0] - 28.0).abs() < 1e-9);
    }

    #[test]
    fn oversized_group_centers_within_the_bounds() {
        // 10 colliding labels span 9 * 28 = 252 of the 276 available pixels;
        // the group slides as close to its preferred center as the top bound
        // allows while keeping full spacing.
        let ys: Vec<f64> = core::iter::repeat_n(150.0, 10).collect();
        let resolved = resolve_label_positions(&dims(&ys), bounds(), 24.0, 4.0);
        let mut got: Vec<f64> = resolved.values().copied().collect();
        got.sort_by(|a, b| a.partial_cmp(b).unwrap());
        for w in got.windows(2) {
            assert!(w[1] - w[0] >= 28.0 - 1e-6, "{got:?}");
        }
        assert!(*got.first().unwrap() >= 12.0 - 1e-9);
        assert!(*got.last().unwrap() <= 288.0 + 1e-9);
        // Centered on the shared preferred y.
        let mid = (got.first().unwrap() + got.last().unwrap()) / 2.0;
        assert!((mid - 150.0).abs() < 1e-9, "{got:?}");
    }

    #[test]
    fn too_tall_group_redistributes_over_the_available_space() {
        // 11 labels need 10 * 28 = 280 > 276 available: full spacing cannot
        // hold, so they spread evenly from top to bottom instead.
        let ys: Vec<f64> = core::iter::repeat_n(150.0, 11).collect();
        let resolved = resolve_label_positions(&dims(&ys), bounds(), 24.0, 4.0);
        let mut got: Vec<f64> = resolved.values().copied().collect();
        got.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!((got.first().unwrap() - 12.0).abs() < 1e-9, "{got:?}");
        assert!((got.last().unwrap() - 288.0).abs() < 1e-9, "{got:?}");
        let even = 276.0 / 10.0;
        for w in got.windows(2) {
            assert!((w[1] - w[0] - even).abs() < 1e-6, "{got:?}");
        }
    }

    #[test]
    fn recentered_group_never_collides_with_a_pinned_neighbor() {
        // A label pinned at the top edge plus a cluster just below: the
        // cluster's re-centering would slide it into the pinned label, so
        // the sweep merges them on the next pass.
        let resolved = resolve_label_positions(&dims(&[12.0, 45.0, 46.0]), bounds(), 24.0, 4.0);
        let mut got: Vec<f64> = resolved.values().copied().collect();
        got.sort_by(|a, b| a.partial_cmp(b).unwrap());
        for w in got.windows(2) {
            assert!(w[1] - w[0] >= 28.0 - 1e-6, "{got:?}");
        }
    }

    #[test]
    fn impossible_fit_compresses_against_the_bottom() {
        // 14 labels * 26px floor spacing cannot fit in 300px.
        let ys: Vec<f64> = (0..14).map(|i| 150.0 + i as f64 * 0.01).collect();
        let resolved = resolve_label_positions(&dims(&ys), bounds(), 24.0, 4.0);
        let mut got: Vec<f64> = resolved.values().copied().collect();
        got.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!((got.last().unwrap() - 288.0).abs() < 1e-9, "{got:?}");
        for w in got.windows(2) {
            assert!(w[1] - w[0] >= 24.0 + MIN_PRACTICAL_GAP - 1e-6, "{got:?}");
        }
    }

    #[test]
    fn side_prefers_right_until_width_no_longer_fits() {
        let area = Rect::new(0.0, 0.0, 500.0, 300.0);
        assert_eq!(
            choose_label_side(450.0, 50.0, area, DEFAULT_LABEL_X_OFFSET),
            LabelSide::Left
        );
        assert_eq!(
            choose_label_side(400.0, 50.0, area, DEFAULT_LABEL_X_OFFSET),
            LabelSide::Right
        );
        // Exactly equal still fits on the right.
        assert_eq!(
            choose_label_side(434.0, 50.0, area, DEFAULT_LABEL_X_OFFSET),
            LabelSide::Right
        );
    }

    #[test]
    fn heuristic_measurer_scales_with_text_length() {
        let m = HeuristicTextMeasurer;
        let (w1, h) = m.measure("ab", 10.0);
        let (w2, _) = m.measure("abcd", 10.0);
        assert!((w1 - 12.0).abs() < 1e-9);
        assert!((w2 - 2.0 * w1).abs() < 1e-9);
        assert!((h - 10.0).abs() < 1e-9);
        assert!((max_label_width(&m, ["ab", "abcd"], 10.0) - w2).abs() < 1e-9);
    }
}
