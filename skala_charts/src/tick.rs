// Copyright 2025 the Skala Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick generation.
//!
//! An axis derives its tick marks from the resolved scale plus a small
//! request describing which of several selection modes applies. Modes are
//! evaluated in strict precedence order: explicit values, then a predicate,
//! then hidden, then a requested count, then a pixel interval.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::scale::{Scale, nice_step};

/// Tick count used when nothing in the request constrains it.
pub const DEFAULT_TICK_COUNT: usize = 10;

/// One tick: the domain value it marks and its pixel position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    /// Domain value (category index for band axes).
    pub value: f64,
    /// Pixel position along the axis (band ticks sit at band centers).
    pub position: f64,
}

/// Which ticks are shown.
#[derive(Clone, Default)]
pub enum TickSelector {
    /// Derive ticks from the scale and the rest of the request.
    #[default]
    Auto,
    /// Show no ticks at all.
    Hidden,
    /// Use these values verbatim (filtered to valid indices on band axes).
    Values(Vec<f64>),
    /// Keep only candidate values the predicate accepts.
    Filter(Arc<dyn Fn(f64) -> bool>),
}

impl core::fmt::Debug for TickSelector {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Auto => f.write_str("Auto"),
            Self::Hidden => f.write_str("Hidden"),
            Self::Values(v) => f.debug_tuple("Values").field(v).finish(),
            Self::Filter(_) => f.write_str("Filter(..)"),
        }
    }
}

/// A tick generation request.
#[derive(Clone, Debug)]
pub struct TickRequest {
    /// Tick selection mode.
    pub selector: TickSelector,
    /// Candidate tick values (e.g. the axis's own data positions).
    pub possible_values: Option<Vec<f64>>,
    /// Approximate tick count, delegated to the scale's nice tick algorithm.
    pub requested_count: Option<usize>,
    /// Desired pixel spacing between ticks.
    pub interval: Option<f64>,
    /// Lower bound on the tick count derived from `interval`.
    pub min_tick_count: usize,
    /// Lower bound on the synthesized domain step.
    pub min_step: Option<f64>,
    /// Upper bound on the synthesized domain step.
    pub max_step: Option<f64>,
}

impl Default for TickRequest {
    fn default() -> Self {
        Self {
            selector: TickSelector::Auto,
            possible_values: None,
            requested_count: None,
            interval: None,
            min_tick_count: 2,
            min_step: None,
            max_step: None,
        }
    }
}

impl TickRequest {
    /// Creates a request that derives everything from the scale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses these tick values verbatim.
    pub fn with_values(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.selector = TickSelector::Values(values.into_iter().collect());
        self
    }

    /// Keeps only candidate values the predicate accepts.
    pub fn with_filter(mut self, f: impl Fn(f64) -> bool + 'static) -> Self {
        self.selector = TickSelector::Filter(Arc::new(f));
        self
    }

    /// Shows no ticks.
    pub fn hidden(mut self) -> Self {
        self.selector = TickSelector::Hidden;
        self
    }

    /// Sets the candidate tick values.
    pub fn with_possible_values(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.possible_values = Some(values.into_iter().collect());
        self
    }

    /// Requests approximately `count` ticks.
    pub fn with_count(mut self, count: usize) -> Self {
        self.requested_count = Some(count);
        self
    }

    /// Requests one tick per `interval` pixels.
    pub fn with_interval(mut self, interval: f64) -> Self {
        self.interval = Some(interval);
        self
    }
}

/// Generates the ticks for one axis.
pub fn generate_ticks(scale: &Scale, req: &TickRequest) -> Vec<Tick> {
    if let Scale::Band(band) = scale {
        // Band axes show every category; only the selector limits them.
        // Count and interval requests are deliberately ignored.
        let half = band.band_width() / 2.0;
        let keep: Vec<usize> = match &req.selector {
            TickSelector::Hidden => Vec::new(),
            TickSelector::Auto => (0..band.count()).collect(),
            TickSelector::Filter(f) => (0..band.count()).filter(|&i| f(i as f64)).collect(),
            TickSelector::Values(values) => values
                .iter()
                .filter_map(|&v| {
                    if !v.is_finite() {
                        return None;
                    }
                    let index = v.round();
                    if index < 0.0 || index >= band.count() as f64 {
                        return None;
                    }
                    #[allow(
                        clippy::cast_possible_truncation,
                        clippy::cast_sign_loss,
                        reason = "guarded by the index check above"
                    )]
                    let index = index as usize;
                    Some(index)
                })
                .collect(),
        };
        return keep
            .into_iter()
            .map(|i| Tick {
                value: i as f64,
                position: band.start(i) + half,
            })
            .collect();
    }

    let values: Vec<f64> = match &req.selector {
        TickSelector::Hidden => Vec::new(),
        TickSelector::Values(values) => values.clone(),
        TickSelector::Filter(f) => candidate_values(scale, req)
            .into_iter()
            .filter(|&v| f(v))
            .collect(),
        TickSelector::Auto => {
            if let Some(count) = req.requested_count {
                scale.ticks(count)
            } else if let Some(interval) = req.interval.filter(|i| *i > 0.0) {
                interval_values(scale, req, interval)
            } else {
                candidate_values(scale, req)
            }
        }
    };

    values
        .into_iter()
        .filter_map(|v| scale.map(v).map(|position| Tick { value: v, position }))
        .collect()
}

/// The candidate pool a predicate filters (and the auto fallback):
/// the supplied possible values, or the scale's own nice ticks.
fn candidate_values(scale: &Scale, req: &TickRequest) -> Vec<f64> {
    match &req.possible_values {
        Some(values) => values.clone(),
        None => scale.ticks(req.requested_count.unwrap_or(DEFAULT_TICK_COUNT)),
    }
}

/// Tick values for the pixel-interval mode.
fn interval_values(scale: &Scale, req: &TickRequest, interval: f64) -> Vec<f64> {
    let range_size = scale.range().size();
    let count = if range_size > 0.0 && interval.is_finite() {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "non-negative ratio capped well below usize::MAX"
        )]
        {
            ((range_size / interval).floor().min(10_000.0) as usize).max(req.min_tick_count)
        }
    } else {
        req.min_tick_count
    };

    if let Some(possible) = &req.possible_values {
        return select_evenly(possible, count);
    }

    let mut min = scale.domain().min;
    let mut max = scale.domain().max;
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let span = max - min;
    if !span.is_finite() || span <= 0.0 {
        return alloc::vec![min];
    }

    let mut step = nice_step(span / count.saturating_sub(1).max(1) as f64);
    if let Some(min_step) = req.min_step {
        step = step.max(min_step);
    }
    if let Some(max_step) = req.max_step {
        step = step.min(max_step);
    }
    if !step.is_finite() || step <= 0.0 {
        return alloc::vec![min, max];
    }

    let mut out = Vec::new();
    let mut k = 0_u32;
    loop {
        let v = min + step * f64::from(k);
        if v > max + step * 1e-9 || out.len() >= 10_000 {
            break;
        }
        out.push(v);
        k += 1;
    }
    // The domain max joins only when it lands on a step (caught by the loop
    // tolerance) or sits more than half a step past the last tick.
    if let Some(&last) = out.last()
        && max - last > step * 0.5
    {
        out.push(max);
    }
    out
}

/// Picks `count` evenly-indexed values, always keeping the first and last.
fn select_evenly(values: &[f64], count: usize) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    if count >= values.len() || values.len() == 1 {
        return values.to_vec();
    }
    let count = count.max(2);
    let last = values.len() - 1;
    let mut out = Vec::with_capacity(count);
    let mut prev = usize::MAX;
    for i in 0..count {
        let idx = ((i as f64) * (last as f64) / ((count - 1) as f64)).round();
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "idx interpolates between valid indices"
        )]
        let idx = (idx as usize).min(last);
        if idx != prev {
            out.push(values[idx]);
            prev = idx;
        }
    }
    out
}

/// Formats a tick value with decimal places matched to the tick step.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step.is_finite() && step > 0.0 && step < 1.0 {
        let d = -step.log10().floor();
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "positive by the step < 1 branch, capped at 6"
        )]
        {
            (d.min(6.0).max(0.0)) as usize
        }
    } else {
        0
    };
    alloc::format!("{value:.decimals$}")
}
