// Copyright 2025 the Skala Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale construction and domain/range mapping.
//!
//! Scales are small `Copy` values built once per resolved axis config and
//! never mutated afterwards, so they can be freely shared by every consumer
//! of the same axis (paths, ticks, projection, scrubbing).

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Non-positive inputs to a log scale are clamped to this value before
/// evaluation so the mapping never produces `-inf` or `NaN`.
pub const LOG_CLAMP: f64 = 1e-3;

/// An inclusive interval in either data space (domain) or pixel space (range).
///
/// `min <= max` is *not* enforced: pixel ranges are routinely inverted to
/// account for SVG's downward y axis, and consumers interpret direction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    /// Interval start.
    pub min: f64,
    /// Interval end.
    pub max: f64,
}

impl Bounds {
    /// Creates a new interval.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Signed extent (`max - min`); negative for inverted intervals.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Absolute extent.
    pub fn size(&self) -> f64 {
        self.span().abs()
    }

    /// Returns `true` if both endpoints are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Rounds the interval outward to multiples of a "nice" step
    /// (1, 2, or 5 times a power of ten), aiming for roughly `count` steps.
    ///
    /// Degenerate or non-finite intervals are returned unchanged. Inverted
    /// intervals keep their direction.
    pub fn nice(&self, count: usize) -> Self {
        let (mut min, mut max) = (self.min, self.max);
        let inverted = min > max;
        if inverted {
            core::mem::swap(&mut min, &mut max);
        }
        if !min.is_finite() || !max.is_finite() || min == max {
            return *self;
        }
        let step = nice_step((max - min) / count.max(1) as f64);
        if step == 0.0 {
            return *self;
        }
        let min = (min / step).floor() * step;
        let max = (max / step).ceil() * step;
        if inverted {
            Self::new(max, min)
        } else {
            Self::new(min, max)
        }
    }
}

/// Rounds a raw step size to 1, 2, or 5 times a power of ten.
pub(crate) fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// Returns "nice" tick values covering `[min, max]`, stepped by
/// [`nice_step`] multiples.
pub(crate) fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let step = nice_step((max - min) / count.max(1) as f64);
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    let start = (min / step).floor() * step;
    let stop = (max / step).ceil() * step;

    let n_f = ((stop - start) / step).round();
    let n = if n_f.is_finite() && n_f >= 0.0 {
        let n_f = n_f.min(10_000.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f as u64
        }
    } else {
        0
    };
    (0..=n).map(|i| start + step * i as f64).collect()
}

/// A linear mapping between a continuous domain and a pixel range.
#[derive(Clone, Copy, Debug)]
pub struct LinearScale {
    domain: Bounds,
    range: Bounds,
}

impl LinearScale {
    /// Creates a new scale mapping `domain` values onto `range` pixels.
    pub fn new(domain: Bounds, range: Bounds) -> Self {
        Self { domain, range }
    }

    /// Maps a domain value into pixel space.
    ///
    /// A collapsed domain degenerates to a constant output at the range start.
    pub fn map(&self, x: f64) -> f64 {
        let denom = self.domain.span();
        if denom == 0.0 {
            return self.range.min;
        }
        let t = (x - self.domain.min) / denom;
        self.range.min + t * self.range.span()
    }

    /// Maps a pixel back into the domain.
    ///
    /// A collapsed range degenerates to a constant output at the domain start.
    pub fn invert(&self, px: f64) -> f64 {
        let denom = self.range.span();
        if denom == 0.0 {
            return self.domain.min;
        }
        let t = (px - self.range.min) / denom;
        self.domain.min + t * self.domain.span()
    }

    /// The configured domain.
    pub fn domain(&self) -> Bounds {
        self.domain
    }

    /// The configured range.
    pub fn range(&self) -> Bounds {
        self.range
    }

    /// Returns nice tick values for the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain.min, self.domain.max, count)
    }

    /// Returns a copy with the reported domain rounded outward to nice
    /// boundaries. The range is untouched.
    pub fn nice(self) -> Self {
        Self::new(self.domain.nice(10), self.range)
    }
}

/// A base-`b` logarithmic mapping between a positive domain and a pixel range.
#[derive(Clone, Copy, Debug)]
pub struct LogScale {
    domain: Bounds,
    range: Bounds,
    base: f64,
}

impl LogScale {
    /// Creates a new log scale with base 10.
    ///
    /// Non-positive domain endpoints are tolerated; they are clamped to
    /// [`LOG_CLAMP`] when the scale is evaluated.
    pub fn new(domain: Bounds, range: Bounds) -> Self {
        Self {
            domain,
            range,
            base: 10.0,
        }
    }

    /// Sets the log base. Invalid bases fall back to 10.
    pub fn with_base(mut self, base: f64) -> Self {
        self.base = if base.is_finite() && base > 0.0 && base != 1.0 {
            base
        } else {
            10.0
        };
        self
    }

    fn log_base(&self, x: f64) -> f64 {
        let denom = self.base.ln();
        if denom == 0.0 { x.ln() } else { x.ln() / denom }
    }

    fn clamped_domain(&self) -> (f64, f64) {
        (self.domain.min.max(LOG_CLAMP), self.domain.max.max(LOG_CLAMP))
    }

    /// Maps a domain value into pixel space.
    ///
    /// Values at or below zero are clamped to [`LOG_CLAMP`] first, so the
    /// result is always a finite pixel value.
    pub fn map(&self, x: f64) -> f64 {
        let x = x.max(LOG_CLAMP);
        let (d0, d1) = self.clamped_domain();
        let ld0 = self.log_base(d0);
        let ld1 = self.log_base(d1);
        let denom = ld1 - ld0;
        if denom == 0.0 {
            return self.range.min;
        }
        let t = (self.log_base(x) - ld0) / denom;
        self.range.min + t * self.range.span()
    }

    /// Maps a pixel back into the domain.
    pub fn invert(&self, px: f64) -> f64 {
        let denom = self.range.span();
        let (d0, d1) = self.clamped_domain();
        let ld0 = self.log_base(d0);
        let ld1 = self.log_base(d1);
        if denom == 0.0 || ld1 == ld0 {
            return d0;
        }
        let t = (px - self.range.min) / denom;
        self.base.powf(ld0 + t * (ld1 - ld0))
    }

    /// The configured domain (as authored, before clamping).
    pub fn domain(&self) -> Bounds {
        self.domain
    }

    /// The configured range.
    pub fn range(&self) -> Bounds {
        self.range
    }

    /// Returns powers of the base that fall within the domain, capped by
    /// `count` (a `count` of zero means no cap).
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (mut min, mut max) = self.clamped_domain();
        if min > max {
            core::mem::swap(&mut min, &mut max);
        }
        if !min.is_finite() || !max.is_finite() {
            return Vec::new();
        }
        let min_e = {
            let e = self
                .log_base(min)
                .floor()
                .clamp(i32::MIN as f64, i32::MAX as f64);
            #[allow(clippy::cast_possible_truncation, reason = "clamped to the i32 range")]
            {
                e as i32
            }
        };
        let max_e = {
            let e = self
                .log_base(max)
                .ceil()
                .clamp(i32::MIN as f64, i32::MAX as f64);
            #[allow(clippy::cast_possible_truncation, reason = "clamped to the i32 range")]
            {
                e as i32
            }
        };
        let mut out = Vec::new();
        for e in min_e..=max_e {
            out.push(self.base.powi(e));
            if count != 0 && out.len() >= count {
                break;
            }
        }
        out
    }

    /// Returns a copy with the reported domain widened outward to powers of
    /// the base. The range is untouched.
    pub fn nice(self) -> Self {
        let (d0, d1) = self.clamped_domain();
        let min = self.base.powf(self.log_base(d0).floor());
        let max = self.base.powf(self.log_base(d1).ceil());
        Self {
            domain: Bounds::new(min, max),
            range: self.range,
            base: self.base,
        }
    }
}

/// A categorical band scale dividing a pixel range into `count` equal bands.
///
/// The domain is the contiguous integer index set `[0, count - 1]`. Adjacent
/// bands are separated by `padding` (a fraction of one band's width).
#[derive(Clone, Copy, Debug)]
pub struct BandScale {
    range: Bounds,
    count: usize,
    padding: f64,
}

impl BandScale {
    /// Creates a band scale covering `count` categories over `range`, with
    /// `padding` clamped into `[0, 1]`.
    pub fn new(count: usize, range: Bounds, padding: f64) -> Self {
        Self {
            range,
            count,
            padding: padding.clamp(0.0, 1.0),
        }
    }

    /// Pixel width of one band.
    pub fn band_width(&self) -> f64 {
        let n = self.count as f64;
        if n <= 0.0 {
            return 0.0;
        }
        let denom = n + self.padding * (n - 1.0);
        if denom == 0.0 {
            0.0
        } else {
            self.range.size() / denom
        }
    }

    /// Number of categories.
    pub fn count(&self) -> usize {
        self.count
    }

    /// The configured range.
    pub fn range(&self) -> Bounds {
        self.range
    }

    /// The index domain, `[0, count - 1]` (collapsed to `[0, 0]` when empty).
    pub fn domain(&self) -> Bounds {
        Bounds::new(0.0, (self.count.saturating_sub(1)) as f64)
    }

    /// Start pixel of the band at `index`.
    pub fn start(&self, index: usize) -> f64 {
        let bw = self.band_width();
        let step = bw * (1.0 + self.padding);
        let origin = self.range.min.min(self.range.max);
        origin + step * index as f64
    }

    /// Center pixel of the band at `index`.
    pub fn center(&self, index: usize) -> f64 {
        self.start(index) + self.band_width() / 2.0
    }
}

/// A chart scale: the polymorphic mapping consumed by paths, ticks,
/// projection, and scrubbing.
#[derive(Clone, Copy, Debug)]
pub enum Scale {
    /// Continuous linear scale.
    Linear(LinearScale),
    /// Continuous logarithmic scale.
    Log(LogScale),
    /// Discrete band scale over category indices.
    Band(BandScale),
}

impl From<LinearScale> for Scale {
    fn from(value: LinearScale) -> Self {
        Self::Linear(value)
    }
}

impl From<LogScale> for Scale {
    fn from(value: LogScale) -> Self {
        Self::Log(value)
    }
}

impl From<BandScale> for Scale {
    fn from(value: BandScale) -> Self {
        Self::Band(value)
    }
}

impl Scale {
    /// Maps a domain value into pixel space.
    ///
    /// For band scales the value is rounded to the nearest category index
    /// and the band's *start* pixel is returned (callers wanting the center
    /// add half of [`Scale::band_width`]). Returns `None` for non-finite
    /// input or an out-of-domain band index.
    pub fn map(&self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        match self {
            Self::Linear(s) => Some(s.map(value)),
            Self::Log(s) => Some(s.map(value)),
            Self::Band(s) => {
                let index = value.round();
                if index < 0.0 || index >= s.count() as f64 {
                    return None;
                }
                let index = {
                    #[allow(
                        clippy::cast_possible_truncation,
                        clippy::cast_sign_loss,
                        reason = "guarded by the domain check above"
                    )]
                    {
                        index as usize
                    }
                };
                Some(s.start(index))
            }
        }
    }

    /// Maps a pixel back into the domain.
    ///
    /// Band scales have no inverse; callers search the nearest discrete
    /// index instead (see [`crate::scrub`]).
    pub fn invert(&self, px: f64) -> Option<f64> {
        match self {
            Self::Linear(s) => Some(s.invert(px)),
            Self::Log(s) => Some(s.invert(px)),
            Self::Band(_) => None,
        }
    }

    /// The scale's domain. For band scales this is the category index span.
    pub fn domain(&self) -> Bounds {
        match self {
            Self::Linear(s) => s.domain(),
            Self::Log(s) => s.domain(),
            Self::Band(s) => s.domain(),
        }
    }

    /// The scale's pixel range.
    pub fn range(&self) -> Bounds {
        match self {
            Self::Linear(s) => s.range(),
            Self::Log(s) => s.range(),
            Self::Band(s) => s.range(),
        }
    }

    /// Returns tick values for the domain. Band scales return every index.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match self {
            Self::Linear(s) => s.ticks(count),
            Self::Log(s) => s.ticks(count),
            Self::Band(s) => (0..s.count()).map(|i| i as f64).collect(),
        }
    }

    /// Pixel width of one band; zero for continuous scales.
    pub fn band_width(&self) -> f64 {
        match self {
            Self::Band(s) => s.band_width(),
            _ => 0.0,
        }
    }

    /// Returns `true` for band scales.
    pub fn is_band(&self) -> bool {
        matches!(self, Self::Band(_))
    }
}
