// Copyright 2025 the Skala Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis resolution: from user-facing partial config plus series data to a
//! fully resolved [`AxisConfig`] ready for scale construction.
//!
//! Resolution is a per-render-pass computation: configs are built fresh from
//! their inputs and never mutated in place.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use kurbo::Rect;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::error::ConfigError;
use crate::scale::{BandScale, Bounds, LinearScale, LogScale, Scale};
use crate::series::{Datum, Series};

/// Id assigned to a lone x axis declared without one.
pub const DEFAULT_X_AXIS_ID: &str = "x";
/// Id assigned to a lone y axis declared without one.
pub const DEFAULT_Y_AXIS_ID: &str = "y";

/// Band padding used when a categorical axis does not specify one.
pub const DEFAULT_CATEGORY_PADDING: f64 = 0.1;

/// Tick count target used when widening a domain to nice boundaries.
const NICE_TICK_COUNT: usize = 10;

/// Which plot dimension an axis maps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisKind {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

impl AxisKind {
    /// The well-known id a lone axis of this kind defaults to.
    pub fn default_id(&self) -> &'static str {
        match self {
            Self::X => DEFAULT_X_AXIS_ID,
            Self::Y => DEFAULT_Y_AXIS_ID,
        }
    }

    /// The default domain limit policy for this kind.
    ///
    /// X axes are usually index- or time-based and show exact bounds; y axes
    /// are magnitude-based and benefit from rounded bounds.
    pub fn default_domain_limit(&self) -> DomainLimit {
        match self {
            Self::X => DomainLimit::Strict,
            Self::Y => DomainLimit::Nice,
        }
    }
}

impl core::fmt::Display for AxisKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::X => f.write_str("x"),
            Self::Y => f.write_str("y"),
        }
    }
}

/// Which scale variant an axis constructs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScaleKind {
    /// Continuous linear scale.
    #[default]
    Linear,
    /// Continuous logarithmic scale.
    Log,
    /// Discrete band scale.
    Band,
}

/// Whether a data-derived domain is widened to nice boundaries or kept exact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DomainLimit {
    /// Round the domain outward to human-friendly boundaries.
    Nice,
    /// Use the exact data bounds.
    Strict,
}

/// Explicit per-axis data, overriding series-derived domains.
#[derive(Clone, Debug, PartialEq)]
pub enum AxisData {
    /// Numeric positions (e.g. timestamps); the domain spans their extent.
    Numbers(Vec<f64>),
    /// Category labels, positioned by index.
    Categories(Vec<String>),
}

/// A user override for one resolved interval (domain or range).
#[derive(Clone, Default)]
pub enum BoundsOverride {
    /// No override; the computed interval is used as-is.
    #[default]
    Unset,
    /// Present fields replace the corresponding computed endpoint.
    Partial {
        /// Replacement for the computed minimum.
        min: Option<f64>,
        /// Replacement for the computed maximum.
        max: Option<f64>,
    },
    /// A transform applied to the computed interval after limit processing.
    Map(Arc<dyn Fn(Bounds) -> Bounds>),
}

impl core::fmt::Debug for BoundsOverride {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unset => f.write_str("Unset"),
            Self::Partial { min, max } => f
                .debug_struct("Partial")
                .field("min", min)
                .field("max", max)
                .finish(),
            Self::Map(_) => f.write_str("Map(..)"),
        }
    }
}

impl BoundsOverride {
    fn apply(&self, computed: Option<Bounds>) -> Option<Bounds> {
        match self {
            Self::Unset => computed,
            Self::Partial { min, max } => {
                let mut bounds = computed.unwrap_or_default();
                if let Some(min) = min {
                    bounds.min = *min;
                }
                if let Some(max) = max {
                    bounds.max = *max;
                }
                Some(bounds)
            }
            Self::Map(f) => Some(f(computed.unwrap_or_default())),
        }
    }
}

/// User-facing partial axis configuration.
#[derive(Clone, Default)]
pub struct AxisProps {
    /// Axis id. Required whenever more than one axis of a kind is declared.
    pub id: Option<String>,
    /// Scale variant; defaults per chart type.
    pub scale_kind: Option<ScaleKind>,
    /// Domain override (partial bounds or transform).
    pub domain: BoundsOverride,
    /// Range override (partial bounds or transform).
    pub range: BoundsOverride,
    /// Explicit axis data.
    pub data: Option<AxisData>,
    /// Band padding fraction for categorical axes.
    pub category_padding: Option<f64>,
    /// Domain limit policy; defaults per axis kind.
    pub domain_limit: Option<DomainLimit>,
}

impl core::fmt::Debug for AxisProps {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AxisProps")
            .field("id", &self.id)
            .field("scale_kind", &self.scale_kind)
            .field("domain", &self.domain)
            .field("range", &self.range)
            .field("data", &self.data)
            .field("category_padding", &self.category_padding)
            .field("domain_limit", &self.domain_limit)
            .finish()
    }
}

impl AxisProps {
    /// Creates an empty axis config; every field resolves to a default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the axis id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the scale variant.
    pub fn with_scale_kind(mut self, kind: ScaleKind) -> Self {
        self.scale_kind = Some(kind);
        self
    }

    /// Overrides the domain minimum.
    pub fn with_domain_min(mut self, min: f64) -> Self {
        self.domain = match self.domain {
            BoundsOverride::Partial { max, .. } => BoundsOverride::Partial {
                min: Some(min),
                max,
            },
            _ => BoundsOverride::Partial {
                min: Some(min),
                max: None,
            },
        };
        self
    }

    /// Overrides the domain maximum.
    pub fn with_domain_max(mut self, max: f64) -> Self {
        self.domain = match self.domain {
            BoundsOverride::Partial { min, .. } => BoundsOverride::Partial {
                min,
                max: Some(max),
            },
            _ => BoundsOverride::Partial {
                min: None,
                max: Some(max),
            },
        };
        self
    }

    /// Sets a domain transform, applied after limit processing.
    pub fn with_domain_map(mut self, f: impl Fn(Bounds) -> Bounds + 'static) -> Self {
        self.domain = BoundsOverride::Map(Arc::new(f));
        self
    }

    /// Overrides the range minimum.
    pub fn with_range_min(mut self, min: f64) -> Self {
        self.range = match self.range {
            BoundsOverride::Partial { max, .. } => BoundsOverride::Partial {
                min: Some(min),
                max,
            },
            _ => BoundsOverride::Partial {
                min: Some(min),
                max: None,
            },
        };
        self
    }

    /// Overrides the range maximum.
    pub fn with_range_max(mut self, max: f64) -> Self {
        self.range = match self.range {
            BoundsOverride::Partial { min, .. } => BoundsOverride::Partial {
                min,
                max: Some(max),
            },
            _ => BoundsOverride::Partial {
                min: None,
                max: Some(max),
            },
        };
        self
    }

    /// Sets a range transform (commonly used to invert the y range).
    pub fn with_range_map(mut self, f: impl Fn(Bounds) -> Bounds + 'static) -> Self {
        self.range = BoundsOverride::Map(Arc::new(f));
        self
    }

    /// Sets explicit numeric axis data.
    pub fn with_numbers(mut self, numbers: impl IntoIterator<Item = f64>) -> Self {
        self.data = Some(AxisData::Numbers(numbers.into_iter().collect()));
        self
    }

    /// Sets category labels.
    pub fn with_categories<S: Into<String>>(
        mut self,
        categories: impl IntoIterator<Item = S>,
    ) -> Self {
        self.data = Some(AxisData::Categories(
            categories.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Sets the band padding fraction.
    pub fn with_category_padding(mut self, padding: f64) -> Self {
        self.category_padding = Some(padding);
        self
    }

    /// Sets the domain limit policy.
    pub fn with_domain_limit(mut self, limit: DomainLimit) -> Self {
        self.domain_limit = Some(limit);
        self
    }
}

/// Normalizes a set of axis declarations of one kind.
///
/// A missing declaration yields one default axis. A lone axis without an id
/// receives the kind's well-known default id. When more than one axis is
/// declared, every entry must carry an explicit, unique id; violations are
/// raised immediately as configuration errors.
pub fn resolve_axis_props(
    kind: AxisKind,
    props: &[AxisProps],
    default_scale: ScaleKind,
) -> Result<Vec<AxisProps>, ConfigError> {
    let mut resolved: Vec<AxisProps> = if props.is_empty() {
        alloc::vec![AxisProps::new()]
    } else {
        props.to_vec()
    };

    if resolved.len() > 1 {
        let mut seen: Vec<&str> = Vec::with_capacity(resolved.len());
        for p in &resolved {
            let Some(id) = p.id.as_deref() else {
                return Err(ConfigError::AmbiguousAxisIds { kind });
            };
            if seen.contains(&id) {
                return Err(ConfigError::DuplicateAxisId {
                    kind,
                    id: String::from(id),
                });
            }
            seen.push(id);
        }
    }

    for p in &mut resolved {
        if p.id.is_none() {
            p.id = Some(String::from(kind.default_id()));
        }
        if p.scale_kind.is_none() {
            p.scale_kind = Some(default_scale);
        }
        if p.domain_limit.is_none() {
            p.domain_limit = Some(kind.default_domain_limit());
        }
    }
    Ok(resolved)
}

/// Returns the series bound to the axis described by `props`.
fn series_on_axis<'s>(
    props: &AxisProps,
    series: &'s [Series],
    kind: AxisKind,
) -> impl Iterator<Item = &'s Series> {
    let axis_id = props
        .id
        .clone()
        .unwrap_or_else(|| String::from(kind.default_id()));
    series.iter().filter(move |s| {
        let bound = match kind {
            AxisKind::X => s.x_axis.as_deref(),
            AxisKind::Y => s.y_axis.as_deref(),
        };
        bound.unwrap_or(kind.default_id()) == axis_id
    })
}

fn domain_from_numbers(numbers: &[f64]) -> Option<Bounds> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in numbers {
        if !v.is_finite() {
            continue;
        }
        min = min.min(v);
        max = max.max(v);
    }
    (min.is_finite() && max.is_finite()).then(|| Bounds::new(min, max))
}

fn domain_from_series(props: &AxisProps, series: &[Series], kind: AxisKind) -> Option<Bounds> {
    match kind {
        AxisKind::X => {
            let len = series_on_axis(props, series, kind)
                .map(|s| s.data.len())
                .max()
                .unwrap_or(0);
            (len > 0).then(|| Bounds::new(0.0, (len - 1) as f64))
        }
        AxisKind::Y => {
            let mut min = f64::INFINITY;
            let mut max = f64::NEG_INFINITY;
            for s in series_on_axis(props, series, kind) {
                for d in &s.data {
                    let (lo, hi) = match *d {
                        Datum::Null => continue,
                        Datum::Value(v) => (v, v),
                        Datum::Span(low, high) => (low, high),
                        Datum::Xy { y, .. } => (y, y),
                    };
                    if lo.is_finite() {
                        min = min.min(lo);
                    }
                    if hi.is_finite() {
                        max = max.max(hi);
                    }
                }
            }
            (min.is_finite() && max.is_finite()).then(|| Bounds::new(min, max))
        }
    }
}

/// Resolves an axis domain from explicit data, series, and user overrides.
///
/// Resolution order: explicit axis data, then series-derived bounds, then
/// the domain limit policy, then the user override. An unresolvable domain
/// deliberately falls back to `[0, 0]` rather than failing.
pub fn resolve_domain(props: &AxisProps, series: &[Series], kind: AxisKind) -> Bounds {
    let computed = match &props.data {
        Some(AxisData::Numbers(numbers)) if !numbers.is_empty() => domain_from_numbers(numbers),
        Some(AxisData::Categories(categories)) if !categories.is_empty() => {
            Some(Bounds::new(0.0, (categories.len() - 1) as f64))
        }
        _ => None,
    }
    .or_else(|| domain_from_series(props, series, kind));

    let limit = props
        .domain_limit
        .unwrap_or_else(|| kind.default_domain_limit());
    let limited = match limit {
        DomainLimit::Nice => computed.map(|b| b.nice(NICE_TICK_COUNT)),
        DomainLimit::Strict => computed,
    };

    props.domain.apply(limited).unwrap_or_default()
}

/// Resolves an axis pixel range from the drawing rectangle and overrides.
///
/// The base range is the rectangle's horizontal extent for x axes and its
/// vertical extent for y axes; callers flip the y range via an override when
/// they want the SVG-style inverted axis.
pub fn resolve_range(props: &AxisProps, rect: Rect, kind: AxisKind) -> Bounds {
    let base = match kind {
        AxisKind::X => Bounds::new(rect.x0, rect.x1),
        AxisKind::Y => Bounds::new(rect.y0, rect.y1),
    };
    props
        .range
        .apply(Some(base))
        .unwrap_or(base)
}

/// A fully resolved axis, ready for scale construction.
///
/// Built once per render pass from [`AxisProps`] plus series data, and
/// discarded and recomputed whenever any input changes.
#[derive(Clone, Debug)]
pub struct AxisConfig {
    /// The scale variant to construct.
    pub kind: ScaleKind,
    /// Resolved data-space bounds.
    pub domain: Bounds,
    /// Resolved pixel-space bounds.
    pub range: Bounds,
    /// Explicit axis data, if any (category labels or numeric positions).
    pub data: Option<AxisData>,
    /// Band padding fraction for categorical axes.
    pub category_padding: f64,
    /// The limit policy the domain was resolved under.
    pub domain_limit: DomainLimit,
}

impl AxisConfig {
    /// Number of categories a band scale built from this config will carry.
    pub fn category_count(&self) -> usize {
        match &self.data {
            Some(AxisData::Categories(c)) => c.len(),
            Some(AxisData::Numbers(n)) => n.len(),
            None => {
                let span = self.domain.span();
                if !span.is_finite() || span < 0.0 {
                    0
                } else {
                    #[allow(
                        clippy::cast_possible_truncation,
                        clippy::cast_sign_loss,
                        reason = "guarded non-negative and finite above"
                    )]
                    {
                        (span.round() as usize).saturating_add(1)
                    }
                }
            }
        }
    }

    /// Constructs the scale for this axis.
    ///
    /// Non-finite bounds are a configuration error. Collapsed bounds are
    /// not: they degenerate to constant-output scales.
    pub fn scale(&self) -> Result<Scale, ConfigError> {
        if !self.domain.is_finite() {
            return Err(ConfigError::NonFiniteBounds {
                what: "domain",
                min: self.domain.min,
                max: self.domain.max,
            });
        }
        if !self.range.is_finite() {
            return Err(ConfigError::NonFiniteBounds {
                what: "range",
                min: self.range.min,
                max: self.range.max,
            });
        }
        Ok(match self.kind {
            ScaleKind::Linear => Scale::Linear(LinearScale::new(self.domain, self.range)),
            ScaleKind::Log => Scale::Log(LogScale::new(self.domain, self.range)),
            ScaleKind::Band => Scale::Band(BandScale::new(
                self.category_count(),
                self.range,
                self.category_padding,
            )),
        })
    }
}

/// Resolves one axis end-to-end: domain, range, and scale inputs.
pub fn resolve_axis_config(
    props: &AxisProps,
    series: &[Series],
    rect: Rect,
    kind: AxisKind,
) -> AxisConfig {
    AxisConfig {
        kind: props.scale_kind.unwrap_or_default(),
        domain: resolve_domain(props, series, kind),
        range: resolve_range(props, rect, kind),
        data: props.data.clone(),
        category_padding: props.category_padding.unwrap_or(DEFAULT_CATEGORY_PADDING),
        domain_limit: props
            .domain_limit
            .unwrap_or_else(|| kind.default_domain_limit()),
    }
}
