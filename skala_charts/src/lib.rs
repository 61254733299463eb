// Copyright 2025 the Skala Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart coordinate and layout core.
//!
//! This crate is the geometry layer under a charting UI:
//! - **Scales** map data values into pixel coordinates (linear, log, band).
//! - **Axis resolution** turns partial user config plus series data into
//!   fully resolved domains and ranges.
//! - **Ticks** are derived from a scale under several selection modes.
//! - **Paths** serialize projected series into SVG `d` strings, with curve
//!   interpolation and null-gap handling.
//! - **Scrubbing** maps pointer/keyboard input back to a data index, and
//!   **label layout** stacks scrub labels without overlap.
//!
//! Everything is a pure function over plain data: the rendering layer feeds
//! in series arrays, config, and a drawing rectangle, and receives positions,
//! tick lists, and path strings back. No rendering tree, no I/O, no internal
//! state; callers memoize resolved configs and scales and re-run only the
//! interactive layer per pointer move.

#![no_std]

extern crate alloc;

mod axis;
mod curve;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod label;
mod path;
mod project;
mod scale;
#[cfg(test)]
mod scenario_tests;
mod scrub;
mod series;
mod tick;

pub use axis::{
    AxisConfig, AxisData, AxisKind, AxisProps, BoundsOverride, DEFAULT_CATEGORY_PADDING,
    DEFAULT_X_AXIS_ID, DEFAULT_Y_AXIS_ID, DomainLimit, ScaleKind, resolve_axis_config,
    resolve_axis_props, resolve_domain, resolve_range,
};
pub use curve::CurveKind;
pub use error::ConfigError;
pub use label::{
    DEFAULT_LABEL_X_OFFSET, HeuristicTextMeasurer, LabelDimension, LabelSide, MIN_PRACTICAL_GAP,
    TextMeasurer, choose_label_side, max_label_width, resolve_label_positions,
};
pub use path::{build_area_path, build_bar_path, build_line_path};
pub use project::{project_point, project_points, project_scalar};
pub use scale::{BandScale, Bounds, LOG_CLAMP, LinearScale, LogScale, Scale};
pub use scrub::{ScrubKey, resolve_index_from_pixel, step_index};
pub use series::{Datum, Series, stack_spans};
pub use tick::{DEFAULT_TICK_COUNT, Tick, TickRequest, TickSelector, format_tick, generate_ticks};
