// Copyright 2025 the Skala Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration error taxonomy.
//!
//! Only genuine misconfiguration is surfaced as an error; data anomalies
//! (NaN coordinates, non-positive log inputs, malformed entries) are clamped
//! or turned into gaps at the point where they are encountered.

extern crate alloc;

use alloc::string::String;

use thiserror::Error;

use crate::axis::AxisKind;

/// A fatal chart configuration error.
///
/// These are raised immediately during axis resolution or scale construction
/// and require the caller to fix its setup.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// More than one axis of the same kind was declared without every entry
    /// carrying an explicit id.
    #[error("multiple {kind} axes declared without explicit ids")]
    AmbiguousAxisIds {
        /// The axis kind the declarations belong to.
        kind: AxisKind,
    },
    /// Two axes of the same kind share an id.
    #[error("duplicate {kind} axis id `{id}`")]
    DuplicateAxisId {
        /// The axis kind the declarations belong to.
        kind: AxisKind,
        /// The offending id.
        id: String,
    },
    /// A scale was constructed from non-finite domain or range bounds.
    #[error("non-finite {what} bounds [{min}, {max}]")]
    NonFiniteBounds {
        /// Which interval the bounds belong to (`"domain"` or `"range"`).
        what: &'static str,
        /// Lower bound as supplied.
        min: f64,
        /// Upper bound as supplied.
        max: f64,
    },
}
