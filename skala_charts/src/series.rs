// Copyright 2025 the Skala Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Series data model and stacking.
//!
//! Chart data arrives in a handful of dynamic shapes (a bare value, a gap, a
//! `[low, high]` span, an `{x, y}` pair). [`Datum`] is the tagged form of
//! that union; every projector and path builder dispatches on the tag once
//! instead of re-testing shapes downstream.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use peniko::Color;

/// A single data point in one of the supported shapes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Datum {
    /// A gap: breaks line/area paths unless nulls are connected.
    Null,
    /// A bare y value positioned by its index (or by the axis x-data).
    Value(f64),
    /// A `[low, high]` span, e.g. one slice of a stacked series.
    Span(f64, f64),
    /// An explicit `{x, y}` pair.
    Xy {
        /// X coordinate in data units.
        x: f64,
        /// Y coordinate in data units.
        y: f64,
    },
}

impl Datum {
    /// The value a line or point series draws at, if any.
    ///
    /// Spans draw at their high edge; non-finite payloads read as gaps.
    pub fn top(&self) -> Option<f64> {
        let v = match *self {
            Self::Null => return None,
            Self::Value(v) => v,
            Self::Span(_, high) => high,
            Self::Xy { y, .. } => y,
        };
        v.is_finite().then_some(v)
    }

    /// The baseline edge, if the datum carries one (spans only).
    pub fn low(&self) -> Option<f64> {
        match *self {
            Self::Span(low, _) if low.is_finite() => Some(low),
            _ => None,
        }
    }

    /// The datum's own x coordinate, if it carries one.
    pub fn x(&self) -> Option<f64> {
        match *self {
            Self::Xy { x, .. } if x.is_finite() => Some(x),
            _ => None,
        }
    }

    /// Returns `true` if this datum breaks the path.
    pub fn is_gap(&self) -> bool {
        self.top().is_none()
    }
}

impl From<f64> for Datum {
    fn from(value: f64) -> Self {
        Self::Value(value)
    }
}

impl From<Option<f64>> for Datum {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) => Self::Value(v),
            None => Self::Null,
        }
    }
}

impl From<(f64, f64)> for Datum {
    fn from((low, high): (f64, f64)) -> Self {
        Self::Span(low, high)
    }
}

/// One named series of chart data.
#[derive(Clone, Debug)]
pub struct Series {
    /// Stable series identifier; keys stacking caches and label maps.
    pub id: String,
    /// The series data, index-aligned across shapes.
    pub data: Vec<Datum>,
    /// Id of the x axis this series reads, if not the default.
    pub x_axis: Option<String>,
    /// Id of the y axis this series reads, if not the default.
    pub y_axis: Option<String>,
    /// Series sharing a stack id are stacked cumulatively.
    pub stack_id: Option<String>,
    /// Optional series color.
    pub color: Option<Color>,
    /// Optional display label.
    pub label: Option<String>,
}

impl Series {
    /// Creates a series from anything convertible into data points.
    pub fn new(id: impl Into<String>, data: impl IntoIterator<Item = Datum>) -> Self {
        Self {
            id: id.into(),
            data: data.into_iter().collect(),
            x_axis: None,
            y_axis: None,
            stack_id: None,
            color: None,
            label: None,
        }
    }

    /// Creates a series from bare values.
    pub fn from_values(id: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self::new(id, values.into_iter().map(Datum::Value))
    }

    /// Sets the x axis id.
    pub fn with_x_axis(mut self, id: impl Into<String>) -> Self {
        self.x_axis = Some(id.into());
        self
    }

    /// Sets the y axis id.
    pub fn with_y_axis(mut self, id: impl Into<String>) -> Self {
        self.y_axis = Some(id.into());
        self
    }

    /// Sets the stack id.
    pub fn with_stack_id(mut self, id: impl Into<String>) -> Self {
        self.stack_id = Some(id.into());
        self
    }

    /// Sets the series color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The value contributed to a stack at one index.
    fn stack_value(&self, index: usize) -> Option<f64> {
        match self.data.get(index)? {
            Datum::Null => None,
            Datum::Value(v) => v.is_finite().then_some(*v),
            Datum::Span(low, high) => {
                let extent = high - low;
                extent.is_finite().then_some(extent)
            }
            Datum::Xy { y, .. } => y.is_finite().then_some(*y),
        }
    }
}

/// Computes `[low, high]` spans for every stacked series, keyed by series id.
///
/// All series sharing a `stack_id` accumulate in declaration order with a
/// zero baseline. A gap stays a gap for its own series and does not advance
/// the running sum at that index. Series without a `stack_id` are absent
/// from the result.
///
/// The result is a per-render-pass cache: recompute it whenever the input
/// series change.
pub fn stack_spans(series: &[Series]) -> HashMap<String, Vec<Option<(f64, f64)>>> {
    let mut out = HashMap::new();
    let mut stacks: Vec<(&str, Vec<usize>)> = Vec::new();
    for (i, s) in series.iter().enumerate() {
        let Some(stack_id) = s.stack_id.as_deref() else {
            continue;
        };
        match stacks.iter_mut().find(|(id, _)| *id == stack_id) {
            Some((_, members)) => members.push(i),
            None => stacks.push((stack_id, alloc::vec![i])),
        }
    }

    for (_, members) in stacks {
        let len = members
            .iter()
            .map(|&i| series[i].data.len())
            .max()
            .unwrap_or(0);
        let mut base = alloc::vec![0.0_f64; len];
        for &i in &members {
            let s = &series[i];
            let mut spans = Vec::with_capacity(len);
            for index in 0..len {
                match s.stack_value(index) {
                    Some(v) => {
                        spans.push(Some((base[index], base[index] + v)));
                        base[index] += v;
                    }
                    None => spans.push(None),
                }
            }
            out.insert(s.id.clone(), spans);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn stack_accumulates_in_declaration_order() {
        let series = [
            Series::from_values("a", [1.0, 2.0]).with_stack_id("s"),
            Series::from_values("b", [3.0, 4.0]).with_stack_id("s"),
        ];
        let stacked = stack_spans(&series);
        assert_eq!(stacked["a"], alloc::vec![Some((0.0, 1.0)), Some((0.0, 2.0))]);
        assert_eq!(stacked["b"], alloc::vec![Some((1.0, 4.0)), Some((2.0, 6.0))]);
    }

    #[test]
    fn gaps_do_not_advance_the_running_sum() {
        let series = [
            Series::new("a", [Datum::Value(1.0), Datum::Null]).with_stack_id("s"),
            Series::from_values("b", [2.0, 2.0]).with_stack_id("s"),
        ];
        let stacked = stack_spans(&series);
        assert_eq!(stacked["a"][1], None);
        assert_eq!(stacked["b"][1], Some((0.0, 2.0)));
    }

    #[test]
    fn unstacked_series_are_not_cached() {
        let series = [
            Series::from_values("a", [1.0]),
            Series::from_values("b", [1.0]).with_stack_id("s"),
        ];
        let stacked = stack_spans(&series);
        assert!(!stacked.contains_key("a"));
        assert!(stacked.contains_key("b"));
    }

    #[test]
    fn non_finite_values_read_as_gaps() {
        let d = Datum::Value(f64::NAN);
        assert!(d.is_gap());
        let d = Datum::Span(0.0, f64::INFINITY);
        assert!(d.is_gap());
    }
}
