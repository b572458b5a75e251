//! Domain, range and bandwidth resolution.
//!
//! Categorical domains keep first-occurrence order; numeric domains use a
//! fixed `[0, ceil(max * 1.2)]` headroom heuristic so bars never touch the
//! top of the plot.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::stack::{distinct, group_sums};
use crate::core::types::{DataPoint, Field, Key};

/// Headroom multiplier applied to the largest value of a numeric domain.
pub const AUTO_RANGE_HEADROOM: f64 = 1.2;

/// Decimal digits never exceed this when formatting numeric tick labels.
pub const MAX_LABEL_DECIMALS: usize = 2;

/// Which axis a range is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Distinct values of `field` in first-occurrence order.
///
/// Records missing the field are skipped.
#[must_use]
pub fn categorical_domain(data: &[DataPoint], field: &Field) -> Vec<Key> {
    distinct(data, field).into_iter().flatten().collect()
}

/// `[0, ceil(max * 1.2)]` over the numeric values of `field`.
///
/// With `group_by`, values are summed per group first so stacked totals fit.
/// Values that are not numeric are ignored. Without a single finite value the
/// domain is empty, so the axis resolves to zero ticks.
#[must_use]
pub fn numeric_domain(data: &[DataPoint], field: &Field, group_by: Option<&Field>) -> Vec<Key> {
    let range = match group_by {
        Some(group_field) => auto_range(group_sums(data, field, group_field)),
        None => auto_range(data.iter().filter_map(|point| point.field_f64(field))),
    };
    range.map_or_else(Vec::new, |(min, max)| vec![Key::number(min), Key::number(max)])
}

/// The headroom heuristic itself. `None` when no value is finite.
#[must_use]
pub fn auto_range<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    let max = values
        .into_iter()
        .filter(|value| value.is_finite())
        .fold(None, |acc: Option<f64>, value| {
            Some(acc.map_or(value, |current| current.max(value)))
        });
    max.map(|max| (0.0, (max * AUTO_RANGE_HEADROOM).ceil()))
}

/// Formats tick labels so numeric labels share one decimal-digit count.
///
/// The count is the largest number of fractional digits among the values,
/// capped at [`MAX_LABEL_DECIMALS`]. A domain with any non-numeric entry is
/// passed through unchanged.
#[must_use]
pub fn nice_labels(domain: &[Key]) -> Vec<String> {
    if domain.iter().any(|key| !key.is_number()) {
        return domain.iter().map(ToString::to_string).collect();
    }

    let values: Vec<f64> = domain.iter().filter_map(Key::as_f64).collect();
    let digits = values
        .iter()
        .map(|value| fraction_digits(*value))
        .max()
        .unwrap_or(0)
        .min(MAX_LABEL_DECIMALS);
    values
        .iter()
        .map(|value| format!("{value:.digits$}"))
        .collect()
}

/// Counts the characters after the `.` of the shortest text form of `value`.
///
/// Magnitudes below `1e-6` or from `1e21` up are written in exponent form
/// (`1e-7`, `1.5e-7`), so the exponent suffix counts and a bare mantissa
/// counts as zero.
fn fraction_digits(value: f64) -> usize {
    let magnitude = value.abs();
    let text = if magnitude != 0.0 && !(1e-6..1e21).contains(&magnitude) {
        format!("{value:e}")
    } else {
        value.to_string()
    };
    match text.split_once('.') {
        Some((_, fraction)) => fraction.len(),
        None => 0,
    }
}

/// Pixel width of one slot.
///
/// An explicit finite bandwidth always wins. Otherwise the distance is split
/// evenly across the ticks; zero ticks or a non-finite result give 0.
#[must_use]
pub fn resolve_bandwidth(explicit: Option<f64>, tick_count: usize, distance: f64) -> f64 {
    if let Some(explicit) = explicit.filter(|value| value.is_finite()) {
        return explicit;
    }
    if tick_count == 0 {
        return 0.0;
    }
    let bandwidth = distance / tick_count as f64;
    if bandwidth.is_finite() { bandwidth.max(0.0) } else { 0.0 }
}

/// Range used when the caller provides none.
///
/// The x axis grows rightwards from 0; the y axis is inverted so larger
/// values sit higher on a y-down surface.
#[must_use]
pub fn default_range(axis: Axis, bandwidth: f64, tick_count: usize) -> (f64, f64) {
    let extent = bandwidth * tick_count as f64;
    match axis {
        Axis::X => (0.0, extent),
        Axis::Y => (extent, 0.0),
    }
}

/// Computes a range from `(bandwidth, ticks, total_distance)`.
pub type RangeFn = dyn Fn(f64, &[Key], f64) -> (f64, f64);

/// How an axis range is chosen.
#[derive(Default)]
pub enum RangeSpec {
    /// [`default_range`] for the axis.
    #[default]
    Auto,
    Literal(f64, f64),
    Computed(Box<RangeFn>),
}

impl RangeSpec {
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(f64, &[Key], f64) -> (f64, f64) + 'static,
    {
        Self::Computed(Box::new(f))
    }

    #[must_use]
    pub fn resolve(&self, axis: Axis, bandwidth: f64, ticks: &[Key], distance: f64) -> (f64, f64) {
        match self {
            Self::Auto => default_range(axis, bandwidth, ticks.len()),
            Self::Literal(start, end) => (*start, *end),
            Self::Computed(f) => f(bandwidth, ticks, distance),
        }
    }
}

impl fmt::Debug for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("Auto"),
            Self::Literal(start, end) => f.debug_tuple("Literal").field(start).field(end).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Computes a domain from the mapped data.
pub type DomainFn = dyn Fn(&[DataPoint]) -> Vec<Key>;

/// How an axis domain is chosen.
#[derive(Default)]
pub enum DomainSpec {
    /// Categorical `name` domain on x, numeric `value` domain on y.
    #[default]
    Auto,
    Literal(Vec<Key>),
    Computed(Box<DomainFn>),
}

impl DomainSpec {
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&[DataPoint]) -> Vec<Key> + 'static,
    {
        Self::Computed(Box::new(f))
    }

    /// Categorical domain over `field`.
    #[must_use]
    pub fn categorical(field: Field) -> Self {
        Self::computed(move |data| categorical_domain(data, &field))
    }

    /// Numeric headroom domain over `field`, optionally summed per group.
    #[must_use]
    pub fn numeric(field: Field, group_by: Option<Field>) -> Self {
        Self::computed(move |data| numeric_domain(data, &field, group_by.as_ref()))
    }

    #[must_use]
    pub fn resolve(&self, axis: Axis, data: &[DataPoint]) -> Vec<Key> {
        match self {
            Self::Auto => match axis {
                Axis::X => categorical_domain(data, &Field::Name),
                Axis::Y => numeric_domain(data, &Field::Value, None),
            },
            Self::Literal(domain) => domain.clone(),
            Self::Computed(f) => f(data),
        }
    }
}

impl fmt::Debug for DomainSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("Auto"),
            Self::Literal(domain) => f.debug_tuple("Literal").field(domain).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}
