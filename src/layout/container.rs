//! Container sizing.
//!
//! A container owns the outer box of a chart. Children only ever see the
//! inner box; the padding offset is applied once via [`ResolvedSize::translate`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChartError, ChartResult};

/// Padding applied on every side unless a per-side override is given.
pub const DEFAULT_PADDING: f64 = 40.0;

/// Pixel size used when a dimension is not configured at all.
pub const DEFAULT_LENGTH_PX: f64 = 500.0;

/// A configured container dimension.
///
/// Numbers and numeric strings are pixels. Other strings are percentages of
/// the measured host box (`"50%"` is half of it); a string that does not
/// parse as a percentage falls back to the full measured size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawLength", into = "RawLength")]
pub enum Length {
    /// Whatever the host measures.
    Auto,
    Pixels(f64),
    /// Fraction of the measured size, `1.0` being all of it.
    Percent(f64),
}

impl Default for Length {
    fn default() -> Self {
        Self::Pixels(DEFAULT_LENGTH_PX)
    }
}

impl Length {
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("auto") {
            return Self::Auto;
        }
        match trimmed.parse::<f64>() {
            Ok(pixels) if pixels.is_finite() => Self::Pixels(pixels),
            _ => Self::Percent(to_percent(trimmed)),
        }
    }

    #[must_use]
    pub fn is_fixed(self) -> bool {
        matches!(self, Self::Pixels(_))
    }

    /// Pixel value of this dimension, given the measured host size if any.
    #[must_use]
    pub fn resolve(self, measured: Option<f64>) -> Option<f64> {
        match self {
            Self::Pixels(pixels) => Some(pixels),
            Self::Percent(fraction) => measured.map(|size| size * fraction),
            Self::Auto => measured,
        }
    }
}

impl From<f64> for Length {
    fn from(value: f64) -> Self {
        Self::Pixels(value)
    }
}

impl From<&str> for Length {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

/// `"50%"` → `0.5`. Anything unparsable is treated as `100%`.
#[must_use]
pub fn to_percent(text: &str) -> f64 {
    let fraction = text
        .replace('%', "")
        .trim()
        .parse::<f64>()
        .map(|value| value / 100.0);
    match fraction {
        Ok(value) if value.is_finite() => value,
        _ => 1.0,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawLength {
    Pixels(f64),
    Text(String),
}

impl From<RawLength> for Length {
    fn from(raw: RawLength) -> Self {
        match raw {
            RawLength::Pixels(pixels) => Self::Pixels(pixels),
            RawLength::Text(text) => Self::parse(&text),
        }
    }
}

impl From<Length> for RawLength {
    fn from(length: Length) -> Self {
        match length {
            Length::Auto => Self::Text("auto".to_owned()),
            Length::Pixels(pixels) => Self::Pixels(pixels),
            Length::Percent(fraction) => Self::Text(format!("{}%", fraction * 100.0)),
        }
    }
}

/// General padding with optional per-side overrides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    #[serde(default = "default_padding")]
    pub all: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
}

impl Default for Padding {
    fn default() -> Self {
        Self::uniform(DEFAULT_PADDING)
    }
}

fn default_padding() -> f64 {
    DEFAULT_PADDING
}

impl Padding {
    #[must_use]
    pub fn uniform(all: f64) -> Self {
        Self {
            all,
            top: None,
            right: None,
            bottom: None,
            left: None,
        }
    }

    #[must_use]
    pub fn with_top(mut self, top: f64) -> Self {
        self.top = Some(top);
        self
    }

    #[must_use]
    pub fn with_right(mut self, right: f64) -> Self {
        self.right = Some(right);
        self
    }

    #[must_use]
    pub fn with_bottom(mut self, bottom: f64) -> Self {
        self.bottom = Some(bottom);
        self
    }

    #[must_use]
    pub fn with_left(mut self, left: f64) -> Self {
        self.left = Some(left);
        self
    }

    #[must_use]
    pub fn top(self) -> f64 {
        self.top.unwrap_or(self.all)
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.right.unwrap_or(self.all)
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.bottom.unwrap_or(self.all)
    }

    #[must_use]
    pub fn left(self) -> f64 {
        self.left.unwrap_or(self.all)
    }

    fn validate(self) -> ChartResult<Self> {
        for (side, value) in [
            ("top", self.top()),
            ("right", self.right()),
            ("bottom", self.bottom()),
            ("left", self.left()),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidDimension(format!(
                    "{side} padding must be finite and >= 0, got {value}"
                )));
            }
        }
        Ok(self)
    }
}

/// Size of the host box as measured after mount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasuredBox {
    pub width: f64,
    pub height: f64,
}

impl MeasuredBox {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Drawable area left after padding.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InnerSize {
    pub width: f64,
    pub height: f64,
}

impl InnerSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Outer box in pixels together with its padding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSize {
    pub width: f64,
    pub height: f64,
    pub padding: Padding,
}

impl ResolvedSize {
    /// `width - left - right` by `height - top - bottom`, never negative.
    #[must_use]
    pub fn inner(&self) -> InnerSize {
        InnerSize {
            width: (self.width - self.padding.left() - self.padding.right()).max(0.0),
            height: (self.height - self.padding.top() - self.padding.bottom()).max(0.0),
        }
    }

    /// Offset that moves inner-space coordinates into the outer box.
    #[must_use]
    pub fn translate(&self) -> (f64, f64) {
        (self.padding.left(), self.padding.top())
    }
}

/// Outcome of a sizing pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeResolution {
    Ready(ResolvedSize),
    /// A relative dimension is waiting for the host measurement.
    NeedsMeasurement,
}

impl SizeResolution {
    #[must_use]
    pub fn ready(self) -> Option<ResolvedSize> {
        match self {
            Self::Ready(size) => Some(size),
            Self::NeedsMeasurement => None,
        }
    }
}

/// Turns configured dimensions into pixels, waiting for a host measurement
/// when either dimension is relative.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerSizer {
    width: Length,
    height: Length,
    padding: Padding,
    measured: Option<MeasuredBox>,
}

impl ContainerSizer {
    pub fn new(width: Length, height: Length, padding: Padding) -> ChartResult<Self> {
        for (name, length) in [("width", width), ("height", height)] {
            match length {
                Length::Pixels(pixels) if !pixels.is_finite() || pixels < 0.0 => {
                    return Err(ChartError::InvalidDimension(format!(
                        "{name} must be finite and >= 0, got {pixels}"
                    )));
                }
                Length::Percent(fraction) if !fraction.is_finite() || fraction < 0.0 => {
                    return Err(ChartError::InvalidDimension(format!(
                        "{name} percentage must be finite and >= 0, got {fraction}"
                    )));
                }
                _ => {}
            }
        }
        Ok(Self {
            width,
            height,
            padding: padding.validate()?,
            measured: None,
        })
    }

    #[must_use]
    pub fn width(&self) -> Length {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> Length {
        self.height
    }

    #[must_use]
    pub fn padding(&self) -> Padding {
        self.padding
    }

    #[must_use]
    pub fn measured(&self) -> Option<MeasuredBox> {
        self.measured
    }

    /// Whether the host has to measure its box before the chart can draw.
    #[must_use]
    pub fn needs_measurement(&self) -> bool {
        !(self.width.is_fixed() && self.height.is_fixed())
    }

    /// Resolves both dimensions against `measured`.
    ///
    /// Fixed dimensions are ready at once. Relative ones need a measurement
    /// that yields a positive size on both axes.
    #[must_use]
    pub fn resolve(&self, measured: Option<MeasuredBox>) -> SizeResolution {
        let width = self.width.resolve(measured.map(|rect| rect.width));
        let height = self.height.resolve(measured.map(|rect| rect.height));
        match (width, height) {
            (Some(width), Some(height))
                if !self.needs_measurement() || (width > 0.0 && height > 0.0) =>
            {
                SizeResolution::Ready(ResolvedSize {
                    width,
                    height,
                    padding: self.padding,
                })
            }
            _ => SizeResolution::NeedsMeasurement,
        }
    }

    /// Resolves against the last stored measurement.
    #[must_use]
    pub fn current(&self) -> SizeResolution {
        self.resolve(self.measured)
    }

    /// Stores a post-mount measurement.
    ///
    /// Returns `true` when the stored box changed and the chart must render
    /// once more with the resolved size.
    pub fn set_measured(&mut self, measured: MeasuredBox) -> ChartResult<bool> {
        if !measured.width.is_finite() || !measured.height.is_finite() {
            return Err(ChartError::InvalidDimension(
                "measured box must be finite".to_owned(),
            ));
        }
        if self.measured == Some(measured) {
            return Ok(false);
        }
        debug!(
            width = measured.width,
            height = measured.height,
            "container measured"
        );
        self.measured = Some(measured);
        Ok(self.needs_measurement())
    }
}

#[cfg(test)]
mod tests {
    use super::{Length, to_percent};

    #[test]
    fn percent_strings_parse_to_fractions() {
        assert_eq!(to_percent("50%"), 0.5);
        assert_eq!(to_percent("bogus"), 1.0);
        assert_eq!(Length::parse("300"), Length::Pixels(300.0));
        assert_eq!(Length::parse("auto"), Length::Auto);
    }
}
