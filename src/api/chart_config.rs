use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{DataPoint, Key, ScaleKind};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{DEFAULT_HOVER_DEBOUNCE_MS, SelectedIndices, SelectionOverride};
use crate::layout::hit_region::DEFAULT_LEAVE_CHECK_DELAY_MS;
use crate::layout::{Length, Padding};

use super::chart_presets::ChartKind;

/// Declarative chart specification.
///
/// This type is serializable so hosts can persist or ship chart setups as
/// JSON; see [`ChartConfig::from_json_compat_str`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub kind: ChartKind,
    #[serde(default)]
    pub width: Length,
    #[serde(default)]
    pub height: Length,
    #[serde(default)]
    pub padding: Padding,
    /// Swaps the band and linear axes.
    #[serde(default)]
    pub pivot: bool,
    /// Literal domain of the value axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<Vec<Key>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_domain: Option<Vec<Key>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_domain: Option<Vec<Key>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_range: Option<(f64, f64)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_range: Option<(f64, f64)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_bandwidth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_bandwidth: Option<f64>,
    /// Legacy field names copied into `name` (x) and `value` (y). Only
    /// applied when both are set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_axis_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis_name: Option<String>,
    /// Scale kind names (`band`, `linear`) overriding the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_scale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_scale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_indices: Option<SelectedIndices>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_data: Option<Vec<DataPoint>>,
    #[serde(default = "default_hover_debounce_ms")]
    pub hover_debounce_ms: u64,
    #[serde(default = "default_leave_check_delay_ms")]
    pub leave_check_delay_ms: u64,
    /// Free-form style overrides merged over the preset's defaults.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub styles: Value,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::new(ChartKind::default())
    }
}

impl ChartConfig {
    #[must_use]
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            width: Length::default(),
            height: Length::default(),
            padding: Padding::default(),
            pivot: false,
            range: None,
            x_domain: None,
            y_domain: None,
            x_range: None,
            y_range: None,
            x_bandwidth: None,
            y_bandwidth: None,
            x_axis_name: None,
            y_axis_name: None,
            x_scale: None,
            y_scale: None,
            selected_indices: None,
            selected_data: None,
            hover_debounce_ms: default_hover_debounce_ms(),
            leave_check_delay_ms: default_leave_check_delay_ms(),
            styles: Value::Null,
        }
    }

    #[must_use]
    pub fn with_size(mut self, width: impl Into<Length>, height: impl Into<Length>) -> Self {
        self.width = width.into();
        self.height = height.into();
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_pivot(mut self, pivot: bool) -> Self {
        self.pivot = pivot;
        self
    }

    /// Sets a literal value-axis domain.
    #[must_use]
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.range = Some(vec![Key::number(min), Key::number(max)]);
        self
    }

    #[must_use]
    pub fn with_x_domain(mut self, domain: Vec<Key>) -> Self {
        self.x_domain = Some(domain);
        self
    }

    #[must_use]
    pub fn with_y_domain(mut self, domain: Vec<Key>) -> Self {
        self.y_domain = Some(domain);
        self
    }

    #[must_use]
    pub fn with_x_range(mut self, start: f64, end: f64) -> Self {
        self.x_range = Some((start, end));
        self
    }

    #[must_use]
    pub fn with_y_range(mut self, start: f64, end: f64) -> Self {
        self.y_range = Some((start, end));
        self
    }

    #[must_use]
    pub fn with_bandwidths(mut self, x: Option<f64>, y: Option<f64>) -> Self {
        self.x_bandwidth = x;
        self.y_bandwidth = y;
        self
    }

    #[must_use]
    pub fn with_axis_names(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_axis_name = Some(x.into());
        self.y_axis_name = Some(y.into());
        self
    }

    #[must_use]
    pub fn with_scales(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_scale = Some(x.into());
        self.y_scale = Some(y.into());
        self
    }

    #[must_use]
    pub fn with_selected_indices(mut self, selected: SelectedIndices) -> Self {
        self.selected_indices = Some(selected);
        self
    }

    #[must_use]
    pub fn with_selected_data(mut self, selected: Vec<DataPoint>) -> Self {
        self.selected_data = Some(selected);
        self
    }

    #[must_use]
    pub fn with_hover_debounce_ms(mut self, delay_ms: u64) -> Self {
        self.hover_debounce_ms = delay_ms;
        self
    }

    #[must_use]
    pub fn with_leave_check_delay_ms(mut self, delay_ms: u64) -> Self {
        self.leave_check_delay_ms = delay_ms;
        self
    }

    #[must_use]
    pub fn with_styles(mut self, styles: Value) -> Self {
        self.styles = styles;
        self
    }

    /// Parsed `x_scale`, if configured.
    pub fn x_scale_kind(&self) -> ChartResult<Option<ScaleKind>> {
        self.x_scale
            .as_deref()
            .map(|kind| ScaleKind::parse_for_axis("x", kind))
            .transpose()
    }

    /// Parsed `y_scale`, if configured.
    pub fn y_scale_kind(&self) -> ChartResult<Option<ScaleKind>> {
        self.y_scale
            .as_deref()
            .map(|kind| ScaleKind::parse_for_axis("y", kind))
            .transpose()
    }

    /// Controlled selection, indices taking precedence over data.
    #[must_use]
    pub fn selection_override(&self) -> Option<SelectionOverride> {
        match (&self.selected_indices, &self.selected_data) {
            (Some(indices), _) => Some(SelectionOverride::Indices(indices.clone())),
            (None, Some(data)) => Some(SelectionOverride::Data(data.clone())),
            (None, None) => None,
        }
    }

    /// Fails fast on settings no chart could honor.
    pub fn validate(&self) -> ChartResult<()> {
        self.x_scale_kind()?;
        self.y_scale_kind()?;
        for (name, bandwidth) in [("x", self.x_bandwidth), ("y", self.y_bandwidth)] {
            if let Some(bandwidth) =
                bandwidth.filter(|value| !value.is_finite() || *value < 0.0)
            {
                return Err(ChartError::InvalidDimension(format!(
                    "{name} bandwidth must be finite and >= 0, got {bandwidth}"
                )));
            }
        }
        for (name, range) in [("x", self.x_range), ("y", self.y_range)] {
            if let Some((start, end)) =
                range.filter(|(start, end)| !start.is_finite() || !end.is_finite())
            {
                return Err(ChartError::InvalidDimension(format!(
                    "{name} range must be finite, got ({start}, {end})"
                )));
            }
        }
        Ok(())
    }
}

fn default_hover_debounce_ms() -> u64 {
    DEFAULT_HOVER_DEBOUNCE_MS
}

fn default_leave_check_delay_ms() -> u64 {
    DEFAULT_LEAVE_CHECK_DELAY_MS
}
