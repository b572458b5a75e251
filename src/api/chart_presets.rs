//! Per-chart wiring of the shared scale pipeline.
//!
//! Each preset decides which axis is categorical, how the value axis is
//! autoscaled, what counts as one selectable item and whether a legend
//! drives the selection.

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::core::{DataPoint, DomainSpec, Field, RangeSpec, Scale, ScaleKind};
use crate::error::ChartResult;
use crate::interaction::SelectionScope;

use super::chart_config::ChartConfig;
use super::scale_binding::{AxisBinding, DataMapper, ScaleBinding};

/// Chart families sharing the scale pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    #[default]
    Bar,
    GroupBar,
    StackedBar,
    Line,
    StackedLine,
    Donut,
}

impl ChartKind {
    #[must_use]
    pub fn has_axes(self) -> bool {
        !matches!(self, Self::Donut)
    }

    #[must_use]
    pub fn is_stacked(self) -> bool {
        matches!(self, Self::StackedBar | Self::StackedLine)
    }

    /// Line charts select whole series; everything else selects records.
    #[must_use]
    pub fn selection_scope(self) -> SelectionScope {
        match self {
            Self::Line | Self::StackedLine => SelectionScope::PerSeries(Field::Group),
            Self::Bar | Self::GroupBar | Self::StackedBar | Self::Donut => {
                SelectionScope::PerDatum
            }
        }
    }

    /// Category field whose partitions define legend slots.
    #[must_use]
    pub fn legend_category(self) -> Option<Field> {
        match self {
            Self::GroupBar => Some(Field::Name),
            _ => None,
        }
    }

    /// Charts that recover record identity through `order` after mapping.
    #[must_use]
    pub fn tracks_order(self) -> bool {
        matches!(self, Self::GroupBar | Self::StackedBar)
    }

    /// Autoscaled value-axis domain. Stacked charts fit the per-category totals.
    #[must_use]
    pub fn value_domain(self) -> DomainSpec {
        if self.is_stacked() {
            DomainSpec::numeric(Field::Value, Some(Field::Name))
        } else {
            DomainSpec::numeric(Field::Value, None)
        }
    }

    #[must_use]
    pub fn default_styles(self) -> Value {
        match self {
            Self::Bar => json!({ "bar": {} }),
            Self::GroupBar => json!({ "groupBar": {}, "legend": {} }),
            Self::StackedBar => json!({ "stackedBar": {} }),
            Self::Line => json!({ "line": {}, "dot": {}, "legend": {} }),
            Self::StackedLine => json!({ "stackedLine": {}, "legend": {} }),
            Self::Donut => json!({ "donut": {} }),
        }
    }
}

/// Assigns `order = index` to records that carry no order yet.
pub fn order_mapper(mut point: DataPoint, index: usize) -> DataPoint {
    if point.order.is_none() {
        point.order = Some(index);
    }
    point
}

/// Builds the scale pipeline for `config`.
///
/// The band axis carries the categorical `name` domain and the linear axis
/// the value domain; `pivot` swaps them. Explicit domains, ranges,
/// bandwidths and scale kinds in the config win over the preset.
pub fn scale_binding(
    config: &ChartConfig,
    data_mapper: Option<Rc<DataMapper>>,
) -> ChartResult<ScaleBinding> {
    config.validate()?;
    let kind = config.kind;

    let user_mapper = data_mapper.map(|mapper| {
        let boxed: Box<DataMapper> =
            Box::new(move |point: DataPoint, index: usize| mapper(point, index));
        boxed
    });
    let order: Option<Box<DataMapper>> = if kind.tracks_order() {
        Some(Box::new(order_mapper))
    } else {
        None
    };
    let mut binding = ScaleBinding::new().with_mappers([user_mapper, order]);

    if let (Some(x_name), Some(y_name)) = (&config.x_axis_name, &config.y_axis_name) {
        binding = binding.with_axis_names(x_name.as_str(), y_name.as_str());
    }
    if !kind.has_axes() {
        return Ok(binding);
    }

    let category_domain = || DomainSpec::categorical(Field::Name);
    let value_domain = || match &config.range {
        Some(range) => DomainSpec::Literal(range.clone()),
        None => kind.value_domain(),
    };
    let (x_kind, x_domain, y_kind, y_domain) = if config.pivot {
        (ScaleKind::Linear, value_domain(), ScaleKind::Band, category_domain())
    } else {
        (ScaleKind::Band, category_domain(), ScaleKind::Linear, value_domain())
    };

    let x = axis_binding(
        config.x_scale_kind()?.unwrap_or(x_kind),
        config.x_domain.clone().map_or(x_domain, DomainSpec::Literal),
        config.x_range,
        config.x_bandwidth,
    );
    let y = axis_binding(
        config.y_scale_kind()?.unwrap_or(y_kind),
        config.y_domain.clone().map_or(y_domain, DomainSpec::Literal),
        config.y_range,
        config.y_bandwidth,
    );
    Ok(binding.with_x(x).with_y(y))
}

fn axis_binding(
    kind: ScaleKind,
    domain: DomainSpec,
    range: Option<(f64, f64)>,
    bandwidth: Option<f64>,
) -> AxisBinding {
    let mut binding = AxisBinding::new(Scale::from_kind(kind)).with_domain(domain);
    if let Some((start, end)) = range {
        binding = binding.with_range(RangeSpec::Literal(start, end));
    }
    if let Some(bandwidth) = bandwidth {
        binding = binding.with_bandwidth(bandwidth);
    }
    binding
}
