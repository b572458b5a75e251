use std::fmt;

use tracing::{debug, trace};

use crate::core::{
    Axis, DataPoint, DomainSpec, Field, RangeSpec, Scale, ScaleKind, resolve_bandwidth,
};
use crate::error::ChartResult;
use crate::layout::InnerSize;
use crate::render::ChartLayer;

use super::render_context::{RenderContext, ResolvedAxis};

/// Per-record transform applied before any domain is computed.
pub type DataMapper = dyn Fn(DataPoint, usize) -> DataPoint;

/// Scale template plus the rules that bind it for one axis.
pub struct AxisBinding {
    scale: Scale,
    domain: DomainSpec,
    range: RangeSpec,
    bandwidth: Option<f64>,
}

impl AxisBinding {
    #[must_use]
    pub fn new(scale: Scale) -> Self {
        Self {
            scale,
            domain: DomainSpec::Auto,
            range: RangeSpec::Auto,
            bandwidth: None,
        }
    }

    #[must_use]
    pub fn from_kind(kind: ScaleKind) -> Self {
        Self::new(Scale::from_kind(kind))
    }

    #[must_use]
    pub fn band() -> Self {
        Self::new(Scale::band())
    }

    #[must_use]
    pub fn linear() -> Self {
        Self::new(Scale::linear())
    }

    #[must_use]
    pub fn with_domain(mut self, domain: DomainSpec) -> Self {
        self.domain = domain;
        self
    }

    #[must_use]
    pub fn with_range(mut self, range: RangeSpec) -> Self {
        self.range = range;
        self
    }

    #[must_use]
    pub fn with_bandwidth(mut self, bandwidth: f64) -> Self {
        self.bandwidth = Some(bandwidth);
        self
    }

    #[must_use]
    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    #[must_use]
    pub fn domain(&self) -> &DomainSpec {
        &self.domain
    }

    #[must_use]
    pub fn range(&self) -> &RangeSpec {
        &self.range
    }

    #[must_use]
    pub fn bandwidth(&self) -> Option<f64> {
        self.bandwidth
    }

    /// Binds a fresh copy of the scale for `axis`.
    ///
    /// The order is fixed: domain, scale domain, ticks, bandwidth, range,
    /// scale range. Ticks are the domain itself when it has more than two
    /// entries and the scale's own ticks otherwise. An empty domain has no
    /// ticks, which collapses the bandwidth to 0.
    pub fn resolve(
        &self,
        axis: Axis,
        data: &[DataPoint],
        distance: f64,
    ) -> ChartResult<ResolvedAxis> {
        let domain = self.domain.resolve(axis, data);
        let mut scale = self.scale.clone();
        scale.set_domain(&domain)?;

        let ticks = match domain.len() {
            0 => Vec::new(),
            1 | 2 => scale.ticks(),
            _ => domain,
        };
        let bandwidth = resolve_bandwidth(self.bandwidth, ticks.len(), distance);
        let range = self.range.resolve(axis, bandwidth, &ticks, distance);
        scale.set_range(range.0, range.1);

        debug!(
            axis = %axis,
            kind = %scale.kind(),
            tick_count = ticks.len(),
            bandwidth,
            range_start = range.0,
            range_end = range.1,
            "axis resolved"
        );
        Ok(ResolvedAxis {
            scale,
            ticks,
            bandwidth,
            range,
        })
    }
}

impl fmt::Debug for AxisBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisBinding")
            .field("scale", &self.scale.kind())
            .field("domain", &self.domain)
            .field("range", &self.range)
            .field("bandwidth", &self.bandwidth)
            .finish()
    }
}

/// Shared scale/domain pipeline every chart runs before drawing.
///
/// Data goes through the mappers, then the legacy axis-name remap, then each
/// bound axis is resolved independently. Axes without a binding (donut-style
/// charts) are left out of the context.
#[derive(Default)]
pub struct ScaleBinding {
    mappers: Vec<Option<Box<DataMapper>>>,
    axis_names: Option<(Field, Field)>,
    x: Option<AxisBinding>,
    y: Option<AxisBinding>,
}

impl ScaleBinding {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_mapper<F>(mut self, mapper: F) -> Self
    where
        F: Fn(DataPoint, usize) -> DataPoint + 'static,
    {
        self.mappers.push(Some(Box::new(mapper)));
        self
    }

    /// Appends mappers in order; `None` entries are kept and skipped.
    #[must_use]
    pub fn with_mappers<I>(mut self, mappers: I) -> Self
    where
        I: IntoIterator<Item = Option<Box<DataMapper>>>,
    {
        self.mappers.extend(mappers);
        self
    }

    /// Copies `x_field` into `name` and `y_field` into `value` for every record.
    #[must_use]
    pub fn with_axis_names(mut self, x_field: impl Into<Field>, y_field: impl Into<Field>) -> Self {
        self.axis_names = Some((x_field.into(), y_field.into()));
        self
    }

    #[must_use]
    pub fn with_x(mut self, binding: AxisBinding) -> Self {
        self.x = Some(binding);
        self
    }

    #[must_use]
    pub fn with_y(mut self, binding: AxisBinding) -> Self {
        self.y = Some(binding);
        self
    }

    #[must_use]
    pub fn x(&self) -> Option<&AxisBinding> {
        self.x.as_ref()
    }

    #[must_use]
    pub fn y(&self) -> Option<&AxisBinding> {
        self.y.as_ref()
    }

    #[must_use]
    pub fn mapper_count(&self) -> usize {
        self.mappers.iter().flatten().count()
    }

    /// Runs the mappers left to right, then the axis-name remap.
    ///
    /// A record missing a remapped field keeps its current `name`/`value`.
    #[must_use]
    pub fn map_data(&self, data: &[DataPoint]) -> Vec<DataPoint> {
        let mapped = self.mappers.iter().flatten().fold(data.to_vec(), |data, mapper| {
            data.into_iter()
                .enumerate()
                .map(|(index, point)| mapper(point, index))
                .collect()
        });

        let Some((x_field, y_field)) = &self.axis_names else {
            return mapped;
        };
        trace!(x = %x_field, y = %y_field, "remapping legacy axis names");
        mapped
            .into_iter()
            .map(|mut point| {
                if let Some(name) = point.field(x_field) {
                    point.name = name;
                }
                if let Some(value) = point.field_f64(y_field) {
                    point.value = value;
                }
                point
            })
            .collect()
    }

    /// Maps the data and binds every configured axis against `inner`.
    pub fn resolve(&self, data: &[DataPoint], inner: InnerSize) -> ChartResult<RenderContext> {
        let data = self.map_data(data);
        let x = self
            .x
            .as_ref()
            .map(|binding| binding.resolve(Axis::X, &data, inner.width))
            .transpose()?;
        let y = self
            .y
            .as_ref()
            .map(|binding| binding.resolve(Axis::Y, &data, inner.height))
            .transpose()?;

        debug!(
            points = data.len(),
            has_x = x.is_some(),
            has_y = y.is_some(),
            "scale binding resolved"
        );
        Ok(RenderContext { data, x, y, inner })
    }

    /// Resolves once and lends the same context to every layer in order.
    pub fn render(
        &self,
        data: &[DataPoint],
        inner: InnerSize,
        layers: &mut [&mut dyn ChartLayer],
    ) -> ChartResult<RenderContext> {
        let context = self.resolve(data, inner)?;
        context.validate()?;
        for layer in layers.iter_mut() {
            layer.render(&context)?;
        }
        Ok(context)
    }
}

impl fmt::Debug for ScaleBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScaleBinding")
            .field("mappers", &self.mapper_count())
            .field("axis_names", &self.axis_names)
            .field("x", &self.x)
            .field("y", &self.y)
            .finish()
    }
}
