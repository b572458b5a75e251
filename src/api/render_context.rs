use crate::core::{Axis, DataPoint, Key, Scale, ScaleKind, nice_labels};
use crate::error::{ChartError, ChartResult};
use crate::layout::InnerSize;

/// One axis after domain, ticks, bandwidth and range have been bound.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAxis {
    pub scale: Scale,
    pub ticks: Vec<Key>,
    pub bandwidth: f64,
    pub range: (f64, f64),
}

impl ResolvedAxis {
    #[must_use]
    pub fn kind(&self) -> ScaleKind {
        self.scale.kind()
    }

    /// Pixel position of `key` on this axis.
    #[must_use]
    pub fn position(&self, key: &Key) -> Option<f64> {
        self.scale.map(key)
    }

    /// Centre of the slot holding `key`; continuous axes return the position itself.
    #[must_use]
    pub fn center(&self, key: &Key) -> Option<f64> {
        let position = self.position(key)?;
        match self.scale {
            Scale::Band(_) => Some(position + self.bandwidth / 2.0),
            Scale::Linear(_) => Some(position),
        }
    }

    /// Tick labels formatted to a shared number of decimals.
    #[must_use]
    pub fn tick_labels(&self) -> Vec<String> {
        nice_labels(&self.ticks)
    }

    fn validate(&self, axis: Axis) -> ChartResult<()> {
        if !self.bandwidth.is_finite() || self.bandwidth < 0.0 {
            return Err(ChartError::InvalidDimension(format!(
                "{axis} bandwidth must be finite and >= 0, got {}",
                self.bandwidth
            )));
        }
        if !self.range.0.is_finite() || !self.range.1.is_finite() {
            return Err(ChartError::InvalidDimension(format!(
                "{axis} range must be finite, got {:?}",
                self.range
            )));
        }
        Ok(())
    }
}

/// Everything a layer needs to draw: mapped data, both resolved axes and
/// the inner drawing size.
///
/// Built once per pass by [`ScaleBinding::resolve`](super::ScaleBinding::resolve)
/// and lent to each layer; layers never resolve scales themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    pub data: Vec<DataPoint>,
    pub x: Option<ResolvedAxis>,
    pub y: Option<ResolvedAxis>,
    pub inner: InnerSize,
}

impl RenderContext {
    #[must_use]
    pub fn axis(&self, axis: Axis) -> Option<&ResolvedAxis> {
        match axis {
            Axis::X => self.x.as_ref(),
            Axis::Y => self.y.as_ref(),
        }
    }

    /// Rejects contexts a layer could not draw from.
    pub fn validate(&self) -> ChartResult<()> {
        if let Some(x) = &self.x {
            x.validate(Axis::X)?;
        }
        if let Some(y) = &self.y {
            y.validate(Axis::Y)?;
        }
        Ok(())
    }
}
