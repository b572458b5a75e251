mod null_layer;

pub use null_layer::NullLayer;

use crate::api::RenderContext;
use crate::error::ChartResult;

/// Contract implemented by anything that draws from a resolved chart pass.
///
/// Layers receive a fully bound [`RenderContext`] so shape code never
/// computes domains, ticks or ranges on its own.
pub trait ChartLayer {
    fn render(&mut self, context: &RenderContext) -> ChartResult<()>;
}
