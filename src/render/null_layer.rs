use crate::api::RenderContext;
use crate::error::ChartResult;
use crate::render::ChartLayer;

/// Layer that draws nothing, used by tests and headless charts.
///
/// It still validates the context so tests catch unusable bandwidths or
/// ranges before a real drawing layer is attached.
#[derive(Debug, Default)]
pub struct NullLayer {
    pub render_count: usize,
    pub last_point_count: usize,
    pub last_x_tick_count: usize,
    pub last_y_tick_count: usize,
}

impl ChartLayer for NullLayer {
    fn render(&mut self, context: &RenderContext) -> ChartResult<()> {
        context.validate()?;
        self.render_count += 1;
        self.last_point_count = context.data.len();
        self.last_x_tick_count = context.x.as_ref().map_or(0, |axis| axis.ticks.len());
        self.last_y_tick_count = context.y.as_ref().map_or(0, |axis| axis.ticks.len());
        Ok(())
    }
}
