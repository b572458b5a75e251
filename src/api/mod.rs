mod chart;
mod chart_config;
mod chart_presets;
mod json_contract;
mod render_context;
mod scale_binding;

pub use chart::{Chart, ChartFrame, TickReport, Tooltip};
pub use chart_config::ChartConfig;
pub use chart_presets::{ChartKind, order_mapper, scale_binding};
pub use json_contract::{CHART_CONFIG_JSON_SCHEMA_V1, ChartConfigJsonContractV1};
pub use render_context::{RenderContext, ResolvedAxis};
pub use scale_binding::{AxisBinding, DataMapper, ScaleBinding};
