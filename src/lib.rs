//! chart-kit: scale/domain resolution and selection state for declarative charts.
//!
//! Records flow through a shared pipeline: mappers, domain resolution, scale
//! binding and stacking produce a [`api::RenderContext`] that drawing layers
//! consume. Pointer and click events flow back through the selection state
//! machine, which decides what the next pass highlights.

pub mod api;
pub mod core;
pub mod error;
pub mod events;
pub mod interaction;
pub mod layout;
pub mod render;
pub mod style;
pub mod telemetry;

pub use api::{Chart, ChartConfig, ChartKind};
pub use error::{ChartError, ChartResult};
