pub mod domain;
pub mod scale;
pub mod stack;
pub mod ticks;
pub mod types;

pub use domain::{
    Axis, DomainSpec, RangeSpec, auto_range, categorical_domain, default_range, nice_labels,
    numeric_domain, resolve_bandwidth,
};
pub use scale::{BandScale, LinearScale, Scale, ScaleKind};
pub use stack::{StackedPoint, distinct, group_by, group_sums, partition_by, stack};
pub use ticks::{TickThinner, linear_ticks};
pub use types::{DataPoint, Field, Key};
