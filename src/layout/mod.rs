pub mod container;
pub mod hit_region;

pub use container::{
    ContainerSizer, DEFAULT_PADDING, InnerSize, Length, MeasuredBox, Padding, ResolvedSize,
    SizeResolution, to_percent,
};
pub use hit_region::{BoundingRect, HitRegion, inside_content_box};
