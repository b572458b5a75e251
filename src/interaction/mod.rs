pub mod debounce;
pub mod hover;
pub mod legend_selection;
pub mod selection;

pub use debounce::Debouncer;
pub use hover::{DEFAULT_HOVER_DEBOUNCE_MS, HoverState, TooltipAnchor, TooltipUpdate};
pub use legend_selection::LegendLayout;
pub use selection::{
    ClickOutcome, ClickedIndices, Reporting, SelectedDatum, SelectedIndices, SelectedList,
    SelectionChange, SelectionController, SelectionOverride, SelectionScope, SelectionVector,
    toggle_selection,
};
