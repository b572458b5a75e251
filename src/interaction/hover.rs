use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::debounce::Debouncer;
use super::selection::ClickedIndices;

/// Default quiet period before a tooltip change is applied.
pub const DEFAULT_HOVER_DEBOUNCE_MS: u64 = 50;

/// Where a tooltip should be anchored, in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipAnchor {
    pub index: usize,
    pub x: f64,
    pub y: f64,
}

/// Tooltip change produced once the debounce settles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TooltipUpdate {
    Show(TooltipAnchor),
    Hide,
}

/// Hovered item, hovered legend slot and the debounced tooltip.
///
/// The hover index changes immediately so shapes can highlight at once;
/// only the tooltip waits for the pointer to settle.
#[derive(Debug, Clone)]
pub struct HoverState {
    hovered: Option<usize>,
    legend_slot: Option<usize>,
    highlighted: ClickedIndices,
    tooltip: Debouncer<TooltipUpdate>,
    visible: Option<TooltipAnchor>,
}

impl Default for HoverState {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_HOVER_DEBOUNCE_MS))
    }
}

impl HoverState {
    #[must_use]
    pub fn new(debounce: Duration) -> Self {
        Self {
            hovered: None,
            legend_slot: None,
            highlighted: ClickedIndices::new(),
            tooltip: Debouncer::new(debounce),
            visible: None,
        }
    }

    #[must_use]
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    #[must_use]
    pub fn legend_slot(&self) -> Option<usize> {
        self.legend_slot
    }

    #[must_use]
    pub fn highlighted(&self) -> &[usize] {
        &self.highlighted
    }

    #[must_use]
    pub fn visible_tooltip(&self) -> Option<TooltipAnchor> {
        self.visible
    }

    #[must_use]
    pub fn tooltip_pending(&self) -> bool {
        self.tooltip.is_pending()
    }

    /// Pointer entered item `index`. With a client position a tooltip is requested.
    pub fn enter(&mut self, now: Instant, index: usize, client: Option<(f64, f64)>) {
        self.hovered = Some(index);
        self.highlighted = std::iter::once(index).collect();
        if let Some((x, y)) = client {
            self.tooltip
                .call(now, TooltipUpdate::Show(TooltipAnchor { index, x, y }));
        }
    }

    /// Pointer rests on legend entry `slot`, highlighting `items`.
    pub fn enter_legend(&mut self, slot: usize, items: ClickedIndices) {
        self.legend_slot = Some(slot);
        self.highlighted = items;
    }

    /// Pointer left an item or a legend entry.
    pub fn leave(&mut self, now: Instant) {
        self.hovered = None;
        self.legend_slot = None;
        self.highlighted.clear();
        self.tooltip.call(now, TooltipUpdate::Hide);
    }

    /// Applies a settled tooltip change.
    pub fn poll(&mut self, now: Instant) -> Option<TooltipUpdate> {
        let update = self.tooltip.poll(now)?;
        self.visible = match update {
            TooltipUpdate::Show(anchor) => Some(anchor),
            TooltipUpdate::Hide => None,
        };
        trace!(?update, "tooltip settled");
        Some(update)
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.tooltip.deadline()
    }

    pub fn clear(&mut self) {
        self.hovered = None;
        self.legend_slot = None;
        self.highlighted.clear();
        self.tooltip.cancel();
        self.visible = None;
    }
}
