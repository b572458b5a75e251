use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::core::{DataPoint, Field, StackedPoint, stack};
use crate::error::ChartResult;
use crate::events::{ChartEvent, EventMap, SELECTED_CHANGE_EVENT};
use crate::interaction::{
    ClickOutcome, ClickedIndices, HoverState, LegendLayout, Reporting, SelectedIndices,
    SelectionChange, SelectionController, SelectionOverride, SelectionVector, TooltipAnchor,
    TooltipUpdate,
};
use crate::layout::{
    BoundingRect, ContainerSizer, HitRegion, MeasuredBox, ResolvedSize, SizeResolution,
};
use crate::render::ChartLayer;
use crate::style::assign_style;

use super::chart_config::ChartConfig;
use super::chart_presets::{ChartKind, scale_binding};
use super::render_context::RenderContext;
use super::scale_binding::{DataMapper, ScaleBinding};

type SelectionCallback = Box<dyn FnMut(&SelectionChange)>;
type MouseOutCallback = Box<dyn FnMut()>;
type TooltipContent = Box<dyn Fn(&DataPoint) -> String>;

/// Tooltip ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub anchor: TooltipAnchor,
    pub content: String,
}

/// Result of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFrame {
    pub size: ResolvedSize,
    /// Padding offset applied once to the whole inner drawing.
    pub translate: (f64, f64),
    pub context: RenderContext,
    pub selection: SelectionVector,
    /// Lit legend entries, for charts with a selection legend.
    pub legend: Option<Vec<bool>>,
    pub hovered: Option<usize>,
    pub highlighted: Vec<usize>,
    /// Stack boundaries per record, for stacked charts.
    pub stacked: Option<Vec<StackedPoint>>,
    pub tooltip: Option<Tooltip>,
}

/// What happened during [`Chart::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    pub tooltip: Option<TooltipUpdate>,
    pub left_chart: bool,
}

/// One chart instance: data, scale pipeline, sizing, selection and pointer state.
///
/// The host owns time and geometry. It forwards pointer activity with the
/// current [`Instant`], calls [`tick`](Self::tick) when
/// [`next_deadline`](Self::next_deadline) passes and renders after every
/// state change.
pub struct Chart {
    config: ChartConfig,
    data: Vec<DataPoint>,
    /// `data` after the binding's mappers; rebuilt whenever either changes.
    mapped: Vec<DataPoint>,
    data_mapper: Option<Rc<DataMapper>>,
    binding: ScaleBinding,
    sizer: ContainerSizer,
    selection: SelectionController,
    legend: Option<LegendLayout>,
    hover: HoverState,
    hit_region: HitRegion,
    styles: Value,
    events: EventMap,
    layers: Vec<Box<dyn ChartLayer>>,
    on_selection_change: Option<SelectionCallback>,
    on_mouse_out: Option<MouseOutCallback>,
    tooltip: Option<TooltipContent>,
}

impl Chart {
    pub fn new(config: ChartConfig, data: Vec<DataPoint>) -> ChartResult<Self> {
        let binding = scale_binding(&config, None)?;
        let sizer = ContainerSizer::new(config.width, config.height, config.padding)?;
        let mut selection = SelectionController::new(config.kind.selection_scope(), &data);
        selection.set_override(config.selection_override());
        let styles = assign_style(&config.kind.default_styles(), &config.styles);
        let hover = HoverState::new(Duration::from_millis(config.hover_debounce_ms));
        let hit_region = HitRegion::new(Duration::from_millis(config.leave_check_delay_ms));

        let mut chart = Self {
            config,
            data,
            mapped: Vec::new(),
            data_mapper: None,
            binding,
            sizer,
            selection,
            legend: None,
            hover,
            hit_region,
            styles,
            events: EventMap::new(),
            layers: Vec::new(),
            on_selection_change: None,
            on_mouse_out: None,
            tooltip: None,
        };
        chart.remap();
        debug!(kind = ?chart.config.kind, points = chart.data.len(), "chart created");
        Ok(chart)
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        self.config.kind
    }

    #[must_use]
    pub fn data(&self) -> &[DataPoint] {
        &self.data
    }

    #[must_use]
    pub fn styles(&self) -> &Value {
        &self.styles
    }

    #[must_use]
    pub fn binding(&self) -> &ScaleBinding {
        &self.binding
    }

    /// Data after the mappers and legacy remap, as layers see it.
    #[must_use]
    pub fn mapped_data(&self) -> &[DataPoint] {
        &self.mapped
    }

    /// Replaces the data. Selection, legend and hover state start over.
    pub fn set_data(&mut self, data: Vec<DataPoint>) {
        self.data = data;
        self.selection.reset(&self.data);
        self.hover.clear();
        self.remap();
        debug!(points = self.data.len(), "chart data replaced");
    }

    /// Installs a per-record mapper that runs before the preset's own mappers.
    pub fn set_data_mapper<F>(&mut self, mapper: F) -> ChartResult<()>
    where
        F: Fn(DataPoint, usize) -> DataPoint + 'static,
    {
        let mapper: Rc<DataMapper> = Rc::new(mapper);
        self.binding = scale_binding(&self.config, Some(Rc::clone(&mapper)))?;
        self.data_mapper = Some(mapper);
        self.remap();
        Ok(())
    }

    #[must_use]
    pub fn has_data_mapper(&self) -> bool {
        self.data_mapper.is_some()
    }

    /// Replaces the style overrides, merged over the preset defaults.
    pub fn set_styles(&mut self, overrides: Value) {
        self.styles = assign_style(&self.config.kind.default_styles(), &overrides);
        self.config.styles = overrides;
    }

    pub fn set_selected_indices(&mut self, selected: Option<SelectedIndices>) {
        self.config.selected_indices = selected;
        self.selection.set_override(self.config.selection_override());
    }

    pub fn set_selected_data(&mut self, selected: Option<Vec<DataPoint>>) {
        self.config.selected_data = selected;
        self.selection.set_override(self.config.selection_override());
    }

    #[must_use]
    pub fn selection_override(&self) -> Option<&SelectionOverride> {
        self.selection.controlled()
    }

    /// The selection shapes are drawn with.
    #[must_use]
    pub fn selection(&self) -> SelectionVector {
        self.selection.current(&self.data)
    }

    #[must_use]
    pub fn legend_selection(&self) -> Option<Vec<bool>> {
        let legend = self.legend.as_ref()?;
        Some(legend.legend_vector(&self.selection()))
    }

    #[must_use]
    pub fn legend(&self) -> Option<&LegendLayout> {
        self.legend.as_ref()
    }

    pub fn set_events(&mut self, events: EventMap) {
        self.events = events;
    }

    /// Handlers to attach to shapes: the host's events minus the legacy
    /// selection callback.
    #[must_use]
    pub fn shape_events(&self) -> EventMap {
        self.events.without_selected_change()
    }

    pub fn on_selection_change<F>(&mut self, callback: F)
    where
        F: FnMut(&SelectionChange) + 'static,
    {
        self.on_selection_change = Some(Box::new(callback));
    }

    pub fn on_mouse_out<F>(&mut self, callback: F)
    where
        F: FnMut() + 'static,
    {
        self.on_mouse_out = Some(Box::new(callback));
    }

    pub fn set_tooltip<F>(&mut self, content: F)
    where
        F: Fn(&DataPoint) -> String + 'static,
    {
        self.tooltip = Some(Box::new(content));
    }

    pub fn add_layer(&mut self, layer: Box<dyn ChartLayer>) {
        self.layers.push(layer);
    }

    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    #[must_use]
    pub fn size(&self) -> SizeResolution {
        self.sizer.current()
    }

    /// Stores the host's post-mount measurement. Returns `true` when the
    /// chart must render again with the resolved size.
    pub fn set_measured(&mut self, measured: MeasuredBox) -> ChartResult<bool> {
        self.sizer.set_measured(measured)
    }

    /// Resolves scales and hands the context to every layer.
    ///
    /// Returns `None` while a relative size still waits for a measurement.
    pub fn render(&mut self) -> ChartResult<Option<ChartFrame>> {
        let SizeResolution::Ready(size) = self.sizer.current() else {
            trace!("render deferred until container is measured");
            return Ok(None);
        };

        let context = self.binding.resolve(&self.data, size.inner())?;
        context.validate()?;
        for layer in &mut self.layers {
            layer.render(&context)?;
        }

        let stacked = self
            .config
            .kind
            .is_stacked()
            .then(|| stack(&context.data, &Field::Name));
        let tooltip = self.tooltip_for(&context.data);
        Ok(Some(ChartFrame {
            size,
            translate: size.translate(),
            selection: self.selection(),
            legend: self.legend_selection(),
            hovered: self.hover.hovered(),
            highlighted: self.hover.highlighted().to_vec(),
            stacked,
            tooltip,
            context,
        }))
    }

    /// Click on item `index` (a record, or a series for line charts).
    pub fn click(&mut self, index: usize) -> ClickOutcome {
        let reporting = self.reporting();
        let outcome = self.selection.click(&self.data, index, reporting);
        self.deliver(&outcome);
        if self.selection.scope().is_per_series() {
            self.dispatch_series("onClick", index);
        } else {
            self.dispatch_shape("onClick", index, None);
        }
        outcome
    }

    /// Click on legend entry `slot` of a grouped chart.
    pub fn click_legend(&mut self, slot: usize) -> ClickOutcome {
        let Some(legend) = &self.legend else {
            warn!(slot, "legend click on a chart without a selection legend");
            return ClickOutcome::Ignored;
        };
        if slot >= legend.slot_count() {
            warn!(slot, slots = legend.slot_count(), "legend click on unknown slot ignored");
            return ClickOutcome::Ignored;
        }
        let current = self.selection.current(&self.data);
        let next = legend.click(&current, slot);
        let clicked: ClickedIndices = legend.hover(slot);

        let reporting = self.reporting();
        let outcome = self.selection.report(&self.data, clicked, next, reporting);
        self.deliver(&outcome);
        self.events.dispatch("onClick", &ChartEvent::Legend { slot });
        outcome
    }

    /// Pointer entered item `index`; `client` anchors the tooltip.
    pub fn hover(&mut self, now: Instant, index: usize, client: Option<(f64, f64)>) {
        let client = client.filter(|_| self.tooltip.is_some());
        self.hover.enter(now, index, client);
        self.hit_region.pointer_over(now);
        self.dispatch_shape("onMouseOver", index, client);
    }

    /// Pointer rests on legend entry `slot`: every record of the slot is highlighted.
    pub fn hover_legend(&mut self, now: Instant, slot: usize) -> Vec<usize> {
        let Some(legend) = &self.legend else {
            return Vec::new();
        };
        let items = legend.hover(slot);
        let highlighted = items.to_vec();
        self.hover.enter_legend(slot, items);
        self.hit_region.pointer_over(now);
        self.events.dispatch("onMouseOver", &ChartEvent::Legend { slot });
        highlighted
    }

    /// Pointer left an item or legend entry.
    pub fn leave(&mut self, now: Instant) {
        let hovered = self.hover.hovered();
        self.hover.leave(now);
        if let Some(index) = hovered {
            self.dispatch_shape("onMouseLeave", index, None);
        }
    }

    /// Window-level pointer position, used to detect leaving the chart.
    pub fn pointer_move(&mut self, now: Instant, x: f64, y: f64) {
        self.hit_region.pointer_move(now, x, y);
    }

    /// Starts listening for window-level pointer moves.
    pub fn mount(&mut self) {
        self.hit_region.mount();
    }

    pub fn unmount(&mut self) {
        self.hit_region.unmount();
        self.hover.clear();
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.hit_region.is_listening()
    }

    /// Earliest instant at which [`tick`](Self::tick) has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.hover.next_deadline(), self.hit_region.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Runs due timers. `measure` is asked for the element's bounding rect
    /// when the deferred measurement fires.
    pub fn tick<F>(&mut self, now: Instant, measure: F) -> TickReport
    where
        F: FnOnce() -> Option<BoundingRect>,
    {
        let tooltip = self.hover.poll(now);
        let left_chart = match self.sizer.current() {
            SizeResolution::Ready(size) => self.hit_region.poll(now, &size, measure),
            SizeResolution::NeedsMeasurement => false,
        };
        if left_chart {
            if let Some(callback) = self.on_mouse_out.as_mut() {
                callback();
            }
        }
        TickReport {
            tooltip,
            left_chart,
        }
    }

    #[must_use]
    pub fn hit_region(&self) -> &HitRegion {
        &self.hit_region
    }

    #[must_use]
    pub fn hover_state(&self) -> &HoverState {
        &self.hover
    }

    fn reporting(&self) -> Reporting {
        if self.on_selection_change.is_some() {
            Reporting::Callback
        } else if self.events.contains(SELECTED_CHANGE_EVENT) {
            Reporting::Legacy
        } else {
            Reporting::Internal
        }
    }

    fn deliver(&mut self, outcome: &ClickOutcome) {
        match outcome {
            ClickOutcome::Changed(change) => {
                if let Some(callback) = self.on_selection_change.as_mut() {
                    callback(change);
                }
            }
            ClickOutcome::Annotated(annotated) => {
                self.events.dispatch(
                    SELECTED_CHANGE_EVENT,
                    &ChartEvent::SelectedChange(annotated.clone()),
                );
            }
            ClickOutcome::Updated(_) | ClickOutcome::Ignored => {}
        }
    }

    fn dispatch_shape(&self, name: &str, index: usize, client: Option<(f64, f64)>) {
        if !self.events.contains(name) {
            return;
        }
        let datum = self.mapped.get(index).cloned();
        self.events
            .dispatch(name, &ChartEvent::Shape { index, datum, client });
    }

    fn dispatch_series(&self, name: &str, index: usize) {
        if !self.events.contains(name) {
            return;
        }
        // Series are numbered over the raw data, as the selection numbers them.
        let scope = self.selection.scope();
        let key = scope.series_key(&self.data, index);
        let data = scope
            .item_of_each(&self.data)
            .into_iter()
            .zip(&self.mapped)
            .filter(|(item, _)| *item == index)
            .map(|(_, point)| point.clone())
            .collect();
        self.events
            .dispatch(name, &ChartEvent::Series { index, key, data });
    }

    fn tooltip_for(&self, data: &[DataPoint]) -> Option<Tooltip> {
        let content = self.tooltip.as_ref()?;
        let anchor = self.hover.visible_tooltip()?;
        let datum = data.get(anchor.index)?;
        Some(Tooltip {
            anchor,
            content: content(datum),
        })
    }

    fn remap(&mut self) {
        self.mapped = self.binding.map_data(&self.data);
        self.legend = self
            .config
            .kind
            .legend_category()
            .map(|category| LegendLayout::new(&self.mapped, &category));
    }
}

impl fmt::Debug for Chart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chart")
            .field("kind", &self.config.kind)
            .field("points", &self.data.len())
            .field("binding", &self.binding)
            .field("selection", &self.selection)
            .field("layers", &self.layers.len())
            .finish_non_exhaustive()
    }
}
