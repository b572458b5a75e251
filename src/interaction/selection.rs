//! Selection state machine.
//!
//! Every selectable item carries one flag. Clicking an item toggles it,
//! except that clicking from "everything selected" isolates the item and
//! clicking the only selected item selects everything again.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::core::{DataPoint, Field, Key, distinct};

/// Index list reported for a click: usually one entry, a legend slot's worth at most.
pub type ClickedIndices = SmallVec<[usize; 4]>;

/// Indices of the selected items.
pub type SelectedList = SmallVec<[usize; 8]>;

/// Toggles `index` in `flags`.
///
/// When nothing is unselected, or `index` is the only selected entry, every
/// other entry flips and `index` keeps its state. Otherwise only `index`
/// flips. An out-of-range index leaves the flags unchanged.
#[must_use]
pub fn toggle_selection(flags: &[bool], index: usize) -> Vec<bool> {
    let Some(clicked) = flags.get(index).copied() else {
        return flags.to_vec();
    };
    let unselected = flags.iter().filter(|flag| !**flag).count();
    let all_selected = unselected == 0;
    let only_clicked_selected = clicked && unselected == flags.len() - 1;

    flags
        .iter()
        .enumerate()
        .map(|(position, flag)| {
            let flip = if all_selected || only_clicked_selected {
                position != index
            } else {
                position == index
            };
            *flag ^ flip
        })
        .collect()
}

/// One flag per selectable item.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionVector(Vec<bool>);

impl SelectionVector {
    /// Everything selected, the state after creation and after data replacement.
    #[must_use]
    pub fn all(len: usize) -> Self {
        Self(vec![true; len])
    }

    #[must_use]
    pub fn none(len: usize) -> Self {
        Self(vec![false; len])
    }

    #[must_use]
    pub fn from_flags(flags: Vec<bool>) -> Self {
        Self(flags)
    }

    /// Only the listed positions selected. Out-of-range positions are dropped.
    #[must_use]
    pub fn from_allow_list(len: usize, positions: &[usize]) -> Self {
        let mut flags = vec![false; len];
        for &position in positions {
            match flags.get_mut(position) {
                Some(flag) => *flag = true,
                None => warn!(position, len, "selected index out of range ignored"),
            }
        }
        Self(flags)
    }

    #[must_use]
    pub fn toggle(&self, index: usize) -> Self {
        Self(toggle_selection(&self.0, index))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn is_selected(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn all_selected(&self) -> bool {
        self.0.iter().all(|flag| *flag)
    }

    #[must_use]
    pub fn none_selected(&self) -> bool {
        self.0.iter().all(|flag| !*flag)
    }

    #[must_use]
    pub fn selected_indices(&self) -> SelectedList {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(index, flag)| flag.then_some(index))
            .collect()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<bool> {
        self.0
    }
}

impl From<Vec<bool>> for SelectionVector {
    fn from(flags: Vec<bool>) -> Self {
        Self(flags)
    }
}

/// Host-supplied selection, as positions or as flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectedIndices {
    /// Allow-list: only these positions are selected.
    Positions(Vec<usize>),
    Flags(Vec<bool>),
}

impl SelectedIndices {
    /// Normalizes to exactly `len` flags. Flag vectors of the wrong length are
    /// truncated or padded with `false`.
    #[must_use]
    pub fn normalize(&self, len: usize) -> SelectionVector {
        match self {
            Self::Positions(positions) => SelectionVector::from_allow_list(len, positions),
            Self::Flags(flags) => {
                if flags.len() != len {
                    warn!(given = flags.len(), len, "selection flags resized to item count");
                }
                let mut flags = flags.clone();
                flags.resize(len, false);
                SelectionVector(flags)
            }
        }
    }
}

/// What one selectable item is.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionScope {
    /// Every record is its own item.
    #[default]
    PerDatum,
    /// Records sharing a value of the field form one item (a series).
    PerSeries(Field),
}

impl SelectionScope {
    /// Series keys in first-appearance order; empty for [`Self::PerDatum`].
    fn series_keys(&self, data: &[DataPoint]) -> Vec<Option<Key>> {
        match self {
            Self::PerDatum => Vec::new(),
            Self::PerSeries(field) => distinct(data, field),
        }
    }

    #[must_use]
    pub fn item_count(&self, data: &[DataPoint]) -> usize {
        match self {
            Self::PerDatum => data.len(),
            Self::PerSeries(_) => self.series_keys(data).len(),
        }
    }

    /// Key of series `index`; `None` for flat scopes and unknown series.
    #[must_use]
    pub fn series_key(&self, data: &[DataPoint], index: usize) -> Option<Key> {
        self.series_keys(data).into_iter().nth(index).flatten()
    }

    #[must_use]
    pub fn is_per_series(&self) -> bool {
        matches!(self, Self::PerSeries(_))
    }

    /// Item index of every record, in data order.
    #[must_use]
    pub fn item_of_each(&self, data: &[DataPoint]) -> Vec<usize> {
        match self {
            Self::PerDatum => (0..data.len()).collect(),
            Self::PerSeries(field) => {
                let keys: IndexSet<Option<Key>> = self.series_keys(data).into_iter().collect();
                data.iter()
                    .map(|point| keys.get_index_of(&point.field(field)).unwrap_or(0))
                    .collect()
            }
        }
    }

    /// Records belonging to the items whose flag is set in `pick`.
    #[must_use]
    pub fn data_of(&self, data: &[DataPoint], pick: impl Fn(usize) -> bool) -> Vec<DataPoint> {
        self.item_of_each(data)
            .into_iter()
            .zip(data)
            .filter(|(item, _)| pick(*item))
            .map(|(_, point)| point.clone())
            .collect()
    }

    /// Flags for a data-based override: a flat item is selected when some
    /// selected record shares its `name`, a series when some selected record
    /// shares its series key.
    #[must_use]
    pub fn flags_for_data(&self, data: &[DataPoint], selected: &[DataPoint]) -> SelectionVector {
        match self {
            Self::PerDatum => SelectionVector(
                data.iter()
                    .map(|point| selected.iter().any(|chosen| chosen.name == point.name))
                    .collect(),
            ),
            Self::PerSeries(field) => {
                let chosen: IndexSet<Option<Key>> =
                    selected.iter().map(|point| point.field(field)).collect();
                SelectionVector(
                    self.series_keys(data)
                        .iter()
                        .map(|key| chosen.contains(key))
                        .collect(),
                )
            }
        }
    }
}

/// Controlled selection supplied by the host. While set it fully replaces
/// the internal state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionOverride {
    Indices(SelectedIndices),
    Data(Vec<DataPoint>),
}

impl SelectionOverride {
    #[must_use]
    pub fn resolve(&self, scope: &SelectionScope, data: &[DataPoint]) -> SelectionVector {
        match self {
            Self::Indices(indices) => indices.normalize(scope.item_count(data)),
            Self::Data(selected) => scope.flags_for_data(data, selected),
        }
    }
}

/// Payload of the selection-change callback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionChange {
    pub clicked: ClickedIndices,
    pub selected: SelectedList,
    pub clicked_data: Vec<DataPoint>,
    pub selected_data: Vec<DataPoint>,
}

/// A record annotated with the selection state of its item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedDatum {
    #[serde(flatten)]
    pub point: DataPoint,
    pub selected: bool,
}

/// Which channel a click is reported through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reporting {
    /// The host owns the state and receives a [`SelectionChange`].
    Callback,
    /// Legacy handler receiving every record with its `selected` flag.
    Legacy,
    /// Nobody listens; the controller updates itself.
    Internal,
}

/// Result of one click.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    Changed(SelectionChange),
    Annotated(Vec<SelectedDatum>),
    Updated(SelectionVector),
    /// The index did not name an item.
    Ignored,
}

/// Owns the internal selection vector of one chart instance.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionController {
    scope: SelectionScope,
    internal: SelectionVector,
    controlled: Option<SelectionOverride>,
}

impl SelectionController {
    #[must_use]
    pub fn new(scope: SelectionScope, data: &[DataPoint]) -> Self {
        let internal = SelectionVector::all(scope.item_count(data));
        Self {
            scope,
            internal,
            controlled: None,
        }
    }

    #[must_use]
    pub fn scope(&self) -> &SelectionScope {
        &self.scope
    }

    #[must_use]
    pub fn internal(&self) -> &SelectionVector {
        &self.internal
    }

    #[must_use]
    pub fn controlled(&self) -> Option<&SelectionOverride> {
        self.controlled.as_ref()
    }

    pub fn set_override(&mut self, selection: Option<SelectionOverride>) {
        self.controlled = selection;
    }

    /// Recreates the state for new data: everything selected again.
    pub fn reset(&mut self, data: &[DataPoint]) {
        self.internal = SelectionVector::all(self.scope.item_count(data));
        debug!(items = self.internal.len(), "selection reset");
    }

    /// Replaces the internal vector, as grouped charts do after a legend click.
    pub fn replace(&mut self, selection: SelectionVector) {
        self.internal = selection;
    }

    /// The vector to draw with: the override when set, the internal state otherwise.
    #[must_use]
    pub fn current(&self, data: &[DataPoint]) -> SelectionVector {
        match &self.controlled {
            Some(selection) => selection.resolve(&self.scope, data),
            None => self.internal.clone(),
        }
    }

    /// Applies a click on item `index` and reports it through `reporting`.
    ///
    /// Only [`Reporting::Internal`] without an override mutates the state.
    pub fn click(
        &mut self,
        data: &[DataPoint],
        index: usize,
        reporting: Reporting,
    ) -> ClickOutcome {
        let current = self.current(data);
        if index >= current.len() {
            warn!(index, items = current.len(), "click on unknown item ignored");
            return ClickOutcome::Ignored;
        }
        let next = current.toggle(index);
        debug!(index, selected = next.selected_indices().len(), "selection toggled");
        self.report(data, std::iter::once(index).collect(), next, reporting)
    }

    /// Reports an already computed vector, as produced by a legend click.
    pub fn report(
        &mut self,
        data: &[DataPoint],
        clicked: ClickedIndices,
        next: SelectionVector,
        reporting: Reporting,
    ) -> ClickOutcome {
        match reporting {
            Reporting::Callback => ClickOutcome::Changed(SelectionChange {
                clicked_data: self.scope.data_of(data, |item| clicked.contains(&item)),
                selected_data: self.scope.data_of(data, |item| next.is_selected(item)),
                selected: next.selected_indices(),
                clicked,
            }),
            Reporting::Legacy => ClickOutcome::Annotated(
                self.scope
                    .item_of_each(data)
                    .into_iter()
                    .zip(data)
                    .map(|(item, point)| SelectedDatum {
                        point: point.clone(),
                        selected: next.is_selected(item),
                    })
                    .collect(),
            ),
            Reporting::Internal => {
                if self.controlled.is_none() {
                    self.internal = next.clone();
                }
                ClickOutcome::Updated(next)
            }
        }
    }
}
