use tracing::debug;

use crate::core::{DataPoint, Field, partition_by};

use super::selection::{ClickedIndices, SelectionVector};

/// Legend slots of a grouped chart.
///
/// Records are partitioned by a category field; a record's slot is its
/// position inside its partition, so slot `k` holds the `k`-th series of
/// every category. Each slot keeps the data indices of its records, so the
/// mapping does not depend on the data being sorted by category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LegendLayout {
    slots: Vec<Vec<usize>>,
    item_count: usize,
}

impl LegendLayout {
    #[must_use]
    pub fn new(data: &[DataPoint], category: &Field) -> Self {
        let indexed: Vec<(usize, &DataPoint)> = data.iter().enumerate().collect();
        let partitions = partition_by(&indexed, |(_, point)| point.field(category));

        let mut slots: Vec<Vec<usize>> = Vec::new();
        for partition in &partitions {
            for (slot, (data_index, _)) in partition.iter().enumerate() {
                if slots.len() <= slot {
                    slots.push(Vec::new());
                }
                slots[slot].push(*data_index);
            }
        }
        Self {
            slots,
            item_count: data.len(),
        }
    }

    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Data indices of the records in `slot`, in category order.
    #[must_use]
    pub fn items_in_slot(&self, slot: usize) -> &[usize] {
        self.slots.get(slot).map(Vec::as_slice).unwrap_or(&[])
    }

    /// A slot is lit when any of its records is selected.
    #[must_use]
    pub fn legend_vector(&self, selection: &SelectionVector) -> Vec<bool> {
        self.slots
            .iter()
            .map(|items| items.iter().any(|index| selection.is_selected(*index)))
            .collect()
    }

    /// Records to highlight while the pointer rests on a legend entry.
    #[must_use]
    pub fn hover(&self, slot: usize) -> ClickedIndices {
        self.items_in_slot(slot).iter().copied().collect()
    }

    /// Selection after clicking legend entry `slot`.
    ///
    /// From "everything selected" the slot is isolated. Otherwise the slot's
    /// records are all switched on, or all switched off when they already
    /// were on. A result with nothing selected falls back to everything.
    #[must_use]
    pub fn click(&self, selection: &SelectionVector, slot: usize) -> SelectionVector {
        let items = self.items_in_slot(slot);
        if items.is_empty() {
            return selection.clone();
        }
        let light_up = items.iter().any(|index| !selection.is_selected(*index));
        let all_lit = selection.all_selected();

        let mut flags = selection.clone().into_inner();
        flags.resize(self.item_count, false);
        for index in items {
            flags[*index] = light_up;
        }
        if all_lit {
            flags.iter_mut().for_each(|flag| *flag = !*flag);
        }
        if flags.iter().all(|flag| !*flag) {
            flags.iter_mut().for_each(|flag| *flag = true);
        }

        debug!(slot, light_up, isolate = all_lit, "legend clicked");
        SelectionVector::from_flags(flags)
    }
}
