//! Grouping and stacking transforms over flat record sequences.
//!
//! Every function here returns fresh vectors; inputs are never reordered or
//! mutated.

use std::collections::HashMap;
use std::hash::Hash;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{DataPoint, Field, Key};

/// A datum annotated with its cumulative stack boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedPoint {
    #[serde(flatten)]
    pub point: DataPoint,
    pub y0: f64,
    pub y1: f64,
}

impl StackedPoint {
    #[must_use]
    pub fn extent(&self) -> f64 {
        self.y1 - self.y0
    }
}

/// Partitions `items` by `key`, preserving relative order inside each
/// partition. Partitions are ordered by the first appearance of their key.
#[must_use]
pub fn partition_by<T, K, F>(items: &[T], key: F) -> Vec<Vec<T>>
where
    T: Clone,
    K: Hash + Eq,
    F: Fn(&T) -> K,
{
    let mut partitions: IndexMap<K, Vec<T>> = IndexMap::new();
    for item in items {
        partitions.entry(key(item)).or_default().push(item.clone());
    }
    partitions.into_values().collect()
}

/// Groups data by a field. Records missing the field share one partition.
#[must_use]
pub fn group_by(data: &[DataPoint], key: &Field) -> Vec<Vec<DataPoint>> {
    partition_by(data, |point| point.field(key))
}

/// Distinct values of `field` in first-occurrence order.
#[must_use]
pub fn distinct(data: &[DataPoint], field: &Field) -> Vec<Option<Key>> {
    let mut seen: IndexMap<Option<Key>, ()> = IndexMap::new();
    for point in data {
        seen.entry(point.field(field)).or_insert(());
    }
    seen.into_keys().collect()
}

/// Sums `value_field` per `group_by` partition, in partition order.
#[must_use]
pub fn group_sums(data: &[DataPoint], value_field: &Field, group_by_field: &Field) -> Vec<f64> {
    group_by(data, group_by_field)
        .iter()
        .map(|group| {
            group
                .iter()
                .filter_map(|point| point.field_f64(value_field))
                .sum()
        })
        .collect()
}

/// Stacks `value` cumulatively per `key`, visiting records in input order.
///
/// For each record `y0` is the running total of its key so far (0 when the
/// key is new) and `y1 = y0 + value`; the running total then becomes `y1`.
#[must_use]
pub fn stack(data: &[DataPoint], key: &Field) -> Vec<StackedPoint> {
    let (stacked, _totals) = data.iter().fold(
        (Vec::with_capacity(data.len()), HashMap::<Option<Key>, f64>::new()),
        |(mut stacked, mut totals), point| {
            let running = totals.entry(point.field(key)).or_insert(0.0);
            let y0 = *running;
            let y1 = y0 + point.value;
            *running = y1;
            stacked.push(StackedPoint {
                point: point.clone(),
                y0,
                y1,
            });
            (stacked, totals)
        },
    );
    stacked
}

#[cfg(test)]
mod tests {
    use super::{partition_by, stack};
    use crate::core::types::{DataPoint, Field};

    #[test]
    fn partition_keeps_first_appearance_order() {
        let groups = partition_by(&[3, 1, 4, 1, 5, 9, 2, 6], |v| v % 2);
        assert_eq!(groups, vec![vec![3, 1, 1, 5, 9], vec![4, 2, 6]]);
    }

    #[test]
    fn stack_interleaved_keys_keep_independent_totals() {
        let data = vec![
            DataPoint::new("a", 1.0),
            DataPoint::new("b", 10.0),
            DataPoint::new("a", 2.0),
            DataPoint::new("b", 20.0),
        ];
        let stacked = stack(&data, &Field::Name);
        let spans: Vec<(f64, f64)> = stacked.iter().map(|p| (p.y0, p.y1)).collect();
        assert_eq!(spans, vec![(0.0, 1.0), (0.0, 10.0), (1.0, 3.0), (10.0, 30.0)]);
    }
}
