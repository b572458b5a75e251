use chart_kit::core::{
    DataPoint, Field, Key, categorical_domain, numeric_domain, resolve_bandwidth, stack,
};
use proptest::prelude::*;

fn records() -> impl Strategy<Value = Vec<DataPoint>> {
    prop::collection::vec((0_u8..6, -1_000.0f64..1_000.0), 0..48).prop_map(|rows| {
        rows.into_iter()
            .map(|(name, value)| DataPoint::new(format!("k{name}"), value))
            .collect()
    })
}

proptest! {
    #[test]
    fn numeric_domain_is_deterministic_and_covers_max(data in records()) {
        let first = numeric_domain(&data, &Field::Value, None);
        let second = numeric_domain(&data, &Field::Value, None);
        prop_assert_eq!(&first, &second);
        if data.is_empty() {
            prop_assert!(first.is_empty());
            return Ok(());
        }
        prop_assert_eq!(first.len(), 2);
        prop_assert_eq!(&first[0], &Key::number(0.0));

        let upper = first[1].as_f64().expect("numeric upper bound");
        if let Some(max) = data.iter().map(|point| point.value).reduce(f64::max) {
            if max > 0.0 {
                prop_assert!(upper >= max);
            }
        }
    }

    #[test]
    fn categorical_domain_is_distinct_and_deterministic(data in records()) {
        let domain = categorical_domain(&data, &Field::Name);
        prop_assert_eq!(&domain, &categorical_domain(&data, &Field::Name));
        for (index, key) in domain.iter().enumerate() {
            prop_assert!(!domain[index + 1..].contains(key));
        }
        prop_assert!(data.iter().all(|point| domain.contains(&point.name)));
    }

    #[test]
    fn stacking_chains_running_totals(data in records()) {
        let stacked = stack(&data, &Field::Name);
        prop_assert_eq!(stacked.len(), data.len());

        for (index, point) in stacked.iter().enumerate() {
            prop_assert!((point.extent() - point.point.value).abs() <= 1e-9);
            let previous = stacked[..index]
                .iter()
                .rev()
                .find(|candidate| candidate.point.name == point.point.name);
            match previous {
                Some(previous) => prop_assert!((point.y0 - previous.y1).abs() <= 1e-9),
                None => prop_assert_eq!(point.y0, 0.0),
            }
        }
    }

    #[test]
    fn bandwidth_is_never_negative_or_nan(
        tick_count in 0_usize..64,
        distance in -10_000.0f64..10_000.0,
    ) {
        let bandwidth = resolve_bandwidth(None, tick_count, distance);
        prop_assert!(bandwidth.is_finite());
        prop_assert!(bandwidth >= 0.0);
    }
}
