use approx::assert_relative_eq;
use chart_kit::core::{DataPoint, Field, Key, group_by, group_sums, partition_by, stack};

#[test]
fn grouping_by_name_gives_singleton_groups() {
    let data = vec![DataPoint::new("a", 10.0), DataPoint::new("b", 20.0)];
    let groups = group_by(&data, &Field::Name);
    assert_eq!(groups, vec![vec![data[0].clone()], vec![data[1].clone()]]);
}

#[test]
fn grouping_keeps_relative_order_inside_partitions() {
    let data = vec![
        DataPoint::new("a", 1.0).with_group("x"),
        DataPoint::new("b", 2.0).with_group("y"),
        DataPoint::new("c", 3.0).with_group("x"),
        DataPoint::new("d", 4.0).with_group("y"),
        DataPoint::new("e", 5.0),
    ];
    let groups = group_by(&data, &Field::Group);
    let names: Vec<Vec<Key>> = groups
        .iter()
        .map(|group| group.iter().map(|point| point.name.clone()).collect())
        .collect();
    assert_eq!(
        names,
        vec![
            vec![Key::text("a"), Key::text("c")],
            vec![Key::text("b"), Key::text("d")],
            vec![Key::text("e")],
        ]
    );
}

#[test]
fn partition_by_works_over_any_item() {
    let words = ["apple", "avocado", "banana", "blueberry", "cherry"];
    let groups = partition_by(&words, |word| word.chars().next());
    assert_eq!(groups.len(), 3);
    assert_eq!(groups[1], vec!["banana", "blueberry"]);
}

#[test]
fn stacking_accumulates_within_a_key() {
    let data = vec![
        DataPoint::new("x", 5.0),
        DataPoint::new("x", 3.0),
        DataPoint::new("x", 2.0),
    ];
    let stacked = stack(&data, &Field::Name);
    let spans: Vec<(f64, f64)> = stacked.iter().map(|point| (point.y0, point.y1)).collect();
    assert_eq!(spans, vec![(0.0, 5.0), (5.0, 8.0), (8.0, 10.0)]);
    assert_relative_eq!(stacked[2].extent(), 2.0);
}

#[test]
fn stacking_a_singleton_starts_at_zero() {
    let stacked = stack(&[DataPoint::new("solo", 7.5)], &Field::Name);
    assert_eq!(stacked.len(), 1);
    assert_relative_eq!(stacked[0].y0, 0.0);
    assert_relative_eq!(stacked[0].y1, 7.5);
}

#[test]
fn stacking_empty_input_is_empty() {
    assert!(stack(&[], &Field::Name).is_empty());
    assert!(group_by(&[], &Field::Name).is_empty());
}

#[test]
fn stacking_does_not_touch_input_and_keeps_records() {
    let data = vec![
        DataPoint::new("a", 1.0).with_group("g1"),
        DataPoint::new("a", 2.0).with_group("g2"),
    ];
    let before = data.clone();
    let stacked = stack(&data, &Field::Name);
    assert_eq!(data, before);
    assert_eq!(stacked[1].point, data[1]);
}

#[test]
fn negative_values_stack_downwards() {
    let data = vec![DataPoint::new("a", 4.0), DataPoint::new("a", -6.0)];
    let stacked = stack(&data, &Field::Name);
    assert_relative_eq!(stacked[1].y0, 4.0);
    assert_relative_eq!(stacked[1].y1, -2.0);
}

#[test]
fn group_sums_follow_first_appearance() {
    let data = vec![
        DataPoint::new("b", 1.0),
        DataPoint::new("a", 2.0),
        DataPoint::new("b", 3.0),
    ];
    assert_eq!(group_sums(&data, &Field::Value, &Field::Name), vec![4.0, 2.0]);
}

#[test]
fn stacked_point_serializes_flat() {
    let stacked = stack(&[DataPoint::new("a", 2.0)], &Field::Name);
    let json = serde_json::to_value(&stacked[0]).expect("stacked point serializes");
    assert_eq!(json["name"], "a");
    assert_eq!(json["y1"], 2.0);
}
