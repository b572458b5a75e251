use chart_kit::core::DataPoint;
use chart_kit::interaction::{
    Reporting, SelectedIndices, SelectionController, SelectionOverride, SelectionScope,
    toggle_selection,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn clicking_twice_restores_the_vector(
        flags in prop::collection::vec(any::<bool>(), 1..24),
        raw_index in 0_usize..24,
    ) {
        let index = raw_index % flags.len();
        let unselected = flags.iter().filter(|flag| !**flag).count();
        // a first click that completes the vector, or one from an empty vector,
        // lands in the isolate/restore branch on the second click
        prop_assume!(!(unselected == 1 && !flags[index]));
        prop_assume!(unselected != flags.len());

        let once = toggle_selection(&flags, index);
        prop_assert_eq!(toggle_selection(&once, index), flags);
    }

    #[test]
    fn clicking_from_all_selected_isolates(len in 1_usize..32, raw_index in 0_usize..32) {
        let index = raw_index % len;
        let next = toggle_selection(&vec![true; len], index);
        for (position, flag) in next.iter().enumerate() {
            prop_assert_eq!(*flag, position == index);
        }
    }

    #[test]
    fn out_of_range_toggle_is_identity(
        flags in prop::collection::vec(any::<bool>(), 0..16),
        extra in 0_usize..8,
    ) {
        prop_assert_eq!(toggle_selection(&flags, flags.len() + extra), flags);
    }

    #[test]
    fn override_always_wins_over_clicks(
        len in 1_usize..12,
        allowed in prop::collection::vec(0_usize..12, 0..6),
        clicks in prop::collection::vec(0_usize..12, 0..8),
    ) {
        let data: Vec<DataPoint> = (0..len)
            .map(|index| DataPoint::new(format!("item-{index}"), index as f64))
            .collect();
        let selected = SelectedIndices::Positions(allowed);
        let expected = selected.normalize(len);

        let mut controller = SelectionController::new(SelectionScope::PerDatum, &data);
        controller.set_override(Some(SelectionOverride::Indices(selected)));
        for click in clicks {
            let _ = controller.click(&data, click, Reporting::Internal);
            prop_assert_eq!(&controller.current(&data), &expected);
        }
        prop_assert!(controller.internal().all_selected());
    }
}
