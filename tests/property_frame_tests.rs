use nexis_charts::interaction::PointerState;
use nexis_charts::{ChartKind, ChartPage};
use proptest::prelude::*;

fn chart_kind() -> impl Strategy<Value = ChartKind> {
    prop::sample::select(ChartKind::ALL.to_vec())
}

proptest! {
    #[test]
    fn hover_frames_are_valid_and_deterministic(
        kind in chart_kind(),
        x in -50.0f64..1_000.0,
        y in -50.0f64..800.0,
    ) {
        let page = ChartPage::new();
        let pointer = PointerState::at(x, y);
        let first = page.build_frame(kind, &pointer).expect("frame");
        let second = page.build_frame(kind, &pointer).expect("frame");
        prop_assert!(first.validate().is_ok());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn frames_build_at_any_reasonable_width(
        kind in chart_kind(),
        width in 240u32..2_000,
    ) {
        let page = ChartPage::from_config(
            nexis_charts::ChartPageConfig::default().with_width(width),
        )
        .expect("page");
        let frame = page.build_frame(kind, &PointerState::default()).expect("frame");
        prop_assert_eq!(frame.viewport.width, width);
        prop_assert!(frame.validate().is_ok());
    }

    #[test]
    fn clicks_never_leave_an_unknown_selection(
        x in 0.0f64..900.0,
        y in 0.0f64..600.0,
    ) {
        let mut page = ChartPage::new();
        page.click(ChartKind::PerformanceBenchmark, x, y);
        let selected = page.performance_benchmark().selected();
        prop_assert!(nexis_charts::Scenario::ALL.contains(&selected));
        prop_assert!(!page.performance_benchmark().data().is_empty());
    }
}
