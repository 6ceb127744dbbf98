use approx::assert_relative_eq;
use nexis_charts::charts::{StakingTiersChart, TaskLimit, UNLIMITED_TASKS_SENTINEL, staking_tiers};
use nexis_charts::core::Point;
use nexis_charts::interaction::HoverTarget;
use nexis_charts::render::FrameLayer;
use nexis_charts::Chart;

#[test]
fn only_the_sentinel_means_unlimited() {
    let limits: Vec<TaskLimit> = staking_tiers().iter().map(|tier| tier.max_tasks).collect();
    assert_eq!(
        limits,
        vec![
            TaskLimit::Limited(10),
            TaskLimit::Limited(50),
            TaskLimit::Limited(200),
            TaskLimit::Unlimited,
        ]
    );
    assert_eq!(
        TaskLimit::from_raw(UNLIMITED_TASKS_SENTINEL - 1),
        TaskLimit::Limited(998)
    );
}

#[test]
fn value_axis_abbreviates_thousands() {
    let chart = StakingTiersChart::new();
    let frame = chart
        .build_render_frame(chart.preferred_viewport(800), None)
        .expect("frame");
    let labels: Vec<&str> = frame
        .layer(FrameLayer::Labels)
        .texts
        .iter()
        .map(|text| text.text.as_str())
        .collect();
    for tick in ["0", "20k", "40k", "60k"] {
        assert!(labels.contains(&tick), "missing tick {tick}");
    }
    for tier in ["Starter", "Standard", "Pro", "Elite"] {
        assert!(labels.contains(&tier), "missing category {tier}");
    }
    assert!(labels.contains(&"Minimum Stake (NZT)"));
    assert!(labels.contains(&"Minimum Stake Required"));
}

#[test]
fn bars_share_a_zero_baseline_and_scale_linearly() {
    let chart = StakingTiersChart::new();
    let frame = chart
        .build_render_frame(chart.preferred_viewport(800), None)
        .expect("frame");
    let bars = &frame.layer(FrameLayer::Series).rects;
    assert_eq!(bars.len(), 4);

    let baseline = bars[0].y + bars[0].height;
    for bar in bars {
        assert_relative_eq!(bar.y + bar.height, baseline, epsilon = 1e-9);
    }
    // 50k is ten times 5k.
    assert_relative_eq!(bars[3].height, bars[1].height * 10.0, epsilon = 1e-9);
    assert_eq!(bars[0].fill_color, StakingTiersChart::tier_color(0));
    assert_eq!(bars[3].fill_color, StakingTiersChart::tier_color(3));
}

#[test]
fn hovering_elite_shows_unlimited_tasks() {
    let chart = StakingTiersChart::new();
    let viewport = chart.preferred_viewport(800);
    let idle = chart.build_render_frame(viewport, None).expect("frame");
    let elite = idle.layer(FrameLayer::Series).rects[3];
    let pointer = Point::new(elite.x + elite.width * 0.5, elite.y + 10.0);

    assert_eq!(
        chart.hover_target(viewport, pointer).expect("hover"),
        Some(HoverTarget::Bar(3))
    );
    let tooltip = chart
        .tooltip(Some(HoverTarget::Bar(3)))
        .expect("tooltip");
    assert!(tooltip.contains_text("Elite Tier"));
    assert!(tooltip.contains_text("Min Stake: 50,000 NZT"));
    assert!(tooltip.contains_text("Max Tasks/Day: Unlimited"));
    assert!(tooltip.contains_text("APY Range: 12% - 15%"));
    assert!(tooltip.contains_text("Rep Multiplier: 3x"));

    let frame = chart.build_render_frame(viewport, Some(pointer)).expect("frame");
    let tooltip_texts: Vec<&str> = frame
        .layer(FrameLayer::Tooltip)
        .texts
        .iter()
        .map(|text| text.text.as_str())
        .collect();
    assert!(tooltip_texts.contains(&"Unlimited"));
}

#[test]
fn hover_outside_the_plot_is_ignored() {
    let chart = StakingTiersChart::new();
    let viewport = chart.preferred_viewport(800);
    assert_eq!(
        chart
            .hover_target(viewport, Point::new(2.0, 2.0))
            .expect("hover"),
        None
    );
    let frame = chart
        .build_render_frame(viewport, Some(Point::new(2.0, 2.0)))
        .expect("frame");
    assert!(frame.layer(FrameLayer::Overlay).is_empty());
    assert!(frame.layer(FrameLayer::Tooltip).is_empty());
}
