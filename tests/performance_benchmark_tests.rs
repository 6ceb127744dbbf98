use nexis_charts::charts::{PerformanceBenchmarkChart, Scenario, cost_scenarios};
use nexis_charts::core::Point;
use nexis_charts::interaction::HoverTarget;
use nexis_charts::render::FrameLayer;
use nexis_charts::{Chart, ChartError};
use rust_decimal::Decimal;

fn frame_texts(frame: &nexis_charts::render::RenderFrame) -> Vec<String> {
    frame.texts().map(|text| text.text.clone()).collect()
}

#[test]
fn scenarios_are_listed_in_definition_order() {
    let labels: Vec<&str> = cost_scenarios()
        .keys()
        .map(|scenario| scenario.label())
        .collect();
    assert_eq!(
        labels,
        vec!["ETH Transfer", "Token Swap", "AI Agent Registration"]
    );
}

#[test]
fn every_scenario_renders_one_bar_per_chain() {
    let mut chart = PerformanceBenchmarkChart::new();
    let viewport = chart.preferred_viewport(900);
    for (scenario, bars) in [
        (Scenario::EthTransfer, 6),
        (Scenario::Swap, 6),
        (Scenario::AiAgent, 3),
    ] {
        chart.select(scenario);
        let frame = chart.build_render_frame(viewport, None).expect("frame");
        frame.validate().expect("valid frame");
        assert_eq!(frame.layer(FrameLayer::Series).rects.len(), bars);
        let legend = format!("Cost Comparison: {}", scenario.label());
        assert!(frame_texts(&frame).contains(&legend));
    }
}

#[test]
fn value_axis_uses_decade_ticks_with_adaptive_precision() {
    let chart = PerformanceBenchmarkChart::new();
    let frame = chart
        .build_render_frame(chart.preferred_viewport(900), None)
        .expect("frame");
    let texts = frame_texts(&frame);
    for label in [
        "$0.000001",
        "$0.000010",
        "$0.0001",
        "$0.0010",
        "$0.01",
        "$0.10",
        "$1",
        "$10",
    ] {
        assert!(texts.contains(&label.to_owned()), "missing tick {label}");
    }
    assert!(texts.contains(&"Cost (USD)".to_owned()));
}

#[test]
fn bars_grow_with_cost() {
    let chart = PerformanceBenchmarkChart::new();
    let frame = chart
        .build_render_frame(chart.preferred_viewport(900), None)
        .expect("frame");
    let bars = &frame.layer(FrameLayer::Series).rects;
    // Base L2 is the cheapest chain; Ethereum L1 the most expensive.
    assert!(bars[1].height < bars[0].height);
    assert!(bars[5].height > bars[4].height);
    assert!(bars.iter().all(|bar| bar.height > 0.0));
}

#[test]
fn hovering_polygon_reports_its_multiplier() {
    let chart = PerformanceBenchmarkChart::new();
    let viewport = chart.preferred_viewport(900);
    let idle = chart.build_render_frame(viewport, None).expect("frame");
    let polygon = idle.layer(FrameLayer::Series).rects[4];
    let pointer = Point::new(
        polygon.x + polygon.width * 0.5,
        polygon.y + polygon.height * 0.5,
    );

    assert_eq!(
        chart.hover_target(viewport, pointer).expect("hover"),
        Some(HoverTarget::Bar(4))
    );
    let frame = chart.build_render_frame(viewport, Some(pointer)).expect("frame");
    let tooltip_texts: Vec<&str> = frame
        .layer(FrameLayer::Tooltip)
        .texts
        .iter()
        .map(|text| text.text.as_str())
        .collect();
    assert!(tooltip_texts.contains(&"Polygon"));
    assert!(tooltip_texts.contains(&"$0.004200"));
    assert!(tooltip_texts.contains(&"100.0x more expensive than Nexis"));
    // Hover band drawn behind the bars.
    assert_eq!(
        frame.layer(FrameLayer::Grid).rects.len(),
        idle.layer(FrameLayer::Grid).rects.len() + 1
    );
}

#[test]
fn arbitrum_tooltip_shows_fractional_block_time() {
    let chart = PerformanceBenchmarkChart::new();
    let tooltip = chart.bar_tooltip(3).expect("tooltip");
    assert_eq!(
        tooltip.texts(),
        vec![
            "Arbitrum",
            "Cost: $0.000004",
            "Block Time: 0.25s",
            "0.1x cheaper than Nexis",
        ]
    );
}

#[test]
fn reference_chain_has_no_multiplier_line() {
    let chart = PerformanceBenchmarkChart::new();
    let tooltip = chart.bar_tooltip(0).expect("tooltip");
    assert_eq!(tooltip.lines.len(), 3);
    assert!(!tooltip.contains_text("than Nexis"));
}

#[test]
fn ethereum_swap_multiplier_is_exact() {
    let chart = PerformanceBenchmarkChart::new().with_selected(Scenario::Swap);
    assert_eq!(chart.cost_multiplier(5), Some(Decimal::new(300_000, 1)));
    assert_eq!(
        chart.multiplier_note(5).as_deref(),
        Some("30000.0x more expensive than Nexis")
    );
}

#[test]
fn clicking_buttons_switches_the_displayed_dataset() {
    let mut chart = PerformanceBenchmarkChart::new();
    let viewport = chart.preferred_viewport(900);
    let (scenario, rect) = chart.button_rects(viewport)[2];
    assert_eq!(scenario, Scenario::AiAgent);

    assert!(chart.click(viewport, rect.x + rect.width * 0.5, rect.y + rect.height * 0.5));
    assert_eq!(chart.selected(), Scenario::AiAgent);
    let chains: Vec<&str> = chart.data().iter().map(|point| point.chain).collect();
    assert_eq!(chains, vec!["Nexis L3", "Base L2", "Ethereum L1"]);

    // Re-clicking the active button keeps the selection.
    assert!(chart.click(viewport, rect.x + 1.0, rect.y + 1.0));
    assert_eq!(chart.selected(), Scenario::AiAgent);
}

#[test]
fn unknown_scenario_keys_are_rejected() {
    let err = "bridge".parse::<Scenario>().expect_err("unknown");
    assert!(matches!(err, ChartError::UnknownScenario(_)));
    assert_eq!("swap".parse::<Scenario>().expect("known"), Scenario::Swap);
}
