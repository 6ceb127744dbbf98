use nexis_charts::page::PAGE_SNAPSHOT_JSON_SCHEMA_V1;
use nexis_charts::{ChartKind, ChartPage, ChartPageConfig, Scenario};
use serde_json::Value;

fn snapshot_value(page: &ChartPage) -> Value {
    let raw = page.snapshot_json().expect("snapshot json");
    serde_json::from_str(&raw).expect("valid json")
}

#[test]
fn snapshot_carries_schema_version_and_chart_ids() {
    let snapshot = snapshot_value(&ChartPage::new());
    assert_eq!(
        snapshot["schema_version"],
        Value::from(PAGE_SNAPSHOT_JSON_SCHEMA_V1)
    );
    assert_eq!(snapshot["width"], Value::from(800));
    assert_eq!(snapshot["fee_distribution"]["id"], "fee-distribution");
    assert_eq!(snapshot["performance_benchmark"]["id"], "performance-benchmark");
    assert_eq!(snapshot["staking_tiers"]["id"], "staking-tiers");
    assert_eq!(snapshot["token_emissions"]["id"], "token-emissions");
}

#[test]
fn benchmark_costs_serialize_as_exact_strings() {
    let snapshot = snapshot_value(&ChartPage::new());
    let benchmark = &snapshot["performance_benchmark"];
    assert_eq!(benchmark["selected"], "ethTransfer");
    assert_eq!(benchmark["data"][0]["chain"], "Nexis L3");
    assert_eq!(benchmark["data"][0]["cost"], "0.000042");
    assert_eq!(benchmark["data"][5]["cost"], "1.26");

    let scenarios = benchmark["scenarios"].as_object().expect("scenario map");
    let keys: Vec<&str> = scenarios.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["ethTransfer", "swap", "aiAgent"]);
    assert_eq!(scenarios["aiAgent"].as_array().expect("bars").len(), 3);
}

#[test]
fn task_limits_serialize_as_tagged_values() {
    let snapshot = snapshot_value(&ChartPage::new());
    let tiers = snapshot["staking_tiers"]["data"].as_array().expect("tiers");
    assert_eq!(tiers[0]["max_tasks"]["limited"], Value::from(10));
    assert_eq!(tiers[3]["max_tasks"], "unlimited");
    assert_eq!(tiers[3]["min_stake"], Value::from(50_000));
}

#[test]
fn snapshot_follows_the_selected_scenario() {
    let mut page = ChartPage::new();
    let viewport = page.viewport_for(ChartKind::PerformanceBenchmark);
    let (_, swap) = page.performance_benchmark().button_rects(viewport)[1];
    assert!(page.click(ChartKind::PerformanceBenchmark, swap.x + 2.0, swap.y + 2.0));

    let snapshot = snapshot_value(&page);
    assert_eq!(snapshot["performance_benchmark"]["selected"], "swap");
    assert_eq!(snapshot["performance_benchmark"]["data"][0]["cost"], "0.0003");
}

#[test]
fn config_round_trips_through_json() {
    let config = ChartPageConfig::default()
        .with_width(1024)
        .with_height(ChartKind::TokenEmissions, 520)
        .with_initial_scenario(Scenario::AiAgent);
    let raw = config.to_json_pretty().expect("serialize");
    let parsed = ChartPageConfig::from_json_str(&raw).expect("parse");
    assert_eq!(parsed, config);

    let page = ChartPage::from_config(parsed).expect("page");
    assert_eq!(page.performance_benchmark().selected(), Scenario::AiAgent);
    assert_eq!(page.viewport_for(ChartKind::TokenEmissions).height, 520);
    assert_eq!(page.viewport_for(ChartKind::TokenEmissions).width, 1024);
}

#[test]
fn invalid_theme_colors_fail_page_construction() {
    let config = ChartPageConfig::from_json_str(r##"{"theme": {"background": "#12"}}"##)
        .expect("parse");
    assert!(ChartPage::from_config(config).is_err());
}

#[test]
fn every_chart_builds_a_valid_frame() {
    let page = ChartPage::new();
    let frames = page.build_all().expect("frames");
    let kinds: Vec<ChartKind> = frames.iter().map(|(kind, _)| *kind).collect();
    assert_eq!(kinds, ChartKind::ALL.to_vec());
    for (kind, frame) in &frames {
        frame.validate().expect("valid frame");
        assert_eq!(frame.viewport, page.viewport_for(*kind));
        assert!(!frame.is_empty());
    }
}
