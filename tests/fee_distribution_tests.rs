use approx::assert_relative_eq;
use nexis_charts::charts::{FeeDistributionChart, fee_slices};
use nexis_charts::core::{Point, Viewport};
use nexis_charts::render::{Color, FrameLayer, TextHAlign};
use nexis_charts::{Chart, ChartKind};

#[test]
fn fee_slices_sum_to_one_hundred_percent() {
    let total: u32 = fee_slices().iter().map(|slice| slice.value).sum();
    assert_eq!(total, 100);
}

#[test]
fn frame_has_one_white_stroked_wedge_per_slice() {
    let chart = FeeDistributionChart::new();
    let viewport = chart.preferred_viewport(800);
    let frame = chart.build_render_frame(viewport, None).expect("frame");
    frame.validate().expect("valid frame");

    let wedges = &frame.layer(FrameLayer::Series).wedges;
    assert_eq!(wedges.len(), 4);
    assert!(wedges.iter().all(|wedge| wedge.stroke_color == Color::WHITE));
    assert_relative_eq!(wedges[0].start_angle, 0.0);
    assert_relative_eq!(wedges[3].end_angle, 360.0);
    assert_eq!(
        wedges[0].fill_color,
        Color::from_hex("#8B0000").expect("hex")
    );
}

#[test]
fn percentage_labels_follow_polar_placement() {
    let chart = FeeDistributionChart::new();
    let labels = chart.slice_labels(Viewport::new(800, 560)).expect("labels");
    let texts: Vec<&str> = labels.iter().map(|label| label.text.as_str()).collect();
    assert_eq!(texts, vec!["35%", "35%", "20%", "10%"]);

    // First slice covers 0..126 degrees; label sits at 63 degrees, half radius.
    let radian = std::f64::consts::PI / 180.0;
    let expected_x = 400.0 + 70.0 * (-63.0 * radian).cos();
    let expected_y = 450.0 * 0.45 + 70.0 * (-63.0 * radian).sin();
    assert_relative_eq!(labels[0].position.x, expected_x, epsilon = 1e-9);
    assert_relative_eq!(labels[0].position.y, expected_y, epsilon = 1e-9);
    assert_eq!(labels[0].h_align, TextHAlign::Left);
}

#[test]
fn legend_lists_every_vault_name() {
    let chart = FeeDistributionChart::new();
    let frame = chart
        .build_render_frame(chart.preferred_viewport(800), None)
        .expect("frame");
    let texts: Vec<&str> = frame.texts().map(|text| text.text.as_str()).collect();
    for slice in fee_slices() {
        assert!(texts.contains(&slice.name), "missing legend entry {}", slice.name);
    }
}

#[test]
fn hovering_a_slice_draws_its_tooltip() {
    let chart = FeeDistributionChart::new();
    let viewport = chart.preferred_viewport(800);
    let pointer = Point::new(400.0 - 60.0, 202.5 + 20.0);

    let target = chart.hover_target(viewport, pointer).expect("hover");
    let frame = chart.build_render_frame(viewport, Some(pointer)).expect("frame");
    let tooltip_layer = frame.layer(FrameLayer::Tooltip);
    let tooltip = chart.tooltip(target).expect("tooltip");

    assert_eq!(tooltip.texts()[0], "BaseFeeVault (Stakers)");
    let tooltip_texts: Vec<&str> = tooltip_layer.texts.iter().map(|text| text.text.as_str()).collect();
    assert!(tooltip_texts.contains(&"Share: "));
    assert!(tooltip_texts.contains(&"35%"));
    assert_eq!(chart.kind(), ChartKind::FeeDistribution);
}

#[test]
fn caption_is_rendered_under_the_pie() {
    let chart = FeeDistributionChart::new();
    let frame = chart
        .build_render_frame(chart.preferred_viewport(1200), None)
        .expect("frame");
    let caption: Vec<_> = frame.texts().filter(|text| text.italic).collect();
    assert!(!caption.is_empty());
    assert!(caption.iter().all(|text| text.y >= 450.0));
}
