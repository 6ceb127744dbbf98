use nexis_charts::interaction::PointerState;
use nexis_charts::render::{NullRenderer, Renderer, SvgRenderer};
use nexis_charts::{ChartKind, ChartPage};

#[test]
fn svg_output_is_deterministic() {
    let page = ChartPage::new();
    for kind in ChartKind::ALL {
        let first = page.render_svg(kind, &PointerState::default()).expect("svg");
        let second = page.render_svg(kind, &PointerState::default()).expect("svg");
        assert_eq!(first, second, "{kind} svg differs between builds");
        assert!(first.starts_with("<svg"));
        assert!(first.ends_with("</svg>"));
    }
}

#[test]
fn svg_carries_chart_text_and_viewport() {
    let page = ChartPage::new();
    let svg = page.render_svg(ChartKind::FeeDistribution, &PointerState::default()).expect("svg");
    let viewport = page.viewport_for(ChartKind::FeeDistribution);
    assert!(svg.contains(&format!(r#"width="{}""#, viewport.width)));
    assert!(svg.contains(&format!(r#"height="{}""#, viewport.height)));
    assert!(svg.contains(">35%</text>"));
    assert!(svg.contains(">SequencerFeeVault</text>"));
}

#[test]
fn renderer_reuses_across_frames() {
    let page = ChartPage::new();
    let mut renderer = SvgRenderer::new();
    let mut null = NullRenderer::default();
    for (_, frame) in page.build_all().expect("frames") {
        renderer.render(&frame).expect("svg render");
        null.render(&frame).expect("null render");
        assert!(renderer.document().ends_with("</svg>"));
        assert_eq!(null.last_primitive_count, frame.primitive_count());
    }
    assert_eq!(null.frames_rendered, 4);
}

#[test]
fn hover_frames_differ_only_when_something_is_hovered() {
    let page = ChartPage::new();
    let kind = ChartKind::StakingTiers;
    let idle = page.render_svg(kind, &PointerState::default()).expect("svg");
    let outside = page
        .render_svg(kind, &PointerState::at(1.0, 1.0))
        .expect("svg");
    assert_eq!(idle, outside);

    let viewport = page.viewport_for(kind);
    let inside = PointerState::at(f64::from(viewport.width) * 0.5, 200.0);
    let hovered = page.render_svg(kind, &inside).expect("svg");
    assert_ne!(idle, hovered);
    assert!(hovered.contains("Tier</text>"));
}
