use census_scatter::api::{MarkerUpdate, ScatterChart, ScatterChartConfig, TooltipController};
use census_scatter::core::{AxisRole, CensusRecord, Metric, PixelOffset, PointerPosition};
use census_scatter::interaction::{AxisSelection, ChartEvent, HoverTarget};
use census_scatter::render::NullRenderer;
use census_scatter::scene::{ElementId, MarkerStyle, Scene};

fn three_states() -> Vec<CensusRecord> {
    vec![
        CensusRecord::new(1, "A", "A")
            .with_metric(Metric::Poverty, 10.0)
            .with_metric(Metric::Healthcare, 5.0),
        CensusRecord::new(2, "B", "B")
            .with_metric(Metric::Poverty, 20.0)
            .with_metric(Metric::Healthcare, 15.0),
        CensusRecord::new(3, "C", "C")
            .with_metric(Metric::Poverty, 30.0)
            .with_metric(Metric::Healthcare, 25.0),
    ]
}

fn chart() -> ScatterChart<NullRenderer> {
    ScatterChart::new(
        NullRenderer::default(),
        ScatterChartConfig::default(),
        three_states(),
    )
    .expect("chart")
}

fn element_sets(count: usize) -> MarkerUpdate {
    MarkerUpdate {
        markers: (0..count).map(ElementId::Marker).collect(),
        labels: (0..count).map(ElementId::MarkerLabel).collect(),
    }
}

#[test]
fn hovering_marker_b_shows_selected_metrics() {
    let mut chart = chart();
    let b = chart.record_index("B").expect("B");

    assert!(chart.hover_enter(HoverTarget::Marker(b), PointerPosition::new(100.0, 50.0)));
    let visible = chart.tooltips().visible().expect("tooltip shown");
    let text = visible.content.to_text();
    assert!(text.contains("Poverty: 20%"));
    assert!(text.contains("Lacks Healthcare: 15%"));
    assert_eq!(visible.content.lines()[0], "B");
    assert_eq!(visible.anchor, PointerPosition::new(40.0, 150.0));
    assert_eq!(chart.scene().markers()[b].style, MarkerStyle::Highlighted);

    assert!(chart.hover_exit(HoverTarget::Marker(b)));
    assert!(chart.tooltips().visible().is_none());
    assert_eq!(chart.scene().markers()[b].style, MarkerStyle::Default);
}

#[test]
fn hovering_state_label_shows_tooltip_without_highlight() {
    let mut chart = chart();
    let event = ChartEvent::HoverEnter {
        target: HoverTarget::MarkerLabel(0),
        pointer: PointerPosition::new(10.0, 10.0),
    };
    assert!(chart.dispatch(event).expect("hover"));
    assert!(chart.tooltips().visible().is_some());
    assert!(
        chart
            .scene()
            .markers()
            .iter()
            .all(|marker| marker.style == MarkerStyle::Default)
    );

    assert!(
        chart
            .dispatch(ChartEvent::HoverExit {
                target: HoverTarget::MarkerLabel(0)
            })
            .expect("exit")
    );
    assert!(chart.tooltips().visible().is_none());
}

#[test]
fn repeated_rebind_keeps_one_binding_per_target() {
    let records = three_states();
    let elements = element_sets(records.len());
    let mut controller = TooltipController::new(PixelOffset::new(0.0, 0.0));

    for _ in 0..5 {
        let bound = controller.rebind(&records, AxisSelection::default(), &elements);
        assert_eq!(bound, 6);
    }
    assert_eq!(controller.binding_count(), 6);
    for index in 0..records.len() {
        let marker = controller
            .binding(HoverTarget::Marker(index))
            .expect("marker binding");
        assert!(marker.highlights_marker);
        let label = controller
            .binding(HoverTarget::MarkerLabel(index))
            .expect("label binding");
        assert!(!label.highlights_marker);
        assert_eq!(marker.content, label.content);
    }
}

#[test]
fn rebinding_after_y_switch_updates_visible_tooltip() {
    let records = vec![
        CensusRecord::new(1, "Ohio", "OH")
            .with_metric(Metric::Poverty, 15.1)
            .with_metric(Metric::Healthcare, 8.4)
            .with_metric(Metric::Smokes, 22.5),
        CensusRecord::new(2, "Utah", "UT")
            .with_metric(Metric::Poverty, 11.7)
            .with_metric(Metric::Healthcare, 13.1)
            .with_metric(Metric::Smokes, 9.1),
    ];
    let mut chart =
        ScatterChart::new(NullRenderer::default(), ScatterChartConfig::default(), records)
            .expect("chart");

    chart.hover_enter(HoverTarget::Marker(1), PointerPosition::default());
    chart.click_label(AxisRole::Y, Metric::Smokes).expect("smokes");

    assert_eq!(chart.tooltips().binding_count(), 4);
    let visible = chart.tooltips().visible().expect("still shown");
    assert_eq!(visible.content.y_line, "Smokes: 9.1%");
    assert_eq!(visible.content.x_line, "Poverty: 11.7%");
}

#[test]
fn hover_on_unbound_target_is_ignored() {
    let mut scene = Scene::default();
    let mut controller = TooltipController::new(PixelOffset::new(0.0, 0.0));
    assert!(!controller.hover_enter(
        &mut scene,
        HoverTarget::Marker(3),
        PointerPosition::default()
    ));
    assert!(controller.visible().is_none());
}

#[test]
fn income_tooltip_uses_thousands_grouping() {
    let records = vec![
        CensusRecord::new(1, "Maryland", "MD")
            .with_metric(Metric::Income, 74551.0)
            .with_metric(Metric::Obesity, 28.9),
        CensusRecord::new(2, "Mississippi", "MS")
            .with_metric(Metric::Income, 39665.0)
            .with_metric(Metric::Obesity, 35.5),
    ];
    let config = ScatterChartConfig::default().with_initial_selection(
        AxisSelection::new(Metric::Income, Metric::Obesity).expect("selection"),
    );
    let chart = ScatterChart::new(NullRenderer::default(), config, records).expect("chart");

    let binding = chart
        .tooltips()
        .binding(HoverTarget::Marker(0))
        .expect("binding");
    assert_eq!(
        binding.content.to_html(),
        "<strong>Maryland</strong><br>Obesity: 28.9%<br>Median Household Income: $74,551"
    );
}
