use census_scatter::api::{ScatterChart, ScatterChartConfig};
use census_scatter::core::{AxisRole, CensusRecord, Metric};
use census_scatter::interaction::{AxisSelection, ChartEvent, LabelClick};
use census_scatter::render::NullRenderer;
use census_scatter::scene::LabelState;
use census_scatter::ChartError;

fn record(id: u32, state: &str, abbr: &str, values: [f64; 6]) -> CensusRecord {
    Metric::ALL
        .into_iter()
        .zip(values)
        .fold(CensusRecord::new(id, state, abbr), |record, (metric, value)| {
            record.with_metric(metric, value)
        })
}

fn chart() -> ScatterChart<NullRenderer> {
    let records = vec![
        record(1, "Alabama", "AL", [19.3, 38.6, 42830.0, 13.9, 21.1, 33.5]),
        record(2, "Alaska", "AK", [11.2, 33.3, 71583.0, 15.0, 19.9, 29.7]),
        record(3, "Arizona", "AZ", [18.2, 36.9, 50068.0, 14.4, 16.5, 28.9]),
        record(4, "Arkansas", "AR", [18.9, 37.8, 41262.0, 16.3, 22.6, 35.9]),
    ];
    ScatterChart::new(NullRenderer::default(), ScatterChartConfig::default(), records)
        .expect("chart")
}

fn active_captions(chart: &ScatterChart<NullRenderer>, role: AxisRole) -> Vec<Metric> {
    chart
        .scene()
        .axis_labels()
        .iter()
        .filter(|label| label.metric.role() == role && label.state == LabelState::Active)
        .map(|label| label.metric)
        .collect()
}

#[test]
fn initial_render_marks_default_selection_active() {
    let chart = chart();
    assert_eq!(chart.selection(), AxisSelection::default());
    assert_eq!(active_captions(&chart, AxisRole::X), vec![Metric::Poverty]);
    assert_eq!(active_captions(&chart, AxisRole::Y), vec![Metric::Healthcare]);
    assert_eq!(chart.scene().axis_labels().len(), 6);
}

#[test]
fn every_click_leaves_exactly_one_active_caption_per_group() {
    let mut chart = chart();
    let clicks = [
        (AxisRole::X, Metric::Age),
        (AxisRole::Y, Metric::Obesity),
        (AxisRole::X, Metric::Income),
        (AxisRole::Y, Metric::Smokes),
        (AxisRole::X, Metric::Poverty),
        (AxisRole::Y, Metric::Healthcare),
    ];
    for (group, metric) in clicks {
        assert!(chart.click_label(group, metric).expect("click"));
        assert_eq!(active_captions(&chart, group), vec![metric]);
        let inactive = chart
            .scene()
            .axis_labels()
            .iter()
            .filter(|label| label.metric.role() == group && label.state == LabelState::Inactive)
            .count();
        assert_eq!(inactive, 2);
        assert_eq!(chart.selection().metric(group), metric);
    }
}

#[test]
fn clicking_active_caption_changes_nothing() {
    let mut chart = chart();
    chart.click_label(AxisRole::X, Metric::Age).expect("age");
    chart.settle();

    let scale_before = chart.scale(AxisRole::X);
    let markers_before: Vec<_> = (0..4).map(|i| chart.marker_target(i)).collect();
    let captions_before = chart.scene().axis_labels().to_vec();

    assert!(!chart.click_label(AxisRole::X, Metric::Age).expect("noop"));
    assert!(!chart.is_animating());
    assert_eq!(chart.scale(AxisRole::X), scale_before);
    let markers_after: Vec<_> = (0..4).map(|i| chart.marker_target(i)).collect();
    assert_eq!(markers_after, markers_before);
    assert_eq!(chart.scene().axis_labels(), captions_before.as_slice());
}

#[test]
fn switching_x_metric_keeps_every_y_coordinate() {
    let mut chart = chart();
    let before: Vec<(f64, f64)> = (0..4)
        .map(|i| chart.marker_position(i).expect("marker"))
        .collect();

    chart
        .click_label(AxisRole::X, Metric::Income)
        .expect("income");
    chart.settle();

    let income_scale = chart.scale(AxisRole::X);
    for (index, (old_x, old_y)) in before.into_iter().enumerate() {
        let (new_x, new_y) = chart.marker_position(index).expect("marker");
        assert_eq!(new_y, old_y);
        let income = chart.records()[index]
            .value(Metric::Income)
            .expect("income value");
        assert_eq!(new_x, income_scale.map(income));
        assert_ne!(new_x, old_x);
    }
}

#[test]
fn marker_labels_follow_markers_with_fixed_offset() {
    let mut chart = chart();
    chart
        .click_label(AxisRole::Y, Metric::Obesity)
        .expect("obesity");
    chart.settle();

    let offset = chart.config().marker_label_offset;
    for (marker, label) in chart
        .scene()
        .markers()
        .iter()
        .zip(chart.scene().marker_labels())
    {
        assert_eq!(label.x.value(), marker.cx.value() + offset.dx);
        assert_eq!(label.y.value(), marker.cy.value() + offset.dy);
    }
}

#[test]
fn click_animates_over_configured_duration() {
    let mut chart = chart();
    let (start_x, _) = chart.marker_position(0).expect("marker");
    chart.click_label(AxisRole::X, Metric::Age).expect("age");

    assert!(chart.is_animating());
    assert_eq!(chart.marker_position(0).expect("marker").0, start_x);

    chart.advance(std::time::Duration::from_millis(400));
    let (mid_x, _) = chart.marker_position(0).expect("marker");
    let (target_x, _) = chart.marker_target(0).expect("marker");
    assert_ne!(mid_x, start_x);
    assert_ne!(mid_x, target_x);

    chart.advance(std::time::Duration::from_millis(600));
    assert!(!chart.is_animating());
    assert_eq!(chart.marker_position(0).expect("marker").0, target_x);
}

#[test]
fn caption_from_other_group_is_rejected_without_side_effects() {
    let mut chart = chart();
    let err = chart
        .dispatch(ChartEvent::LabelClicked(LabelClick::new(
            AxisRole::Y,
            Metric::Income,
        )))
        .expect_err("invalid");
    assert!(matches!(err, ChartError::InvalidSelection { .. }));
    assert_eq!(chart.selection(), AxisSelection::default());
    assert!(!chart.is_animating());
}

#[test]
fn raw_caption_value_drives_transition() {
    let mut chart = chart();
    assert!(chart.click_label_value(AxisRole::Y, "smokes").expect("smokes"));
    assert_eq!(chart.selection().y(), Metric::Smokes);
}

#[test]
fn set_selection_moves_both_axes_in_step() {
    let mut chart = chart();
    let selection = AxisSelection::new(Metric::Age, Metric::Obesity).expect("selection");
    assert!(chart.set_selection(selection).expect("set"));
    assert_eq!(chart.selection(), selection);
    assert_eq!(active_captions(&chart, AxisRole::X), vec![Metric::Age]);
    assert_eq!(active_captions(&chart, AxisRole::Y), vec![Metric::Obesity]);

    chart.advance(std::time::Duration::from_millis(999));
    assert!(chart.is_animating());
    chart.advance(std::time::Duration::from_millis(1));
    assert!(!chart.is_animating());

    assert!(!chart.set_selection(selection).expect("noop"));
}
