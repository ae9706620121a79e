use std::time::Duration;

use tracing::{debug, warn};

use crate::core::{AxisRole, CensusRecord, LinearScale, Metric, PixelOffset};
use crate::error::ChartResult;
use crate::scene::{
    AnimatedValue, ElementId, MarkerElement, MarkerLabelElement, MarkerStyle, Property,
    PropertyAnimator, PropertyTarget, Scene,
};

/// Marker geometry shared by placement and updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerGeometry {
    pub radius_px: f64,
    pub label_font_px: f64,
    pub label_offset: PixelOffset,
}

impl MarkerGeometry {
    fn label_delta(self, role: AxisRole) -> f64 {
        match role {
            AxisRole::X => self.label_offset.dx,
            AxisRole::Y => self.label_offset.dy,
        }
    }
}

/// Elements touched by one marker update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerUpdate {
    pub markers: Vec<ElementId>,
    pub labels: Vec<ElementId>,
}

/// Creates one marker and one abbreviation label per record.
///
/// Records without a value for either selected metric are still given
/// elements, parked at the origin, so element indices keep matching record
/// indices.
pub fn place_markers(
    scene: &mut Scene,
    records: &[CensusRecord],
    scales: (LinearScale, LinearScale),
    metrics: (Metric, Metric),
    geometry: MarkerGeometry,
) -> MarkerUpdate {
    let (x_scale, y_scale) = scales;
    let (x_metric, y_metric) = metrics;
    let mut update = MarkerUpdate::default();

    for (index, record) in records.iter().enumerate() {
        let cx = project(record, x_metric, x_scale);
        let cy = project(record, y_metric, y_scale);
        scene.push_marker(
            MarkerElement {
                record: index,
                cx: AnimatedValue::fixed(cx),
                cy: AnimatedValue::fixed(cy),
                radius: geometry.radius_px,
                style: MarkerStyle::Default,
            },
            MarkerLabelElement {
                record: index,
                text: record.abbr.clone(),
                x: AnimatedValue::fixed(cx + geometry.label_offset.dx),
                y: AnimatedValue::fixed(cy + geometry.label_offset.dy),
                font_size_px: geometry.label_font_px,
            },
        );
        update.markers.push(ElementId::Marker(index));
        update.labels.push(ElementId::MarkerLabel(index));
    }
    debug!(count = records.len(), "markers placed");
    update
}

/// Moves every marker and label along `role` to where `scale` puts `metric`.
///
/// The coordinate of the other axis is left alone.
pub fn render_markers(
    scene: &mut Scene,
    records: &[CensusRecord],
    role: AxisRole,
    scale: LinearScale,
    metric: Metric,
    geometry: MarkerGeometry,
    duration: Duration,
) -> ChartResult<MarkerUpdate> {
    let property = Property::for_axis(role);
    let delta = geometry.label_delta(role);
    let mut update = MarkerUpdate::default();

    for (index, record) in records.iter().enumerate() {
        let position = project(record, metric, scale);
        for (element, to) in [
            (ElementId::Marker(index), position),
            (ElementId::MarkerLabel(index), position + delta),
        ] {
            let target = PropertyTarget::new(element, property);
            let Some(from) = scene.current(target) else {
                warn!(?element, "marker element missing; skipped");
                continue;
            };
            scene.animate(target, from, to, duration)?;
        }
        update.markers.push(ElementId::Marker(index));
        update.labels.push(ElementId::MarkerLabel(index));
    }
    debug!(?role, %metric, count = records.len(), "marker transition started");
    Ok(update)
}

fn project(record: &CensusRecord, metric: Metric, scale: LinearScale) -> f64 {
    record
        .value(metric)
        .map_or(0.0, |value| scale.map(value))
}
