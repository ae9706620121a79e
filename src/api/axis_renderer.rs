use std::time::Duration;

use tracing::debug;

use crate::core::{AxisRole, LinearScale, Metric, PlotLayout};
use crate::error::ChartResult;
use crate::interaction::AxisSelection;
use crate::scene::{
    AxisElement, AxisLabelElement, ElementId, LabelState, Property, PropertyAnimator,
    PropertyTarget, Scene,
};

pub const AXIS_CAPTION_FONT_PX: f64 = 16.0;
const X_CAPTION_GAP_PX: f64 = 20.0;
const X_CAPTION_SPACING_PX: f64 = 20.0;
// Distance from the left canvas edge, per Y caption, innermost first.
const Y_CAPTION_INSETS_PX: [f64; 3] = [45.0, 25.0, 5.0];

/// Creates the three clickable captions per axis.
///
/// X captions stack under the plot, centered; Y captions are rotated and
/// stack leftwards into the margin. The selected metric of each group starts
/// active.
pub fn place_axis_captions(scene: &mut Scene, layout: PlotLayout, selection: AxisSelection) {
    let width = layout.plot_width();
    let height = layout.plot_height();

    for (slot, metric) in AxisRole::X.metrics().into_iter().enumerate() {
        scene.push_axis_label(AxisLabelElement {
            metric,
            x: width / 2.0,
            y: height + X_CAPTION_GAP_PX + X_CAPTION_SPACING_PX * (slot as f64 + 1.0),
            state: caption_state(selection, metric),
        });
    }
    for (slot, metric) in AxisRole::Y.metrics().into_iter().enumerate() {
        scene.push_axis_label(AxisLabelElement {
            metric,
            x: Y_CAPTION_INSETS_PX[slot] - layout.margins.left + AXIS_CAPTION_FONT_PX,
            y: height / 2.0,
            state: caption_state(selection, metric),
        });
    }
}

fn caption_state(selection: AxisSelection, metric: Metric) -> LabelState {
    if selection.metric(metric.role()) == metric {
        LabelState::Active
    } else {
        LabelState::Inactive
    }
}

/// Draws the axis for `role` or moves it to `scale`.
///
/// The first call places ticks immediately. Later calls keep the existing
/// axis element and tween its tick layout over `duration`.
pub fn render_axis(
    scene: &mut Scene,
    role: AxisRole,
    scale: LinearScale,
    duration: Duration,
) -> ChartResult<()> {
    match scene.axis_mut(role) {
        Some(axis) => axis.retarget(scale),
        None => {
            debug!(?role, domain = ?scale.domain(), "axis created");
            scene.insert_axis(AxisElement::new(role, scale));
            return Ok(());
        }
    }

    debug!(?role, domain = ?scale.domain(), ?duration, "axis transition started");
    scene.animate(
        PropertyTarget::new(ElementId::Axis(role), Property::Progress),
        0.0,
        1.0,
        duration,
    )
}
