//! Engine-owned set of persistent chart elements.
//!
//! Elements are created once and then mutated in place by the render
//! pipeline. Coordinates are plot-area pixels.

mod transition;

pub use transition::{
    AnimatedValue, ElementId, Property, PropertyAnimator, PropertyTarget, ease_cubic_in_out,
};

use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{AxisRole, LinearScale, Metric};
use crate::error::{ChartError, ChartResult};

/// Style class of a marker circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerStyle {
    Default,
    Highlighted,
}

impl MarkerStyle {
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Default => "stateCircle",
            Self::Highlighted => "circleActive",
        }
    }
}

/// Style class of an axis-label caption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelState {
    Active,
    Inactive,
}

impl LabelState {
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisElement {
    pub role: AxisRole,
    scale: LinearScale,
    previous: Option<LinearScale>,
    progress: AnimatedValue,
}

/// One tick as currently displayed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickMark {
    pub value: f64,
    pub position: f64,
    pub opacity: f64,
}

impl AxisElement {
    #[must_use]
    pub fn new(role: AxisRole, scale: LinearScale) -> Self {
        Self {
            role,
            scale,
            previous: None,
            progress: AnimatedValue::fixed(1.0),
        }
    }

    #[must_use]
    pub fn scale(&self) -> LinearScale {
        self.scale
    }

    /// Swaps in a new target scale, remembering the one being replaced.
    pub fn retarget(&mut self, scale: LinearScale) {
        self.previous = Some(self.scale);
        self.scale = scale;
    }

    /// Tick layout at the current point of the transition.
    ///
    /// Ticks of the new scale slide in from where the old scale would have
    /// drawn their value and fade in; ticks only the old scale had slide to
    /// their new-scale position and fade out.
    #[must_use]
    pub fn tick_marks(&self, tick_count: usize) -> Vec<TickMark> {
        let entering = self.scale.ticks(tick_count);
        let t = self.progress.value();
        let Some(previous) = self.previous.filter(|_| t < 1.0) else {
            return entering
                .into_iter()
                .map(|value| TickMark {
                    value,
                    position: self.scale.map(value),
                    opacity: 1.0,
                })
                .collect();
        };

        let exiting = previous.ticks(tick_count);
        let tween = |value: f64| {
            let start = previous.map(value);
            start + (self.scale.map(value) - start) * t
        };
        let shared = |value: f64, others: &[f64]| {
            others
                .iter()
                .any(|other| (other - value).abs() <= f64::EPSILON * value.abs().max(1.0))
        };

        let mut marks: Vec<TickMark> = entering
            .iter()
            .map(|&value| TickMark {
                value,
                position: tween(value),
                opacity: if shared(value, &exiting) { 1.0 } else { t },
            })
            .collect();
        marks.extend(
            exiting
                .iter()
                .filter(|&&value| !shared(value, &entering))
                .map(|&value| TickMark {
                    value,
                    position: tween(value),
                    opacity: 1.0 - t,
                }),
        );
        marks
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerElement {
    pub record: usize,
    pub cx: AnimatedValue,
    pub cy: AnimatedValue,
    pub radius: f64,
    pub style: MarkerStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerLabelElement {
    pub record: usize,
    pub text: String,
    pub x: AnimatedValue,
    pub y: AnimatedValue,
    pub font_size_px: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabelElement {
    pub metric: Metric,
    pub x: f64,
    pub y: f64,
    pub state: LabelState,
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    axes: IndexMap<AxisRole, AxisElement>,
    markers: Vec<MarkerElement>,
    marker_labels: Vec<MarkerLabelElement>,
    axis_labels: SmallVec<[AxisLabelElement; 6]>,
}

impl Scene {
    #[must_use]
    pub fn axis(&self, role: AxisRole) -> Option<&AxisElement> {
        self.axes.get(&role)
    }

    pub fn axis_mut(&mut self, role: AxisRole) -> Option<&mut AxisElement> {
        self.axes.get_mut(&role)
    }

    pub fn insert_axis(&mut self, axis: AxisElement) {
        self.axes.insert(axis.role, axis);
    }

    pub fn axes(&self) -> impl Iterator<Item = &AxisElement> {
        self.axes.values()
    }

    #[must_use]
    pub fn markers(&self) -> &[MarkerElement] {
        &self.markers
    }

    pub fn marker_mut(&mut self, index: usize) -> Option<&mut MarkerElement> {
        self.markers.get_mut(index)
    }

    #[must_use]
    pub fn marker_labels(&self) -> &[MarkerLabelElement] {
        &self.marker_labels
    }

    pub fn push_marker(&mut self, marker: MarkerElement, label: MarkerLabelElement) {
        self.markers.push(marker);
        self.marker_labels.push(label);
    }

    #[must_use]
    pub fn axis_labels(&self) -> &[AxisLabelElement] {
        &self.axis_labels
    }

    pub fn push_axis_label(&mut self, label: AxisLabelElement) {
        self.axis_labels.push(label);
    }

    /// Marks `active` as the only active caption of its axis group.
    pub fn restyle_axis_labels(&mut self, role: AxisRole, active: Metric) {
        for label in self
            .axis_labels
            .iter_mut()
            .filter(|label| label.metric.role() == role)
        {
            label.state = if label.metric == active {
                LabelState::Active
            } else {
                LabelState::Inactive
            };
        }
    }

    pub fn advance(&mut self, dt: Duration) {
        for axis in self.axes.values_mut() {
            axis.progress.advance(dt);
        }
        for marker in &mut self.markers {
            marker.cx.advance(dt);
            marker.cy.advance(dt);
        }
        for label in &mut self.marker_labels {
            label.x.advance(dt);
            label.y.advance(dt);
        }
    }

    pub fn settle(&mut self) {
        self.advance(Duration::MAX);
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.axes.values().any(|axis| axis.progress.is_running())
            || self
                .markers
                .iter()
                .any(|marker| marker.cx.is_running() || marker.cy.is_running())
            || self
                .marker_labels
                .iter()
                .any(|label| label.x.is_running() || label.y.is_running())
    }

    fn value_mut(&mut self, target: PropertyTarget) -> Option<&mut AnimatedValue> {
        match (target.element, target.property) {
            (ElementId::Axis(role), Property::Progress) => {
                self.axes.get_mut(&role).map(|axis| &mut axis.progress)
            }
            (ElementId::Marker(index), Property::X) => {
                self.markers.get_mut(index).map(|marker| &mut marker.cx)
            }
            (ElementId::Marker(index), Property::Y) => {
                self.markers.get_mut(index).map(|marker| &mut marker.cy)
            }
            (ElementId::MarkerLabel(index), Property::X) => {
                self.marker_labels.get_mut(index).map(|label| &mut label.x)
            }
            (ElementId::MarkerLabel(index), Property::Y) => {
                self.marker_labels.get_mut(index).map(|label| &mut label.y)
            }
            _ => None,
        }
    }
}

impl PropertyAnimator for Scene {
    fn animate(
        &mut self,
        target: PropertyTarget,
        from: f64,
        to: f64,
        duration: Duration,
    ) -> ChartResult<()> {
        if !from.is_finite() || !to.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "animation endpoints for {target:?} must be finite"
            )));
        }
        let value = self.value_mut(target).ok_or_else(|| {
            ChartError::InvalidData(format!("no animatable property at {target:?}"))
        })?;
        value.start(from, to, duration);
        Ok(())
    }

    fn current(&self, target: PropertyTarget) -> Option<f64> {
        match (target.element, target.property) {
            (ElementId::Axis(role), Property::Progress) => {
                self.axes.get(&role).map(|axis| axis.progress.value())
            }
            (ElementId::Marker(index), Property::X) => {
                self.markers.get(index).map(|marker| marker.cx.value())
            }
            (ElementId::Marker(index), Property::Y) => {
                self.markers.get(index).map(|marker| marker.cy.value())
            }
            (ElementId::MarkerLabel(index), Property::X) => {
                self.marker_labels.get(index).map(|label| label.x.value())
            }
            (ElementId::MarkerLabel(index), Property::Y) => {
                self.marker_labels.get(index).map(|label| label.y.value())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_with_one_marker() -> Scene {
        let mut scene = Scene::default();
        scene.push_marker(
            MarkerElement {
                record: 0,
                cx: AnimatedValue::fixed(10.0),
                cy: AnimatedValue::fixed(20.0),
                radius: 10.0,
                style: MarkerStyle::Default,
            },
            MarkerLabelElement {
                record: 0,
                text: "AL".to_owned(),
                x: AnimatedValue::fixed(11.0),
                y: AnimatedValue::fixed(24.0),
                font_size_px: 8.0,
            },
        );
        scene
    }

    #[test]
    fn retargeting_midway_restarts_from_displayed_value() {
        let mut scene = scene_with_one_marker();
        let cx = PropertyTarget::new(ElementId::Marker(0), Property::X);
        scene
            .animate(cx, 10.0, 110.0, Duration::from_millis(1000))
            .expect("animate");
        scene.advance(Duration::from_millis(500));
        let midway = scene.current(cx).expect("cx");
        assert_eq!(midway, 60.0);

        scene
            .animate(cx, midway, 0.0, Duration::from_millis(1000))
            .expect("retarget");
        assert_eq!(scene.current(cx), Some(60.0));
        scene.settle();
        assert_eq!(scene.current(cx), Some(0.0));
        assert!(!scene.is_animating());
    }

    #[test]
    fn unknown_target_is_rejected() {
        let mut scene = scene_with_one_marker();
        let missing = PropertyTarget::new(ElementId::Marker(7), Property::X);
        assert!(scene.animate(missing, 0.0, 1.0, Duration::ZERO).is_err());
    }

    #[test]
    fn axis_transition_fades_out_ticks_of_previous_scale() {
        let old = LinearScale::new((0.0, 10.0), (0.0, 100.0)).expect("old");
        let new = LinearScale::new((0.0, 100.0), (0.0, 100.0)).expect("new");
        let mut scene = Scene::default();
        scene.insert_axis(AxisElement::new(AxisRole::X, old));

        let axis = scene.axis_mut(AxisRole::X).expect("axis");
        axis.retarget(new);
        let progress = PropertyTarget::new(ElementId::Axis(AxisRole::X), Property::Progress);
        scene
            .animate(progress, 0.0, 1.0, Duration::from_millis(1000))
            .expect("animate");

        let marks = scene.axis(AxisRole::X).expect("axis").tick_marks(10);
        let faded_in = marks.iter().find(|m| m.value == 50.0).expect("50 tick");
        assert_eq!(faded_in.opacity, 0.0);
        assert_eq!(faded_in.position, 500.0);
        let zero = marks.iter().find(|m| m.value == 0.0).expect("0 tick");
        assert_eq!(zero.opacity, 1.0);

        scene.settle();
        let settled = scene.axis(AxisRole::X).expect("axis").tick_marks(10);
        assert!(settled.iter().all(|m| m.opacity == 1.0));
        assert_eq!(settled.len(), 11);
    }
}
