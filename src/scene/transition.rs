use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{AxisRole, Metric};
use crate::error::ChartResult;

/// Persistent scene element addressed by the render pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementId {
    Axis(AxisRole),
    /// Circle for the record at this index.
    Marker(usize),
    /// Abbreviation text for the record at this index.
    MarkerLabel(usize),
    AxisLabel(Metric),
}

/// Animatable numeric property of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Property {
    X,
    Y,
    /// Normalized 0..=1 progress of an axis tick-layout transition.
    Progress,
}

impl Property {
    #[must_use]
    pub const fn for_axis(role: AxisRole) -> Self {
        match role {
            AxisRole::X => Self::X,
            AxisRole::Y => Self::Y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyTarget {
    pub element: ElementId,
    pub property: Property,
}

impl PropertyTarget {
    #[must_use]
    pub const fn new(element: ElementId, property: Property) -> Self {
        Self { element, property }
    }
}

/// Capability to tween one property from `from` to `to` over `duration`.
///
/// Issuing a new animation on a target that is still moving replaces the
/// running one.
pub trait PropertyAnimator {
    fn animate(
        &mut self,
        target: PropertyTarget,
        from: f64,
        to: f64,
        duration: Duration,
    ) -> ChartResult<()>;

    /// Value the target currently displays, if it exists.
    fn current(&self, target: PropertyTarget) -> Option<f64>;
}

/// Cubic ease-in-out, the default easing for chart transitions.
#[must_use]
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// One tweened scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedValue {
    from: f64,
    to: f64,
    duration: Duration,
    elapsed: Duration,
}

impl AnimatedValue {
    #[must_use]
    pub fn fixed(value: f64) -> Self {
        Self {
            from: value,
            to: value,
            duration: Duration::ZERO,
            elapsed: Duration::ZERO,
        }
    }

    pub fn start(&mut self, from: f64, to: f64, duration: Duration) {
        self.from = from;
        self.to = to;
        self.duration = duration;
        self.elapsed = Duration::ZERO;
    }

    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
    }

    pub fn settle(&mut self) {
        self.elapsed = self.duration;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.elapsed < self.duration
    }

    /// Eased progress in `0..=1`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        ease_cubic_in_out(self.elapsed.as_secs_f64() / self.duration.as_secs_f64())
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        let t = self.progress();
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * t
    }

    #[must_use]
    pub fn target(&self) -> f64 {
        self.to
    }
}
