//! Axis selection state and the input events that drive it.
//!
//! Transitions are pure: [`AxisSelection::transition`] turns the current
//! selection plus one click into the next selection and the ordered list of
//! render effects the chart must run. Nothing here touches the scene.

use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::core::{AxisRole, Metric, PointerPosition};
use crate::error::{ChartError, ChartResult};

/// Metrics currently bound to the X and Y axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisSelection {
    x: Metric,
    y: Metric,
}

impl Default for AxisSelection {
    fn default() -> Self {
        Self {
            x: Metric::Poverty,
            y: Metric::Healthcare,
        }
    }
}

impl AxisSelection {
    pub fn new(x: Metric, y: Metric) -> ChartResult<Self> {
        Self { x, y }.validate()
    }

    #[must_use]
    pub fn x(self) -> Metric {
        self.x
    }

    #[must_use]
    pub fn y(self) -> Metric {
        self.y
    }

    #[must_use]
    pub fn metric(self, role: AxisRole) -> Metric {
        match role {
            AxisRole::X => self.x,
            AxisRole::Y => self.y,
        }
    }

    /// Rejects selections that put a metric on the other axis.
    pub fn validate(self) -> ChartResult<Self> {
        for (group, metric) in [(AxisRole::X, self.x), (AxisRole::Y, self.y)] {
            if metric.role() != group {
                return Err(ChartError::InvalidSelection { group, metric });
            }
        }
        Ok(self)
    }

    /// Resolves one label click.
    ///
    /// Clicking the label that is already active yields no effects and the
    /// same selection.
    pub fn transition(self, click: LabelClick) -> ChartResult<Transition> {
        let LabelClick { group, metric } = click.validate()?;
        if self.metric(group) == metric {
            return Ok(Transition {
                selection: self,
                effects: SmallVec::new(),
            });
        }

        let selection = match group {
            AxisRole::X => Self { x: metric, ..self },
            AxisRole::Y => Self { y: metric, ..self },
        };
        Ok(Transition {
            selection,
            effects: RenderEffect::axis_change(group),
        })
    }
}

/// Click on one axis-label caption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelClick {
    pub group: AxisRole,
    pub metric: Metric,
}

impl LabelClick {
    #[must_use]
    pub fn new(group: AxisRole, metric: Metric) -> Self {
        Self { group, metric }
    }

    /// Builds a click from the raw `value` carried by a label element.
    pub fn parse(group: AxisRole, value: &str) -> ChartResult<Self> {
        Self::new(group, value.parse()?).validate()
    }

    pub fn validate(self) -> ChartResult<Self> {
        if self.metric.role() != self.group {
            return Err(ChartError::InvalidSelection {
                group: self.group,
                metric: self.metric,
            });
        }
        Ok(self)
    }
}

/// Side-effecting pipeline step requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderEffect {
    RebuildScale(AxisRole),
    RenderAxis(AxisRole),
    RenderMarkers(AxisRole),
    RebindTooltips,
    RestyleLabels(AxisRole),
}

impl RenderEffect {
    fn axis_change(role: AxisRole) -> SmallVec<[RenderEffect; 5]> {
        smallvec![
            Self::RebuildScale(role),
            Self::RenderAxis(role),
            Self::RenderMarkers(role),
            Self::RebindTooltips,
            Self::RestyleLabels(role),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub selection: AxisSelection,
    pub effects: SmallVec<[RenderEffect; 5]>,
}

impl Transition {
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.effects.is_empty()
    }
}

/// Element that reacts to pointer hover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HoverTarget {
    Marker(usize),
    MarkerLabel(usize),
}

impl HoverTarget {
    #[must_use]
    pub fn record(self) -> usize {
        match self {
            Self::Marker(index) | Self::MarkerLabel(index) => index,
        }
    }
}

/// Input the host forwards to the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ChartEvent {
    LabelClicked(LabelClick),
    HoverEnter {
        target: HoverTarget,
        pointer: PointerPosition,
    },
    HoverExit {
        target: HoverTarget,
    },
}
