use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{AxisRole, CensusRecord, LinearScale, Metric, PlotLayout};
use crate::error::{ChartError, ChartResult};

/// Multiplicative headroom applied to a metric's extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisPadding {
    pub shrink: f64,
    pub growth: f64,
}

impl AxisPadding {
    pub const X: Self = Self {
        shrink: 0.92,
        growth: 1.05,
    };
    // More headroom on Y keeps markers off the dense top band.
    pub const Y: Self = Self {
        shrink: 0.80,
        growth: 1.10,
    };

    #[must_use]
    pub const fn for_role(role: AxisRole) -> Self {
        match role {
            AxisRole::X => Self::X,
            AxisRole::Y => Self::Y,
        }
    }

    pub fn validate(self) -> ChartResult<Self> {
        for (value, name) in [(self.shrink, "shrink"), (self.growth, "growth")] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "axis padding `{name}` must be finite and > 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Smallest and largest finite value of `metric` across `records`.
pub fn metric_extent(records: &[CensusRecord], metric: Metric) -> ChartResult<(f64, f64)> {
    if records.is_empty() {
        return Err(ChartError::InvalidDomain {
            metric,
            reason: "record sequence is empty",
        });
    }

    let values = records
        .iter()
        .filter_map(|record| record.value(metric))
        .map(OrderedFloat);
    let (min, max) = values.fold(None, |extent, value| match extent {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    })
    .ok_or(ChartError::InvalidDomain {
        metric,
        reason: "metric is absent from every record",
    })?;
    Ok((min.into_inner(), max.into_inner()))
}

/// Builds the padded scale for `metric` on the axis `role`.
///
/// X maps onto `[0, plot_width]`; Y onto `[plot_height, 0]` so larger values
/// sit higher on screen.
pub fn build_axis_scale(
    records: &[CensusRecord],
    metric: Metric,
    role: AxisRole,
    layout: PlotLayout,
) -> ChartResult<LinearScale> {
    build_padded_scale(records, metric, role, AxisPadding::for_role(role), layout)
}

pub fn build_padded_scale(
    records: &[CensusRecord],
    metric: Metric,
    role: AxisRole,
    padding: AxisPadding,
    layout: PlotLayout,
) -> ChartResult<LinearScale> {
    let (min, max) = metric_extent(records, metric)?;
    let lower = min * padding.shrink;
    let upper = max * padding.growth;
    if lower == upper {
        return Err(ChartError::InvalidDomain {
            metric,
            reason: "padded domain collapses to a single value",
        });
    }

    let range = match role {
        AxisRole::X => (0.0, layout.plot_width()),
        AxisRole::Y => (layout.plot_height(), 0.0),
    };
    LinearScale::new((lower, upper), range).map_err(|_| ChartError::InvalidDomain {
        metric,
        reason: "padded domain is not finite",
    })
}
