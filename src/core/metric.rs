use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Chart axis a metric or label group belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisRole {
    X,
    Y,
}

impl AxisRole {
    /// Metrics selectable on this axis, in label order.
    #[must_use]
    pub const fn metrics(self) -> [Metric; 3] {
        match self {
            Self::X => [Metric::Poverty, Metric::Age, Metric::Income],
            Self::Y => [Metric::Healthcare, Metric::Smokes, Metric::Obesity],
        }
    }
}

impl fmt::Display for AxisRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => f.write_str("x"),
            Self::Y => f.write_str("y"),
        }
    }
}

/// Numeric demographic field eligible for axis selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Poverty,
    Age,
    Income,
    Healthcare,
    Smokes,
    Obesity,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Self::Poverty,
        Self::Age,
        Self::Income,
        Self::Healthcare,
        Self::Smokes,
        Self::Obesity,
    ];

    #[must_use]
    pub const fn role(self) -> AxisRole {
        match self {
            Self::Poverty | Self::Age | Self::Income => AxisRole::X,
            Self::Healthcare | Self::Smokes | Self::Obesity => AxisRole::Y,
        }
    }

    /// Column name in the dataset and value carried by the axis-label text.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Poverty => "poverty",
            Self::Age => "age",
            Self::Income => "income",
            Self::Healthcare => "healthcare",
            Self::Smokes => "smokes",
            Self::Obesity => "obesity",
        }
    }

    /// Caption drawn under (X) or beside (Y) the plot.
    #[must_use]
    pub const fn caption(self) -> &'static str {
        match self {
            Self::Poverty => "In Poverty (%)",
            Self::Age => "Age (Median)",
            Self::Income => "Household Income (Median)",
            Self::Healthcare => "Lacks Healthcare (%)",
            Self::Smokes => "Smokes (%)",
            Self::Obesity => "Obesity (%)",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Metric {
    type Err = ChartError;

    fn from_str(value: &str) -> ChartResult<Self> {
        Self::ALL
            .into_iter()
            .find(|metric| metric.key() == value)
            .ok_or_else(|| ChartError::InvalidData(format!("unknown metric `{value}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_metric_round_trips_through_its_key() {
        for metric in Metric::ALL {
            assert_eq!(metric.key().parse::<Metric>().expect("parse"), metric);
        }
    }

    #[test]
    fn role_groups_match_axis_metric_lists() {
        for role in [AxisRole::X, AxisRole::Y] {
            assert!(role.metrics().iter().all(|metric| metric.role() == role));
        }
    }

    #[test]
    fn unknown_metric_is_rejected() {
        assert!("incomeMoe".parse::<Metric>().is_err());
    }
}
