use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::Metric;

/// Published uncertainty attached to a metric value.
///
/// Carried for completeness; rendering never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MarginOfError {
    /// Symmetric `value ± moe`.
    PlusMinus(f64),
    /// Confidence interval bounds.
    Interval { low: f64, high: f64 },
}

/// One row of the census dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CensusRecord {
    pub id: u32,
    pub state: String,
    pub abbr: String,
    metrics: IndexMap<Metric, f64>,
    margins: IndexMap<Metric, MarginOfError>,
}

impl CensusRecord {
    #[must_use]
    pub fn new(id: u32, state: impl Into<String>, abbr: impl Into<String>) -> Self {
        Self {
            id,
            state: state.into(),
            abbr: abbr.into(),
            metrics: IndexMap::new(),
            margins: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_metric(mut self, metric: Metric, value: f64) -> Self {
        self.metrics.insert(metric, value);
        self
    }

    #[must_use]
    pub fn with_margin(mut self, metric: Metric, margin: MarginOfError) -> Self {
        self.margins.insert(metric, margin);
        self
    }

    /// Value of `metric`, or `None` when absent or non-finite.
    #[must_use]
    pub fn value(&self, metric: Metric) -> Option<f64> {
        self.metrics
            .get(&metric)
            .copied()
            .filter(|value| value.is_finite())
    }

    #[must_use]
    pub fn margin(&self, metric: Metric) -> Option<MarginOfError> {
        self.margins.get(&metric).copied()
    }

    pub fn metrics(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        self.metrics.iter().map(|(metric, value)| (*metric, *value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_values_read_as_absent() {
        let record = CensusRecord::new(1, "Alabama", "AL")
            .with_metric(Metric::Poverty, 19.3)
            .with_metric(Metric::Age, f64::NAN);

        assert_eq!(record.value(Metric::Poverty), Some(19.3));
        assert_eq!(record.value(Metric::Age), None);
        assert_eq!(record.value(Metric::Income), None);
    }
}
