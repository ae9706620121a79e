use thiserror::Error;

use crate::core::{AxisRole, Metric};

pub type ChartResult<T> = Result<T, ChartError>;

/// Reasons a dataset could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed dataset row: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing required column `{0}`")]
    MissingColumn(&'static str),
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("dataset load failed: {0}")]
    LoadFailure(#[from] LoadError),

    #[error("invalid domain for metric `{metric}`: {reason}")]
    InvalidDomain { metric: Metric, reason: &'static str },

    #[error("metric `{metric}` cannot be selected on the {group} axis")]
    InvalidSelection { group: AxisRole, metric: Metric },

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
