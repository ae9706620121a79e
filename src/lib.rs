//! census-scatter: interactive two-variable scatter plot over the US census
//! demographic dataset.
//!
//! The engine is headless. It owns a scene of persistent chart elements,
//! switches the metric on each axis when a caption is clicked, animates axes
//! and markers to the new layout, and shows a tooltip on hover. Backends
//! implement [`render::Renderer`] to draw the materialized frames.

pub mod api;
pub mod core;
pub mod data;
pub mod error;
pub mod interaction;
pub mod render;
pub mod scene;
pub mod telemetry;

pub use api::{ScatterChart, ScatterChartConfig};
pub use error::{ChartError, ChartResult, LoadError};
