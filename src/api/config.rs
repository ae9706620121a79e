use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{PixelOffset, PlotLayout};
use crate::error::{ChartError, ChartResult};
use crate::interaction::AxisSelection;

use super::AxisPadding;

/// Public chart bootstrap configuration.
///
/// Serializable so a host can ship chart setup as JSON. Every field has a
/// default, so `{}` is a valid document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterChartConfig {
    pub layout: PlotLayout,
    pub transition_duration_ms: u64,
    pub marker_radius_px: f64,
    pub marker_label_font_px: f64,
    pub marker_label_offset: PixelOffset,
    pub tooltip_offset: PixelOffset,
    pub axis_tick_count: usize,
    pub initial_selection: AxisSelection,
    pub x_padding: AxisPadding,
    pub y_padding: AxisPadding,
}

impl Default for ScatterChartConfig {
    fn default() -> Self {
        Self {
            layout: PlotLayout::default(),
            transition_duration_ms: 1000,
            marker_radius_px: 10.0,
            // 6pt
            marker_label_font_px: 8.0,
            marker_label_offset: PixelOffset::new(1.0, 4.0),
            tooltip_offset: PixelOffset::new(-60.0, 100.0),
            axis_tick_count: 10,
            initial_selection: AxisSelection::default(),
            x_padding: AxisPadding::X,
            y_padding: AxisPadding::Y,
        }
    }
}

impl ScatterChartConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json_str(document: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(document)?;
        config.validate()
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[must_use]
    pub fn with_layout(mut self, layout: PlotLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_transition_duration_ms(mut self, duration_ms: u64) -> Self {
        self.transition_duration_ms = duration_ms;
        self
    }

    #[must_use]
    pub fn with_initial_selection(mut self, selection: AxisSelection) -> Self {
        self.initial_selection = selection;
        self
    }

    #[must_use]
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_duration_ms)
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.layout.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.layout.viewport.width,
                height: self.layout.viewport.height,
            });
        }
        for (value, name) in [
            (self.marker_radius_px, "marker_radius_px"),
            (self.marker_label_font_px, "marker_label_font_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "config `{name}` must be finite and > 0"
                )));
            }
        }
        for (offset, name) in [
            (self.marker_label_offset, "marker_label_offset"),
            (self.tooltip_offset, "tooltip_offset"),
        ] {
            if !offset.dx.is_finite() || !offset.dy.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "config `{name}` must be finite"
                )));
            }
        }
        if self.axis_tick_count == 0 {
            return Err(ChartError::InvalidData(
                "config `axis_tick_count` must be > 0".to_owned(),
            ));
        }
        self.x_padding.validate()?;
        self.y_padding.validate()?;
        self.initial_selection.validate()?;
        Ok(self)
    }
}
