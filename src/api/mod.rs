//! Chart facade and the render pipeline stages it drives.

mod axis_renderer;
mod config;
mod engine;
mod label_format;
mod marker_renderer;
mod render_frame_builder;
mod scale_builder;
mod tooltip_controller;

pub use axis_renderer::{AXIS_CAPTION_FONT_PX, place_axis_captions, render_axis};
pub use config::ScatterChartConfig;
pub use engine::ScatterChart;
pub use label_format::{format_grouped, format_grouped_fixed, precision_for_step};
pub use marker_renderer::{MarkerGeometry, MarkerUpdate, place_markers, render_markers};
pub use render_frame_builder::build_render_frame;
pub use scale_builder::{AxisPadding, build_axis_scale, build_padded_scale, metric_extent};
pub use tooltip_controller::{HoverBinding, TooltipContent, TooltipController, VisibleTooltip};
