use crate::core::{AxisRole, PlotLayout};
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, RenderFrame, TextHAlign, TextPrimitive,
    TooltipPrimitive,
};
use crate::scene::{AxisElement, Scene};

use super::axis_renderer::AXIS_CAPTION_FONT_PX;
use super::label_format::{format_grouped_fixed, precision_for_step};
use super::tooltip_controller::TooltipController;

const AXIS_STROKE_PX: f64 = 1.0;
const TICK_SIZE_PX: f64 = 6.0;
const TICK_PADDING_PX: f64 = 3.0;
const TICK_FONT_PX: f64 = 10.0;

/// Materializes the scene at its current animation state into canvas pixels.
#[must_use]
pub fn build_render_frame(
    scene: &Scene,
    tooltips: &TooltipController,
    layout: PlotLayout,
    tick_count: usize,
) -> RenderFrame {
    let mut frame = RenderFrame::new(layout.viewport);

    for axis in scene.axes() {
        push_axis(&mut frame, axis, layout, tick_count);
    }

    for marker in scene.markers() {
        let (cx, cy) = layout.to_canvas(marker.cx.value(), marker.cy.value());
        frame.circles.push(CirclePrimitive {
            cx,
            cy,
            radius: marker.radius,
            class: marker.style.class_name(),
        });
    }

    for label in scene.marker_labels() {
        if label.text.is_empty() {
            continue;
        }
        let (x, y) = layout.to_canvas(label.x.value(), label.y.value());
        frame.texts.push(
            TextPrimitive::new(
                label.text.clone(),
                x,
                y,
                label.font_size_px,
                Color::BLACK,
                TextHAlign::Center,
            )
            .with_class("stateText"),
        );
    }

    for caption in scene.axis_labels() {
        let (x, y) = layout.to_canvas(caption.x, caption.y);
        let rotation = match caption.metric.role() {
            AxisRole::X => 0.0,
            AxisRole::Y => -90.0,
        };
        frame.texts.push(
            TextPrimitive::new(
                caption.metric.caption(),
                x,
                y,
                AXIS_CAPTION_FONT_PX,
                Color::BLACK,
                TextHAlign::Center,
            )
            .with_class(caption.state.class_name())
            .with_rotation(rotation),
        );
    }

    if let Some(visible) = tooltips.visible() {
        let (x, y) = layout.to_canvas(visible.anchor.x, visible.anchor.y);
        frame.tooltip = Some(TooltipPrimitive {
            x,
            y,
            lines: visible
                .content
                .lines()
                .iter()
                .map(|line| (*line).to_owned())
                .collect(),
            html: visible.content.to_html(),
            class: "d3-tip",
        });
    }

    frame
}

fn push_axis(frame: &mut RenderFrame, axis: &AxisElement, layout: PlotLayout, tick_count: usize) {
    let width = layout.plot_width();
    let height = layout.plot_height();
    let decimals = axis
        .scale()
        .tick_step(tick_count)
        .map_or(0, precision_for_step);

    match axis.role {
        AxisRole::X => {
            let (x1, y) = layout.to_canvas(0.0, height);
            let (x2, _) = layout.to_canvas(width, height);
            frame
                .lines
                .push(LinePrimitive::new(x1, y, x2, y, AXIS_STROKE_PX, Color::BLACK));
        }
        AxisRole::Y => {
            let (x, y1) = layout.to_canvas(0.0, 0.0);
            let (_, y2) = layout.to_canvas(0.0, height);
            frame
                .lines
                .push(LinePrimitive::new(x, y1, x, y2, AXIS_STROKE_PX, Color::BLACK));
        }
    }

    for tick in axis.tick_marks(tick_count) {
        if tick.opacity <= 0.0 {
            continue;
        }
        let color = Color::BLACK.with_alpha(tick.opacity.clamp(0.0, 1.0));
        let text = format_grouped_fixed(tick.value, decimals);
        match axis.role {
            AxisRole::X => {
                let (x, y) = layout.to_canvas(tick.position, height);
                frame.lines.push(LinePrimitive::new(
                    x,
                    y,
                    x,
                    y + TICK_SIZE_PX,
                    AXIS_STROKE_PX,
                    color,
                ));
                frame.texts.push(TextPrimitive::new(
                    text,
                    x,
                    y + TICK_SIZE_PX + TICK_PADDING_PX + TICK_FONT_PX,
                    TICK_FONT_PX,
                    color,
                    TextHAlign::Center,
                ));
            }
            AxisRole::Y => {
                let (x, y) = layout.to_canvas(0.0, tick.position);
                frame.lines.push(LinePrimitive::new(
                    x - TICK_SIZE_PX,
                    y,
                    x,
                    y,
                    AXIS_STROKE_PX,
                    color,
                ));
                frame.texts.push(TextPrimitive::new(
                    text,
                    x - TICK_SIZE_PX - TICK_PADDING_PX,
                    y + TICK_FONT_PX * 0.32,
                    TICK_FONT_PX,
                    color,
                    TextHAlign::Right,
                ));
            }
        }
    }
}
