use std::path::Path;
use std::time::Duration;

use tracing::{debug, trace};

use crate::core::{AxisRole, CensusRecord, LinearScale, Metric, PointerPosition};
use crate::data::load_records_from_path;
use crate::error::ChartResult;
use crate::interaction::{AxisSelection, ChartEvent, HoverTarget, LabelClick, RenderEffect};
use crate::render::{RenderFrame, Renderer};
use crate::scene::Scene;

use super::axis_renderer::{place_axis_captions, render_axis};
use super::marker_renderer::{MarkerGeometry, MarkerUpdate, place_markers, render_markers};
use super::render_frame_builder::build_render_frame;
use super::scale_builder::build_padded_scale;
use super::tooltip_controller::TooltipController;
use super::{AxisPadding, ScatterChartConfig};

/// Interactive census scatter plot.
///
/// Owns the dataset, the current [`AxisSelection`], both scales, the scene
/// and the tooltip bindings. Every input runs to completion before the call
/// returns; animations only progress when the host calls [`advance`].
///
/// [`advance`]: ScatterChart::advance
pub struct ScatterChart<R: Renderer> {
    renderer: R,
    config: ScatterChartConfig,
    records: Vec<CensusRecord>,
    selection: AxisSelection,
    x_scale: LinearScale,
    y_scale: LinearScale,
    scene: Scene,
    tooltips: TooltipController,
    elements: MarkerUpdate,
}

impl<R: Renderer> ScatterChart<R> {
    /// Builds scales, axes, markers, captions and tooltips for `records`.
    ///
    /// Fails with `InvalidDomain` on an empty dataset.
    pub fn new(
        renderer: R,
        config: ScatterChartConfig,
        records: Vec<CensusRecord>,
    ) -> ChartResult<Self> {
        let config = config.validate()?;
        let selection = config.initial_selection;
        let layout = config.layout;

        let x_scale = build_padded_scale(
            &records,
            selection.x(),
            AxisRole::X,
            config.x_padding,
            layout,
        )?;
        let y_scale = build_padded_scale(
            &records,
            selection.y(),
            AxisRole::Y,
            config.y_padding,
            layout,
        )?;

        let mut scene = Scene::default();
        let duration = config.transition_duration();
        render_axis(&mut scene, AxisRole::X, x_scale, duration)?;
        render_axis(&mut scene, AxisRole::Y, y_scale, duration)?;
        let elements = place_markers(
            &mut scene,
            &records,
            (x_scale, y_scale),
            (selection.x(), selection.y()),
            marker_geometry(&config),
        );
        place_axis_captions(&mut scene, layout, selection);

        let mut tooltips = TooltipController::new(config.tooltip_offset);
        tooltips.rebind(&records, selection, &elements);

        debug!(
            records = records.len(),
            x = %selection.x(),
            y = %selection.y(),
            "scatter chart initialized"
        );

        Ok(Self {
            renderer,
            config,
            records,
            selection,
            x_scale,
            y_scale,
            scene,
            tooltips,
            elements,
        })
    }

    /// Loads the CSV dataset at `path` and builds the chart from it.
    pub fn from_csv_path(
        renderer: R,
        config: ScatterChartConfig,
        path: impl AsRef<Path>,
    ) -> ChartResult<Self> {
        let records = load_records_from_path(path)?;
        Self::new(renderer, config, records)
    }

    /// Routes one host input to the matching handler.
    ///
    /// Returns whether the chart changed.
    pub fn dispatch(&mut self, event: ChartEvent) -> ChartResult<bool> {
        match event {
            ChartEvent::LabelClicked(click) => self.click_label(click.group, click.metric),
            ChartEvent::HoverEnter { target, pointer } => Ok(self.hover_enter(target, pointer)),
            ChartEvent::HoverExit { target } => Ok(self.hover_exit(target)),
        }
    }

    /// Handles a click on an axis caption.
    ///
    /// Clicking the active caption is a no-op and returns `false`.
    pub fn click_label(&mut self, group: AxisRole, metric: Metric) -> ChartResult<bool> {
        let transition = self.selection.transition(LabelClick::new(group, metric))?;
        if transition.is_noop() {
            trace!(?group, %metric, "click on active caption ignored");
            return Ok(false);
        }
        self.apply(transition.selection, &transition.effects)?;
        Ok(true)
    }

    /// Handles a click carrying the caption's raw `value` attribute.
    pub fn click_label_value(&mut self, group: AxisRole, value: &str) -> ChartResult<bool> {
        let click = LabelClick::parse(group, value)?;
        self.click_label(click.group, click.metric)
    }

    /// Switches both axes at once.
    ///
    /// Both transitions start on the same clock tick, so the X and Y motion
    /// stays in step.
    pub fn set_selection(&mut self, selection: AxisSelection) -> ChartResult<bool> {
        let selection = selection.validate()?;
        let mut next = self.selection;
        let mut effects = Vec::new();
        for role in [AxisRole::X, AxisRole::Y] {
            let transition =
                next.transition(LabelClick::new(role, selection.metric(role)))?;
            next = transition.selection;
            effects.extend(
                transition
                    .effects
                    .into_iter()
                    .filter(|effect| *effect != RenderEffect::RebindTooltips),
            );
        }
        if effects.is_empty() {
            return Ok(false);
        }
        effects.push(RenderEffect::RebindTooltips);
        self.apply(next, &effects)?;
        Ok(true)
    }

    fn apply(&mut self, selection: AxisSelection, effects: &[RenderEffect]) -> ChartResult<()> {
        // Scales are built up front so a domain error leaves the chart untouched.
        let mut x_scale = self.x_scale;
        let mut y_scale = self.y_scale;
        for effect in effects {
            if let RenderEffect::RebuildScale(role) = *effect {
                let scale = build_padded_scale(
                    &self.records,
                    selection.metric(role),
                    role,
                    self.padding(role),
                    self.config.layout,
                )?;
                match role {
                    AxisRole::X => x_scale = scale,
                    AxisRole::Y => y_scale = scale,
                }
            }
        }

        self.selection = selection;
        let duration = self.config.transition_duration();
        for effect in effects {
            debug!(?effect, "applying render effect");
            match *effect {
                RenderEffect::RebuildScale(AxisRole::X) => self.x_scale = x_scale,
                RenderEffect::RebuildScale(AxisRole::Y) => self.y_scale = y_scale,
                RenderEffect::RenderAxis(role) => {
                    let scale = self.scale(role);
                    render_axis(&mut self.scene, role, scale, duration)?;
                }
                RenderEffect::RenderMarkers(role) => {
                    let scale = self.scale(role);
                    self.elements = render_markers(
                        &mut self.scene,
                        &self.records,
                        role,
                        scale,
                        selection.metric(role),
                        marker_geometry(&self.config),
                        duration,
                    )?;
                }
                RenderEffect::RebindTooltips => {
                    self.tooltips
                        .rebind(&self.records, selection, &self.elements);
                }
                RenderEffect::RestyleLabels(role) => {
                    self.scene
                        .restyle_axis_labels(role, selection.metric(role));
                }
            }
        }
        Ok(())
    }

    pub fn hover_enter(&mut self, target: HoverTarget, pointer: PointerPosition) -> bool {
        self.tooltips.hover_enter(&mut self.scene, target, pointer)
    }

    pub fn hover_exit(&mut self, target: HoverTarget) -> bool {
        self.tooltips.hover_exit(&mut self.scene, target)
    }

    /// Moves every running transition forward by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.scene.advance(dt);
    }

    /// Jumps every running transition to its end state.
    pub fn settle(&mut self) {
        self.scene.settle();
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.scene.is_animating()
    }

    #[must_use]
    pub fn build_frame(&self) -> RenderFrame {
        build_render_frame(
            &self.scene,
            &self.tooltips,
            self.config.layout,
            self.config.axis_tick_count,
        )
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_frame();
        trace!(
            lines = frame.lines.len(),
            circles = frame.circles.len(),
            texts = frame.texts.len(),
            "rendering frame"
        );
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn selection(&self) -> AxisSelection {
        self.selection
    }

    #[must_use]
    pub fn scale(&self, role: AxisRole) -> LinearScale {
        match role {
            AxisRole::X => self.x_scale,
            AxisRole::Y => self.y_scale,
        }
    }

    #[must_use]
    pub fn records(&self) -> &[CensusRecord] {
        &self.records
    }

    #[must_use]
    pub fn config(&self) -> &ScatterChartConfig {
        &self.config
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn tooltips(&self) -> &TooltipController {
        &self.tooltips
    }

    /// Displayed center of the marker for record `index`.
    #[must_use]
    pub fn marker_position(&self, index: usize) -> Option<(f64, f64)> {
        self.scene
            .markers()
            .get(index)
            .map(|marker| (marker.cx.value(), marker.cy.value()))
    }

    /// Center the marker for record `index` is heading to.
    #[must_use]
    pub fn marker_target(&self, index: usize) -> Option<(f64, f64)> {
        self.scene
            .markers()
            .get(index)
            .map(|marker| (marker.cx.target(), marker.cy.target()))
    }

    /// Index of the record whose state abbreviation is `abbr`.
    #[must_use]
    pub fn record_index(&self, abbr: &str) -> Option<usize> {
        self.records.iter().position(|record| record.abbr == abbr)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn padding(&self, role: AxisRole) -> AxisPadding {
        match role {
            AxisRole::X => self.config.x_padding,
            AxisRole::Y => self.config.y_padding,
        }
    }
}

fn marker_geometry(config: &ScatterChartConfig) -> MarkerGeometry {
    MarkerGeometry {
        radius_px: config.marker_radius_px,
        label_font_px: config.marker_label_font_px,
        label_offset: config.marker_label_offset,
    }
}
