use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{CensusRecord, Metric, PixelOffset, PointerPosition};
use crate::interaction::{AxisSelection, HoverTarget};
use crate::scene::{ElementId, MarkerStyle, Scene};

use super::label_format::format_grouped;
use super::marker_renderer::MarkerUpdate;

/// Tooltip text for one record under one selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipContent {
    pub title: String,
    pub y_line: String,
    pub x_line: String,
}

impl TooltipContent {
    #[must_use]
    pub fn compose(record: &CensusRecord, selection: AxisSelection) -> Self {
        Self {
            title: record.state.clone(),
            y_line: y_axis_line(selection.y(), record.value(selection.y())),
            x_line: x_axis_line(selection.x(), record.value(selection.x())),
        }
    }

    /// Title, Y line, X line.
    #[must_use]
    pub fn lines(&self) -> [&str; 3] {
        [&self.title, &self.y_line, &self.x_line]
    }

    #[must_use]
    pub fn to_text(&self) -> String {
        self.lines().join("\n")
    }

    /// Markup with the state name emphasized and one line per `<br>`.
    #[must_use]
    pub fn to_html(&self) -> String {
        format!(
            "<strong>{}</strong><br>{}<br>{}",
            escape_markup(&self.title),
            escape_markup(&self.y_line),
            escape_markup(&self.x_line)
        )
    }
}

fn x_axis_line(metric: Metric, value: Option<f64>) -> String {
    let Some(value) = value else {
        return format!("{}: n/a", x_axis_phrase(metric));
    };
    match metric {
        Metric::Poverty => format!("Poverty: {value}%"),
        Metric::Age => format!("Median Age: {value}"),
        _ => format!("Median Household Income: ${}", format_grouped(value)),
    }
}

fn x_axis_phrase(metric: Metric) -> &'static str {
    match metric {
        Metric::Poverty => "Poverty",
        Metric::Age => "Median Age",
        _ => "Median Household Income",
    }
}

fn y_axis_line(metric: Metric, value: Option<f64>) -> String {
    let phrase = match metric {
        Metric::Healthcare => "Lacks Healthcare:",
        Metric::Smokes => "Smokes:",
        _ => "Obesity:",
    };
    match value {
        Some(value) => format!("{phrase} {value}%"),
        None => format!("{phrase} n/a"),
    }
}

pub(crate) fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Hover handler attached to one marker or marker label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoverBinding {
    pub target: HoverTarget,
    pub content: TooltipContent,
    /// Markers swap to the highlighted style while hovered; labels do not.
    pub highlights_marker: bool,
}

/// Tooltip currently on screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibleTooltip {
    pub target: HoverTarget,
    pub anchor: PointerPosition,
    pub content: TooltipContent,
}

/// Owns the single tooltip and the hover bindings that show it.
#[derive(Debug, Clone)]
pub struct TooltipController {
    offset: PixelOffset,
    bindings: IndexMap<HoverTarget, HoverBinding>,
    visible: Option<VisibleTooltip>,
}

impl TooltipController {
    #[must_use]
    pub fn new(offset: PixelOffset) -> Self {
        Self {
            offset,
            bindings: IndexMap::new(),
            visible: None,
        }
    }

    /// Replaces every binding with fresh ones for `selection`.
    ///
    /// Running it again with the same inputs leaves exactly the same single
    /// binding per target. A tooltip already on screen picks up the new text.
    pub fn rebind(
        &mut self,
        records: &[CensusRecord],
        selection: AxisSelection,
        elements: &MarkerUpdate,
    ) -> usize {
        self.bindings.clear();

        let targets = elements
            .markers
            .iter()
            .chain(elements.labels.iter())
            .filter_map(|element| hover_target(*element));
        for target in targets {
            let Some(record) = records.get(target.record()) else {
                warn!(?target, "hover target has no record; not bound");
                continue;
            };
            self.bindings.insert(
                target,
                HoverBinding {
                    target,
                    content: TooltipContent::compose(record, selection),
                    highlights_marker: matches!(target, HoverTarget::Marker(_)),
                },
            );
        }

        self.visible = self.visible.take().and_then(|mut visible| {
            let binding = self.bindings.get(&visible.target)?;
            visible.content = binding.content.clone();
            Some(visible)
        });

        debug!(
            bindings = self.bindings.len(),
            x = %selection.x(),
            y = %selection.y(),
            "tooltips rebound"
        );
        self.bindings.len()
    }

    /// Shows the tooltip for `target` near `pointer`.
    ///
    /// Returns `false` when nothing is bound to `target`.
    pub fn hover_enter(
        &mut self,
        scene: &mut Scene,
        target: HoverTarget,
        pointer: PointerPosition,
    ) -> bool {
        let Some(binding) = self.bindings.get(&target) else {
            warn!(?target, "hover on unbound target ignored");
            return false;
        };
        if binding.highlights_marker {
            set_marker_style(scene, target.record(), MarkerStyle::Highlighted);
        }
        self.visible = Some(VisibleTooltip {
            target,
            anchor: PointerPosition::new(pointer.x + self.offset.dx, pointer.y + self.offset.dy),
            content: binding.content.clone(),
        });
        trace!(?target, "tooltip shown");
        true
    }

    /// Hides the tooltip and restores the marker style.
    pub fn hover_exit(&mut self, scene: &mut Scene, target: HoverTarget) -> bool {
        let Some(binding) = self.bindings.get(&target) else {
            warn!(?target, "hover exit on unbound target ignored");
            return false;
        };
        if binding.highlights_marker {
            set_marker_style(scene, target.record(), MarkerStyle::Default);
        }
        if self
            .visible
            .as_ref()
            .is_some_and(|visible| visible.target == target)
        {
            self.visible = None;
        }
        trace!(?target, "tooltip hidden");
        true
    }

    #[must_use]
    pub fn binding(&self, target: HoverTarget) -> Option<&HoverBinding> {
        self.bindings.get(&target)
    }

    pub fn bindings(&self) -> impl Iterator<Item = &HoverBinding> {
        self.bindings.values()
    }

    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn visible(&self) -> Option<&VisibleTooltip> {
        self.visible.as_ref()
    }
}

fn hover_target(element: ElementId) -> Option<HoverTarget> {
    match element {
        ElementId::Marker(index) => Some(HoverTarget::Marker(index)),
        ElementId::MarkerLabel(index) => Some(HoverTarget::MarkerLabel(index)),
        ElementId::Axis(_) | ElementId::AxisLabel(_) => None,
    }
}

fn set_marker_style(scene: &mut Scene, index: usize, style: MarkerStyle) {
    if let Some(marker) = scene.marker_mut(index) {
        marker.style = style;
    }
}
