use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

const TOOLTIP_LINE_HEIGHT_PX: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SvgRenderStats {
    pub lines_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
    pub tooltip_drawn: bool,
}

/// Serializes frames into a standalone SVG document.
///
/// Element classes are emitted verbatim so an external stylesheet decides
/// marker fill, active/inactive caption weight and tooltip look.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
    last_stats: SvgRenderStats,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "svg"
    }

    /// Document produced by the last `render` call.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn last_stats(&self) -> SvgRenderStats {
        self.last_stats
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let mut out = String::with_capacity(4096);
        out.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
            frame.viewport.width, frame.viewport.height
        ));

        for line in &frame.lines {
            out.push_str(&format!(
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-opacity="{}" stroke-width="{}"/>"#,
                fmt_num(line.x1),
                fmt_num(line.y1),
                fmt_num(line.x2),
                fmt_num(line.y2),
                line.color.to_hex(),
                fmt_num(line.color.alpha),
                fmt_num(line.stroke_width)
            ));
        }

        for circle in &frame.circles {
            out.push_str(&format!(
                r#"<circle cx="{}" cy="{}" r="{}" class="{}"/>"#,
                fmt_num(circle.cx),
                fmt_num(circle.cy),
                fmt_num(circle.radius),
                circle.class
            ));
        }

        for text in &frame.texts {
            out.push_str(&format!(
                r#"<text x="{}" y="{}" font-size="{}" fill="{}" fill-opacity="{}" text-anchor="{}""#,
                fmt_num(text.x),
                fmt_num(text.y),
                fmt_num(text.font_size_px),
                text.color.to_hex(),
                fmt_num(text.color.alpha),
                text.h_align.svg_anchor()
            ));
            if let Some(class) = text.class {
                out.push_str(&format!(r#" class="{class}""#));
            }
            if text.rotation_deg != 0.0 {
                out.push_str(&format!(
                    r#" transform="rotate({} {} {})""#,
                    fmt_num(text.rotation_deg),
                    fmt_num(text.x),
                    fmt_num(text.y)
                ));
            }
            out.push('>');
            out.push_str(&escape_xml(&text.text));
            out.push_str("</text>");
        }

        if let Some(tooltip) = &frame.tooltip {
            out.push_str(&format!(
                r#"<g class="{}" transform="translate({} {})"><text>"#,
                tooltip.class,
                fmt_num(tooltip.x),
                fmt_num(tooltip.y)
            ));
            for (index, line) in tooltip.lines.iter().enumerate() {
                let weight = if index == 0 { r#" font-weight="bold""# } else { "" };
                out.push_str(&format!(
                    r#"<tspan x="0" dy="{}"{weight}>{}</tspan>"#,
                    fmt_num(if index == 0 { 0.0 } else { TOOLTIP_LINE_HEIGHT_PX }),
                    escape_xml(line)
                ));
            }
            out.push_str("</text></g>");
        }

        out.push_str("</svg>");
        self.document = out;
        self.last_stats = SvgRenderStats {
            lines_drawn: frame.lines.len(),
            circles_drawn: frame.circles.len(),
            texts_drawn: frame.texts.len(),
            tooltip_drawn: frame.tooltip.is_some(),
        };
        Ok(())
    }
}

/// Trims float noise so documents stay diffable.
fn fmt_num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        "0".to_owned()
    } else {
        format!("{rounded}")
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Viewport;
    use crate::render::{CirclePrimitive, Color, TextHAlign, TextPrimitive};

    #[test]
    fn emits_classes_and_escapes_text() {
        let frame = RenderFrame::new(Viewport::new(700, 500))
            .with_circle(CirclePrimitive {
                cx: 10.0,
                cy: 20.0,
                radius: 10.0,
                class: "stateCircle",
            })
            .with_text(
                TextPrimitive::new("A&B", 5.0, 5.0, 12.0, Color::BLACK, TextHAlign::Center)
                    .with_class("active"),
            );
        let mut renderer = SvgRenderer::new();
        renderer.render(&frame).expect("render");

        let document = renderer.document();
        assert!(document.starts_with("<svg"));
        assert!(document.contains(r#"<circle cx="10" cy="20" r="10" class="stateCircle"/>"#));
        assert!(document.contains(r#"class="active">A&amp;B</text>"#));
        assert_eq!(renderer.last_stats().circles_drawn, 1);
    }
}
