use std::fmt::Write as _;

use crate::core::{PathCommand, Point};
use crate::core::pie::polar_to_cartesian;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, Color, CornerRadii, Fill, LinePrimitive, LineStrokeStyle, PathPrimitive,
    RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive, TextVAlign, WedgePrimitive,
};

const FONT_FAMILY: &str = "Inter, system-ui, sans-serif";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SvgRenderStats {
    pub elements_written: usize,
    pub gradients_written: usize,
}

/// Serializes frames to standalone SVG documents.
///
/// Output is byte-for-byte deterministic for equal frames.
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

    /// Markup produced by the last successful `render` call.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }

    #[must_use]
    pub fn last_stats(&self) -> SvgRenderStats {
        self.last_stats
    }

    /// Renders one frame straight to a string.
    pub fn render_to_string(frame: &RenderFrame) -> ChartResult<String> {
        let mut renderer = Self::new();
        renderer.render(frame)?;
        Ok(renderer.into_document())
    }

    fn write_document(frame: &RenderFrame) -> Result<(String, SvgRenderStats), std::fmt::Error> {
        let mut defs = String::new();
        let mut body = String::new();
        let mut stats = SvgRenderStats::default();

        for (_, layer) in frame.iter_layers() {
            for rect in &layer.rects {
                write_rect(&mut body, rect)?;
                stats.elements_written += 1;
            }
            for wedge in &layer.wedges {
                write_wedge(&mut body, wedge)?;
                stats.elements_written += 1;
            }
            for path in &layer.paths {
                let fill_ref = match &path.fill {
                    Some(Fill::VerticalGradient(stops)) => {
                        let id = format!("fill-gradient-{}", stats.gradients_written);
                        write!(
                            defs,
                            r#"<linearGradient id="{id}" x1="0" y1="0" x2="0" y2="1">"#
                        )?;
                        for stop in stops {
                            write!(
                                defs,
                                r#"<stop offset="{}%" stop-color="{}" stop-opacity="{}"/>"#,
                                num(stop.offset * 100.0),
                                stop.color.to_hex(),
                                num(stop.color.alpha)
                            )?;
                        }
                        defs.push_str("</linearGradient>");
                        stats.gradients_written += 1;
                        Some(format!("url(#{id})"))
                    }
                    _ => None,
                };
                write_path(&mut body, path, fill_ref.as_deref())?;
                stats.elements_written += 1;
            }
            for line in &layer.lines {
                write_line(&mut body, line)?;
                stats.elements_written += 1;
            }
            for circle in &layer.circles {
                write_circle(&mut body, circle)?;
                stats.elements_written += 1;
            }
            for text in &layer.texts {
                write_text(&mut body, text)?;
                stats.elements_written += 1;
            }
        }

        let width = frame.viewport.width;
        let height = frame.viewport.height;
        let mut document = String::with_capacity(body.len() + defs.len() + 256);
        write!(
            document,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        )?;
        if !defs.is_empty() {
            write!(document, "<defs>{defs}</defs>")?;
        }
        write!(
            document,
            r#"<rect x="0" y="0" width="{width}" height="{height}"{}/>"#,
            paint_attr("fill", frame.background)
        )?;
        document.push_str(&body);
        document.push_str("</svg>");
        Ok((document, stats))
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let (document, stats) = Self::write_document(frame)
            .map_err(|err| ChartError::Backend(format!("failed to write svg: {err}")))?;
        self.document = document;
        self.last_stats = stats;
        Ok(())
    }
}

/// Compact coordinate formatting: two decimals, trailing zeros trimmed.
fn num(value: f64) -> String {
    let text = format!("{value:.2}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "" | "-" | "-0" => "0".to_owned(),
        other => other.to_owned(),
    }
}

fn paint_attr(name: &str, color: Color) -> String {
    if color.alpha >= 1.0 {
        format!(r#" {name}="{}""#, color.to_hex())
    } else {
        format!(
            r#" {name}="{}" {name}-opacity="{}""#,
            color.to_hex(),
            num(color.alpha)
        )
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
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn rounded_rect_path(rect: &RectPrimitive, radii: CornerRadii) -> String {
    let left = rect.x;
    let top = rect.y;
    let right = rect.x + rect.width;
    let bottom = rect.y + rect.height;
    let arc = |radius: f64, x: f64, y: f64| {
        if radius > 0.0 {
            format!("A{} {} 0 0 1 {} {}", num(radius), num(radius), num(x), num(y))
        } else {
            String::new()
        }
    };
    format!(
        "M{} {}H{}{}V{}{}H{}{}V{}{}Z",
        num(left + radii.top_left),
        num(top),
        num(right - radii.top_right),
        arc(radii.top_right, right, top + radii.top_right),
        num(bottom - radii.bottom_right),
        arc(radii.bottom_right, right - radii.bottom_right, bottom),
        num(left + radii.bottom_left),
        arc(radii.bottom_left, left, bottom - radii.bottom_left),
        num(top + radii.top_left),
        arc(radii.top_left, left + radii.top_left, top),
    )
}

fn write_rect(out: &mut String, rect: &RectPrimitive) -> std::fmt::Result {
    let radii = rect.corner_radii.clamped(rect.width, rect.height);
    let border = if rect.border_width > 0.0 {
        format!(
            r#"{} stroke-width="{}""#,
            paint_attr("stroke", rect.border_color),
            num(rect.border_width)
        )
    } else {
        String::new()
    };
    if radii.is_square() {
        write!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}"{}{border}/>"#,
            num(rect.x),
            num(rect.y),
            num(rect.width),
            num(rect.height),
            paint_attr("fill", rect.fill_color)
        )
    } else {
        write!(
            out,
            r#"<path d="{}"{}{border}/>"#,
            rounded_rect_path(rect, radii),
            paint_attr("fill", rect.fill_color)
        )
    }
}

fn write_wedge(out: &mut String, wedge: &WedgePrimitive) -> std::fmt::Result {
    let sweep = wedge.end_angle - wedge.start_angle;
    let stroke = if wedge.stroke_width > 0.0 {
        format!(
            r#"{} stroke-width="{}""#,
            paint_attr("stroke", wedge.stroke_color),
            num(wedge.stroke_width)
        )
    } else {
        String::new()
    };
    if sweep.abs() >= 360.0 && wedge.inner_radius <= 0.0 {
        return write!(
            out,
            r#"<circle cx="{}" cy="{}" r="{}"{}{stroke}/>"#,
            num(wedge.center.x),
            num(wedge.center.y),
            num(wedge.outer_radius),
            paint_attr("fill", wedge.fill_color)
        );
    }

    let large_arc = u8::from(sweep.abs() > 180.0);
    let outer_start = polar_to_cartesian(wedge.center, wedge.outer_radius, wedge.start_angle);
    let outer_end = polar_to_cartesian(wedge.center, wedge.outer_radius, wedge.end_angle);
    let mut d = String::new();
    if wedge.inner_radius > 0.0 {
        let inner_end = polar_to_cartesian(wedge.center, wedge.inner_radius, wedge.end_angle);
        let inner_start = polar_to_cartesian(wedge.center, wedge.inner_radius, wedge.start_angle);
        write!(
            d,
            "M{} {}A{r} {r} 0 {large_arc} 0 {} {}L{} {}A{ir} {ir} 0 {large_arc} 1 {} {}Z",
            num(outer_start.x),
            num(outer_start.y),
            num(outer_end.x),
            num(outer_end.y),
            num(inner_end.x),
            num(inner_end.y),
            num(inner_start.x),
            num(inner_start.y),
            r = num(wedge.outer_radius),
            ir = num(wedge.inner_radius),
        )?;
    } else {
        write!(
            d,
            "M{} {}L{} {}A{r} {r} 0 {large_arc} 0 {} {}Z",
            num(wedge.center.x),
            num(wedge.center.y),
            num(outer_start.x),
            num(outer_start.y),
            num(outer_end.x),
            num(outer_end.y),
            r = num(wedge.outer_radius),
        )?;
    }
    write!(
        out,
        r#"<path d="{d}"{}{stroke}/>"#,
        paint_attr("fill", wedge.fill_color)
    )
}

fn path_data(commands: &[PathCommand]) -> String {
    let point = |p: Point| format!("{} {}", num(p.x), num(p.y));
    commands
        .iter()
        .map(|command| match *command {
            PathCommand::MoveTo(p) => format!("M{}", point(p)),
            PathCommand::LineTo(p) => format!("L{}", point(p)),
            PathCommand::CubicTo {
                control1,
                control2,
                end,
            } => format!("C{} {} {}", point(control1), point(control2), point(end)),
            PathCommand::Close => "Z".to_owned(),
        })
        .collect()
}

fn write_path(out: &mut String, path: &PathPrimitive, fill_ref: Option<&str>) -> std::fmt::Result {
    let fill = match (&path.fill, fill_ref) {
        (_, Some(reference)) => format!(r#" fill="{reference}""#),
        (Some(Fill::Solid(color)), None) => paint_attr("fill", *color),
        _ => r#" fill="none""#.to_owned(),
    };
    let stroke = match path.stroke {
        Some(stroke) => format!(
            r#"{} stroke-width="{}" stroke-linejoin="round""#,
            paint_attr("stroke", stroke.color),
            num(stroke.width)
        ),
        None => String::new(),
    };
    write!(
        out,
        r#"<path d="{}"{fill}{stroke}/>"#,
        path_data(&path.commands)
    )
}

fn write_line(out: &mut String, line: &LinePrimitive) -> std::fmt::Result {
    let dash = match line.stroke_style {
        LineStrokeStyle::Solid => String::new(),
        LineStrokeStyle::Dashed { dash_px, gap_px } => {
            format!(r#" stroke-dasharray="{} {}""#, num(dash_px), num(gap_px))
        }
    };
    write!(
        out,
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{} stroke-width="{}"{dash}/>"#,
        num(line.x1),
        num(line.y1),
        num(line.x2),
        num(line.y2),
        paint_attr("stroke", line.color),
        num(line.stroke_width)
    )
}

fn write_circle(out: &mut String, circle: &CirclePrimitive) -> std::fmt::Result {
    let stroke = if circle.stroke_width > 0.0 {
        format!(
            r#"{} stroke-width="{}""#,
            paint_attr("stroke", circle.stroke_color),
            num(circle.stroke_width)
        )
    } else {
        String::new()
    };
    write!(
        out,
        r#"<circle cx="{}" cy="{}" r="{}"{}{stroke}/>"#,
        num(circle.center.x),
        num(circle.center.y),
        num(circle.radius),
        paint_attr("fill", circle.fill_color)
    )
}

fn write_text(out: &mut String, text: &TextPrimitive) -> std::fmt::Result {
    let anchor = match text.h_align {
        TextHAlign::Left => "start",
        TextHAlign::Center => "middle",
        TextHAlign::Right => "end",
    };
    let baseline = match text.v_align {
        TextVAlign::Top => "hanging",
        TextVAlign::Middle => "central",
        TextVAlign::Baseline => "alphabetic",
    };
    let style = if text.italic {
        r#" font-style="italic""#
    } else {
        ""
    };
    let transform = if text.rotation_deg != 0.0 {
        format!(
            r#" transform="rotate({} {} {})""#,
            num(text.rotation_deg),
            num(text.x),
            num(text.y)
        )
    } else {
        String::new()
    };
    write!(
        out,
        r#"<text x="{}" y="{}" font-family="{FONT_FAMILY}" font-size="{}" font-weight="{}"{style} text-anchor="{anchor}" dominant-baseline="{baseline}"{}{transform}>{}</text>"#,
        num(text.x),
        num(text.y),
        num(text.font_size_px),
        text.weight.css_value(),
        paint_attr("fill", text.color),
        escape_xml(&text.text)
    )
}

#[cfg(test)]
mod tests {
    use super::{SvgRenderer, escape_xml, num};
    use crate::core::{Point, Viewport};
    use crate::render::{
        Color, CornerRadii, FrameLayer, RectPrimitive, RenderFrame, Renderer, TextHAlign,
        TextPrimitive, WedgePrimitive,
    };

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(num(1.0), "1");
        assert_eq!(num(1.256), "1.26");
        assert_eq!(num(-0.001), "0");
        assert_eq!(num(12.50), "12.5");
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(escape_xml("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
    }

    #[test]
    fn renders_rect_wedge_and_text() {
        let mut frame = RenderFrame::new(Viewport::new(200, 100), Color::BLACK);
        frame.push_rect(
            FrameLayer::Series,
            RectPrimitive::new(10.0, 10.0, 20.0, 50.0, Color::WHITE)
                .with_corner_radii(CornerRadii::top(8.0)),
        );
        frame.push_wedge(
            FrameLayer::Series,
            WedgePrimitive {
                center: Point::new(100.0, 50.0),
                inner_radius: 0.0,
                outer_radius: 40.0,
                start_angle: 0.0,
                end_angle: 90.0,
                fill_color: Color::WHITE,
                stroke_width: 1.0,
                stroke_color: Color::WHITE,
            },
        );
        frame.push_text(
            FrameLayer::Labels,
            TextPrimitive::new("35%", 100.0, 50.0, 14.0, Color::WHITE, TextHAlign::Left),
        );

        let mut renderer = SvgRenderer::new();
        renderer.render(&frame).expect("render");
        let svg = renderer.document();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(">35%</text>"));
        assert!(svg.contains("A40 40 0 0 0 100 10Z"));
        assert_eq!(renderer.last_stats().elements_written, 3);
    }
}
