use cairo::{Context, Format, ImageSurface, LinearGradient};
use pango::{FontDescription, Style, Weight};
use std::f64::consts::{FRAC_PI_2, PI};

use crate::core::PathCommand;
use crate::core::pie::RADIAN;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, Fill, FontWeight, LineStrokeStyle, PathPrimitive, RectPrimitive, RenderFrame,
    Renderer, TextHAlign, TextPrimitive, TextVAlign, WedgePrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub wedges_drawn: usize,
    pub paths_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// This renderer supports two modes:
/// - offscreen image-surface rendering through `Renderer::render`, then
///   `surface().write_to_png(..)` for PNG export
/// - in-place rendering on an external Cairo context through
///   `CairoContextRenderer`
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        apply_color(context, frame.background);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        for (_, layer) in frame.iter_layers() {
            for rect in &layer.rects {
                append_rect_path(context, *rect);
                fill_and_stroke(context, rect.fill_color, rect.border_width, rect.border_color)?;
                stats.rects_drawn += 1;
            }

            for wedge in &layer.wedges {
                append_wedge_path(context, *wedge);
                fill_and_stroke(
                    context,
                    wedge.fill_color,
                    wedge.stroke_width,
                    wedge.stroke_color,
                )?;
                stats.wedges_drawn += 1;
            }

            for path in &layer.paths {
                draw_path(context, path)?;
                stats.paths_drawn += 1;
            }

            for line in &layer.lines {
                apply_color(context, line.color);
                context.set_line_width(line.stroke_width);
                match line.stroke_style {
                    LineStrokeStyle::Solid => context.set_dash(&[], 0.0),
                    LineStrokeStyle::Dashed { dash_px, gap_px } => {
                        context.set_dash(&[dash_px, gap_px], 0.0);
                    }
                }
                context.move_to(line.x1, line.y1);
                context.line_to(line.x2, line.y2);
                context
                    .stroke()
                    .map_err(|err| map_backend_error("failed to stroke line", err))?;
                stats.lines_drawn += 1;
            }
            context.set_dash(&[], 0.0);

            for circle in &layer.circles {
                context.new_sub_path();
                context.arc(circle.center.x, circle.center.y, circle.radius, 0.0, 2.0 * PI);
                fill_and_stroke(
                    context,
                    circle.fill_color,
                    circle.stroke_width,
                    circle.stroke_color,
                )?;
                stats.circles_drawn += 1;
            }

            for text in &layer.texts {
                draw_text(context, text)?;
                stats.texts_drawn += 1;
            }
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn fill_and_stroke(
    context: &Context,
    fill: Color,
    stroke_width: f64,
    stroke_color: Color,
) -> ChartResult<()> {
    apply_color(context, fill);
    if stroke_width > 0.0 {
        context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill shape", err))?;
        apply_color(context, stroke_color);
        context.set_line_width(stroke_width);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke shape border", err))
    } else {
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill shape", err))
    }
}

fn append_rect_path(context: &Context, rect: RectPrimitive) {
    let radii = rect.corner_radii.clamped(rect.width, rect.height);
    if radii.is_square() {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        return;
    }

    let left = rect.x;
    let top = rect.y;
    let right = rect.x + rect.width;
    let bottom = rect.y + rect.height;

    context.new_sub_path();
    context.arc(
        right - radii.top_right,
        top + radii.top_right,
        radii.top_right,
        -FRAC_PI_2,
        0.0,
    );
    context.arc(
        right - radii.bottom_right,
        bottom - radii.bottom_right,
        radii.bottom_right,
        0.0,
        FRAC_PI_2,
    );
    context.arc(
        left + radii.bottom_left,
        bottom - radii.bottom_left,
        radii.bottom_left,
        FRAC_PI_2,
        PI,
    );
    context.arc(
        left + radii.top_left,
        top + radii.top_left,
        radii.top_left,
        PI,
        PI + FRAC_PI_2,
    );
    context.close_path();
}

fn append_wedge_path(context: &Context, wedge: WedgePrimitive) {
    // Chart angles run counter-clockwise with y up; Cairo angles run clockwise
    // with y down, so both are negated and traced with `arc_negative`.
    let start = -wedge.start_angle * RADIAN;
    let end = -wedge.end_angle * RADIAN;
    let (cx, cy) = (wedge.center.x, wedge.center.y);

    context.new_path();
    if wedge.inner_radius > 0.0 {
        context.arc_negative(cx, cy, wedge.outer_radius, start, end);
        context.arc(cx, cy, wedge.inner_radius, end, start);
    } else {
        context.move_to(cx, cy);
        context.arc_negative(cx, cy, wedge.outer_radius, start, end);
    }
    context.close_path();
}

fn draw_path(context: &Context, path: &PathPrimitive) -> ChartResult<()> {
    context.new_path();
    for command in &path.commands {
        match *command {
            PathCommand::MoveTo(point) => context.move_to(point.x, point.y),
            PathCommand::LineTo(point) => context.line_to(point.x, point.y),
            PathCommand::CubicTo {
                control1,
                control2,
                end,
            } => context.curve_to(control1.x, control1.y, control2.x, control2.y, end.x, end.y),
            PathCommand::Close => context.close_path(),
        }
    }

    if let Some(fill) = &path.fill {
        match fill {
            Fill::Solid(color) => apply_color(context, *color),
            Fill::VerticalGradient(stops) => {
                let (_, top, _, bottom) = path.bounds().unwrap_or((0.0, 0.0, 0.0, 1.0));
                let gradient = LinearGradient::new(0.0, top, 0.0, bottom);
                for stop in stops {
                    gradient.add_color_stop_rgba(
                        stop.offset,
                        stop.color.red,
                        stop.color.green,
                        stop.color.blue,
                        stop.color.alpha,
                    );
                }
                context
                    .set_source(&gradient)
                    .map_err(|err| map_backend_error("failed to set gradient source", err))?;
            }
        }
        if path.stroke.is_some() {
            context
                .fill_preserve()
                .map_err(|err| map_backend_error("failed to fill path", err))?;
        } else {
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill path", err))?;
        }
    }

    if let Some(stroke) = path.stroke {
        apply_color(context, stroke.color);
        context.set_line_width(stroke.width);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke path", err))?;
    }
    Ok(())
}

fn draw_text(context: &Context, text: &TextPrimitive) -> ChartResult<()> {
    let layout = pangocairo::functions::create_layout(context);
    let mut font_description = FontDescription::from_string(&format!("Sans {}", text.font_size_px));
    font_description.set_weight(match text.weight {
        FontWeight::Normal => Weight::Normal,
        FontWeight::Medium => Weight::Medium,
        FontWeight::SemiBold => Weight::Semibold,
        FontWeight::Bold => Weight::Bold,
    });
    if text.italic {
        font_description.set_style(Style::Italic);
    }
    layout.set_font_description(Some(&font_description));
    layout.set_text(&text.text);

    let (text_width, text_height) = layout.pixel_size();
    let dx = match text.h_align {
        TextHAlign::Left => 0.0,
        TextHAlign::Center => -f64::from(text_width) / 2.0,
        TextHAlign::Right => -f64::from(text_width),
    };
    let baseline_px = f64::from(layout.baseline()) / f64::from(pango::SCALE);
    let dy = match text.v_align {
        TextVAlign::Top => 0.0,
        TextVAlign::Middle => -f64::from(text_height) / 2.0,
        TextVAlign::Baseline => -baseline_px,
    };

    context
        .save()
        .map_err(|err| map_backend_error("failed to save context", err))?;
    context.translate(text.x, text.y);
    context.rotate(text.rotation_deg * RADIAN);
    apply_color(context, text.color);
    context.move_to(dx, dy);
    pangocairo::functions::show_layout(context, &layout);
    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore context", err))
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
