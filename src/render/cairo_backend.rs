use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::PI;

use crate::error::{CanvasError, CanvasResult};
use crate::render::{
    CirclePrimitive, Color, EllipsePrimitive, MarkerPrimitive, RectPrimitive, RenderFrame,
    Renderer, TextHAlign,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
    pub markers_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> CanvasResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// Immediate primitives are painted first, retained markers last so the
/// selection handles always sit on top of frames and meshes.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> CanvasResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(CanvasError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::rgb(1.0, 1.0, 1.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> CanvasResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Writes the last rendered surface as PNG.
    pub fn write_png(&self, out: &mut impl std::io::Write) -> CanvasResult<()> {
        self.surface
            .write_to_png(out)
            .map_err(|err| CanvasError::RenderFailed(format!("failed to encode png: {err}")))
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> CanvasResult<()> {
        frame.validate()?;
        self.clear_color.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        for line in &frame.lines {
            apply_color(context, line.color);
            context.set_line_width(line.stroke_width);
            context.move_to(line.x1, line.y1);
            context.line_to(line.x2, line.y2);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke line", err))?;
            stats.lines_drawn += 1;
        }

        for rect in &frame.rects {
            draw_rect(context, *rect)?;
            stats.rects_drawn += 1;
        }

        for circle in &frame.circles {
            draw_circle(context, *circle)?;
            stats.circles_drawn += 1;
        }

        for text in &frame.texts {
            let layout = pangocairo::functions::create_layout(context);
            let font_description =
                FontDescription::from_string(&format!("Sans {}", text.font_size_px));
            layout.set_font_description(Some(&font_description));
            layout.set_text(&text.text);

            let (text_width, text_height) = layout.pixel_size();
            let x = match text.h_align {
                TextHAlign::Left => text.x,
                TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
                TextHAlign::Right => text.x - f64::from(text_width),
            };

            apply_color(context, text.color);
            // Labels are anchored on their vertical middle.
            context.move_to(x, text.y - f64::from(text_height) / 2.0);
            pangocairo::functions::show_layout(context, &layout);
            stats.texts_drawn += 1;
        }

        for marker in frame.markers.values() {
            match *marker {
                MarkerPrimitive::Circle(circle) => draw_circle(context, circle)?,
                MarkerPrimitive::Ellipse(ellipse) => draw_ellipse(context, ellipse)?,
                MarkerPrimitive::Rect(rect) => draw_rect(context, rect)?,
            }
            stats.markers_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> CanvasResult<()> {
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
    ) -> CanvasResult<()> {
        self.render_with_context(context, frame)
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn draw_rect(context: &Context, rect: RectPrimitive) -> CanvasResult<()> {
    context.rectangle(rect.x, rect.y, rect.width, rect.height);
    if let Some(fill) = rect.fill_color {
        apply_color(context, fill);
        context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
    }
    if rect.border_width > 0.0 {
        apply_color(context, rect.border_color);
        context.set_line_width(rect.border_width);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke rectangle border", err))?;
    } else {
        context.new_path();
    }
    Ok(())
}

fn draw_circle(context: &Context, circle: CirclePrimitive) -> CanvasResult<()> {
    context.new_sub_path();
    context.arc(circle.cx, circle.cy, circle.radius, 0.0, 2.0 * PI);
    apply_color(context, circle.fill_color);
    context
        .fill()
        .map_err(|err| map_backend_error("failed to fill circle", err))
}

fn draw_ellipse(context: &Context, ellipse: EllipsePrimitive) -> CanvasResult<()> {
    if ellipse.rx <= 0.0 || ellipse.ry <= 0.0 {
        return Ok(());
    }
    context
        .save()
        .map_err(|err| map_backend_error("failed to save context", err))?;
    context.translate(ellipse.cx, ellipse.cy);
    context.scale(ellipse.rx, ellipse.ry);
    context.new_sub_path();
    context.arc(0.0, 0.0, 1.0, 0.0, 2.0 * PI);
    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore context", err))?;
    apply_color(context, ellipse.fill_color);
    context
        .fill()
        .map_err(|err| map_backend_error("failed to fill ellipse", err))
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> CanvasError {
    CanvasError::RenderFailed(format!("{prefix}: {err}"))
}
