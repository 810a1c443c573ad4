use smallvec::SmallVec;

use crate::core::{Range, ScalePair};
use crate::error::{CanvasError, CanvasResult};
use crate::render::{Color, LinePrimitive, Surface, TextHAlign, TextPrimitive};

/// Visual parameters of the axis frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStyle {
    pub stroke_color: Color,
    pub stroke_width: f64,
    pub tick_length_px: f64,
    pub label_color: Color,
    pub label_font_size_px: f64,
    pub label_precision: usize,
    /// Distance from the x axis to the centre of its labels.
    pub x_label_offset_px: f64,
    /// Gap between the y tick end and its right-aligned labels.
    pub y_label_gap_px: f64,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            stroke_color: Color::BLACK,
            stroke_width: 0.5,
            tick_length_px: 6.0,
            label_color: Color::BLACK,
            label_font_size_px: 10.0,
            label_precision: 1,
            x_label_offset_px: 18.0,
            y_label_gap_px: 3.0,
        }
    }
}

/// `count` evenly spaced values over `range`, both endpoints included.
pub fn generate_ticks(range: Range, count: usize) -> CanvasResult<SmallVec<[f64; 12]>> {
    if count < 2 {
        return Err(CanvasError::config(format!(
            "tick count must be >= 2, got {count}"
        )));
    }
    let step = range.size() / (count - 1) as f64;
    let mut ticks: SmallVec<[f64; 12]> = (0..count)
        .map(|index| range.min() + index as f64 * step)
        .collect();
    // Pin the last tick so accumulated error never pushes it off the axis.
    if let Some(last) = ticks.last_mut() {
        *last = range.max();
    }
    Ok(ticks)
}

/// Draws the bordered axis frame of a plot: x axis with ticks and labels along
/// the bottom, y axis along the left, plus top and right border segments.
///
/// Primitives accumulate, so callers redrawing a frame clear the surface first.
pub fn draw_frame<S: Surface + ?Sized>(
    surface: &mut S,
    scales: ScalePair,
    tick_count: usize,
    style: &FrameStyle,
) -> CanvasResult<()> {
    let x_ticks = generate_ticks(scales.x.domain(), tick_count)?;
    let y_ticks = generate_ticks(scales.y.domain(), tick_count)?;
    let area = scales.plot_area();
    let line = |x1, y1, x2, y2| {
        LinePrimitive::new(x1, y1, x2, y2, style.stroke_width, style.stroke_color)
    };

    surface.draw_line(line(area.min_x, area.max_y, area.max_x, area.max_y))?;
    for value in x_ticks {
        let x = scales.x.to_pixel(value);
        surface.draw_line(line(x, area.max_y, x, area.max_y + style.tick_length_px))?;
        surface.draw_text(TextPrimitive::new(
            format_tick_label(value, style.label_precision),
            x,
            area.max_y + style.x_label_offset_px,
            style.label_font_size_px,
            style.label_color,
            TextHAlign::Center,
        ))?;
    }

    surface.draw_line(line(area.min_x, area.min_y, area.min_x, area.max_y))?;
    for value in y_ticks {
        let y = scales.y.to_pixel(value);
        surface.draw_line(line(area.min_x - style.tick_length_px, y, area.min_x, y))?;
        surface.draw_text(TextPrimitive::new(
            format_tick_label(value, style.label_precision),
            area.min_x - style.tick_length_px - style.y_label_gap_px,
            y,
            style.label_font_size_px,
            style.label_color,
            TextHAlign::Right,
        ))?;
    }

    surface.draw_line(line(area.min_x, area.min_y, area.max_x, area.min_y))?;
    surface.draw_line(line(area.max_x, area.min_y, area.max_x, area.max_y))?;
    Ok(())
}

fn format_tick_label(value: f64, precision: usize) -> String {
    let text = format!("{value:.precision$}");
    // Values like -1e-17 would otherwise print as "-0.0".
    match text.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_owned(),
        _ => text,
    }
}
