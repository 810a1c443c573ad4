use crate::core::{Point, ScalePair};
use crate::error::{CanvasError, CanvasResult};
use crate::render::{CirclePrimitive, Color, Surface};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterStyle {
    pub radius_px: f64,
    pub highlight_radius_px: f64,
    pub highlight_color: Color,
}

impl Default for ScatterStyle {
    fn default() -> Self {
        Self {
            radius_px: 2.0,
            highlight_radius_px: 4.0,
            highlight_color: Color::RED,
        }
    }
}

/// Draws domain-space `points` as dots, one colour per point. The highlighted
/// point, if any, is drawn last so it stays on top.
pub fn draw_scatter<S: Surface + ?Sized>(
    surface: &mut S,
    scales: ScalePair,
    points: &[Point],
    colors: &[Color],
    highlight: Option<usize>,
    style: &ScatterStyle,
) -> CanvasResult<()> {
    if points.len() != colors.len() {
        return Err(CanvasError::InvalidData(format!(
            "scatter needs one colour per point: {} points, {} colours",
            points.len(),
            colors.len()
        )));
    }

    for (index, (point, color)) in points.iter().zip(colors).enumerate() {
        if Some(index) == highlight {
            continue;
        }
        let pixel = scales.to_pixel(*point);
        surface.draw_circle(CirclePrimitive::new(pixel.x, pixel.y, style.radius_px, *color))?;
    }

    if let Some(point) = highlight.and_then(|index| points.get(index)) {
        let pixel = scales.to_pixel(*point);
        surface.draw_circle(CirclePrimitive::new(
            pixel.x,
            pixel.y,
            style.highlight_radius_px,
            style.highlight_color,
        ))?;
    }
    Ok(())
}
