use crate::core::{GridData, Point, ScalePair};
use crate::error::CanvasResult;
use crate::render::{Color, LinePrimitive, Surface};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStyle {
    pub stroke_color: Color,
    pub stroke_width: f64,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            stroke_color: Color::GREY,
            stroke_width: 0.5,
        }
    }
}

/// Pixel-space segments joining each grid node to its right and lower
/// neighbours. No diagonals.
#[must_use]
pub fn grid_segments(scales: ScalePair, grid: &GridData) -> Vec<(Point, Point)> {
    let rows = grid.rows();
    let cols = grid.cols();
    let mut segments = Vec::with_capacity(
        rows.saturating_mul(cols.saturating_sub(1))
            .saturating_add(cols.saturating_mul(rows.saturating_sub(1))),
    );
    let pixel = |row: usize, col: usize| grid.get(row, col).map(|p| scales.to_pixel(p));

    for row in 0..rows {
        for col in 0..cols {
            let Some(from) = pixel(row, col) else {
                continue;
            };
            if let Some(right) = pixel(row, col + 1) {
                segments.push((from, right));
            }
            if let Some(below) = pixel(row + 1, col) {
                segments.push((from, below));
            }
        }
    }
    segments
}

/// Draws `grid` as a mesh. `scales` must be the pair used for the enclosing
/// frame so nodes line up with the axis ticks.
pub fn draw_grid<S: Surface + ?Sized>(
    surface: &mut S,
    scales: ScalePair,
    grid: &GridData,
    style: &GridStyle,
) -> CanvasResult<()> {
    for (from, to) in grid_segments(scales, grid) {
        surface.draw_line(LinePrimitive::new(
            from.x,
            from.y,
            to.x,
            to.y,
            style.stroke_width,
            style.stroke_color,
        ))?;
    }
    Ok(())
}
