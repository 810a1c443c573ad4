use serde::{Deserialize, Serialize};

use crate::core::range::Range;
use crate::core::types::Point;
use crate::error::{CanvasError, CanvasResult};

/// Rectangular mesh of domain-space points, stored row-major.
///
/// Rows usually come from a uniform parameter sweep; after passing through an
/// encoder the points are deformed but the row/column topology is preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridParts", into = "GridParts")]
pub struct GridData {
    rows: usize,
    cols: usize,
    points: Vec<Point>,
}

#[derive(Serialize, Deserialize)]
struct GridParts {
    rows: usize,
    cols: usize,
    points: Vec<Point>,
}

impl TryFrom<GridParts> for GridData {
    type Error = CanvasError;

    fn try_from(parts: GridParts) -> CanvasResult<Self> {
        Self::from_parts(parts.rows, parts.cols, parts.points)
    }
}

impl From<GridData> for GridParts {
    fn from(grid: GridData) -> Self {
        Self {
            rows: grid.rows,
            cols: grid.cols,
            points: grid.points,
        }
    }
}

impl GridData {
    /// Builds a grid from nested rows, rejecting empty or ragged input.
    pub fn from_rows(rows: Vec<Vec<Point>>) -> CanvasResult<Self> {
        let row_count = rows.len();
        let cols = rows.first().map_or(0, Vec::len);
        if row_count == 0 || cols == 0 {
            return Err(CanvasError::config("grid must have at least one row and column"));
        }
        if let Some(index) = rows.iter().position(|row| row.len() != cols) {
            return Err(CanvasError::config(format!(
                "grid row {index} has {} points, expected {cols}",
                rows[index].len()
            )));
        }

        let points: Vec<Point> = rows.into_iter().flatten().collect();
        Self::from_parts(row_count, cols, points)
    }

    /// Uniform `rows x cols` sweep over `x_range x y_range`, endpoints included.
    pub fn uniform(x_range: Range, y_range: Range, rows: usize, cols: usize) -> CanvasResult<Self> {
        if rows < 2 || cols < 2 {
            return Err(CanvasError::config("uniform grid needs at least 2 rows and 2 cols"));
        }
        let mut points = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            let fy = row as f64 / (rows - 1) as f64;
            for col in 0..cols {
                let fx = col as f64 / (cols - 1) as f64;
                points.push(Point::new(
                    x_range.min() + fx * x_range.size(),
                    y_range.min() + fy * y_range.size(),
                ));
            }
        }
        Ok(Self { rows, cols, points })
    }

    /// Reinterprets a flat `[rows * cols, 2]` buffer of `(x, y)` pairs.
    pub fn from_flat_pairs(values: &[f32], rows: usize, cols: usize) -> CanvasResult<Self> {
        let expected = rows
            .checked_mul(cols)
            .and_then(|count| count.checked_mul(2))
            .ok_or_else(|| CanvasError::InvalidData(format!("{rows}x{cols} grid overflows")))?;
        if values.len() != expected {
            return Err(CanvasError::InvalidData(format!(
                "expected {expected} values for a {rows}x{cols} grid of pairs, got {}",
                values.len()
            )));
        }
        let points: Vec<Point> = values
            .chunks_exact(2)
            .map(|pair| Point::new(f64::from(pair[0]), f64::from(pair[1])))
            .collect();
        Self::from_parts(rows, cols, points)
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<Point> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.points.get(row * self.cols + col).copied()
    }

    pub fn row(&self, row: usize) -> Option<&[Point]> {
        let start = row.checked_mul(self.cols)?;
        self.points.get(start..start + self.cols)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Single validation path for every constructor and for deserialization.
    fn from_parts(rows: usize, cols: usize, points: Vec<Point>) -> CanvasResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(CanvasError::config("grid must have at least one row and column"));
        }
        if rows.checked_mul(cols) != Some(points.len()) {
            return Err(CanvasError::InvalidData(format!(
                "{rows}x{cols} grid needs {} points, got {}",
                rows.saturating_mul(cols),
                points.len()
            )));
        }
        if points.iter().any(|point| !point.is_finite()) {
            return Err(CanvasError::InvalidData("grid points must be finite".to_owned()));
        }
        Ok(Self { rows, cols, points })
    }
}
