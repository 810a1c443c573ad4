pub mod grid;
pub mod range;
pub mod scale;
pub mod types;

pub use grid::GridData;
pub use range::{
    BoundsPolicy, Range, add_margin, flip_unit_y, map_from_unit, map_from_unit_clamped,
    map_from_unit_with, map_length_from_range, map_length_to_range, map_range,
    map_range_descending, map_to_unit, unmap_range_descending,
};
pub use scale::{AxisOrientation, Scale, ScalePair};
pub use types::{Margins, PlotArea, Point, Rect, Viewport};
