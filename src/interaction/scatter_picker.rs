use ordered_float::OrderedFloat;
use tracing::{debug, trace};

use crate::core::{Point, ScalePair};
use crate::error::{CanvasError, CanvasResult};

use super::{InteractionMode, PointerEvent, PointerPhase};

pub const DEFAULT_PICK_THRESHOLD_PX: f64 = 10.0;

/// Picks the dataset sample nearest to the pointer.
///
/// Samples outside the scale domains are never picked, and nothing is picked
/// when the nearest sample is farther than the threshold. A press that picks a
/// sample starts a drag, and every move of that drag re-picks.
pub struct ScatterPicker {
    scales: ScalePair,
    threshold_px: f64,
    points: Vec<Point>,
    mode: InteractionMode,
    selected: Option<usize>,
    on_select: Box<dyn FnMut(usize)>,
}

impl std::fmt::Debug for ScatterPicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScatterPicker")
            .field("scales", &self.scales)
            .field("threshold_px", &self.threshold_px)
            .field("points", &self.points.len())
            .field("mode", &self.mode)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

impl ScatterPicker {
    #[must_use]
    pub fn new(scales: ScalePair, points: Vec<Point>) -> Self {
        Self {
            scales,
            threshold_px: DEFAULT_PICK_THRESHOLD_PX,
            points,
            mode: InteractionMode::Idle,
            selected: None,
            on_select: Box::new(|_| {}),
        }
    }

    pub fn with_threshold(mut self, threshold_px: f64) -> CanvasResult<Self> {
        if !threshold_px.is_finite() || threshold_px < 0.0 {
            return Err(CanvasError::config(
                "pick threshold must be finite and >= 0",
            ));
        }
        self.threshold_px = threshold_px;
        Ok(self)
    }

    #[must_use]
    pub fn on_select(mut self, handler: impl FnMut(usize) + 'static) -> Self {
        self.on_select = Box::new(handler);
        self
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Index of the nearest in-domain sample within the threshold.
    #[must_use]
    pub fn pick(&self, pixel: Point) -> Option<usize> {
        let x_domain = self.scales.x.domain();
        let y_domain = self.scales.y.domain();
        self.points
            .iter()
            .enumerate()
            .filter(|(_, point)| x_domain.contains(point.x) && y_domain.contains(point.y))
            .map(|(index, point)| (index, self.scales.to_pixel(*point).distance_to(pixel)))
            .min_by_key(|(_, distance)| OrderedFloat(*distance))
            .filter(|(_, distance)| *distance <= self.threshold_px)
            .map(|(index, _)| index)
    }

    pub fn handle_event(&mut self, event: PointerEvent) -> Option<usize> {
        match event.phase {
            PointerPhase::Down => {
                let picked = self.select_at(event.position);
                if picked.is_some() {
                    self.mode = InteractionMode::Dragging;
                    debug!(x = event.position.x, y = event.position.y, "scatter pick started");
                }
                picked
            }
            PointerPhase::Move if self.mode.is_active() => self.select_at(event.position),
            PointerPhase::Move => None,
            PointerPhase::Up => {
                self.mode = InteractionMode::Idle;
                None
            }
        }
    }

    fn select_at(&mut self, pixel: Point) -> Option<usize> {
        let index = self.pick(pixel)?;
        if self.selected != Some(index) {
            trace!(index, "scatter sample selected");
            self.selected = Some(index);
            (self.on_select)(index);
        }
        Some(index)
    }
}
