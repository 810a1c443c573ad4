//! Pointer-driven selection state machines.

mod area_selector;
mod point_selector;
mod remote_marker;
mod scatter_picker;

pub use area_selector::{AreaSelector, AreaSelectorBuilder, AreaSpace, SelectionReadout};
pub use point_selector::{PointSelector, PointSelectorBuilder};
pub use remote_marker::{RemoteControlledMarker, RemoteMarkerStyle};
pub use scatter_picker::ScatterPicker;

use serde::{Deserialize, Serialize};

use crate::core::Point;

/// Interaction state shared by the selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    /// Moving the marker or the whole selection.
    Dragging,
    /// Dragging the resize handle of an area selection.
    Resizing,
}

impl InteractionMode {
    #[must_use]
    pub fn is_active(self) -> bool {
        self != Self::Idle
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerPhase {
    Down,
    Move,
    /// Release or touch cancel. Hosts observe this globally, not only over the
    /// surface, so drags that leave the widget still end.
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerSource {
    Mouse,
    Touch,
}

/// Pointer input normalized to surface-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub position: Point,
    pub source: PointerSource,
}

impl PointerEvent {
    #[must_use]
    pub fn mouse(phase: PointerPhase, x: f64, y: f64) -> Self {
        Self {
            phase,
            position: Point::new(x, y),
            source: PointerSource::Mouse,
        }
    }

    /// Uses the first active touch point; `None` when no touch is present
    /// (for example a `touchend` with an empty list), except for `Up`, which
    /// needs no position.
    #[must_use]
    pub fn touch(phase: PointerPhase, touches: &[Point]) -> Option<Self> {
        let position = match (touches.first(), phase) {
            (Some(point), _) => *point,
            (None, PointerPhase::Up) => Point::default(),
            (None, _) => return None,
        };
        Some(Self {
            phase,
            position,
            source: PointerSource::Touch,
        })
    }
}

/// Client-space origin of a surface, used to turn client coordinates into
/// surface-local ones.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
}

impl ClientRect {
    #[must_use]
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }

    #[must_use]
    pub fn to_local(self, client_x: f64, client_y: f64) -> Point {
        Point::new(client_x - self.left, client_y - self.top)
    }

    #[must_use]
    pub fn event(self, phase: PointerPhase, source: PointerSource, client: Point) -> PointerEvent {
        PointerEvent {
            phase,
            position: self.to_local(client.x, client.y),
            source,
        }
    }
}

/// Receiver for a formatted numeric readout (a label next to a plot).
pub type LabelSink = Box<dyn FnMut(&str)>;

pub(crate) fn format_readout(value: f64) -> String {
    format!("{value:.2}")
}
