use tracing::{debug, trace};

use crate::config::PointSelectorConfig;
use crate::core::{PlotArea, Point, Range, ScalePair};
use crate::error::{CanvasError, CanvasResult};
use crate::render::{CirclePrimitive, Color, MarkerId, MarkerPrimitive, Surface};

use super::{InteractionMode, LabelSink, PointerEvent, PointerPhase, format_readout};

type ChangeHandler = Box<dyn FnMut(f64, f64)>;

/// Draggable dot bound to a 2D domain.
///
/// Every accepted pointer move clamps the dot into the plot area, maps it back
/// to domain units and calls `on_change(x, y)` synchronously. One call is also
/// made at construction so consumers always see a value.
pub struct PointSelector {
    scales: ScalePair,
    area: PlotArea,
    config: PointSelectorConfig,
    mode: InteractionMode,
    position_px: Point,
    drag_offset: Point,
    on_change: ChangeHandler,
    readouts: Option<(LabelSink, LabelSink)>,
}

impl std::fmt::Debug for PointSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointSelector")
            .field("scales", &self.scales)
            .field("config", &self.config)
            .field("mode", &self.mode)
            .field("position_px", &self.position_px)
            .finish_non_exhaustive()
    }
}

pub struct PointSelectorBuilder {
    scales: ScalePair,
    config: PointSelectorConfig,
    initial: Option<Point>,
    on_change: Option<ChangeHandler>,
    readouts: Option<(LabelSink, LabelSink)>,
}

impl PointSelectorBuilder {
    #[must_use]
    pub fn with_config(mut self, config: PointSelectorConfig) -> Self {
        self.config = config;
        self
    }

    /// Starting position in domain units. Defaults to the centre of both domains.
    #[must_use]
    pub fn with_initial(mut self, initial: Point) -> Self {
        self.initial = Some(initial);
        self
    }

    /// Labels that receive the current x/y domain values with two decimals.
    #[must_use]
    pub fn with_readouts(
        mut self,
        x_label: impl FnMut(&str) + 'static,
        y_label: impl FnMut(&str) + 'static,
    ) -> Self {
        self.readouts = Some((Box::new(x_label), Box::new(y_label)));
        self
    }

    #[must_use]
    pub fn on_change(mut self, handler: impl FnMut(f64, f64) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    /// Places the dot on `surface` and fires the initial change.
    pub fn build<S: Surface + ?Sized>(self, surface: &mut S) -> CanvasResult<PointSelector> {
        let config = self.config.validate()?;
        let initial = self.initial.unwrap_or_else(|| {
            Point::new(self.scales.x.domain().mid(), self.scales.y.domain().mid())
        });
        check_in_domain(initial.x, self.scales.x.domain())?;
        check_in_domain(initial.y, self.scales.y.domain())?;

        let mut selector = PointSelector {
            scales: self.scales,
            area: self.scales.plot_area(),
            config,
            mode: InteractionMode::Idle,
            position_px: self.scales.to_pixel(initial),
            drag_offset: Point::default(),
            on_change: self.on_change.unwrap_or_else(|| Box::new(|_, _| {})),
            readouts: self.readouts,
        };
        selector.apply(surface)?;
        Ok(selector)
    }
}

impl PointSelector {
    #[must_use]
    pub fn builder(scales: ScalePair) -> PointSelectorBuilder {
        PointSelectorBuilder {
            scales,
            config: PointSelectorConfig::default(),
            initial: None,
            on_change: None,
            readouts: None,
        }
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn scales(&self) -> ScalePair {
        self.scales
    }

    #[must_use]
    pub fn position_px(&self) -> Point {
        self.position_px
    }

    /// Current position in domain units.
    #[must_use]
    pub fn position(&self) -> Point {
        self.scales.to_domain(self.position_px)
    }

    pub fn handle_event<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        event: PointerEvent,
    ) -> CanvasResult<()> {
        match event.phase {
            PointerPhase::Down => self.pointer_down(surface, event.position).map(|_| ()),
            PointerPhase::Move => self.pointer_move(surface, event.position).map(|_| ()),
            PointerPhase::Up => {
                self.pointer_up();
                Ok(())
            }
        }
    }

    /// Starts a drag when the press lands on the dot, or anywhere in the plot
    /// area in click-anywhere mode (the dot then jumps to the press).
    ///
    /// Returns whether the press was accepted.
    pub fn pointer_down<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        position: Point,
    ) -> CanvasResult<bool> {
        if self.config.click_anywhere && self.area.contains(position) {
            self.mode = InteractionMode::Dragging;
            self.drag_offset = Point::default();
            self.position_px = position;
            debug!(x = position.x, y = position.y, "point selector jump");
            self.apply(surface)?;
            return Ok(true);
        }

        if position.distance_to(self.position_px) <= self.config.hit_radius_px {
            self.mode = InteractionMode::Dragging;
            self.drag_offset = Point::new(
                position.x - self.position_px.x,
                position.y - self.position_px.y,
            );
            debug!(x = position.x, y = position.y, "point selector drag started");
            return Ok(true);
        }

        Ok(false)
    }

    /// Follows the pointer while dragging. Returns the new domain position,
    /// or `None` when idle.
    pub fn pointer_move<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        position: Point,
    ) -> CanvasResult<Option<Point>> {
        if self.mode != InteractionMode::Dragging {
            return Ok(None);
        }
        self.position_px = self.area.clamp(Point::new(
            position.x - self.drag_offset.x,
            position.y - self.drag_offset.y,
        ));
        trace!(x = self.position_px.x, y = self.position_px.y, "point selector move");
        self.apply(surface).map(Some)
    }

    /// Ends any drag. Returns whether a drag was active.
    pub fn pointer_up(&mut self) -> bool {
        let was_active = self.mode.is_active();
        if was_active {
            debug!("point selector drag ended");
        }
        self.mode = InteractionMode::Idle;
        was_active
    }

    /// Moves the dot programmatically. The position must lie inside both domains.
    pub fn set_position<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        position: Point,
    ) -> CanvasResult<()> {
        check_in_domain(position.x, self.scales.x.domain())?;
        check_in_domain(position.y, self.scales.y.domain())?;
        self.position_px = self.scales.to_pixel(position);
        self.apply(surface).map(|_| ())
    }

    fn apply<S: Surface + ?Sized>(&mut self, surface: &mut S) -> CanvasResult<Point> {
        surface.set_marker(
            MarkerId::SELECTOR_DOT,
            MarkerPrimitive::Circle(CirclePrimitive::new(
                self.position_px.x,
                self.position_px.y,
                self.config.dot_radius_px,
                Color::RED,
            )),
        )?;
        let domain = self.position();
        if let Some((x_label, y_label)) = self.readouts.as_mut() {
            x_label(&format_readout(domain.x));
            y_label(&format_readout(domain.y));
        }
        (self.on_change)(domain.x, domain.y);
        Ok(domain)
    }
}

fn check_in_domain(value: f64, domain: Range) -> CanvasResult<()> {
    if !domain.contains(value) {
        return Err(CanvasError::OutOfBounds {
            value,
            min: domain.min(),
            max: domain.max(),
        });
    }
    Ok(())
}
