use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::AreaSelectorConfig;
use crate::core::{PlotArea, Point, Range, Rect, flip_unit_y, map_from_unit, map_range};
use crate::error::{CanvasError, CanvasResult};
use crate::render::{Color, MarkerId, MarkerPrimitive, RectPrimitive, Surface};

use super::{InteractionMode, PointerEvent, PointerPhase};

type RectHandler = Box<dyn FnMut(Rect)>;

/// Coordinate convention in which an [`AreaSelector`] accepts its initial
/// rectangle and reports changes. Dragging itself always runs in top-left
/// origin pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum AreaSpace {
    /// Surface pixels, top-left origin.
    #[default]
    Pixel,
    /// Plot area normalized to `[0, 1]`, top-left origin.
    Unit,
    /// Plot area normalized to `[0, 1]`, bottom-left origin (y grows upward).
    FlippedUnit,
    /// Data units with y growing upward, as read off the plot axes.
    Domain { x: Range, y: Range },
}

impl AreaSpace {
    /// Converts an externally supplied rectangle into pixels. Values outside
    /// the space are rejected rather than clamped.
    pub fn rect_to_pixels(self, area: PlotArea, rect: Rect) -> CanvasResult<Rect> {
        if !rect.is_finite() || rect.width < 0.0 || rect.height < 0.0 {
            return Err(CanvasError::config(
                "selection rectangle must be finite with non-negative size",
            ));
        }
        match self {
            Self::Pixel => Ok(rect),
            Self::Unit => {
                let x_range = Range::new(area.min_x, area.max_x)?;
                let y_range = Range::new(area.min_y, area.max_y)?;
                Ok(Rect::new(
                    map_from_unit(x_range, rect.x)?,
                    map_from_unit(y_range, rect.y)?,
                    rect.width * area.width(),
                    rect.height * area.height(),
                ))
            }
            Self::FlippedUnit => Self::Unit.rect_to_pixels(
                area,
                Rect::new(rect.x, flip_unit_y(rect.y, rect.height), rect.width, rect.height),
            ),
            Self::Domain { x, y } => {
                for (value, range) in [(rect.x, x), (rect.y, y)] {
                    if !range.contains(value) {
                        return Err(CanvasError::OutOfBounds {
                            value,
                            min: range.min(),
                            max: range.max(),
                        });
                    }
                }
                Self::FlippedUnit.rect_to_pixels(
                    area,
                    Rect::new(
                        map_range(x, Range::unit(), rect.x),
                        map_range(y, Range::unit(), rect.y),
                        rect.width / x.size(),
                        rect.height / y.size(),
                    ),
                )
            }
        }
    }

    /// Converts a pixel rectangle produced by dragging into this space.
    #[must_use]
    pub fn rect_from_pixels(self, area: PlotArea, rect: Rect) -> Rect {
        match self {
            Self::Pixel => rect,
            Self::Unit => Rect::new(
                ((rect.x - area.min_x) / area.width()).clamp(0.0, 1.0),
                ((rect.y - area.min_y) / area.height()).clamp(0.0, 1.0),
                rect.width / area.width(),
                rect.height / area.height(),
            ),
            Self::FlippedUnit => {
                let unit = Self::Unit.rect_from_pixels(area, rect);
                Rect::new(unit.x, flip_unit_y(unit.y, unit.height), unit.width, unit.height)
            }
            Self::Domain { x, y } => {
                let unit = Self::FlippedUnit.rect_from_pixels(area, rect);
                Rect::new(
                    map_range(Range::unit(), x, unit.x),
                    map_range(Range::unit(), y, unit.y),
                    unit.width * x.size(),
                    unit.height * y.size(),
                )
            }
        }
    }
}

/// Bounds and relative area of a domain-space selection, as shown next to
/// the plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionReadout {
    pub x_from: f64,
    pub x_to: f64,
    pub y_from: f64,
    pub y_to: f64,
    pub area_percent: f64,
}

impl SelectionReadout {
    #[must_use]
    pub fn from_rect(rect: Rect, x_domain: Range, y_domain: Range) -> Self {
        Self {
            x_from: rect.x,
            x_to: rect.right(),
            y_from: rect.y,
            y_to: rect.bottom(),
            area_percent: rect.area() / (x_domain.size() * y_domain.size()) * 100.0,
        }
    }

    /// `"12.34%"`
    #[must_use]
    pub fn area_label(&self) -> String {
        format!("{:.2}%", self.area_percent)
    }
}

/// Resizable selection rectangle with a bottom-right resize handle.
///
/// Every update keeps the rectangle inside the plot area: sizes are floored at
/// the configured minimum, the position is clamped so the rectangle fits, and
/// the size is clamped again against the clamped position. `on_change` fires
/// on every accepted move (and once at construction), `on_commit` once when a
/// drag or resize ends.
pub struct AreaSelector {
    area: PlotArea,
    space: AreaSpace,
    config: AreaSelectorConfig,
    mode: InteractionMode,
    rect_px: Rect,
    drag_start: Point,
    start_rect: Rect,
    on_change: RectHandler,
    on_commit: RectHandler,
}

impl std::fmt::Debug for AreaSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AreaSelector")
            .field("area", &self.area)
            .field("space", &self.space)
            .field("mode", &self.mode)
            .field("rect_px", &self.rect_px)
            .finish_non_exhaustive()
    }
}

pub struct AreaSelectorBuilder {
    area: PlotArea,
    space: AreaSpace,
    config: AreaSelectorConfig,
    initial: Option<Rect>,
    on_change: Option<RectHandler>,
    on_commit: Option<RectHandler>,
}

impl AreaSelectorBuilder {
    #[must_use]
    pub fn with_config(mut self, config: AreaSelectorConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_space(mut self, space: AreaSpace) -> Self {
        self.space = space;
        self
    }

    /// Initial rectangle, expressed in the selector's [`AreaSpace`].
    #[must_use]
    pub fn with_initial(mut self, initial: Rect) -> Self {
        self.initial = Some(initial);
        self
    }

    #[must_use]
    pub fn on_change(mut self, handler: impl FnMut(Rect) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    #[must_use]
    pub fn on_commit(mut self, handler: impl FnMut(Rect) + 'static) -> Self {
        self.on_commit = Some(Box::new(handler));
        self
    }

    pub fn build<S: Surface + ?Sized>(self, surface: &mut S) -> CanvasResult<AreaSelector> {
        let config = self.config.validate()?;
        let area = self.area;
        if !(area.width() > 0.0 && area.height() > 0.0) {
            return Err(CanvasError::config("area selector needs a non-empty plot area"));
        }

        let initial_px = match self.initial {
            Some(rect) => self.space.rect_to_pixels(area, rect)?,
            None => Rect::new(
                area.min_x + area.width() / 4.0,
                area.min_y + area.height() / 4.0,
                area.width() / 2.0,
                area.height() / 2.0,
            ),
        };

        let mut selector = AreaSelector {
            area,
            space: self.space,
            config,
            mode: InteractionMode::Idle,
            rect_px: initial_px,
            drag_start: Point::default(),
            start_rect: initial_px,
            on_change: self.on_change.unwrap_or_else(|| Box::new(|_| {})),
            on_commit: self.on_commit.unwrap_or_else(|| Box::new(|_| {})),
        };
        selector.rect_px = selector.constrain(initial_px);
        debug!(rect = ?selector.rect_px, "area selector created");
        selector.apply(surface)?;
        Ok(selector)
    }
}

impl AreaSelector {
    #[must_use]
    pub fn builder(area: PlotArea) -> AreaSelectorBuilder {
        AreaSelectorBuilder {
            area,
            space: AreaSpace::Pixel,
            config: AreaSelectorConfig::default(),
            initial: None,
            on_change: None,
            on_commit: None,
        }
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        self.area
    }

    #[must_use]
    pub fn rect_px(&self) -> Rect {
        self.rect_px
    }

    /// Current rectangle in the selector's [`AreaSpace`].
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.space.rect_from_pixels(self.area, self.rect_px)
    }

    #[must_use]
    pub fn handle_rect_px(&self) -> Rect {
        let side = self.config.handle_size_px;
        Rect::new(
            self.rect_px.right() - side,
            self.rect_px.bottom() - side,
            side,
            side,
        )
    }

    pub fn handle_event<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        event: PointerEvent,
    ) -> CanvasResult<()> {
        match event.phase {
            PointerPhase::Down => {
                self.pointer_down(event.position);
                Ok(())
            }
            PointerPhase::Move => self.pointer_move(surface, event.position).map(|_| ()),
            PointerPhase::Up => {
                self.pointer_up();
                Ok(())
            }
        }
    }

    /// Starts resizing on the handle, or dragging on the body. The handle
    /// wins where both overlap. Returns the new mode.
    pub fn pointer_down(&mut self, position: Point) -> InteractionMode {
        let mode = if self.handle_rect_px().contains(position) {
            InteractionMode::Resizing
        } else if self.rect_px.contains(position) {
            InteractionMode::Dragging
        } else {
            return self.mode;
        };
        self.mode = mode;
        self.drag_start = position;
        self.start_rect = self.rect_px;
        debug!(?mode, x = position.x, y = position.y, "area selector interaction started");
        mode
    }

    /// Applies a drag or resize step. Returns the rectangle reported to
    /// `on_change`, or `None` when idle.
    pub fn pointer_move<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        position: Point,
    ) -> CanvasResult<Option<Rect>> {
        let dx = position.x - self.drag_start.x;
        let dy = position.y - self.drag_start.y;
        let proposed = match self.mode {
            InteractionMode::Idle => return Ok(None),
            InteractionMode::Dragging => Rect::new(
                self.start_rect.x + dx,
                self.start_rect.y + dy,
                self.rect_px.width,
                self.rect_px.height,
            ),
            InteractionMode::Resizing => Rect::new(
                self.rect_px.x,
                self.rect_px.y,
                (self.start_rect.width + dx).min(self.area.max_x - self.rect_px.x),
                (self.start_rect.height + dy).min(self.area.max_y - self.rect_px.y),
            ),
        };
        self.rect_px = self.constrain(proposed);
        trace!(rect = ?self.rect_px, "area selector move");
        self.apply(surface).map(Some)
    }

    /// Ends the interaction, firing `on_commit` if one was active.
    pub fn pointer_up(&mut self) -> Option<Rect> {
        if !self.mode.is_active() {
            return None;
        }
        self.mode = InteractionMode::Idle;
        let rect = self.rect();
        debug!(?rect, "area selector committed");
        (self.on_commit)(rect);
        Some(rect)
    }

    fn constrain(&self, rect: Rect) -> Rect {
        let area = self.area;
        let min_size = self.config.min_size_px;
        let width = rect.width.max(min_size);
        let height = rect.height.max(min_size);
        let x = rect.x.min(area.max_x - width).max(area.min_x);
        let y = rect.y.min(area.max_y - height).max(area.min_y);
        Rect::new(
            x,
            y,
            width.min(area.max_x - x),
            height.min(area.max_y - y),
        )
    }

    fn apply<S: Surface + ?Sized>(&mut self, surface: &mut S) -> CanvasResult<Rect> {
        let body = self.rect_px;
        surface.set_marker(
            MarkerId::SELECTION_RECT,
            MarkerPrimitive::Rect(
                RectPrimitive::filled(body.x, body.y, body.width, body.height, Color::SELECTION_FILL)
                    .with_border(Color::LIGHT_GREY, 1.0),
            ),
        )?;
        let handle = self.handle_rect_px();
        surface.set_marker(
            MarkerId::RESIZE_HANDLE,
            MarkerPrimitive::Rect(RectPrimitive::filled(
                handle.x,
                handle.y,
                handle.width,
                handle.height,
                Color::LIGHT_GREY,
            )),
        )?;
        let rect = self.rect();
        (self.on_change)(rect);
        Ok(rect)
    }
}
