use indexmap::IndexMap;

use crate::core::Viewport;
use crate::error::{CanvasError, CanvasResult};
use crate::render::{
    CirclePrimitive, LinePrimitive, MarkerId, MarkerPrimitive, RectPrimitive, Surface,
    TextPrimitive,
};

/// Backend-agnostic scene recorded from [`Surface`] calls.
///
/// Immediate primitives accumulate until [`Surface::clear`]; markers are
/// retained and replaced in place, keeping their first insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub lines: Vec<LinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub circles: Vec<CirclePrimitive>,
    pub texts: Vec<TextPrimitive>,
    pub markers: IndexMap<MarkerId, MarkerPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            lines: Vec::new(),
            rects: Vec::new(),
            circles: Vec::new(),
            texts: Vec::new(),
            markers: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn marker(&self, id: MarkerId) -> Option<MarkerPrimitive> {
        self.markers.get(&id).copied()
    }

    pub fn validate(&self) -> CanvasResult<()> {
        if !self.viewport.is_valid() {
            return Err(CanvasError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for line in &self.lines {
            line.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for circle in &self.circles {
            circle.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        for marker in self.markers.values() {
            marker.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
            && self.rects.is_empty()
            && self.circles.is_empty()
            && self.texts.is_empty()
            && self.markers.is_empty()
    }
}

impl Surface for RenderFrame {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn draw_line(&mut self, line: LinePrimitive) -> CanvasResult<()> {
        line.validate()?;
        self.lines.push(line);
        Ok(())
    }

    fn draw_rect(&mut self, rect: RectPrimitive) -> CanvasResult<()> {
        rect.validate()?;
        self.rects.push(rect);
        Ok(())
    }

    fn draw_circle(&mut self, circle: CirclePrimitive) -> CanvasResult<()> {
        circle.validate()?;
        self.circles.push(circle);
        Ok(())
    }

    fn draw_text(&mut self, text: TextPrimitive) -> CanvasResult<()> {
        text.validate()?;
        self.texts.push(text);
        Ok(())
    }

    fn set_marker(&mut self, id: MarkerId, marker: MarkerPrimitive) -> CanvasResult<()> {
        marker.validate()?;
        self.markers.insert(id, marker);
        Ok(())
    }

    fn remove_marker(&mut self, id: MarkerId) {
        self.markers.shift_remove(&id);
    }

    fn clear(&mut self) {
        self.lines.clear();
        self.rects.clear();
        self.circles.clear();
        self.texts.clear();
    }
}
