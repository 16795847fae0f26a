//! Retained drawing surface: flat rectangles and text labels.
//!
//! Scenes add primitives once at creation and mutate them by id afterwards.
//! The renderer draws the rectangles, the egui overlay draws the labels.

use glam::Vec2;

/// Index of a rectangle on a [`Surface`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrimitiveId(usize);

/// Axis-aligned filled rectangle, positioned by its top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub position: Vec2,
    pub size: Vec2,
    pub color: [f32; 3],
}

impl RectPrimitive {
    pub fn new(position: Vec2, size: Vec2, color: [f32; 3]) -> Self {
        Self { position, size, color }
    }

    /// Rectangle of `size` centered on `center`
    pub fn centered(center: Vec2, size: Vec2, color: [f32; 3]) -> Self {
        Self::new(center - size / 2.0, size, color)
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size / 2.0
    }
}

/// Coordinate space a label is anchored in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSpace {
    /// Moves with the camera
    World,
    /// Fixed to the window; x is measured from the horizontal center
    Screen,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    /// Center of the label
    pub position: Vec2,
    pub space: TextSpace,
    pub font_size: f32,
    pub color: [f32; 3],
    pub background: Option<[f32; 3]>,
    pub padding: Vec2,
}

/// Capability to add visual primitives, as consumed by scene setup and the binder.
pub trait SurfaceSink {
    fn add_rect(&mut self, rect: RectPrimitive) -> PrimitiveId;
    fn add_text(&mut self, label: TextLabel);
}

#[derive(Debug, Default, Clone)]
pub struct Surface {
    rects: Vec<RectPrimitive>,
    labels: Vec<TextLabel>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rects(&self) -> &[RectPrimitive] {
        &self.rects
    }

    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }

    pub fn rect(&self, id: PrimitiveId) -> Option<&RectPrimitive> {
        self.rects.get(id.0)
    }

    pub fn rect_mut(&mut self, id: PrimitiveId) -> Option<&mut RectPrimitive> {
        self.rects.get_mut(id.0)
    }
}

impl SurfaceSink for Surface {
    fn add_rect(&mut self, rect: RectPrimitive) -> PrimitiveId {
        self.rects.push(rect);
        PrimitiveId(self.rects.len() - 1)
    }

    fn add_text(&mut self, label: TextLabel) {
        self.labels.push(label);
    }
}
