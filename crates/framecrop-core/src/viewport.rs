use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Pointer coordinates as reported by the host environment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    pub client_x: f32,
    pub client_y: f32,
}

impl PointerInput {
    pub const fn new(client_x: f32, client_y: f32) -> Self {
        Self { client_x, client_y }
    }
}

/// Layout queries supplied by the host, so the controller never measures
/// anything itself.
pub trait Viewport {
    /// Top-left corner of the preview canvas in client coordinates.
    fn frame_origin(&self) -> Point;

    /// Position of `pointer` in client coordinates.
    fn pointer_position(&self, pointer: &PointerInput) -> Point;

    /// Intrinsic canvas pixels per displayed pixel.
    fn canvas_scale(&self) -> f32 {
        1.0
    }

    /// Map a pointer into preview-canvas pixels.
    fn to_canvas(&self, pointer: &PointerInput) -> Point {
        let local = self.pointer_position(pointer) - self.frame_origin();
        let scale = self.canvas_scale();
        Point::new(local.x * scale, local.y * scale)
    }
}

/// A viewport with a fixed layout.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FixedViewport {
    #[serde(default)]
    pub origin_x: f32,
    #[serde(default)]
    pub origin_y: f32,
    #[serde(default = "unit_scale")]
    pub canvas_scale: f32,
}

fn unit_scale() -> f32 {
    1.0
}

impl FixedViewport {
    pub const fn new(origin_x: f32, origin_y: f32, canvas_scale: f32) -> Self {
        Self {
            origin_x,
            origin_y,
            canvas_scale,
        }
    }
}

impl Default for FixedViewport {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}

impl Viewport for FixedViewport {
    fn frame_origin(&self) -> Point {
        Point::new(self.origin_x, self.origin_y)
    }

    fn pointer_position(&self, pointer: &PointerInput) -> Point {
        Point::new(pointer.client_x, pointer.client_y)
    }

    fn canvas_scale(&self) -> f32 {
        self.canvas_scale
    }
}
