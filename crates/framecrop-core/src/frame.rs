use serde::{Deserialize, Serialize};

use crate::geometry::{
    clamp_offset, drawn_rect, drawn_size, offset_bounds, project_radius, ClipShape, OffsetBounds,
    Point, Rect,
};
use crate::view::ViewState;

/// Shape of the output frame. Each variant backs one tool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameKind {
    Circle,
    RoundedRect,
}

impl FrameKind {
    /// Prefix used for exported file names.
    pub const fn tool_slug(self) -> &'static str {
        match self {
            Self::Circle => "circle-crop",
            Self::RoundedRect => "rounded-corners",
        }
    }
}

impl std::fmt::Display for FrameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Circle => write!(f, "Circle"),
            Self::RoundedRect => write!(f, "Rounded Rectangle"),
        }
    }
}

/// How the export canvas edge is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportSize {
    /// Always export at this edge length.
    Fixed(u32),
    /// Export at the source image's shorter side, so nothing is upscaled at
    /// `scale = 1`.
    SourceShorterSide,
}

impl std::fmt::Display for ExportSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed(edge) => write!(f, "{edge}px"),
            Self::SourceShorterSide => write!(f, "source shorter side"),
        }
    }
}

/// Fixed geometry of one tool instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub kind: FrameKind,
    /// Edge length of the square preview canvas.
    pub preview_size: u32,
    /// Inset of the circle clip inside the preview canvas. Ignored by the
    /// rounded-rect frame.
    pub padding: f32,
    pub export_size: ExportSize,
}

impl Frame {
    pub fn circle(preview_size: u32, padding: f32) -> Self {
        Self {
            kind: FrameKind::Circle,
            preview_size,
            padding,
            export_size: ExportSize::SourceShorterSide,
        }
    }

    pub fn rounded_rect(preview_size: u32, export_edge: u32) -> Self {
        Self {
            kind: FrameKind::RoundedRect,
            preview_size,
            padding: 0.0,
            export_size: ExportSize::Fixed(export_edge),
        }
    }

    pub fn with_export_size(mut self, export_size: ExportSize) -> Self {
        self.export_size = export_size;
        self
    }

    /// Edge of the square the image must cover on the preview canvas: the
    /// clip diameter for the circle, the whole canvas for the rounded rect.
    pub fn preview_frame_edge(&self) -> f32 {
        let size = self.preview_size as f32;
        match self.kind {
            FrameKind::Circle => (size - 2.0 * self.padding).max(1.0),
            FrameKind::RoundedRect => size,
        }
    }

    pub fn preview_center(&self) -> Point {
        let half = self.preview_size as f32 / 2.0;
        Point::new(half, half)
    }

    pub fn preview_clip(&self, view: &ViewState) -> ClipShape {
        let size = self.preview_size as f32;
        match self.kind {
            FrameKind::Circle => ClipShape::circle(size, self.padding),
            FrameKind::RoundedRect => ClipShape::rounded_rect(
                size,
                project_radius(view.frame_radius.unwrap_or(0.0), size),
            ),
        }
    }

    /// Export canvas edge for an image of the given dimensions.
    pub fn export_edge(&self, image_width: u32, image_height: u32) -> u32 {
        match self.export_size {
            ExportSize::Fixed(edge) => edge.max(1),
            ExportSize::SourceShorterSide => image_width.min(image_height).max(1),
        }
    }

    /// Clip on an export canvas of edge `edge`. The circle always spans the
    /// full canvas at export time.
    pub fn export_clip(&self, edge: f32, view: &ViewState) -> ClipShape {
        match self.kind {
            FrameKind::Circle => ClipShape::circle(edge, 0.0),
            FrameKind::RoundedRect => ClipShape::rounded_rect(
                edge,
                project_radius(view.frame_radius.unwrap_or(0.0), edge),
            ),
        }
    }

    pub fn offset_bounds(&self, image_width: u32, image_height: u32, scale: f32) -> OffsetBounds {
        let edge = self.preview_frame_edge();
        offset_bounds(drawn_size(image_width, image_height, edge, scale), edge)
    }

    /// Where the image is drawn on the preview canvas for `view`.
    pub fn drawn_rect(&self, image_width: u32, image_height: u32, view: &ViewState) -> Rect {
        let drawn = drawn_size(
            image_width,
            image_height,
            self.preview_frame_edge(),
            view.scale,
        );
        drawn_rect(drawn, self.preview_center(), view.offset())
    }

    /// Clamp both offsets of `view` against the bounds for its current scale.
    /// Returns true if either offset moved.
    pub fn clamp_view(&self, image_width: u32, image_height: u32, view: &mut ViewState) -> bool {
        let bounds = self.offset_bounds(image_width, image_height, view.scale);
        let x = clamp_offset(view.offset_x, bounds.min_x, bounds.max_x);
        let y = clamp_offset(view.offset_y, bounds.min_y, bounds.max_y);
        let moved = x != view.offset_x || y != view.offset_y;
        view.offset_x = x;
        view.offset_y = y;
        moved
    }
}
