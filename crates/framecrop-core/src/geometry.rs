//! Pure geometry shared by the interaction controller, the preview renderer
//! and the export pipeline. Nothing here allocates or fails; callers are
//! expected to pass pre-validated dimensions.

use std::ops::{Add, Sub};

use crate::consts::{COVERAGE_EPSILON, REFERENCE_FRAME_EDGE};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in some pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_center_size(center: Point, size: Size) -> Self {
        Self::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Edge-inclusive point test.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// True if `other` lies inside `self`, allowing `eps` pixels of slack.
    pub fn contains_rect(&self, other: &Rect, eps: f32) -> bool {
        other.x >= self.x - eps
            && other.y >= self.y - eps
            && other.right() <= self.right() + eps
            && other.bottom() <= self.bottom() + eps
    }
}

/// Allowed range of the view offset on each axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OffsetBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl OffsetBounds {
    pub fn clamp(&self, x: f32, y: f32) -> (f32, f32) {
        (
            clamp_offset(x, self.min_x, self.max_x),
            clamp_offset(y, self.min_y, self.max_y),
        )
    }
}

/// Size of the image when drawn into a frame of edge `frame_edge`.
///
/// Landscape images are height-limited, everything else width-limited, so at
/// `scale = 1` the shorter image side exactly spans the frame.
pub fn drawn_size(image_width: u32, image_height: u32, frame_edge: f32, scale: f32) -> Size {
    let aspect = image_width as f32 / image_height as f32;
    if image_width > image_height {
        let height = frame_edge * scale;
        Size::new(height * aspect, height)
    } else {
        let width = frame_edge * scale;
        Size::new(width, width / aspect)
    }
}

/// Offset range that keeps a `drawn` image covering a centred square of
/// edge `frame_edge`.
///
/// The circle frame passes its clip diameter, so the coverage requirement is
/// the clip radius. The rounded-rect frame passes the full canvas edge: its
/// clip spans the whole square minus the corners, and the image must cover
/// that square.
pub fn offset_bounds(drawn: Size, frame_edge: f32) -> OffsetBounds {
    let half_edge = frame_edge / 2.0;
    OffsetBounds {
        min_x: half_edge - drawn.width / 2.0,
        max_x: drawn.width / 2.0 - half_edge,
        min_y: half_edge - drawn.height / 2.0,
        max_y: drawn.height / 2.0 - half_edge,
    }
}

/// Clamp `value` into `[min, max]`. An inverted range collapses to `min`.
pub fn clamp_offset(value: f32, min: f32, max: f32) -> f32 {
    let value = if value.is_finite() { value } else { 0.0 };
    if !(min <= max) {
        return min;
    }
    value.clamp(min, max)
}

/// Factor mapping preview-space lengths onto export-space lengths.
pub fn preview_to_export_scale(preview_frame_edge: f32, export_frame_edge: f32) -> f32 {
    export_frame_edge / preview_frame_edge
}

/// Project a corner radius stored in reference-frame pixels onto a canvas
/// whose frame edge is `frame_edge`.
pub fn project_radius(radius: f32, frame_edge: f32) -> f32 {
    radius * frame_edge / REFERENCE_FRAME_EDGE
}

/// Rectangle the image occupies on a canvas whose frame is centred at
/// `center`.
pub fn drawn_rect(drawn: Size, center: Point, offset: Point) -> Rect {
    Rect::from_center_size(center + offset, drawn)
}

/// Clip region of a frame, in the pixel space of one canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClipShape {
    Circle {
        center: Point,
        radius: f32,
    },
    RoundedRect {
        center: Point,
        half_edge: f32,
        corner_radius: f32,
    },
}

impl ClipShape {
    /// Circle inscribed in a square canvas, inset by `padding` on every side.
    pub fn circle(canvas_size: f32, padding: f32) -> Self {
        let half = canvas_size / 2.0;
        Self::Circle {
            center: Point::new(half, half),
            radius: (half - padding).max(0.0),
        }
    }

    /// Rounded square spanning the whole canvas. The corner radius is
    /// limited to half the canvas edge.
    pub fn rounded_rect(canvas_size: f32, corner_radius: f32) -> Self {
        let half = canvas_size / 2.0;
        Self::RoundedRect {
            center: Point::new(half, half),
            half_edge: half,
            corner_radius: corner_radius.clamp(0.0, half),
        }
    }

    pub fn center(&self) -> Point {
        match *self {
            Self::Circle { center, .. } | Self::RoundedRect { center, .. } => center,
        }
    }

    /// Square the clip is inscribed in. An axis-aligned rectangle covers the
    /// clip region exactly when it covers this square.
    pub fn bounding_square(&self) -> Rect {
        let (center, half) = match *self {
            Self::Circle { center, radius } => (center, radius),
            Self::RoundedRect {
                center, half_edge, ..
            } => (center, half_edge),
        };
        Rect::new(center.x - half, center.y - half, half * 2.0, half * 2.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        match *self {
            Self::Circle { center, radius } => {
                let d = p - center;
                d.x * d.x + d.y * d.y <= radius * radius
            }
            Self::RoundedRect {
                center,
                half_edge,
                corner_radius,
            } => {
                let dx = (p.x - center.x).abs();
                let dy = (p.y - center.y).abs();
                if dx > half_edge || dy > half_edge {
                    return false;
                }
                let inner = half_edge - corner_radius;
                if dx <= inner || dy <= inner {
                    return true;
                }
                let cx = dx - inner;
                let cy = dy - inner;
                cx * cx + cy * cy <= corner_radius * corner_radius
            }
        }
    }
}

/// Coverage invariant: the drawn image leaves no empty point inside the clip.
pub fn covers(drawn: &Rect, clip: &ClipShape) -> bool {
    drawn.contains_rect(&clip.bounding_square(), COVERAGE_EPSILON)
}

/// Source-image rectangle shown behind the frame's bounding square.
///
/// `frame_edge` and `center` describe the frame on the target canvas and
/// `offset` is the view offset already expressed in that canvas's pixels.
pub fn source_window(
    image_width: u32,
    image_height: u32,
    frame_edge: f32,
    scale: f32,
    offset: Point,
    center: Point,
) -> Rect {
    let drawn = drawn_size(image_width, image_height, frame_edge, scale);
    let placed = drawn_rect(drawn, center, offset);
    let to_source_x = image_width as f32 / drawn.width;
    let to_source_y = image_height as f32 / drawn.height;
    let half_edge = frame_edge / 2.0;

    Rect::new(
        (center.x - half_edge - placed.x) * to_source_x,
        (center.y - half_edge - placed.y) * to_source_y,
        frame_edge * to_source_x,
        frame_edge * to_source_y,
    )
}

/// Shrink `rect` about its centre, by the same factor on both axes, until it
/// lies within a `image_width` x `image_height` image.
pub fn clamp_source_rect(rect: Rect, image_width: u32, image_height: u32) -> Rect {
    let w = image_width as f32;
    let h = image_height as f32;
    let half_w = rect.width / 2.0;
    let half_h = rect.height / 2.0;
    if half_w <= 0.0 || half_h <= 0.0 {
        return rect;
    }

    let center = rect.center();
    let cx = center.x.clamp(0.0, w);
    let cy = center.y.clamp(0.0, h);
    let room_x = cx.min(w - cx);
    let room_y = cy.min(h - cy);
    let factor = (room_x / half_w).min(room_y / half_h).min(1.0);

    if factor >= 1.0 && cx == center.x && cy == center.y {
        return rect;
    }

    Rect::from_center_size(
        Point::new(cx, cy),
        Size::new(rect.width * factor, rect.height * factor),
    )
}
