/// Smallest zoom factor: the image's shorter side exactly fills the frame.
pub const MIN_SCALE: f32 = 1.0;

/// Largest zoom factor.
pub const MAX_SCALE: f32 = 2.0;

/// Zoom change applied per wheel tick or pinch event.
pub const SCALE_STEP: f32 = 0.1;

/// Upper bound of the rounded-rect corner radius, in reference export pixels.
pub const MAX_FRAME_RADIUS: f32 = 600.0;

/// Edge length of the reference export frame. Corner radii are stored in
/// this frame's pixel units and projected onto any other canvas.
pub const REFERENCE_FRAME_EDGE: f32 = 1024.0;

/// Default edge length of the interactive preview canvas.
pub const DEFAULT_PREVIEW_SIZE: u32 = 480;

/// Default inset of the circle clip inside the preview canvas.
pub const DEFAULT_CIRCLE_PADDING: f32 = 16.0;

/// Default export edge for the rounded-corner tool.
pub const DEFAULT_EXPORT_SIZE: u32 = 1024;

/// Default corner radius for the rounded-corner tool, in reference pixels.
pub const DEFAULT_FRAME_RADIUS: f32 = 96.0;

/// Alpha of the black overlay drawn outside the clip on the preview.
pub const DEFAULT_DIM_ALPHA: u8 = 128;

/// Width of the circle boundary stroke on the preview.
pub const DEFAULT_STROKE_WIDTH: f32 = 2.0;

/// Tolerance (in pixels) used by coverage checks.
pub const COVERAGE_EPSILON: f32 = 1e-3;

/// Largest file accepted by the upload collaborator (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Uploads allowed per client IP per day by the upload collaborator.
pub const DAILY_UPLOAD_LIMIT: u32 = 20;

/// MIME type of every exported artifact.
pub const EXPORT_MIME_TYPE: &str = "image/png";
