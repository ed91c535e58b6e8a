use image::RgbaImage;
use serde::{Deserialize, Serialize};
use tiny_skia::Pixmap;

use crate::consts::MIN_SCALE;
use crate::error::{FrameCropError, Result};
use crate::frame::FrameKind;
use crate::geometry::Point;
use crate::render::canvas::pixmap_from_rgba;
use crate::source::SourceFile;

/// A decoded source image. Never mutated; a new file replaces it wholesale.
pub struct LoadedImage {
    width: u32,
    height: u32,
    rgba: RgbaImage,
    /// Premultiplied copy of `rgba`, ready to be drawn.
    pixmap: Pixmap,
    source: SourceFile,
}

impl LoadedImage {
    pub fn new(source: SourceFile, rgba: RgbaImage) -> Result<Self> {
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(FrameCropError::InvalidDimensions { width, height });
        }
        let pixmap = pixmap_from_rgba(&rgba)?;
        Ok(Self {
            width,
            height,
            rgba,
            pixmap,
            source,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn rgba(&self) -> &RgbaImage {
        &self.rgba
    }

    pub(crate) fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// The file this image was decoded from.
    pub fn source(&self) -> &SourceFile {
        &self.source
    }
}

impl std::fmt::Debug for LoadedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("source", &self.source.name)
            .finish()
    }
}

/// Mutable placement of the image inside the frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// Zoom factor in `[1, 2]`.
    pub scale: f32,
    /// Image centre relative to the frame centre, in preview pixels.
    pub offset_x: f32,
    pub offset_y: f32,
    /// Corner radius in reference export pixels. `None` for the circle frame.
    pub frame_radius: Option<f32>,
}

impl ViewState {
    /// Fresh state for a newly loaded image.
    pub fn initial(kind: FrameKind, default_radius: f32) -> Self {
        Self {
            scale: MIN_SCALE,
            offset_x: 0.0,
            offset_y: 0.0,
            frame_radius: match kind {
                FrameKind::Circle => None,
                FrameKind::RoundedRect => Some(default_radius),
            },
        }
    }

    pub fn offset(&self) -> Point {
        Point::new(self.offset_x, self.offset_y)
    }
}

/// Image and view state of one tool instance. Created and dropped together.
#[derive(Debug)]
pub struct CropSession {
    pub image: LoadedImage,
    pub view: ViewState,
}
