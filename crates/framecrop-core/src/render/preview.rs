use image::RgbaImage;
use serde::{Deserialize, Serialize};
use tiny_skia::{Color, FillRule, FilterQuality, Paint, PathBuilder, Stroke, Transform};

use crate::consts::{DEFAULT_DIM_ALPHA, DEFAULT_STROKE_WIDTH};
use crate::error::Result;
use crate::frame::{Frame, FrameKind};
use crate::geometry::Rect;
use crate::view::{LoadedImage, ViewState};

use super::canvas::{clip_path, draw_image, new_pixmap, push_clip, rgba_from_pixmap};

/// Cosmetic settings of the interactive preview.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreviewStyle {
    /// Alpha of the black overlay outside the clip (0 disables dimming).
    pub dim_alpha: u8,
    /// Width of the circle boundary stroke (0 disables it).
    pub stroke_width: f32,
}

impl Default for PreviewStyle {
    fn default() -> Self {
        Self {
            dim_alpha: DEFAULT_DIM_ALPHA,
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }
}

/// Draws the current view onto the fixed-size preview canvas.
#[derive(Clone, Debug, Default)]
pub struct PreviewRenderer {
    style: PreviewStyle,
}

impl PreviewRenderer {
    pub fn new(style: PreviewStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &PreviewStyle {
        &self.style
    }

    pub fn render(&self, frame: &Frame, image: &LoadedImage, view: &ViewState) -> Result<RgbaImage> {
        let size = frame.preview_size;
        let mut canvas = new_pixmap(size, size)?;
        canvas.fill(Color::TRANSPARENT);

        // Full image; the clip only decides what gets dimmed.
        let (width, height) = image.dimensions();
        let placed = frame.drawn_rect(width, height, view);
        draw_image(
            &mut canvas,
            image.pixmap(),
            Rect::new(0.0, 0.0, width as f32, height as f32),
            placed,
            FilterQuality::Bilinear,
            None,
        );

        let clip = frame.preview_clip(view);

        if self.style.dim_alpha > 0 {
            let mut pb = PathBuilder::new();
            if let Some(bounds) = tiny_skia::Rect::from_xywh(0.0, 0.0, size as f32, size as f32) {
                pb.push_rect(bounds);
            }
            push_clip(&mut pb, &clip);
            if let Some(outside) = pb.finish() {
                let mut paint = Paint::default();
                paint.set_color_rgba8(0, 0, 0, self.style.dim_alpha);
                paint.anti_alias = true;
                canvas.fill_path(
                    &outside,
                    &paint,
                    FillRule::EvenOdd,
                    Transform::identity(),
                    None,
                );
            }
        }

        if frame.kind == FrameKind::Circle && self.style.stroke_width > 0.0 {
            if let Some(outline) = clip_path(&clip) {
                let mut paint = Paint::default();
                paint.set_color_rgba8(255, 255, 255, 255);
                paint.anti_alias = true;
                let stroke = Stroke {
                    width: self.style.stroke_width,
                    ..Default::default()
                };
                canvas.stroke_path(&outline, &paint, &stroke, Transform::identity(), None);
            }
        }

        Ok(rgba_from_pixmap(&canvas))
    }
}
