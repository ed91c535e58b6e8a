//! Thin raster layer over `tiny-skia`: conversions between straight-alpha
//! `RgbaImage` and premultiplied `Pixmap`, clip paths and image drawing.

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use tiny_skia::{
    FillRule, FilterQuality, IntSize, Mask, Path, PathBuilder, Pixmap, PixmapPaint, Transform,
};

use crate::error::{FrameCropError, Result};
use crate::geometry::{ClipShape, Rect};

/// Cubic Bezier handle length for a quarter circle of unit radius.
const KAPPA: f32 = 0.552_284_8;

pub(crate) fn new_pixmap(width: u32, height: u32) -> Result<Pixmap> {
    Pixmap::new(width, height)
        .ok_or_else(|| FrameCropError::Raster(format!("cannot allocate {width}x{height} canvas")))
}

/// Premultiply a straight-alpha image into a drawable pixmap.
pub(crate) fn pixmap_from_rgba(image: &RgbaImage) -> Result<Pixmap> {
    let (width, height) = image.dimensions();
    let size = IntSize::from_wh(width, height).ok_or(FrameCropError::InvalidDimensions {
        width,
        height,
    })?;

    let mut data = Vec::with_capacity(image.as_raw().len());
    for pixel in image.pixels() {
        let [r, g, b, a] = pixel.0;
        match a {
            255 => data.extend_from_slice(&[r, g, b, 255]),
            0 => data.extend_from_slice(&[0, 0, 0, 0]),
            _ => {
                let alpha = u16::from(a);
                let premul = |c: u8| ((u16::from(c) * alpha + 127) / 255) as u8;
                data.extend_from_slice(&[premul(r), premul(g), premul(b), a]);
            }
        }
    }

    Pixmap::from_vec(data, size)
        .ok_or_else(|| FrameCropError::Raster("pixel buffer does not match dimensions".into()))
}

/// Demultiply a pixmap back into a straight-alpha image.
pub(crate) fn rgba_from_pixmap(pixmap: &Pixmap) -> RgbaImage {
    let mut image = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    image
}

/// Encode as PNG with alpha.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    image.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}

/// Append the clip outline as closed contours to `pb`.
pub(crate) fn push_clip(pb: &mut PathBuilder, clip: &ClipShape) {
    match *clip {
        ClipShape::Circle { center, radius } => {
            pb.push_circle(center.x, center.y, radius);
        }
        ClipShape::RoundedRect {
            center,
            half_edge,
            corner_radius,
        } => {
            let left = center.x - half_edge;
            let top = center.y - half_edge;
            let right = center.x + half_edge;
            let bottom = center.y + half_edge;

            if corner_radius <= 0.0 {
                if let Some(rect) = tiny_skia::Rect::from_ltrb(left, top, right, bottom) {
                    pb.push_rect(rect);
                }
                return;
            }
            // Fully rounded square degenerates to the inscribed circle; use the
            // exact circle outline so both frames rasterize identically.
            if corner_radius >= half_edge {
                pb.push_circle(center.x, center.y, half_edge);
                return;
            }

            let r = corner_radius;
            let k = r * KAPPA;
            pb.move_to(left + r, top);
            pb.line_to(right - r, top);
            pb.cubic_to(right - r + k, top, right, top + r - k, right, top + r);
            pb.line_to(right, bottom - r);
            pb.cubic_to(right, bottom - r + k, right - r + k, bottom, right - r, bottom);
            pb.line_to(left + r, bottom);
            pb.cubic_to(left + r - k, bottom, left, bottom - r + k, left, bottom - r);
            pb.line_to(left, top + r);
            pb.cubic_to(left, top + r - k, left + r - k, top, left + r, top);
            pb.close();
        }
    }
}

pub(crate) fn clip_path(clip: &ClipShape) -> Option<Path> {
    let mut pb = PathBuilder::new();
    push_clip(&mut pb, clip);
    pb.finish()
}

/// Anti-aliased coverage mask of `clip` on a `width` x `height` canvas.
pub(crate) fn clip_mask(width: u32, height: u32, clip: &ClipShape) -> Result<Mask> {
    let mut mask = Mask::new(width, height)
        .ok_or_else(|| FrameCropError::Raster(format!("cannot allocate {width}x{height} mask")))?;
    if let Some(path) = clip_path(clip) {
        mask.fill_path(&path, FillRule::Winding, true, Transform::identity());
    }
    Ok(mask)
}

/// Draw `source` so that its `src` rectangle lands on `dst`, like a canvas
/// `drawImage` with source and destination rectangles.
pub(crate) fn draw_image(
    target: &mut Pixmap,
    source: &Pixmap,
    src: Rect,
    dst: Rect,
    quality: FilterQuality,
    mask: Option<&Mask>,
) {
    if src.width <= 0.0 || src.height <= 0.0 {
        return;
    }
    let sx = dst.width / src.width;
    let sy = dst.height / src.height;
    let transform = Transform::from_row(sx, 0.0, 0.0, sy, dst.x - src.x * sx, dst.y - src.y * sy);
    let paint = PixmapPaint {
        quality,
        ..PixmapPaint::default()
    };
    target.draw_pixmap(0, 0, source.as_ref(), &paint, transform, mask);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_premultiply_round_trip_keeps_opaque_and_clear_pixels() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([200, 100, 50, 255]));
        image.put_pixel(1, 0, Rgba([9, 9, 9, 0]));
        let back = rgba_from_pixmap(&pixmap_from_rgba(&image).unwrap());
        assert_eq!(back.get_pixel(0, 0), &Rgba([200, 100, 50, 255]));
        assert_eq!(back.get_pixel(1, 0)[3], 0);
    }

    #[test]
    fn test_rounded_clip_path_variants_build() {
        for radius in [0.0, 10.0, 50.0] {
            let clip = ClipShape::rounded_rect(100.0, radius);
            assert!(clip_path(&clip).is_some(), "radius {radius}");
        }
    }
}
