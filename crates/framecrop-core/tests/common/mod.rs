#![allow(dead_code)]

use image::{Rgba, RgbaImage};

use framecrop_core::render::encode_png;
use framecrop_core::source::{ImageMime, SourceFile};
use framecrop_core::view::LoadedImage;

/// Opaque image whose red and green channels ramp along x and y.
pub fn gradient_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            128,
            255,
        ])
    })
}

pub fn solid_image(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(color))
}

/// Wrap a raster without encoding it. The source bytes are left empty, so
/// only use this where the snapshot is not needed.
pub fn loaded(image: RgbaImage) -> LoadedImage {
    let file = SourceFile {
        name: "test.png".to_string(),
        mime: ImageMime::Png,
        bytes: Vec::new(),
    };
    LoadedImage::new(file, image).unwrap()
}

/// A real PNG file, as if picked by the user.
pub fn png_file(name: &str, image: &RgbaImage) -> SourceFile {
    let bytes = encode_png(image).unwrap();
    SourceFile::from_bytes(name, Some("image/png"), bytes).unwrap()
}

/// Largest per-channel difference between two equally sized images.
pub fn max_channel_diff(a: &RgbaImage, b: &RgbaImage) -> u8 {
    assert_eq!(a.dimensions(), b.dimensions());
    a.as_raw()
        .iter()
        .zip(b.as_raw())
        .map(|(x, y)| x.abs_diff(*y))
        .max()
        .unwrap_or(0)
}
