//! File input: type validation and decoding into a [`LoadedImage`].

use std::path::Path;

use image::{ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{FrameCropError, Result};
use crate::render::canvas::encode_png;
use crate::view::LoadedImage;

/// Message shown when a selected file is not an accepted image.
pub const INVALID_FILE_MESSAGE: &str =
    "Please select a valid image file (PNG, JPEG, WEBP or GIF).";

/// Accepted input image types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageMime {
    Png,
    Jpeg,
    Webp,
    Gif,
}

impl ImageMime {
    pub const ALL: [ImageMime; 4] = [Self::Png, Self::Jpeg, Self::Webp, Self::Gif];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Webp => "image/webp",
            Self::Gif => "image/gif",
        }
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(Self::Jpeg),
            "image/webp" => Some(Self::Webp),
            "image/gif" => Some(Self::Gif),
            _ => None,
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "webp" => Some(Self::Webp),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }

    /// Detect the type from the file's magic bytes.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        match image::guess_format(bytes).ok()? {
            ImageFormat::Png => Some(Self::Png),
            ImageFormat::Jpeg => Some(Self::Jpeg),
            ImageFormat::WebP => Some(Self::Webp),
            ImageFormat::Gif => Some(Self::Gif),
            _ => None,
        }
    }

    pub const fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Webp => ImageFormat::WebP,
            Self::Gif => ImageFormat::Gif,
        }
    }
}

impl std::fmt::Display for ImageMime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-selected file whose type has been validated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub mime: ImageMime,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    /// Validate a file as the browser hands it over: a name, an optional
    /// declared MIME type and the raw bytes. A declared type wins; without
    /// one the content is sniffed.
    pub fn from_bytes(name: &str, declared_mime: Option<&str>, bytes: Vec<u8>) -> Result<Self> {
        let mime = match declared_mime.filter(|m| !m.trim().is_empty()) {
            Some(declared) => ImageMime::from_mime(declared),
            None => ImageMime::sniff(&bytes),
        }
        .ok_or_else(|| FrameCropError::UnsupportedFileType(INVALID_FILE_MESSAGE.into()))?;

        Ok(Self {
            name: name.to_string(),
            mime,
            bytes,
        })
    }

    /// Read a file from disk. The content decides the type; the extension is
    /// only a fallback.
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string();
        let mime = ImageMime::sniff(&bytes)
            .or_else(|| {
                path.extension()
                    .and_then(|e| e.to_str())
                    .and_then(ImageMime::from_extension)
            })
            .ok_or_else(|| FrameCropError::UnsupportedFileType(INVALID_FILE_MESSAGE.into()))?;

        Ok(Self { name, mime, bytes })
    }
}

/// Decode a validated file.
pub fn decode(file: SourceFile) -> Result<LoadedImage> {
    debug!(name = %file.name, mime = %file.mime, bytes = file.bytes.len(), "decoding image");
    let decoded = image::load_from_memory_with_format(&file.bytes, file.mime.image_format())?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(FrameCropError::InvalidDimensions { width, height });
    }
    info!(name = %file.name, width, height, "image loaded");
    LoadedImage::new(file, rgba)
}

/// Wrap an in-memory raster as if it had been selected as a PNG file.
pub fn from_rgba(name: &str, rgba: RgbaImage) -> Result<LoadedImage> {
    let bytes = encode_png(&rgba)?;
    let file = SourceFile {
        name: name.to_string(),
        mime: ImageMime::Png,
        bytes,
    };
    LoadedImage::new(file, rgba)
}
