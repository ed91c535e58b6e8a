use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrameCropError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The selected file is not one of the accepted image types. The message
    /// is meant to be shown to the user as-is.
    #[error("{0}")]
    UnsupportedFileType(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("No image loaded")]
    NoImageLoaded,

    #[error("Raster error: {0}")]
    Raster(String),

    #[error("Invalid session snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FrameCropError>;
