mod common;

use std::io::Write;

use tempfile::NamedTempFile;

use framecrop_core::error::FrameCropError;
use framecrop_core::render::encode_png;
use framecrop_core::source::{decode, from_rgba, ImageMime, SourceFile, INVALID_FILE_MESSAGE};

use common::gradient_image;

// ---------------------------------------------------------------------------
// MIME validation
// ---------------------------------------------------------------------------

#[test]
fn test_accepts_the_four_image_types() {
    for mime in ImageMime::ALL {
        assert_eq!(ImageMime::from_mime(mime.as_str()), Some(mime));
    }
    assert_eq!(ImageMime::from_mime("IMAGE/JPG"), Some(ImageMime::Jpeg));
}

#[test]
fn test_rejects_other_types_with_user_message() {
    for declared in ["text/plain", "image/svg+xml", "image/bmp", "application/pdf"] {
        let err = SourceFile::from_bytes("file", Some(declared), vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, FrameCropError::UnsupportedFileType(_)));
        assert_eq!(err.to_string(), INVALID_FILE_MESSAGE);
    }
}

#[test]
fn test_missing_type_is_sniffed() {
    let png = encode_png(&gradient_image(8, 8)).unwrap();
    let file = SourceFile::from_bytes("noext", None, png).unwrap();
    assert_eq!(file.mime, ImageMime::Png);

    let gif = b"GIF89a\x01\x00\x01\x00\x00\x00\x00;".to_vec();
    assert_eq!(ImageMime::sniff(&gif), Some(ImageMime::Gif));

    let err = SourceFile::from_bytes("noext", Some(""), b"plain text".to_vec()).unwrap_err();
    assert_eq!(err.to_string(), INVALID_FILE_MESSAGE);
}

#[test]
fn test_extension_lookup() {
    assert_eq!(ImageMime::from_extension("JPEG"), Some(ImageMime::Jpeg));
    assert_eq!(ImageMime::from_extension("webp"), Some(ImageMime::Webp));
    assert_eq!(ImageMime::from_extension("tiff"), None);
}

// ---------------------------------------------------------------------------
// Decode
// ---------------------------------------------------------------------------

#[test]
fn test_decode_png() {
    let png = encode_png(&gradient_image(40, 30)).unwrap();
    let file = SourceFile::from_bytes("photo.png", Some("image/png"), png).unwrap();
    let image = decode(file).unwrap();
    assert_eq!(image.dimensions(), (40, 30));
    assert_eq!(image.source().name, "photo.png");
}

#[test]
fn test_decode_corrupt_file_fails() {
    let file = SourceFile::from_bytes("broken.png", Some("image/png"), vec![0; 64]).unwrap();
    assert!(matches!(decode(file), Err(FrameCropError::ImageError(_))));
}

#[test]
fn test_open_sniffs_content_over_extension() {
    let png = encode_png(&gradient_image(12, 10)).unwrap();
    let mut tmpfile = NamedTempFile::with_suffix(".jpg").unwrap();
    tmpfile.write_all(&png).unwrap();
    tmpfile.flush().unwrap();

    let file = SourceFile::open(tmpfile.path()).unwrap();
    assert_eq!(file.mime, ImageMime::Png);
    assert_eq!(decode(file).unwrap().dimensions(), (12, 10));
}

#[test]
fn test_open_rejects_non_image() {
    let mut tmpfile = NamedTempFile::with_suffix(".txt").unwrap();
    tmpfile.write_all(b"hello").unwrap();
    tmpfile.flush().unwrap();

    let err = SourceFile::open(tmpfile.path()).unwrap_err();
    assert!(matches!(err, FrameCropError::UnsupportedFileType(_)));
}

#[test]
fn test_from_rgba_wraps_as_png() {
    let image = from_rgba("generated", gradient_image(16, 16)).unwrap();
    assert_eq!(image.source().mime, ImageMime::Png);
    assert!(!image.source().bytes.is_empty());
}
