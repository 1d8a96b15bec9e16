//! PNG/JPEG header inspection.
//!
//! Extracts pixel dimensions and content types from raw image bytes without
//! a decoding library. Only the fixed PNG IHDR layout and the JPEG marker
//! stream are examined; the pixel data itself is never touched.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// PNG signature: 0x89 'P' 'N' 'G' CR LF 0x1A LF.
const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Bytes needed to reach the IHDR width/height fields (offsets 16 and 20).
const PNG_HEADER_LEN: usize = 24;

/// JPEG Start-Of-Image marker.
const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];

/// Baseline and progressive Start-Of-Frame marker types.
const JPEG_SOF0: u8 = 0xC0;
const JPEG_SOF2: u8 = 0xC2;

/// Supported raster image formats, detected from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    /// Detect the format from a file extension (case-insensitive).
    ///
    /// Anything other than `.png`, `.jpg`, or `.jpeg` fails with
    /// [`Error::UnsupportedFormat`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ImageFormat> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
            _ => Err(Error::UnsupportedFormat(format!(
                "{} (expected .png, .jpg, or .jpeg)",
                path.display()
            ))),
        }
    }

    /// MIME content type for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }

    /// Canonical extension used for embedded media part names.
    pub fn media_extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
        }
    }
}

/// Pixel dimensions of an image, plus its MIME content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// MIME content type (`image/png` or `image/jpeg`).
    pub content_type: &'static str,
}

/// Get the MIME content type for an image file based on its extension.
pub fn content_type<P: AsRef<Path>>(path: P) -> Result<&'static str> {
    Ok(ImageFormat::from_path(path)?.content_type())
}

/// Read the pixel dimensions of a PNG or JPEG image file.
///
/// Fails with [`Error::NotFound`] when the file does not exist and
/// [`Error::UnsupportedFormat`] for unrecognized extensions. The read has no
/// side effects; the same bytes always produce the same result.
pub fn read_dimensions<P: AsRef<Path>>(path: P) -> Result<ImageDimensions> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    let format = ImageFormat::from_path(path)?;
    let data = fs::read(path)?;
    dimensions_from_bytes(&data, format)
}

/// Read pixel dimensions from raw image bytes of a known format.
pub fn dimensions_from_bytes(data: &[u8], format: ImageFormat) -> Result<ImageDimensions> {
    match format {
        ImageFormat::Png => png_dimensions(data),
        ImageFormat::Jpeg => jpeg_dimensions(data),
    }
}

/// Read PNG dimensions from the IHDR chunk.
///
/// The mandatory IHDR chunk always immediately follows the 8-byte signature,
/// putting the big-endian width and height at byte offsets 16 and 20.
pub fn png_dimensions(data: &[u8]) -> Result<ImageDimensions> {
    if data.len() < PNG_HEADER_LEN {
        return Err(Error::MalformedInput(
            "file too small to be a valid PNG".into(),
        ));
    }
    if !data.starts_with(&PNG_SIGNATURE) {
        return Err(Error::MalformedInput("missing PNG signature".into()));
    }

    let width = u32::from_be_bytes([data[16], data[17], data[18], data[19]]);
    let height = u32::from_be_bytes([data[20], data[21], data[22], data[23]]);

    Ok(ImageDimensions {
        width,
        height,
        content_type: ImageFormat::Png.content_type(),
    })
}

/// Read JPEG dimensions by scanning for a SOF0 or SOF2 marker.
///
/// The SOF segment carries a 2-byte length, 1-byte sample precision, then the
/// big-endian height and width. Non-marker bytes are skipped one at a time;
/// recognized non-SOF segments are skipped by their declared length.
pub fn jpeg_dimensions(data: &[u8]) -> Result<ImageDimensions> {
    if data.len() < 2 || data[0..2] != JPEG_SOI {
        return Err(Error::MalformedInput("missing JPEG SOI marker".into()));
    }

    let mut pos = 2usize;
    while pos < data.len() {
        if data[pos] != 0xFF {
            pos += 1;
            continue;
        }
        pos += 1;
        // Runs of 0xFF are fill bytes ahead of the marker type.
        while pos < data.len() && data[pos] == 0xFF {
            pos += 1;
        }
        if pos >= data.len() {
            break;
        }
        let marker = data[pos];
        pos += 1;

        if marker == JPEG_SOF0 || marker == JPEG_SOF2 {
            if data.len() - pos < 7 {
                return Err(Error::TruncatedData("JPEG SOF segment cut short".into()));
            }
            let height = u32::from(u16::from_be_bytes([data[pos + 3], data[pos + 4]]));
            let width = u32::from(u16::from_be_bytes([data[pos + 5], data[pos + 6]]));
            return Ok(ImageDimensions {
                width,
                height,
                content_type: ImageFormat::Jpeg.content_type(),
            });
        }

        if data.len() - pos < 2 {
            return Err(Error::TruncatedData(
                "JPEG segment length unreadable".into(),
            ));
        }
        let length = usize::from(u16::from_be_bytes([data[pos], data[pos + 1]]));
        if length < 2 {
            return Err(Error::TruncatedData(format!(
                "JPEG segment length {length} below minimum"
            )));
        }
        // The declared length includes its own two bytes.
        pos += length;
    }

    Err(Error::DimensionsNotFound(
        "no SOF marker before end of stream".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&PNG_SIGNATURE);
        data.extend_from_slice(&13u32.to_be_bytes());
        data.extend_from_slice(b"IHDR");
        data.extend_from_slice(&width.to_be_bytes());
        data.extend_from_slice(&height.to_be_bytes());
        data.extend_from_slice(&[8, 6, 0, 0, 0]);
        data
    }

    fn jpeg_sof_segment(width: u16, height: u16, marker: u8) -> Vec<u8> {
        let mut seg = vec![0xFF, marker, 0x00, 0x11, 0x08];
        seg.extend_from_slice(&height.to_be_bytes());
        seg.extend_from_slice(&width.to_be_bytes());
        seg.push(0x03);
        seg
    }

    fn jpeg_bytes(width: u16, height: u16) -> Vec<u8> {
        let mut data = vec![0xFF, 0xD8];
        // APP0 segment ahead of the frame header
        data.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x10]);
        data.extend_from_slice(&[0u8; 14]);
        data.extend_from_slice(&jpeg_sof_segment(width, height, JPEG_SOF0));
        data
    }

    #[test]
    fn test_png_dimensions() {
        let dims = png_dimensions(&png_bytes(640, 480)).unwrap();
        assert_eq!(dims.width, 640);
        assert_eq!(dims.height, 480);
        assert_eq!(dims.content_type, "image/png");
    }

    #[test]
    fn test_png_large_dimensions() {
        let dims = png_dimensions(&png_bytes(65_536, 70_000)).unwrap();
        assert_eq!((dims.width, dims.height), (65_536, 70_000));
    }

    #[test]
    fn test_png_too_small() {
        let result = png_dimensions(&PNG_SIGNATURE);
        assert!(matches!(result, Err(Error::MalformedInput(_))));
    }

    #[test]
    fn test_png_bad_signature() {
        let mut data = png_bytes(10, 10);
        data[0] = 0x00;
        let result = png_dimensions(&data);
        assert!(matches!(result, Err(Error::MalformedInput(_))));
    }

    #[test]
    fn test_jpeg_dimensions() {
        let dims = jpeg_dimensions(&jpeg_bytes(800, 600)).unwrap();
        assert_eq!(dims.width, 800);
        assert_eq!(dims.height, 600);
        assert_eq!(dims.content_type, "image/jpeg");
    }

    #[test]
    fn test_jpeg_progressive_sof() {
        let mut data = vec![0xFF, 0xD8];
        data.extend_from_slice(&jpeg_sof_segment(320, 240, JPEG_SOF2));
        let dims = jpeg_dimensions(&data).unwrap();
        assert_eq!((dims.width, dims.height), (320, 240));
    }

    #[test]
    fn test_jpeg_many_segments_before_sof() {
        let mut data = vec![0xFF, 0xD8];
        // Several APPn/DQT-style segments of varying length
        for (marker, payload) in [(0xE1u8, 30usize), (0xDB, 67), (0xE2, 5)] {
            data.extend_from_slice(&[0xFF, marker]);
            data.extend_from_slice(&((payload as u16 + 2).to_be_bytes()));
            data.extend(std::iter::repeat(0xAB).take(payload));
        }
        data.extend_from_slice(&jpeg_sof_segment(1920, 1080, JPEG_SOF0));
        let dims = jpeg_dimensions(&data).unwrap();
        assert_eq!((dims.width, dims.height), (1920, 1080));
    }

    #[test]
    fn test_jpeg_fill_bytes_before_marker() {
        let mut data = vec![0xFF, 0xD8];
        data.extend_from_slice(&[0xFF, 0xFF, 0xFF]);
        data.extend_from_slice(&jpeg_sof_segment(64, 32, JPEG_SOF0)[1..].to_vec());
        let dims = jpeg_dimensions(&data).unwrap();
        assert_eq!((dims.width, dims.height), (64, 32));
    }

    #[test]
    fn test_jpeg_padding_bytes_between_segments() {
        let mut data = vec![0xFF, 0xD8];
        // Stray non-marker bytes are skipped one at a time
        data.extend_from_slice(&[0x00, 0x12, 0x34]);
        data.extend_from_slice(&jpeg_sof_segment(12, 34, JPEG_SOF0));
        let dims = jpeg_dimensions(&data).unwrap();
        assert_eq!((dims.width, dims.height), (12, 34));
    }

    #[test]
    fn test_jpeg_missing_soi() {
        let result = jpeg_dimensions(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(Error::MalformedInput(_))));
    }

    #[test]
    fn test_jpeg_no_sof() {
        let mut data = vec![0xFF, 0xD8];
        data.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x04, 0x00, 0x00]);
        let result = jpeg_dimensions(&data);
        assert!(matches!(result, Err(Error::DimensionsNotFound(_))));
    }

    #[test]
    fn test_jpeg_truncated_sof() {
        let mut data = vec![0xFF, 0xD8, 0xFF, JPEG_SOF0];
        data.extend_from_slice(&[0x00, 0x11, 0x08]);
        let result = jpeg_dimensions(&data);
        assert!(matches!(result, Err(Error::TruncatedData(_))));
    }

    #[test]
    fn test_jpeg_segment_length_below_minimum() {
        let data = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x01];
        let result = jpeg_dimensions(&data);
        assert!(matches!(result, Err(Error::TruncatedData(_))));
    }

    #[test]
    fn test_jpeg_unreadable_segment_length() {
        let data = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00];
        let result = jpeg_dimensions(&data);
        assert!(matches!(result, Err(Error::TruncatedData(_))));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ImageFormat::from_path("a/cover.png").unwrap(), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path("cover.JPG").unwrap(), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_path("cover.Jpeg").unwrap(), ImageFormat::Jpeg);
        assert!(matches!(
            ImageFormat::from_path("cover.gif"),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(matches!(
            ImageFormat::from_path("cover"),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_content_type() {
        assert_eq!(content_type("x.png").unwrap(), "image/png");
        assert_eq!(content_type("x.jpeg").unwrap(), "image/jpeg");
        assert!(content_type("x.bmp").is_err());
    }

    #[test]
    fn test_read_dimensions_missing_file() {
        let result = read_dimensions("/nonexistent/cover.png");
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_read_dimensions_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cover.png");
        std::fs::write(&path, png_bytes(200, 100)).unwrap();
        let dims = read_dimensions(&path).unwrap();
        assert_eq!((dims.width, dims.height), (200, 100));
    }
}
