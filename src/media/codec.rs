// SPDX-License-Identifier: MPL-2.0
//! Re-encoding of a source image under a chosen format and quality.
//!
//! This is the "compression engine" of the application, and it is a thin
//! orchestration over the `image` crate: decode the source bytes, rasterize
//! to an RGBA surface at the natural dimensions (no scaling, no cropping),
//! and hand that surface to the format's encoder.

use crate::error::{Error, Result};
use iced::widget::image;
use image_rs::codecs::jpeg::JpegEncoder;
use image_rs::ImageFormat;
use std::fmt;
use std::io::Cursor;
use std::sync::Arc;

/// Supported output formats for re-encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// JPEG (lossy; the quality fraction applies).
    #[default]
    Jpeg,
    /// PNG (lossless; quality is ignored, as the platform encoders do).
    Png,
    /// WebP (lossless in the `image` crate; quality is ignored).
    WebP,
}

impl OutputFormat {
    /// Returns all supported formats, in selector order.
    #[must_use]
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Jpeg, OutputFormat::Png, OutputFormat::WebP]
    }

    /// Returns the MIME identifier for this format.
    #[must_use]
    pub fn mime(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
            OutputFormat::WebP => "image/webp",
        }
    }

    /// Returns the file extension: the MIME subtype after the `/`.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Png => "png",
            OutputFormat::WebP => "webp",
        }
    }

    /// Detects a format from its MIME identifier.
    #[must_use]
    pub fn from_mime(mime: &str) -> Option<OutputFormat> {
        match mime {
            "image/jpeg" => Some(OutputFormat::Jpeg),
            "image/png" => Some(OutputFormat::Png),
            "image/webp" => Some(OutputFormat::WebP),
            _ => None,
        }
    }

    /// Suggested file name for a saved result.
    #[must_use]
    pub fn default_file_name(&self) -> String {
        format!("compressed.{}", self.extension())
    }

    /// Returns the format for the `image` crate.
    fn image_format(self) -> ImageFormat {
        match self {
            OutputFormat::Jpeg => ImageFormat::Jpeg,
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::WebP => ImageFormat::WebP,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::Png => "PNG",
            OutputFormat::WebP => "WebP",
        };
        write!(f, "{label}")
    }
}

/// Encoder quality as a fraction, clamped to the slider's range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quality(f32);

pub const MIN_QUALITY: f32 = 0.1;
pub const MAX_QUALITY: f32 = 1.0;
pub const QUALITY_STEP: f32 = 0.1;
pub const DEFAULT_QUALITY: f32 = 0.7;

impl Quality {
    /// Creates a quality value, clamped to [`MIN_QUALITY`]..[`MAX_QUALITY`].
    #[must_use]
    pub fn new(fraction: f32) -> Self {
        Self(fraction.clamp(MIN_QUALITY, MAX_QUALITY))
    }

    /// Returns the quality as a fraction in [0.1, 1.0].
    #[must_use]
    pub fn fraction(&self) -> f32 {
        self.0
    }

    /// Returns the quality scaled for the JPEG encoder (1-100).
    #[must_use]
    pub fn jpeg_quality(&self) -> u8 {
        // MIN_QUALITY keeps this above zero; MAX_QUALITY keeps it at 100.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            (self.0 * 100.0).round() as u8
        }
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(DEFAULT_QUALITY)
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// The re-encoded image produced by a successful compression.
#[derive(Debug, Clone)]
pub struct CompressedImage {
    /// Encoded bytes (shared reference; cloned results stay cheap).
    pub bytes: Arc<Vec<u8>>,
    /// Encoded size in bytes.
    pub size_bytes: u64,
    /// The format the bytes were encoded under.
    pub format: OutputFormat,
    /// Display handle for the result preview.
    pub handle: image::Handle,
}

impl CompressedImage {
    /// Suggested file name for the save dialog.
    #[must_use]
    pub fn default_file_name(&self) -> String {
        self.format.default_file_name()
    }
}

/// Decodes `encoded` and re-encodes it under `format` and `quality`.
///
/// The decoded image is rasterized to an RGBA surface at its natural
/// dimensions before encoding; this is a pass-through re-encode, not a
/// resize. For JPEG the surface is flattened to RGB first since the format
/// has no alpha channel.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the source bytes are not a decodable image,
/// or [`Error::Encode`] if the encoder rejects the surface.
pub fn compress(encoded: &[u8], format: OutputFormat, quality: Quality) -> Result<CompressedImage> {
    let decoded = image_rs::load_from_memory(encoded).map_err(|e| Error::Decode(e.to_string()))?;
    let surface = decoded.to_rgba8();

    let mut out = Cursor::new(Vec::new());
    match format {
        OutputFormat::Jpeg => {
            let rgb = image_rs::DynamicImage::ImageRgba8(surface).to_rgb8();
            let encoder = JpegEncoder::new_with_quality(&mut out, quality.jpeg_quality());
            rgb.write_with_encoder(encoder)
                .map_err(|e| Error::Encode(e.to_string()))?;
        }
        OutputFormat::Png | OutputFormat::WebP => {
            image_rs::DynamicImage::ImageRgba8(surface)
                .write_to(&mut out, format.image_format())
                .map_err(|e| Error::Encode(e.to_string()))?;
        }
    }

    let bytes = out.into_inner();
    let size_bytes = bytes.len() as u64;
    let bytes = Arc::new(bytes);
    let handle = image::Handle::from_bytes((*bytes).clone());

    Ok(CompressedImage {
        bytes,
        size_bytes,
        format,
        handle,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{GenericImageView, Rgba, RgbaImage};

    fn sample_png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 255]));
        let mut bytes = Cursor::new(Vec::new());
        image_rs::DynamicImage::ImageRgba8(image)
            .write_to(&mut bytes, ImageFormat::Png)
            .expect("encode sample png");
        bytes.into_inner()
    }

    #[test]
    fn output_format_extensions_are_mime_subtypes() {
        assert_eq!(OutputFormat::Jpeg.extension(), "jpeg");
        assert_eq!(OutputFormat::Png.extension(), "png");
        assert_eq!(OutputFormat::WebP.extension(), "webp");
    }

    #[test]
    fn output_format_default_file_names() {
        assert_eq!(OutputFormat::Jpeg.default_file_name(), "compressed.jpeg");
        assert_eq!(OutputFormat::Png.default_file_name(), "compressed.png");
        assert_eq!(OutputFormat::WebP.default_file_name(), "compressed.webp");
    }

    #[test]
    fn output_format_from_mime_round_trips() {
        for format in OutputFormat::all() {
            assert_eq!(OutputFormat::from_mime(format.mime()), Some(*format));
        }
        assert_eq!(OutputFormat::from_mime("image/bmp"), None);
    }

    #[test]
    fn output_format_default_is_jpeg() {
        assert_eq!(OutputFormat::default(), OutputFormat::Jpeg);
    }

    #[test]
    fn output_format_all_returns_three_formats() {
        assert_eq!(OutputFormat::all().len(), 3);
    }

    #[test]
    fn quality_clamps_to_slider_range() {
        assert_eq!(Quality::new(0.0).fraction(), MIN_QUALITY);
        assert_eq!(Quality::new(2.0).fraction(), MAX_QUALITY);
        assert_eq!(Quality::new(0.5).fraction(), 0.5);
    }

    #[test]
    fn quality_default_is_seventy_percent() {
        assert_eq!(Quality::default().fraction(), DEFAULT_QUALITY);
        assert_eq!(Quality::default().jpeg_quality(), 70);
    }

    #[test]
    fn quality_display_uses_one_decimal() {
        assert_eq!(Quality::new(0.7).to_string(), "0.7");
        assert_eq!(Quality::new(1.0).to_string(), "1.0");
    }

    #[test]
    fn compress_to_jpeg_preserves_dimensions() {
        let encoded = sample_png_bytes(8, 5);

        let result =
            compress(&encoded, OutputFormat::Jpeg, Quality::default()).expect("compress to jpeg");

        assert_eq!(result.format, OutputFormat::Jpeg);
        assert_eq!(result.size_bytes, result.bytes.len() as u64);
        let reloaded = image_rs::load_from_memory(&result.bytes).expect("result should decode");
        assert_eq!(reloaded.dimensions(), (8, 5));
    }

    #[test]
    fn compress_to_png_and_webp_succeed() {
        let encoded = sample_png_bytes(4, 4);

        for format in [OutputFormat::Png, OutputFormat::WebP] {
            let result = compress(&encoded, format, Quality::default()).expect("compress");
            assert_eq!(result.format, format);
            assert!(result.size_bytes > 0);
        }
    }

    #[test]
    fn lower_jpeg_quality_does_not_grow_output() {
        // A flat-color image compresses well at any quality; the point is
        // that the quality fraction actually reaches the encoder.
        let encoded = sample_png_bytes(32, 32);

        let high = compress(&encoded, OutputFormat::Jpeg, Quality::new(1.0)).expect("high");
        let low = compress(&encoded, OutputFormat::Jpeg, Quality::new(0.1)).expect("low");

        assert!(low.size_bytes <= high.size_bytes);
    }

    #[test]
    fn compress_rejects_undecodable_input() {
        match compress(b"not an image", OutputFormat::Jpeg, Quality::default()) {
            Err(Error::Decode(message)) => assert!(!message.is_empty()),
            other => panic!("expected Decode error, got {other:?}"),
        }
    }
}
