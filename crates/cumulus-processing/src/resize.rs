//! Buffer-to-buffer image resizing for the upload pipeline.
//!
//! Decodes, resizes, and re-encodes in the source format. Decode and encode
//! failures propagate; the caller never falls back to the original bytes.

use std::io::Cursor;

use image::{imageops::FilterType, DynamicImage, GenericImageView, ImageFormat};

use cumulus_core::error::{CloudinaryError, Result};

/// Width applied when the caller requests a resize without dimensions.
pub const DEFAULT_WIDTH: u32 = 800;

/// How requested dimensions are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fit {
    /// Preserve aspect ratio, fitting within the requested bounds.
    #[default]
    Scale,
    /// Resize to the exact dimensions, ignoring aspect ratio.
    Fill,
}

/// Resize parameters for the upload pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResizeOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fit: Fit,
}

impl ResizeOptions {
    pub fn width(width: u32) -> Self {
        Self {
            width: Some(width),
            ..Default::default()
        }
    }

    pub fn dimensions(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            fit: Fit::default(),
        }
    }

    /// Target dimensions for a source image. With one dimension given the
    /// other follows the aspect ratio; with neither, DEFAULT_WIDTH applies.
    pub fn target_dimensions(&self, orig_width: u32, orig_height: u32) -> (u32, u32) {
        match (self.width, self.height) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => (w, scaled(orig_height, orig_width, w)),
            (None, Some(h)) => (scaled(orig_width, orig_height, h), h),
            (None, None) => (
                DEFAULT_WIDTH,
                scaled(orig_height, orig_width, DEFAULT_WIDTH),
            ),
        }
    }
}

fn scaled(side: u32, other_side: u32, other_target: u32) -> u32 {
    let ratio = side as f32 / other_side as f32;
    ((other_target as f32 * ratio).round() as u32).max(1)
}

// Downscale ratios above 2x tolerate cheaper filters.
fn select_filter(orig_width: u32, orig_height: u32, new_width: u32, new_height: u32) -> FilterType {
    let width_ratio = orig_width as f32 / new_width as f32;
    let height_ratio = orig_height as f32 / new_height as f32;
    let max_ratio = width_ratio.max(height_ratio);

    if max_ratio > 2.0 {
        FilterType::Triangle
    } else if max_ratio > 1.5 {
        FilterType::CatmullRom
    } else {
        FilterType::Lanczos3
    }
}

/// Decode `data`, resize per `options`, and re-encode in the source format.
///
/// The output format is taken from the declared content type, falling back
/// to format detection on the buffer itself.
pub fn resize_image(data: &[u8], content_type: &str, options: ResizeOptions) -> Result<Vec<u8>> {
    let format = ImageFormat::from_mime_type(content_type)
        .or_else(|| image::guess_format(data).ok())
        .ok_or_else(|| {
            CloudinaryError::ImageProcessing(format!(
                "Unsupported image content type: {}",
                content_type
            ))
        })?;

    let img = image::load_from_memory_with_format(data, format)
        .map_err(|e| CloudinaryError::ImageProcessing(format!("Failed to decode image: {}", e)))?;

    let (orig_width, orig_height) = img.dimensions();
    let (target_width, target_height) = options.target_dimensions(orig_width, orig_height);

    let filter = select_filter(orig_width, orig_height, target_width, target_height);
    let resized: DynamicImage = match options.fit {
        Fit::Scale => img.resize(target_width, target_height, filter),
        Fit::Fill => img.resize_exact(target_width, target_height, filter),
    };

    let mut out = Vec::new();
    // JPEG encoding rejects alpha channels; flatten first.
    let resized = if format == ImageFormat::Jpeg {
        DynamicImage::ImageRgb8(resized.to_rgb8())
    } else {
        resized
    };
    resized
        .write_to(&mut Cursor::new(&mut out), format)
        .map_err(|e| CloudinaryError::ImageProcessing(format!("Failed to encode image: {}", e)))?;

    tracing::debug!(
        orig_width,
        orig_height,
        target_width,
        target_height,
        out_bytes = out.len(),
        "resized image before upload"
    );

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            Rgba([255, 0, 0, 255]),
        ));
        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
            .unwrap();
        out
    }

    fn decoded_dimensions(data: &[u8]) -> (u32, u32) {
        image::load_from_memory(data).unwrap().dimensions()
    }

    #[test]
    fn test_target_dimensions_defaults_to_800_wide() {
        let options = ResizeOptions::default();
        assert_eq!(options.target_dimensions(1600, 800), (800, 400));
    }

    #[test]
    fn test_target_dimensions_width_only_keeps_aspect() {
        let options = ResizeOptions::width(200);
        assert_eq!(options.target_dimensions(100, 50), (200, 100));
    }

    #[test]
    fn test_target_dimensions_height_only_keeps_aspect() {
        let options = ResizeOptions {
            height: Some(100),
            ..Default::default()
        };
        assert_eq!(options.target_dimensions(100, 50), (200, 100));
    }

    #[test]
    fn test_resize_image_scale() {
        let data = png_bytes(400, 200);
        let out = resize_image(&data, "image/png", ResizeOptions::width(100)).unwrap();
        assert_eq!(decoded_dimensions(&out), (100, 50));
    }

    #[test]
    fn test_resize_image_fill_ignores_aspect() {
        let data = png_bytes(400, 200);
        let options = ResizeOptions {
            width: Some(100),
            height: Some(100),
            fit: Fit::Fill,
        };
        let out = resize_image(&data, "image/png", options).unwrap();
        assert_eq!(decoded_dimensions(&out), (100, 100));
    }

    #[test]
    fn test_resize_image_scale_fits_within_bounds() {
        let data = png_bytes(400, 200);
        let options = ResizeOptions::dimensions(100, 100);
        let out = resize_image(&data, "image/png", options).unwrap();
        // Aspect preserved: 400x200 within 100x100 is 100x50.
        assert_eq!(decoded_dimensions(&out), (100, 50));
    }

    #[test]
    fn test_resize_image_default_width() {
        let data = png_bytes(1600, 800);
        let out = resize_image(&data, "image/png", ResizeOptions::default()).unwrap();
        assert_eq!(decoded_dimensions(&out), (800, 400));
    }

    #[test]
    fn test_resize_corrupt_image_fails() {
        let err = resize_image(b"not an image", "image/png", ResizeOptions::default());
        assert!(matches!(
            err,
            Err(CloudinaryError::ImageProcessing(_))
        ));
    }

    #[test]
    fn test_resize_unsupported_content_type_fails() {
        let err = resize_image(b"%PDF-1.4", "application/pdf", ResizeOptions::default());
        assert!(matches!(
            err,
            Err(CloudinaryError::ImageProcessing(_))
        ));
    }

    #[test]
    fn test_jpeg_roundtrip_flattens_alpha() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(64, 64, Rgba([0, 255, 0, 128])));
        let mut data = Vec::new();
        DynamicImage::ImageRgb8(img.to_rgb8())
            .write_to(&mut Cursor::new(&mut data), ImageFormat::Jpeg)
            .unwrap();
        let out = resize_image(&data, "image/jpeg", ResizeOptions::width(32)).unwrap();
        assert_eq!(decoded_dimensions(&out), (32, 32));
    }
}
