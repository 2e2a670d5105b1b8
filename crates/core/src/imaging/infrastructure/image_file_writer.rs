use std::path::Path;

use image::DynamicImage;

use crate::imaging::domain::image_writer::ImageWriter;
use crate::shared::frame::Frame;

/// Writes a single frame to an image file using the `image` crate.
///
/// The format follows the file extension. Supports optional resizing to
/// the destination view size.
pub struct ImageFileWriter;

impl ImageFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn image_from_frame(frame: &Frame) -> Result<DynamicImage, Box<dyn std::error::Error>> {
    let (w, h) = (frame.width(), frame.height());
    let data = frame.data().to_vec();
    let img = match frame.channels() {
        3 => image::RgbImage::from_raw(w, h, data).map(DynamicImage::ImageRgb8),
        4 => image::RgbaImage::from_raw(w, h, data).map(DynamicImage::ImageRgba8),
        n => return Err(format!("Unsupported channel count: {n}").into()),
    };
    img.ok_or_else(|| "Failed to create image from frame data".into())
}

impl ImageWriter for ImageFileWriter {
    fn write(
        &self,
        path: &Path,
        frame: &Frame,
        size: Option<(u32, u32)>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        // Ensure parent directory exists (infrastructure concern)
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let img = image_from_frame(frame)?;
        let img = if let Some((w, h)) = size {
            img.resize_exact(w, h, image::imageops::FilterType::Triangle)
        } else {
            img
        };

        // JPEG has no alpha channel.
        let is_jpeg = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| matches!(ext.to_lowercase().as_str(), "jpg" | "jpeg"));
        let img = if is_jpeg && img.color().has_alpha() {
            DynamicImage::ImageRgb8(img.into_rgb8())
        } else {
            img
        };

        img.save(path)?;
        Ok(())
    }
}
