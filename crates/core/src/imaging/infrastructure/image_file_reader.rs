use std::path::Path;

use image::DynamicImage;

use crate::imaging::domain::image_reader::ImageReader;
use crate::shared::frame::Frame;

/// Decodes image files with the `image` crate.
///
/// Images with an alpha channel become 4-channel RGBA frames, everything
/// else 3-channel RGB. Higher bit depths are narrowed to 8 bits.
pub struct ImageFileReader;

impl ImageFileReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileReader {
    fn default() -> Self {
        Self::new()
    }
}

fn frame_from_image(img: DynamicImage) -> Frame {
    let (width, height) = (img.width(), img.height());
    if img.color().has_alpha() {
        Frame::new(img.into_rgba8().into_raw(), width, height, 4)
    } else {
        Frame::new(img.into_rgb8().into_raw(), width, height, 3)
    }
}

impl ImageReader for ImageFileReader {
    fn read(&self, path: &Path) -> Result<Frame, Box<dyn std::error::Error>> {
        let img = image::open(path)?;
        Ok(frame_from_image(img))
    }
}
