use ndarray::{s, ArrayView3};

use crate::shared::rect::PixelRect;

/// A decoded bitmap: contiguous 8-bit samples in row-major order.
///
/// Format conversion happens at I/O boundaries only; the domain layer
/// treats pixel data as opaque apart from its shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Pixel dimensions, or `None` when the frame has no usable pixel plane.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        if self.width == 0 || self.height == 0 || self.channels == 0 {
            return None;
        }
        if self.data.len() != self.expected_len() {
            return None;
        }
        Some((self.width, self.height))
    }

    pub fn as_ndarray(&self) -> Option<ArrayView3<'_, u8>> {
        ArrayView3::from_shape(self.shape(), &self.data).ok()
    }

    /// Copies the pixels inside `rect` into a new frame.
    ///
    /// The rectangle is clipped to the frame first. Returns `None` when
    /// nothing remains after clipping or the pixel plane is unusable.
    pub fn crop(&self, rect: &PixelRect) -> Option<Frame> {
        let (width, height) = self.dimensions()?;
        let clipped = rect.intersect(width, height)?;

        let (x0, y0) = (clipped.x as usize, clipped.y as usize);
        let (x1, y1) = (x0 + clipped.width as usize, y0 + clipped.height as usize);

        let src = self.as_ndarray()?;
        let data: Vec<u8> = src.slice(s![y0..y1, x0..x1, ..]).iter().copied().collect();

        Some(Frame::new(
            data,
            clipped.width,
            clipped.height,
            self.channels,
        ))
    }

    fn expected_len(&self) -> usize {
        (self.width as usize) * (self.height as usize) * (self.channels as usize)
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}
