/// Axis-aligned rectangle in pixel units.
///
/// Coordinates are fractional so detector output and aspect-derived crop
/// sizes survive without rounding until the crop is executed. Which way the
/// y axis points depends on where the rectangle came from; see
/// [`crate::detection::domain::coordinates`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// True when the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Smallest whole-pixel rectangle containing this one.
    ///
    /// The origin is floored and the far edge ceiled. Anything left of or
    /// above the image origin is dropped since pixel space starts at 0.
    pub fn to_pixels(&self) -> PixelRect {
        let x0 = self.x.floor().max(0.0);
        let y0 = self.y.floor().max(0.0);
        let x1 = self.right().ceil().max(x0);
        let y1 = self.bottom().ceil().max(y0);
        PixelRect {
            x: x0 as u32,
            y: y0 as u32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        }
    }
}

/// Whole-pixel rectangle with a top-left origin, ready for slicing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// Clips the rectangle to a `width` x `height` image.
    ///
    /// Returns `None` when nothing of the rectangle lies inside the image.
    pub fn intersect(&self, width: u32, height: u32) -> Option<PixelRect> {
        let x1 = self.x.saturating_add(self.width).min(width);
        let y1 = self.y.saturating_add(self.height).min(height);
        if self.x >= x1 || self.y >= y1 {
            return None;
        }
        Some(PixelRect {
            x: self.x,
            y: self.y,
            width: x1 - self.x,
            height: y1 - self.y,
        })
    }
}
