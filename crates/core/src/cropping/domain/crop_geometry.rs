//! Pure geometry for face-aware cropping.
//!
//! The pipeline is flip → union → center → fitted size → position. Every
//! stage is a separate function so each can be checked on its own.

use crate::detection::domain::coordinates::flip_to_top_left;
use crate::shared::aspect_ratio::AspectRatio;
use crate::shared::rect::Rect;

/// The image axis that was shortened to reach the target aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Minimal rectangle enclosing every face, in top-left image space.
///
/// Both minima start at `+inf` and both maxima at `-inf`, and only
/// top-left coordinates are compared. The size is measured between the
/// truncated far edges and the truncated origin, so it is always a whole
/// number of pixels. Returns `None` for an empty slice.
pub fn union_bounds(faces: &[Rect]) -> Option<Rect> {
    if faces.is_empty() {
        return None;
    }

    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_right = f64::NEG_INFINITY;
    let mut max_bottom = f64::NEG_INFINITY;
    for face in faces {
        min_x = min_x.min(face.x);
        min_y = min_y.min(face.y);
        max_right = max_right.max(face.right());
        max_bottom = max_bottom.max(face.bottom());
    }

    Some(Rect {
        x: min_x,
        y: min_y,
        width: max_right.trunc() - min_x.trunc(),
        height: max_bottom.trunc() - min_y.trunc(),
    })
}

/// Largest size with the target aspect ratio that fits the image by
/// shrinking exactly one side.
///
/// An image relatively wider than the target keeps its height; otherwise
/// it keeps its width. Equal ratios count as "not wider".
pub fn fitted_size(image_width: f64, image_height: f64, aspect: &AspectRatio) -> (f64, f64, Axis) {
    if image_width / image_height > aspect.ratio() {
        let width = image_height * aspect.width() / aspect.height();
        (width, image_height, Axis::Horizontal)
    } else {
        let height = image_width * aspect.height() / aspect.width();
        (image_width, height, Axis::Vertical)
    }
}

/// Places a crop of `size` so its center lines up with `center` on the
/// shrunk axis. The other axis starts at 0.
///
/// The origin never goes below 0. Unless `clamp_to_bounds` is set, nothing
/// stops the far edge from passing the image's extent: a face near the
/// right or bottom edge yields a rectangle that overhangs the image.
pub fn position(
    center: (f64, f64),
    size: (f64, f64),
    axis: Axis,
    image_size: (f64, f64),
    clamp_to_bounds: bool,
) -> Rect {
    let (width, height) = size;
    let place = |center: f64, extent: f64, image_extent: f64| {
        let origin = center - extent / 2.0;
        let origin = if clamp_to_bounds {
            origin.min(image_extent - extent)
        } else {
            origin
        };
        origin.max(0.0)
    };

    match axis {
        Axis::Horizontal => Rect::new(place(center.0, width, image_size.0), 0.0, width, height),
        Axis::Vertical => Rect::new(0.0, place(center.1, height, image_size.1), width, height),
    }
}

/// Computes the crop rectangle for an image and its detected faces.
///
/// `faces` are in the detector convention (bottom-left origin). Returns
/// `None` when there are no faces.
pub fn compute_crop_rect(
    image_width: u32,
    image_height: u32,
    faces: &[Rect],
    aspect: &AspectRatio,
    clamp_to_bounds: bool,
) -> Option<Rect> {
    let (image_w, image_h) = (image_width as f64, image_height as f64);

    let flipped: Vec<Rect> = faces
        .iter()
        .map(|face| flip_to_top_left(face, image_h))
        .collect();
    let bounds = union_bounds(&flipped)?;

    let (width, height, axis) = fitted_size(image_w, image_h, aspect);
    Some(position(
        bounds.center(),
        (width, height),
        axis,
        (image_w, image_h),
        clamp_to_bounds,
    ))
}
