//! Conversions between the detector's coordinate convention and image space.
//!
//! Face detectors report rectangles with the origin at the bottom-left of the
//! image and y growing upward. Image space, and everything the cropper
//! computes, has the origin at the top-left with y growing downward. The two
//! differ only by a vertical reflection about the image's horizontal midline.

use crate::shared::rect::Rect;

/// Converts a bottom-left-origin rectangle to top-left-origin image space.
pub fn flip_to_top_left(rect: &Rect, image_height: f64) -> Rect {
    reflect(rect, image_height)
}

/// Converts a top-left-origin rectangle to the detector's bottom-left origin.
pub fn flip_to_bottom_left(rect: &Rect, image_height: f64) -> Rect {
    reflect(rect, image_height)
}

fn reflect(rect: &Rect, image_height: f64) -> Rect {
    Rect {
        y: image_height - rect.y - rect.height,
        ..*rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_face_at_bottom_moves_to_bottom_of_image_space() {
        // Detector y=0 is the bottom row, so a 20px face there ends at the
        // last row in image space.
        let r = flip_to_top_left(&Rect::new(5.0, 0.0, 10.0, 20.0), 100.0);
        assert_relative_eq!(r.y, 80.0);
        assert_relative_eq!(r.bottom(), 100.0);
    }

    #[test]
    fn test_face_at_top_moves_to_origin() {
        let r = flip_to_top_left(&Rect::new(5.0, 80.0, 10.0, 20.0), 100.0);
        assert_relative_eq!(r.y, 0.0);
    }

    #[test]
    fn test_x_and_size_are_untouched() {
        let original = Rect::new(12.5, 30.0, 40.0, 25.0);
        let r = flip_to_top_left(&original, 200.0);
        assert_relative_eq!(r.x, original.x);
        assert_relative_eq!(r.width, original.width);
        assert_relative_eq!(r.height, original.height);
    }

    #[rstest]
    #[case::centered(Rect::new(40.0, 40.0, 20.0, 20.0), 100.0)]
    #[case::fractional(Rect::new(1.5, 7.25, 3.0, 9.5), 33.0)]
    #[case::full_height(Rect::new(0.0, 0.0, 10.0, 50.0), 50.0)]
    fn test_flips_are_inverse(#[case] r: Rect, #[case] height: f64) {
        let back = flip_to_bottom_left(&flip_to_top_left(&r, height), height);
        assert_relative_eq!(back.y, r.y);
        assert_eq!(back.x, r.x);
    }

    #[test]
    fn test_centered_face_is_fixed_point() {
        let r = Rect::new(40.0, 40.0, 20.0, 20.0);
        assert_eq!(flip_to_top_left(&r, 100.0), r);
    }
}
