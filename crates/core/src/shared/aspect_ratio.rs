use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum AspectRatioError {
    #[error("aspect ratio sides must be positive and finite, got {width}x{height}")]
    NonPositive { width: f64, height: f64 },
    #[error("expected WIDTHxHEIGHT or WIDTH:HEIGHT, got '{0}'")]
    Malformed(String),
}

/// Width/height pair describing the shape of a destination view.
///
/// Only the ratio matters for cropping; the sides are kept as given so the
/// processor identifier reflects the caller's view size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AspectRatio {
    width: f64,
    height: f64,
}

impl AspectRatio {
    pub fn new(width: f64, height: f64) -> Result<Self, AspectRatioError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(AspectRatioError::NonPositive { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn ratio(&self) -> f64 {
        self.width / self.height
    }

    /// The sides as whole pixel dimensions, if both are integers.
    pub fn as_pixel_size(&self) -> Option<(u32, u32)> {
        let whole = |v: f64| v.fract() == 0.0 && v <= u32::MAX as f64;
        if whole(self.width) && whole(self.height) {
            Some((self.width as u32, self.height as u32))
        } else {
            None
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for AspectRatio {
    type Err = AspectRatioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || AspectRatioError::Malformed(s.to_string());
        let (w, h) = s
            .trim()
            .split_once(&['x', 'X', ':'][..])
            .ok_or_else(malformed)?;
        let width: f64 = w.trim().parse().map_err(|_| malformed())?;
        let height: f64 = h.trim().parse().map_err(|_| malformed())?;
        Self::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_ratio() {
        let a = AspectRatio::new(400.0, 300.0).unwrap();
        assert_relative_eq!(a.ratio(), 4.0 / 3.0);
    }

    #[rstest]
    #[case::zero_width(0.0, 1.0)]
    #[case::zero_height(1.0, 0.0)]
    #[case::negative(-4.0, 3.0)]
    #[case::nan(f64::NAN, 3.0)]
    #[case::infinite(4.0, f64::INFINITY)]
    fn test_new_rejects_invalid_sides(#[case] w: f64, #[case] h: f64) {
        assert!(matches!(
            AspectRatio::new(w, h),
            Err(AspectRatioError::NonPositive { .. })
        ));
    }

    #[rstest]
    #[case::pixels("400x300", 400.0, 300.0)]
    #[case::upper_x("1920X1080", 1920.0, 1080.0)]
    #[case::colon("4:3", 4.0, 3.0)]
    #[case::fractional("1.5:1", 1.5, 1.0)]
    #[case::spaces(" 16 : 9 ", 16.0, 9.0)]
    fn test_parse(#[case] input: &str, #[case] w: f64, #[case] h: f64) {
        let a: AspectRatio = input.parse().unwrap();
        assert_relative_eq!(a.width(), w);
        assert_relative_eq!(a.height(), h);
    }

    #[rstest]
    #[case::no_separator("400")]
    #[case::not_a_number("ax3")]
    #[case::empty("")]
    fn test_parse_malformed(#[case] input: &str) {
        assert!(matches!(
            input.parse::<AspectRatio>(),
            Err(AspectRatioError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_zero_is_non_positive() {
        assert!(matches!(
            "0x300".parse::<AspectRatio>(),
            Err(AspectRatioError::NonPositive { .. })
        ));
    }

    #[test]
    fn test_display_drops_trailing_zeros() {
        let a = AspectRatio::new(400.0, 300.0).unwrap();
        assert_eq!(a.to_string(), "400x300");
        let b = AspectRatio::new(1.5, 1.0).unwrap();
        assert_eq!(b.to_string(), "1.5x1");
    }

    #[test]
    fn test_as_pixel_size() {
        assert_eq!(
            AspectRatio::new(400.0, 300.0).unwrap().as_pixel_size(),
            Some((400, 300))
        );
        assert_eq!(AspectRatio::new(1.5, 1.0).unwrap().as_pixel_size(), None);
    }
}
