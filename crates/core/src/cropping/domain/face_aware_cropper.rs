use std::hash::{Hash, Hasher};

use thiserror::Error;

use crate::cropping::domain::crop_geometry::compute_crop_rect;
use crate::shared::aspect_ratio::AspectRatio;
use crate::shared::constants::CROPPER_IDENTIFIER_PREFIX;
use crate::shared::frame::Frame;
use crate::shared::rect::Rect;

/// Why a crop fell back to the original frame.
///
/// None of these are errors for the caller: the uncropped image is always a
/// usable result.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    #[error("no faces detected")]
    NoFacesDetected,
    #[error("crop rectangle is empty or does not shrink the image")]
    DegenerateCropRectangle,
    #[error("image has no usable pixel data")]
    UnsupportedInputImage,
    #[error("crop produced no pixels")]
    CropOperationFailure,
}

/// Sanity check applied to the crop rectangle before cropping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SizeGuard {
    /// Neither side may exceed the image and at least one must be smaller.
    #[default]
    BothAxes,
    /// Only requires the height to be strictly smaller than the image's.
    ///
    /// The width is never looked at, so wide images (whose crop keeps the
    /// full height) are always returned uncropped. Kept for callers that
    /// depend on that behavior.
    HeightOnly,
}

impl SizeGuard {
    fn accepts(self, rect: &Rect, image_width: f64, image_height: f64) -> bool {
        match self {
            SizeGuard::BothAxes => {
                rect.width <= image_width
                    && rect.height <= image_height
                    && (rect.width < image_width || rect.height < image_height)
            }
            SizeGuard::HeightOnly => rect.height < image_height,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CropperConfig {
    pub size_guard: SizeGuard,
    /// Keep the far edge of the crop inside the image. Off by default: the
    /// crop is only kept from starting before pixel 0, and an overhanging
    /// rectangle is clipped when cropped.
    pub clamp_to_bounds: bool,
}

/// Result of a crop attempt.
#[derive(Debug)]
pub enum CropOutcome {
    Cropped(Frame),
    /// The input frame, handed back untouched.
    Unchanged(Frame, FallbackReason),
}

impl CropOutcome {
    pub fn into_frame(self) -> Frame {
        match self {
            CropOutcome::Cropped(frame) | CropOutcome::Unchanged(frame, _) => frame,
        }
    }

    pub fn fallback_reason(&self) -> Option<FallbackReason> {
        match self {
            CropOutcome::Cropped(_) => None,
            CropOutcome::Unchanged(_, reason) => Some(*reason),
        }
    }
}

/// Crops an image to a target aspect ratio while keeping its faces centered.
///
/// Stateless apart from its configuration, so one instance can be shared
/// across threads. Two croppers compare equal when their identifiers match,
/// i.e. when they would produce the same output for the same input.
#[derive(Clone, Debug)]
pub struct FaceAwareCropper {
    aspect: AspectRatio,
    config: CropperConfig,
    identifier: String,
}

impl FaceAwareCropper {
    pub fn new(aspect: AspectRatio) -> Self {
        Self::with_config(aspect, CropperConfig::default())
    }

    pub fn with_config(aspect: AspectRatio, config: CropperConfig) -> Self {
        let identifier = build_identifier(&aspect, &config);
        Self {
            aspect,
            config,
            identifier,
        }
    }

    pub fn aspect(&self) -> &AspectRatio {
        &self.aspect
    }

    pub fn config(&self) -> &CropperConfig {
        &self.config
    }

    /// Stable key for caching processed variants of an image.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Crops `frame` around `faces`, or returns it unchanged.
    ///
    /// `faces` are in detector coordinates (bottom-left origin).
    pub fn crop(&self, frame: Frame, faces: &[Rect]) -> Frame {
        self.crop_with_outcome(frame, faces).into_frame()
    }

    /// Like [`crop`](Self::crop), but reports which path was taken.
    pub fn crop_with_outcome(&self, frame: Frame, faces: &[Rect]) -> CropOutcome {
        if faces.is_empty() {
            return CropOutcome::Unchanged(frame, FallbackReason::NoFacesDetected);
        }
        let Some((width, height)) = frame.dimensions() else {
            return CropOutcome::Unchanged(frame, FallbackReason::UnsupportedInputImage);
        };

        let rect = match self.crop_rect(width, height, faces) {
            Some(rect) if rect != Rect::ZERO && !rect.is_empty() => rect,
            _ => return CropOutcome::Unchanged(frame, FallbackReason::DegenerateCropRectangle),
        };
        if !self
            .config
            .size_guard
            .accepts(&rect, width as f64, height as f64)
        {
            return CropOutcome::Unchanged(frame, FallbackReason::DegenerateCropRectangle);
        }

        match frame.crop(&rect.to_pixels()) {
            Some(cropped) => CropOutcome::Cropped(cropped),
            None => CropOutcome::Unchanged(frame, FallbackReason::CropOperationFailure),
        }
    }

    /// The rectangle [`crop`](Self::crop) would cut, before any guard.
    pub fn crop_rect(&self, image_width: u32, image_height: u32, faces: &[Rect]) -> Option<Rect> {
        compute_crop_rect(
            image_width,
            image_height,
            faces,
            &self.aspect,
            self.config.clamp_to_bounds,
        )
    }
}

impl PartialEq for FaceAwareCropper {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

impl Eq for FaceAwareCropper {}

impl Hash for FaceAwareCropper {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier.hash(state);
    }
}

fn build_identifier(aspect: &AspectRatio, config: &CropperConfig) -> String {
    let mut options = String::new();
    if config.clamp_to_bounds {
        options.push_str(",clamped");
    }
    if config.size_guard == SizeGuard::HeightOnly {
        options.push_str(",height-guard");
    }
    format!("{CROPPER_IDENTIFIER_PREFIX}({aspect}{options})")
}
