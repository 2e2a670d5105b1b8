use crate::cropping::domain::face_aware_cropper::{CropOutcome, FaceAwareCropper};
use crate::cropping::domain::image_processor::ImageProcessor;
use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::frame::Frame;

/// Detects faces in each frame and crops around them.
///
/// Detector failures are logged and treated like an image without faces:
/// the frame passes through unchanged.
pub struct FaceAwareProcessor {
    detector: Box<dyn FaceDetector>,
    cropper: FaceAwareCropper,
}

impl FaceAwareProcessor {
    pub fn new(detector: Box<dyn FaceDetector>, cropper: FaceAwareCropper) -> Self {
        Self { detector, cropper }
    }

    pub fn cropper(&self) -> &FaceAwareCropper {
        &self.cropper
    }
}

impl ImageProcessor for FaceAwareProcessor {
    fn identifier(&self) -> &str {
        self.cropper.identifier()
    }

    fn process(&mut self, frame: Frame) -> Frame {
        let faces = match self.detector.detect(&frame) {
            Ok(faces) => faces,
            Err(e) => {
                log::warn!("Face detection failed, leaving image uncropped: {e}");
                return frame;
            }
        };
        log::debug!("Detected {} face(s)", faces.len());

        match self.cropper.crop_with_outcome(frame, &faces) {
            CropOutcome::Cropped(cropped) => {
                log::debug!("Cropped to {}x{}", cropped.width(), cropped.height());
                cropped
            }
            CropOutcome::Unchanged(frame, reason) => {
                log::debug!("Left image uncropped: {reason}");
                frame
            }
        }
    }
}

impl PartialEq for FaceAwareProcessor {
    fn eq(&self, other: &Self) -> bool {
        self.identifier() == other.identifier()
    }
}
