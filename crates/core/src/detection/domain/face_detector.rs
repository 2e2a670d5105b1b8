use crate::shared::frame::Frame;
use crate::shared::rect::Rect;

/// Domain interface for face detection.
///
/// Rectangles are returned in the detector convention: origin at the
/// bottom-left, y growing upward. Implementations may be stateful, hence
/// `&mut self`.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Rect>, Box<dyn std::error::Error>>;
}
