use crate::shared::frame::Frame;

/// A pluggable image-processing step.
///
/// `process` never fails: a step that cannot do its work hands the frame
/// back unchanged. `identifier` distinguishes the outputs of differently
/// configured steps, e.g. when caching processed variants of one source.
pub trait ImageProcessor: Send {
    fn identifier(&self) -> &str;

    fn process(&mut self, frame: Frame) -> Frame;
}
