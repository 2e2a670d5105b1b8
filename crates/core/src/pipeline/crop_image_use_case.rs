use std::path::Path;

use crate::cropping::domain::image_processor::ImageProcessor;
use crate::imaging::domain::image_reader::ImageReader;
use crate::imaging::domain::image_writer::ImageWriter;

/// Single-image cropping pipeline: read → process → write.
pub struct CropImageUseCase {
    reader: Box<dyn ImageReader>,
    image_writer: Box<dyn ImageWriter>,
    processor: Box<dyn ImageProcessor>,
    output_size: Option<(u32, u32)>,
}

impl CropImageUseCase {
    pub fn new(
        reader: Box<dyn ImageReader>,
        image_writer: Box<dyn ImageWriter>,
        processor: Box<dyn ImageProcessor>,
        output_size: Option<(u32, u32)>,
    ) -> Self {
        Self {
            reader,
            image_writer,
            processor,
            output_size,
        }
    }

    /// Reads an image, runs the processor, and writes the result.
    ///
    /// Returns the dimensions of the processed image before any output
    /// resize.
    pub fn execute(
        &mut self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<(u32, u32), Box<dyn std::error::Error>> {
        let frame = self.reader.read(input_path)?;
        let input_size = (frame.width(), frame.height());

        let frame = self.processor.process(frame);
        let processed_size = (frame.width(), frame.height());
        log::info!(
            "{}: {}x{} -> {}x{}",
            self.processor.identifier(),
            input_size.0,
            input_size.1,
            processed_size.0,
            processed_size.1
        );

        self.image_writer
            .write(output_path, &frame, self.output_size)?;

        Ok(processed_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::frame::Frame;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    // --- Stubs ---

    struct StubImageReader {
        frame: Frame,
    }

    impl ImageReader for StubImageReader {
        fn read(&self, _path: &Path) -> Result<Frame, Box<dyn std::error::Error>> {
            Ok(self.frame.clone())
        }
    }

    struct FailingReader;

    impl ImageReader for FailingReader {
        fn read(&self, path: &Path) -> Result<Frame, Box<dyn std::error::Error>> {
            Err(format!("cannot decode {}", path.display()).into())
        }
    }

    #[allow(clippy::type_complexity)]
    struct StubImageWriter {
        written: Arc<Mutex<Vec<(PathBuf, Frame, Option<(u32, u32)>)>>>,
    }

    impl StubImageWriter {
        fn new() -> Self {
            Self {
                written: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl ImageWriter for StubImageWriter {
        fn write(
            &self,
            path: &Path,
            frame: &Frame,
            size: Option<(u32, u32)>,
        ) -> Result<(), Box<dyn std::error::Error>> {
            self.written
                .lock()
                .unwrap()
                .push((path.to_path_buf(), frame.clone(), size));
            Ok(())
        }
    }

    /// Keeps the top-left half of every frame.
    struct HalvingProcessor;

    impl ImageProcessor for HalvingProcessor {
        fn identifier(&self) -> &str {
            "test.halving"
        }

        fn process(&mut self, frame: Frame) -> Frame {
            let rect = crate::shared::rect::PixelRect {
                x: 0,
                y: 0,
                width: frame.width() / 2,
                height: frame.height(),
            };
            frame.crop(&rect).unwrap_or(frame)
        }
    }

    // --- Helpers ---

    fn make_frame(w: u32, h: u32) -> Frame {
        Frame::new(vec![128; (w * h * 3) as usize], w, h, 3)
    }

    // --- Tests ---

    #[test]
    fn test_writes_processed_frame() {
        let writer = StubImageWriter::new();
        let written = writer.written.clone();

        let mut uc = CropImageUseCase::new(
            Box::new(StubImageReader {
                frame: make_frame(200, 100),
            }),
            Box::new(writer),
            Box::new(HalvingProcessor),
            None,
        );

        let size = uc
            .execute(Path::new("in.png"), Path::new("out.png"))
            .unwrap();

        assert_eq!(size, (100, 100));
        let written = written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].0, PathBuf::from("out.png"));
        assert_eq!(written[0].1.width(), 100);
        assert_eq!(written[0].2, None);
    }

    #[test]
    fn test_passes_output_size_to_writer() {
        let writer = StubImageWriter::new();
        let written = writer.written.clone();

        let mut uc = CropImageUseCase::new(
            Box::new(StubImageReader {
                frame: make_frame(200, 100),
            }),
            Box::new(writer),
            Box::new(HalvingProcessor),
            Some((32, 32)),
        );

        uc.execute(Path::new("in.png"), Path::new("out.png"))
            .unwrap();

        assert_eq!(written.lock().unwrap()[0].2, Some((32, 32)));
    }

    #[test]
    fn test_reader_error_propagates_and_nothing_is_written() {
        let writer = StubImageWriter::new();
        let written = writer.written.clone();

        let mut uc = CropImageUseCase::new(
            Box::new(FailingReader),
            Box::new(writer),
            Box::new(HalvingProcessor),
            None,
        );

        let result = uc.execute(Path::new("in.png"), Path::new("out.png"));

        assert!(result.is_err());
        assert!(written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_end_to_end_with_files() {
        use crate::cropping::domain::face_aware_cropper::FaceAwareCropper;
        use crate::cropping::infrastructure::face_aware_processor::FaceAwareProcessor;
        use crate::detection::infrastructure::sidecar_face_detector::SidecarFaceDetector;
        use crate::imaging::infrastructure::image_file_reader::ImageFileReader;
        use crate::imaging::infrastructure::image_file_writer::ImageFileWriter;
        use crate::shared::aspect_ratio::AspectRatio;

        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out").join("cropped.png");
        // Red channel encodes the column so the crop origin is visible.
        image::RgbImage::from_fn(300, 100, |x, _| image::Rgb([x as u8, 0, 0]))
            .save(&input)
            .unwrap();

        let detector = SidecarFaceDetector::from_json(
            r#"{ "faces": [{ "x": 200, "y": 40, "width": 20, "height": 20 }] }"#,
        )
        .unwrap();
        let cropper = FaceAwareCropper::new(AspectRatio::new(1.0, 1.0).unwrap());

        let mut uc = CropImageUseCase::new(
            Box::new(ImageFileReader::new()),
            Box::new(ImageFileWriter::new()),
            Box::new(FaceAwareProcessor::new(Box::new(detector), cropper)),
            None,
        );
        let size = uc.execute(&input, &output).unwrap();

        assert_eq!(size, (100, 100));
        let img = image::open(&output).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (100, 100));
        assert_eq!(img.get_pixel(0, 0).0[0], 160);
    }
}
