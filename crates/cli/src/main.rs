use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use faceframe_core::cropping::domain::face_aware_cropper::{
    CropperConfig, FaceAwareCropper, SizeGuard,
};
use faceframe_core::cropping::domain::image_processor::ImageProcessor;
use faceframe_core::cropping::infrastructure::face_aware_processor::FaceAwareProcessor;
use faceframe_core::detection::domain::face_detector::FaceDetector;
use faceframe_core::detection::infrastructure::sidecar_face_detector::SidecarFaceDetector;
use faceframe_core::imaging::domain::image_reader::ImageReader;
use faceframe_core::imaging::domain::image_writer::ImageWriter;
use faceframe_core::imaging::infrastructure::image_file_reader::ImageFileReader;
use faceframe_core::imaging::infrastructure::image_file_writer::ImageFileWriter;
use faceframe_core::pipeline::crop_image_use_case::CropImageUseCase;
use faceframe_core::shared::aspect_ratio::AspectRatio;
use faceframe_core::shared::constants::IMAGE_EXTENSIONS;

/// Crop images to a view's aspect ratio while keeping faces centered.
#[derive(Parser)]
#[command(name = "faceframe")]
struct Cli {
    /// Input image file.
    input: PathBuf,

    /// Output image file; the format follows the extension.
    output: PathBuf,

    /// JSON file with detected faces (bottom-left origin unless the file
    /// sets "origin": "top_left").
    #[arg(long)]
    faces: PathBuf,

    /// Target view size or ratio, e.g. 400x300 or 4:3.
    #[arg(long)]
    view: AspectRatio,

    /// Keep the crop inside the image instead of letting it overhang the
    /// right or bottom edge.
    #[arg(long)]
    clamp_to_bounds: bool,

    /// Only require the crop to be shorter than the image (width unchecked).
    #[arg(long)]
    height_guard: bool,

    /// Resize the output to the view size (view must be whole pixels).
    #[arg(long)]
    resize: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let detector = build_detector(&cli.faces)?;
    let cropper = FaceAwareCropper::with_config(cli.view, cropper_config(&cli));
    log::info!("Using {}", cropper.identifier());

    let output_size = if cli.resize {
        cli.view.as_pixel_size()
    } else {
        None
    };

    run_crop(
        &cli.input,
        &cli.output,
        Box::new(FaceAwareProcessor::new(detector, cropper)),
        output_size,
    )
}

fn run_crop(
    input: &Path,
    output: &Path,
    processor: Box<dyn ImageProcessor>,
    output_size: Option<(u32, u32)>,
) -> Result<(), Box<dyn std::error::Error>> {
    let reader: Box<dyn ImageReader> = Box::new(ImageFileReader::new());
    let image_writer: Box<dyn ImageWriter> = Box::new(ImageFileWriter::new());

    let mut use_case = CropImageUseCase::new(reader, image_writer, processor, output_size);
    let (width, height) = use_case.execute(input, output)?;
    log::info!("Output written to {} ({width}x{height})", output.display());
    Ok(())
}

fn build_detector(faces: &Path) -> Result<Box<dyn FaceDetector>, Box<dyn std::error::Error>> {
    let detector = SidecarFaceDetector::from_path(faces)?;
    log::info!("Loaded {} face(s) from {}", detector.len(), faces.display());
    Ok(Box::new(detector))
}

fn cropper_config(cli: &Cli) -> CropperConfig {
    CropperConfig {
        size_guard: if cli.height_guard {
            SizeGuard::HeightOnly
        } else {
            SizeGuard::BothAxes
        },
        clamp_to_bounds: cli.clamp_to_bounds,
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if !cli.faces.exists() {
        return Err(format!("Face file not found: {}", cli.faces.display()).into());
    }
    if !is_image(&cli.output) {
        return Err(format!(
            "Output must have one of the extensions: {}, got {}",
            IMAGE_EXTENSIONS.join(", "),
            cli.output.display()
        )
        .into());
    }
    if cli.resize && cli.view.as_pixel_size().is_none() {
        return Err(format!(
            "--resize needs a view in whole pixels, got {}",
            cli.view
        )
        .into());
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
