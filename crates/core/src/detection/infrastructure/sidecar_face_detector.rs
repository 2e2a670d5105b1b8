use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::detection::domain::coordinates::flip_to_bottom_left;
use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::frame::Frame;
use crate::shared::rect::Rect;

#[derive(Error, Debug)]
pub enum SidecarError {
    #[error("failed to read face file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse face file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("face {index} has a negative or non-finite size")]
    InvalidFace { index: usize },
}

/// Which corner the rectangles in a face file are measured from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    #[default]
    BottomLeft,
    TopLeft,
}

#[derive(Debug, Deserialize)]
struct FaceFile {
    #[serde(default)]
    origin: Origin,
    faces: Vec<FaceEntry>,
}

#[derive(Debug, Deserialize)]
struct FaceEntry {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

/// Replays face detections produced ahead of time by an external detector.
///
/// The JSON file looks like:
///
/// ```json
/// { "origin": "bottom_left", "faces": [{ "x": 10, "y": 20, "width": 64, "height": 64 }] }
/// ```
///
/// `origin` is optional and defaults to `bottom_left`, the detector
/// convention. Top-left rectangles are converted when a frame is seen,
/// since the conversion needs the image height.
pub struct SidecarFaceDetector {
    faces: Vec<Rect>,
    origin: Origin,
}

impl SidecarFaceDetector {
    pub fn new(faces: Vec<Rect>, origin: Origin) -> Self {
        Self { faces, origin }
    }

    pub fn from_path(path: &Path) -> Result<Self, SidecarError> {
        let json = fs::read_to_string(path).map_err(|source| SidecarError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|e| match e {
            SidecarError::Parse { source, .. } => SidecarError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, SidecarError> {
        let file: FaceFile = serde_json::from_str(json).map_err(|source| SidecarError::Parse {
            path: PathBuf::new(),
            source,
        })?;

        let faces = file
            .faces
            .iter()
            .enumerate()
            .map(|(index, f)| {
                let valid = |v: f64| v.is_finite() && v >= 0.0;
                if !valid(f.width) || !valid(f.height) || !f.x.is_finite() || !f.y.is_finite() {
                    return Err(SidecarError::InvalidFace { index });
                }
                Ok(Rect::new(f.x, f.y, f.width, f.height))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(faces, file.origin))
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

impl FaceDetector for SidecarFaceDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Rect>, Box<dyn std::error::Error>> {
        let faces = match self.origin {
            Origin::BottomLeft => self.faces.clone(),
            Origin::TopLeft => {
                let height = frame.height() as f64;
                self.faces
                    .iter()
                    .map(|f| flip_to_bottom_left(f, height))
                    .collect()
            }
        };
        Ok(faces)
    }
}
