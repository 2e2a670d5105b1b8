pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

/// Prefix of every face-aware cropper identifier.
pub const CROPPER_IDENTIFIER_PREFIX: &str = "faceframe.face_aware_cropper";
