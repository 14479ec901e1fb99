use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::ImageReader;
use std::io::Cursor;

use crate::config::IntakeConfig;
use crate::error::{AnalysisError, InferenceError};
use crate::model::{FileMeta, ImagePreview, UploadedImage};

/// Checks a selection before any bytes are read.
pub fn validate(meta: &FileMeta, policy: &IntakeConfig) -> Result<(), AnalysisError> {
    if !meta.is_image() {
        log::warn!("Rejecting non-image file {} ({})", meta.name, meta.mime_type);
        return Err(AnalysisError::InvalidFileType {
            mime_type: meta.mime_type.clone(),
        });
    }

    if let Some(limit) = policy.max_upload_bytes {
        if meta.size > limit {
            log::warn!("Rejecting {}: {} bytes exceeds {}", meta.name, meta.size, limit);
            return Err(AnalysisError::FileTooLarge {
                size: meta.size,
                limit,
            });
        }
    }

    Ok(())
}

/// Decodes the upload and builds the `data:` URL shown as its preview.
pub fn decode_preview(upload: &UploadedImage) -> Result<ImagePreview, InferenceError> {
    let decoded = ImageReader::new(Cursor::new(upload.bytes.as_slice()))
        .with_guessed_format()
        .map_err(|e| InferenceError::Read {
            name: upload.name.clone(),
            reason: e.to_string(),
        })?
        .decode()?;

    let data_url = format!("data:{};base64,{}", upload.mime_type, STANDARD.encode(&upload.bytes));

    log::debug!(
        "Decoded {} as {}x{} preview",
        upload.name,
        decoded.width(),
        decoded.height()
    );

    Ok(ImagePreview {
        data_url,
        width: decoded.width(),
        height: decoded.height(),
    })
}
