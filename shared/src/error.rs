use strum::{AsRefStr, Display};

use crate::model::{percent, size_label};

/// Terminal failure of one analysis cycle, worded for display.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error("Please upload an image file.")]
    InvalidFileType { mime_type: String },
    #[error("Please upload an image smaller than {}.", size_label(*limit))]
    FileTooLarge { size: u64, limit: u64 },
    #[error(
        "No food detected in the image (Confidence: {}%). Detected objects: {}",
        percent(*confidence),
        detected_objects.join(", ")
    )]
    NoFoodDetected {
        confidence: f32,
        detected_objects: Vec<String>,
    },
    #[error("Low confidence in food detection. Please upload a clearer photo of food.")]
    LowConfidence { confidence: f32 },
    /// `detail` is for the log only.
    #[error("An error occurred while analyzing the image. Please try again.")]
    Unexpected { detail: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ErrorKind {
    InvalidFileType,
    FileTooLarge,
    NoFoodDetected,
    LowConfidence,
    UnexpectedFailure,
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::InvalidFileType { .. } => ErrorKind::InvalidFileType,
            AnalysisError::FileTooLarge { .. } => ErrorKind::FileTooLarge,
            AnalysisError::NoFoodDetected { .. } => ErrorKind::NoFoodDetected,
            AnalysisError::LowConfidence { .. } => ErrorKind::LowConfidence,
            AnalysisError::Unexpected { .. } => ErrorKind::UnexpectedFailure,
        }
    }

    /// Heading shown above the message in the error panel.
    pub fn title(&self) -> &'static str {
        match self {
            AnalysisError::InvalidFileType { .. } | AnalysisError::FileTooLarge { .. } => {
                "Invalid File"
            }
            _ => "Detection Failed",
        }
    }
}

impl From<InferenceError> for AnalysisError {
    fn from(err: InferenceError) -> Self {
        AnalysisError::Unexpected {
            detail: err.to_string(),
        }
    }
}

/// Fault raised by a pipeline stage.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("failed to read {name}: {reason}")]
    Read { name: String, reason: String },
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("{stage} failed: {reason}")]
    Model { stage: &'static str, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse analysis config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid analysis config: {0}")]
    Invalid(String),
}
