use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AnalysisError;

/// What is known about a selection before its bytes are read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
}

impl FileMeta {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// A selected file after it has been read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    pub fn new(meta: &FileMeta, bytes: Vec<u8>) -> Self {
        Self {
            name: meta.name.clone(),
            mime_type: meta.mime_type.clone(),
            bytes,
        }
    }

    pub fn meta(&self) -> FileMeta {
        FileMeta::new(&self.name, &self.mime_type, self.bytes.len() as u64)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePreview {
    pub data_url: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DetectionResult {
    pub contains_food: bool,
    pub confidence: f32,
    pub detected_objects: Vec<String>,
}

impl DetectionResult {
    pub fn confidence_percent(&self) -> u32 {
        percent(self.confidence)
    }

    pub fn joined_objects(&self) -> String {
        self.detected_objects.join(", ")
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CalorieResult {
    pub calories: u32,
    pub detected_food: String,
    pub confidence: Option<f32>,
    pub detected_objects: Option<Vec<String>>,
}

impl CalorieResult {
    pub fn new(calories: u32, detected_food: impl Into<String>) -> Self {
        Self {
            calories,
            detected_food: detected_food.into(),
            confidence: None,
            detected_objects: None,
        }
    }

    /// Carries the detection's confidence and labels into the estimate.
    pub fn with_detection(self, detection: &DetectionResult) -> Self {
        Self {
            confidence: Some(detection.confidence),
            detected_objects: Some(detection.detected_objects.clone()),
            ..self
        }
    }

    pub fn confidence_label(&self) -> String {
        match self.confidence {
            Some(confidence) if confidence > 0.0 => format!("{}%", percent(confidence)),
            _ => "N/A".to_string(),
        }
    }

    pub fn objects_label(&self) -> String {
        match &self.detected_objects {
            Some(objects) if !objects.is_empty() => objects.join(", "),
            _ => "None".to_string(),
        }
    }
}

/// Monotonic token identifying one analysis cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CycleId(u64);

impl CycleId {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum WorkflowState {
    #[default]
    Idle,
    Analyzing,
    Error(AnalysisError),
    Success(CalorieResult),
}

impl WorkflowState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkflowState::Error(_) | WorkflowState::Success(_))
    }

    pub fn error(&self) -> Option<&AnalysisError> {
        match self {
            WorkflowState::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&CalorieResult> {
        match self {
            WorkflowState::Success(result) => Some(result),
            _ => None,
        }
    }
}

/// Upload size for display, rounded up so small limits never read as zero.
pub fn size_label(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * KIB;

    if bytes >= MIB {
        format!("{} MB", bytes.div_ceil(MIB))
    } else {
        format!("{} KB", bytes.div_ceil(KIB))
    }
}

/// Rounds a `[0,1]` confidence to a whole percentage, half away from zero.
pub fn percent(confidence: f32) -> u32 {
    (confidence * 100.0).round().max(0.0) as u32
}
