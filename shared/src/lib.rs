pub mod config;
pub mod detector;
pub mod error;
pub mod estimator;
pub mod intake;
pub mod model;
pub mod pipeline;
pub mod workflow;

pub use config::AnalysisConfig;
pub use detector::{FoodDetector, MockFoodDetector};
pub use error::{AnalysisError, ConfigError, ErrorKind, InferenceError};
pub use estimator::{CalorieEstimator, Delay, MockCalorieEstimator, NoDelay};
pub use model::{
    CalorieResult, CycleId, DetectionResult, FileMeta, ImagePreview, UploadedImage, WorkflowState,
};
pub use pipeline::AnalysisPipeline;
pub use workflow::WorkflowController;
