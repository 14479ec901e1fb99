use crate::detector::FoodDetector;
use crate::error::AnalysisError;
use crate::estimator::CalorieEstimator;
use crate::intake;
use crate::model::{CalorieResult, ImagePreview, UploadedImage};

/// Intake, detection and estimation as one sequence.
///
/// Holds no per-cycle state; callers pair the outcome with the cycle that
/// started it and hand both to [`crate::WorkflowController::finish`].
pub struct AnalysisPipeline<D, E> {
    detector: D,
    estimator: E,
    acceptance_threshold: f32,
}

impl<D: FoodDetector, E: CalorieEstimator> AnalysisPipeline<D, E> {
    pub fn new(detector: D, estimator: E, acceptance_threshold: f32) -> Self {
        Self {
            detector,
            estimator,
            acceptance_threshold,
        }
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    pub async fn run<F>(
        &self,
        upload: &UploadedImage,
        on_preview: F,
    ) -> Result<CalorieResult, AnalysisError>
    where
        F: FnOnce(ImagePreview),
    {
        let preview = intake::decode_preview(upload).map_err(|e| fault("intake", e))?;
        on_preview(preview);

        let detection = self
            .detector
            .detect(upload)
            .await
            .map_err(|e| fault(self.detector.name(), e))?;

        if !detection.contains_food {
            log::info!(
                "No food in {} ({}%): {}",
                upload.name,
                detection.confidence_percent(),
                detection.joined_objects()
            );
            return Err(AnalysisError::NoFoodDetected {
                confidence: detection.confidence,
                detected_objects: detection.detected_objects,
            });
        }

        if detection.confidence <= self.acceptance_threshold {
            log::info!(
                "Food in {} below acceptance threshold ({} <= {})",
                upload.name,
                detection.confidence,
                self.acceptance_threshold
            );
            return Err(AnalysisError::LowConfidence {
                confidence: detection.confidence,
            });
        }

        let estimate = self
            .estimator
            .estimate(upload)
            .await
            .map_err(|e| fault(self.estimator.name(), e))?;

        Ok(estimate.with_detection(&detection))
    }
}

fn fault(stage: &str, err: impl Into<AnalysisError> + std::fmt::Display) -> AnalysisError {
    log::error!("Analysis stage {} failed: {}", stage, err);
    err.into()
}
