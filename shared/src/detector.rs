use async_trait::async_trait;
use rand::Rng;
use std::cell::RefCell;

use crate::config::DetectorConfig;
use crate::error::InferenceError;
use crate::model::{DetectionResult, UploadedImage};

/// Decides whether an image shows food.
///
/// Implementations only need to honour the output shape; the pipeline applies
/// its own acceptance threshold on top of `contains_food`.
#[async_trait(?Send)]
pub trait FoodDetector {
    async fn detect(&self, image: &UploadedImage) -> Result<DetectionResult, InferenceError>;
    fn name(&self) -> &'static str;
}

/// Stand-in classifier drawing its confidence at random.
pub struct MockFoodDetector<R> {
    rng: RefCell<R>,
    config: DetectorConfig,
}

impl<R: Rng> MockFoodDetector<R> {
    pub fn new(rng: R, config: DetectorConfig) -> Self {
        Self {
            rng: RefCell::new(rng),
            config,
        }
    }
}

#[async_trait(?Send)]
impl<R: Rng> FoodDetector for MockFoodDetector<R> {
    async fn detect(&self, image: &UploadedImage) -> Result<DetectionResult, InferenceError> {
        let (confidence, object_count) = {
            let mut rng = self.rng.borrow_mut();
            let confidence: f32 = rng.random();
            let object_count = rng.random_range(1..=self.config.max_objects.max(1));
            (confidence, object_count)
        };

        let detection = classify(&self.config, confidence, object_count);
        log::debug!(
            "Mock detection for {}: food={} confidence={:.3} objects=[{}]",
            image.name,
            detection.contains_food,
            detection.confidence,
            detection.joined_objects()
        );
        Ok(detection)
    }

    fn name(&self) -> &'static str {
        "mock-food-detector"
    }
}

/// Builds the mock's result for a drawn confidence.
///
/// `contains_food` holds exactly when `confidence` is strictly above the
/// configured threshold. Labels are a prefix of the branch's vocabulary.
pub fn classify(config: &DetectorConfig, confidence: f32, object_count: usize) -> DetectionResult {
    let contains_food = confidence > config.food_threshold;
    let vocabulary = if contains_food {
        &config.food_objects
    } else {
        &config.other_objects
    };

    DetectionResult {
        contains_food,
        confidence,
        detected_objects: vocabulary.iter().take(object_count).cloned().collect(),
    }
}
