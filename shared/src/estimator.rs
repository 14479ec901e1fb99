use async_trait::async_trait;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::cell::RefCell;
use std::time::Duration;

use crate::config::EstimatorConfig;
use crate::error::InferenceError;
use crate::model::{CalorieResult, UploadedImage};

#[async_trait(?Send)]
pub trait CalorieEstimator {
    async fn estimate(&self, image: &UploadedImage) -> Result<CalorieResult, InferenceError>;
    fn name(&self) -> &'static str;
}

/// Timer hook so the core does not depend on a particular executor.
#[async_trait(?Send)]
pub trait Delay {
    async fn wait(&self, duration: Duration);
}

/// Resolves immediately.
pub struct NoDelay;

#[async_trait(?Send)]
impl Delay for NoDelay {
    async fn wait(&self, _duration: Duration) {}
}

/// Stand-in estimator: waits, then draws a calorie count and a food label.
pub struct MockCalorieEstimator<R, D> {
    rng: RefCell<R>,
    delay: D,
    config: EstimatorConfig,
}

impl<R: Rng, D: Delay> MockCalorieEstimator<R, D> {
    pub fn new(rng: R, delay: D, config: EstimatorConfig) -> Self {
        Self {
            rng: RefCell::new(rng),
            delay,
            config,
        }
    }
}

#[async_trait(?Send)]
impl<R: Rng, D: Delay> CalorieEstimator for MockCalorieEstimator<R, D> {
    async fn estimate(&self, image: &UploadedImage) -> Result<CalorieResult, InferenceError> {
        self.delay
            .wait(Duration::from_millis(self.config.delay_ms))
            .await;

        if self.config.min_calories > self.config.max_calories {
            return Err(InferenceError::Model {
                stage: self.name(),
                reason: "empty calorie range".into(),
            });
        }

        let mut rng = self.rng.borrow_mut();
        let calories = rng.random_range(self.config.min_calories..=self.config.max_calories);
        let food = self
            .config
            .foods
            .choose(&mut *rng)
            .ok_or_else(|| InferenceError::Model {
                stage: self.name(),
                reason: "no food labels configured".into(),
            })?;

        log::debug!("Mock estimate for {}: {} kcal of {}", image.name, calories, food);
        Ok(CalorieResult::new(calories, food.clone()))
    }

    fn name(&self) -> &'static str {
        "mock-calorie-estimator"
    }
}
