use async_trait::async_trait;
use calorie_shared::{
    AnalysisConfig, AnalysisPipeline, Delay, MockCalorieEstimator, MockFoodDetector,
};
use gloo_timers::future::TimeoutFuture;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::time::Duration;

pub type WebPipeline =
    AnalysisPipeline<MockFoodDetector<SmallRng>, MockCalorieEstimator<SmallRng, TimerDelay>>;

/// Browser timer backing the estimator's artificial delay.
pub struct TimerDelay;

#[async_trait(?Send)]
impl Delay for TimerDelay {
    async fn wait(&self, duration: Duration) {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(millis).await;
    }
}

pub fn load_config() -> AnalysisConfig {
    match AnalysisConfig::from_yaml_str(include_str!("../../config/analysis.yaml")) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Falling back to default analysis config: {}", e);
            AnalysisConfig::default()
        }
    }
}

pub fn build_pipeline(config: &AnalysisConfig) -> WebPipeline {
    AnalysisPipeline::new(
        MockFoodDetector::new(seeded_rng(), config.detector.clone()),
        MockCalorieEstimator::new(seeded_rng(), TimerDelay, config.estimator.clone()),
        config.acceptance_threshold,
    )
}

fn seeded_rng() -> SmallRng {
    let seed = (js_sys::Math::random() * u64::MAX as f64) as u64 ^ js_sys::Date::now() as u64;
    SmallRng::seed_from_u64(seed)
}
