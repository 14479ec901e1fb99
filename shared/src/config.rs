use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunables for one analysis session, loaded from `config/analysis.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub intake: IntakeConfig,
    /// Detections at or below this confidence never reach the estimator.
    pub acceptance_threshold: f32,
    pub detector: DetectorConfig,
    pub estimator: EstimatorConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    pub max_upload_bytes: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub food_threshold: f32,
    pub max_objects: usize,
    pub food_objects: Vec<String>,
    pub other_objects: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub delay_ms: u64,
    pub min_calories: u32,
    pub max_calories: u32,
    pub foods: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            intake: IntakeConfig::default(),
            acceptance_threshold: 0.7,
            detector: DetectorConfig::default(),
            estimator: EstimatorConfig::default(),
        }
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: Some(5 * 1024 * 1024),
        }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            food_threshold: 0.7,
            max_objects: 3,
            food_objects: strings(&["plate", "food", "utensils"]),
            other_objects: strings(&["desk", "paper", "person", "wall"]),
        }
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            delay_ms: 1000,
            min_calories: 200,
            max_calories: 999,
            foods: strings(&["Rice", "Vegetables", "Chicken"]),
        }
    }
}

impl AnalysisConfig {
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: AnalysisConfig = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit("acceptance_threshold", self.acceptance_threshold)?;
        check_unit("detector.food_threshold", self.detector.food_threshold)?;

        if self.detector.max_objects == 0 {
            return Err(ConfigError::Invalid(
                "detector.max_objects must be at least 1".into(),
            ));
        }
        if self.detector.food_objects.is_empty() || self.detector.other_objects.is_empty() {
            return Err(ConfigError::Invalid(
                "detector object vocabularies must not be empty".into(),
            ));
        }
        if self.estimator.foods.is_empty() {
            return Err(ConfigError::Invalid("estimator.foods must not be empty".into()));
        }
        if self.estimator.min_calories > self.estimator.max_calories {
            return Err(ConfigError::Invalid(format!(
                "estimator calorie range {}..={} is empty",
                self.estimator.min_calories, self.estimator.max_calories
            )));
        }
        Ok(())
    }
}

fn check_unit(name: &str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must be within [0, 1], got {value}")))
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
