use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{InsightsError, Result};

/// Upper bound for the estimated mood improvement, whatever the config says
pub const MOOD_IMPROVEMENT_CEILING: f64 = 2.0;

/// Tunable thresholds for every heuristic the engine applies.
///
/// All fields have defaults, so a config file only needs to name the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Lowest valid mood score (inclusive)
    pub mood_scale_min: i32,
    /// Highest valid mood score (inclusive)
    pub mood_scale_max: i32,
    /// Scores at or below this count as a low-mood day
    pub low_mood_max_score: i32,
    /// Fewer points than this always yields a stable trend
    pub min_trend_points: usize,
    /// Half-window mean difference needed to call a trend
    pub trend_sensitivity: f64,
    pub crisis_medium_threshold: usize,
    pub crisis_high_threshold: usize,
    pub improvement_per_completed_task: f64,
    pub max_mood_improvement: f64,
    pub low_mood_suggestion_below: f64,
    /// Task category that satisfies the physical-activity rule
    pub exercise_category: String,
    pub positive_mood_from: f64,
    pub neutral_mood_from: f64,
    pub good_adherence_percent: u8,
    pub high_volatility_from: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mood_scale_min: 1,
            mood_scale_max: 5,
            low_mood_max_score: 2,
            min_trend_points: 3,
            trend_sensitivity: 0.3,
            crisis_medium_threshold: 2,
            crisis_high_threshold: 3,
            improvement_per_completed_task: 0.2,
            max_mood_improvement: 2.0,
            low_mood_suggestion_below: 3.0,
            exercise_category: "exercise".to_string(),
            positive_mood_from: 4.0,
            neutral_mood_from: 3.0,
            good_adherence_percent: 70,
            high_volatility_from: 1.5,
        }
    }
}

impl EngineConfig {
    /// Load a JSON config file, falling back to defaults for missing keys.
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.mood_scale_min >= self.mood_scale_max {
            return Err(InsightsError::InvalidConfig(format!(
                "mood scale minimum {} must be below maximum {}",
                self.mood_scale_min, self.mood_scale_max
            )));
        }
        if self.low_mood_max_score < self.mood_scale_min
            || self.low_mood_max_score > self.mood_scale_max
        {
            return Err(InsightsError::InvalidConfig(format!(
                "low mood threshold {} is outside the mood scale",
                self.low_mood_max_score
            )));
        }
        if self.crisis_medium_threshold == 0
            || self.crisis_medium_threshold >= self.crisis_high_threshold
        {
            return Err(InsightsError::InvalidConfig(format!(
                "crisis thresholds must satisfy 0 < medium ({}) < high ({})",
                self.crisis_medium_threshold, self.crisis_high_threshold
            )));
        }
        if self.trend_sensitivity < 0.0 {
            return Err(InsightsError::InvalidConfig(
                "trend sensitivity must not be negative".to_string(),
            ));
        }
        if self.improvement_per_completed_task < 0.0 {
            return Err(InsightsError::InvalidConfig(format!(
                "improvement per completed task {} must not be negative",
                self.improvement_per_completed_task
            )));
        }
        if !(0.0..=MOOD_IMPROVEMENT_CEILING).contains(&self.max_mood_improvement) {
            return Err(InsightsError::InvalidConfig(format!(
                "improvement cap {} must be within 0..={}",
                self.max_mood_improvement, MOOD_IMPROVEMENT_CEILING
            )));
        }
        if self.positive_mood_from < self.neutral_mood_from {
            return Err(InsightsError::InvalidConfig(format!(
                "positive mood bucket ({}) must not start below neutral ({})",
                self.positive_mood_from, self.neutral_mood_from
            )));
        }
        let scale = self.mood_scale_min as f64..=self.mood_scale_max as f64;
        if !scale.contains(&self.low_mood_suggestion_below) {
            return Err(InsightsError::InvalidConfig(format!(
                "low mood suggestion threshold {} is outside the mood scale",
                self.low_mood_suggestion_below
            )));
        }
        if self.good_adherence_percent > 100 {
            return Err(InsightsError::InvalidConfig(format!(
                "adherence threshold {} exceeds 100 percent",
                self.good_adherence_percent
            )));
        }
        Ok(())
    }
}
