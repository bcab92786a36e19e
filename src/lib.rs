pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod import;
pub mod models;
pub mod mood;
pub mod report;
pub mod risk;
pub mod suggestions;
pub mod summary;
pub mod tasks;

pub use config::EngineConfig;
pub use engine::InsightsEngine;
pub use error::{InsightsError, Result};
pub use models::{
    AlertSeverity, CrisisAlert, DiaryRecord, MoodAnalysis, MoodRecord, Priority, TaskCorrelation,
    TaskRecord, TaskStatus, TaskSuggestion, Trend, WeeklyInsightReport,
};
pub use summary::CLINICAL_DISCLAIMER;
