use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::{InsightsError, Result};
use crate::models::{DiaryRecord, MoodRecord, TaskRecord, TaskStatus, WeeklyInsightReport};
use crate::suggestions::{self, RuleInput};
use crate::summary::{self, NoteInput};
use crate::{mood, risk, tasks};

#[derive(Debug, Clone, Default)]
pub struct InsightsEngine {
    config: EngineConfig,
}

impl InsightsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build the report for one patient and window.
    ///
    /// `moods` must be ordered by timestamp ascending; the engine checks this
    /// but never re-sorts. Empty series are fine and produce zeroed metrics.
    pub fn generate(
        &self,
        patient_id: &str,
        moods: &[MoodRecord],
        task_series: &[TaskRecord],
        diary: &[DiaryRecord],
        period_start: DateTime<Utc>,
        period_end: DateTime<Utc>,
    ) -> Result<WeeklyInsightReport> {
        let checked = self.validate(patient_id, moods, task_series, diary, period_start, period_end);
        if let Err(err) = checked {
            warn!(patient_id, error = %err, "Rejected insight request");
            return Err(err);
        }

        let config = &self.config;

        let mood_analysis = mood::analyze_mood(moods, config);
        debug!(
            average = mood_analysis.average_mood,
            trend = %mood_analysis.trend,
            low_days = mood_analysis.low_mood_day_count,
            "Mood analysis complete"
        );

        let task_correlation = tasks::correlate_tasks(task_series, config);
        debug!(
            completion = task_correlation.completion_rate_percent,
            "Task correlation complete"
        );

        let crisis_alert = risk::detect_crisis(mood_analysis.low_mood_day_count, config);
        if let Some(alert) = &crisis_alert {
            debug!(severity = %alert.severity, days = alert.days_at_risk, "Crisis alert raised");
        }

        let task_suggestions = suggestions::generate_suggestions(&RuleInput {
            mood: &mood_analysis,
            tasks: task_series,
            diary,
            config,
        });

        let overall_summary = summary::overall_summary(&mood_analysis, &task_correlation, config);
        let clinical_notes = summary::clinical_notes(
            &NoteInput {
                mood_entries: moods.len(),
                task_count: task_series.len(),
                diary_entries: diary.len(),
                mood: &mood_analysis,
                crisis: crisis_alert.as_ref(),
            },
            config,
        );

        info!(
            patient_id,
            moods = moods.len(),
            tasks = task_series.len(),
            diary = diary.len(),
            suggestions = task_suggestions.len(),
            "Weekly insight report generated"
        );

        Ok(WeeklyInsightReport {
            patient_id: patient_id.to_string(),
            period_start,
            period_end,
            mood_analysis,
            task_correlation,
            crisis_alert,
            task_suggestions,
            overall_summary,
            clinical_notes,
        })
    }

    fn validate(
        &self,
        patient_id: &str,
        moods: &[MoodRecord],
        task_series: &[TaskRecord],
        diary: &[DiaryRecord],
        period_start: DateTime<Utc>,
        period_end: DateTime<Utc>,
    ) -> Result<()> {
        let min = self.config.mood_scale_min;
        let max = self.config.mood_scale_max;

        if patient_id.trim().is_empty() {
            return Err(InsightsError::invalid("patientId", "must not be empty"));
        }
        if period_end < period_start {
            return Err(InsightsError::invalid(
                "periodEnd",
                format!("{} is before periodStart {}", period_end, period_start),
            ));
        }

        for (i, record) in moods.iter().enumerate() {
            if record.score < min || record.score > max {
                return Err(InsightsError::invalid(
                    format!("moodSeries[{}].score", i),
                    format!("{} is outside the scale {}..={}", record.score, min, max),
                ));
            }
            if i > 0 && record.timestamp < moods[i - 1].timestamp {
                return Err(InsightsError::invalid(
                    format!("moodSeries[{}].timestamp", i),
                    "mood records must be ordered by timestamp ascending",
                ));
            }
        }

        for (i, task) in task_series.iter().enumerate() {
            match (task.status, task.completed_at) {
                (TaskStatus::Completed, None) => {
                    return Err(InsightsError::invalid(
                        format!("taskSeries[{}].completedAt", i),
                        "completed task has no completion time",
                    ));
                }
                (_, Some(done)) if done < task.created_at => {
                    return Err(InsightsError::invalid(
                        format!("taskSeries[{}].completedAt", i),
                        "completion time precedes creation time",
                    ));
                }
                _ => {}
            }
        }

        for (i, entry) in diary.iter().enumerate() {
            if let Some(score) = entry.mood_score {
                if score < min || score > max {
                    return Err(InsightsError::invalid(
                        format!("diarySeries[{}].moodScore", i),
                        format!("{} is outside the scale {}..={}", score, min, max),
                    ));
                }
            }
        }

        Ok(())
    }
}
