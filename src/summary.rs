use crate::config::EngineConfig;
use crate::models::{CrisisAlert, MoodAnalysis, TaskCorrelation, Trend};

/// Always the last clinical note of every report.
pub const CLINICAL_DISCLAIMER: &str = "This summary was generated automatically by heuristic analysis and is not a clinical assessment; it must be reviewed and validated by a qualified professional.";

pub fn overall_summary(
    mood: &MoodAnalysis,
    tasks: &TaskCorrelation,
    config: &EngineConfig,
) -> String {
    let mood_sentence = if mood.average_mood >= config.positive_mood_from {
        format!(
            "Mood was generally positive this week (average {:.1}).",
            mood.average_mood
        )
    } else if mood.average_mood >= config.neutral_mood_from {
        format!(
            "Mood was neutral this week (average {:.1}).",
            mood.average_mood
        )
    } else {
        format!(
            "Mood was low this week (average {:.1}) and warrants attention.",
            mood.average_mood
        )
    };

    let adherence_sentence = if tasks.completion_rate_percent >= config.good_adherence_percent {
        format!(
            "Task adherence was good, with {}% of assigned tasks completed.",
            tasks.completion_rate_percent
        )
    } else {
        format!(
            "Task adherence was low, with {}% of assigned tasks completed.",
            tasks.completion_rate_percent
        )
    };

    format!("{} {}", mood_sentence, adherence_sentence)
}

pub struct NoteInput<'a> {
    pub mood_entries: usize,
    pub task_count: usize,
    pub diary_entries: usize,
    pub mood: &'a MoodAnalysis,
    pub crisis: Option<&'a CrisisAlert>,
}

pub fn clinical_notes(input: &NoteInput<'_>, config: &EngineConfig) -> Vec<String> {
    let mut notes = Vec::new();

    if input.mood_entries == 0 {
        notes.push("No mood entries this week; consider engagement strategies.".to_string());
    }
    if input.task_count == 0 {
        notes.push("No tasks assigned; consider a structured intervention.".to_string());
    }
    if let Some(alert) = input.crisis {
        notes.push(format!(
            "Crisis indicators ({} severity) across {} low-mood days: {}.",
            alert.severity,
            alert.days_at_risk,
            alert.triggers.join(", ")
        ));
    }
    if input.mood.trend == Trend::Decreasing {
        notes.push("Mood declined between the first and second half of the week.".to_string());
    }
    if input.mood.volatility >= config.high_volatility_from {
        notes.push(format!(
            "High mood variability (std-dev {:.1}); explore situational triggers.",
            input.mood.volatility
        ));
    }
    if input.diary_entries == 0 {
        notes.push("No diary entries this week.".to_string());
    }

    notes.push(CLINICAL_DISCLAIMER.to_string());
    notes
}
