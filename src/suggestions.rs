use crate::config::EngineConfig;
use crate::models::{
    DiaryRecord, MoodAnalysis, Priority, TaskRecord, TaskStatus, TaskSuggestion,
};

/// Read-only view of what the rules may inspect
pub struct RuleInput<'a> {
    pub mood: &'a MoodAnalysis,
    pub tasks: &'a [TaskRecord],
    pub diary: &'a [DiaryRecord],
    pub config: &'a EngineConfig,
}

pub type SuggestionRule = for<'a> fn(&RuleInput<'a>) -> Option<TaskSuggestion>;

pub const DEFAULT_RULES: &[SuggestionRule] = &[low_mood_rule, missing_exercise_rule, no_diary_rule];

pub fn generate_suggestions(input: &RuleInput<'_>) -> Vec<TaskSuggestion> {
    generate_with_rules(input, DEFAULT_RULES)
}

pub fn generate_with_rules(input: &RuleInput<'_>, rules: &[SuggestionRule]) -> Vec<TaskSuggestion> {
    rules.iter().filter_map(|rule| rule(input)).collect()
}

pub fn low_mood_rule(input: &RuleInput<'_>) -> Option<TaskSuggestion> {
    if input.mood.average_mood >= input.config.low_mood_suggestion_below {
        return None;
    }
    Some(TaskSuggestion {
        suggestion_type: "relaxation".to_string(),
        reason: format!(
            "Average mood of {:.1} is below {:.0}; a short guided breathing or relaxation exercise can help regulate emotions.",
            input.mood.average_mood, input.config.low_mood_suggestion_below
        ),
        priority: Priority::High,
        estimated_duration_minutes: 10,
    })
}

pub fn missing_exercise_rule(input: &RuleInput<'_>) -> Option<TaskSuggestion> {
    let category = input.config.exercise_category.as_str();
    let exercised = input.tasks.iter().any(|t| {
        t.status == TaskStatus::Completed && t.task_type.eq_ignore_ascii_case(category)
    });
    if exercised {
        return None;
    }
    Some(TaskSuggestion {
        suggestion_type: category.to_string(),
        reason: "No physical activity was completed this week; a light 20-minute walk is a low-effort way to lift mood.".to_string(),
        priority: Priority::Medium,
        estimated_duration_minutes: 20,
    })
}

pub fn no_diary_rule(input: &RuleInput<'_>) -> Option<TaskSuggestion> {
    if !input.diary.is_empty() {
        return None;
    }
    Some(TaskSuggestion {
        suggestion_type: "journaling".to_string(),
        reason: "No diary entries this week; a brief daily reflection helps track triggers between sessions.".to_string(),
        priority: Priority::Low,
        estimated_duration_minutes: 10,
    })
}
