use std::collections::BTreeMap;

use crate::config::{EngineConfig, MOOD_IMPROVEMENT_CEILING};
use crate::models::{TaskCorrelation, TaskRecord, TaskStatus};
use crate::mood::round1;

pub fn correlate_tasks(tasks: &[TaskRecord], config: &EngineConfig) -> TaskCorrelation {
    let completed = completed_count(tasks);
    let (effective_task_types, struggling_areas) = classify_categories(tasks);

    TaskCorrelation {
        completion_rate_percent: completion_rate_percent(completed, tasks.len()),
        estimated_mood_improvement: estimated_mood_improvement(completed, config),
        effective_task_types,
        struggling_areas,
    }
}

pub fn completed_count(tasks: &[TaskRecord]) -> usize {
    tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .count()
}

pub fn completion_rate_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    (completed as f64 / total as f64 * 100.0).round() as u8
}

/// Fixed gain per completed task, capped. This is a rough estimate of how much
/// task engagement lifts mood, not a statistical correlation.
pub fn estimated_mood_improvement(completed: usize, config: &EngineConfig) -> f64 {
    let cap = config.max_mood_improvement.clamp(0.0, MOOD_IMPROVEMENT_CEILING);
    let raw = completed as f64 * config.improvement_per_completed_task;
    round1(raw.clamp(0.0, cap))
}

/// Splits task categories into ones the patient keeps up with and ones with
/// unfinished work. A category lands in at most one list.
fn classify_categories(tasks: &[TaskRecord]) -> (Vec<String>, Vec<String>) {
    // category -> (completed, open)
    let mut by_type: BTreeMap<&str, (usize, usize)> = BTreeMap::new();

    for task in tasks {
        let entry = by_type.entry(task.task_type.as_str()).or_insert((0, 0));
        if task.status.is_open() {
            entry.1 += 1;
        } else {
            entry.0 += 1;
        }
    }

    let mut effective = Vec::new();
    let mut struggling = Vec::new();

    for (task_type, (completed, open)) in by_type {
        if completed > open {
            effective.push(task_type.to_string());
        } else if open > 0 {
            struggling.push(task_type.to_string());
        }
    }

    (effective, struggling)
}
