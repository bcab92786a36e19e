use std::fmt::Write;

use crate::models::WeeklyInsightReport;

pub fn render_json(report: &WeeklyInsightReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

pub fn render_markdown(report: &WeeklyInsightReport) -> String {
    let mut output = String::new();
    let mood = &report.mood_analysis;
    let tasks = &report.task_correlation;

    let _ = writeln!(output, "# Weekly Insights Report");
    let _ = writeln!(
        output,
        "Patient {} ({} to {})",
        report.patient_id,
        report.period_start.date_naive(),
        report.period_end.date_naive()
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Mood");
    let _ = writeln!(output, "- Average mood: {:.1}", mood.average_mood);
    let _ = writeln!(output, "- Trend: {}", mood.trend);
    let _ = writeln!(output, "- Volatility: {:.1}", mood.volatility);
    let _ = writeln!(output, "- Low-mood days: {}", mood.low_mood_day_count);
    for note in &mood.pattern_notes {
        let _ = writeln!(output, "- Pattern: {}", note);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Tasks");
    let _ = writeln!(output, "- Completion rate: {}%", tasks.completion_rate_percent);
    let _ = writeln!(
        output,
        "- Estimated mood improvement: {:.1} (heuristic estimate)",
        tasks.estimated_mood_improvement
    );
    if !tasks.effective_task_types.is_empty() {
        let _ = writeln!(output, "- Effective: {}", tasks.effective_task_types.join(", "));
    }
    if !tasks.struggling_areas.is_empty() {
        let _ = writeln!(output, "- Struggling: {}", tasks.struggling_areas.join(", "));
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Crisis Risk");
    match &report.crisis_alert {
        Some(alert) => {
            let _ = writeln!(
                output,
                "**{} risk** across {} days: {}",
                alert.severity.as_str().to_uppercase(),
                alert.days_at_risk,
                alert.triggers.join(", ")
            );
            let _ = writeln!(output, "{}", alert.recommendation);
        }
        None => {
            let _ = writeln!(output, "No crisis indicators this week.");
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Suggested Tasks");
    if report.task_suggestions.is_empty() {
        let _ = writeln!(output, "No new tasks suggested.");
    } else {
        for suggestion in &report.task_suggestions {
            let _ = writeln!(
                output,
                "- [{}] {} ({} min): {}",
                suggestion.priority,
                suggestion.suggestion_type,
                suggestion.estimated_duration_minutes,
                suggestion.reason
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Summary");
    let _ = writeln!(output, "{}", report.overall_summary);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Clinical Notes");
    for note in &report.clinical_notes {
        let _ = writeln!(output, "- {}", note);
    }

    output
}
