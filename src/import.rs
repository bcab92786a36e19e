use std::io::Read;

use anyhow::Context;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{DiaryRecord, MoodRecord, TaskRecord, TaskStatus};

#[derive(serde::Deserialize)]
struct MoodRow {
    timestamp: DateTime<Utc>,
    score: i32,
    note: Option<String>,
}

#[derive(serde::Deserialize)]
struct TaskRow {
    id: Option<Uuid>,
    #[serde(rename = "type")]
    task_type: String,
    status: String,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

#[derive(serde::Deserialize)]
struct DiaryRow {
    timestamp: DateTime<Utc>,
    content: String,
    mood_score: Option<i32>,
}

pub fn read_moods<R: Read>(reader: R) -> anyhow::Result<Vec<MoodRecord>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for (line, result) in reader.deserialize::<MoodRow>().enumerate() {
        let row = result.with_context(|| format!("invalid mood row {}", line + 1))?;
        records.push(MoodRecord {
            timestamp: row.timestamp,
            score: row.score,
            note: row.note.filter(|n| !n.is_empty()),
        });
    }

    Ok(records)
}

pub fn read_tasks<R: Read>(reader: R) -> anyhow::Result<Vec<TaskRecord>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for (line, result) in reader.deserialize::<TaskRow>().enumerate() {
        let row = result.with_context(|| format!("invalid task row {}", line + 1))?;
        let status: TaskStatus = row
            .status
            .trim()
            .to_lowercase()
            .parse()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("invalid task row {}", line + 1))?;
        records.push(TaskRecord {
            id: row.id.unwrap_or_else(Uuid::new_v4),
            task_type: row.task_type.trim().to_string(),
            status,
            completed_at: row.completed_at,
            created_at: row.created_at,
        });
    }

    Ok(records)
}

pub fn read_diary<R: Read>(reader: R) -> anyhow::Result<Vec<DiaryRecord>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for (line, result) in reader.deserialize::<DiaryRow>().enumerate() {
        let row = result.with_context(|| format!("invalid diary row {}", line + 1))?;
        records.push(DiaryRecord {
            timestamp: row.timestamp,
            content: row.content,
            mood_score: row.mood_score,
        });
    }

    Ok(records)
}

/// Window-scoped series ready to hand to the engine
#[derive(Debug, Default)]
pub struct WindowSeries {
    pub moods: Vec<MoodRecord>,
    pub tasks: Vec<TaskRecord>,
    pub diary: Vec<DiaryRecord>,
}

pub fn within_window(
    moods: Vec<MoodRecord>,
    tasks: Vec<TaskRecord>,
    diary: Vec<DiaryRecord>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> WindowSeries {
    let in_window = |ts: &DateTime<Utc>| *ts >= start && *ts <= end;

    let mut moods: Vec<MoodRecord> = moods.into_iter().filter(|m| in_window(&m.timestamp)).collect();
    moods.sort_by_key(|m| m.timestamp);

    WindowSeries {
        moods,
        tasks: tasks.into_iter().filter(|t| in_window(&t.created_at)).collect(),
        diary: diary.into_iter().filter(|d| in_window(&d.timestamp)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_mood_rows_with_optional_note() {
        let data = "timestamp,score,note\n\
                    2026-10-12T20:00:00Z,4,good day\n\
                    2026-10-13T20:00:00Z,2,\n";
        let moods = read_moods(data.as_bytes()).unwrap();
        assert_eq!(moods.len(), 2);
        assert_eq!(moods[0].note.as_deref(), Some("good day"));
        assert_eq!(moods[1].score, 2);
        assert!(moods[1].note.is_none());
    }

    #[test]
    fn parses_task_rows() {
        let data = "id,type,status,completed_at,created_at\n\
                    ,exercise,Completed,2026-10-13T10:00:00Z,2026-10-12T09:00:00Z\n\
                    3d7f5d6f-24f7-4e8e-8b4b-3e7e44b4a7b2,breathing,overdue,,2026-10-12T09:00:00Z\n";
        let tasks = read_tasks(data.as_bytes()).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].status, TaskStatus::Completed);
        assert!(tasks[0].completed_at.is_some());
        assert_eq!(tasks[1].status, TaskStatus::Overdue);
        assert_eq!(
            tasks[1].id,
            Uuid::parse_str("3d7f5d6f-24f7-4e8e-8b4b-3e7e44b4a7b2").unwrap()
        );
    }

    #[test]
    fn unknown_status_is_an_error() {
        let data = "id,type,status,completed_at,created_at\n\
                    ,exercise,skipped,,2026-10-12T09:00:00Z\n";
        let err = read_tasks(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn parses_diary_rows() {
        let data = "timestamp,content,mood_score\n\
                    2026-10-12T22:00:00Z,\"Long day, tired\",3\n\
                    2026-10-14T22:00:00Z,Talked to a friend,\n";
        let diary = read_diary(data.as_bytes()).unwrap();
        assert_eq!(diary.len(), 2);
        assert_eq!(diary[0].content, "Long day, tired");
        assert_eq!(diary[0].mood_score, Some(3));
        assert_eq!(diary[1].mood_score, None);
    }

    #[test]
    fn demo_week_loads_and_analyzes() {
        let start = Utc.with_ymd_and_hms(2026, 10, 12, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 10, 18, 23, 59, 59).unwrap();
        let series = within_window(
            read_moods(include_str!("../demos/moods.csv").as_bytes()).unwrap(),
            read_tasks(include_str!("../demos/tasks.csv").as_bytes()).unwrap(),
            read_diary(include_str!("../demos/diary.csv").as_bytes()).unwrap(),
            start,
            end,
        );
        assert_eq!(series.moods.len(), 7);
        assert_eq!(series.tasks.len(), 4);
        assert_eq!(series.diary.len(), 2);

        let report = crate::InsightsEngine::new()
            .generate("demo", &series.moods, &series.tasks, &series.diary, start, end)
            .unwrap();
        assert_eq!(report.mood_analysis.average_mood, 2.4);
        assert_eq!(report.mood_analysis.low_mood_day_count, 3);
        assert_eq!(report.task_correlation.completion_rate_percent, 75);
        assert_eq!(
            report.crisis_alert.map(|a| a.severity),
            Some(crate::AlertSeverity::High)
        );
    }

    #[test]
    fn window_filter_drops_outside_records_and_orders_moods() {
        let start = Utc.with_ymd_and_hms(2026, 10, 12, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 10, 18, 23, 59, 59).unwrap();
        let mood = |d: u32, score: i32| MoodRecord {
            timestamp: Utc.with_ymd_and_hms(2026, 10, d, 20, 0, 0).unwrap(),
            score,
            note: None,
        };

        let series = within_window(
            vec![mood(15, 3), mood(11, 5), mood(13, 2), mood(19, 1)],
            Vec::new(),
            Vec::new(),
            start,
            end,
        );
        let scores: Vec<i32> = series.moods.iter().map(|m| m.score).collect();
        assert_eq!(scores, vec![2, 3]);
    }
}
