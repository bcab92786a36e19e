use anyhow::Context;
use chrono::{DateTime, Duration, TimeZone, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::import;
use crate::models::{DiaryRecord, MoodRecord, TaskRecord, TaskStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Mood,
    Task,
    Diary,
}

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

pub const SEED_PATIENT: &str = "demo-patient";

/// Loads one realistic week (2026-10-12 .. 2026-10-18) for the demo patient.
pub async fn seed(pool: &PgPool) -> anyhow::Result<()> {
    let week_start = Utc
        .with_ymd_and_hms(2026, 10, 12, 20, 0, 0)
        .single()
        .context("invalid seed date")?;

    let moods = [
        (3, "Good session on Monday"),
        (3, ""),
        (3, "Work stress"),
        (3, ""),
        (2, "Couldn't sleep"),
        (2, ""),
        (1, "Stayed in bed most of the day"),
    ];
    for (day, (score, note)) in moods.iter().enumerate() {
        let recorded_at = week_start + Duration::days(day as i64);
        insert_mood(
            pool,
            SEED_PATIENT,
            &MoodRecord {
                timestamp: recorded_at,
                score: *score,
                note: (!note.is_empty()).then(|| note.to_string()),
            },
        )
        .await?;
    }

    let tasks = [
        ("breathing", TaskStatus::Completed),
        ("journaling", TaskStatus::Completed),
        ("social", TaskStatus::Completed),
        ("exercise", TaskStatus::Pending),
    ];
    for (i, (task_type, status)) in tasks.iter().enumerate() {
        let created_at = week_start - Duration::hours(11) + Duration::days(i as i64);
        insert_task(
            pool,
            SEED_PATIENT,
            &TaskRecord {
                id: Uuid::new_v4(),
                task_type: task_type.to_string(),
                status: *status,
                completed_at: (*status == TaskStatus::Completed)
                    .then(|| created_at + Duration::hours(8)),
                created_at,
            },
        )
        .await?;
    }

    for (day, content) in [(1, "Felt tense before the meeting"), (4, "Hard to get going today")] {
        insert_diary(
            pool,
            SEED_PATIENT,
            &DiaryRecord {
                timestamp: week_start + Duration::days(day) + Duration::hours(2),
                content: content.to_string(),
                mood_score: None,
            },
        )
        .await?;
    }

    Ok(())
}

async fn insert_mood(pool: &PgPool, patient_id: &str, mood: &MoodRecord) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO weekly_insights.mood_entries
        (id, patient_id, score, note, recorded_at, source_key)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (source_key) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(patient_id)
    .bind(mood.score)
    .bind(&mood.note)
    .bind(mood.timestamp)
    .bind(format!("mood:{}:{}", patient_id, mood.timestamp.to_rfc3339()))
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

async fn insert_task(pool: &PgPool, patient_id: &str, task: &TaskRecord) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO weekly_insights.tasks
        (id, patient_id, task_type, status, completed_at, created_at, source_key)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (source_key) DO NOTHING
        "#,
    )
    .bind(task.id)
    .bind(patient_id)
    .bind(&task.task_type)
    .bind(task.status.as_str())
    .bind(task.completed_at)
    .bind(task.created_at)
    .bind(format!(
        "task:{}:{}:{}",
        patient_id,
        task.task_type,
        task.created_at.to_rfc3339()
    ))
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

async fn insert_diary(pool: &PgPool, patient_id: &str, entry: &DiaryRecord) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO weekly_insights.diary_entries
        (id, patient_id, content, mood_score, written_at, source_key)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (source_key) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(patient_id)
    .bind(&entry.content)
    .bind(entry.mood_score)
    .bind(entry.timestamp)
    .bind(format!("diary:{}:{}", patient_id, entry.timestamp.to_rfc3339()))
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn fetch_mood_series(
    pool: &PgPool,
    patient_id: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> anyhow::Result<Vec<MoodRecord>> {
    let rows = sqlx::query(
        "SELECT score, note, recorded_at \
         FROM weekly_insights.mood_entries \
         WHERE patient_id = $1 AND recorded_at >= $2 AND recorded_at <= $3 \
         ORDER BY recorded_at ASC",
    )
    .bind(patient_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| MoodRecord {
            timestamp: row.get("recorded_at"),
            score: row.get("score"),
            note: row.get("note"),
        })
        .collect())
}

pub async fn fetch_task_series(
    pool: &PgPool,
    patient_id: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> anyhow::Result<Vec<TaskRecord>> {
    let rows = sqlx::query(
        "SELECT id, task_type, status, completed_at, created_at \
         FROM weekly_insights.tasks \
         WHERE patient_id = $1 AND created_at >= $2 AND created_at <= $3 \
         ORDER BY created_at ASC",
    )
    .bind(patient_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    let mut tasks = Vec::with_capacity(rows.len());
    for row in rows {
        let status: String = row.get("status");
        tasks.push(TaskRecord {
            id: row.get("id"),
            task_type: row.get("task_type"),
            status: status.parse().map_err(anyhow::Error::msg)?,
            completed_at: row.get("completed_at"),
            created_at: row.get("created_at"),
        });
    }

    Ok(tasks)
}

pub async fn fetch_diary_series(
    pool: &PgPool,
    patient_id: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> anyhow::Result<Vec<DiaryRecord>> {
    let rows = sqlx::query(
        "SELECT content, mood_score, written_at \
         FROM weekly_insights.diary_entries \
         WHERE patient_id = $1 AND written_at >= $2 AND written_at <= $3 \
         ORDER BY written_at ASC",
    )
    .bind(patient_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| DiaryRecord {
            timestamp: row.get("written_at"),
            content: row.get("content"),
            mood_score: row.get("mood_score"),
        })
        .collect())
}

/// Imports a CSV export for one patient. Rows already present are skipped.
pub async fn import_csv(
    pool: &PgPool,
    kind: ImportKind,
    patient_id: &str,
    csv_path: &std::path::Path,
) -> anyhow::Result<usize> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let mut inserted = 0usize;

    match kind {
        ImportKind::Mood => {
            for mood in import::read_moods(file)? {
                if insert_mood(pool, patient_id, &mood).await? {
                    inserted += 1;
                }
            }
        }
        ImportKind::Task => {
            for task in import::read_tasks(file)? {
                if insert_task(pool, patient_id, &task).await? {
                    inserted += 1;
                }
            }
        }
        ImportKind::Diary => {
            for entry in import::read_diary(file)? {
                if insert_diary(pool, patient_id, &entry).await? {
                    inserted += 1;
                }
            }
        }
    }

    Ok(inserted)
}
