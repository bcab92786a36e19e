use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing_subscriber::EnvFilter;

use weekly_insights::db::{self, ImportKind};
use weekly_insights::import::{self, WindowSeries};
use weekly_insights::{report, EngineConfig, InsightsEngine};

#[derive(Parser)]
#[command(name = "weekly-insights")]
#[command(about = "Weekly behavioral insights for therapy patients", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Markdown,
}

#[derive(Clone, Copy, ValueEnum)]
enum ImportKindArg {
    Mood,
    Task,
    Diary,
}

impl From<ImportKindArg> for ImportKind {
    fn from(kind: ImportKindArg) -> Self {
        match kind {
            ImportKindArg::Mood => ImportKind::Mood,
            ImportKindArg::Task => ImportKind::Task,
            ImportKindArg::Diary => ImportKind::Diary,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load a demo patient week
    Seed,
    /// Import mood, task or diary rows from a CSV file
    Import {
        #[arg(long, value_enum)]
        kind: ImportKindArg,
        #[arg(long)]
        patient: String,
        #[arg(long)]
        csv: PathBuf,
    },
    /// Generate the weekly insight report for a patient
    Analyze {
        #[arg(long)]
        patient: String,
        /// Last day of the window (defaults to today, UTC)
        #[arg(long)]
        end: Option<NaiveDate>,
        #[arg(long, default_value_t = 7)]
        days: i64,
        /// Read moods from CSV instead of the database
        #[arg(long)]
        moods: Option<PathBuf>,
        #[arg(long)]
        tasks: Option<PathBuf>,
        #[arg(long)]
        diary: Option<PathBuf>,
        /// JSON file overriding engine thresholds
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
        /// Write the report here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::InitDb => {
            let pool = connect().await?;
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            let pool = connect().await?;
            db::seed(&pool).await?;
            println!("Seed data inserted for {}.", db::SEED_PATIENT);
        }
        Commands::Import { kind, patient, csv } => {
            let pool = connect().await?;
            let inserted = db::import_csv(&pool, kind.into(), &patient, &csv).await?;
            println!("Inserted {inserted} records from {}.", csv.display());
        }
        Commands::Analyze {
            patient,
            end,
            days,
            moods,
            tasks,
            diary,
            config,
            format,
            out,
        } => {
            let config = match config {
                Some(path) => EngineConfig::from_json_file(&path)
                    .with_context(|| format!("failed to load config {}", path.display()))?,
                None => EngineConfig::default(),
            };
            let engine = InsightsEngine::with_config(config)?;

            let end_date = end.unwrap_or_else(|| Utc::now().date_naive());
            let (start, end) = window_bounds(end_date, days)?;
            tracing::debug!(%start, %end, patient = %patient, "Analysis window");

            let series = if moods.is_some() || tasks.is_some() || diary.is_some() {
                load_csv_series(moods, tasks, diary, start, end)?
            } else {
                let pool = connect().await?;
                load_db_series(&pool, &patient, start, end).await?
            };

            let insights = engine.generate(
                &patient,
                &series.moods,
                &series.tasks,
                &series.diary,
                start,
                end,
            )?;

            let rendered = match format {
                OutputFormat::Json => report::render_json(&insights)?,
                OutputFormat::Markdown => report::render_markdown(&insights),
            };

            match out {
                Some(path) => {
                    std::fs::write(&path, rendered)?;
                    println!("Report written to {}.", path.display());
                }
                None => println!("{rendered}"),
            }
        }
    }

    Ok(())
}

async fn connect() -> anyhow::Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL")
        .context("DATABASE_URL must be set to a Postgres instance")?;

    PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("failed to connect to Postgres")
}

async fn load_db_series(
    pool: &PgPool,
    patient: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> anyhow::Result<WindowSeries> {
    Ok(WindowSeries {
        moods: db::fetch_mood_series(pool, patient, start, end).await?,
        tasks: db::fetch_task_series(pool, patient, start, end).await?,
        diary: db::fetch_diary_series(pool, patient, start, end).await?,
    })
}

fn load_csv_series(
    moods: Option<PathBuf>,
    tasks: Option<PathBuf>,
    diary: Option<PathBuf>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> anyhow::Result<WindowSeries> {
    let open = |path: &PathBuf| {
        std::fs::File::open(path).with_context(|| format!("failed to open {}", path.display()))
    };

    let moods = match &moods {
        Some(path) => import::read_moods(open(path)?)?,
        None => Vec::new(),
    };
    let tasks = match &tasks {
        Some(path) => import::read_tasks(open(path)?)?,
        None => Vec::new(),
    };
    let diary = match &diary {
        Some(path) => import::read_diary(open(path)?)?,
        None => Vec::new(),
    };

    Ok(import::within_window(moods, tasks, diary, start, end))
}

/// Inclusive window of `days` whole days ending on `end_date`.
fn window_bounds(
    end_date: NaiveDate,
    days: i64,
) -> anyhow::Result<(DateTime<Utc>, DateTime<Utc>)> {
    let Some(start_date) = Duration::try_days(days.max(1) - 1)
        .and_then(|span| end_date.checked_sub_signed(span))
    else {
        bail!("--days {days} reaches past the earliest supported date");
    };
    let start = start_date
        .and_hms_opt(0, 0, 0)
        .unwrap_or_default()
        .and_utc();
    let end = end_date
        .and_hms_opt(23, 59, 59)
        .unwrap_or_default()
        .and_utc();
    Ok((start, end))
}
