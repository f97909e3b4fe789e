//! `synccycle`: cycle phase, predictions and reminders from the terminal.
//!
//! # Usage
//!
//! ```text
//! synccycle phase --date 2025-06-24
//! synccycle --entries entries.json calendar --month 7
//! synccycle --json predict --count 6
//! synccycle reminders --user alice
//! synccycle serve            # JSON API under /api
//! ```
//!
//! Settings come from `synccycle.toml` (or `--config`), then `SYNCCYCLE_*`
//! environment variables, then flags.

mod output;
mod settings;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use axum::Router;
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};
use cycle_core::{
  CycleModel, DEFAULT_PREDICTION_COUNT,
  calendar::CalendarMonth,
  entry::{LogEntry, validate_entries},
  insights::Insights,
  predict::validate_prediction_count,
};
use cycle_reminders::plan_all;
use serde::Serialize;
use settings::{CycleSettings, Settings};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "synccycle", version, about = "Menstrual cycle tracker")]
struct Args {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE", global = true,
        default_value = settings::DEFAULT_CONFIG_FILE)]
  config: PathBuf,

  /// JSON array of log entries.
  #[arg(long, value_name = "FILE", global = true)]
  entries: Option<PathBuf>,

  /// Print JSON instead of text.
  #[arg(long, global = true)]
  json: bool,

  #[command(flatten)]
  model: ModelArgs,

  #[command(subcommand)]
  command: Command,
}

/// Cycle model overrides.
#[derive(clap::Args, Debug)]
struct ModelArgs {
  #[arg(long, global = true)]
  cycle_length:         Option<u32>,
  #[arg(long, global = true)]
  period_length:        Option<u32>,
  #[arg(long, value_name = "YYYY-MM-DD", global = true)]
  last_period_start:    Option<NaiveDate>,
  #[arg(long, global = true)]
  average_cycle_length: Option<u32>,
}

impl From<&ModelArgs> for CycleSettings {
  fn from(args: &ModelArgs) -> Self {
    CycleSettings {
      cycle_length:         args.cycle_length,
      period_length:        args.period_length,
      last_period_start:    args.last_period_start,
      average_cycle_length: args.average_cycle_length,
    }
  }
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Classify a date.
  Phase {
    /// Defaults to today.
    #[arg(long, value_name = "YYYY-MM-DD")]
    date: Option<NaiveDate>,
  },
  /// List upcoming period start dates.
  Predict {
    #[arg(long, default_value_t = DEFAULT_PREDICTION_COUNT)]
    count: usize,
  },
  /// Show a month grid.
  Calendar {
    #[arg(long)]
    year:  Option<i32>,
    #[arg(long)]
    month: Option<u32>,
  },
  /// Summarise the current cycle.
  Insights,
  /// Plan reminders for a user.
  Reminders {
    #[arg(long)]
    user: String,
  },
  /// Serve the JSON API.
  Serve {
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  // Logs go to stderr so `--json` output stays clean.
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();
  let settings = Settings::load(&args.config)
    .with_context(|| format!("loading {}", args.config.display()))?;

  let entries = match args.entries.as_ref().or(settings.entries_path.as_ref()) {
    Some(path) => load_entries(path)?,
    None => Vec::new(),
  };

  let model = resolve_model(&settings.cycle, &(&args.model).into(), &entries)?;
  tracing::debug!(?model, entries = entries.len(), "resolved cycle model");

  let today = chrono::Local::now().date_naive();

  match args.command {
    Command::Phase { date } => {
      let result = model.phase_on(date.unwrap_or(today));
      emit(args.json, &result, |r| output::phase(r, model.cycle_length))
    }
    Command::Predict { count } => {
      let dates = predict(&model, count)?;
      emit(args.json, &dates, |d| output::predictions(d))
    }
    Command::Calendar { year, month } => {
      let month = CalendarMonth::build(
        year.unwrap_or(today.year()),
        month.unwrap_or(today.month()),
        &model,
        &entries,
        today,
      )?;
      emit(args.json, &month, output::calendar)
    }
    Command::Insights => {
      let insights = Insights::compute(&model, &entries, today);
      emit(args.json, &insights, output::insights)
    }
    Command::Reminders { user } => {
      anyhow::ensure!(!user.trim().is_empty(), "--user must not be empty");
      let now = chrono::Local::now().naive_local();
      let plan = plan_all(&user, &model, &settings.reminders, now);
      emit(args.json, &plan, |p| output::reminders(p))
    }
    Command::Serve { host, port } => {
      let mut server = settings.server;
      if let Some(host) = host {
        server.host = host;
      }
      if let Some(port) = port {
        server.port = port;
      }
      serve(&server.address()).await
    }
  }
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// Defaults, then config, then flags; rolled forward to the latest recorded
/// first day and validated.
fn resolve_model(
  file: &CycleSettings,
  flags: &CycleSettings,
  entries: &[LogEntry],
) -> Result<CycleModel> {
  validate_entries(entries).context("invalid log entry")?;
  let model = file
    .overridden_by(flags)
    .apply_to(CycleModel::default())
    .roll_forward(entries);
  model.validate().context("invalid cycle model")?;
  Ok(model)
}

fn predict(model: &CycleModel, count: usize) -> Result<Vec<NaiveDate>> {
  validate_prediction_count(count).context("invalid --count")?;
  Ok(model.predicted_periods(count))
}

fn load_entries(path: &Path) -> Result<Vec<LogEntry>> {
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("reading entries file {}", path.display()))?;
  serde_json::from_str(&raw)
    .with_context(|| format!("parsing entries file {}", path.display()))
}

fn emit<T: Serialize>(
  json: bool,
  value: &T,
  text: impl FnOnce(&T) -> String,
) -> Result<()> {
  if json {
    let out =
      serde_json::to_string_pretty(value).context("serialising output")?;
    println!("{out}");
  } else {
    print!("{}", text(value));
  }
  Ok(())
}

async fn serve(address: &str) -> Result<()> {
  let app = Router::new()
    .nest("/api", cycle_api::api_router())
    .layer(TraceLayer::new_for_http());

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;
  Ok(())
}
