//! Layered configuration: defaults, then `synccycle.toml`, then
//! `SYNCCYCLE_*` environment variables, then command-line flags.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::NaiveDate;
use cycle_core::CycleModel;
use cycle_reminders::Preferences;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "synccycle.toml";
pub const ENV_PREFIX: &str = "SYNCCYCLE";

/// The resolved configuration document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
  /// JSON array of log entries to read.
  pub entries_path: Option<PathBuf>,
  pub cycle:        CycleSettings,
  pub server:       ServerSettings,
  /// Reminder preferences; missing fields take their defaults.
  pub reminders:    Preferences,
}

/// Cycle model fields, each optional so a file may set only some of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CycleSettings {
  pub cycle_length:         Option<u32>,
  pub period_length:        Option<u32>,
  pub last_period_start:    Option<NaiveDate>,
  pub average_cycle_length: Option<u32>,
}

impl CycleSettings {
  /// Fill unset fields from `base`.
  pub fn apply_to(&self, base: CycleModel) -> CycleModel {
    CycleModel {
      cycle_length:         self.cycle_length.unwrap_or(base.cycle_length),
      period_length:        self.period_length.unwrap_or(base.period_length),
      last_period_start:    self
        .last_period_start
        .unwrap_or(base.last_period_start),
      average_cycle_length: self
        .average_cycle_length
        .unwrap_or(base.average_cycle_length),
    }
  }

  /// Fields set in `other` win.
  pub fn overridden_by(&self, other: &CycleSettings) -> CycleSettings {
    CycleSettings {
      cycle_length:         other.cycle_length.or(self.cycle_length),
      period_length:        other.period_length.or(self.period_length),
      last_period_start:    other.last_period_start.or(self.last_period_start),
      average_cycle_length: other
        .average_cycle_length
        .or(self.average_cycle_length),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
  pub host: String,
  pub port: u16,
}

impl Default for ServerSettings {
  fn default() -> Self {
    Self {
      host: "127.0.0.1".to_string(),
      port: 5280,
    }
  }
}

impl ServerSettings {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

impl Settings {
  /// Read `path` (if it exists) layered under the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let builder = config::Config::builder()
      .add_source(config::File::from(path).required(false));
    Self::finish(builder)
  }

  fn finish(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
  ) -> anyhow::Result<Self> {
    builder
      .add_source(
        config::Environment::with_prefix(ENV_PREFIX)
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()
      .context("failed to read configuration")?
      .try_deserialize()
      .context("failed to deserialise configuration")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn from_toml(raw: &str) -> Settings {
    let builder = config::Config::builder()
      .add_source(config::File::from_str(raw, config::FileFormat::Toml));
    Settings::finish(builder).unwrap()
  }

  #[test]
  fn empty_document_uses_defaults() {
    let s = from_toml("");
    assert_eq!(s.entries_path, None);
    assert_eq!(s.cycle, CycleSettings::default());
    assert_eq!(s.server, ServerSettings::default());
    assert_eq!(s.server.address(), "127.0.0.1:5280");
    assert_eq!(s.reminders, Preferences::default());
    assert_eq!(s.cycle.apply_to(CycleModel::default()), CycleModel::default());
  }

  #[test]
  fn partial_cycle_section_fills_from_defaults() {
    let s = from_toml(
      r#"
        entries_path = "log.json"

        [cycle]
        cycle_length = 30
        last_period_start = "2025-07-01"

        [server]
        port = 8080

        [reminders.kinds]
        fertility_alerts = false
      "#,
    );
    let model = s.cycle.apply_to(CycleModel::default());
    assert_eq!(model.cycle_length, 30);
    assert_eq!(model.period_length, 5);
    assert_eq!(
      model.last_period_start,
      NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
    );
    assert_eq!(s.entries_path, Some(PathBuf::from("log.json")));
    assert_eq!(s.server.host, "127.0.0.1");
    assert_eq!(s.server.port, 8080);
    assert!(!s.reminders.kinds.fertility_alerts);
    assert!(s.reminders.kinds.period_predictions);
  }

  #[test]
  fn flags_override_file() {
    let file = CycleSettings {
      cycle_length: Some(30),
      period_length: Some(4),
      ..CycleSettings::default()
    };
    let flags = CycleSettings {
      cycle_length: Some(26),
      ..CycleSettings::default()
    };
    let merged = file.overridden_by(&flags);
    assert_eq!(merged.cycle_length, Some(26));
    assert_eq!(merged.period_length, Some(4));
  }

  #[test]
  fn missing_file_is_not_an_error() {
    let s = Settings::load(Path::new("/nonexistent/synccycle.toml")).unwrap();
    assert_eq!(s.server.port, 5280);
  }
}
