//! Log entries: what the user records for a single day.
//!
//! Entries live in external storage. The engine only reads them: to find the
//! latest recorded cycle start, to attach them to calendar cells, and to count
//! symptoms for insights.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{Result, model::validate_date};

/// Recorded flow intensity.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Flow {
  Light,
  Medium,
  Heavy,
}

impl Flow {
  /// Display token for a calendar cell that has a logged entry.
  pub fn color(self) -> &'static str {
    match self {
      Self::Light => "bg-pink-100 border-pink-300 text-pink-800",
      Self::Medium => "bg-pink-200 border-pink-400 text-pink-800",
      Self::Heavy => "bg-pink-300 border-pink-500 text-pink-800",
    }
  }
}

/// A single day's record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
  /// Storage identifier, if the entry has been persisted.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id:                    Option<String>,
  pub date:                  NaiveDate,
  pub flow:                  Flow,
  #[serde(default)]
  pub symptoms:              Vec<String>,
  #[serde(default)]
  pub mood:                  String,
  #[serde(default)]
  pub notes:                 String,
  /// Marks this date as the first day of a new cycle.
  #[serde(default)]
  pub is_first_day_of_cycle: bool,
}

impl LogEntry {
  /// Convenience constructor with every optional field empty.
  pub fn new(date: NaiveDate, flow: Flow) -> Self {
    Self {
      id: None,
      date,
      flow,
      symptoms: Vec::new(),
      mood: String::new(),
      notes: String::new(),
      is_first_day_of_cycle: false,
    }
  }
}

/// The most recent date among entries flagged as the first day of a cycle.
pub fn latest_cycle_start(entries: &[LogEntry]) -> Option<NaiveDate> {
  entries
    .iter()
    .filter(|e| e.is_first_day_of_cycle)
    .map(|e| e.date)
    .max()
}

/// Reject entry sets containing a date outside
/// [`SUPPORTED_YEARS`](crate::model::SUPPORTED_YEARS).
pub fn validate_entries(entries: &[LogEntry]) -> Result<()> {
  entries.iter().try_for_each(|e| validate_date(e.date))
}

/// The first entry recorded for `date`, if any.
pub fn entry_on(entries: &[LogEntry], date: NaiveDate) -> Option<&LogEntry> {
  entries.iter().find(|e| e.date == date)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn latest_cycle_start_ignores_unflagged_entries() {
    let mut first = LogEntry::new(date(2025, 6, 11), Flow::Heavy);
    first.is_first_day_of_cycle = true;
    let later = LogEntry::new(date(2025, 6, 14), Flow::Light);

    assert_eq!(latest_cycle_start(&[first, later]), Some(date(2025, 6, 11)));
    assert_eq!(latest_cycle_start(&[]), None);
  }

  #[test]
  fn entry_on_returns_first_match() {
    let mut a = LogEntry::new(date(2025, 6, 12), Flow::Medium);
    a.notes = "a".into();
    let mut b = LogEntry::new(date(2025, 6, 12), Flow::Light);
    b.notes = "b".into();
    let entries = [a, b];

    assert_eq!(entry_on(&entries, date(2025, 6, 12)).unwrap().notes, "a");
    assert!(entry_on(&entries, date(2025, 6, 13)).is_none());
  }

  #[test]
  fn entries_outside_supported_years_are_rejected() {
    let ok = LogEntry::new(date(2025, 6, 11), Flow::Light);
    let far = LogEntry::new(date(-200_000, 1, 1), Flow::Light);
    assert_eq!(validate_entries(&[ok.clone()]), Ok(()));
    assert_eq!(
      validate_entries(&[ok, far.clone()]),
      Err(crate::Error::DateOutOfRange { date: far.date })
    );
  }

  #[test]
  fn deserialises_minimal_entry() {
    let entry: LogEntry =
      serde_json::from_str(r#"{"date":"2025-06-11","flow":"heavy"}"#).unwrap();
    assert_eq!(entry.flow, Flow::Heavy);
    assert!(entry.symptoms.is_empty());
    assert!(!entry.is_first_day_of_cycle);
  }

  #[test]
  fn flow_parses_lowercase() {
    assert_eq!("light".parse::<Flow>().unwrap(), Flow::Light);
    assert_eq!(Flow::Heavy.to_string(), "heavy");
  }
}
