//! Enumerations shared by templates, preferences and planned reminders.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// What a reminder is about.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReminderKind {
  PeriodPrediction,
  SymptomReminder,
  FertilityAlert,
  HealthCheckin,
  MedicationReminder,
  CycleInsight,
  WellnessTip,
  AppointmentReminder,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
  Low,
  Medium,
  High,
  Urgent,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Channel {
  Push,
  Email,
  Sms,
  InApp,
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RepeatInterval {
  Daily,
  Weekly,
  Monthly,
  Custom,
  #[default]
  None,
}

/// What tapping a reminder action does.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
  Dismiss,
  Snooze,
  LogEntry,
  LogSymptoms,
  TrackOvulation,
  CompleteCheckin,
  Custom,
}
