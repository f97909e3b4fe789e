//! Per-user notification preferences.
//!
//! Every field has a default, so a partial document (or none at all)
//! deserialises into a usable value.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::kind::{Channel, ReminderKind};

pub const DEFAULT_PERIOD_ADVANCE_NOTICE: u32 = 3;
pub const DEFAULT_FERTILITY_ADVANCE_NOTICE: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
  /// Master switch; when off nothing is planned.
  pub enabled:  bool,
  pub kinds:    KindToggles,
  pub timing:   Timing,
  pub channels: ChannelToggles,
  pub snooze:   Snooze,
}

impl Default for Preferences {
  fn default() -> Self {
    Self {
      enabled:  true,
      kinds:    KindToggles::default(),
      timing:   Timing::default(),
      channels: ChannelToggles::default(),
      snooze:   Snooze::default(),
    }
  }
}

impl Preferences {
  /// Whether reminders of `kind` should be planned at all.
  pub fn wants(&self, kind: ReminderKind) -> bool {
    self.enabled && self.kinds.allows(kind)
  }

  /// Whether `local_time` falls inside the user's quiet hours.
  pub fn is_quiet_hours(&self, local_time: NaiveTime) -> bool {
    self.timing.quiet_hours.contains(local_time)
  }
}

// ─── Kinds ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindToggles {
  pub period_predictions:    bool,
  pub symptom_reminders:     bool,
  pub fertility_alerts:      bool,
  pub health_checkins:       bool,
  pub medication_reminders:  bool,
  pub cycle_insights:        bool,
  pub wellness_tips:         bool,
  pub appointment_reminders: bool,
}

impl Default for KindToggles {
  fn default() -> Self {
    Self {
      period_predictions:    true,
      symptom_reminders:     true,
      fertility_alerts:      true,
      health_checkins:       false,
      medication_reminders:  false,
      cycle_insights:        true,
      wellness_tips:         true,
      appointment_reminders: true,
    }
  }
}

impl KindToggles {
  pub fn allows(&self, kind: ReminderKind) -> bool {
    match kind {
      ReminderKind::PeriodPrediction => self.period_predictions,
      ReminderKind::SymptomReminder => self.symptom_reminders,
      ReminderKind::FertilityAlert => self.fertility_alerts,
      ReminderKind::HealthCheckin => self.health_checkins,
      ReminderKind::MedicationReminder => self.medication_reminders,
      ReminderKind::CycleInsight => self.cycle_insights,
      ReminderKind::WellnessTip => self.wellness_tips,
      ReminderKind::AppointmentReminder => self.appointment_reminders,
    }
  }
}

// ─── Timing ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymptomFrequency {
  #[default]
  Daily,
  Weekly,
  Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckinFrequency {
  Daily,
  #[default]
  Weekly,
  Monthly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
  /// Days before a predicted period to remind. `0` means the default.
  pub period_advance_notice:      u32,
  pub symptom_reminder_frequency: SymptomFrequency,
  /// Days before predicted ovulation to remind. `0` means the default.
  pub fertility_advance_notice:   u32,
  pub health_checkin_frequency:   CheckinFrequency,
  pub quiet_hours:                QuietHours,
}

impl Default for Timing {
  fn default() -> Self {
    Self {
      period_advance_notice:      DEFAULT_PERIOD_ADVANCE_NOTICE,
      symptom_reminder_frequency: SymptomFrequency::default(),
      fertility_advance_notice:   DEFAULT_FERTILITY_ADVANCE_NOTICE,
      health_checkin_frequency:   CheckinFrequency::default(),
      quiet_hours:                QuietHours::default(),
    }
  }
}

/// A daily window, in the user's local time, during which nothing should be
/// delivered. `start > end` means the window spans midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuietHours {
  pub enabled: bool,
  #[serde(with = "hh_mm")]
  pub start:   NaiveTime,
  #[serde(with = "hh_mm")]
  pub end:     NaiveTime,
}

impl Default for QuietHours {
  fn default() -> Self {
    Self {
      enabled: true,
      start:   NaiveTime::from_hms_opt(22, 0, 0).unwrap_or_default(),
      end:     NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
    }
  }
}

impl QuietHours {
  /// Both ends are inclusive.
  pub fn contains(&self, t: NaiveTime) -> bool {
    if !self.enabled {
      return false;
    }
    if self.start <= self.end {
      self.start <= t && t <= self.end
    } else {
      t >= self.start || t <= self.end
    }
  }
}

/// `HH:MM` (de)serialisation for [`NaiveTime`].
mod hh_mm {
  use chrono::NaiveTime;
  use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

  const FORMAT: &str = "%H:%M";

  pub fn serialize<S: Serializer>(
    t: &NaiveTime,
    s: S,
  ) -> Result<S::Ok, S::Error> {
    s.collect_str(&t.format(FORMAT))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(
    d: D,
  ) -> Result<NaiveTime, D::Error> {
    let raw = String::deserialize(d)?;
    NaiveTime::parse_from_str(&raw, FORMAT)
      .map_err(|e| D::Error::custom(format!("invalid time {raw:?}: {e}")))
  }
}

// ─── Channels ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelToggles {
  pub push:   bool,
  pub email:  bool,
  pub sms:    bool,
  pub in_app: bool,
}

impl Default for ChannelToggles {
  fn default() -> Self {
    Self {
      push:   true,
      email:  false,
      sms:    false,
      in_app: true,
    }
  }
}

impl ChannelToggles {
  pub fn allows(&self, channel: Channel) -> bool {
    match channel {
      Channel::Push => self.push,
      Channel::Email => self.email,
      Channel::Sms => self.sms,
      Channel::InApp => self.in_app,
    }
  }
}

// ─── Snooze ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snooze {
  pub enabled:                  bool,
  pub default_duration_minutes: u32,
  pub max_snoozes:              u32,
}

impl Default for Snooze {
  fn default() -> Self {
    Self {
      enabled:                  true,
      default_duration_minutes: 30,
      max_snoozes:              3,
    }
  }
}

impl Snooze {
  /// When a reminder snoozed at `at` should fire again, or `None` if it has
  /// already been snoozed `max_snoozes` times or snoozing is off.
  pub fn snoozed_until(
    &self,
    at: NaiveDateTime,
    times_snoozed: u32,
  ) -> Option<NaiveDateTime> {
    if !self.enabled || times_snoozed >= self.max_snoozes {
      return None;
    }
    Some(at + Duration::minutes(i64::from(self.default_duration_minutes)))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
  }

  #[test]
  fn defaults_match_documented_values() {
    let p = Preferences::default();
    assert!(p.enabled);
    assert!(p.wants(ReminderKind::PeriodPrediction));
    assert!(!p.wants(ReminderKind::HealthCheckin));
    assert_eq!(p.timing.period_advance_notice, 3);
    assert_eq!(p.timing.fertility_advance_notice, 2);
    assert!(p.channels.allows(Channel::InApp));
    assert!(!p.channels.allows(Channel::Email));
  }

  #[test]
  fn master_switch_overrides_kind_toggles() {
    let p = Preferences {
      enabled: false,
      ..Preferences::default()
    };
    assert!(!p.wants(ReminderKind::PeriodPrediction));
  }

  #[test]
  fn overnight_quiet_hours() {
    let p = Preferences::default();
    assert!(p.is_quiet_hours(time(23, 30)));
    assert!(p.is_quiet_hours(time(7, 59)));
    assert!(p.is_quiet_hours(time(22, 0)));
    assert!(!p.is_quiet_hours(time(12, 0)));
  }

  #[test]
  fn same_day_quiet_hours() {
    let q = QuietHours {
      enabled: true,
      start:   time(13, 0),
      end:     time(14, 0),
    };
    assert!(q.contains(time(13, 30)));
    assert!(!q.contains(time(23, 0)));
    assert!(!QuietHours { enabled: false, ..q }.contains(time(13, 30)));
  }

  #[test]
  fn partial_document_fills_defaults() {
    let p: Preferences = serde_json::from_str(
      r#"{"kinds":{"fertility_alerts":false},
          "timing":{"quiet_hours":{"start":"23:15"}}}"#,
    )
    .unwrap();
    assert!(p.enabled);
    assert!(!p.kinds.fertility_alerts);
    assert!(p.kinds.period_predictions);
    assert_eq!(p.timing.quiet_hours.start, time(23, 15));
    assert_eq!(p.timing.quiet_hours.end, time(8, 0));
  }

  #[test]
  fn quiet_hours_serialise_as_hh_mm() {
    let json = serde_json::to_value(QuietHours::default()).unwrap();
    assert_eq!(json["start"], "22:00");
    assert_eq!(json["end"], "08:00");
  }

  #[test]
  fn snooze_is_limited() {
    let at = chrono::NaiveDate::from_ymd_opt(2025, 6, 20)
      .unwrap()
      .and_time(time(9, 0));
    let s = Snooze::default();
    assert_eq!(s.snoozed_until(at, 0), Some(at + Duration::minutes(30)));
    assert_eq!(s.snoozed_until(at, 3), None);
    let off = Snooze {
      enabled: false,
      ..Snooze::default()
    };
    assert_eq!(off.snoozed_until(at, 0), None);
  }
}
