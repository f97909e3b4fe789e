//! Phase classification: which segment of the cycle a date falls in.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

// ─── Cycle constants ─────────────────────────────────────────────────────────

/// Assumed length of the luteal phase. Ovulation is placed this many days
/// before the next period, both here and in fertility reminders.
pub const LUTEAL_PHASE_DAYS: i64 = 14;

/// Days either side of the ovulation day classified as the ovulation phase.
pub const OVULATION_WINDOW_RADIUS: i64 = 2;

/// Length of the PMS segment at the end of every cycle.
pub const PMS_DAYS: i64 = 5;

/// Fertile days before the ovulation day.
pub const FERTILE_DAYS_BEFORE_OVULATION: i64 = 5;

/// Fertile days after the ovulation day.
pub const FERTILE_DAYS_AFTER_OVULATION: i64 = 1;

/// The 1-based day of the cycle on which ovulation is expected.
///
/// Non-positive for cycles of 14 days or fewer; callers get the arithmetic
/// result without clamping.
pub fn ovulation_day(cycle_length: u32) -> i64 {
  i64::from(cycle_length) - LUTEAL_PHASE_DAYS
}

// ─── Phase ───────────────────────────────────────────────────────────────────

/// A named segment of the menstrual cycle.
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
  EnumString,
  EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
  Period,
  Follicular,
  Ovulation,
  Luteal,
  Pms,
  /// No cycle position could be computed (zero-length cycle).
  Unknown,
}

impl Phase {
  /// Human-readable name shown in the insights panel.
  pub fn display_name(self) -> &'static str {
    match self {
      Self::Period => "Menstrual",
      Self::Follicular => "Follicular",
      Self::Ovulation => "Ovulation",
      Self::Luteal => "Luteal",
      Self::Pms => "PMS",
      Self::Unknown => "Unknown",
    }
  }

  pub fn color(self) -> &'static str { phase_color(self) }
}

/// Display token for calendar cells in `phase`.
pub fn phase_color(phase: Phase) -> &'static str {
  match phase {
    Phase::Period => "bg-red-100 border-red-300 text-red-800",
    Phase::Follicular => "bg-green-50 border-green-200 text-green-700",
    Phase::Ovulation => "bg-blue-100 border-blue-300 text-blue-800",
    Phase::Luteal => "bg-yellow-50 border-yellow-200 text-yellow-700",
    Phase::Pms => "bg-purple-100 border-purple-300 text-purple-800",
    Phase::Unknown => "bg-gray-50 border-gray-200 text-gray-600",
  }
}

// ─── PhaseResult ─────────────────────────────────────────────────────────────

/// The classification of one calendar date. Computed on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseResult {
  pub date:         NaiveDate,
  pub phase:        Phase,
  pub is_period:    bool,
  /// True only on the ovulation day itself, not the surrounding window.
  pub is_ovulation: bool,
  /// Set inside the ovulation window and inside the fertile window.
  pub is_fertile:   bool,
  /// 1-based position within the cycle; 0 only for [`Phase::Unknown`].
  pub day_of_cycle: u32,
}

impl PhaseResult {
  fn unknown(date: NaiveDate) -> Self {
    Self {
      date,
      phase: Phase::Unknown,
      is_period: false,
      is_ovulation: false,
      is_fertile: false,
      day_of_cycle: 0,
    }
  }
}

/// Classify `date` into a cycle phase.
///
/// The cycle position wraps with a floor modulo, so dates before
/// `last_period_start` land in the previous cycle with `day_of_cycle` still in
/// `1..=cycle_length`. A zero `cycle_length` yields [`Phase::Unknown`].
pub fn calculate_cycle_phase(
  date: NaiveDate,
  last_period_start: NaiveDate,
  cycle_length: u32,
  period_length: u32,
) -> PhaseResult {
  if cycle_length == 0 {
    return PhaseResult::unknown(date);
  }

  let cycle = i64::from(cycle_length);
  let days_diff = (date - last_period_start).num_days();
  let day = days_diff.rem_euclid(cycle) + 1;
  let ovulation = ovulation_day(cycle_length);

  // `day` is in 1..=cycle_length.
  let mut result = PhaseResult {
    day_of_cycle: day as u32,
    ..PhaseResult::unknown(date)
  };

  if day <= i64::from(period_length) {
    result.phase = Phase::Period;
    result.is_period = true;
  } else if day < ovulation - OVULATION_WINDOW_RADIUS {
    result.phase = Phase::Follicular;
  } else if (ovulation - OVULATION_WINDOW_RADIUS
    ..=ovulation + OVULATION_WINDOW_RADIUS)
    .contains(&day)
  {
    result.phase = Phase::Ovulation;
    result.is_ovulation = day == ovulation;
    result.is_fertile = true;
  } else if day <= cycle - PMS_DAYS {
    result.phase = Phase::Luteal;
  } else {
    result.phase = Phase::Pms;
  }

  if (ovulation - FERTILE_DAYS_BEFORE_OVULATION
    ..=ovulation + FERTILE_DAYS_AFTER_OVULATION)
    .contains(&day)
  {
    result.is_fertile = true;
  }

  result
}
