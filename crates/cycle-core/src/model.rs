//! The cycle model: the parameters every engine computation starts from.
//!
//! A model is an immutable value. Recording a new first day of a cycle does
//! not mutate it; [`CycleModel::roll_forward`] returns an updated copy.

use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  entry::{LogEntry, latest_cycle_start},
  phase::{PhaseResult, calculate_cycle_phase},
  predict::predicted_periods,
};

/// Longest cycle (and average cycle) the validation layer accepts, in days.
pub const MAX_CYCLE_LENGTH: u32 = 365;

/// Calendar years accepted for input dates. Every date the engine derives from
/// a validated model stays well inside chrono's representable range.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1..=9999;

/// Reject dates outside [`SUPPORTED_YEARS`].
pub fn validate_date(date: NaiveDate) -> Result<()> {
  if SUPPORTED_YEARS.contains(&date.year()) {
    Ok(())
  } else {
    Err(Error::DateOutOfRange { date })
  }
}

/// A user's cycle parameters as supplied by the persistence layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleModel {
  /// Expected typical cycle length in days.
  pub cycle_length:         u32,
  /// Expected bleeding duration in days.
  pub period_length:        u32,
  /// The most recently known first day of menstruation.
  pub last_period_start:    NaiveDate,
  /// Historical mean, used for predictions past the immediately next period.
  pub average_cycle_length: u32,
}

impl Default for CycleModel {
  fn default() -> Self {
    Self {
      cycle_length:         28,
      period_length:        5,
      last_period_start:    NaiveDate::from_ymd_opt(2025, 6, 11)
        .expect("2025-06-11 is a valid date"),
      average_cycle_length: 28,
    }
  }
}

impl CycleModel {
  /// Check the model invariants: every length is positive and at most
  /// [`MAX_CYCLE_LENGTH`], the period is shorter than the cycle, and the start
  /// date lies in [`SUPPORTED_YEARS`].
  ///
  /// The engine functions accept any model; this is the check the API and CLI
  /// run before handing user input to them.
  pub fn validate(&self) -> Result<()> {
    if self.cycle_length == 0 {
      return Err(Error::ZeroCycleLength);
    }
    if self.period_length == 0 {
      return Err(Error::ZeroPeriodLength);
    }
    if self.average_cycle_length == 0 {
      return Err(Error::ZeroAverageCycleLength);
    }
    if self.cycle_length > MAX_CYCLE_LENGTH {
      return Err(Error::CycleLengthTooLong {
        length: self.cycle_length,
        max:    MAX_CYCLE_LENGTH,
      });
    }
    if self.average_cycle_length > MAX_CYCLE_LENGTH {
      return Err(Error::AverageCycleLengthTooLong {
        length: self.average_cycle_length,
        max:    MAX_CYCLE_LENGTH,
      });
    }
    if self.period_length >= self.cycle_length {
      return Err(Error::PeriodNotShorterThanCycle {
        period_length: self.period_length,
        cycle_length:  self.cycle_length,
      });
    }
    validate_date(self.last_period_start)
  }

  /// Classify `date` against this model.
  pub fn phase_on(&self, date: NaiveDate) -> PhaseResult {
    calculate_cycle_phase(
      date,
      self.last_period_start,
      self.cycle_length,
      self.period_length,
    )
  }

  /// The next `count` predicted period start dates.
  pub fn predicted_periods(&self, count: usize) -> Vec<NaiveDate> {
    predicted_periods(self, count)
  }

  /// Return a copy whose `last_period_start` is the latest first-day entry in
  /// `entries`, if that is later than the current start.
  pub fn roll_forward(&self, entries: &[LogEntry]) -> Self {
    match latest_cycle_start(entries) {
      Some(start) => self.with_start_at_least(start),
      None => *self,
    }
  }

  /// Apply a single newly saved entry; only first-day entries matter.
  pub fn apply_entry(&self, entry: &LogEntry) -> Self {
    if entry.is_first_day_of_cycle {
      self.with_start_at_least(entry.date)
    } else {
      *self
    }
  }

  fn with_start_at_least(&self, start: NaiveDate) -> Self {
    Self {
      last_period_start: self.last_period_start.max(start),
      ..*self
    }
  }
}
