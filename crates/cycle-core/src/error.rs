//! Error types for `cycle-core`.
//!
//! The engine functions themselves never fail; these errors come from the
//! precondition checks callers run at the application boundary.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("cycle length must be at least one day")]
  ZeroCycleLength,

  #[error("period length must be at least one day")]
  ZeroPeriodLength,

  #[error("average cycle length must be at least one day")]
  ZeroAverageCycleLength,

  #[error(
    "period length ({period_length}) must be shorter than cycle length \
     ({cycle_length})"
  )]
  PeriodNotShorterThanCycle {
    period_length: u32,
    cycle_length:  u32,
  },

  #[error("cycle length ({length}) must not exceed {max} days")]
  CycleLengthTooLong { length: u32, max: u32 },

  #[error("average cycle length ({length}) must not exceed {max} days")]
  AverageCycleLengthTooLong { length: u32, max: u32 },

  #[error("prediction count must be at least one")]
  ZeroPredictionCount,

  #[error("prediction count ({count}) must not exceed {max}")]
  TooManyPredictions { count: usize, max: usize },

  #[error("date {date} is outside the supported years")]
  DateOutOfRange { date: NaiveDate },

  #[error("invalid calendar month: {year}-{month:02}")]
  InvalidMonth { year: i32, month: u32 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
