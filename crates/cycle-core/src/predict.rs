//! Period projection and the key dates of a cycle.

use chrono::{Days, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  model::CycleModel,
  phase::{
    FERTILE_DAYS_AFTER_OVULATION, FERTILE_DAYS_BEFORE_OVULATION,
    LUTEAL_PHASE_DAYS, PMS_DAYS, ovulation_day,
  },
};

/// How many upcoming periods are projected when the caller doesn't say.
pub const DEFAULT_PREDICTION_COUNT: usize = 3;

/// Largest count [`validate_prediction_count`] accepts: three years of
/// monthly cycles.
pub const MAX_PREDICTION_COUNT: usize = 36;

/// Project the next `count` period start dates.
///
/// The first uses the model's own cycle length. Every later one is
/// `average_cycle_length × i` days after `last_period_start`, computed from the
/// start rather than from the previous prediction. The list ends early at the
/// last representable date.
pub fn predicted_periods(model: &CycleModel, count: usize) -> Vec<NaiveDate> {
  let start = model.last_period_start;
  let average = u64::from(model.average_cycle_length);

  (1..=count as u64)
    .map_while(|i| {
      let offset = if i == 1 {
        u64::from(model.cycle_length)
      } else {
        average.checked_mul(i)?
      };
      start.checked_add_days(Days::new(offset))
    })
    .collect()
}

/// Reject a prediction count of zero or above [`MAX_PREDICTION_COUNT`].
pub fn validate_prediction_count(count: usize) -> Result<()> {
  if count == 0 {
    return Err(Error::ZeroPredictionCount);
  }
  if count > MAX_PREDICTION_COUNT {
    return Err(Error::TooManyPredictions {
      count,
      max: MAX_PREDICTION_COUNT,
    });
  }
  Ok(())
}

/// The date of the ovulation day (see [`ovulation_day`]) in the cycle that
/// began on `cycle_start`.
pub fn ovulation_date_in(
  cycle_start: NaiveDate,
  cycle_length: u32,
) -> NaiveDate {
  cycle_start + Duration::days(ovulation_day(cycle_length) - 1)
}

/// The ovulation date of the cycle that ends when a period starts on
/// `period_start`. Agrees with [`ovulation_date_in`] for every cycle length:
/// the ovulation day is `LUTEAL_PHASE_DAYS` days before the cycle's last day.
pub fn ovulation_date_for(period_start: NaiveDate) -> NaiveDate {
  period_start - Duration::days(LUTEAL_PHASE_DAYS + 1)
}

// ─── Key dates ───────────────────────────────────────────────────────────────

/// Milestones of the cycle that began on a given date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDates {
  pub cycle_start:   NaiveDate,
  pub next_period:   NaiveDate,
  pub ovulation:     NaiveDate,
  pub pms_start:     NaiveDate,
  pub fertile_start: NaiveDate,
  pub fertile_end:   NaiveDate,
}

impl KeyDates {
  pub fn for_cycle(cycle_start: NaiveDate, cycle_length: u32) -> Self {
    let cycle = i64::from(cycle_length);
    let ovulation = ovulation_date_in(cycle_start, cycle_length);
    Self {
      cycle_start,
      next_period: cycle_start + Duration::days(cycle),
      ovulation,
      pms_start: cycle_start + Duration::days(cycle - PMS_DAYS),
      fertile_start: ovulation - Duration::days(FERTILE_DAYS_BEFORE_OVULATION),
      fertile_end: ovulation + Duration::days(FERTILE_DAYS_AFTER_OVULATION),
    }
  }
}
