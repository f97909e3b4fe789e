//! Month calendar grid.
//!
//! A month is shown as six Sunday-first weeks, so the grid always holds 42
//! cells and usually spills into the neighbouring months. Only years in
//! [`SUPPORTED_YEARS`] can be shown.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  entry::{LogEntry, entry_on},
  model::{CycleModel, SUPPORTED_YEARS},
  phase::PhaseResult,
};

pub const GRID_DAYS: usize = 42;

/// One cell of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
  pub date:             NaiveDate,
  pub info:             PhaseResult,
  /// The entry logged for this date, if any.
  pub entry:            Option<LogEntry>,
  pub is_current_month: bool,
  pub is_today:         bool,
}

impl CalendarDay {
  /// Display token: logged flow wins over the predicted phase.
  pub fn color(&self) -> &'static str {
    match &self.entry {
      Some(entry) => entry.flow.color(),
      None => self.info.phase.color(),
    }
  }
}

/// A month's worth of classified days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarMonth {
  pub year:  i32,
  pub month: u32,
  /// e.g. `June 2025`.
  pub title: String,
  pub days:  Vec<CalendarDay>,
}

impl CalendarMonth {
  pub fn build(
    year: i32,
    month: u32,
    model: &CycleModel,
    entries: &[LogEntry],
    today: NaiveDate,
  ) -> Result<Self> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
      .filter(|_| SUPPORTED_YEARS.contains(&year))
      .ok_or(Error::InvalidMonth { year, month })?;
    let lead = first.weekday().num_days_from_sunday();
    let grid_start = first - Duration::days(i64::from(lead));

    let days = grid_start
      .iter_days()
      .take(GRID_DAYS)
      .map(|date| CalendarDay {
        date,
        info: model.phase_on(date),
        entry: entry_on(entries, date).cloned(),
        is_current_month: date.year() == year && date.month() == month,
        is_today: date == today,
      })
      .collect();

    Ok(Self {
      year,
      month,
      title: first.format("%B %Y").to_string(),
      days,
    })
  }

  /// The grid split into its six weeks.
  pub fn weeks(&self) -> impl Iterator<Item = &[CalendarDay]> {
    self.days.chunks(7)
  }

  /// `(year, month)` of the following month.
  pub fn next(&self) -> (i32, u32) { next_month(self.year, self.month) }

  /// `(year, month)` of the preceding month.
  pub fn previous(&self) -> (i32, u32) { previous_month(self.year, self.month) }
}

pub fn next_month(year: i32, month: u32) -> (i32, u32) {
  if month >= 12 { (year + 1, 1) } else { (year, month + 1) }
}

pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
  if month <= 1 { (year - 1, 12) } else { (year, month - 1) }
}

#[cfg(test)]
mod tests {
  use chrono::Weekday;

  use super::*;
  use crate::{entry::Flow, phase::Phase};

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn grid_starts_on_the_first_when_it_is_a_sunday() {
    // 1 June 2025 is itself a Sunday.
    let cal = CalendarMonth::build(
      2025,
      6,
      &CycleModel::default(),
      &[],
      date(2025, 6, 20),
    )
    .unwrap();
    assert_eq!(cal.title, "June 2025");
    assert_eq!(cal.days.len(), GRID_DAYS);
    assert_eq!(cal.days[0].date, date(2025, 6, 1));
    assert_eq!(cal.days[41].date, date(2025, 7, 12));
    assert_eq!(cal.days[0].date.weekday(), Weekday::Sun);
  }

  #[test]
  fn july_2025_grid_spills_into_june() {
    let cal = CalendarMonth::build(
      2025,
      7,
      &CycleModel::default(),
      &[],
      date(2025, 7, 9),
    )
    .unwrap();
    assert_eq!(cal.days[0].date, date(2025, 6, 29));
    assert_eq!(cal.days[0].date.weekday(), Weekday::Sun);
    assert!(!cal.days[0].is_current_month);
    assert!(cal.days[2].is_current_month);
    assert_eq!(cal.days.iter().filter(|d| d.is_current_month).count(), 31);
    assert_eq!(cal.weeks().count(), 6);

    let today: Vec<_> = cal.days.iter().filter(|d| d.is_today).collect();
    assert_eq!(today.len(), 1);
    assert_eq!(today[0].info.phase, Phase::Period);
    assert_eq!(today[0].info.day_of_cycle, 1);
  }

  #[test]
  fn logged_entries_attach_to_their_cell() {
    let mut entry = LogEntry::new(date(2025, 6, 12), Flow::Heavy);
    entry.symptoms = vec!["cramps".into()];
    let cal = CalendarMonth::build(
      2025,
      6,
      &CycleModel::default(),
      &[entry.clone()],
      date(2025, 6, 1),
    )
    .unwrap();

    let cell = cal.days.iter().find(|d| d.date == entry.date).unwrap();
    assert_eq!(cell.entry.as_ref(), Some(&entry));
    assert_eq!(cell.color(), Flow::Heavy.color());

    let other = cal.days.iter().find(|d| d.date == date(2025, 6, 25)).unwrap();
    assert!(other.entry.is_none());
    assert_eq!(other.color(), Phase::Ovulation.color());
  }

  #[test]
  fn invalid_month_is_rejected() {
    let err = CalendarMonth::build(
      2025,
      13,
      &CycleModel::default(),
      &[],
      date(2025, 1, 1),
    )
    .unwrap_err();
    assert_eq!(err, Error::InvalidMonth { year: 2025, month: 13 });
  }

  #[test]
  fn years_outside_supported_range_are_rejected() {
    let model = CycleModel::default();
    let build =
      |year| CalendarMonth::build(year, 12, &model, &[], date(2025, 1, 1));
    assert_eq!(
      build(262_143).unwrap_err(),
      Error::InvalidMonth { year: 262_143, month: 12 }
    );
    assert!(build(0).is_err());
    assert_eq!(build(9999).unwrap().days.len(), GRID_DAYS);
  }

  #[test]
  fn month_navigation_wraps_years() {
    assert_eq!(next_month(2025, 12), (2026, 1));
    assert_eq!(previous_month(2025, 1), (2024, 12));
    assert_eq!(next_month(2025, 6), (2025, 7));
  }
}
