//! The figures behind the insights panel.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  entry::{LogEntry, latest_cycle_start},
  model::CycleModel,
  phase::Phase,
  predict::{KeyDates, predicted_periods},
};

/// How many symptoms the panel lists.
pub const TOP_SYMPTOM_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomCount {
  pub symptom: String,
  pub count:   usize,
}

/// Current-cycle summary for one user on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insights {
  pub current_phase:          Phase,
  pub day_of_cycle:           u32,
  /// Negative when the model's next predicted period is already past.
  pub days_until_next_period: i64,
  /// Percentage of the cycle elapsed before today, `0.0..100.0`.
  pub cycle_progress:         f64,
  pub top_symptoms:           Vec<SymptomCount>,
  pub total_entries:          usize,
  pub key_dates:              KeyDates,
}

impl Insights {
  pub fn compute(
    model: &CycleModel,
    entries: &[LogEntry],
    today: NaiveDate,
  ) -> Self {
    let current = model.phase_on(today);

    let days_until_next_period = predicted_periods(model, 1)
      .first()
      .map(|next| (*next - today).num_days())
      .unwrap_or_default();

    let cycle_progress = if model.cycle_length == 0 {
      0.0
    } else {
      f64::from(current.day_of_cycle.saturating_sub(1))
        / f64::from(model.cycle_length)
        * 100.0
    };

    let anchor =
      latest_cycle_start(entries).unwrap_or(model.last_period_start);

    Self {
      current_phase: current.phase,
      day_of_cycle: current.day_of_cycle,
      days_until_next_period,
      cycle_progress,
      top_symptoms: top_symptoms(entries, TOP_SYMPTOM_COUNT),
      total_entries: entries.len(),
      key_dates: KeyDates::for_cycle(anchor, model.cycle_length),
    }
  }
}

/// The `limit` most frequently logged symptoms, most frequent first. Ties are
/// broken alphabetically.
pub fn top_symptoms(entries: &[LogEntry], limit: usize) -> Vec<SymptomCount> {
  let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
  for symptom in entries.iter().flat_map(|e| &e.symptoms) {
    *counts.entry(symptom.as_str()).or_default() += 1;
  }

  let mut ranked: Vec<_> = counts.into_iter().collect();
  // Stable sort keeps the alphabetical order of the map within a count.
  ranked.sort_by(|a, b| b.1.cmp(&a.1));
  ranked
    .into_iter()
    .take(limit)
    .map(|(symptom, count)| SymptomCount {
      symptom: symptom.to_owned(),
      count,
    })
    .collect()
}
