//! Reminder schedules derived from the cycle model.

use chrono::{Days, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use cycle_core::{
  CycleModel, DEFAULT_PREDICTION_COUNT, predict::ovulation_date_for,
  predicted_periods,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::{
  kind::{ActionKind, Channel, Priority, ReminderKind, RepeatInterval},
  preferences::{
    DEFAULT_FERTILITY_ADVANCE_NOTICE, DEFAULT_PERIOD_ADVANCE_NOTICE,
    Preferences, SymptomFrequency,
  },
  template::{Template, render, template},
};

/// Hour of the day at which the daily symptom check-in fires.
pub const SYMPTOM_REMINDER_HOUR: i64 = 9;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// An action button on a planned reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderAction {
  /// `<action>_<index>`, unique within the reminder.
  pub id:     String,
  pub label:  String,
  pub action: ActionKind,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub url:    Option<String>,
}

/// A reminder record, ready to be handed to a delivery service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledReminder {
  /// Deterministic: planning twice yields the same ids.
  pub id:              String,
  pub user_id:         String,
  pub kind:            ReminderKind,
  pub title:           String,
  pub message:         String,
  pub priority:        Priority,
  pub scheduled_for:   NaiveDateTime,
  pub repeat_interval: RepeatInterval,
  /// `None` repeats without end.
  pub repeat_count:    Option<u32>,
  pub actions:         Vec<ReminderAction>,
  pub channels:        Vec<Channel>,
  pub metadata:        Map<String, Value>,
}

impl ScheduledReminder {
  /// Start a one-shot reminder from `template`, keeping only the channels the
  /// user has enabled. Returns `None` when no channel remains.
  fn from_template(
    template: &Template,
    id: String,
    user_id: &str,
    message: String,
    scheduled_for: NaiveDateTime,
    prefs: &Preferences,
  ) -> Option<Self> {
    let channels: Vec<_> = template
      .channels
      .iter()
      .copied()
      .filter(|c| prefs.channels.allows(*c))
      .collect();
    if channels.is_empty() {
      return None;
    }

    let actions = template
      .actions
      .iter()
      .enumerate()
      .map(|(index, a)| ReminderAction {
        id:     format!("{}_{index}", a.action),
        label:  a.label.to_owned(),
        action: a.action,
        url:    a.url.map(str::to_owned),
      })
      .collect();

    Some(Self {
      id,
      user_id: user_id.to_owned(),
      kind: template.kind,
      title: template.title.to_owned(),
      message,
      priority: template.priority,
      scheduled_for,
      repeat_interval: RepeatInterval::None,
      repeat_count: Some(0),
      actions,
      channels,
      metadata: Map::new(),
    })
  }
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
  date.and_time(NaiveTime::default())
}

/// Whole days from `now` until `target`, rounded up.
fn days_until(target: NaiveDateTime, now: NaiveDateTime) -> i64 {
  let millis = (target - now).num_milliseconds();
  -(-millis).div_euclid(MILLIS_PER_DAY)
}

fn or_default(days: u32, default: u32) -> Days {
  Days::new(u64::from(if days == 0 { default } else { days }))
}

// ─── Planners ────────────────────────────────────────────────────────────────

/// One reminder `period_advance_notice` days before each predicted period,
/// skipping any whose reminder time is not after `now`.
pub fn plan_period_predictions(
  user_id: &str,
  model: &CycleModel,
  prefs: &Preferences,
  now: NaiveDateTime,
) -> Vec<ScheduledReminder> {
  if !prefs.wants(ReminderKind::PeriodPrediction) {
    return Vec::new();
  }
  let advance = or_default(
    prefs.timing.period_advance_notice,
    DEFAULT_PERIOD_ADVANCE_NOTICE,
  );
  let template = template(ReminderKind::PeriodPrediction);

  predicted_periods(model, DEFAULT_PREDICTION_COUNT)
    .into_iter()
    .filter_map(|period| {
      let period_at = midnight(period);
      let notify_at = period_at.checked_sub_days(advance)?;
      if notify_at <= now {
        return None;
      }
      let days = days_until(period_at, now);
      let message =
        render(template.message, &[("daysUntilPeriod", days.to_string())]);

      let mut reminder = ScheduledReminder::from_template(
        template,
        format!("{}_{period}", ReminderKind::PeriodPrediction),
        user_id,
        message,
        notify_at,
        prefs,
      )?;
      reminder
        .metadata
        .insert("predicted_period_date".into(), json!(period));
      reminder
        .metadata
        .insert("days_until_period".into(), json!(days));
      Some(reminder)
    })
    .collect()
}

/// One reminder `fertility_advance_notice` days before each predicted
/// ovulation, skipping any whose reminder time is not after `now`.
pub fn plan_fertility_alerts(
  user_id: &str,
  model: &CycleModel,
  prefs: &Preferences,
  now: NaiveDateTime,
) -> Vec<ScheduledReminder> {
  if !prefs.wants(ReminderKind::FertilityAlert) {
    return Vec::new();
  }
  let advance = or_default(
    prefs.timing.fertility_advance_notice,
    DEFAULT_FERTILITY_ADVANCE_NOTICE,
  );
  let template = template(ReminderKind::FertilityAlert);

  predicted_periods(model, DEFAULT_PREDICTION_COUNT)
    .into_iter()
    .map(ovulation_date_for)
    .filter_map(|ovulation| {
      let ovulation_at = midnight(ovulation);
      let notify_at = ovulation_at.checked_sub_days(advance)?;
      if notify_at <= now {
        return None;
      }
      let days = days_until(ovulation_at, now);

      let mut reminder = ScheduledReminder::from_template(
        template,
        format!("{}_{ovulation}", ReminderKind::FertilityAlert),
        user_id,
        template.message.to_owned(),
        notify_at,
        prefs,
      )?;
      reminder
        .metadata
        .insert("ovulation_date".into(), json!(ovulation));
      reminder
        .metadata
        .insert("days_until_ovulation".into(), json!(days));
      Some(reminder)
    })
    .collect()
}

/// A repeating check-in starting tomorrow at [`SYMPTOM_REMINDER_HOUR`].
pub fn plan_symptom_reminder(
  user_id: &str,
  prefs: &Preferences,
  now: NaiveDateTime,
) -> Option<ScheduledReminder> {
  if !prefs.wants(ReminderKind::SymptomReminder) {
    return None;
  }
  let template = template(ReminderKind::SymptomReminder);
  let tomorrow = now.date().succ_opt()?;
  let scheduled_for =
    midnight(tomorrow) + Duration::hours(SYMPTOM_REMINDER_HOUR);

  let mut reminder = ScheduledReminder::from_template(
    template,
    format!("{}_daily", ReminderKind::SymptomReminder),
    user_id,
    template.message.to_owned(),
    scheduled_for,
    prefs,
  )?;
  reminder.repeat_interval = match prefs.timing.symptom_reminder_frequency {
    SymptomFrequency::Weekly => RepeatInterval::Weekly,
    SymptomFrequency::Daily | SymptomFrequency::Custom => RepeatInterval::Daily,
  };
  reminder.repeat_count = None;
  Some(reminder)
}

/// Every reminder the preferences ask for, in planning order: period
/// predictions, fertility alerts, then the symptom check-in.
pub fn plan_all(
  user_id: &str,
  model: &CycleModel,
  prefs: &Preferences,
  now: NaiveDateTime,
) -> Vec<ScheduledReminder> {
  let mut plan = plan_period_predictions(user_id, model, prefs, now);
  plan.extend(plan_fertility_alerts(user_id, model, prefs, now));
  plan.extend(plan_symptom_reminder(user_id, prefs, now));
  plan
}

#[cfg(test)]
mod tests {
  use cycle_core::calculate_cycle_phase;

  use super::*;
  use crate::preferences::ChannelToggles;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, 0, 0).unwrap()
  }

  #[test]
  fn period_predictions_before_first_period() {
    let plan = plan_period_predictions(
      "u1",
      &CycleModel::default(),
      &Preferences::default(),
      at(2025, 6, 20, 12),
    );
    let ids: Vec<_> = plan.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, [
      "period_prediction_2025-07-09",
      "period_prediction_2025-08-06",
      "period_prediction_2025-09-03",
    ]);

    let first = &plan[0];
    assert_eq!(first.scheduled_for, at(2025, 7, 6, 0));
    assert_eq!(first.user_id, "u1");
    assert_eq!(first.priority, Priority::Medium);
    // 18.5 days away rounds up to 19.
    assert!(first.message.contains("in 19 days"), "{}", first.message);
    assert_eq!(first.metadata["days_until_period"], 19);
    assert_eq!(first.metadata["predicted_period_date"], "2025-07-09");
    assert_eq!(first.actions[0].id, "log_entry_0");
    assert_eq!(first.actions[2].id, "dismiss_2");
    assert_eq!(first.channels, [Channel::Push, Channel::InApp]);
  }

  #[test]
  fn past_reminder_times_are_skipped() {
    // 6 July midnight is the first reminder; at noon it has passed.
    let plan = plan_period_predictions(
      "u1",
      &CycleModel::default(),
      &Preferences::default(),
      at(2025, 7, 6, 12),
    );
    assert_eq!(plan.len(), 2);
    assert_eq!(plan[0].id, "period_prediction_2025-08-06");
  }

  #[test]
  fn zero_advance_notice_uses_default() {
    let mut prefs = Preferences::default();
    prefs.timing.period_advance_notice = 0;
    let plan = plan_period_predictions(
      "u1",
      &CycleModel::default(),
      &prefs,
      at(2025, 6, 20, 12),
    );
    assert_eq!(plan[0].scheduled_for, at(2025, 7, 6, 0));
  }

  #[test]
  fn fertility_alerts_target_engine_ovulation_day() {
    let model = CycleModel::default();
    let plan = plan_fertility_alerts(
      "u1",
      &model,
      &Preferences::default(),
      at(2025, 6, 22, 12),
    );
    // The alert for the current cycle's ovulation (24 June) fired at midnight.
    assert_eq!(plan.len(), 2);
    assert_eq!(plan[0].id, "fertility_alert_2025-07-22");
    assert_eq!(plan[0].scheduled_for, at(2025, 7, 20, 0));
    assert_eq!(plan[0].priority, Priority::High);
    assert_eq!(plan[0].message, template(ReminderKind::FertilityAlert).message);
    assert_eq!(plan[0].metadata["days_until_ovulation"], 30);

    let ovulation = date(2025, 7, 22);
    let r = calculate_cycle_phase(
      ovulation,
      date(2025, 7, 9),
      model.cycle_length,
      model.period_length,
    );
    assert!(r.is_ovulation);
  }

  #[test]
  fn symptom_reminder_repeats_from_tomorrow_morning() {
    let mut prefs = Preferences::default();
    let r = plan_symptom_reminder("u1", &prefs, at(2025, 6, 20, 21)).unwrap();
    assert_eq!(r.id, "symptom_reminder_daily");
    assert_eq!(r.scheduled_for, at(2025, 6, 21, 9));
    assert_eq!(r.repeat_interval, RepeatInterval::Daily);
    assert_eq!(r.repeat_count, None);

    prefs.timing.symptom_reminder_frequency = SymptomFrequency::Weekly;
    let r = plan_symptom_reminder("u1", &prefs, at(2025, 6, 20, 21)).unwrap();
    assert_eq!(r.repeat_interval, RepeatInterval::Weekly);
  }

  #[test]
  fn disabled_channels_drop_reminders() {
    let prefs = Preferences {
      channels: ChannelToggles {
        push:   false,
        email:  true,
        sms:    false,
        in_app: false,
      },
      ..Preferences::default()
    };
    let plan =
      plan_all("u1", &CycleModel::default(), &prefs, at(2025, 6, 20, 12));
    assert!(plan.is_empty());
  }

  #[test]
  fn plan_all_honours_toggles() {
    let mut prefs = Preferences::default();
    let model = CycleModel::default();
    let now = at(2025, 6, 20, 12);
    assert_eq!(plan_all("u1", &model, &prefs, now).len(), 3 + 3 + 1);

    prefs.kinds.fertility_alerts = false;
    let plan = plan_all("u1", &model, &prefs, now);
    assert!(plan.iter().all(|r| r.kind != ReminderKind::FertilityAlert));
    assert_eq!(plan.len(), 4);

    prefs.enabled = false;
    assert!(plan_all("u1", &model, &prefs, now).is_empty());
  }

  #[test]
  fn planning_is_deterministic() {
    let model = CycleModel::default();
    let prefs = Preferences::default();
    let now = at(2025, 6, 20, 12);
    assert_eq!(
      plan_all("u1", &model, &prefs, now),
      plan_all("u1", &model, &prefs, now)
    );
  }

  #[test]
  fn oversized_advance_notice_plans_nothing_instead_of_overflowing() {
    let mut prefs = Preferences::default();
    prefs.timing.period_advance_notice = u32::MAX;
    prefs.timing.fertility_advance_notice = u32::MAX;
    let model = CycleModel {
      last_period_start: date(-262_000, 1, 1),
      ..CycleModel::default()
    };
    let now = NaiveDate::MIN.and_hms_opt(0, 0, 0).unwrap();
    assert!(plan_period_predictions("u1", &model, &prefs, now).is_empty());
    assert!(plan_fertility_alerts("u1", &model, &prefs, now).is_empty());
  }

  #[test]
  fn symptom_reminder_on_last_representable_day_is_skipped() {
    let now = NaiveDate::MAX.and_hms_opt(12, 0, 0).unwrap();
    let prefs = Preferences::default();
    assert!(plan_symptom_reminder("u1", &prefs, now).is_none());
  }

  #[test]
  fn days_until_rounds_up() {
    assert_eq!(days_until(at(2025, 6, 21, 0), at(2025, 6, 20, 0)), 1);
    assert_eq!(days_until(at(2025, 6, 21, 0), at(2025, 6, 20, 1)), 1);
    assert_eq!(days_until(at(2025, 6, 21, 0), at(2025, 6, 19, 23)), 2);
    assert_eq!(days_until(at(2025, 6, 20, 0), at(2025, 6, 20, 6)), 0);
  }
}
