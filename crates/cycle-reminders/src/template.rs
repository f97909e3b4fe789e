//! The fixed reminder templates and `{{variable}}` rendering.

use crate::kind::{ActionKind, Channel, Priority, ReminderKind};

/// An action button as declared by a template; ids are assigned when a
/// reminder is planned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionTemplate {
  pub label:  &'static str,
  pub action: ActionKind,
  pub url:    Option<&'static str>,
}

/// Title, message and delivery defaults for one [`ReminderKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
  pub kind:      ReminderKind,
  pub title:     &'static str,
  /// May contain `{{name}}` placeholders listed in `variables`.
  pub message:   &'static str,
  pub actions:   &'static [ActionTemplate],
  pub priority:  Priority,
  pub channels:  &'static [Channel],
  pub variables: &'static [&'static str],
}

const fn action(label: &'static str, action: ActionKind) -> ActionTemplate {
  ActionTemplate {
    label,
    action,
    url: None,
  }
}

const PUSH_IN_APP: &[Channel] = &[Channel::Push, Channel::InApp];
const IN_APP: &[Channel] = &[Channel::InApp];

static PERIOD_PREDICTION: Template = Template {
  kind:      ReminderKind::PeriodPrediction,
  title:     "Period Prediction",
  message:   "Your period is predicted to start in {{daysUntilPeriod}} days. \
              Consider logging any early symptoms.",
  actions:   &[
    action("Log Entry", ActionKind::LogEntry),
    action("Snooze", ActionKind::Snooze),
    action("Dismiss", ActionKind::Dismiss),
  ],
  priority:  Priority::Medium,
  channels:  PUSH_IN_APP,
  variables: &["daysUntilPeriod"],
};

static SYMPTOM_REMINDER: Template = Template {
  kind:      ReminderKind::SymptomReminder,
  title:     "Symptom Check-in",
  message:   "How are you feeling today? Log your symptoms to track patterns.",
  actions:   &[
    action("Log Symptoms", ActionKind::LogSymptoms),
    action("Skip Today", ActionKind::Dismiss),
    action("Remind Later", ActionKind::Snooze),
  ],
  priority:  Priority::Low,
  channels:  PUSH_IN_APP,
  variables: &[],
};

static FERTILITY_ALERT: Template = Template {
  kind:      ReminderKind::FertilityAlert,
  title:     "Fertility Window",
  message:   "Your fertile window is approaching. Track ovulation signs for \
              better predictions.",
  actions:   &[
    action("Track Ovulation", ActionKind::TrackOvulation),
    action("Dismiss", ActionKind::Dismiss),
    action("Remind Later", ActionKind::Snooze),
  ],
  priority:  Priority::High,
  channels:  PUSH_IN_APP,
  // The countdown is recorded in metadata; the message has no placeholder.
  variables: &[],
};

static HEALTH_CHECKIN: Template = Template {
  kind:      ReminderKind::HealthCheckin,
  title:     "Health Check-in",
  message:   "Take a moment to check in on your overall wellness.",
  actions:   &[
    action("Complete Check-in", ActionKind::CompleteCheckin),
    action("Skip", ActionKind::Dismiss),
    action("Remind Later", ActionKind::Snooze),
  ],
  priority:  Priority::Low,
  channels:  PUSH_IN_APP,
  variables: &[],
};

static MEDICATION_REMINDER: Template = Template {
  kind:      ReminderKind::MedicationReminder,
  title:     "Medication Reminder",
  message:   "Time to take {{medicationName}}. Don't forget to log any side \
              effects.",
  actions:   &[
    action("Taken", ActionKind::LogEntry),
    action("Skip", ActionKind::Dismiss),
    action("Remind Later", ActionKind::Snooze),
  ],
  priority:  Priority::High,
  channels:  PUSH_IN_APP,
  variables: &["medicationName"],
};

static CYCLE_INSIGHT: Template = Template {
  kind:      ReminderKind::CycleInsight,
  title:     "Cycle Insight",
  message:   "{{insightMessage}}",
  actions:   &[
    ActionTemplate {
      label:  "View Details",
      action: ActionKind::Custom,
      url:    Some("/insights"),
    },
    action("Dismiss", ActionKind::Dismiss),
  ],
  priority:  Priority::Low,
  channels:  IN_APP,
  variables: &["insightMessage"],
};

static WELLNESS_TIP: Template = Template {
  kind:      ReminderKind::WellnessTip,
  title:     "Wellness Tip",
  message:   "{{tipMessage}}",
  actions:   &[
    action("Save Tip", ActionKind::Custom),
    action("Dismiss", ActionKind::Dismiss),
  ],
  priority:  Priority::Low,
  channels:  IN_APP,
  variables: &["tipMessage"],
};

static APPOINTMENT_REMINDER: Template = Template {
  kind:      ReminderKind::AppointmentReminder,
  title:     "Appointment Reminder",
  message:   "You have a {{appointmentType}} appointment in \
              {{timeUntilAppointment}}.",
  actions:   &[
    action("View Details", ActionKind::Custom),
    action("Dismiss", ActionKind::Dismiss),
    action("Reschedule", ActionKind::Custom),
  ],
  priority:  Priority::High,
  channels:  &[Channel::Push, Channel::Email, Channel::InApp],
  variables: &["appointmentType", "timeUntilAppointment"],
};

/// The template for `kind`.
pub fn template(kind: ReminderKind) -> &'static Template {
  match kind {
    ReminderKind::PeriodPrediction => &PERIOD_PREDICTION,
    ReminderKind::SymptomReminder => &SYMPTOM_REMINDER,
    ReminderKind::FertilityAlert => &FERTILITY_ALERT,
    ReminderKind::HealthCheckin => &HEALTH_CHECKIN,
    ReminderKind::MedicationReminder => &MEDICATION_REMINDER,
    ReminderKind::CycleInsight => &CYCLE_INSIGHT,
    ReminderKind::WellnessTip => &WELLNESS_TIP,
    ReminderKind::AppointmentReminder => &APPOINTMENT_REMINDER,
  }
}

/// Substitute every `{{name}}` occurrence for each `(name, value)` pair.
/// Placeholders without a matching pair are left untouched.
pub fn render(text: &str, vars: &[(&str, String)]) -> String {
  vars.iter().fold(text.to_owned(), |acc, (name, value)| {
    acc.replace(&format!("{{{{{name}}}}}"), value)
  })
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator;

  use super::*;

  #[test]
  fn every_kind_has_its_own_template() {
    for kind in ReminderKind::iter() {
      assert_eq!(template(kind).kind, kind);
      assert!(!template(kind).actions.is_empty());
    }
  }

  #[test]
  fn declared_variables_appear_in_message() {
    for kind in ReminderKind::iter() {
      let t = template(kind);
      for var in t.variables {
        assert!(
          t.message.contains(&format!("{{{{{var}}}}}")),
          "{kind}: {var} missing from message"
        );
      }
    }
  }

  #[test]
  fn placeholders_are_all_declared() {
    for kind in ReminderKind::iter() {
      let t = template(kind);
      let placeholders = t.message.matches("{{").count();
      assert_eq!(placeholders, t.variables.len(), "{kind}");
    }
  }

  #[test]
  fn render_replaces_all_occurrences() {
    let out = render("{{a}} and {{a}} but {{b}}", &[("a", "x".into())]);
    assert_eq!(out, "x and x but {{b}}");
  }

  #[test]
  fn render_period_prediction_message() {
    let out = render(PERIOD_PREDICTION.message, &[(
      "daysUntilPeriod",
      "6".into(),
    )]);
    assert_eq!(
      out,
      "Your period is predicted to start in 6 days. Consider logging any \
       early symptoms."
    );
  }
}
