//! Reminder planning for SyncCycle.
//!
//! Turns a cycle model and a user's notification preferences into the list of
//! reminder records a delivery service would store. Nothing here sends,
//! stores, or acknowledges a reminder; every function is a pure computation
//! over its inputs and an explicit `now`.

pub mod kind;
pub mod plan;
pub mod preferences;
pub mod template;

pub use kind::{ActionKind, Channel, Priority, ReminderKind, RepeatInterval};
pub use plan::{
  ReminderAction, ScheduledReminder, plan_all, plan_fertility_alerts,
  plan_period_predictions, plan_symptom_reminder,
};
pub use preferences::Preferences;
pub use template::{Template, render, template};
