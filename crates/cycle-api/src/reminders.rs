//! Handler for `POST /reminders`.
//!
//! Returns the reminder plan only; storing and delivering it is the caller's
//! job.

use axum::{Json, extract::rejection::JsonRejection};
use chrono::NaiveDateTime;
use cycle_core::CycleModel;
use cycle_reminders::{Preferences, ScheduledReminder, plan_all};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct RemindersBody {
  pub user_id:     String,
  pub model:       CycleModel,
  /// Missing fields take their defaults.
  #[serde(default)]
  pub preferences: Preferences,
  /// Defaults to the server's local time.
  pub now:         Option<NaiveDateTime>,
}

/// `POST /reminders`
pub async fn handler(
  body: Result<Json<RemindersBody>, JsonRejection>,
) -> Result<Json<Vec<ScheduledReminder>>, ApiError> {
  let Json(body) = body?;
  if body.user_id.trim().is_empty() {
    return Err(ApiError::BadRequest("user_id must not be empty".into()));
  }
  body.model.validate()?;

  let now = body
    .now
    .unwrap_or_else(|| chrono::Local::now().naive_local());
  let plan = plan_all(&body.user_id, &body.model, &body.preferences, now);
  tracing::debug!(user_id = %body.user_id, count = plan.len(), "planned reminders");
  Ok(Json(plan))
}
