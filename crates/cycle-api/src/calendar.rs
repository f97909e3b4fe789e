//! Handler for `POST /calendar`.

use axum::{Json, extract::rejection::JsonRejection};
use chrono::NaiveDate;
use cycle_core::{
  CycleModel,
  calendar::CalendarMonth,
  entry::{LogEntry, validate_entries},
};
use serde::Deserialize;

use crate::{error::ApiError, local_today};

#[derive(Debug, Deserialize)]
pub struct CalendarBody {
  pub model:   CycleModel,
  #[serde(default)]
  pub entries: Vec<LogEntry>,
  pub year:    i32,
  pub month:   u32,
  /// Highlighted as today; defaults to the server's local date.
  pub today:   Option<NaiveDate>,
}

/// `POST /calendar`: the 42-cell grid for `year`-`month`.
pub async fn handler(
  body: Result<Json<CalendarBody>, JsonRejection>,
) -> Result<Json<CalendarMonth>, ApiError> {
  let Json(body) = body?;
  body.model.validate()?;
  validate_entries(&body.entries)?;

  let model = body.model.roll_forward(&body.entries);
  let today = body.today.unwrap_or_else(local_today);
  let month = CalendarMonth::build(
    body.year,
    body.month,
    &model,
    &body.entries,
    today,
  )?;
  Ok(Json(month))
}
