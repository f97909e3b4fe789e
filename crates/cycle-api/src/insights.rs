//! Handler for `POST /insights`.

use axum::{Json, extract::rejection::JsonRejection};
use chrono::NaiveDate;
use cycle_core::{
  CycleModel,
  entry::{LogEntry, validate_entries},
  insights::Insights,
};
use serde::Deserialize;

use crate::{error::ApiError, local_today};

#[derive(Debug, Deserialize)]
pub struct InsightsBody {
  pub model:   CycleModel,
  #[serde(default)]
  pub entries: Vec<LogEntry>,
  pub today:   Option<NaiveDate>,
}

/// `POST /insights`
pub async fn handler(
  body: Result<Json<InsightsBody>, JsonRejection>,
) -> Result<Json<Insights>, ApiError> {
  let Json(body) = body?;
  body.model.validate()?;
  validate_entries(&body.entries)?;

  let model = body.model.roll_forward(&body.entries);
  let today = body.today.unwrap_or_else(local_today);
  Ok(Json(Insights::compute(&model, &body.entries, today)))
}
