//! Handler for `POST /predictions`.

use axum::{Json, extract::rejection::JsonRejection};
use chrono::NaiveDate;
use cycle_core::{
  CycleModel, DEFAULT_PREDICTION_COUNT, predict::validate_prediction_count,
};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct PredictionsBody {
  pub model: CycleModel,
  /// Number of upcoming periods; defaults to [`DEFAULT_PREDICTION_COUNT`].
  #[serde(default = "default_count")]
  pub count: usize,
}

fn default_count() -> usize { DEFAULT_PREDICTION_COUNT }

/// `POST /predictions` with body `{"model": {...}, "count": 3}`
pub async fn handler(
  body: Result<Json<PredictionsBody>, JsonRejection>,
) -> Result<Json<Vec<NaiveDate>>, ApiError> {
  let Json(body) = body?;
  body.model.validate()?;
  validate_prediction_count(body.count)?;

  Ok(Json(body.model.predicted_periods(body.count)))
}
