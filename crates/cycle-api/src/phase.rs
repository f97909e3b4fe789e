//! Handlers for `/phase` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/phase` | `?date&last_period_start&cycle_length&period_length` |
//! | `GET`  | `/phase/{phase}/color` | 404 for an unknown phase name |

use axum::{
  Json,
  extract::{Path, Query, rejection::QueryRejection},
};
use chrono::NaiveDate;
use cycle_core::{CycleModel, Phase, PhaseResult, calculate_cycle_phase};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// ─── Classify ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PhaseParams {
  pub date:              NaiveDate,
  pub last_period_start: NaiveDate,
  pub cycle_length:      u32,
  pub period_length:     u32,
}

/// `GET /phase?date=...&last_period_start=...&cycle_length=...&period_length=...`
pub async fn handler(
  params: Result<Query<PhaseParams>, QueryRejection>,
) -> Result<Json<PhaseResult>, ApiError> {
  let Query(p) = params?;

  CycleModel {
    cycle_length:         p.cycle_length,
    period_length:        p.period_length,
    last_period_start:    p.last_period_start,
    average_cycle_length: p.cycle_length,
  }
  .validate()?;

  Ok(Json(calculate_cycle_phase(
    p.date,
    p.last_period_start,
    p.cycle_length,
    p.period_length,
  )))
}

// ─── Color ────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PhaseColor {
  pub phase: Phase,
  pub name:  &'static str,
  pub token: &'static str,
}

/// `GET /phase/{phase}/color`
pub async fn color(Path(raw): Path<String>) -> Result<Json<PhaseColor>, ApiError> {
  let phase: Phase = raw
    .parse()
    .map_err(|_| ApiError::NotFound(format!("unknown phase {raw:?}")))?;
  Ok(Json(PhaseColor {
    phase,
    name: phase.display_name(),
    token: phase.color(),
  }))
}
