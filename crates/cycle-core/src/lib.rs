//! Cycle-phase engine and data model for SyncCycle.
//!
//! This crate is free of HTTP, storage and async dependencies.
//! Every operation is a pure function of its arguments: callers resolve the
//! cycle model and log entries from wherever they keep them and hand them in.

pub mod calendar;
pub mod entry;
pub mod error;
pub mod insights;
pub mod model;
pub mod phase;
pub mod predict;

pub use error::{Error, Result};
pub use model::{CycleModel, MAX_CYCLE_LENGTH, SUPPORTED_YEARS, validate_date};
pub use phase::{Phase, PhaseResult, calculate_cycle_phase, phase_color};
pub use predict::{
  DEFAULT_PREDICTION_COUNT, MAX_PREDICTION_COUNT, predicted_periods,
};
