//! JSON HTTP API for SyncCycle.
//!
//! Exposes an axum [`Router`] over the pure engines in `cycle-core` and
//! `cycle-reminders`. Every request carries the cycle model it should be
//! evaluated against, so the router holds no state. Auth, TLS and storage are
//! the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", cycle_api::api_router())
//! ```

pub mod calendar;
pub mod error;
pub mod insights;
pub mod phase;
pub mod predictions;
pub mod reminders;

use axum::{
  Router,
  routing::{get, post},
};
use chrono::NaiveDate;

pub use error::ApiError;

/// Build the API router.
pub fn api_router() -> Router<()> {
  Router::new()
    // Phase
    .route("/phase", get(phase::handler))
    .route("/phase/{phase}/color", get(phase::color))
    // Model-driven views
    .route("/predictions", post(predictions::handler))
    .route("/calendar", post(calendar::handler))
    .route("/insights", post(insights::handler))
    // Reminders
    .route("/reminders", post(reminders::handler))
}

/// The server's local calendar date, used when a request omits `today`.
pub(crate) fn local_today() -> NaiveDate { chrono::Local::now().date_naive() }
