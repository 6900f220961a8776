mod admin;
mod user;

pub use admin::Admin;
pub use user::User;

use crate::models::{RatingSummary, RatingTarget};
use crate::services::rating::RateOutcome;
use serde::Serialize;

/// Reply of the rate actions: what happened and the fresh aggregate.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateResult {
    pub outcome: RateOutcome,
    pub target: RatingTarget,
    /// the caller's vote after the action, absent once withdrawn
    pub rating: Option<i16>,
    pub summary: RatingSummary,
}
