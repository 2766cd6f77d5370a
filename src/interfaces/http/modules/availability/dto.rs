//! Availability DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::AvailabilityResult;

/// Availability query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityQuery {
    /// Vessel or package ID
    pub vessel_id: String,
    /// Check-in date (ISO 8601 date)
    pub start_date: NaiveDate,
    /// Checkout date, exclusive
    pub end_date: NaiveDate,
    /// Party size
    pub guest_count: u32,
    /// Cabins needed; required for cabin-modeled vessels
    pub cabin_count: Option<u32>,
}

/// Availability verdict in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityDto {
    pub is_available: bool,
    pub total_price_cents: i64,
    pub message: String,
}

impl From<AvailabilityResult> for AvailabilityDto {
    fn from(r: AvailabilityResult) -> Self {
        Self {
            is_available: r.is_available,
            total_price_cents: r.total_price_cents,
            message: r.message,
        }
    }
}
