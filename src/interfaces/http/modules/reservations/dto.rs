//! Reservation DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::Reservation;

/// Request to create a new reservation
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservationRequest {
    /// Vessel or package ID to book
    #[validate(length(min = 1, message = "vessel_id must not be empty"))]
    pub vessel_id: String,
    /// Check-in date (ISO 8601 date)
    pub start_date: NaiveDate,
    /// Checkout date, exclusive
    pub end_date: NaiveDate,
    /// Party size
    #[validate(range(min = 1, message = "guest_count must be at least 1"))]
    pub guest_count: u32,
    /// Cabins needed; required for cabin-modeled vessels
    pub cabin_count: Option<u32>,
    #[validate(length(min = 1, max = 120))]
    pub customer_name: String,
    #[validate(email)]
    pub customer_email: String,
    #[validate(length(min = 5, max = 32))]
    pub customer_phone: String,
    pub special_requests: Option<String>,
}

/// Reservation details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationDto {
    pub id: String,
    pub vessel_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub guest_count: u32,
    pub cabin_count: Option<u32>,
    pub status: String,
    pub total_price_cents: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub special_requests: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Reservation> for ReservationDto {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id.to_string(),
            vessel_id: r.vessel_id,
            start_date: r.dates.start(),
            end_date: r.dates.end(),
            guest_count: r.guest_count,
            cabin_count: r.cabin_count,
            status: r.status.to_string(),
            total_price_cents: r.total_price_cents,
            customer_name: r.customer.name,
            customer_email: r.customer.email,
            customer_phone: r.customer.phone,
            special_requests: r.customer.special_requests,
            created_at: r.created_at.to_rfc3339(),
            updated_at: r.updated_at.to_rfc3339(),
        }
    }
}

/// Reservation list query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListReservationsQuery {
    /// Filter by vessel
    pub vessel_id: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// One page of reservations
#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationPageDto {
    pub items: Vec<ReservationDto>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}
