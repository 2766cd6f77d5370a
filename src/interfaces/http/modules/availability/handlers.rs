//! Availability HTTP handlers

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::BookingService;
use crate::domain::DateRange;
use crate::interfaces::http::common::{reject, ApiResponse};

use super::dto::*;

/// Application state for availability handlers.
#[derive(Clone)]
pub struct AvailabilityAppState {
    pub booking: Arc<BookingService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/availability",
    tag = "Availability",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Availability verdict", body = ApiResponse<AvailabilityDto>),
        (status = 400, description = "Invalid dates or guest count"),
        (status = 404, description = "Vessel not found or inactive")
    )
)]
pub async fn check_availability(
    State(state): State<AvailabilityAppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<ApiResponse<AvailabilityDto>>, (StatusCode, Json<ApiResponse<AvailabilityDto>>)> {
    let range = DateRange::new(query.start_date, query.end_date).map_err(reject)?;

    let result = state
        .booking
        .check_availability(&query.vessel_id, &range, query.guest_count, query.cabin_count)
        .await
        .map_err(reject)?;

    Ok(Json(ApiResponse::success(result.into())))
}
