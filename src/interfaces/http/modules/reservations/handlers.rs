//! Reservation HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::application::{BookingService, CreateReservation};
use crate::domain::{CustomerContact, DateRange};
use crate::interfaces::http::common::{reject, ApiResponse, ValidatedJson};
use crate::shared::types::validate_pagination;

use super::dto::*;

/// Application state for reservation handlers.
#[derive(Clone)]
pub struct ReservationAppState {
    pub booking: Arc<BookingService>,
}

type HandlerResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<T>>)>;

#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    tag = "Reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 200, description = "Reservation created as Pending", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Vessel not found or inactive"),
        (status = 409, description = "No capacity for these dates"),
        (status = 503, description = "Vessel busy; retry")
    )
)]
pub async fn create_reservation(
    State(state): State<ReservationAppState>,
    ValidatedJson(request): ValidatedJson<CreateReservationRequest>,
) -> HandlerResult<ReservationDto> {
    let dates = DateRange::new(request.start_date, request.end_date).map_err(reject)?;

    let reservation = state
        .booking
        .create(CreateReservation {
            vessel_id: request.vessel_id,
            dates,
            guest_count: request.guest_count,
            cabin_count: request.cabin_count,
            customer: CustomerContact {
                name: request.customer_name,
                email: request.customer_email,
                phone: request.customer_phone,
                special_requests: request.special_requests,
            },
        })
        .await
        .map_err(reject)?;

    Ok(Json(ApiResponse::success(reservation.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations/{id}",
    tag = "Reservations",
    params(("id" = Uuid, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation details", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn get_reservation(
    State(state): State<ReservationAppState>,
    Path(id): Path<Uuid>,
) -> HandlerResult<ReservationDto> {
    let reservation = state.booking.get(id).await.map_err(reject)?;
    Ok(Json(ApiResponse::success(reservation.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    tag = "Reservations",
    params(ListReservationsQuery),
    responses(
        (status = 200, description = "One page of reservations", body = ApiResponse<ReservationPageDto>)
    )
)]
pub async fn list_reservations(
    State(state): State<ReservationAppState>,
    Query(query): Query<ListReservationsQuery>,
) -> HandlerResult<ReservationPageDto> {
    let (page, limit) = validate_pagination(query.page, query.limit);

    let result = state
        .booking
        .list(query.vessel_id.as_deref(), page, limit)
        .await
        .map_err(reject)?;

    Ok(Json(ApiResponse::success(ReservationPageDto {
        items: result.items.into_iter().map(Into::into).collect(),
        total: result.total,
        page: result.page,
        limit: result.limit,
        total_pages: result.total_pages,
    })))
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/confirm",
    tag = "Reservations",
    params(("id" = Uuid, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation confirmed", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Reservation not found"),
        (status = 409, description = "Capacity consumed by a competing booking, or illegal transition"),
        (status = 503, description = "Vessel busy; retry")
    )
)]
pub async fn confirm_reservation(
    State(state): State<ReservationAppState>,
    Path(id): Path<Uuid>,
) -> HandlerResult<ReservationDto> {
    let reservation = state.booking.confirm(id).await.map_err(reject)?;
    Ok(Json(ApiResponse::success(reservation.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/cancel",
    tag = "Reservations",
    params(("id" = Uuid, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation cancelled", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn cancel_reservation(
    State(state): State<ReservationAppState>,
    Path(id): Path<Uuid>,
) -> HandlerResult<ReservationDto> {
    let reservation = state.booking.cancel(id).await.map_err(reject)?;
    Ok(Json(ApiResponse::success(reservation.into())))
}
