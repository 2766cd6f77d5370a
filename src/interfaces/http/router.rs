//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::BookingService;
use crate::domain::VesselCatalog;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::modules::{availability, health, reservations, vessels};

/// Unified state for all booking routes. Axum extracts each module's own
/// state via `FromRef`.
#[derive(Clone)]
pub struct BookingApiState {
    pub booking: Arc<BookingService>,
    pub catalog: Arc<dyn VesselCatalog>,
}

impl FromRef<BookingApiState> for availability::AvailabilityAppState {
    fn from_ref(s: &BookingApiState) -> Self {
        availability::AvailabilityAppState {
            booking: Arc::clone(&s.booking),
        }
    }
}

impl FromRef<BookingApiState> for reservations::ReservationAppState {
    fn from_ref(s: &BookingApiState) -> Self {
        reservations::ReservationAppState {
            booking: Arc::clone(&s.booking),
        }
    }
}

impl FromRef<BookingApiState> for vessels::VesselAppState {
    fn from_ref(s: &BookingApiState) -> Self {
        vessels::VesselAppState {
            catalog: Arc::clone(&s.catalog),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::handlers::health,
        availability::handlers::check_availability,
        reservations::handlers::create_reservation,
        reservations::handlers::get_reservation,
        reservations::handlers::list_reservations,
        reservations::handlers::confirm_reservation,
        reservations::handlers::cancel_reservation,
        vessels::handlers::list_vessels,
        vessels::handlers::get_vessel,
    ),
    components(schemas(
        ApiResponse<availability::AvailabilityDto>,
        ApiResponse<reservations::ReservationDto>,
        ApiResponse<reservations::ReservationPageDto>,
        ApiResponse<Vec<vessels::VesselDto>>,
        ApiResponse<vessels::VesselDto>,
        ApiResponse<health::HealthResponse>,
        availability::AvailabilityDto,
        reservations::CreateReservationRequest,
        reservations::ReservationDto,
        reservations::ReservationPageDto,
        vessels::VesselDto,
        health::HealthResponse,
    )),
    tags(
        (name = "Availability", description = "Availability and pricing queries"),
        (name = "Reservations", description = "Reservation lifecycle"),
        (name = "Vessels", description = "Read-only vessel catalog"),
        (name = "Health", description = "Service health")
    )
)]
struct ApiDoc;

/// Build the REST API router.
pub fn create_api_router(
    booking: Arc<BookingService>,
    catalog: Arc<dyn VesselCatalog>,
) -> Router {
    let state = BookingApiState { booking, catalog };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/health", get(health::health))
        .route("/api/v1/availability", get(availability::check_availability))
        .route(
            "/api/v1/reservations",
            post(reservations::create_reservation).get(reservations::list_reservations),
        )
        .route("/api/v1/reservations/{id}", get(reservations::get_reservation))
        .route(
            "/api/v1/reservations/{id}/confirm",
            post(reservations::confirm_reservation),
        )
        .route(
            "/api/v1/reservations/{id}/cancel",
            post(reservations::cancel_reservation),
        )
        .route("/api/v1/vessels", get(vessels::list_vessels))
        .route("/api/v1/vessels/{id}", get(vessels::get_vessel))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
