//! Vessel catalog HTTP handlers (read-only)

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::domain::{DomainError, VesselCatalog};
use crate::interfaces::http::common::{reject, ApiResponse};

use super::dto::*;

/// Application state for vessel handlers.
#[derive(Clone)]
pub struct VesselAppState {
    pub catalog: Arc<dyn VesselCatalog>,
}

#[utoipa::path(
    get,
    path = "/api/v1/vessels",
    tag = "Vessels",
    responses(
        (status = 200, description = "Active vessels", body = ApiResponse<Vec<VesselDto>>)
    )
)]
pub async fn list_vessels(
    State(state): State<VesselAppState>,
) -> Result<Json<ApiResponse<Vec<VesselDto>>>, (StatusCode, Json<ApiResponse<Vec<VesselDto>>>)> {
    let vessels = state.catalog.list_active().await.map_err(reject)?;
    Ok(Json(ApiResponse::success(
        vessels.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/vessels/{id}",
    tag = "Vessels",
    params(("id" = String, Path, description = "Vessel ID")),
    responses(
        (status = 200, description = "Vessel details", body = ApiResponse<VesselDto>),
        (status = 404, description = "Vessel not found")
    )
)]
pub async fn get_vessel(
    State(state): State<VesselAppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<VesselDto>>, (StatusCode, Json<ApiResponse<VesselDto>>)> {
    let vessel = state
        .catalog
        .find_by_id(&id)
        .await
        .map_err(reject)?
        .ok_or(DomainError::NotFound {
            entity: "Vessel",
            field: "id",
            value: id,
        })
        .map_err(reject)?;

    Ok(Json(ApiResponse::success(vessel.into())))
}
