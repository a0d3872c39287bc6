use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::predict::ElementSet;
use crate::registry::{RegisteredSatellite, SatelliteRegistry};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::server::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewSatellite {
    pub name: String,
    /// Two-line element set
    pub tle: String,
}

#[utoipa::path(
    get,
    path = "/api/satellites",
    tag = "satellites",
    responses(
        (status = 200, description = "Registered satellites", body = Vec<RegisteredSatellite>)
    )
)]
pub async fn list_satellites(State(state): State<AppState>) -> Json<Vec<RegisteredSatellite>> {
    Json(state.registry.list())
}

#[utoipa::path(
    post,
    path = "/api/satellites",
    tag = "satellites",
    request_body = NewSatellite,
    responses(
        (status = 201, description = "Satellite registered", body = RegisteredSatellite),
        (status = 400, description = "Malformed element set", body = ErrorResponse)
    )
)]
pub async fn add_satellite(
    State(state): State<AppState>,
    Json(request): Json<NewSatellite>,
) -> ApiResult<impl IntoResponse> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("name must not be empty".into()));
    }
    let elements = ElementSet::parse(Some(name), &request.tle)?;

    let satellite = state
        .registry
        .add(name, &format!("{}\n{}", elements.line1, elements.line2));
    log::info!("Registered satellite {} ({})", satellite.name, satellite.id);

    Ok((StatusCode::CREATED, Json(satellite)))
}

#[utoipa::path(
    get,
    path = "/api/satellites/{id}",
    tag = "satellites",
    params(
        ("id" = String, Path, description = "Satellite ID")
    ),
    responses(
        (status = 200, description = "Satellite", body = RegisteredSatellite),
        (status = 404, description = "Satellite not found", body = ErrorResponse)
    )
)]
pub async fn get_satellite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<RegisteredSatellite>> {
    state
        .registry
        .get(&id)
        .map(Json)
        .ok_or(ApiError::NotFound)
}

#[utoipa::path(
    delete,
    path = "/api/satellites/{id}",
    tag = "satellites",
    params(
        ("id" = String, Path, description = "Satellite ID")
    ),
    responses(
        (status = 204, description = "Satellite removed"),
        (status = 404, description = "Satellite not found", body = ErrorResponse)
    )
)]
pub async fn delete_satellite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if state.registry.remove(&id) {
        log::info!("Removed satellite {}", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
