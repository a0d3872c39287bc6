use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::aggregate::AllTracks;
use crate::predict::{TimeWindow, Track};
use crate::service::GroundTrack;
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::server::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct TrackRequest {
    #[serde(default)]
    pub name: Option<String>,
    /// Two-line element set
    pub tle: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub step_minutes: f64,
    #[serde(default)]
    pub zoom: Option<f64>,
}

impl TrackRequest {
    fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start, self.end, self.step_minutes)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct WindowQuery {
    #[serde(deserialize_with = "deserialize_datetime")]
    pub start: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_datetime")]
    pub end: DateTime<Utc>,
    pub step_minutes: f64,
    #[serde(default)]
    pub zoom: Option<f64>,
}

impl WindowQuery {
    fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start, self.end, self.step_minutes)
    }
}

#[utoipa::path(
    post,
    path = "/api/track",
    tag = "tracks",
    request_body = TrackRequest,
    responses(
        (status = 200, description = "Propagated track", body = Track),
        (status = 400, description = "Malformed element set or time window", body = ErrorResponse),
        (status = 422, description = "Propagation failed", body = ErrorResponse)
    )
)]
pub async fn track(
    State(state): State<AppState>,
    Json(request): Json<TrackRequest>,
) -> ApiResult<Json<Track>> {
    let track = state.service.compute_track(
        request.name.as_deref(),
        &request.tle,
        &request.window(),
    )?;
    Ok(Json(track))
}

#[utoipa::path(
    post,
    path = "/api/groundtrack",
    tag = "tracks",
    request_body = TrackRequest,
    responses(
        (status = 200, description = "Track and map descriptor", body = GroundTrack),
        (status = 400, description = "Malformed element set or time window", body = ErrorResponse),
        (status = 422, description = "Propagation failed", body = ErrorResponse)
    )
)]
pub async fn ground_track(
    State(state): State<AppState>,
    Json(request): Json<TrackRequest>,
) -> ApiResult<Json<GroundTrack>> {
    let ground = state.service.compute_ground_track(
        request.name.as_deref(),
        &request.tle,
        &request.window(),
        request.zoom,
    )?;
    Ok(Json(ground))
}

#[utoipa::path(
    get,
    path = "/api/satellites/{id}/groundtrack",
    tag = "tracks",
    params(
        ("id" = String, Path, description = "Satellite ID"),
        ("start" = String, Query, description = "Start time (RFC3339)"),
        ("end" = String, Query, description = "End time (RFC3339), inclusive"),
        ("step_minutes" = f64, Query, description = "Sample step in minutes"),
        ("zoom" = Option<f64>, Query, description = "Map zoom level")
    ),
    responses(
        (status = 200, description = "Track and map descriptor", body = GroundTrack),
        (status = 400, description = "Malformed element set or time window", body = ErrorResponse),
        (status = 404, description = "Satellite not found", body = ErrorResponse),
        (status = 422, description = "Propagation failed", body = ErrorResponse)
    )
)]
pub async fn satellite_ground_track(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<WindowQuery>,
) -> ApiResult<Json<GroundTrack>> {
    let satellite = state.registry.get(&id).ok_or(ApiError::NotFound)?;
    let ground = state.service.compute_ground_track(
        Some(satellite.name.as_str()),
        &satellite.tle,
        &query.window(),
        query.zoom,
    )?;
    Ok(Json(ground))
}

#[utoipa::path(
    get,
    path = "/api/tracks",
    tag = "tracks",
    params(
        ("start" = String, Query, description = "Start time (RFC3339)"),
        ("end" = String, Query, description = "End time (RFC3339), inclusive"),
        ("step_minutes" = f64, Query, description = "Sample step in minutes"),
        ("zoom" = Option<f64>, Query, description = "Map zoom level")
    ),
    responses(
        (status = 200, description = "Tracks of every satellite that propagated", body = AllTracks),
        (status = 400, description = "Invalid time window", body = ErrorResponse),
        (status = 404, description = "No satellites registered", body = ErrorResponse),
        (status = 422, description = "Every satellite failed", body = ErrorResponse)
    )
)]
pub async fn all_tracks(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> ApiResult<Json<AllTracks>> {
    let result = state
        .service
        .compute_all_tracks(&*state.registry, &query.window(), query.zoom)?;
    Ok(Json(result))
}

fn deserialize_datetime<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}
