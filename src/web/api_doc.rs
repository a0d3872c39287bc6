use utoipa::OpenApi;

use super::api::{error::ErrorResponse, health, satellites, tracks};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        satellites::list_satellites,
        satellites::add_satellite,
        satellites::get_satellite,
        satellites::delete_satellite,
        tracks::track,
        tracks::ground_track,
        tracks::satellite_ground_track,
        tracks::all_tracks,
    ),
    components(
        schemas(
            ErrorResponse,
            health::HealthResponse,
            satellites::NewSatellite,
            tracks::TrackRequest,
            crate::registry::RegisteredSatellite,
            crate::predict::Track,
            crate::predict::TrackPoint,
            crate::predict::PropagatedState,
            crate::predict::GeoPoint,
            crate::plot::PlotDescriptor,
            crate::plot::Trace,
            crate::service::GroundTrack,
            crate::aggregate::AllTracks,
            crate::aggregate::SatelliteTrack,
            crate::aggregate::SkippedSatellite,
        )
    ),
    info(
        title = "Groundtrack API",
        description = "Satellite registry and ground-track propagation",
        version = "0.1.0"
    ),
    tags(
        (name = "health", description = "Liveness"),
        (name = "satellites", description = "Satellite registry"),
        (name = "tracks", description = "Propagation and ground tracks")
    )
)]
pub struct ApiDoc;
