use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Satellite state at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct PropagatedState {
    pub latitude_deg: f64,
    /// Wrapped into (-180, 180].
    pub longitude_deg: f64,
    pub altitude_m: f64,
    /// TEME inertial position
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<f64>>)]
    pub position_km: Option<[f64; 3]>,
    /// TEME inertial velocity
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<f64>>)]
    pub velocity_km_s: Option<[f64; 3]>,
}

impl PropagatedState {
    /// Drop the inertial vectors, keeping the sub-satellite point and altitude.
    pub fn geodetic_only(self) -> Self {
        Self {
            position_km: None,
            velocity_km_s: None,
            ..self
        }
    }

    pub fn geo_point(&self) -> GeoPoint {
        GeoPoint {
            lat: self.latitude_deg,
            lon: self.longitude_deg,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TrackPoint {
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub state: PropagatedState,
}

/// Time-ordered states of one satellite
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Track {
    pub satellite: String,
    pub points: Vec<TrackPoint>,
}

impl Track {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn geo_points(&self) -> Vec<GeoPoint> {
        self.points.iter().map(|p| p.state.geo_point()).collect()
    }
}

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, ToSchema)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}
