use serde::Serialize;
use utoipa::ToSchema;

use crate::predict::GeoPoint;

/// Longitude jump between consecutive samples treated as a date-line crossing.
pub const ANTIMERIDIAN_JUMP_DEG: f64 = 180.0;

/// Contiguous run of points with no antimeridian crossing inside it
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Segment {
    pub points: Vec<GeoPoint>,
}

/// Split a path wherever consecutive longitudes differ by more than 180°.
///
/// The cut is a plain line break between the two samples: nothing is
/// interpolated onto the ±180° edge and no point is repeated, so the
/// concatenated segments are exactly the input.
pub fn split_antimeridian(points: &[GeoPoint]) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current: Vec<GeoPoint> = Vec::new();

    for point in points {
        if let Some(prev) = current.last() {
            if (point.lon - prev.lon).abs() > ANTIMERIDIAN_JUMP_DEG {
                segments.push(Segment {
                    points: std::mem::take(&mut current),
                });
            }
        }
        current.push(*point);
    }

    if !current.is_empty() {
        segments.push(Segment { points: current });
    }

    segments
}
