use chrono::{DateTime, TimeZone, Utc};

use crate::predict::frames::wrap_longitude;
use crate::predict::{ElementSet, PropagatedState, PropagationError, Propagator};

pub const ISS_LINE1: &str =
    "1 25544U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  9992";
pub const ISS_LINE2: &str =
    "2 25544  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236008";

pub fn iss_text() -> String {
    format!("{}\n{}", ISS_LINE1, ISS_LINE2)
}

pub fn iss() -> ElementSet {
    ElementSet::parse(Some("ISS (ZARYA)"), &iss_text()).unwrap()
}

pub fn iss_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 7, 12, 21, 16, 1).unwrap()
}

pub fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// Element text understood by [`DriftPropagator`]: starts at `lon0` degrees.
pub fn drift_text(lon0: f64) -> String {
    format!("1 DRIFT\n2 {}", lon0)
}

/// Element text that [`DriftPropagator`] always rejects.
pub fn failing_text() -> String {
    "1 FAIL\n2 0".to_string()
}

/// Deterministic stand-in for a real propagator: longitude drifts east at a
/// fixed rate from the value encoded on line 2, latitude and altitude stay
/// constant.
pub struct DriftPropagator {
    pub deg_per_minute: f64,
    pub fail_after: Option<DateTime<Utc>>,
}

impl DriftPropagator {
    pub fn new(deg_per_minute: f64) -> Self {
        Self {
            deg_per_minute,
            fail_after: None,
        }
    }
}

impl Propagator for DriftPropagator {
    fn propagate(
        &self,
        elements: &ElementSet,
        instant: DateTime<Utc>,
    ) -> Result<PropagatedState, PropagationError> {
        if elements.line1.contains("FAIL") {
            return Err(PropagationError::new("decayed"));
        }
        if self.fail_after.is_some_and(|t| instant > t) {
            return Err(PropagationError::new("epoch out of range"));
        }
        let lon0: f64 = elements
            .line2
            .trim_start_matches('2')
            .trim()
            .parse()
            .map_err(|_| PropagationError::new("bad fake elements"))?;
        let minutes = (instant - reference_time()).num_seconds() as f64 / 60.0;

        Ok(PropagatedState {
            latitude_deg: 10.0,
            longitude_deg: wrap_longitude(lon0 + self.deg_per_minute * minutes),
            altitude_m: 400_000.0,
            position_km: Some([7000.0, 0.0, 0.0]),
            velocity_km_s: Some([0.0, 7.5, 0.0]),
        })
    }
}
