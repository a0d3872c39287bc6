use chrono::{DateTime, Utc};
use sgp4::{Constants, Elements};

use crate::predict::frames::{ecef_to_geodetic, teme_to_ecef_position};
use crate::predict::{ElementSet, PropagatedState, PropagationError};

/// Orbital state source: given an element set and a UTC instant, returns the
/// sub-satellite point and inertial state.
///
/// Implementations must be deterministic and must report failure as an error,
/// never as non-finite numbers.
pub trait Propagator {
    fn propagate(
        &self,
        elements: &ElementSet,
        instant: DateTime<Utc>,
    ) -> Result<PropagatedState, PropagationError>;
}

impl<P: Propagator + ?Sized> Propagator for &P {
    fn propagate(
        &self,
        elements: &ElementSet,
        instant: DateTime<Utc>,
    ) -> Result<PropagatedState, PropagationError> {
        (**self).propagate(elements, instant)
    }
}

/// SGP4/SDP4 propagation through the `sgp4` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sgp4Propagator;

impl Propagator for Sgp4Propagator {
    fn propagate(
        &self,
        elements: &ElementSet,
        instant: DateTime<Utc>,
    ) -> Result<PropagatedState, PropagationError> {
        let parsed = Elements::from_tle(
            elements.name.clone(),
            elements.line1.as_bytes(),
            elements.line2.as_bytes(),
        )?;
        let constants = Constants::from_elements(&parsed)?;

        let timestamp = instant.naive_utc();
        let minutes = parsed
            .datetime_to_minutes_since_epoch(&timestamp)
            .map_err(|e| PropagationError::new(e.to_string()))?;
        let prediction = constants.propagate(minutes)?;

        if prediction
            .position
            .iter()
            .chain(prediction.velocity.iter())
            .any(|v| !v.is_finite())
        {
            return Err(PropagationError::new("propagator returned a non-finite state"));
        }

        let sidereal =
            sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&timestamp));
        let ecef = teme_to_ecef_position(prediction.position, sidereal);
        let (latitude_deg, longitude_deg, altitude_km) = ecef_to_geodetic(ecef);

        Ok(PropagatedState {
            latitude_deg,
            longitude_deg,
            altitude_m: altitude_km * 1000.0,
            position_km: Some(prediction.position),
            velocity_km_s: Some(prediction.velocity),
        })
    }
}
