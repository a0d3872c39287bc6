use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackError {
    #[error("invalid element set for {satellite}: expected 2 lines, found {lines}")]
    InvalidElementFormat { satellite: String, lines: usize },
    #[error("invalid time window: {0}")]
    InvalidTimeWindow(String),
    #[error("propagation failed for {satellite} at {instant}: {reason}")]
    Propagation {
        satellite: String,
        instant: DateTime<Utc>,
        reason: String,
    },
    #[error("no satellites could be propagated ({failed} failed)")]
    NoSatellitesPropagated { failed: usize },
    #[error("no satellites registered")]
    NoSatellites,
}

/// Failure reported by a [`Propagator`](super::Propagator) for a single instant.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{reason}")]
pub struct PropagationError {
    pub reason: String,
}

impl PropagationError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl From<sgp4::TleError> for PropagationError {
    fn from(err: sgp4::TleError) -> Self {
        PropagationError::new(format!("invalid tle: {}", err))
    }
}

impl From<sgp4::ElementsError> for PropagationError {
    fn from(err: sgp4::ElementsError) -> Self {
        PropagationError::new(format!("elements error: {}", err))
    }
}

impl From<sgp4::Error> for PropagationError {
    fn from(err: sgp4::Error) -> Self {
        PropagationError::new(err.to_string())
    }
}
