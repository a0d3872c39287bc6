mod elements;
mod error;
pub mod frames;
mod propagator;
mod time_grid;
mod track;
mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use elements::ElementSet;
pub use error::{PropagationError, TrackError};
pub use propagator::{Propagator, Sgp4Propagator};
pub use time_grid::{TimeGrid, TimeWindow};
pub use track::compute_track;
pub use types::{GeoPoint, PropagatedState, Track, TrackPoint};
