use serde::Serialize;
use utoipa::ToSchema;

use crate::aggregate::{self, AllTracks};
use crate::plot::{split_antimeridian, PlotBuilder, PlotDescriptor, PlotStyle};
use crate::predict::{self, ElementSet, Propagator, TimeWindow, Track, TrackError};
use crate::registry::SatelliteRegistry;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GroundTrack {
    pub track: Track,
    pub descriptor: PlotDescriptor,
}

/// Entry point of the propagation pipeline for the request layer.
pub struct GroundTrackService<P> {
    propagator: P,
    style: PlotStyle,
}

impl<P: Propagator> GroundTrackService<P> {
    pub fn new(propagator: P, style: PlotStyle) -> Self {
        Self { propagator, style }
    }

    /// Propagate one element set over `window`. Any failing instant aborts.
    pub fn compute_track(
        &self,
        name: Option<&str>,
        tle: &str,
        window: &TimeWindow,
    ) -> Result<Track, TrackError> {
        let grid = window.grid()?;
        let elements = ElementSet::parse(name, tle)?;
        predict::compute_track(&self.propagator, &elements, &grid)
    }

    pub fn compute_ground_track(
        &self,
        name: Option<&str>,
        tle: &str,
        window: &TimeWindow,
        zoom: Option<f64>,
    ) -> Result<GroundTrack, TrackError> {
        let track = self.compute_track(name, tle, window)?;

        let mut plot = PlotBuilder::new(&self.style, zoom);
        plot.add_track(
            &track.satellite,
            &self.style.color(0),
            &split_antimeridian(&track.geo_points()),
        );

        Ok(GroundTrack {
            track,
            descriptor: plot.build(),
        })
    }

    /// Propagate every registered satellite; individual failures are skipped.
    pub fn compute_all_tracks<R>(
        &self,
        registry: &R,
        window: &TimeWindow,
        zoom: Option<f64>,
    ) -> Result<AllTracks, TrackError>
    where
        R: SatelliteRegistry + ?Sized,
    {
        let grid = window.grid()?;
        let satellites = registry.list();
        aggregate::compute_all_tracks(&self.propagator, &satellites, &grid, &self.style, zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predict::testing::{
        drift_text, failing_text, iss_epoch, iss_text, reference_time, DriftPropagator,
    };
    use crate::predict::Sgp4Propagator;
    use crate::registry::InMemoryRegistry;
    use chrono::Duration;

    fn service() -> GroundTrackService<DriftPropagator> {
        GroundTrackService::new(DriftPropagator::new(1.0), PlotStyle::default())
    }

    fn window(minutes: i64, step: f64) -> TimeWindow {
        let start = reference_time();
        TimeWindow::new(start, start + Duration::minutes(minutes), step)
    }

    #[test]
    fn invalid_step_is_reported_before_elements() {
        let err = service()
            .compute_track(None, "bad", &window(2, 0.0))
            .unwrap_err();
        assert!(matches!(err, TrackError::InvalidTimeWindow(_)));
    }

    #[test]
    fn malformed_elements() {
        let err = service()
            .compute_track(Some("X"), "one line", &window(2, 1.0))
            .unwrap_err();
        assert!(matches!(err, TrackError::InvalidElementFormat { .. }));
    }

    #[test]
    fn single_satellite_failure_aborts() {
        let err = service()
            .compute_ground_track(Some("X"), &failing_text(), &window(2, 1.0), None)
            .unwrap_err();
        assert!(matches!(err, TrackError::Propagation { .. }));
    }

    #[test]
    fn ground_track_splits_at_dateline() {
        let ground = service()
            .compute_ground_track(Some("SAT"), &drift_text(178.0), &window(4, 1.0), Some(2.0))
            .unwrap();

        assert_eq!(ground.track.points.len(), 5);
        assert!(ground.track.points[0].state.position_km.is_some());
        let traces = &ground.descriptor.traces;
        assert_eq!(traces.len(), 2);
        assert!(traces[0].show_legend && !traces[1].show_legend);
        assert_eq!(traces[0].name, "SAT");
        assert_eq!(traces[0].color, crate::plot::DEFAULT_PALETTE[0]);
        assert_eq!(ground.descriptor.zoom, 2.0);
    }

    #[test]
    fn reversed_window_yields_empty_track_and_descriptor() {
        let start = reference_time();
        let reversed = TimeWindow::new(start, start - Duration::minutes(5), 1.0);
        let ground = service()
            .compute_ground_track(None, &drift_text(0.0), &reversed, None)
            .unwrap();
        assert!(ground.track.is_empty());
        assert!(ground.descriptor.traces.is_empty());
    }

    #[test]
    fn all_tracks_from_registry() {
        let registry = InMemoryRegistry::new();
        registry.add("A", &drift_text(0.0));
        registry.add("B", "not a tle");

        let result = service()
            .compute_all_tracks(&registry, &window(2, 1.0), None)
            .unwrap();
        assert_eq!(result.tracks.len(), 1);
        assert_eq!(result.skipped.len(), 1);

        let err = service()
            .compute_all_tracks(&registry, &window(2, -1.0), None)
            .unwrap_err();
        assert!(matches!(err, TrackError::InvalidTimeWindow(_)));

        let empty = InMemoryRegistry::new();
        assert!(matches!(
            service().compute_all_tracks(&empty, &window(2, 1.0), None),
            Err(TrackError::NoSatellites)
        ));
    }

    #[test]
    fn iss_ground_track_with_sgp4() {
        let service = GroundTrackService::new(Sgp4Propagator, PlotStyle::default());
        let start = iss_epoch();
        let window = TimeWindow::new(start, start + Duration::minutes(180), 1.0);
        let ground = service
            .compute_ground_track(None, &iss_text(), &window, None)
            .unwrap();

        assert_eq!(ground.track.satellite, "NORAD 25544");
        assert_eq!(ground.track.points.len(), 181);
        // Two orbits span more than 360 degrees of longitude, so the path
        // must cross the date line at least once.
        assert!(ground.descriptor.traces.len() >= 2);
        assert_eq!(
            ground.descriptor.traces.iter().filter(|t| t.show_legend).count(),
            1
        );
        for point in &ground.track.points {
            assert!(point.state.latitude_deg.abs() <= 52.0);
        }
    }
}
