use serde::Serialize;
use utoipa::ToSchema;

use crate::plot::{split_antimeridian, PlotBuilder, PlotDescriptor, PlotStyle};
use crate::predict::{compute_track, ElementSet, Propagator, TimeGrid, Track, TrackError};
use crate::registry::RegisteredSatellite;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SatelliteTrack {
    pub id: String,
    pub name: String,
    pub color: String,
    pub track: Track,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SkippedSatellite {
    pub id: String,
    pub name: String,
    pub reason: String,
}

/// Combined result of propagating every registered satellite over one window
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AllTracks {
    pub tracks: Vec<SatelliteTrack>,
    pub skipped: Vec<SkippedSatellite>,
    pub descriptor: PlotDescriptor,
}

/// Propagate each satellite independently, in order.
///
/// A satellite with malformed elements or a failing instant is skipped and
/// reported in `skipped`; the request only fails when every satellite does.
/// The map center is the flat mean over all retained points, so satellites
/// with more samples weigh more.
pub fn compute_all_tracks<P>(
    propagator: &P,
    satellites: &[RegisteredSatellite],
    grid: &TimeGrid,
    style: &PlotStyle,
    zoom: Option<f64>,
) -> Result<AllTracks, TrackError>
where
    P: Propagator + ?Sized,
{
    if satellites.is_empty() {
        return Err(TrackError::NoSatellites);
    }

    let mut tracks = Vec::new();
    let mut skipped = Vec::new();
    let mut plot = PlotBuilder::new(style, zoom);

    for satellite in satellites {
        let result = ElementSet::parse(Some(satellite.name.as_str()), &satellite.tle)
            .and_then(|elements| compute_track(propagator, &elements, grid));

        let mut track = match result {
            Ok(track) => track,
            Err(e) => {
                log::warn!(
                    "Skipping satellite {} ({}): {}",
                    satellite.name,
                    satellite.id,
                    e
                );
                skipped.push(SkippedSatellite {
                    id: satellite.id.clone(),
                    name: satellite.name.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        for point in &mut track.points {
            point.state = point.state.geodetic_only();
        }

        let color = style.color(tracks.len());
        plot.add_track(&satellite.name, &color, &split_antimeridian(&track.geo_points()));

        tracks.push(SatelliteTrack {
            id: satellite.id.clone(),
            name: satellite.name.clone(),
            color,
            track,
        });
    }

    if tracks.is_empty() {
        return Err(TrackError::NoSatellitesPropagated {
            failed: skipped.len(),
        });
    }

    log::debug!(
        "propagated {} of {} satellites",
        tracks.len(),
        satellites.len()
    );

    Ok(AllTracks {
        tracks,
        skipped,
        descriptor: plot.build(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predict::testing::{
        drift_text, failing_text, iss_epoch, iss_text, reference_time, DriftPropagator,
    };
    use crate::predict::Sgp4Propagator;
    use chrono::Duration;

    fn satellite(name: &str, tle: &str) -> RegisteredSatellite {
        RegisteredSatellite {
            id: format!("id-{}", name),
            name: name.to_string(),
            tle: tle.to_string(),
        }
    }

    fn grid(minutes: i64) -> TimeGrid {
        let start = reference_time();
        TimeGrid::new(start, start + Duration::minutes(minutes), 1.0).unwrap()
    }

    #[test]
    fn malformed_satellite_is_skipped() {
        let satellites = vec![
            satellite("GOOD", &drift_text(0.0)),
            satellite("BROKEN", "only one line"),
        ];
        let result = compute_all_tracks(
            &DriftPropagator::new(1.0),
            &satellites,
            &grid(2),
            &PlotStyle::default(),
            None,
        )
        .unwrap();

        assert_eq!(result.tracks.len(), 1);
        assert_eq!(result.tracks[0].name, "GOOD");
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].id, "id-BROKEN");
        assert!(result.skipped[0].reason.contains("expected 2 lines"));
    }

    #[test]
    fn all_failing_is_an_error() {
        let satellites = vec![
            satellite("A", &failing_text()),
            satellite("B", "garbage"),
            satellite("C", &failing_text()),
        ];
        let err = compute_all_tracks(
            &DriftPropagator::new(1.0),
            &satellites,
            &grid(2),
            &PlotStyle::default(),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, TrackError::NoSatellitesPropagated { failed: 3 }));
    }

    #[test]
    fn empty_registry_is_distinct_from_all_failing() {
        let err = compute_all_tracks(
            &DriftPropagator::new(1.0),
            &[],
            &grid(2),
            &PlotStyle::default(),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, TrackError::NoSatellites));
    }

    #[test]
    fn retained_count_is_total_minus_failures() {
        for failures in 0..=4usize {
            let satellites: Vec<_> = (0..4)
                .map(|i| {
                    let tle = if i < failures {
                        failing_text()
                    } else {
                        drift_text(i as f64)
                    };
                    satellite(&format!("S{}", i), &tle)
                })
                .collect();
            let result = compute_all_tracks(
                &DriftPropagator::new(1.0),
                &satellites,
                &grid(1),
                &PlotStyle::default(),
                None,
            );
            if failures == 4 {
                assert!(matches!(
                    result,
                    Err(TrackError::NoSatellitesPropagated { failed: 4 })
                ));
            } else {
                let result = result.unwrap();
                assert_eq!(result.tracks.len(), 4 - failures);
                assert_eq!(result.skipped.len(), failures);
            }
        }
    }

    #[test]
    fn late_failure_drops_the_whole_satellite() {
        let propagator = DriftPropagator {
            deg_per_minute: 1.0,
            fail_after: Some(reference_time() + Duration::minutes(1)),
        };
        let satellites = vec![satellite("A", &drift_text(0.0))];
        let err = compute_all_tracks(
            &propagator,
            &satellites,
            &grid(5),
            &PlotStyle::default(),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, TrackError::NoSatellitesPropagated { failed: 1 }));
    }

    #[test]
    fn colors_cycle_by_output_order() {
        let style = PlotStyle {
            palette: vec!["red".into(), "green".into()],
            ..PlotStyle::default()
        };
        let satellites = vec![
            satellite("A", &drift_text(0.0)),
            satellite("X", &failing_text()),
            satellite("B", &drift_text(10.0)),
            satellite("C", &drift_text(20.0)),
        ];
        let result =
            compute_all_tracks(&DriftPropagator::new(1.0), &satellites, &grid(1), &style, None)
                .unwrap();

        let colors: Vec<_> = result.tracks.iter().map(|t| t.color.as_str()).collect();
        assert_eq!(colors, vec!["red", "green", "red"]);
        let names: Vec<_> = result.tracks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn center_is_flat_mean_over_all_points() {
        // A contributes 3 points at lon 0,1,2; B contributes 3 points at 100,101,102.
        let satellites = vec![
            satellite("A", &drift_text(0.0)),
            satellite("B", &drift_text(100.0)),
        ];
        let result = compute_all_tracks(
            &DriftPropagator::new(1.0),
            &satellites,
            &grid(2),
            &PlotStyle::default(),
            Some(4.0),
        )
        .unwrap();

        assert!((result.descriptor.center.lon - 51.0).abs() < 1e-9);
        assert!((result.descriptor.center.lat - 10.0).abs() < 1e-9);
        assert_eq!(result.descriptor.zoom, 4.0);
    }

    #[test]
    fn one_legend_entry_per_satellite_across_dateline() {
        let satellites = vec![
            satellite("EAST", &drift_text(178.0)),
            satellite("WEST", &drift_text(-10.0)),
        ];
        let result = compute_all_tracks(
            &DriftPropagator::new(1.0),
            &satellites,
            &grid(4),
            &PlotStyle::default(),
            None,
        )
        .unwrap();

        let traces = &result.descriptor.traces;
        assert_eq!(traces.len(), 3);
        assert_eq!(traces.iter().filter(|t| t.show_legend).count(), 2);
        assert_eq!(traces[0].lon, vec![178.0, 179.0, 180.0]);
        assert_eq!(traces[1].lon, vec![-179.0, -178.0]);
        assert!(!traces[1].show_legend);
        assert_eq!(traces[0].color, traces[1].color);
    }

    #[test]
    fn bulk_tracks_drop_inertial_vectors() {
        let satellites = vec![satellite("A", &drift_text(0.0))];
        let result = compute_all_tracks(
            &DriftPropagator::new(1.0),
            &satellites,
            &grid(1),
            &PlotStyle::default(),
            None,
        )
        .unwrap();
        assert!(result.tracks[0]
            .track
            .points
            .iter()
            .all(|p| p.state.position_km.is_none() && p.state.velocity_km_s.is_none()));
    }

    #[test]
    fn real_propagator_skips_malformed_satellite() {
        let satellites = vec![
            satellite("ISS", &iss_text()),
            satellite("BROKEN", "1 25544U\n"),
        ];
        let start = iss_epoch();
        let grid = TimeGrid::new(start, start + Duration::minutes(90), 5.0).unwrap();
        let result = compute_all_tracks(
            &Sgp4Propagator,
            &satellites,
            &grid,
            &PlotStyle::default(),
            None,
        )
        .unwrap();

        assert_eq!(result.tracks.len(), 1);
        assert_eq!(result.tracks[0].track.points.len(), 19);
        let rendered: usize = result.descriptor.traces.iter().map(|t| t.lon.len()).sum();
        assert_eq!(rendered, 19);
    }
}
