use crate::predict::{ElementSet, Propagator, TimeGrid, Track, TrackError, TrackPoint};

/// Lazily propagate `elements` at every instant of `grid`, in order.
pub fn propagate_states<'a, P>(
    propagator: &'a P,
    elements: &'a ElementSet,
    grid: &'a TimeGrid,
) -> impl Iterator<Item = Result<TrackPoint, TrackError>> + 'a
where
    P: Propagator + ?Sized,
{
    grid.iter().map(move |timestamp| {
        propagator
            .propagate(elements, timestamp)
            .map(|state| TrackPoint { timestamp, state })
            .map_err(|e| TrackError::Propagation {
                satellite: elements.label(),
                instant: timestamp,
                reason: e.reason,
            })
    })
}

/// Build the whole track; the first failing instant aborts it.
pub fn compute_track<P>(
    propagator: &P,
    elements: &ElementSet,
    grid: &TimeGrid,
) -> Result<Track, TrackError>
where
    P: Propagator + ?Sized,
{
    let points = propagate_states(propagator, elements, grid).collect::<Result<Vec<_>, _>>()?;

    log::debug!(
        "propagated {} samples for {}",
        points.len(),
        elements.label()
    );

    Ok(Track {
        satellite: elements.label(),
        points,
    })
}
