use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::predict::TrackError;

const MICROS_PER_MINUTE: f64 = 60_000_000.0;

/// Requested sampling window, as it arrives from a caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    /// Inclusive.
    pub end: DateTime<Utc>,
    pub step_minutes: f64,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, step_minutes: f64) -> Self {
        Self {
            start,
            end,
            step_minutes,
        }
    }

    pub fn grid(&self) -> Result<TimeGrid, TrackError> {
        TimeGrid::new(self.start, self.end, self.step_minutes)
    }
}

/// Validated sample grid: `start + k * step` for every `k` that stays `<= end`.
///
/// The last partial interval is not snapped to `end`. Iterating is lazy and
/// can be repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeGrid {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    step_us: i64,
}

impl TimeGrid {
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        step_minutes: f64,
    ) -> Result<Self, TrackError> {
        if !step_minutes.is_finite() || step_minutes <= 0.0 {
            return Err(TrackError::InvalidTimeWindow(format!(
                "step must be a positive number of minutes, got {}",
                step_minutes
            )));
        }

        let step_us = (step_minutes * MICROS_PER_MINUTE).round();
        if step_us < 1.0 {
            return Err(TrackError::InvalidTimeWindow(format!(
                "step of {} minutes is below one microsecond",
                step_minutes
            )));
        }

        Ok(Self {
            start,
            end,
            step_us: step_us.min(i64::MAX as f64) as i64,
        })
    }

    /// Number of samples: `floor((end - start) / step) + 1`, or 0 when `start > end`.
    pub fn len(&self) -> usize {
        if self.start > self.end {
            return 0;
        }
        let span_us = (self.end - self.start)
            .num_microseconds()
            .unwrap_or(i64::MAX);
        usize::try_from(span_us / self.step_us)
            .map(|n| n.saturating_add(1))
            .unwrap_or(usize::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> TimeGridIter {
        TimeGridIter {
            grid: *self,
            index: 0,
            len: self.len(),
        }
    }

    fn instant(&self, index: usize) -> Option<DateTime<Utc>> {
        let offset_us = i64::try_from(index).ok()?.checked_mul(self.step_us)?;
        self.start
            .checked_add_signed(Duration::microseconds(offset_us))
            .filter(|t| *t <= self.end)
    }
}

impl<'a> IntoIterator for &'a TimeGrid {
    type Item = DateTime<Utc>;
    type IntoIter = TimeGridIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub struct TimeGridIter {
    grid: TimeGrid,
    index: usize,
    len: usize,
}

impl Iterator for TimeGridIter {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.len {
            return None;
        }
        match self.grid.instant(self.index) {
            Some(t) => {
                self.index += 1;
                Some(t)
            }
            None => {
                // Out of the representable date range; nothing further can follow.
                self.len = self.index;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TimeGridIter {}
