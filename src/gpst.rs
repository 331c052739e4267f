//! GPS time of week indexing
use crate::{epoch::CalendarDate, prelude::Duration};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of samples per day
pub const SAMPLES_PER_DAY: usize = 96;

/// Spacing between two samples, in seconds
pub const SAMPLING_PERIOD_S: u32 = 900;

/// Duration of one day, in seconds
const DAY_S: u32 = 86_400;

/// Returns the first day of the GPS timescale (1980-01-06, a Sunday).
pub fn gps_epoch_date() -> CalendarDate {
    CalendarDate::GPS_EPOCH
}

/// [GpsTimeOffsets] are the GPS time of week instants (in seconds)
/// that span one entire day, every 15 minutes.
/// They are referenced to the beginning of the GPS week the day belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GpsTimeOffsets {
    offsets: Vec<u32>,
}

impl GpsTimeOffsets {
    /// Builds the [GpsTimeOffsets] of given [CalendarDate].
    ///
    /// ```
    /// use tecmaps::prelude::*;
    ///
    /// // Saturday
    /// let date = CalendarDate::new(2024, 1, 6)
    ///     .unwrap();
    ///
    /// let offsets = GpsTimeOffsets::from_date(&date);
    ///
    /// assert_eq!(offsets.len(), 96);
    /// assert_eq!(offsets.start_of_day(), 6 * 86400);
    /// ```
    pub fn from_date(date: &CalendarDate) -> Self {
        let day_of_week = date.days_since(&gps_epoch_date()).rem_euclid(7) as u32;
        let start_of_day = day_of_week * DAY_S;

        Self {
            offsets: (0..SAMPLES_PER_DAY as u32)
                .map(|i| start_of_day + i * SAMPLING_PERIOD_S)
                .collect(),
        }
    }

    /// Returns the day of week, 0 being Sunday.
    pub fn day_of_week(&self) -> u32 {
        self.start_of_day() / DAY_S
    }

    /// Returns first offset (midnight), in seconds of week.
    pub fn start_of_day(&self) -> u32 {
        self.offsets.first().copied().unwrap_or_default()
    }

    /// Returns number of offsets.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Returns true if there is no offset.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Returns offsets, in seconds of week.
    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    /// Iterates offsets, in seconds of week.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.offsets.iter().copied()
    }

    /// Returns the time gap between two offsets.
    pub fn sampling_period(&self) -> Duration {
        Duration::from_seconds(SAMPLING_PERIOD_S as f64)
    }
}
