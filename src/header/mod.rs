mod parsing;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::prelude::{Comments, Duration, Epoch};

/// IONEX file [Header], restricted to the fields
/// the map processing relies on.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Header {
    /// Total number of maps announced.
    pub number_of_maps: Option<usize>,

    /// [Epoch] of first map.
    pub epoch_of_first_map: Option<Epoch>,

    /// [Epoch] of last map.
    pub epoch_of_last_map: Option<Epoch>,

    /// Sampling period, duration gap between two maps.
    pub sampling_period: Duration,

    /// exponent: scaling applied to the stored TEC values
    pub exponent: i8,

    /// Comments found in the header section
    pub comments: Comments,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            // files that omit the exponent use 0.1 TECu quantization
            exponent: -1,
            // global maps are published every other hour
            sampling_period: Duration::from_hours(2.0),
            number_of_maps: None,
            epoch_of_first_map: None,
            epoch_of_last_map: None,
            comments: Default::default(),
        }
    }
}

impl Header {
    /// Returns the divider that converts stored values to TECu.
    /// Stored values are `TECu * 10^-exponent`.
    pub fn tecu_divider(&self) -> f64 {
        10.0_f64.powi(-(self.exponent as i32))
    }

    /// Copies [Self], returning with an updated number of Maps (total).
    pub fn with_number_of_maps(&self, number: usize) -> Self {
        let mut s = self.clone();
        s.number_of_maps = Some(number);
        s
    }

    /// Copies [Self], returning with an updated sampling period.
    pub fn with_sampling_period(&self, sampling_period: Duration) -> Self {
        let mut s = self.clone();
        s.sampling_period = sampling_period;
        s
    }

    /// Copies and sets exponent / scaling to currently use
    pub fn with_exponent(&self, e: i8) -> Self {
        let mut s = self.clone();
        s.exponent = e;
        s
    }
}
