//! Klobuchar ionospheric delay model, evaluated over the world grid.
use std::f64::consts::PI;

use crate::{
    gpst::GpsTimeOffsets,
    grid::{Grid, WorldGrid},
    navigation::NavigationCoefficients,
    series::GridSeries,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Speed of light in m/s
pub const SPEED_OF_LIGHT_M_S: f64 = 299_792_458.0;

/// Divide a delay (in meters) by this factor to obtain
/// a value comparable to TECu.
pub const METERS_PER_TECU: f64 = 0.16;

/// Pierce point latitude limit, in semicircles
const MAX_IPP_LATITUDE: f64 = 0.416;

/// Minimal period of the cosine model, in seconds
const MIN_PERIOD_S: f64 = 72_000.0;

/// Constant night time delay, in seconds
const NIGHT_DELAY_S: f64 = 5.0E-9;

/// Local time of the diurnal peak, in seconds
const PEAK_TIME_S: f64 = 50_400.0;

/// Phase limit of the cosine approximation
const MAX_PHASE_RAD: f64 = 1.57;

/// [IonosphereParameters] are the intermediate terms of the
/// Klobuchar model, at one pierce point.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IonosphereParameters {
    /// Amplitude of the ionospheric delay (seconds)
    pub amplitude_s: f64,

    /// Period of the ionospheric delay (seconds)
    pub period_s: f64,

    /// Phase of the ionospheric delay (rad)
    pub phase_rad: f64,

    /// Slant (obliquity) factor
    pub slant: f64,
}

impl IonosphereParameters {
    /// Returns the vertical delay in seconds.
    pub fn delay_s(&self) -> f64 {
        let x = self.phase_rad;
        if x.abs() <= MAX_PHASE_RAD {
            (NIGHT_DELAY_S + self.amplitude_s * (1.0 - x.powi(2) / 2.0 + x.powi(4) / 24.0))
                * self.slant
        } else {
            NIGHT_DELAY_S * self.slant
        }
    }

    /// Returns the delay converted to meters.
    pub fn delay_m(&self) -> f64 {
        self.delay_s() * SPEED_OF_LIGHT_M_S
    }
}

/// [KlobucharModel] evaluates the broadcast ionospheric model
/// at every point of the [WorldGrid]. Each cell is evaluated with a
/// single zenith looking observation (elevation 90°, azimuth 0°).
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KlobucharModel {
    /// Broadcast [NavigationCoefficients]
    pub coefficients: NavigationCoefficients,

    /// [WorldGrid] to evaluate
    pub world: WorldGrid,

    /// Elevation angle, in radians
    pub elevation_rad: f64,

    /// Azimuth angle, in radians
    pub azimuth_rad: f64,
}

impl KlobucharModel {
    /// Builds a new zenith looking [KlobucharModel] over the worldwide grid.
    pub fn new(coefficients: NavigationCoefficients) -> Self {
        Self {
            coefficients,
            world: WorldGrid::WORLDWIDE,
            elevation_rad: 90.0_f64.to_radians(),
            azimuth_rad: 0.0_f64.to_radians(),
        }
    }

    /// Evaluates cubic polynomial `coefficients` at `x`.
    fn polynomial(coefficients: &[f64; 4], x: f64) -> f64 {
        coefficients
            .iter()
            .enumerate()
            .fold(0.0, |acc, (i, c)| acc + c * x.powi(i as i32))
    }

    /// Returns the [IonosphereParameters] at given user location
    /// (in semicircles) and GPS time of week (in seconds).
    pub fn parameters(
        &self,
        latitude_sc: f64,
        longitude_sc: f64,
        time_of_week_s: f64,
    ) -> IonosphereParameters {
        let (elevation, azimuth) = (self.elevation_rad, self.azimuth_rad);

        // earth centered angle
        let psi = 0.0137 / (elevation / PI + 0.11) - 0.022;

        // pierce point
        let lat_ipp =
            (latitude_sc + psi * azimuth.cos()).clamp(-MAX_IPP_LATITUDE, MAX_IPP_LATITUDE);
        let lon_ipp = longitude_sc + psi * azimuth.sin() / lat_ipp.cos();

        let geomagnetic_lat = lat_ipp + 0.064 * (lon_ipp * PI - 1.617).cos();

        let local_time_s = (43_200.0 * lon_ipp + time_of_week_s).rem_euclid(86_400.0);

        let amplitude_s = Self::polynomial(&self.coefficients.alpha, geomagnetic_lat).max(0.0);
        let period_s =
            Self::polynomial(&self.coefficients.beta, geomagnetic_lat).max(MIN_PERIOD_S);

        let phase_rad = 2.0 * PI * (local_time_s - PEAK_TIME_S) / period_s;

        // elevation goes through one more degree to radian conversion,
        // which keeps the slant factor above 1 at zenith
        let slant = 1.0 + 16.0 * (0.53 - elevation.to_radians()).powi(3);

        IonosphereParameters {
            amplitude_s,
            period_s,
            phase_rad,
            slant,
        }
    }

    /// Computes the delay map (in meters) at given GPS time of week (in seconds).
    /// This is a pure function of the model and time of week.
    pub fn delay_grid(&self, time_of_week_s: f64) -> Grid {
        let latitudes_sc = self
            .world
            .latitude
            .points()
            .map(|lat| lat / 180.0)
            .collect::<Vec<_>>();

        let longitudes_sc = self
            .world
            .longitude
            .points()
            .map(|long| long / 180.0)
            .collect::<Vec<_>>();

        Grid::from_fn(|row, column| {
            self.parameters(latitudes_sc[row], longitudes_sc[column], time_of_week_s)
                .delay_m()
        })
    }

    /// Computes the delay map, expressed in TECu comparable units.
    pub fn tecu_grid(&self, time_of_week_s: f64) -> Grid {
        &self.delay_grid(time_of_week_s) / METERS_PER_TECU
    }

    /// Evaluates the model at each [GpsTimeOffsets], returning a
    /// [GridSeries] of delays in meters.
    pub fn daily_series(&self, offsets: &GpsTimeOffsets) -> GridSeries {
        GridSeries::new(
            offsets
                .iter()
                .map(|offset| self.delay_grid(offset as f64))
                .collect(),
            offsets.sampling_period(),
        )
    }

    /// Evaluates the model at each [GpsTimeOffsets], returning a
    /// [GridSeries] in TECu comparable units.
    pub fn daily_tecu_series(&self, offsets: &GpsTimeOffsets) -> GridSeries {
        self.daily_series(offsets)
            .map(|grid| grid / METERS_PER_TECU)
    }
}
