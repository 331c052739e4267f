//! Daily comparison between observed TEC maps and the Klobuchar model.
use std::str::FromStr;

use crate::{
    epoch::CalendarDate,
    error::Error,
    gpst::{GpsTimeOffsets, SAMPLING_PERIOD_S},
    grid::WorldGrid,
    klobuchar::KlobucharModel,
    navigation::NavigationCoefficients,
    prelude::Duration,
    production::{navigation_filenames, FileAttributes, MapProvider},
    series::GridSeries,
    source::DataSource,
    TecMaps,
};

#[cfg(feature = "log")]
use log::debug;

/// Number of steps between two observed maps, which brings
/// the 2 hour maps down to the 15 minute model sampling.
pub const DEFAULT_SUBDIVISIONS: usize = 8;

/// Returns the number of steps that brings maps sampled every
/// `sampling_period` down to the model sampling.
fn model_subdivisions(sampling_period: Duration) -> usize {
    let ratio = (sampling_period.to_seconds() / SAMPLING_PERIOD_S as f64).round();
    if ratio >= 1.0 {
        ratio as usize
    } else {
        DEFAULT_SUBDIVISIONS
    }
}

/// [DailyComparison] gathers the observed TEC, the modeled delay
/// and their difference, for one day, over the [WorldGrid].
/// All series are expressed in TECu (comparable units for the model).
#[derive(Debug, Clone, PartialEq)]
pub struct DailyComparison {
    /// Day being compared
    pub date: CalendarDate,

    /// Observed [TecMaps], as parsed
    pub maps: TecMaps,

    /// Broadcast [NavigationCoefficients] the model was evaluated with
    pub coefficients: NavigationCoefficients,

    /// Steps between two observed maps
    pub subdivisions: usize,

    /// Interpolated observed TEC
    pub observed: GridSeries,

    /// Klobuchar model
    pub modeled: GridSeries,

    /// observed - modeled
    pub delta: GridSeries,

    /// Coordinates of each cell
    pub world: WorldGrid,
}

impl DailyComparison {
    /// Fetches both products of the day from [DataSource] and compares them.
    /// Navigation stations are tried in order, the first one that
    /// can be fetched is retained.
    pub fn compute<D: DataSource, S: AsRef<str>>(
        source: &D,
        provider: MapProvider,
        date: &CalendarDate,
        stations: &[S],
    ) -> Result<Self, Error> {
        let tec_key = FileAttributes::new(provider, date).filename();

        #[cfg(feature = "log")]
        debug!("{} - fetching {}", date, tec_key);

        let tec_content = source.fetch(&tec_key)?;

        let mut nav_content = Option::<String>::None;

        for key in navigation_filenames(stations, date) {
            match source.fetch(&key) {
                Ok(content) => {
                    #[cfg(feature = "log")]
                    debug!("{} - using {}", date, key);

                    nav_content = Some(content);
                    break;
                },
                Err(_e) => {
                    #[cfg(feature = "log")]
                    debug!("{} - {} is not available: {}", date, key, _e);
                },
            }
        }

        let nav_content =
            nav_content.ok_or_else(|| Error::NoData(format!("navigation files of {}", date)))?;

        Self::from_contents(&tec_content, &nav_content, date)
    }

    /// Compares already fetched TEC maps and navigation contents.
    pub fn from_contents(
        tec_content: &str,
        nav_content: &str,
        date: &CalendarDate,
    ) -> Result<Self, Error> {
        let maps = TecMaps::from_str(tec_content)?;
        let coefficients = NavigationCoefficients::from_str(nav_content)?;
        Self::new(maps, coefficients, date)
    }

    /// Compares parsed [TecMaps] to the model described by [NavigationCoefficients].
    /// The number of subdivisions follows the sampling period of the maps
    /// (8 for the usual 2 hour maps).
    pub fn new(
        maps: TecMaps,
        coefficients: NavigationCoefficients,
        date: &CalendarDate,
    ) -> Result<Self, Error> {
        let subdivisions = model_subdivisions(maps.tec.sampling_period);
        Self::build(maps, coefficients, *date, subdivisions)
    }

    /// Copies and returns [DailyComparison], evaluated with a different
    /// number of subdivisions between two observed maps.
    /// The modeled series keeps its sampling, so this fails with
    /// [Error::SamplingMismatch] when the interpolated maps are no longer
    /// sampled every 15 minutes.
    pub fn with_subdivisions(&self, subdivisions: usize) -> Result<Self, Error> {
        Self::build(
            self.maps.clone(),
            self.coefficients,
            self.date,
            subdivisions,
        )
    }

    fn build(
        maps: TecMaps,
        coefficients: NavigationCoefficients,
        date: CalendarDate,
        subdivisions: usize,
    ) -> Result<Self, Error> {
        let model = KlobucharModel::new(coefficients);
        let offsets = GpsTimeOffsets::from_date(&date);

        #[cfg(feature = "log")]
        debug!(
            "{} - day of week: {} - {} observed maps",
            date,
            offsets.day_of_week(),
            maps.tec.len()
        );

        let modeled = model.daily_tecu_series(&offsets);

        let observed = maps.interpolated(subdivisions)?;

        if observed.sampling_period != modeled.sampling_period {
            return Err(Error::SamplingMismatch {
                lhs: observed.sampling_period,
                rhs: modeled.sampling_period,
            });
        }

        // the last interpolated map is the next day midnight
        let observed = observed.truncated(modeled.len());

        #[cfg(feature = "log")]
        debug!(
            "{} - {} observed / {} modeled maps",
            date,
            observed.len(),
            modeled.len()
        );

        let delta = observed.delta(&modeled)?;

        Ok(Self {
            date,
            maps,
            coefficients,
            subdivisions,
            observed,
            modeled,
            delta,
            world: model.world,
        })
    }

    /// Number of compared instants
    pub fn len(&self) -> usize {
        self.delta.len()
    }

    /// Returns true if nothing could be compared
    pub fn is_empty(&self) -> bool {
        self.delta.is_empty()
    }

    /// Formats the time of day of given index as "HH:MM".
    pub fn time_of_day_hhmm(&self, index: usize) -> String {
        self.delta.time_of_day_hhmm(index)
    }
}
