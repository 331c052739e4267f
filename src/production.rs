//! File production infrastructure: standardized file names.
use crate::{epoch::CalendarDate, error::ParsingError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Agency that produced the global TEC maps.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MapProvider {
    /// International GNSS Service combined maps
    #[default]
    IGS,

    /// Universitat Politècnica de Catalunya
    UPC,

    /// European Space Agency
    ESA,
}

impl std::fmt::Display for MapProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::IGS => write!(f, "IGS"),
            Self::UPC => write!(f, "UPC"),
            Self::ESA => write!(f, "ESA"),
        }
    }
}

impl std::str::FromStr for MapProvider {
    type Err = ParsingError;

    /// Parses [MapProvider] from its code ("IGS"), or from
    /// a descriptive label like "IGS map".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s
            .split_ascii_whitespace()
            .next()
            .ok_or(ParsingError::UnknownProvider)?;

        match code.to_uppercase().as_str() {
            "IGS" => Ok(Self::IGS),
            "UPC" => Ok(Self::UPC),
            "ESA" => Ok(Self::ESA),
            _ => Err(ParsingError::UnknownProvider),
        }
    }
}

/// File production attributes of daily global TEC maps.
/// Used to generate file names that follow the naming conventions,
/// or attached to data parsed from such files.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FileAttributes {
    /// Production agency
    pub provider: MapProvider,

    /// Year of production
    pub year: i32,

    /// Production Day of Year (DOY), 1 being January 1st.
    pub doy: u32,

    /// True if this file was gzip compressed
    pub gzip_compressed: bool,
}

impl FileAttributes {
    /// Builds [FileAttributes] for given [MapProvider] and day.
    pub fn new(provider: MapProvider, date: &CalendarDate) -> Self {
        Self {
            provider,
            year: date.year(),
            doy: date.day_of_year(),
            gzip_compressed: false,
        }
    }

    /// Returns the standardized file name, which is the logical
    /// key to fetch these maps.
    pub fn filename(&self) -> String {
        let extension = if self.gzip_compressed { ".gz" } else { "" };

        format!(
            "{}0OPSRAP_{:04}{:03}0000_01D_02H_GIM.INX{}",
            self.provider, self.year, self.doy, extension
        )
    }
}

impl std::str::FromStr for FileAttributes {
    type Err = ParsingError;

    fn from_str(fname: &str) -> Result<Self, Self::Err> {
        let fname = fname.to_uppercase();

        let (fname, gzip_compressed) = match fname.strip_suffix(".GZ") {
            Some(stripped) => (stripped, true),
            None => (fname.as_str(), false),
        };

        let mut items = fname.split('_');

        let prefix = items.next().ok_or(ParsingError::NonStandardFilename)?;

        if prefix.len() != 10 || !prefix.is_ascii() || !prefix.ends_with("0OPSRAP") {
            return Err(ParsingError::NonStandardFilename);
        }

        let provider = prefix[..3]
            .parse::<MapProvider>()
            .map_err(|_| ParsingError::NonStandardFilename)?;

        let datetime = items.next().ok_or(ParsingError::NonStandardFilename)?;

        if datetime.len() != 11 || !datetime.is_ascii() {
            return Err(ParsingError::NonStandardFilename);
        }

        let year = datetime[..4]
            .parse::<i32>()
            .map_err(|_| ParsingError::NonStandardFilename)?;

        let doy = datetime[4..7]
            .parse::<u32>()
            .map_err(|_| ParsingError::NonStandardFilename)?;

        if items.collect::<Vec<_>>() != ["01D", "02H", "GIM.INX"] {
            return Err(ParsingError::NonStandardFilename);
        }

        Ok(Self {
            provider,
            year,
            doy,
            gzip_compressed,
        })
    }
}

/// Parses a list of navigation stations, one per line.
/// Blank lines are ignored.
pub fn parse_stations(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect()
}

/// Returns the standardized daily navigation file name of given station.
pub fn navigation_filename(station: &str, date: &CalendarDate) -> String {
    format!(
        "{}_R_{:04}{:03}0000_01D_GN.rnx.gz",
        station,
        date.year(),
        date.day_of_year()
    )
}

/// Returns the standardized daily navigation file names of all stations,
/// preserving their order of preference.
pub fn navigation_filenames<S: AsRef<str>>(stations: &[S], date: &CalendarDate) -> Vec<String> {
    stations
        .iter()
        .map(|station| navigation_filename(station.as_ref(), date))
        .collect()
}
