#![doc(
    html_logo_url = "https://raw.githubusercontent.com/nav-solutions/.github/master/logos/logo2.jpg"
)]
#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

/*
 * TECMAPS is part of the nav-solutions framework.
 *
 * Authors: Guillaume W. Bres <guillaume.bressaix@gmail.com> et al.
 * (cf. https://github.com/nav-solutions/tecmaps/graphs/contributors),
 * licensed under Mozilla Public license V2.
 *
 * Documentation: https://github.com/nav-solutions/tecmaps
 */

pub mod error;
pub mod gpst;
pub mod grid;
pub mod header;
pub mod klobuchar;
pub mod linspace;
pub mod navigation;
pub mod pipeline;
pub mod production;
pub mod series;
pub mod source;

mod epoch;
mod parsing;

#[cfg(test)]
mod tests;

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
    str::FromStr,
};

#[cfg(feature = "flate2")]
use flate2::read::GzDecoder;

use hifitime::prelude::Epoch;

use crate::{
    error::{Error, ParsingError},
    header::Header,
    parsing::parse_maps,
    production::FileAttributes,
    series::GridSeries,
};

pub mod prelude {
    // export
    pub use crate::{
        epoch::CalendarDate,
        error::{Error, ParsingError},
        gpst::GpsTimeOffsets,
        grid::{Grid, WorldGrid, LATITUDE_ROWS, LONGITUDE_COLUMNS},
        header::Header,
        klobuchar::{IonosphereParameters, KlobucharModel},
        linspace::Linspace,
        navigation::NavigationCoefficients,
        pipeline::DailyComparison,
        production::{FileAttributes, MapProvider},
        series::GridSeries,
        source::{DataSource, LocalDirectory},
        Comments, TecMaps,
    };

    // pub re-export
    pub use geo::{coord, Point, Rect};
    pub use hifitime::{Duration, Epoch, TimeScale, Unit};
}

/// Comments are readable descriptions found in the header section.
pub type Comments = Vec<String>;

/// [TecMaps] is the content of one daily global TEC maps file:
/// a [Header] and a [GridSeries] of TEC maps, 2 hours apart.
/// Values are stored as found in the file, use [Self::tecu] to obtain TECu.
///
/// ```
/// use tecmaps::prelude::*;
///
/// // one map, constant value 25 (2.5 TECu)
/// let mut content = String::from(
///     "     1                                                      START OF TEC MAP    \n"
/// );
///
/// for _ in 0..LATITUDE_ROWS {
///     content.push_str(
///         "  87.5-180.0 180.0   5.0 450.0                            LAT/LON1/LON2/DLON/H\n"
///     );
///     content.push_str(&"   25".repeat(LONGITUDE_COLUMNS));
///     content.push('\n');
/// }
///
/// content.push_str(
///     "     1                                                      END OF TEC MAP      \n"
/// );
///
/// let maps = content.parse::<TecMaps>()
///     .unwrap();
///
/// assert_eq!(maps.tec.len(), 1);
/// assert_eq!(maps.tec[0].shape(), (71, 73));
///
/// let tecu = maps.tecu();
/// assert_eq!(tecu[0].get(0, 0), Some(2.5));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TecMaps {
    /// [Header] gives general information and describes following content.
    pub header: Header,

    /// TEC maps, in file units.
    pub tec: GridSeries,

    /// RMS maps, in file units, when provided.
    pub rms: Option<GridSeries>,

    /// Epoch of each TEC map, when described.
    pub epochs: Vec<Epoch>,

    /// [FileAttributes] resolved for file names that follow the conventions.
    pub attributes: Option<FileAttributes>,
}

impl TecMaps {
    /// Parse [TecMaps] content by consuming [BufReader] (efficient buffered reader).
    pub fn parse<R: Read>(reader: &mut BufReader<R>) -> Result<Self, ParsingError> {
        let (header, maps) = parse_maps(reader)?;

        let sampling_period = header.sampling_period;

        let rms = if maps.rms.is_empty() {
            None
        } else {
            Some(GridSeries::new(maps.rms, sampling_period))
        };

        Ok(Self {
            rms,
            epochs: maps.epochs,
            tec: GridSeries::new(maps.tec, sampling_period),
            header,
            attributes: None,
        })
    }

    /// Parses [TecMaps] from local readable file.
    /// When the file name follows the naming conventions,
    /// [FileAttributes] are deduced as well.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParsingError> {
        let path = path.as_ref();
        let attributes = Self::file_attributes(path);

        let fd = File::open(path)?;
        let mut reader = BufReader::new(fd);

        let mut maps = Self::parse(&mut reader)?;
        maps.attributes = attributes;

        Ok(maps)
    }

    /// Parses [TecMaps] from local gzip compressed file.
    #[cfg(feature = "flate2")]
    #[cfg_attr(docsrs, doc(cfg(feature = "flate2")))]
    pub fn from_gzip_file<P: AsRef<Path>>(path: P) -> Result<Self, ParsingError> {
        let path = path.as_ref();
        let attributes = Self::file_attributes(path);

        let fd = File::open(path)?;
        let reader = GzDecoder::new(fd);
        let mut reader = BufReader::new(reader);

        let mut maps = Self::parse(&mut reader)?;
        maps.attributes = attributes;

        Ok(maps)
    }

    fn file_attributes(path: &Path) -> Option<FileAttributes> {
        let filename = path.file_name()?.to_string_lossy().to_string();
        FileAttributes::from_str(&filename).ok()
    }

    /// Copies and returns [TecMaps] with updated [FileAttributes].
    pub fn with_attributes(&self, attributes: FileAttributes) -> Self {
        let mut s = self.clone();
        s.attributes = Some(attributes);
        s
    }

    /// Returns [Epoch] of the first TEC map, if described.
    pub fn first_epoch(&self) -> Option<Epoch> {
        self.epochs.first().copied()
    }

    /// Returns [Epoch] of the last TEC map, if described.
    pub fn last_epoch(&self) -> Option<Epoch> {
        self.epochs.last().copied()
    }

    /// Returns TEC maps expressed in TECu.
    pub fn tecu(&self) -> GridSeries {
        let divider = self.header.tecu_divider();
        self.tec.map(|grid| grid / divider)
    }

    /// Returns RMS maps expressed in TECu, when provided.
    pub fn rms_tecu(&self) -> Option<GridSeries> {
        let divider = self.header.tecu_divider();
        self.rms.as_ref().map(|rms| rms.map(|grid| grid / divider))
    }

    /// Returns TEC maps expressed in TECu, densified with `subdivisions`
    /// steps between two consecutive maps. See [GridSeries::temporal_interpolation].
    pub fn interpolated(&self, subdivisions: usize) -> Result<GridSeries, Error> {
        self.tecu().temporal_interpolation(subdivisions)
    }
}

impl FromStr for TecMaps {
    type Err = ParsingError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let mut reader = BufReader::new(content.as_bytes());
        Self::parse(&mut reader)
    }
}
