//! Broadcast ionospheric coefficients, as found in navigation files.
use crate::error::ParsingError;

use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

#[cfg(feature = "flate2")]
use flate2::read::GzDecoder;

#[cfg(feature = "log")]
use log::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [NavigationCoefficients] are the broadcast Klobuchar coefficients
/// that describe two cubic polynomials in geomagnetic latitude.
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavigationCoefficients {
    /// Alpha coefficients (amplitude)
    /// ((sec), (sec.semi-circle⁻¹), (sec.semi-circle⁻²), (sec.semi-circle⁻³))
    pub alpha: [f64; 4],

    /// Beta coefficients (period)
    /// ((sec), (sec.semi-circle⁻¹), (sec.semi-circle⁻²), (sec.semi-circle⁻³))
    pub beta: [f64; 4],
}

/// Parses the 4 fields that follow the label of a coefficients line.
/// Fortran style exponents (`D`) are supported.
fn parse_coefficients(line: &str, set: &'static str) -> Result<[f64; 4], ParsingError> {
    let mut coefficients = [0.0_f64; 4];
    let mut items = line.split_ascii_whitespace().skip(1);

    for coefficient in coefficients.iter_mut() {
        let item = items
            .next()
            .ok_or(ParsingError::CoefficientParsing(set))?;

        *coefficient = item
            .replace(['D', 'd'], "E")
            .parse::<f64>()
            .map_err(|_| ParsingError::CoefficientParsing(set))?;
    }

    Ok(coefficients)
}

impl NavigationCoefficients {
    /// Parses [NavigationCoefficients] by consuming [BufReader].
    /// The first line labelled `GPSA` gives the alpha set, the first line
    /// labelled `GPSB` the beta set. Reading stops as soon as both were found,
    /// the rest of the file is never inspected.
    pub fn parse<R: Read>(reader: &mut BufReader<R>) -> Result<Self, ParsingError> {
        let (mut alpha, mut beta) = (None, None);

        let mut line_buf = String::with_capacity(128);

        loop {
            line_buf.clear();

            if reader.read_line(&mut line_buf)? == 0 {
                break;
            }

            if alpha.is_none() && line_buf.contains("GPSA") {
                alpha = Some(parse_coefficients(&line_buf, "alpha")?);

                #[cfg(feature = "log")]
                trace!("alpha coefficients: {:?}", alpha);
            } else if beta.is_none() && line_buf.contains("GPSB") {
                beta = Some(parse_coefficients(&line_buf, "beta")?);

                #[cfg(feature = "log")]
                trace!("beta coefficients: {:?}", beta);
            }

            if alpha.is_some() && beta.is_some() {
                break;
            }
        }

        Ok(Self {
            alpha: alpha.ok_or(ParsingError::MissingCoefficients("alpha"))?,
            beta: beta.ok_or(ParsingError::MissingCoefficients("beta"))?,
        })
    }

    /// Parses [NavigationCoefficients] from local readable file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParsingError> {
        let fd = File::open(path)?;
        let mut reader = BufReader::new(fd);
        Self::parse(&mut reader)
    }

    /// Parses [NavigationCoefficients] from local gzip compressed file.
    #[cfg(feature = "flate2")]
    #[cfg_attr(docsrs, doc(cfg(feature = "flate2")))]
    pub fn from_gzip_file<P: AsRef<Path>>(path: P) -> Result<Self, ParsingError> {
        let fd = File::open(path)?;
        let reader = GzDecoder::new(fd);
        let mut reader = BufReader::new(reader);
        Self::parse(&mut reader)
    }
}

impl std::str::FromStr for NavigationCoefficients {
    type Err = ParsingError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let mut reader = BufReader::new(content.as_bytes());
        Self::parse(&mut reader)
    }
}
