use thiserror::Error;

use std::io::Error as IoError;

use hifitime::Duration;

/// Errors that may rise during parsing process,
/// whether that be TEC maps, navigation messages or file names.
#[derive(Debug, Error)]
pub enum ParsingError {
    #[error("I/O input error: {0}")]
    IoError(#[from] IoError),

    #[error("no complete TEC map found")]
    NoTecMap,

    #[error("incomplete map #{index}: {rows} rows, shortest row has {columns} values")]
    IncompleteMap {
        index: usize,
        rows: usize,
        columns: usize,
    },

    #[error("invalid grid size: {0} values")]
    GridSize(usize),

    #[error("missing {0} coefficients")]
    MissingCoefficients(&'static str),

    #[error("failed to parse {0} coefficients")]
    CoefficientParsing(&'static str),

    #[error("epoch parsing")]
    EpochParsing,

    #[error("invalid calendar date")]
    DateParsing,

    #[error("filename does not follow naming conventions")]
    NonStandardFilename,

    #[error("unknown map provider")]
    UnknownProvider,
}

/// Processing errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("parsing error: {0}")]
    Parsing(#[from] ParsingError),

    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    #[error("series are not aligned: {lhs} versus {rhs} maps")]
    Alignment { lhs: usize, rhs: usize },

    #[error("series are not sampled alike: {lhs} versus {rhs}")]
    SamplingMismatch { lhs: Duration, rhs: Duration },

    #[error("number of subdivisions must be strictly positive")]
    InvalidSubdivisions,

    #[error("no data available for \"{0}\"")]
    NoData(String),
}
