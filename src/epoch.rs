//! Epoch and calendar date helpers
use crate::{
    error::ParsingError,
    prelude::{Epoch, TimeScale, Unit},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parses IONEX "YYYY MM DD HH MM SS" UTC description.
pub(crate) fn parse_utc(s: &str) -> Result<Epoch, ParsingError> {
    let (mut y, mut m, mut d, mut hh, mut mm, mut ss) = (0_i32, 0_u8, 0_u8, 0_u8, 0_u8, 0_u8);
    for (index, field) in s.split_ascii_whitespace().enumerate() {
        match index {
            0 => {
                y = field
                    .trim()
                    .parse::<i32>()
                    .map_err(|_| ParsingError::EpochParsing)?;
            },
            1 => {
                m = field
                    .trim()
                    .parse::<u8>()
                    .map_err(|_| ParsingError::EpochParsing)?;
            },
            2 => {
                d = field
                    .trim()
                    .parse::<u8>()
                    .map_err(|_| ParsingError::EpochParsing)?;
            },
            3 => {
                hh = field
                    .trim()
                    .parse::<u8>()
                    .map_err(|_| ParsingError::EpochParsing)?;
            },
            4 => {
                mm = field
                    .trim()
                    .parse::<u8>()
                    .map_err(|_| ParsingError::EpochParsing)?;
            },
            5 => {
                ss = field
                    .trim()
                    .parse::<u8>()
                    .map_err(|_| ParsingError::EpochParsing)?;
            },
            _ => {},
        }
    }
    Epoch::maybe_from_gregorian(y, m, d, hh, mm, ss, 0, TimeScale::UTC)
        .map_err(|_| ParsingError::EpochParsing)
}

/// [CalendarDate] is a validated Gregorian date, the daily
/// granularity every product of this library is organized by.
/// It can only be obtained through [CalendarDate::new] or parsing,
/// and is serialized as "YYYY-MM-DD".
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct CalendarDate {
    year: i32,
    month: u8,
    day: u8,
}

impl CalendarDate {
    /// First day of the GPS timescale (1980-01-06, a Sunday)
    pub const GPS_EPOCH: Self = Self {
        year: 1980,
        month: 1,
        day: 6,
    };

    /// Year (4 digits)
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month (1-12)
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Day of month (1-31)
    pub fn day(&self) -> u8 {
        self.day
    }

    /// Builds a new [CalendarDate], verifying it actually exists.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, ParsingError> {
        Epoch::maybe_from_gregorian(year, month, day, 0, 0, 0, 0, TimeScale::GPST)
            .map_err(|_| ParsingError::DateParsing)?;

        Ok(Self { year, month, day })
    }

    /// Returns midnight of this day, expressed in given [TimeScale].
    pub fn to_epoch(&self, time_scale: TimeScale) -> Epoch {
        Epoch::from_gregorian(self.year, self.month, self.day, 0, 0, 0, 0, time_scale)
    }

    /// Returns the number of whole days elapsed since `rhs`
    /// (negative if `rhs` is past this date).
    pub fn days_since(&self, rhs: &Self) -> i64 {
        let dt = self.to_epoch(TimeScale::GPST) - rhs.to_epoch(TimeScale::GPST);
        dt.to_unit(Unit::Day).round() as i64
    }

    /// Returns day of year, 1 being January 1st.
    pub fn day_of_year(&self) -> u32 {
        let january_1st = Self {
            year: self.year,
            month: 1,
            day: 1,
        };
        self.days_since(&january_1st) as u32 + 1
    }
}

impl std::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = ParsingError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        date.to_string()
    }
}

impl std::str::FromStr for CalendarDate {
    type Err = ParsingError;

    /// Parses [CalendarDate] from "YYYY-MM-DD" description.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut items = s.trim().split('-');

        let year = items
            .next()
            .and_then(|y| y.parse::<i32>().ok())
            .ok_or(ParsingError::DateParsing)?;

        let month = items
            .next()
            .and_then(|m| m.parse::<u8>().ok())
            .ok_or(ParsingError::DateParsing)?;

        let day = items
            .next()
            .and_then(|d| d.parse::<u8>().ok())
            .ok_or(ParsingError::DateParsing)?;

        if items.next().is_some() {
            return Err(ParsingError::DateParsing);
        }

        Self::new(year, month, day)
    }
}
