//! Synthetic content generators and comparison helpers
use crate::prelude::{Grid, GridSeries, LATITUDE_ROWS, LONGITUDE_COLUMNS};

/// Number of values per data line, as published
const VALUES_PER_LINE: usize = 16;

/// Formats one labelled line (label starts at column 61).
fn labelled(content: &str, label: &str) -> String {
    format!("{:<60}{}\n", content, label)
}

/// Formats the "YYYY MM DD HH MM SS" description of map #index
/// of 2024-01-06, maps being `interval_s` apart.
fn map_epoch(index: usize, interval_s: usize) -> String {
    let seconds = interval_s * index;
    let (days, seconds) = (seconds / 86400, seconds % 86400);
    format!(
        "{:6}{:6}{:6}{:6}{:6}{:6}",
        2024,
        1,
        6 + days,
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

/// Synthetic global TEC maps file generator.
/// `value(map, row, column)` gives each stored value.
pub struct SyntheticMaps<F: Fn(usize, usize, usize) -> i64> {
    /// Number of TEC maps
    pub maps: usize,

    /// Seconds between two maps
    pub interval_s: usize,

    /// Stored value generator
    pub value: F,

    /// Generates the header section
    pub header: bool,

    /// Generates one RMS map per TEC map (constant value)
    pub rms: Option<i64>,

    /// Extra latitude rows appended to the last TEC map
    pub extra_rows: usize,

    /// Omits the closing marker of the last TEC map
    pub unterminated: bool,

    /// Stops the last TEC map after this many latitude rows
    pub truncated_rows: Option<usize>,
}

impl<F: Fn(usize, usize, usize) -> i64> SyntheticMaps<F> {
    /// Complete file with header section, no RMS maps.
    pub fn new(maps: usize, value: F) -> Self {
        Self {
            maps,
            value,
            interval_s: 7200,
            header: true,
            rms: None,
            extra_rows: 0,
            unterminated: false,
            truncated_rows: None,
        }
    }

    fn write_header(&self, content: &mut String) {
        content.push_str(&labelled(
            "     1.0            IONOSPHERE MAPS     GNSS",
            "IONEX VERSION / TYPE",
        ));
        content.push_str(&labelled("SYNTHETIC GLOBAL IONOSPHERE MAPS", "COMMENT"));
        content.push_str(&labelled(&map_epoch(0, self.interval_s), "EPOCH OF FIRST MAP"));
        content.push_str(&labelled(
            &map_epoch(self.maps.saturating_sub(1), self.interval_s),
            "EPOCH OF LAST MAP",
        ));
        content.push_str(&labelled(&format!("{:6}", self.interval_s), "INTERVAL"));
        content.push_str(&labelled(&format!("{:6}", self.maps), "# OF MAPS IN FILE"));
        content.push_str(&labelled("    -1", "EXPONENT"));
        content.push_str(&labelled("", "END OF HEADER"));
    }

    fn rows<V: Fn(usize, usize) -> i64>(content: &mut String, rows: usize, value: V) {
        for row in 0..rows {
            let latitude = 87.5 - 2.5 * row as f64;

            content.push_str(&labelled(
                &format!("  {:6.1}-180.0 180.0   5.0 450.0", latitude),
                "LAT/LON1/LON2/DLON/H",
            ));

            let values = (0..LONGITUDE_COLUMNS)
                .map(|column| value(row, column))
                .collect::<Vec<_>>();

            for chunk in values.chunks(VALUES_PER_LINE) {
                for value in chunk {
                    content.push_str(&format!("{:5}", value));
                }
                content.push('\n');
            }
        }
    }

    /// Generates the file content.
    pub fn generate(&self) -> String {
        let mut content = String::new();

        if self.header {
            self.write_header(&mut content);
        }

        for map in 0..self.maps {
            content.push_str(&labelled(&format!("{:6}", map + 1), "START OF TEC MAP"));
            content.push_str(&labelled(
                &map_epoch(map, self.interval_s),
                "EPOCH OF CURRENT MAP",
            ));

            let last = map == self.maps - 1;

            let rows = if last {
                self.truncated_rows
                    .unwrap_or(LATITUDE_ROWS + self.extra_rows)
            } else {
                LATITUDE_ROWS
            };

            Self::rows(&mut content, rows, |row, column| {
                (self.value)(map, row, column)
            });

            if !(last && self.unterminated) {
                content.push_str(&labelled(&format!("{:6}", map + 1), "END OF TEC MAP"));
            }
        }

        if let Some(rms) = self.rms {
            if !self.unterminated {
                for map in 0..self.maps {
                    content.push_str(&labelled(&format!("{:6}", map + 1), "START OF RMS MAP"));
                    content.push_str(&labelled(
                        &map_epoch(map, self.interval_s),
                        "EPOCH OF CURRENT MAP",
                    ));
                    Self::rows(&mut content, LATITUDE_ROWS, |_, _| rms);
                    content.push_str(&labelled(&format!("{:6}", map + 1), "END OF RMS MAP"));
                }
            }
        }

        if !self.unterminated {
            content.push_str(&labelled("", "END OF FILE"));
        }

        content
    }
}

/// Navigation file header that describes given coefficients.
pub fn navigation_content(alpha: [f64; 4], beta: [f64; 4]) -> String {
    let mut content = labelled(
        "     3.04           N: GNSS NAV DATA    M: MIXED",
        "RINEX VERSION / TYPE",
    );

    content.push_str(&labelled(
        &format!(
            "GPSA {:12.4e}{:12.4e}{:12.4e}{:12.4e}",
            alpha[0], alpha[1], alpha[2], alpha[3]
        ),
        "IONOSPHERIC CORR",
    ));

    content.push_str(&labelled(
        &format!(
            "GPSB {:12.4e}{:12.4e}{:12.4e}{:12.4e}",
            beta[0], beta[1], beta[2], beta[3]
        ),
        "IONOSPHERIC CORR",
    ));

    content.push_str(&labelled("", "END OF HEADER"));
    content
}

/// Typical broadcast coefficients
pub fn typical_coefficients() -> ([f64; 4], [f64; 4]) {
    (
        [1.1176E-08, 7.4506E-09, -5.9605E-08, -5.9605E-08],
        [9.0112E+04, 1.6384E+04, -1.9661E+05, -6.5536E+04],
    )
}

/// Verifies every cell of `dut` is within `tolerance` of `expected`.
pub fn grid_approx_eq(dut: &Grid, expected: &Grid, tolerance: f64) {
    for (index, (lhs, rhs)) in dut.values().iter().zip(expected.values().iter()).enumerate() {
        assert!(
            (lhs - rhs).abs() <= tolerance,
            "cell ({}, {}): {} versus {}",
            index / LONGITUDE_COLUMNS,
            index % LONGITUDE_COLUMNS,
            lhs,
            rhs,
        );
    }
}

/// Verifies every [Grid] of `dut` is constant and equal to `expected`.
pub fn series_constant_eq(dut: &GridSeries, expected: &[f64], tolerance: f64) {
    assert_eq!(dut.len(), expected.len(), "invalid series length");

    for (index, (grid, value)) in dut.iter().zip(expected.iter()).enumerate() {
        assert!(
            (grid.min() - value).abs() <= tolerance && (grid.max() - value).abs() <= tolerance,
            "grid #{}: [{}, {}] versus {}",
            index,
            grid.min(),
            grid.max(),
            value,
        );
    }
}
