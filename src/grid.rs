use geo::{coord, Point, Rect};

use crate::{error::ParsingError, linspace::Linspace};

#[cfg(feature = "log")]
use log::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of latitude rows in every [Grid] (87.5° to -87.5°).
pub const LATITUDE_ROWS: usize = 71;

/// Number of longitude columns in every [Grid] (-180° to 180°).
pub const LONGITUDE_COLUMNS: usize = 73;

/// [WorldGrid] describes the coordinates of each [Grid] cell,
/// by means of latitude and longitude linear spaces in decimal degrees.
/// It is shared by all the series this library produces, so renderers
/// can project any cell value without recomputation.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldGrid {
    /// Latitude [Linspace], one point per row
    pub latitude: Linspace,

    /// Longitude [Linspace], one point per column
    pub longitude: Linspace,
}

impl Default for WorldGrid {
    fn default() -> Self {
        Self::WORLDWIDE
    }
}

impl WorldGrid {
    /// Worldwide grid, as found in global IONEX maps.
    pub const WORLDWIDE: Self = Self {
        latitude: Linspace::new(87.5, -87.5, -2.5),
        longitude: Linspace::new(-180.0, 180.0, 5.0),
    };

    /// Returns latitude of given row, in decimal degrees.
    pub fn latitude_ddeg(&self, row: usize) -> Option<f64> {
        self.latitude.nth_point(row)
    }

    /// Returns longitude of given column, in decimal degrees.
    pub fn longitude_ddeg(&self, column: usize) -> Option<f64> {
        self.longitude.nth_point(column)
    }

    /// Returns all latitudes (rows), north to south.
    pub fn latitudes(&self) -> Vec<f64> {
        self.latitude.points().collect()
    }

    /// Returns all longitudes (columns), west to east.
    pub fn longitudes(&self) -> Vec<f64> {
        self.longitude.points().collect()
    }

    /// Iterates every cell coordinates as [Point] (x=longitude, y=latitude),
    /// in decimal degrees, following the [Grid] storage order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.latitude.points().flat_map(move |lat| {
            self.longitude
                .points()
                .map(move |long| Point::new(long, lat))
        })
    }

    /// Returns map borders as a [Rect]angle, with coordinates in decimal degrees.
    pub fn bounding_rect_degrees(&self) -> Rect {
        Rect::new(
            coord!( x: self.longitude.start, y: self.latitude.start ),
            coord!( x: self.longitude.end, y: self.latitude.end ),
        )
    }
}

/// [Grid] is one 2D map: [LATITUDE_ROWS] x [LONGITUDE_COLUMNS] values,
/// stored row major (north to south, west to east).
/// Values are either TEC estimates or modeled delays, depending on the producer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<f64>", into = "Vec<f64>"))]
pub struct Grid {
    values: Vec<f64>,
}

impl TryFrom<Vec<f64>> for Grid {
    type Error = ParsingError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        let size = values.len();
        Self::from_values(values).ok_or(ParsingError::GridSize(size))
    }
}

impl From<Grid> for Vec<f64> {
    fn from(grid: Grid) -> Self {
        grid.values
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::filled(0.0)
    }
}

impl Grid {
    /// Total number of cells
    pub const SIZE: usize = LATITUDE_ROWS * LONGITUDE_COLUMNS;

    /// Builds a [Grid] where all cells share the same value.
    pub fn filled(value: f64) -> Self {
        Self {
            values: vec![value; Self::SIZE],
        }
    }

    /// Builds a [Grid] by evaluating `f(row, column)` for every cell.
    pub fn from_fn<F: FnMut(usize, usize) -> f64>(mut f: F) -> Self {
        let mut values = Vec::with_capacity(Self::SIZE);
        for row in 0..LATITUDE_ROWS {
            for column in 0..LONGITUDE_COLUMNS {
                values.push(f(row, column));
            }
        }
        Self { values }
    }

    /// Builds a [Grid] from row major values.
    /// Returns None if the number of values does not match [Self::SIZE].
    pub fn from_values(values: Vec<f64>) -> Option<Self> {
        if values.len() == Self::SIZE {
            Some(Self { values })
        } else {
            None
        }
    }

    /// Assembles a [Grid] from parsed rows.
    /// Oversized maps are cropped to the canonical shape: some data providers
    /// publish maps with trailing rows or values.
    pub(crate) fn from_rows(index: usize, rows: &[Vec<f64>]) -> Result<Self, ParsingError> {
        let shortest = rows.iter().map(|row| row.len()).min().unwrap_or(0);

        if rows.len() < LATITUDE_ROWS || shortest < LONGITUDE_COLUMNS {
            return Err(ParsingError::IncompleteMap {
                index,
                rows: rows.len(),
                columns: shortest,
            });
        }

        let longest = rows.iter().map(|row| row.len()).max().unwrap_or(0);

        if rows.len() > LATITUDE_ROWS || longest > LONGITUDE_COLUMNS {
            #[cfg(feature = "log")]
            warn!(
                "map #{} is oversized ({}x{}): cropped to {}x{}",
                index,
                rows.len(),
                longest,
                LATITUDE_ROWS,
                LONGITUDE_COLUMNS
            );
        }

        let values = rows
            .iter()
            .take(LATITUDE_ROWS)
            .flat_map(|row| row[..LONGITUDE_COLUMNS].iter().copied())
            .collect();

        Ok(Self { values })
    }

    /// Returns value at (row, column), if it exists.
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        if row < LATITUDE_ROWS && column < LONGITUDE_COLUMNS {
            self.values.get(row * LONGITUDE_COLUMNS + column).copied()
        } else {
            None
        }
    }

    /// Returns (rows, columns) dimensions, which are always
    /// ([LATITUDE_ROWS], [LONGITUDE_COLUMNS]).
    pub fn shape(&self) -> (usize, usize) {
        (LATITUDE_ROWS, LONGITUDE_COLUMNS)
    }

    /// Returns row major values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns given row (single latitude), if it exists.
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row >= LATITUDE_ROWS {
            return None;
        }
        let start = row * LONGITUDE_COLUMNS;
        self.values.get(start..start + LONGITUDE_COLUMNS)
    }

    /// Iterates rows, north to south.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.values.chunks(LONGITUDE_COLUMNS)
    }

    /// Applies `f` to every cell, returning a new [Grid].
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Self {
        Self {
            values: self.values.iter().map(|v| f(*v)).collect(),
        }
    }

    /// Combines two [Grid]s cell-wise, returning a new [Grid].
    pub fn zip_with<F: Fn(f64, f64) -> f64>(&self, rhs: &Self, f: F) -> Self {
        Self {
            values: self
                .values
                .iter()
                .zip(rhs.values.iter())
                .map(|(lhs, rhs)| f(*lhs, *rhs))
                .collect(),
        }
    }

    /// Returns smallest value in this [Grid].
    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Returns largest value in this [Grid].
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

impl std::ops::Add for &Grid {
    type Output = Grid;

    fn add(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |lhs, rhs| lhs + rhs)
    }
}

impl std::ops::Sub for &Grid {
    type Output = Grid;

    fn sub(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, |lhs, rhs| lhs - rhs)
    }
}

impl std::ops::Mul<f64> for &Grid {
    type Output = Grid;

    fn mul(self, rhs: f64) -> Self::Output {
        self.map(|value| value * rhs)
    }
}

impl std::ops::Div<f64> for &Grid {
    type Output = Grid;

    fn div(self, rhs: f64) -> Self::Output {
        self.map(|value| value / rhs)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn rows(nrows: usize, ncols: usize, value: f64) -> Vec<Vec<f64>> {
        (0..nrows).map(|_| vec![value; ncols]).collect()
    }

    #[test]
    fn worldwide_grid() {
        let world = WorldGrid::default();

        assert_eq!(world.latitudes().len(), LATITUDE_ROWS);
        assert_eq!(world.longitudes().len(), LONGITUDE_COLUMNS);

        assert_eq!(world.latitude_ddeg(0), Some(87.5));
        assert_eq!(world.latitude_ddeg(70), Some(-87.5));
        assert_eq!(world.longitude_ddeg(0), Some(-180.0));
        assert_eq!(world.longitude_ddeg(72), Some(180.0));

        let points = world.points().collect::<Vec<_>>();
        assert_eq!(points.len(), Grid::SIZE);
        assert_eq!(points[0], Point::new(-180.0, 87.5));
        assert_eq!(points[LONGITUDE_COLUMNS], Point::new(-180.0, 85.0));
        assert_eq!(points[Grid::SIZE - 1], Point::new(180.0, -87.5));

        let rect = world.bounding_rect_degrees();
        assert_eq!(rect.width(), 360.0);
        assert_eq!(rect.height(), 175.0);
    }

    #[test]
    fn grid_from_rows() {
        let grid = Grid::from_rows(0, &rows(71, 73, 1.0)).unwrap();
        assert_eq!(grid, Grid::filled(1.0));
        assert_eq!(grid.shape(), (71, 73));
    }

    #[test]
    fn oversized_grid_cropping() {
        let mut oversized = rows(71, 73, 1.0);
        oversized.extend(rows(71, 73, 2.0));
        oversized[0].push(3.0);

        let grid = Grid::from_rows(12, &oversized).unwrap();
        assert_eq!(grid.values().len(), Grid::SIZE);
        assert_eq!(grid, Grid::filled(1.0));
    }

    #[test]
    fn incomplete_grid() {
        match Grid::from_rows(3, &rows(70, 73, 1.0)) {
            Err(ParsingError::IncompleteMap {
                index,
                rows,
                columns,
            }) => {
                assert_eq!(index, 3);
                assert_eq!(rows, 70);
                assert_eq!(columns, 73);
            },
            other => panic!("unexpected result: {:?}", other),
        }

        let mut short_row = rows(71, 73, 1.0);
        short_row[10].pop();
        assert!(Grid::from_rows(0, &short_row).is_err());
    }

    #[test]
    fn grid_indexing() {
        let grid = Grid::from_fn(|row, column| (row * 100 + column) as f64);

        assert_eq!(grid.get(0, 0), Some(0.0));
        assert_eq!(grid.get(1, 2), Some(102.0));
        assert_eq!(grid.get(70, 72), Some(7072.0));
        assert_eq!(grid.get(71, 0), None);
        assert_eq!(grid.get(0, 73), None);

        let row = grid.row(2).unwrap();
        assert_eq!(row.len(), LONGITUDE_COLUMNS);
        assert_eq!(row[5], 205.0);
        assert!(grid.row(71).is_none());
        assert!(grid.row(usize::MAX).is_none());
        assert_eq!(grid.get(usize::MAX, usize::MAX), None);

        assert_eq!(grid.rows().count(), LATITUDE_ROWS);
        assert_eq!(grid.min(), 0.0);
        assert_eq!(grid.max(), 7072.0);
    }

    #[test]
    fn grid_from_values() {
        let grid = Grid::try_from(vec![1.5; Grid::SIZE]).unwrap();
        assert_eq!(grid, Grid::filled(1.5));
        assert_eq!(Vec::<f64>::from(grid).len(), Grid::SIZE);

        for size in [0, 1, Grid::SIZE - 1, Grid::SIZE + 1] {
            match Grid::try_from(vec![0.0; size]) {
                Err(ParsingError::GridSize(found)) => assert_eq!(found, size),
                other => panic!("unexpected result: {:?}", other),
            }
        }
    }

    #[test]
    fn grid_arithmetics() {
        let lhs = Grid::filled(9.0);
        let rhs = Grid::filled(4.0);

        assert_eq!(&lhs + &rhs, Grid::filled(13.0));
        assert_eq!(&lhs - &rhs, Grid::filled(5.0));
        assert_eq!(&lhs * 2.0, Grid::filled(18.0));
        assert_eq!(&lhs / 2.0, Grid::filled(4.5));

        assert!(Grid::from_values(vec![0.0; 10]).is_none());
        assert!(Grid::from_values(vec![0.0; Grid::SIZE]).is_some());
    }
}
