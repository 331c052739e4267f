use itertools::Itertools;

use crate::{
    error::Error,
    grid::Grid,
    prelude::{Duration, Unit},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [GridSeries] is a time series of [Grid]s, evenly spaced in time.
/// Index 0 is the start of day, index `n` is `n * sampling_period` later.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridSeries {
    grids: Vec<Grid>,

    /// Time gap between two consecutive [Grid]s.
    pub sampling_period: Duration,
}

impl Default for GridSeries {
    fn default() -> Self {
        Self {
            grids: Default::default(),
            sampling_period: Duration::from_hours(2.0),
        }
    }
}

impl std::ops::Index<usize> for GridSeries {
    type Output = Grid;

    fn index(&self, index: usize) -> &Self::Output {
        &self.grids[index]
    }
}

impl<'a> IntoIterator for &'a GridSeries {
    type Item = &'a Grid;
    type IntoIter = std::slice::Iter<'a, Grid>;

    fn into_iter(self) -> Self::IntoIter {
        self.grids.iter()
    }
}

impl GridSeries {
    /// Builds a new [GridSeries] from [Grid]s, sampled at `sampling_period`.
    pub fn new(grids: Vec<Grid>, sampling_period: Duration) -> Self {
        Self {
            grids,
            sampling_period,
        }
    }

    /// Number of [Grid]s in this series.
    pub fn len(&self) -> usize {
        self.grids.len()
    }

    /// Returns true if this series does not contain a single [Grid].
    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    /// Returns [Grid] at index, if it exists.
    pub fn get(&self, index: usize) -> Option<&Grid> {
        self.grids.get(index)
    }

    /// Returns first [Grid] (start of day).
    pub fn first(&self) -> Option<&Grid> {
        self.grids.first()
    }

    /// Returns last [Grid].
    pub fn last(&self) -> Option<&Grid> {
        self.grids.last()
    }

    /// Iterates [Grid]s in chronological order.
    pub fn iter(&self) -> std::slice::Iter<'_, Grid> {
        self.grids.iter()
    }

    /// Returns [Grid]s in chronological order.
    pub fn grids(&self) -> &[Grid] {
        &self.grids
    }

    /// Returns elapsed time since start of day, for given index.
    pub fn time_of_day(&self, index: usize) -> Duration {
        Duration::from_seconds(self.sampling_period.to_seconds() * index as f64)
    }

    /// Formats the time of day of given index as "HH:MM".
    pub fn time_of_day_hhmm(&self, index: usize) -> String {
        let minutes = self.time_of_day(index).to_unit(Unit::Minute).round() as u64;
        format!("{:02}:{:02}", minutes / 60, minutes % 60)
    }

    /// Applies `f` to every [Grid], preserving the sampling.
    pub fn map<F: Fn(&Grid) -> Grid>(&self, f: F) -> Self {
        Self {
            grids: self.grids.iter().map(f).collect(),
            sampling_period: self.sampling_period,
        }
    }

    /// Returns a new [GridSeries] made of the first `len` [Grid]s at most.
    pub fn truncated(&self, len: usize) -> Self {
        Self {
            grids: self.grids.iter().take(len).cloned().collect(),
            sampling_period: self.sampling_period,
        }
    }

    /// Densifies this [GridSeries] by linear interpolation between
    /// consecutive [Grid]s. Each pair (i, i+1) contributes grid i followed
    /// by `subdivisions - 1` intermediate grids, weighted `j / subdivisions`.
    /// The last [Grid] is only emitted once, at the very end.
    ///
    /// Resulting length is `(N - 1) * subdivisions + 1`, or 0 when this
    /// series contains less than two [Grid]s.
    ///
    /// ```
    /// use tecmaps::prelude::*;
    ///
    /// let series = GridSeries::new(
    ///     vec![Grid::filled(0.0), Grid::filled(10.0)],
    ///     Duration::from_hours(2.0),
    /// );
    ///
    /// let dense = series.temporal_interpolation(8)
    ///     .unwrap();
    ///
    /// assert_eq!(dense.len(), 9);
    /// assert_eq!(dense[1], Grid::filled(1.25));
    /// assert_eq!(dense.sampling_period, Duration::from_seconds(900.0));
    /// ```
    pub fn temporal_interpolation(&self, subdivisions: usize) -> Result<Self, Error> {
        if subdivisions == 0 {
            return Err(Error::InvalidSubdivisions);
        }

        let sampling_period =
            Duration::from_seconds(self.sampling_period.to_seconds() / subdivisions as f64);

        if self.grids.len() < 2 {
            return Ok(Self::new(Vec::new(), sampling_period));
        }

        let mut grids = Vec::with_capacity((self.grids.len() - 1) * subdivisions + 1);

        for (current, next) in self.grids.iter().tuple_windows() {
            grids.push(current.clone());

            for j in 1..subdivisions {
                let alpha = j as f64 / subdivisions as f64;
                grids.push(current.zip_with(next, |lhs, rhs| (1.0 - alpha) * lhs + alpha * rhs));
            }
        }

        if let Some(last) = self.grids.last() {
            grids.push(last.clone());
        }

        Ok(Self::new(grids, sampling_period))
    }

    /// Cell-wise difference `self[i] - rhs[i]` of two aligned [GridSeries].
    /// Both series must have the same length, they are never truncated
    /// nor padded here.
    pub fn delta(&self, rhs: &Self) -> Result<Self, Error> {
        if self.len() != rhs.len() {
            return Err(Error::Alignment {
                lhs: self.len(),
                rhs: rhs.len(),
            });
        }

        let grids = self
            .grids
            .iter()
            .zip(rhs.grids.iter())
            .map(|(lhs, rhs)| lhs - rhs)
            .collect();

        Ok(Self::new(grids, self.sampling_period))
    }
}
