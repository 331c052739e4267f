#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Linear space as used in IONEX grid definitions.
/// Linear space starting from `start` ranging to `end` (included).
/// Spacing is signed: latitudes are usually described north to south.
#[derive(Debug, Copy, Clone, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Linspace {
    /// First value
    pub start: f64,

    /// Last value (included)
    pub end: f64,

    /// Spacing (increment)
    pub spacing: f64,
}

impl Linspace {
    /// Builds a new Linear space
    pub const fn new(start: f64, end: f64, spacing: f64) -> Self {
        Self {
            start,
            end,
            spacing,
        }
    }

    /// Returns smallest value between [Self::start] and [Self::end]
    pub fn min(&self) -> f64 {
        self.start.min(self.end)
    }

    /// Returns largest value between [Self::start] and [Self::end]
    pub fn max(&self) -> f64 {
        self.start.max(self.end)
    }

    /// Returns (smallest, largest) values tuplet
    pub fn minmax(&self) -> (f64, f64) {
        (self.min(), self.max())
    }

    /// Returns total width
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    /// Returns true if self is a single point space
    pub fn is_single_point(&self) -> bool {
        (self.end == self.start) && self.spacing == 0.0
    }

    /// Returns grid length, in terms of data points (both ends included).
    pub fn length(&self) -> usize {
        if self.is_single_point() {
            1
        } else {
            (self.width() / self.spacing).abs().round() as usize + 1
        }
    }

    /// Returns the n-th point of this [Linspace], if it exists.
    pub fn nth_point(&self, n: usize) -> Option<f64> {
        if n < self.length() {
            Some(self.start + n as f64 * self.spacing)
        } else {
            None
        }
    }

    /// Iterates all points of this [Linspace], from start to end.
    pub fn points(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.length()).map(move |n| self.start + n as f64 * self.spacing)
    }
}

impl From<(f64, f64, f64)> for Linspace {
    fn from(tuple: (f64, f64, f64)) -> Self {
        Self {
            start: tuple.0,
            end: tuple.1,
            spacing: tuple.2,
        }
    }
}
