//! Fixed-edge binning of continuous values
//!
//! This module maps continuous values onto ordinal bins delimited by a fixed,
//! strictly increasing list of edges. Every bin is right-closed: with edges
//! `[e0, e1, ..., ek]` bin `i` covers `(e_i, e_{i+1}]`.
//!
//! Values at or below the first edge, above the last edge, or `NaN` belong to
//! no bin.
//!
//! # Examples
//!
//! ```
//! use oncostat_stats::binning::IntervalBins;
//!
//! let bins = IntervalBins::new(vec![0.0, 10.0, 20.0]).unwrap();
//!
//! assert_eq!(bins.bin_of(10.0), Some(0)); // right edge is inclusive
//! assert_eq!(bins.bin_of(10.5), Some(1));
//! assert_eq!(bins.bin_of(0.0), None); // left edge is exclusive
//! assert_eq!(bins.bin_of(25.0), None);
//! ```

/// Right-closed intervals defined by strictly increasing edges.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalBins {
    edges: Vec<f64>,
}

impl IntervalBins {
    /// Creates bins from their edges.
    ///
    /// Returns `None` unless there are at least two finite, strictly
    /// increasing edges.
    #[must_use]
    pub fn new(edges: Vec<f64>) -> Option<Self> {
        if edges.len() < 2
            || edges.iter().any(|e| !e.is_finite())
            || !edges.is_sorted_by(|a, b| a < b)
        {
            return None;
        }
        Some(Self { edges })
    }

    /// Number of bins (one less than the number of edges).
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len() - 1
    }

    /// Always `false`: a valid set of edges defines at least one bin.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The `(lower, upper]` bounds of bin `index`.
    #[must_use]
    pub fn bounds(&self, index: usize) -> Option<(f64, f64)> {
        let lower = *self.edges.get(index)?;
        let upper = *self.edges.get(index + 1)?;
        Some((lower, upper))
    }

    /// Index of the bin containing `value`.
    #[must_use]
    pub fn bin_of(&self, value: f64) -> Option<usize> {
        // Number of edges strictly below the value; NaN compares below nothing.
        let below = self.edges.partition_point(|&edge| edge < value);
        if below == 0 || below == self.edges.len() {
            return None;
        }
        Some(below - 1)
    }
}
