use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

// ---------------------------------------------------------------------------
// Dataset – the loaded x/y point set
// ---------------------------------------------------------------------------

/// The full parsed point set.  Immutable once built; a reload replaces it.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    x: Vec<f64>,
    y: Vec<f64>,
    /// File the points were read from (display only).
    source: Option<PathBuf>,
}

impl Dataset {
    /// Build a dataset from two sequences, rejecting mismatched lengths.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            bail!("x has {} values but y has {}", x.len(), y.len());
        }
        Ok(Dataset { x, y, source: None })
    }

    /// Attach the path the dataset was loaded from.
    pub fn with_source(mut self, path: &Path) -> Self {
        self.source = Some(path.to_path_buf());
        self
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the dataset has no points.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Iterate over `(x, y)` pairs in file order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Finite `(min, max)` of the x values, if any.
    pub fn x_bounds(&self) -> Option<(f64, f64)> {
        finite_bounds(self.x.iter().copied())
    }

    /// Finite `(min, max)` of the y values, if any.
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        finite_bounds(self.y.iter().copied())
    }
}

/// Min/max over the finite values of an iterator.
pub fn finite_bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_lengths() {
        let err = Dataset::new(vec![0.0, 1.0], vec![0.0]).unwrap_err();
        assert!(err.to_string().contains("x has 2 values but y has 1"));
    }

    #[test]
    fn bounds_skip_non_finite_values() {
        let ds = Dataset::new(vec![3.0, f64::NAN, -1.0], vec![0.0, 1.0, f64::INFINITY]).unwrap();
        assert_eq!(ds.x_bounds(), Some((-1.0, 3.0)));
        assert_eq!(ds.y_bounds(), Some((0.0, 1.0)));
    }

    #[test]
    fn empty_dataset_has_no_bounds() {
        let ds = Dataset::new(Vec::new(), Vec::new()).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.x_bounds(), None);
    }
}
