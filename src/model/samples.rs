//! Sources of training samples.
//!
//! A regressor reads features and labels through the [`Samples`] trait, so
//! it trains equally on a dense `ndarray` matrix or directly on columns of a
//! [`Dataset`].

use crate::dataset::{Cell, Dataset};
use crate::error::{Error, Result};
use ndarray::{ArrayView1, ArrayView2};

/// Row-addressable features with one label per row.
pub trait Samples {
    /// Number of rows.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of features per row.
    fn n_features(&self) -> usize;

    /// Feature `j` of row `row`.
    fn feature(&self, row: usize, j: usize) -> f64;

    fn label(&self, row: usize) -> f64;

    /// Writes every feature of `row` into `buf`, replacing its contents.
    fn features_into(&self, row: usize, buf: &mut Vec<f64>) {
        buf.clear();
        buf.extend((0..self.n_features()).map(|j| self.feature(row, j)));
    }
}

/// Samples borrowed from a dense feature matrix and label vector.
#[derive(Clone, Copy, Debug)]
pub struct MatrixSamples<'a> {
    x: ArrayView2<'a, f64>,
    y: ArrayView1<'a, f64>,
}

impl<'a> MatrixSamples<'a> {
    /// # Errors
    ///
    /// [`Error::ShapeMismatch`] when `x` and `y` disagree on the row count.
    pub fn new(x: ArrayView2<'a, f64>, y: ArrayView1<'a, f64>) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(Error::ShapeMismatch {
                rows: x.nrows(),
                labels: y.len(),
            });
        }
        Ok(Self { x, y })
    }

    pub fn features(&self) -> ArrayView2<'a, f64> {
        self.x
    }

    pub fn labels(&self) -> ArrayView1<'a, f64> {
        self.y
    }
}

impl Samples for MatrixSamples<'_> {
    fn len(&self) -> usize {
        self.x.nrows()
    }

    fn n_features(&self) -> usize {
        self.x.ncols()
    }

    fn feature(&self, row: usize, j: usize) -> f64 {
        self.x[[row, j]]
    }

    fn label(&self, row: usize) -> f64 {
        self.y[row]
    }

    fn features_into(&self, row: usize, buf: &mut Vec<f64>) {
        buf.clear();
        buf.extend(self.x.row(row).iter().copied());
    }
}

/// Samples read lazily from dataset columns.
///
/// Feature `j` of a row is the cell at `features[j]` through the row's index
/// view, read with [`Cell::as_f64`]; a row without a cell there reads `0.0`.
#[derive(Clone, Debug)]
pub struct ColumnSamples<'a> {
    dataset: &'a Dataset,
    features: Vec<usize>,
    label: usize,
}

impl<'a> ColumnSamples<'a> {
    /// # Errors
    ///
    /// [`Error::UnknownColumnIndex`] for any index with no column.
    pub fn new(dataset: &'a Dataset, features: Vec<usize>, label: usize) -> Result<Self> {
        if let Some(&missing) = features
            .iter()
            .chain(std::iter::once(&label))
            .find(|&&i| dataset.column_by_index(i).is_none())
        {
            return Err(Error::UnknownColumnIndex(missing));
        }
        Ok(Self {
            dataset,
            features,
            label,
        })
    }

    pub fn feature_indices(&self) -> &[usize] {
        &self.features
    }

    pub fn label_index(&self) -> usize {
        self.label
    }

    fn read(&self, row: usize, index: usize) -> f64 {
        self.dataset.cell(row, index).map_or(0.0, Cell::as_f64)
    }
}

impl Samples for ColumnSamples<'_> {
    fn len(&self) -> usize {
        self.dataset.len()
    }

    fn n_features(&self) -> usize {
        self.features.len()
    }

    fn feature(&self, row: usize, j: usize) -> f64 {
        self.read(row, self.features[j])
    }

    fn label(&self, row: usize) -> f64 {
        self.read(row, self.label)
    }
}
