//! Projection of dataset columns into `ndarray` containers for training.

use crate::dataset::cell::Cell;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::model::ColumnSamples;
use ndarray::{Array1, Array2};

impl Dataset {
    /// Dense matrix of the columns at `indices`, in the given order; an empty
    /// slice selects every column in index order.
    ///
    /// Values are read with [`Cell::as_f64`], so only `Float` cells carry a
    /// value. Rows without a cell for a column read `0.0`.
    pub fn matrix(&self, indices: &[usize]) -> Result<Array2<f64>> {
        let indices: Vec<usize> = if indices.is_empty() {
            self.columns().map(|c| c.index()).collect()
        } else {
            self.check_indices(indices)?;
            indices.to_vec()
        };
        Ok(Array2::from_shape_fn(
            (self.rows.len(), indices.len()),
            |(row, j)| self.cell(row, indices[j]).map_or(0.0, Cell::as_f64),
        ))
    }

    /// Label vector read from the column at `index`.
    pub fn labels(&self, index: usize) -> Result<Array1<f64>> {
        self.check_indices(&[index])?;
        Ok((0..self.rows.len())
            .map(|row| self.cell(row, index).map_or(0.0, Cell::as_f64))
            .collect())
    }

    /// Lazy training view over the given feature columns and label column.
    pub fn column_samples(&self, features: &[usize], label: usize) -> Result<ColumnSamples<'_>> {
        ColumnSamples::new(self, features.to_vec(), label)
    }

    /// Positional indices of the named columns, in the given order.
    pub fn indices_of(&self, names: &[&str]) -> Result<Vec<usize>> {
        names
            .iter()
            .map(|name| self.column_position(name).map(|pos| self.columns[pos].index))
            .collect()
    }

    fn check_indices(&self, indices: &[usize]) -> Result<()> {
        match indices
            .iter()
            .find(|&&i| !self.columns_by_index.contains_key(&i))
        {
            Some(&missing) => Err(Error::UnknownColumnIndex(missing)),
            None => Ok(()),
        }
    }
}
