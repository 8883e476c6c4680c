//! Strategy traits consumed by the dataset transforms.

use crate::dataset::{Cell, Column, Dataset};

/// Reduces one column of a dataset to a single cell.
///
/// Returning `None` signals that the strategy does not apply (unsupported
/// column type, no present values); the calling transform is then a no-op.
pub trait Aggregate {
    fn compute(&self, dataset: &Dataset, column: &Column) -> Option<Cell>;
}

impl<F> Aggregate for F
where
    F: Fn(&Dataset, &Column) -> Option<Cell>,
{
    fn compute(&self, dataset: &Dataset, column: &Column) -> Option<Cell> {
        self(dataset, column)
    }
}

/// Derives an integer code from a string cell.
pub trait StringHash {
    fn code(&self, cell: &Cell) -> i64;
}

impl<F> StringHash for F
where
    F: Fn(&Cell) -> i64,
{
    fn code(&self, cell: &Cell) -> i64 {
        self(cell)
    }
}
