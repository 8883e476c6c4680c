//! Aggregates producing replacement values for missing cells.

use crate::dataset::{Cell, Column, ColumnType, Dataset};
use crate::preprocessing::traits::Aggregate;

/// Mean of the present values of an `Int` or `Float` column.
///
/// Integer columns are summed in `i128` and use truncating integer division
/// so the result keeps the column's type. Other types, and columns without values, yield `None`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Mean;

impl Aggregate for Mean {
    fn compute(&self, dataset: &Dataset, column: &Column) -> Option<Cell> {
        let values = dataset.values(column.name());
        match column.column_type() {
            ColumnType::Int => {
                let (total, count) = values
                    .filter_map(|c| match c {
                        Cell::Int(v) => Some(i128::from(*v)),
                        _ => None,
                    })
                    .fold((0i128, 0i128), |(t, n), v| (t + v, n + 1));
                if count == 0 {
                    return None;
                }
                i64::try_from(total / count).ok().map(Cell::Int)
            }
            ColumnType::Float => {
                let (total, count) = values
                    .filter_map(Cell::numeric)
                    .fold((0.0, 0usize), |(t, n), v| (t + v, n + 1));
                (count > 0).then(|| Cell::Float(total / count as f64))
            }
            ColumnType::String | ColumnType::Timestamp => None,
        }
    }
}

/// A fixed replacement cell, whatever the column holds.
#[derive(Clone, Debug, PartialEq)]
pub struct Constant(pub Cell);

impl Aggregate for Constant {
    fn compute(&self, _dataset: &Dataset, _column: &Column) -> Option<Cell> {
        Some(self.0.clone())
    }
}
