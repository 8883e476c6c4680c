//! Aggregates producing reference scalars for normalization.

use crate::dataset::{Cell, Column, ColumnType, Dataset};
use crate::preprocessing::traits::Aggregate;

/// Largest present value of an `Int` or `Float` column.
///
/// The result keeps the column's type. Other types, and columns without
/// values, yield `None`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Max;

impl Aggregate for Max {
    fn compute(&self, dataset: &Dataset, column: &Column) -> Option<Cell> {
        let values = dataset.values(column.name());
        match column.column_type() {
            ColumnType::Int => values
                .filter_map(|c| match c {
                    Cell::Int(v) => Some(*v),
                    _ => None,
                })
                .max()
                .map(Cell::Int),
            ColumnType::Float => values
                .filter_map(Cell::numeric)
                .max_by(f64::total_cmp)
                .map(Cell::Float),
            ColumnType::String | ColumnType::Timestamp => None,
        }
    }
}
