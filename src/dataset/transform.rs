//! In-place column transforms: imputation, scaling and string encodings.
//!
//! Transforms that do not apply to a column's type are no-ops logged at
//! `debug` level, not errors.

use crate::dataset::cell::Cell;
use crate::dataset::column::{Column, ColumnType};
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::preprocessing::{Aggregate, StringHash};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// Name of the constant bias column inserted by [`Dataset::add_x0`].
pub const BIAS_COLUMN: &str = "x0";

impl Dataset {
    /// Replaces every missing cell of `name` with the value computed by
    /// `strategy`.
    ///
    /// The replacement is stored once; all previously missing rows share that
    /// single slot through both views. Returns the number of rows filled, 0
    /// when the strategy yields nothing.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] when the replacement's type differs from the
    /// column's declared type.
    pub fn fill(&mut self, name: &str, strategy: &impl Aggregate) -> Result<usize> {
        let pos = self.column_position(name)?;
        let column = &self.columns[pos];
        let Some(replacement) = strategy.compute(self, column) else {
            debug!(column = name, "fill strategy yields no value, skipping");
            return Ok(0);
        };
        if replacement.column_type() != Some(column.column_type()) {
            return Err(Error::TypeMismatch {
                column: name.to_string(),
                expected: column.column_type(),
                got: replacement.type_name().to_string(),
            });
        }

        let missing: Vec<usize> = (0..self.rows.len())
            .filter(|&row| {
                self.rows[row]
                    .by_name
                    .get(name)
                    .is_some_and(|&slot| self.cells[slot].is_empty())
            })
            .collect();
        if missing.is_empty() {
            return Ok(0);
        }

        let slot = self.push_cell(replacement);
        for &row in &missing {
            self.bind(row, pos, slot);
        }
        info!(column = name, filled = missing.len(), "filled missing cells");
        Ok(missing.len())
    }

    /// Divides every present cell of a numeric column by the reference value
    /// computed by `strategy`, promoting the column to `Float`.
    ///
    /// Slots shared between rows are divided once. Returns `false` when the
    /// column is not numeric or the strategy yields nothing.
    ///
    /// # Errors
    ///
    /// [`Error::UndefinedScalar`] when the reference is zero, not finite or
    /// not numeric. Nothing is modified in that case.
    pub fn normalize(&mut self, name: &str, strategy: &impl Aggregate) -> Result<bool> {
        let pos = self.column_position(name)?;
        let column = &self.columns[pos];
        if !matches!(column.column_type(), ColumnType::Int | ColumnType::Float) {
            debug!(column = name, column_type = %column.column_type(), "normalize skipped");
            return Ok(false);
        }
        let Some(reference) = strategy.compute(self, column) else {
            debug!(column = name, "normalize strategy yields no value, skipping");
            return Ok(false);
        };
        match reference.numeric() {
            Some(v) if v != 0.0 && v.is_finite() => {}
            _ => {
                return Err(Error::UndefinedScalar {
                    column: name.to_string(),
                })
            }
        }

        for slot in self.column_slots(pos) {
            let cell = &mut self.cells[slot];
            if !cell.is_empty() {
                cell.div_assign(&reference);
            }
        }
        self.columns[pos].column_type = ColumnType::Float;
        info!(column = name, reference = %reference, "normalized column");
        Ok(true)
    }

    /// Rewrites every present cell of a string column as `Int(hash(cell))`
    /// and promotes the column to `Int`.
    ///
    /// Returns `false` for non-string columns.
    pub fn normalize_string_by_hash(&mut self, name: &str, hash: &impl StringHash) -> Result<bool> {
        let pos = self.column_position(name)?;
        if !self.is_string_column(pos) {
            return Ok(false);
        }
        for slot in self.column_slots(pos) {
            let cell = &mut self.cells[slot];
            if !cell.is_empty() {
                *cell = Cell::Int(hash.code(cell));
            }
        }
        self.columns[pos].column_type = ColumnType::Int;
        Ok(true)
    }

    /// Replaces each distinct string with its rank among the sorted distinct
    /// values, promoting the column to `Int`.
    ///
    /// Returns the value → code table, or `None` for non-string columns.
    pub fn normalize_string_by_encode(&mut self, name: &str) -> Result<Option<BTreeMap<String, i64>>> {
        let pos = self.column_position(name)?;
        if !self.is_string_column(pos) {
            return Ok(None);
        }
        let codes: BTreeMap<String, i64> = self
            .distinct_strings(pos)
            .into_iter()
            .enumerate()
            .map(|(code, value)| (value, code as i64))
            .collect();

        for slot in self.column_slots(pos) {
            let cell = &mut self.cells[slot];
            if let Some(&code) = cell.as_str().and_then(|s| codes.get(s)) {
                *cell = Cell::Int(code);
            }
        }
        self.columns[pos].column_type = ColumnType::Int;
        info!(column = name, distinct = codes.len(), "label-encoded column");
        Ok(Some(codes))
    }

    /// Expands a string column into one `Float` indicator column per distinct
    /// value, named `<name>_onehot_<value>` and placed after the current
    /// highest index in sorted value order.
    ///
    /// The source column is kept. Rows whose source value is missing get no
    /// cells in the new columns. Returns the generated names, empty for
    /// non-string columns.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateColumn`] if a generated name is already taken; the
    /// dataset is left untouched.
    pub fn normalize_string_by_one_hot(&mut self, name: &str) -> Result<Vec<String>> {
        let pos = self.column_position(name)?;
        if !self.is_string_column(pos) {
            return Ok(Vec::new());
        }
        let values = self.distinct_strings(pos);
        let names: Vec<String> = values.iter().map(|v| one_hot_name(name, v)).collect();
        if let Some(taken) = names.iter().find(|n| self.columns_by_name.contains_key(*n)) {
            return Err(Error::DuplicateColumn(taken.clone()));
        }

        let base = self.max_index().map_or(0, |i| i + 1);
        let positions: BTreeMap<&str, usize> = values
            .iter()
            .zip(&names)
            .enumerate()
            .map(|(offset, (value, column_name))| {
                let pos = self.register(Column::float(column_name.clone(), base + offset));
                (value.as_str(), pos)
            })
            .collect();

        for row in 0..self.rows.len() {
            let value = self.rows[row]
                .by_name
                .get(name)
                .and_then(|&slot| self.cells[slot].as_str())
                .map(str::to_string);
            let Some(value) = value else { continue };
            for (candidate, &new_pos) in &positions {
                let flag = if *candidate == value { 1.0 } else { 0.0 };
                let slot = self.push_cell(Cell::Float(flag));
                self.bind(row, new_pos, slot);
            }
        }
        info!(column = name, generated = names.len(), "one-hot expanded column");
        Ok(names)
    }

    /// Columns generated by one-hot expansion of `name`, in index order.
    pub fn one_hot_columns(&self, name: &str) -> Vec<&Column> {
        let prefix = one_hot_name(name, "");
        self.columns()
            .filter(|c| c.name().starts_with(&prefix))
            .collect()
    }

    /// Inserts the bias column [`BIAS_COLUMN`] at index 0 with `1.0` in every
    /// row, shifting every other column one position to the right.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateColumn`] if the bias column already exists.
    pub fn add_x0(&mut self) -> Result<()> {
        if self.columns_by_name.contains_key(BIAS_COLUMN) {
            return Err(Error::DuplicateColumn(BIAS_COLUMN.to_string()));
        }
        for column in &mut self.columns {
            column.index += 1;
        }
        let pos = self.columns.len();
        self.columns.push(Column::float(BIAS_COLUMN, 0));
        self.columns_by_name.insert(BIAS_COLUMN.to_string(), pos);

        for row in 0..self.rows.len() {
            let slot = self.push_cell(Cell::Float(1.0));
            self.rows[row].by_name.insert(BIAS_COLUMN.to_string(), slot);
        }
        self.reindex();
        debug!(columns = self.columns.len(), "inserted bias column");
        Ok(())
    }

    fn is_string_column(&self, pos: usize) -> bool {
        let column = &self.columns[pos];
        let ok = column.column_type() == ColumnType::String;
        if !ok {
            debug!(column = column.name(), column_type = %column.column_type(), "string transform skipped");
        }
        ok
    }

    fn distinct_strings(&self, pos: usize) -> Vec<String> {
        self.column_cells(pos)
            .flatten()
            .filter_map(Cell::as_str)
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

fn one_hot_name(column: &str, value: &str) -> String {
    format!("{}_onehot_{}", column, value)
}
