//! Schema-typed, dual-indexed in-memory table.
//!
//! A [`Dataset`] owns every [`Column`] and every [`Cell`]. Each row exposes two
//! synchronized views of its cells:
//!
//! - **by index**: keyed by the column's positional index,
//! - **by name**: keyed by the column's name.
//!
//! Both views store the same *slot*: an index into a single cell arena owned
//! by the dataset. Writing through one view is therefore visible through the
//! other, and several rows may point at the same slot (see
//! [`Dataset::fill`]).
//!
//! # Lifecycle
//!
//! 1. Create with [`Dataset::new`] and register columns with [`Dataset::add_column`].
//! 2. Ingest rows with [`Dataset::load_csv`]; a clean end of input marks the
//!    dataset as loaded.
//! 3. Inspect columns with [`Dataset::statistics`].
//! 4. Apply transforms (fill, normalize, string encodings, `add_x0`).
//! 5. Project columns for training with [`Dataset::matrix`] or
//!    [`Dataset::column_samples`].
//!
//! # Example
//!
//! ```rust
//! use tabulearn::dataset::{Column, Dataset};
//! use tabulearn::preprocessing::Mean;
//!
//! let mut ds = Dataset::new();
//! ds.add_column(Column::string("area", 0)).unwrap();
//! ds.add_column(Column::int("houses_sold", 1)).unwrap();
//!
//! let csv = "area,houses_sold\ncity,5\nwest,\n";
//! ds.load_csv(csv.as_bytes(), true).unwrap();
//!
//! ds.fill("houses_sold", &Mean).unwrap();
//! assert_eq!(ds.cell_by_name(1, "houses_sold").unwrap().to_string(), "5");
//! ```

pub mod cell;
pub mod column;
mod ingest;
mod matrix;
pub mod statistics;
mod transform;

pub use self::cell::{Cell, NULL_MARKER};
pub use self::column::{Column, ColumnType, TimestampCodec};
pub use self::ingest::IngestReport;
pub use self::statistics::{ColumnStatistics, Distribution};
pub use self::transform::BIAS_COLUMN;

use crate::error::{Error, Result};
use std::collections::{BTreeMap, HashMap};

/// Index into the dataset's cell arena.
pub type SlotId = usize;

/// Per-row views: positional index → slot and column name → slot.
#[derive(Clone, Debug, Default)]
pub(crate) struct Row {
    pub(crate) by_index: BTreeMap<usize, SlotId>,
    pub(crate) by_name: HashMap<String, SlotId>,
}

/// In-memory table with typed columns and dual row views.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    /// Column storage in registration order.
    columns: Vec<Column>,
    /// Positional index → position in `columns`.
    columns_by_index: BTreeMap<usize, usize>,
    /// Column name → position in `columns`.
    columns_by_name: HashMap<String, usize>,
    /// Cell arena; rows refer to cells by slot. Slots orphaned by `fill` are
    /// never reclaimed.
    cells: Vec<Cell>,
    rows: Vec<Row>,
    loaded: bool,
}

impl Dataset {
    /// Creates an empty dataset with no schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a column.
    ///
    /// Names and indices must both be unique. Rows already present receive an
    /// empty cell for the new column.
    pub fn add_column(&mut self, column: Column) -> Result<&Column> {
        if self.columns_by_name.contains_key(column.name()) {
            return Err(Error::DuplicateColumn(column.name().to_string()));
        }
        if self.columns_by_index.contains_key(&column.index()) {
            return Err(Error::DuplicateIndex(column.index()));
        }
        let pos = self.register(column);
        for row in 0..self.rows.len() {
            let slot = self.push_cell(Cell::Empty);
            self.bind(row, pos, slot);
        }
        Ok(&self.columns[pos])
    }

    /// Column with the given name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns_by_name.get(name).map(|&pos| &self.columns[pos])
    }

    /// Column at the given positional index.
    pub fn column_by_index(&self, index: usize) -> Option<&Column> {
        self.columns_by_index
            .get(&index)
            .map(|&pos| &self.columns[pos])
    }

    /// All columns in ascending index order.
    pub fn columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.columns_by_index.values().map(|&pos| &self.columns[pos])
    }

    /// Number of registered columns.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Number of ingested rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the last ingestion reached a clean end of input.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Cell at `row` through the index view.
    pub fn cell(&self, row: usize, index: usize) -> Option<&Cell> {
        self.slot(row, index).map(|slot| &self.cells[slot])
    }

    /// Cell at `row` through the name view.
    pub fn cell_by_name(&self, row: usize, name: &str) -> Option<&Cell> {
        self.slot_by_name(row, name).map(|slot| &self.cells[slot])
    }

    /// Mutable cell at `row` through the index view.
    ///
    /// The change is visible through the name view and through every other
    /// row sharing the slot.
    pub fn cell_mut(&mut self, row: usize, index: usize) -> Option<&mut Cell> {
        let slot = self.slot(row, index)?;
        self.cells.get_mut(slot)
    }

    /// Mutable cell at `row` through the name view.
    pub fn cell_by_name_mut(&mut self, row: usize, name: &str) -> Option<&mut Cell> {
        let slot = self.slot_by_name(row, name)?;
        self.cells.get_mut(slot)
    }

    /// Arena slot behind `(row, index)` in the index view.
    pub fn slot(&self, row: usize, index: usize) -> Option<SlotId> {
        self.rows.get(row)?.by_index.get(&index).copied()
    }

    /// Arena slot behind `(row, name)` in the name view.
    pub fn slot_by_name(&self, row: usize, name: &str) -> Option<SlotId> {
        self.rows.get(row)?.by_name.get(name).copied()
    }

    /// Non-missing cells of the named column, one per row, in row order.
    ///
    /// Rows sharing a slot yield the same cell once each. An unknown name
    /// yields nothing.
    pub fn values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Cell> + 'a {
        self.rows
            .iter()
            .filter_map(move |row| row.by_name.get(name))
            .map(move |&slot| &self.cells[slot])
            .filter(|cell| !cell.is_empty())
    }

    /// Highest positional index in use, `None` without columns.
    pub fn max_index(&self) -> Option<usize> {
        self.columns_by_index.keys().next_back().copied()
    }

    pub(crate) fn column_position(&self, name: &str) -> Result<usize> {
        self.columns_by_name
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownColumn(name.to_string()))
    }

    /// Adds a column to the schema maps without touching any row.
    pub(crate) fn register(&mut self, column: Column) -> usize {
        let pos = self.columns.len();
        self.columns_by_index.insert(column.index(), pos);
        self.columns_by_name.insert(column.name().to_string(), pos);
        self.columns.push(column);
        pos
    }

    pub(crate) fn push_cell(&mut self, cell: Cell) -> SlotId {
        self.cells.push(cell);
        self.cells.len() - 1
    }

    /// Points both views of `row` at `slot` for the column stored at `pos`.
    pub(crate) fn bind(&mut self, row: usize, pos: usize, slot: SlotId) {
        let column = &self.columns[pos];
        let views = &mut self.rows[row];
        views.by_index.insert(column.index, slot);
        views.by_name.insert(column.name().to_string(), slot);
    }

    /// Distinct slots of a column across all rows, in first-seen row order.
    pub(crate) fn column_slots(&self, pos: usize) -> Vec<SlotId> {
        let name = self.columns[pos].name();
        let mut seen = std::collections::HashSet::new();
        self.rows
            .iter()
            .filter_map(|row| row.by_name.get(name).copied())
            .filter(|slot| seen.insert(*slot))
            .collect()
    }

    /// Per-row cells of a column (one entry per row, `None` for gaps).
    pub(crate) fn column_cells(&self, pos: usize) -> impl Iterator<Item = Option<&Cell>> + '_ {
        let name = self.columns[pos].name();
        self.rows
            .iter()
            .map(move |row| row.by_name.get(name).map(|&slot| &self.cells[slot]))
    }

    /// Regenerates the index → column map and every row's index view from
    /// the name-keyed source of truth.
    pub(crate) fn reindex(&mut self) {
        self.columns_by_index = self
            .columns
            .iter()
            .enumerate()
            .map(|(pos, column)| (column.index, pos))
            .collect();

        let columns = &self.columns;
        let by_name = &self.columns_by_name;
        for row in &mut self.rows {
            row.by_index = row
                .by_name
                .iter()
                .filter_map(|(name, &slot)| by_name.get(name).map(|&pos| (columns[pos].index, slot)))
                .collect();
        }
    }
}
