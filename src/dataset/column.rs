//! Column descriptors: name, position, declared type and timestamp codec.

use crate::dataset::cell::Cell;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Declared type of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Timestamp,
    String,
    Int,
    Float,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Timestamp => "timestamp",
            ColumnType::String => "string",
            ColumnType::Int => "int",
            ColumnType::Float => "float",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type ParseFn = dyn Fn(&str) -> Option<NaiveDateTime> + Send + Sync;
type FormatFn = dyn Fn(&NaiveDateTime) -> String + Send + Sync;

/// Caller-supplied parse and format functions for a timestamp column.
///
/// The column makes no timezone or locale assumptions of its own; everything
/// is delegated to these two closures.
#[derive(Clone)]
pub struct TimestampCodec {
    parse: Arc<ParseFn>,
    format: Arc<FormatFn>,
}

impl TimestampCodec {
    /// Build a codec from explicit closures. `parse` returns `None` on failure.
    pub fn new<P, F>(parse: P, format: F) -> Self
    where
        P: Fn(&str) -> Option<NaiveDateTime> + Send + Sync + 'static,
        F: Fn(&NaiveDateTime) -> String + Send + Sync + 'static,
    {
        Self {
            parse: Arc::new(parse),
            format: Arc::new(format),
        }
    }

    /// Codec that parses and formats with a single chrono format string.
    ///
    /// Date-only formats such as `%Y-%m-%d` parse to midnight.
    pub fn with_format(fmt: &str) -> Self {
        let parse_fmt = fmt.to_string();
        let format_fmt = fmt.to_string();
        Self::new(
            move |s| {
                NaiveDateTime::parse_from_str(s, &parse_fmt)
                    .ok()
                    .or_else(|| {
                        NaiveDate::parse_from_str(s, &parse_fmt)
                            .ok()
                            .and_then(|d| d.and_hms_opt(0, 0, 0))
                    })
            },
            move |ts| ts.format(&format_fmt).to_string(),
        )
    }

    pub fn parse(&self, s: &str) -> Option<NaiveDateTime> {
        (self.parse)(s)
    }

    pub fn format(&self, ts: &NaiveDateTime) -> String {
        (self.format)(ts)
    }
}

impl fmt::Debug for TimestampCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimestampCodec").finish_non_exhaustive()
    }
}

/// Schema descriptor for one attribute of a dataset.
///
/// Only the owning dataset's transforms change `index` or `column_type`; the
/// name is fixed at construction.
#[derive(Clone, Debug)]
pub struct Column {
    name: String,
    pub(crate) index: usize,
    pub(crate) column_type: ColumnType,
    codec: Option<TimestampCodec>,
}

impl Column {
    fn with_type(name: impl Into<String>, index: usize, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            index,
            column_type,
            codec: None,
        }
    }

    pub fn string(name: impl Into<String>, index: usize) -> Self {
        Self::with_type(name, index, ColumnType::String)
    }

    pub fn int(name: impl Into<String>, index: usize) -> Self {
        Self::with_type(name, index, ColumnType::Int)
    }

    pub fn float(name: impl Into<String>, index: usize) -> Self {
        Self::with_type(name, index, ColumnType::Float)
    }

    /// Timestamp column; `codec` is required to parse and render values.
    pub fn timestamp(name: impl Into<String>, index: usize, codec: TimestampCodec) -> Self {
        Self {
            codec: Some(codec),
            ..Self::with_type(name, index, ColumnType::Timestamp)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    pub fn codec(&self) -> Option<&TimestampCodec> {
        self.codec.as_ref()
    }

    /// Renders a cell of this column, using the timestamp codec when present.
    pub fn render(&self, cell: &Cell) -> String {
        match (cell, &self.codec) {
            (Cell::Timestamp(ts), Some(codec)) => codec.format(ts),
            _ => cell.to_string(),
        }
    }

    /// Zero value of the declared type, used when a field fails to parse.
    pub fn zero(&self) -> Cell {
        match self.column_type {
            ColumnType::String => Cell::Str(String::new()),
            ColumnType::Int => Cell::Int(0),
            ColumnType::Float => Cell::Float(0.0),
            ColumnType::Timestamp => Cell::Timestamp(DateTime::<Utc>::UNIX_EPOCH.naive_utc()),
        }
    }

    /// Coerces a non-empty field into a cell of the declared type.
    ///
    /// Returns `None` when the text does not parse.
    pub fn coerce(&self, field: &str) -> Option<Cell> {
        match self.column_type {
            ColumnType::String => Some(Cell::Str(field.to_string())),
            ColumnType::Int => field.trim().parse::<i64>().ok().map(Cell::Int),
            ColumnType::Float => field.trim().parse::<f64>().ok().map(Cell::Float),
            ColumnType::Timestamp => self
                .codec
                .as_ref()
                .and_then(|c| c.parse(field))
                .map(Cell::Timestamp),
        }
    }
}
