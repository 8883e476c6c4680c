//! Tagged scalar values stored in a [`Dataset`](super::Dataset).

use crate::dataset::column::ColumnType;
use chrono::NaiveDateTime;
use std::fmt;

/// Text written for a missing value. Ingestion reads it back as [`Cell::Empty`].
pub const NULL_MARKER: &str = "<null>";

/// Default rendering for timestamps when no column formatter is at hand.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One typed value at a row/column intersection.
///
/// `Empty` is the missing state. It has no type tag and is never treated as a
/// zero by statistics or transforms.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Str(String),
    Int(i64),
    Float(f64),
    Timestamp(NaiveDateTime),
    Empty,
}

impl Cell {
    /// Whether this cell is the missing marker.
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Type tag of the payload, `None` for `Empty`.
    pub fn column_type(&self) -> Option<ColumnType> {
        match self {
            Cell::Str(_) => Some(ColumnType::String),
            Cell::Int(_) => Some(ColumnType::Int),
            Cell::Float(_) => Some(ColumnType::Float),
            Cell::Timestamp(_) => Some(ColumnType::Timestamp),
            Cell::Empty => None,
        }
    }

    /// Floating-point payload; every non-`Float` cell reads as `0.0`.
    ///
    /// This is the projection used when building feature matrices, so integer
    /// columns must be normalized (promoted to `Float`) before training.
    pub fn as_f64(&self) -> f64 {
        match self {
            Cell::Float(v) => *v,
            _ => 0.0,
        }
    }

    /// Numeric payload of `Int` and `Float` cells.
    pub fn numeric(&self) -> Option<f64> {
        match self {
            Cell::Int(v) => Some(*v as f64),
            Cell::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// String payload of `Str` cells.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Divides this cell in place by `divisor`, promoting it to `Float`.
    ///
    /// Both operands must be `Int` or `Float`; otherwise nothing changes and
    /// `false` is returned. The caller guarantees a non-zero divisor.
    pub fn div_assign(&mut self, divisor: &Cell) -> bool {
        match (self.numeric(), divisor.numeric()) {
            (Some(lhs), Some(rhs)) => {
                *self = Cell::Float(lhs / rhs);
                true
            }
            _ => false,
        }
    }

    /// Short lowercase name of the tag, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self.column_type() {
            Some(t) => t.as_str(),
            None => "empty",
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Str(s) => f.write_str(s),
            Cell::Int(v) => write!(f, "{}", v),
            Cell::Float(v) => write!(f, "{}", v),
            Cell::Timestamp(ts) => write!(f, "{}", ts.format(DEFAULT_TIMESTAMP_FORMAT)),
            Cell::Empty => f.write_str(NULL_MARKER),
        }
    }
}
