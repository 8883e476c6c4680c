//! String hashing strategies.

use crate::dataset::Cell;
use crate::preprocessing::traits::StringHash;

/// Byte length of a string cell; any other cell codes to 0.
#[derive(Clone, Copy, Debug, Default)]
pub struct Length;

impl StringHash for Length {
    fn code(&self, cell: &Cell) -> i64 {
        cell.as_str().map_or(0, |s| s.len() as i64)
    }
}
