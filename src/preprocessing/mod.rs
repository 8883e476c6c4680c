//! Pluggable strategies used by the dataset transforms.
//!
//! Transforms on [`Dataset`](crate::dataset::Dataset) do not hard-code how a
//! replacement or reference value is obtained. They delegate to small strategy
//! objects:
//!
//! - [`Aggregate`] reduces a column to a single [`Cell`](crate::dataset::Cell)
//!   (used by `fill` and `normalize`),
//! - [`StringHash`] derives an integer code from a string cell (used by
//!   `normalize_string_by_hash`).
//!
//! Closures with the matching signature implement both traits, so ad-hoc
//! strategies need no new type.
//!
//! # Available strategies
//!
//! ## Imputation
//! - [`Mean`]: arithmetic mean of the present values
//! - [`Constant`]: a fixed replacement cell
//!
//! ## Scaling
//! - [`Max`]: largest present value
//!
//! ## Encoding
//! - [`Length`]: byte length of a string

pub mod encoding;
pub mod imputation;
pub mod scaling;
pub mod traits;

pub use encoding::Length;
pub use imputation::{Constant, Mean};
pub use scaling::Max;
pub use traits::{Aggregate, StringHash};
