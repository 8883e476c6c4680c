//! # tabulearn
//!
//! Schema-typed in-memory tables with gradient-descent regression on top.
//!
//! ## Core Design Principles
//!
//! - **Typed cells**: every value is a tagged [`Cell`](dataset::Cell); a
//!   missing value is its own variant and never silently becomes a zero in
//!   statistics or transforms.
//! - **Dual views**: each row can be addressed by column index or by column
//!   name. Both views point into one cell arena, so a write through either is
//!   seen through the other.
//! - **Pluggable strategies**: imputation, scaling and string hashing are
//!   traits in [`preprocessing`]; closures work as strategies too.
//! - **Type-level model choice**: [`Regressor`](model::Regressor) is generic
//!   over its link and loss, with [`LinearRegression`](model::LinearRegression)
//!   and [`LogisticRegression`](model::LogisticRegression) as aliases.
//!
//! ## Quick Start
//!
//! ```rust
//! use tabulearn::dataset::{Column, Dataset};
//! use tabulearn::model::LinearRegression;
//! use tabulearn::preprocessing::{Max, Mean};
//! use tabulearn::trainer::Trainer;
//!
//! let mut ds = Dataset::new();
//! ds.add_column(Column::int("rooms", 0)).unwrap();
//! ds.add_column(Column::float("price", 1)).unwrap();
//! ds.load_csv("rooms,price\n1,0.2\n2,0.4\n,0.6\n4,0.8\n".as_bytes(), true).unwrap();
//!
//! ds.fill("rooms", &Mean).unwrap();
//! ds.normalize("rooms", &Max).unwrap();
//! ds.add_x0().unwrap();
//!
//! let features = ds.indices_of(&["x0", "rooms"]).unwrap();
//! let label = ds.indices_of(&["price"]).unwrap()[0];
//! let samples = ds.column_samples(&features, label).unwrap();
//!
//! let mut model = LinearRegression::new();
//! let history = Trainer::builder(0.1)
//!     .max_epochs(500)
//!     .build()
//!     .fit(&mut model, &samples)
//!     .unwrap();
//! assert!(history.losses.last().unwrap() < history.losses.first().unwrap());
//! ```
//!
//! ## Module Structure
//!
//! - `dataset`: columns, cells, CSV ingestion and export, statistics, transforms
//! - `preprocessing`: aggregate and hashing strategies used by the transforms
//! - `model`: regressors and the sample sources they train on
//! - `loss`: reported loss functions
//! - `trainer`: configurable training loop
//! - `error`: the crate-wide error type
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events and never installs a subscriber.

pub mod dataset;
pub mod error;
pub mod loss;
pub mod model;
pub mod preprocessing;
pub mod trainer;

pub use error::{Error, Result};
