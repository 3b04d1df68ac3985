//! # Datadoc - validated column division and data dictionary generation
//!
//! Datadoc derives a quotient column from two operand columns with an
//! explicit zero-division policy, checks the table against declared column
//! contracts before and after the transform, and generates Markdown
//! documentation for fields and database tables.
//!
//! ## Quick Start
//!
//! ```no_run
//! use datadoc::pipeline::process_validated;
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let df = datadoc::io::load_df(Path::new("values.csv"))?;
//! let out = process_validated(&df, "nan")?;
//! println!("{out}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`pipeline`]: Normalization, contracts and the division transform
//! - [`dictionary`]: Field and table documentation, Markdown reports
//! - [`plot`]: Histogram, line and boxplot data
//! - [`io`]: CSV / JSON / Parquet reading and writing
//! - [`config`]: Persisted settings
//! - [`error`]: Error types and handling utilities
//! - [`logging`]: Subscriber setup for the binary
//!
//! ## Missing values
//!
//! Missing cells are polars nulls throughout. Operand cells that are NaN,
//! empty or non-numeric text become nulls during normalization, and the
//! `nan` policy turns every non-finite quotient into a null.

#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod dictionary;
pub mod error;
pub mod io;
pub mod logging;
pub mod pipeline;
pub mod plot;
pub mod utils;
