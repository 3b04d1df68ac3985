//! Validated column-division pipeline.
//!
//! Takes a table with two operand columns, `val1` and `val2`, and returns a
//! new table with a third column `val3 = val1 / val2`. The pass is:
//!
//! ```text
//! normalize (text/ints/bools → f64, bad cells → missing)
//!   → check input contract
//!   → divide with the selected zero-division policy
//!   → check output contract
//! ```
//!
//! # Zero-division policies
//!
//! | Policy  | `x / 0`        | `0 / 0` | Any zero in `val2` |
//! |---------|----------------|---------|--------------------|
//! | `nan`   | missing        | missing | divides            |
//! | `inf`   | `±inf`         | `NaN`   | divides            |
//! | `raise` | n/a            | n/a     | `DivisionByZero`   |
//!
//! # Example
//!
//! ```no_run
//! use datadoc::pipeline::process_validated;
//! use polars::prelude::*;
//!
//! # fn example() -> datadoc::error::Result<()> {
//! let df = df![
//!     "val1" => [Some(10.0), Some(5.0), Some(0.0), None],
//!     "val2" => [Some(2.0), Some(0.0), Some(0.0), Some(3.0)],
//! ]?;
//!
//! let out = process_validated(&df, "inf")?;
//! assert_eq!(out.width(), 3);
//! # Ok(())
//! # }
//! ```

pub mod contract;
pub mod executor;
pub mod normalize;
pub mod policy;
pub mod validation;

/// Numerator column name
pub const NUMERATOR: &str = "val1";

/// Denominator column name
pub const DENOMINATOR: &str = "val2";

/// Derived quotient column name
pub const QUOTIENT: &str = "val3";

pub use contract::{ColumnContract, SchemaViolation, TableContract, ValidationStage, ViolationKind};
pub use executor::{DivisionReport, divide, process};
pub use normalize::coerce_numeric;
pub use policy::ZeroDivisionPolicy;
pub use validation::{Validator, process_validated};
