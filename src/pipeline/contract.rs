//! Column contracts for the division pipeline.
//!
//! A [`TableContract`] names the columns a table must carry and whether each
//! may hold missing values. Checking a table never stops at the first
//! problem: every violation is collected so a single run tells the caller
//! everything that is wrong.

use super::normalize::coerce_numeric;
use super::{DENOMINATOR, NUMERATOR, QUOTIENT};
use crate::error::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where in the pipeline a contract was checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStage {
    /// Before the transform, after coercion
    Input,

    /// After the transform; a failure here is an internal bug
    Output,
}

impl fmt::Display for ValidationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => f.write_str("Input"),
            Self::Output => f.write_str("Output"),
        }
    }
}

/// Which check a column failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum ViolationKind {
    /// Column is absent from the table
    MissingColumn,

    /// Column exists but is not floating point
    WrongType { expected: String, found: String },

    /// Column is declared non-nullable but holds missing values
    UnexpectedNulls { rows: Vec<usize> },
}

/// One contract violation on one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaViolation {
    pub column: String,
    #[serde(flatten)]
    pub kind: ViolationKind,
}

impl SchemaViolation {
    pub fn new(column: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            column: column.into(),
            kind,
        }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::MissingColumn => write!(f, "column '{}': not found", self.column),
            ViolationKind::WrongType { expected, found } => write!(
                f,
                "column '{}': expected type {expected}, found {found}",
                self.column
            ),
            ViolationKind::UnexpectedNulls { rows } => write!(
                f,
                "column '{}': {} missing value(s) in non-nullable column at rows {rows:?}",
                self.column,
                rows.len()
            ),
        }
    }
}

/// Contract for a single floating-point column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnContract {
    pub name: String,

    /// Whether missing values are allowed
    #[serde(default = "default_true")]
    pub nullable: bool,

    /// Whether the column is coerced to floating point before checking
    #[serde(default)]
    pub coerce: bool,
}

impl ColumnContract {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nullable: true,
            coerce: false,
        }
    }

    pub fn coerced(mut self) -> Self {
        self.coerce = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.nullable = false;
        self
    }

    fn check(&self, df: &DataFrame, violations: &mut Vec<SchemaViolation>) {
        let Ok(column) = df.column(&self.name) else {
            violations.push(SchemaViolation::new(&self.name, ViolationKind::MissingColumn));
            return;
        };

        if column.dtype() != &DataType::Float64 {
            violations.push(SchemaViolation::new(
                &self.name,
                ViolationKind::WrongType {
                    expected: DataType::Float64.to_string(),
                    found: column.dtype().to_string(),
                },
            ));
            return;
        }

        if !self.nullable && column.null_count() > 0 {
            let rows = column
                .as_materialized_series()
                .f64()
                .map(|ca| {
                    ca.into_iter()
                        .enumerate()
                        .filter_map(|(idx, value)| value.is_none().then_some(idx))
                        .collect()
                })
                .unwrap_or_default();
            violations.push(SchemaViolation::new(
                &self.name,
                ViolationKind::UnexpectedNulls { rows },
            ));
        }
    }
}

/// Contract for a whole table. Columns not named here are allowed and ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableContract {
    pub name: String,
    pub columns: Vec<ColumnContract>,
}

impl TableContract {
    /// `val1` and `val2`: coerced to floating point, missing allowed.
    pub fn input() -> Self {
        Self {
            name: "input".to_owned(),
            columns: vec![
                ColumnContract::new(NUMERATOR).coerced(),
                ColumnContract::new(DENOMINATOR).coerced(),
            ],
        }
    }

    /// `val1`, `val2` and `val3`: floating point, missing allowed. `val3` may
    /// be missing when both operands are zero.
    pub fn output() -> Self {
        Self {
            name: "output".to_owned(),
            columns: vec![
                ColumnContract::new(NUMERATOR),
                ColumnContract::new(DENOMINATOR),
                ColumnContract::new(QUOTIENT),
            ],
        }
    }

    /// Return a copy of `df` with every `coerce` column converted to
    /// floating point. Absent columns are skipped; [`Self::check`] reports them.
    pub fn coerce(&self, df: &DataFrame) -> Result<DataFrame> {
        let mut out = df.clone();
        for contract in self.columns.iter().filter(|c| c.coerce) {
            if let Ok(column) = df.column(&contract.name) {
                out.with_column(coerce_numeric(column))?;
            }
        }
        Ok(out)
    }

    /// Collect every violation of this contract in `df`.
    pub fn check(&self, df: &DataFrame) -> Vec<SchemaViolation> {
        let mut violations = Vec::new();
        for contract in &self.columns {
            contract.check(df, &mut violations);
        }
        violations
    }
}

fn default_true() -> bool {
    true
}
