//! Division transform.
//!
//! Computes `val3 = val1 / val2` row by row on a normalized table and applies
//! the selected [`ZeroDivisionPolicy`] to the quotients.

use super::normalize::normalize_inputs;
use super::policy::ZeroDivisionPolicy;
use super::{DENOMINATOR, NUMERATOR, QUOTIENT};
use crate::error::{DatadocError, Result};
use polars::prelude::*;
use serde::Serialize;

/// Summary of a divided table, for logs and CLI output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DivisionReport {
    /// Number of rows in the output table
    pub rows: usize,

    /// Rows where `val1` or `val2` is missing
    pub missing_inputs: usize,

    /// Rows where `val2` is exactly zero
    pub zero_denominators: usize,

    /// Rows where `val3` is missing
    pub missing_quotients: usize,

    /// Rows where `val3` is NaN or infinite
    pub non_finite_quotients: usize,
}

impl DivisionReport {
    /// Build a report from a table produced by [`divide`].
    pub fn from_table(df: &DataFrame) -> Result<Self> {
        let numerators = float_values(df, NUMERATOR)?;
        let denominators = float_values(df, DENOMINATOR)?;
        let quotients = float_values(df, QUOTIENT)?;

        Ok(Self {
            rows: df.height(),
            missing_inputs: numerators
                .iter()
                .zip(&denominators)
                .filter(|(n, d)| n.is_none() || d.is_none())
                .count(),
            zero_denominators: zero_rows(&denominators).len(),
            missing_quotients: quotients.iter().filter(|q| q.is_none()).count(),
            non_finite_quotients: quotients
                .iter()
                .flatten()
                .filter(|q| !q.is_finite())
                .count(),
        })
    }

    pub fn summary(&self) -> String {
        format!(
            "{} rows divided: {} with missing operands, {} zero denominators, {} missing and {} non-finite quotients",
            self.rows,
            self.missing_inputs,
            self.zero_denominators,
            self.missing_quotients,
            self.non_finite_quotients
        )
    }
}

/// Parse `on_zero`, then normalize and divide.
///
/// The policy string is checked before the table is read, so an invalid
/// policy is reported even when the data would also fail.
///
/// # Errors
///
/// - [`DatadocError::InvalidArgument`] if `on_zero` is not `nan`, `inf` or `raise`
/// - [`DatadocError::SchemaViolation`] if `val1` or `val2` is absent or uncastable
/// - [`DatadocError::DivisionByZero`] under `raise` when `val2` holds a zero
pub fn process(df: &DataFrame, on_zero: &str) -> Result<DataFrame> {
    let policy: ZeroDivisionPolicy = on_zero.parse()?;
    divide(df, policy)
}

/// Normalize the operand columns and append the quotient column.
///
/// Returns a new table; `df` is left untouched.
///
/// # Errors
///
/// See [`process`].
pub fn divide(df: &DataFrame, policy: ZeroDivisionPolicy) -> Result<DataFrame> {
    let normalized = normalize_inputs(df)?;
    divide_normalized(normalized, policy)
}

/// Divide a table whose operand columns are already `Float64`.
pub(crate) fn divide_normalized(
    mut df: DataFrame,
    policy: ZeroDivisionPolicy,
) -> Result<DataFrame> {
    let numerators = float_values(&df, NUMERATOR)?;
    let denominators = float_values(&df, DENOMINATOR)?;

    if policy == ZeroDivisionPolicy::Raise {
        let rows = zero_rows(&denominators);
        if !rows.is_empty() {
            tracing::warn!(
                "Refusing to divide: {} zero denominator(s) in '{DENOMINATOR}'",
                rows.len()
            );
            return Err(DatadocError::DivisionByZero {
                column: DENOMINATOR.to_owned(),
                rows,
            });
        }
    }

    let quotients: Vec<Option<f64>> = numerators
        .into_iter()
        .zip(denominators)
        .map(|(n, d)| policy.divide(n, d))
        .collect();

    df.with_column(Series::new(QUOTIENT.into(), quotients))?;

    tracing::debug!("Divided {} rows with policy '{policy}'", df.height());
    Ok(df)
}

fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = df.column(name)?;
    Ok(column.as_materialized_series().f64()?.into_iter().collect())
}

/// Row indices whose value is exactly zero (`-0.0` included).
fn zero_rows(values: &[Option<f64>]) -> Vec<usize> {
    values
        .iter()
        .enumerate()
        .filter_map(|(idx, v)| (*v == Some(0.0)).then_some(idx))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        let val1 = Series::new(NUMERATOR.into(), vec![Some(10.0), Some(5.0), Some(0.0), None]);
        let val2 = Series::new(DENOMINATOR.into(), vec![Some(2.0), Some(0.0), Some(0.0), Some(3.0)]);
        DataFrame::new(vec![Column::from(val1), Column::from(val2)]).expect("valid frame")
    }

    fn quotients(df: &DataFrame) -> Vec<Option<f64>> {
        float_values(df, QUOTIENT).expect("val3 present")
    }

    #[test]
    fn test_nan_policy() -> anyhow::Result<()> {
        let out = process(&sample(), "nan")?;
        assert_eq!(quotients(&out), vec![Some(5.0), None, None, None]);
        Ok(())
    }

    #[test]
    fn test_inf_policy() -> anyhow::Result<()> {
        let out = process(&sample(), "inf")?;
        let q = quotients(&out);
        assert_eq!(q[0], Some(5.0));
        assert_eq!(q[1], Some(f64::INFINITY));
        assert!(q[2].is_some_and(f64::is_nan), "0/0 stays NaN, not missing");
        assert_eq!(q[3], None);
        Ok(())
    }

    #[test]
    fn test_raise_policy_reports_zero_rows() {
        match process(&sample(), "raise") {
            Err(DatadocError::DivisionByZero { column, rows }) => {
                assert_eq!(column, DENOMINATOR);
                assert_eq!(rows, vec![1, 2]);
            }
            other => panic!("expected DivisionByZero, got {other:?}"),
        }
    }

    #[test]
    fn test_raise_policy_without_zeros_divides() -> anyhow::Result<()> {
        let val1 = Series::new(NUMERATOR.into(), vec![1.0, -6.0]);
        let val2 = Series::new(DENOMINATOR.into(), vec![4.0, 3.0]);
        let df = DataFrame::new(vec![Column::from(val1), Column::from(val2)])?;

        let out = process(&df, "raise")?;
        assert_eq!(quotients(&out), vec![Some(0.25), Some(-2.0)]);
        Ok(())
    }

    #[test]
    fn test_negative_zero_counts_as_zero() -> anyhow::Result<()> {
        let val1 = Series::new(NUMERATOR.into(), vec![1.0]);
        let val2 = Series::new(DENOMINATOR.into(), vec![-0.0]);
        let df = DataFrame::new(vec![Column::from(val1), Column::from(val2)])?;

        assert!(matches!(
            process(&df, "raise"),
            Err(DatadocError::DivisionByZero { .. })
        ));
        let out = process(&df, "inf")?;
        assert_eq!(quotients(&out), vec![Some(f64::NEG_INFINITY)]);
        Ok(())
    }

    #[test]
    fn test_invalid_policy_checked_before_data() {
        let result = process(&sample(), "ignore");
        assert!(matches!(result, Err(DatadocError::InvalidArgument(_))));
    }

    #[test]
    fn test_input_is_not_mutated() -> anyhow::Result<()> {
        let df = sample();
        let _out = process(&df, "nan")?;
        assert_eq!(df.width(), 2);
        assert!(df.column(QUOTIENT).is_err());
        Ok(())
    }

    #[test]
    fn test_report_counts() -> anyhow::Result<()> {
        let out = process(&sample(), "inf")?;
        let report = DivisionReport::from_table(&out)?;
        assert_eq!(
            report,
            DivisionReport {
                rows: 4,
                missing_inputs: 1,
                zero_denominators: 2,
                missing_quotients: 1,
                non_finite_quotients: 2,
            }
        );
        assert!(report.summary().starts_with("4 rows divided"));
        Ok(())
    }
}
