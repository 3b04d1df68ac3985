//! Validated processing: contract checks around the division transform.
//!
//! The pass is linear: coerce → check input → divide → check output. Each
//! check collects every violation before failing, and a failure carries the
//! stage it came from so callers can tell bad input from a pipeline bug.

use super::contract::{TableContract, ValidationStage};
use super::executor::divide_normalized;
use super::policy::ZeroDivisionPolicy;
use crate::error::{DatadocError, Result};
use polars::prelude::DataFrame;

/// Input and output contracts applied around the transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validator {
    pub input: TableContract,
    pub output: TableContract,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            input: TableContract::input(),
            output: TableContract::output(),
        }
    }
}

impl Validator {
    /// Validate `df`, divide it and validate the result.
    ///
    /// # Errors
    ///
    /// - [`DatadocError::SchemaViolation`] with [`ValidationStage::Input`] when the
    ///   coerced input breaks the input contract
    /// - [`DatadocError::DivisionByZero`] under `raise` when `val2` holds a zero
    /// - [`DatadocError::SchemaViolation`] with [`ValidationStage::Output`] when the
    ///   produced table breaks the output contract
    pub fn run(&self, df: &DataFrame, policy: ZeroDivisionPolicy) -> Result<DataFrame> {
        let coerced = self.input.coerce(df)?;

        let violations = self.input.check(&coerced);
        if !violations.is_empty() {
            tracing::warn!(
                "Input table failed contract '{}' with {} violation(s)",
                self.input.name,
                violations.len()
            );
            return Err(DatadocError::SchemaViolation {
                stage: ValidationStage::Input,
                violations,
            });
        }

        let output = divide_normalized(coerced, policy)?;

        let violations = self.output.check(&output);
        if !violations.is_empty() {
            tracing::error!(
                "Produced table failed contract '{}' with {} violation(s); this is a pipeline bug",
                self.output.name,
                violations.len()
            );
            return Err(DatadocError::SchemaViolation {
                stage: ValidationStage::Output,
                violations,
            });
        }

        Ok(output)
    }
}

/// Parse `on_zero`, then run the default [`Validator`].
///
/// # Errors
///
/// [`DatadocError::InvalidArgument`] for an unknown policy, before the table
/// is read; otherwise see [`Validator::run`].
pub fn process_validated(df: &DataFrame, on_zero: &str) -> Result<DataFrame> {
    let policy: ZeroDivisionPolicy = on_zero.parse()?;
    Validator::default().run(df, policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::contract::{ColumnContract, ViolationKind};
    use crate::pipeline::{DENOMINATOR, NUMERATOR, QUOTIENT};
    use polars::prelude::*;

    #[test]
    fn test_validated_coerces_text_input() -> anyhow::Result<()> {
        let val1 = Series::new(NUMERATOR.into(), vec!["10", "oops", "9"]);
        let val2 = Series::new(DENOMINATOR.into(), vec!["2", "1", "3"]);
        let df = DataFrame::new(vec![Column::from(val1), Column::from(val2)])?;

        let out = process_validated(&df, "nan")?;

        let q: Vec<Option<f64>> = out
            .column(QUOTIENT)?
            .as_materialized_series()
            .f64()?
            .into_iter()
            .collect();
        assert_eq!(q, vec![Some(5.0), None, Some(3.0)]);
        Ok(())
    }

    #[test]
    fn test_validated_collects_all_input_violations() -> anyhow::Result<()> {
        let other = Series::new("other".into(), vec![1.0]);
        let df = DataFrame::new(vec![Column::from(other)])?;

        match process_validated(&df, "nan") {
            Err(DatadocError::SchemaViolation { stage, violations }) => {
                assert_eq!(stage, ValidationStage::Input);
                assert_eq!(violations.len(), 2, "both operand columns are reported");
            }
            other => panic!("expected input violation, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_output_failure_is_distinct_from_input_failure() -> anyhow::Result<()> {
        let val1 = Series::new(NUMERATOR.into(), vec![1.0, 0.0]);
        let val2 = Series::new(DENOMINATOR.into(), vec![1.0, 0.0]);
        let df = DataFrame::new(vec![Column::from(val1), Column::from(val2)])?;

        // A stricter output contract that the nan policy cannot satisfy
        let validator = Validator {
            output: TableContract {
                name: "strict-output".to_owned(),
                columns: vec![ColumnContract::new(QUOTIENT).required()],
            },
            ..Validator::default()
        };

        match validator.run(&df, ZeroDivisionPolicy::Nan) {
            Err(err @ DatadocError::SchemaViolation { .. }) => {
                assert!(err.is_internal());
                if let DatadocError::SchemaViolation { violations, .. } = err {
                    assert_eq!(
                        violations[0].kind,
                        ViolationKind::UnexpectedNulls { rows: vec![1] }
                    );
                }
            }
            other => panic!("expected output violation, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_invalid_policy_before_validation() -> anyhow::Result<()> {
        let other = Series::new("other".into(), vec![1.0]);
        let df = DataFrame::new(vec![Column::from(other)])?;

        assert!(matches!(
            process_validated(&df, "ignore"),
            Err(DatadocError::InvalidArgument(_))
        ));
        Ok(())
    }
}
