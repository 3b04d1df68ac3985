//! Input normalization: coerce operand columns to `Float64`.
//!
//! Individual cells never cause an error. Text that does not parse as a
//! number, and NaN, both become missing values. Columns whose type cannot be
//! cast at all (lists, structs) are returned unchanged so the contract check
//! can report them with the rest of the violations.

use super::contract::TableContract;
use crate::error::{DatadocError, Result};
use polars::prelude::*;

/// Coerce a column to `Float64` with missing values.
pub fn coerce_numeric(column: &Column) -> Column {
    let series = column.as_materialized_series();
    let name = series.name().clone();

    let values: Vec<Option<f64>> = match series.dtype() {
        DataType::Float64 => match series.f64() {
            Ok(ca) => ca.into_iter().map(drop_nan).collect(),
            Err(_) => return column.clone(),
        },
        DataType::String => match series.str() {
            Ok(ca) => ca.into_iter().map(|cell| cell.and_then(parse_cell)).collect(),
            Err(_) => return column.clone(),
        },
        DataType::Null => vec![None; series.len()],
        dtype => {
            let Ok(cast) = series.cast(&DataType::Float64) else {
                tracing::debug!("Column '{name}' of type {dtype} cannot be coerced to f64");
                return column.clone();
            };
            match cast.f64() {
                Ok(ca) => ca.into_iter().map(drop_nan).collect(),
                Err(_) => return column.clone(),
            }
        }
    };

    let coerced_missing = values.iter().filter(|v| v.is_none()).count();
    let already_missing = series.null_count();
    if coerced_missing > already_missing {
        tracing::debug!(
            "Column '{name}': {} cell(s) could not be read as numbers and are now missing",
            coerced_missing - already_missing
        );
    }

    Column::from(Series::new(name, values))
}

/// Coerce the pipeline's operand columns and require them to be present and
/// floating point. Used by the unvalidated entry point, which still needs
/// both operands to divide.
pub fn normalize_inputs(df: &DataFrame) -> Result<DataFrame> {
    let contract = TableContract::input();
    let normalized = contract.coerce(df)?;
    let violations = contract.check(&normalized);
    if violations.is_empty() {
        Ok(normalized)
    } else {
        Err(DatadocError::SchemaViolation {
            stage: super::contract::ValidationStage::Input,
            violations,
        })
    }
}

/// Parse one text cell. Surrounding whitespace is ignored.
pub fn parse_cell(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().and_then(|v| drop_nan(Some(v)))
}

fn drop_nan(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::contract::ViolationKind;

    fn values(column: &Column) -> Vec<Option<f64>> {
        column
            .as_materialized_series()
            .f64()
            .expect("coerced column is f64")
            .into_iter()
            .collect()
    }

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell("3.5"), Some(3.5));
        assert_eq!(parse_cell("  -2 "), Some(-2.0));
        assert_eq!(parse_cell("1e3"), Some(1000.0));
        assert_eq!(parse_cell("inf"), Some(f64::INFINITY));
        assert_eq!(parse_cell("nan"), None);
        assert_eq!(parse_cell("abc"), None);
        assert_eq!(parse_cell(""), None);
    }

    #[test]
    fn test_coerce_text_column() {
        let s = Series::new("val1".into(), vec![Some("10"), Some("x"), None, Some(" 4.5")]);
        let coerced = coerce_numeric(&Column::from(s));

        assert_eq!(coerced.dtype(), &DataType::Float64);
        assert_eq!(values(&coerced), vec![Some(10.0), None, None, Some(4.5)]);
    }

    #[test]
    fn test_coerce_integer_and_bool_columns() {
        let ints = Series::new("val2".into(), vec![Some(1i64), None, Some(0)]);
        assert_eq!(
            values(&coerce_numeric(&Column::from(ints))),
            vec![Some(1.0), None, Some(0.0)]
        );

        let bools = Series::new("val2".into(), vec![true, false]);
        assert_eq!(
            values(&coerce_numeric(&Column::from(bools))),
            vec![Some(1.0), Some(0.0)]
        );
    }

    #[test]
    fn test_coerce_turns_nan_into_missing() {
        let s = Series::new("val1".into(), vec![1.0, f64::NAN, f64::INFINITY]);
        assert_eq!(
            values(&coerce_numeric(&Column::from(s))),
            vec![Some(1.0), None, Some(f64::INFINITY)]
        );
    }

    #[test]
    fn test_normalize_inputs_requires_both_columns() -> anyhow::Result<()> {
        let s = Series::new("val1".into(), vec![1.0]);
        let df = DataFrame::new(vec![Column::from(s)])?;

        match normalize_inputs(&df) {
            Err(DatadocError::SchemaViolation { violations, .. }) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].column, "val2");
                assert_eq!(violations[0].kind, ViolationKind::MissingColumn);
            }
            other => panic!("expected schema violation, got {other:?}"),
        }
        Ok(())
    }
}
