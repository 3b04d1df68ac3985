//! Plot data preparation.
//!
//! Produces serializable histogram, line and boxplot data from table columns.
//! Nothing is drawn here; callers hand the result to whatever renders charts.
//! Every helper first coerces the column with [`coerce_numeric`], so text and
//! other non-numeric cells count as missing.

use crate::error::{DatadocError, Result};
use crate::pipeline::coerce_numeric;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Default number of histogram bins.
pub const DEFAULT_BINS: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bins: Vec<HistogramBin>,
    /// Cells without a finite value
    pub missing: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<(usize, Option<f64>)>,
}

/// Five-number summary plus Tukey whiskers for one column.
///
/// All statistics are `None` when the column has no finite values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxStats {
    pub column: String,
    pub min: Option<f64>,
    pub q1: Option<f64>,
    pub median: Option<f64>,
    pub q3: Option<f64>,
    pub max: Option<f64>,
    pub whisker_low: Option<f64>,
    pub whisker_high: Option<f64>,
    pub outliers: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxPlot {
    pub title: String,
    pub boxes: Vec<BoxStats>,
}

/// Coerced values of `column`, in row order.
fn numeric_values(df: &DataFrame, column: &str) -> Result<Vec<Option<f64>>> {
    let coerced = coerce_numeric(df.column(column)?);
    let values = coerced.as_materialized_series().f64()?.into_iter().collect();
    Ok(values)
}

fn finite_values(values: &[Option<f64>]) -> Vec<f64> {
    values
        .iter()
        .flatten()
        .copied()
        .filter(|v| v.is_finite())
        .collect()
}

/// Equal-width histogram of the finite values in `column`.
///
/// A column holding a single distinct value gets a unit-wide range centred on
/// it. A column without finite values yields no bins.
pub fn histogram(
    df: &DataFrame,
    column: &str,
    bins: usize,
    title: Option<&str>,
) -> Result<Histogram> {
    if bins == 0 {
        return Err(DatadocError::InvalidArgument(
            "histogram needs at least one bin".to_owned(),
        ));
    }

    let values = numeric_values(df, column)?;
    let finite = finite_values(&values);
    let missing = values.len() - finite.len();

    let mut out = Vec::new();
    let min = finite.iter().copied().reduce(f64::min);
    let max = finite.iter().copied().reduce(f64::max);

    if let (Some(min_v), Some(max_v)) = (min, max) {
        let (lo, hi) = if max_v == min_v {
            (min_v - 0.5, min_v + 0.5)
        } else {
            (min_v, max_v)
        };
        let width = (hi - lo) / bins as f64;

        let mut counts = vec![0usize; bins];
        for val in &finite {
            let idx = ((val - lo) / width).floor() as usize;
            counts[idx.min(bins - 1)] += 1;
        }

        for (i, count) in counts.into_iter().enumerate() {
            out.push(HistogramBin {
                start: lo + i as f64 * width,
                end: lo + (i + 1) as f64 * width,
                count,
            });
        }
    }

    Ok(Histogram {
        title: title.map_or_else(|| format!("Histograma de {column}"), str::to_owned),
        x_label: column.to_owned(),
        y_label: "Frequência".to_owned(),
        bins: out,
        missing,
    })
}

/// Values of `column` against their row index.
pub fn line_series(df: &DataFrame, column: &str, title: Option<&str>) -> Result<LineSeries> {
    let points = numeric_values(df, column)?.into_iter().enumerate().collect();

    Ok(LineSeries {
        title: title.map_or_else(|| format!("Série de {column}"), str::to_owned),
        x_label: "Índice".to_owned(),
        y_label: column.to_owned(),
        points,
    })
}

/// Box statistics for each of `columns`, using linear quantiles and
/// whiskers at 1.5 × IQR.
pub fn boxplot(df: &DataFrame, columns: &[&str], title: Option<&str>) -> Result<BoxPlot> {
    if columns.is_empty() {
        return Err(DatadocError::InvalidArgument(
            "boxplot needs at least one column".to_owned(),
        ));
    }

    let boxes = columns
        .iter()
        .map(|name| box_stats(df, name))
        .collect::<Result<Vec<_>>>()?;

    Ok(BoxPlot {
        title: title.map_or_else(|| format!("Boxplot: {}", columns.join(", ")), str::to_owned),
        boxes,
    })
}

fn box_stats(df: &DataFrame, column: &str) -> Result<BoxStats> {
    let finite = finite_values(&numeric_values(df, column)?);
    let ca = Float64Chunked::from_vec(column.into(), finite.clone());

    let q1 = ca.quantile(0.25, QuantileMethod::Linear)?;
    let median = ca.quantile(0.5, QuantileMethod::Linear)?;
    let q3 = ca.quantile(0.75, QuantileMethod::Linear)?;

    let mut stats = BoxStats {
        column: column.to_owned(),
        min: ca.min(),
        q1,
        median,
        q3,
        max: ca.max(),
        whisker_low: None,
        whisker_high: None,
        outliers: Vec::new(),
    };

    if let (Some(q1), Some(q3)) = (q1, q3) {
        let iqr = q3 - q1;
        let low_fence = q1 - 1.5 * iqr;
        let high_fence = q3 + 1.5 * iqr;

        stats.whisker_low = finite
            .iter()
            .copied()
            .filter(|&v| v >= low_fence)
            .reduce(f64::min);
        stats.whisker_high = finite
            .iter()
            .copied()
            .filter(|&v| v <= high_fence)
            .reduce(f64::max);
        stats.outliers = finite
            .into_iter()
            .filter(|&v| v < low_fence || v > high_fence)
            .collect();
    }

    Ok(stats)
}
