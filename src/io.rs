//! Table file I/O, dispatched on file extension.

use anyhow::{Context as _, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Read a CSV, JSON or Parquet file into a `DataFrame`.
///
/// CSV files must have a header row. Column types are inferred from every
/// row, so a stray text cell deep in a numeric column turns the column into
/// text (and later into missing values) instead of failing the read.
pub fn load_df(path: &Path) -> Result<DataFrame> {
    let ext = extension(path);

    let df = match ext.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(None)
            .with_has_header(true)
            .finish()?
            .collect()
            .with_context(|| format!("Failed to read CSV: {}", path.display()))?,
        "parquet" => ParquetReader::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        )
        .finish()
        .context("Failed to read Parquet")?,
        "json" => JsonReader::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        )
        .finish()
        .context("Failed to read JSON")?,
        _ => return Err(anyhow::anyhow!("Unsupported file extension: {ext}")),
    };

    tracing::debug!(
        "Loaded {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );
    Ok(df)
}

/// Write `df` as CSV, JSON (array of records) or Parquet.
pub fn save_df(df: &mut DataFrame, path: &Path) -> Result<()> {
    let ext = extension(path);
    if !matches!(ext.as_str(), "csv" | "json" | "parquet") {
        return Err(anyhow::anyhow!("Unsupported file extension: {ext}"));
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).context("Failed to create output directory")?;
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;

    match ext.as_str() {
        "csv" => CsvWriter::new(file)
            .include_header(true)
            .finish(df)
            .context("Failed to write CSV file")?,
        "json" => JsonWriter::new(file)
            .with_json_format(JsonFormat::Json)
            .finish(df)
            .context("Failed to write JSON file")?,
        _ => {
            ParquetWriter::new(file)
                .finish(df)
                .context("Failed to write Parquet file")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_csv_load_keeps_nulls() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("in.csv");
        std::fs::write(&path, "val1,val2\n10,2\n,3\n")?;

        let df = load_df(&path)?;
        assert_eq!(df.height(), 2);
        assert_eq!(df.column("val1")?.null_count(), 1);
        Ok(())
    }

    #[test]
    fn test_csv_late_text_cell_does_not_fail() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("long.csv");
        let mut content = String::from("val1,val2\n");
        for i in 0..10_500 {
            content.push_str(&format!("{i},1\n"));
        }
        content.push_str("n/a,1\n");
        std::fs::write(&path, content)?;

        let df = load_df(&path)?;
        assert_eq!(df.height(), 10_501);

        let out = crate::pipeline::process(&df, "nan")?;
        assert_eq!(out.column("val3")?.null_count(), 1);
        Ok(())
    }

    #[test]
    fn test_save_and_load_json() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("out.json");
        let mut df = df!["val1" => [1.0, 2.0], "val2" => [Some(4.0), None]]?;

        save_df(&mut df, &path)?;
        let loaded = load_df(&path)?;

        assert_eq!(loaded.height(), 2);
        assert_eq!(loaded.column("val2")?.null_count(), 1);
        Ok(())
    }

    #[test]
    fn test_unsupported_extension() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("table.xlsx");
        std::fs::write(&path, "")?;

        assert!(load_df(&path).is_err());
        let mut df = df!["a" => [1]]?;
        assert!(save_df(&mut df, &path).is_err());
        Ok(())
    }
}
