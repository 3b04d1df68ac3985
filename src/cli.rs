use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand, ValueEnum};
use datadoc::config::{AppSettings, save_app_config};
use datadoc::dictionary::storage::{report_path, save_json, save_report};
use datadoc::dictionary::{FieldCatalog, TableCatalog, render_fields_markdown, render_tables_markdown};
use datadoc::io::{load_df, save_df};
use datadoc::pipeline::{DivisionReport, process, process_validated};
use datadoc::plot;
use datadoc::utils::fmt_opt;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "datadoc",
    about = "Validated column division and data dictionary generation"
)]
pub struct Cli {
    /// Load settings from this JSON file instead of the default location
    #[arg(long, global = true, env = "DATADOC_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PlotKind {
    Histogram,
    Series,
    Boxplot,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Derive val3 = val1 / val2 and write the resulting table
    Divide {
        /// Input table (CSV, JSON, Parquet)
        #[arg(short, long)]
        input: PathBuf,

        /// Output table (CSV, JSON, Parquet). Printed to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Zero-division policy: nan, inf or raise. Defaults to the configured policy.
        #[arg(long)]
        on_zero: Option<String>,

        /// Skip the input/output contract checks
        #[arg(long)]
        no_validate: bool,
    },
    /// Generate field documentation from a JSON array of field specs
    Fields {
        #[arg(short, long)]
        input: PathBuf,

        /// Markdown report path. Defaults to reports/campos.md in the output directory.
        #[arg(long)]
        markdown: Option<PathBuf>,

        /// Also export the described fields as JSON
        #[arg(long)]
        json: Option<PathBuf>,

        #[arg(long)]
        title: Option<String>,
    },
    /// Generate table documentation from a JSON array of table descriptions
    Tables {
        #[arg(short, long)]
        input: PathBuf,

        /// Markdown report path. Defaults to reports/tabelas.md in the output directory.
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long)]
        title: Option<String>,
    },
    /// Prepare chart data for one or more columns
    Plot {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(long, value_enum)]
        kind: PlotKind,

        /// Column names, comma separated. Histogram and series use the first.
        #[arg(long, value_delimiter = ',', required = true)]
        columns: Vec<String>,

        /// JSON output path. Printed to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long)]
        title: Option<String>,

        /// Histogram bin count. Defaults to the configured value.
        #[arg(long)]
        bins: Option<usize>,
    },
    /// Write the default settings to the config file
    InitConfig {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

pub fn run_command(command: Commands, settings: &AppSettings, config_path: &Path) -> Result<()> {
    match command {
        Commands::Divide {
            input,
            output,
            on_zero,
            no_validate,
        } => handle_divide(input, output, on_zero, no_validate, settings),
        Commands::Fields {
            input,
            markdown,
            json,
            title,
        } => handle_fields(input, markdown, json, title, settings),
        Commands::Tables {
            input,
            output,
            title,
        } => handle_tables(input, output, title, settings),
        Commands::Plot {
            input,
            kind,
            columns,
            output,
            title,
            bins,
        } => handle_plot(input, kind, columns, output, title, bins, settings),
        Commands::InitConfig { force } => handle_init_config(config_path, force),
    }
}

fn handle_init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }
    save_app_config(&AppSettings::default(), path)?;
    tracing::info!("Wrote default settings to {}", path.display());
    println!("Config: {}", path.display());
    Ok(())
}

fn handle_divide(
    input: PathBuf,
    output: Option<PathBuf>,
    on_zero: Option<String>,
    no_validate: bool,
    settings: &AppSettings,
) -> Result<()> {
    let policy = on_zero.unwrap_or_else(|| settings.zero_division.as_str().to_owned());
    let validate = settings.validate && !no_validate;

    let df = load_df(&input).context("Failed to load input table")?;
    let mut out = if validate {
        process_validated(&df, &policy)?
    } else {
        process(&df, &policy)?
    };

    let report = DivisionReport::from_table(&out)?;
    tracing::info!("{} (policy: {policy})", report.summary());

    match output {
        Some(path) => {
            save_df(&mut out, &path)?;
            println!("Wrote {} rows to {}", out.height(), path.display());
        }
        None => println!("{out}"),
    }
    Ok(())
}

fn handle_fields(
    input: PathBuf,
    markdown: Option<PathBuf>,
    json: Option<PathBuf>,
    title: Option<String>,
    settings: &AppSettings,
) -> Result<()> {
    let catalog = FieldCatalog::from_specs_file(&input)?;
    let title = title.unwrap_or_else(|| settings.fields_report_title.clone());

    let md = render_fields_markdown(&catalog, &title, &chrono::Local::now());
    let md_path = markdown.unwrap_or_else(|| report_path(&settings.output_dir(), "campos", "md"));
    save_report(&md, &md_path)?;
    tracing::info!("Documented {} fields in {}", catalog.len(), md_path.display());
    println!("Markdown: {}", md_path.display());

    if let Some(json_path) = json {
        save_report(&catalog.to_json()?, &json_path)?;
        println!("JSON: {}", json_path.display());
    }
    Ok(())
}

fn handle_tables(
    input: PathBuf,
    output: Option<PathBuf>,
    title: Option<String>,
    settings: &AppSettings,
) -> Result<()> {
    let catalog = TableCatalog::from_file(&input)?;
    let title = title.unwrap_or_else(|| settings.tables_report_title.clone());

    let md = render_tables_markdown(&catalog, &title, &chrono::Local::now());
    let path = output.unwrap_or_else(|| report_path(&settings.output_dir(), "tabelas", "md"));
    save_report(&md, &path)?;
    tracing::info!("Documented {} tables in {}", catalog.len(), path.display());
    println!("Markdown: {}", path.display());
    Ok(())
}

fn handle_plot(
    input: PathBuf,
    kind: PlotKind,
    columns: Vec<String>,
    output: Option<PathBuf>,
    title: Option<String>,
    bins: Option<usize>,
    settings: &AppSettings,
) -> Result<()> {
    let df = load_df(&input).context("Failed to load input table")?;
    let first = columns
        .first()
        .context("At least one column is required")?
        .as_str();
    let title = title.as_deref();

    let data = match kind {
        PlotKind::Histogram => {
            let bins = bins.unwrap_or(settings.histogram_bins);
            serde_json::to_value(plot::histogram(&df, first, bins, title)?)?
        }
        PlotKind::Series => serde_json::to_value(plot::line_series(&df, first, title)?)?,
        PlotKind::Boxplot => {
            let names: Vec<&str> = columns.iter().map(String::as_str).collect();
            let boxes = plot::boxplot(&df, &names, title)?;
            for b in &boxes.boxes {
                println!(
                    "{}: min {} q1 {} median {} q3 {} max {} ({} outliers)",
                    b.column,
                    fmt_opt(b.min),
                    fmt_opt(b.q1),
                    fmt_opt(b.median),
                    fmt_opt(b.q3),
                    fmt_opt(b.max),
                    b.outliers.len()
                );
            }
            serde_json::to_value(boxes)?
        }
    };

    match output {
        Some(path) => {
            save_json(&data, &path)?;
            println!("Plot data: {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&data)?),
    }
    Ok(())
}

