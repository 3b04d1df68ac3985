//! # Datadoc command-line entry point
//!
//! ```text
//! main()
//!   │
//!   ├─> Parse CLI arguments (clap)
//!   ├─> Load settings (--config or the default config.json)
//!   ├─> Initialize logging (stderr + rotating file, level from settings)
//!   └─> Run the subcommand
//! ```
//!
//! ```bash
//! datadoc divide --input values.csv --on-zero inf --output out.csv
//! datadoc fields --input fields.json
//! datadoc tables --input tables.json --output tabelas.md
//! datadoc plot --input values.csv --kind boxplot --columns val1,val2
//! datadoc init-config
//! ```

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stdout)] // Allow println! in main binary

mod cli;

use anyhow::Result;
use clap::Parser as _;
use datadoc::{config, logging};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(config::get_config_path);
    // init-config must work even when the existing file is broken
    let settings = if matches!(cli.command, cli::Commands::InitConfig { .. }) {
        config::AppSettings::default()
    } else {
        config::load_app_config(&config_path)?
    };

    let log_dir = logging::init(&settings)?;

    if let Err(e) = cli::run_command(cli.command, &settings, &config_path) {
        tracing::error!(
            "{e:#} (details in {})",
            logging::current_log_path(&log_dir).display()
        );
        return Err(e);
    }
    Ok(())
}
