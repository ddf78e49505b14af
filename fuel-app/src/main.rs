use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::debug;

use fuel_app::config::{AppConfig, DEFAULT_CONFIG_FILE};
use fuel_app::inputs::FormInputs;
use fuel_app::state::Session;
use fuel_app::{logging, output};
use fuel_report::{FileShare, ReportFormat};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Fuel station inventory reconciliation.
///
/// Reconciles opening stock, deliveries, nozzle meter readings and closing
/// tank levels for gasoline and gas, and reports any shortage or surplus.
#[derive(Debug, Parser)]
#[command(name = "fuel-recon", version)]
struct Cli {
    /// Settings file. Defaults to `fuel-recon.toml` when present.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level or filter directive; overrides the config file.
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the reconciliation results.
    Calculate {
        #[command(flatten)]
        inputs: FormInputs,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Calculate and export a report document.
    Report {
        #[command(flatten)]
        inputs: FormInputs,

        /// `pdf` or `html`; overrides the config file.
        #[arg(long, value_parser = parse_format)]
        format: Option<ReportFormat>,

        /// Directory to write the report into; overrides the config file.
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },

    /// Print a blank form document to fill in.
    Template,
}

fn parse_format(s: &str) -> Result<ReportFormat, String> {
    ReportFormat::parse(s).ok_or_else(|| format!("unknown report format '{s}' (pdf, html)"))
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging(logging::DEFAULT_LEVEL);

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path, true)?,
        None => AppConfig::load(Path::new(DEFAULT_CONFIG_FILE), false)?,
    };

    if std::env::var_os("RUST_LOG").is_none() {
        logging::set_log_level(cli.log_level.as_deref().unwrap_or(&config.log_level))?;
    }
    if let Some(path) = cli.log_file.as_ref().or(config.log_file.as_ref()) {
        logging::enable_file_logging(path)?;
    }
    debug!(?config, "configuration loaded");

    match cli.command {
        Command::Calculate { inputs, json } => {
            let mut session = Session::new(inputs.load_store()?);
            let results = session.calculate();
            let report = session.report_data(Utc::now())?;
            if json {
                println!("{}", output::to_json(&report, &results)?);
            } else {
                print!("{report}");
            }
        }
        Command::Report {
            inputs,
            format,
            out_dir,
        } => {
            let mut session = Session::new(inputs.load_store()?);
            session.calculate();

            let format = format.unwrap_or(config.report_format);
            let service = FileShare::new(out_dir.unwrap_or(config.output_dir));
            session
                .export(format, &service, Utc::now())
                .await
                .context("exporting report")?;
            if let Some((message, _)) = &session.status_message {
                println!("{message}");
            }
        }
        Command::Template => {
            let toml = fuel_data::template()
                .to_toml()
                .context("rendering form template")?;
            print!("{toml}");
        }
    }

    Ok(())
}
