//! FinIA CLI - personal finance advisor for bank statement CSVs
//!
//! Usage:
//!   finia analyze --csv movimientos.csv     Metrics, category split and advice
//!   finia dashboard --csv movimientos.csv   Interactive terminal dashboard
//!   finia export --csv movimientos.csv      Write the categorized CSV
//!   finia template                          Write an example CSV

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use finia_finance::{
    analyze_path, analyze_reader, pie_slices, save_enriched_csv, save_template_csv, Analysis,
    CHART_TITLE,
};
use finia_ingest::IngestError;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod chart;
mod config;
mod dashboard;
mod report;
mod state;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("FINIA_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(name = "finia", version = VERSION, about = "FinIA: tu asesor financiero personal")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print detected columns, the four metrics, the category split and a recommendation
    Analyze {
        /// Transactions CSV (fecha, descripcion, monto); `-` reads stdin
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print the analysis result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Full-screen dashboard with metrics, pie chart and recommendation
    Dashboard {
        /// Transactions CSV; without it the dashboard shows an example file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Write the cleaned table with an added `categoria` column
    Export {
        #[arg(long)]
        csv: PathBuf,

        /// Output path (default: export.output_dir/export.analysis_file)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Write the example CSV template
    Template {
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Write the expense pie chart as SVG
    Chart {
        #[arg(long)]
        csv: PathBuf,

        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Manage ~/.finia/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a config file with default values
    Init,
    /// Print the effective configuration
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;

    // Priority: RUST_LOG env var > --verbose flag > config file
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_new(&cfg.log.filter).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // The dashboard owns the terminal, so its logs go to a file.
    if matches!(cli.command, Command::Dashboard { .. }) {
        let log_path = state::log_path()?;
        let file = File::options()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("open {}", log_path.display()))?;
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_ansi(false).with_writer(Mutex::new(file)))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
            .init();
    }

    match cli.command {
        Command::Analyze { csv, json } => match csv {
            Some(path) => {
                let analysis = load_analysis(&path)?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&analysis.result)?);
                } else {
                    print!("{}", report::render_report(&analysis));
                }
            }
            None => print!("{}", report::render_no_file()),
        },

        Command::Dashboard { csv } => {
            let analysis = csv.as_deref().map(load_analysis).transpose()?;
            dashboard::run_dashboard(analysis.as_ref(), &cfg.export)?;
        }

        Command::Export { csv, out } => {
            let analysis = load_analysis(&csv)?;
            let out = out.unwrap_or_else(|| cfg.export.analysis_path());
            save_enriched_csv(&analysis, &out)?;
            println!(
                "Wrote {} rows to {}",
                analysis.table.rows.len(),
                out.display()
            );
        }

        Command::Template { out } => {
            let out = out.unwrap_or_else(|| cfg.export.template_path());
            save_template_csv(&out)?;
            println!("Wrote {}", out.display());
        }

        Command::Chart { csv, out } => {
            let analysis = load_analysis(&csv)?;
            if !analysis.result.has_expenses() {
                println!("No expenses to chart; nothing written.");
            } else {
                let slices = pie_slices(&analysis.result.per_category_expense);
                let out = out.unwrap_or_else(|| cfg.export.chart_path());
                chart::save_pie_svg(&slices, CHART_TITLE, &out)?;
                println!("Wrote {}", out.display());
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config(&cfg)?,
        },
    }

    Ok(())
}

/// Run the pipeline on a file, or stdin for `-`, turning ingest failures
/// into the messages shown to the user.
fn load_analysis(path: &Path) -> Result<Analysis> {
    let result = if path == Path::new("-") {
        analyze_reader(std::io::stdin().lock())
    } else {
        if !path.exists() {
            bail!("CSV not found: {} (pass --csv <path>)", path.display());
        }
        analyze_path(path)
    };

    match result {
        Ok(analysis) => {
            info!(
                rows = analysis.table.rows.len(),
                dropped = analysis.table.dropped.total(),
                "analyzed {}",
                path.display()
            );
            Ok(analysis)
        }
        Err(err) => Err(describe_ingest_error(err)),
    }
}

fn describe_ingest_error(err: IngestError) -> anyhow::Error {
    if let Some(detected) = err.detected_columns() {
        anyhow::anyhow!("Columnas detectadas: {detected:?}\n{err}")
    } else if err.is_schema_error() {
        anyhow::anyhow!("{err}")
    } else {
        anyhow::anyhow!("Error al procesar el archivo: {err}")
    }
}
