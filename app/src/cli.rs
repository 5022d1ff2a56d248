//! FILENAME: app/src/cli.rs
// PURPOSE: Command-line entry points: the server and one-shot file commands.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use engine::{format_number, NumberFormat};
use persistence::{load_table, read_report, save_report, DATA_SHEET_NAME};
use stats_engine::{histogram, render_histogram, StatValue, DEFAULT_BINS, NO_MODE};

use crate::config::{AppConfig, LogArgs, ServeArgs};
use crate::pipeline::UNDEFINED;
use crate::session::{Session, Upload};
use crate::{log_info, server, AppError};

/// Descriptive statistics, histograms and Excel reports for spreadsheet columns.
#[derive(Parser)]
#[command(name = "estimadores")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub log: LogArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive web page
    Serve(ServeArgs),

    /// Print the preview, numeric columns and statistics of a workbook
    Stats {
        /// Input workbook
        input: PathBuf,

        /// Column to analyse (default: first numeric column)
        #[arg(short, long)]
        column: Option<String>,
    },

    /// Write the two-sheet statistics report for one column
    Report {
        /// Input workbook
        input: PathBuf,

        /// Column to analyse
        #[arg(short, long)]
        column: String,

        /// Output workbook path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Bin one column; write the chart markup or print the bins
    Histogram {
        /// Input workbook
        input: PathBuf,

        /// Column to bin
        #[arg(short, long)]
        column: String,

        /// Write the embeddable chart markup here instead of printing bins
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the statistics sheet of a report written by `report`
    Inspect {
        /// Report workbook
        input: PathBuf,
    },
}

/// Runs one parsed command.
pub fn dispatch(command: Commands) -> Result<(), AppError> {
    match command {
        Commands::Serve(args) => {
            let config = AppConfig::from(&args);
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(server::serve(&config))
        }
        Commands::Stats { input, column } => {
            print!("{}", stats_output(&input, column.as_deref())?);
            Ok(())
        }
        Commands::Report { input, column, output } => {
            let table = load_table(&input)?;
            save_report(Some(&table), Some(&column), &output)?;
            log_info!("CLI", "report written to {}", output.display());
            println!("Informe guardado en {}", output.display());
            Ok(())
        }
        Commands::Histogram { input, column, output } => {
            let table = load_table(&input)?;
            let binned = histogram(&table, &column, DEFAULT_BINS)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, render_histogram(&binned))?;
                    println!("Histograma guardado en {}", path.display());
                }
                None => {
                    for (i, count) in binned.counts.iter().enumerate() {
                        let close = if i + 1 == binned.bin_count() { ']' } else { ')' };
                        println!(
                            "[{:.4}, {:.4}{} {}",
                            binned.edges[i],
                            binned.edges[i + 1],
                            close,
                            count
                        );
                    }
                }
            }
            Ok(())
        }
        Commands::Inspect { input } => {
            print!("{}", inspect_output(&input)?);
            Ok(())
        }
    }
}

/// Text printed by `stats`: the same outputs as the page, in order.
pub fn stats_output(input: &Path, column: Option<&str>) -> Result<String, AppError> {
    let upload = Upload::from_path(input);
    // Unreadable input is a failed command, not a preview message.
    upload.load()?;

    let mut session = Session::new();
    session.set_upload(Some(upload));
    if let Some(column) = column {
        session.select(column)?;
    }

    let view = session.snapshot();
    let mut out = format!(
        "{}\nColumnas numéricas: {}\n",
        view.preview,
        view.choices.join(", ")
    );
    if let Some(stats) = &view.stats {
        out.push_str(stats.text());
        out.push('\n');
    }
    Ok(out)
}

/// Text printed by `inspect`: sheet sizes and the five statistics.
pub fn inspect_output(input: &Path) -> Result<String, AppError> {
    let bytes = std::fs::read(input)?;
    let report = read_report(&bytes)?;

    let mut out = format!(
        "{}: {} filas, {} columnas\n",
        DATA_SHEET_NAME,
        report.data.row_count(),
        report.data.column_count()
    );
    for (statistic, value) in &report.statistics {
        let shown = match value {
            StatValue::Number(n) if n.is_nan() => UNDEFINED.to_string(),
            StatValue::Number(n) => format_number(*n, NumberFormat::General),
            StatValue::Absent => NO_MODE.to_string(),
        };
        out.push_str(&format!("{}: {}\n", statistic.label(), shown));
    }
    Ok(out)
}
