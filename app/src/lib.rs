//! FILENAME: app/src/lib.rs
// PURPOSE: Main library entry point (HTTP and CLI shell).
// CONTEXT: Ties the loader, the analysis stages and the report writer to one
// user Session. The core crates hold no state; the Session does.

use std::process::ExitCode;

use clap::Parser;

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod page;
pub mod pipeline;
pub mod server;
pub mod session;

pub use config::AppConfig;
pub use error::{AppError, SelectionError};
pub use logging::{init_log_file, install_facade_logger, next_seq, write_log};
pub use pipeline::Section;
pub use server::{router, ServerState, SharedState};
pub use session::{Session, Upload, View};

/// Parses the command line, runs the command and maps failure to exit status 1.
pub fn run() -> ExitCode {
    let cli = cli::Cli::parse();
    cli.log.init();
    log_info!("SYS", "estimadores {} starting", env!("CARGO_PKG_VERSION"));

    match cli::dispatch(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error!("SYS", "{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
