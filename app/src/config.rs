//! FILENAME: app/src/config.rs
// PURPOSE: Runtime configuration from flags, with environment fallbacks.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Args;
use log::LevelFilter;

use crate::logging::{init_log_file, install_facade_logger};

/// Logging flags shared by every command.
#[derive(Debug, Clone, Args)]
pub struct LogArgs {
    /// Also write log lines to this file
    #[arg(long, env = "ESTIMADORES_LOG_FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Lowest level written: error, warn, info, debug, trace or off
    #[arg(long, env = "ESTIMADORES_LOG_LEVEL", default_value = "info", global = true)]
    pub log_level: LevelFilter,
}

impl LogArgs {
    /// Installs the logger. A log file that cannot be created falls back to
    /// console-only logging.
    pub fn init(&self) {
        install_facade_logger(self.log_level);
        if let Some(path) = &self.log_file {
            match init_log_file(path) {
                Ok(path) => crate::log_info!("SYS", "logging to {}", path.display()),
                Err(e) => crate::log_warn!("SYS", "{}", e),
            }
        }
    }
}

/// Flags of the `serve` command.
#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Address the HTTP server listens on
    #[arg(long, env = "ESTIMADORES_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Largest accepted upload, in megabytes
    #[arg(long, env = "ESTIMADORES_MAX_UPLOAD_MB", default_value_t = 50)]
    pub max_upload_mb: usize,
}

/// Resolved server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind: SocketAddr,
    pub max_upload_bytes: usize,
}

impl From<&ServeArgs> for AppConfig {
    fn from(args: &ServeArgs) -> Self {
        AppConfig {
            bind: args.bind,
            max_upload_bytes: args.max_upload_mb.saturating_mul(1024 * 1024),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
            max_upload_bytes: 50 * 1024 * 1024,
        }
    }
}
