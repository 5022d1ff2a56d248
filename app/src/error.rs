//! FILENAME: app/src/error.rs
// PURPOSE: Error types for the shell: column selection and the top-level wrapper.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use persistence::{LoadError, ReportError};
use stats_engine::AnalysisError;
use thiserror::Error;

/// Rejected column selections.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectionError {
    #[error("No data loaded")]
    NoTable,

    #[error("The loaded data has no numeric columns")]
    NoNumericColumns,

    #[error("'{0}' is not one of the numeric columns")]
    UnknownColumn(String),
}

/// Everything the CLI and the HTTP handlers can fail with.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Load(#[from] LoadError),

    #[error("{0}")]
    Selection(#[from] SelectionError),

    #[error("{0}")]
    Analysis(#[from] AnalysisError),

    #[error("{0}")]
    Report(#[from] ReportError),

    #[error("Upload failed: {0}")]
    Upload(#[from] MultipartError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session unavailable")]
    SessionUnavailable,
}

impl AppError {
    /// Domain errors are the user's to fix; the rest are server faults.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Load(_)
            | AppError::Selection(_)
            | AppError::Analysis(_)
            | AppError::Report(_)
            | AppError::Upload(_) => StatusCode::BAD_REQUEST,
            AppError::Io(_) | AppError::SessionUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        crate::log_warn!("HTTP", "{} {}", status.as_u16(), self);
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_are_bad_requests() {
        let err = AppError::from(SelectionError::UnknownColumn("x".to_string()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "'x' is not one of the numeric columns");

        let err = AppError::from(ReportError::MissingTable);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn lock_failures_are_server_errors() {
        assert_eq!(AppError::SessionUnavailable.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
