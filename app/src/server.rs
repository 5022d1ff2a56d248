//! FILENAME: app/src/server.rs
// PURPOSE: HTTP shell around the single Session.
// CONTEXT: The session lives behind a std Mutex. Handlers lock it only after
// their last `.await` and run the whole pipeline synchronously.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::Deserialize;
use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::page;
use crate::pipeline::report_file_name;
use crate::session::{Session, Upload, View};
use crate::{log_debug, log_info, AppError};

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Shared server state.
#[derive(Debug, Default)]
pub struct ServerState {
    pub session: Mutex<Session>,
}

pub type SharedState = Arc<ServerState>;

impl ServerState {
    pub fn lock_session(&self) -> Result<MutexGuard<'_, Session>, AppError> {
        self.session.lock().map_err(|_| AppError::SessionUnavailable)
    }
}

#[derive(Debug, Deserialize)]
pub struct ColumnForm {
    pub column: String,
}

pub fn router(state: SharedState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/upload", post(upload))
        .route("/column", post(select_column))
        .route("/download", get(download))
        .route("/api/state", get(api_state))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

/// Binds and serves until Ctrl-C.
pub async fn serve(config: &AppConfig) -> Result<(), AppError> {
    let listener = TcpListener::bind(config.bind).await?;
    log_info!("HTTP", "listening on http://{}", listener.local_addr()?);

    let state = SharedState::default();
    axum::serve(listener, router(state, config.max_upload_bytes))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log_info!("HTTP", "server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        crate::log_error!("HTTP", "failed to listen for shutdown: {}", e);
    }
}

async fn index(State(state): State<SharedState>) -> Result<Html<String>, AppError> {
    log_debug!("HTTP", "GET /");
    let view = state.lock_session()?.snapshot();
    Ok(Html(page::render(&view)))
}

async fn api_state(State(state): State<SharedState>) -> Result<Json<View>, AppError> {
    let view = state.lock_session()?.snapshot();
    Ok(Json(view))
}

/// Multipart upload. A submission without a file clears the session.
async fn upload(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> Result<Redirect, AppError> {
    let mut received = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        received = Some((file_name, bytes));
    }

    let upload = match received {
        Some((file_name, bytes)) if !file_name.is_empty() && !bytes.is_empty() => {
            log_info!("HTTP", "POST /upload name={} size={}", file_name, bytes.len());
            Some(Upload::from_bytes(&file_name, bytes.to_vec()))
        }
        _ => None,
    };

    state.lock_session()?.set_upload(upload);
    Ok(Redirect::to("/"))
}

async fn select_column(
    State(state): State<SharedState>,
    Form(form): Form<ColumnForm>,
) -> Result<Redirect, AppError> {
    log_info!("HTTP", "POST /column column={}", form.column);
    state.lock_session()?.select(&form.column)?;
    Ok(Redirect::to("/"))
}

async fn download(State(state): State<SharedState>) -> Result<Response, AppError> {
    let session = state.lock_session()?;
    let bytes = session.download()?;
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
    let file_name = report_file_name(session.selected_column(), &timestamp);
    log_info!("HTTP", "GET /download name={} size={}", file_name, bytes.len());

    let headers = [
        (CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
        (CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", file_name)),
    ];
    Ok((headers, bytes).into_response())
}
