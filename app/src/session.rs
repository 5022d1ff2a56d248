//! FILENAME: app/src/session.rs
// PURPOSE: The one user's session: the uploaded file and the selected column.
// CONTEXT: Every interaction loads the Table once from the upload and runs the
// pipeline stages on it; nothing derived is cached between interactions.

use std::path::{Path, PathBuf};

use engine::Table;
use persistence::{load_table, load_table_from_bytes, LoadError, ReportError};
use serde::{Deserialize, Serialize};
use stats_engine::{column_choices, validate_selection};

use crate::pipeline::{
    plot_section, preview_text, report_bytes, resolve_selection, stats_section, Section,
};
use crate::{log_debug, log_enter, log_exit, log_info, log_warn, SelectionError};

#[derive(Debug)]
enum Source {
    Bytes(Vec<u8>),
    Path(PathBuf),
}

/// An uploaded workbook. Browser uploads stay in memory; CLI input is read
/// from disk on every load.
#[derive(Debug)]
pub struct Upload {
    file_name: String,
    source: Source,
}

impl Upload {
    /// Keeps the uploaded bytes; `file_name` decides the accepted format.
    pub fn from_bytes(file_name: &str, bytes: impl Into<Vec<u8>>) -> Self {
        Upload {
            file_name: file_name.to_string(),
            source: Source::Bytes(bytes.into()),
        }
    }

    /// Refers to a workbook already on disk (CLI input).
    pub fn from_path(path: &Path) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Upload {
            file_name,
            source: Source::Path(path.to_path_buf()),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Size of an in-memory upload; `None` for one read from disk.
    pub fn size(&self) -> Option<usize> {
        match &self.source {
            Source::Bytes(bytes) => Some(bytes.len()),
            Source::Path(_) => None,
        }
    }

    pub fn load(&self) -> Result<Table, LoadError> {
        match &self.source {
            Source::Bytes(bytes) => load_table_from_bytes(bytes, &self.file_name),
            Source::Path(path) => load_table(path),
        }
    }
}

/// Everything the page shows for the current session state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub file_name: Option<String>,
    pub preview: String,
    pub choices: Vec<String>,
    pub selected: Option<String>,
    pub stats: Option<Section>,
    pub plot: Option<Section>,
}

#[derive(Debug, Default)]
pub struct Session {
    upload: Option<Upload>,
    column: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upload(&self) -> Option<&Upload> {
        self.upload.as_ref()
    }

    pub fn selected_column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    fn load(&self) -> Option<Result<Table, LoadError>> {
        self.upload.as_ref().map(Upload::load)
    }

    /// Replaces the upload (or clears it with `None`) and re-resolves the
    /// selection against the new column choices.
    pub fn set_upload(&mut self, upload: Option<Upload>) {
        match &upload {
            Some(u) => log_info!("SESSION", "upload name={} size={:?}", u.file_name(), u.size()),
            None => log_info!("SESSION", "upload cleared"),
        }
        self.upload = upload;

        let loaded = self.load();
        let table = loaded.as_ref().and_then(|r| r.as_ref().ok());
        let choices = column_choices(table);
        self.column = resolve_selection(&choices, self.column.as_deref());

        if let Some(Err(e)) = &loaded {
            log_warn!("SESSION", "load failed: {}", e);
        }
        log_debug!("SESSION", "choices={:?} selected={:?}", choices, self.column);
    }

    /// Selects `column`, which must be one of the current numeric choices.
    pub fn select(&mut self, column: &str) -> Result<(), SelectionError> {
        let table = self
            .load()
            .and_then(Result::ok)
            .ok_or(SelectionError::NoTable)?;

        if column_choices(Some(&table)).is_empty() {
            return Err(SelectionError::NoNumericColumns);
        }
        validate_selection(Some(&table), column)
            .map_err(|_| SelectionError::UnknownColumn(column.to_string()))?;

        log_info!("SESSION", "select column={}", column);
        self.column = Some(column.to_string());
        Ok(())
    }

    /// Runs every stage against the current upload and selection.
    pub fn snapshot(&self) -> View {
        log_enter!("SESSION", "snapshot", "column={:?}", self.column);
        let loaded = self.load();
        let table = loaded.as_ref().and_then(|r| r.as_ref().ok());
        let column = table.and(self.column.as_deref());

        let view = View {
            file_name: self.upload.as_ref().map(|u| u.file_name().to_string()),
            preview: preview_text(loaded.as_ref()),
            choices: column_choices(table),
            selected: column.map(str::to_string),
            stats: stats_section(table, column),
            plot: plot_section(table, column),
        };
        log_exit!("SESSION", "snapshot", "choices={}", view.choices.len());
        view
    }

    /// Report workbook for the current state. An unreadable upload fails
    /// with the reason it could not be loaded.
    pub fn download(&self) -> Result<Vec<u8>, ReportError> {
        let table = match self.load() {
            Some(Ok(table)) => Some(table),
            Some(Err(e)) => {
                log_warn!("SESSION", "download without a readable upload: {}", e);
                return Err(ReportError::Load(e));
            }
            None => None,
        };
        report_bytes(table.as_ref(), self.column.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_session_prompts_for_upload() {
        let session = Session::new();
        let view = session.snapshot();
        assert_eq!(view.preview, crate::pipeline::UPLOAD_PROMPT);
        assert!(view.choices.is_empty());
        assert_eq!(view.selected, None);
        assert_eq!(view.stats, None);
        assert_eq!(view.plot, None);
        assert!(matches!(session.download(), Err(ReportError::MissingTable)));
    }

    #[test]
    fn select_without_upload_fails() {
        let mut session = Session::new();
        assert_eq!(session.select("x"), Err(SelectionError::NoTable));
    }

    #[test]
    fn byte_upload_is_loaded_from_memory() {
        let upload = Upload::from_bytes("datos.xlsx", b"not really a workbook".to_vec());
        assert_eq!(upload.file_name(), "datos.xlsx");
        assert_eq!(upload.size(), Some(21));
        assert!(matches!(upload.load(), Err(LoadError::Spreadsheet(_))));

        let missing = Upload::from_path(Path::new("no_existe.xlsx"));
        assert_eq!(missing.size(), None);
        assert!(matches!(missing.load(), Err(LoadError::NotFound(_))));
    }

    #[test]
    fn unreadable_upload_reports_load_error() {
        let mut session = Session::new();
        session.set_upload(Some(Upload::from_bytes("datos.csv", b"a,b\n1,2\n".to_vec())));
        let view = session.snapshot();
        assert!(view.preview.starts_with(crate::pipeline::LOAD_ERROR_PREFIX));
        assert!(view.choices.is_empty());
        assert_eq!(view.stats, None);

        let err = session.download().unwrap_err();
        assert!(matches!(err, ReportError::Load(LoadError::UnsupportedFormat(_))));
        assert!(err.to_string().contains("Unsupported file format: .csv"));
    }
}
