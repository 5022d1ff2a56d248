//! FILENAME: app/src/pipeline.rs
// PURPOSE: The interactive outputs, one pure function per output.
// CONTEXT: Each stage takes the loaded Table (if any) and the selected column
// (if any) and returns what the page shows. The caller re-runs the stages
// whenever the upload or the selection changes.

use engine::{format_number, NumberFormat, Table};
use persistence::{write_report, LoadError, ReportError};
use serde::{Deserialize, Serialize};
use stats_engine::{
    describe, histogram, render_histogram, StatValue, Statistic, StatisticsSummary, DEFAULT_BINS,
    NO_MODE,
};

pub const UPLOAD_PROMPT: &str = "Por favor, sube un archivo Excel para continuar.";
pub const SELECT_PROMPT: &str = "Por favor, selecciona una columna para el análisis.";
pub const LOADED_PREFIX: &str = "Datos cargados correctamente. Columnas disponibles: ";
pub const LOAD_ERROR_PREFIX: &str = "Error al cargar el archivo: ";
pub const ANALYSIS_ERROR_PREFIX: &str = "Error en el análisis: ";
/// Shown for a statistic the column cannot define (variance of one value).
pub const UNDEFINED: &str = "No definida";

/// One output slot of the page: either its content or the message that
/// replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Section {
    Content(String),
    Error(String),
}

impl Section {
    pub fn text(&self) -> &str {
        match self {
            Section::Content(text) | Section::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Section::Error(_))
    }
}

/// Preview line: the upload prompt, the column list or the load failure.
pub fn preview_text(loaded: Option<&Result<Table, LoadError>>) -> String {
    match loaded {
        None => UPLOAD_PROMPT.to_string(),
        Some(Ok(table)) => format!("{}{}", LOADED_PREFIX, table.column_names().join(", ")),
        Some(Err(e)) => format!("{}{}", LOAD_ERROR_PREFIX, e),
    }
}

/// Keeps `current` when it is still one of `choices`, otherwise falls back to
/// the first choice.
pub fn resolve_selection(choices: &[String], current: Option<&str>) -> Option<String> {
    current
        .filter(|c| choices.iter().any(|choice| choice == c))
        .or_else(|| choices.first().map(String::as_str))
        .map(str::to_string)
}

/// Statistics block. Absent until a table is loaded.
pub fn stats_section(table: Option<&Table>, column: Option<&str>) -> Option<Section> {
    let table = table?;
    let Some(column) = column else {
        return Some(Section::Content(SELECT_PROMPT.to_string()));
    };

    Some(match describe(table, column) {
        Ok(summary) => Section::Content(format_summary(&summary)),
        Err(e) => Section::Error(format!("{}{}", ANALYSIS_ERROR_PREFIX, e)),
    })
}

/// Formats the five statistics, one `Label: value` line each.
pub fn format_summary(summary: &StatisticsSummary) -> String {
    summary
        .rows()
        .iter()
        .map(|(statistic, value)| {
            format!("{}: {}", statistic.display_label(), format_value(*statistic, *value))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Two decimals for the moments; the mode is a data value and keeps its own
/// digits.
fn format_value(statistic: Statistic, value: StatValue) -> String {
    let format = match statistic {
        Statistic::Mode => NumberFormat::General,
        _ => NumberFormat::Decimal { decimal_places: 2 },
    };
    match value {
        StatValue::Absent => NO_MODE.to_string(),
        StatValue::Number(n) if n.is_nan() => UNDEFINED.to_string(),
        StatValue::Number(n) => format_number(n, format),
    }
}

/// Histogram markup. Absent until both a table and a column are present.
pub fn plot_section(table: Option<&Table>, column: Option<&str>) -> Option<Section> {
    let (table, column) = (table?, column?);

    Some(match histogram(table, column, DEFAULT_BINS) {
        Ok(binned) => Section::Content(render_histogram(&binned)),
        Err(e) => Section::Error(format!("{}{}", ANALYSIS_ERROR_PREFIX, e)),
    })
}

/// Report bytes for the download button, generated fresh on every call.
pub fn report_bytes(table: Option<&Table>, column: Option<&str>) -> Result<Vec<u8>, ReportError> {
    write_report(table, column)
}

/// Download file name: column plus timestamp, restricted to safe characters.
pub fn report_file_name(column: Option<&str>, timestamp: &str) -> String {
    let column: String = column
        .unwrap_or("datos")
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("informe_{}_{}.xlsx", column, timestamp)
}
