//! FILENAME: app/src/page.rs
// PURPOSE: HTML page for a session View.

use maud::{html, Markup, PreEscaped, DOCTYPE};
use stats_engine::PLOTLY_SCRIPT_URL;

use crate::pipeline::Section;
use crate::session::View;

pub const PAGE_TITLE: &str = "Aplicación interactiva de estimadores";

const STYLE: &str = "
    body { font-family: Arial, sans-serif; margin: 0; display: flex; }
    aside { width: 320px; padding: 20px; background: #f5f5f5; min-height: 100vh; }
    main { flex-grow: 1; padding: 20px; }
    pre { white-space: pre-wrap; }
    .error { color: #b00020; }
";

/// Renders the whole page.
pub fn render(view: &View) -> String {
    page(view).into_string()
}

fn page(view: &View) -> Markup {
    html! {
        (DOCTYPE)
        html lang="es" {
            head {
                meta charset="utf-8";
                title { (PAGE_TITLE) }
                script src=(PLOTLY_SCRIPT_URL) {}
                style { (PreEscaped(STYLE)) }
            }
            body {
                aside {
                    h2 { (PAGE_TITLE) }
                    (upload_form(view))
                    (column_form(view))
                    a href="/download" { "Descargar informe" }
                }
                main {
                    h3 { "Vista previa de datos" }
                    pre id="preview" { (view.preview) }
                    h3 { "Estadísticas" }
                    @if let Some(stats) = &view.stats {
                        (section_block("stats", stats, false))
                    }
                    h3 { "Histograma" }
                    @if let Some(plot) = &view.plot {
                        (section_block("plot", plot, true))
                    }
                }
            }
        }
    }
}

fn upload_form(view: &View) -> Markup {
    html! {
        form action="/upload" method="post" enctype="multipart/form-data" {
            label for="file" { "Sube un archivo Excel" }
            br;
            input type="file" id="file" name="file" accept=".xlsx,.xlsm,.xlsb,.xls";
            button type="submit" { "Cargar" }
            @if let Some(name) = &view.file_name {
                p { "Archivo: " (name) }
            }
        }
    }
}

fn column_form(view: &View) -> Markup {
    html! {
        form action="/column" method="post" {
            label for="column" { "Selecciona la columna para análisis:" }
            br;
            select id="column" name="column" onchange="this.form.submit()" {
                @for choice in &view.choices {
                    option value=(choice) selected[view.selected.as_ref() == Some(choice)] { (choice) }
                }
            }
            noscript { button type="submit" { "Analizar" } }
        }
    }
}

/// Content is escaped text, except the chart which is already markup.
fn section_block(id: &str, section: &Section, is_markup: bool) -> Markup {
    match section {
        Section::Error(message) => html! { p id=(id) class="error" { (message) } },
        Section::Content(content) if is_markup => html! { div id=(id) { (PreEscaped(content)) } },
        Section::Content(content) => html! { pre id=(id) { (content) } },
    }
}
