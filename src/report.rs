//! Presentation of the collected snapshot
//!
//! One set of label/value rows per section feeds the three surfaces: the
//! plain-text report, the exported HTML page and the on-screen panels.
//! Labels are hardcoded Spanish, matching the exported artifacts.

use chrono::{DateTime, Local};

use crate::collector::SystemInfo;
use crate::config::ThemePreference;
use crate::constants::{app, export};
use crate::markdown::escape_html;

/// A rendered section: banner title plus label/value rows
pub struct Section {
    pub title: &'static str,
    pub rows: Vec<(String, String)>,
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// The five display sections, in presentation order
pub fn sections(info: &SystemInfo) -> Vec<Section> {
    let browser = &info.browser;
    let system = &info.system;
    let screen = &info.screen;
    let network = &info.network;

    let feature_rows = info
        .features
        .iter()
        .map(|(name, supported)| {
            (
                capitalize(name),
                if *supported { "Sí" } else { "No" }.to_string(),
            )
        })
        .collect();

    vec![
        Section {
            title: "NAVEGADOR",
            rows: vec![
                ("Nombre".to_string(), browser.name.clone()),
                ("Versión".to_string(), browser.version.clone()),
                ("User-Agent".to_string(), browser.user_agent.clone()),
                ("Idioma".to_string(), browser.language.clone()),
            ],
        },
        Section {
            title: "SISTEMA",
            rows: vec![
                ("Sistema operativo".to_string(), system.os.clone()),
                ("Arquitectura".to_string(), system.arch.clone()),
                ("Núcleos de CPU".to_string(), system.cpu_cores.clone()),
                ("Memoria".to_string(), system.memory.clone()),
                ("Equipo".to_string(), system.hostname.clone()),
            ],
        },
        Section {
            title: "PANTALLA",
            rows: vec![
                ("Resolución".to_string(), screen.resolution.clone()),
                (
                    "Resolución disponible".to_string(),
                    screen.available_resolution.clone(),
                ),
                ("Profundidad de color".to_string(), screen.color_depth.clone()),
                ("Ratio de píxeles".to_string(), screen.pixel_ratio.clone()),
                ("Área visible".to_string(), screen.viewport.clone()),
                ("Orientación".to_string(), screen.orientation.clone()),
            ],
        },
        Section {
            title: "RED",
            rows: vec![
                ("Dirección IP".to_string(), network.ip.clone()),
                ("Ciudad".to_string(), network.city.clone()),
                ("Región".to_string(), network.region.clone()),
                ("País".to_string(), network.country.clone()),
                ("Proveedor".to_string(), network.isp.clone()),
                ("Zona horaria".to_string(), network.timezone.clone()),
                ("Tipo de conexión".to_string(), network.connection_type.clone()),
            ],
        },
        Section {
            title: "CAPACIDADES",
            rows: feature_rows,
        },
    ]
}

/// Fixed-layout plain-text report with section banners
pub fn text_report(info: &SystemInfo, now: DateTime<Local>) -> String {
    let mut out = String::new();
    out.push_str("==================================================\n");
    out.push_str("        INFORME DE INFORMACIÓN DEL USUARIO\n");
    out.push_str("==================================================\n\n");
    out.push_str(&format!(
        "Generado: {}\n",
        now.format(export::REPORT_TIMESTAMP)
    ));

    for section in sections(info) {
        out.push_str(&format!("\n---------- {} ----------\n", section.title));
        for (label, value) in &section.rows {
            out.push_str(&format!("{label}: {value}\n"));
        }
    }
    out
}

/// File name for an exported report, embedding the clock time
pub fn report_filename(now: DateTime<Local>) -> String {
    format!(
        "{}-{}.txt",
        app::REPORT_PREFIX,
        now.format(export::FILENAME_TIMESTAMP)
    )
}

/// File name for the exported HTML page
pub fn page_filename(now: DateTime<Local>) -> String {
    format!(
        "{}-{}.html",
        app::REPORT_PREFIX,
        now.format(export::FILENAME_TIMESTAMP)
    )
}

/// Self-contained HTML page with the five display regions. Every value goes
/// through `escape_html`; an optional pre-rendered info fragment is appended
/// as-is.
pub fn html_page(
    info: &SystemInfo,
    theme: ThemePreference,
    now: DateTime<Local>,
    info_fragment: Option<&str>,
) -> String {
    let mut body = String::new();
    body.push_str("<h1>Información del usuario</h1>\n");
    body.push_str(&format!(
        "<p class=\"generado\">Generado: {}</p>\n",
        now.format(export::REPORT_TIMESTAMP)
    ));

    for section in sections(info) {
        let id = section.title.to_lowercase();
        body.push_str(&format!(
            "<section id=\"{id}\">\n<h2>{}</h2>\n<ul>\n",
            capitalize(&id)
        ));
        for (label, value) in &section.rows {
            body.push_str(&format!(
                "<li><strong>{}:</strong> {}</li>\n",
                escape_html(label),
                escape_html(value)
            ));
        }
        body.push_str("</ul>\n</section>\n");
    }

    if let Some(fragment) = info_fragment {
        body.push_str("<section id=\"informacion\">\n");
        body.push_str(fragment);
        body.push_str("\n</section>\n");
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"es\" data-theme=\"{theme}\">\n<head>\n\
         <meta charset=\"utf-8\">\n<title>Información del usuario</title>\n\
         <style>\n{STYLE}</style>\n</head>\n<body>\n{body}</body>\n</html>\n",
        theme = theme.attribute(),
    )
}

const STYLE: &str = "\
body { font-family: sans-serif; margin: 2rem auto; max-width: 50rem; }
html[data-theme=\"light\"] body { background: #fafafa; color: #222; }
html[data-theme=\"dark\"] body { background: #1d1f21; color: #e8e8e8; }
section { border: 1px solid #8884; border-radius: 6px; padding: 0 1rem; margin: 1rem 0; }
ul { list-style: none; padding: 0; }
li { margin: 0.3rem 0; }
code, pre { font-family: monospace; background: #8882; }
";
