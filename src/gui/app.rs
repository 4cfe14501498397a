//! Main window implemented with egui/eframe
//!
//! The snapshot is collected before the window opens; the UI only presents
//! it and wires the user-triggered actions (theme toggle, info modal, copy,
//! download).

use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use chrono::Local;
use eframe::{CreationContext, NativeOptions, egui};
use tracing::{error, info};

use super::constants::*;
use crate::collector::SystemInfo;
use crate::config::{Settings, ThemePreference};
use crate::export::{self, CopyMethod};
use crate::markdown;
use crate::report::{self, Section};

struct StatusMessage {
    text: String,
    color: egui::Color32,
    shown_at: Instant,
}

impl StatusMessage {
    fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: STATUS_OK,
            shown_at: Instant::now(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: STATUS_ERROR,
            shown_at: Instant::now(),
        }
    }
}

struct InfoApp {
    sections: Vec<Section>,
    report: String,
    settings: Settings,
    readme: String,
    show_info: bool,
    status: Option<StatusMessage>,
}

impl InfoApp {
    fn new(_cc: &CreationContext<'_>, info: SystemInfo, settings: Settings, readme: String) -> Self {
        info!("Initializing egui window");
        let report = report::text_report(&info, Local::now());
        Self {
            sections: report::sections(&info),
            report,
            settings,
            readme,
            show_info: false,
            status: None,
        }
    }

    fn copy_report(&mut self) {
        self.status = Some(match export::copy_to_clipboard(&self.report) {
            Ok(CopyMethod::Native) => StatusMessage::ok("Informe copiado al portapapeles"),
            Ok(CopyMethod::Legacy) => {
                StatusMessage::ok("Informe copiado (mecanismo alternativo)")
            }
            Err(e) => {
                error!(error = ?e, "Clipboard copy failed");
                StatusMessage::error("No se pudo copiar el informe")
            }
        });
    }

    fn save_report(&mut self) {
        let filename = report::report_filename(Local::now());
        self.status = Some(
            match export::save_to_dir(&export::default_export_dir(), &filename, &self.report) {
                Ok(path) => StatusMessage::ok(format!("Guardado en {}", path.display())),
                Err(e) => {
                    error!(error = ?e, "Report download failed");
                    StatusMessage::error("No se pudo guardar el informe")
                }
            },
        );
    }

    fn clear_expired_status(&mut self) {
        if let Some(status) = &self.status {
            if status.shown_at.elapsed() >= Duration::from_secs(crate::constants::export::STATUS_CLEAR_SECS)
            {
                self.status = None;
            }
        }
    }
}

impl eframe::App for InfoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.clear_expired_status();

        ctx.set_visuals(match self.settings.theme {
            ThemePreference::Light => egui::Visuals::light(),
            ThemePreference::Dark => egui::Visuals::dark(),
        });

        let mut toggle_theme = false;
        let mut open_info = false;
        let mut copy_clicked = false;
        let mut save_clicked = false;

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(ITEM_SPACING);
            ui.horizontal(|ui| {
                ui.heading("Información del usuario");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .button(self.settings.theme.icon())
                        .on_hover_text("Cambiar tema")
                        .clicked()
                    {
                        toggle_theme = true;
                    }
                    if ui
                        .button("\u{2139}")
                        .on_hover_text("Acerca de esta herramienta")
                        .clicked()
                    {
                        open_info = true;
                    }
                });
            });
            ui.add_space(ITEM_SPACING);
        });

        egui::TopBottomPanel::bottom("actions").show(ctx, |ui| {
            ui.add_space(ITEM_SPACING);
            ui.horizontal(|ui| {
                if ui.button("\u{1F4CB} Copiar informe").clicked() {
                    copy_clicked = true;
                }
                if ui.button("\u{1F4BE} Descargar .txt").clicked() {
                    save_clicked = true;
                }
                if let Some(status) = &self.status {
                    ui.colored_label(status.color, &status.text);
                }
            });
            ui.add_space(ITEM_SPACING);
        });

        let sections = std::mem::take(&mut self.sections);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                for section in &sections {
                    ui.group(|ui| {
                        ui.label(egui::RichText::new(section.title).strong());
                        ui.add_space(ITEM_SPACING / 2.0);
                        egui::Grid::new(section.title)
                            .num_columns(2)
                            .spacing([12.0, 4.0])
                            .show(ui, |ui| {
                                for (label, value) in &section.rows {
                                    ui.label(format!("{label}:"));
                                    ui.label(value);
                                    ui.end_row();
                                }
                            });
                    });
                    ui.add_space(SECTION_SPACING);
                }

                ui.collapsing("Informe exportable", |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut self.report)
                            .font(egui::TextStyle::Monospace)
                            .desired_width(f32::INFINITY)
                            .desired_rows(12)
                            .interactive(false),
                    );
                });
            });
        });
        self.sections = sections;

        if self.show_info {
            let modal = egui::Modal::new(egui::Id::new("info_modal")).show(ctx, |ui| {
                ui.set_width(MODAL_WIDTH);
                ui.heading("Acerca de");
                ui.add_space(ITEM_SPACING);
                egui::ScrollArea::vertical()
                    .max_height(MODAL_SCROLL_HEIGHT)
                    .show(ui, |ui| {
                        markdown_preview(ui, &self.readme);
                    });
                ui.add_space(ITEM_SPACING);
                if ui.button("Cerrar").clicked() {
                    self.show_info = false;
                }
            });
            // Backdrop click or Escape both dismiss the modal
            if modal.should_close() || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
                self.show_info = false;
            }
        }

        if toggle_theme {
            self.settings.toggle_theme();
        }
        if open_info {
            self.show_info = true;
        }
        if copy_clicked {
            self.copy_report();
        }
        if save_clicked {
            self.save_report();
        }

        if self.status.is_some() {
            ctx.request_repaint_after(Duration::from_secs(1));
        }
    }
}

/// Lightweight on-screen rendering of the supported Markdown subset.
/// Structure comes from `markdown::classify_line`, the same rule set the
/// HTML conversion applies; this only maps it onto egui widgets.
fn markdown_preview(ui: &mut egui::Ui, source: &str) {
    let mut in_code = false;
    for line in source.lines() {
        match markdown::classify_line(line) {
            markdown::Line::Fence => in_code = !in_code,
            _ if in_code => {
                ui.code(line);
            }
            markdown::Line::Header { level, text } => {
                let size = match level {
                    1 => 19.0,
                    2 => 16.0,
                    _ => 14.0,
                };
                ui.label(
                    egui::RichText::new(markdown::strip_spans(text))
                        .size(size)
                        .strong(),
                );
            }
            markdown::Line::ListItem(text) => {
                ui.label(format!("\u{2022} {}", markdown::strip_spans(text)));
            }
            markdown::Line::Blank => ui.add_space(ITEM_SPACING / 2.0),
            markdown::Line::Text(text) => {
                ui.label(markdown::strip_spans(text));
            }
        }
    }
}

/// Open the main window with the collected snapshot
pub fn run(info: SystemInfo, settings: Settings, readme: String) -> Result<()> {
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_min_inner_size([WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT])
            .with_title("Información del usuario"),
        ..Default::default()
    };

    eframe::run_native(
        "Información del usuario",
        options,
        Box::new(|cc| Ok(Box::new(InfoApp::new(cc, info, settings, readme)))),
    )
    .map_err(|err| anyhow!("Failed to launch egui window: {err}"))
}
