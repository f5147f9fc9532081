use eframe::egui;

use crate::capture::Region;
use crate::i18n;
use crate::ocr::TesseractEngine;
use crate::pipeline::{run_capture_cycle, CycleOutcome};
use crate::settings::Settings;
use crate::translate::GoogleTranslator;

use super::overlay::{CompletedSelection, SelectionOverlay};

pub struct SnapTransApp {
    settings: Settings,
    engine: TesseractEngine,
    translator: GoogleTranslator,
    overlay: SelectionOverlay,
    status: String,
    recognized: Option<String>,
    translation: Option<String>,
}

impl SnapTransApp {
    pub fn new(settings: Settings, engine: TesseractEngine, translator: GoogleTranslator) -> Self {
        Self {
            settings,
            engine,
            translator,
            overlay: SelectionOverlay::new(),
            status: i18n::tr("status-ready"),
            recognized: None,
            translation: None,
        }
    }

    fn begin_selection(&mut self) {
        self.status = i18n::tr("status-selecting");
        self.overlay.activate();
    }

    /// Run the whole capture cycle for a finished drag. Everything here is
    /// synchronous; the UI blocks until OCR and translation return.
    fn handle_selection(&mut self, selection: CompletedSelection) {
        let region = Region::from_drag_points(
            selection.start,
            selection.end,
            selection.pixels_per_point,
        );
        if !region.is_selectable() {
            self.status = i18n::tr("status-too-small");
            return;
        }

        match run_capture_cycle(&region, &self.settings, &self.engine, &self.translator) {
            Ok(CycleOutcome::NoText) => {
                self.status = i18n::tr("status-no-text");
            }
            Ok(CycleOutcome::Translated {
                source_text,
                translated_text,
            }) => {
                self.recognized = Some(source_text);
                self.translation = Some(translated_text);
                self.status = i18n::tr("status-done");
            }
            Ok(CycleOutcome::TranslationFailed { source_text, error }) => {
                self.recognized = Some(source_text);
                self.translation =
                    Some(format!("{}: {}", i18n::tr("status-translate-failed"), error));
                self.status = i18n::tr("status-done");
            }
            Err(err) => {
                tracing::error!("capture cycle failed: {:#}", err);
                self.status = format!("{}: {:#}", i18n::tr("status-error"), err);
            }
        }
    }
}

impl eframe::App for SnapTransApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let was_selecting = self.overlay.is_active();
        if let Some(selection) = self.overlay.show(ctx) {
            // One frame after drag release; the overlay viewport is gone and
            // the capture sees the bare screen.
            self.handle_selection(selection);
        } else if was_selecting && !self.overlay.is_active() && !self.overlay.has_result() {
            // Selection cancelled with Escape
            self.status = i18n::tr("status-ready");
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(8.0);
                let select =
                    ui.add_enabled(!self.overlay.is_active(), egui::Button::new(i18n::tr("button-select")));
                if select.clicked() {
                    self.begin_selection();
                }
                ui.add_space(6.0);
                ui.label(&self.status);
            });

            if let Some(text) = self.recognized.as_mut() {
                ui.add_space(8.0);
                ui.label(i18n::tr("label-source"));
                ui.add(
                    egui::TextEdit::multiline(text)
                        .desired_rows(6)
                        .desired_width(f32::INFINITY),
                );
            }

            if let Some(result) = &self.translation {
                ui.add_space(8.0);
                ui.separator();
                ui.label(i18n::tr("label-result"));
                ui.label(result);
            }
        });
    }
}
