// Hide the console window on Windows release builds
#![cfg_attr(all(target_os = "windows", not(debug_assertions)), windows_subsystem = "windows")]

use anyhow::Result;

use snaptrans::gui::{fonts, SnapTransApp};
use snaptrans::i18n;
use snaptrans::ocr::TesseractEngine;
use snaptrans::settings::Settings;
use snaptrans::translate::GoogleTranslator;

const APP_NAME: &str = "SnapTrans";

fn init_logging() {
    use tracing_subscriber::EnvFilter;
    let default_directives = "info,egui=error,epaint=error,eframe=error,egui_wgpu=error,wgpu=error,wgpu_core=error,wgpu_hal=error,naga=error";
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    tracing::info!("{} version {}", APP_NAME, env!("CARGO_PKG_VERSION"));

    let settings = Settings::load_or_init();
    i18n::set_ui_language_preference(&settings.ui_language);

    // Without a translator no cycle can succeed, so refuse to start
    let translator = match GoogleTranslator::new(&settings.translation) {
        Ok(translator) => translator,
        Err(err) => {
            tracing::error!("failed to initialize translator: {:#}", err);
            std::process::exit(1);
        }
    };

    let engine = TesseractEngine::new(&settings.ocr);
    if !engine.executable_exists() {
        tracing::warn!(
            "tesseract not found at {}; OCR will fail until it is installed",
            settings.ocr.tesseract_path.display()
        );
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_app_id(APP_NAME)
            .with_title(APP_NAME)
            .with_inner_size(egui::vec2(450.0, 360.0))
            .with_min_inner_size(egui::vec2(320.0, 240.0)),
        renderer: eframe::Renderer::Wgpu,
        centered: true,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            fonts::setup_custom_fonts(&cc.egui_ctx);
            Ok(Box::new(SnapTransApp::new(settings, engine, translator)))
        }),
    )
    .map_err(|err| anyhow::anyhow!("failed to launch UI: {err}"))?;

    Ok(())
}
