use eframe::egui;
use std::sync::Arc;

fn read_first_existing(paths: &[&str]) -> Option<Vec<u8>> {
    for p in paths {
        if let Ok(data) = std::fs::read(p) {
            return Some(data);
        }
    }
    None
}

/// Register a CJK-capable fallback font. The default egui fonts have no
/// Japanese or Traditional Chinese glyphs, so without this both the source
/// text and the translation render as boxes.
pub fn setup_custom_fonts(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();

    // Candidate paths for CJK fonts
    #[cfg(target_os = "macos")]
    let cjk_candidates = [
        "/System/Library/Fonts/PingFang.ttc",
        "/System/Library/Fonts/Hiragino Sans GB.ttc",
        "/Library/Fonts/Hiragino Sans GB W3.ttc",
        "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
        // Noto CJK (if installed via Homebrew)
        "/opt/homebrew/share/fonts/NotoSansCJK-Regular.ttc",
        "/usr/local/share/fonts/NotoSansCJK-Regular.ttc",
    ];

    // Windows system font locations
    #[cfg(target_os = "windows")]
    let cjk_candidates = [
        // Microsoft JhengHei (Traditional Chinese)
        "C:\\Windows\\Fonts\\msjh.ttc",
        "C:\\Windows\\Fonts\\msjhbd.ttc",
        // Yu Gothic / Meiryo (Japanese)
        "C:\\Windows\\Fonts\\YuGothR.ttc",
        "C:\\Windows\\Fonts\\YuGothM.ttc",
        "C:\\Windows\\Fonts\\meiryo.ttc",
        // MS Gothic (older but very common)
        "C:\\Windows\\Fonts\\msgothic.ttc",
    ];

    // Linux and other Unix-like systems
    #[cfg(all(not(target_os = "macos"), not(target_os = "windows")))]
    let cjk_candidates = [
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/truetype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/truetype/noto/NotoSansCJKjp-Regular.otf",
        // IPA fonts (fallbacks)
        "/usr/share/fonts/opentype/ipafont-gothic/ipag.ttf",
        "/usr/share/fonts/truetype/fonts-japanese-gothic.ttf",
    ];

    if let Some(cjk) = read_first_existing(&cjk_candidates) {
        fonts.font_data.insert(
            "cjk_fallback".to_owned(),
            Arc::new(egui::FontData::from_owned(cjk)),
        );
        // Prefer CJK glyphs via fallback
        for fam in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
            fonts
                .families
                .entry(fam)
                .or_default()
                .insert(0, "cjk_fallback".to_owned());
        }
    } else {
        tracing::warn!("no CJK font found; Japanese and Chinese text will not render");
    }

    ctx.set_fonts(fonts);
}
