//! User configuration persisted as `settings.toml` in the OS config dir.
//!
//! Every key is optional; missing keys fall back to the defaults below, which
//! match the tool's original fixed behavior.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::ocr::{default_layout_modes, LayoutMode};
use crate::utils::app_config_dir;

#[cfg(target_os = "windows")]
const DEFAULT_TESSERACT_PATH: &str = r"C:\Program Files\Tesseract-OCR\tesseract.exe";
#[cfg(not(target_os = "windows"))]
const DEFAULT_TESSERACT_PATH: &str = "tesseract";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// UI language: "auto", "en" or "zh-TW".
    pub ui_language: String,
    pub preprocess: PreprocessSettings,
    pub ocr: OcrSettings,
    pub translation: TranslationSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ui_language: "auto".to_string(),
            preprocess: PreprocessSettings::default(),
            ocr: OcrSettings::default(),
            translation: TranslationSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PreprocessSettings {
    /// Upscale factor applied before recognition.
    pub scale_factor: f32,
    /// Contrast multiplier around the image mean.
    pub contrast_factor: f32,
    /// Pixels below this go black, everything else white.
    pub binarize_threshold: u8,
}

impl Default for PreprocessSettings {
    fn default() -> Self {
        Self {
            scale_factor: 2.0,
            contrast_factor: 2.0,
            binarize_threshold: 150,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OcrSettings {
    pub tesseract_path: PathBuf,
    /// Tesseract language model, e.g. "jpn".
    pub language: String,
    /// Layout modes tried in order; first non-empty result wins.
    pub layout_modes: Vec<LayoutMode>,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            tesseract_path: PathBuf::from(DEFAULT_TESSERACT_PATH),
            language: "jpn".to_string(),
            layout_modes: default_layout_modes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TranslationSettings {
    /// "auto" lets the backend detect the source language.
    pub source_lang: String,
    pub target_lang: String,
    pub timeout_secs: u64,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            source_lang: "auto".to_string(),
            target_lang: "zh-TW".to_string(),
            timeout_secs: 15,
        }
    }
}

impl Settings {
    pub fn config_path() -> PathBuf {
        app_config_dir().join("settings.toml")
    }

    /// Load settings, writing a default file on first launch. A malformed
    /// file falls back to defaults with a warning rather than blocking
    /// startup.
    pub fn load_or_init() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            let settings = Self::default();
            if let Err(err) = settings.save() {
                tracing::warn!("failed to write default settings: {:#}", err);
            }
            return settings;
        }
        match fs::read_to_string(&path) {
            Ok(text) => match toml::from_str(&text) {
                Ok(settings) => settings,
                Err(err) => {
                    tracing::warn!("ignoring malformed {}: {}", path.display(), err);
                    Self::default()
                }
            },
            Err(err) => {
                tracing::warn!("failed to read {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        let text = toml::to_string(self).context("serialize settings")?;
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }

        // Atomic-ish write: write to temp file then rename
        let tmp_path = path.with_extension("toml.tmp");
        let mut file = fs::File::create(&tmp_path)
            .with_context(|| format!("create {}", tmp_path.display()))?;
        file.write_all(text.as_bytes()).context("write settings")?;
        file.flush().ok();
        fs::rename(&tmp_path, &path).context("replace settings file")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Settings;
    use crate::ocr::LayoutMode;

    #[test]
    fn defaults_match_documented_behavior() {
        let s = Settings::default();
        assert_eq!(s.preprocess.scale_factor, 2.0);
        assert_eq!(s.preprocess.contrast_factor, 2.0);
        assert_eq!(s.preprocess.binarize_threshold, 150);
        assert_eq!(s.ocr.language, "jpn");
        assert_eq!(
            s.ocr.layout_modes,
            vec![LayoutMode::Block, LayoutMode::SingleLine]
        );
        assert_eq!(s.translation.source_lang, "auto");
        assert_eq!(s.translation.target_lang, "zh-TW");
    }

    #[test]
    fn toml_round_trip_preserves_settings() {
        let original = Settings::default();
        let text = toml::to_string(&original).unwrap();
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let parsed: Settings = toml::from_str("[ocr]\nlanguage = \"eng\"\n").unwrap();
        assert_eq!(parsed.ocr.language, "eng");
        assert_eq!(parsed.preprocess.binarize_threshold, 150);
        assert_eq!(parsed.ui_language, "auto");
    }
}
