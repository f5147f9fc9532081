//! Text recognition via the external tesseract executable.
//!
//! The engine tries an ordered list of layout modes and accepts the first one
//! whose output is non-empty after trimming. A mode that fails is logged and
//! treated as if it produced nothing, so the next mode still runs.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{anyhow, Context, Result};
use image::{DynamicImage, GrayImage};
use serde::{Deserialize, Serialize};

use crate::settings::OcrSettings;

/// Page layout assumption passed to tesseract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// A uniform block of text (`--psm 6`).
    Block,
    /// Sparse text, found line by line (`--psm 11`).
    SingleLine,
}

impl LayoutMode {
    pub fn psm(self) -> &'static str {
        match self {
            LayoutMode::Block => "6",
            LayoutMode::SingleLine => "11",
        }
    }
}

/// Default mode order: block first, then the sparse single-line pass.
pub fn default_layout_modes() -> Vec<LayoutMode> {
    vec![LayoutMode::Block, LayoutMode::SingleLine]
}

pub struct TesseractEngine {
    executable: PathBuf,
    language: String,
}

impl TesseractEngine {
    pub fn new(settings: &OcrSettings) -> Self {
        Self {
            executable: settings.tesseract_path.clone(),
            language: settings.language.clone(),
        }
    }

    /// Whether the configured executable can be found at its absolute path.
    /// A bare command name is resolved through PATH at invocation time, so it
    /// cannot be checked here.
    pub fn executable_exists(&self) -> bool {
        !self.executable.is_absolute() || self.executable.exists()
    }

    /// Recognize text in `image`, trying `modes` in order.
    /// Returns `Ok(None)` when every mode produced empty output.
    pub fn recognize(&self, image: &GrayImage, modes: &[LayoutMode]) -> Result<Option<String>> {
        let mut tmp = tempfile::Builder::new()
            .suffix(".png")
            .tempfile()
            .context("create temp image for OCR")?;
        DynamicImage::ImageLuma8(image.clone())
            .write_to(&mut tmp, image::ImageFormat::Png)
            .context("write temp image for OCR")?;
        tmp.flush().ok();

        Ok(first_non_empty(modes, |mode| {
            self.run_mode(tmp.path(), mode)
        }))
    }

    fn run_mode(&self, image_path: &Path, mode: LayoutMode) -> Result<String> {
        let output = Command::new(&self.executable)
            .arg(image_path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .arg("--psm")
            .arg(mode.psm())
            .output()
            .with_context(|| format!("run {} (is it installed?)", self.executable.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("tesseract failed: {}", stderr.trim()));
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// Short-circuiting evaluation over the mode list: the first run whose output
/// is non-empty after trimming wins. Errors count as empty output.
pub fn first_non_empty<F>(modes: &[LayoutMode], mut run: F) -> Option<String>
where
    F: FnMut(LayoutMode) -> Result<String>,
{
    for &mode in modes {
        match run(mode) {
            Ok(text) if !text.trim().is_empty() => return Some(text),
            Ok(_) => {
                tracing::debug!("OCR mode {:?} produced no text", mode);
            }
            Err(err) => {
                tracing::warn!("OCR mode {:?} failed: {:#}", mode, err);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::{default_layout_modes, first_non_empty, LayoutMode};
    use anyhow::anyhow;

    #[test]
    fn default_order_is_block_then_single_line() {
        assert_eq!(
            default_layout_modes(),
            vec![LayoutMode::Block, LayoutMode::SingleLine]
        );
    }

    #[test]
    fn psm_values_match_tesseract() {
        assert_eq!(LayoutMode::Block.psm(), "6");
        assert_eq!(LayoutMode::SingleLine.psm(), "11");
    }

    #[test]
    fn first_mode_with_text_wins() {
        let modes = default_layout_modes();
        let result = first_non_empty(&modes, |mode| match mode {
            LayoutMode::Block => Ok("ブロック".to_string()),
            LayoutMode::SingleLine => panic!("must not run once a mode succeeded"),
        });
        assert_eq!(result.as_deref(), Some("ブロック"));
    }

    #[test]
    fn empty_output_falls_through_to_next_mode() {
        let modes = default_layout_modes();
        let mut attempts = Vec::new();
        let result = first_non_empty(&modes, |mode| {
            attempts.push(mode);
            match mode {
                LayoutMode::Block => Ok("   \n".to_string()),
                LayoutMode::SingleLine => Ok("一行".to_string()),
            }
        });
        assert_eq!(result.as_deref(), Some("一行"));
        assert_eq!(attempts, vec![LayoutMode::Block, LayoutMode::SingleLine]);
    }

    #[test]
    fn mode_error_counts_as_empty() {
        let modes = default_layout_modes();
        let result = first_non_empty(&modes, |mode| match mode {
            LayoutMode::Block => Err(anyhow!("engine blew up")),
            LayoutMode::SingleLine => Ok("回復".to_string()),
        });
        assert_eq!(result.as_deref(), Some("回復"));
    }

    #[test]
    fn all_modes_empty_yields_none() {
        let modes = default_layout_modes();
        let result = first_non_empty(&modes, |_| Ok(String::new()));
        assert!(result.is_none());
    }

    #[test]
    fn layout_mode_serde_uses_snake_case() {
        let json = serde_json::to_string(&LayoutMode::SingleLine).unwrap();
        assert_eq!(json, "\"single_line\"");
        let parsed: LayoutMode = serde_json::from_str("\"block\"").unwrap();
        assert_eq!(parsed, LayoutMode::Block);
    }
}
