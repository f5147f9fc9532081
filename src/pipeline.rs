//! One capture-translate cycle: capture, preprocess, recognize, normalize,
//! translate. Runs synchronously inside the drag-release handler.

use anyhow::Result;

use crate::capture::{self, Region};
use crate::normalize;
use crate::ocr::TesseractEngine;
use crate::preprocess;
use crate::settings::Settings;
use crate::translate::TranslateBackend;

/// What one cycle produced, mapped onto status/labels by the GUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Every OCR mode came back empty; translation was never invoked.
    NoText,
    Translated {
        source_text: String,
        translated_text: String,
    },
    /// Recognition worked, translation did not; the error message is shown
    /// in place of the result.
    TranslationFailed {
        source_text: String,
        error: String,
    },
}

/// Run the whole pipeline for an already validated selection.
/// Capture or temp-file failures propagate as `Err` and surface as a generic
/// status message.
pub fn run_capture_cycle<T: TranslateBackend>(
    region: &Region,
    settings: &Settings,
    engine: &TesseractEngine,
    translator: &T,
) -> Result<CycleOutcome> {
    tracing::debug!(
        "capturing {}x{} at ({}, {})",
        region.width(),
        region.height(),
        region.left,
        region.top
    );
    let captured = capture::grab_region(region)?;
    let prepared = preprocess::prepare_for_ocr(&captured, &settings.preprocess);
    let recognized = engine.recognize(&prepared, &settings.ocr.layout_modes)?;
    Ok(translate_recognized(recognized, translator))
}

/// Second half of the cycle, split off so it can be exercised without a
/// screen or a tesseract install.
pub fn translate_recognized<T: TranslateBackend>(
    recognized: Option<String>,
    translator: &T,
) -> CycleOutcome {
    let Some(raw) = recognized else {
        return CycleOutcome::NoText;
    };
    let source_text = normalize::normalize(&raw);
    if source_text.is_empty() {
        return CycleOutcome::NoText;
    }

    tracing::info!("recognized {} chars", source_text.chars().count());
    match translator.translate(&source_text) {
        Ok(translated_text) => CycleOutcome::Translated {
            source_text,
            translated_text,
        },
        Err(err) => {
            tracing::warn!("translation failed: {:#}", err);
            CycleOutcome::TranslationFailed {
                source_text,
                error: format!("{:#}", err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{translate_recognized, CycleOutcome};
    use crate::translate::TranslateBackend;
    use anyhow::{anyhow, Result};
    use std::cell::RefCell;

    /// Records every request; answers with a canned result.
    struct StubTranslator {
        calls: RefCell<Vec<String>>,
        fail: bool,
    }

    impl StubTranslator {
        fn new(fail: bool) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                fail,
            }
        }
    }

    impl TranslateBackend for StubTranslator {
        fn translate(&self, text: &str) -> Result<String> {
            self.calls.borrow_mut().push(text.to_string());
            if self.fail {
                Err(anyhow!("backend unavailable"))
            } else {
                Ok(format!("訳:{}", text))
            }
        }
    }

    #[test]
    fn empty_recognition_never_calls_translator() {
        let translator = StubTranslator::new(false);
        let outcome = translate_recognized(None, &translator);
        assert_eq!(outcome, CycleOutcome::NoText);
        assert!(translator.calls.borrow().is_empty());
    }

    #[test]
    fn recognized_text_is_normalized_before_translation() {
        let translator = StubTranslator::new(false);
        let outcome = translate_recognized(Some("ab\ncd\n".to_string()), &translator);
        assert_eq!(translator.calls.borrow().as_slice(), ["abcd"]);
        assert_eq!(
            outcome,
            CycleOutcome::Translated {
                source_text: "abcd".to_string(),
                translated_text: "訳:abcd".to_string(),
            }
        );
    }

    #[test]
    fn translation_failure_keeps_source_text() {
        let translator = StubTranslator::new(true);
        let outcome = translate_recognized(Some("こんにちは".to_string()), &translator);
        match outcome {
            CycleOutcome::TranslationFailed { source_text, error } => {
                assert_eq!(source_text, "こんにちは");
                assert!(error.contains("backend unavailable"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
