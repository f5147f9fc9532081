//! Translation backend: the Google web endpoint, one blocking request per cycle.

use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use reqwest::blocking::Client;
use serde_json::Value;

use crate::settings::TranslationSettings;

const ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";
const USER_AGENT_VALUE: &str = concat!("snaptrans/", env!("CARGO_PKG_VERSION"));
const MAX_ERROR_BODY_PREVIEW: usize = 300;

/// Seam between the pipeline and the network, so cycle logic can be tested
/// without a live backend.
pub trait TranslateBackend {
    fn translate(&self, text: &str) -> Result<String>;
}

pub struct GoogleTranslator {
    client: Client,
    source: String,
    target: String,
}

impl GoogleTranslator {
    /// Build the translator once at startup. Failing here is fatal for the
    /// whole program; every later cycle depends on this client.
    pub fn new(settings: &TranslationSettings) -> Result<Self> {
        let secs = settings.timeout_secs.clamp(3, 120);
        let client = Client::builder()
            .timeout(Duration::from_secs(secs))
            .user_agent(USER_AGENT_VALUE)
            .build()
            .context("create HTTP client")?;
        Ok(Self {
            client,
            source: settings.source_lang.clone(),
            target: settings.target_lang.clone(),
        })
    }
}

impl TranslateBackend for GoogleTranslator {
    fn translate(&self, text: &str) -> Result<String> {
        let response = self
            .client
            .get(ENDPOINT)
            .query(&[
                ("client", "gtx"),
                ("sl", self.source.as_str()),
                ("tl", self.target.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .map_err(describe_request_error)?;

        let status = response.status();
        let body = response.text().unwrap_or_default();
        if !status.is_success() {
            bail!("HTTP {} {}", status.as_u16(), preview_body(&body));
        }
        parse_translation(&body)
    }
}

/// The response is a nested array; the first element holds translated
/// segments, each with the translated text at index 0.
fn parse_translation(body: &str) -> Result<String> {
    let value: Value = serde_json::from_str(body).context("parse translation response")?;
    let segments = value
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| anyhow!("unexpected translation response shape"))?;

    let mut out = String::new();
    for segment in segments {
        if let Some(text) = segment.get(0).and_then(Value::as_str) {
            out.push_str(text);
        }
    }
    if out.is_empty() {
        bail!("translation response contained no text");
    }
    Ok(out)
}

fn describe_request_error(err: reqwest::Error) -> anyhow::Error {
    if err.is_timeout() {
        return anyhow!("translation request timed out");
    }
    if err.is_connect() {
        return anyhow!("failed to connect to translation service: {}", err);
    }
    anyhow!("translation request failed: {}", err)
}

fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_ERROR_BODY_PREVIEW {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(MAX_ERROR_BODY_PREVIEW).collect();
    format!("{}…", cut)
}

#[cfg(test)]
mod tests {
    use super::{parse_translation, preview_body};

    #[test]
    fn parses_single_segment_response() {
        let body = r#"[[["你好","こんにちは",null,null,10]],null,"ja"]"#;
        assert_eq!(parse_translation(body).unwrap(), "你好");
    }

    #[test]
    fn concatenates_multiple_segments() {
        let body =
            r#"[[["你好，","こんにちは、",null,null],["世界","せかい",null,null]],null,"ja"]"#;
        assert_eq!(parse_translation(body).unwrap(), "你好，世界");
    }

    #[test]
    fn rejects_unexpected_shape() {
        assert!(parse_translation(r#"{"error":"nope"}"#).is_err());
        assert!(parse_translation("[]").is_err());
        assert!(parse_translation("not json").is_err());
    }

    #[test]
    fn rejects_empty_segment_list() {
        assert!(parse_translation("[[]]").is_err());
    }

    #[test]
    fn preview_truncates_long_bodies() {
        let long = "x".repeat(1000);
        let preview = preview_body(&long);
        assert!(preview.chars().count() <= 301);
    }
}
