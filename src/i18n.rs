use fluent_bundle::{FluentBundle, FluentResource};
use once_cell::sync::Lazy;
use std::borrow::Cow;
use std::sync::RwLock;
use unic_langid::LanguageIdentifier;

// Normalize locale strings like "zh_TW.UTF-8" or "zh-TW" to BCP47-ish form
fn normalize_locale_tag<S: AsRef<str>>(s: S) -> String {
    let mut tag = s.as_ref().trim().to_string();
    if let Some((lang_region, _encoding)) = tag.split_once('.') {
        tag = lang_region.to_string();
    }
    tag.replace('_', "-")
}

fn detect_lang() -> LanguageIdentifier {
    // 1) Explicit override via env var
    if let Ok(s) = std::env::var("SNAPTRANS_UI_LANG") {
        let s = s.trim();
        if !s.is_empty() && s != "auto" {
            let norm = normalize_locale_tag(s);
            if let Ok(li) = norm.parse::<LanguageIdentifier>() {
                return li;
            }
        }
    }

    // 2) OS/UI locale via sys-locale
    if let Some(loc) = sys_locale::get_locale() {
        let norm = normalize_locale_tag(&loc);
        let low = norm.to_lowercase();
        if low.starts_with("zh") {
            return "zh-TW".parse().unwrap();
        }
        if let Ok(li) = norm.parse::<LanguageIdentifier>() {
            return li;
        }
    }

    // 3) Common UNIX envs as a last resort
    for key in ["LC_ALL", "LC_MESSAGES", "LANG"].iter() {
        if let Ok(val) = std::env::var(key) {
            let low = normalize_locale_tag(&val).to_lowercase();
            if low.starts_with("zh") {
                return "zh-TW".parse().unwrap();
            }
            if low.starts_with("en") {
                return "en-US".parse().unwrap();
            }
        }
    }

    // 4) Default: English
    "en-US".parse().unwrap()
}

fn build_bundle(pref: Option<&str>) -> FluentBundle<FluentResource> {
    let lang: LanguageIdentifier = match pref.map(|s| s.trim().to_lowercase()) {
        Some(ref p) if p == "zh-tw" || p == "zh" => "zh-TW".parse().unwrap(),
        Some(ref p) if p == "en" || p == "en-us" => "en-US".parse().unwrap(),
        _ => detect_lang(),
    };
    let mut bundle = FluentBundle::new(vec![lang.clone()]);
    let ftl: &str = match lang.language.as_str() {
        "zh" => include_str!("../i18n/zh-TW/app.ftl"),
        _ => include_str!("../i18n/en/app.ftl"),
    };
    let resource = match FluentResource::try_new(ftl.to_owned()) {
        Ok(res) => res,
        Err(e) => {
            eprintln!(
                "Warning: failed to parse FTL for {:?}: {:?}. Falling back to English.",
                lang, e
            );
            if lang.language != "en" {
                return build_bundle(Some("en-US"));
            } else {
                return FluentBundle::new(vec![lang]);
            }
        }
    };

    if let Err(e) = bundle.add_resource(resource) {
        eprintln!(
            "Warning: failed to add FTL resource for {:?}: {:?}. Falling back to English.",
            lang, e
        );
        if lang.language != "en" {
            return build_bundle(Some("en-US"));
        }
    }

    bundle
}

static LANG_PREF: Lazy<RwLock<String>> = Lazy::new(|| RwLock::new(String::from("auto")));

// Store UI language preference (auto/en/zh-TW); rebuild bundle on each call
pub fn set_ui_language_preference(pref: &str) {
    let mut g = LANG_PREF.write().expect("i18n pref lock poisoned");
    *g = pref.to_string();
}

fn format_message(bundle: &FluentBundle<FluentResource>, id: &str) -> Option<String> {
    let msg = bundle.get_message(id)?;
    let pattern = msg.value()?;
    let mut errors = vec![];
    let value: Cow<str> = bundle.format_pattern(pattern, None, &mut errors);
    Some(value.into_owned())
}

pub fn tr(id: &str) -> String {
    let pref = {
        let g = LANG_PREF.read().expect("i18n pref lock poisoned");
        g.clone()
    };
    let bundle = build_bundle(Some(&pref));
    format_message(&bundle, id).unwrap_or_else(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::{build_bundle, format_message, normalize_locale_tag};

    // Tests format against an explicit bundle rather than through `tr`, which
    // reads the process-wide language preference and would race in a parallel
    // test run.

    #[test]
    fn locale_tags_are_normalized() {
        assert_eq!(normalize_locale_tag("zh_TW.UTF-8"), "zh-TW");
        assert_eq!(normalize_locale_tag(" en-US "), "en-US");
    }

    #[test]
    fn known_message_resolves_in_english() {
        let bundle = build_bundle(Some("en"));
        assert_eq!(
            format_message(&bundle, "app-title").as_deref(),
            Some("SnapTrans")
        );
    }

    #[test]
    fn known_message_resolves_in_traditional_chinese() {
        let bundle = build_bundle(Some("zh-TW"));
        assert_eq!(
            format_message(&bundle, "app-title").as_deref(),
            Some("日文框選翻譯工具")
        );
    }

    #[test]
    fn unknown_message_yields_no_value() {
        let bundle = build_bundle(Some("en"));
        assert!(format_message(&bundle, "no-such-message").is_none());
    }
}
