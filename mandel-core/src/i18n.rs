//! Localized console and chart text.

use crate::{
    config::SUPPORTED_LANGS,
    error::{Error, Result},
};
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use unic_langid::LanguageIdentifier;

const ES_FTL: &str = include_str!("../i18n/es.ftl");
const EN_FTL: &str = include_str!("../i18n/en.ftl");

/// Console and chart text for one language, backed by `fluent-bundle`.
///
/// Catalogs are compiled into the binary, so lookups never touch the disk.
pub struct Messages {
    lang: String,
    bundle: FluentBundle<FluentResource>,
}

impl Messages {
    /// Load the catalog for `lang` (`"es"` or `"en"`).
    pub fn new(lang: &str) -> Result<Self> {
        let ftl = match lang {
            "es" => ES_FTL,
            "en" => EN_FTL,
            other => {
                return Err(Error::config(format!(
                    "unsupported lang: {other} (expected one of {SUPPORTED_LANGS:?})"
                )))
            }
        };
        let res = FluentResource::try_new(ftl.to_string())
            .map_err(|(_, e)| Error::config(format!("fluent parse error: {e:?}")))?;
        let langid: LanguageIdentifier =
            lang.parse().map_err(|e| Error::config(format!("invalid language tag {lang}: {e}")))?;
        let mut bundle = FluentBundle::new(vec![langid]);
        // no Unicode isolation marks around interpolations on a terminal
        bundle.set_use_isolating(false);
        bundle
            .add_resource(res)
            .map_err(|e| Error::config(format!("bundle add resource: {e:?}")))?;
        Ok(Self { lang: lang.to_string(), bundle })
    }

    /// Language tag the catalog was loaded for.
    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// Message without arguments. Falls back to the key if not found.
    pub fn text(&self, key: &str) -> String {
        self.format(key, None)
    }

    /// Message with string arguments, e.g. `[("path", "out.svg")]`.
    pub fn text_with(&self, key: &str, kv: &[(&str, &str)]) -> String {
        let mut args = FluentArgs::new();
        for (k, v) in kv {
            args.set(*k, FluentValue::from((*v).to_string()));
        }
        self.format(key, Some(&args))
    }

    fn format(&self, key: &str, args: Option<&FluentArgs<'_>>) -> String {
        let Some(msg) = self.bundle.get_message(key) else { return key.to_string() };
        let Some(pattern) = msg.value() else { return key.to_string() };
        let mut errors = vec![];
        let s = self.bundle.format_pattern(pattern, args, &mut errors).to_string();
        if errors.is_empty() { s } else { key.to_string() }
    }
}

impl std::fmt::Debug for Messages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Messages").field("lang", &self.lang).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spanish_is_default_catalog() {
        let m = Messages::new("es").unwrap();
        assert_eq!(m.text("table-threads"), "Hilos");
        assert_eq!(
            m.text_with("saved-speedup", &[("path", "benchmarks/speedup.svg")]),
            "✓ Gráfica de speedup guardada en: benchmarks/speedup.svg"
        );
    }

    #[test]
    fn english_catalog_has_same_keys() {
        let es = Messages::new("es").unwrap();
        let en = Messages::new("en").unwrap();
        for key in ["axis-threads", "title-combined", "summary-title", "legend-ideal", "all-done"] {
            assert_ne!(es.text(key), key);
            assert_ne!(en.text(key), key);
        }
    }

    #[test]
    fn unknown_key_or_missing_arg_falls_back_to_key() {
        let m = Messages::new("en").unwrap();
        assert_eq!(m.text("no-such-key"), "no-such-key");
        assert_eq!(m.text("saved-speedup"), "saved-speedup");
    }

    #[test]
    fn unsupported_lang_is_rejected() {
        assert!(Messages::new("ja").is_err());
    }
}
