// SPDX-License-Identifier: MPL-2.0
//! Localization of the detail view using Fluent.
//!
//! Translation files live in `assets/i18n/<locale>.ftl` and are embedded into
//! the binary at compile time. The active locale is resolved from the CLI
//! flag, then the config file, then the OS locale, and finally `en-US`.

use crate::config::Config;
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use rust_embed::RustEmbed;
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

const DEFAULT_LOCALE: &str = "en-US";

pub struct I18n {
    bundles: HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
    pub available_locales: Vec<LanguageIdentifier>,
    current_locale: LanguageIdentifier,
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(None, &Config::default())
    }
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("available_locales", &self.available_locales)
            .field("current_locale", &self.current_locale)
            .finish()
    }
}

impl I18n {
    pub fn new(cli_lang: Option<String>, config: &Config) -> Self {
        let mut bundles = HashMap::new();
        let mut available_locales = Vec::new();

        for file in Asset::iter() {
            let filename = file.as_ref();
            let Some(locale_str) = filename.strip_suffix(".ftl") else {
                continue;
            };
            let Ok(locale) = locale_str.parse::<LanguageIdentifier>() else {
                tracing::warn!(file = filename, "i18n: unparsable locale name");
                continue;
            };
            let Some(content) = Asset::get(filename) else {
                continue;
            };

            let source = String::from_utf8_lossy(content.data.as_ref()).to_string();
            let resource = match FluentResource::try_new(source) {
                Ok(resource) => resource,
                Err((partial, errors)) => {
                    tracing::warn!(
                        file = filename,
                        errors = errors.len(),
                        "i18n: FTL parse errors"
                    );
                    partial
                }
            };

            let mut bundle = FluentBundle::new(vec![locale.clone()]);
            // Labels are plain text: no bidi isolation marks around placeables.
            bundle.set_use_isolating(false);
            if let Err(errors) = bundle.add_resource(resource) {
                tracing::warn!(file = filename, errors = errors.len(), "i18n: duplicate messages");
            }
            bundles.insert(locale.clone(), bundle);
            available_locales.push(locale);
        }
        available_locales.sort_by_key(ToString::to_string);

        let default_locale = default_locale();
        let current_locale =
            resolve_locale(cli_lang, config, &available_locales).unwrap_or(default_locale);

        Self {
            bundles,
            available_locales,
            current_locale,
        }
    }

    #[must_use]
    pub fn current_locale(&self) -> &LanguageIdentifier {
        &self.current_locale
    }

    pub fn set_locale(&mut self, locale: LanguageIdentifier) {
        if self.bundles.contains_key(&locale) {
            self.current_locale = locale;
        }
    }

    /// Translates `key`, or returns `MISSING: key` when it has no message.
    pub fn tr(&self, key: &str) -> String {
        self.format(key, None)
            .unwrap_or_else(|| format!("MISSING: {}", key))
    }

    /// Translates `key` with named arguments.
    ///
    /// ```
    /// use blob_lens::i18n::I18n;
    ///
    /// let i18n = I18n::default();
    /// let text = i18n.tr_with_args("detail-size-bytes", &[("bytes", "42")]);
    /// assert!(text.contains("42"));
    /// ```
    pub fn tr_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, FluentValue::from(*value));
        }
        self.format(key, Some(&fluent_args))
            .unwrap_or_else(|| format!("MISSING: {}", key))
    }

    fn format(&self, key: &str, args: Option<&FluentArgs<'_>>) -> Option<String> {
        let bundle = self
            .bundles
            .get(&self.current_locale)
            .or_else(|| self.bundles.get(&default_locale()))?;
        let pattern = bundle.get_message(key)?.value()?;
        let mut errors = vec![];
        let value = bundle.format_pattern(pattern, args, &mut errors);
        if errors.is_empty() {
            Some(value.to_string())
        } else {
            None
        }
    }
}

fn default_locale() -> LanguageIdentifier {
    DEFAULT_LOCALE.parse().unwrap_or_default()
}

fn parse_available(raw: &str, available: &[LanguageIdentifier]) -> Option<LanguageIdentifier> {
    let lang = raw.parse::<LanguageIdentifier>().ok()?;
    if available.contains(&lang) {
        return Some(lang);
    }
    // "fr-CA" falls back to a bare "fr" bundle.
    available
        .iter()
        .find(|candidate| candidate.language == lang.language && candidate.region.is_none())
        .cloned()
}

fn resolve_locale(
    cli_lang: Option<String>,
    config: &Config,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    if let Some(lang) = cli_lang.and_then(|raw| parse_available(&raw, available)) {
        return Some(lang);
    }

    if let Some(lang) = config
        .general
        .language
        .as_deref()
        .and_then(|raw| parse_available(raw, available))
    {
        return Some(lang);
    }

    sys_locale::get_locale().and_then(|raw| parse_available(&raw, available))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn available() -> Vec<LanguageIdentifier> {
        vec![DEFAULT_LOCALE.parse().unwrap(), "fr".parse().unwrap()]
    }

    #[test]
    fn resolve_locale_prefers_cli() {
        let mut config = Config::default();
        config.general.language = Some("en-US".to_string());
        let lang = resolve_locale(Some("fr".to_string()), &config, &available());
        assert_eq!(lang, Some("fr".parse().unwrap()));
    }

    #[test]
    fn resolve_locale_uses_config() {
        let mut config = Config::default();
        config.general.language = Some("fr".to_string());
        let lang = resolve_locale(None, &config, &available());
        assert_eq!(lang, Some("fr".parse().unwrap()));
    }

    #[test]
    fn regional_variant_falls_back_to_language() {
        let lang = parse_available("fr-CA", &available());
        assert_eq!(lang, Some("fr".parse().unwrap()));
    }

    #[test]
    fn unknown_cli_language_is_ignored() {
        let mut config = Config::default();
        config.general.language = Some("fr".to_string());
        let lang = resolve_locale(Some("xx".to_string()), &config, &available());
        assert_eq!(lang, Some("fr".parse().unwrap()));
    }

    #[test]
    fn default_locale_is_en_us() {
        assert_eq!(default_locale(), DEFAULT_LOCALE.parse::<LanguageIdentifier>().unwrap());
    }

    #[test]
    fn english_bundle_translates_sidebar_labels() {
        let i18n = I18n::new(Some("en-US".to_string()), &Config::default());
        assert_eq!(i18n.tr("detail-link-search"), "Back to search");
        assert_eq!(i18n.tr("detail-no-title"), "<no title>");
        assert_eq!(
            i18n.tr_with_args("detail-size-bytes", &[("bytes", "123")]),
            "123 bytes"
        );
    }

    #[test]
    fn french_bundle_is_embedded() {
        let i18n = I18n::new(Some("fr".to_string()), &Config::default());
        assert_eq!(i18n.current_locale(), &"fr".parse::<LanguageIdentifier>().unwrap());
        assert!(!i18n.tr("detail-link-search").starts_with("MISSING"));
    }

    #[test]
    fn missing_key_is_flagged() {
        let i18n = I18n::default();
        assert_eq!(i18n.tr("no-such-key"), "MISSING: no-such-key");
    }
}
