//! Reference currency query.
//!
//! A reference currency is the locale-provided definition of an ISO currency,
//! translated into every configured shop language. Locales may carry partial
//! data: a language whose locale lacks the currency falls back to the raw ISO
//! code for name and symbol, and the query only fails when no locale at all
//! knows the code.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use shopcore_core::LanguageId;
use shopcore_localization::{CurrencyData, Language, LocaleRepository, LocalizationError, SymbolType};

use crate::iso_code::AlphaIsoCode;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    /// No configured language's locale knows this currency.
    #[error("can not find reference currency with ISO code {iso_code}")]
    NotFound { iso_code: String },

    /// The locale repository could not provide a language's locale.
    #[error(transparent)]
    Localization(#[from] LocalizationError),
}

/// Query: localized definition of the currency identified by `iso_code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetReferenceCurrency {
    pub iso_code: AlphaIsoCode,
}

impl GetReferenceCurrency {
    pub fn new(iso_code: AlphaIsoCode) -> Self {
        Self { iso_code }
    }
}

/// Query result.
///
/// Each localized map holds one entry per language id of the resolution input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceCurrency {
    pub iso_code: String,
    pub numeric_iso_code: Option<String>,
    pub localized_names: BTreeMap<LanguageId, String>,
    pub localized_symbols: BTreeMap<LanguageId, String>,
    pub localized_patterns: BTreeMap<LanguageId, String>,
    /// Number of decimal digits.
    pub precision: u32,
}

/// Resolve `iso_code` against the locale of every language, in order.
///
/// ISO codes and precision are taken from the currency found for the *last*
/// language whose locale knows it. Locales are expected to agree on those
/// values; a disagreement is logged and the later language wins.
pub fn resolve_reference_currency<R>(
    repository: &R,
    iso_code: &AlphaIsoCode,
    languages: &[Language],
) -> Result<ReferenceCurrency, CurrencyError>
where
    R: LocaleRepository + ?Sized,
{
    let code = iso_code.as_str();
    let mut localized_names = BTreeMap::new();
    let mut localized_symbols = BTreeMap::new();
    let mut localized_patterns = BTreeMap::new();
    let mut last_found: Option<CurrencyData> = None;

    for language in languages {
        let locale = repository.locale(&language.locale)?;

        match locale.currency(code) {
            Some(currency) => {
                tracing::debug!(iso_code = code, language = %language.id, locale = %language.locale, "currency found in locale");

                if let Some(previous) = &last_found {
                    warn_on_metadata_mismatch(previous, currency, language);
                }

                localized_names.insert(language.id, currency.display_name().to_string());
                let symbol = currency
                    .symbol(SymbolType::Narrow)
                    .unwrap_or_else(|| currency.iso_code());
                localized_symbols.insert(language.id, symbol.to_string());
                last_found = Some(currency.clone());
            }
            None => {
                tracing::debug!(iso_code = code, language = %language.id, locale = %language.locale, "currency missing from locale, using ISO code");
                localized_names.insert(language.id, code.to_string());
                localized_symbols.insert(language.id, code.to_string());
            }
        }

        localized_patterns.insert(language.id, locale.currency_pattern().to_string());
    }

    let currency = last_found.ok_or_else(|| CurrencyError::NotFound {
        iso_code: code.to_string(),
    })?;

    Ok(ReferenceCurrency {
        iso_code: currency.iso_code,
        numeric_iso_code: currency.numeric_iso_code,
        localized_names,
        localized_symbols,
        localized_patterns,
        precision: currency.decimal_digits,
    })
}

fn warn_on_metadata_mismatch(previous: &CurrencyData, current: &CurrencyData, language: &Language) {
    if previous.decimal_digits() != current.decimal_digits()
        || previous.numeric_iso_code() != current.numeric_iso_code()
    {
        tracing::warn!(
            iso_code = current.iso_code(),
            locale = %language.locale,
            previous_precision = previous.decimal_digits(),
            precision = current.decimal_digits(),
            previous_numeric = ?previous.numeric_iso_code(),
            numeric = ?current.numeric_iso_code(),
            "locales disagree on currency metadata; keeping the later locale's values"
        );
    }
}

/// Query handler bound to a locale repository and the shop's languages.
pub struct GetReferenceCurrencyHandler<R> {
    repository: R,
    languages: Vec<Language>,
}

impl<R: LocaleRepository> GetReferenceCurrencyHandler<R> {
    pub fn new(repository: R, languages: Vec<Language>) -> Self {
        Self {
            repository,
            languages,
        }
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub fn handle(&self, query: &GetReferenceCurrency) -> Result<ReferenceCurrency, CurrencyError> {
        resolve_reference_currency(&self.repository, &query.iso_code, &self.languages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopcore_localization::{InMemoryLocaleRepository, Locale, LocaleTag};

    fn lang(id: u32, tag: &str) -> Language {
        Language::new(LanguageId::new(id).unwrap(), LocaleTag::parse(tag).unwrap())
    }

    fn id(value: u32) -> LanguageId {
        LanguageId::new(value).unwrap()
    }

    fn usd(display_name: &str) -> CurrencyData {
        CurrencyData::new("USD", Some("840".into()), 2, display_name)
    }

    fn repository() -> InMemoryLocaleRepository {
        let repo = InMemoryLocaleRepository::new();
        repo.insert(
            Locale::new(LocaleTag::parse("en-US").unwrap(), "¤#,##0.00").with_currency(
                usd("US Dollar")
                    .with_symbol(SymbolType::Default, "$")
                    .with_symbol(SymbolType::Narrow, "$"),
            ),
        )
        .unwrap();
        repo.insert(Locale::new(LocaleTag::parse("fr-FR").unwrap(), "#,##0.00 ¤"))
            .unwrap();
        repo.insert(
            Locale::new(LocaleTag::parse("de-DE").unwrap(), "#,##0.00 ¤")
                .with_currency(usd("US-Dollar").with_symbol(SymbolType::Default, "$")),
        )
        .unwrap();
        repo
    }

    fn code(value: &str) -> AlphaIsoCode {
        AlphaIsoCode::parse(value).unwrap()
    }

    #[test]
    fn partial_locale_data_falls_back_to_iso_code() {
        let repo = repository();
        let languages = vec![lang(1, "en-US"), lang(2, "fr-FR")];

        let result = resolve_reference_currency(&repo, &code("USD"), &languages).unwrap();

        assert_eq!(result.iso_code, "USD");
        assert_eq!(result.numeric_iso_code.as_deref(), Some("840"));
        assert_eq!(result.precision, 2);
        assert_eq!(
            result.localized_names,
            BTreeMap::from([(id(1), "US Dollar".to_string()), (id(2), "USD".to_string())])
        );
        assert_eq!(
            result.localized_symbols,
            BTreeMap::from([(id(1), "$".to_string()), (id(2), "USD".to_string())])
        );
    }

    #[test]
    fn pattern_comes_from_locale_even_without_currency() {
        let repo = repository();
        let languages = vec![lang(1, "en-US"), lang(2, "fr-FR")];

        let result = resolve_reference_currency(&repo, &code("USD"), &languages).unwrap();

        assert_eq!(result.localized_patterns[&id(1)], "¤#,##0.00");
        assert_eq!(result.localized_patterns[&id(2)], "#,##0.00 ¤");
    }

    #[test]
    fn missing_narrow_symbol_falls_back_to_iso_code() {
        let repo = repository();
        let languages = vec![lang(3, "de-DE")];

        let result = resolve_reference_currency(&repo, &code("USD"), &languages).unwrap();

        assert_eq!(result.localized_names[&id(3)], "US-Dollar");
        assert_eq!(result.localized_symbols[&id(3)], "USD");
    }

    #[test]
    fn empty_narrow_symbol_falls_back_to_iso_code() {
        let repo = InMemoryLocaleRepository::new();
        repo.insert(
            Locale::new(LocaleTag::parse("nl-NL").unwrap(), "¤ #,##0.00").with_currency(
                usd("Amerikaanse dollar")
                    .with_symbol(SymbolType::Default, "US$")
                    .with_symbol(SymbolType::Narrow, ""),
            ),
        )
        .unwrap();

        let result =
            resolve_reference_currency(&repo, &code("USD"), &[lang(4, "nl-NL")]).unwrap();

        assert_eq!(result.localized_names[&id(4)], "Amerikaanse dollar");
        assert_eq!(result.localized_symbols[&id(4)], "USD");
    }

    #[test]
    fn currency_absent_everywhere_is_not_found() {
        let repo = repository();
        let languages = vec![lang(1, "en-US"), lang(2, "fr-FR")];

        let err = resolve_reference_currency(&repo, &code("JPY"), &languages).unwrap_err();

        assert_eq!(err, CurrencyError::NotFound { iso_code: "JPY".into() });
        assert_eq!(err.to_string(), "can not find reference currency with ISO code JPY");
    }

    #[test]
    fn empty_language_set_is_not_found() {
        let repo = repository();
        let err = resolve_reference_currency(&repo, &code("USD"), &[]).unwrap_err();
        assert!(matches!(err, CurrencyError::NotFound { .. }));
    }

    #[test]
    fn unknown_locale_propagates_repository_error() {
        let repo = repository();
        let languages = vec![lang(1, "en-US"), lang(4, "it-IT")];

        let err = resolve_reference_currency(&repo, &code("USD"), &languages).unwrap_err();

        assert_eq!(
            err,
            CurrencyError::Localization(LocalizationError::UnknownLocale("it-IT".into()))
        );
    }

    #[test]
    fn last_found_currency_supplies_metadata() {
        let repo = InMemoryLocaleRepository::new();
        repo.insert(
            Locale::new(LocaleTag::parse("en-US").unwrap(), "¤#,##0.00")
                .with_currency(CurrencyData::new("XYZ", Some("001".into()), 2, "Xyz")),
        )
        .unwrap();
        repo.insert(
            Locale::new(LocaleTag::parse("fr-FR").unwrap(), "#,##0.00 ¤")
                .with_currency(CurrencyData::new("XYZ", Some("002".into()), 3, "Xyz")),
        )
        .unwrap();

        let forward = vec![lang(1, "en-US"), lang(2, "fr-FR")];
        let result = resolve_reference_currency(&repo, &code("XYZ"), &forward).unwrap();
        assert_eq!(result.precision, 3);
        assert_eq!(result.numeric_iso_code.as_deref(), Some("002"));

        let reversed = vec![lang(2, "fr-FR"), lang(1, "en-US")];
        let result = resolve_reference_currency(&repo, &code("XYZ"), &reversed).unwrap();
        assert_eq!(result.precision, 2);
        assert_eq!(result.numeric_iso_code.as_deref(), Some("001"));
    }

    #[test]
    fn handler_uses_configured_languages() {
        let handler = GetReferenceCurrencyHandler::new(
            std::sync::Arc::new(repository()),
            vec![lang(1, "en-US"), lang(2, "fr-FR"), lang(3, "de-DE")],
        );
        let ids: Vec<u32> = handler.languages().iter().map(|l| l.id.value()).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let result = handler
            .handle(&GetReferenceCurrency::new(code("USD")))
            .unwrap();

        assert_eq!(result.localized_names.len(), 3);
        assert_eq!(result.localized_symbols.len(), 3);
        assert_eq!(result.localized_patterns.len(), 3);
    }

    #[test]
    fn result_serializes_with_language_id_keys() {
        let repo = repository();
        let result =
            resolve_reference_currency(&repo, &code("USD"), &[lang(1, "en-US")]).unwrap();

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["localized_names"]["1"], "US Dollar");
        assert_eq!(json["precision"], 2);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        /// One locale per language; `has_currency[i]` decides whether locale `i` knows `ABC`.
        fn fixture(has_currency: &[bool]) -> (InMemoryLocaleRepository, Vec<Language>) {
            let repo = InMemoryLocaleRepository::new();
            let mut languages = Vec::new();
            for (i, present) in has_currency.iter().enumerate() {
                let tag = LocaleTag::parse(format!("xx-L{i}")).unwrap();
                let mut locale = Locale::new(tag.clone(), format!("pattern-{i}"));
                if *present {
                    locale = locale.with_currency(
                        CurrencyData::new("ABC", None, 2, format!("Abc {i}"))
                            .with_symbol(SymbolType::Narrow, "A"),
                    );
                }
                repo.insert(locale).unwrap();
                languages.push(Language::new(LanguageId::new(i as u32 + 1).unwrap(), tag));
            }
            (repo, languages)
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: every language gets exactly one entry in each map, or the query is NotFound.
            #[test]
            fn one_entry_per_language_or_not_found(has_currency in prop::collection::vec(any::<bool>(), 0..8)) {
                let (repo, languages) = fixture(&has_currency);
                let result = resolve_reference_currency(&repo, &code("ABC"), &languages);

                if has_currency.iter().any(|p| *p) {
                    let result = result.unwrap();
                    prop_assert_eq!(result.localized_names.len(), languages.len());
                    prop_assert_eq!(result.localized_symbols.len(), languages.len());
                    prop_assert_eq!(result.localized_patterns.len(), languages.len());

                    for (language, present) in languages.iter().zip(&has_currency) {
                        let expected_symbol = if *present { "A" } else { "ABC" };
                        prop_assert_eq!(result.localized_symbols[&language.id].as_str(), expected_symbol);
                        if !*present {
                            prop_assert_eq!(result.localized_names[&language.id].as_str(), "ABC");
                        }
                    }
                } else {
                    let is_not_found = matches!(result, Err(CurrencyError::NotFound { .. }));
                    prop_assert!(is_not_found);
                }
            }
        }
    }
}
