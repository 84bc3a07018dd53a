use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::currency::CurrencyData;
use crate::language::LocaleTag;

/// Pattern used when a bundle does not declare its own.
pub const DEFAULT_CURRENCY_PATTERN: &str = "¤#,##0.00";

fn default_currency_pattern() -> String {
    DEFAULT_CURRENCY_PATTERN.to_string()
}

/// A locale data bundle: currency names, symbols and the currency format pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    pub tag: LocaleTag,
    #[serde(default = "default_currency_pattern")]
    pub currency_pattern: String,
    /// Currencies keyed by ISO alphabetic code.
    #[serde(default)]
    pub currencies: BTreeMap<String, CurrencyData>,
}

impl Locale {
    pub fn new(tag: LocaleTag, currency_pattern: impl Into<String>) -> Self {
        Self {
            tag,
            currency_pattern: currency_pattern.into(),
            currencies: BTreeMap::new(),
        }
    }

    pub fn with_currency(mut self, currency: CurrencyData) -> Self {
        self.currencies.insert(currency.iso_code.clone(), currency);
        self
    }

    pub fn tag(&self) -> &LocaleTag {
        &self.tag
    }

    /// Currency data for an ISO alphabetic code, if this locale knows it.
    pub fn currency(&self, iso_code: &str) -> Option<&CurrencyData> {
        self.currencies.get(iso_code)
    }

    /// Generic currency formatting pattern of this locale.
    pub fn currency_pattern(&self) -> &str {
        &self.currency_pattern
    }
}
