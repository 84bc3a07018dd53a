//! Currency metadata as published by a single locale.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Which symbol variant to read from a locale's currency data.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolType {
    /// The unambiguous symbol, e.g. `US$` in a non-US locale.
    Default,
    /// The shortest conventional glyph, e.g. `$`.
    Narrow,
}

/// Locale-scoped currency data.
///
/// ISO codes and decimal digits are the same in every locale; display name and
/// symbols are translated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyData {
    pub iso_code: String,
    #[serde(default)]
    pub numeric_iso_code: Option<String>,
    pub decimal_digits: u32,
    pub display_name: String,
    #[serde(default)]
    pub symbols: BTreeMap<SymbolType, String>,
}

impl CurrencyData {
    pub fn new(
        iso_code: impl Into<String>,
        numeric_iso_code: Option<String>,
        decimal_digits: u32,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            iso_code: iso_code.into(),
            numeric_iso_code,
            decimal_digits,
            display_name: display_name.into(),
            symbols: BTreeMap::new(),
        }
    }

    pub fn with_symbol(mut self, kind: SymbolType, symbol: impl Into<String>) -> Self {
        self.symbols.insert(kind, symbol.into());
        self
    }

    pub fn iso_code(&self) -> &str {
        &self.iso_code
    }

    pub fn numeric_iso_code(&self) -> Option<&str> {
        self.numeric_iso_code.as_deref()
    }

    pub fn decimal_digits(&self) -> u32 {
        self.decimal_digits
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Symbol of the requested kind; blank symbols count as absent.
    pub fn symbol(&self, kind: SymbolType) -> Option<&str> {
        self.symbols
            .get(&kind)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_symbol_is_absent() {
        let usd = CurrencyData::new("USD", Some("840".into()), 2, "US Dollar")
            .with_symbol(SymbolType::Default, "US$")
            .with_symbol(SymbolType::Narrow, "");

        assert_eq!(usd.symbol(SymbolType::Default), Some("US$"));
        assert_eq!(usd.symbol(SymbolType::Narrow), None);
    }

    #[test]
    fn symbols_deserialize_by_kind_name() {
        let json = r#"{
            "iso_code": "EUR",
            "numeric_iso_code": "978",
            "decimal_digits": 2,
            "display_name": "Euro",
            "symbols": { "default": "€", "narrow": "€" }
        }"#;
        let eur: CurrencyData = serde_json::from_str(json).unwrap();
        assert_eq!(eur.symbol(SymbolType::Narrow), Some("€"));
        assert_eq!(eur.numeric_iso_code(), Some("978"));
    }
}
