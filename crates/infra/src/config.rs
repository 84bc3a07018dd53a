//! Process configuration, read from environment variables.
//!
//! - `SHOPCORE_LANGUAGES`: comma-separated `id:locale` pairs, in display order
//!   (default `1:en-US`).
//! - `SHOPCORE_LOCALE_DATA`: optional path to a JSON array of locale bundles.

use std::path::{Path, PathBuf};

use anyhow::Context;
use thiserror::Error;

use shopcore_core::{DomainError, LanguageId};
use shopcore_localization::{InMemoryLocaleRepository, Language, LocaleTag};

pub const LANGUAGES_VAR: &str = "SHOPCORE_LANGUAGES";
pub const LOCALE_DATA_VAR: &str = "SHOPCORE_LOCALE_DATA";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: malformed entry {entry:?}: {reason}")]
    MalformedLanguage {
        var: &'static str,
        entry: String,
        reason: String,
    },

    #[error("{var}: language id {id} listed more than once")]
    DuplicateLanguage { var: &'static str, id: LanguageId },

    #[error("{0}: at least one language is required")]
    NoLanguages(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopConfig {
    pub languages: Vec<Language>,
    pub locale_data_path: Option<PathBuf>,
}

const DEFAULT_LANGUAGES: &str = "1:en-US";

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            languages: parse_languages(DEFAULT_LANGUAGES).unwrap_or_default(),
            locale_data_path: None,
        }
    }
}

impl ShopConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable source (tests inject a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(LANGUAGES_VAR) {
            config.languages = parse_languages(&raw)?;
        }

        config.locale_data_path = lookup(LOCALE_DATA_VAR)
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        Ok(config)
    }
}

fn parse_languages(raw: &str) -> Result<Vec<Language>, ConfigError> {
    let mut languages: Vec<Language> = Vec::new();

    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let malformed = |reason: String| ConfigError::MalformedLanguage {
            var: LANGUAGES_VAR,
            entry: entry.to_string(),
            reason,
        };

        let (id, tag) = entry
            .split_once(':')
            .ok_or_else(|| malformed("expected id:locale".to_string()))?;
        let id: LanguageId = id.parse().map_err(|e: DomainError| malformed(e.to_string()))?;
        let locale = LocaleTag::parse(tag).map_err(|e| malformed(e.to_string()))?;

        if languages.iter().any(|l| l.id == id) {
            return Err(ConfigError::DuplicateLanguage {
                var: LANGUAGES_VAR,
                id,
            });
        }
        languages.push(Language::new(id, locale));
    }

    if languages.is_empty() {
        return Err(ConfigError::NoLanguages(LANGUAGES_VAR));
    }
    Ok(languages)
}

/// Load a JSON locale bundle file into an in-memory repository.
pub fn load_locale_repository(path: &Path) -> anyhow::Result<InMemoryLocaleRepository> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading locale data from {}", path.display()))?;
    let repository = InMemoryLocaleRepository::from_json(&json)
        .with_context(|| format!("parsing locale data from {}", path.display()))?;
    let locales = repository.len()?;
    tracing::info!(path = %path.display(), locales, "locale data loaded");
    Ok(repository)
}
