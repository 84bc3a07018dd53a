use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard};

use thiserror::Error;

use crate::language::LocaleTag;
use crate::locale::Locale;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocalizationError {
    /// The repository holds no data for this locale tag.
    #[error("no locale data for {0}")]
    UnknownLocale(String),

    /// Locale data could not be decoded.
    #[error("invalid locale data: {0}")]
    InvalidData(String),

    #[error("locale repository unavailable: {0}")]
    Unavailable(String),
}

/// Source of locale bundles, keyed by locale tag.
pub trait LocaleRepository: Send + Sync {
    fn locale(&self, tag: &LocaleTag) -> Result<Arc<Locale>, LocalizationError>;
}

impl<R> LocaleRepository for Arc<R>
where
    R: LocaleRepository + ?Sized,
{
    fn locale(&self, tag: &LocaleTag) -> Result<Arc<Locale>, LocalizationError> {
        (**self).locale(tag)
    }
}

/// In-memory locale repository for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryLocaleRepository {
    inner: RwLock<HashMap<LocaleTag, Arc<Locale>>>,
}

impl InMemoryLocaleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository from a JSON array of locale bundles.
    ///
    /// Each currency must be keyed by its own `iso_code`; a bundle whose map
    /// key disagrees is rejected as [`LocalizationError::InvalidData`].
    pub fn from_json(json: &str) -> Result<Self, LocalizationError> {
        let locales: Vec<Locale> =
            serde_json::from_str(json).map_err(|e| LocalizationError::InvalidData(e.to_string()))?;

        let repository = Self::new();
        for locale in locales {
            check_currency_keys(&locale)?;
            repository.insert(locale)?;
        }
        Ok(repository)
    }

    /// Add or replace a locale bundle.
    pub fn insert(&self, locale: Locale) -> Result<(), LocalizationError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| LocalizationError::Unavailable("lock poisoned".into()))?;
        tracing::debug!(locale = %locale.tag, currencies = locale.currencies.len(), "registered locale");
        map.insert(locale.tag.clone(), Arc::new(locale));
        Ok(())
    }

    pub fn len(&self) -> Result<usize, LocalizationError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, LocalizationError> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<LocaleTag, Arc<Locale>>>, LocalizationError> {
        self.inner.read().map_err(|_| {
            tracing::warn!("locale repository lock poisoned");
            LocalizationError::Unavailable("lock poisoned".into())
        })
    }
}

fn check_currency_keys(locale: &Locale) -> Result<(), LocalizationError> {
    for (key, currency) in &locale.currencies {
        if key != currency.iso_code() {
            return Err(LocalizationError::InvalidData(format!(
                "locale {}: currency keyed {key} has iso_code {}",
                locale.tag,
                currency.iso_code()
            )));
        }
    }
    Ok(())
}

impl LocaleRepository for InMemoryLocaleRepository {
    fn locale(&self, tag: &LocaleTag) -> Result<Arc<Locale>, LocalizationError> {
        let map = self.read()?;
        map.get(tag)
            .cloned()
            .ok_or_else(|| LocalizationError::UnknownLocale(tag.to_string()))
    }
}
