use serde::{Deserialize, Serialize};

use shopcore_core::{DomainError, DomainResult, LanguageId, ValueObject};

/// BCP 47-style locale tag (`en-US`, `fr-FR`, `de`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleTag(String);

impl LocaleTag {
    pub fn parse(tag: impl Into<String>) -> DomainResult<Self> {
        let tag = tag.into();
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("locale tag cannot be empty"));
        }
        let valid = trimmed
            .split(['-', '_'])
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric()));
        if !valid {
            return Err(DomainError::validation(format!("malformed locale tag: {trimmed}")));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for LocaleTag {}

impl core::fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for LocaleTag {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<LocaleTag> for String {
    fn from(value: LocaleTag) -> Self {
        value.0
    }
}

/// A shop language: stable identifier plus the locale used to render it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub id: LanguageId,
    pub locale: LocaleTag,
}

impl Language {
    pub fn new(id: LanguageId, locale: LocaleTag) -> Self {
        Self { id, locale }
    }
}
