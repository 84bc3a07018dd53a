use serde::{Deserialize, Serialize};

use shopcore_core::{DomainError, DomainResult, ValueObject};

/// ISO 4217 alphabetic currency code as supplied by the caller.
///
/// Two or three ASCII letters. Case is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AlphaIsoCode(String);

impl AlphaIsoCode {
    pub fn parse(code: impl Into<String>) -> DomainResult<Self> {
        let code = code.into();
        let len = code.chars().count();
        if !(2..=3).contains(&len) || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::validation(format!(
                "ISO code {code:?} is invalid, expected 2 or 3 letters"
            )));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for AlphaIsoCode {}

impl core::fmt::Display for AlphaIsoCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for AlphaIsoCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<AlphaIsoCode> for String {
    fn from(value: AlphaIsoCode) -> Self {
        value.0
    }
}
