//! Localization data: shop languages and locale-scoped currency metadata.
//!
//! Locale bundles are read-only inputs owned by an external repository; this
//! crate only models them and exposes the [`LocaleRepository`] seam.

pub mod currency;
pub mod language;
pub mod locale;
pub mod repository;

pub use currency::{CurrencyData, SymbolType};
pub use language::{Language, LocaleTag};
pub use locale::Locale;
pub use repository::{InMemoryLocaleRepository, LocaleRepository, LocalizationError};
