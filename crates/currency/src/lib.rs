//! Currency queries.
//!
//! Resolves the localized view of a reference currency (names, symbols and
//! format patterns per shop language) from locale data. Read-only; the locale
//! repository and the language list are injected.

pub mod iso_code;
pub mod reference;

pub use iso_code::AlphaIsoCode;
pub use reference::{
    CurrencyError, GetReferenceCurrency, GetReferenceCurrencyHandler, ReferenceCurrency,
    resolve_reference_currency,
};
