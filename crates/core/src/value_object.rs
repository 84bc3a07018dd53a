//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity: two instances holding the same values are
/// the same thing (an ISO code, a locale tag). They are immutable once built;
/// constructors are where validation happens.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct LocaleTag(String);
///
/// impl ValueObject for LocaleTag {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
