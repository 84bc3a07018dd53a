//! Product property updates.
//!
//! ```text
//! PropertyMap
//!   ↓
//! 1. Copy allow-listed properties onto a draft of the product
//!   ↓
//! 2. Validate the draft (ProductValidator)
//!   ↓
//! 3. Persist the draft (ObjectModelPersister), partial write of marked fields
//!   ↓
//! 4. Replace the caller's product with the persisted draft
//! ```
//!
//! Any failure leaves the caller's product untouched.

use serde_json::Value;
use thiserror::Error;

use shopcore_core::{DomainError, DomainResult, ObjectModel, ObjectModelPersister, PersistenceError, ProductId};

use crate::customization::CustomizationFieldType;
use crate::product::{
    Customizability, FIELD_CUSTOMIZABLE, FIELD_TEXT_FIELDS, FIELD_UPLOADABLE_FILES, Product,
};
use crate::validator::ProductValidator;

/// Property name → raw value, as decoded from a request payload.
pub type PropertyMap = serde_json::Map<String, Value>;

/// Error codes attached to [`ProductUpdateError::CannotUpdate`], grouped by the
/// kind of update that failed so callers can map them to user messages.
pub mod update_error_codes {
    pub const FAILED_UPDATE_BASIC_INFORMATION: u32 = 10;
    pub const FAILED_UPDATE_OPTIONS: u32 = 30;
    pub const FAILED_UPDATE_CUSTOMIZATION_FIELDS: u32 = 50;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProductUpdateError {
    /// Property value rejected, or business rules violated.
    #[error(transparent)]
    Validation(#[from] DomainError),

    /// The persistence layer refused the write.
    #[error("cannot update product {product_id} (error code {error_code}): {source}")]
    CannotUpdate {
        product_id: ProductId,
        error_code: u32,
        #[source]
        source: PersistenceError,
    },
}

impl ProductUpdateError {
    pub fn error_code(&self) -> Option<u32> {
        match self {
            ProductUpdateError::CannotUpdate { error_code, .. } => Some(*error_code),
            ProductUpdateError::Validation(_) => None,
        }
    }
}

type Setter = fn(&mut Product, &Value) -> DomainResult<()>;

/// Properties `update` is allowed to write. Anything else in the input is ignored.
const UPDATABLE_PROPERTIES: &[(&str, Setter)] = &[
    (FIELD_CUSTOMIZABLE, set_customizable as Setter),
    (FIELD_TEXT_FIELDS, set_text_fields as Setter),
    (FIELD_UPLOADABLE_FILES, set_uploadable_files as Setter),
];

fn set_customizable(product: &mut Product, value: &Value) -> DomainResult<()> {
    let customizable = match value {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| DomainError::validation(format!("invalid customizability setting: {n}")))
            .and_then(Customizability::from_setting)?,
        Value::String(s) => s.parse()?,
        other => {
            return Err(DomainError::validation(format!(
                "invalid customizability setting: {other}"
            )));
        }
    };
    product.set_customizable(customizable);
    Ok(())
}

fn set_text_fields(product: &mut Product, value: &Value) -> DomainResult<()> {
    product.set_text_fields(parse_count(FIELD_TEXT_FIELDS, value)?);
    Ok(())
}

fn set_uploadable_files(product: &mut Product, value: &Value) -> DomainResult<()> {
    product.set_uploadable_files(parse_count(FIELD_UPLOADABLE_FILES, value)?);
    Ok(())
}

fn parse_count(property: &str, value: &Value) -> DomainResult<u32> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| {
            DomainError::validation(format!(
                "{property} must be a non-negative integer, got {value}"
            ))
        })
}

/// Copy allow-listed properties present in `properties` onto `product`,
/// marking each for the next write. Returns the names that were applied.
pub fn fill_properties(
    product: &mut Product,
    properties: &PropertyMap,
) -> DomainResult<Vec<&'static str>> {
    let mut applied = Vec::new();
    for (name, setter) in UPDATABLE_PROPERTIES {
        if let Some(value) = properties.get(*name) {
            setter(product, value)?;
            product.add_fields_to_update(&[*name]);
            applied.push(*name);
        }
    }

    if applied.len() < properties.len() {
        let ignored: Vec<&str> = properties
            .keys()
            .map(String::as_str)
            .filter(|key| !applied.iter().any(|a| a == key))
            .collect();
        tracing::debug!(product_id = %product.id_typed(), ?ignored, "ignoring non-updatable product properties");
    }

    Ok(applied)
}

/// Applies property changes to products and writes them back.
pub struct ProductUpdater<V, P> {
    validator: V,
    persister: P,
}

impl<V, P> ProductUpdater<V, P>
where
    V: ProductValidator,
    P: ObjectModelPersister<Product>,
{
    pub fn new(validator: V, persister: P) -> Self {
        Self {
            validator,
            persister,
        }
    }

    /// Fill, validate and persist. `error_code` tags a persistence failure.
    pub fn update(
        &self,
        product: &mut Product,
        properties: &PropertyMap,
        error_code: u32,
    ) -> Result<(), ProductUpdateError> {
        let mut draft = product.clone();
        let applied = fill_properties(&mut draft, properties)?;

        self.validator.validate(&draft)?;

        self.persister.persist(&mut draft).map_err(|source| {
            tracing::warn!(product_id = %draft.id_typed(), error_code, error = %source, "product update failed");
            ProductUpdateError::CannotUpdate {
                product_id: draft.id_typed(),
                error_code,
                source,
            }
        })?;

        tracing::info!(product_id = %draft.id_typed(), ?applied, "product updated");
        *product = draft;
        Ok(())
    }

    /// Recompute `customizable`, `text_fields` and `uploadable_files` from the
    /// product's active customization fields and mark all three for the next write.
    pub fn refresh_customizability_fields(&self, product: &mut Product) {
        let customizable = if product.has_activated_required_customization_fields() {
            Customizability::RequiresCustomization
        } else if !product.non_deleted_customization_field_ids().is_empty() {
            Customizability::AllowsCustomization
        } else {
            Customizability::NotCustomizable
        };
        product.set_customizable(customizable);

        let text_fields = stored_count(product.count_customization_fields(CustomizationFieldType::Text));
        let uploadable_files = stored_count(product.count_customization_fields(CustomizationFieldType::File));
        product.set_text_fields(text_fields);
        product.set_uploadable_files(uploadable_files);

        product.add_fields_to_update(&[
            FIELD_CUSTOMIZABLE,
            FIELD_TEXT_FIELDS,
            FIELD_UPLOADABLE_FILES,
        ]);
    }
}

/// Counts beyond `u32` saturate; the validator rejects anything above
/// [`MAX_CUSTOMIZATION_FIELDS`](crate::validator::MAX_CUSTOMIZATION_FIELDS).
fn stored_count(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}
