use shopcore_core::{DomainError, DomainResult};

use crate::product::{Customizability, Product};

/// Upper bound for `text_fields` and `uploadable_files` on a product record.
pub const MAX_CUSTOMIZATION_FIELDS: u32 = 255;

/// Business-rule validation run before a product is persisted.
pub trait ProductValidator: Send + Sync {
    fn validate(&self, product: &Product) -> DomainResult<()>;
}

/// Default catalog rules.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProductRulesValidator;

impl ProductValidator for ProductRulesValidator {
    fn validate(&self, product: &Product) -> DomainResult<()> {
        if product.name().trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        if product.text_fields() > MAX_CUSTOMIZATION_FIELDS {
            return Err(DomainError::validation(format!(
                "text_fields must not exceed {MAX_CUSTOMIZATION_FIELDS}"
            )));
        }

        if product.uploadable_files() > MAX_CUSTOMIZATION_FIELDS {
            return Err(DomainError::validation(format!(
                "uploadable_files must not exceed {MAX_CUSTOMIZATION_FIELDS}"
            )));
        }

        if product.customizable() == Customizability::RequiresCustomization
            && product.text_fields() == 0
            && product.uploadable_files() == 0
        {
            return Err(DomainError::invariant(
                "a product requiring customization needs at least one customization field",
            ));
        }

        Ok(())
    }
}
