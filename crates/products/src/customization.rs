use serde::{Deserialize, Serialize};

use shopcore_core::CustomizationFieldId;

/// What the customer provides for a customization field.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomizationFieldType {
    File,
    Text,
}

/// A product attribute the customer can personalize.
///
/// Fields are soft-deleted so that existing order customizations keep
/// pointing at them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomizationField {
    pub id: CustomizationFieldId,
    pub kind: CustomizationFieldType,
    pub required: bool,
    #[serde(default)]
    pub deleted: bool,
}

impl CustomizationField {
    pub fn new(id: CustomizationFieldId, kind: CustomizationFieldType, required: bool) -> Self {
        Self {
            id,
            kind,
            required,
            deleted: false,
        }
    }

    /// Not soft-deleted.
    pub fn is_active(&self) -> bool {
        !self.deleted
    }
}
