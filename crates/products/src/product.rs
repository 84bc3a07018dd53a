use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopcore_core::{
    CustomizationFieldId, DomainError, DomainResult, Entity, ObjectModel, ProductId,
};

use crate::customization::{CustomizationField, CustomizationFieldType};

pub const FIELD_NAME: &str = "name";
pub const FIELD_REFERENCE: &str = "reference";
pub const FIELD_CUSTOMIZABLE: &str = "customizable";
pub const FIELD_TEXT_FIELDS: &str = "text_fields";
pub const FIELD_UPLOADABLE_FILES: &str = "uploadable_files";
pub const FIELD_CUSTOMIZATION_FIELDS: &str = "customization_fields";

/// Whether (and how strictly) customers personalize a product.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Customizability {
    #[default]
    NotCustomizable,
    AllowsCustomization,
    RequiresCustomization,
}

impl Customizability {
    /// Numeric setting as stored on the product record.
    pub fn setting(self) -> u8 {
        match self {
            Customizability::NotCustomizable => 0,
            Customizability::AllowsCustomization => 1,
            Customizability::RequiresCustomization => 2,
        }
    }

    pub fn from_setting(value: u64) -> DomainResult<Self> {
        match value {
            0 => Ok(Customizability::NotCustomizable),
            1 => Ok(Customizability::AllowsCustomization),
            2 => Ok(Customizability::RequiresCustomization),
            other => Err(DomainError::validation(format!(
                "invalid customizability setting: {other}"
            ))),
        }
    }
}

impl core::str::FromStr for Customizability {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_customizable" => Ok(Customizability::NotCustomizable),
            "allows_customization" => Ok(Customizability::AllowsCustomization),
            "requires_customization" => Ok(Customizability::RequiresCustomization),
            other => Err(DomainError::validation(format!(
                "invalid customizability setting: {other:?}"
            ))),
        }
    }
}

/// Product object model.
///
/// `customizable`, `text_fields` and `uploadable_files` are derived from the
/// customization field collection; see
/// [`ProductUpdater::refresh_customizability_fields`](crate::ProductUpdater::refresh_customizability_fields).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    name: String,
    reference: String,
    customizable: Customizability,
    text_fields: u32,
    uploadable_files: u32,
    customization_fields: Vec<CustomizationField>,
    date_upd: Option<DateTime<Utc>>,
    fields_to_update: BTreeSet<&'static str>,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            reference: reference.into(),
            customizable: Customizability::NotCustomizable,
            text_fields: 0,
            uploadable_files: 0,
            customization_fields: Vec::new(),
            date_upd: None,
            fields_to_update: BTreeSet::new(),
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn customizable(&self) -> Customizability {
        self.customizable
    }

    pub fn text_fields(&self) -> u32 {
        self.text_fields
    }

    pub fn uploadable_files(&self) -> u32 {
        self.uploadable_files
    }

    pub fn customization_fields(&self) -> &[CustomizationField] {
        &self.customization_fields
    }

    pub fn date_upd(&self) -> Option<DateTime<Utc>> {
        self.date_upd
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_customizable(&mut self, customizable: Customizability) {
        self.customizable = customizable;
    }

    pub fn set_text_fields(&mut self, count: u32) {
        self.text_fields = count;
    }

    pub fn set_uploadable_files(&mut self, count: u32) {
        self.uploadable_files = count;
    }

    /// Attach a customization field. Ids must be unique per product.
    pub fn add_customization_field(&mut self, field: CustomizationField) -> DomainResult<()> {
        if self.customization_fields.iter().any(|f| f.id == field.id) {
            return Err(DomainError::invariant(format!(
                "customization field {} already attached to product {}",
                field.id, self.id
            )));
        }
        self.customization_fields.push(field);
        self.fields_to_update.insert(FIELD_CUSTOMIZATION_FIELDS);
        Ok(())
    }

    /// Soft-delete a customization field.
    pub fn delete_customization_field(&mut self, id: CustomizationFieldId) -> DomainResult<()> {
        let field = self
            .customization_fields
            .iter_mut()
            .find(|f| f.id == id && f.is_active())
            .ok_or_else(|| DomainError::not_found(format!("customization field {id}")))?;
        field.deleted = true;
        self.fields_to_update.insert(FIELD_CUSTOMIZATION_FIELDS);
        Ok(())
    }

    /// At least one active field is required.
    pub fn has_activated_required_customization_fields(&self) -> bool {
        self.customization_fields
            .iter()
            .any(|f| f.is_active() && f.required)
    }

    pub fn non_deleted_customization_field_ids(&self) -> Vec<CustomizationFieldId> {
        self.customization_fields
            .iter()
            .filter(|f| f.is_active())
            .map(|f| f.id)
            .collect()
    }

    /// Number of active customization fields of `kind`.
    pub fn count_customization_fields(&self, kind: CustomizationFieldType) -> usize {
        self.customization_fields
            .iter()
            .filter(|f| f.is_active() && f.kind == kind)
            .count()
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl ObjectModel for Product {
    fn fields_to_update(&self) -> &BTreeSet<&'static str> {
        &self.fields_to_update
    }

    fn add_fields_to_update(&mut self, fields: &[&'static str]) {
        self.fields_to_update.extend(fields.iter().copied());
    }

    fn clear_fields_to_update(&mut self) {
        self.fields_to_update.clear();
    }

    fn copy_field(&self, field: &str, target: &mut Self) -> bool {
        match field {
            FIELD_NAME => target.name = self.name.clone(),
            FIELD_REFERENCE => target.reference = self.reference.clone(),
            FIELD_CUSTOMIZABLE => target.customizable = self.customizable,
            FIELD_TEXT_FIELDS => target.text_fields = self.text_fields,
            FIELD_UPLOADABLE_FILES => target.uploadable_files = self.uploadable_files,
            FIELD_CUSTOMIZATION_FIELDS => {
                target.customization_fields = self.customization_fields.clone()
            }
            _ => return false,
        }
        true
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.date_upd = Some(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(id: u32, kind: CustomizationFieldType, required: bool) -> CustomizationField {
        CustomizationField::new(CustomizationFieldId::new(id).unwrap(), kind, required)
    }

    fn product() -> Product {
        Product::new(ProductId::new(1).unwrap(), "Mug", "MUG-01")
    }

    #[test]
    fn customizability_settings_round_trip() {
        for c in [
            Customizability::NotCustomizable,
            Customizability::AllowsCustomization,
            Customizability::RequiresCustomization,
        ] {
            assert_eq!(Customizability::from_setting(c.setting() as u64).unwrap(), c);
        }
        assert!(Customizability::from_setting(3).is_err());
        assert_eq!(
            "requires_customization".parse::<Customizability>().unwrap(),
            Customizability::RequiresCustomization
        );
    }

    #[test]
    fn counts_ignore_deleted_fields() {
        let mut p = product();
        p.add_customization_field(field(1, CustomizationFieldType::Text, false)).unwrap();
        p.add_customization_field(field(2, CustomizationFieldType::Text, true)).unwrap();
        p.add_customization_field(field(3, CustomizationFieldType::File, false)).unwrap();

        p.delete_customization_field(CustomizationFieldId::new(2).unwrap()).unwrap();

        assert_eq!(p.count_customization_fields(CustomizationFieldType::Text), 1);
        assert_eq!(p.count_customization_fields(CustomizationFieldType::File), 1);
        assert!(!p.has_activated_required_customization_fields());
        assert_eq!(p.non_deleted_customization_field_ids().len(), 2);
    }

    #[test]
    fn duplicate_field_id_is_rejected() {
        let mut p = product();
        p.add_customization_field(field(1, CustomizationFieldType::Text, false)).unwrap();
        let err = p
            .add_customization_field(field(1, CustomizationFieldType::File, false))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn deleting_twice_is_not_found() {
        let mut p = product();
        p.add_customization_field(field(1, CustomizationFieldType::Text, false)).unwrap();
        let id = CustomizationFieldId::new(1).unwrap();
        p.delete_customization_field(id).unwrap();
        assert!(matches!(
            p.delete_customization_field(id),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn copy_field_only_touches_named_field() {
        let mut source = product();
        source.set_name("Big mug");
        source.set_text_fields(4);

        let mut target = product();
        assert!(source.copy_field(FIELD_TEXT_FIELDS, &mut target));
        assert_eq!(target.text_fields(), 4);
        assert_eq!(target.name(), "Mug");

        assert!(!source.copy_field("price", &mut target));
    }
}
