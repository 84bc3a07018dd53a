//! Products domain module.
//!
//! The `Product` object model is loaded and written back by an external
//! persistence layer; this crate holds the business rules applied in between
//! (property updates, validation, derived customization settings).

pub mod customization;
pub mod product;
pub mod updater;
pub mod validator;

pub use customization::{CustomizationField, CustomizationFieldType};
pub use product::{Customizability, Product};
pub use updater::{ProductUpdateError, ProductUpdater, PropertyMap, update_error_codes};
pub use validator::{MAX_CUSTOMIZATION_FIELDS, ProductRulesValidator, ProductValidator};
