//! `shopcore-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod object_model;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CustomizationFieldId, LanguageId, ProductId};
pub use object_model::{ObjectModel, ObjectModelPersister, PersistenceError};
pub use value_object::ValueObject;
