//! Object-model persistence seam.
//!
//! Catalog entities are loaded by an external storage layer, mutated in memory
//! by application services and written back through an [`ObjectModelPersister`].
//! Entities track which fields changed so the writer can perform a partial
//! update instead of rewriting the whole record.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::entity::Entity;

/// An entity that can be written back by an object-model persister.
pub trait ObjectModel: Entity + Clone {
    /// Field names marked for the next write.
    fn fields_to_update(&self) -> &BTreeSet<&'static str>;

    /// Mark fields for inclusion in the next write, whether or not their value changed.
    fn add_fields_to_update(&mut self, fields: &[&'static str]);

    /// Forget pending field marks (called after a successful write).
    fn clear_fields_to_update(&mut self);

    /// Copy a single named field onto `target`.
    ///
    /// Returns `false` when `field` is not a known field of the model.
    fn copy_field(&self, field: &str, target: &mut Self) -> bool;

    /// Stamp the last-update time.
    fn touch(&mut self, at: DateTime<Utc>);
}

/// Persistence failure reported by an object-model writer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// No stored record matches the entity id.
    #[error("object not found: {0}")]
    NotFound(String),

    /// A field marked for update is unknown to the model.
    #[error("unknown field marked for update: {0}")]
    UnknownField(String),

    /// The underlying storage rejected the write.
    #[error("storage failure: {0}")]
    Storage(String),
}

/// Writes object-model state to durable storage.
pub trait ObjectModelPersister<T: ObjectModel>: Send + Sync {
    fn persist(&self, entity: &mut T) -> Result<(), PersistenceError>;
}

impl<T, P> ObjectModelPersister<T> for std::sync::Arc<P>
where
    T: ObjectModel,
    P: ObjectModelPersister<T> + ?Sized,
{
    fn persist(&self, entity: &mut T) -> Result<(), PersistenceError> {
        (**self).persist(entity)
    }
}
