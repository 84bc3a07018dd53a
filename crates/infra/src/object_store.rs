use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use shopcore_core::{Entity, ObjectModel, ObjectModelPersister, PersistenceError};

/// In-memory object-model storage for tests/dev.
///
/// `persist` behaves like a row update: the record must already exist, only
/// the fields marked for update are written (the whole record when none are
/// marked), and the update time is stamped.
#[derive(Debug)]
pub struct InMemoryObjectStore<T: ObjectModel> {
    inner: RwLock<BTreeMap<T::Id, T>>,
}

impl<T: ObjectModel> InMemoryObjectStore<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
        }
    }

    /// Seed or replace a stored record.
    pub fn insert(&self, entity: T) -> Result<(), PersistenceError> {
        let mut map = self.write()?;
        map.insert(entity.id().clone(), entity);
        Ok(())
    }

    pub fn get(&self, id: &T::Id) -> Result<Option<T>, PersistenceError> {
        Ok(self.read()?.get(id).cloned())
    }

    pub fn len(&self) -> Result<usize, PersistenceError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, PersistenceError> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<T::Id, T>>, PersistenceError> {
        self.inner.read().map_err(|_| poisoned())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<T::Id, T>>, PersistenceError> {
        self.inner.write().map_err(|_| poisoned())
    }
}

fn poisoned() -> PersistenceError {
    tracing::warn!("object store lock poisoned");
    PersistenceError::Storage("object store lock poisoned".into())
}

impl<T: ObjectModel> Default for InMemoryObjectStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ObjectModelPersister<T> for InMemoryObjectStore<T>
where
    T: ObjectModel + Send + Sync,
    T::Id: Send + Sync,
{
    fn persist(&self, entity: &mut T) -> Result<(), PersistenceError> {
        let mut map = self.write()?;
        let stored = map
            .get_mut(entity.id())
            .ok_or_else(|| PersistenceError::NotFound(format!("{:?}", entity.id())))?;

        // Stage the write so an unknown field leaves the record untouched.
        let mut staged = if entity.fields_to_update().is_empty() {
            entity.clone()
        } else {
            let mut staged = stored.clone();
            for field in entity.fields_to_update() {
                if !entity.copy_field(field, &mut staged) {
                    return Err(PersistenceError::UnknownField((*field).to_string()));
                }
            }
            staged
        };

        let now = Utc::now();
        staged.touch(now);
        *stored = staged;
        entity.touch(now);

        tracing::debug!(id = ?entity.id(), fields = ?entity.fields_to_update(), "object persisted");
        entity.clear_fields_to_update();
        Ok(())
    }
}
