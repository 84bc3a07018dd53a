//! Infrastructure adapters: in-memory object-model storage, configuration and
//! wiring of the catalog services.

pub mod config;
pub mod object_store;
pub mod services;

pub use config::{ConfigError, ShopConfig, load_locale_repository};
pub use object_store::InMemoryObjectStore;
pub use services::CatalogServices;
