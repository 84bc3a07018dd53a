use std::sync::Arc;

use shopcore_currency::GetReferenceCurrencyHandler;
use shopcore_localization::InMemoryLocaleRepository;
use shopcore_products::{Product, ProductRulesValidator, ProductUpdater};

use crate::config::{ShopConfig, load_locale_repository};
use crate::object_store::InMemoryObjectStore;

pub type LocaleRepositoryRef = Arc<InMemoryLocaleRepository>;
pub type ProductStoreRef = Arc<InMemoryObjectStore<Product>>;

/// Catalog application services wired to in-memory infrastructure (dev/test).
pub struct CatalogServices {
    pub locales: LocaleRepositoryRef,
    pub product_store: ProductStoreRef,
    pub reference_currency: GetReferenceCurrencyHandler<LocaleRepositoryRef>,
    pub product_updater: ProductUpdater<ProductRulesValidator, ProductStoreRef>,
}

impl CatalogServices {
    pub fn in_memory(config: &ShopConfig, locales: InMemoryLocaleRepository) -> Self {
        let locales = Arc::new(locales);
        let product_store: ProductStoreRef = Arc::new(InMemoryObjectStore::new());

        Self {
            reference_currency: GetReferenceCurrencyHandler::new(
                locales.clone(),
                config.languages.clone(),
            ),
            product_updater: ProductUpdater::new(ProductRulesValidator, product_store.clone()),
            locales,
            product_store,
        }
    }

    /// Wire services from configuration, loading the locale bundle when one is configured.
    pub fn from_config(config: &ShopConfig) -> anyhow::Result<Self> {
        let locales = match &config.locale_data_path {
            Some(path) => load_locale_repository(path)?,
            None => {
                tracing::warn!("no locale data configured; currency queries will not find any currency");
                InMemoryLocaleRepository::new()
            }
        };
        Ok(Self::in_memory(config, locales))
    }
}
