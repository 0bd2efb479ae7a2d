//! Caching decorator for any [`CatalogPort`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::cache::TtlCache;
use super::ports::{
    BackgroundRecord, CatalogError, CatalogPort, CatalogReference, ClassRecord, EquipmentCategory,
    RaceRecord,
};

/// Serves repeated catalog reads from memory for a fixed TTL.
///
/// Only successful responses are cached, so a transient failure is retried on
/// the next call.
pub struct CachedCatalog {
    inner: Arc<dyn CatalogPort>,
    lists: TtlCache<&'static str, Vec<CatalogReference>>,
    races: TtlCache<String, RaceRecord>,
    classes: TtlCache<String, ClassRecord>,
    backgrounds: TtlCache<String, BackgroundRecord>,
    categories: TtlCache<String, EquipmentCategory>,
}

impl CachedCatalog {
    pub fn new(inner: Arc<dyn CatalogPort>, ttl: Duration) -> Self {
        Self {
            inner,
            lists: TtlCache::new(ttl),
            races: TtlCache::new(ttl),
            classes: TtlCache::new(ttl),
            backgrounds: TtlCache::new(ttl),
            categories: TtlCache::new(ttl),
        }
    }
}

#[async_trait]
impl CatalogPort for CachedCatalog {
    async fn list_races(&self) -> Result<Vec<CatalogReference>, CatalogError> {
        self.lists
            .get_or_try_insert_with("races", || self.inner.list_races())
            .await
    }

    async fn list_classes(&self) -> Result<Vec<CatalogReference>, CatalogError> {
        self.lists
            .get_or_try_insert_with("classes", || self.inner.list_classes())
            .await
    }

    async fn list_backgrounds(&self) -> Result<Vec<CatalogReference>, CatalogError> {
        self.lists
            .get_or_try_insert_with("backgrounds", || self.inner.list_backgrounds())
            .await
    }

    async fn get_race(&self, id: &str) -> Result<RaceRecord, CatalogError> {
        self.races
            .get_or_try_insert_with(id.to_string(), || self.inner.get_race(id))
            .await
    }

    async fn get_class(&self, id: &str) -> Result<ClassRecord, CatalogError> {
        self.classes
            .get_or_try_insert_with(id.to_string(), || self.inner.get_class(id))
            .await
    }

    async fn get_background(&self, id: &str) -> Result<BackgroundRecord, CatalogError> {
        self.backgrounds
            .get_or_try_insert_with(id.to_string(), || self.inner.get_background(id))
            .await
    }

    async fn get_equipment_category(&self, id: &str) -> Result<EquipmentCategory, CatalogError> {
        self.categories
            .get_or_try_insert_with(id.to_string(), || self.inner.get_equipment_category(id))
            .await
    }
}
