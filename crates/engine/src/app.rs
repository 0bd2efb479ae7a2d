//! Application state and composition.

use std::sync::Arc;

use charforge_domain::ChoiceNormalizer;

use crate::infrastructure::{
    cached_catalog::CachedCatalog, config::EngineConfig, dnd5e_api::Dnd5eApiClient,
    ports::CatalogPort,
};
use crate::use_cases::CharacterOptions;

/// Main application state.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub character_options: Arc<CharacterOptions>,
}

impl App {
    /// Wire use cases around an already-built catalog port.
    pub fn new(catalog: Arc<dyn CatalogPort>) -> Self {
        let normalizer = Arc::new(ChoiceNormalizer::default());
        let use_cases = UseCases {
            character_options: Arc::new(CharacterOptions::new(catalog, normalizer)),
        };
        Self { use_cases }
    }

    /// Build the REST catalog client, cached unless the TTL is disabled.
    pub fn from_config(config: &EngineConfig) -> Self {
        let client: Arc<dyn CatalogPort> = Arc::new(Dnd5eApiClient::with_timeout(
            &config.catalog_base_url,
            config.catalog_timeout_secs,
        ));

        let catalog = match config.catalog_cache_ttl {
            Some(ttl) => {
                tracing::info!(ttl_secs = ttl.as_secs(), "Catalog response cache enabled");
                Arc::new(CachedCatalog::new(client, ttl)) as Arc<dyn CatalogPort>
            }
            None => client,
        };

        Self::new(catalog)
    }
}
