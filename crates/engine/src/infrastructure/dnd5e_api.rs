//! D&D 5e SRD REST API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::infrastructure::dnd5e_api_types::{
    ApiBackground, ApiClass, ApiEquipmentCategory, ApiRace, ApiReferenceList,
};
use crate::infrastructure::ports::{
    BackgroundRecord, CatalogError, CatalogPort, CatalogReference, ClassRecord, EquipmentCategory,
    RaceRecord,
};

/// Default catalog base URL (already includes the API prefix).
pub const DEFAULT_CATALOG_BASE_URL: &str = "https://www.dnd5eapi.co/api/2014";

/// Default request timeout in seconds.
pub const DEFAULT_CATALOG_TIMEOUT_SECS: u64 = 10;

/// Client for the D&D 5e SRD API.
#[derive(Clone)]
pub struct Dnd5eApiClient {
    client: Client,
    base_url: String,
}

impl Dnd5eApiClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, DEFAULT_CATALOG_TIMEOUT_SECS)
    }

    pub fn with_timeout(base_url: &str, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        id: &str,
        path: &str,
    ) -> Result<T, CatalogError> {
        let url = self.url(path);
        tracing::debug!(url = %url, "Fetching catalog resource");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(CatalogError::request_failed)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::not_found(resource, id));
        }
        if status == StatusCode::SERVICE_UNAVAILABLE {
            return Err(CatalogError::Unavailable);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::request_failed(format!(
                "GET {url} returned {status}: {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| CatalogError::invalid_response(format!("{resource} {id}: {e}")))
    }

    async fn list(&self, resource: &'static str, path: &str) -> Result<Vec<CatalogReference>, CatalogError> {
        let list: ApiReferenceList = self.get_json(resource, "", path).await?;
        Ok(list.into_references())
    }
}

impl Default for Dnd5eApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG_BASE_URL)
    }
}

#[async_trait]
impl CatalogPort for Dnd5eApiClient {
    async fn list_races(&self) -> Result<Vec<CatalogReference>, CatalogError> {
        self.list("race list", "races").await
    }

    async fn list_classes(&self) -> Result<Vec<CatalogReference>, CatalogError> {
        self.list("class list", "classes").await
    }

    async fn list_backgrounds(&self) -> Result<Vec<CatalogReference>, CatalogError> {
        self.list("background list", "backgrounds").await
    }

    async fn get_race(&self, id: &str) -> Result<RaceRecord, CatalogError> {
        let race: ApiRace = self.get_json("race", id, &format!("races/{id}")).await?;
        Ok(race.into_record())
    }

    async fn get_class(&self, id: &str) -> Result<ClassRecord, CatalogError> {
        let class: ApiClass = self.get_json("class", id, &format!("classes/{id}")).await?;
        Ok(class.into_record())
    }

    async fn get_background(&self, id: &str) -> Result<BackgroundRecord, CatalogError> {
        let background: ApiBackground = self
            .get_json("background", id, &format!("backgrounds/{id}"))
            .await?;
        Ok(background.into_record())
    }

    async fn get_equipment_category(&self, id: &str) -> Result<EquipmentCategory, CatalogError> {
        let category: ApiEquipmentCategory = self
            .get_json(
                "equipment category",
                id,
                &format!("equipment-categories/{id}"),
            )
            .await?;
        Ok(category.into_record())
    }
}
