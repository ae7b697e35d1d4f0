use super::client::CatalogClient;
use crate::error::ApiError;
use crate::models::AddonProvider;
use crate::utils::sort_providers;

pub const ADDON_PROVIDERS_ENDPOINT: &str = "/v2/products/addonproviders";

impl CatalogClient {
    /// Load every addon provider, ordered by id.
    pub async fn get_addon_providers(&self) -> Result<Vec<AddonProvider>, ApiError> {
        let mut providers: Vec<AddonProvider> = self.get_json(ADDON_PROVIDERS_ENDPOINT).await?;
        sort_providers(&mut providers);
        tracing::info!(count = providers.len(), "addon providers loaded");
        Ok(providers)
    }
}
