use super::client::CatalogClient;
use crate::error::ApiError;
use crate::models::ProductInstance;
use crate::utils::sort_instances;

pub const PRODUCT_INSTANCES_ENDPOINT: &str = "/v2/products/instances";

impl CatalogClient {
    /// Load every application instance type, ordered by type.
    pub async fn get_product_instances(&self) -> Result<Vec<ProductInstance>, ApiError> {
        let mut instances: Vec<ProductInstance> = self.get_json(PRODUCT_INSTANCES_ENDPOINT).await?;
        sort_instances(&mut instances);
        tracing::info!(count = instances.len(), "product instances loaded");
        Ok(instances)
    }
}
