// Catalog endpoints
pub mod client;
pub mod addon_providers;
pub mod product_instances;

pub use client::CatalogClient;
pub use addon_providers::ADDON_PROVIDERS_ENDPOINT;
pub use product_instances::PRODUCT_INSTANCES_ENDPOINT;
