use serde::Deserialize;

use super::flavor::Flavor;

/// An application runtime type (node, python, docker, ...) and its flavors.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductInstance {
    #[serde(rename = "type", deserialize_with = "super::null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub version: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub variant: Variant,
    #[serde(deserialize_with = "super::null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub enabled: bool,
    #[serde(deserialize_with = "super::null_as_default")]
    pub coming_soon: bool,
    #[serde(deserialize_with = "super::null_as_default")]
    pub max_instances: i64,
    #[serde(deserialize_with = "super::null_as_default")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub deployments: Vec<String>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub flavors: Vec<Flavor>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub default_flavor: Flavor,
    #[serde(deserialize_with = "super::null_as_default")]
    pub build_flavor: Flavor,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Variant {
    #[serde(deserialize_with = "super::null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub slug: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub deploy_type: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub logo: String,
}

impl ProductInstance {
    /// The default flavor is matched by name, not by identity.
    pub fn is_default_flavor(&self, flavor: &Flavor) -> bool {
        flavor.name == self.default_flavor.name
    }
}
