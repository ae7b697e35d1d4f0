use serde::Deserialize;

/// A priced compute configuration selectable for an application type.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Flavor {
    #[serde(deserialize_with = "super::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub mem: i64,
    #[serde(deserialize_with = "super::null_as_default")]
    pub cpus: i64,
    #[serde(deserialize_with = "super::null_as_default")]
    pub gpus: i64,
    // Either a number or an object depending on the flavor; never rendered.
    pub disk: serde_json::Value,
    #[serde(deserialize_with = "super::null_as_default")]
    pub price: f64,
    #[serde(deserialize_with = "super::null_as_default")]
    pub available: bool,
    #[serde(deserialize_with = "super::null_as_default")]
    pub microservice: bool,
    #[serde(rename = "machine_learning", deserialize_with = "super::null_as_default")]
    pub machine_learning: bool,
    #[serde(deserialize_with = "super::null_as_default")]
    pub nice: i64,
    #[serde(rename = "price_id", deserialize_with = "super::null_as_default")]
    pub price_id: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub memory: Memory,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Memory {
    #[serde(deserialize_with = "super::null_as_default")]
    pub unit: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub value: i64,
    /// Display string such as "512 MB", used as-is by every report.
    #[serde(deserialize_with = "super::null_as_default")]
    pub formatted: String,
}

impl Flavor {
    /// Short labels for the noteworthy traits of this flavor, in display order.
    pub fn feature_tags(&self) -> Vec<&'static str> {
        let mut tags = Vec::new();
        if !self.available {
            tags.push("Unavailable");
        }
        if self.microservice {
            tags.push("Microservice");
        }
        if self.machine_learning {
            tags.push("ML");
        }
        tags
    }
}
