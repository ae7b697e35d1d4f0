use serde::Deserialize;

/// An addon provider (managed database, cache, ...) with its purchasable plans.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct AddonProvider {
    #[serde(deserialize_with = "super::null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub plans: Vec<AddonPlan>,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct AddonPlan {
    #[serde(deserialize_with = "super::null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub slug: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_plans_become_empty() {
        let provider: AddonProvider =
            serde_json::from_str(r#"{"id":"redis-addon","name":"Redis","plans":null}"#).unwrap();
        assert_eq!(provider.id, "redis-addon");
        assert!(provider.plans.is_empty());
    }

    #[test]
    fn null_scalars_become_empty() {
        let provider: AddonProvider = serde_json::from_str(
            r#"{"id":null,"name":null,"plans":[{"id":null,"name":null,"slug":null}]}"#,
        )
        .unwrap();
        assert_eq!(provider.id, "");
        assert_eq!(provider.name, "");
        assert_eq!(provider.plans, vec![AddonPlan::default()]);
    }
}
