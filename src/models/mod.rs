mod addon_provider;
mod flavor;
mod product_instance;

pub use addon_provider::{AddonPlan, AddonProvider};
pub use flavor::{Flavor, Memory};
pub use product_instance::{ProductInstance, Variant};

use serde::{Deserialize, Deserializer};

/// Treats an explicit JSON `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
