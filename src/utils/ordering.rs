use crate::models::{AddonPlan, AddonProvider, Flavor, ProductInstance};

/// Order providers by id, byte-wise. Done once, before any report is built.
pub fn sort_providers(providers: &mut [AddonProvider]) {
    providers.sort_by(|a, b| a.id.cmp(&b.id));
}

/// Order instances by type, byte-wise.
pub fn sort_instances(instances: &mut [ProductInstance]) {
    instances.sort_by(|a, b| a.kind.cmp(&b.kind));
}

/// A copy of the provider's plans ordered by slug; the provider is untouched.
pub fn sorted_plans(provider: &AddonProvider) -> Vec<AddonPlan> {
    let mut plans = provider.plans.clone();
    plans.sort_by(|a, b| a.slug.cmp(&b.slug));
    plans
}

/// A copy of the instance's flavors ordered by name; the instance is untouched.
pub fn sorted_flavors(instance: &ProductInstance) -> Vec<Flavor> {
    let mut flavors = instance.flavors.clone();
    flavors.sort_by(|a, b| a.name.cmp(&b.name));
    flavors
}
