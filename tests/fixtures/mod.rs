#![allow(dead_code)]

use cc_plans_lister::models::{AddonPlan, AddonProvider, Flavor, Memory, ProductInstance};

pub fn addon_providers() -> Vec<AddonProvider> {
    vec![
        AddonProvider {
            id: "postgresql".into(),
            name: "PostgreSQL".into(),
            plans: vec![
                AddonPlan { id: "pg_prod".into(), name: "Production PostgreSQL".into(), slug: "prod".into() },
                AddonPlan { id: "pg_dev".into(), name: "Dev PostgreSQL".into(), slug: "dev".into() },
            ],
        },
        AddonProvider {
            id: "redis".into(),
            name: "Redis".into(),
            plans: vec![
                AddonPlan { id: "redis_small".into(), name: "Small Redis".into(), slug: "small".into() },
                AddonPlan { id: "redis_large".into(), name: "Large Redis".into(), slug: "large".into() },
            ],
        },
    ]
}

pub fn flavor(name: &str, mb: i64, cpus: i64, price: f64) -> Flavor {
    Flavor {
        name: name.into(),
        mem: mb,
        cpus,
        price,
        available: true,
        memory: Memory { unit: "MB".into(), value: mb, formatted: format!("{} MB", mb) },
        ..Default::default()
    }
}

pub fn product_instances() -> Vec<ProductInstance> {
    let mut nano = flavor("nano", 256, 1, 0.02);
    nano.microservice = true;
    vec![
        ProductInstance {
            kind: "node".into(),
            version: "20".into(),
            name: "Node.js".into(),
            description: "Node.js runtime".into(),
            enabled: true,
            max_instances: 20,
            tags: vec!["runtime".into(), "javascript".into()],
            deployments: vec!["git".into(), "docker".into()],
            flavors: vec![flavor("small", 512, 1, 0.04), nano],
            default_flavor: Flavor { name: "nano".into(), ..Default::default() },
            ..Default::default()
        },
        ProductInstance {
            kind: "python".into(),
            version: "3.11".into(),
            name: "Python".into(),
            description: "Python runtime".into(),
            enabled: true,
            max_instances: 10,
            tags: vec!["runtime".into(), "python".into()],
            deployments: vec!["git".into()],
            flavors: vec![flavor("medium", 1024, 2, 0.08)],
            default_flavor: Flavor { name: "medium".into(), ..Default::default() },
            ..Default::default()
        },
        ProductInstance {
            kind: "ruby".into(),
            version: "3.2".into(),
            name: "Ruby".into(),
            description: "Retired runtime".into(),
            enabled: false,
            max_instances: 5,
            flavors: vec![flavor("pico", 128, 1, 0.01)],
            default_flavor: Flavor { name: "pico".into(), ..Default::default() },
            ..Default::default()
        },
    ]
}

/// Providers ordered by id and instances by type, as the catalog client returns them.
pub fn sorted_catalog() -> (Vec<AddonProvider>, Vec<ProductInstance>) {
    let mut providers = addon_providers();
    let mut instances = product_instances();
    cc_plans_lister::utils::sort_providers(&mut providers);
    cc_plans_lister::utils::sort_instances(&mut instances);
    (providers, instances)
}
