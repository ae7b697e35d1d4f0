use std::io::Write;

use super::{Formatter, GENERATED_NOTE, REPORT_TITLE};
use crate::error::RenderError;
use crate::models::{AddonProvider, ProductInstance};
use crate::utils::{format_price, sorted_flavors, sorted_plans, yes_no};

/// Markdown document with summary tables, detail tables and per-entry sections.
pub struct MarkdownFormatter;

impl Formatter for MarkdownFormatter {
    fn format_name(&self) -> &'static str {
        "markdown"
    }

    fn format(
        &self,
        providers: &[AddonProvider],
        instances: &[ProductInstance],
        writer: &mut dyn Write,
    ) -> Result<(), RenderError> {
        let mut out = String::new();

        out.push_str(&format!("# {}\n\n", REPORT_TITLE));
        out.push_str("This document lists all available addon types AND application types on Clever Cloud with their respective plans/flavors.\n\n");
        out.push_str(&format!("*{}*\n\n", GENERATED_NOTE));

        addon_summary(&mut out, providers);
        application_summary(&mut out, instances);
        detailed_addon_plans(&mut out, providers);
        detailed_application_flavors(&mut out, instances);
        plans_by_provider(&mut out, providers);
        flavors_by_application(&mut out, instances);

        writer.write_all(out.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

fn addon_summary(out: &mut String, providers: &[AddonProvider]) {
    out.push_str("## Addon Summary\n\n");
    out.push_str("| Provider ID | Name | Number of Plans |\n");
    out.push_str("|-------------|------|----------------|\n");
    for provider in providers {
        out.push_str(&format!(
            "| `{}` | {} | {} |\n",
            provider.id,
            provider.name,
            provider.plans.len()
        ));
    }
}

fn application_summary(out: &mut String, instances: &[ProductInstance]) {
    out.push_str("\n## Application Summary\n\n");
    out.push_str("| Type | Name | Version | Enabled | Number of Flavors | Default Flavor |\n");
    out.push_str("|------|------|---------|---------|-------------------|----------------|\n");
    for instance in instances {
        out.push_str(&format!(
            "| `{}` | {} | {} | {} | {} | `{}` |\n",
            instance.kind,
            instance.name,
            instance.version,
            yes_no(instance.enabled),
            instance.flavors.len(),
            instance.default_flavor.name
        ));
    }
}

fn detailed_addon_plans(out: &mut String, providers: &[AddonProvider]) {
    out.push_str("\n## Detailed Addon Plans\n\n");
    out.push_str("| Provider ID | Provider Name | Plan ID | Plan Name | Plan Slug |\n");
    out.push_str("|-------------|---------------|---------|-----------|----------|\n");
    for provider in providers {
        if provider.plans.is_empty() {
            out.push_str(&format!(
                "| `{}` | {} | - | No plans available | - |\n",
                provider.id, provider.name
            ));
            continue;
        }

        for (i, plan) in sorted_plans(provider).iter().enumerate() {
            // Provider cells only on the first row of each group.
            let (id_cell, name_cell) = if i == 0 {
                (format!("`{}`", provider.id), provider.name.as_str())
            } else {
                (String::new(), "")
            };
            out.push_str(&format!(
                "| {} | {} | `{}` | {} | `{}` |\n",
                id_cell, name_cell, plan.id, plan.name, plan.slug
            ));
        }
    }
}

fn detailed_application_flavors(out: &mut String, instances: &[ProductInstance]) {
    out.push_str("\n## Detailed Application Flavors\n\n");
    out.push_str("| Type | Name | Flavor | Memory | CPU | Price | Available | Microservice | ML |\n");
    out.push_str("|------|------|--------|--------|-----|-------|-----------|-------------|----|\n");
    for instance in instances.iter().filter(|i| i.enabled) {
        if instance.flavors.is_empty() {
            out.push_str(&format!(
                "| `{}` | {} | - | - | - | - | - | - | - |\n",
                instance.kind, instance.name
            ));
            continue;
        }

        for (i, flavor) in sorted_flavors(instance).iter().enumerate() {
            let (type_cell, name_cell) = if i == 0 {
                (format!("`{}`", instance.kind), instance.name.as_str())
            } else {
                (String::new(), "")
            };
            out.push_str(&format!(
                "| {} | {} | `{}` | {} | {} | {} | {} | {} | {} |\n",
                type_cell,
                name_cell,
                flavor.name,
                flavor.memory.formatted,
                flavor.cpus,
                format_price(flavor.price),
                yes_no(flavor.available),
                yes_no(flavor.microservice),
                yes_no(flavor.machine_learning)
            ));
        }
    }
}

fn plans_by_provider(out: &mut String, providers: &[AddonProvider]) {
    out.push_str("\n## Plans by Addon Provider\n\n");
    for provider in providers {
        out.push_str(&format!("### {} (`{}`)\n\n", provider.name, provider.id));
        if provider.plans.is_empty() {
            out.push_str("No plans available.\n\n");
            continue;
        }
        for plan in sorted_plans(provider) {
            out.push_str(&format!(
                "- **{}** (`{}`) - ID: `{}`\n",
                plan.name, plan.slug, plan.id
            ));
        }
        out.push('\n');
    }
}

fn flavors_by_application(out: &mut String, instances: &[ProductInstance]) {
    out.push_str("\n## Flavors by Application Type\n\n");
    for instance in instances.iter().filter(|i| i.enabled) {
        out.push_str(&format!(
            "### {} (`{}`) - Version {}\n\n",
            instance.name, instance.kind, instance.version
        ));
        out.push_str(&format!("**Description**: {}\n\n", instance.description));
        out.push_str(&format!("**Max instances**: {}\n\n", instance.max_instances));
        out.push_str(&format!("**Tags**: {}\n\n", instance.tags.join(", ")));
        out.push_str(&format!("**Deployments**: {}\n\n", instance.deployments.join(", ")));

        if instance.flavors.is_empty() {
            out.push_str("No flavors available.\n\n");
            continue;
        }

        out.push_str("**Available flavors**:\n\n");
        for flavor in sorted_flavors(instance) {
            let marker = if instance.is_default_flavor(&flavor) { " *(default)*" } else { "" };
            out.push_str(&format!(
                "- **{}**{} - {}, {} CPU, {}/h",
                flavor.name,
                marker,
                flavor.memory.formatted,
                flavor.cpus,
                format_price(flavor.price)
            ));
            let tags = flavor.feature_tags();
            if !tags.is_empty() {
                out.push_str(&format!(" *[{}]*", tags.join(", ")));
            }
            out.push('\n');
        }
        out.push('\n');
    }
}
