use std::io::Write;

use comfy_table::{presets, ContentArrangement, Table};

use super::{Formatter, GENERATED_NOTE, REPORT_TITLE};
use crate::error::RenderError;
use crate::models::{AddonProvider, ProductInstance};
use crate::utils::{format_price, sorted_flavors, sorted_plans, yes_no};

const COLUMN_GAP: u16 = 2;

/// Plain text report with aligned columns.
pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format_name(&self) -> &'static str {
        "txt"
    }

    fn format(
        &self,
        providers: &[AddonProvider],
        instances: &[ProductInstance],
        writer: &mut dyn Write,
    ) -> Result<(), RenderError> {
        let mut out = String::new();

        out.push_str(&underlined(&REPORT_TITLE.to_uppercase(), '='));
        out.push('\n');
        out.push_str(&format!("{}\n\n", GENERATED_NOTE));

        out.push_str(&underlined("ADDON SUMMARY", '='));
        out.push('\n');
        let mut rows = table_head(&["Provider ID", "Name", "Number of Plans"]);
        for provider in providers {
            rows.push(vec![
                provider.id.clone(),
                provider.name.clone(),
                provider.plans.len().to_string(),
            ]);
        }
        out.push_str(&aligned(&rows));

        out.push_str("\n\n");
        out.push_str(&underlined("APPLICATION SUMMARY", '='));
        out.push('\n');
        let mut rows = table_head(&["Type", "Name", "Version", "Enabled", "Flavors", "Default Flavor"]);
        for instance in instances {
            rows.push(vec![
                instance.kind.clone(),
                instance.name.clone(),
                instance.version.clone(),
                yes_no(instance.enabled).to_string(),
                instance.flavors.len().to_string(),
                instance.default_flavor.name.clone(),
            ]);
        }
        out.push_str(&aligned(&rows));

        out.push_str("\n\n");
        out.push_str(&underlined("DETAILED ADDON PLANS", '='));
        out.push('\n');
        out.push_str(&aligned(&detailed_plan_rows(providers)));

        out.push_str("\n\n");
        out.push_str(&underlined("DETAILED APPLICATION FLAVORS", '='));
        out.push('\n');
        out.push_str(&aligned(&detailed_flavor_rows(instances)));

        out.push_str("\n\n");
        out.push_str(&underlined("PLANS BY ADDON PROVIDER", '='));
        out.push('\n');
        for provider in providers {
            out.push_str(&underlined(&format!("{} ({})", provider.name, provider.id), '-'));
            if provider.plans.is_empty() {
                out.push_str("No plans available.\n\n");
                continue;
            }
            for plan in sorted_plans(provider) {
                out.push_str(&format!("- {} ({}) - ID: {}\n", plan.name, plan.slug, plan.id));
            }
            out.push('\n');
        }

        out.push_str(&underlined("FLAVORS BY APPLICATION TYPE", '='));
        out.push('\n');
        for instance in instances.iter().filter(|i| i.enabled) {
            write_instance_section(&mut out, instance);
        }

        writer.write_all(out.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

fn detailed_plan_rows(providers: &[AddonProvider]) -> Vec<Vec<String>> {
    let mut rows = table_head(&["Provider ID", "Provider Name", "Plan ID", "Plan Name", "Plan Slug"]);
    for provider in providers {
        if provider.plans.is_empty() {
            rows.push(vec![
                provider.id.clone(),
                provider.name.clone(),
                "-".into(),
                "No plans available".into(),
                "-".into(),
            ]);
            continue;
        }
        for (i, plan) in sorted_plans(provider).into_iter().enumerate() {
            let (id, name) = if i == 0 {
                (provider.id.clone(), provider.name.clone())
            } else {
                (String::new(), String::new())
            };
            rows.push(vec![id, name, plan.id, plan.name, plan.slug]);
        }
    }
    rows
}

fn detailed_flavor_rows(instances: &[ProductInstance]) -> Vec<Vec<String>> {
    let mut rows = table_head(&[
        "Type", "Name", "Flavor", "Memory", "CPU", "Price", "Available", "Microservice", "ML",
    ]);
    for instance in instances.iter().filter(|i| i.enabled) {
        if instance.flavors.is_empty() {
            let mut row = vec![instance.kind.clone(), instance.name.clone()];
            row.extend(std::iter::repeat("-".to_string()).take(7));
            rows.push(row);
            continue;
        }
        for (i, flavor) in sorted_flavors(instance).into_iter().enumerate() {
            let (kind, name) = if i == 0 {
                (instance.kind.clone(), instance.name.clone())
            } else {
                (String::new(), String::new())
            };
            rows.push(vec![
                kind,
                name,
                flavor.name.clone(),
                flavor.memory.formatted.clone(),
                flavor.cpus.to_string(),
                format_price(flavor.price),
                yes_no(flavor.available).to_string(),
                yes_no(flavor.microservice).to_string(),
                yes_no(flavor.machine_learning).to_string(),
            ]);
        }
    }
    rows
}

fn write_instance_section(out: &mut String, instance: &ProductInstance) {
    out.push_str(&underlined(
        &format!("{} ({}) - Version {}", instance.name, instance.kind, instance.version),
        '-',
    ));
    out.push_str(&format!("Description: {}\n", instance.description));
    out.push_str(&format!("Max instances: {}\n", instance.max_instances));
    out.push_str(&format!("Tags: {}\n", instance.tags.join(", ")));
    out.push_str(&format!("Deployments: {}\n\n", instance.deployments.join(", ")));

    if instance.flavors.is_empty() {
        out.push_str("No flavors available.\n\n");
        return;
    }

    out.push_str("Available flavors:\n");
    for flavor in sorted_flavors(instance) {
        let marker = if instance.is_default_flavor(&flavor) { " (default)" } else { "" };
        out.push_str(&format!(
            "- {}{} - {}, {} CPU, {}/h",
            flavor.name,
            marker,
            flavor.memory.formatted,
            flavor.cpus,
            format_price(flavor.price)
        ));
        let tags = flavor.feature_tags();
        if !tags.is_empty() {
            out.push_str(&format!(" [{}]", tags.join(", ")));
        }
        out.push('\n');
    }
    out.push('\n');
}

/// `title` on one line and a rule of `rule` chars of the same length below it.
fn underlined(title: &str, rule: char) -> String {
    let width = title.chars().count();
    format!("{}\n{}\n", title, rule.to_string().repeat(width))
}

/// Header labels followed by a row of dashes under each label.
fn table_head(labels: &[&str]) -> Vec<Vec<String>> {
    vec![
        labels.iter().map(|l| l.to_string()).collect(),
        labels.iter().map(|l| "-".repeat(l.chars().count())).collect(),
    ]
}

/// Lay rows out in columns. Every column but the last is padded to its widest
/// cell plus a two-space gap; the last cell is written as-is.
fn aligned(rows: &[Vec<String>]) -> String {
    let mut table = Table::new();
    table.load_preset(presets::NOTHING);
    table.set_content_arrangement(ContentArrangement::Disabled);
    for row in rows {
        table.add_row(row[..row.len().saturating_sub(1)].to_vec());
    }
    for column in table.column_iter_mut() {
        column.set_padding((0, COLUMN_GAP));
    }

    let mut out = String::new();
    let leading = table.to_string();
    for (prefix, row) in leading.lines().zip(rows) {
        out.push_str(prefix);
        if let Some(last) = row.last() {
            out.push_str(last);
        }
        out.push('\n');
    }
    out
}
