//! Report renderers for the catalog.
//!
//! Every formatter receives the providers already ordered by id and the
//! instances already ordered by type (see [`crate::utils::ordering`]). Plans
//! and flavors are re-sorted locally on copies, so the same collections can be
//! handed to several formatters in turn.

mod csv;
mod markdown;
mod pdf;
mod txt;

use std::io::Write;

use crate::error::RenderError;
use crate::models::{AddonProvider, ProductInstance};

pub use self::csv::CsvFormatter;
pub use markdown::MarkdownFormatter;
pub use pdf::PdfFormatter;
pub use txt::TextFormatter;

pub const REPORT_TITLE: &str = "Complete Clever Cloud Services Overview";
pub const GENERATED_NOTE: &str = "Automatically generated via Clever Cloud API";

/// A report encoding.
pub trait Formatter {
    /// Identifier this formatter is selected by.
    fn format_name(&self) -> &'static str;

    /// Write the full report for both collections to `writer`.
    ///
    /// Any failure of the sink aborts the report; bytes already written stay.
    fn format(
        &self,
        providers: &[AddonProvider],
        instances: &[ProductInstance],
        writer: &mut dyn Write,
    ) -> Result<(), RenderError>;
}

/// Pick a formatter by identifier. Unknown identifiers get Markdown.
pub fn get_formatter(format: &str) -> Box<dyn Formatter> {
    match format {
        "markdown" => Box::new(MarkdownFormatter),
        "txt" => Box::new(TextFormatter),
        "csv" => Box::new(CsvFormatter),
        "pdf" => Box::new(PdfFormatter),
        other => {
            tracing::debug!(format = other, "unknown format, falling back to markdown");
            Box::new(MarkdownFormatter)
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::{AddonPlan, AddonProvider, Flavor, Memory, ProductInstance};

    pub fn plan(id: &str, name: &str, slug: &str) -> AddonPlan {
        AddonPlan { id: id.into(), name: name.into(), slug: slug.into() }
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

    pub fn providers() -> Vec<AddonProvider> {
        vec![
            AddonProvider {
                id: "postgresql-addon".into(),
                name: "PostgreSQL".into(),
                plans: vec![plan("pg_xs", "XS Small Space", "xs_sml"), plan("pg_dev", "DEV", "dev")],
            },
            AddonProvider { id: "redis-addon".into(), name: "Redis".into(), plans: vec![] },
        ]
    }

    pub fn instances() -> Vec<ProductInstance> {
        let mut ml = flavor("nano", 256, 1, 0.02);
        ml.microservice = true;
        let mut big = flavor("XL", 16384, 8, 0.9);
        big.available = false;
        big.machine_learning = true;
        vec![
            ProductInstance {
                kind: "node".into(),
                version: "20".into(),
                name: "Node.js".into(),
                description: "Node.js runtime".into(),
                enabled: true,
                max_instances: 40,
                tags: vec!["javascript".into(), "runtime".into()],
                deployments: vec!["git".into(), "docker".into()],
                flavors: vec![flavor("small", 512, 1, 0.04), big, ml],
                default_flavor: flavor("nano", 256, 1, 0.02),
                ..Default::default()
            },
            ProductInstance {
                kind: "php".into(),
                version: "8".into(),
                name: "PHP".into(),
                description: "Legacy PHP".into(),
                enabled: false,
                max_instances: 10,
                flavors: vec![flavor("pico", 128, 1, 0.01)],
                default_flavor: flavor("pico", 128, 1, 0.01),
                ..Default::default()
            },
            ProductInstance {
                kind: "static".into(),
                version: "1".into(),
                name: "Static".into(),
                enabled: true,
                ..Default::default()
            },
        ]
    }
}
