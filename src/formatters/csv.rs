use std::io::Write;

use super::{Formatter, GENERATED_NOTE, REPORT_TITLE};
use crate::error::RenderError;
use crate::models::{AddonProvider, ProductInstance};
use crate::utils::{sorted_flavors, sorted_plans};

const ADDON_HEADER: [&str; 6] = [
    "Type", "Provider_ID", "Provider_Name", "Plan_ID", "Plan_Name", "Plan_Slug",
];

const APPLICATION_HEADER: [&str; 20] = [
    "Type", "Instance_Type", "Instance_Name", "Version", "Description", "Enabled",
    "Max_Instances", "Tags", "Deployments", "Flavor_Name", "Memory_Formatted",
    "Memory_Value", "Memory_Unit", "CPUs", "GPUs", "Price", "Available",
    "Microservice", "MachineLearning", "IsDefault",
];

/// Flat export: one row per provider/plan and one per instance/flavor.
///
/// Unlike the narrative reports, disabled instances are included.
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format_name(&self) -> &'static str {
        "csv"
    }

    fn format(
        &self,
        providers: &[AddonProvider],
        instances: &[ProductInstance],
        writer: &mut dyn Write,
    ) -> Result<(), RenderError> {
        write_row(writer, &[format!("# {} - CSV Export", REPORT_TITLE)])?;
        write_row(writer, &[format!("# {}", GENERATED_NOTE)])?;
        writer.write_all(b"\n")?;

        write_row(writer, &["# ADDON PROVIDERS"])?;
        write_row(writer, &ADDON_HEADER)?;
        for provider in providers {
            if provider.plans.is_empty() {
                write_row(
                    writer,
                    &[
                        "addon",
                        provider.id.as_str(),
                        provider.name.as_str(),
                        "",
                        "No plans available",
                        "",
                    ],
                )?;
                continue;
            }
            for plan in sorted_plans(provider) {
                write_row(
                    writer,
                    &[
                        "addon",
                        provider.id.as_str(),
                        provider.name.as_str(),
                        plan.id.as_str(),
                        plan.name.as_str(),
                        plan.slug.as_str(),
                    ],
                )?;
            }
        }

        writer.write_all(b"\n")?;
        write_row(writer, &["# APPLICATION INSTANCES"])?;
        write_row(writer, &APPLICATION_HEADER)?;
        for instance in instances {
            let mut base = vec![
                "application".to_string(),
                instance.kind.clone(),
                instance.name.clone(),
                instance.version.clone(),
                instance.description.clone(),
                instance.enabled.to_string(),
                instance.max_instances.to_string(),
                instance.tags.join("|"),
                instance.deployments.join("|"),
            ];

            if instance.flavors.is_empty() {
                base.resize(APPLICATION_HEADER.len(), String::new());
                write_row(writer, base.as_slice())?;
                continue;
            }

            for flavor in sorted_flavors(instance) {
                let mut row = base.clone();
                row.extend([
                    flavor.name.clone(),
                    flavor.memory.formatted.clone(),
                    flavor.memory.value.to_string(),
                    flavor.memory.unit.clone(),
                    flavor.cpus.to_string(),
                    flavor.gpus.to_string(),
                    format!("{:.2}", flavor.price),
                    flavor.available.to_string(),
                    flavor.microservice.to_string(),
                    flavor.machine_learning.to_string(),
                    instance.is_default_flavor(&flavor).to_string(),
                ]);
                write_row(writer, row.as_slice())?;
            }
        }

        writer.flush()?;
        Ok(())
    }
}

/// Write one comma-separated line. Blank separator lines bypass this, since an
/// empty record would otherwise come out as `""`.
fn write_row<S: AsRef<str>>(writer: &mut dyn Write, fields: &[S]) -> Result<(), RenderError> {
    let mut line = Vec::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            line.push(b',');
        }
        line.extend(encode_field(field.as_ref())?);
    }
    line.push(b'\n');
    writer.write_all(&line)?;
    Ok(())
}

// Fields with leading whitespace are quoted too, so readers that trim
// unquoted fields keep them intact.
fn encode_field(field: &str) -> Result<Vec<u8>, RenderError> {
    if field.is_empty() {
        return Ok(Vec::new());
    }
    let style = if field.starts_with(char::is_whitespace) {
        ::csv::QuoteStyle::Always
    } else {
        ::csv::QuoteStyle::Necessary
    };
    let mut wtr = ::csv::WriterBuilder::new()
        .quote_style(style)
        .from_writer(Vec::new());
    wtr.write_field(field)?;
    Ok(wtr.into_inner()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatters::test_support::{instances, providers};
    use crate::models::AddonProvider;

    fn render(providers: &[AddonProvider], instances: &[ProductInstance]) -> String {
        let mut buf = Vec::new();
        CsvFormatter.format(providers, instances, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn preamble_and_headers() {
        let out = render(&providers(), &instances());
        assert!(out.starts_with(
            "# Complete Clever Cloud Services Overview - CSV Export\n\
             # Automatically generated via Clever Cloud API\n\
             \n\
             # ADDON PROVIDERS\n\
             Type,Provider_ID,Provider_Name,Plan_ID,Plan_Name,Plan_Slug\n"
        ));
        assert!(out.contains(
            "\n\n# APPLICATION INSTANCES\nType,Instance_Type,Instance_Name,Version,Description,Enabled,Max_Instances,Tags,Deployments,Flavor_Name,Memory_Formatted,Memory_Value,Memory_Unit,CPUs,GPUs,Price,Available,Microservice,MachineLearning,IsDefault\n"
        ));
    }

    #[test]
    fn provider_without_plans_gets_placeholder() {
        let redis = AddonProvider { id: "redis".into(), name: "Redis".into(), plans: vec![] };
        let out = render(&[redis], &[]);
        assert!(out.contains("\naddon,redis,Redis,,No plans available,\n"));
    }

    #[test]
    fn plans_sorted_by_slug() {
        let out = render(&providers(), &[]);
        let dev = out.find("addon,postgresql-addon,PostgreSQL,pg_dev,DEV,dev\n").unwrap();
        let xs = out.find("addon,postgresql-addon,PostgreSQL,pg_xs,XS Small Space,xs_sml\n").unwrap();
        assert!(dev < xs);
    }

    #[test]
    fn application_rows_include_disabled_instances() {
        let out = render(&[], &instances());
        assert!(out.contains(
            "application,node,Node.js,20,Node.js runtime,true,40,javascript|runtime,git|docker,nano,256 MB,256,MB,1,0,0.02,true,true,false,true\n"
        ));
        assert!(out.contains(
            "application,node,Node.js,20,Node.js runtime,true,40,javascript|runtime,git|docker,small,512 MB,512,MB,1,0,0.04,true,false,false,false\n"
        ));
        assert!(out.contains("application,php,PHP,8,Legacy PHP,false,10,,,pico,128 MB,128,MB,1,0,0.01,true,false,false,true\n"));
        assert!(out.contains("application,static,Static,1,,true,0,,,,,,,,,,,,,\n"));
    }

    #[test]
    fn flavors_sorted_by_name() {
        let out = render(&[], &instances());
        let xl = out.find(",XL,").unwrap();
        let nano = out.find(",nano,").unwrap();
        let small = out.find(",small,").unwrap();
        assert!(xl < nano && nano < small);
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        let provider = AddonProvider {
            id: "mysql".into(),
            name: "MySQL, managed".into(),
            plans: vec![],
        };
        let out = render(&[provider], &[]);
        assert!(out.contains("addon,mysql,\"MySQL, managed\",,No plans available,\n"));
    }

    #[test]
    fn fields_with_leading_whitespace_are_quoted() {
        let provider = AddonProvider {
            id: "es".into(),
            name: " beta \"search\"".into(),
            plans: vec![],
        };
        let out = render(&[provider], &[]);
        assert!(out.contains("addon,es,\" beta \"\"search\"\"\",,No plans available,\n"));
    }

    #[test]
    fn sink_failure_is_an_io_error() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }
        let err = CsvFormatter.format(&providers(), &instances(), &mut Closed).unwrap_err();
        assert!(matches!(err, RenderError::Io(_)));
    }
}
