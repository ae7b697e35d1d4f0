use std::io::Write;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

use super::{Formatter, GENERATED_NOTE, REPORT_TITLE};
use crate::error::RenderError;
use crate::models::{AddonProvider, ProductInstance};
use crate::utils::{format_price, sorted_flavors, sorted_plans, truncate, yes_no};

// A4 portrait, in millimetres.
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 10.0;
const BOTTOM_MARGIN: f32 = 20.0;
const CELL_PADDING: f32 = 1.0;
const FULL_WIDTH: f32 = 190.0;
const PT_PER_MM: f32 = 72.0 / 25.4;

const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

/// Paginated A4 document using the standard Helvetica faces.
pub struct PdfFormatter;

impl Formatter for PdfFormatter {
    fn format_name(&self) -> &'static str {
        "pdf"
    }

    fn format(
        &self,
        providers: &[AddonProvider],
        instances: &[ProductInstance],
        writer: &mut dyn Write,
    ) -> Result<(), RenderError> {
        let pages = layout(providers, instances);
        let bytes = assemble(pages)?;
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Weight {
    Regular,
    Bold,
}

/// Cursor-based page builder: cells are placed left to right, `ln` moves to
/// the start of the next line, and a cell that would cross the bottom margin
/// starts a new page.
struct PageLayout {
    pages: Vec<Vec<Operation>>,
    x: f32,
    y: f32,
    weight: Weight,
    size: f32,
}

impl PageLayout {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            x: MARGIN,
            y: MARGIN,
            weight: Weight::Regular,
            size: 10.0,
        }
    }

    fn add_page(&mut self) {
        self.pages.push(Vec::new());
        self.x = MARGIN;
        self.y = MARGIN;
    }

    fn set_font(&mut self, weight: Weight, size: f32) {
        self.weight = weight;
        self.size = size;
    }

    fn cell(&mut self, width: f32, height: f32, text: &str) {
        if self.pages.is_empty() || self.y + height > PAGE_HEIGHT - BOTTOM_MARGIN {
            let x = self.x;
            self.add_page();
            self.x = x;
        }
        if !text.is_empty() {
            let font = match self.weight {
                Weight::Regular => REGULAR_FONT,
                Weight::Bold => BOLD_FONT,
            };
            // Baseline sits slightly below the vertical centre of the cell.
            let baseline = self.y + height / 2.0 + 0.3 * self.size / PT_PER_MM;
            let tx = (self.x + CELL_PADDING) * PT_PER_MM;
            let ty = (PAGE_HEIGHT - baseline) * PT_PER_MM;
            if let Some(ops) = self.pages.last_mut() {
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new("Tf", vec![font.into(), self.size.into()]));
                ops.push(Operation::new("Td", vec![tx.into(), ty.into()]));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::String(win_ansi(text), StringFormat::Literal)],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
        }
        self.x += width;
    }

    fn ln(&mut self, height: f32) {
        self.x = MARGIN;
        self.y += height;
    }

    fn section_title(&mut self, title: &str) {
        self.set_font(Weight::Bold, 14.0);
        self.cell(FULL_WIDTH, 10.0, title);
        self.ln(12.0);
    }

    fn line(&mut self, text: &str) {
        self.cell(FULL_WIDTH, 6.0, text);
        self.ln(6.0);
    }
}

fn layout(providers: &[AddonProvider], instances: &[ProductInstance]) -> Vec<Vec<Operation>> {
    let mut doc = PageLayout::new();
    doc.add_page();

    doc.set_font(Weight::Bold, 16.0);
    doc.cell(FULL_WIDTH, 10.0, REPORT_TITLE);
    doc.ln(15.0);
    doc.set_font(Weight::Regular, 10.0);
    doc.cell(FULL_WIDTH, 5.0, GENERATED_NOTE);
    doc.ln(10.0);

    summary_tables(&mut doc, providers, instances);

    doc.add_page();
    doc.section_title("Detailed Addon Plans");
    for provider in providers {
        doc.set_font(Weight::Bold, 11.0);
        doc.cell(FULL_WIDTH, 8.0, &format!("{} ({})", provider.name, provider.id));
        doc.ln(8.0);

        doc.set_font(Weight::Regular, 9.0);
        if provider.plans.is_empty() {
            doc.line("  No plans available");
            continue;
        }
        for plan in sorted_plans(provider) {
            let text = format!("  • {} ({}) - ID: {}", plan.name, plan.slug, plan.id);
            doc.line(&truncate(&text, 80));
        }
        doc.ln(4.0);
    }

    doc.add_page();
    doc.section_title("Detailed Application Flavors");
    for instance in instances.iter().filter(|i| i.enabled) {
        doc.set_font(Weight::Bold, 11.0);
        doc.cell(
            FULL_WIDTH,
            8.0,
            &format!("{} ({}) - Version {}", instance.name, instance.kind, instance.version),
        );
        doc.ln(8.0);

        doc.set_font(Weight::Regular, 9.0);
        doc.line(&format!("Description: {}", truncate(&instance.description, 80)));
        doc.line(&format!("Max instances: {}", instance.max_instances));
        doc.line(&format!("Tags: {}", instance.tags.join(", ")));

        if instance.flavors.is_empty() {
            doc.line("  No flavors available");
            continue;
        }

        doc.line("Available flavors:");
        for flavor in sorted_flavors(instance) {
            let marker = if instance.is_default_flavor(&flavor) { " (default)" } else { "" };
            let availability = if flavor.available { "Available" } else { "Unavailable" };
            let features: Vec<&str> = flavor
                .feature_tags()
                .into_iter()
                .filter(|tag| *tag != "Unavailable")
                .collect();
            let features = if features.is_empty() {
                String::new()
            } else {
                format!(" [{}]", features.join(", "))
            };
            let text = format!(
                "  • {}{} - {}, {} CPU, {}/h - {}{}",
                flavor.name,
                marker,
                flavor.memory.formatted,
                flavor.cpus,
                format_price(flavor.price),
                availability,
                features
            );
            doc.line(&truncate(&text, 90));
        }
        doc.ln(6.0);
    }

    doc.pages
}

fn summary_tables(doc: &mut PageLayout, providers: &[AddonProvider], instances: &[ProductInstance]) {
    doc.section_title("Addon Summary");
    doc.set_font(Weight::Bold, 10.0);
    doc.cell(60.0, 8.0, "Provider ID");
    doc.cell(80.0, 8.0, "Name");
    doc.cell(30.0, 8.0, "Plans");
    doc.ln(8.0);

    doc.set_font(Weight::Regular, 9.0);
    for provider in providers {
        doc.cell(60.0, 6.0, &provider.id);
        doc.cell(80.0, 6.0, &truncate(&provider.name, 35));
        doc.cell(30.0, 6.0, &provider.plans.len().to_string());
        doc.ln(6.0);
    }
    doc.ln(10.0);

    doc.section_title("Application Summary");
    doc.set_font(Weight::Bold, 9.0);
    for (width, label) in [
        (25.0, "Type"),
        (45.0, "Name"),
        (20.0, "Version"),
        (20.0, "Enabled"),
        (20.0, "Flavors"),
        (30.0, "Default"),
    ] {
        doc.cell(width, 8.0, label);
    }
    doc.ln(8.0);

    doc.set_font(Weight::Regular, 8.0);
    for instance in instances {
        doc.cell(25.0, 6.0, &truncate(&instance.kind, 12));
        doc.cell(45.0, 6.0, &truncate(&instance.name, 20));
        doc.cell(20.0, 6.0, &truncate(&instance.version, 10));
        doc.cell(20.0, 6.0, yes_no(instance.enabled));
        doc.cell(20.0, 6.0, &instance.flavors.len().to_string());
        doc.cell(30.0, 6.0, &truncate(&instance.default_flavor.name, 15));
        doc.ln(6.0);
    }
}

/// Serialize laid-out pages into a complete PDF file.
fn assemble(pages: Vec<Vec<Operation>>) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(standard_font("Helvetica"));
    let bold_id = doc.add_object(standard_font("Helvetica-Bold"));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR_FONT => regular_id,
            BOLD_FONT => bold_id,
        },
    });

    let media_box: Vec<Object> = vec![
        0.into(),
        0.into(),
        (PAGE_WIDTH * PT_PER_MM).into(),
        (PAGE_HEIGHT * PT_PER_MM).into(),
    ];

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => media_box.clone(),
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

fn standard_font(base: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base.to_string(),
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Encode text for the WinAnsi font encoding. Characters it cannot represent
/// become `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            c if (c as u32) < 0x80 || (0xA0..=0xFF).contains(&(c as u32)) => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatters::test_support::{instances, providers};

    fn shown_text(page: &[Operation]) -> Vec<String> {
        page.iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                // WinAnsi bytes map one-to-one onto Latin-1 code points for these tests.
                Some(Object::String(bytes, _)) => Some(bytes.iter().map(|&b| b as char).collect()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn output_is_a_pdf() {
        let mut buf = Vec::new();
        PdfFormatter.format(&providers(), &instances(), &mut buf).unwrap();
        assert!(buf.starts_with(b"%PDF"));
        assert!(buf.windows(5).any(|w| w == b"%%EOF"));
    }

    #[test]
    fn one_page_per_part() {
        let pages = layout(&providers(), &instances());
        assert_eq!(pages.len(), 3);
        assert!(shown_text(&pages[0]).contains(&"Addon Summary".to_string()));
        assert!(shown_text(&pages[0]).contains(&"Application Summary".to_string()));
        assert_eq!(shown_text(&pages[1])[0], "Detailed Addon Plans");
        assert_eq!(shown_text(&pages[2])[0], "Detailed Application Flavors");
    }

    #[test]
    fn plans_and_flavors_in_order() {
        let pages = layout(&providers(), &instances());
        let plans = shown_text(&pages[1]);
        let dev = plans.iter().position(|t| t.contains("DEV (dev)")).unwrap();
        let xs = plans.iter().position(|t| t.contains("XS Small Space (xs_sml)")).unwrap();
        assert!(dev < xs);
        assert!(plans.contains(&"  No plans available".to_string()));

        let flavors = shown_text(&pages[2]);
        let xl = flavors.iter().position(|t| t.starts_with("  \u{95} XL")).unwrap();
        let nano = flavors.iter().position(|t| t.starts_with("  \u{95} nano (default)")).unwrap();
        assert!(xl < nano);
        assert!(!flavors.iter().any(|t| t.contains("PHP")));
        assert!(flavors.contains(&"  No flavors available".to_string()));
    }

    #[test]
    fn long_text_is_truncated() {
        let mut long = providers();
        long[0].name = "A provider name that is far longer than the summary column".into();
        let pages = layout(&long, &[]);
        let text = shown_text(&pages[0]);
        assert!(text.contains(&"A provider name that is far long...".to_string()));
    }

    #[test]
    fn overflowing_content_continues_on_new_page() {
        let many: Vec<AddonProvider> = (0..60)
            .map(|i| AddonProvider { id: format!("addon-{i:02}"), name: format!("Addon {i}"), plans: vec![] })
            .collect();
        let pages = layout(&many, &[]);
        assert!(pages.len() > 3);
    }

    #[test]
    fn win_ansi_maps_symbols() {
        assert_eq!(win_ansi("0.02€"), b"0.02\x80".to_vec());
        assert_eq!(win_ansi("• é"), vec![0x95, b' ', 0xE9]);
        assert_eq!(win_ansi("日"), b"?".to_vec());
    }

    #[test]
    fn rendering_twice_is_identical() {
        let mut first = Vec::new();
        let mut second = Vec::new();
        PdfFormatter.format(&providers(), &instances(), &mut first).unwrap();
        PdfFormatter.format(&providers(), &instances(), &mut second).unwrap();
        assert_eq!(first, second);
    }
}
