//! PDF rendering of a layout plan.
//!
//! Lines are laid out top-down in millimetres on a fixed page grid and
//! converted to PDF user space (points, origin bottom-left) when the
//! content stream is written. Output is deterministic: no timestamps or
//! random document IDs are embedded.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use crate::error::{Error, Result};
use crate::model::{LayoutPlan, LineRole, LineStyle};

use super::cleanup::pdf_safe_text;
use super::metrics::{Font, PT_PER_MM};
use super::options::RenderOptions;
use super::result::{LayoutStats, RenderedDocument};

/// Producer string written to the document info dictionary.
const PRODUCER: &str = concat!("resumind ", env!("CARGO_PKG_VERSION"));

/// Gap between the bullet glyph and the margin.
const BULLET_GLYPH_OFFSET_MM: f32 = 5.0;

/// Bullet text is wrapped this much narrower than body text.
const BULLET_WRAP_REDUCTION_MM: f32 = 10.0;

/// Divider rule sits this far above the header's cursor position.
const DIVIDER_RISE_MM: f32 = 2.0;

/// Extra advance after a divider rule.
const DIVIDER_ADVANCE_MM: f32 = 3.0;

/// Divider gray level.
const DIVIDER_GRAY: u8 = 200;

/// Divider stroke width in points.
const DIVIDER_WIDTH_PT: f32 = 0.5;

/// Render a layout plan as a PDF document.
pub fn to_pdf(plan: &LayoutPlan, options: &RenderOptions) -> Result<RenderedDocument> {
    let mut writer = PageWriter::new(options);

    for line in plan {
        let text = pdf_safe_text(&line.text);
        let text = text.trim();
        if text.is_empty() {
            log::debug!("Skipping line {} with no printable text", line.position_index);
            continue;
        }
        writer.write_line(line.role, text);
    }

    let pages = writer.finish();
    let page_count = pages.len() as u32;
    let bytes = assemble(pages, options)?;

    log::debug!("Rendered PDF with {} pages ({} bytes)", page_count, bytes.len());
    Ok(RenderedDocument::new(
        bytes,
        LayoutStats::from_plan(plan).with_pages(page_count),
    ))
}

/// Cursor-based line layout producing one operation list per page.
struct PageWriter<'a> {
    options: &'a RenderOptions,
    page_width_mm: f32,
    page_height_mm: f32,
    y_mm: f32,
    seen_header: bool,
    current: Vec<Operation>,
    pages: Vec<Vec<Operation>>,
}

impl<'a> PageWriter<'a> {
    fn new(options: &'a RenderOptions) -> Self {
        let (page_width_mm, page_height_mm) = options.page_size.dimensions_mm();
        Self {
            options,
            page_width_mm,
            page_height_mm,
            y_mm: options.margin_mm,
            seen_header: false,
            current: Vec::new(),
            pages: Vec::new(),
        }
    }

    fn write_line(&mut self, role: LineRole, text: &str) {
        let style = role.style();
        let font = Font::for_weight(style.bold);
        let margin = self.options.margin_mm;

        self.y_mm += style.space_before_mm;
        if style.divider {
            if self.seen_header {
                self.break_page_if_needed();
                self.divider(self.y_mm - DIVIDER_RISE_MM);
                self.y_mm += DIVIDER_ADVANCE_MM;
            }
            self.seen_header = true;
        }

        let mut wrap_width = self.options.text_width_mm();
        if style.bullet {
            wrap_width -= BULLET_WRAP_REDUCTION_MM;
        }
        let wrapped = font.wrap(text, style.font_size, wrap_width.max(1.0));
        let last = wrapped.len().saturating_sub(1);

        for (i, segment) in wrapped.iter().enumerate() {
            self.break_page_if_needed();

            let x = if style.is_centered() {
                (self.page_width_mm - font.measure_mm(segment, style.font_size)) / 2.0
            } else {
                margin + style.indent_mm
            };

            if style.bullet && i == 0 {
                self.text(font, &style, margin + BULLET_GLYPH_OFFSET_MM, "-");
            }
            self.text(font, &style, x, segment);

            self.y_mm += if i == last && style.space_after_mm > 0.0 {
                style.space_after_mm
            } else {
                self.options.line_height_mm
            };
        }
    }

    fn break_page_if_needed(&mut self) {
        if self.y_mm > self.options.page_break_y_mm() {
            let page = std::mem::take(&mut self.current);
            self.pages.push(page);
            self.y_mm = self.options.margin_mm;
        }
    }

    fn to_pdf_x(&self, x_mm: f32) -> f32 {
        x_mm * PT_PER_MM
    }

    fn to_pdf_y(&self, y_mm: f32) -> f32 {
        (self.page_height_mm - y_mm) * PT_PER_MM
    }

    fn text(&mut self, font: Font, style: &LineStyle, x_mm: f32, text: &str) {
        let x = self.to_pdf_x(x_mm);
        let y = self.to_pdf_y(self.y_mm);
        let gray = f32::from(style.gray) / 255.0;

        self.current.extend([
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![font.resource_name().into(), style.font_size.into()],
            ),
            Operation::new("g", vec![gray.into()]),
            Operation::new("Td", vec![x.into(), y.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ]);
    }

    fn divider(&mut self, y_mm: f32) {
        let margin = self.options.margin_mm;
        let y = self.to_pdf_y(y_mm);
        let x1 = self.to_pdf_x(margin);
        let x2 = self.to_pdf_x(self.page_width_mm - margin);
        let gray = f32::from(DIVIDER_GRAY) / 255.0;

        self.current.extend([
            Operation::new("G", vec![gray.into()]),
            Operation::new("w", vec![DIVIDER_WIDTH_PT.into()]),
            Operation::new("m", vec![x1.into(), y.into()]),
            Operation::new("l", vec![x2.into(), y.into()]),
            Operation::new("S", vec![]),
        ]);
    }

    /// Close the last page. An empty plan still yields one blank page.
    fn finish(mut self) -> Vec<Vec<Operation>> {
        if !self.current.is_empty() || self.pages.is_empty() {
            self.pages.push(self.current);
        }
        self.pages
    }
}

/// Build the lopdf object graph and serialise it.
fn assemble(pages: Vec<Vec<Operation>>, options: &RenderOptions) -> Result<Vec<u8>> {
    let (width_mm, height_mm) = options.page_size.dimensions_mm();
    let media_box: Vec<Object> = vec![
        Object::Integer(0),
        Object::Integer(0),
        (width_mm * PT_PER_MM).into(),
        (height_mm * PT_PER_MM).into(),
    ];

    let mut document = Document::with_version("1.7");
    let pages_id = document.new_object_id();

    let font_ids: Vec<(Font, ObjectId)> = [Font::Helvetica, Font::HelveticaBold]
        .into_iter()
        .map(|font| {
            let id = document.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            (font, id)
        })
        .collect();

    let mut font_dict = lopdf::Dictionary::new();
    for (font, id) in &font_ids {
        font_dict.set(font.resource_name(), *id);
    }
    let resources_id = document.add_object(dictionary! { "Font" => font_dict });

    let mut page_ids = Vec::with_capacity(pages.len());
    for operations in pages {
        let encoded = Content { operations }
            .encode()
            .map_err(|e| Error::Render(format!("content stream: {}", e)))?;

        let stream = if options.compress {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(&encoded)?;
            Stream::new(dictionary! { "Filter" => "FlateDecode" }, encoder.finish()?)
        } else {
            Stream::new(lopdf::Dictionary::new(), encoded)
        };
        let content_id = document.add_object(stream);

        let page_id = document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => media_box.clone(),
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        page_ids.push(page_id);
    }

    let count = page_ids.len() as i64;
    let kids: Vec<Object> = page_ids.into_iter().map(Object::from).collect();
    document.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = document.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    document.trailer.set("Root", catalog_id);

    let mut info = dictionary! { "Producer" => Object::string_literal(PRODUCER) };
    if let Some(title) = &options.title {
        info.set("Title", Object::string_literal(pdf_safe_text(title)));
    }
    let info_id = document.add_object(info);
    document.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    document.save_to(&mut bytes)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::classify;
    use crate::render::PageSize;

    const RESUME: &str = "Jane Doe\nBackend Engineer\njane@x.com | 555-123-4567\nSUMMARY\nBuilds reliable systems.\nEXPERIENCE\nAcme Corp | Lead Dev\n- Shipped the billing platform";

    /// Decoded content operations of every page, in page order.
    fn operations(bytes: &[u8]) -> Vec<Operation> {
        let doc = Document::load_mem(bytes).unwrap();
        doc.get_pages()
            .into_values()
            .flat_map(|page_id| {
                let data = doc.get_page_content(page_id).unwrap();
                Content::decode(&data).unwrap().operations
            })
            .collect()
    }

    fn shown_text(ops: &[Operation]) -> Vec<String> {
        ops.iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(String::from_utf8_lossy(bytes).into_owned()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_pdf_header_and_pages() {
        let rendered = to_pdf(&classify(RESUME), &RenderOptions::default()).unwrap();
        assert!(rendered.bytes.starts_with(b"%PDF-1.7"));
        assert_eq!(rendered.stats.page_count, 1);
        assert_eq!(rendered.stats.section_count, 2);

        let doc = Document::load_mem(&rendered.bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_pdf_is_deterministic() {
        let plan = classify(RESUME);
        let a = to_pdf(&plan, &RenderOptions::default()).unwrap();
        let b = to_pdf(&plan, &RenderOptions::default()).unwrap();
        assert_eq!(a.bytes, b.bytes);
    }

    #[test]
    fn test_content_contains_text_and_divider() {
        let rendered = to_pdf(&classify(RESUME), &RenderOptions::default()).unwrap();
        let ops = operations(&rendered.bytes);
        let text = shown_text(&ops);

        assert_eq!(text[0], "Jane Doe");
        assert!(text.contains(&"Shipped the billing platform".to_string()));
        assert!(text.contains(&"-".to_string()));
        // Only the second section header gets a divider.
        assert_eq!(ops.iter().filter(|op| op.operator == "l").count(), 1);
    }

    #[test]
    fn test_uncompressed_stream_is_readable() {
        let options = RenderOptions::default().with_compression(false);
        let rendered = to_pdf(&classify(RESUME), &options).unwrap();
        let raw = String::from_utf8_lossy(&rendered.bytes);
        assert!(raw.contains("(Jane Doe) Tj"));
        assert!(!raw.contains("FlateDecode"));
    }

    #[test]
    fn test_long_resume_breaks_pages() {
        let mut text = String::from("Jane Doe\nEngineer\njane@x.com\nEXPERIENCE\n");
        for i in 0..120 {
            text.push_str(&format!("- Delivered project number {}\n", i));
        }
        let rendered = to_pdf(&classify(&text), &RenderOptions::default()).unwrap();
        assert!(rendered.stats.page_count >= 3);

        let doc = Document::load_mem(&rendered.bytes).unwrap();
        assert_eq!(doc.get_pages().len() as u32, rendered.stats.page_count);
        assert_eq!(shown_text(&operations(&rendered.bytes)).len(), 3 + 1 + 240);
    }

    #[test]
    fn test_letter_media_box() {
        let options = RenderOptions::default().with_page_size(PageSize::Letter);
        let rendered = to_pdf(&classify(RESUME), &options).unwrap();
        let doc = Document::load_mem(&rendered.bytes).unwrap();
        let page_id = *doc.get_pages().values().next().unwrap();
        let media_box = doc
            .get_dictionary(page_id)
            .unwrap()
            .get(b"MediaBox")
            .unwrap()
            .as_array()
            .unwrap()
            .clone();
        let width = media_box[2].as_float().unwrap();
        assert!((width - 612.0).abs() < 0.5);
    }

    #[test]
    fn test_empty_plan_renders_blank_page() {
        let rendered = to_pdf(&LayoutPlan::new(), &RenderOptions::default()).unwrap();
        let doc = Document::load_mem(&rendered.bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_unprintable_lines_are_skipped() {
        let rendered = to_pdf(&classify("Jane Doe\nEngineer\n東京"), &RenderOptions::default()).unwrap();
        let text = shown_text(&operations(&rendered.bytes));
        assert_eq!(text, vec!["Jane Doe", "Engineer"]);
    }
}
