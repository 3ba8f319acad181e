//! DOCX (WordprocessingML) rendering of a layout plan.
//!
//! Each classified line becomes one paragraph. Paragraph spacing is given
//! in twentieths of a point, run sizes in half-points.

use std::io::{Cursor, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::error::{Error, Result};
use crate::model::{LayoutPlan, LineRole};

use super::cleanup::{docx_safe_text, strip_xml_invalid};
use super::options::RenderOptions;
use super::result::{LayoutStats, RenderedDocument};

const WORD_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Twips per millimetre.
const TWIPS_PER_MM: f32 = 1440.0 / 25.4;

/// Bullet list numbering instance.
const BULLET_NUM_ID: &str = "1";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/></Relationships>"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Arial" w:hAnsi="Arial" w:cs="Arial"/><w:sz w:val="20"/><w:szCs w:val="20"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="0" w:line="240" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style><w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:rPr><w:b/><w:sz w:val="36"/><w:szCs w:val="36"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:pBdr><w:bottom w:val="single" w:sz="4" w:space="1" w:color="C8C8C8"/></w:pBdr><w:outlineLvl w:val="0"/></w:pPr><w:rPr><w:b/><w:sz w:val="26"/><w:szCs w:val="26"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="ListParagraph"><w:name w:val="List Paragraph"/><w:basedOn w:val="Normal"/><w:qFormat/><w:pPr><w:ind w:left="720"/></w:pPr></w:style></w:styles>"#;

const NUMBERING_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:abstractNum w:abstractNumId="0"><w:multiLevelType w:val="singleLevel"/><w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="•"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:lvl></w:abstractNum><w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num></w:numbering>"#;

/// Paragraph formatting for one role.
struct ParagraphFormat {
    style: Option<&'static str>,
    centered: bool,
    before: u32,
    after: u32,
    bold: bool,
    size_half_points: Option<u32>,
    bullet: bool,
}

impl ParagraphFormat {
    fn for_role(role: LineRole) -> Self {
        let plain = ParagraphFormat {
            style: None,
            centered: false,
            before: 0,
            after: 100,
            bold: false,
            size_half_points: None,
            bullet: false,
        };
        match role {
            LineRole::Name => ParagraphFormat {
                style: Some("Title"),
                centered: true,
                ..plain
            },
            LineRole::JobTitleHeading => ParagraphFormat {
                centered: true,
                bold: true,
                size_half_points: Some(24),
                ..plain
            },
            LineRole::ContactInfo => ParagraphFormat {
                centered: true,
                after: 200,
                ..plain
            },
            LineRole::SectionHeader => ParagraphFormat {
                style: Some("Heading1"),
                before: 200,
                ..plain
            },
            LineRole::ExperienceEntryHeading => ParagraphFormat {
                before: 100,
                after: 50,
                bold: true,
                ..plain
            },
            LineRole::Bullet => ParagraphFormat {
                style: Some("ListParagraph"),
                after: 50,
                bullet: true,
                ..plain
            },
            LineRole::Body => plain,
        }
    }

    fn write_paragraph(&self, xml: &mut XmlWriter, text: &str) -> Result<()> {
        xml.start("w:p", &[])?;
        xml.start("w:pPr", &[])?;
        if let Some(style) = self.style {
            xml.empty("w:pStyle", &[("w:val", style)])?;
        }
        if self.bullet {
            xml.start("w:numPr", &[])?;
            xml.empty("w:ilvl", &[("w:val", "0")])?;
            xml.empty("w:numId", &[("w:val", BULLET_NUM_ID)])?;
            xml.end("w:numPr")?;
        }
        let before = self.before.to_string();
        let after = self.after.to_string();
        xml.empty(
            "w:spacing",
            &[("w:before", before.as_str()), ("w:after", after.as_str())],
        )?;
        if self.centered {
            xml.empty("w:jc", &[("w:val", "center")])?;
        }
        xml.end("w:pPr")?;

        xml.start("w:r", &[])?;
        if self.bold || self.size_half_points.is_some() {
            xml.start("w:rPr", &[])?;
            if self.bold {
                xml.empty("w:b", &[])?;
            }
            if let Some(size) = self.size_half_points {
                let size = size.to_string();
                xml.empty("w:sz", &[("w:val", size.as_str())])?;
                xml.empty("w:szCs", &[("w:val", size.as_str())])?;
            }
            xml.end("w:rPr")?;
        }
        xml.start("w:t", &[("xml:space", "preserve")])?;
        xml.text(text)?;
        xml.end("w:t")?;
        xml.end("w:r")?;
        xml.end("w:p")
    }
}

/// Event writer for one OOXML part.
struct XmlWriter {
    writer: Writer<Vec<u8>>,
}

impl XmlWriter {
    fn new() -> Result<Self> {
        let mut xml = Self {
            writer: Writer::new(Vec::new()),
        };
        xml.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(xml)
    }

    fn start<'a>(&mut self, name: &'a str, attributes: &[(&'a str, &'a str)]) -> Result<()> {
        let element = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.write(Event::Start(element))
    }

    fn empty<'a>(&mut self, name: &'a str, attributes: &[(&'a str, &'a str)]) -> Result<()> {
        let element = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.write(Event::Empty(element))
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    fn text(&mut self, text: &str) -> Result<()> {
        self.write(Event::Text(BytesText::new(text)))
    }

    fn write(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| Error::Render(format!("DOCX XML: {}", e)))
    }

    fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

/// Render a layout plan as a DOCX package.
pub fn to_docx(plan: &LayoutPlan, options: &RenderOptions) -> Result<RenderedDocument> {
    let document_xml = document_xml(plan, options)?;
    let core_xml = core_xml(options.title.as_deref())?;

    let parts: [(&str, &[u8]); 7] = [
        ("[Content_Types].xml", CONTENT_TYPES_XML.as_bytes()),
        ("_rels/.rels", PACKAGE_RELS_XML.as_bytes()),
        ("docProps/core.xml", &core_xml),
        ("word/document.xml", &document_xml),
        ("word/styles.xml", STYLES_XML.as_bytes()),
        ("word/numbering.xml", NUMBERING_XML.as_bytes()),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML.as_bytes()),
    ];

    // Fixed timestamps keep the archive byte-identical across runs.
    let file_options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in parts {
        zip.start_file(name, file_options)?;
        zip.write_all(data)?;
    }
    let bytes = zip.finish()?.into_inner();

    log::debug!("Rendered DOCX ({} bytes)", bytes.len());
    Ok(RenderedDocument::new(bytes, LayoutStats::from_plan(plan)))
}

fn document_xml(plan: &LayoutPlan, options: &RenderOptions) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start("w:document", &[("xmlns:w", WORD_NS)])?;
    xml.start("w:body", &[])?;

    for line in plan {
        let text = strip_xml_invalid(&docx_safe_text(&line.text));
        if text.is_empty() {
            continue;
        }
        ParagraphFormat::for_role(line.role).write_paragraph(&mut xml, &text)?;
    }

    let (width_mm, height_mm) = options.page_size.dimensions_mm();
    let width = to_twips(width_mm).to_string();
    let height = to_twips(height_mm).to_string();
    let margin = to_twips(options.margin_mm).to_string();
    let margin = margin.as_str();
    xml.start("w:sectPr", &[])?;
    xml.empty("w:pgSz", &[("w:w", width.as_str()), ("w:h", height.as_str())])?;
    xml.empty(
        "w:pgMar",
        &[
            ("w:top", margin),
            ("w:right", margin),
            ("w:bottom", margin),
            ("w:left", margin),
            ("w:header", "708"),
            ("w:footer", "708"),
            ("w:gutter", "0"),
        ],
    )?;
    xml.end("w:sectPr")?;

    xml.end("w:body")?;
    xml.end("w:document")?;
    Ok(xml.finish())
}

fn core_xml(title: Option<&str>) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start(
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
        ],
    )?;
    if let Some(title) = title {
        xml.start("dc:title", &[])?;
        xml.text(&strip_xml_invalid(title))?;
        xml.end("dc:title")?;
    }
    xml.start("dc:creator", &[])?;
    xml.text("resumind")?;
    xml.end("dc:creator")?;
    xml.end("cp:coreProperties")?;
    Ok(xml.finish())
}

fn to_twips(mm: f32) -> u32 {
    (mm * TWIPS_PER_MM).round() as u32
}
