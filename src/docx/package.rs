//! OPC package assembly.
//!
//! A DOCX file is a zip container with a content-type manifest, relationship
//! parts, the main document part, embedded media, and document properties.
//! Everything here is written in one pass on save.

use crate::error::Result;
use crate::geometry::{PageGeometry, ParagraphGeometry};
use crate::model::node::Paragraph;
use chrono::{SecondsFormat, Utc};
use std::io::{Seek, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::xml::{self, XmlWriter};

const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const NS_RELATIONSHIPS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_CORE_PROPS: &str =
    "http://schemas.openxmlformats.org/package/2006/metadata/core-properties";
const NS_EXTENDED_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties";
const NS_DC: &str = "http://purl.org/dc/elements/1.1/";
const NS_DCTERMS: &str = "http://purl.org/dc/terms/";
const NS_XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE_PROPS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_EXTENDED_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
const REL_IMAGE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

const CT_DOCUMENT: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
const CT_CORE_PROPS: &str = "application/vnd.openxmlformats-package.core-properties+xml";
const CT_EXTENDED_PROPS: &str =
    "application/vnd.openxmlformats-officedocument.extended-properties+xml";
const CT_RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";

/// An embedded media part plus the relationship that references it.
#[derive(Debug, Clone)]
pub(crate) struct MediaEntry {
    /// Part name relative to `word/` (e.g. `media/image1.png`).
    pub name: String,
    /// Canonical extension of the part name.
    pub extension: &'static str,
    /// MIME content type registered in the manifest.
    pub content_type: &'static str,
    /// Relationship id referenced by the drawing node.
    pub relationship_id: String,
    /// Raw file bytes.
    pub data: Vec<u8>,
}

/// Serialize the whole package into `sink`.
pub(crate) fn write_package<W: Write + Seek>(
    sink: W,
    page: &PageGeometry,
    paragraph_geometry: &ParagraphGeometry,
    paragraphs: &[Paragraph],
    media: &[MediaEntry],
) -> Result<()> {
    let mut archive = ZipWriter::new(sink);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    archive.start_file("[Content_Types].xml", options)?;
    archive.write_all(content_types_xml(media).as_bytes())?;

    archive.start_file("_rels/.rels", options)?;
    archive.write_all(root_relationships_xml().as_bytes())?;

    archive.start_file("word/document.xml", options)?;
    archive.write_all(xml::document_xml(page, paragraph_geometry, paragraphs).as_bytes())?;

    archive.start_file("word/_rels/document.xml.rels", options)?;
    archive.write_all(document_relationships_xml(media).as_bytes())?;

    for entry in media {
        archive.start_file(format!("word/{}", entry.name), options)?;
        archive.write_all(&entry.data)?;
    }

    archive.start_file("docProps/core.xml", options)?;
    archive.write_all(core_properties_xml().as_bytes())?;

    archive.start_file("docProps/app.xml", options)?;
    archive.write_all(app_properties_xml().as_bytes())?;

    archive.finish()?;
    Ok(())
}

fn content_types_xml(media: &[MediaEntry]) -> String {
    let mut w = XmlWriter::new();
    w.start("Types").attr("xmlns", NS_CONTENT_TYPES);

    w.start("Default")
        .attr("Extension", "rels")
        .attr("ContentType", CT_RELATIONSHIPS)
        .end("Default");
    w.start("Default")
        .attr("Extension", "xml")
        .attr("ContentType", "application/xml")
        .end("Default");

    // One default per distinct embedded media extension.
    let mut seen: Vec<&str> = Vec::new();
    for entry in media {
        if seen.contains(&entry.extension) {
            continue;
        }
        seen.push(entry.extension);
        w.start("Default")
            .attr("Extension", entry.extension)
            .attr("ContentType", entry.content_type)
            .end("Default");
    }

    w.start("Override")
        .attr("PartName", "/word/document.xml")
        .attr("ContentType", CT_DOCUMENT)
        .end("Override");
    w.start("Override")
        .attr("PartName", "/docProps/core.xml")
        .attr("ContentType", CT_CORE_PROPS)
        .end("Override");
    w.start("Override")
        .attr("PartName", "/docProps/app.xml")
        .attr("ContentType", CT_EXTENDED_PROPS)
        .end("Override");

    w.end("Types");
    w.into_string()
}

fn root_relationships_xml() -> String {
    let mut w = XmlWriter::new();
    w.start("Relationships").attr("xmlns", NS_RELATIONSHIPS);
    relationship(&mut w, "rId1", REL_OFFICE_DOCUMENT, "word/document.xml");
    relationship(&mut w, "rId2", REL_CORE_PROPS, "docProps/core.xml");
    relationship(&mut w, "rId3", REL_EXTENDED_PROPS, "docProps/app.xml");
    w.end("Relationships");
    w.into_string()
}

fn document_relationships_xml(media: &[MediaEntry]) -> String {
    let mut w = XmlWriter::new();
    w.start("Relationships").attr("xmlns", NS_RELATIONSHIPS);
    for entry in media {
        relationship(&mut w, &entry.relationship_id, REL_IMAGE, &entry.name);
    }
    w.end("Relationships");
    w.into_string()
}

fn relationship(w: &mut XmlWriter, id: &str, rel_type: &str, target: &str) {
    w.start("Relationship")
        .attr("Id", id)
        .attr("Type", rel_type)
        .attr("Target", target)
        .end("Relationship");
}

fn core_properties_xml() -> String {
    let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

    let mut w = XmlWriter::new();
    w.start("cp:coreProperties")
        .attr("xmlns:cp", NS_CORE_PROPS)
        .attr("xmlns:dc", NS_DC)
        .attr("xmlns:dcterms", NS_DCTERMS)
        .attr("xmlns:xsi", NS_XSI);
    w.start("dcterms:created")
        .attr("xsi:type", "dcterms:W3CDTF")
        .text(&stamp)
        .end("dcterms:created");
    w.start("dcterms:modified")
        .attr("xsi:type", "dcterms:W3CDTF")
        .text(&stamp)
        .end("dcterms:modified");
    w.end("cp:coreProperties");
    w.into_string()
}

fn app_properties_xml() -> String {
    let mut w = XmlWriter::new();
    w.start("Properties").attr("xmlns", NS_EXTENDED_PROPS);
    w.start("Application").text("mkdocx").end("Application");
    w.end("Properties");
    w.into_string()
}
