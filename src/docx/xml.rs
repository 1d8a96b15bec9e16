//! WordprocessingML serialization.
//!
//! A minimal tag writer over a string buffer. Elements open lazily: the
//! opening tag stays pending until the first child, text, or end call, so an
//! element with no content collapses to the self-closing form.

use crate::geometry::{PageGeometry, ParagraphGeometry};
use crate::model::node::{
    DrawingRef, Paragraph, ParagraphProps, Run, RunContent, RunProps,
};

const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_WP: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_PIC: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";

/// Buffer-backed XML writer.
pub(crate) struct XmlWriter {
    buf: String,
    tag_open: bool,
}

impl XmlWriter {
    pub(crate) fn new() -> Self {
        Self {
            buf: String::from("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\r\n"),
            tag_open: false,
        }
    }

    fn close_pending(&mut self) {
        if self.tag_open {
            self.buf.push('>');
            self.tag_open = false;
        }
    }

    /// Open an element; attributes may follow until the next child or end.
    pub(crate) fn start(&mut self, tag: &str) -> &mut Self {
        self.close_pending();
        self.buf.push('<');
        self.buf.push_str(tag);
        self.tag_open = true;
        self
    }

    /// Write an attribute on the currently open tag.
    pub(crate) fn attr(&mut self, name: &str, value: &str) -> &mut Self {
        debug_assert!(self.tag_open, "attribute written outside an open tag");
        self.buf.push(' ');
        self.buf.push_str(name);
        self.buf.push_str("=\"");
        push_escaped(&mut self.buf, value, true);
        self.buf.push('"');
        self
    }

    /// Write escaped character content.
    pub(crate) fn text(&mut self, value: &str) -> &mut Self {
        self.close_pending();
        push_escaped(&mut self.buf, value, false);
        self
    }

    /// Close the element named `tag`; collapses to `<tag/>` when nothing was
    /// written since `start`.
    pub(crate) fn end(&mut self, tag: &str) -> &mut Self {
        if self.tag_open {
            self.buf.push_str("/>");
            self.tag_open = false;
        } else {
            self.buf.push_str("</");
            self.buf.push_str(tag);
            self.buf.push('>');
        }
        self
    }

    /// Empty element with a single `w:val` attribute, the most common
    /// WordprocessingML shape.
    pub(crate) fn val(&mut self, tag: &str, value: &str) -> &mut Self {
        self.start(tag).attr("w:val", value).end(tag)
    }

    /// Empty element with no attributes.
    pub(crate) fn empty(&mut self, tag: &str) -> &mut Self {
        self.start(tag).end(tag)
    }

    pub(crate) fn into_string(mut self) -> String {
        self.close_pending();
        self.buf
    }
}

fn push_escaped(buf: &mut String, value: &str, attribute: bool) {
    for ch in value.chars() {
        match ch {
            '&' => buf.push_str("&amp;"),
            '<' => buf.push_str("&lt;"),
            '>' => buf.push_str("&gt;"),
            '"' if attribute => buf.push_str("&quot;"),
            _ => buf.push(ch),
        }
    }
}

/// Serialize the main document part: the section descriptor first, then the
/// node sequence.
pub(crate) fn document_xml(
    page: &PageGeometry,
    paragraph_geometry: &ParagraphGeometry,
    paragraphs: &[Paragraph],
) -> String {
    let mut w = XmlWriter::new();
    w.start("w:document")
        .attr("xmlns:w", NS_W)
        .attr("xmlns:r", NS_R)
        .attr("xmlns:wp", NS_WP)
        .attr("xmlns:a", NS_A)
        .attr("xmlns:pic", NS_PIC);
    w.start("w:body");

    write_section(&mut w, page, paragraph_geometry);
    for paragraph in paragraphs {
        write_paragraph(&mut w, paragraph);
    }

    w.end("w:body").end("w:document");
    w.into_string()
}

fn write_section(w: &mut XmlWriter, page: &PageGeometry, paragraph_geometry: &ParagraphGeometry) {
    w.start("w:sectPr");
    w.val("w:textDirection", paragraph_geometry.direction.as_str());
    w.start("w:pgSz")
        .attr("w:w", &page.width.to_string())
        .attr("w:h", &page.height.to_string())
        .attr("w:orient", page.orientation.as_str())
        .end("w:pgSz");
    w.start("w:pgMar")
        .attr("w:top", &page.margin_top.to_string())
        .attr("w:bottom", &page.margin_bottom.to_string())
        .attr("w:left", &page.margin_left.to_string())
        .attr("w:right", &page.margin_right.to_string())
        .attr("w:header", &page.margin_header.to_string())
        .attr("w:footer", &page.margin_footer.to_string())
        .attr("w:gutter", &page.margin_gutter.to_string())
        .end("w:pgMar");
    w.end("w:sectPr");
}

fn write_paragraph(w: &mut XmlWriter, paragraph: &Paragraph) {
    w.start("w:p");
    write_paragraph_props(w, &paragraph.props);
    for run in &paragraph.runs {
        write_run(w, run);
    }
    w.end("w:p");
}

fn write_paragraph_props(w: &mut XmlWriter, props: &ParagraphProps) {
    w.start("w:pPr");
    if props.page_break_before {
        w.empty("w:pageBreakBefore");
    }
    if !props.borders.is_empty() {
        w.start("w:pBdr");
        for border in &props.borders {
            let tag = border.edge.tag();
            w.start(tag)
                .attr("w:val", "single")
                .attr("w:sz", &border.size.to_string())
                .attr("w:space", &border.space.to_string())
                .attr("w:color", &border.color)
                .end(tag);
        }
        w.end("w:pBdr");
    }
    if let Some(fill) = &props.shading {
        w.start("w:shd")
            .attr("w:val", "clear")
            .attr("w:color", "auto")
            .attr("w:fill", fill)
            .end("w:shd");
    }
    if props.kinsoku {
        w.empty("w:kinsoku");
    }
    if let Some(spacing) = &props.spacing {
        w.start("w:spacing");
        if let Some(before) = &spacing.before {
            w.attr("w:before", before);
        }
        if let Some(after) = &spacing.after {
            w.attr("w:after", after);
        }
        if let Some(line) = &spacing.line {
            w.attr("w:line", line);
        }
        if let Some(rule) = &spacing.rule {
            w.attr("w:lineRule", rule.as_str());
        }
        w.end("w:spacing");
    }
    if let Some(indent) = &props.indent {
        w.start("w:ind");
        if let Some(left) = &indent.left {
            w.attr("w:left", left);
        }
        if let Some(first_line) = &indent.first_line {
            w.attr("w:firstLine", first_line);
        }
        if let Some(hanging) = &indent.hanging {
            w.attr("w:hanging", hanging);
        }
        w.end("w:ind");
    }
    if let Some(justification) = &props.justification {
        w.val("w:jc", justification.as_str());
    }
    if let Some(direction) = &props.direction {
        w.val("w:textDirection", direction.as_str());
    }
    if let Some(level) = props.outline_level {
        w.val("w:outlineLvl", &level.to_string());
    }
    w.end("w:pPr");
}

fn write_run(w: &mut XmlWriter, run: &Run) {
    w.start("w:r");
    write_run_props(w, &run.props);
    for content in &run.content {
        match content {
            RunContent::Text(text) => {
                w.start("w:t").attr("xml:space", "preserve").text(text).end("w:t");
            }
            RunContent::Break(kind) => match kind {
                crate::model::node::BreakKind::Line => {
                    w.empty("w:br");
                }
                crate::model::node::BreakKind::Page => {
                    w.start("w:br").attr("w:type", "page").end("w:br");
                }
            },
            RunContent::InstrText(instr) => {
                w.start("w:instrText")
                    .attr("xml:space", "preserve")
                    .text(instr)
                    .end("w:instrText");
            }
            RunContent::FieldChar(kind) => {
                w.start("w:fldChar")
                    .attr("w:fldCharType", kind.as_str())
                    .end("w:fldChar");
            }
            RunContent::Drawing(drawing) => write_drawing(w, drawing),
        }
    }
    w.end("w:r");
}

fn write_run_props(w: &mut XmlWriter, props: &RunProps) {
    if props.is_default() {
        return;
    }
    w.start("w:rPr");
    if let Some(fonts) = &props.fonts {
        w.start("w:rFonts")
            .attr("w:ascii", &fonts.ascii)
            .attr("w:eastAsia", &fonts.east_asia)
            .end("w:rFonts");
    }
    if props.bold {
        w.empty("w:b");
    }
    if props.italic {
        w.empty("w:i");
    }
    if let Some(color) = &props.color {
        w.val("w:color", color);
    }
    if let Some(size) = props.size {
        w.val("w:sz", &size.to_string());
    }
    w.end("w:rPr");
}

/// Inline image drawing referencing an embedded media part.
fn write_drawing(w: &mut XmlWriter, drawing: &DrawingRef) {
    let cx = drawing.width_emu.to_string();
    let cy = drawing.height_emu.to_string();

    w.start("w:drawing");
    w.start("wp:inline")
        .attr("distT", "0")
        .attr("distB", "0")
        .attr("distL", "0")
        .attr("distR", "0");
    w.start("wp:extent").attr("cx", &cx).attr("cy", &cy).end("wp:extent");
    w.start("wp:effectExtent")
        .attr("l", "0")
        .attr("t", "0")
        .attr("r", "0")
        .attr("b", "0")
        .end("wp:effectExtent");
    w.start("wp:docPr")
        .attr("id", "1")
        .attr("name", "Cover Image")
        .end("wp:docPr");
    w.start("wp:cNvGraphicFramePr");
    w.start("a:graphicFrameLocks")
        .attr("xmlns:a", NS_A)
        .attr("noChangeAspect", "1")
        .end("a:graphicFrameLocks");
    w.end("wp:cNvGraphicFramePr");
    w.start("a:graphic").attr("xmlns:a", NS_A);
    w.start("a:graphicData").attr("uri", NS_PIC);
    w.start("pic:pic").attr("xmlns:pic", NS_PIC);
    w.start("pic:nvPicPr");
    w.start("pic:cNvPr").attr("id", "0").attr("name", "cover").end("pic:cNvPr");
    w.empty("pic:cNvPicPr");
    w.end("pic:nvPicPr");
    w.start("pic:blipFill");
    w.start("a:blip").attr("r:embed", &drawing.relationship_id).end("a:blip");
    w.start("a:stretch");
    w.empty("a:fillRect");
    w.end("a:stretch");
    w.end("pic:blipFill");
    w.start("pic:spPr");
    w.start("a:xfrm");
    w.start("a:off").attr("x", "0").attr("y", "0").end("a:off");
    w.start("a:ext").attr("cx", &cx).attr("cy", &cy).end("a:ext");
    w.end("a:xfrm");
    w.start("a:prstGeom").attr("prst", "rect");
    w.empty("a:avLst");
    w.end("a:prstGeom");
    w.end("pic:spPr");
    w.end("pic:pic");
    w.end("a:graphicData");
    w.end("a:graphic");
    w.end("wp:inline");
    w.end("w:drawing");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::WritingMode;
    use crate::model::node::{BreakKind, FieldCharKind, Justification, Spacing};

    fn writer_output(build: impl FnOnce(&mut XmlWriter)) -> String {
        let mut w = XmlWriter::new();
        build(&mut w);
        w.into_string()
    }

    #[test]
    fn test_self_closing_empty_element() {
        let out = writer_output(|w| {
            w.empty("w:kinsoku");
        });
        assert!(out.ends_with("<w:kinsoku/>"));
    }

    #[test]
    fn test_nested_elements_close_in_order() {
        let out = writer_output(|w| {
            w.start("w:p");
            w.start("w:r");
            w.start("w:t").text("hi").end("w:t");
            w.end("w:r");
            w.end("w:p");
        });
        assert!(out.ends_with("<w:p><w:r><w:t>hi</w:t></w:r></w:p>"));
    }

    #[test]
    fn test_text_escaping() {
        let out = writer_output(|w| {
            w.start("w:t").text("a < b && c > \"d\"").end("w:t");
        });
        assert!(out.contains("a &lt; b &amp;&amp; c &gt; \"d\""));
    }

    #[test]
    fn test_attribute_escaping() {
        let out = writer_output(|w| {
            w.start("w:x").attr("w:val", "a\"<&>").end("w:x");
        });
        assert!(out.contains("w:val=\"a&quot;&lt;&amp;&gt;\""));
    }

    #[test]
    fn test_document_xml_section_comes_first() {
        let page = WritingMode::Horizontal.page_geometry();
        let para_geo = WritingMode::Horizontal.paragraph_geometry();
        let xml = document_xml(&page, &para_geo, &[]);

        assert!(xml.contains("<w:body><w:sectPr>"));
        assert!(xml.contains("<w:pgSz w:w=\"8646\" w:h=\"12950\" w:orient=\"portrait\"/>"));
        assert!(xml.contains(
            "<w:pgMar w:top=\"1134\" w:bottom=\"1134\" w:left=\"1417\" w:right=\"1417\" \
             w:header=\"708\" w:footer=\"708\" w:gutter=\"0\"/>"
        ));
        assert!(xml.contains("<w:textDirection w:val=\"lrTb\"/>"));
    }

    #[test]
    fn test_paragraph_serialization() {
        let para_geo = WritingMode::Vertical.paragraph_geometry();
        let mut props = ParagraphProps::base(para_geo.direction, para_geo.kinsoku);
        props.justification = Some(Justification::Center);
        props.spacing = Some(Spacing::before_after("240", "120"));
        let mut paragraph = Paragraph::new(props);
        paragraph.add_run(Run::text(RunProps::new(32, "000000").with_bold(true), "Title"));

        let page = WritingMode::Vertical.page_geometry();
        let xml = document_xml(&page, &para_geo, &[paragraph]);

        assert!(xml.contains("<w:kinsoku/>"));
        assert!(xml.contains("<w:spacing w:before=\"240\" w:after=\"120\"/>"));
        assert!(xml.contains("<w:jc w:val=\"center\"/>"));
        assert!(xml.contains("<w:b/>"));
        assert!(xml.contains("<w:sz w:val=\"32\"/>"));
        assert!(xml.contains("<w:t xml:space=\"preserve\">Title</w:t>"));
    }

    #[test]
    fn test_field_char_and_break_serialization() {
        let para_geo = WritingMode::Horizontal.paragraph_geometry();
        let mut paragraph = Paragraph::new(ParagraphProps::base(para_geo.direction, false));
        paragraph.add_run(Run::with_content(
            RunProps::default(),
            vec![RunContent::FieldChar(FieldCharKind::Begin)],
        ));
        paragraph.add_run(Run::with_content(
            RunProps::default(),
            vec![RunContent::InstrText(" TOC \\o \"1-3\" \\h \\z \\u ".into())],
        ));
        paragraph.add_run(Run::with_content(
            RunProps::default(),
            vec![RunContent::Break(BreakKind::Page)],
        ));

        let page = WritingMode::Horizontal.page_geometry();
        let xml = document_xml(&page, &para_geo, &[paragraph]);

        assert!(xml.contains("<w:fldChar w:fldCharType=\"begin\"/>"));
        assert!(xml.contains("<w:instrText xml:space=\"preserve\"> TOC \\o \"1-3\" \\h \\z \\u </w:instrText>"));
        assert!(xml.contains("<w:br w:type=\"page\"/>"));
    }

    #[test]
    fn test_drawing_serialization() {
        let para_geo = WritingMode::Horizontal.paragraph_geometry();
        let mut paragraph = Paragraph::new(ParagraphProps::base(para_geo.direction, false));
        paragraph.add_run(Run::with_content(
            RunProps::default(),
            vec![RunContent::Drawing(DrawingRef {
                relationship_id: "rId1".into(),
                width_emu: 914_400,
                height_emu: 457_200,
            })],
        ));

        let page = WritingMode::Horizontal.page_geometry();
        let xml = document_xml(&page, &para_geo, &[paragraph]);

        assert!(xml.contains("<wp:extent cx=\"914400\" cy=\"457200\"/>"));
        assert!(xml.contains("<a:blip r:embed=\"rId1\"/>"));
        assert!(xml.contains("<a:ext cx=\"914400\" cy=\"457200\"/>"));
        assert!(xml.contains("prst=\"rect\""));
    }
}
