//! Stateful DOCX assembly engine.
//!
//! The builder is constructed with an output sink and a writing mode, grows
//! an append-only paragraph sequence through its add operations, and
//! serializes the package exactly once on save. Single-threaded and
//! non-reentrant; one builder exclusively owns one document. A failed add
//! operation leaves previously appended nodes in place — callers wanting an
//! atomic artifact discard the whole output on any failure.

use crate::error::{Error, Result};
use crate::geometry::{PageGeometry, ParagraphGeometry, WritingMode};
use crate::image;
use crate::model::node::{
    Border, BorderEdge, BreakKind, DrawingRef, FieldCharKind, Indent, Justification, LineRule,
    Paragraph, ParagraphProps, Run, RunContent, RunProps, Spacing,
};
use crate::model::style::{
    BorderExtent, CodeBlockStyle, HeadingStyle, ListStyle, ParagraphStyle, QuoteStyle,
    TableOfContentsStyle, TitlePageStyle,
};
use crate::model::ListItem;
use log::debug;
use std::fs::{self, File};
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use super::package::{self, MediaEntry};

/// EMU per inch, and the DPI assumed when converting pixel dimensions.
const EMU_PER_INCH: i64 = 914_400;
const ASSUMED_DPI: i64 = 96;

/// EMU per twip (914400 / 1440).
const EMU_PER_TWIP: i64 = 635;

/// Marker prefix for unordered list items.
const BULLET: &str = "\u{2022} ";

/// Border color applied when a heading style carries none.
const DEFAULT_BORDER_COLOR: &str = "3498db";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Open,
    Saved,
    Disposed,
}

/// Append-only DOCX document builder.
///
/// # Example
///
/// ```no_run
/// use mkdocx::docx::DocxBuilder;
/// use mkdocx::geometry::WritingMode;
///
/// let mut builder = DocxBuilder::create("out.docx", WritingMode::Horizontal)?;
/// builder.add_thematic_break()?;
/// builder.save()?;
/// builder.dispose();
/// # Ok::<(), mkdocx::Error>(())
/// ```
pub struct DocxBuilder<W: Write + Seek> {
    sink: Option<W>,
    state: State,
    mode: WritingMode,
    page: PageGeometry,
    paragraph_geometry: ParagraphGeometry,
    paragraphs: Vec<Paragraph>,
    media: Vec<MediaEntry>,
}

impl DocxBuilder<BufWriter<File>> {
    /// Create a builder writing to a new file at `path`.
    pub fn create<P: AsRef<Path>>(path: P, mode: WritingMode) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file), mode))
    }
}

impl<W: Write + Seek> DocxBuilder<W> {
    /// Create a builder over an arbitrary sink.
    ///
    /// The section/geometry descriptor is fixed here, once, from the chosen
    /// writing mode; every later operation shares it read-only.
    pub fn new(sink: W, mode: WritingMode) -> Self {
        Self {
            sink: Some(sink),
            state: State::Open,
            page: mode.page_geometry(),
            paragraph_geometry: mode.paragraph_geometry(),
            mode,
            paragraphs: Vec::new(),
            media: Vec::new(),
        }
    }

    /// The writing mode selected at construction.
    pub fn writing_mode(&self) -> WritingMode {
        self.mode
    }

    /// The page geometry of the document's single section.
    pub fn page_geometry(&self) -> &PageGeometry {
        &self.page
    }

    /// The paragraph nodes appended so far, in order.
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    fn ensure_open(&self) -> Result<()> {
        match self.state {
            State::Open => Ok(()),
            State::Saved => Err(Error::InvalidState("document already saved")),
            State::Disposed => Err(Error::InvalidState("builder disposed")),
        }
    }

    /// Paragraph properties pre-configured with the document's direction
    /// flags.
    fn base_props(&self) -> ParagraphProps {
        ParagraphProps::base(
            self.paragraph_geometry.direction,
            self.paragraph_geometry.kinsoku,
        )
    }

    fn push_page_break(&mut self) {
        let mut paragraph = Paragraph::new(self.base_props());
        paragraph.add_run(Run::with_content(
            RunProps::default(),
            vec![RunContent::Break(BreakKind::Page)],
        ));
        self.paragraphs.push(paragraph);
    }

    /// Add a title page with a centered, fit-scaled cover image.
    ///
    /// No-op when the style is disabled or carries no image path. Fails with
    /// [`Error::NotFound`] when the image file is missing.
    pub fn add_title_page(&mut self, style: &TitlePageStyle) -> Result<()> {
        self.ensure_open()?;

        if !style.enabled {
            return Ok(());
        }
        let Some(path) = style.image_path.as_deref() else {
            return Ok(());
        };
        if !path.exists() {
            return Err(Error::NotFound(path.to_path_buf()));
        }

        let dims = image::read_dimensions(path)?;
        let format = image::ImageFormat::from_path(path)?;
        let data = fs::read(path)?;

        // Printable area in EMUs (1 twip = 635 EMUs).
        let printable_width_emu = self.page.printable_width() * EMU_PER_TWIP;
        let printable_height_emu = self.page.printable_height() * EMU_PER_TWIP;
        let max_width_emu =
            printable_width_emu * i64::from(style.image_max_width_percent.clamp(1, 100)) / 100;
        let max_height_emu =
            printable_height_emu * i64::from(style.image_max_height_percent.clamp(1, 100)) / 100;

        let native_width_emu = i64::from(dims.width) * EMU_PER_INCH / ASSUMED_DPI;
        let native_height_emu = i64::from(dims.height) * EMU_PER_INCH / ASSUMED_DPI;
        let (display_width_emu, display_height_emu) = fit_within(
            native_width_emu,
            native_height_emu,
            max_width_emu,
            max_height_emu,
        );

        debug!(
            "embedding cover image {} ({}x{} px -> {}x{} EMU)",
            path.display(),
            dims.width,
            dims.height,
            display_width_emu,
            display_height_emu
        );

        let index = self.media.len() + 1;
        let relationship_id = format!("rId{index}");
        self.media.push(MediaEntry {
            name: format!("media/image{index}.{}", format.media_extension()),
            extension: format.media_extension(),
            content_type: format.content_type(),
            relationship_id: relationship_id.clone(),
            data,
        });

        let mut props = self.base_props();
        props.justification = Some(Justification::Center);
        let mut paragraph = Paragraph::new(props);
        paragraph.add_run(Run::with_content(
            RunProps::default(),
            vec![RunContent::Drawing(DrawingRef {
                relationship_id,
                width_emu: display_width_emu,
                height_emu: display_height_emu,
            })],
        ));
        self.paragraphs.push(paragraph);

        if style.page_break_after {
            self.push_page_break();
        }
        Ok(())
    }

    /// Add a table-of-contents field construct, with an optional title.
    ///
    /// No-op when the style is disabled. The field is emitted unresolved;
    /// the consuming application populates it on update.
    pub fn add_table_of_contents(&mut self, style: &TableOfContentsStyle) -> Result<()> {
        self.ensure_open()?;

        if !style.enabled {
            return Ok(());
        }

        if let Some(title) = style.title.as_deref().filter(|t| !t.is_empty()) {
            let mut props = self.base_props();
            props.spacing = Some(Spacing::before_after("240", "120"));
            let mut paragraph = Paragraph::new(props);
            paragraph.add_run(Run::text(RunProps::new(32, "000000").with_bold(true), title));
            self.paragraphs.push(paragraph);
        }

        let depth = style.depth.clamp(1, 6);
        let mut paragraph = Paragraph::new(self.base_props());
        paragraph.add_run(Run::with_content(
            RunProps::default(),
            vec![RunContent::FieldChar(FieldCharKind::Begin)],
        ));
        paragraph.add_run(Run::with_content(
            RunProps::default(),
            vec![RunContent::InstrText(format!(
                " TOC \\o \"1-{depth}\" \\h \\z \\u "
            ))],
        ));
        paragraph.add_run(Run::with_content(
            RunProps::default(),
            vec![RunContent::FieldChar(FieldCharKind::Separate)],
        ));
        paragraph.add_run(Run::text(
            RunProps::default(),
            "Update this field to populate the table of contents.",
        ));
        paragraph.add_run(Run::with_content(
            RunProps::default(),
            vec![RunContent::FieldChar(FieldCharKind::End)],
        ));
        self.paragraphs.push(paragraph);

        if style.page_break_after {
            self.push_page_break();
        }
        Ok(())
    }

    /// Add a heading. Fails with [`Error::InvalidArgument`] for levels
    /// outside 1-6, before any node is appended.
    pub fn add_heading(&mut self, level: u8, text: &str, style: &HeadingStyle) -> Result<()> {
        self.ensure_open()?;

        if !(1..=6).contains(&level) {
            return Err(Error::InvalidArgument(format!(
                "heading level must be between 1 and 6, got {level}"
            )));
        }

        if style.show_border && style.border_extent == BorderExtent::Text {
            self.heading_with_spacers(level, text, style);
        } else {
            self.heading_single_paragraph(level, text, style);
        }
        Ok(())
    }

    /// Default rendering: one paragraph whose border (when shown) spans the
    /// full paragraph box including its spacing margins.
    fn heading_single_paragraph(&mut self, level: u8, text: &str, style: &HeadingStyle) {
        let mut props = self.base_props();
        props.outline_level = Some(level - 1);
        props.page_break_before = style.page_break_before;
        if style.show_border {
            props.borders = borders_from_positions(
                &style.border_position,
                style.border_color.as_deref().unwrap_or(DEFAULT_BORDER_COLOR),
                style.border_size,
                style.border_space,
            );
        }
        props.shading = style.background_color.clone().filter(|c| !c.is_empty());

        let mut spacing = Spacing::before_after(&*style.space_before, &*style.space_after);
        if let Some(line) = style.line_spacing.as_deref().filter(|l| !l.is_empty()) {
            spacing.line = Some(line.to_string());
            spacing.rule = Some(LineRule::Exact);
        }
        props.spacing = Some(spacing);

        let mut paragraph = Paragraph::new(props);
        paragraph.add_run(Run::text(
            RunProps::new(style.font_size, &*style.color).with_bold(style.bold),
            text,
        ));
        self.paragraphs.push(paragraph);
    }

    /// "text" extent rendering: spacer paragraphs carry the before/after
    /// spacing so the border hugs the glyph box rather than the full
    /// line-spacing box. Up to three paragraphs are emitted.
    fn heading_with_spacers(&mut self, level: u8, text: &str, style: &HeadingStyle) {
        let has_space_before = !style.space_before.is_empty() && style.space_before != "0";
        let has_space_after = !style.space_after.is_empty() && style.space_after != "0";

        // Before-spacer: carries the space-before and the page break.
        if has_space_before || style.page_break_before {
            let mut props = self.base_props();
            props.page_break_before = style.page_break_before;
            props.spacing = Some(Spacing::before_after(
                if has_space_before {
                    style.space_before.as_str()
                } else {
                    "0"
                },
                "0",
            ));
            self.paragraphs.push(Paragraph::new(props));
        }

        // Main heading: border, outline level, shading, zero spacing.
        let mut props = self.base_props();
        props.outline_level = Some(level - 1);
        props.borders = borders_from_positions(
            &style.border_position,
            style.border_color.as_deref().unwrap_or(DEFAULT_BORDER_COLOR),
            style.border_size,
            style.border_space,
        );
        props.shading = style.background_color.clone().filter(|c| !c.is_empty());

        let mut spacing = Spacing::before_after("0", "0");
        if let Some(line) = style.line_spacing.as_deref().filter(|l| !l.is_empty()) {
            spacing.line = Some(line.to_string());
            spacing.rule = Some(LineRule::Exact);
        }
        props.spacing = Some(spacing);

        let mut paragraph = Paragraph::new(props);
        paragraph.add_run(Run::text(
            RunProps::new(style.font_size, &*style.color).with_bold(style.bold),
            text,
        ));
        self.paragraphs.push(paragraph);

        // After-spacer: carries the space-after.
        if has_space_after {
            let mut props = self.base_props();
            props.spacing = Some(Spacing::before_after("0", style.space_after.as_str()));
            self.paragraphs.push(Paragraph::new(props));
        }
    }

    /// Add a body paragraph.
    pub fn add_paragraph(&mut self, text: &str, style: &ParagraphStyle) -> Result<()> {
        self.ensure_open()?;

        let mut props = self.base_props();
        props.spacing = Some(Spacing::line_auto(&*style.line_spacing));
        props.indent = Some(Indent {
            left: Some(style.left_indent.clone()),
            first_line: Some(style.first_line_indent.clone()),
            hanging: None,
        });

        let mut paragraph = Paragraph::new(props);
        paragraph.add_run(Run::text(RunProps::new(style.font_size, &*style.color), text));
        self.paragraphs.push(paragraph);
        Ok(())
    }

    /// Add an ordered or unordered list, one paragraph per top-level item.
    ///
    /// Ordered items are prefixed with a sequential `N. ` label, unordered
    /// items with a bullet glyph. Nested sub-items are not rendered.
    pub fn add_list(&mut self, items: &[ListItem], ordered: bool, style: &ListStyle) -> Result<()> {
        self.ensure_open()?;

        for (index, item) in items.iter().enumerate() {
            let label = if ordered {
                format!("{}. ", index + 1)
            } else {
                BULLET.to_string()
            };

            let mut props = self.base_props();
            props.indent = Some(Indent {
                left: Some(style.left_indent.clone()),
                first_line: None,
                hanging: Some(style.hanging_indent.clone()),
            });
            props.spacing = Some(Spacing::before_after(
                &*style.space_before,
                &*style.space_after,
            ));

            let mut paragraph = Paragraph::new(props);
            paragraph.add_run(Run::text(
                RunProps::new(style.font_size, &*style.color),
                format!("{label}{}", item.text),
            ));
            self.paragraphs.push(paragraph);
        }
        Ok(())
    }

    /// Add a fenced code block: bordered, shaded, monospace, one run per
    /// source line joined by explicit line breaks.
    pub fn add_code_block(
        &mut self,
        code: &str,
        language: Option<&str>,
        style: &CodeBlockStyle,
    ) -> Result<()> {
        self.ensure_open()?;

        debug!("code block ({} bytes, language {:?})", code.len(), language);

        let mut props = self.base_props();
        props.borders = [
            BorderEdge::Top,
            BorderEdge::Bottom,
            BorderEdge::Left,
            BorderEdge::Right,
        ]
        .iter()
        .map(|edge| Border {
            edge: *edge,
            color: style.border_color.clone(),
            size: 4,
            space: 8,
        })
        .collect();
        props.shading = Some(style.background_color.clone());
        props.spacing = Some(Spacing {
            before: Some(style.space_before.clone()),
            after: Some(style.space_after.clone()),
            line: Some(style.line_spacing.clone()),
            rule: Some(LineRule::Auto),
        });

        let run_props = RunProps::new(style.font_size, &*style.color).with_fonts(
            &*style.monospace_font_ascii,
            &*style.monospace_font_east_asia,
        );

        let mut paragraph = Paragraph::new(props);
        let lines: Vec<&str> = code.split('\n').collect();
        let last = lines.len() - 1;
        for (index, line) in lines.iter().enumerate() {
            let mut content = vec![RunContent::Text((*line).to_string())];
            if index < last {
                content.push(RunContent::Break(BreakKind::Line));
            }
            paragraph.add_run(Run::with_content(run_props.clone(), content));
        }
        self.paragraphs.push(paragraph);
        Ok(())
    }

    /// Add a block quote.
    pub fn add_quote(&mut self, text: &str, style: &QuoteStyle) -> Result<()> {
        self.ensure_open()?;

        let mut props = self.base_props();
        if style.show_border {
            props.borders = borders_from_positions(
                &style.border_position,
                &style.border_color,
                style.border_size,
                style.border_space,
            );
        }
        props.shading = style.background_color.clone().filter(|c| !c.is_empty());
        props.indent = Some(Indent {
            left: Some(style.left_indent.clone()),
            first_line: None,
            hanging: None,
        });
        props.spacing = Some(Spacing::before_after(
            &*style.space_before,
            &*style.space_after,
        ));

        let mut paragraph = Paragraph::new(props);
        paragraph.add_run(Run::text(
            RunProps::new(style.font_size, &*style.color).with_italic(style.italic),
            text,
        ));
        self.paragraphs.push(paragraph);
        Ok(())
    }

    /// Add a fixed-style divider: an empty paragraph carrying only a bottom
    /// border.
    pub fn add_thematic_break(&mut self) -> Result<()> {
        self.ensure_open()?;

        let mut props = self.base_props();
        props.borders = vec![Border {
            edge: BorderEdge::Bottom,
            color: "cccccc".into(),
            size: 6,
            space: 1,
        }];
        props.spacing = Some(Spacing::before_after("200", "200"));
        self.paragraphs.push(Paragraph::new(props));
        Ok(())
    }

    /// Serialize the document package. The builder transitions to the saved
    /// state; further mutation and repeated saves fail with
    /// [`Error::InvalidState`].
    pub fn save(&mut self) -> Result<()> {
        self.ensure_open()?;

        let sink = self
            .sink
            .as_mut()
            .ok_or(Error::InvalidState("output sink released"))?;
        package::write_package(
            &mut *sink,
            &self.page,
            &self.paragraph_geometry,
            &self.paragraphs,
            &self.media,
        )?;
        sink.flush()?;
        self.state = State::Saved;

        debug!(
            "saved document: {} paragraphs, {} media parts",
            self.paragraphs.len(),
            self.media.len()
        );
        Ok(())
    }

    /// Release the output sink. Safe to call multiple times, from any state.
    pub fn dispose(&mut self) {
        if self.state == State::Disposed {
            return;
        }
        self.sink = None;
        self.state = State::Disposed;
    }
}

/// Scale `(width, height)` down to fit both axis bounds, preserving aspect
/// ratio. Never upscales.
fn fit_within(width: i64, height: i64, max_width: i64, max_height: i64) -> (i64, i64) {
    let scale_x = if width > max_width {
        max_width as f64 / width as f64
    } else {
        1.0
    };
    let scale_y = if height > max_height {
        max_height as f64 / height as f64
    } else {
        1.0
    };
    let scale = scale_x.min(scale_y);

    ((width as f64 * scale) as i64, (height as f64 * scale) as i64)
}

/// Parse a comma-separated border position string into border records.
/// Unknown positions fall back to the bottom edge.
fn borders_from_positions(position: &str, color: &str, size: u32, space: u32) -> Vec<Border> {
    let lowered = position.to_ascii_lowercase();
    lowered
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            let edge = match p {
                "left" => BorderEdge::Left,
                "right" => BorderEdge::Right,
                "top" => BorderEdge::Top,
                _ => BorderEdge::Bottom,
            };
            Border {
                edge,
                color: color.to_string(),
                size,
                space,
            }
        })
        .collect()
}
