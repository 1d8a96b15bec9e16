//! Output document node model.
//!
//! The assembly engine grows an append-only sequence of these nodes and
//! serializes them once on save. Plain ownership throughout: no
//! back-references, the builder is the single owner.

use crate::geometry::TextDirection;
use serde::{Deserialize, Serialize};

/// A block-level paragraph node: properties plus zero or more runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub props: ParagraphProps,
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// Create a paragraph with no runs.
    pub fn new(props: ParagraphProps) -> Self {
        Self {
            props,
            runs: Vec::new(),
        }
    }

    /// Append a run.
    pub fn add_run(&mut self, run: Run) {
        self.runs.push(run);
    }

    /// Concatenated text of all runs; breaks become newlines.
    pub fn plain_text(&self) -> String {
        self.runs
            .iter()
            .flat_map(|run| run.content.iter())
            .map(|content| match content {
                RunContent::Text(text) | RunContent::InstrText(text) => text.clone(),
                RunContent::Break(_) => "\n".to_string(),
                RunContent::FieldChar(_) | RunContent::Drawing(_) => String::new(),
            })
            .collect()
    }
}

/// Paragraph-level properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParagraphProps {
    /// Writing direction, from the document's geometry provider.
    pub direction: Option<TextDirection>,
    /// East-Asian line-breaking rules flag.
    pub kinsoku: bool,
    pub justification: Option<Justification>,
    /// Zero-based outline level for navigation/TOC linkage.
    pub outline_level: Option<u8>,
    pub page_break_before: bool,
    pub borders: Vec<Border>,
    /// Background fill color (hex), rendered as clear-pattern shading.
    pub shading: Option<String>,
    pub spacing: Option<Spacing>,
    pub indent: Option<Indent>,
}

impl ParagraphProps {
    /// Properties pre-configured with the document's direction flags.
    pub fn base(direction: TextDirection, kinsoku: bool) -> Self {
        Self {
            direction: Some(direction),
            kinsoku,
            ..Self::default()
        }
    }
}

/// Horizontal alignment of a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Justification {
    Left,
    Center,
    Right,
}

impl Justification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Justification::Left => "left",
            Justification::Center => "center",
            Justification::Right => "right",
        }
    }
}

/// Line and inter-paragraph spacing, all values twip strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spacing {
    pub before: Option<String>,
    pub after: Option<String>,
    pub line: Option<String>,
    pub rule: Option<LineRule>,
}

impl Spacing {
    /// Before/after spacing with no line override.
    pub fn before_after(before: impl Into<String>, after: impl Into<String>) -> Self {
        Self {
            before: Some(before.into()),
            after: Some(after.into()),
            ..Self::default()
        }
    }

    /// Line spacing under the auto rule.
    pub fn line_auto(line: impl Into<String>) -> Self {
        Self {
            line: Some(line.into()),
            rule: Some(LineRule::Auto),
            ..Self::default()
        }
    }
}

/// Line spacing interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineRule {
    Auto,
    Exact,
}

impl LineRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineRule::Auto => "auto",
            LineRule::Exact => "exact",
        }
    }
}

/// Edge a paragraph border is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderEdge {
    Top,
    Bottom,
    Left,
    Right,
}

impl BorderEdge {
    /// Element tag for this edge inside the border container.
    pub(crate) fn tag(&self) -> &'static str {
        match self {
            BorderEdge::Top => "w:top",
            BorderEdge::Bottom => "w:bottom",
            BorderEdge::Left => "w:left",
            BorderEdge::Right => "w:right",
        }
    }
}

/// A single-line paragraph border.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Border {
    pub edge: BorderEdge,
    /// Hex color.
    pub color: String,
    /// Thickness in eighths of a point.
    pub size: u32,
    /// Distance from content in points.
    pub space: u32,
}

/// Paragraph indentation, twip strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indent {
    pub left: Option<String>,
    pub first_line: Option<String>,
    pub hanging: Option<String>,
}

/// A run of content sharing one set of character properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub props: RunProps,
    pub content: Vec<RunContent>,
}

impl Run {
    /// A run holding a single text node.
    pub fn text(props: RunProps, text: impl Into<String>) -> Self {
        Self {
            props,
            content: vec![RunContent::Text(text.into())],
        }
    }

    /// A run with arbitrary content.
    pub fn with_content(props: RunProps, content: Vec<RunContent>) -> Self {
        Self { props, content }
    }
}

/// Character-level properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunProps {
    pub bold: bool,
    pub italic: bool,
    /// Font size in half-points.
    pub size: Option<u32>,
    /// Hex color.
    pub color: Option<String>,
    pub fonts: Option<FontPair>,
}

impl RunProps {
    /// Sized, colored run properties.
    pub fn new(size: u32, color: impl Into<String>) -> Self {
        Self {
            size: Some(size),
            color: Some(color.into()),
            ..Self::default()
        }
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub fn with_fonts(mut self, ascii: impl Into<String>, east_asia: impl Into<String>) -> Self {
        self.fonts = Some(FontPair {
            ascii: ascii.into(),
            east_asia: east_asia.into(),
        });
        self
    }

    /// True when no property is set and the properties element can be
    /// omitted entirely.
    pub fn is_default(&self) -> bool {
        !self.bold
            && !self.italic
            && self.size.is_none()
            && self.color.is_none()
            && self.fonts.is_none()
    }
}

/// ASCII font with an East Asian fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontPair {
    pub ascii: String,
    pub east_asia: String,
}

/// Break kinds a run can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakKind {
    Line,
    Page,
}

/// Markers of the three-part field construct (begin / separate / end).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldCharKind {
    Begin,
    Separate,
    End,
}

impl FieldCharKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldCharKind::Begin => "begin",
            FieldCharKind::Separate => "separate",
            FieldCharKind::End => "end",
        }
    }
}

/// Reference to an embedded image resource with its display extents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawingRef {
    /// Relationship id of the media part this drawing references.
    pub relationship_id: String,
    /// Display width in EMU.
    pub width_emu: i64,
    /// Display height in EMU.
    pub height_emu: i64,
}

/// Content nodes a run can hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunContent {
    /// Literal text with preserved whitespace.
    Text(String),
    Break(BreakKind),
    /// Field instruction payload.
    InstrText(String),
    FieldChar(FieldCharKind),
    /// Inline image.
    Drawing(DrawingRef),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::TextDirection;

    #[test]
    fn test_plain_text_joins_runs_and_breaks() {
        let mut para = Paragraph::new(ParagraphProps::base(TextDirection::LrTb, false));
        para.add_run(Run::with_content(
            RunProps::default(),
            vec![
                RunContent::Text("line one".into()),
                RunContent::Break(BreakKind::Line),
            ],
        ));
        para.add_run(Run::text(RunProps::default(), "line two"));
        assert_eq!(para.plain_text(), "line one\nline two");
    }

    #[test]
    fn test_run_props_default_detection() {
        assert!(RunProps::default().is_default());
        assert!(!RunProps::new(24, "000000").is_default());
        assert!(!RunProps::default().with_bold(true).is_default());
    }

    #[test]
    fn test_base_props_carry_direction() {
        let props = ParagraphProps::base(TextDirection::TbRl, true);
        assert_eq!(props.direction, Some(TextDirection::TbRl));
        assert!(props.kinsoku);
        assert!(props.borders.is_empty());
    }
}
