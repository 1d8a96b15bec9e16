//! Resolved style records.
//!
//! Each record is an immutable value object produced by the style resolver
//! and consumed exactly once by the matching builder operation. Font sizes
//! are in half-points, spacing and indentation are twip strings, border
//! sizes are in eighths of a point.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Whether a bordered heading's border box encloses the full paragraph
/// (including its spacing margins) or only the text's tight bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderExtent {
    /// Border spans the full paragraph box including spacing.
    #[default]
    Paragraph,
    /// Border hugs the text via spacer paragraphs.
    Text,
}

/// Resolved heading formatting for a single level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingStyle {
    /// Font size in half-points.
    pub font_size: u32,
    pub bold: bool,
    /// Text color as a hex string (e.g. "000000").
    pub color: String,
    pub show_border: bool,
    /// Border color, or `None` to fall back to the builder default.
    pub border_color: Option<String>,
    /// Border thickness in eighths of a point.
    pub border_size: u32,
    /// Space between border and content in points.
    pub border_space: u32,
    /// Comma-separated border edges ("bottom", "left,bottom", ...).
    pub border_position: String,
    pub background_color: Option<String>,
    /// Exact line spacing in twips, or `None` for the default.
    pub line_spacing: Option<String>,
    pub page_break_before: bool,
    /// Spacing before the heading in twips.
    pub space_before: String,
    /// Spacing after the heading in twips.
    pub space_after: String,
    pub border_extent: BorderExtent,
}

/// Resolved body-paragraph formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphStyle {
    /// Font size in half-points.
    pub font_size: u32,
    pub color: String,
    /// Line spacing in twips, auto rule.
    pub line_spacing: String,
    pub first_line_indent: String,
    pub left_indent: String,
}

/// Resolved list-item formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListStyle {
    /// Font size in half-points.
    pub font_size: u32,
    pub color: String,
    pub left_indent: String,
    pub hanging_indent: String,
    pub space_before: String,
    pub space_after: String,
}

/// Resolved code-block formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlockStyle {
    /// Font size in half-points.
    pub font_size: u32,
    pub color: String,
    pub background_color: String,
    pub border_color: String,
    /// Monospace font for ASCII characters.
    pub monospace_font_ascii: String,
    /// Monospace fallback for East Asian characters.
    pub monospace_font_east_asia: String,
    pub line_spacing: String,
    pub space_before: String,
    pub space_after: String,
}

/// Resolved block-quote formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteStyle {
    /// Font size in half-points.
    pub font_size: u32,
    pub color: String,
    pub italic: bool,
    pub show_border: bool,
    pub border_color: String,
    pub border_size: u32,
    pub border_space: u32,
    pub border_position: String,
    pub background_color: Option<String>,
    pub left_indent: String,
    pub space_before: String,
    pub space_after: String,
}

/// Resolved table-of-contents settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOfContentsStyle {
    pub enabled: bool,
    /// Heading depth included in the field instruction (1-6).
    pub depth: u8,
    /// Optional title shown above the field paragraph.
    pub title: Option<String>,
    pub page_break_after: bool,
}

/// Resolved title-page settings with the cover image path fully resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitlePageStyle {
    pub enabled: bool,
    /// Resolved path to the cover image.
    pub image_path: Option<PathBuf>,
    /// Maximum width as a percentage of the printable area (1-100).
    pub image_max_width_percent: u32,
    /// Maximum height as a percentage of the printable area (1-100).
    pub image_max_height_percent: u32,
    pub page_break_after: bool,
}

impl Default for TitlePageStyle {
    fn default() -> Self {
        Self {
            enabled: false,
            image_path: None,
            image_max_width_percent: 80,
            image_max_height_percent: 80,
            page_break_after: true,
        }
    }
}
