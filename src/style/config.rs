//! Externally-supplied style configuration record.
//!
//! The record arrives already parsed and schema-validated by the caller;
//! file loading is out of scope here. Every section has the defaults the
//! bundled presets assume, so partial records deserialize cleanly.

use crate::geometry::WritingMode;
use serde::{Deserialize, Serialize};

/// Root configuration for a conversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Schema version, checked by the caller.
    pub schema_version: String,
    pub metadata: MetadataConfig,
    /// Writing mode for the whole document.
    pub text_direction: WritingMode,
    pub styles: StyleConfig,
    pub fonts: FontConfig,
    pub table_of_contents: TableOfContentsConfig,
    pub title_page: TitlePageConfig,
}

/// Free-form configuration metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    pub name: String,
    pub description: String,
    pub author: Option<String>,
    pub version: Option<String>,
}

/// Per-kind style sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub h1: HeadingConfig,
    pub h2: HeadingConfig,
    pub h3: HeadingConfig,
    pub h4: HeadingConfig,
    pub h5: HeadingConfig,
    pub h6: HeadingConfig,
    pub paragraph: ParagraphConfig,
    pub list: ListConfig,
    pub code_block: CodeBlockConfig,
    pub quote: QuoteConfig,
}

/// Heading style section (one per level).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingConfig {
    /// Font size in points.
    pub size: u32,
    pub bold: bool,
    /// Text color in hex (e.g. "000000").
    pub color: String,
    pub show_border: bool,
    /// Border color in hex, or `None` to use the builder default.
    pub border_color: Option<String>,
    /// Border thickness in eighths of a point.
    pub border_size: u32,
    /// Space between border and content in points.
    pub border_space: u32,
    /// Border edges, comma-separated ("bottom", "left,bottom", ...).
    pub border_position: String,
    pub background_color: Option<String>,
    /// Exact line spacing in twips, or `None` for the default.
    pub line_spacing: Option<String>,
    pub page_break_before: bool,
    /// Spacing before in twips.
    pub space_before: String,
    /// Spacing after in twips.
    pub space_after: String,
    /// "paragraph" (border spans the full box) or "text" (border hugs the
    /// glyph box via spacer paragraphs).
    pub border_extent: String,
}

impl Default for HeadingConfig {
    fn default() -> Self {
        Self {
            size: 0,
            bold: true,
            color: String::new(),
            show_border: false,
            border_color: None,
            border_size: 12,
            border_space: 0,
            border_position: "bottom".into(),
            background_color: None,
            line_spacing: None,
            page_break_before: false,
            space_before: "240".into(),
            space_after: "120".into(),
            border_extent: "paragraph".into(),
        }
    }
}

/// Body paragraph style section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagraphConfig {
    /// Font size in points.
    pub size: u32,
    pub color: String,
    /// Line spacing in twips.
    pub line_spacing: String,
    pub first_line_indent: String,
    pub left_indent: String,
}

impl Default for ParagraphConfig {
    fn default() -> Self {
        Self {
            size: 0,
            color: String::new(),
            line_spacing: "360".into(),
            first_line_indent: "0".into(),
            left_indent: "0".into(),
        }
    }
}

/// List style section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Font size in points.
    pub size: u32,
    pub color: String,
    pub left_indent: String,
    pub hanging_indent: String,
    pub space_before: String,
    pub space_after: String,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            size: 0,
            color: String::new(),
            left_indent: "720".into(),
            hanging_indent: "360".into(),
            space_before: "60".into(),
            space_after: "60".into(),
        }
    }
}

/// Code block style section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeBlockConfig {
    /// Font size in points.
    pub size: u32,
    pub color: String,
    pub background_color: String,
    pub border_color: String,
    pub monospace_font_ascii: String,
    pub monospace_font_east_asia: String,
    pub line_spacing: String,
    pub space_before: String,
    pub space_after: String,
}

impl Default for CodeBlockConfig {
    fn default() -> Self {
        Self {
            size: 0,
            color: String::new(),
            background_color: String::new(),
            border_color: String::new(),
            monospace_font_ascii: String::new(),
            monospace_font_east_asia: String::new(),
            line_spacing: "240".into(),
            space_before: "240".into(),
            space_after: "240".into(),
        }
    }
}

/// Quote style section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    /// Font size in points.
    pub size: u32,
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

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            size: 0,
            color: String::new(),
            italic: true,
            show_border: true,
            border_color: String::new(),
            border_size: 12,
            border_space: 0,
            border_position: "left".into(),
            background_color: None,
            left_indent: "720".into(),
            space_before: "240".into(),
            space_after: "240".into(),
        }
    }
}

/// Global font section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// ASCII font name.
    pub ascii: String,
    /// East Asian font name (CJK fallback).
    pub east_asia: String,
    /// Default font size in points.
    pub default_size: u32,
}

/// Table of contents section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOfContentsConfig {
    pub enabled: bool,
    /// Heading depth to include (1-6, e.g. 3 covers H1-H3).
    pub depth: u8,
    /// Optional title displayed above the field.
    pub title: Option<String>,
    pub page_break_after: bool,
}

impl Default for TableOfContentsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            depth: 3,
            title: None,
            page_break_after: false,
        }
    }
}

/// Title page section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TitlePageConfig {
    pub enabled: bool,
    /// Cover image path, absolute or relative to the input document.
    pub image_path: Option<String>,
    /// Maximum image width as a percentage of the printable area.
    pub image_max_width_percent: i32,
    /// Maximum image height as a percentage of the printable area.
    pub image_max_height_percent: i32,
    pub page_break_after: bool,
}

impl Default for TitlePageConfig {
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
