//! Style resolution.
//!
//! Maps configuration sections to the concrete, immutable style records the
//! builder consumes. Point sizes double to half-point units here; percent
//! and depth fields clamp into their valid ranges rather than rejecting.

pub mod config;

pub use config::{
    CodeBlockConfig, ConversionConfig, FontConfig, HeadingConfig, ListConfig, MetadataConfig,
    ParagraphConfig, QuoteConfig, StyleConfig, TableOfContentsConfig, TitlePageConfig,
};

use crate::error::{Error, Result};
use crate::model::style::{
    BorderExtent, CodeBlockStyle, HeadingStyle, ListStyle, ParagraphStyle, QuoteStyle,
    TableOfContentsStyle, TitlePageStyle,
};
use std::path::{Path, PathBuf};

/// Resolve the heading style for a level.
///
/// Fails with [`Error::InvalidArgument`] for levels outside 1-6.
pub fn resolve_heading(level: u8, styles: &StyleConfig) -> Result<HeadingStyle> {
    let section = match level {
        1 => &styles.h1,
        2 => &styles.h2,
        3 => &styles.h3,
        4 => &styles.h4,
        5 => &styles.h5,
        6 => &styles.h6,
        _ => {
            return Err(Error::InvalidArgument(format!(
                "heading level must be between 1 and 6, got {level}"
            )))
        }
    };

    let border_extent = if section.border_extent.eq_ignore_ascii_case("text") {
        BorderExtent::Text
    } else {
        BorderExtent::Paragraph
    };

    Ok(HeadingStyle {
        font_size: section.size * 2,
        bold: section.bold,
        color: section.color.clone(),
        show_border: section.show_border,
        border_color: section.border_color.clone(),
        border_size: section.border_size,
        border_space: section.border_space,
        border_position: section.border_position.clone(),
        background_color: section.background_color.clone(),
        line_spacing: section.line_spacing.clone(),
        page_break_before: section.page_break_before,
        space_before: section.space_before.clone(),
        space_after: section.space_after.clone(),
        border_extent,
    })
}

/// Resolve the body-paragraph style.
pub fn resolve_paragraph(styles: &StyleConfig) -> ParagraphStyle {
    ParagraphStyle {
        font_size: styles.paragraph.size * 2,
        color: styles.paragraph.color.clone(),
        line_spacing: styles.paragraph.line_spacing.clone(),
        first_line_indent: styles.paragraph.first_line_indent.clone(),
        left_indent: styles.paragraph.left_indent.clone(),
    }
}

/// Resolve the list style.
pub fn resolve_list(styles: &StyleConfig) -> ListStyle {
    ListStyle {
        font_size: styles.list.size * 2,
        color: styles.list.color.clone(),
        left_indent: styles.list.left_indent.clone(),
        hanging_indent: styles.list.hanging_indent.clone(),
        space_before: styles.list.space_before.clone(),
        space_after: styles.list.space_after.clone(),
    }
}

/// Resolve the code-block style.
pub fn resolve_code_block(styles: &StyleConfig) -> CodeBlockStyle {
    CodeBlockStyle {
        font_size: styles.code_block.size * 2,
        color: styles.code_block.color.clone(),
        background_color: styles.code_block.background_color.clone(),
        border_color: styles.code_block.border_color.clone(),
        monospace_font_ascii: styles.code_block.monospace_font_ascii.clone(),
        monospace_font_east_asia: styles.code_block.monospace_font_east_asia.clone(),
        line_spacing: styles.code_block.line_spacing.clone(),
        space_before: styles.code_block.space_before.clone(),
        space_after: styles.code_block.space_after.clone(),
    }
}

/// Resolve the quote style.
pub fn resolve_quote(styles: &StyleConfig) -> QuoteStyle {
    QuoteStyle {
        font_size: styles.quote.size * 2,
        color: styles.quote.color.clone(),
        italic: styles.quote.italic,
        show_border: styles.quote.show_border,
        border_color: styles.quote.border_color.clone(),
        border_size: styles.quote.border_size,
        border_space: styles.quote.border_space,
        border_position: styles.quote.border_position.clone(),
        background_color: styles.quote.background_color.clone(),
        left_indent: styles.quote.left_indent.clone(),
        space_before: styles.quote.space_before.clone(),
        space_after: styles.quote.space_after.clone(),
    }
}

/// Resolve the table-of-contents settings, clamping depth into 1-6.
pub fn resolve_table_of_contents(config: &ConversionConfig) -> TableOfContentsStyle {
    let section = &config.table_of_contents;
    TableOfContentsStyle {
        enabled: section.enabled,
        depth: section.depth.clamp(1, 6),
        title: section.title.clone(),
        page_break_after: section.page_break_after,
    }
}

/// Resolve the title-page settings.
///
/// An explicit cover-image override wins over the configured path and forces
/// the title page enabled. A relative image path resolves against the
/// directory containing the input document; absolute paths pass through
/// unchanged. Percent fields clamp into 1-100.
pub fn resolve_title_page(
    config: &ConversionConfig,
    input_path: &Path,
    cover_override: Option<&Path>,
) -> TitlePageStyle {
    let section = &config.title_page;

    let (enabled, source) = match cover_override {
        Some(path) => (true, Some(path.to_path_buf())),
        None => (
            section.enabled,
            section.image_path.as_ref().map(PathBuf::from),
        ),
    };

    TitlePageStyle {
        enabled,
        image_path: source.map(|path| resolve_against_input(&path, input_path)),
        image_max_width_percent: section.image_max_width_percent.clamp(1, 100) as u32,
        image_max_height_percent: section.image_max_height_percent.clamp(1, 100) as u32,
        page_break_after: section.page_break_after,
    }
}

fn resolve_against_input(path: &Path, input_path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match input_path.parent() {
        Some(dir) => dir.join(path),
        None => path.to_path_buf(),
    }
}
