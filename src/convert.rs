//! Drives a block stream through the assembly engine.
//!
//! The call order is fixed: title page, table of contents, then one builder
//! operation per block, then save. Styles are resolved from the supplied
//! configuration record immediately before each operation consumes them.

use crate::docx::DocxBuilder;
use crate::error::Result;
use crate::model::block::{flatten_inlines, Block};
use crate::style::{self, ConversionConfig};
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

/// Convert a block stream into a DOCX package written to `sink`.
///
/// `input_path` locates the source document; relative cover-image paths
/// resolve against its parent directory. `cover_override` takes precedence
/// over the configured cover image and forces the title page on.
pub fn convert_blocks<W: Write + Seek>(
    blocks: &[Block],
    config: &ConversionConfig,
    input_path: &Path,
    cover_override: Option<&Path>,
    sink: W,
) -> Result<()> {
    let mut builder = DocxBuilder::new(sink, config.text_direction);

    builder.add_title_page(&style::resolve_title_page(config, input_path, cover_override))?;
    builder.add_table_of_contents(&style::resolve_table_of_contents(config))?;

    for block in blocks {
        match block {
            Block::Heading { level, content } => {
                let heading = style::resolve_heading(*level, &config.styles)?;
                builder.add_heading(*level, &flatten_inlines(content), &heading)?;
            }
            Block::CodeBlock { language, code } => {
                builder.add_code_block(
                    code,
                    language.as_deref(),
                    &style::resolve_code_block(&config.styles),
                )?;
            }
            Block::Paragraph { content } => {
                let text = flatten_inlines(content);
                if text.trim().is_empty() {
                    debug!("skipping whitespace-only paragraph");
                    continue;
                }
                builder.add_paragraph(&text, &style::resolve_paragraph(&config.styles))?;
            }
            Block::List { ordered, items } => {
                builder.add_list(items, *ordered, &style::resolve_list(&config.styles))?;
            }
            Block::Quote { content } => {
                builder.add_quote(
                    &flatten_inlines(content),
                    &style::resolve_quote(&config.styles),
                )?;
            }
            Block::ThematicBreak => builder.add_thematic_break()?,
        }
    }

    builder.save()?;
    builder.dispose();
    Ok(())
}

/// Convert a block stream into a DOCX file at `output_path`.
pub fn convert_to_file<P: AsRef<Path>, Q: AsRef<Path>>(
    blocks: &[Block],
    config: &ConversionConfig,
    input_path: P,
    cover_override: Option<&Path>,
    output_path: Q,
) -> Result<()> {
    let file = File::create(output_path)?;
    convert_blocks(
        blocks,
        config,
        input_path.as_ref(),
        cover_override,
        BufWriter::new(file),
    )
}
